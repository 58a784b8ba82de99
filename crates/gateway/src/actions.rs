use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::errors::GatewayError;
use crate::form::{FormInput, PostForm};
use crate::observability::record_action;
use crate::result::{ActionResult, CreatedPost, DeletedPost, PostList, UpdatedPost};
use crate::upstream::{NewPost, PostUpdate, PostsUpstream};

pub const FETCH_POSTS_FAILED: &str = "Failed to fetch posts";
pub const CREATE_POST_FAILED: &str = "Failed to create post";
pub const UPDATE_POST_FAILED: &str = "Failed to update post";
pub const DELETE_POST_FAILED: &str = "Failed to delete post";

/// Author attached to every post written through the gateway unless configured otherwise.
pub const DEFAULT_USER_ID: i64 = 1;

/// The post actions gateway: one read and three mutations, each a single
/// upstream call whose outcome is folded into an [`ActionResult`].
pub struct PostActions<U: ?Sized + PostsUpstream> {
    upstream: Arc<U>,
    user_id: i64,
}

impl<U: ?Sized + PostsUpstream> Clone for PostActions<U> {
    fn clone(&self) -> Self {
        Self { upstream: Arc::clone(&self.upstream), user_id: self.user_id }
    }
}

impl<U: ?Sized + PostsUpstream> PostActions<U> {
    pub fn new(upstream: Arc<U>) -> Self {
        Self { upstream, user_id: DEFAULT_USER_ID }
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> ActionResult<PostList> {
        let res = self.upstream.list().await.map(|posts| PostList { posts });
        if let Ok(list) = &res {
            info!(count = list.posts.len(), "fetched posts");
        }
        conclude("list_posts", FETCH_POSTS_FAILED, res)
    }

    #[instrument(skip_all)]
    pub async fn create_post(&self, form: &FormInput) -> ActionResult<CreatedPost> {
        let res = self.try_create(form).await;
        if let Ok(created) = &res {
            info!(post_id = ?created.new_post.get("id"), "created post");
        }
        conclude("create_post", CREATE_POST_FAILED, res)
    }

    #[instrument(skip_all, fields(post_id = form.get("id").unwrap_or_default()))]
    pub async fn update_post(&self, form: &FormInput) -> ActionResult<UpdatedPost> {
        let res = self.try_update(form).await;
        if res.is_ok() {
            info!("updated post");
        }
        conclude("update_post", UPDATE_POST_FAILED, res)
    }

    /// Success only means the request went through; the upstream response is not inspected.
    #[instrument(skip_all, fields(post_id = form.get("id").unwrap_or_default()))]
    pub async fn delete_post(&self, form: &FormInput) -> ActionResult<DeletedPost> {
        let id = form.post_id();
        let res = self
            .upstream
            .delete(&id)
            .await
            .map(|()| DeletedPost { id: id.as_number() });
        if res.is_ok() {
            info!("deleted post");
        }
        conclude("delete_post", DELETE_POST_FAILED, res)
    }

    async fn try_create(&self, form: &FormInput) -> Result<CreatedPost, GatewayError> {
        let PostForm { title, body } = PostForm::try_from(form)?;
        let new_post = NewPost { title, body, user_id: self.user_id };
        let created = self.upstream.create(&new_post).await?;
        Ok(CreatedPost { new_post: created })
    }

    async fn try_update(&self, form: &FormInput) -> Result<UpdatedPost, GatewayError> {
        let PostForm { title, body } = PostForm::try_from(form)?;
        let id = form.post_id();
        let update = PostUpdate { id: id.clone(), title, body, user_id: self.user_id };
        let updated = self.upstream.update(&id, &update).await?;
        Ok(UpdatedPost { updated_post: updated })
    }
}

/// Fold an operation's outcome into the caller-facing result.
/// Validation keeps its own message; upstream failures get the operation's generic one.
fn conclude<T>(action: &'static str, failure_message: &str, res: Result<T, GatewayError>) -> ActionResult<T> {
    record_action(action, res.is_ok());
    match res {
        Ok(payload) => ActionResult::Success(payload),
        Err(GatewayError::Validation(message)) => {
            warn!(action, status = 400, %message, "rejected form before calling upstream");
            ActionResult::failure(400, message)
        }
        Err(e) => {
            error!(action, status = e.status(), error = %e, "upstream call failed");
            ActionResult::failure(e.status(), failure_message)
        }
    }
}
