use axum::extract::{Form, State};
use gateway::{CreatedPost, DeletedPost, FormInput, PostActions, PostList, PostsUpstream, UpdatedPost};

use crate::errors::ActionResponse;

#[derive(Clone)]
pub struct ServerState {
    pub actions: PostActions<dyn PostsUpstream>,
}

impl ServerState {
    pub fn new(actions: PostActions<dyn PostsUpstream>) -> Self {
        Self { actions }
    }
}

/// 列出所有帖子
pub async fn list_posts(State(state): State<ServerState>) -> ActionResponse<PostList> {
    ActionResponse(state.actions.list_posts().await)
}

/// 创建帖子
pub async fn add_post(State(state): State<ServerState>, Form(form): Form<FormInput>) -> ActionResponse<CreatedPost> {
    ActionResponse(state.actions.create_post(&form).await)
}

/// 更新帖子
pub async fn edit_post(State(state): State<ServerState>, Form(form): Form<FormInput>) -> ActionResponse<UpdatedPost> {
    ActionResponse(state.actions.update_post(&form).await)
}

/// 删除帖子
pub async fn delete_post(State(state): State<ServerState>, Form(form): Form<FormInput>) -> ActionResponse<DeletedPost> {
    ActionResponse(state.actions.delete_post(&form).await)
}
