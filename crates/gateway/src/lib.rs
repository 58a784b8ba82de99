//! Post actions gateway.
//!
//! Translates form submissions into calls against a remote posts collection
//! and normalises every outcome into an [`ActionResult`]. The upstream is a
//! [`PostsUpstream`] handed in by the caller, [`HttpPostsUpstream`] in
//! production.

pub mod actions;
pub mod errors;
pub mod form;
pub mod observability;
pub mod result;
pub mod upstream;

pub use actions::PostActions;
pub use errors::GatewayError;
pub use form::{FormInput, PostForm, PostId};
pub use result::{ActionResult, CreatedPost, DeletedPost, PostList, UpdatedPost};
pub use upstream::{HttpPostsUpstream, NewPost, PostUpdate, PostsUpstream};

use std::sync::Arc;

use configs::UpstreamConfig;

/// Build the production gateway from configuration.
pub fn from_config(cfg: &UpstreamConfig) -> Result<PostActions<dyn PostsUpstream>, GatewayError> {
    let upstream: Arc<dyn PostsUpstream> = Arc::new(HttpPostsUpstream::from_config(cfg)?);
    Ok(PostActions::new(upstream).with_user_id(cfg.user_id))
}
