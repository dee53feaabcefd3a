//! Port abstraction for per-user post persistence.

use async_trait::async_trait;

use crate::domain::posts::{BlogPost, NewBlogPost, NewSocialPost, SocialPost};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Store connection could not be established.
        Connection { message: String } => "post store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post store query failed: {message}",
    }
}

/// Post store port. Every query is filtered to a single owner.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a blog post owned by `owner`.
    async fn create_blog_post(
        &self,
        owner: UserId,
        draft: NewBlogPost,
    ) -> Result<BlogPost, PostPersistenceError>;

    /// Insert a social post owned by `owner`.
    async fn create_social_post(
        &self,
        owner: UserId,
        draft: NewSocialPost,
    ) -> Result<SocialPost, PostPersistenceError>;

    /// Blog posts owned by `owner`, newest first, optionally capped.
    async fn blog_posts_for(
        &self,
        owner: UserId,
        limit: Option<i64>,
    ) -> Result<Vec<BlogPost>, PostPersistenceError>;

    /// Social posts owned by `owner`, scheduled time descending (unscheduled
    /// posts last), optionally capped.
    async fn social_posts_for(
        &self,
        owner: UserId,
        limit: Option<i64>,
    ) -> Result<Vec<SocialPost>, PostPersistenceError>;
}
