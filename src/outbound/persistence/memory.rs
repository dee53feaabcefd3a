//! Volatile in-memory stores.
//!
//! Each store owns its rows and a forward-only id counter behind one mutex,
//! so the uniqueness scan and the insert happen atomically. Ids are never
//! recycled: the counter only increments, even though no delete operation
//! exists today. Correct for a single process only; a restart loses
//! everything.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    PostPersistenceError, PostRepository, UserPersistenceError, UserRepository,
};
use crate::domain::posts::{BlogPost, NewBlogPost, NewSocialPost, SocialPost};
use crate::domain::user::{EmailAddress, NewUser, User, UserId};

#[derive(Default)]
struct UserState {
    users: Vec<User>,
    next_id: i64,
}

/// Volatile credential store.
#[derive(Default)]
pub struct MemoryUserRepository {
    state: Mutex<UserState>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users. Test observability helper.
    pub fn user_count(&self) -> usize {
        self.state.lock().map(|state| state.users.len()).unwrap_or(0)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query("store lock poisoned"))?;

        if state.users.iter().any(|user| user.email() == &new_user.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        if state
            .users
            .iter()
            .any(|user| user.username() == &new_user.username)
        {
            return Err(UserPersistenceError::duplicate_username());
        }

        state.next_id += 1;
        let user = User::new(
            UserId::new(state.next_id),
            new_user.username,
            new_user.email,
            new_user.password_hash,
            Utc::now(),
        );
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query("store lock poisoned"))?;
        Ok(state.users.iter().find(|user| user.email() == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| UserPersistenceError::query("store lock poisoned"))?;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }
}

#[derive(Default)]
struct PostState {
    blog_posts: Vec<BlogPost>,
    social_posts: Vec<SocialPost>,
    next_blog_id: i64,
    next_social_id: i64,
}

/// Volatile post store.
#[derive(Default)]
pub struct MemoryPostRepository {
    state: Mutex<PostState>,
}

impl MemoryPostRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn truncate<T>(mut rows: Vec<T>, limit: Option<i64>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(usize::try_from(limit).unwrap_or(0));
    }
    rows
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create_blog_post(
        &self,
        owner: UserId,
        draft: NewBlogPost,
    ) -> Result<BlogPost, PostPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query("store lock poisoned"))?;
        state.next_blog_id += 1;
        let post = BlogPost {
            id: state.next_blog_id,
            user_id: owner,
            title: draft.title().to_owned(),
            content: draft.content().to_owned(),
            created_at: Utc::now(),
        };
        state.blog_posts.push(post.clone());
        Ok(post)
    }

    async fn create_social_post(
        &self,
        owner: UserId,
        draft: NewSocialPost,
    ) -> Result<SocialPost, PostPersistenceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query("store lock poisoned"))?;
        state.next_social_id += 1;
        let post = SocialPost {
            id: state.next_social_id,
            user_id: owner,
            platform: draft.platform().to_owned(),
            content: draft.content().to_owned(),
            scheduled_time: draft.scheduled_time(),
            created_at: Utc::now(),
        };
        state.social_posts.push(post.clone());
        Ok(post)
    }

    async fn blog_posts_for(
        &self,
        owner: UserId,
        limit: Option<i64>,
    ) -> Result<Vec<BlogPost>, PostPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query("store lock poisoned"))?;
        let mut rows: Vec<BlogPost> = state
            .blog_posts
            .iter()
            .filter(|post| post.user_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(truncate(rows, limit))
    }

    async fn social_posts_for(
        &self,
        owner: UserId,
        limit: Option<i64>,
    ) -> Result<Vec<SocialPost>, PostPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| PostPersistenceError::query("store lock poisoned"))?;
        let mut rows: Vec<SocialPost> = state
            .social_posts
            .iter()
            .filter(|post| post.user_id == owner)
            .cloned()
            .collect();
        // Unscheduled posts sort after every scheduled one, matching the
        // SQL `ORDER BY scheduled_time DESC` treatment of NULL.
        rows.sort_by(|a, b| {
            b.scheduled_time
                .cmp(&a.scheduled_time)
                .then(b.id.cmp(&a.id))
        });
        Ok(truncate(rows, limit))
    }
}
