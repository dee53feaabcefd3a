//! Diesel-backed post store (the durable variant).
//!
//! Every query filters on the owning user id; dashboards pass a limit, list
//! pages do not.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::posts::{BlogPost, NewBlogPost, NewSocialPost, SocialPost};
use crate::domain::user::UserId;

use super::models::{BlogPostRow, NewBlogPostRow, NewSocialPostRow, SocialPostRow};
use super::pool::DbPool;
use super::schema::{blog_posts, social_posts};

/// Durable post store over a pooled SQLite database.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a repository over an initialised pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: DieselError) -> PostPersistenceError {
    PostPersistenceError::query(error.to_string())
}

async fn run_query<T, F>(pool: &DbPool, query: F) -> Result<T, PostPersistenceError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, PostPersistenceError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|err| PostPersistenceError::connection(err.to_string()))?;
        query(&mut conn)
    })
    .await
    .map_err(|err| PostPersistenceError::query(format!("blocking task failed: {err}")))?
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create_blog_post(
        &self,
        owner: UserId,
        draft: NewBlogPost,
    ) -> Result<BlogPost, PostPersistenceError> {
        run_query(&self.pool, move |conn| {
            let row = NewBlogPostRow {
                user_id: owner.as_i64(),
                title: draft.title(),
                content: draft.content(),
                created_at: Utc::now().naive_utc(),
            };

            diesel::insert_into(blog_posts::table)
                .values(&row)
                .returning(BlogPostRow::as_returning())
                .get_result(conn)
                .map(BlogPost::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn create_social_post(
        &self,
        owner: UserId,
        draft: NewSocialPost,
    ) -> Result<SocialPost, PostPersistenceError> {
        run_query(&self.pool, move |conn| {
            let row = NewSocialPostRow {
                user_id: owner.as_i64(),
                platform: draft.platform(),
                content: draft.content(),
                scheduled_time: draft.scheduled_time(),
                created_at: Utc::now().naive_utc(),
            };

            diesel::insert_into(social_posts::table)
                .values(&row)
                .returning(SocialPostRow::as_returning())
                .get_result(conn)
                .map(SocialPost::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn blog_posts_for(
        &self,
        owner: UserId,
        limit: Option<i64>,
    ) -> Result<Vec<BlogPost>, PostPersistenceError> {
        run_query(&self.pool, move |conn| {
            let mut query = blog_posts::table
                .filter(blog_posts::user_id.eq(owner.as_i64()))
                .order((blog_posts::created_at.desc(), blog_posts::id.desc()))
                .select(BlogPostRow::as_select())
                .into_boxed();
            if let Some(limit) = limit {
                query = query.limit(limit);
            }

            let rows: Vec<BlogPostRow> = query.load(conn).map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(BlogPost::from).collect())
        })
        .await
    }

    async fn social_posts_for(
        &self,
        owner: UserId,
        limit: Option<i64>,
    ) -> Result<Vec<SocialPost>, PostPersistenceError> {
        run_query(&self.pool, move |conn| {
            // SQLite sorts NULL lowest, so DESC places unscheduled posts last.
            let mut query = social_posts::table
                .filter(social_posts::user_id.eq(owner.as_i64()))
                .order((social_posts::scheduled_time.desc(), social_posts::id.desc()))
                .select(SocialPostRow::as_select())
                .into_boxed();
            if let Some(limit) = limit {
                query = query.limit(limit);
            }

            let rows: Vec<SocialPostRow> = query.load(conn).map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(SocialPost::from).collect())
        })
        .await
    }
}
