//! Row structs mapping the SQLite schema to domain types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ports::UserPersistenceError;
use crate::domain::posts::{BlogPost, SocialPost};
use crate::domain::user::{EmailAddress, PasswordHash, User, UserId, Username};

use super::schema::{blog_posts, social_posts, users};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(super) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = UserPersistenceError;

    /// Stored rows were validated at insert; a failure here means the
    /// database was modified out of band.
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| UserPersistenceError::query(format!("stored username: {err}")))?;
        let email = EmailAddress::new(&row.email)
            .map_err(|err| UserPersistenceError::query(format!("stored email: {err}")))?;

        Ok(User::new(
            UserId::new(row.id),
            username,
            email,
            PasswordHash::from_phc_string(row.password_hash),
            row.created_at.and_utc(),
        ))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(super) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = blog_posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(super) struct BlogPostRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            title: row.title,
            content: row.content,
            created_at: row.created_at.and_utc(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = blog_posts)]
pub(super) struct NewBlogPostRow<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = social_posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(super) struct SocialPostRow {
    pub id: i64,
    pub user_id: i64,
    pub platform: String,
    pub content: String,
    pub scheduled_time: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<SocialPostRow> for SocialPost {
    fn from(row: SocialPostRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            platform: row.platform,
            content: row.content,
            scheduled_time: row.scheduled_time,
            created_at: row.created_at.and_utc(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = social_posts)]
pub(super) struct NewSocialPostRow<'a> {
    pub user_id: i64,
    pub platform: &'a str,
    pub content: &'a str,
    pub scheduled_time: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}
