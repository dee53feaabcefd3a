//! Blog and social post entities plus their validated drafts.
//!
//! Posts are owned exclusively by one user; the owner id is carried outside
//! the draft so handlers cannot forge ownership through form input.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::user::UserId;

/// Form format for the scheduled-time field (`<input type="datetime-local">`).
pub const SCHEDULED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Validation errors returned by the draft constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyTitle,
    EmptyContent,
    EmptyPlatform,
    InvalidScheduledTime,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::EmptyPlatform => write!(f, "platform must not be empty"),
            Self::InvalidScheduledTime => {
                write!(f, "scheduled time must use the {SCHEDULED_TIME_FORMAT} format")
            }
        }
    }
}

impl std::error::Error for PostValidationError {}

/// A journal entry owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: i64,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A scheduled social-media post owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialPost {
    pub id: i64,
    pub user_id: UserId,
    pub platform: String,
    pub content: String,
    pub scheduled_time: Option<NaiveDateTime>,
    pub created_at: DateTime<Utc>,
}

/// Validated draft for a new blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    title: String,
    content: String,
}

impl NewBlogPost {
    /// Construct a draft from raw form inputs.
    pub fn try_from_parts(title: &str, content: &str) -> Result<Self, PostValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }

        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Validated draft for a new social post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialPost {
    platform: String,
    content: String,
    scheduled_time: Option<NaiveDateTime>,
}

impl NewSocialPost {
    /// Construct a draft from raw form inputs.
    ///
    /// An empty scheduled-time field means "unscheduled"; a present but
    /// unparseable value is a validation error rather than silent `None`.
    pub fn try_from_parts(
        platform: &str,
        content: &str,
        scheduled_time: &str,
    ) -> Result<Self, PostValidationError> {
        let platform = platform.trim();
        if platform.is_empty() {
            return Err(PostValidationError::EmptyPlatform);
        }
        if content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }

        let scheduled_time = match scheduled_time.trim() {
            "" => None,
            raw => Some(
                NaiveDateTime::parse_from_str(raw, SCHEDULED_TIME_FORMAT)
                    .map_err(|_| PostValidationError::InvalidScheduledTime)?,
            ),
        };

        Ok(Self {
            platform: platform.to_owned(),
            content: content.to_owned(),
            scheduled_time,
        })
    }

    pub fn platform(&self) -> &str {
        self.platform.as_str()
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    pub fn scheduled_time(&self) -> Option<NaiveDateTime> {
        self.scheduled_time
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "body", PostValidationError::EmptyTitle)]
    #[case("  ", "body", PostValidationError::EmptyTitle)]
    #[case("title", "", PostValidationError::EmptyContent)]
    fn blog_draft_requires_title_and_content(
        #[case] title: &str,
        #[case] content: &str,
        #[case] expected: PostValidationError,
    ) {
        let err = NewBlogPost::try_from_parts(title, content).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn blog_draft_trims_title_only() {
        let draft = NewBlogPost::try_from_parts("  Hello  ", "world\n").expect("valid draft");
        assert_eq!(draft.title(), "Hello");
        assert_eq!(draft.content(), "world\n");
    }

    #[rstest]
    #[case("", "body", "", PostValidationError::EmptyPlatform)]
    #[case("mastodon", "", "", PostValidationError::EmptyContent)]
    #[case("mastodon", "body", "tomorrow", PostValidationError::InvalidScheduledTime)]
    #[case("mastodon", "body", "2026-08-27", PostValidationError::InvalidScheduledTime)]
    fn social_draft_validation(
        #[case] platform: &str,
        #[case] content: &str,
        #[case] scheduled: &str,
        #[case] expected: PostValidationError,
    ) {
        let err =
            NewSocialPost::try_from_parts(platform, content, scheduled).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn social_draft_parses_datetime_local_format() {
        let draft = NewSocialPost::try_from_parts("mastodon", "hello", "2026-08-27T09:30")
            .expect("valid draft");
        let scheduled = draft.scheduled_time().expect("scheduled time present");
        assert_eq!(
            scheduled.format(SCHEDULED_TIME_FORMAT).to_string(),
            "2026-08-27T09:30"
        );
    }

    #[rstest]
    fn social_draft_allows_blank_schedule() {
        let draft = NewSocialPost::try_from_parts("mastodon", "hello", "  ").expect("valid draft");
        assert!(draft.scheduled_time().is_none());
    }
}
