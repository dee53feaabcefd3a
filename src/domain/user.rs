//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Validation errors returned by the user value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email address is not well-formed"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier assigned by the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 4;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 20;

/// Account name chosen at registration.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - Between [`USERNAME_MIN`] and [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = username.as_ref().trim();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = normalized.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }

        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only: one @, a non-empty local part, and a dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address used as the login identifier.
///
/// ## Invariants
/// - Matches the well-formedness shape check.
/// - Stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = email.as_ref().trim();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(normalized) {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self(normalized.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Opaque password hash in PHC string format.
///
/// Holds the salted Argon2id output, never the raw secret. The inner string
/// is deliberately not printable through `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed PHC hash string.
    pub fn from_phc_string(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The PHC-formatted hash string for storage or verification.
    pub fn as_phc_string(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Application user.
///
/// ## Invariants
/// - `username` and `email` satisfy their value-type validation.
/// - `password_hash` is set once at creation; there is no change-password
///   path in this application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Account name shown in the navigation bar.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Login identifier.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Record creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user record awaiting store-assigned identity.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}
