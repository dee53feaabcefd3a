//! Authentication primitives: login credentials and registration input.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError, Username};

/// Minimum allowed password length at registration.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or failed the shape check.
    Email(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authentication service.
///
/// ## Invariants
/// - `email` satisfies the [`EmailAddress`] shape check.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use quillboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice@x.com", "secret1").unwrap();
/// assert_eq!(creds.email().as_ref(), "alice@x.com");
/// ```
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(LoginValidationError::Email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address suitable for user lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username was missing or outside the allowed length.
    Username(UserValidationError),
    /// Email was missing or failed the shape check.
    Email(UserValidationError),
    /// Password was shorter than the minimum.
    PasswordTooShort { min: usize },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) | Self::Email(err) => err.fmt(f),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration input.
///
/// ## Invariants
/// - `username` and `email` satisfy their value-type validation.
/// - `password` is at least [`PASSWORD_MIN`] characters.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username).map_err(RegistrationValidationError::Username)?;
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::Email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }

        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Raw password awaiting hashing. Never stored or logged.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
