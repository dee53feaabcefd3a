//! Registration and credential-verification use-cases.
//!
//! The service sits over the [`UserRepository`] port so HTTP handler tests can
//! substitute an in-memory store instead of wiring persistence.

use std::sync::Arc;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::password::{hash_password, verify_password};
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{NewUser, User};

/// The single user-visible login failure message.
///
/// Deliberately identical whether the email is unknown or the password is
/// wrong, to avoid user enumeration.
pub const GENERIC_LOGIN_FAILURE: &str = "Invalid email or password";

/// Failures surfaced by [`AuthService::register`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Email or username already taken. The two cases are collapsed so the
    /// response does not reveal which field conflicted.
    #[error("an account with those details already exists")]
    Duplicate,
    /// The store failed for reasons unrelated to the input.
    #[error(transparent)]
    Store(Error),
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail | UserPersistenceError::DuplicateUsername => {
            Error::conflict(error.to_string())
        }
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Registration and login over an abstract credential store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    /// Create a new service backed by the given credential store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Hash the password and insert the new user.
    ///
    /// The password hash is set exactly once here; there is no
    /// change-password path.
    pub async fn register(&self, registration: &Registration) -> Result<User, RegistrationError> {
        let password_hash =
            hash_password(registration.password()).map_err(RegistrationError::Store)?;

        let new_user = NewUser {
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
        };

        match self.users.create(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id(), "registered new user");
                Ok(user)
            }
            Err(
                UserPersistenceError::DuplicateEmail | UserPersistenceError::DuplicateUsername,
            ) => Err(RegistrationError::Duplicate),
            Err(err) => Err(RegistrationError::Store(map_user_persistence_error(err))),
        }
    }

    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown email and wrong password produce the identical
    /// [`GENERIC_LOGIN_FAILURE`] error.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let maybe_user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?;

        let Some(user) = maybe_user else {
            tracing::debug!("login failed: no matching account");
            return Err(Error::unauthorized(GENERIC_LOGIN_FAILURE));
        };

        if verify_password(credentials.password(), user.password_hash())? {
            Ok(user)
        } else {
            tracing::debug!("login failed: credential mismatch");
            Err(Error::unauthorized(GENERIC_LOGIN_FAILURE))
        }
    }
}
