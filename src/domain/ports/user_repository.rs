//! Port abstraction for the credential store and its errors.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by credential store adapters.
    pub enum UserPersistenceError {
        /// A user with the requested email already exists.
        DuplicateEmail => "a user with this email already exists",
        /// A user with the requested username already exists.
        DuplicateUsername => "a user with this username already exists",
        /// Store connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
    }
}

/// Credential store port.
///
/// Both variants (durable SQLite and volatile in-memory) enforce email and
/// username uniqueness. No update or delete operations are exposed.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored record with its assigned id.
    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}
