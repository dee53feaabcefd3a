//! Domain primitives, validation, and use-case services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! layers. Keep types immutable and document invariants in each type's
//! Rustdoc. Port traits live in [`ports`]; adapters live in `outbound`.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod posts;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::auth_service::{AuthService, RegistrationError, GENERIC_LOGIN_FAILURE};
pub use self::error::{Error, ErrorCode};
pub use self::password::{hash_password, verify_password};
pub use self::posts::{BlogPost, NewBlogPost, NewSocialPost, PostValidationError, SocialPost};
pub use self::user::{EmailAddress, NewUser, PasswordHash, User, UserId, UserValidationError, Username};
