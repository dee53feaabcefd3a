//! Port traits connecting the domain to persistence adapters.
//!
//! In hexagonal terms these are *driven* ports: the domain and the HTTP
//! handlers depend on the traits here, and `outbound` supplies the adapters
//! (Diesel-backed or in-memory).

mod macros;
mod post_repository;
mod user_repository;

pub(crate) use macros::define_port_error;
pub use post_repository::{PostPersistenceError, PostRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
