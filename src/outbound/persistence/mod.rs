//! Persistence adapters for the credential and post stores.
//!
//! Two variants implement the same ports:
//! - [`memory`]: volatile in-process stores, single-process only; all users
//!   and sessions are lost on restart.
//! - Diesel on SQLite: the durable variant, selected when `DATABASE_URL` is
//!   configured.

mod diesel_post_repository;
mod diesel_user_repository;
pub mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolError};
