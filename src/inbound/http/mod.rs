//! HTTP inbound adapter serving the server-rendered site.

pub mod auth;
pub mod error;
pub mod gate;
pub mod pages;
pub mod posts;
pub mod render;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
