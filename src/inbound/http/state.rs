//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{PostRepository, UserRepository};
use crate::domain::AuthService;

/// Repositories and services shared across workers via `web::Data`.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub auth: AuthService,
}

impl HttpState {
    /// Wire up handler state from the configured repositories.
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        let auth = AuthService::new(Arc::clone(&users));
        Self { users, posts, auth }
    }
}
