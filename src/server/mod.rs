//! Server wiring: store selection, session middleware, and the HTTP runner.

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use tracing::{info, warn};

use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, pages, posts};
use crate::outbound::persistence::memory::{MemoryPostRepository, MemoryUserRepository};
use crate::outbound::persistence::{
    DbPool, DieselPostRepository, DieselUserRepository, PoolError,
};

mod config;

pub use config::{ConfigError, ServerConfig};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise the database pool: {0}")]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Select the durable or volatile store pair from the configuration.
///
/// With `DATABASE_URL` set, users and posts persist to SQLite; without it,
/// everything lives in process memory and is lost on restart.
pub fn build_state(config: &ServerConfig) -> Result<HttpState, PoolError> {
    match config.database_url.as_deref() {
        Some(url) => {
            let pool = DbPool::connect(url)?;
            info!(database_url = url, "using the durable store");
            Ok(HttpState::new(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPostRepository::new(pool)),
            ))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory stores that forget on restart");
            Ok(HttpState::new(
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryPostRepository::new()),
            ))
        }
    }
}

/// Cookie-session middleware with the production cookie settings.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .cookie_secure(cookie_secure)
        .build()
}

/// Bind and run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = build_state(&config)?;
    let key = config.session_key();
    let cookie_secure = config.cookie_secure;

    info!(bind_addr = %config.bind_addr, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(session_middleware(key.clone(), cookie_secure))
            .service(pages::index)
            .service(auth::login_page)
            .service(auth::login_submit)
            .service(auth::register_page)
            .service(auth::register_submit)
            .service(auth::logout)
            .service(pages::dashboard)
            .service(pages::blog_index)
            .service(posts::blog_form)
            .service(posts::blog_submit)
            .service(pages::social_index)
            .service(posts::social_form)
            .service(posts::social_submit)
            .service(pages::chatbot)
            .service(pages::analytics)
            .service(pages::content)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
