//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::{test, web, App, HttpResponse};

use crate::domain::auth::Registration;
use crate::domain::{Error, UserId};
use crate::outbound::persistence::memory::{MemoryPostRepository, MemoryUserRepository};

use super::session::SessionContext;
use super::state::HttpState;

/// Password shared by every fixture account.
pub const TEST_PASSWORD: &str = "secret1";

fn test_key() -> Key {
    // Fixed key so cookies minted by one test app decrypt in another.
    Key::from(&[7u8; 64])
}

/// Session middleware matching production settings, minus the secure flag so
/// plain-HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), test_key())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

/// Handler state over fresh in-memory stores.
pub fn test_state() -> HttpState {
    HttpState::new(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemoryPostRepository::new()),
    )
}

/// Register `username` and mint a session cookie bound to the new account.
pub async fn authenticated_cookie(state: &HttpState, username: &str) -> Cookie<'static> {
    let registration =
        Registration::try_from_parts(username, &format!("{username}@example.com"), TEST_PASSWORD)
            .expect("valid fixture registration");
    let user = state
        .auth
        .register(&registration)
        .await
        .expect("fixture registration succeeds");

    session_cookie_for(user.id()).await
}

/// Mint a session cookie carrying an arbitrary user id.
pub async fn session_cookie_for(user_id: UserId) -> Cookie<'static> {
    let app = test::init_service(App::new().wrap(test_session_middleware()).route(
        "/fixture-login/{id}",
        web::get().to(|session: SessionContext, path: web::Path<i64>| async move {
            session.persist_user(UserId::new(path.into_inner()))?;
            Ok::<_, Error>(HttpResponse::Ok())
        }),
    ))
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/fixture-login/{}", user_id.as_i64()))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());

    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
