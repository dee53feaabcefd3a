//! Request guard that resolves the authenticated user.
//!
//! Handlers that require a signed-in user take a [`CurrentUser`] argument.
//! Extraction fails with an unauthorized error when the session carries no
//! user id, or when the id no longer matches a stored account; the error
//! response layer turns that into a redirect to the login page.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, User};

use super::error::map_user_persistence_error;
use super::session::SessionContext;
use super::state::HttpState;

/// The resolved identity of the requesting user.
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let session = session
                .await
                .map_err(|error| Error::internal(format!("session extraction failed: {error}")))?;
            let state =
                state.ok_or_else(|| Error::internal("application state not configured"))?;

            let Some(user_id) = session.user_id()? else {
                return Err(Error::unauthorized("login required"));
            };

            let user = state
                .users
                .find_by_id(user_id)
                .await
                .map_err(map_user_persistence_error)?;

            match user {
                Some(user) => Ok(CurrentUser(user)),
                None => {
                    // The account behind this session is gone; drop the
                    // session rather than serving a ghost identity.
                    debug!(%user_id, "session referenced a missing user");
                    session.clear();
                    Err(Error::unauthorized("login required"))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the access gate.
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App, HttpResponse};

    use crate::inbound::http::test_utils::{authenticated_cookie, test_state};
    use crate::inbound::http::ApiResult;

    async fn whoami(user: CurrentUser) -> ApiResult<HttpResponse> {
        Ok(HttpResponse::Ok().body(user.user().username().to_string()))
    }

    #[actix_web::test]
    async fn anonymous_requests_redirect_to_login() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .expect("location header"),
            "/login"
        );
    }

    #[actix_web::test]
    async fn authenticated_requests_resolve_the_user() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let cookie = authenticated_cookie(&state, "gatekeeper").await;
        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        assert_eq!(body, "gatekeeper");
    }
}
