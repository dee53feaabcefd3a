//! Login, registration, and logout handlers.
//!
//! Failed logins always re-render the form with the one generic failure
//! message, and duplicate registrations never say which field collided.

use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::{RegistrationError, GENERIC_LOGIN_FAILURE};

use super::gate::CurrentUser;
use super::render;
use super::session::{Flash, SessionContext};
use super::state::HttpState;
use super::ApiResult;

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct LoginForm {
    email: String,
    password: String,
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
}

const LOGIN_BODY: &str = concat!(
    "<h1>Login</h1>",
    r#"<form method="post" action="/login">"#,
    r#"<label>Email <input type="email" name="email" required></label>"#,
    r#"<label>Password <input type="password" name="password" required></label>"#,
    r#"<button type="submit">Login</button></form>"#,
    r#"<p>No account yet? <a href="/register">Register</a></p>"#
);

const REGISTER_BODY: &str = concat!(
    "<h1>Register</h1>",
    r#"<form method="post" action="/register">"#,
    r#"<label>Username <input type="text" name="username" required></label>"#,
    r#"<label>Email <input type="email" name="email" required></label>"#,
    r#"<label>Password <input type="password" name="password" required></label>"#,
    r#"<button type="submit">Register</button></form>"#,
    r#"<p>Already registered? <a href="/login">Login</a></p>"#
);

fn login_page_with(flashes: Vec<Flash>) -> HttpResponse {
    render::html(render::page("Login", None, &flashes, LOGIN_BODY))
}

fn register_page_with(flashes: Vec<Flash>) -> HttpResponse {
    render::html(render::page("Register", None, &flashes, REGISTER_BODY))
}

#[get("/login")]
pub async fn login_page(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_some() {
        return Ok(render::redirect("/dashboard"));
    }
    Ok(login_page_with(session.take_flashes()?))
}

#[post("/login")]
pub async fn login_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(_) => return Ok(login_page_with(vec![Flash::danger(GENERIC_LOGIN_FAILURE)])),
    };

    match state.auth.authenticate(&credentials).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            info!(user_id = %user.id(), "user logged in");
            Ok(render::redirect("/dashboard"))
        }
        Err(error) if error.code() == crate::domain::ErrorCode::Unauthorized => {
            Ok(login_page_with(vec![Flash::danger(GENERIC_LOGIN_FAILURE)]))
        }
        Err(error) => Err(error),
    }
}

#[get("/register")]
pub async fn register_page(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_some() {
        return Ok(render::redirect("/dashboard"));
    }
    Ok(register_page_with(session.take_flashes()?))
}

#[post("/register")]
pub async fn register_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let registration =
        match Registration::try_from_parts(&form.username, &form.email, &form.password) {
            Ok(registration) => registration,
            Err(error) => {
                return Ok(register_page_with(vec![Flash::danger(error.to_string())]));
            }
        };

    match state.auth.register(&registration).await {
        Ok(_) => {
            session.push_flash(Flash::success("Registration successful! Please login."))?;
            Ok(render::redirect("/login"))
        }
        Err(RegistrationError::Duplicate) => Ok(register_page_with(vec![Flash::danger(
            RegistrationError::Duplicate.to_string(),
        )])),
        Err(RegistrationError::Store(error)) => Err(error),
    }
}

#[get("/logout")]
pub async fn logout(session: SessionContext, _current: CurrentUser) -> HttpResponse {
    session.clear();
    render::redirect("/")
}

#[cfg(test)]
mod tests {
    //! End-to-end coverage of the authentication flow over in-memory stores.
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use rstest::rstest;

    use crate::domain::GENERIC_LOGIN_FAILURE;
    use crate::inbound::http::test_utils::{test_session_middleware, test_state, TEST_PASSWORD};

    use super::*;

    fn auth_app(
        state: crate::inbound::http::state::HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(login_page)
            .service(login_submit)
            .service(register_page)
            .service(register_submit)
            .service(logout)
    }

    fn register_form(username: &str, email: &str, password: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[actix_web::test]
    async fn register_then_login_round_trip() {
        let app = test::init_service(auth_app(test_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form(register_form("alice", "alice@x.com", TEST_PASSWORD))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .expect("location header"),
            "/login"
        );

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    email: "alice@x.com".into(),
                    password: TEST_PASSWORD.into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .expect("location header"),
            "/dashboard"
        );
        assert!(response
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "session"));
    }

    #[rstest]
    #[case("unknown@x.com", TEST_PASSWORD)]
    #[case("alice@x.com", "wrong-password")]
    #[actix_web::test]
    async fn failed_logins_re_render_with_one_message(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let state = test_state();
        crate::inbound::http::test_utils::authenticated_cookie(&state, "alice").await;
        let app = test::init_service(auth_app(state)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    email: email.into(),
                    password: password.into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(response).await.to_vec()).expect("utf-8");
        assert!(body.contains(GENERIC_LOGIN_FAILURE));
    }

    #[actix_web::test]
    async fn duplicate_registration_is_rejected_without_detail() {
        let app = test::init_service(auth_app(test_state())).await;

        let first = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form(register_form("alice", "alice@x.com", TEST_PASSWORD))
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::SEE_OTHER);

        let second = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form(register_form("alice2", "alice@x.com", TEST_PASSWORD))
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(second).await.to_vec()).expect("utf-8");
        assert!(body.contains("already exists"));
    }

    #[actix_web::test]
    async fn invalid_registration_re_renders_the_form() {
        let app = test::init_service(auth_app(test_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form(register_form("abc", "abc@x.com", TEST_PASSWORD))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(response).await.to_vec()).expect("utf-8");
        assert!(body.contains("at least 4"));
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let state = test_state();
        let cookie =
            crate::inbound::http::test_utils::authenticated_cookie(&state, "alice").await;
        let app = test::init_service(auth_app(state)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .expect("location header"),
            "/"
        );
    }
}
