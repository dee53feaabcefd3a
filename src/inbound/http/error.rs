//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into responses. This is a server-rendered
//! site, so an unauthenticated failure becomes a redirect to the login page
//! rather than a bare 401.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::ports::{PostPersistenceError, UserPersistenceError};
use crate::domain::{Error, ErrorCode};

use super::render;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::SEE_OTHER,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redacted_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        "Internal server error"
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::Unauthorized) {
            // Redirect with no disclosure about why access was refused.
            return HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .finish();
        }

        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = %self.message(), "request failed");
        }

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(render::error_page(redacted_message(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail | UserPersistenceError::DuplicateUsername => {
            Error::conflict(error.to_string())
        }
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_post_persistence_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => Error::service_unavailable(message),
        PostPersistenceError::Query { message } => Error::internal(message),
    }
}
