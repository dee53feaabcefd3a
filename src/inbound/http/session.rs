//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: binding a user id, resolving it on later
//! requests, clearing it at logout, and carrying flash messages between a
//! redirect and the next render.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "_flashes";

/// Category of a flash message, mapped to a CSS class on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Danger,
}

impl FlashKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// One-shot message stored in the session and drained on next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            message: message.into(),
        }
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the authenticated user's id to the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_i64())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<i64>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(id.map(UserId::new))
    }

    /// Drop the whole session, returning the client to anonymous.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Queue a flash message for the next rendered page.
    pub fn push_flash(&self, flash: Flash) -> Result<(), Error> {
        let mut flashes = self.peek_flashes()?;
        flashes.push(flash);
        self.0
            .insert(FLASH_KEY, flashes)
            .map_err(|error| Error::internal(format!("failed to store flash: {error}")))
    }

    /// Drain queued flash messages for rendering.
    pub fn take_flashes(&self) -> Result<Vec<Flash>, Error> {
        let flashes = self.peek_flashes()?;
        self.0.remove(FLASH_KEY);
        Ok(flashes)
    }

    fn peek_flashes(&self) -> Result<Vec<Flash>, Error> {
        Ok(self
            .0
            .get::<Vec<Flash>>(FLASH_KEY)
            .map_err(|error| Error::internal(format!("failed to read flashes: {error}")))?
            .unwrap_or_default())
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
