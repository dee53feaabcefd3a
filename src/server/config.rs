//! Environment-driven server configuration.

use std::env;

use actix_web::cookie::Key;
use tracing::warn;

/// Minimum byte length accepted for the session signing secret.
const SECRET_KEY_MIN_BYTES: usize = 32;

/// Fallback secret used when `SECRET_KEY` is unset. Sessions signed with it
/// are forgeable, so it is only acceptable for local development.
const INSECURE_DEV_SECRET: &str = "insecure-development-secret-change-me-before-deploying";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SECRET_KEY must be at least {min} bytes")]
    SecretKeyTooShort { min: usize },
}

/// Runtime settings resolved once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub cookie_secure: bool,
    pub database_url: Option<String>,
    secret_key: String,
}

impl ServerConfig {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_key = match get("SECRET_KEY") {
            Some(value) => {
                if value.len() < SECRET_KEY_MIN_BYTES {
                    return Err(ConfigError::SecretKeyTooShort {
                        min: SECRET_KEY_MIN_BYTES,
                    });
                }
                value
            }
            None => {
                warn!("SECRET_KEY not set; sessions use an insecure development secret");
                INSECURE_DEV_SECRET.to_owned()
            }
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let cookie_secure = get("COOKIE_SECURE")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let database_url = get("DATABASE_URL");

        Ok(Self {
            bind_addr,
            cookie_secure,
            database_url,
            secret_key,
        })
    }

    /// Derive the cookie signing key from the configured secret.
    pub fn session_key(&self) -> Key {
        Key::derive_from(self.secret_key.as_bytes())
    }
}
