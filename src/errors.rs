//! Crate-wide error hierarchy for push-forwarder.
//!
//! Goals:
//! - Single root `Error` for all fallible public functions.
//! - Transport-aware delivery mapping (timeout, status classes, network).
//! - No dynamic dispatch, ergonomic `?` via `From` impls.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ForwardResult<T> = Result<T, Error>;

/// Root error type for the push-forwarder crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Change collection failure (diff capability I/O).
    #[error(transparent)]
    Collect(#[from] CollectError),

    /// Configuration problems (empty endpoint url).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Event delivery failure (transport or HTTP status).
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Failures raised by the change-provider capability while resolving the
/// modifications of a push.
#[derive(Debug, Error)]
pub enum CollectError {
    /// I/O error from the underlying repository session.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The session could not produce a diff for an existing revision.
    #[error("revision unavailable: {0}")]
    RevisionUnavailable(String),
}

/// Configuration errors detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Endpoint url is empty; delivery must not be attempted.
    #[error("endpoint url is empty")]
    EmptyUrl,
}

/// Delivery errors for a single send attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other non-2xx HTTP status.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Event payload could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Delivery(DeliveryError::from(e))
    }
}

// ===== Mapping from reqwest::Error into DeliveryError =====

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return DeliveryError::Timeout;
        }

        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => DeliveryError::Unauthorized,
                403 => DeliveryError::Forbidden,
                404 => DeliveryError::NotFound,
                500..=599 => DeliveryError::Server(code),
                _ => DeliveryError::HttpStatus(code),
            };
        }

        DeliveryError::Network(e.to_string())
    }
}
