// Error taxonomy and response normalization.
//
// The moderation service has exactly two failure shapes: a structured
// JSON error document, or a plain-text body. `ClientError::from_response`
// folds both into one `Remote` variant and is total — any byte sequence
// the service sends back produces a usable error, never a second failure.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Every failure a [`ModerationClient`](crate::ModerationClient) operation
/// can surface.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP exchange itself failed (connect, DNS, protocol).
    /// Propagated verbatim — never normalized.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered 401 for the configured auth token.
    #[error("authentication failed: the moderation service rejected the configured auth token")]
    Authentication,

    /// Any other non-200 answer, body normalized per `from_response`.
    #[error("moderation service returned status {status_code}")]
    Remote {
        status_code: u16,
        /// The decoded JSON error document, or `Value::String` holding
        /// the raw text when the body wasn't JSON.
        message: serde_json::Value,
    },

    /// A 200 answer whose body didn't match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A required option was missing. Raised before any I/O.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The external work queue refused the job.
    #[error("queue error: {0}")]
    Queue(String),

    /// The notification side-store failed.
    #[error("notification store error: {0}")]
    Store(String),
}

impl ClientError {
    /// Normalize a non-200 response into an error value.
    ///
    /// 401 maps to the fixed [`ClientError::Authentication`] message; every
    /// other status keeps its code and carries the body as decoded JSON
    /// when it parses, or as a raw string when it doesn't.
    pub fn from_response(status_code: u16, body: &str) -> Self {
        if status_code == 401 {
            return ClientError::Authentication;
        }
        let message = serde_json::from_str(body)
            .unwrap_or_else(|_| serde_json::Value::String(body.to_string()));
        ClientError::Remote {
            status_code,
            message,
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for ClientError {
    fn from(err: rusqlite::Error) -> Self {
        ClientError::Store(err.to_string())
    }
}
