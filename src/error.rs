// Error types shared across the workflow.
//
// Only `SessionError` ends the program. Token and transport failures are
// reported to the user and the loop moves on to the "submit another?" prompt.

use thiserror::Error;

/// A field validator refused the input. Recovered locally by re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Rejection(pub String);

impl Rejection {
    pub fn new(msg: impl Into<String>) -> Self {
        Rejection(msg.into())
    }
}

/// Fatal errors: the session stops and the process exits nonzero.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("too many invalid attempts for {field}, giving up")]
    ExhaustedAttempts { field: String },

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

/// The request never produced an HTTP response (connection refused, timeout,
/// bad header value, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError(format!("request timed out: {}", err))
        } else {
            TransportError(err.to_string())
        }
    }
}

/// Fetching the token failed. The cache is left untouched so the next
/// submission tries again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("token request failed: {0}")]
    Transport(#[from] TransportError),
}
