//! Errors that can occur when talking to the hosting API.

use thiserror::Error;

/// Enumeration of errors that can occur in operations from [`crate::api`].
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent or its response could not be read,
    /// e.g. the API is unreachable, timed out, or answered with malformed
    /// JSON. Only the latter is not worth retrying.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-2xx status. `message` is the API's own
    /// explanation when it gave one.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// An endpoint URL could not be constructed.
    #[error(transparent)]
    Url(#[from] url::ParseError),
    /// The HTTP client could not be set up.
    #[error("invalid client configuration: {0}")]
    Client(String),
}

impl Error {
    /// Whether trying the same request again later may succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// use hub_surf::api::Error;
    ///
    /// let rate_limited = Error::Status { status: 429, message: "slow down".into() };
    /// let not_found = Error::Status { status: 404, message: "Not Found".into() };
    ///
    /// assert!(rate_limited.is_retryable());
    /// assert!(!not_found.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(err) => !err.is_decode(),
            Error::Status { status, .. } => *status == 429 || *status >= 500,
            Error::Url(_) | Error::Client(_) => false,
        }
    }
}
