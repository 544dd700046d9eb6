//! Errors raised by external collaborators (market data, candidates, notifier).

use thiserror::Error;

/// Failure talking to an upstream service.
///
/// Every variant is recoverable at the scheduler level: the affected ticker
/// (or candidate list) is skipped for the current cycle.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Non-success HTTP status.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    /// Body could not be decoded or a field had an unexpected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Provider answered with a throttling notice instead of data.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider answered successfully but with no usable data.
    #[error("No data returned for {0}")]
    Empty(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServiceError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ServiceError::RateLimited(_))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_connect() {
            ServiceError::Connection(err.to_string())
        } else if err.is_decode() {
            ServiceError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ServiceError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ServiceError::Connection(err.to_string())
        }
    }
}

impl From<url::ParseError> for ServiceError {
    fn from(err: url::ParseError) -> Self {
        ServiceError::InvalidRequest(err.to_string())
    }
}

/// Turn a non-2xx response into [`ServiceError::Http`], passing 2xx through.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    if status.as_u16() == 429 {
        return Err(ServiceError::RateLimited(message));
    }
    Err(ServiceError::Http {
        status: status.as_u16(),
        message,
    })
}
