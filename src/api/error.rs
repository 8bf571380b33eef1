//! Errors produced by API calls.

use serde::Deserialize;

/// Failure taxonomy for every request the console issues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the session (HTTP 401).
    #[error("authentication required")]
    AuthenticationRequired,

    /// The resource still has associations (HTTP 409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("API returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unsupported HTTP method `{0}`")]
    UnsupportedMethod(String),

    /// A HATEOAS action the caller relied on was not declared by the server.
    #[error("missing `{0}` link")]
    MissingLink(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Maps a non-success status and its body onto the taxonomy.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::AuthenticationRequired,
            409 => ApiError::Conflict(detail(body)),
            _ => ApiError::Status {
                status,
                detail: detail(body),
            },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::AuthenticationRequired)
    }
}

/// Pulls `detail` out of a FastAPI-style error body, falling back to the raw text.
fn detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
