use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - check the configured API key")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-success HTTP status or transport failure
    Fetch,
    /// Body was not the expected JSON
    Decode,
    /// Client could not be built from the configuration
    Config,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    fn describe(status: reqwest::StatusCode, body: &str) -> String {
        let body = body.trim();
        if body.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, Self::truncate_body(body))
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(Self::describe(status, body)),
            404 => ApiError::NotFound(Self::describe(status, body)),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(Self::describe(status, body)),
            _ => ApiError::InvalidResponse(format!("Status {}", Self::describe(status, body))),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::InvalidConfig(_) => ErrorKind::Config,
            _ => ErrorKind::Fetch,
        }
    }
}
