//! Error types and status classification for backend calls.
//!
//! The backend reports failures as free-form text in a `message` (or
//! `error`) field. That text is treated as opaque user-facing copy; the only
//! classification done here is by HTTP status plus a coarse keyword check
//! for stock/limit rejections.

use thiserror::Error;

/// Shown when the server gave no usable message.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown for connection failures and timeouts.
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Shown when a 401 invalidates the session.
pub const SESSION_MESSAGE: &str = "Your session has expired. Please log in again.";

const LIMIT_KEYWORDS: &[&str] = &["stock", "limit", "exceed"];

/// Coarse categories surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Resource already taken (HTTP 409).
    Conflict,
    /// Stock or quota exceeded, recognised from the server message.
    LimitExceeded,
    /// Connection failure or client-side timeout.
    Network,
    /// Bearer token rejected (HTTP 401 on an authenticated request).
    Session,
    /// Anything else the server or the media host rejected.
    Server,
}

/// Errors that can occur while talking to the backend or media host.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request exceeded the client-side timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Failed to reach the server
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP 401. `session_rejected` is set only when the request carried a
    /// bearer token; a 401 from login or registration is a bad credential.
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("no details"))]
    Unauthorized {
        message: Option<String>,
        session_rejected: bool,
    },

    /// Resource conflict, e.g. a gig another mechanic already took
    #[error("Conflict: {}", .message.as_deref().unwrap_or("no details"))]
    Conflict { message: Option<String> },

    /// Stock or quantity limit rejected by the server
    #[error("Limit exceeded: {message}")]
    LimitExceeded { message: String },

    /// Any other non-success status
    #[error("Server error: {status} - {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// Success status with a body we could not decode
    #[error("Unexpected response from '{path}': {reason}")]
    Decode { path: String, reason: String },

    /// The media host rejected the direct upload
    #[error("Upload failed: {0}")]
    Upload(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 => ApiError::Unauthorized {
                message,
                session_rejected: false,
            },
            409 => ApiError::Conflict { message },
            400..=499 => match message {
                Some(text) if mentions_limit(&text) => ApiError::LimitExceeded { message: text },
                message => ApiError::Status { status, message },
            },
            _ => ApiError::Status { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Timeout { .. } | ApiError::Connection { .. } => ErrorKind::Network,
            ApiError::Unauthorized {
                session_rejected: true,
                ..
            } => ErrorKind::Session,
            ApiError::Conflict { .. } => ErrorKind::Conflict,
            ApiError::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            ApiError::Unauthorized { .. }
            | ApiError::Status { .. }
            | ApiError::Decode { .. }
            | ApiError::Upload(_) => ErrorKind::Server,
        }
    }

    /// Text for the status modal.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout { .. } | ApiError::Connection { .. } => NETWORK_MESSAGE.to_string(),
            ApiError::Unauthorized {
                session_rejected: true,
                ..
            } => SESSION_MESSAGE.to_string(),
            ApiError::LimitExceeded { message } => message.clone(),
            ApiError::Unauthorized { message, .. }
            | ApiError::Conflict { message }
            | ApiError::Status { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
            ApiError::Upload(message) if !message.is_empty() => message.clone(),
            ApiError::Upload(_) | ApiError::Decode { .. } => GENERIC_MESSAGE.to_string(),
        }
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Accepts `{"message": "..."}`, `{"error": "..."}` and the media host's
/// `{"error": {"message": "..."}}`.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let text = value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| value.get("error").and_then(|e| e.as_str()))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
        })?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn mentions_limit(message: &str) -> bool {
    let lower = message.to_lowercase();
    LIMIT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
