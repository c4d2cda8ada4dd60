//! Error types for the Twitter provider

use bridge_traits::error::BridgeError;
use bridge_traits::http::HttpResponse;
use core_auth::AuthError;
use serde_json::Value;
use thiserror::Error;

/// Twitter provider errors
#[derive(Error, Debug)]
pub enum TwitterError {
    /// The operation needs a user context but the client has no signer
    #[error("Authorization is required for this Twitter operation")]
    AuthorizationRequired,

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Direct message text exceeds 140 characters
    #[error("Message too long: {0}")]
    MessageLength(String),

    #[error("Duplicate status: {0}")]
    DuplicateStatus(String),

    #[error("Operation not permitted: {0}")]
    OperationNotPermitted(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// 420 (v1 "enhance your calm") or 429
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Twitter server error (status {status_code}): {message}")]
    ServerError { status_code: u16, message: String },

    #[error("Twitter API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, TwitterError>;

impl TwitterError {
    /// Map a non-2xx REST API response to a typed error.
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        let message = error_message(&response.body);

        match status {
            401 => TwitterError::NotAuthorized(message),
            403 if is_message_length(&message) => TwitterError::MessageLength(message),
            403 if is_duplicate(&message) => TwitterError::DuplicateStatus(message),
            403 => TwitterError::OperationNotPermitted(message),
            404 => TwitterError::ResourceNotFound(message),
            420 | 429 => TwitterError::RateLimitExceeded(message),
            500..=599 => TwitterError::ServerError {
                status_code: status,
                message,
            },
            _ => TwitterError::ApiError {
                status_code: status,
                message,
            },
        }
    }
}

fn is_message_length(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("over 140 characters") || message.contains("too long")
}

fn is_duplicate(message: &str) -> bool {
    message.to_lowercase().contains("duplicate")
}

/// Pulls the message out of `{"error": ".."}`, `{"errors": [{"message": ..}]}`
/// or `{"errors": ".."}`, falling back to the raw body.
fn error_message(body: &[u8]) -> String {
    let raw = || String::from_utf8_lossy(body).into_owned();

    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return raw();
    };

    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return error.to_string();
    }

    match value.get("errors") {
        Some(Value::String(errors)) => errors.clone(),
        Some(Value::Array(errors)) => {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                raw()
            } else {
                messages.join("; ")
            }
        }
        _ => raw(),
    }
}

impl From<AuthError> for TwitterError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::AuthorizationRequired { .. } => TwitterError::AuthorizationRequired,
            other => TwitterError::NotAuthorized(other.to_string()),
        }
    }
}

impl From<TwitterError> for BridgeError {
    fn from(error: TwitterError) -> Self {
        match error {
            TwitterError::Bridge(e) => e,
            other => BridgeError::OperationFailed(other.to_string()),
        }
    }
}
