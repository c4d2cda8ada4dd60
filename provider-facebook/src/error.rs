//! Error types for the Facebook provider

use bridge_traits::error::BridgeError;
use bridge_traits::http::HttpResponse;
use core_auth::AuthError;
use serde::Deserialize;
use thiserror::Error;

/// Facebook provider errors
#[derive(Error, Debug)]
pub enum FacebookError {
    /// The operation needs a user access token but the client has none
    #[error("Authorization is required for this Facebook operation")]
    AuthorizationRequired,

    /// Token missing, invalid or expired (401 or Graph code 190)
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The token lacks a permission the operation needs
    #[error("Insufficient permission: {0}")]
    InsufficientPermission(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// 403 without a more specific Graph error code
    #[error("Operation not permitted: {0}")]
    OperationNotPermitted(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Facebook server error (status {status_code}): {message}")]
    ServerError { status_code: u16, message: String },

    /// API request returned an error
    #[error("Facebook API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Result type for Facebook operations
pub type Result<T> = std::result::Result<T, FacebookError>;

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
struct GraphErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

impl FacebookError {
    /// Map a non-2xx Graph API response to a typed error.
    ///
    /// Graph error codes take precedence over the status code, so a 400 that
    /// carries code 190 is still reported as [`FacebookError::NotAuthorized`].
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        let detail = serde_json::from_slice::<GraphErrorBody>(&response.body)
            .map(|body| body.error)
            .unwrap_or_else(|_| GraphErrorDetail {
                message: String::from_utf8_lossy(&response.body).into_owned(),
                ..GraphErrorDetail::default()
            });

        let message = match &detail.kind {
            Some(kind) if !detail.message.is_empty() => format!("{}: {}", kind, detail.message),
            _ => detail.message,
        };

        match (status, detail.code) {
            (401, _) | (_, Some(190)) => FacebookError::NotAuthorized(message),
            (_, Some(10)) | (_, Some(200..=299)) => FacebookError::InsufficientPermission(message),
            (_, Some(4)) | (_, Some(17)) | (_, Some(613)) => {
                FacebookError::RateLimitExceeded(message)
            }
            (403, _) => FacebookError::OperationNotPermitted(message),
            (404, _) => FacebookError::ResourceNotFound(message),
            (500..=599, _) => FacebookError::ServerError {
                status_code: status,
                message,
            },
            _ => FacebookError::ApiError {
                status_code: status,
                message,
            },
        }
    }
}

impl From<AuthError> for FacebookError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::AuthorizationRequired { .. } => FacebookError::AuthorizationRequired,
            other => FacebookError::NotAuthorized(other.to_string()),
        }
    }
}

impl From<FacebookError> for BridgeError {
    fn from(error: FacebookError) -> Self {
        match error {
            FacebookError::Bridge(e) => e,
            other => BridgeError::OperationFailed(other.to_string()),
        }
    }
}
