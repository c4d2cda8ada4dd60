use thiserror::Error;

use crate::types::ProviderKind;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The operation needs a user context but the client was built without one
    #[error("Authorization is required for the operation, but the {provider} client was created without authorization")]
    AuthorizationRequired { provider: ProviderKind },

    #[error("Access token expired at {expires_at}")]
    TokenExpired {
        expires_at: chrono::DateTime<chrono::Utc>,
    },

    #[error("Request signing failed: {0}")]
    SigningFailed(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
