use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[cfg(feature = "facebook")]
    #[error("Facebook error: {0}")]
    Facebook(#[from] provider_facebook::FacebookError),

    #[cfg(feature = "twitter")]
    #[error("Twitter error: {0}")]
    Twitter(#[from] provider_twitter::TwitterError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
