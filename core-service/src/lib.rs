//! Service façade and bootstrap helpers.
//!
//! This crate wires the validated [`SocialConfig`] (and the HTTP client it
//! carries) into the provider clients. Desktop apps typically enable the
//! `desktop-shims` feature, which lets [`bootstrap`] fall back to the
//! reqwest-backed client. The `facebook` and `twitter` features pull in the
//! respective providers.

pub mod error;

pub use error::{Result, ServiceError};

use bridge_traits::http::HttpClient;
use core_runtime::config::SocialConfig;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "facebook")]
use core_auth::AccessGrant;
#[cfg(feature = "twitter")]
use core_auth::RequestSigner;
#[cfg(feature = "facebook")]
use provider_facebook::FacebookClient;
#[cfg(feature = "twitter")]
use provider_twitter::TwitterClient;

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct SocialService {
    config: Arc<SocialConfig>,
}

impl SocialService {
    /// Create a new service from a built configuration.
    pub fn new(config: SocialConfig) -> Self {
        info!(
            timeout_secs = config.request_timeout.as_secs(),
            max_attempts = config.retry_policy.max_attempts,
            "Social service created"
        );
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SocialConfig {
        &self.config
    }

    /// Shared HTTP client every provider client sends through.
    pub fn http_client(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.config.http_client)
    }

    /// Facebook client acting for the owner of `grant`, or an unauthorized
    /// client when `grant` is `None`.
    #[cfg(feature = "facebook")]
    pub fn facebook(&self, grant: Option<AccessGrant>) -> FacebookClient {
        FacebookClient::new(&self.config, grant)
    }

    /// Twitter client signing requests with `signer`, or an unauthorized
    /// client when `signer` is `None`.
    #[cfg(feature = "twitter")]
    pub fn twitter(&self, signer: Option<Arc<dyn RequestSigner>>) -> TwitterClient {
        TwitterClient::new(&self.config, signer)
    }
}

/// Build a service with default configuration.
///
/// Without the `desktop-shims` feature there is no default HTTP client, so
/// this fails with [`ServiceError::Runtime`] wrapping
/// `core_runtime::Error::CapabilityMissing`.
///
/// ```no_run
/// # fn example() -> core_service::Result<()> {
/// let service = core_service::bootstrap()?;
/// println!("timeout: {:?}", service.config().request_timeout);
/// # Ok(())
/// # }
/// ```
pub fn bootstrap() -> Result<SocialService> {
    let config = SocialConfig::builder().build()?;
    Ok(SocialService::new(config))
}
