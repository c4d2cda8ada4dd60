//! Request signing
//!
//! A [`RequestSigner`] adds credentials to an outgoing request right before it
//! is handed to the transport.

use bridge_traits::http::HttpRequest;
use bridge_traits::time::{Clock, SystemClock};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AuthError, Result};
use crate::types::AccessGrant;

/// Adds credentials to outgoing requests.
///
/// Implement this for schemes that are not bundled here. An OAuth 1.0a signer
/// for Twitter reads the method, URL and url-encoded form body from the
/// request and writes the `Authorization: OAuth ...` header.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: &mut HttpRequest) -> Result<()>;
}

/// OAuth 2.0 bearer token signer.
///
/// Refuses to sign once the grant has expired so the caller sees
/// [`AuthError::TokenExpired`] instead of an opaque 401 from the API.
pub struct BearerTokenSigner {
    grant: AccessGrant,
    clock: Arc<dyn Clock>,
}

impl BearerTokenSigner {
    pub fn new(grant: AccessGrant) -> Self {
        Self::with_clock(grant, Arc::new(SystemClock))
    }

    pub fn with_clock(grant: AccessGrant, clock: Arc<dyn Clock>) -> Self {
        Self { grant, clock }
    }

    pub fn grant(&self) -> &AccessGrant {
        &self.grant
    }
}

impl fmt::Debug for BearerTokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerTokenSigner")
            .field("grant", &self.grant)
            .finish()
    }
}

impl RequestSigner for BearerTokenSigner {
    fn sign(&self, request: &mut HttpRequest) -> Result<()> {
        if self.grant.is_expired_at(self.clock.now()) {
            if let Some(expires_at) = self.grant.expires_at {
                return Err(AuthError::TokenExpired { expires_at });
            }
        }

        debug!(url = %request.url, "Signing request with bearer token");
        request.headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.grant.access_token),
        );
        Ok(())
    }
}
