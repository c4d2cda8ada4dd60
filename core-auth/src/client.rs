//! Authorization state of a provider client.

use bridge_traits::http::{HttpClient, HttpRequest};
use std::sync::Arc;
use tracing::warn;

use crate::error::{AuthError, Result};
use crate::signer::RequestSigner;
use crate::types::ProviderKind;

/// Shared transport paired with an optional signer.
///
/// A client without a signer is "unauthorized": it can still be used for
/// public endpoints, but every user-scoped operation fails fast through
/// [`require_authorization`](Self::require_authorization).
///
/// Signing is kept apart from sending so that a refused signature surfaces as
/// an [`AuthError`] rather than a transport failure.
#[derive(Clone)]
pub struct AuthorizedClient {
    http: Arc<dyn HttpClient>,
    signer: Option<Arc<dyn RequestSigner>>,
    provider: ProviderKind,
}

impl AuthorizedClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        signer: Option<Arc<dyn RequestSigner>>,
        provider: ProviderKind,
    ) -> Self {
        Self {
            http,
            signer,
            provider,
        }
    }

    pub fn unauthorized(http: Arc<dyn HttpClient>, provider: ProviderKind) -> Self {
        Self::new(http, None, provider)
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn is_authorized(&self) -> bool {
        self.signer.is_some()
    }

    pub fn require_authorization(&self) -> Result<()> {
        if self.is_authorized() {
            Ok(())
        } else {
            warn!(provider = %self.provider, "Operation requires authorization");
            Err(AuthError::AuthorizationRequired {
                provider: self.provider,
            })
        }
    }

    /// Add credentials to `request`. Unauthorized clients pass it through
    /// unchanged.
    pub fn authorize(&self, mut request: HttpRequest) -> Result<HttpRequest> {
        if let Some(signer) = &self.signer {
            if let Err(err) = signer.sign(&mut request) {
                warn!(provider = %self.provider, error = %err, "Request signing refused");
                return Err(err);
            }
        }
        Ok(request)
    }

    /// Transport that authorized requests are sent through.
    pub fn transport(&self) -> &Arc<dyn HttpClient> {
        &self.http
    }
}
