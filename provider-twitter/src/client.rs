//! Twitter client entry point

use bridge_traits::http::HttpClient;
use core_auth::{AuthorizedClient, ProviderKind, RequestSigner};
use core_runtime::config::SocialConfig;
use std::sync::Arc;
use tracing::debug;

use crate::direct_messages::{DirectMessageApi, DirectMessageOperations};

/// Twitter REST API client
///
/// Requests are signed by the supplied [`RequestSigner`], typically an
/// OAuth 1.0a signer holding the consumer and access credentials. Without a
/// signer every operation fails with
/// [`TwitterError::AuthorizationRequired`](crate::TwitterError::AuthorizationRequired).
#[derive(Clone)]
pub struct TwitterClient {
    direct_messages: DirectMessageApi,
    authorized: bool,
}

impl TwitterClient {
    pub fn new(config: &SocialConfig, signer: Option<Arc<dyn RequestSigner>>) -> Self {
        Self::with_http_client(config, config.http_client.clone(), signer)
    }

    pub fn with_http_client(
        config: &SocialConfig,
        http_client: Arc<dyn HttpClient>,
        signer: Option<Arc<dyn RequestSigner>>,
    ) -> Self {
        let client = AuthorizedClient::new(http_client, signer, ProviderKind::Twitter);
        let authorized = client.is_authorized();
        debug!(authorized, "Creating Twitter client");

        Self {
            direct_messages: DirectMessageApi::new(
                client,
                config.twitter.clone(),
                config.request_timeout,
                config.retry_policy.clone(),
            ),
            authorized,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn direct_messages(&self) -> &dyn DirectMessageOperations {
        &self.direct_messages
    }
}
