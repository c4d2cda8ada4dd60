//! Facebook client entry point

use bridge_traits::http::HttpClient;
use core_auth::{AccessGrant, AuthorizedClient, BearerTokenSigner, ProviderKind, RequestSigner};
use core_runtime::config::SocialConfig;
use std::sync::Arc;
use tracing::debug;

use crate::graph::GraphApi;
use crate::media::{MediaApi, MediaOperations};

/// Facebook Graph API client
///
/// Built either with an access grant (authorized) or without one. An
/// unauthorized client rejects every media operation with
/// [`FacebookError::AuthorizationRequired`](crate::FacebookError::AuthorizationRequired).
///
/// # Example
///
/// ```ignore
/// use provider_facebook::{FacebookClient, MediaOperations};
///
/// let facebook = FacebookClient::new(&config, Some(AccessGrant::new(token)));
/// let albums = facebook.media().get_albums().await?;
/// ```
#[derive(Clone)]
pub struct FacebookClient {
    graph: GraphApi,
    media: MediaApi,
    authorized: bool,
}

impl FacebookClient {
    pub fn new(config: &SocialConfig, grant: Option<AccessGrant>) -> Self {
        let signer = grant.map(|grant| {
            let signer: Arc<dyn RequestSigner> = Arc::new(BearerTokenSigner::new(grant));
            signer
        });
        Self::with_signer(config, config.http_client.clone(), signer)
    }

    /// Use a custom signer, e.g. one that appends `appsecret_proof`.
    pub fn with_signer(
        config: &SocialConfig,
        http_client: Arc<dyn HttpClient>,
        signer: Option<Arc<dyn RequestSigner>>,
    ) -> Self {
        let client = AuthorizedClient::new(http_client, signer, ProviderKind::Facebook);
        let authorized = client.is_authorized();
        debug!(authorized, "Creating Facebook client");

        let graph = GraphApi::new(
            client,
            config.facebook.clone(),
            config.request_timeout,
            config.retry_policy.clone(),
        );

        Self {
            media: MediaApi::new(graph.clone()),
            graph,
            authorized,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn media(&self) -> &dyn MediaOperations {
        &self.media
    }

    /// Generic object/connection access for Graph resources without a
    /// dedicated operations group.
    pub fn graph(&self) -> &GraphApi {
        &self.graph
    }
}
