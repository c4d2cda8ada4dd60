//! # Client Configuration
//!
//! Provides configuration management for the social API clients.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `SocialConfig` holding the shared HTTP client, the per-provider endpoint
//! settings and request policy. It fails fast: a config that would produce
//! malformed request URLs is rejected at `build()` time rather than on the
//! first API call.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{SocialConfig, TwitterApiConfig};
//! use std::time::Duration;
//!
//! let config = SocialConfig::builder()
//!     .request_timeout(Duration::from_secs(10))
//!     .twitter(TwitterApiConfig::new().with_api_url("http://localhost:8080/1/"))
//!     .build()?;
//! ```
//!
//! Without the `desktop-shims` feature an HTTP client must be injected:
//!
//! ```ignore
//! let config = SocialConfig::builder()
//!     .http_client(Arc::new(MyHttpClient))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::http::{HttpClient, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default Graph API root
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com/";

/// Video uploads go to a dedicated host
pub const DEFAULT_GRAPH_VIDEO_URL: &str = "https://graph-video.facebook.com/me/videos";

/// Default Twitter REST API root (v1)
pub const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com/1/";

const DEFAULT_USER_AGENT: &str = concat!("social-client/", env!("CARGO_PKG_VERSION"));

const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Facebook Graph API endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookApiConfig {
    /// Base URL object and connection paths are appended to
    pub graph_api_url: String,
    /// Absolute URL for multipart video uploads
    pub graph_video_url: String,
}

impl Default for FacebookApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FacebookApiConfig {
    pub fn new() -> Self {
        Self {
            graph_api_url: DEFAULT_GRAPH_API_URL.to_string(),
            graph_video_url: DEFAULT_GRAPH_VIDEO_URL.to_string(),
        }
    }

    pub fn with_graph_api_url(mut self, url: impl Into<String>) -> Self {
        self.graph_api_url = url.into();
        self
    }

    pub fn with_graph_video_url(mut self, url: impl Into<String>) -> Self {
        self.graph_video_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_base_url("Graph API URL", &self.graph_api_url)?;
        validate_url("Graph video URL", &self.graph_video_url)?;
        Ok(())
    }
}

/// Twitter REST API endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterApiConfig {
    /// Base URL resource paths such as `direct_messages.json` are appended to
    pub api_url: String,
}

impl Default for TwitterApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TwitterApiConfig {
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_TWITTER_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_base_url("Twitter API URL", &self.api_url)
    }
}

fn validate_url(label: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| Error::Config(format!("{} '{}' is not a valid URL: {}", label, value, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "{} must use http or https, got '{}'",
            label,
            url.scheme()
        )));
    }

    Ok(url)
}

fn validate_base_url(label: &str, value: &str) -> Result<()> {
    let url = validate_url(label, value)?;

    // Paths are appended verbatim, so the base must end in a slash
    if !url.path().ends_with('/') {
        return Err(Error::Config(format!(
            "{} '{}' must end with '/'",
            label, value
        )));
    }

    if url.query().is_some() {
        return Err(Error::Config(format!(
            "{} '{}' must not carry a query string",
            label, value
        )));
    }

    Ok(())
}

/// Configuration shared by every provider client.
///
/// Use [`SocialConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct SocialConfig {
    /// HTTP client all API requests go through
    pub http_client: Arc<dyn HttpClient>,

    pub facebook: FacebookApiConfig,

    pub twitter: TwitterApiConfig,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Retry policy applied to idempotent reads
    pub retry_policy: RetryPolicy,

    /// User agent for the default HTTP client
    pub user_agent: String,
}

impl std::fmt::Debug for SocialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialConfig")
            .field("http_client", &"HttpClient { ... }")
            .field("facebook", &self.facebook)
            .field("twitter", &self.twitter)
            .field("request_timeout", &self.request_timeout)
            .field("retry_policy", &self.retry_policy)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl SocialConfig {
    pub fn builder() -> SocialConfigBuilder {
        SocialConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Endpoint URLs parse, use http(s), and base URLs end with `/`
    /// - Request timeout is non-zero and at most 5 minutes
    /// - Retry policy performs at least one attempt
    pub fn validate(&self) -> Result<()> {
        self.facebook.validate()?;
        self.twitter.validate()?;

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout > MAX_REQUEST_TIMEOUT {
            return Err(Error::Config(format!(
                "Request timeout exceeds maximum of {} seconds",
                MAX_REQUEST_TIMEOUT.as_secs()
            )));
        }

        if self.retry_policy.max_attempts == 0 {
            return Err(Error::Config(
                "Retry policy must allow at least one attempt".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(
    _timeout: Duration,
    _user_agent: &str,
) -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                 Desktop: enable the 'desktop-shims' feature to use the default ReqwestHttpClient. \
                 Other hosts: inject an HttpClient with .http_client()."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration, user_agent: &str) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_options(timeout, user_agent)
        .map_err(|e| Error::Internal(format!("Failed to create default HttpClient: {}", e)))?;
    let client: Arc<dyn HttpClient> = Arc::new(client);
    Ok(client)
}

/// Builder for constructing [`SocialConfig`] instances.
#[derive(Default)]
pub struct SocialConfigBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    facebook: Option<FacebookApiConfig>,
    twitter: Option<TwitterApiConfig>,
    request_timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
    user_agent: Option<String>,
}

impl SocialConfigBuilder {
    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn facebook(mut self, config: FacebookApiConfig) -> Self {
        self.facebook = Some(config);
        self
    }

    pub fn twitter(mut self, config: TwitterApiConfig) -> Self {
        self.twitter = Some(config);
        self
    }

    /// Default: 30 seconds
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Retry policy for GET requests. Publishing and deleting always make a
    /// single attempt.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the final `SocialConfig` instance.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when no HTTP client is available
    /// - [`Error::Config`] when any value fails validation
    pub fn build(self) -> Result<SocialConfig> {
        let request_timeout = self.request_timeout.unwrap_or(Duration::from_secs(30));
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout, &user_agent)?,
        };

        let config = SocialConfig {
            http_client,
            facebook: self.facebook.unwrap_or_default(),
            twitter: self.twitter.unwrap_or_default(),
            request_timeout,
            retry_policy: self.retry_policy.unwrap_or_default(),
            user_agent,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpRequest, HttpResponse};

    struct StubHttpClient;

    #[async_trait]
    impl HttpClient for StubHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Ok(HttpResponse::new(200, "{}"))
        }
    }

    fn builder() -> SocialConfigBuilder {
        SocialConfig::builder().http_client(Arc::new(StubHttpClient))
    }

    #[test]
    fn test_defaults() {
        let config = builder().build().unwrap();

        assert_eq!(config.facebook.graph_api_url, DEFAULT_GRAPH_API_URL);
        assert_eq!(config.facebook.graph_video_url, DEFAULT_GRAPH_VIDEO_URL);
        assert_eq!(config.twitter.api_url, DEFAULT_TWITTER_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.retry_policy, RetryPolicy::default());
        assert!(config.user_agent.starts_with("social-client/"));
    }

    #[test]
    fn test_custom_endpoints() {
        let config = builder()
            .facebook(
                FacebookApiConfig::new()
                    .with_graph_api_url("http://localhost:9000/graph/")
                    .with_graph_video_url("http://localhost:9000/video/me/videos"),
            )
            .twitter(TwitterApiConfig::new().with_api_url("http://localhost:9001/1/"))
            .build()
            .unwrap();

        assert_eq!(config.facebook.graph_api_url, "http://localhost:9000/graph/");
        assert_eq!(config.twitter.api_url, "http://localhost:9001/1/");
    }

    #[test]
    fn test_base_url_must_end_with_slash() {
        let err = builder()
            .twitter(TwitterApiConfig::new().with_api_url("https://api.twitter.com/1"))
            .build()
            .unwrap_err();

        assert!(matches!(err, Error::Config(msg) if msg.contains("must end with '/'")));
    }

    #[test]
    fn test_rejects_non_http_scheme_and_garbage() {
        assert!(builder()
            .facebook(FacebookApiConfig::new().with_graph_api_url("ftp://graph.facebook.com/"))
            .build()
            .is_err());
        assert!(builder()
            .facebook(FacebookApiConfig::new().with_graph_video_url("not a url"))
            .build()
            .is_err());
    }

    #[test]
    fn test_base_url_rejects_query() {
        assert!(builder()
            .twitter(TwitterApiConfig::new().with_api_url("https://api.twitter.com/1/?x=1"))
            .build()
            .is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(builder().request_timeout(Duration::ZERO).build().is_err());
        assert!(builder()
            .request_timeout(Duration::from_secs(301))
            .build()
            .is_err());
        assert!(builder()
            .request_timeout(Duration::from_secs(300))
            .build()
            .is_ok());
    }

    #[test]
    fn test_retry_policy_needs_an_attempt() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert!(builder().retry_policy(policy).build().is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        assert!(builder().user_agent("  ").build().is_err());
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_missing_http_client_is_capability_error() {
        let err = SocialConfig::builder().build().unwrap_err();
        assert!(matches!(
            err,
            Error::CapabilityMissing { ref capability, .. } if capability == "HttpClient"
        ));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_desktop_default_http_client() {
        assert!(SocialConfig::builder().build().is_ok());
    }
}
