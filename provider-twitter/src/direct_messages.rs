//! Direct message operations

use async_trait::async_trait;
use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
use core_auth::AuthorizedClient;
use core_runtime::config::TwitterApiConfig;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{Result, TwitterError};
use crate::types::{DirectMessage, PageParams};

/// Direct message operations of the Twitter REST API.
///
/// Every operation requires an authorized client and fails with
/// [`TwitterError::AuthorizationRequired`] before any request is made
/// otherwise.
#[async_trait]
pub trait DirectMessageOperations: Send + Sync {
    /// Most recent messages sent to the authenticated user.
    async fn get_direct_messages_received(&self) -> Result<Vec<DirectMessage>> {
        self.get_direct_messages_received_page(PageParams::default())
            .await
    }

    async fn get_direct_messages_received_page(&self, page: PageParams) -> Result<Vec<DirectMessage>>;

    /// Most recent messages sent by the authenticated user.
    async fn get_direct_messages_sent(&self) -> Result<Vec<DirectMessage>> {
        self.get_direct_messages_sent_page(PageParams::default())
            .await
    }

    async fn get_direct_messages_sent_page(&self, page: PageParams) -> Result<Vec<DirectMessage>>;

    async fn get_direct_message(&self, id: i64) -> Result<DirectMessage>;

    /// Fails with [`TwitterError::MessageLength`] when `text` is too long.
    async fn send_direct_message(&self, to_screen_name: &str, text: &str) -> Result<()>;

    async fn send_direct_message_to_user(&self, to_user_id: i64, text: &str) -> Result<()>;

    async fn delete_direct_message(&self, id: i64) -> Result<()>;
}

/// [`DirectMessageOperations`] over the v1 REST endpoints.
#[derive(Clone)]
pub struct DirectMessageApi {
    client: AuthorizedClient,
    config: TwitterApiConfig,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl DirectMessageApi {
    pub fn new(
        client: AuthorizedClient,
        config: TwitterApiConfig,
        timeout: Duration,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            client,
            config,
            timeout,
            retry_policy,
        }
    }

    fn require_authorization(&self) -> Result<()> {
        self.client.require_authorization()?;
        Ok(())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn api_url_with_query(&self, path: &str, page: &PageParams) -> Result<String> {
        let pairs = page.query_pairs();
        if pairs.is_empty() {
            return Ok(self.api_url(path));
        }

        let mut url = Url::parse(&self.api_url(path)).map_err(|e| {
            BridgeError::OperationFailed(format!("Invalid request URL: {}", e))
        })?;
        url.query_pairs_mut().extend_pairs(pairs);
        Ok(url.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Accept", "application/json")
            .timeout(self.timeout);

        let request = self.client.authorize(request)?;
        let response = self
            .client
            .transport()
            .execute_with_retry(request, self.retry_policy.clone())
            .await?;
        let response = check_status(response)?;

        serde_json::from_slice(&response.body).map_err(|e| {
            TwitterError::ParseError(format!("Failed to parse Twitter response: {}", e))
        })
    }

    async fn get_messages(&self, path: &str, page: PageParams) -> Result<Vec<DirectMessage>> {
        self.require_authorization()?;
        let url = self.api_url_with_query(path, &page)?;
        let messages: Vec<DirectMessage> = self.get_json(url).await?;
        info!("Fetched {} direct messages", messages.len());
        Ok(messages)
    }

    /// Sends once. Only the status matters, the echoed message is dropped.
    async fn send(&self, recipient: (&str, String), text: &str) -> Result<()> {
        self.require_authorization()?;
        let request = HttpRequest::new(HttpMethod::Post, self.api_url("direct_messages/new.json"))
            .header("Accept", "application/json")
            .form(&[(recipient.0, recipient.1.as_str()), ("text", text)])
            .timeout(self.timeout);

        let request = self.client.authorize(request)?;
        let response = self.client.transport().execute(request).await?;
        check_status(response)?;
        info!("Sent direct message");
        Ok(())
    }
}

#[async_trait]
impl DirectMessageOperations for DirectMessageApi {
    #[instrument(skip(self))]
    async fn get_direct_messages_received_page(&self, page: PageParams) -> Result<Vec<DirectMessage>> {
        self.get_messages("direct_messages.json", page).await
    }

    #[instrument(skip(self))]
    async fn get_direct_messages_sent_page(&self, page: PageParams) -> Result<Vec<DirectMessage>> {
        self.get_messages("direct_messages/sent.json", page).await
    }

    #[instrument(skip(self))]
    async fn get_direct_message(&self, id: i64) -> Result<DirectMessage> {
        self.require_authorization()?;
        let url = self.api_url(&format!("direct_messages/show/{}.json", id));
        self.get_json(url).await
    }

    #[instrument(skip(self, text), fields(length = text.chars().count()))]
    async fn send_direct_message(&self, to_screen_name: &str, text: &str) -> Result<()> {
        self.send(("screen_name", to_screen_name.to_string()), text)
            .await
    }

    #[instrument(skip(self, text), fields(length = text.chars().count()))]
    async fn send_direct_message_to_user(&self, to_user_id: i64, text: &str) -> Result<()> {
        self.send(("user_id", to_user_id.to_string()), text).await
    }

    #[instrument(skip(self))]
    async fn delete_direct_message(&self, id: i64) -> Result<()> {
        self.require_authorization()?;
        let url = self.api_url(&format!("direct_messages/destroy/{}.json", id));
        let request = HttpRequest::new(HttpMethod::Delete, url)
            .header("Accept", "application/json")
            .timeout(self.timeout);

        let request = self.client.authorize(request)?;
        let response = self.client.transport().execute(request).await?;
        check_status(response)?;
        debug!("Deleted direct message");
        Ok(())
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        let error = TwitterError::from_response(&response);
        warn!(status = response.status, error = %error, "Twitter API request failed");
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::Result as BridgeResult;
    use core_auth::{ProviderKind, RequestSigner};
    use mockall::mock;
    use std::sync::Arc;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
            async fn execute_with_retry(&self, request: HttpRequest, policy: RetryPolicy) -> BridgeResult<HttpResponse>;
        }
    }

    struct StaticSigner;

    impl RequestSigner for StaticSigner {
        fn sign(&self, request: &mut HttpRequest) -> core_auth::Result<()> {
            request
                .headers
                .insert("Authorization".to_string(), "OAuth oauth_token=\"t\"".to_string());
            Ok(())
        }
    }

    fn api(mock_http: MockHttpClient, authorized: bool) -> DirectMessageApi {
        let signer: Option<Arc<dyn RequestSigner>> = authorized.then(|| {
            let signer: Arc<dyn RequestSigner> = Arc::new(StaticSigner);
            signer
        });
        DirectMessageApi::new(
            AuthorizedClient::new(Arc::new(mock_http), signer, ProviderKind::Twitter),
            TwitterApiConfig::default(),
            Duration::from_secs(30),
            RetryPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_received_page_query() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute_with_retry()
            .withf(|req, _| {
                req.url == "https://api.twitter.com/1/direct_messages.json?page=2&count=20&since_id=100"
                    && req.headers.contains_key("Authorization")
            })
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, "[]")));

        let messages = api(mock_http, true)
            .get_direct_messages_received_page(PageParams::new().page(2).count(20).since_id(100))
            .await
            .unwrap();

        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_send_to_user_form_body() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url == "https://api.twitter.com/1/direct_messages/new.json"
                    && req.body_text() == Some("user_id=11223&text=Hello+there%21")
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, "{}")));

        api(mock_http, true)
            .send_direct_message_to_user(11223, "Hello there!")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_is_not_retried() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(503, "Service Unavailable")));
        mock_http.expect_execute_with_retry().never();

        let result = api(mock_http, true).send_direct_message("habuma", "Hi").await;

        assert!(matches!(result, Err(TwitterError::ServerError { status_code: 503, .. })));
    }

    #[tokio::test]
    async fn test_unauthorized_never_sends() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().never();
        mock_http.expect_execute_with_retry().never();

        let api = api(mock_http, false);

        assert!(matches!(
            api.get_direct_message(42).await,
            Err(TwitterError::AuthorizationRequired)
        ));
        assert!(matches!(
            api.delete_direct_message(42).await,
            Err(TwitterError::AuthorizationRequired)
        ));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                req.method == HttpMethod::Delete
                    && req.url == "https://api.twitter.com/1/direct_messages/destroy/7.json"
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(404, r#"{"error":"No direct message with that ID found."}"#)));

        let result = api(mock_http, true).delete_direct_message(7).await;

        assert!(matches!(result, Err(TwitterError::ResourceNotFound(_))));
    }
}
