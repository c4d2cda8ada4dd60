//! Generic Graph API request pattern
//!
//! Every Facebook operation is one of four shapes: fetch an object, fetch a
//! connection listing, fetch an image, or publish a multipart form.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, RetryPolicy};
use bytes::Bytes;
use core_auth::AuthorizedClient;
use core_runtime::config::FacebookApiConfig;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{FacebookError, Result};
use crate::types::{DataList, ImageType, PublishResponse};

/// Thin wrapper over the shared HTTP client that knows the Graph URL layout.
#[derive(Clone)]
pub struct GraphApi {
    client: AuthorizedClient,
    config: FacebookApiConfig,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl GraphApi {
    pub fn new(
        client: AuthorizedClient,
        config: FacebookApiConfig,
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

    pub(crate) fn client(&self) -> &AuthorizedClient {
        &self.client
    }

    /// Absolute URL for multipart video uploads
    pub fn video_upload_url(&self) -> &str {
        &self.config.graph_video_url
    }

    fn object_url(&self, object_id: &str) -> String {
        format!("{}{}", self.config.graph_api_url, object_id)
    }

    fn connection_url(&self, object_id: &str, connection: &str) -> String {
        format!("{}{}/{}", self.config.graph_api_url, object_id, connection)
    }

    /// GET `{base}{object_id}` and decode the object.
    #[instrument(skip(self))]
    pub async fn fetch_object<T: DeserializeOwned>(&self, object_id: &str) -> Result<T> {
        let response = self.get(self.object_url(object_id)).await?;
        decode(&response)
    }

    /// GET `{base}{object_id}/{connection}` and unwrap the `data` array.
    #[instrument(skip(self))]
    pub async fn fetch_connections<T: DeserializeOwned>(
        &self,
        object_id: &str,
        connection: &str,
    ) -> Result<Vec<T>> {
        let response = self.get(self.connection_url(object_id, connection)).await?;
        let list: DataList<T> = decode(&response)?;
        debug!(count = list.data.len(), "Fetched connection");
        Ok(list.data)
    }

    /// Raw image bytes from an image connection such as `picture`.
    #[instrument(skip(self))]
    pub async fn fetch_image(
        &self,
        object_id: &str,
        connection: &str,
        image_type: ImageType,
    ) -> Result<Bytes> {
        let url = format!(
            "{}?type={}",
            self.connection_url(object_id, connection),
            image_type.as_str()
        );
        let response = self.get(url).await?;
        debug!(bytes = response.body.len(), "Fetched image");
        Ok(response.body)
    }

    /// POST a multipart form to `{base}{object_id}/{connection}` and return
    /// the id of the created object.
    #[instrument(skip(self, form))]
    pub async fn publish(
        &self,
        object_id: &str,
        connection: &str,
        form: MultipartForm,
    ) -> Result<String> {
        let url = self.connection_url(object_id, connection);
        self.publish_to_url(&url, form).await
    }

    /// Same as [`publish`](Self::publish) against an absolute URL.
    #[instrument(skip(self, form))]
    pub async fn publish_to_url(&self, url: &str, form: MultipartForm) -> Result<String> {
        let request = HttpRequest::new(HttpMethod::Post, url)
            .header("Accept", "application/json")
            .multipart(form)
            .timeout(self.timeout);

        // Publishing is not idempotent, so it never goes through the retry path
        let request = self.client.authorize(request)?;
        let response = self.client.transport().execute(request).await?;
        let response = check_status(response)?;
        let created: PublishResponse = decode(&response)?;

        debug!(id = %created.id, "Published object");
        Ok(created.id)
    }

    async fn get(&self, url: String) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Accept", "application/json")
            .timeout(self.timeout);

        let request = self.client.authorize(request)?;
        let response = self
            .client
            .transport()
            .execute_with_retry(request, self.retry_policy.clone())
            .await?;
        check_status(response)
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        let error = FacebookError::from_response(&response);
        warn!(status = response.status, error = %error, "Graph API request failed");
        Err(error)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_slice(&response.body)
        .map_err(|e| FacebookError::ParseError(format!("Failed to parse Graph response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use core_auth::{AccessGrant, BearerTokenSigner, ProviderKind, RequestSigner};
    use mockall::mock;
    use std::sync::Arc;

    use crate::types::Reference;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
            async fn execute_with_retry(&self, request: HttpRequest, policy: RetryPolicy) -> BridgeResult<HttpResponse>;
        }
    }

    fn graph_api(mock_http: MockHttpClient) -> GraphApi {
        let signer: Arc<dyn RequestSigner> = Arc::new(BearerTokenSigner::new(AccessGrant::new("EAAB")));
        let client = AuthorizedClient::new(Arc::new(mock_http), Some(signer), ProviderKind::Facebook);
        GraphApi::new(
            client,
            FacebookApiConfig::default(),
            Duration::from_secs(30),
            RetryPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_fetch_object() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute_with_retry()
            .withf(|req, _| req.url == "https://graph.facebook.com/738140579" && req.method == HttpMethod::Get)
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, r#"{"id":"738140579","name":"Craig Walls"}"#)));

        let reference: Reference = graph_api(mock_http).fetch_object("738140579").await.unwrap();

        assert_eq!(reference.name.as_deref(), Some("Craig Walls"));
    }

    #[tokio::test]
    async fn test_fetch_connections_unwraps_data() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute_with_retry()
            .withf(|req, _| req.url == "https://graph.facebook.com/me/friends")
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, r#"{"data":[{"id":"1"},{"id":"2","name":"Keith"}]}"#)));

        let friends: Vec<Reference> = graph_api(mock_http)
            .fetch_connections("me", "friends")
            .await
            .unwrap();

        assert_eq!(friends.len(), 2);
        assert_eq!(friends[1].id, "2");
    }

    #[tokio::test]
    async fn test_fetch_image_sets_type() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute_with_retry()
            .withf(|req, _| req.url == "https://graph.facebook.com/12345/picture?type=large")
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, vec![0xff, 0xd8, 0xff])));

        let bytes = graph_api(mock_http)
            .fetch_image("12345", "picture", ImageType::Large)
            .await
            .unwrap();

        assert_eq!(&bytes[..], &[0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_publish_is_single_attempt() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.url == "https://graph.facebook.com/me/albums"
                    && req.multipart.as_ref().and_then(|f| f.get_text("name")) == Some("Trip")
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"id":"123456"}"#)));
        mock_http.expect_execute_with_retry().never();

        let id = graph_api(mock_http)
            .publish("me", "albums", MultipartForm::new().text("name", "Trip"))
            .await
            .unwrap();

        assert_eq!(id, "123456");
    }

    #[tokio::test]
    async fn test_error_status_is_mapped() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute_with_retry()
            .times(1)
            .returning(|_, _| {
                Ok(HttpResponse::new(
                    400,
                    r#"{"error":{"message":"Unsupported get request.","type":"GraphMethodException","code":100}}"#,
                ))
            });

        let result: Result<Reference> = graph_api(mock_http).fetch_object("nope").await;

        assert!(matches!(result, Err(FacebookError::ApiError { status_code: 400, .. })));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute_with_retry()
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, "<html>")));

        let result: Result<Reference> = graph_api(mock_http).fetch_object("me").await;

        assert!(matches!(result, Err(FacebookError::ParseError(_))));
    }
}
