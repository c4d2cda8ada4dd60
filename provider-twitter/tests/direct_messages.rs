//! Integration tests for direct message operations

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, FORM_URLENCODED};
use chrono::{TimeZone, Utc};
use core_auth::RequestSigner;
use core_runtime::config::SocialConfig;
use provider_twitter::{DirectMessage, DirectMessageOperations, PageParams, TwitterClient, TwitterError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const MESSAGES: &str = include_str!("fixtures/messages.json");
const DIRECT_MESSAGE: &str = include_str!("fixtures/direct_message.json");

/// Replays queued responses and records every request it sees.
#[derive(Default)]
struct RecordingHttpClient {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    fn with_response(status: u16, body: &'static str) -> Arc<Self> {
        let client = Self::default();
        client
            .responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
        Arc::new(client)
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl HttpClient for RecordingHttpClient {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request"))
    }
}

/// Stands in for an OAuth 1.0a signer.
struct FakeOAuthSigner;

impl RequestSigner for FakeOAuthSigner {
    fn sign(&self, request: &mut HttpRequest) -> core_auth::Result<()> {
        request.headers.insert(
            "Authorization".to_string(),
            "OAuth oauth_consumer_key=\"consumerKey\", oauth_token=\"accessToken\"".to_string(),
        );
        Ok(())
    }
}

/// Signer whose credentials were revoked.
struct RevokedSigner;

impl RequestSigner for RevokedSigner {
    fn sign(&self, _request: &mut HttpRequest) -> core_auth::Result<()> {
        Err(core_auth::AuthError::SigningFailed("consumer key revoked".to_string()))
    }
}

fn twitter(http: &Arc<RecordingHttpClient>) -> TwitterClient {
    let config = SocialConfig::builder().http_client(http.clone()).build().unwrap();
    let signer: Arc<dyn RequestSigner> = Arc::new(FakeOAuthSigner);
    TwitterClient::new(&config, Some(signer))
}

fn unauthorized_twitter(http: &Arc<RecordingHttpClient>) -> TwitterClient {
    let config = SocialConfig::builder().http_client(http.clone()).build().unwrap();
    TwitterClient::new(&config, None)
}

fn assert_message_list_contents(messages: &[DirectMessage]) {
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, 12345);
    assert_eq!(messages[0].text, "Hello there");
    assert_eq!(messages[0].sender.id, 24680);
    assert_eq!(messages[0].sender.screen_name, "rclarkson");
    assert_eq!(messages[0].recipient.id, 13579);
    assert_eq!(messages[0].recipient.screen_name, "kdonald");
    assert_eq!(
        messages[0].created_at,
        Utc.with_ymd_and_hms(2010, 7, 13, 17, 38, 21).unwrap()
    );
    assert_eq!(messages[1].id, 23456);
    assert_eq!(messages[1].text, "Back at ya");
    assert_eq!(messages[1].sender.id, 13579);
    assert_eq!(messages[1].sender.screen_name, "kdonald");
    assert_eq!(messages[1].recipient.id, 24680);
    assert_eq!(messages[1].recipient.screen_name, "rclarkson");
}

#[tokio::test]
async fn get_direct_messages_received() {
    let http = RecordingHttpClient::with_response(200, MESSAGES);

    let messages = twitter(&http)
        .direct_messages()
        .get_direct_messages_received()
        .await
        .unwrap();

    let request = http.only_request();
    assert_eq!(request.url, "https://api.twitter.com/1/direct_messages.json");
    assert_eq!(request.method, HttpMethod::Get);
    assert!(request.headers["Authorization"].starts_with("OAuth "));
    assert_message_list_contents(&messages);
}

#[tokio::test]
async fn get_direct_messages_received_unauthorized() {
    let http = Arc::new(RecordingHttpClient::default());

    let result = unauthorized_twitter(&http)
        .direct_messages()
        .get_direct_messages_received()
        .await;

    assert!(matches!(result, Err(TwitterError::AuthorizationRequired)));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn get_direct_messages_sent() {
    let http = RecordingHttpClient::with_response(200, MESSAGES);

    let messages = twitter(&http)
        .direct_messages()
        .get_direct_messages_sent()
        .await
        .unwrap();

    assert_eq!(
        http.only_request().url,
        "https://api.twitter.com/1/direct_messages/sent.json"
    );
    assert_message_list_contents(&messages);
}

#[tokio::test]
async fn get_direct_messages_sent_paged() {
    let http = RecordingHttpClient::with_response(200, MESSAGES);

    twitter(&http)
        .direct_messages()
        .get_direct_messages_sent_page(PageParams::new().page(3).count(2))
        .await
        .unwrap();

    assert_eq!(
        http.only_request().url,
        "https://api.twitter.com/1/direct_messages/sent.json?page=3&count=2"
    );
}

#[tokio::test]
async fn get_direct_messages_sent_unauthorized() {
    let http = Arc::new(RecordingHttpClient::default());

    let result = unauthorized_twitter(&http)
        .direct_messages()
        .get_direct_messages_sent()
        .await;

    assert!(matches!(result, Err(TwitterError::AuthorizationRequired)));
}

#[tokio::test]
async fn get_direct_message() {
    let http = RecordingHttpClient::with_response(200, DIRECT_MESSAGE);

    let message = twitter(&http)
        .direct_messages()
        .get_direct_message(42)
        .await
        .unwrap();

    assert_eq!(
        http.only_request().url,
        "https://api.twitter.com/1/direct_messages/show/42.json"
    );
    assert_eq!(message.id, 42);
    assert_eq!(message.recipient.name, "Keith Donald");
}

#[tokio::test]
async fn send_direct_message_to_screen_name() {
    let http = RecordingHttpClient::with_response(200, "{}");

    twitter(&http)
        .direct_messages()
        .send_direct_message("habuma", "Hello there!")
        .await
        .unwrap();

    let request = http.only_request();
    assert_eq!(request.url, "https://api.twitter.com/1/direct_messages/new.json");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.body_text(), Some("screen_name=habuma&text=Hello+there%21"));
    assert_eq!(
        request.headers.get("Content-Type").map(String::as_str),
        Some(FORM_URLENCODED)
    );
}

#[tokio::test]
async fn send_direct_message_to_screen_name_too_long() {
    let http = RecordingHttpClient::with_response(
        403,
        r#"{"error":"There was an error sending your message: The text of your direct message is over 140 characters."}"#,
    );

    let result = twitter(&http)
        .direct_messages()
        .send_direct_message("habuma", "Really long message")
        .await;

    assert_eq!(
        http.only_request().body_text(),
        Some("screen_name=habuma&text=Really+long+message")
    );
    assert!(matches!(result, Err(TwitterError::MessageLength(_))));
}

#[tokio::test]
async fn send_direct_message_to_screen_name_unauthorized() {
    let http = Arc::new(RecordingHttpClient::default());

    let result = unauthorized_twitter(&http)
        .direct_messages()
        .send_direct_message("habuma", "Hello there!")
        .await;

    assert!(matches!(result, Err(TwitterError::AuthorizationRequired)));
}

#[tokio::test]
async fn send_direct_message_to_user_id() {
    let http = RecordingHttpClient::with_response(200, "{}");

    twitter(&http)
        .direct_messages()
        .send_direct_message_to_user(11223, "Hello there!")
        .await
        .unwrap();

    assert_eq!(
        http.only_request().body_text(),
        Some("user_id=11223&text=Hello+there%21")
    );
}

#[tokio::test]
async fn send_direct_message_to_user_id_unauthorized() {
    let http = Arc::new(RecordingHttpClient::default());

    let result = unauthorized_twitter(&http)
        .direct_messages()
        .send_direct_message_to_user(112233, "Hello there!")
        .await;

    assert!(matches!(result, Err(TwitterError::AuthorizationRequired)));
}

#[tokio::test]
async fn delete_direct_message() {
    let http = RecordingHttpClient::with_response(200, DIRECT_MESSAGE);

    twitter(&http)
        .direct_messages()
        .delete_direct_message(42)
        .await
        .unwrap();

    let request = http.only_request();
    assert_eq!(
        request.url,
        "https://api.twitter.com/1/direct_messages/destroy/42.json"
    );
    assert_eq!(request.method, HttpMethod::Delete);
}

#[tokio::test]
async fn delete_direct_message_unauthorized() {
    let http = Arc::new(RecordingHttpClient::default());

    let result = unauthorized_twitter(&http)
        .direct_messages()
        .delete_direct_message(42)
        .await;

    assert!(matches!(result, Err(TwitterError::AuthorizationRequired)));
}

#[tokio::test]
async fn send_to_non_follower_is_not_permitted() {
    let http = RecordingHttpClient::with_response(
        403,
        r#"{"error":"You cannot send messages to users who are not following you."}"#,
    );

    let result = twitter(&http)
        .direct_messages()
        .send_direct_message("stranger", "Hi")
        .await;

    assert!(matches!(result, Err(TwitterError::OperationNotPermitted(_))));
}

#[tokio::test]
async fn refused_signature_is_not_authorized_and_sends_nothing() {
    let http = Arc::new(RecordingHttpClient::default());
    let config = SocialConfig::builder().http_client(http.clone()).build().unwrap();
    let signer: Arc<dyn RequestSigner> = Arc::new(RevokedSigner);
    let twitter = TwitterClient::new(&config, Some(signer));

    let received = twitter.direct_messages().get_direct_messages_received().await;
    let sent = twitter
        .direct_messages()
        .send_direct_message("habuma", "Hello there!")
        .await;

    assert!(matches!(received, Err(TwitterError::NotAuthorized(_))));
    assert!(matches!(sent, Err(TwitterError::NotAuthorized(_))));
    assert!(http.requests().is_empty());
}
