//! LINE Notify implementation.
//!
//! Posts a form-encoded `message` field with a bearer token and maps the JSON
//! reply onto `NotifyResult`.
//!
//! API Reference: https://notify-bot.line.me/doc/en/

use super::provider::Notifier;
use crate::error::{NotifyError, NotifyResponse, NotifyResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fixed endpoint of the LINE Notify API
pub const NOTIFY_API_URL: &str = "https://notify-api.line.me/api/notify";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// LINE Notify sender
///
/// Immutable after construction and cheap to clone; the underlying
/// `reqwest::Client` pools connections across clones and concurrent sends.
///
/// # Example
/// ```ignore
/// let notifier = LineNotifier::new(token)?;
/// notifier.send(&CancellationToken::new(), "Build finished").await?;
/// ```
#[derive(Clone)]
pub struct LineNotifier {
    endpoint: Url,
    token: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl LineNotifier {
    /// Creates a notifier bound to the LINE Notify endpoint
    ///
    /// Uses the shared `HTTP_CLIENT`. No network activity happens here.
    ///
    /// # Errors
    /// `NotifyError::Configuration` when `token` is empty
    pub fn new(token: impl Into<String>) -> NotifyResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(NotifyError::configuration("authorization token is not set"));
        }

        Ok(Self {
            endpoint: parse_endpoint(NOTIFY_API_URL)?,
            token,
            client: HTTP_CLIENT.clone(),
            timeout: None,
        })
    }

    /// Replaces the HTTP transport
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Points the notifier at another endpoint (stub servers, proxies)
    ///
    /// # Errors
    /// `NotifyError::Configuration` when `endpoint` is not an http(s) URL
    pub fn with_endpoint(mut self, endpoint: &str) -> NotifyResult<Self> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    /// Sets a per-request deadline on top of the client's own timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds, dispatches and reads one request without cancellation handling
    async fn deliver(&self, message: &str) -> NotifyResult<()> {
        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .form(&[("message", message)]);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let request = builder
            .build()
            .map_err(|e| NotifyError::transport("Cannot initialize HTTP request", e))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| NotifyError::transport("Failed to send request", e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| NotifyError::transport("Failed to read response body", e))?;

        debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            "Notify API responded"
        );

        check_response(status, &body)
    }
}

impl fmt::Debug for LineNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineNotifier")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Notifier for LineNotifier {
    /// Sends a notification via LINE Notify
    ///
    /// A context that is already cancelled fails without dispatching. A
    /// context cancelled mid-flight drops the request future, which aborts the
    /// request and releases its connection.
    #[tracing::instrument(name = "line_notify.send", skip_all, fields(message_len = message.len()))]
    async fn send(&self, ctx: &CancellationToken, message: &str) -> NotifyResult<()> {
        if ctx.is_cancelled() {
            return Err(NotifyError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                debug!("Cancelled while waiting for the notify API");
                Err(NotifyError::Cancelled)
            }
            result = self.deliver(message) => result,
        }
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

fn parse_endpoint(endpoint: &str) -> NotifyResult<Url> {
    let url = Url::parse(endpoint).map_err(|e| {
        NotifyError::configuration(format!("invalid endpoint '{}': {}", endpoint, e))
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(NotifyError::configuration(format!(
            "invalid endpoint '{}': URL must use http or https protocol",
            endpoint
        )));
    }

    Ok(url)
}

/// Maps a reply onto the send outcome
///
/// The body is parsed before the status is inspected, so an unparsable body is
/// a parse error whatever the status. A JSON `null` body reads as an empty reply.
pub(crate) fn check_response(status: StatusCode, body: &[u8]) -> NotifyResult<()> {
    let response = serde_json::from_slice::<Option<NotifyResponse>>(body)?.unwrap_or_default();

    if status != StatusCode::OK {
        return Err(NotifyError::Remote(response));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_with_token() {
        let notifier = LineNotifier::new("AABBCCDDEE").unwrap();
        assert_eq!(notifier.endpoint().as_str(), NOTIFY_API_URL);
        assert_eq!(notifier.name(), "line");
    }

    #[test]
    fn test_new_with_empty_token() {
        let err = LineNotifier::new("").unwrap_err();
        assert!(matches!(err, NotifyError::Configuration { .. }));
        assert_eq!(err.to_string(), "authorization token is not set");
    }

    #[test]
    fn test_debug_redacts_token() {
        let notifier = LineNotifier::new("SECRET-TOKEN").unwrap();
        let debug = format!("{:?}", notifier);
        assert!(!debug.contains("SECRET-TOKEN"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_with_endpoint_valid() {
        let notifier = LineNotifier::new("token")
            .unwrap()
            .with_endpoint("http://127.0.0.1:8080/api/notify")
            .unwrap();
        assert_eq!(notifier.endpoint().as_str(), "http://127.0.0.1:8080/api/notify");
    }

    #[test]
    fn test_with_endpoint_invalid() {
        let notifier = LineNotifier::new("token").unwrap();
        assert!(notifier.clone().with_endpoint("not-a-url").is_err());
        assert!(notifier.with_endpoint("ftp://example.com/notify").is_err());
    }

    #[test]
    fn test_check_response_ok() {
        let result = check_response(StatusCode::OK, br#"{"status":200,"message":"ok"}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_response_ok_ignores_body_fields() {
        let result = check_response(StatusCode::OK, br#"{"status":500,"message":"odd"}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_response_not_found() {
        let err = check_response(
            StatusCode::NOT_FOUND,
            br#"{"status":404,"message":"not found"}"#,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), r#"{"status":404,"message":"not found"}"#);
        assert_eq!(err.remote_status(), Some(404));
    }

    #[test]
    fn test_check_response_ok_with_missing_message() {
        assert!(check_response(StatusCode::OK, br#"{"status":200}"#).is_ok());
    }

    #[test]
    fn test_check_response_ok_with_null_fields() {
        assert!(check_response(StatusCode::OK, br#"{"status":200,"message":null}"#).is_ok());
        assert!(check_response(StatusCode::OK, b"null").is_ok());
    }

    #[test]
    fn test_check_response_error_missing_status_keeps_message() {
        let err = check_response(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"Invalid access token"}"#,
        )
        .unwrap_err();

        match err {
            NotifyError::Remote(reply) => {
                assert_eq!(reply.status, 0);
                assert_eq!(reply.message, "Invalid access token");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_response_error_with_null_message() {
        let err = check_response(
            StatusCode::BAD_REQUEST,
            br#"{"status":400,"message":null}"#,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), r#"{"status":400,"message":""}"#);
    }

    #[test]
    fn test_check_response_invalid_json() {
        let err = check_response(StatusCode::OK, br#"{status:200,"message":"ok"}"#).unwrap_err();
        assert!(matches!(err, NotifyError::ResponseParse { .. }));
    }

    #[test]
    fn test_check_response_non_ok_with_invalid_json_is_parse_error() {
        let err = check_response(StatusCode::BAD_GATEWAY, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, NotifyError::ResponseParse { .. }));
    }

    #[tokio::test]
    async fn test_send_with_cancelled_context() {
        // Unroutable endpoint: the request must never be dispatched
        let notifier = LineNotifier::new("token")
            .unwrap()
            .with_endpoint("http://192.0.2.1/api/notify")
            .unwrap();
        let ctx = CancellationToken::new();
        ctx.cancel();

        let err = notifier.send(&ctx, "message").await.unwrap_err();
        assert!(matches!(err, NotifyError::Cancelled));
    }

    proptest! {
        #[test]
        fn prop_non_empty_token_builds_notifier(token in "[A-Za-z0-9_-]{1,64}") {
            let notifier = LineNotifier::new(token);
            prop_assert!(notifier.is_ok());
        }

        #[test]
        fn prop_remote_error_echoes_reply(status in 201i64..600, message in "[a-z ]{0,32}") {
            let body = serde_json::to_vec(&NotifyResponse { status, message: message.clone() }).unwrap();
            let err = check_response(StatusCode::NOT_FOUND, &body).unwrap_err();
            let expected = NotifyResponse { status, message };
            prop_assert_eq!(err.to_string(), expected.to_string());
        }
    }
}
