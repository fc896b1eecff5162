use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Reply body returned by the notify API
///
/// Missing or `null` fields fall back to `0` / `""`, so any well-formed JSON
/// object parses. On a non-200 HTTP status this value becomes the reported
/// error, and its display form is the compact JSON encoding of the reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyResponse {
    /// Status code reported by the remote service
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    /// Human-readable message reported by the remote service
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for NotifyResponse {
    /// `<`, `>`, `&` and the U+2028/U+2029 separators are written as `\u`
    /// escapes so the text can be embedded in HTML or script unchanged.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        for c in encoded.chars() {
            match c {
                '<' => f.write_str("\\u003c")?,
                '>' => f.write_str("\\u003e")?,
                '&' => f.write_str("\\u0026")?,
                '\u{2028}' => f.write_str("\\u2028")?,
                '\u{2029}' => f.write_str("\\u2029")?,
                _ => fmt::Write::write_char(f, c)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for NotifyResponse {}

/// Errors produced while building a notifier or sending a notification.
///
/// Every variant is terminal for the call that produced it; recovery
/// decisions belong to the caller.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Invalid construction input such as an empty token or a bad endpoint
    #[error("{message}")]
    Configuration { message: String },

    /// Request construction or network-level failure
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The caller's cancellation context fired before the request completed
    #[error("Request cancelled before completion")]
    Cancelled,

    /// Response body is not the expected JSON document
    #[error("Failed to parse response body: {source}")]
    ResponseParse {
        #[source]
        source: serde_json::Error,
    },

    /// Remote service answered with a non-200 HTTP status
    #[error(transparent)]
    Remote(#[from] NotifyResponse),
}

impl NotifyError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn transport(context: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { context, source }
    }

    /// True for failures that happened before a response was obtained
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Cancelled)
    }

    /// Status reported by the remote service, if it rejected the request
    pub fn remote_status(&self) -> Option<i64> {
        match self {
            Self::Remote(response) => Some(response.status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NotifyError {
    fn from(source: serde_json::Error) -> Self {
        NotifyError::ResponseParse { source }
    }
}

/// Type alias for Result with NotifyError to simplify function signatures
pub type NotifyResult<T> = Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_as_json() {
        let error = NotifyError::from(NotifyResponse {
            status: 404,
            message: "not found".to_string(),
        });

        assert_eq!(error.to_string(), r#"{"status":404,"message":"not found"}"#);
        assert_eq!(error.remote_status(), Some(404));
        assert!(!error.is_transport());
    }

    #[test]
    fn test_remote_error_escapes_message() {
        let response = NotifyResponse {
            status: 401,
            message: "Invalid \"access\" token".to_string(),
        };

        assert_eq!(
            response.to_string(),
            r#"{"status":401,"message":"Invalid \"access\" token"}"#
        );
    }

    #[test]
    fn test_display_escapes_html_characters() {
        let response = NotifyResponse {
            status: 400,
            message: "a<b&c>d".to_string(),
        };

        assert_eq!(
            response.to_string(),
            r#"{"status":400,"message":"a\u003cb\u0026c\u003ed"}"#
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let response: NotifyResponse = serde_json::from_str(r#"{"status":200}"#).unwrap();
        assert_eq!(response, NotifyResponse { status: 200, message: String::new() });

        let response: NotifyResponse =
            serde_json::from_str(r#"{"message":"Invalid access token"}"#).unwrap();
        assert_eq!(response.status, 0);
        assert_eq!(response.message, "Invalid access token");

        let response: NotifyResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, NotifyResponse::default());
    }

    #[test]
    fn test_null_fields_default() {
        let response: NotifyResponse =
            serde_json::from_str(r#"{"status":null,"message":null}"#).unwrap();
        assert_eq!(response, NotifyResponse::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let response: NotifyResponse =
            serde_json::from_str(r#"{"status":200,"message":"ok","targetType":"USER"}"#).unwrap();
        assert_eq!(response.message, "ok");
    }

    #[test]
    fn test_configuration_error_message() {
        let error = NotifyError::configuration("authorization token is not set");
        assert_eq!(error.to_string(), "authorization token is not set");
        assert!(error.remote_status().is_none());
    }

    #[test]
    fn test_cancelled_is_transport() {
        assert!(NotifyError::Cancelled.is_transport());
    }

    #[test]
    fn test_parse_error_from_serde() {
        let source = serde_json::from_str::<NotifyResponse>("{status:200}").unwrap_err();
        let error = NotifyError::from(source);

        assert!(matches!(error, NotifyError::ResponseParse { .. }));
        assert!(error.to_string().starts_with("Failed to parse response body"));
    }
}
