use thiserror::Error;

/// Shown when neither the transport nor the server gave us anything better.
pub const GENERIC_FAILURE_MESSAGE: &str = "could not complete request";

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server, or no response came back.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the body's `message` field when the
    /// body was a JSON object carrying one.
    #[error("server returned HTTP {status}: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Server { status: u16, message: Option<String> },

    /// A 2xx response whose body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ApiError {
    /// Text to put in front of the user: the server's own message verbatim
    /// when it sent one, otherwise [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// HTTP status for server rejections.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pulls a non-empty `message` string out of an error body, if the body is
/// a JSON object that has one.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
