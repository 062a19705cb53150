//! HTTP client for the AgroFarm REST API.
//!
//! Wraps `reqwest` with a cookie jar (the session credential travels as a
//! cookie, exactly like a browser `credentials: include` fetch), uniform
//! non-2xx handling, and typed response decoding. Endpoint groups live in
//! sibling modules as further `impl ApiClient` blocks.

use std::time::Duration;

use agrofarm_core::AppConfig;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::{server_message, ApiError};

const DEFAULT_USER_AGENT: &str = "agrofarm/0.1 (marketplace-client)";

/// Client for the marketplace API.
///
/// Use [`ApiClient::new`] with loaded configuration, or
/// [`ApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if the
    /// configured base URL cannot carry endpoint paths.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::build(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        Self::build(
            base_url,
            Duration::from_secs(timeout_secs),
            Duration::from_secs(10),
            DEFAULT_USER_AGENT,
        )
    }

    fn build(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joined endpoint segments land under
        // the API root rather than replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Sends `request` and decodes a 2xx JSON body into `T`.
    ///
    /// An empty 2xx body is treated as `{}` so that `#[serde(default)]`
    /// response types accept bare acknowledgements.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if the request could not be sent or the body
    ///   could not be read.
    /// - [`ApiError::Server`] on any non-2xx status.
    /// - [`ApiError::Deserialize`] if a 2xx body does not match `T`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!(context, "sending api request");
        let response = request.send().await.map_err(|e| {
            tracing::warn!(context, error = %e, "api request failed before a response");
            ApiError::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = server_message(&body);
            tracing::warn!(
                context,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or("<none>"),
                "api request rejected"
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
