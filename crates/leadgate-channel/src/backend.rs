//! First-party backend channel.
//!
//! Issues a single JSON `POST` to the site's own API — `/api/leads` or
//! `/api/contact` depending on the payload. Selected when the site runs on
//! dynamic hosting. One attempt per user-initiated submit; the visitor
//! resubmits manually after a failure.

use std::time::Duration;

use crate::payload::ApiMessageBody;
use crate::{Channel, ChannelError, Outcome, Payload};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivery channel backed by the first-party HTTP endpoints.
#[derive(Debug)]
pub struct BackendChannel {
    base_url: String,
    http: reqwest::Client,
}

impl BackendChannel {
    /// Create a backend channel for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Network`] if the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ChannelError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("leadgate/0.2.0")
            .build()
            .map_err(ChannelError::Network)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// Create a backend channel from the environment.
    ///
    /// Environment variables:
    /// - `LEADGATE_BACKEND_URL` — endpoint base URL (default:
    ///   `http://127.0.0.1:5000`, the local dev server)
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Network`] if the HTTP client cannot be
    /// built.
    pub fn from_env() -> Result<Self, ChannelError> {
        let base_url =
            std::env::var("LEADGATE_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self::new(base_url)
    }
}

#[async_trait::async_trait]
impl Channel for BackendChannel {
    async fn dispatch(&self, payload: &Payload) -> Result<Outcome, ChannelError> {
        let url = format!("{}{}", self.base_url, payload.endpoint_path());

        let resp = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(ChannelError::transport)?;

        let status = resp.status();
        if status.is_success() {
            let text = resp.text().await.map_err(ChannelError::Network)?;
            let body: ApiMessageBody = serde_json::from_str(&text)?;
            let message = body
                .message
                .unwrap_or_else(|| "Submission received.".to_owned());
            tracing::debug!(endpoint = payload.endpoint_path(), "backend accepted submission");
            return Ok(Outcome::delivered(message));
        }

        let error_text = resp.text().await.unwrap_or_default();
        Err(ChannelError::Api {
            status_code: status.as_u16(),
            message: error_message(status.as_u16(), &error_text),
        })
    }
}

/// Pull a human-readable message out of an error response body, falling
/// back to the bare status.
fn error_message(status_code: u16, body: &str) -> String {
    serde_json::from_str::<ApiMessageBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| format!("HTTP {status_code}"))
}
