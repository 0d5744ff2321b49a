//! Third-party email relay channel.
//!
//! Posts messages to an EmailJS-compatible dispatch API. Selected when the
//! site runs on static hosting, where no first-party endpoints exist. A
//! lead submission fans out two messages — the visitor's confirmation and
//! an internal notification — with all-or-nothing join semantics; a
//! contact submission sends the internal notification only.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::{Channel, ChannelError, ContactPayload, LeadPayload, Outcome, Payload};

const DEFAULT_BASE_URL: &str = "https://api.emailjs.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const SEND_PATH: &str = "/api/v1.0/email/send";

const LEAD_CONFIRMATION: &str = "Thank you! We'll email you the download link shortly.";
const CONTACT_CONFIRMATION: &str =
    "Thank you for your message! We'll get back to you within 24 hours.";

/// Configuration for the relay provider.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Provider service identifier.
    pub service_id: String,
    /// Public API key passed with every message.
    pub public_key: String,
    /// Template for the user-facing confirmation message.
    pub template_confirmation: String,
    /// Template for the internal notification message.
    pub template_notification: String,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEADGATE_RELAY_SERVICE_ID` — provider service identifier
    /// - `LEADGATE_RELAY_PUBLIC_KEY` — public API key
    /// - `LEADGATE_RELAY_TEMPLATE_CONFIRMATION` — confirmation template id
    /// - `LEADGATE_RELAY_TEMPLATE_NOTIFICATION` — notification template id
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            service_id: std::env::var("LEADGATE_RELAY_SERVICE_ID").unwrap_or_default(),
            public_key: std::env::var("LEADGATE_RELAY_PUBLIC_KEY").unwrap_or_default(),
            template_confirmation: std::env::var("LEADGATE_RELAY_TEMPLATE_CONFIRMATION")
                .unwrap_or_default(),
            template_notification: std::env::var("LEADGATE_RELAY_TEMPLATE_NOTIFICATION")
                .unwrap_or_default(),
        }
    }
}

/// Delivery channel backed by the third-party email relay.
#[derive(Debug)]
pub struct RelayChannel {
    config: RelayConfig,
    base_url: String,
    http: reqwest::Client,
}

impl RelayChannel {
    /// Create a relay channel against the provider's production API.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Config`] if any credential or template
    /// identifier is empty.
    pub fn new(config: RelayConfig) -> Result<Self, ChannelError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a relay channel against a specific base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Config`] if any credential or template
    /// identifier is empty.
    pub fn with_base_url(
        config: RelayConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, ChannelError> {
        require_non_empty(&config.service_id, "LEADGATE_RELAY_SERVICE_ID")?;
        require_non_empty(&config.public_key, "LEADGATE_RELAY_PUBLIC_KEY")?;
        require_non_empty(
            &config.template_confirmation,
            "LEADGATE_RELAY_TEMPLATE_CONFIRMATION",
        )?;
        require_non_empty(
            &config.template_notification,
            "LEADGATE_RELAY_TEMPLATE_NOTIFICATION",
        )?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("leadgate/0.2.0")
            .build()
            .map_err(ChannelError::Network)?;

        Ok(Self {
            config,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// Dispatch one templated message through the provider.
    async fn message(
        &self,
        template_id: &str,
        params: BTreeMap<&'static str, String>,
    ) -> Result<(), ChannelError> {
        let url = format!("{}{SEND_PATH}", self.base_url);
        let body = serde_json::json!({
            "service_id": self.config.service_id,
            "template_id": template_id,
            "user_id": self.config.public_key,
            "template_params": params,
        });

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ChannelError::transport)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let text = resp.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            text
        };
        Err(ChannelError::Api {
            status_code: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl Channel for RelayChannel {
    async fn dispatch(&self, payload: &Payload) -> Result<Outcome, ChannelError> {
        match payload {
            Payload::Lead(lead) => {
                // Both messages must land for the submission to count as
                // delivered.
                let (confirmation, notification) = tokio::join!(
                    self.message(&self.config.template_confirmation, lead_params(lead)),
                    self.message(&self.config.template_notification, lead_params(lead)),
                );
                confirmation?;
                notification?;
                tracing::debug!(email = %lead.email, "relay delivered lead confirmation and notification");
                Ok(Outcome::delivered(LEAD_CONFIRMATION))
            }
            Payload::Contact(contact) => {
                self.message(&self.config.template_notification, contact_params(contact))
                    .await?;
                tracing::debug!(email = %contact.email, "relay delivered contact notification");
                Ok(Outcome::delivered(CONTACT_CONFIRMATION))
            }
        }
    }
}

fn require_non_empty(value: &str, var: &str) -> Result<(), ChannelError> {
    if value.trim().is_empty() {
        return Err(ChannelError::Config(format!(
            "missing relay credential — set {var} or pass it in RelayConfig"
        )));
    }
    Ok(())
}

fn base_params(email: &str, organization: &str, form_type: &str) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    params.insert("user_email", email.to_owned());
    params.insert("organization", organization.to_owned());
    params.insert("form_type", form_type.to_owned());
    params.insert("timestamp", chrono::Utc::now().to_rfc3339());
    params
}

fn lead_params(lead: &LeadPayload) -> BTreeMap<&'static str, String> {
    base_params(&lead.email, &lead.organization, "Framework Download")
}

fn contact_params(contact: &ContactPayload) -> BTreeMap<&'static str, String> {
    let mut params = base_params(
        &contact.email,
        &contact.organization,
        "Contact Form Submission",
    );
    params.insert("message", contact.message.clone());
    params
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_config() -> RelayConfig {
        RelayConfig {
            service_id: "service_x".to_owned(),
            public_key: "pk_live".to_owned(),
            template_confirmation: "tpl_confirm".to_owned(),
            template_notification: "tpl_notify".to_owned(),
        }
    }

    // ── construction ─────────────────────────────────────────────────

    #[test]
    fn new_accepts_full_config() {
        assert!(RelayChannel::new(full_config()).is_ok());
    }

    #[test]
    fn new_rejects_missing_service_id() {
        let mut config = full_config();
        config.service_id = String::new();
        let err = RelayChannel::new(config).unwrap_err();
        assert!(matches!(err, ChannelError::Config(_)));
        assert!(err.to_string().contains("LEADGATE_RELAY_SERVICE_ID"));
    }

    #[test]
    fn new_rejects_blank_public_key() {
        let mut config = full_config();
        config.public_key = "   ".to_owned();
        let err = RelayChannel::new(config).unwrap_err();
        assert!(matches!(err, ChannelError::Config(_)));
    }

    #[test]
    fn new_rejects_missing_templates() {
        let mut config = full_config();
        config.template_notification = String::new();
        let err = RelayChannel::new(config).unwrap_err();
        assert!(err.to_string().contains("LEADGATE_RELAY_TEMPLATE_NOTIFICATION"));
    }

    // ── template params ──────────────────────────────────────────────

    #[test]
    fn lead_params_carry_identity_and_form_type() {
        let lead = LeadPayload {
            email: "x@y.org".to_owned(),
            organization: "Acme".to_owned(),
            consent_given: true,
        };
        let params = lead_params(&lead);
        assert_eq!(params["user_email"], "x@y.org");
        assert_eq!(params["organization"], "Acme");
        assert_eq!(params["form_type"], "Framework Download");
        assert!(params.contains_key("timestamp"));
        assert!(!params.contains_key("message"));
    }

    #[test]
    fn contact_params_include_message() {
        let contact = ContactPayload {
            email: "a@b.com".to_owned(),
            organization: "Acme CDFI".to_owned(),
            message: "Please call me back".to_owned(),
            consent_given: true,
        };
        let params = contact_params(&contact);
        assert_eq!(params["message"], "Please call me back");
        assert_eq!(params["form_type"], "Contact Form Submission");
    }
}
