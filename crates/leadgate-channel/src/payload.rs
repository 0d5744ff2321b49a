//! Submission payloads and delivery outcomes.

use serde::{Deserialize, Serialize};

/// A validated "download the framework" submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    /// Visitor email address.
    pub email: String,
    /// Organization the visitor belongs to.
    pub organization: String,
    /// Consent to receiving communications. Always `true` past validation.
    pub consent_given: bool,
}

/// A validated "contact us" submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    /// Visitor email address.
    pub email: String,
    /// Organization the visitor belongs to.
    pub organization: String,
    /// Free-form message body.
    pub message: String,
    /// Consent to receiving communications. Always `true` past validation.
    pub consent_given: bool,
}

/// A validated submission ready for delivery.
///
/// Serializes untagged, so the request body posted to a first-party
/// endpoint is the flat camelCase object the endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// "Download the framework" lead form.
    Lead(LeadPayload),
    /// "Contact us" form.
    Contact(ContactPayload),
}

impl Payload {
    /// Path of the first-party endpoint this payload is posted to.
    #[must_use]
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Lead(_) => "/api/leads",
            Self::Contact(_) => "/api/contact",
        }
    }

    /// Visitor email address.
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Lead(p) => &p.email,
            Self::Contact(p) => &p.email,
        }
    }

    /// Organization the visitor belongs to.
    #[must_use]
    pub fn organization(&self) -> &str {
        match self {
            Self::Lead(p) => &p.organization,
            Self::Contact(p) => &p.organization,
        }
    }
}

impl From<LeadPayload> for Payload {
    fn from(payload: LeadPayload) -> Self {
        Self::Lead(payload)
    }
}

impl From<ContactPayload> for Payload {
    fn from(payload: ContactPayload) -> Self {
        Self::Contact(payload)
    }
}

/// Normalized result of invoking a delivery channel.
///
/// Every channel maps its internal errors into this shape before the
/// result reaches a controller; `message` is always safe to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the channel actually delivered the submission.
    pub delivered: bool,
    /// Human-readable text for the presentation layer.
    pub message: String,
}

impl Outcome {
    /// Successful delivery carrying the channel's confirmation text.
    #[must_use]
    pub fn delivered(message: impl Into<String>) -> Self {
        Self {
            delivered: true,
            message: message.into(),
        }
    }

    /// Failed delivery carrying user-safe text.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            delivered: false,
            message: message.into(),
        }
    }
}

// --- Internal API response types ---

#[derive(Deserialize)]
pub(crate) struct ApiMessageBody {
    pub message: Option<String>,
    pub error: Option<String>,
}
