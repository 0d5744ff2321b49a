//! Schema validation for raw form input.
//!
//! Pure and synchronous: free-form field values in, a typed payload or a
//! map of violated fields out. Every invalid field is reported in the same
//! pass, so the presentation layer can annotate the whole form at once.

use std::collections::BTreeMap;

use email_address::EmailAddress;
use leadgate_channel::{ContactPayload, LeadPayload};

/// Minimum length of a contact message, in characters.
pub const MESSAGE_MIN_CHARS: usize = 10;

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// Visitor email address.
    Email,
    /// Organization name.
    Organization,
    /// Free-form message (contact form only).
    Message,
    /// Consent checkbox.
    Consent,
}

impl Field {
    /// Field name as the presentation layer knows it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Organization => "organization",
            Self::Message => "message",
            Self::Consent => "consent",
        }
    }
}

/// A violated validation rule. The `Display` text is the inline copy the
/// site shows next to the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Not a valid email address.
    #[error("Invalid email address")]
    InvalidFormat,

    /// Required field left empty.
    #[error("Organization is required")]
    Required,

    /// Message below the minimum length.
    #[error("Message must be at least {min} characters")]
    TooShort {
        /// The minimum accepted length.
        min: usize,
    },

    /// Consent checkbox left unchecked.
    #[error("You must consent to proceed")]
    ConsentRequired,
}

/// Mapping from each invalid field to the rule it violated.
pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Raw input of the "download the framework" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLead {
    /// Email field value.
    pub email: String,
    /// Organization field value.
    pub organization: String,
    /// Consent checkbox state.
    pub consent: bool,
}

/// Raw input of the "contact us" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContact {
    /// Email field value.
    pub email: String,
    /// Organization field value.
    pub organization: String,
    /// Message field value.
    pub message: String,
    /// Consent checkbox state.
    pub consent: bool,
}

/// Validate a lead submission.
///
/// # Errors
///
/// Returns a [`FieldErrors`] map naming every violated field.
pub fn validate_lead(raw: &RawLead) -> Result<LeadPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_email(&raw.email, &mut errors);
    check_organization(&raw.organization, &mut errors);
    check_consent(raw.consent, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LeadPayload {
        email: raw.email.clone(),
        organization: raw.organization.trim().to_owned(),
        consent_given: true,
    })
}

/// Validate a contact submission.
///
/// # Errors
///
/// Returns a [`FieldErrors`] map naming every violated field.
pub fn validate_contact(raw: &RawContact) -> Result<ContactPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_email(&raw.email, &mut errors);
    check_organization(&raw.organization, &mut errors);
    check_message(&raw.message, &mut errors);
    check_consent(raw.consent, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactPayload {
        email: raw.email.clone(),
        organization: raw.organization.trim().to_owned(),
        message: raw.message.clone(),
        consent_given: true,
    })
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if !EmailAddress::is_valid(email) {
        errors.insert(Field::Email, FieldError::InvalidFormat);
    }
}

fn check_organization(organization: &str, errors: &mut FieldErrors) {
    if organization.trim().is_empty() {
        errors.insert(Field::Organization, FieldError::Required);
    }
}

fn check_message(message: &str, errors: &mut FieldErrors) {
    if message.chars().count() < MESSAGE_MIN_CHARS {
        errors.insert(
            Field::Message,
            FieldError::TooShort {
                min: MESSAGE_MIN_CHARS,
            },
        );
    }
}

fn check_consent(consent: bool, errors: &mut FieldErrors) {
    if !consent {
        errors.insert(Field::Consent, FieldError::ConsentRequired);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_lead() -> RawLead {
        RawLead {
            email: "x@y.org".to_owned(),
            organization: "Acme".to_owned(),
            consent: true,
        }
    }

    fn valid_contact() -> RawContact {
        RawContact {
            email: "a@b.com".to_owned(),
            organization: "Acme CDFI".to_owned(),
            message: "Please call me back".to_owned(),
            consent: true,
        }
    }

    // ── lead form ────────────────────────────────────────────────────

    #[test]
    fn valid_lead_produces_payload() {
        let payload = validate_lead(&valid_lead()).unwrap();
        assert_eq!(payload.email, "x@y.org");
        assert_eq!(payload.organization, "Acme");
        assert!(payload.consent_given);
    }

    #[test]
    fn invalid_email_reported_as_invalid_format() {
        for email in ["", "plainaddress", "missing@domain@twice", "no-at-sign.org"] {
            let raw = RawLead {
                email: email.to_owned(),
                ..valid_lead()
            };
            let errors = validate_lead(&raw).unwrap_err();
            assert_eq!(
                errors.get(&Field::Email),
                Some(&FieldError::InvalidFormat),
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn whitespace_organization_is_required() {
        let raw = RawLead {
            organization: "   ".to_owned(),
            ..valid_lead()
        };
        let errors = validate_lead(&raw).unwrap_err();
        assert_eq!(errors.get(&Field::Organization), Some(&FieldError::Required));
    }

    #[test]
    fn organization_is_trimmed_in_payload() {
        let raw = RawLead {
            organization: "  Acme  ".to_owned(),
            ..valid_lead()
        };
        let payload = validate_lead(&raw).unwrap();
        assert_eq!(payload.organization, "Acme");
    }

    #[test]
    fn missing_consent_fails_regardless_of_other_fields() {
        let raw = RawLead {
            consent: false,
            ..valid_lead()
        };
        let errors = validate_lead(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&Field::Consent), Some(&FieldError::ConsentRequired));
    }

    #[test]
    fn every_violated_field_is_reported_at_once() {
        let raw = RawLead {
            email: "not-an-email".to_owned(),
            organization: String::new(),
            consent: false,
        };
        let errors = validate_lead(&raw).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    // ── contact form ─────────────────────────────────────────────────

    #[test]
    fn valid_contact_produces_payload() {
        let payload = validate_contact(&valid_contact()).unwrap();
        assert_eq!(payload.message, "Please call me back");
    }

    #[test]
    fn message_below_ten_characters_is_too_short() {
        let raw = RawContact {
            message: "Call me".to_owned(),
            ..valid_contact()
        };
        let errors = validate_contact(&raw).unwrap_err();
        assert_eq!(
            errors.get(&Field::Message),
            Some(&FieldError::TooShort { min: 10 })
        );
    }

    #[test]
    fn message_length_counts_characters_not_bytes() {
        // Ten multi-byte characters: 30 bytes, 10 chars.
        let raw = RawContact {
            message: "もしもし、電話ですか".to_owned(),
            ..valid_contact()
        };
        assert!(validate_contact(&raw).is_ok());
    }

    #[test]
    fn exactly_ten_characters_passes() {
        let raw = RawContact {
            message: "0123456789".to_owned(),
            ..valid_contact()
        };
        assert!(validate_contact(&raw).is_ok());
    }

    #[test]
    fn contact_reports_all_four_fields() {
        let raw = RawContact {
            email: "bad".to_owned(),
            organization: String::new(),
            message: "hi".to_owned(),
            consent: false,
        };
        let errors = validate_contact(&raw).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    // ── copy ─────────────────────────────────────────────────────────

    #[test]
    fn field_error_display_matches_inline_copy() {
        assert_eq!(FieldError::InvalidFormat.to_string(), "Invalid email address");
        assert_eq!(
            FieldError::TooShort { min: 10 }.to_string(),
            "Message must be at least 10 characters"
        );
        assert_eq!(
            FieldError::ConsentRequired.to_string(),
            "You must consent to proceed"
        );
    }

    #[test]
    fn field_names_match_presentation_contract() {
        assert_eq!(Field::Email.as_str(), "email");
        assert_eq!(Field::Consent.as_str(), "consent");
    }
}
