//! Submission controllers for the two lead-capture forms.
//!
//! Each controller owns its form's state machine: validate, classify the
//! host, select a channel, deliver, then make the terminal transition. The
//! two forms share that architecture but not the terminal policy. The lead
//! flow promises the visitor a document, so it reaches `Succeeded` and
//! releases the artifact even when delivery fails; the contact flow has
//! nothing to hand over, so a failed delivery returns it to `Idle` for a
//! retry. The two policies are intentionally distinct per form.

use leadgate_channel::Outcome;

use crate::environment::Environment;
use crate::route::ChannelPair;
use crate::validate::{validate_contact, validate_lead, FieldErrors, RawContact, RawLead};

const LEAD_FALLBACK_MESSAGE: &str = "Your download is starting. We'll follow up by email.";

/// Lifecycle of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Mounted, accepting input. Also the explicit retry state after a
    /// failed contact delivery.
    #[default]
    Idle,
    /// A submission is in flight. The presentation layer disables the
    /// submit affordance.
    Pending,
    /// Terminal. Only [`reset`](LeadController::reset) leaves this state.
    Succeeded,
}

/// Visual tone of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTone {
    /// Confirmation styling.
    Success,
    /// Error styling.
    Destructive,
}

/// Fire-and-forget side effects for the presentation layer to realize.
///
/// The controller performs no browser work itself; it describes the work
/// and stays portable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Show a toast notification.
    Toast {
        /// Toast heading.
        title: String,
        /// Toast body text.
        body: String,
        /// Visual tone.
        tone: ToastTone,
    },
    /// Start a browser download of the promised document.
    DownloadArtifact {
        /// Path the document is served from.
        path: String,
        /// Filename the browser saves it as.
        filename: String,
    },
    /// Scroll to the top of the page so the confirmation card is visible.
    ScrollToTop,
    /// Clear the form fields.
    ResetForm,
}

/// The document released to the visitor after a lead submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path the document is served from.
    pub path: String,
    /// Filename the browser saves it as.
    pub filename: String,
}

impl Default for Artifact {
    fn default() -> Self {
        Self {
            path: "/CDFI-SPF.pdf".to_owned(),
            filename: "CDFI-Security-Privacy-Framework.pdf".to_owned(),
        }
    }
}

/// Controller for the "download the framework" form.
///
/// Terminal policy: every validated submission ends `Succeeded` and emits
/// exactly one [`UiEvent::DownloadArtifact`] — a transient delivery
/// failure never blocks the visitor from the document they asked for.
pub struct LeadController {
    channels: ChannelPair,
    artifact: Artifact,
    state: SubmissionState,
    field_errors: FieldErrors,
    last_message: Option<String>,
}

impl LeadController {
    /// Create a controller releasing the default framework document.
    #[must_use]
    pub fn new(channels: ChannelPair) -> Self {
        Self::with_artifact(channels, Artifact::default())
    }

    /// Create a controller releasing a specific document.
    #[must_use]
    pub fn with_artifact(channels: ChannelPair, artifact: Artifact) -> Self {
        Self {
            channels,
            artifact,
            state: SubmissionState::Idle,
            field_errors: FieldErrors::new(),
            last_message: None,
        }
    }

    /// Submit the form. All results are observed through state and the
    /// returned events.
    ///
    /// A call on a non-`Idle` controller is a no-op; the presentation
    /// layer disables the submit affordance outside `Idle`.
    pub async fn submit(&mut self, raw: &RawLead, host: &str) -> Vec<UiEvent> {
        if self.state != SubmissionState::Idle {
            return Vec::new();
        }

        let payload = match validate_lead(raw) {
            Ok(payload) => payload,
            Err(errors) => {
                self.field_errors = errors;
                return Vec::new();
            }
        };

        self.field_errors.clear();
        self.state = SubmissionState::Pending;

        let environment = Environment::classify(host);
        tracing::info!(?environment, form = "lead", "submitting");
        let outcome = self
            .channels
            .select(environment)
            .send(&payload.into())
            .await;

        // Terminal either way; the promised document is always released.
        self.state = SubmissionState::Succeeded;
        let message = if outcome.delivered {
            outcome.message
        } else {
            tracing::warn!("lead delivery failed, releasing artifact anyway");
            LEAD_FALLBACK_MESSAGE.to_owned()
        };
        self.last_message = Some(message.clone());

        vec![
            UiEvent::Toast {
                title: "Success!".to_owned(),
                body: message,
                tone: ToastTone::Success,
            },
            UiEvent::DownloadArtifact {
                path: self.artifact.path.clone(),
                filename: self.artifact.filename.clone(),
            },
            UiEvent::ResetForm,
        ]
    }

    /// Return to `Idle`, clearing field errors and the last message.
    /// Idempotent; nothing from the prior submission is retained.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
        self.field_errors.clear();
        self.last_message = None;
    }

    /// Current submission state.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Message from the last terminal outcome, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Per-field validation errors from the last submit attempt.
    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }
}

/// Controller for the "contact us" form.
///
/// Terminal policy: delivery failure is a hard failure. The controller
/// returns to `Idle`, the form stays filled, and the visitor retries.
pub struct ContactController {
    channels: ChannelPair,
    state: SubmissionState,
    field_errors: FieldErrors,
    last_message: Option<String>,
}

impl ContactController {
    /// Create a contact controller over the given channels.
    #[must_use]
    pub fn new(channels: ChannelPair) -> Self {
        Self {
            channels,
            state: SubmissionState::Idle,
            field_errors: FieldErrors::new(),
            last_message: None,
        }
    }

    /// Submit the form. All results are observed through state and the
    /// returned events.
    ///
    /// A call on a non-`Idle` controller is a no-op.
    pub async fn submit(&mut self, raw: &RawContact, host: &str) -> Vec<UiEvent> {
        if self.state != SubmissionState::Idle {
            return Vec::new();
        }

        let payload = match validate_contact(raw) {
            Ok(payload) => payload,
            Err(errors) => {
                self.field_errors = errors;
                return Vec::new();
            }
        };

        self.field_errors.clear();
        self.state = SubmissionState::Pending;

        let environment = Environment::classify(host);
        tracing::info!(?environment, form = "contact", "submitting");
        let outcome = self
            .channels
            .select(environment)
            .send(&payload.into())
            .await;

        if outcome.delivered {
            self.succeed(outcome)
        } else {
            self.fail(outcome)
        }
    }

    fn succeed(&mut self, outcome: Outcome) -> Vec<UiEvent> {
        self.state = SubmissionState::Succeeded;
        self.last_message = Some(outcome.message.clone());
        vec![
            UiEvent::Toast {
                title: "Message Sent!".to_owned(),
                body: outcome.message,
                tone: ToastTone::Success,
            },
            UiEvent::ScrollToTop,
            UiEvent::ResetForm,
        ]
    }

    fn fail(&mut self, outcome: Outcome) -> Vec<UiEvent> {
        // Explicit retry state: back to Idle, form left filled.
        self.state = SubmissionState::Idle;
        self.last_message = Some(outcome.message.clone());
        vec![UiEvent::Toast {
            title: "Error".to_owned(),
            body: outcome.message,
            tone: ToastTone::Destructive,
        }]
    }

    /// Return to `Idle`, clearing field errors and the last message.
    /// Idempotent; nothing from the prior submission is retained. Backs
    /// the "Send Another Message" action on the confirmation card.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
        self.field_errors.clear();
        self.last_message = None;
    }

    /// Current submission state.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Message from the last terminal outcome, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Per-field validation errors from the last submit attempt.
    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }
}
