//! Delivery channel abstraction for `leadgate`.
//!
//! This crate defines the [`Channel`] trait — the transport a validated
//! form submission travels through. Controllers in `leadgate-core` pick a
//! channel per submission and consume the normalized [`Outcome`]; they
//! never see provider-specific errors.
//!
//! Three implementations are provided:
//!
//! - [`RelayChannel`] — third-party email relay, used on static hosting
//! - [`BackendChannel`] — first-party HTTP endpoints, used on dynamic hosting
//! - [`MemoryChannel`] — in-memory, for testing only

mod backend;
mod error;
mod memory;
mod payload;
mod relay;

pub use backend::BackendChannel;
pub use error::ChannelError;
pub use memory::MemoryChannel;
pub use payload::{ContactPayload, LeadPayload, Outcome, Payload};
pub use relay::{RelayChannel, RelayConfig};

/// A pluggable delivery channel for validated submissions.
///
/// Implementations must be safe to share across async tasks
/// (`Send + Sync`).
#[async_trait::async_trait]
pub trait Channel: Send + Sync + 'static {
    /// Deliver a payload, returning the raw result.
    ///
    /// One user-initiated submit maps to one `dispatch` call; channels do
    /// not retry.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] if the provider rejects the payload, the
    /// transport fails, or the channel is misconfigured.
    async fn dispatch(&self, payload: &Payload) -> Result<Outcome, ChannelError>;

    /// Deliver a payload, normalizing any error into a failed [`Outcome`]
    /// with user-safe text.
    ///
    /// The underlying error is logged here so diagnostics survive the
    /// normalization; configuration errors log at `error` level.
    async fn send(&self, payload: &Payload) -> Outcome {
        match self.dispatch(payload).await {
            Ok(outcome) => outcome,
            Err(err) => {
                match &err {
                    ChannelError::Config(_) => {
                        tracing::error!(error = %err, "channel misconfigured, submission not delivered");
                    }
                    _ => {
                        tracing::warn!(error = %err, "channel delivery failed");
                    }
                }
                Outcome::failed(err.user_safe_message())
            }
        }
    }
}
