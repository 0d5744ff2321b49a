//! In-memory delivery channel for testing.
//!
//! Records every payload it is handed and replays a scripted queue of
//! results. With an empty script it reports successful delivery, so the
//! happy path needs no setup. Not a real transport — nothing leaves the
//! process.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Channel, ChannelError, Outcome, Payload};

const DEFAULT_MESSAGE: &str = "Submission received.";

/// An in-memory delivery channel.
///
/// Cloning shares state, so tests can keep a handle for inspection after
/// moving the channel into a controller.
///
/// # Examples
///
/// ```
/// # use leadgate_channel::{Channel, LeadPayload, MemoryChannel, Payload};
/// # #[tokio::main]
/// # async fn main() {
/// let channel = MemoryChannel::new();
/// let payload: Payload = LeadPayload {
///     email: "x@y.org".to_owned(),
///     organization: "Acme".to_owned(),
///     consent_given: true,
/// }
/// .into();
/// let outcome = channel.send(&payload).await;
/// assert!(outcome.delivered);
/// assert_eq!(channel.sent_count().await, 1);
/// # }
/// ```
#[derive(Clone)]
pub struct MemoryChannel {
    sent: Arc<RwLock<Vec<Payload>>>,
    script: Arc<RwLock<VecDeque<Result<Outcome, ChannelError>>>>,
}

impl MemoryChannel {
    /// Create a channel that delivers everything it is handed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            script: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Queue the result of the next dispatch. Queued results are consumed
    /// in order; once the queue is empty, dispatches deliver again.
    pub async fn enqueue(&self, result: Result<Outcome, ChannelError>) {
        self.script.write().await.push_back(result);
    }

    /// Every payload dispatched so far, in order.
    pub async fn sent(&self) -> Vec<Payload> {
        self.sent.read().await.clone()
    }

    /// Number of payloads dispatched so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Channel for MemoryChannel {
    async fn dispatch(&self, payload: &Payload) -> Result<Outcome, ChannelError> {
        self.sent.write().await.push(payload.clone());
        match self.script.write().await.pop_front() {
            Some(result) => result,
            None => Ok(Outcome::delivered(DEFAULT_MESSAGE)),
        }
    }
}
