//! Channel selection.
//!
//! The environment-to-channel mapping lives here and nowhere else; the
//! controllers never branch on the environment themselves.

use std::sync::Arc;

use leadgate_channel::Channel;

use crate::environment::Environment;

/// The two mutually exclusive delivery channels available to a form.
#[derive(Clone)]
pub struct ChannelPair {
    relay: Arc<dyn Channel>,
    backend: Arc<dyn Channel>,
}

impl ChannelPair {
    /// Pair the relay channel with the backend channel.
    #[must_use]
    pub fn new(relay: Arc<dyn Channel>, backend: Arc<dyn Channel>) -> Self {
        Self { relay, backend }
    }

    /// The channel matching a hosting environment.
    #[must_use]
    pub fn select(&self, environment: Environment) -> &dyn Channel {
        match environment {
            Environment::Static => self.relay.as_ref(),
            Environment::Dynamic => self.backend.as_ref(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use leadgate_channel::{LeadPayload, MemoryChannel, Payload};

    fn lead() -> Payload {
        LeadPayload {
            email: "x@y.org".to_owned(),
            organization: "Acme".to_owned(),
            consent_given: true,
        }
        .into()
    }

    #[tokio::test]
    async fn static_selects_the_relay() {
        let relay = MemoryChannel::new();
        let backend = MemoryChannel::new();
        let pair = ChannelPair::new(Arc::new(relay.clone()), Arc::new(backend.clone()));

        pair.select(Environment::Static).send(&lead()).await;

        assert_eq!(relay.sent_count().await, 1);
        assert_eq!(backend.sent_count().await, 0);
    }

    #[tokio::test]
    async fn dynamic_selects_the_backend() {
        let relay = MemoryChannel::new();
        let backend = MemoryChannel::new();
        let pair = ChannelPair::new(Arc::new(relay.clone()), Arc::new(backend.clone()));

        pair.select(Environment::Dynamic).send(&lead()).await;

        assert_eq!(relay.sent_count().await, 0);
        assert_eq!(backend.sent_count().await, 1);
    }
}
