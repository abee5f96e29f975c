use serde::Deserialize;
use std::time::Duration;

/// How a broadcast hands a message to a connection whose outbox is full.
///
/// Delivery happens while the room lock is held, so a consumer that stops
/// draining its outbox stalls every other operation on that room for as long
/// as the send waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Wait until the outbox has room. A dead consumer blocks the room forever.
    Block,
    /// Wait at most `timeout_ms`, then skip the connection and report it.
    Timeout { timeout_ms: u64 },
}

impl DeliveryPolicy {
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::Block => None,
            Self::Timeout { timeout_ms } => Some(Duration::from_millis(*timeout_ms)),
        }
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::Timeout { timeout_ms: 5_000 }
    }
}

/// Hub settings. Deserializable so an embedding service can load it
/// alongside its own configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Messages buffered per connection before delivery waits.
    pub outbox_capacity: usize,
    pub delivery: DeliveryPolicy,
}

impl HubConfig {
    /// Channel capacity must be non-zero.
    pub fn validated(mut self) -> Self {
        self.outbox_capacity = self.outbox_capacity.max(1);
        self
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            outbox_capacity: 64,
            delivery: DeliveryPolicy::default(),
        }
    }
}
