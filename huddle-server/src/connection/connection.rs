use crate::config::DeliveryPolicy;
use huddle_core::{ConnectionId, Interaction};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{SendTimeoutError, TryRecvError, TrySendError};

/// The caller's side of a connection: receives the interactions broadcast
/// into the room. The outbox closes (`recv` yields `None` once drained) when
/// the room drops the matching [`Member`].
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    outbox: mpsc::Receiver<Arc<Interaction>>,
}

/// The room's side of a connection: the sending half of the outbox.
#[derive(Debug)]
pub struct Member {
    id: ConnectionId,
    tx: mpsc::Sender<Arc<Interaction>>,
}

/// Outcome of handing one message to one outbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The receiving side is gone.
    Closed,
    /// The outbox stayed full past the policy's timeout (or, for
    /// [`Member::try_deliver`], was full right now).
    Stalled,
}

impl Connection {
    /// Creates a connection with a fresh id and a bounded outbox.
    pub fn new(capacity: usize) -> (Connection, Member) {
        Self::with_id(ConnectionId::new(), capacity)
    }

    /// Creates a connection with an id assigned by the caller. The id only
    /// has to be unique among the connections of one user.
    pub fn with_id(id: ConnectionId, capacity: usize) -> (Connection, Member) {
        let (tx, outbox) = mpsc::channel(capacity.max(1));

        (Connection { id, outbox }, Member { id, tx })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub async fn recv(&mut self) -> Option<Arc<Interaction>> {
        self.outbox.recv().await
    }

    pub fn try_recv(&mut self) -> Result<Arc<Interaction>, TryRecvError> {
        self.outbox.try_recv()
    }
}

impl Member {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub async fn deliver(&self, msg: Arc<Interaction>, policy: DeliveryPolicy) -> Delivery {
        match policy.timeout() {
            None => match self.tx.send(msg).await {
                Ok(()) => Delivery::Delivered,
                Err(_) => Delivery::Closed,
            },
            Some(timeout) => match self.tx.send_timeout(msg, timeout).await {
                Ok(()) => Delivery::Delivered,
                Err(SendTimeoutError::Closed(_)) => Delivery::Closed,
                Err(SendTimeoutError::Timeout(_)) => Delivery::Stalled,
            },
        }
    }

    pub fn try_deliver(&self, msg: Arc<Interaction>) -> Delivery {
        match self.tx.try_send(msg) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Closed(_)) => Delivery::Closed,
            Err(TrySendError::Full(_)) => Delivery::Stalled,
        }
    }
}
