use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::DeliveryPolicy;
use crate::connection::{Delivery, Member};
use crate::room::error::RoomError;
use huddle_core::{ConnectionId, Interaction, RoomId, UserId};

/// Snapshot row returned by [`Room::peers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub id: UserId,
}

/// Membership and broadcast state of one room.
///
/// Each user holds at most one active connection: adding a connection for a
/// user already present evicts the previous one, closing its outbox.
pub struct Room {
    id: RoomId,
    members: Mutex<HashMap<UserId, Member>>,
    delivery: DeliveryPolicy,
}

impl Room {
    pub fn new(id: RoomId, delivery: DeliveryPolicy) -> Self {
        Self {
            id,
            members: Mutex::new(HashMap::new()),
            delivery,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub async fn add(&self, user: UserId, member: Member) -> Result<(), RoomError> {
        let mut members = self.members.lock().await;

        if let Some(current) = members.get(&user) {
            if current.id() == member.id() {
                return Err(RoomError::DuplicateConnection {
                    user,
                    connection: member.id(),
                });
            }
        }

        let connection = member.id();
        if let Some(previous) = members.insert(user.clone(), member) {
            info!(
                "Evicted connection {} of user {} in room {}",
                previous.id(),
                user,
                self.id
            );
        }

        info!(
            "User {} added to room {} with connection {}",
            user, self.id, connection
        );
        Ok(())
    }

    /// Delivers `msg` to every member not listed in `exclude`.
    ///
    /// Closed outboxes are skipped silently. Under a timeout policy, stalled
    /// outboxes are skipped and reported once every other member was served.
    pub async fn notify(&self, exclude: &[UserId], msg: Arc<Interaction>) -> Result<(), RoomError> {
        let exclude: HashSet<&UserId> = exclude.iter().collect();
        let members = self.members.lock().await;

        let mut stalled = 0;
        for (user, member) in members.iter() {
            if exclude.contains(user) {
                continue;
            }

            match member.deliver(Arc::clone(&msg), self.delivery).await {
                Delivery::Delivered => {
                    debug!("Delivered {:?} to {} in room {}", msg.kind(), user, self.id);
                }
                Delivery::Closed => {
                    debug!(
                        "Outbox of {} in room {} is closed, skipping",
                        user, self.id
                    );
                }
                Delivery::Stalled => {
                    warn!(
                        "Outbox of {} in room {} is full, dropping {:?}",
                        user,
                        self.id,
                        msg.kind()
                    );
                    stalled += 1;
                }
            }
        }

        if stalled > 0 {
            return Err(RoomError::DeliveryTimedOut {
                room: self.id.clone(),
                stalled,
            });
        }

        Ok(())
    }

    /// Removes `connection` from `user`. Unknown users or connections are a
    /// no-op.
    pub async fn remove(&self, user: &UserId, connection: ConnectionId) {
        let mut members = self.members.lock().await;

        let Some(current) = members.get(user) else {
            warn!("User {} has no connection in room {}", user, self.id);
            return;
        };

        if current.id() != connection {
            warn!(
                "User {} has no connection {} in room {} (active: {})",
                user,
                connection,
                self.id,
                current.id()
            );
            return;
        }

        members.remove(user);
        info!(
            "Removed connection {} of user {} from room {}",
            connection, user, self.id
        );
    }

    pub async fn users(&self) -> usize {
        self.members.lock().await.len()
    }

    pub async fn peers(&self) -> Vec<Peer> {
        self.members
            .lock()
            .await
            .keys()
            .map(|id| Peer { id: id.clone() })
            .collect()
    }

    /// Drops every member, closing their outboxes. Returns how many were
    /// closed.
    pub async fn drain(&self) -> usize {
        let mut members = self.members.lock().await;
        let closed = members.len();
        members.clear();
        closed
    }
}
