use crate::call::access::{AccessCheck, AccessPolicy};
use crate::call::error::CallError;
use crate::config::HubConfig;
use crate::connection::{Connection, Delivery};
use crate::room::Registry;
use huddle_core::{ConnectionId, Interaction, RoomId, UserId};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Identifies the room an operation targeted. Does not reflect membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDescriptor {
    pub id: RoomId,
}

/// Public entry point for signaling transports: joins peers to rooms,
/// relays their messages and tears rooms down, running the configured
/// access checks first.
#[derive(Clone)]
pub struct CallManager {
    registry: Arc<dyn Registry>,
    policy: AccessPolicy,
    config: HubConfig,
}

pub struct CallManagerBuilder {
    registry: Arc<dyn Registry>,
    policy: AccessPolicy,
    config: HubConfig,
}

impl CallManagerBuilder {
    pub fn check_new<C>(mut self, check: C) -> Self
    where
        C: AccessCheck + 'static,
    {
        self.policy.new = Some(Arc::new(check));
        self
    }

    pub fn check_message<C>(mut self, check: C) -> Self
    where
        C: AccessCheck + 'static,
    {
        self.policy.message = Some(Arc::new(check));
        self
    }

    pub fn check_finish<C>(mut self, check: C) -> Self
    where
        C: AccessCheck + 'static,
    {
        self.policy.finish = Some(Arc::new(check));
        self
    }

    pub fn policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(mut self, config: HubConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> CallManager {
        CallManager {
            registry: self.registry,
            policy: self.policy,
            config: self.config.validated(),
        }
    }
}

impl CallManager {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self::builder(registry).build()
    }

    pub fn builder(registry: Arc<dyn Registry>) -> CallManagerBuilder {
        CallManagerBuilder {
            registry,
            policy: AccessPolicy::default(),
            config: HubConfig::default(),
        }
    }

    /// Joins `user` to `room` and returns the connection its messages arrive
    /// on. The first message is a `NewPeer` carrying the user's own id.
    ///
    /// The peer stays in the room until `cancel` fires (or the room is
    /// finished); cancellation removes it and announces `Disconnected` to
    /// the remaining members.
    pub async fn add_peer(
        &self,
        room: RoomId,
        user: UserId,
        cancel: CancellationToken,
    ) -> Result<Connection, CallError> {
        self.policy.check_new(&room, &user).await?;

        let (connection, member) = Connection::new(self.config.outbox_capacity);
        let connection_id = connection.id();
        let joined = Arc::new(Interaction::new_peer(&user));

        // Fresh outbox with capacity >= 1, so this cannot stall.
        if member.try_deliver(Arc::clone(&joined)) != Delivery::Delivered {
            warn!("Could not signal {} about its own connection", user);
        }

        if let Err(e) = self.registry.add(&room, &user, member).await {
            if let Err(cleanup) = self.registry.remove(&room, &user, connection_id).await {
                warn!(
                    "Cleanup of connection {} in room {} failed: {}",
                    connection_id, room, cleanup
                );
            }
            return Err(e.into());
        }

        if let Err(e) = self
            .registry
            .notify(&room, std::slice::from_ref(&user), joined)
            .await
        {
            warn!("Failed to announce {} to room {}: {}", user, room, e);
        }

        info!("Peer {} joined room {} ({})", user, room, connection_id);

        let manager = self.clone();
        tokio::spawn(async move {
            cancel.cancelled().await;
            info!("Disconnecting peer {} from room {}", user, room);
            manager.remove_peer(&room, &user, connection_id).await;
        });

        Ok(connection)
    }

    /// Removes one connection and tells the rest of the room that `user`
    /// left. Safe to call for connections that are already gone.
    pub async fn remove_peer(&self, room: &RoomId, user: &UserId, connection: ConnectionId) {
        if let Err(e) = self.registry.remove(room, user, connection).await {
            warn!(
                "Failed to remove connection {} of {} from room {}: {}",
                connection, user, room, e
            );
        }

        let msg = Arc::new(Interaction::disconnected(user));
        if let Err(e) = self
            .registry
            .notify(room, std::slice::from_ref(user), msg)
            .await
        {
            warn!("Failed to announce departure of {} in room {}: {}", user, room, e);
        }
    }

    /// Relays `msg` to every member of `room` except `sender`.
    pub async fn send_message(
        &self,
        room: &RoomId,
        sender: &UserId,
        msg: Interaction,
    ) -> Result<RoomDescriptor, CallError> {
        self.policy.check_message(room, sender).await?;

        self.registry
            .notify(room, std::slice::from_ref(sender), Arc::new(msg))
            .await?;

        Ok(RoomDescriptor { id: room.clone() })
    }

    /// Announces `Finished` to everyone but `user`, then closes every
    /// connection in the room and drops it.
    ///
    /// The announcement is best effort: a stalled peer misses it, but the
    /// room is closed either way.
    pub async fn finish(&self, room: &RoomId, user: &UserId) -> Result<RoomDescriptor, CallError> {
        self.policy.check_finish(room, user).await?;

        if let Err(e) = self
            .registry
            .notify(
                room,
                std::slice::from_ref(user),
                Arc::new(Interaction::finished(room)),
            )
            .await
        {
            warn!("Failed to announce finish of room {}: {}", room, e);
        }

        let closed = self.registry.close(room).await?;
        info!("Room {} finished by {} ({} connection(s) closed)", room, user, closed);

        Ok(RoomDescriptor { id: room.clone() })
    }
}
