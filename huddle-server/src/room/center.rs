use crate::config::HubConfig;
use crate::connection::Member;
use crate::room::error::RegistryError;
use crate::room::registry::Registry;
use crate::room::{Peer, Room};
use async_trait::async_trait;
use huddle_core::{ConnectionId, Interaction, RoomId, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// In-memory [`Registry`].
///
/// Every operation holds the registry lock for its whole duration, so
/// operations on different rooms are serialized against each other too.
pub struct Center {
    rooms: Mutex<HashMap<RoomId, Room>>,
    config: HubConfig,
}

impl Center {
    pub fn new(config: HubConfig) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            config: config.validated(),
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub async fn contains(&self, room: &RoomId) -> bool {
        self.rooms.lock().await.contains_key(room)
    }

    /// Distinct users in `room`, or `None` when the room does not exist.
    pub async fn users(&self, room: &RoomId) -> Option<usize> {
        let rooms = self.rooms.lock().await;
        match rooms.get(room) {
            Some(r) => Some(r.users().await),
            None => None,
        }
    }

    pub async fn peers(&self, room: &RoomId) -> Option<Vec<Peer>> {
        let rooms = self.rooms.lock().await;
        match rooms.get(room) {
            Some(r) => Some(r.peers().await),
            None => None,
        }
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

impl Default for Center {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}

#[async_trait]
impl Registry for Center {
    async fn add(&self, room_id: &RoomId, user: &UserId, member: Member) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;

        let room = rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            Room::new(room_id.clone(), self.config.delivery)
        });

        let connection = member.id();
        let Err(e) = room.add(user.clone(), member).await else {
            return Ok(());
        };

        warn!(
            "Failed to add connection {} of user {} to room {}: {}",
            connection, user, room_id, e
        );
        // A rejected add leaves the room as it was. Only a room created for
        // this call can be empty here.
        if room.users().await == 0 {
            rooms.remove(room_id);
            info!("Deleted room {}", room_id);
        }

        Err(e.into())
    }

    async fn notify(
        &self,
        room_id: &RoomId,
        exclude: &[UserId],
        msg: Arc<Interaction>,
    ) -> Result<(), RegistryError> {
        let rooms = self.rooms.lock().await;

        let Some(room) = rooms.get(room_id) else {
            return Ok(());
        };

        room.notify(exclude, msg).await?;
        Ok(())
    }

    async fn remove(
        &self,
        room_id: &RoomId,
        user: &UserId,
        connection: ConnectionId,
    ) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;

        let Some(room) = rooms.get(room_id) else {
            return Ok(());
        };

        room.remove(user, connection).await;

        let remaining = room.users().await;
        if remaining == 0 {
            rooms.remove(room_id);
            info!("Deleted room {}", room_id);
        } else {
            info!("Room {} still has {} peer(s)", room_id, remaining);
        }

        Ok(())
    }

    async fn close(&self, room_id: &RoomId) -> Result<usize, RegistryError> {
        let mut rooms = self.rooms.lock().await;

        let Some(room) = rooms.remove(room_id) else {
            return Ok(0);
        };

        let closed = room.drain().await;
        info!("Closed room {} ({} connection(s))", room_id, closed);
        Ok(closed)
    }
}
