use huddle_core::{ConnectionId, RoomId, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoomError {
    /// The user's active connection already carries this id.
    #[error("user {user} already has connection {connection}")]
    DuplicateConnection {
        user: UserId,
        connection: ConnectionId,
    },

    /// Some outboxes stayed full past the delivery timeout; every other
    /// member still received the message.
    #[error("delivery in room {room} timed out for {stalled} connection(s)")]
    DeliveryTimedOut { room: RoomId, stalled: usize },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Room(#[from] RoomError),
}
