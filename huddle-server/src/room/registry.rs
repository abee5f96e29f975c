use crate::connection::Member;
use crate::room::error::RegistryError;
use async_trait::async_trait;
use huddle_core::{ConnectionId, Interaction, RoomId, UserId};
use std::sync::Arc;

/// Owner of every room. [`crate::CallManager`] only talks to rooms through
/// this trait, so any backend honoring the same contract can stand in for
/// [`crate::Center`].
///
/// Contract: a room exists exactly while it has at least one member, and
/// that holds as soon as each call returns. Operations on rooms, users or
/// connections that do not exist are no-ops, not errors.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Registers `member` for `user`, creating the room on first use.
    async fn add(&self, room: &RoomId, user: &UserId, member: Member) -> Result<(), RegistryError>;

    /// Broadcasts `msg` to every member of `room` except `exclude`.
    async fn notify(
        &self,
        room: &RoomId,
        exclude: &[UserId],
        msg: Arc<Interaction>,
    ) -> Result<(), RegistryError>;

    /// Unregisters a connection and drops the room once nobody is left.
    async fn remove(
        &self,
        room: &RoomId,
        user: &UserId,
        connection: ConnectionId,
    ) -> Result<(), RegistryError>;

    /// Drops the room with every member in it, closing their outboxes.
    /// Returns how many connections were closed.
    async fn close(&self, room: &RoomId) -> Result<usize, RegistryError>;
}
