//! In-process signaling hub for call rooms.
//!
//! [`Center`] tracks which users are connected to which room and fans
//! [`Interaction`]s out to their outboxes. [`CallManager`] sits on top of any
//! [`Registry`], adds access checks, announces joins and departures, and
//! removes a peer once its [`CancellationToken`] fires.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod call;
mod config;
mod connection;
mod room;

pub use call::*;
pub use config::*;
pub use connection::*;
pub use room::*;

pub use huddle_core::{ConnectionId, Interaction, InteractionKind, RoomId, UserId};
