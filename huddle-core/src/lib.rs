pub mod model;

pub use model::{ConnectionId, Interaction, InteractionKind, RoomId, UserId, WireError};
