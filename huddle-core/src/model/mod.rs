mod connection;
mod interaction;
mod room;
mod user;

pub use connection::ConnectionId;
pub use interaction::{Interaction, InteractionKind, WireError};
pub use room::RoomId;
pub use user::UserId;
