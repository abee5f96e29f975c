mod center;
mod error;
mod registry;
mod room;

pub use center::*;
pub use error::*;
pub use registry::*;
pub use room::*;
