mod access;
mod call_manager;
mod error;

pub use access::*;
pub use call_manager::*;
pub use error::*;
