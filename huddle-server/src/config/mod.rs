mod hub_config;

pub use hub_config::*;
