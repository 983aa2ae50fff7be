mod config;
mod core;
mod definition;
mod environment;

pub use self::core::*;
pub use config::*;
pub use definition::*;
pub use environment::*;
