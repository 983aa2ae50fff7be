//! Traits which, typically, may be imported without concern: `use flagstack::prelude::*`.

// Needs to be imported in order to export into a custom `EnvironmentSink`.
pub use crate::api::EnvironmentSink;
