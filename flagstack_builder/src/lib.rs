//! Builder module for `flagstack`.
//! See [documentation root](https://docs.rs/flagstack/latest/flagstack/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod assigner;
mod constant;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;
mod registry;
mod tokens;

pub use api::*;
pub use model::*;
pub use parser::ParseResult;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
