mod base;
mod interface;
mod printer;

pub use base::ParseResult;
pub(crate) use base::*;
pub(crate) use interface::*;
pub(crate) use printer::*;
