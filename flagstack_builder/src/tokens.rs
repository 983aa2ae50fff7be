mod model;
mod tokenizer;

pub(crate) use model::*;
pub(crate) use tokenizer::*;
