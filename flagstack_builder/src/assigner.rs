#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::{parse_number, FlagType, Value};
use crate::registry::FlagRegistry;
use crate::tokens::{Token, TokenKind};

/// Bind a value to every key token, in a single left-to-right pass.
///
/// Value tokens consumed by a key are dropped from the output; everything else keeps its order.
/// The registry carries the running value and occurrence count of each flag, so it should be fresh for each run.
///
/// Each key binds by the first matching rule:
/// 1. `boolean` flags bind `true`, and never consume the next token.
/// 2. `count` flags bind their running value plus one, and never consume the next token.
/// 3. When the next token is a value, it is consumed and coerced to the flag's type.
/// 4. When the flag declares a default, the coerced default binds.
/// 5. Otherwise `true` binds.
pub(crate) fn assign(tokens: Vec<Token>, registry: &mut FlagRegistry) -> Vec<Token> {
    let mut assigned = Vec::with_capacity(tokens.len());
    let mut stack = tokens.into_iter().peekable();

    while let Some(token) = stack.next() {
        match token.kind() {
            TokenKind::Terminator => {
                // Everything after the terminator is positional, verbatim.
                assigned.extend(stack.by_ref().map(Token::into_positional));
            }
            TokenKind::Key => {
                let name = match token.name() {
                    Some(name) => name.to_string(),
                    None => unreachable!("internal error - key tokens are always named"),
                };
                let flag = registry.lookup_mut(&name);
                let bound = match flag.flag_type() {
                    FlagType::Boolean => Value::Bool(true),
                    FlagType::Count => Value::Number(flag.value().to_number() + 1.0),
                    flag_type => match stack.next_if(Token::is_value) {
                        Some(next) => coerce(flag_type, next.into_raw()),
                        None if flag.has_declared_default() => flag.default().clone(),
                        None => Value::Bool(true),
                    },
                };

                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Bound '{}' to '{name}' ({}): {bound:?}",
                        token.raw(),
                        flag.flag_type()
                    );
                }

                flag.occur(bound.clone());
                let long = flag.long().to_string();
                assigned.push(token.bind(long, bound));
            }
            TokenKind::Value | TokenKind::Unclassified => assigned.push(token),
        }
    }

    assigned
}

/// Coerce a consumed token to the type of the flag consuming it.
fn coerce(flag_type: FlagType, raw: String) -> Value {
    match flag_type {
        FlagType::Number => Value::Number(parse_number(&raw)),
        FlagType::String | FlagType::Untyped | FlagType::Boolean | FlagType::Count => {
            Value::Text(raw)
        }
    }
}
