use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Index;

use crate::model::Value;
use crate::registry::FlagRegistry;
use crate::tokens::{Token, TokenKind};

static UNDEFINED: Value = Value::Undefined;

/// The outcome of parsing: the flag values, the positional arguments, and the occurrence counts.
///
/// Flags are keyed by their long name.
/// Every declared flag is present, at its coerced default if it didn't occur; undeclared flags are present only if they occurred.
///
/// ### Example
/// ```
/// # use flagstack_builder as flagstack;
/// use flagstack::{FlagDefinition, FlagParser, FlagType, Value};
///
/// let parser = FlagParser::from_flags([
///     FlagDefinition::new("pack", Some('p'), FlagType::String).with_default("a.json"),
/// ]);
///
/// let result = parser.parse(["-p", "b.json", "game", "-n"]);
///
/// assert_eq!(result["pack"], Value::from("b.json"));
/// assert_eq!(result["n"], Value::Bool(true));
/// assert_eq!(result["undeclared"], Value::Undefined);
/// assert_eq!(result.args(), &["game"]);
/// assert_eq!(result.count("pack"), 1);
/// assert_eq!(result.count("undeclared"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    flags: BTreeMap<String, Value>,
    args: Vec<String>,
    count: BTreeMap<String, usize>,
}

impl ParseResult {
    /// The flag values, by long name.
    pub fn flags(&self) -> &BTreeMap<String, Value> {
        &self.flags
    }

    /// The value of the flag `name` (a long name), if it is declared or occurred.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    /// The positional arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The occurrence counts, by long name.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.count
    }

    /// How many times the flag `name` (a long name) occurred; `0` if it never did.
    pub fn count(&self, name: &str) -> usize {
        self.count.get(name).copied().unwrap_or(0)
    }

    /// Split into the flag values, positional arguments, and occurrence counts.
    pub fn into_parts(self) -> (BTreeMap<String, Value>, Vec<String>, BTreeMap<String, usize>) {
        (self.flags, self.args, self.count)
    }
}

/// Reads the value of a flag by its long name; [`Value::Undefined`] when it is neither declared nor occurred.
impl Index<&str> for ParseResult {
    type Output = Value;

    fn index(&self, name: &str) -> &Self::Output {
        self.flags.get(name).unwrap_or(&UNDEFINED)
    }
}

/// Fold the assigned tokens into a [`ParseResult`].
///
/// The registry must be the one the tokens were assigned against, since it holds the occurrence counts.
pub(crate) fn build(assigned: Vec<Token>, registry: &FlagRegistry) -> ParseResult {
    let mut result = ParseResult::default();

    for flag in registry.declared() {
        result
            .flags
            .insert(flag.long().to_string(), flag.default().clone());
    }

    for flag in registry.flags() {
        result
            .count
            .insert(flag.long().to_string(), flag.occurrences());
    }

    for token in assigned {
        match token.kind() {
            TokenKind::Key => {
                if let (Some(name), Some(value)) = (token.name(), token.bound()) {
                    result.flags.insert(name.to_string(), value.clone());
                }
            }
            TokenKind::Value | TokenKind::Unclassified => result.args.push(token.into_raw()),
            TokenKind::Terminator => {
                unreachable!("internal error - terminators are consumed during assignment")
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FlagDefinition;
    use crate::assigner::assign;
    use crate::model::FlagType;
    use crate::tokens::tokenize;

    fn registry() -> FlagRegistry {
        FlagRegistry::new([
            FlagDefinition::new("pack", Some('p'), FlagType::Untyped).with_default("a.json"),
            FlagDefinition::new("exit", Some('x'), FlagType::Boolean),
            FlagDefinition::new("verbose", Some('v'), FlagType::Count),
        ])
    }

    fn run(input: &[&str]) -> ParseResult {
        let mut registry = registry();
        let assigned = assign(tokenize(input, &registry), &mut registry);
        build(assigned, &registry)
    }

    #[test]
    fn build_empty() {
        let result = run(&[]);

        assert_eq!(
            result.flags(),
            &BTreeMap::from([
                ("pack".to_string(), Value::from("a.json")),
                ("exit".to_string(), Value::Bool(false)),
                ("verbose".to_string(), Value::Number(0.0)),
            ])
        );
        assert!(result.args().is_empty());
        assert_eq!(
            result.counts(),
            &BTreeMap::from([
                ("pack".to_string(), 0),
                ("exit".to_string(), 0),
                ("verbose".to_string(), 0),
            ])
        );
    }

    #[test]
    fn build_last_write_wins() {
        let result = run(&["-p", "b.json", "--pack", "c.json", "-p"]);

        assert_eq!(result["pack"], Value::from("a.json"));
        assert_eq!(result.count("pack"), 3);
    }

    #[test]
    fn build_counts() {
        let result = run(&["-p", "-pp", "--pack", "-p", "-vv", "--flag", "--flag"]);

        assert_eq!(result.count("pack"), 5);
        assert_eq!(result.count("verbose"), 2);
        assert_eq!(result["verbose"], Value::Number(2.0));
        assert_eq!(result.count("flag"), 2);
        assert_eq!(result.count("f"), 0);
        assert_eq!(result.count("notaflag"), 0);
    }

    #[test]
    fn build_args() {
        let result = run(&["node", ".", "-x", "ima-arg", "--", "-p", "--"]);

        assert_eq!(result.args(), &["node", ".", "ima-arg", "-p", "--"]);
        assert_eq!(result["exit"], Value::Bool(true));
        assert_eq!(result["pack"], Value::from("a.json"));
        assert_eq!(result.count("pack"), 0);
    }

    #[test]
    fn build_undeclared() {
        let result = run(&["--mystery", "val", "-n"]);

        assert_eq!(result.get("mystery"), Some(&Value::from("val")));
        assert_eq!(result.get("n"), Some(&Value::Bool(true)));
        assert_eq!(result.get("other"), None);
        assert_eq!(result["other"], Value::Undefined);
    }

    #[test]
    fn into_parts() {
        let (flags, args, count) = run(&["-v", "x"]).into_parts();

        assert_eq!(flags.get("verbose"), Some(&Value::Number(1.0)));
        assert_eq!(args, vec!["x".to_string()]);
        assert_eq!(count.get("verbose"), Some(&1));
    }

    #[test]
    fn serialize() {
        let result = run(&["-x", "-vv", "y"]);

        // Counts read as integers, not floats.
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"flags":{"exit":true,"pack":"a.json","verbose":2},"args":["y"],"count":{"exit":1,"pack":0,"verbose":2}}"#
        );
    }
}
