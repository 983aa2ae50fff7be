//! `flagstack` is a permissive, declaration driven command line flag parser for Rust.
//!
//! Given a set of flag definitions and the raw Cli input, `flagstack` produces the value of each flag, the leftover positional arguments, and how many times each flag occurred.
//! It never rejects the input: undeclared flags are accepted, and anything which isn't a flag is a positional argument.
//! Specifically, `flagstack` attempts to prioritize the following design concerns:
//! * *Permissive parsing*:
//! Parsing never fails; the only error is malformed definitions.
//! * *Predictable values*:
//! The value a flag receives depends only on its declared type, and on whether it is followed by a value.
//! * *Independent runs*:
//! A parser may be reused; each parse starts over from the declared defaults.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/packer.rs")]
//! ```
//!
//! Generates the Cli program:
//! ```console
//! $ packer -xv --pack b.json games/chess
//! {
//!   "flags": {
//!     "exit": true,
//!     "pack": "b.json",
//!     "verbose": 1
//!   },
//!   "args": [
//!     "games/chess"
//!   ],
//!   "count": {
//!     "exit": 1,
//!     "pack": 1,
//!     "verbose": 1
//!   }
//! }
//! ```
//!
//! # Syntax
//! Each raw token is one of:
//! * `--`: the terminator; every token after it is a positional argument, verbatim.
//! * `-a`: a short flag, resolved to its long name when one is declared.
//! * `-abc`: bundled short flags, equivalent to `-a -b -c` (unless `abc` is itself a declared long name).
//! * `--name`: a long flag; the name consists of letters, digits, and `-_.`.
//! * anything else: a value.
//!
//! # Values
//! Each flag binds by the first matching rule:
//! ```console
//! Type     | Rule                                  | Default when never specified
//! ------------------------------------------------------------------------------------
//! boolean  | true                                  | false
//! count    | the running count plus one            | the declared default, or 0
//! number   | the next value as a number (or NaN)   | the declared default as a number
//! string   | the next value                        | the declared default as a string
//! untyped  | the next value                        | the declared default
//! ```
//! When a `number`, `string`, or `untyped` flag is not followed by a value, it binds its declared default, or `true` when there is none.
//! Undeclared flags behave as `untyped` flags without a default.
//!
//! ```
//! use flagstack::{FlagDefinition, FlagParser, FlagType, Value};
//!
//! let parser = FlagParser::from_flags([
//!     FlagDefinition::new("pack", Some('p'), FlagType::String).with_default("a.json"),
//!     FlagDefinition::new("exit", Some('x'), FlagType::Boolean),
//! ]);
//!
//! let result = parser.parse(["-px", "b.json", "--mystery", "-n", "--", "--pack"]);
//!
//! assert_eq!(result["pack"], Value::from("a.json"));
//! assert_eq!(result["exit"], Value::Bool(true));
//! assert_eq!(result["mystery"], Value::Bool(true));
//! assert_eq!(result["n"], Value::Bool(true));
//! assert_eq!(result.args(), &["b.json", "--pack"]);
//! ```
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit debug logs via `tracing` while parsing.
pub use flagstack_builder::*;
