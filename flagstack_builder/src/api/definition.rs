use serde::{Deserialize, Deserializer};

use crate::model::{FlagType, Value};

/// The declaration of a single flag.
///
/// A flag is referenced on the Cli by its long name (`--pack`) or, optionally, its short name (`-p`).
///
/// ### Example
/// ```
/// # use flagstack_builder as flagstack;
/// use flagstack::{FlagDefinition, FlagType, Value};
///
/// let pack = FlagDefinition::new("pack", Some('p'), FlagType::String)
///     .with_default("a.json")
///     .help("Retrieve scripts from directories and insert into a game file.");
///
/// assert_eq!(pack.long(), "pack");
/// assert_eq!(pack.short(), Some('p'));
/// assert_eq!(pack.default_value(), Some(&Value::from("a.json")));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawFlagDefinition")]
pub struct FlagDefinition {
    long: String,
    short: Option<char>,
    flag_type: FlagType,
    default: Option<Value>,
    help: Option<String>,
    env: Option<String>,
}

impl FlagDefinition {
    /// Declare a flag.
    pub fn new(long: impl Into<String>, short: Option<char>, flag_type: FlagType) -> Self {
        Self {
            long: long.into(),
            short,
            flag_type,
            default: None,
            help: None,
            env: None,
        }
    }

    /// Declare the default of this flag.
    /// If repeated, only the final default will apply.
    ///
    /// A declared default is distinct from an absent one, even when it is falsy (ex: `0` or `""`).
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default.replace(default.into());
        self
    }

    /// Document the help message for this flag.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Export the final value of this flag into the environment variable `variable` after parsing.
    /// See [`FlagParser::parse_into`](./struct.FlagParser.html#method.parse_into).
    pub fn env(mut self, variable: impl Into<String>) -> Self {
        self.env.replace(variable.into());
        self
    }

    /// The long name.
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The short name, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The declared type.
    pub fn flag_type(&self) -> FlagType {
        self.flag_type
    }

    /// The declared default, exactly as declared (not coerced).
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The help message, if any.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The environment variable to export into, if any.
    pub fn env_variable(&self) -> Option<&str> {
        self.env.as_deref()
    }
}

// The wire shape, which tolerates the aliases and shorthands seen in definition files.
#[derive(Deserialize)]
struct RawFlagDefinition {
    long: String,
    #[serde(default)]
    short: Option<char>,
    #[serde(default, rename = "type")]
    flag_type: Option<FlagType>,
    #[serde(default, deserialize_with = "deserialize_default")]
    default: Option<Value>,
    #[serde(default, alias = "desc", alias = "help")]
    description: Option<String>,
    #[serde(default)]
    env: Option<String>,
    // Legacy shorthand for `"type": "boolean"`.
    #[serde(default)]
    boolean: bool,
}

impl From<RawFlagDefinition> for FlagDefinition {
    fn from(raw: RawFlagDefinition) -> Self {
        let flag_type = match raw.flag_type {
            Some(flag_type) => flag_type,
            None if raw.boolean => FlagType::Boolean,
            None => FlagType::Untyped,
        };

        Self {
            long: raw.long,
            short: raw.short,
            flag_type,
            default: raw.default,
            help: raw.description,
            env: raw.env,
        }
    }
}

// An explicit `null` is the same as leaving the default out.
fn deserialize_default<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;

    if raw.is_null() {
        Ok(None)
    } else {
        Ok(Some(Value::from(raw)))
    }
}
