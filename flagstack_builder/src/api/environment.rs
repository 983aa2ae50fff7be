#[cfg(any(test, feature = "unit_test"))]
use std::collections::HashMap;

/// Behaviour to receive the flag values exported after parsing.
///
/// See [`FlagDefinition::env`](./struct.FlagDefinition.html#method.env).
pub trait EnvironmentSink {
    /// Export `value` under the variable `key`.
    fn export(&mut self, key: &str, value: &str);
}

/// Exports into the environment of the current process.
#[derive(Debug, Default)]
pub struct ProcessEnvironment {}

impl EnvironmentSink for ProcessEnvironment {
    fn export(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// *Available using 'unit_test' crate feature only.*</br></br>
/// Captures exports in memory, leaving the process environment untouched.
///
/// ### Example
/// ```
/// # use flagstack_builder as flagstack;
/// use flagstack::{FlagDefinition, FlagParser, FlagType, MemoryEnvironment};
///
/// let parser = FlagParser::from_flags([
///     FlagDefinition::new("port", Some('p'), FlagType::Number)
///         .with_default(8080)
///         .env("PORT"),
/// ]);
/// let mut environment = MemoryEnvironment::default();
///
/// parser.parse_into(["--port", "7000"], &mut environment);
///
/// assert_eq!(environment.get("PORT"), Some("7000"));
/// ```
#[cfg(any(test, feature = "unit_test"))]
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    variables: HashMap<String, String>,
}

#[cfg(any(test, feature = "unit_test"))]
impl MemoryEnvironment {
    /// The exported value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// The number of exported variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether nothing has been exported.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(any(test, feature = "unit_test"))]
impl EnvironmentSink for MemoryEnvironment {
    fn export(&mut self, key: &str, value: &str) {
        self.variables.insert(key.to_string(), value.to_string());
    }
}
