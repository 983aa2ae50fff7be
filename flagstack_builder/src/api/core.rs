#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{ConfigError, Definitions, EnvironmentSink, FlagDefinition, ProcessEnvironment};
use crate::assigner::assign;
use crate::model::Value;
use crate::parser::{build, ConsoleInterface, ParseResult, Printer, UserInterface};
use crate::registry::FlagRegistry;
use crate::tokens::tokenize;

/// The flag parser.
///
/// Parsing is permissive and never fails: undeclared flags are accepted, and anything which isn't a flag is a positional argument.
///
/// ### Example
/// ```
/// # use flagstack_builder as flagstack;
/// use flagstack::{FlagDefinition, FlagParser, FlagType, Value};
///
/// let parser = FlagParser::from_flags([
///     FlagDefinition::new("exit", Some('x'), FlagType::Boolean),
///     FlagDefinition::new("verbose", Some('v'), FlagType::Count),
/// ]);
///
/// let result = parser.parse(["-vvx", "game"]);
///
/// assert_eq!(result["exit"], Value::Bool(true));
/// assert_eq!(result["verbose"], Value::Number(2.0));
/// assert_eq!(result.args(), &["game"]);
/// ```
pub struct FlagParser {
    registry: FlagRegistry,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl Default for FlagParser {
    fn default() -> Self {
        Self::new(Definitions::default())
    }
}

impl FlagParser {
    /// Create a flag parser from the full definitions (flags plus help documentation).
    pub fn new(definitions: Definitions) -> Self {
        Self::with_interface(definitions, Box::new(ConsoleInterface::default()))
    }

    fn with_interface(definitions: Definitions, user_interface: Box<dyn UserInterface>) -> Self {
        let printer = Printer::terminal(&definitions);
        let registry = FlagRegistry::new(definitions.flags);

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Built parser with {} declared flags.",
                registry.declared().count()
            );
        }

        Self {
            registry,
            printer,
            user_interface,
        }
    }

    /// Create a flag parser from just the flag definitions.
    pub fn from_flags(definitions: impl IntoIterator<Item = FlagDefinition>) -> Self {
        Self::new(definitions.into_iter().collect())
    }

    /// Create a flag parser from definitions in JSON.
    /// See [`Definitions`] for the format.
    ///
    /// ### Example
    /// ```
    /// # use flagstack_builder as flagstack;
    /// use flagstack::{FlagParser, Value};
    ///
    /// let parser = FlagParser::from_json(r#"{
    ///     "flags": [{"long": "port", "type": "number", "default": 8080}]
    /// }"#).unwrap();
    ///
    /// assert_eq!(parser.parse(["--port", "7000"])["port"], Value::Number(7000.0));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(Definitions::from_json(json)?))
    }

    /// Parse the raw Cli input.
    ///
    /// Each call is independent: values and occurrence counts never leak from one parse into the next.
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
    /// let result = parser.parse(["-p", "b.json", "--", "-p"]);
    /// assert_eq!(result["pack"], Value::from("b.json"));
    /// assert_eq!(result.args(), &["-p"]);
    ///
    /// let result = parser.parse(Vec::<&str>::new());
    /// assert_eq!(result["pack"], Value::from("a.json"));
    /// assert_eq!(result.count("pack"), 0);
    /// ```
    pub fn parse<I, S>(&self, raw: I) -> ParseResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = self.registry.clone();
        let tokens = tokenize(raw, &registry);
        let assigned = assign(tokens, &mut registry);
        let result = build(assigned, &registry);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsed: {result:?}");
        }

        result
    }

    /// Parse the raw Cli input, and export the resulting value of each flag that names an environment variable.
    ///
    /// Flags whose value is undefined are not exported.
    /// See [`FlagDefinition::env`].
    pub fn parse_into<I, S>(&self, raw: I, environment: &mut dyn EnvironmentSink) -> ParseResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let result = self.parse(raw);

        for flag in self.registry.declared() {
            if let Some(variable) = flag.definition().env_variable() {
                match result.get(flag.long()) {
                    Some(value) if !value.is_undefined() => {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Exporting '{}' as {variable}={value}.", flag.long());
                        }

                        environment.export(variable, &value.to_string());
                    }
                    _ => {}
                }
            }
        }

        result
    }

    /// Parse the arguments of the current process (skipping the program name), exporting into the process environment.
    pub fn parse_env(&self) -> ParseResult {
        let mut environment = ProcessEnvironment::default();
        self.parse_into(std::env::args().skip(1), &mut environment)
    }

    /// The type-coerced default of the flag `name` (long or short); undefined for undeclared flags.
    ///
    /// ### Example
    /// ```
    /// # use flagstack_builder as flagstack;
    /// use flagstack::{FlagDefinition, FlagParser, FlagType, Value};
    ///
    /// let parser = FlagParser::from_flags([
    ///     FlagDefinition::new("port", Some('p'), FlagType::Number).with_default("8080"),
    ///     FlagDefinition::new("exit", Some('x'), FlagType::Boolean),
    /// ]);
    ///
    /// assert_eq!(parser.default_value("port"), Value::Number(8080.0));
    /// assert_eq!(parser.default_value("p"), Value::Number(8080.0));
    /// assert_eq!(parser.default_value("exit"), Value::Bool(false));
    /// assert_eq!(parser.default_value("mystery"), Value::Undefined);
    /// ```
    pub fn default_value(&self, name: &str) -> Value {
        self.registry.lookup(name).default().clone()
    }

    /// The help message.
    pub fn help(&self) -> String {
        self.printer.render()
    }

    /// Print the help message to stdout.
    pub fn print_help(&self) {
        self.printer.print_help(self.user_interface.as_ref());
    }
}
