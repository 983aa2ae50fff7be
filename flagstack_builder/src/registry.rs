use std::borrow::Cow;
use std::collections::HashMap;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::FlagDefinition;
use crate::model::{FlagType, Value};

/// The runtime record for a flag: its definition, its current value, and how many times it has occurred.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedFlag {
    definition: FlagDefinition,
    default: Value,
    value: Value,
    occurrences: usize,
}

impl ResolvedFlag {
    fn declared(definition: FlagDefinition) -> Self {
        let default = coerce_default(&definition);

        Self {
            definition,
            value: default.clone(),
            default,
            occurrences: 0,
        }
    }

    /// The stand-in record for an undeclared flag.
    fn synthesized(name: &str) -> Self {
        Self::declared(FlagDefinition::new(name, None, FlagType::Untyped))
    }

    pub(crate) fn definition(&self) -> &FlagDefinition {
        &self.definition
    }

    pub(crate) fn long(&self) -> &str {
        self.definition.long()
    }

    pub(crate) fn flag_type(&self) -> FlagType {
        self.definition.flag_type()
    }

    /// The type-coerced default.
    pub(crate) fn default(&self) -> &Value {
        &self.default
    }

    /// Whether a default was declared at all.
    /// A declared default of `0` or `""` still counts.
    pub(crate) fn has_declared_default(&self) -> bool {
        self.definition.default_value().is_some()
    }

    pub(crate) fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// Record one occurrence of this flag, bound to `value`.
    pub(crate) fn occur(&mut self, value: Value) {
        self.value = value;
        self.occurrences += 1;
    }
}

/// Coerce the declared default of a flag to its type.
///
/// * `string`: the stringified default; an absent default stringifies to `"undefined"`.
/// * `boolean`: always `false`.
/// * `count`: the default as a number, or `0` when absent/non-numeric.
/// * `number`: the default as a number (possibly `NaN`), or undefined when absent.
/// * `untyped`: the default as is, or undefined when absent.
pub(crate) fn coerce_default(definition: &FlagDefinition) -> Value {
    let declared = definition.default_value();

    match definition.flag_type() {
        FlagType::String => Value::Text(
            declared
                .map(Value::to_string)
                .unwrap_or_else(|| Value::Undefined.to_string()),
        ),
        FlagType::Boolean => Value::Bool(false),
        FlagType::Count => {
            let n = declared.map(Value::to_number).unwrap_or(0.0);
            Value::Number(if n.is_nan() { 0.0 } else { n })
        }
        FlagType::Number => declared
            .map(|value| Value::Number(value.to_number()))
            .unwrap_or_default(),
        FlagType::Untyped => declared.cloned().unwrap_or_default(),
    }
}

/// The declared flags, indexed by long name, with the short name aliases.
///
/// Each flag is owned once (by its long name); short names only resolve to long names.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlagRegistry {
    flags: HashMap<String, ResolvedFlag>,
    aliases: HashMap<char, String>,
    // Long names, in declaration order.
    declared: Vec<String>,
}

impl FlagRegistry {
    /// Register the definitions.
    ///
    /// Registration is permissive: a repeated long or short name simply replaces the earlier one.
    pub(crate) fn new(definitions: impl IntoIterator<Item = FlagDefinition>) -> Self {
        let mut registry = Self::default();

        for definition in definitions.into_iter() {
            registry.register(definition);
        }

        registry
    }

    fn register(&mut self, definition: FlagDefinition) {
        let long = definition.long().to_string();
        let short = definition.short();
        let flag = ResolvedFlag::declared(definition);

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Registering '{long}' (short={short:?}, type={}) with default '{}'.",
                flag.flag_type(),
                flag.default()
            );
        }

        match self.flags.insert(long.clone(), flag) {
            Some(previous) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("The flag '{long}' is declared again; the later declaration applies.");
                }

                if let Some(previous_short) = previous.definition().short() {
                    if self.aliases.get(&previous_short) == Some(&long) {
                        self.aliases.remove(&previous_short);
                    }
                }
            }
            None => self.declared.push(long.clone()),
        }

        if let Some(short) = short {
            if let Some(_previous) = self.aliases.insert(short, long) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("The short flag '{short}' was re-assigned from '{_previous}'.");
                }
            }
        }
    }

    /// The long name for a short name, if one is declared.
    pub(crate) fn resolve_short(&self, short: char) -> Option<&str> {
        self.aliases.get(&short).map(String::as_str)
    }

    /// Whether `long` is a declared long name.
    pub(crate) fn is_declared(&self, long: &str) -> bool {
        self.declared.iter().any(|name| name == long)
    }

    fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.flags.contains_key(name) {
            return Some(name);
        }

        let mut characters = name.chars();

        match (characters.next(), characters.next()) {
            (Some(short), None) => self.resolve_short(short),
            _ => None,
        }
    }

    /// Look up a flag by either its long or short name.
    /// Undeclared flags never fail: they look up as a fresh untyped flag without a default.
    pub(crate) fn lookup(&self, name: &str) -> Cow<'_, ResolvedFlag> {
        match self.resolve(name).and_then(|long| self.flags.get(long)) {
            Some(flag) => Cow::Borrowed(flag),
            None => Cow::Owned(ResolvedFlag::synthesized(name)),
        }
    }

    /// Look up a flag by either its long or short name, for update.
    /// Undeclared flags are created on the fly (as untyped flags without a default).
    pub(crate) fn lookup_mut(&mut self, name: &str) -> &mut ResolvedFlag {
        let long = match self.resolve(name) {
            Some(long) => long.to_string(),
            None => name.to_string(),
        };

        self.flags.entry(long).or_insert_with_key(|long| {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Synthesizing the undeclared flag '{long}'.");
            }

            ResolvedFlag::synthesized(long)
        })
    }

    /// The declared flags, in declaration order.
    pub(crate) fn declared(&self) -> impl Iterator<Item = &ResolvedFlag> {
        self.declared
            .iter()
            .filter_map(|long| self.flags.get(long))
    }

    /// Every flag, including those synthesized by [`FlagRegistry::lookup_mut`].
    pub(crate) fn flags(&self) -> impl Iterator<Item = &ResolvedFlag> {
        self.flags.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FlagType::String, None, Value::from("undefined"))]
    #[case(FlagType::String, Some(Value::Number(2.0)), Value::from("2"))]
    #[case(FlagType::String, Some(Value::from("")), Value::from(""))]
    #[case(FlagType::String, Some(Value::Bool(true)), Value::from("true"))]
    #[case(FlagType::Boolean, None, Value::Bool(false))]
    #[case(FlagType::Boolean, Some(Value::from("a.json")), Value::Bool(false))]
    #[case(FlagType::Boolean, Some(Value::Bool(true)), Value::Bool(false))]
    #[case(FlagType::Count, None, Value::Number(0.0))]
    #[case(FlagType::Count, Some(Value::Number(7.0)), Value::Number(7.0))]
    #[case(FlagType::Count, Some(Value::Number(-1.0)), Value::Number(-1.0))]
    #[case(FlagType::Count, Some(Value::from("3")), Value::Number(3.0))]
    #[case(FlagType::Count, Some(Value::from("many")), Value::Number(0.0))]
    #[case(FlagType::Number, None, Value::Undefined)]
    #[case(FlagType::Number, Some(Value::Number(8080.0)), Value::Number(8080.0))]
    #[case(FlagType::Number, Some(Value::from("8080")), Value::Number(8080.0))]
    #[case(FlagType::Untyped, None, Value::Undefined)]
    #[case(FlagType::Untyped, Some(Value::from("dance")), Value::from("dance"))]
    #[case(FlagType::Untyped, Some(Value::Number(0.0)), Value::Number(0.0))]
    fn default_coercion(
        #[case] flag_type: FlagType,
        #[case] default: Option<Value>,
        #[case] expected: Value,
    ) {
        let mut definition = FlagDefinition::new("flag", None, flag_type);
        if let Some(default) = default {
            definition = definition.with_default(default);
        }

        assert_eq!(coerce_default(&definition), expected);
    }

    #[test]
    fn default_coercion_number_nan() {
        let definition =
            FlagDefinition::new("port", None, FlagType::Number).with_default("eighty");
        assert!(coerce_default(&definition).to_number().is_nan());
    }

    #[test]
    fn lookup_alias() {
        let registry = FlagRegistry::new([
            FlagDefinition::new("pack", Some('p'), FlagType::String).with_default("a.json")
        ]);

        let by_long = registry.lookup("pack");
        let by_short = registry.lookup("p");

        assert_matches!(by_long, Cow::Borrowed(_));
        assert_matches!(by_short, Cow::Borrowed(_));
        assert_eq!(by_long, by_short);
        assert_eq!(by_short.long(), "pack");
        assert_eq!(by_short.default(), &Value::from("a.json"));
        assert_eq!(registry.resolve_short('p'), Some("pack"));
        assert_eq!(registry.resolve_short('q'), None);
    }

    #[test]
    fn lookup_mut_alias() {
        let mut registry =
            FlagRegistry::new([FlagDefinition::new("verbose", Some('v'), FlagType::Count)]);

        registry.lookup_mut("v").occur(Value::Number(1.0));
        registry.lookup_mut("verbose").occur(Value::Number(2.0));

        let verbose = registry.lookup("v");
        assert_eq!(verbose.occurrences(), 2);
        assert_eq!(verbose.value(), &Value::Number(2.0));
        assert_eq!(registry.flags().count(), 1);
    }

    #[test]
    fn lookup_undeclared() {
        let registry = FlagRegistry::default();

        let mystery = registry.lookup("mystery");

        assert_matches!(mystery, Cow::Owned(_));
        assert_eq!(mystery.long(), "mystery");
        assert_eq!(mystery.flag_type(), FlagType::Untyped);
        assert_eq!(mystery.default(), &Value::Undefined);
        assert!(!mystery.has_declared_default());
        assert_eq!(mystery.occurrences(), 0);
        // Looking up never registers.
        assert_eq!(registry.flags().count(), 0);
    }

    #[test]
    fn lookup_mut_undeclared() {
        let mut registry = FlagRegistry::default();

        registry.lookup_mut("n").occur(Value::Bool(true));
        registry.lookup_mut("n").occur(Value::from("x"));

        let n = registry.lookup("n");
        assert_eq!(n.occurrences(), 2);
        assert_eq!(n.value(), &Value::from("x"));
        assert!(!registry.is_declared("n"));
        assert_eq!(registry.declared().count(), 0);
    }

    #[test]
    fn declared_order() {
        let registry = FlagRegistry::new([
            FlagDefinition::new("xray", Some('x'), FlagType::Untyped),
            FlagDefinition::new("alpha", Some('a'), FlagType::Boolean),
            FlagDefinition::new("foxtrot", Some('f'), FlagType::Untyped),
        ]);

        let order: Vec<&str> = registry.declared().map(ResolvedFlag::long).collect();
        assert_eq!(order, vec!["xray", "alpha", "foxtrot"]);
        assert!(registry.is_declared("alpha"));
        assert!(!registry.is_declared("a"));
    }

    #[test]
    fn duplicate_long() {
        let registry = FlagRegistry::new([
            FlagDefinition::new("pack", Some('p'), FlagType::String),
            FlagDefinition::new("other", None, FlagType::String),
            FlagDefinition::new("pack", Some('k'), FlagType::Boolean),
        ]);

        let order: Vec<&str> = registry.declared().map(ResolvedFlag::long).collect();
        assert_eq!(order, vec!["pack", "other"]);
        assert_eq!(registry.lookup("pack").flag_type(), FlagType::Boolean);
        assert_eq!(registry.resolve_short('k'), Some("pack"));
        assert_eq!(registry.resolve_short('p'), None);
    }

    #[test]
    fn duplicate_short() {
        let registry = FlagRegistry::new([
            FlagDefinition::new("pack", Some('p'), FlagType::String),
            FlagDefinition::new("port", Some('p'), FlagType::Number),
        ]);

        assert_eq!(registry.resolve_short('p'), Some("port"));
        assert_eq!(registry.lookup("pack").long(), "pack");
        assert_eq!(registry.declared().count(), 2);
    }
}
