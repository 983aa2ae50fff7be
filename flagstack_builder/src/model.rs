use serde::{Deserialize, Serialize, Serializer};

/// The declared type of a flag.
///
/// The type drives both the coercion of the flag's default, and how the flag binds its value when it appears on the Cli.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    /// Never takes a value; `true` when present, `false` otherwise.
    Boolean,
    /// Takes the next token verbatim.
    String,
    /// Takes the next token parsed as a number (`NaN` when it does not parse).
    Number,
    /// Never takes a value; counts its occurrences on top of its default.
    Count,
    /// Takes the next token verbatim, if there is one.
    #[default]
    #[serde(alias = "default")]
    Untyped,
}

impl std::fmt::Display for FlagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlagType::Boolean => "boolean",
            FlagType::String => "string",
            FlagType::Number => "number",
            FlagType::Count => "count",
            FlagType::Untyped => "untyped",
        };
        write!(f, "{name}")
    }
}

/// A dynamically typed flag value.
///
/// The [`std::fmt::Display`] of a value is its *stringified* form, which is what `string` typed flags and environment exports use:
/// ```
/// # use flagstack_builder as flagstack;
/// use flagstack::Value;
///
/// assert_eq!(Value::Undefined.to_string(), "undefined");
/// assert_eq!(Value::Bool(true).to_string(), "true");
/// assert_eq!(Value::Number(2.0).to_string(), "2");
/// assert_eq!(Value::Number(2.5).to_string(), "2.5");
/// assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
/// assert_eq!(Value::from("a.json").to_string(), "a.json");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// No value at all.
    #[default]
    Undefined,
    /// A boolean.
    Bool(bool),
    /// A number; counts are numbers too.
    Number(f64),
    /// A text value.
    Text(String),
}

impl Value {
    /// Whether this is [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// The boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text, if this is a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Coerce into a number.
    /// Booleans become `1`/`0`, text is parsed (see [`parse_number`]), and undefined becomes `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::Text(t) => parse_number(t),
        }
    }
}

/// Parse a token as a number.
///
/// Surrounding whitespace is ignored and blank text is `0`.
/// Besides decimals (`7000`, `-1.5`, `.5`, `1e3`), this accepts `Infinity` (spelled exactly, optionally signed) and unsigned `0x`/`0o`/`0b` integers.
/// Anything else produces `NaN`, which is never an error; notably `inf` and `nan` are not numbers.
/// ```
/// # use flagstack_builder as flagstack;
/// use flagstack::parse_number;
///
/// assert_eq!(parse_number("7000"), 7000.0);
/// assert_eq!(parse_number(" -1.5 "), -1.5);
/// assert_eq!(parse_number(""), 0.0);
/// assert_eq!(parse_number("0x10"), 16.0);
/// assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
/// assert!(parse_number("eighty").is_nan());
/// assert!(parse_number("inf").is_nan());
/// ```
pub fn parse_number(token: &str) -> f64 {
    let token = token.trim();

    match token {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match token.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    match radix {
        Some(radix) => parse_integer(&token[2..], radix),
        // Only digits, signs, points and exponents; `str::parse` alone would admit `inf` and `nan`.
        None if token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) =>
        {
            token.parse::<f64>().unwrap_or(f64::NAN)
        }
        None => f64::NAN,
    }
}

fn parse_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    digits
        .chars()
        .try_fold(0.0, |total, c| {
            c.to_digit(radix)
                .map(|digit| total * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_nan() => write!(f, "NaN"),
            Value::Number(n) if n.is_infinite() => {
                if n.is_sign_positive() {
                    write!(f, "Infinity")
                } else {
                    write!(f, "-Infinity")
                }
            }
            // Covers negative zero too.
            Value::Number(n) if *n == 0.0 => write!(f, "0"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(t) => write!(f, "{t}"),
        }
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            // Integral numbers (counts in particular) serialize as integers.
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(t) => serializer.serialize_str(t),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Undefined,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Text(s),
            // Compound defaults are kept in their textual form.
            compound => Value::Text(compound.to_string()),
        }
    }
}
