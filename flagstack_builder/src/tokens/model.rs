use crate::model::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TokenKind {
    /// Not yet classified; only seen before naming.
    Unclassified,
    /// A flag, such as `--pack` or `-p`.
    Key,
    /// A positional candidate.
    Value,
    /// The end-of-flags marker `--`.
    Terminator,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    raw: String,
    kind: TokenKind,
    name: Option<String>,
    bound: Option<Value>,
}

impl Token {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: TokenKind::Unclassified,
            name: None,
            bound: None,
        }
    }

    pub(crate) fn key(raw: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: TokenKind::Key,
            name: Some(name.into()),
            bound: None,
        }
    }

    pub(crate) fn value(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: TokenKind::Value,
            name: None,
            bound: None,
        }
    }

    pub(crate) fn terminator() -> Self {
        Self {
            raw: crate::constant::TERMINATOR.to_string(),
            kind: TokenKind::Terminator,
            name: None,
            bound: None,
        }
    }

    pub(crate) fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.kind
    }

    pub(crate) fn is_value(&self) -> bool {
        self.kind == TokenKind::Value
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn bound(&self) -> Option<&Value> {
        self.bound.as_ref()
    }

    pub(crate) fn into_raw(self) -> String {
        self.raw
    }

    /// Bind a key token, under its canonical (long) name.
    pub(crate) fn bind(self, name: impl Into<String>, value: Value) -> Self {
        Self {
            name: Some(name.into()),
            bound: Some(value),
            ..self
        }
    }

    /// Demote any token to a verbatim positional value.
    pub(crate) fn into_positional(self) -> Self {
        Token::value(self.raw)
    }
}
