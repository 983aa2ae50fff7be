use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::FlagDefinition;

/// Errors loading flag definitions.
///
/// This is the only failure in `flagstack`; once the definitions are loaded, parsing never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The definitions file could not be read.
    #[error("Config error: cannot read '{path}': {source}")]
    Read {
        /// The file that was attempted.
        path: PathBuf,
        /// The underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// The definitions are not valid JSON for the definition schema.
    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The definitions for a command line program: the flags, plus the documentation shown in its help message.
///
/// ### Example
/// ```
/// # use flagstack_builder as flagstack;
/// use flagstack::{Definitions, FlagDefinition, FlagType};
///
/// let from_json = Definitions::from_json(r#"{
///     "name": "packer",
///     "flags": [
///         {"long": "pack", "short": "p", "default": "a.json", "type": "string"},
///         {"long": "exit", "short": "x", "type": "boolean"}
///     ]
/// }"#).unwrap();
///
/// let from_builder = Definitions::new()
///     .name("packer")
///     .flag(FlagDefinition::new("pack", Some('p'), FlagType::String).with_default("a.json"))
///     .flag(FlagDefinition::new("exit", Some('x'), FlagType::Boolean));
///
/// assert_eq!(from_json, from_builder);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Definitions {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default, alias = "short")]
    pub(crate) summary: Option<String>,
    #[serde(default)]
    pub(crate) synopsis: Option<String>,
    #[serde(default, alias = "desc")]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) flags: Vec<FlagDefinition>,
}

impl Definitions {
    /// Create empty definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the definitions from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let definitions: Definitions = serde_json::from_str(json)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Loaded {} flag definitions.", definitions.flags.len());
        }

        Ok(definitions)
    }

    /// Load the definitions from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Document the program name for the help message.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name.replace(name.into());
        self
    }

    /// Document the one line summary for the help message.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary.replace(summary.into());
        self
    }

    /// Document the usage synopsis for the help message.
    pub fn synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis.replace(synopsis.into());
        self
    }

    /// Document the description paragraph(s) for the help message.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Add a flag.
    /// The order of flags only affects the help message.
    pub fn flag(mut self, definition: FlagDefinition) -> Self {
        self.flags.push(definition);
        self
    }

    /// The flags declared so far.
    pub fn flags(&self) -> &[FlagDefinition] {
        &self.flags
    }
}

impl FromIterator<FlagDefinition> for Definitions {
    fn from_iter<I: IntoIterator<Item = FlagDefinition>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}
