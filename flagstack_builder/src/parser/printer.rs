use std::path::Path;
use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{Definitions, FlagDefinition};
use crate::model::FlagType;
use crate::parser::interface::{chunk, UserInterface};

pub(crate) struct FlagDocumentation {
    long: String,
    short: Option<char>,
    takes_value: bool,
    help: Option<String>,
}

impl From<&FlagDefinition> for FlagDocumentation {
    fn from(definition: &FlagDefinition) -> Self {
        Self {
            long: definition.long().to_string(),
            short: definition.short(),
            takes_value: !matches!(
                definition.flag_type(),
                FlagType::Boolean | FlagType::Count
            ),
            help: definition.help_text().map(str::to_string),
        }
    }
}

impl FlagDocumentation {
    fn meta(&self) -> String {
        self.long.to_uppercase().replace('-', "_")
    }

    fn usage(&self) -> String {
        let specifier = match self.short {
            Some(short) => format!("-{short}"),
            None => format!("--{}", self.long),
        };

        if self.takes_value {
            format!("[{specifier} {}]", self.meta())
        } else {
            format!("[{specifier}]")
        }
    }

    fn heading(&self) -> String {
        match self.short {
            Some(short) => format!("-{short}, --{}", self.long),
            None => format!("--{}", self.long),
        }
    }
}

pub(crate) struct Printer {
    program: String,
    summary: Option<String>,
    synopsis: Option<String>,
    description: Option<String>,
    flags: Vec<FlagDocumentation>,
    terminal_width: Option<usize>,
}

const DEFAULT_TOTAL_WIDTH: usize = 80;
// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_TEXT_WIDTH: usize = 17;
const INDENT: usize = 4;

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("program", &Definitions::default(), None)
    }

    /// A printer fit to the current terminal, documenting the current program when the definitions don't name one.
    pub(crate) fn terminal(definitions: &Definitions) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };
        let program = match &definitions.name {
            Some(name) => name.clone(),
            None => current_program(),
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Help for '{program}' targets the terminal width {terminal_width:?}.");
        }

        Self::new(program, definitions, terminal_width)
    }

    pub(crate) fn new(
        program: impl Into<String>,
        definitions: &Definitions,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            program: definitions.name.clone().unwrap_or_else(|| program.into()),
            summary: definitions.summary.clone(),
            synopsis: definitions.synopsis.clone(),
            description: definitions.description.clone(),
            flags: definitions
                .flags
                .iter()
                .map(FlagDocumentation::from)
                .collect(),
            terminal_width,
        }
    }

    pub(crate) fn print_help(&self, user_interface: &dyn UserInterface) {
        user_interface.print(self.render());
    }

    pub(crate) fn render(&self) -> String {
        let total_width = self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH);
        let mut lines = Vec::default();

        lines.push("NAME".to_string());
        let name = match &self.summary {
            Some(summary) => format!("{} - {summary}", self.program),
            None => self.program.clone(),
        };
        self.paragraph(&mut lines, 1, &name, total_width);
        lines.push(String::default());

        lines.push("SYNOPSIS".to_string());
        let synopsis = match &self.synopsis {
            Some(synopsis) => synopsis.clone(),
            None => self.usage(),
        };
        self.paragraph(&mut lines, 1, &synopsis, total_width);
        lines.push(String::default());

        lines.push("DESCRIPTION".to_string());
        if let Some(description) = &self.description {
            self.paragraph(&mut lines, 1, description, total_width);
        }

        for flag in &self.flags {
            lines.push(String::default());
            lines.push(format!("{:width$}{}", "", flag.heading(), width = INDENT));

            if let Some(help) = &flag.help {
                self.paragraph(&mut lines, 2, help, total_width);
            }
        }

        lines.join("\n")
    }

    fn usage(&self) -> String {
        let mut usage = self.program.clone();

        for flag in &self.flags {
            usage.push(' ');
            usage.push_str(&flag.usage());
        }

        usage
    }

    // Wrap `text` under the given indentation level; explicit line breaks are kept.
    fn paragraph(&self, lines: &mut Vec<String>, level: usize, text: &str, total_width: usize) {
        let indent = level * INDENT;
        let width = std::cmp::max(total_width.saturating_sub(indent), MINIMUM_TEXT_WIDTH);

        for part in text.split('\n') {
            let chunks = chunk(part, width);

            if chunks.is_empty() {
                lines.push(String::default());
            }

            for line in chunks {
                lines.push(format!("{:indent$}{line}", ""));
            }
        }
    }
}

fn current_program() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|path| Path::new(path).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "program".to_string())
}
