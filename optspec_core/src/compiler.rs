use indexmap::map::Entry;
use indexmap::IndexMap;
use std::str::FromStr;
use thiserror::Error;

use crate::constant::*;
use crate::model::{OptionKind, OptionName};
use crate::spec::{OptionEntry, Specification};

mod row;

use row::{indentation, is_blank, skip_blank_columns, Row};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error compiling specification text.
/// Compilation is all or nothing: no `Specification` is produced after an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A row in the options section is missing its spellings.
    #[error("Invalid option spec: {0}")]
    InvalidOption(String),

    /// A row in the environment section is missing its spellings.
    #[error("Invalid env spec: {0}")]
    InvalidEnvironment(String),

    /// A row in the commands section is missing its spellings.
    #[error("Invalid command spec: {0}")]
    InvalidCommand(String),

    /// The same option name is declared as both a flag and a value-taking option.
    #[error("Invalid spec: '{name}' is declared as both a flag and a value option")]
    ConflictingKind {
        /// The option name.
        name: String,
    },
}

/// The sections of a specification text, in order.
/// Each `--` line advances to the next section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Section {
    Usage,
    Options,
    Environment,
    Commands,
    Appendix,
    // Anything after the appendix is ignored.
    Trailer,
}

impl Section {
    fn next(self) -> Self {
        match self {
            Section::Usage => Section::Options,
            Section::Options => Section::Environment,
            Section::Environment => Section::Commands,
            Section::Commands => Section::Appendix,
            Section::Appendix | Section::Trailer => Section::Trailer,
        }
    }

    fn is_table(self) -> bool {
        matches!(
            self,
            Section::Options | Section::Environment | Section::Commands
        )
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The section-aware state machine turning specification text into a [`Specification`].
///
/// Lines are fed one at a time; the usage text and the lookup tables accumulate as it goes.
#[derive(Debug)]
pub(crate) struct Compiler {
    section: Section,
    // Leading indentation of the first non-blank line; removed from every line.
    baseline: Option<usize>,
    // Alignment for '#' lines and description continuations in the table sections.
    // Taken from the first comment or table row encountered.
    indent: Option<usize>,
    lines: Vec<String>,
    allow_unknown_args: bool,
    options: IndexMap<String, OptionName>,
    environment: IndexMap<String, OptionName>,
    commands: IndexMap<String, String>,
    entries: IndexMap<OptionName, OptionEntry>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            section: Section::Usage,
            baseline: None,
            indent: None,
            lines: Vec::default(),
            allow_unknown_args: false,
            options: IndexMap::default(),
            environment: IndexMap::default(),
            commands: IndexMap::default(),
            entries: IndexMap::default(),
        }
    }
}

impl Compiler {
    pub(crate) fn feed(&mut self, raw: &str) -> Result<(), CompileError> {
        let line = self.dedent(raw).trim_end_matches(is_blank);

        if line.is_empty() {
            if !self.section.is_table() && self.section != Section::Trailer {
                self.lines.push(String::default());
            }

            return Ok(());
        }

        if line == SECTION_DELIMITER {
            self.advance();
            return Ok(());
        }

        if self.section.is_table() && line.starts_with(COMMENT_PREFIX) {
            self.comment(line);
            return Ok(());
        }

        match self.section {
            Section::Usage | Section::Appendix => {
                self.lines.push(line.to_string());
                Ok(())
            }
            Section::Options => self.option_row(line),
            Section::Environment => self.environment_row(line),
            Section::Commands => self.command_row(line),
            Section::Trailer => Ok(()),
        }
    }

    pub(crate) fn finish(self) -> Specification {
        let Compiler {
            lines,
            allow_unknown_args,
            options,
            environment,
            commands,
            entries,
            ..
        } = self;
        let usage = lines
            .join("\n")
            .trim_matches(|c| c == ' ' || c == '\t' || c == '\n')
            .to_string();

        Specification {
            usage,
            allow_unknown_args,
            options,
            environment,
            commands,
            entries,
        }
    }

    fn dedent<'a>(&mut self, raw: &'a str) -> &'a str {
        match self.baseline {
            Some(baseline) => skip_blank_columns(raw, baseline),
            None => {
                if raw.trim_matches(is_blank).is_empty() {
                    raw
                } else {
                    let baseline = indentation(raw);
                    self.baseline.replace(baseline);
                    skip_blank_columns(raw, baseline)
                }
            }
        }
    }

    fn advance(&mut self) {
        // Collapse the section boundary into a single blank line.
        if matches!(self.lines.last(), Some(last) if !last.is_empty()) {
            self.lines.push(String::default());
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Section {} ends, advancing to {}.",
                self.section,
                self.section.next()
            );
        }

        self.section = self.section.next();
    }

    fn comment(&mut self, line: &str) {
        let text = &line[COMMENT_PREFIX.len()..];

        // The column of the comment text, counting the '#'.
        let indent = *self
            .indent
            .get_or_insert_with(|| 1 + indentation(text));

        if text.is_empty() {
            self.lines.push(String::default());
            return;
        }

        self.lines
            .push(skip_blank_columns(text, indent.saturating_sub(1)).to_string());
    }

    fn table_row<'a>(
        &mut self,
        line: &'a str,
        error: impl FnOnce(String) -> CompileError,
    ) -> Result<Option<Row<'a>>, CompileError> {
        if line.starts_with(is_blank) {
            self.continuation(line);
            return Ok(None);
        }

        let row = Row::split(line).ok_or_else(|| error(line.to_string()))?;
        self.indent.get_or_insert(row.rest_column);

        if row.description.is_some() {
            self.lines.push(format!("{USAGE_INDENT}{}", row.rest));
        }

        Ok(Some(row))
    }

    // An indented line inside a table continues the previous row's description.
    fn continuation(&mut self, line: &str) {
        let text = skip_blank_columns(line, self.indent.unwrap_or_else(|| indentation(line)));
        self.lines.push(format!("{USAGE_INDENT}{text}"));
    }

    fn option_row(&mut self, line: &str) -> Result<(), CompileError> {
        let row = match self.table_row(line, CompileError::InvalidOption)? {
            Some(row) => row,
            None => return Ok(()),
        };
        let (required, key) = row.required_key();
        let (name, kind, default) = match key.split_once(VALUE_MARKER) {
            Some((name, default)) => (
                name,
                OptionKind::Value,
                Some(default).filter(|d| !d.is_empty()),
            ),
            None => (key, OptionKind::Flag, None),
        };
        let name = self.declare(name, kind, required, default)?;

        for spelling in row.spellings() {
            if spelling.starts_with(OPTION_PREFIX) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Option '{spelling}' aliases '{name}'.");
                }

                self.options.insert(spelling.to_string(), name.clone());
            } else {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Environment variable '{spelling}' aliases '{name}'.");
                }

                self.environment.insert(spelling.to_string(), name.clone());
            }
        }

        Ok(())
    }

    fn environment_row(&mut self, line: &str) -> Result<(), CompileError> {
        let row = match self.table_row(line, CompileError::InvalidEnvironment)? {
            Some(row) => row,
            None => return Ok(()),
        };
        let (required, key) = row.required_key();
        let (name, kind) = match key.strip_suffix(VALUE_MARKER) {
            Some(name) => (name, OptionKind::Value),
            None => (key, OptionKind::Flag),
        };
        let name = self.declare(name, kind, required, None)?;

        for spelling in row.spellings() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Environment variable '{spelling}' aliases '{name}'.");
            }

            self.environment.insert(spelling.to_string(), name.clone());
        }

        Ok(())
    }

    fn command_row(&mut self, line: &str) -> Result<(), CompileError> {
        if line == ALLOW_UNKNOWN {
            self.allow_unknown_args = true;
            return Ok(());
        }

        let row = match self.table_row(line, CompileError::InvalidCommand)? {
            Some(row) => row,
            None => return Ok(()),
        };

        for spelling in row.raw_spellings() {
            if spelling == ALLOW_UNKNOWN {
                self.allow_unknown_args = true;
            } else {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Command '{spelling}' aliases '{}'.", row.key);
                }

                self.commands
                    .insert(spelling.to_string(), row.key.to_string());
            }
        }

        Ok(())
    }

    fn declare(
        &mut self,
        name: &str,
        kind: OptionKind,
        required: bool,
        default: Option<&str>,
    ) -> Result<OptionName, CompileError> {
        let option_name = OptionName::new(name);

        match self.entries.entry(option_name.clone()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();

                if entry.kind != kind {
                    return Err(CompileError::ConflictingKind {
                        name: name.to_string(),
                    });
                }

                entry.required |= required;

                if let Some(default) = default {
                    entry.default.replace(default.to_string());
                }
            }
            Entry::Vacant(vacant) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Declaring {kind} '{name}' (required={required}, default={default:?}).");
                }

                vacant.insert(OptionEntry {
                    kind,
                    required,
                    default: default.map(str::to_string),
                });
            }
        }

        Ok(option_name)
    }
}

impl Specification {
    /// Compile a specification text.
    ///
    /// The text has five sections, separated by lines of exactly `--`:
    /// ```text
    /// <usage lines>
    /// --
    /// [!]name[=[default]]  spelling[,spelling...]  [description]
    /// --
    /// [!]NAME[=]           SPELLING[,SPELLING...]  [description]
    /// --
    /// command              spelling[,spelling...]  [description]
    /// --
    /// <appendix lines>
    /// ```
    /// The same text, cleaned up, serves as the [`Specification::usage`].
    ///
    /// ### Example
    /// ```
    /// # use optspec_core as optspec;
    /// use optspec::{OptionKind, Specification};
    ///
    /// let spec = Specification::compile(
    ///     r#"
    ///     usage: example-tool
    ///     A short description of the command
    ///     --
    ///     flag        --flag,-f,FLAG           A description for this flag
    ///     option=     --option=,-o=,OPTION=    A description for this option
    ///     !required=  --required,-r=,REQUIRED= A required option
    ///     --
    ///     env_var=    ENV_VAR=                 An environment variable
    ///     --
    ///     help        help,h                   Show this help message
    ///     --
    ///     More freestyle text
    ///     "#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(spec.option_alias("-o").unwrap().as_str(), "option");
    /// assert_eq!(spec.environment_alias("FLAG").unwrap().as_str(), "flag");
    /// assert_eq!(spec.kind("env_var"), Some(OptionKind::Value));
    /// assert!(spec.is_required("required"));
    /// assert_eq!(spec.command_alias("h"), Some("help"));
    /// ```
    pub fn compile(text: &str) -> Result<Self, CompileError> {
        let mut compiler = Compiler::default();

        for line in text.split('\n') {
            compiler.feed(line.strip_suffix('\r').unwrap_or(line))?;
        }

        Ok(compiler.finish())
    }
}

impl FromStr for Specification {
    type Err = CompileError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Specification::compile(text)
    }
}
