use indexmap::IndexMap;

use crate::model::{OptionKind, OptionName};

/// Per-option state, shared by every spelling (command line or environment) of the option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionEntry {
    pub(crate) kind: OptionKind,
    pub(crate) required: bool,
    pub(crate) default: Option<String>,
}

/// A compiled option specification.
///
/// Built once via [`Specification::compile`], then used (read-only) for any number of [`Specification::interpret`] calls.
///
/// ### Example
/// ```
/// # use optspec_core as optspec;
/// use optspec::Specification;
///
/// let spec = Specification::compile(
///     r#"
///     usage: example-tool
///     --
///     verbose     -v,--verbose     Show more info
///     --
///     --
///     --
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(spec.usage(), "usage: example-tool\n\n  -v,--verbose     Show more info");
/// assert!(spec.is_flag("verbose"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    pub(crate) usage: String,
    pub(crate) allow_unknown_args: bool,
    pub(crate) options: IndexMap<String, OptionName>,
    pub(crate) environment: IndexMap<String, OptionName>,
    pub(crate) commands: IndexMap<String, String>,
    pub(crate) entries: IndexMap<OptionName, OptionEntry>,
}

impl Specification {
    /// The cleaned usage (help) text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether unrecognized positional tokens are collected, rather than rejected.
    pub fn allows_unknown_args(&self) -> bool {
        self.allow_unknown_args
    }

    /// Resolve a command line spelling (ex: `--root`) to its option name.
    /// A trailing `=` on the spelling is ignored.
    pub fn option_alias(&self, alias: &str) -> Option<&OptionName> {
        self.options.get(strip_value_marker(alias))
    }

    /// Resolve an environment variable to its option name.
    pub fn environment_alias(&self, variable: &str) -> Option<&OptionName> {
        self.environment.get(strip_value_marker(variable))
    }

    /// Resolve a command spelling (ex: `sh`) to its canonical command.
    pub fn command_alias(&self, alias: &str) -> Option<&str> {
        self.commands.get(alias).map(String::as_str)
    }

    /// All command line spellings, in declaration order.
    pub fn option_aliases(&self) -> impl Iterator<Item = (&str, &OptionName)> {
        self.options.iter().map(|(alias, name)| (alias.as_str(), name))
    }

    /// All environment variable spellings, in declaration order.
    pub fn environment_aliases(&self) -> impl Iterator<Item = (&str, &OptionName)> {
        self.environment
            .iter()
            .map(|(variable, name)| (variable.as_str(), name))
    }

    /// All command spellings, in declaration order.
    pub fn command_aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands
            .iter()
            .map(|(alias, command)| (alias.as_str(), command.as_str()))
    }

    /// All option names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &OptionName> {
        self.entries.keys()
    }

    /// The kind of the option, if declared.
    pub fn kind(&self, name: &str) -> Option<OptionKind> {
        self.entries.get(name).map(|entry| entry.kind)
    }

    /// Whether the option is declared as a flag.
    pub fn is_flag(&self, name: &str) -> bool {
        self.kind(name) == Some(OptionKind::Flag)
    }

    /// Whether the option must be resolved during interpretation.
    pub fn is_required(&self, name: &str) -> bool {
        self.entries.get(name).map_or(false, |entry| entry.required)
    }

    /// The default value of the option, if declared.
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|entry| entry.default.as_deref())
    }

    pub(crate) fn defaults(&self) -> IndexMap<OptionName, String> {
        self.entries
            .iter()
            .filter_map(|(name, entry)| {
                entry
                    .default
                    .as_ref()
                    .map(|default| (name.clone(), default.clone()))
            })
            .collect()
    }
}

fn strip_value_marker(alias: &str) -> &str {
    alias.strip_suffix('=').unwrap_or(alias)
}
