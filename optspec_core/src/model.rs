use std::borrow::Borrow;
use std::sync::Arc;

/// The canonical name of an option.
///
/// Every spelling (`-r`, `--root`, `HARAWAY_ROOT`, ...) resolves to one `OptionName`.
/// Cloning is cheap, and lookups may be done with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionName(Arc<str>);

impl OptionName {
    /// Create an option name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// View the option name as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for OptionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OptionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for OptionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an option is a presence flag or takes a value.
/// Fixed per option name when the specification is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// The option takes no value; its presence records `"true"`.
    Flag,
    /// The option requires a value, either as `--name=value` or as the following token.
    Value,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKind::Flag => write!(f, "flag"),
            OptionKind::Value => write!(f, "value"),
        }
    }
}

/// The result of a strict typed lookup.
///
/// Unlike [`ResolvedOptions::get_int`](crate::ResolvedOptions::get_int) and friends, this distinguishes an option which was never resolved from one whose value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The option has neither a value nor a default.
    Missing,
    /// The option resolved, but its value does not convert; the message explains why.
    Malformed(String),
    /// The option resolved and converted.
    Found(T),
}

impl<T> Lookup<T> {
    /// Collapse into an `Option`, treating both `Missing` and `Malformed` as `None`.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing | Lookup::Malformed(_) => None,
        }
    }

    /// Whether the option was not resolved at all.
    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }
}
