use indexmap::{IndexMap, IndexSet};

use crate::convert::{is_true, parse_bool, parse_int, parse_uint};
use crate::model::{Lookup, OptionName};

/// The options resolved from one [`Specification::interpret`](crate::Specification::interpret) call.
///
/// Holds no reference to the specification; the declared defaults are copied in.
///
/// ### Example
/// ```
/// # use optspec_core as optspec;
/// use optspec::Specification;
///
/// let spec = Specification::compile(
///     r#"
///     usage: multi
///     --
///     inc=    -I,--include=    Add dir to include search path
///     num=2   -n=              How many
///     --
///     --
///     --
///     "#,
/// )
/// .unwrap();
/// let environ: &[&str] = &[];
/// let options = spec
///     .interpret(&["multi", "-I", "a", "--include=b", "-I=c"], environ)
///     .unwrap();
///
/// assert_eq!(options.get("inc"), Some("a"));
/// assert_eq!(options.get_multi("inc"), Some(vec!["a", "b", "c"]));
/// assert_eq!(options.get_int("num"), Some(2));
/// assert!(!options.is_set("num"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    values: IndexMap<OptionName, String>,
    repeated: IndexMap<OptionName, Vec<String>>,
    // Values which came from the environment, and so give way to the command line.
    seeded: IndexSet<OptionName>,
    defaults: IndexMap<OptionName, String>,
    command: Option<String>,
    args: Vec<String>,
}

impl ResolvedOptions {
    pub(crate) fn new(defaults: IndexMap<OptionName, String>) -> Self {
        Self {
            values: IndexMap::default(),
            repeated: IndexMap::default(),
            seeded: IndexSet::default(),
            defaults,
            command: None,
            args: Vec::default(),
        }
    }

    pub(crate) fn seed(&mut self, name: OptionName, value: impl Into<String>) {
        self.values.insert(name.clone(), value.into());
        self.seeded.insert(name);
    }

    /// Record an occurrence from the command line.
    /// The first occurrence is the value, subsequent occurrences are collected in order.
    pub(crate) fn record(&mut self, name: OptionName, value: impl Into<String>) {
        if self.seeded.swap_remove(&name) {
            self.values.insert(name, value.into());
        } else if self.values.contains_key(&name) {
            self.repeated.entry(name).or_default().push(value.into());
        } else {
            self.values.insert(name, value.into());
        }
    }

    pub(crate) fn set_command(&mut self, command: impl Into<String>) {
        self.command.replace(command.into());
    }

    pub(crate) fn set_args(&mut self, args: Vec<String>) {
        self.args = args;
    }

    pub(crate) fn push_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    pub(crate) fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Get the value of the option, falling back to its default.
    /// For a flag, the value is `"true"` when present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .or_else(|| self.defaults.get(name))
            .map(String::as_str)
    }

    /// Get every value the option was given, in order.
    /// Returns `None` if the option was never set (defaults do not apply).
    pub fn get_multi(&self, name: &str) -> Option<Vec<&str>> {
        let first = self.values.get(name)?;
        let rest = self.repeated.get(name).map_or(&[][..], Vec::as_slice);

        Some(
            std::iter::once(first)
                .chain(rest)
                .map(String::as_str)
                .collect(),
        )
    }

    /// Interpret the option as a bool.
    /// `true`, `ok`, `1`, `yes`, and `on` (in any case) are true; anything else, including absence, is false.
    ///
    /// See [`ResolvedOptions::lookup_bool`] to distinguish absence.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).map_or(false, is_true)
    }

    /// Interpret the option as a signed integer, detecting the base from its prefix (`0x`, `0o`, `0b`, or a leading `0`).
    /// Returns `None` if the option is absent or does not parse.
    ///
    /// See [`ResolvedOptions::lookup_int`] to distinguish the two.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.lookup_int(name).found()
    }

    /// Interpret the option as an unsigned integer, detecting the base from its prefix.
    /// Returns `None` if the option is absent or does not parse.
    pub fn get_uint(&self, name: &str) -> Option<u64> {
        self.lookup_uint(name).found()
    }

    /// Interpret the option as a bool, distinguishing an absent option from a malformed one.
    /// `false`, `no`, `0`, and `off` (in any case) are false.
    pub fn lookup_bool(&self, name: &str) -> Lookup<bool> {
        self.lookup(name, |value| parse_bool(value).map_err(|e| e.to_string()))
    }

    /// Interpret the option as a signed integer, distinguishing an absent option from a malformed one.
    pub fn lookup_int(&self, name: &str) -> Lookup<i64> {
        self.lookup(name, |value| parse_int(value).map_err(|e| e.to_string()))
    }

    /// Interpret the option as an unsigned integer, distinguishing an absent option from a malformed one.
    pub fn lookup_uint(&self, name: &str) -> Lookup<u64> {
        self.lookup(name, |value| parse_uint(value).map_err(|e| e.to_string()))
    }

    fn lookup<T>(&self, name: &str, convert: impl FnOnce(&str) -> Result<T, String>) -> Lookup<T> {
        match self.get(name) {
            Some(value) => match convert(value) {
                Ok(converted) => Lookup::Found(converted),
                Err(message) => Lookup::Malformed(message),
            },
            None => Lookup::Missing,
        }
    }

    /// Whether the option was given a value during interpretation (from the command line or the environment).
    /// Defaults do not count.
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The matched command, if any.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// The residual arguments.
    ///
    /// When a command matched, these start with the (canonical) command followed by every subsequent token.
    /// Otherwise, these are the unknown positional tokens (if allowed) and any tokens after a `--` terminator.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Consume into the matched command and the residual arguments.
    pub fn into_parts(self) -> (Option<String>, Vec<String>) {
        (self.command, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolved(defaults: &[(&str, &str)]) -> ResolvedOptions {
        ResolvedOptions::new(
            defaults
                .iter()
                .map(|(name, value)| (OptionName::new(name), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn record_first_then_repeat() {
        let mut options = resolved(&[]);
        options.record("inc".into(), "a");
        options.record("inc".into(), "b");
        options.record("inc".into(), "c");

        assert_eq!(options.get("inc"), Some("a"));
        assert_eq!(options.get_multi("inc"), Some(vec!["a", "b", "c"]));
        assert!(options.is_set("inc"));
    }

    #[test]
    fn seed_overridden() {
        let mut options = resolved(&[]);
        options.seed("root".into(), "/env");
        assert_eq!(options.get("root"), Some("/env"));
        assert!(options.is_set("root"));

        options.record("root".into(), "/cli");
        options.record("root".into(), "/again");
        assert_eq!(options.get("root"), Some("/cli"));
        assert_eq!(options.get_multi("root"), Some(vec!["/cli", "/again"]));
    }

    #[test]
    fn defaults() {
        let mut options = resolved(&[("root", "XYZ"), ("num", "2")]);

        assert_eq!(options.get("root"), Some("XYZ"));
        assert_eq!(options.get_multi("root"), None);
        assert!(!options.is_set("root"));
        assert_eq!(options.get_int("num"), Some(2));
        assert_eq!(options.get("missing"), None);

        options.record("root".into(), "hello");
        assert_eq!(options.get("root"), Some("hello"));
        assert_eq!(options.get_multi("root"), Some(vec!["hello"]));
    }

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("Yes"), true)]
    #[case(Some("on"), true)]
    #[case(Some("1"), true)]
    #[case(Some("false"), false)]
    #[case(Some("nope"), false)]
    #[case(None, false)]
    fn get_bool(#[case] value: Option<&str>, #[case] expected: bool) {
        let mut options = resolved(&[]);

        if let Some(value) = value {
            options.record("flag".into(), value);
        }

        assert_eq!(options.get_bool("flag"), expected);
    }

    #[rstest]
    #[case(Some("0x1F"), Some(31), Some(31))]
    #[case(Some("017"), Some(15), Some(15))]
    #[case(Some("42"), Some(42), Some(42))]
    #[case(Some("-42"), Some(-42), None)]
    #[case(Some("forty"), None, None)]
    #[case(None, None, None)]
    fn get_integers(
        #[case] value: Option<&str>,
        #[case] expected_int: Option<i64>,
        #[case] expected_uint: Option<u64>,
    ) {
        let mut options = resolved(&[]);

        if let Some(value) = value {
            options.record("num".into(), value);
        }

        assert_eq!(options.get_int("num"), expected_int);
        assert_eq!(options.get_uint("num"), expected_uint);
    }

    #[test]
    fn lookups() {
        let mut options = resolved(&[("level", "high")]);
        options.record("num".into(), "0x10");
        options.record("flag".into(), "off");

        assert_eq!(options.lookup_int("num"), Lookup::Found(16));
        assert_eq!(options.lookup_uint("num"), Lookup::Found(16));
        assert_eq!(options.lookup_int("missing"), Lookup::Missing);
        assert_matches!(options.lookup_int("level"), Lookup::Malformed(message) if message.contains("high"));
        assert_eq!(options.lookup_bool("flag"), Lookup::Found(false));
        assert_eq!(options.lookup_bool("missing"), Lookup::Missing);
        assert_matches!(options.lookup_bool("num"), Lookup::Malformed(_));
    }

    #[test]
    fn command_and_args() {
        let mut options = resolved(&[]);
        assert_eq!(options.command(), None);
        assert!(options.args().is_empty());

        options.push_arg("x");
        options.set_command("exec");
        options.set_args(vec!["exec".to_string(), "ls".to_string()]);

        assert_eq!(options.command(), Some("exec"));
        assert_eq!(options.args(), &["exec".to_string(), "ls".to_string()]);
        assert_eq!(
            options.into_parts(),
            (
                Some("exec".to_string()),
                vec!["exec".to_string(), "ls".to_string()]
            )
        );
    }
}
