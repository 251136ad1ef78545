// Separates the sections of a specification text.
// Also terminates option scanning on the command line.
pub(crate) const SECTION_DELIMITER: &str = "--";
pub(crate) const ARGUMENT_TERMINATOR: &str = "--";

pub(crate) const COMMENT_PREFIX: &str = "#";
pub(crate) const REQUIRED_PREFIX: &str = "!";
pub(crate) const VALUE_MARKER: char = '=';
pub(crate) const SPELLING_SEPARATOR: char = ',';
pub(crate) const OPTION_PREFIX: &str = "-";
pub(crate) const ALLOW_UNKNOWN: &str = "*";

// A description of exactly "-" is treated as no description.
pub(crate) const NO_DESCRIPTION: &str = "-";
pub(crate) const USAGE_INDENT: &str = "  ";

// The value recorded when a flag is present.
pub(crate) const FLAG_VALUE: &str = "true";
