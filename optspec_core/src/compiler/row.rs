use crate::constant::*;

/// A table row, split into its fields.
///
/// ```text
/// !root=XYZ   -r,--root=,ROOT     Path to the data root
/// ^key        ^rest
///             ^spellings          ^description
/// ```
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Row<'a> {
    pub(super) key: &'a str,
    // The spellings and description, trimmed.
    pub(super) rest: &'a str,
    // The character column at which `rest` begins.
    pub(super) rest_column: usize,
    pub(super) spellings: &'a str,
    pub(super) description: Option<&'a str>,
}

impl<'a> Row<'a> {
    /// Split a (non-blank) table line.
    /// Returns `None` if the line has no fields after the key.
    pub(super) fn split(line: &'a str) -> Option<Self> {
        let (key, remainder) = line.split_once(' ')?;
        let rest = remainder.trim_matches(is_blank);

        if rest.is_empty() {
            return None;
        }

        let leading = remainder.chars().take_while(|c| is_blank(*c)).count();
        let rest_column = key.chars().count() + 1 + leading;
        let (spellings, description) = match rest.split_once(' ') {
            Some((spellings, description)) => {
                let description = description.trim_matches(is_blank);

                if description == NO_DESCRIPTION {
                    (spellings, None)
                } else {
                    (spellings, Some(description))
                }
            }
            None => (rest, None),
        };

        Some(Self {
            key,
            rest,
            rest_column,
            spellings,
            description,
        })
    }

    /// Separate the required marker from the key.
    pub(super) fn required_key(&self) -> (bool, &'a str) {
        match self.key.strip_prefix(REQUIRED_PREFIX) {
            Some(key) => (true, key),
            None => (false, self.key),
        }
    }

    /// The spellings, each cut at the first `=` (which only marks the spelling as value-taking).
    pub(super) fn spellings(&self) -> impl Iterator<Item = &'a str> {
        self.spellings
            .split(SPELLING_SEPARATOR)
            .map(|spelling| {
                spelling
                    .split_once(VALUE_MARKER)
                    .map_or(spelling, |(left, _)| left)
            })
            .filter(|spelling| !spelling.is_empty())
    }

    /// The spellings, verbatim.
    pub(super) fn raw_spellings(&self) -> impl Iterator<Item = &'a str> {
        self.spellings
            .split(SPELLING_SEPARATOR)
            .filter(|spelling| !spelling.is_empty())
    }
}

pub(super) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Remove up to `columns` leading blank characters.
pub(super) fn skip_blank_columns(line: &str, columns: usize) -> &str {
    let offset = line
        .char_indices()
        .take(columns)
        .find(|(_, c)| !is_blank(*c))
        .map_or_else(
            || {
                line.char_indices()
                    .nth(columns)
                    .map_or(line.len(), |(offset, _)| offset)
            },
            |(offset, _)| offset,
        );
    &line[offset..]
}

/// The number of leading blank characters.
pub(super) fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| is_blank(*c)).count()
}
