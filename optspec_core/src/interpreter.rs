use thiserror::Error;

use crate::constant::*;
use crate::model::OptionKind;
use crate::resolved::ResolvedOptions;
use crate::spec::Specification;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error interpreting the command line against a [`Specification`].
///
/// Token errors carry the offending token along with its index in the argument vector.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// The option token matches no declared spelling.
    #[error("Invalid option: {token} was not recognized")]
    UnrecognizedOption {
        /// The offending token.
        token: String,
        /// Its index in the argument vector.
        index: usize,
    },

    /// A flag was given a value via `=`.
    #[error("Invalid option: {token} was not recognized (doesn't take a value)")]
    FlagWithValue {
        /// The offending token.
        token: String,
        /// Its index in the argument vector.
        index: usize,
    },

    /// A value-taking option is the final token, with no value after it.
    #[error("Invalid option: {token} was not recognized (requires a value)")]
    MissingValue {
        /// The offending token.
        token: String,
        /// Its index in the argument vector.
        index: usize,
    },

    /// A positional token matches no command, and unknown arguments are not allowed.
    #[error("Invalid argument: {token} was not recognized")]
    UnrecognizedArgument {
        /// The offending token.
        token: String,
        /// Its index in the argument vector.
        index: usize,
    },

    /// A required option was never given a value.
    #[error("Missing option: {name}")]
    MissingOption {
        /// The option name.
        name: String,
    },
}

impl InterpretError {
    /// The index of the offending token in the argument vector, if the error concerns a token.
    pub fn index(&self) -> Option<usize> {
        match self {
            InterpretError::UnrecognizedOption { index, .. }
            | InterpretError::FlagWithValue { index, .. }
            | InterpretError::MissingValue { index, .. }
            | InterpretError::UnrecognizedArgument { index, .. } => Some(*index),
            InterpretError::MissingOption { .. } => None,
        }
    }
}

impl Specification {
    /// Interpret the argument vector and environment against this specification.
    ///
    /// The first argument is the program name, and is not interpreted.
    /// The environment entries are of the form `KEY=VALUE`; those bound to an option seed its value, which the command line may then override.
    ///
    /// Interpretation is pure: see [`Specification::environment_exports`] to propagate the resolved values back into the process environment.
    ///
    /// ### Example
    /// ```
    /// # use optspec_core as optspec;
    /// use optspec::Specification;
    ///
    /// let spec = Specification::compile(
    ///     r#"
    ///     usage: haraway <flags>... <command> <args>...
    ///     --
    ///     root=     -r,--root=,HARAWAY_ROOT     Path to the haraway data root
    ///     verbose   -v,--verbose                Show more info
    ///     --
    ///     --
    ///     exec      c,exec                      Execute a command
    ///     --
    ///     "#,
    /// )
    /// .unwrap();
    /// let options = spec
    ///     .interpret(&["haraway", "-v", "c", "ls", "-r"], &["HARAWAY_ROOT=/data"])
    ///     .unwrap();
    ///
    /// assert_eq!(options.get("root"), Some("/data"));
    /// assert!(options.get_bool("verbose"));
    /// assert_eq!(options.command(), Some("exec"));
    /// assert_eq!(options.args(), &["exec", "ls", "-r"]);
    /// ```
    pub fn interpret<A, E>(
        &self,
        args: &[A],
        environ: impl IntoIterator<Item = E>,
    ) -> Result<ResolvedOptions, InterpretError>
    where
        A: AsRef<str>,
        E: AsRef<str>,
    {
        let mut resolved = ResolvedOptions::new(self.defaults());

        // 1. Seed from the environment, so that the command line may override.
        for entry in environ {
            if let Some((variable, value)) = entry.as_ref().split_once(VALUE_MARKER) {
                if let Some(name) = self.environment.get(variable) {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Environment variable '{variable}' seeds '{name}'.");
                    }

                    resolved.seed(name.clone(), value);
                }
            }
        }

        // 2. Scan the command line.
        let mut index = 1;

        while index < args.len() {
            let token = args[index].as_ref();

            if token == ARGUMENT_TERMINATOR {
                for arg in &args[index + 1..] {
                    resolved.push_arg(arg.as_ref());
                }

                break;
            }

            if token.starts_with(OPTION_PREFIX) {
                index = self.interpret_option(&mut resolved, args, index)?;
                continue;
            }

            if let Some(command) = self.command_alias(token) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token '{token}' matches command '{command}'.");
                }

                // A command ends option scanning; the rest belongs to the command.
                resolved.set_command(command);
                resolved.set_args(
                    std::iter::once(command)
                        .chain(args[index + 1..].iter().map(|arg| arg.as_ref()))
                        .map(str::to_string)
                        .collect(),
                );
                break;
            }

            if self.allow_unknown_args {
                resolved.push_arg(token);
                index += 1;
                continue;
            }

            return Err(InterpretError::UnrecognizedArgument {
                token: token.to_string(),
                index,
            });
        }

        // 3. Check the required options.
        for (name, entry) in &self.entries {
            if entry.required && resolved.value(name.as_str()).is_none() {
                return Err(InterpretError::MissingOption {
                    name: name.to_string(),
                });
            }
        }

        Ok(resolved)
    }

    // Returns the index of the next token to scan.
    fn interpret_option<A: AsRef<str>>(
        &self,
        resolved: &mut ResolvedOptions,
        args: &[A],
        index: usize,
    ) -> Result<usize, InterpretError> {
        let token = args[index].as_ref();
        let (alias, inline) = match token.split_once(VALUE_MARKER) {
            Some((alias, value)) => (alias, Some(value)),
            None => (token, None),
        };
        let name = self
            .options
            .get(alias)
            .ok_or_else(|| InterpretError::UnrecognizedOption {
                token: token.to_string(),
                index,
            })?;
        // Spellings only come from declared rows, so the kind is always known.
        let kind = self.kind(name.as_str()).unwrap_or(OptionKind::Value);

        let (value, next) = match (kind, inline) {
            (OptionKind::Flag, Some(_)) => {
                return Err(InterpretError::FlagWithValue {
                    token: token.to_string(),
                    index,
                });
            }
            (OptionKind::Flag, None) => (FLAG_VALUE, index + 1),
            (OptionKind::Value, Some(value)) => (value, index + 1),
            (OptionKind::Value, None) => match args.get(index + 1) {
                Some(value) => (value.as_ref(), index + 2),
                None => {
                    return Err(InterpretError::MissingValue {
                        token: token.to_string(),
                        index,
                    });
                }
            },
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token '{token}' resolves '{name}' to '{value}'.");
        }

        resolved.record(name.clone(), value);
        Ok(next)
    }
}
