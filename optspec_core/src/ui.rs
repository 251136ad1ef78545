use std::env;
use std::error::Error;

use crate::compiler::CompileError;
use crate::interpreter::InterpretError;
use crate::resolved::ResolvedOptions;
use crate::spec::Specification;

/// Behaviour for displaying usage and errors to the user.
pub trait UserInterface {
    /// Display a regular message (ex: the usage).
    fn print(&self, message: String);

    /// Display an error message.
    fn print_error(&self, message: String);

    /// Display where, in the command line, an error occurred.
    fn print_error_context(&self, error_context: ErrorContext);
}

/// The standard console: messages to stdout, errors to stderr.
#[derive(Debug)]
pub struct Console {}

impl Default for Console {
    fn default() -> Self {
        Self {}
    }
}

impl UserInterface for Console {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

/// The command line, with a marker pointing at the offending token.
///
/// ```text
/// haraway -v --nope ls
///            ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    index: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    /// Point at the token at `index` in `tokens`.
    pub fn new(index: usize, tokens: &[impl AsRef<str>]) -> Self {
        Self {
            index,
            tokens: tokens
                .iter()
                .map(|token| token.as_ref().to_string())
                .collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut projection = String::default();
        let mut marker = None;

        for (i, token) in self.tokens.iter().enumerate() {
            if i == self.index {
                marker.replace(projection.chars().count());
            }

            projection.push_str(token);

            if i + 1 < self.tokens.len() {
                projection.push(' ');
            }
        }

        // Beyond the final token, point just past the end.
        let width = marker.unwrap_or_else(|| projection.chars().count());
        write!(f, "{projection}\n{:width$}^", "")
    }
}

impl Specification {
    /// Display the usage.
    pub fn print_usage(&self, user_interface: &(impl UserInterface + ?Sized)) {
        user_interface.print(self.usage.clone());
    }

    /// Display the error, followed by the usage, as errors.
    pub fn print_usage_with_error(
        &self,
        user_interface: &(impl UserInterface + ?Sized),
        error: &(impl Error + ?Sized),
    ) {
        user_interface.print_error(format!("error: {error}"));
        user_interface.print_error(self.usage.clone());
    }

    /// Display the interpret error, where it occurred in `args`, and the usage.
    pub fn print_interpret_error(
        &self,
        user_interface: &(impl UserInterface + ?Sized),
        error: &InterpretError,
        args: &[impl AsRef<str>],
    ) {
        user_interface.print_error(format!("error: {error}"));

        if let Some(index) = error.index() {
            user_interface.print_error_context(ErrorContext::new(index, args));
        }

        user_interface.print_error(self.usage.clone());
    }

    /// Compile the specification text, or display the error and exit with code `1` (via `std::process::exit`).
    pub fn compile_or_exit(text: &str) -> Self {
        match Specification::compile(text) {
            Ok(spec) => spec,
            Err(error) => {
                report_compile_error(&Console::default(), text, &error);
                std::process::exit(1);
            }
        }
    }

    /// Interpret the arguments and environment, or display the error with the usage and exit with code `1` (via `std::process::exit`).
    pub fn interpret_or_exit<A, E>(
        &self,
        args: &[A],
        environ: impl IntoIterator<Item = E>,
    ) -> ResolvedOptions
    where
        A: AsRef<str>,
        E: AsRef<str>,
    {
        match self.interpret(args, environ) {
            Ok(resolved) => resolved,
            Err(error) => {
                self.print_interpret_error(&Console::default(), &error, args);
                std::process::exit(1);
            }
        }
    }

    /// Interpret the Cli [`env::args`] and [`env::vars_os`], or display the error with the usage and exit with code `1`.
    ///
    /// Arguments and environment variables which are not valid unicode are skipped.
    pub fn interpret_process(&self) -> ResolvedOptions {
        let args: Vec<String> = env::args_os()
            .filter_map(|arg| arg.into_string().ok())
            .collect();
        let environ = env::vars_os().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some(format!("{key}={value}")),
                _ => None,
            }
        });

        self.interpret_or_exit(&args, environ)
    }

    /// Display the usage, and exit with code `1` (via `std::process::exit`).
    pub fn print_usage_and_exit(&self) -> ! {
        self.print_usage(&Console::default());
        std::process::exit(1);
    }

    /// Display the error with the usage, and exit with code `1` (via `std::process::exit`).
    pub fn exit_with_error(&self, error: &(impl Error + ?Sized)) -> ! {
        self.print_usage_with_error(&Console::default(), error);
        std::process::exit(1);
    }
}

fn report_compile_error(
    user_interface: &(impl UserInterface + ?Sized),
    text: &str,
    error: &CompileError,
) {
    let excerpt: String = text.chars().take(80).collect();
    user_interface.print_error(format!("Spec parse error for\n'{excerpt}' ..\n{error}"));
}

/// A `UserInterface` which keeps everything in memory, for inspection in tests.
#[cfg(any(test, feature = "unit_test"))]
#[derive(Debug, Default)]
pub struct InMemoryInterface {
    messages: std::cell::RefCell<Vec<String>>,
    errors: std::cell::RefCell<Vec<String>>,
    error_context: std::cell::RefCell<Option<ErrorContext>>,
}

#[cfg(any(test, feature = "unit_test"))]
impl UserInterface for InMemoryInterface {
    fn print(&self, message: String) {
        self.messages.borrow_mut().push(message);
    }

    fn print_error(&self, message: String) {
        self.errors.borrow_mut().push(message);
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        // Assumes print_error_context() is only ever called once.
        self.error_context.borrow_mut().replace(error_context);
    }
}

#[cfg(any(test, feature = "unit_test"))]
impl InMemoryInterface {
    /// Consume into the (newline joined) messages, errors, and error context.
    pub fn consume(self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
        let InMemoryInterface {
            messages,
            errors,
            error_context,
        } = self;
        let join = |lines: Vec<String>| {
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        };

        (
            join(messages.into_inner()),
            join(errors.into_inner()),
            error_context.into_inner(),
        )
    }

    /// Consume into the messages, asserting there were no errors.
    pub fn consume_message(self) -> String {
        let (message, error, error_context) = self.consume();
        assert_eq!(error, None);
        assert_eq!(error_context, None);
        message.unwrap_or_default()
    }
}
