//! `optspec` is a self-documenting command line parser for Rust.
//!
//! Rather than building the parser up in code and generating the help message from it, `optspec` goes the other way around.
//! The help message *is* the specification: a program writes out its usage text, and `optspec` compiles the options, environment variables, and commands out of it.
//! Specifically, `optspec` attempts to prioritize the following design concerns:
//! * *What you see is what you parse*:
//! The usage shown to the user is exactly the text the program author wrote, minus the source indentation.
//! * *Options, environment, and commands in one place*:
//! An option may be spelled several ways on the command line, and also be read from one or more environment variables.
//! * *No surprises at runtime*:
//! Compiling and interpreting never print or exit.
//! Both return errors; the printing & exiting wrappers are separate, and optional.
//! * *Strings in, strings out*:
//! Values resolve as strings, with a few typed accessors for bools & integers.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/haraway.rs")]
//! ```
//!
//! ```console
//! $ haraway -h
//! usage: haraway <flags>... <command> <args>...
//! Run commands within the haraway sandbox.
//!
//! Options
//!   -r,--root=,HARAWAY_ROOT     Path to the haraway data root
//!   -j,--jobs=                  Number of parallel jobs
//!   -v,--verbose                Show more info
//!   -h,--help                   Show this help message
//!
//! Commands
//!   c,exec                      Execute a command within the sandbox
//!   sh,shell                    Open a shell within the sandbox
//!
//! Values for --root are also read from HARAWAY_ROOT.
//!
//! $ haraway -v c ls -l
//! root: /var/haraway
//! jobs: 1
//! verbose: true
//! command: exec ["ls", "-l"]
//!
//! $ haraway --jobs
//! error: Invalid option: --jobs was not recognized (requires a value)
//! haraway --jobs
//!         ^
//! usage: haraway <flags>... <command> <args>...
//! <truncated>
//! ```
//!
//! # Specification Text
//! The text is made up of five sections, separated by lines of exactly `--`.
//! Any section may be empty.
//!
//! ```text
//! <usage lines>
//! --
//! [!]name[=[default]]  spelling[,spelling...]  [description]
//! --
//! [!]NAME[=]           SPELLING[,SPELLING...]  [description]
//! --
//! command              spelling[,spelling...]  [description]
//! --
//! <appendix lines>
//! ```
//!
//! * The indentation of the first non-blank line is removed from every line.
//! This allows the specification to sit indented inside a raw string.
//! * The usage and appendix sections are free text, shown verbatim.
//! * Each row of the options, environment, and commands sections starts with the *name*, followed by the *spellings* and an optional *description*.
//! The spellings & description (but not the name) are shown in the usage.
//! A row without a description is not shown at all.
//! * Inside these three sections, a line starting with `#` is shown (without the `#`) but declares nothing.
//! This is how sub-headings are written; a bare `#` shows as a blank line.
//! * An indented line inside these sections continues the previous description.
//!
//! ### Options
//! * `name` declares a flag; `name=` declares an option taking a value; `name=default` also declares its default.
//! * A leading `!` marks the option as required.
//! * Spellings starting with `-` are command line spellings.
//! Any other spelling is an environment variable bound to the same option.
//! A trailing `=` on a spelling is cosmetic.
//!
//! ### Environment
//! * `NAME` declares a flag; `NAME=` a value; a leading `!` marks it as required.
//! * Every spelling is an environment variable.
//! If `NAME` matches an option name, the environment variables feed that option.
//!
//! ### Commands
//! * Every spelling is a command alias, resolving to the command name.
//! * The row `*` (or a `*` spelling) allows unknown positional arguments.
//!
//! # Cli Semantics
//! [`Specification::interpret`] takes the argument vector (starting with the program name, which is skipped) and the environment as `KEY=VALUE` entries.
//!
//! * Environment variables bound to an option seed its value.
//! The command line overrides them; defaults apply only when neither is present.
//! * `--key value`, `--key=value`, `-k value`, and `-k=value` are all equivalent for a value-taking option.
//! Only the first `=` is used as a separator.
//! * Flags never take a value: `--verbose=yes` is an error.
//! * Repeating an option keeps the first value as the value, and the rest as extras (see [`ResolvedOptions::get_multi`]).
//! * A lone `--` ends the scan; everything after it becomes a residual argument.
//! * A command token also ends the scan; the command and everything after it become the residual arguments.
//! * Any other token is an error, unless the specification allows unknown arguments (in which case it is collected and the scan continues).
//! * Finally, every required option must have a value.
//!
//! ### Environment Propagation
//! Interpretation never changes the process environment.
//! To make the resolved values visible to child processes (or code reading environment variables), call [`Specification::environment_exports`] and then [`EnvironmentExports::apply`].
//!
//! # Typed Accessors
//! * [`ResolvedOptions::get`]: the value, or else the default.
//! * [`ResolvedOptions::get_bool`]: `true`, `ok`, `1`, `yes`, `on` (any case) are true, anything else is false.
//! * [`ResolvedOptions::get_int`] & [`ResolvedOptions::get_uint`]: integers with base detection (`0x1F`, `017`, `0b101`, `42`).
//! * [`ResolvedOptions::is_set`]: whether the option was given, ignoring defaults.
//!
//! The bool & integer accessors can't tell an absent option from a malformed one.
//! Use [`ResolvedOptions::lookup_bool`], [`ResolvedOptions::lookup_int`], or [`ResolvedOptions::lookup_uint`] when that matters.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing (ex: [`InMemoryInterface`]).
//! * `tracing_debug`: Emit `tracing` debug events while compiling & interpreting.
pub use optspec_core::*;
