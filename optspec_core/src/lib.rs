//! Core module for `optspec`.
//! See [documentation root](https://docs.rs/optspec/latest/optspec/index.html) for full details.
#![deny(missing_docs)]
mod compiler;
mod constant;
mod convert;
mod environment;
mod interpreter;
mod model;
mod resolved;
mod spec;
mod ui;
#[allow(missing_docs)]
pub mod prelude;

pub use compiler::CompileError;
pub use environment::EnvironmentExports;
pub use interpreter::InterpretError;
pub use model::*;
pub use resolved::ResolvedOptions;
pub use spec::Specification;
pub use ui::{Console, ErrorContext};

#[cfg(any(test, feature = "unit_test"))]
pub use ui::InMemoryInterface;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;

    /// The specification used by the original `haraway` tool, indented as it would be inside source code.
    pub(crate) const HARAWAY: &str = r#"
    usage: haraway <flags>... <command> <args>...
    --
    root=     -r,--root=,HARAWAY_ROOT     Path to the haraway data root
    prefix=   -p,--prefix,HARAWAY_PREFIX  Path to the haraway install prefix.
    verbose   -v,--verbose                Show more info
    debug     -d,--debug,HARAWAY_DEBUG    Show debug info
    --
    --
    exec      c,exec                      Execute a command within the haraway sandbox
    shell     sh,shell                    Open a shell within the haraway sandbox
    --
    "#;
}
