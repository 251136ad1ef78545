//! Traits which, typically, may be imported without concern: `use optspec::prelude::*`.

/// Behaviour for displaying usage and errors to the user.
// Needs to be imported in order to implement a custom interface (ex: for capturing output in tests).
pub use crate::ui::UserInterface;
