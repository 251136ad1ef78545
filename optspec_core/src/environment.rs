use std::env;

use crate::resolved::ResolvedOptions;
use crate::spec::Specification;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Environment variables to set from resolved options.
///
/// Computed by [`Specification::environment_exports`]; nothing is changed until [`EnvironmentExports::apply`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentExports(Vec<(String, String)>);

impl EnvironmentExports {
    /// The `(variable, value)` pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(variable, value)| (variable.as_str(), value.as_str()))
    }

    /// The value to be exported for the variable, if any.
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.iter()
            .find(|(candidate, _)| *candidate == variable)
            .map(|(_, value)| value)
    }

    /// The number of variables to export.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nothing to export.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set every variable in the process environment.
    ///
    /// This mutates process-wide state: do not call it concurrently with anything else reading or writing the environment.
    /// Values containing a NUL character cannot be exported and are skipped.
    pub fn apply(&self) {
        for (variable, value) in self.iter() {
            if value.contains('\0') {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Skipping export of '{variable}': the value contains NUL.");
                }

                continue;
            }

            env::set_var(variable, value);
        }
    }
}

impl Specification {
    /// Compute the environment variables bound to options which resolved a value.
    ///
    /// Every environment spelling is included (in declaration order) whose option was set from the command line or the environment.
    /// Defaults are not exported.
    ///
    /// ### Example
    /// ```
    /// # use optspec_core as optspec;
    /// use optspec::Specification;
    ///
    /// let spec = Specification::compile(
    ///     "usage\n--\nroot=/tmp  -r,ROOT,DATA_ROOT  The root\nnum=1  -n\n--\n--\n--\n",
    /// )
    /// .unwrap();
    /// let environ: &[&str] = &[];
    /// let options = spec.interpret(&["prog", "-r", "/srv"], environ).unwrap();
    /// let exports = spec.environment_exports(&options);
    ///
    /// assert_eq!(
    ///     exports.iter().collect::<Vec<_>>(),
    ///     vec![("ROOT", "/srv"), ("DATA_ROOT", "/srv")]
    /// );
    /// ```
    pub fn environment_exports(&self, resolved: &ResolvedOptions) -> EnvironmentExports {
        let exports = self
            .environment
            .iter()
            .filter_map(|(variable, name)| {
                resolved
                    .value(name.as_str())
                    .map(|value| (variable.clone(), value.to_string()))
            })
            .collect::<Vec<_>>();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Computed {} environment export(s).", exports.len());
        }

        EnvironmentExports(exports)
    }
}
