//! Process environment source.

use super::Source;

/// Reads values from the process environment.
///
/// Variables whose value is not valid UTF-8 are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct EnvSource;

impl EnvSource {
    /// Create an environment source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Source for EnvSource {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
