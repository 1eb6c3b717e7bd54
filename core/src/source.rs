//! Backing stores that configuration values are read from.
//!
//! A [`Source`] maps keys to raw strings. Sources never cast and never write;
//! casting and defaults are handled by [`crate::Lookup`].

mod dotenv_file;
mod env;
mod toml_file;

pub use dotenv_file::DotEnvSource;
pub use env::EnvSource;
pub use toml_file::TomlSource;

use crate::error::ConfigError;
use indexmap::IndexMap;
use std::path::Path;

/// Key-value store holding raw configuration strings.
pub trait Source: Send + Sync {
    /// Name used in log events.
    fn name(&self) -> &str;

    /// Raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory source.
#[derive(Debug, Clone, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct MapSource {
    /// Raw values by key
    values: IndexMap<String, String>,
}

impl MapSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Store `value` under `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = Self::new();
        for (key, value) in iter {
            source.insert(key, value);
        }
        source
    }
}

impl Source for MapSource {
    fn name(&self) -> &str {
        "map"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Ordered list of sources; the first one holding a key wins.
#[derive(Default)]
pub struct Layered {
    /// Composite name, e.g. `env+.env`
    name: String,
    /// Sources in priority order
    layers: Vec<Box<dyn Source>>,
}

impl Layered {
    /// Create an empty layered source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process environment first, then the nearest `.env` file found from
    /// `start_dir` upwards.
    ///
    /// # Errors
    ///
    /// Returns an error if a `.env` file is found but cannot be parsed.
    pub fn auto(start_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new()
            .with(EnvSource::new())
            .with(DotEnvSource::discover(start_dir)?))
    }

    /// Add a source with lower priority than the ones already added.
    #[must_use]
    pub fn with(mut self, source: impl Source + 'static) -> Self {
        if !self.name.is_empty() {
            self.name.push('+');
        }
        self.name.push_str(source.name());
        self.layers.push(Box::new(source));
        self
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Source for Layered {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| {
            let value = layer.get(key)?;
            tracing::trace!(key, layer = layer.name(), "key found in layer");
            Some(value)
        })
    }
}
