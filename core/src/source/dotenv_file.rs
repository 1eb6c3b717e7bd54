//! `.env` file source.

use super::Source;
use crate::error::ConfigError;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// File name searched for by [`DotEnvSource::discover`].
const DOTENV_FILE: &str = ".env";

/// Values parsed from a `KEY=value` file.
///
/// The file is read once into memory; the process environment is left
/// untouched. Keys are case-sensitive and later lines override earlier ones.
#[derive(Debug, Clone, Default)]
pub struct DotEnvSource {
    /// File the values were read from, if any
    path: Option<PathBuf>,
    /// Raw values by key
    values: IndexMap<String, String>,
}

impl DotEnvSource {
    /// Source with no values, used when no file exists.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DotEnv`] if the file cannot be opened or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let to_error = |source| ConfigError::DotEnv {
            path: path.to_path_buf(),
            source,
        };

        let mut values = IndexMap::new();
        for item in dotenvy::from_path_iter(path).map_err(to_error)? {
            let (key, value) = item.map_err(to_error)?;
            values.insert(key, value);
        }

        tracing::debug!(path = %path.display(), count = values.len(), "loaded .env file");
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Find the nearest `.env` in `start_dir` or one of its ancestors.
    ///
    /// Returns an empty source when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DotEnv`] if a file is found but cannot be parsed.
    pub fn discover(start_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let start_dir = start_dir.as_ref();
        if let Some(path) = start_dir
            .ancestors()
            .map(|dir| dir.join(DOTENV_FILE))
            .find(|candidate| candidate.is_file())
        {
            return Self::from_path(path);
        }

        tracing::debug!(start = %start_dir.display(), "no .env file found");
        Ok(Self::empty())
    }

    /// File the values were read from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of keys in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the file defined no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Source for DotEnvSource {
    fn name(&self) -> &str {
        DOTENV_FILE
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
