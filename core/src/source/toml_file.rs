//! TOML file source.

use super::Source;
use crate::error::ConfigError;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Separator between the names of nested tables in a flattened key.
const NESTED_SEPARATOR: &str = "__";

/// Values read from a TOML document.
///
/// The document is flattened: keys are upper-cased, nested tables are joined
/// with `__` (`[server] port = 80` becomes `SERVER__PORT`) and arrays are
/// joined with commas so that sequence casters can read them back. Lookups
/// are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct TomlSource {
    /// File the values were read from, if any
    path: Option<PathBuf>,
    /// Raw values by upper-cased key
    values: IndexMap<String, String>,
}

impl TomlSource {
    /// Source with no values, used when no file exists.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `content` is not valid TOML.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let table: toml::Table = toml::from_str(content)?;
        let mut values = IndexMap::new();
        flatten("", &table, &mut values);
        Ok(Self { path: None, values })
    }

    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it is not valid TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut parsed = Self::parse(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), count = parsed.values.len(), "loaded TOML file");
        parsed.path = Some(path.to_path_buf());
        Ok(parsed)
    }

    /// Read `<config dir>/<app>/config.toml`, or nothing if it does not exist.
    ///
    /// The config directory follows the platform convention
    /// (`$XDG_CONFIG_HOME` or `~/.config` on Linux).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn user_config(app: &str) -> Result<Self, ConfigError> {
        match Self::user_config_path(app) {
            Some(path) if path.is_file() => Self::from_path(path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "no user config file");
                Ok(Self::empty())
            }
            None => Ok(Self::empty()),
        }
    }

    /// Location of the user config file for `app`.
    ///
    /// Returns `None` if the platform has no config directory.
    #[must_use]
    pub fn user_config_path(app: &str) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(app).join("config.toml"))
    }

    /// File the values were read from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Source for TomlSource {
    fn name(&self) -> &str {
        "toml"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(&key.to_uppercase()).cloned()
    }
}

/// Insert every scalar of `table` into `out` under its flattened key.
fn flatten(prefix: &str, table: &toml::Table, out: &mut IndexMap<String, String>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{prefix}{NESTED_SEPARATOR}{}", name.to_uppercase())
        };
        match value {
            toml::Value::Table(nested) => flatten(&key, nested, out),
            other => {
                out.insert(key, raw_text(other));
            }
        }
    }
}

/// Raw string form of a TOML value, as a caster expects it.
fn raw_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(n) => n.to_string(),
        toml::Value::Float(x) => x.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(array_element)
            .collect::<Vec<_>>()
            .join(","),
        toml::Value::Table(table) => table.to_string(),
    }
}

/// Text of one array element, double-quoted and escaped whenever the CSV
/// splitter would otherwise split, unquote or drop it.
fn array_element(value: &toml::Value) -> String {
    let text = raw_text(value);
    let plain = !text.is_empty() && !text.contains([',', '"', '\'', '\\']);
    if plain {
        text
    } else {
        format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
