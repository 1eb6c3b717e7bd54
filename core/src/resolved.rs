//! The result of a successful load.

use crate::error::ConfigError;
use crate::typed::ConfigType;
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Values of every resolved field, in declaration order.
///
/// Skipped fields (underscore-prefixed or explicitly ignored) are never
/// present in [`ResolvedConfig::get`]. A skipped field that declared a
/// pre-resolved default keeps it in [`ResolvedConfig::retained`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
#[allow(clippy::module_name_repetitions)]
pub struct ResolvedConfig {
    /// Resolved values by field name
    values: IndexMap<String, Value>,
    /// Names of skipped fields
    #[serde(skip)]
    skipped: Vec<String>,
    /// Pre-resolved defaults of skipped fields
    #[serde(skip)]
    retained: IndexMap<String, Value>,
}

impl ResolvedConfig {
    /// Record the resolved value of a field.
    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Record a skipped field and the pre-resolved default it declared.
    pub(crate) fn skip(&mut self, name: &str, retained: Option<Value>) {
        self.skipped.push(name.to_string());
        if let Some(value) = retained {
            self.retained.insert(name.to_string(), value);
        }
    }

    /// Resolved value of the field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether the field called `name` was resolved.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Pre-resolved default kept by a skipped field.
    #[must_use]
    pub fn retained(&self, name: &str) -> Option<&Value> {
        self.retained.get(name)
    }

    /// Whether the field called `name` was skipped.
    #[must_use]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skipped.iter().any(|skipped| skipped == name)
    }

    /// Names of skipped fields, in declaration order.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Resolved fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of resolved fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert the field called `name` to `T`.
    ///
    /// A skipped field converts from its retained default; without one it
    /// takes [`ConfigType::when_skipped`] (the type's `Default` for built-in
    /// types, `None` for optional ones).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeMismatch`] if the value has the wrong
    /// variant and [`ConfigError::Skipped`] if the field has no value at all
    /// and its type has no skip fallback.
    pub fn extract<T: ConfigType>(&self, name: &str) -> Result<T, ConfigError> {
        let Some(value) = self.get(name).or_else(|| self.retained(name)) else {
            return T::when_skipped().ok_or_else(|| ConfigError::Skipped {
                field: name.to_string(),
            });
        };

        T::from_value(value.clone()).map_err(|found| ConfigError::TypeMismatch {
            field: name.to_string(),
            expected: T::kind(),
            found: found.describe(),
        })
    }
}
