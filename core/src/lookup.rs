//! Key-value resolution: fetch a raw value, fall back to a default, cast.

use crate::cast::Caster;
use crate::error::ConfigError;
use crate::field::FieldDefault;
use crate::kind::Kind;
use crate::source::{EnvSource, Source};
use crate::value::Value;

/// Resolves single keys against a [`Source`].
///
/// This is the service the loader delegates every field to. It can also be
/// used directly, e.g. to build a value that is then declared as a field's
/// pre-resolved default.
pub struct Lookup<'a> {
    /// Backing store
    source: &'a dyn Source,
}

impl<'a> Lookup<'a> {
    /// Resolve keys against `source`.
    #[must_use]
    pub fn new(source: &'a dyn Source) -> Self {
        Self { source }
    }

    /// Resolve `key`, casting the found value with `caster`.
    ///
    /// When the key is missing a `Raw` default is cast the same way and a
    /// `Resolved` default is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UndefinedValue`] if the key is missing and there
    /// is no default, and [`ConfigError::Cast`] if the caster rejects the raw
    /// string.
    pub fn get(
        &self,
        key: &str,
        kind: &Kind,
        caster: &Caster,
        default: Option<FieldDefault>,
    ) -> Result<Value, ConfigError> {
        self.resolve(key, default, |raw| {
            caster.cast(raw).map_err(|source| ConfigError::Cast {
                key: key.to_string(),
                kind: kind.clone(),
                source,
            })
        })
    }

    /// Resolve `key` with a cast step that may itself fail with any
    /// [`ConfigError`].
    ///
    /// The cast runs only when there is a raw string to convert.
    pub(crate) fn resolve<F>(
        &self,
        key: &str,
        default: Option<FieldDefault>,
        cast: F,
    ) -> Result<Value, ConfigError>
    where
        F: FnOnce(&str) -> Result<Value, ConfigError>,
    {
        if let Some(raw) = self.source.get(key) {
            tracing::debug!(key, source = self.source.name(), "configuration value found");
            return cast(&raw);
        }

        match default {
            Some(FieldDefault::Raw(raw)) => {
                tracing::trace!(key, "using literal default");
                cast(&raw)
            }
            Some(FieldDefault::Resolved(value)) => {
                tracing::trace!(key, "using pre-resolved default");
                Ok(value)
            }
            None => Err(ConfigError::UndefinedValue {
                key: key.to_string(),
            }),
        }
    }
}

/// Resolve `key` from the process environment.
///
/// # Errors
///
/// See [`Lookup::get`].
pub fn env(
    key: &str,
    kind: &Kind,
    caster: &Caster,
    default: Option<FieldDefault>,
) -> Result<Value, ConfigError> {
    Lookup::new(&EnvSource::new()).get(key, kind, caster, default)
}
