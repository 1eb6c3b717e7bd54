//! Type-to-caster registry.
//!
//! Built-in casters cover the scalar kinds. Sequences are handled generically
//! by wrapping the element caster in a CSV caster. Caller-supplied [`Casts`]
//! take precedence over built-ins for the same kind.

use crate::cast::Caster;
use crate::error::{CastError, ConfigError};
use crate::kind::Kind;
use crate::value::Value;
use indexmap::IndexMap;

/// Caller-supplied casters, keyed by kind.
#[derive(Debug, Clone, Default)]
pub struct Casts {
    /// Registered casters
    casters: IndexMap<Kind, Caster>,
}

impl Casts {
    /// Create an empty set of casters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a caster for `kind`, replacing any earlier one.
    #[must_use]
    pub fn with<F>(mut self, kind: Kind, cast: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastError> + Send + Sync + 'static,
    {
        self.insert(kind, Caster::new(cast));
        self
    }

    /// Register a caster for `kind`, replacing any earlier one.
    pub fn insert(&mut self, kind: Kind, caster: Caster) {
        self.casters.insert(kind, caster);
    }

    /// Add every caster of `other`, replacing casters for the same kinds.
    pub fn merge(&mut self, other: Self) {
        self.casters.extend(other.casters);
    }

    /// Caster registered for exactly this kind.
    #[must_use]
    pub fn get(&self, kind: &Kind) -> Option<&Caster> {
        self.casters.get(kind)
    }

    /// Number of registered casters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.casters.len()
    }

    /// Whether no casters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.casters.is_empty()
    }
}

/// Caster lookup for one load: caller overrides on top of the built-ins.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    /// Caller-supplied casters
    overrides: &'a Casts,
}

impl<'a> Registry<'a> {
    /// Create a registry that consults `overrides` before the built-ins.
    #[must_use]
    pub const fn new(overrides: &'a Casts) -> Self {
        Self { overrides }
    }

    /// Find the caster for `kind`.
    ///
    /// Lookup order: an override for the exact kind, then the built-in, then
    /// for sequences the CSV wrapper around the element's caster (looked up
    /// the same way).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnregisteredType`] naming the kind that has no
    /// caster.
    pub fn caster(&self, kind: &Kind) -> Result<Caster, ConfigError> {
        if let Some(caster) = self.overrides.get(kind) {
            return Ok(caster.clone());
        }
        if let Some(caster) = Caster::builtin(kind) {
            return Ok(caster);
        }
        match kind {
            Kind::Sequence(element) => self.caster(element).map(Caster::csv),
            _ => Err(ConfigError::UnregisteredType { kind: kind.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(registry: &Registry<'_>, kind: &Kind, raw: &str) -> Option<Value> {
        registry
            .caster(kind)
            .ok()
            .and_then(|caster| caster.cast(raw).ok())
    }

    #[test]
    fn test_builtin_lookup() {
        let casts = Casts::new();
        let registry = Registry::new(&casts);
        assert_eq!(cast(&registry, &Kind::Integer, "6"), Some(Value::Integer(6)));
        assert_eq!(
            cast(&registry, &Kind::Boolean, "true"),
            Some(Value::Boolean(true))
        );
    }

    #[test]
    fn test_sequence_of_builtin() {
        let casts = Casts::new();
        let registry = Registry::new(&casts);
        assert_eq!(
            cast(&registry, &Kind::sequence_of(Kind::Integer), " 4, 100, 12"),
            Some(Value::Sequence(vec![
                Value::Integer(4),
                Value::Integer(100),
                Value::Integer(12),
            ]))
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let casts = Casts::new().with(Kind::Bytes, |raw| Ok(Value::Bytes(raw.to_uppercase().into_bytes())));
        let registry = Registry::new(&casts);
        assert_eq!(
            cast(&registry, &Kind::Bytes, "hi"),
            Some(Value::Bytes(b"HI".to_vec()))
        );
        // Sequences of an overridden kind use the override per element.
        assert_eq!(
            cast(&registry, &Kind::sequence_of(Kind::Bytes), "a,b"),
            Some(Value::Sequence(vec![
                Value::Bytes(b"A".to_vec()),
                Value::Bytes(b"B".to_vec()),
            ]))
        );
    }

    #[test]
    fn test_override_for_whole_sequence() {
        let casts = Casts::new().with(Kind::sequence_of(Kind::Str), |raw| {
            Ok(Value::Sequence(
                raw.split(';').map(|s| Value::Str(s.to_string())).collect(),
            ))
        });
        let registry = Registry::new(&casts);
        assert_eq!(
            cast(&registry, &Kind::sequence_of(Kind::Str), "a,b;c"),
            Some(Value::Sequence(vec![
                Value::Str("a,b".to_string()),
                Value::Str("c".to_string()),
            ]))
        );
    }

    #[test]
    fn test_custom_kind() {
        let casts = Casts::new().with(Kind::custom("port"), |raw| {
            Ok(Value::custom("port", raw.trim().parse::<u16>()?))
        });
        assert_eq!(casts.len(), 1);

        let mut merged = Casts::new().with(Kind::custom("port"), |_| Ok(Value::Absent));
        merged.merge(casts.clone());
        assert_eq!(merged.len(), 1);
        let registry = Registry::new(&casts);

        let value = registry
            .caster(&Kind::custom("port"))
            .ok()
            .and_then(|caster| caster.cast("8080").ok());
        assert!(matches!(
            value,
            Some(Value::Custom(ref custom)) if custom.downcast_ref::<u16>() == Some(&8080)
        ));
    }

    #[test]
    fn test_unregistered_kind() {
        let casts = Casts::new();
        assert!(casts.is_empty());
        let registry = Registry::new(&casts);

        let err = registry.caster(&Kind::custom("base64")).err();
        assert!(matches!(
            err,
            Some(ConfigError::UnregisteredType { kind }) if kind == Kind::custom("base64")
        ));

        let err = registry
            .caster(&Kind::sequence_of(Kind::custom("base64")))
            .err();
        assert!(matches!(
            err,
            Some(ConfigError::UnregisteredType { kind }) if kind == Kind::custom("base64")
        ));
    }
}
