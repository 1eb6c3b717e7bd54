//! Config resolver: resolves every declared field of a schema in one pass.

use crate::error::{CastError, ConfigError};
use crate::field::{FieldDecl, FieldDefault, Presence};
use crate::kind::Kind;
use crate::lookup::Lookup;
use crate::registry::{Casts, Registry};
use crate::resolved::ResolvedConfig;
use crate::schema::Schema;
use crate::source::{EnvSource, Source};
use crate::typed::TypedConfig;
use crate::value::Value;
use std::collections::HashSet;

/// Resolves a [`Schema`] against a [`Source`].
///
/// Fields whose name starts with `_` or that are listed with
/// [`Loader::ignore`] are never looked up. Every other field ends up in the
/// result, or the whole load fails.
pub struct Loader {
    /// Fields to resolve
    schema: Schema,
    /// Caller-supplied casters, consulted before the built-ins
    casts: Casts,
    /// Field names to skip
    ignored: HashSet<String>,
    /// Backing store
    source: Box<dyn Source>,
}

impl Loader {
    /// Resolve `schema` against the process environment.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            casts: Casts::new(),
            ignored: HashSet::new(),
            source: Box::new(EnvSource::new()),
        }
    }

    /// Add caller-supplied casters; they replace built-ins and earlier
    /// casters for the same kind.
    #[must_use]
    pub fn casts(mut self, casts: Casts) -> Self {
        self.casts.merge(casts);
        self
    }

    /// Add a single caller-supplied caster.
    #[must_use]
    pub fn cast<F>(mut self, kind: Kind, cast: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastError> + Send + Sync + 'static,
    {
        self.casts = self.casts.with(kind, cast);
        self
    }

    /// Skip the named fields in addition to underscore-prefixed ones.
    #[must_use]
    pub fn ignore<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Read values from `source` instead of the process environment.
    #[must_use]
    pub fn source(mut self, source: impl Source + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Schema being resolved.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Whether the field called `name` is skipped.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        name.starts_with('_') || self.ignored.contains(name)
    }

    /// Resolve every field.
    ///
    /// # Errors
    ///
    /// Returns the first error hit, in declaration order:
    /// [`ConfigError::UndefinedValue`] for a missing required key,
    /// [`ConfigError::UnregisteredType`] when a field without a default, or a
    /// value that must be cast, has no caster, and [`ConfigError::Cast`] for a
    /// malformed value.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let registry = Registry::new(&self.casts);
        let lookup = Lookup::new(self.source.as_ref());
        let mut resolved = ResolvedConfig::default();

        tracing::debug!(
            config = self.schema.name(),
            source = self.source.name(),
            fields = self.schema.fields().len(),
            "resolving configuration"
        );

        for field in self.schema.fields() {
            let name = field.name();
            if self.is_ignored(name) {
                tracing::trace!(field = name, "skipping field");
                resolved.skip(name, retained_default(field, &registry));
                continue;
            }

            // Without a default, a missing caster fails before the key is read.
            let required = match field.presence() {
                Presence::Required => Some(registry.caster(field.kind())?),
                Presence::WithDefault(_) | Presence::OptionalNoDefault => None,
            };

            let key = self.schema.key_for(field);
            let value = lookup.resolve(&key, field.fallback(), |raw| {
                if field.is_nullable() && raw.is_empty() {
                    return Ok(Value::Absent);
                }
                let caster = match required {
                    Some(caster) => caster,
                    None => registry.caster(field.kind())?,
                };
                caster.cast(raw).map_err(|source| ConfigError::Cast {
                    key: key.clone(),
                    kind: field.kind().clone(),
                    source,
                })
            })?;

            tracing::debug!(field = name, key = %key, "field resolved");
            resolved.insert(name, value);
        }

        tracing::debug!(
            config = self.schema.name(),
            resolved = resolved.len(),
            skipped = resolved.skipped().len(),
            "configuration resolved"
        );
        Ok(resolved)
    }

    /// Resolve every field and build `T` from the result.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Loader::resolve`] or [`TypedConfig::from_resolved`].
    pub fn load<T: TypedConfig>(&self) -> Result<T, ConfigError> {
        T::from_resolved(&self.resolve()?)
    }
}

/// Default kept for a skipped field so typed structs can still be built.
///
/// Literal defaults are cast here; a default that cannot be cast is dropped
/// rather than failing the load, since the field is never read.
fn retained_default(field: &FieldDecl, registry: &Registry<'_>) -> Option<Value> {
    let raw = match field.presence() {
        Presence::Required => return None,
        Presence::OptionalNoDefault => return Some(Value::Absent),
        Presence::WithDefault(FieldDefault::Resolved(value)) => return Some(value.clone()),
        Presence::WithDefault(FieldDefault::Raw(raw)) => raw,
    };
    if field.is_nullable() && raw.is_empty() {
        return Some(Value::Absent);
    }

    let cast = registry
        .caster(field.kind())
        .and_then(|caster| {
            caster.cast(raw).map_err(|source| ConfigError::Cast {
                key: field.lookup_key().to_string(),
                kind: field.kind().clone(),
                source,
            })
        });
    match cast {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(field = field.name(), error = %err, "default of skipped field dropped");
            None
        }
    }
}
