//! Field declarations.

use crate::kind::Kind;
use crate::value::Value;

/// Default declared for a field.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum FieldDefault {
    /// Literal text, cast exactly like a value read from a source.
    Raw(String),
    /// Value that is already typed and is used as-is.
    Resolved(Value),
}

/// How a field behaves when its key is missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// No default; a missing key fails the load.
    Required,
    /// Falls back to the declared default.
    WithDefault(FieldDefault),
    /// Optional type with no declared default; falls back to [`Value::Absent`].
    OptionalNoDefault,
}

/// A declared configuration field.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct FieldDecl {
    /// Declared field name
    name: String,
    /// Key looked up in the source, before any schema prefix
    key: String,
    /// Declared kind, with any optional wrapper removed
    kind: Kind,
    /// Whether the declared type is optional
    nullable: bool,
    /// Fallback behaviour
    presence: Presence,
}

impl FieldDecl {
    /// Declare a required field whose key is its name.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            kind,
            nullable: false,
            presence: Presence::Required,
        }
    }

    /// Mark the field's type as optional.
    ///
    /// Without a default the field falls back to [`Value::Absent`]; with one,
    /// the default still applies.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.nullable = true;
        if self.presence == Presence::Required {
            self.presence = Presence::OptionalNoDefault;
        }
        self
    }

    /// Use a literal default, cast like a source value.
    #[must_use]
    pub fn default_raw(self, raw: impl Into<String>) -> Self {
        self.with_default(FieldDefault::Raw(raw.into()))
    }

    /// Use an already typed default.
    #[must_use]
    pub fn default_value(self, value: Value) -> Self {
        self.with_default(FieldDefault::Resolved(value))
    }

    /// Use the given default.
    #[must_use]
    pub fn with_default(mut self, default: FieldDefault) -> Self {
        self.presence = Presence::WithDefault(default);
        self
    }

    /// Look the field up under `key` instead of its name.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Declared field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key looked up in the source, before any schema prefix.
    #[must_use]
    pub fn lookup_key(&self) -> &str {
        &self.key
    }

    /// Declared kind.
    #[must_use]
    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Whether the declared type is optional.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Fallback behaviour.
    #[must_use]
    pub const fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Default to fall back on when the key is missing, if any.
    #[must_use]
    pub fn fallback(&self) -> Option<FieldDefault> {
        match &self.presence {
            Presence::Required => None,
            Presence::WithDefault(default) => Some(default.clone()),
            Presence::OptionalNoDefault => Some(FieldDefault::Resolved(Value::Absent)),
        }
    }
}
