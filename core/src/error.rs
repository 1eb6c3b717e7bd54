//! Error types for configuration loading.

use crate::kind::Kind;
use std::path::PathBuf;

/// Error returned by a caster when a raw string cannot be converted.
#[allow(clippy::module_name_repetitions)]
pub type CastError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Configuration error type.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ConfigError {
    /// No caster is registered for the requested kind.
    #[error("no caster registered for type {kind}")]
    UnregisteredType {
        /// The kind that has no caster.
        kind: Kind,
    },

    /// A required key was not found and no default was declared.
    #[error("{key} not found. Declare it as envvar or define a default value.")]
    UndefinedValue {
        /// The key that was looked up.
        key: String,
    },

    /// A value was found but the caster rejected it.
    #[error("failed to cast {key} as {kind}: {source}")]
    Cast {
        /// The key whose value failed to cast.
        key: String,
        /// The kind the value was cast to.
        kind: Kind,
        /// The caster's error.
        #[source]
        source: CastError,
    },

    /// A resolved value does not have the variant the typed field expects.
    #[error("field {field} expected {expected}, found {found}")]
    TypeMismatch {
        /// The field name.
        field: String,
        /// The kind the field was declared with.
        expected: Kind,
        /// Description of the value that was found.
        found: String,
    },

    /// A typed field was skipped during resolution and has nothing to fall back on.
    #[error("field {field} was skipped and has no pre-resolved default")]
    Skipped {
        /// The field name.
        field: String,
    },

    /// A source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A `.env` file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    DotEnv {
        /// The file path.
        path: PathBuf,
        /// The parser error.
        #[source]
        source: dotenvy::Error,
    },

    /// A TOML file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Toml {
        /// The file path.
        path: PathBuf,
        /// The parser error.
        #[source]
        source: toml::de::Error,
    },
}
