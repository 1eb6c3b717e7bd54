//! Value kinds that configuration fields can be declared with.

use std::fmt;

/// The declared type of a configuration field.
///
/// Used as the key of the caster registry. `Custom` kinds are identified by a
/// stable tag chosen by the caller and only resolve when a caster for that tag
/// is supplied at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Signed 64-bit integer
    Integer,
    /// 64-bit floating point number
    Real,
    /// Complex number in `a+bj` notation
    Complex,
    /// Boolean flag
    Boolean,
    /// Text, passed through unchanged
    Str,
    /// Byte sequence
    Bytes,
    /// Filesystem path
    Path,
    /// Comma-separated sequence of the inner kind
    Sequence(Box<Kind>),
    /// User-defined kind identified by a tag
    Custom(String),
}

impl Kind {
    /// Sequence of the given element kind.
    #[must_use]
    pub fn sequence_of(element: Self) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// User-defined kind with the given tag.
    #[must_use]
    pub fn custom(tag: impl Into<String>) -> Self {
        Self::Custom(tag.into())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::Complex => write!(f, "complex"),
            Self::Boolean => write!(f, "boolean"),
            Self::Str => write!(f, "string"),
            Self::Bytes => write!(f, "bytes"),
            Self::Path => write!(f, "path"),
            Self::Sequence(inner) => write!(f, "sequence<{inner}>"),
            Self::Custom(tag) => write!(f, "custom:{tag}"),
        }
    }
}
