//! Resolved configuration values.

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// A value produced by a caster, or the absence sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value
    Integer(i64),
    /// Floating point value
    Real(f64),
    /// Complex value
    Complex(Complex),
    /// Boolean value
    Boolean(bool),
    /// Text value
    Str(String),
    /// Byte sequence
    Bytes(Vec<u8>),
    /// Filesystem path
    Path(PathBuf),
    /// Sequence of values
    Sequence(Vec<Value>),
    /// Value produced by a caster for a custom kind
    Custom(CustomValue),
    /// Optional field with no value
    Absent,
}

impl Value {
    /// Whether this is the absence sentinel.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Short description of the variant, used in type mismatch errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Integer(_) => "integer".to_string(),
            Self::Real(_) => "real".to_string(),
            Self::Complex(_) => "complex".to_string(),
            Self::Boolean(_) => "boolean".to_string(),
            Self::Str(_) => "string".to_string(),
            Self::Bytes(_) => "bytes".to_string(),
            Self::Path(_) => "path".to_string(),
            Self::Sequence(_) => "sequence".to_string(),
            Self::Custom(custom) => format!("custom:{}", custom.tag()),
            Self::Absent => "absent".to_string(),
        }
    }

    /// Wrap a user-defined value under the given tag.
    #[must_use]
    pub fn custom<T: Any + Send + Sync>(tag: impl Into<String>, value: T) -> Self {
        Self::Custom(CustomValue::new(tag, value))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Real(x) => serializer.serialize_f64(*x),
            Self::Complex(c) => c.serialize(serializer),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Self::Path(path) => serializer.serialize_str(&path.to_string_lossy()),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Custom(custom) => serializer.serialize_str(&format!("<{}>", custom.tag())),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

/// Complex number.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Complex {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex {
    /// Create a complex number from its parts.
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}-{}j", self.re, -self.im)
        } else {
            write!(f, "{}+{}j", self.re, self.im)
        }
    }
}

/// Error returned when a string is not a complex number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid complex number: {0:?}")]
pub struct ParseComplexError(String);

impl FromStr for Complex {
    type Err = ParseComplexError;

    /// Parse `3`, `4j`, `j`, `3+4j`, `-2.5e3-1j` or the same wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseComplexError(s.to_string());

        let mut text = s.trim();
        if let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            text = inner.trim();
        }
        if text.is_empty() {
            return Err(invalid());
        }

        let Some(body) = text.strip_suffix(['j', 'J']) else {
            let re = text.parse::<f64>().map_err(|_| invalid())?;
            return Ok(Self::new(re, 0.0));
        };

        // The imaginary part starts at the last sign that is not an exponent sign.
        let split = body
            .char_indices()
            .filter(|&(i, c)| {
                i > 0
                    && (c == '+' || c == '-')
                    && body.get(..i).is_some_and(|head| !head.ends_with(['e', 'E']))
            })
            .map(|(i, _)| i)
            .last();

        let (re_text, im_text) = split.map_or(("", body), |i| body.split_at(i));
        let re = if re_text.is_empty() {
            0.0
        } else {
            re_text.parse::<f64>().map_err(|_| invalid())?
        };
        let im = match im_text {
            "" | "+" => 1.0,
            "-" => -1.0,
            other => other.parse::<f64>().map_err(|_| invalid())?,
        };

        Ok(Self::new(re, im))
    }
}

/// Value of a user-defined kind.
///
/// Holds the caster's output behind an `Arc<dyn Any>` tagged with the kind's
/// tag; read it back with [`CustomValue::downcast_ref`].
#[derive(Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct CustomValue {
    /// Tag of the custom kind that produced this value
    tag: String,
    /// The caster's output
    inner: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    /// Wrap a value under the given tag.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(tag: impl Into<String>, value: T) -> Self {
        Self {
            tag: tag.into(),
            inner: Arc::new(value),
        }
    }

    /// Tag of the custom kind.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Borrow the inner value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && Arc::ptr_eq(&self.inner, &other.inner)
    }
}
