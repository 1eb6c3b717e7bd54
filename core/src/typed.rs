//! Typed configuration structs.
//!
//! [`ConfigType`] connects a Rust type to the [`Kind`] it is declared with and
//! converts resolved values back; [`TypedConfig`] is implemented by structs
//! declared with [`crate::typed_config!`].

use crate::error::ConfigError;
use crate::field::{FieldDecl, FieldDefault};
use crate::kind::Kind;
use crate::loader::Loader;
use crate::resolved::ResolvedConfig;
use crate::schema::Schema;
use crate::value::{Complex, Value};
use std::path::PathBuf;

/// A Rust type that a configuration field can be declared with.
pub trait ConfigType: Sized {
    /// Kind used to pick the caster.
    fn kind() -> Kind;

    /// Whether the type accepts the absence sentinel.
    fn nullable() -> bool {
        false
    }

    /// Convert a resolved value, handing it back if it has the wrong variant.
    ///
    /// # Errors
    ///
    /// Returns the value unchanged when it cannot be converted.
    fn from_value(value: Value) -> Result<Self, Value>;

    /// Value for a field that was skipped and has no retained default.
    ///
    /// Built-in types use their `Default` (zero, `false`, empty), `Option<T>`
    /// uses `None`. Returning `None` here makes skipping such a field an
    /// error.
    fn when_skipped() -> Option<Self> {
        None
    }
}

/// Byte sequence field type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Implement [`ConfigType`] for a type held directly by one `Value` variant.
macro_rules! scalar_config_type {
    ($ty:ty, $kind:expr, $pattern:pat => $out:expr) => {
        impl ConfigType for $ty {
            fn kind() -> Kind {
                $kind
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    $pattern => Ok($out),
                    other => Err(other),
                }
            }

            fn when_skipped() -> Option<Self> {
                Some(Self::default())
            }
        }
    };
}

scalar_config_type!(i64, Kind::Integer, Value::Integer(n) => n);
scalar_config_type!(f64, Kind::Real, Value::Real(x) => x);
scalar_config_type!(Complex, Kind::Complex, Value::Complex(c) => c);
scalar_config_type!(bool, Kind::Boolean, Value::Boolean(b) => b);
scalar_config_type!(String, Kind::Str, Value::Str(s) => s);
scalar_config_type!(Bytes, Kind::Bytes, Value::Bytes(bytes) => Bytes(bytes));
scalar_config_type!(PathBuf, Kind::Path, Value::Path(path) => path);

impl<T: ConfigType> ConfigType for Vec<T> {
    fn kind() -> Kind {
        Kind::sequence_of(T::kind())
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        let Value::Sequence(items) = value else {
            return Err(value);
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(T::from_value(item)?);
        }
        Ok(out)
    }

    fn when_skipped() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<T: ConfigType> ConfigType for Option<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn nullable() -> bool {
        true
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Absent => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn when_skipped() -> Option<Self> {
        Some(None)
    }
}

/// Conversion of a declared default into a [`FieldDefault`].
///
/// Literals become raw defaults that go through the field's caster, so
/// `" 4, 100, 12"` is a valid default for a `Vec<i64>`. A [`Value`] is used
/// as-is.
pub trait IntoFieldDefault {
    /// Convert into a field default.
    fn into_field_default(self) -> FieldDefault;
}

impl IntoFieldDefault for FieldDefault {
    fn into_field_default(self) -> FieldDefault {
        self
    }
}

impl IntoFieldDefault for Value {
    fn into_field_default(self) -> FieldDefault {
        FieldDefault::Resolved(self)
    }
}

impl IntoFieldDefault for &str {
    fn into_field_default(self) -> FieldDefault {
        FieldDefault::Raw(self.to_string())
    }
}

impl IntoFieldDefault for String {
    fn into_field_default(self) -> FieldDefault {
        FieldDefault::Raw(self)
    }
}

/// Implement [`IntoFieldDefault`] for literals that round-trip through text.
macro_rules! literal_default {
    ($($ty:ty),*) => {
        $(
            impl IntoFieldDefault for $ty {
                fn into_field_default(self) -> FieldDefault {
                    FieldDefault::Raw(self.to_string())
                }
            }
        )*
    };
}

literal_default!(i32, i64, u16, u32, u64, f64, bool);

/// Declaration of a field of type `T` keyed by the upper-cased `name`.
#[must_use]
pub fn declare<T: ConfigType>(name: &str, default: Option<FieldDefault>) -> FieldDecl {
    let mut field = FieldDecl::new(name, T::kind()).key(name.to_uppercase());
    if let Some(default) = default {
        field = field.with_default(default);
    }
    if T::nullable() {
        field = field.optional();
    }
    field
}

/// A struct whose fields are loaded from configuration.
///
/// Usually implemented with [`crate::typed_config!`].
#[allow(clippy::module_name_repetitions)]
pub trait TypedConfig: Sized {
    /// Field declarations, in order.
    fn schema() -> Schema;

    /// Build the struct from resolved values.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong variant or a skipped field
    /// has nothing to fall back on.
    fn from_resolved(resolved: &ResolvedConfig) -> Result<Self, ConfigError>;

    /// Loader for this type, reading the process environment by default.
    #[must_use]
    fn loader() -> Loader {
        Loader::new(Self::schema())
    }

    /// Load from the process environment with the built-in casters.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while resolving a field.
    fn load() -> Result<Self, ConfigError> {
        Self::loader().load()
    }
}
