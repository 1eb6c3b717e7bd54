//! Casters: functions converting a raw string into a typed [`Value`].

use crate::error::CastError;
use crate::kind::Kind;
use crate::value::{Complex, Value};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Signature shared by every caster.
#[allow(clippy::module_name_repetitions)]
pub type CastFn = dyn Fn(&str) -> Result<Value, CastError> + Send + Sync;

/// A cheaply clonable caster.
#[derive(Clone)]
pub struct Caster(Arc<CastFn>);

impl Caster {
    /// Wrap a conversion function.
    #[must_use]
    pub fn new<F>(cast: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastError> + Send + Sync + 'static,
    {
        Self(Arc::new(cast))
    }

    /// Convert a raw string.
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error when the string is rejected.
    pub fn cast(&self, raw: &str) -> Result<Value, CastError> {
        (self.0)(raw)
    }

    /// Caster for a comma-separated list whose elements are cast with `element`.
    #[must_use]
    pub fn csv(element: Self) -> Self {
        Self::new(move |raw| {
            split_csv(raw)?
                .iter()
                .map(|item| element.cast(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence)
        })
    }

    /// Built-in caster for a scalar kind.
    ///
    /// Integer, real, complex and boolean casters ignore surrounding
    /// whitespace, so `" 8080 "` is the integer 8080. Booleans match
    /// `1`/`yes`/`true`/`on` and `0`/`no`/`false`/`off`/empty without regard
    /// to case. String, bytes and path casters keep the raw text unchanged.
    ///
    /// Sequences and custom kinds have no built-in caster of their own; the
    /// registry builds sequence casters from their element caster.
    #[must_use]
    pub fn builtin(kind: &Kind) -> Option<Self> {
        let cast: fn(&str) -> Result<Value, CastError> = match kind {
            Kind::Integer => cast_integer,
            Kind::Real => cast_real,
            Kind::Complex => cast_complex,
            Kind::Boolean => cast_boolean,
            Kind::Str => |raw: &str| Ok(Value::Str(raw.to_string())),
            Kind::Bytes => |raw: &str| Ok(Value::Bytes(raw.as_bytes().to_vec())),
            Kind::Path => |raw: &str| Ok(Value::Path(PathBuf::from(raw))),
            Kind::Sequence(_) | Kind::Custom(_) => return None,
        };
        Some(Self::new(cast))
    }
}

impl fmt::Debug for Caster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Caster")
    }
}

/// Parse a signed integer, ignoring surrounding whitespace.
fn cast_integer(raw: &str) -> Result<Value, CastError> {
    Ok(Value::Integer(raw.trim().parse::<i64>()?))
}

/// Parse a floating point number, ignoring surrounding whitespace.
fn cast_real(raw: &str) -> Result<Value, CastError> {
    Ok(Value::Real(raw.trim().parse::<f64>()?))
}

/// Parse a complex number in `a+bj` notation.
fn cast_complex(raw: &str) -> Result<Value, CastError> {
    Ok(Value::Complex(raw.parse::<Complex>()?))
}

/// Parse a boolean flag.
///
/// Accepts `1`, `yes`, `true`, `on` and `0`, `no`, `false`, `off` or the empty
/// string, case-insensitively.
fn cast_boolean(raw: &str) -> Result<Value, CastError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(Value::Boolean(true)),
        "0" | "no" | "false" | "off" | "" => Ok(Value::Boolean(false)),
        _ => Err(format!("not a boolean: {raw:?}").into()),
    }
}

/// Split a comma-separated string into trimmed elements.
///
/// Single or double quotes group text containing commas and are removed.
/// A backslash escapes the next character outside quotes, and `"` or `\`
/// inside double quotes; single quotes take everything literally. Empty
/// unquoted elements are dropped, so `""` yields no elements.
///
/// # Errors
///
/// Returns an error when a quote is left unclosed or the string ends with an
/// unquoted backslash.
pub fn split_csv(raw: &str) -> Result<Vec<String>, CastError> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut quoted = false;

    let mut flush = |current: &mut String, quoted: &mut bool| {
        let item = current.trim();
        if !item.is_empty() || *quoted {
            items.push(item.to_string());
        }
        current.clear();
        *quoted = false;
    };

    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some('"') if c == '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\')) => current.push(escaped),
                Some(other) => {
                    current.push(c);
                    current.push(other);
                }
                None => current.push(c),
            },
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None if c == '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| format!("no escaped character in {raw:?}"))?;
                current.push(escaped);
            }
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                quoted = true;
            }
            None if c == ',' => flush(&mut current, &mut quoted),
            None => current.push(c),
        }
    }

    if let Some(open) = quote {
        return Err(format!("no closing quotation ({open}) in {raw:?}").into());
    }
    flush(&mut current, &mut quoted);

    Ok(items)
}
