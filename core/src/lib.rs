//! Typed configuration loader
//!
//! Declares configuration as a set of typed fields, looks each one up by key
//! in a [`Source`] (the process environment, a `.env` file, a TOML file or any
//! combination), casts the raw text to the declared [`Kind`] and reports the
//! first missing or malformed value as a [`ConfigError`].
//!
//! ```ignore
//! use typed_config::{Kind, Loader, TypedConfig};
//!
//! typed_config::typed_config! {
//!     pub struct AppConfig {
//!         pub workers: i64 = 4,
//!         pub debug: bool = false,
//!         pub database_url: String,
//!         pub replicas: Option<Vec<String>>,
//!     }
//! }
//!
//! let config = AppConfig::loader()
//!     .source(typed_config::Layered::auto(".")?)
//!     .load::<AppConfig>()?;
//! ```

pub mod cast;
pub mod error;
pub mod field;
pub mod kind;
pub mod loader;
pub mod lookup;
pub mod registry;
pub mod resolved;
pub mod schema;
pub mod source;
pub mod typed;
pub mod value;

mod macros;

pub use cast::Caster;

pub use error::{CastError, ConfigError};

pub use field::{FieldDecl, FieldDefault, Presence};

pub use kind::Kind;

pub use loader::Loader;

pub use lookup::Lookup;

pub use registry::{Casts, Registry};

pub use resolved::ResolvedConfig;

pub use schema::Schema;

pub use source::{DotEnvSource, EnvSource, Layered, MapSource, Source, TomlSource};

pub use typed::{Bytes, ConfigType, IntoFieldDefault, TypedConfig};

pub use value::{Complex, CustomValue, ParseComplexError, Value};
