//! Declarative syntax for typed configuration structs.

/// Declare a configuration struct and implement [`crate::TypedConfig`] for it.
///
/// Each field is written `name: Type` or `name: Type = default`. The key
/// looked up for a field is its name in upper case. `Option<T>` fields fall
/// back to `None`; fields with a default fall back to it; every other field
/// is required. Defaults are literals cast like source values (so
/// `" 4, 100, 12"` works for a `Vec<i64>`) or a [`crate::Value`] that is used
/// as-is.
///
/// ```ignore
/// typed_config::typed_config! {
///     #[derive(Debug)]
///     pub struct ServerConfig {
///         /// Port to listen on
///         pub port: i64 = 8080,
///         /// Hosts allowed to connect
///         pub allowed_hosts: Vec<String> = "localhost",
///         /// Optional TLS certificate
///         pub certificate: Option<std::path::PathBuf>,
///     }
/// }
///
/// let config = ServerConfig::load()?;
/// ```
#[macro_export]
macro_rules! typed_config {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::TypedConfig for $name {
            fn schema() -> $crate::Schema {
                $crate::Schema::new(::core::stringify!($name))
                    $(
                        .field($crate::typed::declare::<$ty>(
                            ::core::stringify!($field),
                            $crate::__field_default!($($default)?),
                        ))
                    )*
            }

            fn from_resolved(
                resolved: &$crate::ResolvedConfig,
            ) -> ::core::result::Result<Self, $crate::ConfigError> {
                ::core::result::Result::Ok(Self {
                    $(
                        $field: resolved.extract::<$ty>(::core::stringify!($field))?,
                    )*
                })
            }
        }
    };
}

/// Optional default of a field declared with [`crate::typed_config!`].
#[doc(hidden)]
#[macro_export]
macro_rules! __field_default {
    () => {
        ::core::option::Option::None
    };
    ($default:expr) => {
        ::core::option::Option::Some($crate::IntoFieldDefault::into_field_default($default))
    };
}

#[cfg(test)]
mod tests {
    use crate::{
        Bytes, Complex, ConfigError, ConfigType, Kind, Layered, Loader, MapSource, TypedConfig,
        Value,
    };
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serial_test::serial;
    use std::path::PathBuf;
    use tempfile::TempDir;

    crate::typed_config! {
        #[derive(Debug)]
        struct BasicConfig {
            integer: i64,
            float: f64,
            complex: Complex,
            boolean: bool,
            string: String,
        }
    }

    crate::typed_config! {
        struct RequiredConfig {
            must_have: String,
        }
    }

    crate::typed_config! {
        struct OptionalConfig {
            maybe: Option<i64>,
        }
    }

    crate::typed_config! {
        struct DefaultConfig {
            default: f64 = 5.8,
        }
    }

    crate::typed_config! {
        struct ListConfig {
            floats: Vec<f64>,
            maybe_strings: Option<Vec<String>>,
            integers: Vec<i64> = " 4, 100, 12",
        }
    }

    crate::typed_config! {
        struct PathConfig {
            somewhere: PathBuf = "/tmp",
            bin64: Bytes,
        }
    }

    crate::typed_config! {
        struct IgnoredValueConfig {
            normal_bytes: Bytes = "hi",
            _nothing: i64,
            bin64: Bytes = Value::Bytes(b"hello world".to_vec()),
        }
    }

    /// Port number with its own caster.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Port(u16);

    impl ConfigType for Port {
        fn kind() -> Kind {
            Kind::custom("port")
        }

        fn from_value(value: Value) -> Result<Self, Value> {
            match value {
                Value::Custom(ref custom) => custom.downcast_ref::<Self>().copied().ok_or(value),
                other => Err(other),
            }
        }
    }

    crate::typed_config! {
        struct CustomConfig {
            http_port: Port,
            admin_ports: Vec<Port> = "9000, 9001",
        }
    }

    crate::typed_config! {
        struct IgnoredRawConfig {
            normal_bytes: Bytes = "hi",
            count: i64,
        }
    }

    crate::typed_config! {
        struct LayeredConfig {
            typed_config_layered_port: i64,
            typed_config_layered_hosts: Vec<String>,
            typed_config_layered_debug: bool = false,
        }
    }

    fn base64_decode(raw: &str) -> Result<Value, crate::CastError> {
        Ok(Value::Bytes(STANDARD.decode(raw.trim())?))
    }

    #[test]
    fn test_schema_from_macro() {
        let schema = ListConfig::schema();
        assert_eq!(schema.name(), "ListConfig");
        let keys: Vec<String> = schema.fields().iter().map(|f| schema.key_for(f)).collect();
        assert_eq!(keys, vec!["FLOATS", "MAYBE_STRINGS", "INTEGERS"]);
        assert!(schema.get("maybe_strings").is_some_and(crate::FieldDecl::is_nullable));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_basic_config() {
        let source = MapSource::new()
            .with("INTEGER", "6")
            .with("FLOAT", "5.6")
            .with("COMPLEX", "3+4j")
            .with("BOOLEAN", "true")
            .with("STRING", "abcdefg");

        let config: BasicConfig = BasicConfig::loader().source(source).load().unwrap();
        assert_eq!(config.integer, 6);
        assert!((config.float - 5.6).abs() < f64::EPSILON);
        assert_eq!(config.complex, Complex::new(3.0, 4.0));
        assert!(config.boolean);
        assert_eq!(config.string, "abcdefg");
    }

    #[test]
    fn test_required_config() {
        let result = RequiredConfig::loader()
            .source(MapSource::new())
            .load::<RequiredConfig>()
            .map(|config| config.must_have);
        assert_eq!(
            result.err().as_ref().map(ToString::to_string),
            Some("MUST_HAVE not found. Declare it as envvar or define a default value.".to_string())
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_optional_config() {
        let config: OptionalConfig = OptionalConfig::loader()
            .source(MapSource::new())
            .load()
            .unwrap();
        assert_eq!(config.maybe, None);

        let config: OptionalConfig = OptionalConfig::loader()
            .source(MapSource::new().with("MAYBE", "4"))
            .load()
            .unwrap();
        assert_eq!(config.maybe, Some(4));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_default_config() {
        let config: DefaultConfig = DefaultConfig::loader()
            .source(MapSource::new())
            .load()
            .unwrap();
        assert!((config.default - 5.8).abs() < f64::EPSILON);

        let config: DefaultConfig = DefaultConfig::loader()
            .source(MapSource::new().with("DEFAULT", "2"))
            .load()
            .unwrap();
        assert!((config.default - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_list_config() {
        let config: ListConfig = ListConfig::loader()
            .source(MapSource::new().with("FLOATS", "2,3.6,7"))
            .load()
            .unwrap();
        assert_eq!(config.floats, vec![2.0, 3.6, 7.0]);
        assert_eq!(config.maybe_strings, None);
        assert_eq!(config.integers, vec![4, 100, 12]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_path_config_with_caller_caster() {
        let config: PathConfig = PathConfig::loader()
            .cast(Kind::Bytes, base64_decode)
            .source(MapSource::new().with("BIN64", "aGVsbG8gd29ybGQ="))
            .load()
            .unwrap();
        assert_eq!(config.somewhere, PathBuf::from("/tmp"));
        assert_eq!(config.bin64, Bytes(b"hello world".to_vec()));
    }

    #[test]
    #[allow(clippy::unwrap_used, clippy::used_underscore_binding)]
    fn test_ignored_value_config() {
        let source = MapSource::new()
            .with("_NOTHING", "1")
            .with("BIN64", "overridden?");

        let loader = IgnoredValueConfig::loader().ignore(["bin64"]).source(source);
        let resolved = loader.resolve().unwrap();
        assert!(!resolved.contains("_nothing"));
        assert!(!resolved.contains("bin64"));

        let config: IgnoredValueConfig = loader.load().unwrap();
        assert_eq!(config.normal_bytes, Bytes(b"hi".to_vec()));
        assert_eq!(config._nothing, 0);
        assert_eq!(config.bin64, Bytes(b"hello world".to_vec()));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_ignored_fields_with_literal_default_or_none() {
        let source = MapSource::new().with("NORMAL_BYTES", "from-source");

        let config: IgnoredRawConfig = IgnoredRawConfig::loader()
            .ignore(["normal_bytes", "count"])
            .source(source)
            .load()
            .unwrap();
        assert_eq!(config.normal_bytes, Bytes(b"hi".to_vec()));
        assert_eq!(config.count, 0);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_custom_config_type() {
        let cast_port = |raw: &str| -> Result<Value, crate::CastError> {
            Ok(Value::custom("port", Port(raw.trim().parse::<u16>()?)))
        };

        let config: CustomConfig = CustomConfig::loader()
            .cast(Kind::custom("port"), cast_port)
            .source(MapSource::new().with("HTTP_PORT", "8080"))
            .load()
            .unwrap();
        assert_eq!(config.http_port, Port(8080));
        assert_eq!(config.admin_ports, vec![Port(9000), Port(9001)]);

        let result = CustomConfig::loader()
            .source(MapSource::new().with("HTTP_PORT", "8080"))
            .resolve();
        assert!(matches!(result, Err(ConfigError::UnregisteredType { .. })));
    }

    #[test]
    fn test_field_missing_from_foreign_schema() {
        let result = Loader::new(crate::Schema::new("Other").required("integer", Kind::Str))
            .source(MapSource::new().with("integer", "6"))
            .load::<RequiredConfig>();
        assert!(matches!(result, Err(ConfigError::Skipped { ref field }) if field == "must_have"));
    }

    #[test]
    #[serial]
    #[allow(clippy::unwrap_used)]
    fn test_load_from_environment() {
        unsafe {
            std::env::set_var("DEFAULT", "3.5");
        }

        let config = DefaultConfig::load().unwrap();
        assert!((config.default - 3.5).abs() < f64::EPSILON);

        unsafe {
            std::env::remove_var("DEFAULT");
        }
    }

    #[test]
    #[serial]
    #[allow(clippy::unwrap_used)]
    fn test_load_from_environment_and_dotenv() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "TYPED_CONFIG_LAYERED_PORT=8080\nTYPED_CONFIG_LAYERED_HOSTS=\"a, b\"\n",
        )
        .unwrap();
        unsafe {
            std::env::set_var("TYPED_CONFIG_LAYERED_PORT", "9090");
            std::env::set_var("TYPED_CONFIG_LAYERED_DEBUG", "on");
            std::env::remove_var("TYPED_CONFIG_LAYERED_HOSTS");
        }

        let config: LayeredConfig = LayeredConfig::loader()
            .source(Layered::auto(dir.path()).unwrap())
            .load()
            .unwrap();
        assert_eq!(config.typed_config_layered_port, 9090);
        assert_eq!(config.typed_config_layered_hosts, vec!["a", "b"]);
        assert!(config.typed_config_layered_debug);

        unsafe {
            std::env::remove_var("TYPED_CONFIG_LAYERED_PORT");
            std::env::remove_var("TYPED_CONFIG_LAYERED_DEBUG");
        }
    }
}
