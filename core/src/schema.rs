//! Schemas: the ordered field list of a configuration type.

use crate::field::FieldDecl;
use crate::kind::Kind;

/// Ordered list of field declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Name of the configuration type, used in log events
    name: String,
    /// Prefix prepended to every key
    prefix: String,
    /// Fields in declaration order
    fields: Vec<FieldDecl>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Prepend `prefix` to every key looked up for this schema.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append a field declaration.
    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a required field of the given kind.
    #[must_use]
    pub fn required(self, name: impl Into<String>, kind: Kind) -> Self {
        self.field(FieldDecl::new(name, kind))
    }

    /// Append an optional field of the given kind.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, kind: Kind) -> Self {
        self.field(FieldDecl::new(name, kind).optional())
    }

    /// Append a field with a literal default.
    #[must_use]
    pub fn defaulted(self, name: impl Into<String>, kind: Kind, raw: impl Into<String>) -> Self {
        self.field(FieldDecl::new(name, kind).default_raw(raw))
    }

    /// Name of the configuration type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Declaration for the field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Full key looked up for `field`, including the prefix.
    #[must_use]
    pub fn key_for(&self, field: &FieldDecl) -> String {
        format!("{}{}", self.prefix, field.lookup_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_keeps_declaration_order() {
        let schema = Schema::new("BasicConfig")
            .required("INTEGER", Kind::Integer)
            .optional("MAYBE", Kind::Integer)
            .defaulted("DEFAULT", Kind::Real, "5.8");

        let names: Vec<&str> = schema.fields().iter().map(FieldDecl::name).collect();
        assert_eq!(names, vec!["INTEGER", "MAYBE", "DEFAULT"]);
        assert_eq!(schema.name(), "BasicConfig");
        assert!(schema.get("MAYBE").is_some_and(FieldDecl::is_nullable));
        assert!(schema.get("MISSING").is_none());
    }

    #[test]
    fn test_prefix_applies_to_keys() {
        let schema = Schema::new("App")
            .prefix("APP_")
            .field(FieldDecl::new("port", Kind::Integer).key("PORT"));
        let field = schema.get("port");
        assert_eq!(field.map(|f| schema.key_for(f)), Some("APP_PORT".to_string()));
    }
}
