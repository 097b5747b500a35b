//! Column type resolution.
//!
//! Schema type strings resolve first against a fixed builtin table, then
//! against enum types registered by the generator during the current run.

use crate::codegen::go::GoType;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Leading word characters, optionally followed by a parenthesized group,
/// e.g. `varchar(255)`. The group content is not validated.
static PRIME_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(\([^)]*\))?").expect("prime type pattern is valid"));

/// Go type for a builtin schema type name.
///
/// `tinyint(1)` is matched literally and maps to `bool`, while any other
/// `tinyint` maps to `int`.
pub fn builtin_type(name: &str) -> Option<GoType> {
    let ty = match name {
        "int" => GoType::Builtin("int"),
        "int8" => GoType::Builtin("int8"),
        "int16" => GoType::Builtin("int16"),
        "int32" => GoType::Builtin("int32"),
        "int64" => GoType::Builtin("int64"),
        "smallint" => GoType::Builtin("int16"),
        "tinyint" => GoType::Builtin("int"),
        "tinyint(1)" => GoType::Builtin("bool"),
        "bigint" => GoType::Builtin("int64"),
        "uint" => GoType::Builtin("uint"),
        "uint8" => GoType::Builtin("uint8"),
        "uint16" => GoType::Builtin("uint16"),
        "uint32" => GoType::Builtin("uint32"),
        "uint64" => GoType::Builtin("uint64"),
        "float" => GoType::Builtin("float64"),
        "float32" => GoType::Builtin("float32"),
        "float64" => GoType::Builtin("float64"),
        "bool" => GoType::Builtin("bool"),
        "text" | "varchar" | "char" | "longtext" | "json" => GoType::Builtin("string"),
        "byte" => GoType::Builtin("byte"),
        "rune" => GoType::Builtin("rune"),
        "timestamp" => GoType::Builtin("int"),
        "datetime" => GoType::Qualified {
            package: "time",
            name: "Time",
        },
        _ => return None,
    };
    Some(ty)
}

/// The leading type token of a schema type string, `varchar(255)` -> `varchar`.
pub fn prime_type(raw: &str) -> Option<&str> {
    PRIME_TYPE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Schema type names registered at runtime, keyed by their original name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    aliases: HashMap<String, GoType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema_name: impl Into<String>, ty: GoType) {
        self.aliases.insert(schema_name.into(), ty);
    }

    pub fn contains(&self, schema_name: &str) -> bool {
        self.aliases.contains_key(schema_name)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn clear(&mut self) {
        self.aliases.clear();
    }

    /// Resolve a raw column type.
    ///
    /// Lookup order: the raw string in the builtin table, its prime token in
    /// the builtin table, then the exact raw string among registered types.
    pub fn resolve(&self, raw: &str) -> Option<GoType> {
        builtin_type(raw)
            .or_else(|| prime_type(raw).and_then(builtin_type))
            .or_else(|| self.aliases.get(raw).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let registry = TypeRegistry::new();
        let cases = [
            ("int", "int"),
            ("int8", "int8"),
            ("int16", "int16"),
            ("int32", "int32"),
            ("int64", "int64"),
            ("smallint", "int16"),
            ("tinyint", "int"),
            ("tinyint(1)", "bool"),
            ("bigint", "int64"),
            ("uint", "uint"),
            ("uint8", "uint8"),
            ("uint16", "uint16"),
            ("uint32", "uint32"),
            ("uint64", "uint64"),
            ("float", "float64"),
            ("float32", "float32"),
            ("float64", "float64"),
            ("bool", "bool"),
            ("text", "string"),
            ("varchar", "string"),
            ("char", "string"),
            ("longtext", "string"),
            ("json", "string"),
            ("byte", "byte"),
            ("rune", "rune"),
            ("timestamp", "int"),
            ("datetime", "time.Time"),
        ];

        for (raw, expected) in cases {
            let ty = registry.resolve(raw).unwrap_or_else(|| panic!("{} should resolve", raw));
            assert_eq!(ty.to_string(), expected, "resolving {}", raw);
        }
    }

    #[test]
    fn test_tinyint_one_differs_from_tinyint() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.resolve("tinyint(1)"), Some(GoType::Builtin("bool")));
        assert_eq!(registry.resolve("tinyint"), Some(GoType::Builtin("int")));
        assert_eq!(registry.resolve("tinyint(4)"), Some(GoType::Builtin("int")));
    }

    #[test]
    fn test_parameterized_types_use_prime_token() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.resolve("varchar(255)"), Some(GoType::Builtin("string")));
        assert_eq!(registry.resolve("char(n)"), Some(GoType::Builtin("string")));
        assert_eq!(prime_type("decimal(10,2)"), Some("decimal"));
    }

    #[test]
    fn test_unknown_type_fails() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.resolve("widget"), None);
        assert_eq!(registry.resolve(""), None);
    }

    #[test]
    fn test_registered_enum_resolves_by_exact_name() {
        let mut registry = TypeRegistry::new();
        registry.register("user role", GoType::named("UserRole"));

        assert_eq!(registry.resolve("user role"), Some(GoType::named("UserRole")));
        assert_eq!(registry.resolve("user"), None);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve("user role"), None);
    }
}
