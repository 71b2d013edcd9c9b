use std::path::Path;

use crate::schema_def::{generate_type_system_schema, validate_against_schema};
use crate::types::error::{ErrorEntry, E_PARSE_ERROR};
use crate::types::system::TypeSystem;

/// File name suffix of serialized type systems
pub const TYPE_FILE_SUFFIX: &str = ".types.json";

/// Parse a serialized type system.
///
/// The document is checked against the generated JSON Schema first so that
/// every structural problem is reported, not only the first one serde hits.
pub fn parse_type_system(content: &str, file_path: &str) -> Result<TypeSystem, Vec<ErrorEntry>> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| vec![serde_error_to_entry(e, file_path)])?;

    let schema = generate_type_system_schema();
    let violations = validate_against_schema(&value, &schema, file_path);
    if !violations.is_empty() {
        return Err(violations);
    }

    serde_json::from_value(value).map_err(|e| vec![serde_error_to_entry(e, file_path)])
}

/// Whether a path looks like a serialized type system (`*.types.json`)
pub fn is_type_file(file_path: &Path) -> bool {
    file_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(TYPE_FILE_SUFFIX))
}

/// Short name of a type file: `chat.types.json` -> `chat`
pub fn type_file_stem(file_path: &Path) -> Option<String> {
    let name = file_path.file_name()?.to_str()?;
    let stem = name
        .strip_suffix(TYPE_FILE_SUFFIX)
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(name);
    Some(stem.to_string())
}

/// Convert a serde_json error into a structured ErrorEntry
fn serde_error_to_entry(err: serde_json::Error, file_path: &str) -> ErrorEntry {
    let line = err.line();
    let col = err.column();
    let path = format!("$.line:{line}:col:{col}");

    ErrorEntry::error(
        E_PARSE_ERROR,
        format!("JSON parse error: {err}"),
        file_path,
        &path,
    )
    .with_suggestion("Check JSON syntax and field types")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::error::E_SCHEMA_VIOLATION;
    use crate::types::property::PropertyType;

    #[test]
    fn test_parse_valid_system() {
        let json = r#"{
            "namespace": "com.example.chat",
            "types": [
                {
                    "name": "QuickActionCommand",
                    "properties": [
                        { "name": "command", "type": { "kind": "primitive", "typeName": "string" }, "isRequired": true },
                        { "name": "arguments", "type": { "kind": "array", "elementType": { "kind": "primitive", "typeName": "any" } }, "isRequired": false }
                    ]
                }
            ]
        }"#;

        let system = parse_type_system(json, "chat.types.json").unwrap();
        assert_eq!(system.namespace.as_deref(), Some("com.example.chat"));
        let def = system.get("QuickActionCommand").unwrap();
        assert_eq!(
            def.properties()[1].ty,
            PropertyType::array(PropertyType::primitive("any"))
        );
    }

    #[test]
    fn test_parse_ignores_component_flag_on_enums() {
        let json = r#"{
            "types": [
                { "name": "Level", "isEnum": true, "enumValues": ["a"], "isUnionComponentOnly": true }
            ]
        }"#;
        let system = parse_type_system(json, "level.types.json").unwrap();
        let level = system.get("Level").unwrap();
        assert!(level.is_enum());
        assert!(!level.is_union_component_only);
    }

    #[test]
    fn test_parse_invalid_json() {
        let errors = parse_type_system("{ not json", "bad.types.json").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, E_PARSE_ERROR);
        assert_eq!(errors[0].file, "bad.types.json");
        assert!(errors[0].suggestion.is_some());
    }

    #[test]
    fn test_parse_schema_violation() {
        let json = r#"{ "types": [ { "properties": [] } ] }"#;
        let errors = parse_type_system(json, "noname.types.json").unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(errors[0].code, E_SCHEMA_VIOLATION);
    }

    #[test]
    fn test_is_type_file() {
        assert!(is_type_file(Path::new("defs/chat.types.json")));
        assert!(!is_type_file(Path::new("defs/chat.json")));
        assert!(!is_type_file(Path::new("typegen.config.json")));
    }

    #[test]
    fn test_type_file_stem() {
        assert_eq!(
            type_file_stem(Path::new("a/chat.types.json")).as_deref(),
            Some("chat")
        );
        assert_eq!(type_file_stem(Path::new("lsp.json")).as_deref(), Some("lsp"));
    }
}
