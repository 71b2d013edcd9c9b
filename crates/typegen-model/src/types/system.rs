use std::collections::HashSet;

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::definition::{TypeDefinition, TypeKind};

/// The full set of type definitions sharing one namespace.
///
/// Immutable input to generation. Build it with [`TypeSystem::new`] (or
/// deserialize it) so union-component flags are computed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTypeSystem")]
pub struct TypeSystem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub types: Vec<TypeDefinition>,
}

impl TypeSystem {
    pub fn new(namespace: Option<String>, types: Vec<TypeDefinition>) -> Self {
        let mut system = Self { namespace, types };
        system.mark_union_components();
        system
    }

    /// Flag every record listed as an arm of some other union.
    ///
    /// Matches component names exactly. Flags already set on input are kept.
    fn mark_union_components(&mut self) {
        let mut arms: HashSet<String> = HashSet::new();
        for def in &self.types {
            if let TypeKind::Union { components } = &def.kind {
                arms.extend(components.iter().filter(|c| **c != def.name).cloned());
            }
        }

        for def in &mut self.types {
            if matches!(def.kind, TypeKind::Record { .. }) && arms.contains(&def.name) {
                def.is_union_component_only = true;
            }
        }
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }

    /// First union that lists `name` among its components.
    pub fn union_containing(&self, name: &str) -> Option<&TypeDefinition> {
        self.types
            .iter()
            .find(|t| t.name != name && t.union_components().iter().any(|c| c == name))
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
struct RawTypeSystem {
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    types: Vec<TypeDefinition>,
}

impl From<RawTypeSystem> for TypeSystem {
    fn from(raw: RawTypeSystem) -> Self {
        TypeSystem::new(raw.namespace, raw.types)
    }
}

impl JsonSchema for TypeSystem {
    fn schema_name() -> String {
        "TypeSystem".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        RawTypeSystem::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::property::{PropertyDefinition, PropertyType};

    fn cursor_system() -> TypeSystem {
        TypeSystem::new(
            Some("com.example".to_string()),
            vec![
                TypeDefinition::record(
                    "CursorStateWithPosition",
                    vec![PropertyDefinition::required(
                        "position",
                        PropertyType::reference("Position"),
                    )],
                ),
                TypeDefinition::record(
                    "CursorStateWithRange",
                    vec![PropertyDefinition::required(
                        "range",
                        PropertyType::reference("Range"),
                    )],
                ),
                TypeDefinition::union(
                    "CursorState",
                    ["CursorStateWithPosition", "CursorStateWithRange"],
                ),
                TypeDefinition::record("CursorStateWithPositionExtra", vec![]),
            ],
        )
    }

    #[test]
    fn test_marks_union_components() {
        let system = cursor_system();
        assert!(system.get("CursorStateWithPosition").unwrap().is_union_component_only);
        assert!(system.get("CursorStateWithRange").unwrap().is_union_component_only);
        assert!(!system.get("CursorState").unwrap().is_union_component_only);
    }

    #[test]
    fn test_component_match_is_exact_not_substring() {
        let system = cursor_system();
        assert!(
            !system
                .get("CursorStateWithPositionExtra")
                .unwrap()
                .is_union_component_only
        );
    }

    #[test]
    fn test_marking_does_not_depend_on_naming_convention() {
        let system = TypeSystem::new(
            None,
            vec![
                TypeDefinition::record("Circle", vec![]),
                TypeDefinition::record("Square", vec![]),
                TypeDefinition::union("Shape", ["Circle", "Square"]),
            ],
        );
        assert!(system.get("Circle").unwrap().is_union_component_only);
        assert!(system.get("Square").unwrap().is_union_component_only);
    }

    #[test]
    fn test_nested_union_is_not_marked() {
        let system = TypeSystem::new(
            None,
            vec![
                TypeDefinition::record("A", vec![]),
                TypeDefinition::union("Inner", ["A"]),
                TypeDefinition::union("Outer", ["Inner"]),
            ],
        );
        assert!(!system.get("Inner").unwrap().is_union_component_only);
        assert!(system.get("A").unwrap().is_union_component_only);
    }

    #[test]
    fn test_union_containing() {
        let system = cursor_system();
        assert_eq!(
            system
                .union_containing("CursorStateWithRange")
                .map(|u| u.name.as_str()),
            Some("CursorState")
        );
        assert!(system.union_containing("Position").is_none());
    }

    #[test]
    fn test_deserialize_computes_flags() {
        let json = serde_json::json!({
            "namespace": "ns",
            "types": [
                { "name": "A", "properties": [] },
                { "name": "U", "isUnionType": true, "parentType": "A" }
            ]
        });
        let system: TypeSystem = serde_json::from_value(json).unwrap();
        assert_eq!(system.namespace.as_deref(), Some("ns"));
        assert!(system.get("A").unwrap().is_union_component_only);
    }

    #[test]
    fn test_explicit_flag_is_kept() {
        let json = serde_json::json!({
            "types": [ { "name": "Lonely", "isUnionComponentOnly": true } ]
        });
        let system: TypeSystem = serde_json::from_value(json).unwrap();
        assert!(system.get("Lonely").unwrap().is_union_component_only);
    }

    #[test]
    fn test_empty_system() {
        let system = TypeSystem::default();
        assert!(system.is_empty());
        assert_eq!(system.len(), 0);
        assert!(system.namespace.is_none());
    }
}
