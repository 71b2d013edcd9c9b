use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::property::PropertyDefinition;

/// Shape of a type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Ordered fields plus an optional supertype name
    Record {
        properties: Vec<PropertyDefinition>,
        parent_type: Option<String>,
    },
    /// Ordered string members
    Enum { values: Vec<String> },
    /// Ordered component type names; empty when none could be parsed
    Union { components: Vec<String> },
}

/// A named type of the type system.
///
/// The serialized form uses `isEnum` / `isUnionType` flags and a pipe-delimited
/// `parentType` for union components; see [`RawTypeDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTypeDefinition", into = "RawTypeDefinition")]
pub struct TypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeKind,
    /// Set when the type exists only as an arm of some union.
    /// Computed by [`TypeSystem::new`](super::system::TypeSystem::new).
    pub is_union_component_only: bool,
}

impl TypeDefinition {
    pub fn record(name: impl Into<String>, properties: Vec<PropertyDefinition>) -> Self {
        Self::with_kind(
            name,
            TypeKind::Record {
                properties,
                parent_type: None,
            },
        )
    }

    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::with_kind(
            name,
            TypeKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn union<S: Into<String>>(
        name: impl Into<String>,
        components: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::with_kind(
            name,
            TypeKind::Union {
                components: components.into_iter().map(Into::into).collect(),
            },
        )
    }

    fn with_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            is_union_component_only: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the supertype of a record. Has no effect on enums and unions.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        if let TypeKind::Record { parent_type, .. } = &mut self.kind {
            *parent_type = Some(parent.into());
        }
        self
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    pub fn is_union(&self) -> bool {
        matches!(self.kind, TypeKind::Union { .. })
    }

    /// Record fields; empty for enums and unions.
    pub fn properties(&self) -> &[PropertyDefinition] {
        match &self.kind {
            TypeKind::Record { properties, .. } => properties,
            _ => &[],
        }
    }

    /// Supertype a record extends, when it names exactly one type.
    pub fn single_parent(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Record {
                parent_type: Some(parent),
                ..
            } if !parent.contains('|') && !parent.trim().is_empty() => Some(parent.trim()),
            _ => None,
        }
    }

    /// Union arms in declaration order; empty for records and enums.
    pub fn union_components(&self) -> &[String] {
        match &self.kind {
            TypeKind::Union { components } => components,
            _ => &[],
        }
    }
}

/// Split a pipe-delimited component list, dropping blank segments.
pub fn parse_union_components(parent_type: &str) -> Vec<String> {
    parent_type
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Flag-based wire form of [`TypeDefinition`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawTypeDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDefinition>,

    /// Supertype of a record, or the `A | B` component list of a union
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_enum: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_union_type: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_union_component_only: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<RawTypeDefinition> for TypeDefinition {
    fn from(raw: RawTypeDefinition) -> Self {
        // Enum wins when both flags are set.
        let kind = if raw.is_enum {
            TypeKind::Enum {
                values: raw.enum_values,
            }
        } else if raw.is_union_type {
            TypeKind::Union {
                components: raw
                    .parent_type
                    .as_deref()
                    .map(parse_union_components)
                    .unwrap_or_default(),
            }
        } else {
            TypeKind::Record {
                properties: raw.properties,
                parent_type: raw.parent_type,
            }
        };

        // Only records can be union arms.
        let is_union_component_only =
            raw.is_union_component_only && matches!(kind, TypeKind::Record { .. });

        Self {
            name: raw.name,
            description: raw.description,
            kind,
            is_union_component_only,
        }
    }
}

impl From<TypeDefinition> for RawTypeDefinition {
    fn from(def: TypeDefinition) -> Self {
        let mut raw = RawTypeDefinition {
            name: def.name,
            description: def.description,
            is_union_component_only: def.is_union_component_only,
            ..Default::default()
        };
        match def.kind {
            TypeKind::Record {
                properties,
                parent_type,
            } => {
                raw.properties = properties;
                raw.parent_type = parent_type;
            }
            TypeKind::Enum { values } => {
                raw.is_enum = true;
                raw.enum_values = values;
            }
            TypeKind::Union { components } => {
                raw.is_union_type = true;
                if !components.is_empty() {
                    raw.parent_type = Some(components.join(" | "));
                }
            }
        }
        raw
    }
}

impl JsonSchema for TypeDefinition {
    fn schema_name() -> String {
        "TypeDefinition".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        RawTypeDefinition::json_schema(gen)
    }
}
