use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type of a property: a portable primitive, a named reference, or a container.
///
/// Serialized with a `kind` tag, e.g. `{ "kind": "array", "elementType": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropertyType {
    /// Portable scalar identified by name (see [`Primitive`])
    Primitive {
        #[serde(rename = "typeName")]
        name: String,
    },
    /// Reference to another type of the same system, resolved by name
    Reference {
        #[serde(rename = "typeName")]
        name: String,
    },
    /// Ordered, unbounded sequence
    Array {
        #[serde(rename = "elementType")]
        element: Box<PropertyType>,
    },
    /// Mapping with string keys
    Map {
        #[serde(rename = "valueType")]
        value: Box<PropertyType>,
    },
    /// A kind this model does not know. Backends render their dynamic type.
    #[serde(other)]
    Unknown,
}

impl PropertyType {
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive { name: name.into() }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference { name: name.into() }
    }

    pub fn array(element: PropertyType) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn map(value: PropertyType) -> Self {
        Self::Map {
            value: Box::new(value),
        }
    }

    /// Names of all types referenced anywhere inside this type.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Reference { name } => out.push(name),
            Self::Array { element } => element.collect_references(out),
            Self::Map { value } => value.collect_references(out),
            Self::Primitive { .. } | Self::Unknown => {}
        }
    }
}

// Hand-written so that unknown `kind` values still pass schema validation and
// fall through to `PropertyType::Unknown` on deserialization.
impl JsonSchema for PropertyType {
    fn schema_name() -> String {
        "PropertyType".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::Object.into()),
            ..Default::default()
        };
        let object = schema.object();
        object.required.insert("kind".to_string());
        object
            .properties
            .insert("kind".to_string(), gen.subschema_for::<String>());
        object
            .properties
            .insert("typeName".to_string(), gen.subschema_for::<String>());
        object
            .properties
            .insert("elementType".to_string(), gen.subschema_for::<PropertyType>());
        object
            .properties
            .insert("valueType".to_string(), gen.subschema_for::<PropertyType>());
        schema.into()
    }
}

/// The portable primitive names every backend maps through its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Integer,
    Any,
}

impl Primitive {
    /// Case-insensitive lookup. Unknown names return `None` and are
    /// rendered verbatim by the backends.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Any => "any",
        }
    }
}

/// A single field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    /// Field name, emitted verbatim as the serialized name
    pub name: String,

    #[serde(rename = "type")]
    pub ty: PropertyType,

    /// `false` means the field may be absent
    pub is_required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyDefinition {
    pub fn required(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_required: true,
            description: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_required: false,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
