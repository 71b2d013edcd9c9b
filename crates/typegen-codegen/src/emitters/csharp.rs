use typegen_model::{Primitive, PropertyDefinition, PropertyType, TypeDefinition, TypeSystem};

use super::{
    capitalize, is_identifier, member_names, pascal_name, quote, xml_doc, GENERATED_HEADER,
};
use crate::context::{EmitContext, IndentStyle};
use crate::generator::{eligible_types, EmitOptions, GeneratedFiles};
use crate::registry::Target;
use crate::traits::LanguageEmitter;

pub const FILE_NAME: &str = "Types.cs";

/// Namespace used when the type system has none.
pub const DEFAULT_NAMESPACE: &str = "Models";

const USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Text.Json.Serialization",
];

/// C# declarations: classes with System.Text.Json attributes.
pub struct CSharpEmitter;

impl LanguageEmitter for CSharpEmitter {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(4)
    }

    fn emit_primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "string",
            Primitive::Number => "double",
            Primitive::Boolean => "bool",
            Primitive::Integer => "int",
            Primitive::Any => "object",
        }
    }

    fn emit_sequence(&self, element: &str, _ctx: &mut EmitContext) -> String {
        format!("List<{element}>")
    }

    fn emit_mapping(&self, value: &str, _ctx: &mut EmitContext) -> String {
        format!("Dictionary<string, {value}>")
    }

    fn dynamic_type(&self) -> &'static str {
        "object"
    }

    fn emit_record(
        &self,
        def: &TypeDefinition,
        system: &TypeSystem,
        ctx: &mut EmitContext,
    ) -> String {
        let ind = ctx.indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&xml_doc(desc, &ind));
        }

        let base = def.single_parent().map(str::to_string).or_else(|| {
            if def.is_union_component_only {
                system.union_containing(&def.name).map(|u| u.name.clone())
            } else {
                None
            }
        });
        let extends = base.map(|b| format!(" : {b}")).unwrap_or_default();
        out.push_str(&format!("{ind}public class {}{extends}\n{ind}{{\n", def.name));

        ctx.push_indent();
        for (i, prop) in def.properties().iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.emit_property(prop, ctx));
        }
        ctx.pop_indent();

        out.push_str(&format!("{ind}}}\n"));
        out
    }

    fn emit_enum(&self, def: &TypeDefinition, values: &[String], ctx: &mut EmitContext) -> String {
        let ind = ctx.indent();
        let member_ind = ctx.inner_indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&xml_doc(desc, &ind));
        }
        out.push_str(&format!(
            "{ind}[JsonConverter(typeof(JsonStringEnumConverter))]\n{ind}public enum {}\n{ind}{{\n",
            def.name
        ));
        for (value, member) in values.iter().zip(member_names(values, is_plain_name, pascal_name)) {
            out.push_str(&format!(
                "{member_ind}[JsonStringEnumMemberName({})]\n{member_ind}{member},\n",
                quote(value)
            ));
        }
        out.push_str(&format!("{ind}}}\n"));
        out
    }

    fn emit_union(
        &self,
        def: &TypeDefinition,
        _components: &[String],
        ctx: &mut EmitContext,
    ) -> String {
        let ind = ctx.indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&xml_doc(desc, &ind));
        }
        out.push_str(&format!(
            "{ind}public abstract class {}\n{ind}{{\n{ind}}}\n",
            def.name
        ));
        out
    }
}

impl CSharpEmitter {
    fn emit_property(&self, prop: &PropertyDefinition, ctx: &mut EmitContext) -> String {
        let ind = ctx.indent();
        let mut out = String::new();
        if let Some(desc) = &prop.description {
            out.push_str(&xml_doc(desc, &ind));
        }
        out.push_str(&format!("{ind}[JsonPropertyName({})]\n", quote(&prop.name)));

        let ty = self.emit_type(&prop.ty, ctx);
        let name = property_name(&prop.name);
        if prop.is_required {
            out.push_str(&format!("{ind}public required {ty} {name} {{ get; set; }}\n"));
        } else if is_value_type(&prop.ty) {
            out.push_str(&format!("{ind}public {ty}? {name} {{ get; set; }}\n"));
        } else {
            out.push_str(&format!("{ind}public {ty}? {name} {{ get; set; }} = null;\n"));
        }
        out
    }
}

/// Whether a property type renders as a C# value type.
fn is_value_type(ty: &PropertyType) -> bool {
    match ty {
        PropertyType::Primitive { name } => match Primitive::parse(name) {
            Some(p) => matches!(p, Primitive::Number | Primitive::Integer | Primitive::Boolean),
            None => matches!(
                name.to_ascii_lowercase().as_str(),
                "float" | "int" | "double" | "bool"
            ),
        },
        _ => false,
    }
}

/// Keywords that would need an `@` prefix to name an enum member.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

fn is_plain_name(name: &str) -> bool {
    is_identifier(name) && !name.contains('$') && !KEYWORDS.contains(&name)
}

fn property_name(name: &str) -> String {
    if is_identifier(name) && !name.contains('$') {
        capitalize(name)
    } else {
        pascal_name(name)
    }
}

/// Generate `Types.cs` holding every eligible type.
pub fn generate(system: &TypeSystem, options: &EmitOptions) -> GeneratedFiles {
    let emitter = CSharpEmitter;
    let mut ctx = EmitContext::new(emitter.indent_style());
    let namespace = system.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);

    let mut content = format!("// {GENERATED_HEADER}\n#nullable enable\n\n");
    for using in USINGS {
        content.push_str(&format!("using {using};\n"));
    }
    content.push_str(&format!("\nnamespace {namespace}\n{{\n"));

    ctx.push_indent();
    for (i, def) in eligible_types(&emitter, system, options).into_iter().enumerate() {
        if i > 0 {
            content.push('\n');
        }
        content.push_str(&emitter.emit_definition(def, system, &mut ctx));
    }
    ctx.pop_indent();

    content.push_str("}\n");

    let mut files = GeneratedFiles::new();
    files.add_file(FILE_NAME, content);
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ComponentPolicy;
    use pretty_assertions::assert_eq;
    use typegen_model::catalog::chat_type_system;

    const PREAMBLE: &str = "// Code generated by typegen. DO NOT EDIT.\n\
                            #nullable enable\n\
                            \n\
                            using System;\n\
                            using System.Collections.Generic;\n\
                            using System.Text.Json.Serialization;\n\
                            \n";

    fn render(system: &TypeSystem) -> String {
        generate(system, &EmitOptions::default())
            .get(FILE_NAME)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_type_rendering() {
        let emitter = CSharpEmitter;
        let mut ctx = EmitContext::new(emitter.indent_style());
        let nested = PropertyType::array(PropertyType::map(PropertyType::primitive("string")));
        assert_eq!(
            emitter.emit_type(&nested, &mut ctx),
            "List<Dictionary<string, string>>"
        );
        assert_eq!(
            emitter.emit_type(&PropertyType::primitive("boolean"), &mut ctx),
            "bool"
        );
        assert_eq!(emitter.emit_type(&PropertyType::Unknown, &mut ctx), "object");
    }

    #[test]
    fn test_value_types_get_no_null_initializer() {
        let system = TypeSystem::new(
            Some("Chat".to_string()),
            vec![TypeDefinition::record(
                "Sample",
                vec![
                    PropertyDefinition::optional("count", PropertyType::primitive("integer")),
                    PropertyDefinition::optional("ratio", PropertyType::primitive("float")),
                    PropertyDefinition::optional("label", PropertyType::primitive("string")),
                    PropertyDefinition::required("line", PropertyType::primitive("number")),
                ],
            )
            .with_description("A sample")],
        );
        let expected = format!(
            "{PREAMBLE}namespace Chat\n\
             {{\n    \
             /// <summary>\n    \
             /// A sample\n    \
             /// </summary>\n    \
             public class Sample\n    \
             {{\n        \
             [JsonPropertyName(\"count\")]\n        \
             public int? Count {{ get; set; }}\n\
             \n        \
             [JsonPropertyName(\"ratio\")]\n        \
             public float? Ratio {{ get; set; }}\n\
             \n        \
             [JsonPropertyName(\"label\")]\n        \
             public string? Label {{ get; set; }} = null;\n\
             \n        \
             [JsonPropertyName(\"line\")]\n        \
             public required double Line {{ get; set; }}\n    \
             }}\n\
             }}\n"
        );
        assert_eq!(render(&system), expected);
    }

    #[test]
    fn test_enum_members_carry_member_names() {
        let system = TypeSystem::new(
            None,
            vec![TypeDefinition::enumeration("Level", ["low", "in-progress"])],
        );
        let out = render(&system);
        assert!(out.contains("namespace Models\n"));
        assert!(out.contains(
            "    [JsonConverter(typeof(JsonStringEnumConverter))]\n    \
             public enum Level\n    {\n        \
             [JsonStringEnumMemberName(\"low\")]\n        low,\n        \
             [JsonStringEnumMemberName(\"in-progress\")]\n        InProgress,\n    }\n"
        ));
    }

    #[test]
    fn test_enum_members_stay_distinct_after_renaming() {
        let system = TypeSystem::new(
            None,
            vec![TypeDefinition::enumeration(
                "Mode",
                ["in-progress", "in_progress", "in progress", "class"],
            )],
        );
        let out = render(&system);
        assert!(out.contains(
            "        [JsonStringEnumMemberName(\"in-progress\")]\n        InProgress,\n        \
             [JsonStringEnumMemberName(\"in_progress\")]\n        in_progress,\n        \
             [JsonStringEnumMemberName(\"in progress\")]\n        InProgress_2,\n        \
             [JsonStringEnumMemberName(\"class\")]\n        Class,\n    }\n"
        ));
        assert_eq!(out.matches("        InProgress,").count(), 1);
    }

    #[test]
    fn test_mixed_case_value_type_names() {
        let system = TypeSystem::new(
            None,
            vec![TypeDefinition::record(
                "Sample",
                vec![
                    PropertyDefinition::optional("a", PropertyType::primitive("Double")),
                    PropertyDefinition::optional("b", PropertyType::primitive("INT")),
                    PropertyDefinition::optional("c", PropertyType::primitive("Bool")),
                    PropertyDefinition::optional("d", PropertyType::primitive("Guid")),
                ],
            )],
        );
        let out = render(&system);
        assert!(out.contains("public Double? A { get; set; }\n"));
        assert!(out.contains("public INT? B { get; set; }\n"));
        assert!(out.contains("public Bool? C { get; set; }\n"));
        assert!(out.contains("public Guid? D { get; set; } = null;\n"));
    }

    #[test]
    fn test_cursor_state_marker_class_and_suppression() {
        let out = render(&chat_type_system());
        assert!(out.contains(
            "    /// <summary>\n    /// Represents the state of a cursor\n    /// </summary>\n    \
             public abstract class CursorState\n    {\n    }\n"
        ));
        assert!(!out.contains("class CursorStateWithPosition"));
        assert!(!out.contains("class CursorStateWithRange"));
        assert!(out.contains("    public class ChatParams : PartialResultParams\n"));
        assert!(out.contains("        public List<CursorState>? CursorState { get; set; } = null;\n"));
        assert!(out.contains("        public required string TabId { get; set; }\n"));
    }

    #[test]
    fn test_emitted_components_derive_from_marker() {
        let options = EmitOptions::default().with_component_policy(ComponentPolicy::Emit);
        let files = generate(&chat_type_system(), &options);
        let out = files.get(FILE_NAME).unwrap();
        assert!(out.contains("    public class CursorStateWithRange : CursorState\n"));
    }

    #[test]
    fn test_empty_system_yields_namespace_only_file() {
        let files = generate(&TypeSystem::default(), &EmitOptions::default());
        assert_eq!(files.file_count(), 1);
        assert_eq!(
            files.get(FILE_NAME).unwrap(),
            format!("{PREAMBLE}namespace Models\n{{\n}}\n")
        );
    }
}
