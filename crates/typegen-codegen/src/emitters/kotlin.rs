use typegen_model::{Primitive, TypeDefinition, TypeSystem};

use super::{block_doc, constant_name, is_identifier, member_names, quote, GENERATED_HEADER};
use crate::context::{EmitContext, IndentStyle};
use crate::generator::{eligible_types, EmitOptions, GeneratedFiles};
use crate::registry::Target;
use crate::traits::LanguageEmitter;

pub const FILE_NAME: &str = "Types.kt";

const SERIALIZABLE: &str = "kotlinx.serialization.Serializable";
const SERIAL_NAME: &str = "kotlinx.serialization.SerialName";

/// Kotlin declarations using kotlinx.serialization.
///
/// Unions become sealed classes; their components are emitted as
/// subclasses instead of being suppressed.
pub struct KotlinEmitter;

impl LanguageEmitter for KotlinEmitter {
    fn target(&self) -> Target {
        Target::Kotlin
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(4)
    }

    fn suppresses_union_components(&self) -> bool {
        false
    }

    fn emit_primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "String",
            Primitive::Number => "Double",
            Primitive::Boolean => "Boolean",
            Primitive::Integer => "Int",
            Primitive::Any => "Any",
        }
    }

    fn emit_sequence(&self, element: &str, _ctx: &mut EmitContext) -> String {
        format!("List<{element}>")
    }

    fn emit_mapping(&self, value: &str, _ctx: &mut EmitContext) -> String {
        format!("Map<String, {value}>")
    }

    fn dynamic_type(&self) -> &'static str {
        "Any"
    }

    fn emit_record(
        &self,
        def: &TypeDefinition,
        system: &TypeSystem,
        ctx: &mut EmitContext,
    ) -> String {
        ctx.add_import(SERIALIZABLE);
        let ind = ctx.indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ind));
        }
        out.push_str(&format!("{ind}@Serializable\n"));

        // A component without a supertype of its own extends its sealed union
        let supertype = def.single_parent().map(str::to_string).or_else(|| {
            if def.is_union_component_only {
                system.union_containing(&def.name).map(|u| u.name.clone())
            } else {
                None
            }
        });
        let extends = supertype
            .map(|p| format!(" : {p}()"))
            .unwrap_or_default();

        let properties = def.properties();
        if properties.is_empty() {
            out.push_str(&format!("{ind}class {}{extends}\n", def.name));
            return out;
        }

        out.push_str(&format!("{ind}data class {}(\n", def.name));
        ctx.push_indent();
        let field_ind = ctx.indent();
        for prop in properties {
            if let Some(desc) = &prop.description {
                out.push_str(&block_doc(desc, &field_ind));
            }
            let ty = self.emit_type(&prop.ty, ctx);
            let name = field_name(&prop.name);
            if prop.is_required {
                out.push_str(&format!("{field_ind}val {name}: {ty},\n"));
            } else {
                out.push_str(&format!("{field_ind}val {name}: {ty}? = null,\n"));
            }
        }
        ctx.pop_indent();
        out.push_str(&format!("{ind}){extends}\n"));
        out
    }

    fn emit_enum(&self, def: &TypeDefinition, values: &[String], ctx: &mut EmitContext) -> String {
        ctx.add_import(SERIALIZABLE);
        ctx.add_import(SERIAL_NAME);
        let ind = ctx.indent();
        let member_ind = ctx.inner_indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ind));
        }
        out.push_str(&format!("{ind}@Serializable\n{ind}enum class {} {{\n", def.name));
        for (value, member) in values.iter().zip(member_names(values, is_plain_name, constant_name)) {
            out.push_str(&format!(
                "{member_ind}@SerialName({})\n{member_ind}{member},\n",
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
        ctx.add_import(SERIALIZABLE);
        let ind = ctx.indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ind));
        }
        out.push_str(&format!("{ind}@Serializable\n{ind}sealed class {}\n", def.name));
        out
    }
}

/// Generate `Types.kt` holding every eligible type.
pub fn generate(system: &TypeSystem, options: &EmitOptions) -> GeneratedFiles {
    let emitter = KotlinEmitter;
    let mut ctx = EmitContext::new(emitter.indent_style());

    let mut body = String::new();
    for def in eligible_types(&emitter, system, options) {
        body.push('\n');
        body.push_str(&emitter.emit_definition(def, system, &mut ctx));
    }

    let mut content = format!("// {GENERATED_HEADER}\n");
    if let Some(ns) = &system.namespace {
        content.push_str(&format!("package {ns}\n"));
    }
    let imports = ctx.take_imports();
    if !imports.is_empty() {
        content.push('\n');
        for import in imports {
            content.push_str(&format!("import {import}\n"));
        }
    }
    content.push_str(&body);

    let mut files = GeneratedFiles::new();
    files.add_file(FILE_NAME, content);
    files
}

/// Hard keywords; these cannot name a property or enum entry unquoted.
const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

fn is_plain_name(name: &str) -> bool {
    is_identifier(name) && !name.contains('$') && !KEYWORDS.contains(&name)
}

fn field_name(name: &str) -> String {
    if is_plain_name(name) {
        name.to_string()
    } else {
        format!("`{name}`")
    }
}
