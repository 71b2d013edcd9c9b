use tracing::warn;
use typegen_model::{Primitive, TypeDefinition, TypeSystem};

use super::{
    block_doc, constant_name, is_identifier, member_names, pascal_name, quote, GENERATED_HEADER,
};
use crate::context::{EmitContext, IndentStyle};
use crate::generator::{eligible_types, EmitOptions, GeneratedFiles};
use crate::registry::Target;
use crate::traits::LanguageEmitter;

/// Package used when the type system has no namespace.
pub const DEFAULT_PACKAGE: &str = "com.example.models";

const JSON_PROPERTY: &str = "com.fasterxml.jackson.annotation.JsonProperty";
const NULLABLE: &str = "javax.annotation.Nullable";

/// Java declarations: one record, enum or sealed interface per file.
pub struct JavaEmitter;

impl LanguageEmitter for JavaEmitter {
    fn target(&self) -> Target {
        Target::Java
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(4)
    }

    fn emit_primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "String",
            Primitive::Number => "Double",
            Primitive::Boolean => "Boolean",
            Primitive::Integer => "Integer",
            Primitive::Any => "Object",
        }
    }

    fn emit_sequence(&self, element: &str, ctx: &mut EmitContext) -> String {
        ctx.add_import("java.util.List");
        format!("List<{element}>")
    }

    fn emit_mapping(&self, value: &str, ctx: &mut EmitContext) -> String {
        ctx.add_import("java.util.Map");
        format!("Map<String, {value}>")
    }

    fn dynamic_type(&self) -> &'static str {
        "Object"
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
            out.push_str(&block_doc(desc, &ind));
        }

        let properties = def.properties();
        if properties.is_empty() {
            out.push_str(&format!("{ind}public record {}()", def.name));
        } else {
            ctx.add_import(JSON_PROPERTY);
            out.push_str(&format!("{ind}public record {}(\n", def.name));
            ctx.push_indent();
            let comp_ind = ctx.indent();
            let count = properties.len();
            for (i, prop) in properties.iter().enumerate() {
                if let Some(desc) = &prop.description {
                    out.push_str(&block_doc(desc, &comp_ind));
                }
                let ty = self.emit_type(&prop.ty, ctx);
                let nullable = if prop.is_required {
                    ""
                } else {
                    ctx.add_import(NULLABLE);
                    "@Nullable "
                };
                let sep = if i + 1 < count { "," } else { "" };
                out.push_str(&format!(
                    "{comp_ind}@JsonProperty({}) {nullable}{ty} {}{sep}\n",
                    quote(&prop.name),
                    component_name(&prop.name)
                ));
            }
            ctx.pop_indent();
            out.push_str(&format!("{ind})"));
        }

        // Emitted union components implement their sealed interface
        if def.is_union_component_only {
            if let Some(union) = system.union_containing(&def.name) {
                out.push_str(&format!(" implements {}", union.name));
            }
        }
        out.push_str(" {\n");

        if let Some(parent) = def.single_parent() {
            out.push_str(&format!(
                "{}// Records cannot extend {parent}; add its members here by hand.\n",
                ctx.inner_indent()
            ));
        }
        out.push_str(&format!("{ind}}}\n"));
        out
    }

    fn emit_enum(&self, def: &TypeDefinition, values: &[String], ctx: &mut EmitContext) -> String {
        let ind = ctx.indent();
        let member_ind = ctx.inner_indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ind));
        }
        if !values.is_empty() {
            ctx.add_import(JSON_PROPERTY);
        }
        out.push_str(&format!("{ind}public enum {} {{\n", def.name));
        for (value, member) in values.iter().zip(member_names(values, is_plain_name, constant_name)) {
            out.push_str(&format!(
                "{member_ind}@JsonProperty({})\n{member_ind}{member},\n",
                quote(value)
            ));
        }
        out.push_str(&format!("{ind}}}\n"));
        out
    }

    fn emit_union(
        &self,
        def: &TypeDefinition,
        components: &[String],
        ctx: &mut EmitContext,
    ) -> String {
        let ind = ctx.indent();
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ind));
        }
        if components.is_empty() {
            out.push_str(&format!("{ind}public interface {} {{\n{ind}}}\n", def.name));
        } else {
            out.push_str(&format!(
                "{ind}public sealed interface {} permits {} {{\n{ind}}}\n",
                def.name,
                components.join(", ")
            ));
        }
        out
    }
}

/// Generate one `{Name}.java` file per eligible type.
pub fn generate(system: &TypeSystem, options: &EmitOptions) -> GeneratedFiles {
    let emitter = JavaEmitter;
    let package = system.namespace.as_deref().unwrap_or(DEFAULT_PACKAGE);
    let mut files = GeneratedFiles::new();

    for def in eligible_types(&emitter, system, options) {
        let mut ctx = EmitContext::new(emitter.indent_style());
        let body = emitter.emit_definition(def, system, &mut ctx);

        let mut content = format!("// {GENERATED_HEADER}\npackage {package};\n");
        let imports = ctx.take_imports();
        if !imports.is_empty() {
            content.push('\n');
            for import in imports {
                content.push_str(&format!("import {import};\n"));
            }
        }
        content.push('\n');
        content.push_str(&body);

        let mut name = file_name(&def.name);
        if files.get(&name).is_some() {
            let stem = name.trim_end_matches(".java").to_string();
            let mut n = 2;
            while files.get(&name).is_some() {
                name = format!("{stem}_{n}.java");
                n += 1;
            }
            warn!(type_name = %def.name, file = %name, "file name already taken; renamed");
        }
        files.add_file(name, content);
    }

    files
}

fn file_name(type_name: &str) -> String {
    let stem: String = type_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '.') { '_' } else { c })
        .collect();
    format!("{stem}.java")
}

/// Reserved words and literals that cannot name a component or constant.
const KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

fn is_plain_name(name: &str) -> bool {
    is_identifier(name) && !KEYWORDS.contains(&name)
}

/// Java identifier for a record component; `content-type` -> `contentType`,
/// `default` -> `default_`. `@JsonProperty` keeps the wire name.
fn component_name(name: &str) -> String {
    let ident = if is_identifier(name) {
        name.to_string()
    } else {
        let pascal = pascal_name(name);
        let mut chars = pascal.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {
                first.to_ascii_lowercase().to_string() + chars.as_str()
            }
            _ => pascal,
        }
    };
    if KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}
