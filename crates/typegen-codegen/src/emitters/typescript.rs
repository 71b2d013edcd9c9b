use typegen_model::{Primitive, TypeDefinition, TypeSystem};

use super::{block_doc, is_identifier, GENERATED_HEADER};
use crate::context::{EmitContext, IndentStyle};
use crate::generator::{eligible_types, EmitOptions, GeneratedFiles};
use crate::registry::Target;
use crate::traits::LanguageEmitter;

/// Name of the single file this backend produces.
pub const FILE_NAME: &str = "types.ts";

/// TypeScript declarations: interfaces, string enums and union aliases.
pub struct TypeScriptEmitter;

impl LanguageEmitter for TypeScriptEmitter {
    fn target(&self) -> Target {
        Target::TypeScript
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(2)
    }

    fn emit_primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "string",
            Primitive::Number | Primitive::Integer => "number",
            Primitive::Boolean => "boolean",
            Primitive::Any => "any",
        }
    }

    fn emit_sequence(&self, element: &str, _ctx: &mut EmitContext) -> String {
        // `A | B[]` binds the brackets to `B` only
        if element.contains('|') {
            format!("({element})[]")
        } else {
            format!("{element}[]")
        }
    }

    fn emit_mapping(&self, value: &str, _ctx: &mut EmitContext) -> String {
        format!("Record<string, {value}>")
    }

    fn dynamic_type(&self) -> &'static str {
        "any"
    }

    fn emit_record(
        &self,
        def: &TypeDefinition,
        _system: &TypeSystem,
        ctx: &mut EmitContext,
    ) -> String {
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ctx.indent()));
        }

        let extends = def
            .single_parent()
            .map(|p| format!(" extends {p}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}export interface {}{} {{\n",
            ctx.indent(),
            def.name,
            extends
        ));

        ctx.push_indent();
        for prop in def.properties() {
            let ind = ctx.indent();
            if let Some(desc) = &prop.description {
                out.push_str(&block_doc(desc, &ind));
            }
            let marker = if prop.is_required { "" } else { "?" };
            let ty = self.emit_type(&prop.ty, ctx);
            out.push_str(&format!(
                "{}{}{}: {};\n",
                ind,
                property_key(&prop.name),
                marker,
                ty
            ));
        }
        ctx.pop_indent();

        out.push_str(&format!("{}}}\n", ctx.indent()));
        out
    }

    fn emit_enum(&self, def: &TypeDefinition, values: &[String], ctx: &mut EmitContext) -> String {
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ctx.indent()));
        }
        out.push_str(&format!("{}export enum {} {{\n", ctx.indent(), def.name));
        let ind = ctx.inner_indent();
        for value in values {
            out.push_str(&format!(
                "{}{} = {},\n",
                ind,
                property_key(value),
                single_quote(value)
            ));
        }
        out.push_str(&format!("{}}}\n", ctx.indent()));
        out
    }

    fn emit_union(
        &self,
        def: &TypeDefinition,
        components: &[String],
        ctx: &mut EmitContext,
    ) -> String {
        let mut out = String::new();
        if let Some(desc) = &def.description {
            out.push_str(&block_doc(desc, &ctx.indent()));
        }
        let alias = if components.is_empty() {
            self.dynamic_type().to_string()
        } else {
            components.join(" | ")
        };
        out.push_str(&format!(
            "{}export type {} = {};\n",
            ctx.indent(),
            def.name,
            alias
        ));
        out
    }
}

/// Generate `types.ts` holding every eligible type.
pub fn generate(system: &TypeSystem, options: &EmitOptions) -> GeneratedFiles {
    let emitter = TypeScriptEmitter;
    let mut ctx = EmitContext::new(emitter.indent_style());

    let mut content = format!("// {GENERATED_HEADER}\n");
    if let Some(ns) = &system.namespace {
        content.push_str(&format!("// Namespace: {ns}\n"));
    }

    for def in eligible_types(&emitter, system, options) {
        content.push('\n');
        content.push_str(&emitter.emit_definition(def, system, &mut ctx));
    }

    let mut files = GeneratedFiles::new();
    files.add_file(FILE_NAME, content);
    files
}

fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        single_quote(name)
    }
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
