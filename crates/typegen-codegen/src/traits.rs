use typegen_model::{Primitive, PropertyType, TypeDefinition, TypeKind, TypeSystem};

use crate::context::{EmitContext, IndentStyle};
use crate::registry::Target;

/// Language-specific declaration emitter.
///
/// Each backend implements the leaf renderings (primitive table, containers,
/// per-kind declarations); the recursive type walk and kind dispatch are
/// shared through the provided methods.
pub trait LanguageEmitter {
    /// Which target this emitter renders.
    fn target(&self) -> Target;

    /// Indentation style for this language.
    fn indent_style(&self) -> IndentStyle;

    /// Whether types flagged as union components are skipped by default.
    fn suppresses_union_components(&self) -> bool {
        true
    }

    /// Native name of a portable primitive.
    fn emit_primitive(&self, primitive: Primitive) -> &'static str;

    /// Generic sequence container around an already rendered element type.
    fn emit_sequence(&self, element: &str, ctx: &mut EmitContext) -> String;

    /// String-keyed mapping container around an already rendered value type.
    fn emit_mapping(&self, value: &str, ctx: &mut EmitContext) -> String;

    /// Untyped fallback for kinds the model does not know.
    fn dynamic_type(&self) -> &'static str;

    /// Render a property type recursively.
    fn emit_type(&self, ty: &PropertyType, ctx: &mut EmitContext) -> String {
        match ty {
            PropertyType::Primitive { name } => match Primitive::parse(name) {
                Some(primitive) => self.emit_primitive(primitive).to_string(),
                None => name.clone(),
            },
            PropertyType::Reference { name } => name.clone(),
            PropertyType::Array { element } => {
                let inner = self.emit_type(element, ctx);
                self.emit_sequence(&inner, ctx)
            }
            PropertyType::Map { value } => {
                let inner = self.emit_type(value, ctx);
                self.emit_mapping(&inner, ctx)
            }
            PropertyType::Unknown => self.dynamic_type().to_string(),
        }
    }

    /// Declaration of a record type.
    fn emit_record(&self, def: &TypeDefinition, system: &TypeSystem, ctx: &mut EmitContext)
        -> String;

    /// Declaration of an enum type.
    fn emit_enum(&self, def: &TypeDefinition, values: &[String], ctx: &mut EmitContext) -> String;

    /// Declaration of a union type. Variant members are never merged in.
    fn emit_union(
        &self,
        def: &TypeDefinition,
        components: &[String],
        ctx: &mut EmitContext,
    ) -> String;

    /// Dispatch on the definition's kind.
    fn emit_definition(
        &self,
        def: &TypeDefinition,
        system: &TypeSystem,
        ctx: &mut EmitContext,
    ) -> String {
        match &def.kind {
            TypeKind::Record { .. } => self.emit_record(def, system, ctx),
            TypeKind::Enum { values } => self.emit_enum(def, values, ctx),
            TypeKind::Union { components } => self.emit_union(def, components, ctx),
        }
    }
}
