use typegen_model::types::error::{W_UNRESOLVED_PARENT, W_UNRESOLVED_REF};
use typegen_model::{ErrorEntry, TypeSystem, ValidationReport};

use crate::index::TypeIndex;

/// Check that property references and record supertypes name a defined type.
///
/// Reported as warnings: protocol types are often defined outside the system
/// and generation renders unresolved names verbatim anyway.
pub fn check(
    system: &TypeSystem,
    index: &TypeIndex<'_>,
    file: &str,
    report: &mut ValidationReport,
) {
    for (ti, def) in system.types.iter().enumerate() {
        for (pi, prop) in def.properties().iter().enumerate() {
            for name in prop.ty.referenced_names() {
                if index.contains(name) {
                    continue;
                }
                report.push(
                    ErrorEntry::warning(
                        W_UNRESOLVED_REF,
                        format!(
                            "Property '{}.{}' references undefined type '{}'",
                            def.name, prop.name, name
                        ),
                        file,
                        &format!("$.types[{}].properties[{}].type", ti, pi),
                    )
                    .with_suggestion(format!(
                        "Define '{}' or make sure the target language provides it",
                        name
                    )),
                );
            }
        }

        if let Some(parent) = def.single_parent() {
            if !index.contains(parent) {
                report.push(ErrorEntry::warning(
                    W_UNRESOLVED_PARENT,
                    format!("Type '{}' extends undefined type '{}'", def.name, parent),
                    file,
                    &format!("$.types[{}].parentType", ti),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegen_model::{PropertyDefinition, PropertyType, Severity, TypeDefinition};

    fn run(system: &TypeSystem) -> ValidationReport {
        let index = TypeIndex::build(system);
        let mut report = ValidationReport::success();
        check(system, &index, "refs.types.json", &mut report);
        report
    }

    #[test]
    fn test_nested_unresolved_reference() {
        let system = TypeSystem::new(
            None,
            vec![TypeDefinition::record(
                "Holder",
                vec![PropertyDefinition::required(
                    "items",
                    PropertyType::array(PropertyType::map(PropertyType::reference("Missing"))),
                )],
            )],
        );
        let report = run(&system);
        assert!(report.ok);
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(report.errors[0].code, W_UNRESOLVED_REF);
        assert_eq!(report.errors[0].path, "$.types[0].properties[0].type");
    }

    #[test]
    fn test_unresolved_parent() {
        let system = TypeSystem::new(
            None,
            vec![TypeDefinition::record("Child", vec![]).with_parent("Base")],
        );
        let report = run(&system);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, W_UNRESOLVED_PARENT);
    }

    #[test]
    fn test_resolved_references_pass() {
        let system = typegen_model::catalog::chat_type_system();
        let report = run(&system);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }
}
