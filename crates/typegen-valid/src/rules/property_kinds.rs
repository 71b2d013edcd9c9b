use typegen_model::types::error::W_UNKNOWN_KIND;
use typegen_model::{ErrorEntry, PropertyType, TypeSystem, ValidationReport};

/// Flag property types whose kind was not recognized on input.
pub fn check(system: &TypeSystem, file: &str, report: &mut ValidationReport) {
    for (ti, def) in system.types.iter().enumerate() {
        for (pi, prop) in def.properties().iter().enumerate() {
            if contains_unknown(&prop.ty) {
                report.push(
                    ErrorEntry::warning(
                        W_UNKNOWN_KIND,
                        format!(
                            "Property '{}.{}' has an unrecognized type kind",
                            def.name, prop.name
                        ),
                        file,
                        &format!("$.types[{}].properties[{}].type", ti, pi),
                    )
                    .with_suggestion("Use one of: primitive, reference, array, map"),
                );
            }
        }
    }
}

fn contains_unknown(ty: &PropertyType) -> bool {
    match ty {
        PropertyType::Unknown => true,
        PropertyType::Array { element } => contains_unknown(element),
        PropertyType::Map { value } => contains_unknown(value),
        PropertyType::Primitive { .. } | PropertyType::Reference { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegen_model::{PropertyDefinition, TypeDefinition};

    #[test]
    fn test_unknown_inside_container() {
        let system = TypeSystem::new(
            None,
            vec![TypeDefinition::record(
                "Odd",
                vec![
                    PropertyDefinition::optional("fine", PropertyType::primitive("string")),
                    PropertyDefinition::optional("odd", PropertyType::array(PropertyType::Unknown)),
                ],
            )],
        );
        let mut report = ValidationReport::success();
        check(&system, "", &mut report);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "$.types[0].properties[1].type");
    }
}
