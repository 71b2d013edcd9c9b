use std::sync::OnceLock;

use regex::Regex;
use typegen_model::types::error::W_INVALID_IDENTIFIER;
use typegen_model::{ErrorEntry, TypeKind, TypeSystem, ValidationReport};

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

/// Names are emitted verbatim, so they must be identifiers in every target.
pub fn check(system: &TypeSystem, file: &str, report: &mut ValidationReport) {
    let re = identifier_re();
    let mut flag = |what: &str, name: &str, path: String| {
        if !re.is_match(name) {
            report.push(
                ErrorEntry::warning(
                    W_INVALID_IDENTIFIER,
                    format!("{} '{}' is not a valid identifier", what, name),
                    file,
                    &path,
                )
                .with_suggestion("Use letters, digits and '_' only, not starting with a digit"),
            );
        }
    };

    for (ti, def) in system.types.iter().enumerate() {
        flag("Type name", &def.name, format!("$.types[{}].name", ti));
        match &def.kind {
            TypeKind::Record { properties, .. } => {
                for (pi, prop) in properties.iter().enumerate() {
                    flag(
                        "Property name",
                        &prop.name,
                        format!("$.types[{}].properties[{}].name", ti, pi),
                    );
                }
            }
            TypeKind::Enum { values } => {
                for (vi, value) in values.iter().enumerate() {
                    flag(
                        "Enum member",
                        value,
                        format!("$.types[{}].enumValues[{}]", ti, vi),
                    );
                }
            }
            TypeKind::Union { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegen_model::{PropertyDefinition, PropertyType, TypeDefinition};

    #[test]
    fn test_invalid_names_flagged() {
        let system = TypeSystem::new(
            None,
            vec![
                TypeDefinition::record(
                    "Good_1",
                    vec![PropertyDefinition::required(
                        "content-type",
                        PropertyType::primitive("string"),
                    )],
                ),
                TypeDefinition::enumeration("Level", ["low", "2high"]),
            ],
        );
        let mut report = ValidationReport::success();
        check(&system, "", &mut report);
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["$.types[0].properties[0].name", "$.types[1].enumValues[1]"]
        );
    }
}
