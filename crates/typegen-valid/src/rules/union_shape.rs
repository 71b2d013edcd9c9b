use typegen_model::types::error::{W_EMPTY_UNION, W_NESTED_UNION, W_UNKNOWN_COMPONENT};
use typegen_model::{ErrorEntry, TypeSystem, ValidationReport};

use crate::index::TypeIndex;

/// Check that every union lists resolvable, non-union components.
pub fn check(
    system: &TypeSystem,
    index: &TypeIndex<'_>,
    file: &str,
    report: &mut ValidationReport,
) {
    for (ti, def) in system.types.iter().enumerate() {
        if !def.is_union() {
            continue;
        }
        let path = format!("$.types[{}].parentType", ti);
        let components = def.union_components();

        if components.is_empty() {
            report.push(
                ErrorEntry::warning(
                    W_EMPTY_UNION,
                    format!("Union '{}' has no components", def.name),
                    file,
                    &path,
                )
                .with_suggestion("List the components as 'A | B' in parentType"),
            );
            continue;
        }

        for component in components {
            match index.resolve(component) {
                None => report.push(ErrorEntry::warning(
                    W_UNKNOWN_COMPONENT,
                    format!(
                        "Union '{}' lists undefined component '{}'",
                        def.name, component
                    ),
                    file,
                    &path,
                )),
                Some(target) if target.is_union() => report.push(
                    ErrorEntry::warning(
                        W_NESTED_UNION,
                        format!(
                            "Union '{}' lists union '{}'; nested unions are not flattened",
                            def.name, component
                        ),
                        file,
                        &path,
                    )
                    .with_suggestion(format!(
                        "List the components of '{}' directly",
                        component
                    )),
                ),
                Some(_) => {}
            }
        }
    }
}
