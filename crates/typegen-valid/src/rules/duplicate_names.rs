use typegen_model::types::error::E_DUPLICATE_TYPE;
use typegen_model::{ErrorEntry, ValidationReport};

use crate::index::TypeIndex;

/// Type names must be unique within a system.
pub fn check(index: &TypeIndex<'_>, file: &str, report: &mut ValidationReport) {
    for (name, positions) in index.duplicates() {
        for pos in &positions[1..] {
            report.push(
                ErrorEntry::error(
                    E_DUPLICATE_TYPE,
                    format!(
                        "Type '{}' is already defined at $.types[{}]",
                        name, positions[0]
                    ),
                    file,
                    &format!("$.types[{}].name", pos),
                )
                .with_suggestion("Rename or remove one of the definitions"),
            );
        }
    }
}
