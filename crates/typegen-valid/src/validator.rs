use typegen_model::{TypeSystem, ValidationReport};

use crate::index::TypeIndex;
use crate::rules;

/// Run every lint rule over a type system.
///
/// `file` labels the diagnostics; pass an empty string for in-memory systems.
/// Generation never depends on this report.
pub fn validate(system: &TypeSystem, file: &str) -> ValidationReport {
    let mut report = ValidationReport::success();
    let index = TypeIndex::build(system);

    rules::duplicate_names::check(&index, file, &mut report);
    rules::ref_integrity::check(system, &index, file, &mut report);
    rules::union_shape::check(system, &index, file, &mut report);
    rules::property_kinds::check(system, file, &mut report);
    rules::identifiers::check(system, file, &mut report);

    report
}
