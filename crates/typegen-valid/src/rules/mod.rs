pub mod duplicate_names;
pub mod identifiers;
pub mod property_kinds;
pub mod ref_integrity;
pub mod union_shape;
