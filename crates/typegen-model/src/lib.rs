pub mod catalog;
pub mod loader;
pub mod parser;
pub mod schema_def;
pub mod types;

// Re-exports
pub use types::definition::{TypeDefinition, TypeKind};
pub use types::error::{ErrorEntry, Severity, ValidationReport};
pub use types::property::{Primitive, PropertyDefinition, PropertyType};
pub use types::system::TypeSystem;
