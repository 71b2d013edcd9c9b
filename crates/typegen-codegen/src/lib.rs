pub mod context;
pub mod error;
pub mod generator;
pub mod registry;
pub mod traits;

// Language emitters
pub mod emitters;

// Re-exports
pub use context::EmitContext;
pub use error::CodegenError;
pub use generator::{CodeGenerator, ComponentPolicy, EmitOptions, GeneratedFiles};
pub use registry::{Backend, BackendRegistry, FileLayout, GenerateFn, Target};
pub use traits::LanguageEmitter;
