use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typegen_model::TypeSystem;

use crate::emitters;
use crate::error::CodegenError;
use crate::generator::{EmitOptions, GeneratedFiles};

/// Target languages with a built-in backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    TypeScript,
    Kotlin,
    Java,
    CSharp,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::TypeScript, Target::Kotlin, Target::Java, Target::CSharp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::TypeScript => "typescript",
            Target::Kotlin => "kotlin",
            Target::Java => "java",
            Target::CSharp => "csharp",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Target::TypeScript),
            "kotlin" | "kt" => Ok(Target::Kotlin),
            "java" => Ok(Target::Java),
            "csharp" | "cs" | "c#" => Ok(Target::CSharp),
            _ => Err(CodegenError::UnknownTarget(s.to_string())),
        }
    }
}

/// How a backend lays out its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLayout {
    /// Every type in one translation unit
    Combined,
    /// One file per emitted type
    PerType,
}

impl fmt::Display for FileLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileLayout::Combined => write!(f, "single file"),
            FileLayout::PerType => write!(f, "one file per type"),
        }
    }
}

/// The generator contract: a pure function from type system to files.
pub type GenerateFn = fn(&TypeSystem, &EmitOptions) -> GeneratedFiles;

/// A registered backend.
#[derive(Clone, Copy)]
pub struct Backend {
    pub target: Target,
    pub layout: FileLayout,
    pub generate: GenerateFn,
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("target", &self.target)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Tagged registry of backends, keyed by target.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: IndexMap<Target, Backend>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in backends.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Backend {
            target: Target::TypeScript,
            layout: FileLayout::Combined,
            generate: emitters::typescript::generate,
        });
        registry.register(Backend {
            target: Target::Kotlin,
            layout: FileLayout::Combined,
            generate: emitters::kotlin::generate,
        });
        registry.register(Backend {
            target: Target::Java,
            layout: FileLayout::PerType,
            generate: emitters::java::generate,
        });
        registry.register(Backend {
            target: Target::CSharp,
            layout: FileLayout::Combined,
            generate: emitters::csharp::generate,
        });
        registry
    }

    /// Register a backend, returning the one it replaces.
    pub fn register(&mut self, backend: Backend) -> Option<Backend> {
        self.backends.insert(backend.target, backend)
    }

    pub fn get(&self, target: Target) -> Result<&Backend, CodegenError> {
        self.backends
            .get(&target)
            .ok_or(CodegenError::UnregisteredTarget(target))
    }

    /// Registered backends in registration order.
    pub fn backends(&self) -> impl Iterator<Item = &Backend> {
        self.backends.values()
    }

    pub fn targets(&self) -> Vec<Target> {
        self.backends.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
