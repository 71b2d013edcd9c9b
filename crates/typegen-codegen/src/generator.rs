use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use typegen_model::{TypeDefinition, TypeSystem};

use crate::error::CodegenError;
use crate::registry::{BackendRegistry, Target};
use crate::traits::LanguageEmitter;

/// Generated files keyed by relative file name, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    files: IndexMap<String, String>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. A second file with the same name replaces the first in place.
    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        trace!(file = %name, bytes = content.len(), "rendered file");
        self.files.insert(name, content);
    }

    pub fn files(&self) -> &IndexMap<String, String> {
        &self.files
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for GeneratedFiles {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// What to do with types that exist only as a union arm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentPolicy {
    /// Follow each backend's convention
    #[default]
    #[serde(rename = "default")]
    BackendDefault,
    /// Never emit a standalone declaration for a component
    Suppress,
    /// Always emit components
    Emit,
}

impl fmt::Display for ComponentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentPolicy::BackendDefault => write!(f, "default"),
            ComponentPolicy::Suppress => write!(f, "suppress"),
            ComponentPolicy::Emit => write!(f, "emit"),
        }
    }
}

impl FromStr for ComponentPolicy {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ComponentPolicy::BackendDefault),
            "suppress" => Ok(ComponentPolicy::Suppress),
            "emit" => Ok(ComponentPolicy::Emit),
            _ => Err(CodegenError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Options shared by every backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitOptions {
    #[serde(default)]
    pub component_policy: ComponentPolicy,
}

impl EmitOptions {
    pub fn with_component_policy(mut self, policy: ComponentPolicy) -> Self {
        self.component_policy = policy;
        self
    }

    /// Whether `emitter` should skip union components under these options.
    pub fn suppresses(&self, emitter: &dyn LanguageEmitter) -> bool {
        match self.component_policy {
            ComponentPolicy::BackendDefault => emitter.suppresses_union_components(),
            ComponentPolicy::Suppress => true,
            ComponentPolicy::Emit => false,
        }
    }
}

/// Types that get a standalone declaration, in declaration order.
pub fn eligible_types<'a>(
    emitter: &dyn LanguageEmitter,
    system: &'a TypeSystem,
    options: &EmitOptions,
) -> Vec<&'a TypeDefinition> {
    let suppress = options.suppresses(emitter);
    system
        .types
        .iter()
        .filter(|def| {
            if suppress && def.is_union_component_only {
                debug!(target_lang = %emitter.target(), type_name = %def.name, "suppressed union component");
                false
            } else {
                debug!(target_lang = %emitter.target(), type_name = %def.name, "emitting type");
                true
            }
        })
        .collect()
}

/// Runs registered backends over a type system.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    registry: BackendRegistry,
    options: EmitOptions,
}

impl CodeGenerator {
    /// A generator over the built-in backends.
    pub fn new(options: EmitOptions) -> Self {
        Self::with_registry(BackendRegistry::builtin(), options)
    }

    pub fn with_registry(registry: BackendRegistry, options: EmitOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Generate files for one target.
    pub fn generate(
        &self,
        target: Target,
        system: &TypeSystem,
    ) -> Result<GeneratedFiles, CodegenError> {
        let backend = self.registry.get(target)?;
        debug!(target_lang = %target, types = system.len(), "generating");
        Ok((backend.generate)(system, &self.options))
    }

    /// Generate files for each target, in the order given.
    pub fn generate_all(
        &self,
        targets: &[Target],
        system: &TypeSystem,
    ) -> Result<Vec<(Target, GeneratedFiles)>, CodegenError> {
        targets
            .iter()
            .map(|&target| Ok((target, self.generate(target, system)?)))
            .collect()
    }
}
