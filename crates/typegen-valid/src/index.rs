use std::collections::HashMap;

use typegen_model::{TypeDefinition, TypeSystem};

/// Name lookup over a type system.
///
/// Keeps every position a name was defined at, so duplicates can be reported.
#[derive(Debug, Clone)]
pub struct TypeIndex<'a> {
    by_name: HashMap<&'a str, Vec<(usize, &'a TypeDefinition)>>,
}

impl<'a> TypeIndex<'a> {
    pub fn build(system: &'a TypeSystem) -> Self {
        let mut by_name: HashMap<&'a str, Vec<(usize, &'a TypeDefinition)>> = HashMap::new();
        for (i, def) in system.types.iter().enumerate() {
            by_name.entry(def.name.as_str()).or_default().push((i, def));
        }
        Self { by_name }
    }

    /// First definition with this name.
    pub fn resolve(&self, name: &str) -> Option<&'a TypeDefinition> {
        self.by_name
            .get(name)
            .and_then(|defs| defs.first())
            .map(|(_, def)| *def)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Names defined more than once, with every index they appear at,
    /// ordered by first appearance.
    pub fn duplicates(&self) -> Vec<(&'a str, Vec<usize>)> {
        let mut dups: Vec<(&'a str, Vec<usize>)> = self
            .by_name
            .iter()
            .filter(|(_, defs)| defs.len() > 1)
            .map(|(name, defs)| (*name, defs.iter().map(|(i, _)| *i).collect()))
            .collect();
        dups.sort_by_key(|(_, positions)| positions[0]);
        dups
    }
}
