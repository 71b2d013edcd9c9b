use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::parser::{self, is_type_file, type_file_stem};
use crate::types::error::{ErrorEntry, ValidationReport, E_PARSE_ERROR};
use crate::types::system::TypeSystem;

/// A type system read from disk
#[derive(Debug, Clone)]
pub struct LoadedSystem {
    /// Short name derived from the file name (`chat.types.json` -> `chat`)
    pub name: String,
    /// Path relative to the directory it was loaded from
    pub file: String,
    pub system: TypeSystem,
}

/// Load a single serialized type system.
#[allow(clippy::result_large_err)]
pub fn load_type_system(path: &Path) -> Result<TypeSystem, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let display = path.to_string_lossy().into_owned();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parser::parse_type_system(&content, &display).map_err(|entries| LoadError::Invalid {
        file: display,
        entries,
    })
}

/// Load every `*.types.json` file below `dir`, in path order.
/// Accumulates per-file errors instead of failing on the first one.
#[allow(clippy::result_large_err)]
pub fn load_directory(dir: &Path) -> Result<(Vec<LoadedSystem>, ValidationReport), LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotFound(dir.to_path_buf()));
    }

    let mut report = ValidationReport::success();
    let mut systems = Vec::new();

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if !is_type_file(path) {
            continue;
        }

        let rel_path = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                report.push(ErrorEntry::error(
                    E_PARSE_ERROR,
                    format!("Failed to read file: {e}"),
                    &rel_path,
                    "$",
                ));
                continue;
            }
        };

        match parser::parse_type_system(&content, &rel_path) {
            Ok(system) => systems.push(LoadedSystem {
                name: type_file_stem(path).unwrap_or_else(|| rel_path.clone()),
                file: rel_path,
                system,
            }),
            Err(entries) => {
                for e in entries {
                    report.push(e);
                }
            }
        }
    }

    Ok((systems, report))
}

/// Errors that prevent loading entirely
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Type system not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid type system {file}: {}", first_message(.entries))]
    Invalid {
        file: String,
        entries: Vec<ErrorEntry>,
    },
}

fn first_message(entries: &[ErrorEntry]) -> String {
    match entries {
        [] => "unknown error".to_string(),
        [only] => format!("{} at {}", only.message, only.path),
        [first, rest @ ..] => format!(
            "{} at {} (and {} more)",
            first.message,
            first.path,
            rest.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POSITION: &str = r#"{
        "namespace": "com.example",
        "types": [
            {
                "name": "Position",
                "properties": [
                    { "name": "line", "type": { "kind": "primitive", "typeName": "number" }, "isRequired": true }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_load_single_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("position.types.json");
        std::fs::write(&path, POSITION).unwrap();

        let system = load_type_system(&path).unwrap();
        assert_eq!(system.len(), 1);
        assert_eq!(system.namespace.as_deref(), Some("com.example"));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_type_system(&tmp.path().join("missing.types.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file_reports_entries() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.types.json");
        std::fs::write(&path, "{ \"types\": 42 }").unwrap();

        match load_type_system(&path).unwrap_err() {
            LoadError::Invalid { entries, .. } => assert!(!entries.is_empty()),
            e => panic!("Expected Invalid, got: {e:?}"),
        }
    }

    #[test]
    fn test_load_directory_accumulates_errors() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("a.types.json"), POSITION).unwrap();
        std::fs::write(nested.join("b.types.json"), "{ broken").unwrap();
        std::fs::write(tmp.path().join("notes.json"), "{}").unwrap();

        let (systems, report) = load_directory(tmp.path()).unwrap();
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].name, "a");
        assert_eq!(systems[0].file, "a.types.json");
        assert!(!report.ok);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, E_PARSE_ERROR);
    }

    #[test]
    fn test_load_directory_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load_directory(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
