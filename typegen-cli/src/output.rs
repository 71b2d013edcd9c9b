use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use typegen_codegen::GeneratedFiles;

/// Check that a generated file name stays inside its output directory.
pub fn safe_relative_path(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    if name.is_empty() {
        bail!("Generated file name must not be empty");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            _ => bail!("Generated file name '{name}' escapes the output directory"),
        }
    }
    Ok(path)
}

/// Write every file below `dir`, creating directories as needed.
///
/// All names are checked before the first write, so a bad name leaves
/// the directory untouched.
pub fn write_files(dir: &Path, files: &GeneratedFiles) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::with_capacity(files.file_count());
    for (name, content) in files.files() {
        targets.push((dir.join(safe_relative_path(name)?), content));
    }

    let mut written = Vec::with_capacity(targets.len());
    for (path, content) in targets {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote file");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_safe_relative_path() {
        assert!(safe_relative_path("Types.kt").is_ok());
        assert!(safe_relative_path("nested/Types.kt").is_ok());
        assert!(safe_relative_path("../escape.ts").is_err());
        assert!(safe_relative_path("/etc/passwd").is_err());
        assert!(safe_relative_path("").is_err());
    }

    #[test]
    fn test_write_files_creates_directories() {
        let tmp = TempDir::new().unwrap();
        let mut files = GeneratedFiles::new();
        files.add_file("types.ts", "export {};\n");

        let dir = tmp.path().join("out/typescript");
        let written = write_files(&dir, &files).unwrap();
        assert_eq!(written, vec![dir.join("types.ts")]);
        assert_eq!(
            std::fs::read_to_string(dir.join("types.ts")).unwrap(),
            "export {};\n"
        );
    }

    #[test]
    fn test_bad_name_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut files = GeneratedFiles::new();
        files.add_file("Good.java", "ok");
        files.add_file("../Bad.java", "nope");

        let dir = tmp.path().join("java");
        assert!(write_files(&dir, &files).is_err());
        assert!(!dir.exists());
        assert!(!tmp.path().join("Bad.java").exists());
    }
}
