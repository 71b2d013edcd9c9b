use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use typegen_codegen::{ComponentPolicy, Target};

/// File picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "typegen.config.json";

/// Output directory used when neither flag nor config names one.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Contents of `typegen.config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Type system file, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    /// Output root, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Target>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_policy: Option<ComponentPolicy>,
}

impl Config {
    /// Read a config file and resolve its paths against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let mut config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config '{}'", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.input = config.input.map(|p| base.join(p));
        config.output = config.output.map(|p| base.join(p));
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `explicit` if given, else `typegen.config.json` in `cwd` if present.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let candidate = cwd.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
