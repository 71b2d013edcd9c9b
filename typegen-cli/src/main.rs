mod config;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use typegen_codegen::{BackendRegistry, CodeGenerator, ComponentPolicy, EmitOptions, Target};
use typegen_model::loader::{self, LoadError};
use typegen_model::{catalog, ErrorEntry, Severity, TypeSystem};

use crate::config::{Config, DEFAULT_OUTPUT_DIR};

#[derive(Parser)]
#[command(name = "typegen", about = "typegen – type declarations for many languages")]
#[command(version, propagate_version = true)]
struct Cli {
    /// Log generation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate declarations for one or more targets
    Generate {
        /// Type system file (`*.types.json`)
        #[arg(short, long, conflicts_with = "builtin")]
        input: Option<PathBuf>,
        /// Use a built-in type system instead of a file
        #[arg(short, long)]
        builtin: Option<String>,
        /// Output root; each target writes to <OUTPUT>/<target>
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Target language (repeatable; defaults to all)
        #[arg(short, long = "target")]
        targets: Vec<String>,
        /// How to treat types that only exist as a union arm
        #[arg(long)]
        component_policy: Option<String>,
        /// Config file (defaults to ./typegen.config.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load and validate a type system file or directory
    Check {
        path: PathBuf,
    },
    /// Print the JSON Schema of the type system format
    Schema,
    /// List available targets
    Targets,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate {
            input,
            builtin,
            output,
            targets,
            component_policy,
            config,
        } => GenerateArgs {
            input,
            builtin,
            output,
            targets,
            component_policy,
            config,
        }
        .resolve(Path::new("."))
        .and_then(|settings| cmd_generate(&settings)),
        Command::Check { path } => cmd_check(&path),
        Command::Schema => cmd_schema(),
        Command::Targets => cmd_targets(),
    };

    match result {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

/// Where the type system comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    File(PathBuf),
    Builtin(String),
}

/// Raw `generate` arguments before config merging.
#[derive(Debug, Default)]
struct GenerateArgs {
    input: Option<PathBuf>,
    builtin: Option<String>,
    output: Option<PathBuf>,
    targets: Vec<String>,
    component_policy: Option<String>,
    config: Option<PathBuf>,
}

/// Fully resolved `generate` settings. Flags win over config values.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GenerateSettings {
    source: Source,
    output: PathBuf,
    targets: Vec<Target>,
    options: EmitOptions,
}

impl GenerateArgs {
    fn resolve(self, cwd: &Path) -> Result<GenerateSettings> {
        let config = Config::discover(self.config.as_deref(), cwd)?;

        let source = match (self.builtin, self.input, config.input) {
            (Some(name), _, _) => Source::Builtin(name),
            (None, Some(path), _) | (None, None, Some(path)) => Source::File(path),
            (None, None, None) => anyhow::bail!(
                "No type system given: pass --input FILE, --builtin NAME, or set \"input\" in the config"
            ),
        };

        let targets = if !self.targets.is_empty() {
            self.targets
                .iter()
                .map(|t| t.parse::<Target>())
                .collect::<Result<Vec<_>, _>>()?
        } else {
            config.targets.unwrap_or_else(|| Target::ALL.to_vec())
        };

        let policy = match self.component_policy {
            Some(p) => p.parse::<ComponentPolicy>()?,
            None => config.component_policy.unwrap_or_default(),
        };

        let output = self
            .output
            .or(config.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(GenerateSettings {
            source,
            output,
            targets: dedup(targets),
            options: EmitOptions::default().with_component_policy(policy),
        })
    }
}

fn dedup(targets: Vec<Target>) -> Vec<Target> {
    let mut seen = Vec::with_capacity(targets.len());
    for target in targets {
        if !seen.contains(&target) {
            seen.push(target);
        }
    }
    seen
}

fn load_source(source: &Source) -> Result<(TypeSystem, String)> {
    match source {
        Source::Builtin(name) => {
            let system = catalog::builtin(name).with_context(|| {
                format!(
                    "Unknown built-in type system '{name}' (available: {})",
                    catalog::BUILTIN_NAMES.join(", ")
                )
            })?;
            Ok((system, format!("builtin:{name}")))
        }
        Source::File(path) => {
            let system = loader::load_type_system(path)
                .with_context(|| format!("Failed to load type system '{}'", path.display()))?;
            Ok((system, path.display().to_string()))
        }
    }
}

fn cmd_generate(settings: &GenerateSettings) -> Result<bool> {
    let (system, label) = load_source(&settings.source)?;
    println!("{} {}", "Generating from".bold(), label);

    let report = typegen_valid::validate(&system, &label);
    print_entries(&report.errors);
    if report.has_errors() {
        eprintln!(
            "{} {} validation error(s); fix them before generating",
            "✗".red().bold(),
            report.count(Severity::Error)
        );
        return Ok(false);
    }

    let generator = CodeGenerator::new(settings.options);
    let results = generator.generate_all(&settings.targets, &system)?;

    // Reject the whole batch before anything touches the disk
    for (_, files) in &results {
        for name in files.files().keys() {
            output::safe_relative_path(name)?;
        }
    }

    for (target, files) in &results {
        let dir = settings.output.join(target.as_str());
        let written = output::write_files(&dir, files)
            .with_context(|| format!("Failed to write {target} output"))?;
        println!(
            "{} {}: {} file(s) → {}",
            "✓".green().bold(),
            target,
            written.len(),
            dir.display()
        );
        for name in files.files().keys() {
            println!("  {} {}", "→".dimmed(), name);
        }
    }

    Ok(true)
}

fn cmd_check(path: &Path) -> Result<bool> {
    println!(
        "{} {}",
        "Checking".bold(),
        path.canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
    );

    let mut entries: Vec<ErrorEntry> = Vec::new();
    let mut type_count = 0;

    if path.is_dir() {
        let (systems, load_report) = loader::load_directory(path)
            .with_context(|| format!("Failed to load '{}'", path.display()))?;
        entries.extend(load_report.errors);
        for loaded in &systems {
            type_count += loaded.system.len();
            entries.extend(typegen_valid::validate(&loaded.system, &loaded.file).errors);
        }
    } else {
        match loader::load_type_system(path) {
            Ok(system) => {
                type_count = system.len();
                let file = path.display().to_string();
                entries.extend(typegen_valid::validate(&system, &file).errors);
            }
            Err(LoadError::Invalid { entries: invalid, .. }) => entries.extend(invalid),
            Err(e) => return Err(e).context("Failed to load type system"),
        }
    }

    print_entries(&entries);

    let error_count = entries.iter().filter(|e| e.severity == Severity::Error).count();
    let warning_count = entries.iter().filter(|e| e.severity == Severity::Warning).count();

    println!();
    if error_count == 0 && warning_count == 0 {
        println!("{} Type system is valid ({} types)", "✓".green().bold(), type_count);
        Ok(true)
    } else if error_count == 0 {
        println!("{} Valid with {} warning(s)", "⚠".yellow().bold(), warning_count);
        Ok(true)
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            "✗".red().bold(),
            error_count,
            warning_count
        );
        Ok(false)
    }
}

fn print_entries(entries: &[ErrorEntry]) {
    for entry in entries {
        let severity = match entry.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        println!(
            "  {} [{}] {} ({}:{})",
            severity,
            entry.code.dimmed(),
            entry.message,
            entry.file.dimmed(),
            entry.path.dimmed(),
        );
        if let Some(suggestion) = &entry.suggestion {
            println!("    {} {}", "hint:".cyan(), suggestion);
        }
    }
}

fn cmd_schema() -> Result<bool> {
    let schema = typegen_model::schema_def::generate_type_system_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(true)
}

fn cmd_targets() -> Result<bool> {
    println!("{}", "Targets".bold().underline());
    for backend in BackendRegistry::builtin().backends() {
        println!("  {:<12} {}", backend.target.to_string(), backend.layout.to_string().dimmed());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn resolve_defaults_to_all_targets() {
        let tmp = TempDir::new().unwrap();
        let settings = GenerateArgs {
            builtin: Some("chat".to_string()),
            ..Default::default()
        }
        .resolve(tmp.path())
        .unwrap();

        assert_eq!(settings.source, Source::Builtin("chat".to_string()));
        assert_eq!(settings.targets, Target::ALL.to_vec());
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(settings.options, EmitOptions::default());
    }

    #[test]
    fn resolve_flags_override_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(config::CONFIG_FILE_NAME),
            r#"{ "input": "chat.types.json", "targets": ["java"], "componentPolicy": "emit" }"#,
        )
        .unwrap();

        let settings = GenerateArgs {
            targets: vec!["ts".to_string(), "typescript".to_string(), "kotlin".to_string()],
            component_policy: Some("suppress".to_string()),
            ..Default::default()
        }
        .resolve(tmp.path())
        .unwrap();

        assert_eq!(
            settings.source,
            Source::File(tmp.path().join("chat.types.json"))
        );
        assert_eq!(settings.targets, vec![Target::TypeScript, Target::Kotlin]);
        assert_eq!(
            settings.options.component_policy,
            ComponentPolicy::Suppress
        );
    }

    #[test]
    fn resolve_requires_a_source() {
        let tmp = TempDir::new().unwrap();
        assert!(GenerateArgs::default().resolve(tmp.path()).is_err());
    }

    #[test]
    fn resolve_rejects_unknown_target() {
        let tmp = TempDir::new().unwrap();
        let err = GenerateArgs {
            builtin: Some("chat".to_string()),
            targets: vec!["cobol".to_string()],
            ..Default::default()
        }
        .resolve(tmp.path())
        .unwrap_err();
        assert!(err.to_string().contains("unknown target 'cobol'"));
    }

    #[test]
    fn generate_writes_each_target_dir() {
        let tmp = TempDir::new().unwrap();
        let settings = GenerateSettings {
            source: Source::File(fixture("chat.types.json")),
            output: tmp.path().to_path_buf(),
            targets: Target::ALL.to_vec(),
            options: EmitOptions::default(),
        };

        assert!(cmd_generate(&settings).unwrap());
        assert!(tmp.path().join("typescript/types.ts").is_file());
        assert!(tmp.path().join("kotlin/Types.kt").is_file());
        assert!(tmp.path().join("csharp/Types.cs").is_file());
        assert!(tmp.path().join("java/ChatParams.java").is_file());
        assert!(!tmp.path().join("java/CursorStateWithRange.java").exists());
    }

    #[test]
    fn generate_refuses_invalid_system() {
        let tmp = TempDir::new().unwrap();
        let settings = GenerateSettings {
            source: Source::File(fixture("broken.types.json")),
            output: tmp.path().join("out"),
            targets: vec![Target::TypeScript],
            options: EmitOptions::default(),
        };

        assert!(!cmd_generate(&settings).unwrap());
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn generate_unknown_builtin_fails() {
        let settings = GenerateSettings {
            source: Source::Builtin("nope".to_string()),
            output: PathBuf::from("unused"),
            targets: vec![Target::Java],
            options: EmitOptions::default(),
        };
        let err = cmd_generate(&settings).unwrap_err();
        assert!(format!("{err:#}").contains("available: chat"));
    }

    #[test]
    fn check_fixtures() {
        assert!(cmd_check(&fixture("chat.types.json")).unwrap());
        assert!(!cmd_check(&fixture("broken.types.json")).unwrap());
        assert!(!cmd_check(&fixture("")).unwrap());
    }

    #[test]
    fn check_reports_unparsable_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.types.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(!cmd_check(&path).unwrap());
    }

    #[test]
    fn check_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(cmd_check(&tmp.path().join("missing.types.json")).is_err());
    }
}
