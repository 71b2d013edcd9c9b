use serde::{Deserialize, Serialize};

// ── Error code constants ──

pub const E_PARSE_ERROR: &str = "E_PARSE_ERROR";
pub const E_SCHEMA_VIOLATION: &str = "E_SCHEMA_VIOLATION";
pub const E_DUPLICATE_TYPE: &str = "E_DUPLICATE_TYPE";
pub const W_UNRESOLVED_REF: &str = "W_UNRESOLVED_REF";
pub const W_UNRESOLVED_PARENT: &str = "W_UNRESOLVED_PARENT";
pub const W_EMPTY_UNION: &str = "W_EMPTY_UNION";
pub const W_UNKNOWN_COMPONENT: &str = "W_UNKNOWN_COMPONENT";
pub const W_NESTED_UNION: &str = "W_NESTED_UNION";
pub const W_UNKNOWN_KIND: &str = "W_UNKNOWN_KIND";
pub const W_INVALID_IDENTIFIER: &str = "W_INVALID_IDENTIFIER";

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single parse or validation diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Machine-readable stable code
    pub code: String,
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// File the diagnostic belongs to (empty for in-memory systems)
    pub file: String,
    /// JSONPath to the offending value
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Aggregated diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `false` as soon as one entry has `Severity::Error`
    pub ok: bool,
    pub errors: Vec<ErrorEntry>,
}

impl ValidationReport {
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<ErrorEntry>) -> Self {
        let ok = !errors.iter().any(|e| e.severity == Severity::Error);
        Self { ok, errors }
    }

    /// Add an entry and update the ok flag
    pub fn push(&mut self, entry: ErrorEntry) {
        if entry.severity == Severity::Error {
            self.ok = false;
        }
        self.errors.push(entry);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        for entry in other.errors {
            self.push(entry);
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.ok
    }
}

impl ErrorEntry {
    pub fn error(code: &str, message: impl Into<String>, file: &str, path: &str) -> Self {
        Self::new(code, Severity::Error, message, file, path)
    }

    pub fn warning(code: &str, message: impl Into<String>, file: &str, path: &str) -> Self {
        Self::new(code, Severity::Warning, message, file, path)
    }

    fn new(
        code: &str,
        severity: Severity,
        message: impl Into<String>,
        file: &str,
        path: &str,
    ) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message: message.into(),
            file: file.to_string(),
            path: path.to_string(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
