//! Core types for diagnostics and lint results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that fails the run.
    Error,
}

impl Severity {
    /// Returns the marker printed in front of a diagnostic line.
    #[must_use]
    pub fn mark(self) -> &'static str {
        match self {
            Self::Error => "❌",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A 1-indexed line/column pair inside a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Where a diagnostic points.
///
/// File-level findings (a missing package directory, for instance) carry no
/// line or column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the validated root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Column number (1-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Location {
    /// Creates a location at a position inside a file.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, position: Position) -> Self {
        Self {
            file: file.into(),
            line: Some(position.line),
            column: Some(position.column),
        }
    }

    /// Creates a file-level location without line or column.
    #[must_use]
    pub fn file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            line: None,
            column: None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, ":{line}:{column}")?;
        }
        Ok(())
    }
}

/// A finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "R02").
    pub code: String,
    /// Rule name (e.g., "interface-usage").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Where the finding is.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional hint on how to fix the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            help: None,
        }
    }

    /// Adds a help hint to this diagnostic.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {} - {}",
            self.severity.mark(),
            self.code,
            self.location,
            self.message
        )
    }
}

/// Raw result of running the rules over a tree, before severity overrides.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All diagnostics found, in production order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of source files loaded successfully.
    pub files_checked: usize,
    /// Number of packages the rules ran against.
    pub packages_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_diagnostic(location: Location) -> Diagnostic {
        Diagnostic::new(
            "R02",
            "interface-usage",
            Severity::Error,
            location,
            "pointer to interface",
        )
    }

    #[test]
    fn display_includes_position() {
        let d = make_diagnostic(Location::new("pkg/a.go", Position::new(3, 7)));
        assert_eq!(d.to_string(), "❌ [R02] pkg/a.go:3:7 - pointer to interface");
    }

    #[test]
    fn display_omits_missing_position() {
        let d = make_diagnostic(Location::file("internal/config"));
        assert_eq!(d.to_string(), "❌ [R02] internal/config - pointer to interface");
    }

    #[test]
    fn severity_orders_info_below_error() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn with_help_sets_value() {
        let d = make_diagnostic(Location::file("a.go")).with_help("use Repo");
        assert_eq!(d.help.as_deref(), Some("use Repo"));
    }

}
