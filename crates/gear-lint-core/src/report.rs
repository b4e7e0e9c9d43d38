//! Diagnostic reporting.
//!
//! Applies severity overrides, orders diagnostics deterministically, counts
//! them and renders the result.

use serde::Serialize;
use std::fmt::Write as _;

use crate::config::Config;
use crate::types::{Diagnostic, Severity};

/// Marker printed when a run is clean.
const CLEAN_MESSAGE: &str = "✅ All GEAR rules validated successfully!";

/// Counts of diagnostics per effective severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Diagnostics at error severity.
    pub errors: usize,
    /// Diagnostics at warning severity.
    pub warnings: usize,
    /// Diagnostics at info severity.
    pub infos: usize,
}

impl Summary {
    fn count(diagnostics: &[Diagnostic]) -> Self {
        diagnostics
            .iter()
            .fold(Self::default(), |mut acc, d| {
                match d.severity {
                    Severity::Error => acc.errors += 1,
                    Severity::Warning => acc.warnings += 1,
                    Severity::Info => acc.infos += 1,
                }
                acc
            })
    }
}

/// Final, ordered outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Diagnostics with effective severities, in output order.
    pub diagnostics: Vec<Diagnostic>,
    /// Counts per severity.
    pub summary: Summary,
    /// Number of files that were parsed and checked.
    pub files_checked: usize,
}

impl Report {
    /// Whether any diagnostic has error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Process exit status: 1 if any error remains, else 0.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_errors())
    }

    /// Renders the human-readable report.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.diagnostics.is_empty() {
            let _ = writeln!(out, "{CLEAN_MESSAGE}");
        } else {
            for diagnostic in &self.diagnostics {
                let _ = writeln!(out, "{diagnostic}");
                if let Some(help) = &diagnostic.help {
                    let _ = writeln!(out, "    help: {help}");
                }
            }
        }
        let _ = writeln!(
            out,
            "\nSummary: {} errors, {} warnings",
            self.summary.errors, self.summary.warnings
        );
        out
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Turns raw diagnostics into a [`Report`].
pub struct Reporter<'a> {
    config: &'a Config,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter applying the overrides in `config`.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Applies overrides, sorts and counts.
    #[must_use]
    pub fn report(&self, mut diagnostics: Vec<Diagnostic>, files_checked: usize) -> Report {
        for d in &mut diagnostics {
            if let Some(severity) = self.config.rule_severity(&d.code, &d.rule) {
                d.severity = severity;
            }
        }

        diagnostics.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.message.cmp(&b.message))
        });

        Report {
            summary: Summary::count(&diagnostics),
            diagnostics,
            files_checked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Position};

    fn diag(code: &str, severity: Severity, file: &str, line: usize, message: &str) -> Diagnostic {
        Diagnostic::new(
            code,
            match code {
                "R01" => "interface-contracts",
                "R02" => "interface-usage",
                _ => "centralized-config",
            },
            severity,
            Location::new(file, Position::new(line, 2)),
            message,
        )
    }

    fn sample() -> Vec<Diagnostic> {
        vec![
            diag("R02", Severity::Error, "pkg/b.go", 3, "pointer to interface"),
            diag("R01", Severity::Warning, "pkg/a.go", 9, "exported struct"),
            Diagnostic::new(
                "R05",
                "centralized-config",
                Severity::Error,
                Location::file("internal/config"),
                "missing centralized configuration package (expected internal/config)",
            ),
            diag("R01", Severity::Warning, "pkg/a.go", 2, "exported struct"),
        ]
    }

    #[test]
    fn sorts_by_location_then_code() {
        let report = Reporter::new(&Config::default()).report(sample(), 2);
        let order: Vec<String> = report
            .diagnostics
            .iter()
            .map(|d| d.location.to_string())
            .collect();
        assert_eq!(
            order,
            vec!["internal/config", "pkg/a.go:2:2", "pkg/a.go:9:2", "pkg/b.go:3:2"]
        );
    }

    #[test]
    fn ties_break_on_code_and_message() {
        let diagnostics = vec![
            diag("R02", Severity::Error, "a.go", 1, "b"),
            diag("R02", Severity::Error, "a.go", 1, "a"),
            diag("R01", Severity::Error, "a.go", 1, "z"),
        ];
        let report = Reporter::new(&Config::default()).report(diagnostics, 1);
        let keys: Vec<(&str, &str)> = report
            .diagnostics
            .iter()
            .map(|d| (d.code.as_str(), d.message.as_str()))
            .collect();
        assert_eq!(keys, vec![("R01", "z"), ("R02", "a"), ("R02", "b")]);
    }

    #[test]
    fn counts_and_exit_code() {
        let report = Reporter::new(&Config::default()).report(sample(), 2);
        assert_eq!(
            report.summary,
            Summary {
                errors: 2,
                warnings: 2,
                infos: 0
            }
        );
        assert_eq!(report.exit_code(), 1);

        let clean = Reporter::new(&Config::default()).report(vec![], 0);
        assert_eq!(clean.exit_code(), 0);
    }

    #[test]
    fn overrides_by_code_and_name() {
        let config = Config::parse_yaml(
            "rules:\n  R02: warning\n  centralized-config: info\n",
        )
        .expect("Failed to parse");
        let report = Reporter::new(&config).report(sample(), 2);
        assert_eq!(report.summary.errors, 0);
        assert_eq!(report.summary.warnings, 3);
        assert_eq!(report.summary.infos, 1);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn override_can_raise_to_error() {
        let config = Config::parse_yaml("rules:\n  R01: error\n").expect("Failed to parse");
        let report = Reporter::new(&config).report(sample(), 2);
        assert_eq!(report.summary.errors, 4);
    }

    #[test]
    fn renders_text() {
        let report = Reporter::new(&Config::default()).report(sample(), 2);
        insta::assert_snapshot!(report.render_text(), @r"
        ❌ [R05] internal/config - missing centralized configuration package (expected internal/config)
        ⚠️ [R01] pkg/a.go:2:2 - exported struct
        ⚠️ [R01] pkg/a.go:9:2 - exported struct
        ❌ [R02] pkg/b.go:3:2 - pointer to interface

        Summary: 2 errors, 2 warnings
        ");
    }

    #[test]
    fn renders_clean_run() {
        let report = Reporter::new(&Config::default()).report(vec![], 4);
        insta::assert_snapshot!(report.render_text(), @r"
        ✅ All GEAR rules validated successfully!

        Summary: 0 errors, 0 warnings
        ");
    }

    #[test]
    fn renders_json() {
        let report = Reporter::new(&Config::default()).report(sample(), 2);
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().expect("Failed to serialize")).unwrap();
        assert_eq!(value["summary"]["errors"], 2);
        assert_eq!(value["files_checked"], 2);
        assert_eq!(value["diagnostics"][0]["code"], "R05");
        assert!(value["diagnostics"][0]["location"].get("line").is_none());
        assert_eq!(value["diagnostics"][3]["severity"], "error");
    }
}
