//! Validate command implementation.

use anyhow::{Context, Result};
use gear_lint_core::{Analyzer, Reporter};
use gear_lint_rules::default_registry;
use std::path::Path;

use crate::config_resolver;
use crate::OutputFormat;

/// Runs the validate command and returns the process exit status.
pub fn run(
    path: &Path,
    exclude: Vec<String>,
    format: OutputFormat,
    explicit_config: Option<&Path>,
) -> Result<u8> {
    let mut builder = Analyzer::builder()
        .root(path)
        .registry(default_registry())
        .excludes(exclude);
    if let Some(config) = config_resolver::locate(path, explicit_config) {
        tracing::info!("Using configuration {}", config.display());
        builder = builder.config_file(config);
    }

    let analyzer = builder
        .build()
        .with_context(|| format!("Failed to prepare validation of {}", path.display()))?;

    tracing::info!(
        "Validating {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Validation failed")?;
    let report = Reporter::new(analyzer.config()).report(result.diagnostics, result.files_checked);

    super::output::print(&report, format)?;

    Ok(report.exit_code())
}
