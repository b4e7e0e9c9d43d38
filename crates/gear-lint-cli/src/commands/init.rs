//! Config command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# GEAR validation configuration
exclude:
  - "vendor"
  - "*_test.go"
  - "*.pb.go"
  - "scripts"
  - "docs"

rules:
  R01: "warning"  # Interface contracts (exported interfaces, unexported structs)
  R02: "error"    # Interface usage (no pointer-to-interface anti-patterns)
  R03: "warning"  # Constructor patterns (returning interfaces)
  R04: "info"     # Domain boundaries (clean layer separation)
  R05: "error"    # Centralized configuration (internal/config package)
  R06: "error"    # Systematic error handling (internal/errors package)
"#;

/// Runs the config command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new("."), force)?;

    println!("✅ .gearrc configuration file created successfully!");
    println!("\nNext steps:");
    println!("  1. Edit .gearrc to adjust exclusions and severities");
    println!("  2. Run: gear validate");

    Ok(())
}

fn write_default(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(".gearrc");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_lint_core::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse_yaml(DEFAULT_CONFIG).expect("Failed to parse default config");
        assert_eq!(config.exclude.len(), 5);
        assert_eq!(config.rules.len(), 6);
        assert_eq!(config.rules.get("R04"), Some(&Severity::Info));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(tmp.path().join(".gearrc"), "rules: {}\n").expect("Failed to write");

        assert!(write_default(tmp.path(), false).is_err());
        let kept = std::fs::read_to_string(tmp.path().join(".gearrc")).expect("Failed to read");
        assert_eq!(kept, "rules: {}\n");

        write_default(tmp.path(), true).expect("Failed to overwrite");
        let written = std::fs::read_to_string(tmp.path().join(".gearrc")).expect("Failed to read");
        assert_eq!(written, DEFAULT_CONFIG);
    }
}
