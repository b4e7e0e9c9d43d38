//! Domain boundary checks.
//!
//! Currently an extension point: it inspects every domain directory under
//! `layout.domains_dir` and logs the canonical layers it cannot find, but
//! never emits diagnostics.

use gear_lint_core::{Diagnostic, Package, Rule, RuleContext, Severity};
use tracing::debug;

/// Rule code for domain-boundaries.
pub const CODE: &str = "R04";

/// Rule name for domain-boundaries.
pub const NAME: &str = "domain-boundaries";

/// Inspects domain layering without reporting.
#[derive(Debug, Clone, Default)]
pub struct DomainBoundaries;

impl DomainBoundaries {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DomainBoundaries {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Domain boundaries: clean layer separation"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, _ctx: &RuleContext<'_>, _package: &Package) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_tree(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let layout = &ctx.config.layout;
        let domains = ctx.root.join(&layout.domains_dir);
        let Ok(entries) = std::fs::read_dir(&domains) else {
            debug!("No domains directory at {}", domains.display());
            return Vec::new();
        };

        let mut dirs: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        for domain in dirs {
            let missing: Vec<&str> = layout
                .domain_layers
                .iter()
                .map(String::as_str)
                .filter(|layer| !domain.join(layer).is_dir())
                .collect();
            if !missing.is_empty() {
                debug!("Domain {} lacks layers: {missing:?}", domain.display());
            }
        }
        Vec::new()
    }
}
