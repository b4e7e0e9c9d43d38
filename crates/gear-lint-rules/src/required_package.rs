//! Rules requiring a designated package directory to exist.
//!
//! The directory is taken from the configured [`Layout`] and is found when it
//! exists at the root or as the trailing segments of any nested directory.
//! A missing directory is reported once per run, without line or column.

use gear_lint_core::{Diagnostic, Layout, Location, Package, Rule, RuleContext, Severity};
use tracing::debug;

/// Requires a layout directory to be present in the tree.
#[derive(Clone)]
pub struct RequiredPackage {
    code: &'static str,
    name: &'static str,
    description: &'static str,
    purpose: &'static str,
    dir: fn(&Layout) -> &str,
}

impl RequiredPackage {
    /// Creates a rule requiring the directory selected by `dir`.
    ///
    /// `purpose` completes the message "GEAR requires ...".
    #[must_use]
    pub fn new(
        code: &'static str,
        name: &'static str,
        description: &'static str,
        purpose: &'static str,
        dir: fn(&Layout) -> &str,
    ) -> Self {
        Self {
            code,
            name,
            description,
            purpose,
            dir,
        }
    }
}

impl Rule for RequiredPackage {
    fn code(&self) -> &'static str {
        self.code
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn check(&self, _ctx: &RuleContext<'_>, _package: &Package) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_tree(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let dir = (self.dir)(&ctx.config.layout);
        if ctx.has_dir(dir) {
            debug!("Found required package {dir}");
            return Vec::new();
        }
        vec![Diagnostic::new(
            self.code,
            self.name,
            Severity::Error,
            Location::file(dir),
            format!("Missing {dir} package - GEAR requires {}", self.purpose),
        )]
    }
}
