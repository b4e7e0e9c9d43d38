//! Rule trait for defining architecture rules.

use crate::context::RuleContext;
use crate::model::Package;
use crate::types::{Diagnostic, Severity};

/// An architecture rule checked against the loaded source tree.
///
/// Most rules look at one package at a time through [`Rule::check`]. Rules
/// about the tree as a whole (a package directory that must exist, say)
/// implement [`Rule::check_tree`] instead so they report once per run.
///
/// # Example
///
/// ```ignore
/// use gear_lint_core::{walk_package, DeclVisitor, Diagnostic, Package, Rule, RuleContext};
///
/// pub struct NoExportedVars;
///
/// impl Rule for NoExportedVars {
///     fn code(&self) -> &'static str { "X01" }
///     fn name(&self) -> &'static str { "no-exported-vars" }
///
///     fn check(&self, ctx: &RuleContext<'_>, package: &Package) -> Vec<Diagnostic> {
///         let mut visitor = VarVisitor::new(self, ctx);
///         walk_package(&mut visitor, package);
///         visitor.diagnostics
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the stable rule code (e.g., "R02").
    fn code(&self) -> &'static str;

    /// Returns the kebab-case name of this rule (e.g., "interface-usage").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks one package and returns any diagnostics found.
    fn check(&self, ctx: &RuleContext<'_>, package: &Package) -> Vec<Diagnostic>;

    /// Checks the tree as a whole. Called once per run, before any
    /// [`Rule::check`].
    fn check_tree(&self, _ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
