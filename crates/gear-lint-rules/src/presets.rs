//! The built-in rule set.

use crate::{
    ConstructorPatterns, DomainBoundaries, InterfaceContracts, InterfaceUsage, RequiredPackage,
};
use gear_lint_core::{RuleBox, RuleRegistry};
use tracing::warn;

/// Returns all built-in rules, R01 to R06 in order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(InterfaceContracts::new()),
        Box::new(InterfaceUsage::new()),
        Box::new(ConstructorPatterns::new()),
        Box::new(DomainBoundaries::new()),
        Box::new(RequiredPackage::centralized_config()),
        Box::new(RequiredPackage::systematic_errors()),
    ]
}

/// Returns a registry holding [`all_rules`].
#[must_use]
pub fn default_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    for rule in all_rules() {
        if let Err(e) = registry.register(rule) {
            warn!("Skipping built-in rule: {e}");
        }
    }
    registry
}
