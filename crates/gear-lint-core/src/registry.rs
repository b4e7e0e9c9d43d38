//! Ordered registry of rules.

use crate::rule::{Rule, RuleBox};

/// Errors raised while building a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A rule with the same code is already registered.
    #[error("Duplicate rule code: {0}")]
    DuplicateCode(String),
}

/// Rules in registration order, unique by code.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RuleBox>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule with the same code is already registered.
    pub fn register(&mut self, rule: RuleBox) -> Result<(), RegistryError> {
        if self.get(rule.code()).is_some() {
            return Err(RegistryError::DuplicateCode(rule.code().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Registers a rule by value.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule with the same code is already registered.
    pub fn register_rule<R: Rule + 'static>(&mut self, rule: R) -> Result<(), RegistryError> {
        self.register(Box::new(rule))
    }

    /// Looks up a rule by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.code() == code)
            .map(AsRef::as_ref)
    }

    /// Iterates over rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(AsRef::as_ref)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RuleContext;
    use crate::model::Package;
    use crate::types::Diagnostic;

    struct Named(&'static str);

    impl Rule for Named {
        fn code(&self) -> &'static str {
            self.0
        }
        fn name(&self) -> &'static str {
            "named"
        }
        fn check(&self, _: &RuleContext<'_>, _: &Package) -> Vec<Diagnostic> {
            Vec::new()
        }
    }

    #[test]
    fn keeps_registration_order() {
        let mut registry = RuleRegistry::new();
        registry.register_rule(Named("R02")).unwrap();
        registry.register_rule(Named("R01")).unwrap();
        let codes: Vec<&str> = registry.iter().map(Rule::code).collect();
        assert_eq!(codes, vec!["R02", "R01"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("R01").is_some());
        assert!(registry.get("R09").is_none());
    }

    #[test]
    fn rejects_duplicate_codes() {
        let mut registry = RuleRegistry::new();
        registry.register_rule(Named("R01")).unwrap();
        let err = registry.register_rule(Named("R01")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateCode(code) if code == "R01"));
        assert_eq!(registry.len(), 1);
    }
}
