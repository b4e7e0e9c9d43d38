//! Rule requiring a systematic error handling package (`internal/errors`).

use crate::required_package::RequiredPackage;

/// Rule code for systematic-errors.
pub const CODE: &str = "R06";

/// Rule name for systematic-errors.
pub const NAME: &str = "systematic-errors";

impl RequiredPackage {
    /// Requires `layout.errors_dir`.
    #[must_use]
    pub fn systematic_errors() -> Self {
        Self::new(
            CODE,
            NAME,
            "Systematic error handling: internal/errors package exists",
            "systematic error handling",
            |layout| layout.errors_dir.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubResolver;
    use gear_lint_core::{Config, Rule, RuleContext};
    use std::fs;

    #[test]
    fn reports_missing_errors_package() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("internal/config")).unwrap();

        let config = Config::default();
        let resolver = StubResolver::default();
        let ctx = RuleContext::new(dir.path(), &config, &resolver);
        let diagnostics = RequiredPackage::systematic_errors().check_tree(&ctx);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Missing internal/errors package - GEAR requires systematic error handling"
        );
        assert_eq!(
            diagnostics[0].location.file,
            std::path::PathBuf::from("internal/errors")
        );
    }

    #[test]
    fn present_errors_package_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("internal/errors")).unwrap();

        let config = Config::default();
        let resolver = StubResolver::default();
        let ctx = RuleContext::new(dir.path(), &config, &resolver);
        assert!(RequiredPackage::systematic_errors().check_tree(&ctx).is_empty());
    }
}
