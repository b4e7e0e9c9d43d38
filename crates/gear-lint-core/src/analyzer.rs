//! Core analyzer for orchestrating a validation run.

use crate::config::Config;
use crate::context::RuleContext;
use crate::exclude::ExclusionSet;
use crate::loader;
use crate::registry::RuleRegistry;
use crate::resolver::{InterfaceResolver, PackageResolver};
use crate::types::LintResult;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a validation run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The root does not exist or is not a directory.
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The root could not be walked.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// The Go grammar could not be loaded.
    #[error("Failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    config: Option<Config>,
    config_file: Option<PathBuf>,
    registry: Option<RuleRegistry>,
    exclude_patterns: Option<Vec<String>>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to validate.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Loads the configuration from a file at build time.
    ///
    /// Takes precedence over [`AnalyzerBuilder::config`].
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Sets the rules to run.
    #[must_use]
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the configuration's exclusion patterns.
    ///
    /// An empty list keeps the configured patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        self.exclude_patterns = (!patterns.is_empty()).then_some(patterns);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// current directory is needed and unavailable.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut config = match self.config_file {
            Some(path) => Config::from_file(&path)?,
            None => self.config.unwrap_or_default(),
        };
        if let Some(patterns) = self.exclude_patterns {
            debug!("Command-line exclusions replace configured ones: {patterns:?}");
            config.exclude = patterns;
        }

        let exclusions = ExclusionSet::new(&config.exclude);

        Ok(Analyzer {
            root,
            registry: self.registry.unwrap_or_default(),
            exclusions,
            config,
        })
    }
}

/// The main analyzer: loads the tree, then runs every rule over it.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    registry: RuleRegistry,
    exclusions: ExclusionSet,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being validated.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Validates the tree with a fresh [`PackageResolver`].
    ///
    /// Diagnostics carry the severity their rule assigned; overrides are
    /// applied by the reporter.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be loaded.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        let resolver = PackageResolver::new(&self.root, self.config.module.clone());
        self.analyze_with(&resolver)
    }

    /// Validates the tree with the given resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be loaded.
    pub fn analyze_with(
        &self,
        resolver: &dyn InterfaceResolver,
    ) -> Result<LintResult, AnalyzerError> {
        info!("Starting validation at {}", self.root.display());

        let tree = loader::load(&self.root, &self.exclusions)?;
        let ctx = RuleContext::new(&self.root, &self.config, resolver);

        let mut result = LintResult::new();
        result.diagnostics.extend(tree.failures);
        result.files_checked = tree.files_checked;
        result.packages_checked = tree.packages.len();

        for rule in self.registry.iter() {
            debug!("Running rule {} ({})", rule.code(), rule.name());
            result.diagnostics.extend(rule.check_tree(&ctx));
            for package in &tree.packages {
                result.diagnostics.extend(rule.check(&ctx, package));
            }
        }

        info!(
            "Validation complete: {} diagnostics in {} files ({} packages)",
            result.diagnostics.len(),
            result.files_checked,
            result.packages_checked
        );
        Ok(result)
    }
}
