//! # gear-lint-core
//!
//! Core engine for validating Go source trees against the GEAR architecture
//! conventions, using Tree-sitter to extract declarations.
//!
//! This crate provides:
//!
//! - the declaration model ([`SourceFile`], [`Decl`], [`DeclVisitor`])
//! - [`GoParser`] for extracting that model from Go source
//! - the tree loader and [`ExclusionSet`]
//! - [`InterfaceResolver`] for cross-package type lookups
//! - the [`Rule`] trait and [`RuleRegistry`]
//! - [`Analyzer`] for orchestrating a run and [`Reporter`] for the result
//!
//! ## Example
//!
//! ```ignore
//! use gear_lint_core::{Analyzer, Reporter};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./my-service")
//!     .registry(gear_lint_rules::default_registry())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! let report = Reporter::new(analyzer.config()).report(result.diagnostics, result.files_checked);
//! print!("{}", report.render_text());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod exclude;
mod loader;
mod registry;
mod report;
mod resolver;
mod rule;
mod types;

pub mod model;
pub mod parser;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Classification, Config, ConfigError, Layout};
pub use context::RuleContext;
pub use exclude::{ExclusionSet, ALWAYS_EXCLUDED_DIRS};
pub use loader::{load, LoadedTree, PARSE_CODE, PARSE_NAME};
pub use model::{walk_file, walk_package, Decl, DeclVisitor, Package, SourceFile, TypeExpr};
pub use parser::{GoParser, ParseError};
pub use registry::{RegistryError, RuleRegistry};
pub use report::{Report, Reporter, Summary};
pub use resolver::{read_module_path, InterfaceResolver, PackageResolver};
pub use rule::{Rule, RuleBox};
pub use types::{Diagnostic, LintResult, Location, Position, Severity};
