//! # gear-lint-rules
//!
//! Built-in GEAR rules for gear-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | R01 | `interface-contracts` | Exported interfaces, unexported implementing structs |
//! | R02 | `interface-usage` | No pointers to interfaces |
//! | R03 | `constructor-patterns` | `New...` constructors return interfaces |
//! | R04 | `domain-boundaries` | Layer separation (inspects only, never reports) |
//! | R05 | `centralized-config` | An `internal/config` package exists |
//! | R06 | `systematic-errors` | An `internal/errors` package exists |
//!
//! ## Usage
//!
//! ```ignore
//! use gear_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./my-service")
//!     .registry(gear_lint_rules::default_registry())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod centralized_config;
mod constructor_patterns;
mod domain_boundaries;
mod interface_contracts;
mod interface_usage;
mod presets;
mod required_package;
mod systematic_errors;

#[cfg(test)]
mod testing;

pub use constructor_patterns::ConstructorPatterns;
pub use domain_boundaries::DomainBoundaries;
pub use interface_contracts::InterfaceContracts;
pub use interface_usage::InterfaceUsage;
pub use presets::{all_rules, default_registry};
pub use required_package::RequiredPackage;

/// Re-export core types for convenience.
pub use gear_lint_core::{Diagnostic, Rule, Severity};
