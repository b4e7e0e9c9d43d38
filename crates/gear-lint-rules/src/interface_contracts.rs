//! Rule enforcing interface-first contracts.
//!
//! # Rationale
//!
//! Business logic is exposed through exported interfaces while the
//! implementing struct stays unexported, so callers depend on the contract
//! and implementations can be swapped in tests.
//!
//! # Detected Patterns
//!
//! - Exported structs with methods that are not data carriers (warning)
//! - Unexported interfaces (error)
//!
//! Data carriers are recognised by name suffix or prefix, or by living under
//! a data directory (`model`, `dto`, `config`, ...). See
//! [`Classification`](gear_lint_core::Classification).
//!
//! # Good Patterns
//!
//! ```go
//! type UserService interface {
//!     Get(id string) (*model.User, error)
//! }
//!
//! type userService struct{ repo repository.UserRepository }
//! ```

use gear_lint_core::model::{TypeDecl, TypeKind};
use gear_lint_core::{
    walk_package, DeclVisitor, Diagnostic, Location, Package, Rule, RuleContext, Severity,
    SourceFile,
};

/// Rule code for interface-contracts.
pub const CODE: &str = "R01";

/// Rule name for interface-contracts.
pub const NAME: &str = "interface-contracts";

/// Flags exported business-logic structs and unexported interfaces.
#[derive(Debug, Clone, Default)]
pub struct InterfaceContracts;

impl InterfaceContracts {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for InterfaceContracts {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Interface contracts: exported interfaces + unexported structs"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &RuleContext<'_>, package: &Package) -> Vec<Diagnostic> {
        let mut visitor = ContractVisitor {
            ctx,
            diagnostics: Vec::new(),
        };
        walk_package(&mut visitor, package);
        visitor.diagnostics
    }
}

struct ContractVisitor<'a> {
    ctx: &'a RuleContext<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl ContractVisitor<'_> {
    fn is_business_struct(&self, file: &SourceFile, decl: &TypeDecl) -> bool {
        let classification = &self.ctx.config.classification;
        decl.exported
            && decl.has_methods
            && !classification.is_data_name(&decl.name)
            && !classification.is_data_path(&file.path)
    }
}

impl DeclVisitor for ContractVisitor<'_> {
    fn visit_type(&mut self, file: &SourceFile, decl: &TypeDecl) {
        let location = Location::new(file.path.clone(), decl.position);
        match decl.kind {
            TypeKind::Struct if self.is_business_struct(file, decl) => {
                self.diagnostics.push(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        Severity::Warning,
                        location,
                        format!(
                            "Struct '{}' is exported - GEAR prefers unexported structs with exported interfaces for service/business logic",
                            decl.name
                        ),
                    )
                    .with_help(format!(
                        "expose an exported interface and rename the struct to '{}'",
                        lower_first(&decl.name)
                    )),
                );
            }
            TypeKind::Interface if !decl.exported => {
                self.diagnostics.push(Diagnostic::new(
                    CODE,
                    NAME,
                    Severity::Error,
                    location,
                    format!(
                        "Interface '{}' is unexported - GEAR requires exported interfaces",
                        decl.name
                    ),
                ));
            }
            _ => {}
        }
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
