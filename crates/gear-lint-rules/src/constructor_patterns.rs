//! Rule requiring constructors to return interfaces.
//!
//! An exported `NewXxx` function whose first result is a pointer to a
//! concrete type declared in the same package leaks the implementation.
//! Constructors under utility and data directories
//! (`classification.constructor_exempt_paths`) may return concrete types.

use gear_lint_core::model::FuncDecl;
use gear_lint_core::{
    walk_package, DeclVisitor, Diagnostic, Location, Package, Rule, RuleContext, Severity,
    SourceFile, TypeExpr,
};

/// Rule code for constructor-patterns.
pub const CODE: &str = "R03";

/// Rule name for constructor-patterns.
pub const NAME: &str = "constructor-patterns";

/// Flags constructors that return pointers to concrete types.
#[derive(Debug, Clone, Default)]
pub struct ConstructorPatterns;

impl ConstructorPatterns {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ConstructorPatterns {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Constructor patterns: constructors return interfaces"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &RuleContext<'_>, package: &Package) -> Vec<Diagnostic> {
        let mut visitor = ConstructorVisitor {
            ctx,
            package,
            diagnostics: Vec::new(),
        };
        walk_package(&mut visitor, package);
        visitor.diagnostics
    }
}

struct ConstructorVisitor<'a> {
    ctx: &'a RuleContext<'a>,
    package: &'a Package,
    diagnostics: Vec<Diagnostic>,
}

impl DeclVisitor for ConstructorVisitor<'_> {
    fn visit_func(&mut self, file: &SourceFile, func: &FuncDecl) {
        let classification = &self.ctx.config.classification;
        if func.is_method()
            || !func.is_exported()
            || !func.name.starts_with(classification.constructor_prefix.as_str())
            || classification.is_constructor_exempt(&file.path)
        {
            return;
        }

        let Some(TypeExpr::Named(returned)) = func.results.first().and_then(TypeExpr::pointee)
        else {
            return;
        };
        let concrete = self
            .package
            .find_local_type(file, returned)
            .is_some_and(|t| !t.is_interface());
        if !concrete {
            return;
        }

        self.diagnostics.push(
            Diagnostic::new(
                CODE,
                NAME,
                Severity::Warning,
                Location::new(file.path.clone(), func.position),
                format!(
                    "Constructor '{}' returns pointer to struct '*{returned}' - GEAR constructors should return interfaces",
                    func.name
                ),
            )
            .with_help("declare an exported interface and return it instead"),
        );
    }
}
