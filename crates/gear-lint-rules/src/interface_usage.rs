//! Rule forbidding pointers to interfaces.
//!
//! # Rationale
//!
//! A Go interface value already holds a reference to its dynamic value.
//! Taking `*Iface` adds an indirection that hides nil-interface bugs and
//! breaks method-set promotion.
//!
//! # Detected Patterns
//!
//! - `repo *Repo` struct fields
//! - `func f(r *Repo)` parameters and `func f() *Repo` results
//! - any other `*Repo` type expression (interface methods, vars, literals)
//!
//! Interfaces are looked up in the same file, then in the other files of
//! the package in the same directory. Qualified types (`*repository.Repo`)
//! go through the file's imports and the [`InterfaceResolver`].
//!
//! [`InterfaceResolver`]: gear_lint_core::InterfaceResolver

use gear_lint_core::model::{FieldDecl, ParamDecl, ParamRole, PointerExpr};
use gear_lint_core::{
    walk_package, DeclVisitor, Diagnostic, Location, Package, Position, Rule, RuleContext,
    Severity, SourceFile, TypeExpr,
};

/// Rule code for interface-usage.
pub const CODE: &str = "R02";

/// Rule name for interface-usage.
pub const NAME: &str = "interface-usage";

/// Flags pointer-to-interface types.
#[derive(Debug, Clone, Default)]
pub struct InterfaceUsage;

impl InterfaceUsage {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for InterfaceUsage {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Interface usage: no pointer-to-interface anti-patterns"
    }

    fn check(&self, ctx: &RuleContext<'_>, package: &Package) -> Vec<Diagnostic> {
        let mut visitor = UsageVisitor {
            ctx,
            package,
            diagnostics: Vec::new(),
        };
        walk_package(&mut visitor, package);
        visitor.diagnostics
    }
}

struct UsageVisitor<'a> {
    ctx: &'a RuleContext<'a>,
    package: &'a Package,
    diagnostics: Vec<Diagnostic>,
}

impl UsageVisitor<'_> {
    /// Returns the pointee when `ty` is a pointer to an interface.
    fn interface_pointee<'t>(&self, file: &SourceFile, ty: &'t TypeExpr) -> Option<&'t TypeExpr> {
        let pointee = ty.pointee()?;
        let is_interface = match pointee {
            TypeExpr::Named(name) => self
                .package
                .find_local_type(file, name)
                .is_some_and(|t| t.is_interface()),
            TypeExpr::Qualified { package, name } => file
                .import_path(package)
                .is_some_and(|path| self.ctx.resolver.is_interface(path, name)),
            TypeExpr::Pointer(_) | TypeExpr::Other(_) => false,
        };
        is_interface.then_some(pointee)
    }

    fn report(&mut self, file: &SourceFile, position: Position, message: String) {
        self.diagnostics.push(Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            Location::new(file.path.clone(), position),
            message,
        ));
    }
}

impl DeclVisitor for UsageVisitor<'_> {
    fn visit_field(&mut self, file: &SourceFile, field: &FieldDecl) {
        let Some(pointee) = self.interface_pointee(file, &field.ty) else {
            return;
        };
        let name = if field.names.is_empty() {
            pointee.to_string()
        } else {
            field.names.join(", ")
        };
        self.report(
            file,
            field.position,
            format!(
                "Struct field '{name}' has type '*{pointee}' - pointer to interface is an anti-pattern, use '{pointee}' instead"
            ),
        );
    }

    fn visit_param(&mut self, file: &SourceFile, param: &ParamDecl) {
        let Some(pointee) = self.interface_pointee(file, &param.ty) else {
            return;
        };
        let message = match param.role {
            ParamRole::Parameter => {
                let name = if param.names.is_empty() {
                    pointee.to_string()
                } else {
                    param.names.join(", ")
                };
                format!(
                    "Function parameter '{name}' has type '*{pointee}' - pointer to interface is an anti-pattern, use '{pointee}' instead"
                )
            }
            ParamRole::Result => format!(
                "Function '{}' returns '*{pointee}' - pointer to interface, use '{pointee}' instead",
                param.function
            ),
        };
        self.report(file, param.position, message);
    }

    fn visit_pointer(&mut self, file: &SourceFile, pointer: &PointerExpr) {
        let Some(pointee) = self.interface_pointee(file, &pointer.ty) else {
            return;
        };
        self.report(
            file,
            pointer.position,
            format!(
                "Pointer to interface '*{pointee}' is an anti-pattern - interfaces are already reference types"
            ),
        );
    }
}
