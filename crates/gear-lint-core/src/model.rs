//! Declaration model extracted from Go source files.
//!
//! A [`SourceFile`] holds its declarations as a flat list of [`Decl`]
//! variants in source order. Rules consume them through [`DeclVisitor`]
//! and [`walk_file`]/[`walk_package`], which dispatch exhaustively over the
//! variants.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::types::Position;

/// A type expression as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeExpr {
    /// A type declared in the same package (`Repo`).
    Named(String),
    /// A type qualified by an import alias (`repository.UserRepository`).
    Qualified {
        /// Import alias used in the file.
        package: String,
        /// Type name inside the imported package.
        name: String,
    },
    /// A pointer to another type (`*Repo`).
    Pointer(Box<TypeExpr>),
    /// Any other type (slices, maps, functions, literals); kept as source text.
    Other(String),
}

impl TypeExpr {
    /// Returns the pointee if this is a pointer type.
    #[must_use]
    pub fn pointee(&self) -> Option<&TypeExpr> {
        match self {
            Self::Pointer(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns the unqualified or qualified type name, if this is a named type.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) | Self::Qualified { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) | Self::Other(name) => write!(f, "{name}"),
            Self::Qualified { package, name } => write!(f, "{package}.{name}"),
            Self::Pointer(inner) => write!(f, "*{inner}"),
        }
    }
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    /// `type Foo interface { ... }`
    Interface,
    /// `type Foo struct { ... }`
    Struct,
    /// Any other underlying type (`type ID string`, `type Fn func()`).
    Other,
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    /// Declared name.
    pub name: String,
    /// Whether the name is exported (starts with an uppercase letter).
    pub exported: bool,
    /// Underlying kind.
    pub kind: TypeKind,
    /// Position of the declared name.
    pub position: Position,
    /// Whether a method in the same file has this type as receiver.
    pub has_methods: bool,
}

impl TypeDecl {
    /// Whether this type is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

/// Receiver of a method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receiver {
    /// Base type name of the receiver.
    pub type_name: String,
    /// Whether the receiver is a pointer (`func (s *svc) ...`).
    pub pointer: bool,
}

/// A top-level function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuncDecl {
    /// Function name.
    pub name: String,
    /// Receiver, for methods.
    pub receiver: Option<Receiver>,
    /// Parameter types in declaration order, one entry per name.
    pub params: Vec<TypeExpr>,
    /// Result types in declaration order, one entry per name.
    pub results: Vec<TypeExpr>,
    /// Position of the `func` keyword.
    pub position: Position,
}

impl FuncDecl {
    /// Whether the name is exported.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Whether this is a method (has a receiver).
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// A struct field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    /// Name of the enclosing named struct, if any.
    pub owner: Option<String>,
    /// Field names; empty for embedded fields.
    pub names: Vec<String>,
    /// Declared type.
    pub ty: TypeExpr,
    /// Position of the type expression.
    pub position: Position,
}

/// Role of a parameter-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamRole {
    /// A function parameter.
    Parameter,
    /// A function result.
    Result,
}

/// A parameter or result declaration of a top-level function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDecl {
    /// Name of the declaring function.
    pub function: String,
    /// Whether this is a parameter or a result.
    pub role: ParamRole,
    /// Declared names; empty for unnamed entries.
    pub names: Vec<String>,
    /// Declared type.
    pub ty: TypeExpr,
    /// Position of the type expression.
    pub position: Position,
}

/// A pointer type appearing anywhere else (nested types, var declarations,
/// interface method signatures, function literals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointerExpr {
    /// The full pointer type.
    pub ty: TypeExpr,
    /// Position of the `*`.
    pub position: Position,
}

/// A declaration extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Decl {
    /// Top-level type declaration.
    Type(TypeDecl),
    /// Top-level function or method.
    Func(FuncDecl),
    /// Struct field.
    Field(FieldDecl),
    /// Function parameter or result.
    Param(ParamDecl),
    /// Free-standing pointer type expression.
    Pointer(PointerExpr),
}

impl Decl {
    /// Source position of this declaration.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Type(d) => d.position,
            Self::Func(d) => d.position,
            Self::Field(d) => d.position,
            Self::Param(d) => d.position,
            Self::Pointer(d) => d.position,
        }
    }
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Explicit alias (`foo "path/to/pkg"`), including `_` and `.`.
    pub alias: Option<String>,
    /// Import path without quotes.
    pub path: String,
    /// Position of the import spec.
    pub position: Position,
}

impl Import {
    /// The identifier this import is referenced by in the file.
    ///
    /// Blank and dot imports introduce no identifier.
    #[must_use]
    pub fn binding(&self) -> Option<&str> {
        match self.alias.as_deref() {
            Some("_" | ".") => None,
            Some(alias) => Some(alias),
            None => self.path.rsplit('/').next(),
        }
    }
}

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Path relative to the validated root.
    pub path: PathBuf,
    /// Declared package name.
    pub package: String,
    /// Imports in source order.
    pub imports: Vec<Import>,
    /// Declarations in source order.
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Iterates over top-level type declarations.
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Type(t) => Some(t),
            _ => None,
        })
    }

    /// Iterates over top-level function and method declarations.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Func(f) => Some(f),
            _ => None,
        })
    }

    /// Finds a top-level type declared in this file.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types().find(|t| t.name == name)
    }

    /// Resolves an import alias to its import path.
    #[must_use]
    pub fn import_path(&self, alias: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|i| i.binding() == Some(alias))
            .map(|i| i.path.as_str())
    }

    /// Directory of this file, relative to the root.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// All source files that declare the same package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Declared package name.
    pub name: String,
    /// Member files, sorted by path.
    pub files: Vec<SourceFile>,
}

impl Package {
    /// Creates a package, sorting its files by path.
    #[must_use]
    pub fn new(name: impl Into<String>, mut files: Vec<SourceFile>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            name: name.into(),
            files,
        }
    }

    /// Looks up a type visible from `file` without qualification.
    ///
    /// The file itself is searched first, then the other files of this
    /// package that live in the same directory.
    #[must_use]
    pub fn find_local_type<'a>(
        &'a self,
        file: &'a SourceFile,
        name: &str,
    ) -> Option<&'a TypeDecl> {
        file.find_type(name).or_else(|| {
            self.files
                .iter()
                .filter(|f| f.path != file.path && f.dir() == file.dir())
                .find_map(|f| f.find_type(name))
        })
    }
}

/// Whether a Go identifier is exported.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Visitor over the declaration model.
///
/// Every callback has an empty default so visitors only implement what they
/// need.
pub trait DeclVisitor {
    /// Called for each top-level type declaration.
    fn visit_type(&mut self, _file: &SourceFile, _decl: &TypeDecl) {}
    /// Called for each top-level function or method.
    fn visit_func(&mut self, _file: &SourceFile, _decl: &FuncDecl) {}
    /// Called for each struct field.
    fn visit_field(&mut self, _file: &SourceFile, _field: &FieldDecl) {}
    /// Called for each parameter or result of a top-level function.
    fn visit_param(&mut self, _file: &SourceFile, _param: &ParamDecl) {}
    /// Called for each free-standing pointer type expression.
    fn visit_pointer(&mut self, _file: &SourceFile, _pointer: &PointerExpr) {}
}

/// Dispatches every declaration of `file` to `visitor`, in source order.
pub fn walk_file<V: DeclVisitor + ?Sized>(visitor: &mut V, file: &SourceFile) {
    for decl in &file.decls {
        match decl {
            Decl::Type(d) => visitor.visit_type(file, d),
            Decl::Func(d) => visitor.visit_func(file, d),
            Decl::Field(d) => visitor.visit_field(file, d),
            Decl::Param(d) => visitor.visit_param(file, d),
            Decl::Pointer(d) => visitor.visit_pointer(file, d),
        }
    }
}

/// Walks every file of a package.
pub fn walk_package<V: DeclVisitor + ?Sized>(visitor: &mut V, package: &Package) {
    for file in &package.files {
        walk_file(visitor, file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_decl(name: &str, kind: TypeKind) -> Decl {
        Decl::Type(TypeDecl {
            name: name.to_string(),
            exported: is_exported(name),
            kind,
            position: Position::new(1, 6),
            has_methods: false,
        })
    }

    fn file(path: &str, decls: Vec<Decl>) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            package: "svc".to_string(),
            imports: vec![
                Import {
                    alias: None,
                    path: "github.com/acme/app/pkg/user/repository".to_string(),
                    position: Position::new(3, 2),
                },
                Import {
                    alias: Some("db".to_string()),
                    path: "gorm.io/gorm".to_string(),
                    position: Position::new(4, 2),
                },
                Import {
                    alias: Some("_".to_string()),
                    path: "github.com/lib/pq".to_string(),
                    position: Position::new(5, 2),
                },
            ],
            decls,
        }
    }

    #[derive(Default)]
    struct Counter {
        types: usize,
        funcs: usize,
        fields: usize,
        params: usize,
        pointers: usize,
    }

    impl DeclVisitor for Counter {
        fn visit_type(&mut self, _: &SourceFile, _: &TypeDecl) {
            self.types += 1;
        }
        fn visit_func(&mut self, _: &SourceFile, _: &FuncDecl) {
            self.funcs += 1;
        }
        fn visit_field(&mut self, _: &SourceFile, _: &FieldDecl) {
            self.fields += 1;
        }
        fn visit_param(&mut self, _: &SourceFile, _: &ParamDecl) {
            self.params += 1;
        }
        fn visit_pointer(&mut self, _: &SourceFile, _: &PointerExpr) {
            self.pointers += 1;
        }
    }

    #[test]
    fn walk_dispatches_every_variant() {
        let repo = TypeExpr::Pointer(Box::new(TypeExpr::Named("Repo".into())));
        let f = file(
            "svc/a.go",
            vec![
                type_decl("Repo", TypeKind::Interface),
                Decl::Field(FieldDecl {
                    owner: Some("svc".into()),
                    names: vec!["repo".into()],
                    ty: repo.clone(),
                    position: Position::new(2, 7),
                }),
                Decl::Func(FuncDecl {
                    name: "Run".into(),
                    receiver: None,
                    params: vec![repo.clone()],
                    results: vec![],
                    position: Position::new(4, 1),
                }),
                Decl::Param(ParamDecl {
                    function: "Run".into(),
                    role: ParamRole::Parameter,
                    names: vec!["r".into()],
                    ty: repo.clone(),
                    position: Position::new(4, 12),
                }),
                Decl::Pointer(PointerExpr {
                    ty: repo,
                    position: Position::new(5, 9),
                }),
            ],
        );

        let mut counter = Counter::default();
        walk_file(&mut counter, &f);
        assert_eq!(
            (
                counter.types,
                counter.funcs,
                counter.fields,
                counter.params,
                counter.pointers
            ),
            (1, 1, 1, 1, 1)
        );
    }

    #[test]
    fn import_bindings() {
        let f = file("svc/a.go", vec![]);
        assert_eq!(
            f.import_path("repository"),
            Some("github.com/acme/app/pkg/user/repository")
        );
        assert_eq!(f.import_path("db"), Some("gorm.io/gorm"));
        assert_eq!(f.import_path("gorm"), None);
        assert_eq!(f.import_path("pq"), None);
    }

    #[test]
    fn local_lookup_stays_in_directory() {
        let a = file("svc/a.go", vec![]);
        let b = file("svc/b.go", vec![type_decl("Repo", TypeKind::Interface)]);
        let c = file("other/svc/c.go", vec![type_decl("Store", TypeKind::Interface)]);
        let pkg = Package::new("svc", vec![c, b, a.clone()]);

        assert!(pkg.find_local_type(&a, "Repo").is_some());
        assert!(pkg.find_local_type(&a, "Store").is_none());
        assert!(pkg
            .find_local_type(&pkg.files[0], "Store")
            .is_some_and(TypeDecl::is_interface));
        assert_eq!(pkg.files[0].path, PathBuf::from("other/svc/c.go"));
    }

    #[test]
    fn type_expr_display() {
        let t = TypeExpr::Pointer(Box::new(TypeExpr::Qualified {
            package: "repository".into(),
            name: "UserRepository".into(),
        }));
        assert_eq!(t.to_string(), "*repository.UserRepository");
        assert_eq!(t.pointee().and_then(TypeExpr::type_name), Some("UserRepository"));
    }

    #[test]
    fn exported_follows_first_letter() {
        assert!(is_exported("FooService"));
        assert!(!is_exported("fooService"));
        assert!(!is_exported("_x"));
        assert!(!is_exported(""));
    }
}
