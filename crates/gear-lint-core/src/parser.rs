//! Go source extraction using Tree-sitter.
//!
//! Turns Go source text into a [`SourceFile`]. Any syntax error makes the
//! whole file unparsable; callers decide how to report it.

use std::collections::HashSet;
use std::path::PathBuf;
use tree_sitter::{Language, LanguageError, Node, Parser};

use crate::model::{
    is_exported, Decl, FieldDecl, FuncDecl, Import, ParamDecl, ParamRole, PointerExpr, Receiver,
    SourceFile, TypeDecl, TypeExpr, TypeKind,
};
use crate::types::Position;

/// Why a file could not be turned into a [`SourceFile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The source contains a syntax error.
    #[error("syntax error at line {}, column {}", .position.line, .position.column)]
    Syntax {
        /// Position of the first error node.
        position: Position,
    },

    /// The file has no `package` clause.
    #[error("missing package clause")]
    MissingPackage,

    /// Tree-sitter returned no tree.
    #[error("parser produced no syntax tree")]
    NoTree,
}

impl ParseError {
    /// Position of the error, when known.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Syntax { position } => Some(*position),
            Self::MissingPackage | Self::NoTree => None,
        }
    }
}

/// Parses Go files into the declaration model.
///
/// A parser is not thread-safe; create one per worker.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Creates a new Go parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled grammar is incompatible with the
    /// linked tree-sitter runtime.
    pub fn new() -> Result<Self, LanguageError> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Parses `source` into a [`SourceFile`] recorded under `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source has syntax errors or no package clause.
    pub fn parse(
        &mut self,
        path: impl Into<PathBuf>,
        source: &str,
    ) -> Result<SourceFile, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            let position = first_error(root).map_or(Position::new(1, 1), |n| position_of(&n));
            return Err(ParseError::Syntax { position });
        }

        let mut extractor = Extractor {
            src: source.as_bytes(),
            package: None,
            imports: Vec::new(),
            decls: Vec::new(),
            claimed: HashSet::new(),
        };
        extractor.top_level(root);
        extractor.walk_tree(root);

        let Extractor {
            package,
            imports,
            mut decls,
            ..
        } = extractor;
        let package = package.ok_or(ParseError::MissingPackage)?;

        mark_methods(&mut decls);
        decls.sort_by_key(Decl::position);

        Ok(SourceFile {
            path: path.into(),
            package,
            imports,
            decls,
        })
    }
}

struct Extractor<'a> {
    src: &'a [u8],
    package: Option<String>,
    imports: Vec<Import>,
    decls: Vec<Decl>,
    /// Ids of pointer-type nodes already attributed to a field, parameter,
    /// result, or receiver.
    claimed: HashSet<usize>,
}

impl<'a> Extractor<'a> {
    fn text(&self, node: &Node<'_>) -> &'a str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn field_text(&self, node: &Node<'_>, field: &str) -> Option<String> {
        node.child_by_field_name(field).map(|n| self.text(&n).to_owned())
    }

    fn top_level(&mut self, root: Node<'_>) {
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "package_clause" => {
                    let mut inner = node.walk();
                    self.package = node
                        .named_children(&mut inner)
                        .find(|c| c.kind() == "package_identifier")
                        .map(|c| self.text(&c).to_owned());
                }
                "import_declaration" => self.import_declaration(node),
                "type_declaration" => self.type_declaration(node),
                "function_declaration" | "method_declaration" => self.function(node),
                _ => {}
            }
        }
    }

    fn import_declaration(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => self.import_spec(child),
                "import_spec_list" => {
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() == "import_spec" {
                            self.import_spec(spec);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn import_spec(&mut self, node: Node<'_>) {
        let Some(path) = self.field_text(&node, "path") else {
            return;
        };
        self.imports.push(Import {
            alias: self.field_text(&node, "name"),
            path: path.trim_matches(|c| c == '"' || c == '`').to_owned(),
            position: position_of(&node),
        });
    }

    fn type_declaration(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        for spec in node.named_children(&mut cursor) {
            if spec.kind() != "type_spec" {
                continue;
            }
            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            let kind = match spec.child_by_field_name("type").map(|t| t.kind()) {
                Some("interface_type") => TypeKind::Interface,
                Some("struct_type") => TypeKind::Struct,
                _ => TypeKind::Other,
            };
            let name = self.text(&name_node).to_owned();
            self.decls.push(Decl::Type(TypeDecl {
                exported: is_exported(&name),
                name,
                kind,
                position: position_of(&name_node),
                has_methods: false,
            }));
        }
    }

    fn function(&mut self, node: Node<'_>) {
        let Some(name) = self.field_text(&node, "name") else {
            return;
        };

        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|r| self.receiver(r));

        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.parameter_list(p, &name, ParamRole::Parameter))
            .unwrap_or_default();

        let results = match node.child_by_field_name("result") {
            Some(r) if r.kind() == "parameter_list" => {
                self.parameter_list(r, &name, ParamRole::Result)
            }
            Some(r) => {
                self.claim(&r);
                let ty = self.type_expr(r);
                self.decls.push(Decl::Param(ParamDecl {
                    function: name.clone(),
                    role: ParamRole::Result,
                    names: Vec::new(),
                    ty: ty.clone(),
                    position: position_of(&r),
                }));
                vec![ty]
            }
            None => Vec::new(),
        };

        self.decls.push(Decl::Func(FuncDecl {
            name,
            receiver,
            params,
            results,
            position: position_of(&node),
        }));
    }

    fn receiver(&mut self, list: Node<'_>) -> Option<Receiver> {
        let mut cursor = list.walk();
        let decl = list
            .named_children(&mut cursor)
            .find(|c| c.kind() == "parameter_declaration")?;
        let ty = decl.child_by_field_name("type")?;
        self.claim(&ty);
        let (pointer, base) = if ty.kind() == "pointer_type" {
            (true, ty.named_child(0)?)
        } else {
            (false, ty)
        };
        let type_name = self.type_expr(base).type_name()?.to_owned();
        Some(Receiver { type_name, pointer })
    }

    fn parameter_list(&mut self, list: Node<'_>, function: &str, role: ParamRole) -> Vec<TypeExpr> {
        let mut types = Vec::new();
        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            let variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => continue,
            };
            let Some(ty_node) = decl.child_by_field_name("type") else {
                continue;
            };

            let mut names_cursor = decl.walk();
            let names: Vec<String> = decl
                .children_by_field_name("name", &mut names_cursor)
                .map(|n| self.text(&n).to_owned())
                .collect();

            // `...T` is a slice; a pointer inside it is reported on its own.
            let ty = if variadic {
                TypeExpr::Other(format!("...{}", self.text(&ty_node)))
            } else {
                self.claim(&ty_node);
                self.type_expr(ty_node)
            };

            for _ in 0..names.len().max(1) {
                types.push(ty.clone());
            }
            self.decls.push(Decl::Param(ParamDecl {
                function: function.to_owned(),
                role,
                names,
                ty,
                position: position_of(&ty_node),
            }));
        }
        types
    }

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        match node.kind() {
            "type_identifier" => TypeExpr::Named(self.text(&node).to_owned()),
            "qualified_type" => match (
                self.field_text(&node, "package"),
                self.field_text(&node, "name"),
            ) {
                (Some(package), Some(name)) => TypeExpr::Qualified { package, name },
                _ => TypeExpr::Other(self.text(&node).to_owned()),
            },
            "pointer_type" => match node.named_child(0) {
                Some(inner) => TypeExpr::Pointer(Box::new(self.type_expr(inner))),
                None => TypeExpr::Other(self.text(&node).to_owned()),
            },
            "generic_type" => match node.child_by_field_name("type") {
                Some(base) => self.type_expr(base),
                None => TypeExpr::Other(self.text(&node).to_owned()),
            },
            "parenthesized_type" => match node.named_child(0) {
                Some(inner) => self.type_expr(inner),
                None => TypeExpr::Other(self.text(&node).to_owned()),
            },
            _ => TypeExpr::Other(self.text(&node).to_owned()),
        }
    }

    fn claim(&mut self, node: &Node<'_>) {
        if node.kind() == "pointer_type" {
            self.claimed.insert(node.id());
        }
    }

    /// Pre-order walk collecting struct fields, unclaimed pointer types and
    /// pointer conversions.
    fn walk_tree(&mut self, root: Node<'_>) {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            match node.kind() {
                "field_declaration" => self.field(node),
                "pointer_type" if !self.claimed.contains(&node.id()) => {
                    self.decls.push(Decl::Pointer(PointerExpr {
                        ty: self.type_expr(node),
                        position: position_of(&node),
                    }));
                }
                "call_expression" => self.pointer_conversion(node),
                _ => {}
            }

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    /// Records `(*T)(x)`, which the grammar parses as a call whose callee is
    /// a parenthesized dereference rather than a pointer type.
    fn pointer_conversion(&mut self, call: Node<'_>) {
        let Some(callee) = call.child_by_field_name("function") else {
            return;
        };
        if callee.kind() != "parenthesized_expression" {
            return;
        }
        let Some(deref) = callee.named_child(0) else {
            return;
        };
        if deref.kind() != "unary_expression"
            || !deref
                .child_by_field_name("operator")
                .is_some_and(|op| self.text(&op) == "*")
        {
            return;
        }
        let Some(operand) = deref.child_by_field_name("operand") else {
            return;
        };
        let pointee = match operand.kind() {
            "identifier" => TypeExpr::Named(self.text(&operand).to_owned()),
            "selector_expression" => match (
                operand.child_by_field_name("operand"),
                self.field_text(&operand, "field"),
            ) {
                (Some(package), Some(name)) if package.kind() == "identifier" => {
                    TypeExpr::Qualified {
                        package: self.text(&package).to_owned(),
                        name,
                    }
                }
                _ => return,
            },
            _ => return,
        };
        self.decls.push(Decl::Pointer(PointerExpr {
            ty: TypeExpr::Pointer(Box::new(pointee)),
            position: position_of(&deref),
        }));
    }

    fn field(&mut self, node: Node<'_>) {
        let Some(ty_node) = node.child_by_field_name("type") else {
            return;
        };
        self.claim(&ty_node);

        let mut cursor = node.walk();
        let names: Vec<String> = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.text(&n).to_owned())
            .collect();

        self.decls.push(Decl::Field(FieldDecl {
            owner: self.struct_owner(node),
            names,
            ty: self.type_expr(ty_node),
            position: position_of(&ty_node),
        }));
    }

    /// Name of the `type_spec` a field belongs to, if the struct is named.
    fn struct_owner(&self, field: Node<'_>) -> Option<String> {
        let list = field.parent()?;
        let strukt = list.parent()?;
        let spec = strukt.parent()?;
        if strukt.kind() != "struct_type" || spec.kind() != "type_spec" {
            return None;
        }
        self.field_text(&spec, "name")
    }
}

/// Sets `has_methods` on every type that is the receiver of a method in the
/// same file.
fn mark_methods(decls: &mut [Decl]) {
    let receivers: HashSet<String> = decls
        .iter()
        .filter_map(|d| match d {
            Decl::Func(FuncDecl {
                receiver: Some(r), ..
            }) => Some(r.type_name.clone()),
            _ => None,
        })
        .collect();

    for decl in decls.iter_mut() {
        if let Decl::Type(t) = decl {
            t.has_methods = receivers.contains(&t.name);
        }
    }
}

fn position_of(node: &Node<'_>) -> Position {
    let start = node.start_position();
    Position::new(start.row + 1, start.column + 1)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> SourceFile {
        GoParser::new()
            .unwrap()
            .parse("pkg/foo/service/foo.go", src)
            .unwrap()
    }

    fn fields(f: &SourceFile) -> Vec<&FieldDecl> {
        f.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Field(x) => Some(x),
                _ => None,
            })
            .collect()
    }

    fn params(f: &SourceFile) -> Vec<&ParamDecl> {
        f.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Param(x) => Some(x),
                _ => None,
            })
            .collect()
    }

    fn pointers(f: &SourceFile) -> Vec<&PointerExpr> {
        f.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Pointer(x) => Some(x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn extracts_package_and_imports() {
        let f = parse(
            r#"package service

import (
	"context"
	repo "github.com/acme/app/pkg/foo/repository"
	_ "github.com/lib/pq"
)

import "fmt"
"#,
        );
        assert_eq!(f.package, "service");
        assert_eq!(f.imports.len(), 4);
        assert_eq!(f.imports[0].path, "context");
        assert_eq!(f.imports[1].alias.as_deref(), Some("repo"));
        assert_eq!(f.imports[2].alias.as_deref(), Some("_"));
        assert_eq!(f.imports[3].path, "fmt");
        assert_eq!(
            f.import_path("repo"),
            Some("github.com/acme/app/pkg/foo/repository")
        );
    }

    #[test]
    fn extracts_types_with_kind_and_methods() {
        let f = parse(
            "package service

type FooService interface {
	Run() error
}

type fooService struct {
	name string
}

type ID string

func (s *fooService) Run() error { return nil }
",
        );
        let types: Vec<&TypeDecl> = f.types().collect();
        assert_eq!(types.len(), 3);

        assert_eq!(types[0].name, "FooService");
        assert_eq!(types[0].kind, TypeKind::Interface);
        assert!(types[0].exported);
        assert_eq!(types[0].position, Position::new(3, 6));

        assert_eq!(types[1].kind, TypeKind::Struct);
        assert!(!types[1].exported);
        assert!(types[1].has_methods);

        assert_eq!(types[2].kind, TypeKind::Other);
        assert!(!types[2].has_methods);
    }

    #[test]
    fn grouped_type_declaration() {
        let f = parse(
            "package model

type (
	User struct{ Name string }
	Store interface{ Get() User }
)
",
        );
        let names: Vec<&str> = f.types().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["User", "Store"]);
    }

    #[test]
    fn extracts_function_signature() {
        let f = parse(
            "package service

func NewFoo(a, b int, repo *Repo) (*foo, error) {
	return nil, nil
}
",
        );
        let func = f.functions().next().unwrap();
        assert_eq!(func.name, "NewFoo");
        assert!(func.receiver.is_none());
        assert_eq!(func.params.len(), 3);
        assert_eq!(func.params[2].to_string(), "*Repo");
        assert_eq!(func.results.len(), 2);
        assert_eq!(func.results[0].to_string(), "*foo");
        assert_eq!(func.position, Position::new(3, 1));

        let ps = params(&f);
        assert_eq!(ps.len(), 4);
        assert_eq!(ps[0].names, vec!["a", "b"]);
        assert_eq!(ps[1].names, vec!["repo"]);
        assert_eq!(ps[2].role, ParamRole::Result);
        assert!(ps[2].names.is_empty());
        // Direct parameter/result pointers are not free-standing
        assert!(pointers(&f).is_empty());
    }

    #[test]
    fn single_result_without_parens() {
        let f = parse("package service\n\nfunc NewFoo() *foo { return nil }\n");
        let func = f.functions().next().unwrap();
        assert_eq!(
            func.results,
            vec![TypeExpr::Pointer(Box::new(TypeExpr::Named("foo".into())))]
        );
        assert!(pointers(&f).is_empty());
    }

    #[test]
    fn extracts_receiver() {
        let f = parse(
            "package service

func (s *fooService) Run() {}
func (s fooService) Name() string { return \"\" }
",
        );
        let funcs: Vec<&FuncDecl> = f.functions().collect();
        let r0 = funcs[0].receiver.as_ref().unwrap();
        assert_eq!(r0.type_name, "fooService");
        assert!(r0.pointer);
        let r1 = funcs[1].receiver.as_ref().unwrap();
        assert!(!r1.pointer);
        assert!(pointers(&f).is_empty());
    }

    #[test]
    fn extracts_fields_with_owner_and_qualified_types() {
        let f = parse(
            "package service

type fooService struct {
	repo   *Repo
	store  *repository.Store
	a, b   int
	Base
}
",
        );
        let fs = fields(&f);
        assert_eq!(fs.len(), 4);
        assert_eq!(fs[0].owner.as_deref(), Some("fooService"));
        assert_eq!(fs[0].names, vec!["repo"]);
        assert_eq!(fs[0].position, Position::new(4, 9));
        assert_eq!(
            fs[1].ty,
            TypeExpr::Pointer(Box::new(TypeExpr::Qualified {
                package: "repository".into(),
                name: "Store".into(),
            }))
        );
        assert_eq!(fs[2].names, vec!["a", "b"]);
        assert!(fs[3].names.is_empty());
        assert!(pointers(&f).is_empty());
    }

    #[test]
    fn collects_free_standing_pointers() {
        let f = parse(
            "package service

type Store interface {
	Find(r *Repo) error
}

var global *Repo

type holder struct {
	items []*Repo
}
",
        );
        let ps = pointers(&f);
        assert_eq!(ps.len(), 3);
        assert!(ps.iter().all(|p| p.ty.to_string() == "*Repo"));
        assert_eq!(ps[1].position, Position::new(7, 12));
    }

    #[test]
    fn pointer_conversions_are_pointers() {
        let f = parse(
            "package service

var _ = (*Repo)(nil)

var _ = (*repo.Store)(nil)

func run(f func()) {
	(f)()
	_ = -(x)
}
",
        );
        let ps = pointers(&f);
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].ty.to_string(), "*Repo");
        assert_eq!(ps[0].position, Position::new(3, 10));
        assert_eq!(ps[1].ty.to_string(), "*repo.Store");
    }

    #[test]
    fn anonymous_struct_fields_have_no_owner() {
        let f = parse(
            "package service

func run() {
	x := struct{ repo *Repo }{}
	_ = x
}
",
        );
        let fs = fields(&f);
        assert_eq!(fs.len(), 1);
        assert!(fs[0].owner.is_none());
    }

    #[test]
    fn generic_types_resolve_to_base() {
        let f = parse("package service\n\ntype box struct {\n\tv *Pair[string, int]\n}\n");
        assert_eq!(fields(&f)[0].ty.to_string(), "*Pair");
    }

    #[test]
    fn decls_are_in_source_order() {
        let f = parse(
            "package service

func a() {}

type T struct{ x *int }

func b(p *T) {}
",
        );
        let positions: Vec<Position> = f.decls.iter().map(Decl::position).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn syntax_error_reports_position() {
        let err = GoParser::new()
            .unwrap()
            .parse("bad.go", "package main\n\nfunc main( {\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.position().is_some());
    }

    #[test]
    fn missing_package_clause() {
        let err = GoParser::new()
            .unwrap()
            .parse("bad.go", "func main() {}\n")
            .unwrap_err();
        assert_eq!(err, ParseError::MissingPackage);
    }
}
