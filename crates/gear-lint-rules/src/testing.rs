//! Fixtures shared by the rule unit tests.

use gear_lint_core::{Config, GoParser, InterfaceResolver, Package, RuleContext};
use std::collections::HashSet;
use std::path::Path;

/// Resolver answering from a fixed set of `(import path, type name)` pairs.
#[derive(Default)]
pub struct StubResolver {
    interfaces: HashSet<(String, String)>,
}

impl StubResolver {
    pub fn with(mut self, import_path: &str, type_name: &str) -> Self {
        self.interfaces
            .insert((import_path.to_string(), type_name.to_string()));
        self
    }
}

impl InterfaceResolver for StubResolver {
    fn is_interface(&self, import_path: &str, type_name: &str) -> bool {
        self.interfaces
            .contains(&(import_path.to_string(), type_name.to_string()))
    }
}

/// Parses `(path, source)` pairs into one package named after the first file.
pub fn package(files: &[(&str, &str)]) -> Package {
    let mut parser = GoParser::new().expect("Failed to load Go grammar");
    let files: Vec<_> = files
        .iter()
        .map(|(path, src)| parser.parse(*path, src).expect("Failed to parse fixture"))
        .collect();
    let name = files.first().map(|f| f.package.clone()).unwrap_or_default();
    Package::new(name, files)
}

pub fn context<'a>(config: &'a Config, resolver: &'a StubResolver) -> RuleContext<'a> {
    RuleContext::new(Path::new("."), config, resolver)
}
