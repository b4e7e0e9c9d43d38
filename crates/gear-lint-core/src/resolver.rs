//! Cross-package type resolution.
//!
//! Answers whether a type named in an import is an interface by parsing the
//! imported package's directory on demand. Answers are cached per import
//! path for the lifetime of the resolver, which is one analysis run.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::model::is_exported;
use crate::parser::GoParser;

/// Resolves whether a type from another package is an interface.
pub trait InterfaceResolver: Send + Sync {
    /// Returns `true` iff `type_name` is declared as an interface in the
    /// package at `import_path`. Any failure to find out answers `false`.
    fn is_interface(&self, import_path: &str, type_name: &str) -> bool;
}

/// Resolver that maps import paths onto directories under the root.
pub struct PackageResolver {
    root: PathBuf,
    module: Option<String>,
    /// Interface names per import path; an empty set records a miss.
    cache: Mutex<HashMap<String, HashSet<String>>>,
}

impl PackageResolver {
    /// Creates a resolver for `root`.
    ///
    /// `module` is the Go module path. When `None`, the `module` line of
    /// `<root>/go.mod` is used if present.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, module: Option<String>) -> Self {
        let root = root.into();
        let module = module.or_else(|| read_module_path(&root));
        if module.is_none() {
            debug!("No module path known; import paths are taken as directories");
        }
        Self {
            root,
            module,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The module path in use, if any.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Maps an import path onto a directory relative to the root.
    fn candidate_dir(&self, import_path: &str) -> Option<PathBuf> {
        let Some(module) = self.module.as_deref() else {
            return Some(PathBuf::from(import_path));
        };
        if import_path == module {
            return Some(PathBuf::new());
        }
        import_path
            .strip_prefix(module)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(PathBuf::from)
    }

    /// Parses the non-test Go files of one directory and collects the
    /// interface names declared there.
    fn load_interfaces(&self, import_path: &str) -> HashSet<String> {
        let mut interfaces = HashSet::new();
        let Some(rel) = self.candidate_dir(import_path) else {
            debug!("Import {import_path} is outside the module");
            return interfaces;
        };
        let dir = self.root.join(&rel);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot resolve {import_path} at {}: {e}", dir.display());
                return interfaces;
            }
        };
        let Ok(mut parser) = GoParser::new() else {
            return interfaces;
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| is_package_source(p))
            .collect();
        paths.sort();

        for path in paths {
            let parsed = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|src| parser.parse(&path, &src).map_err(|e| e.to_string()));
            match parsed {
                Ok(file) => interfaces.extend(
                    file.types()
                        .filter(|t| t.is_interface())
                        .map(|t| t.name.clone()),
                ),
                Err(e) => debug!("Skipping {} while resolving: {e}", path.display()),
            }
        }
        debug!(
            "Resolved {import_path}: {} interfaces",
            interfaces.len()
        );
        interfaces
    }
}

impl InterfaceResolver for PackageResolver {
    fn is_interface(&self, import_path: &str, type_name: &str) -> bool {
        // Unexported names cannot be referenced across packages.
        if !is_exported(type_name) {
            return false;
        }
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(import_path.to_string())
            .or_insert_with(|| self.load_interfaces(import_path))
            .contains(type_name)
    }
}

/// Reads the `module` directive of `<root>/go.mod`.
#[must_use]
pub fn read_module_path(root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(root.join("go.mod")).ok()?;
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}

fn is_package_source(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".go") && !n.ends_with("_test.go"))
}
