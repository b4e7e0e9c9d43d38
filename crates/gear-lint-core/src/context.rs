//! Context passed to rules.

use std::path::{Component, Path};
use walkdir::WalkDir;

use crate::config::Config;
use crate::exclude::ALWAYS_EXCLUDED_DIRS;
use crate::resolver::InterfaceResolver;

/// Read-only context shared by every rule during a run.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// Root directory of the validated tree.
    pub root: &'a Path,
    /// Effective configuration.
    pub config: &'a Config,
    /// Resolver for types declared in other packages.
    pub resolver: &'a dyn InterfaceResolver,
}

impl<'a> RuleContext<'a> {
    /// Creates a new rule context.
    #[must_use]
    pub fn new(root: &'a Path, config: &'a Config, resolver: &'a dyn InterfaceResolver) -> Self {
        Self {
            root,
            config,
            resolver,
        }
    }

    /// Whether a directory ending in `rel` exists anywhere under the root.
    ///
    /// `rel` is `/`-separated (`internal/config`). It matches at the root
    /// itself or as the trailing segments of any nested directory outside
    /// VCS metadata and `vendor`.
    #[must_use]
    pub fn has_dir(&self, rel: &str) -> bool {
        let wanted: Vec<&str> = rel
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if wanted.is_empty() {
            return self.root.is_dir();
        }
        if self.root.join(wanted.join("/")).is_dir() {
            return true;
        }

        WalkDir::new(self.root)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                e.depth() == 0 || !ALWAYS_EXCLUDED_DIRS.iter().any(|skip| name == *skip)
            })
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir())
            .any(|e| {
                let rel = e.path().strip_prefix(self.root).unwrap_or(e.path());
                let segments: Vec<String> = rel
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect();
                segments.len() >= wanted.len()
                    && segments[segments.len() - wanted.len()..]
                        .iter()
                        .zip(&wanted)
                        .all(|(a, b)| a == b)
            })
    }
}
