//! Source tree loading.
//!
//! Walks the root, applies the [`ExclusionSet`], parses the remaining `.go`
//! files in parallel and groups them into [`Package`]s by declared package
//! name. A file that cannot be read or parsed becomes a `PARSE` diagnostic
//! and never aborts the load.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::analyzer::AnalyzerError;
use crate::exclude::ExclusionSet;
use crate::model::{Package, SourceFile};
use crate::parser::GoParser;
use crate::types::{Diagnostic, Location, Position, Severity};

/// Code of the diagnostic emitted for unparsable files.
pub const PARSE_CODE: &str = "PARSE";
/// Name of the diagnostic emitted for unparsable files.
pub const PARSE_NAME: &str = "unparsable-file";

/// Result of loading a source tree.
#[derive(Debug, Default)]
pub struct LoadedTree {
    /// Packages sorted by name, each with files sorted by path.
    pub packages: Vec<Package>,
    /// One diagnostic per file that could not be read or parsed.
    pub failures: Vec<Diagnostic>,
    /// Number of files parsed successfully.
    pub files_checked: usize,
}

/// Loads the Go files under `root`.
///
/// # Errors
///
/// Returns an error if the root does not exist, is not a directory, cannot
/// be listed, or the Go grammar fails to load.
pub fn load(root: &Path, exclusions: &ExclusionSet) -> Result<LoadedTree, AnalyzerError> {
    if !root.is_dir() {
        return Err(AnalyzerError::RootNotFound(root.to_path_buf()));
    }

    let mut files = discover(root, exclusions)?;
    files.sort();
    info!("Found {} Go files under {}", files.len(), root.display());

    // Fail fast if the grammar is unusable rather than once per file.
    GoParser::new()?;

    let outcomes: Vec<Result<SourceFile, Diagnostic>> = files
        .par_iter()
        .map_init(GoParser::new, |parser, rel| match parser {
            Ok(parser) => parse_file(parser, root, rel),
            Err(e) => Err(failure(rel, None, format!("failed to load Go grammar: {e}"))),
        })
        .collect();

    let mut tree = LoadedTree::default();
    let mut grouped: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();
    for outcome in outcomes {
        match outcome {
            Ok(file) => {
                tree.files_checked += 1;
                grouped.entry(file.package.clone()).or_default().push(file);
            }
            Err(diagnostic) => tree.failures.push(diagnostic),
        }
    }
    tree.packages = grouped
        .into_iter()
        .map(|(name, files)| Package::new(name, files))
        .collect();

    debug!(
        "Loaded {} packages, {} unparsable files",
        tree.packages.len(),
        tree.failures.len()
    );
    Ok(tree)
}

/// Collects candidate `.go` files as paths relative to `root`.
fn discover(root: &Path, exclusions: &ExclusionSet) -> Result<Vec<PathBuf>, AnalyzerError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !exclusions.prunes_dir(relative(root, entry.path()))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(AnalyzerError::Walk(e)),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !entry.path().extension().is_some_and(|ext| ext == "go")
        {
            continue;
        }
        let rel = relative(root, entry.path());
        if exclusions.excludes_file(rel) {
            debug!("Excluding: {}", rel.display());
            continue;
        }
        files.push(rel.to_path_buf());
    }
    Ok(files)
}

fn parse_file(parser: &mut GoParser, root: &Path, rel: &Path) -> Result<SourceFile, Diagnostic> {
    debug!("Parsing: {}", rel.display());
    let source = std::fs::read_to_string(root.join(rel))
        .map_err(|e| failure(rel, None, format!("failed to read file: {e}")))?;
    parser.parse(rel, &source).map_err(|e| {
        warn!("Failed to parse {}: {e}", rel.display());
        failure(rel, e.position(), format!("unparsable file: {e}"))
    })
}

fn failure(rel: &Path, position: Option<Position>, message: String) -> Diagnostic {
    let location = match position {
        Some(position) => Location::new(rel, position),
        None => Location::file(rel),
    };
    Diagnostic::new(PARSE_CODE, PARSE_NAME, Severity::Error, location, message)
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
