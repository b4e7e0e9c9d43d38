//! Exclusion policy for the source tree walk.
//!
//! A pattern without wildcards matches a path when its segments appear as a
//! contiguous run of whole path segments (`vendor` matches `a/vendor/b.go`,
//! `pkg/external` matches `pkg/external/x.go`, `user.go` matches
//! `pkg/user/user.go`). A pattern with `*` or `?` is a glob matched
//! against the base name or the whole relative path; `*` does not cross `/`.

use glob::{MatchOptions, Pattern};
use std::path::{Component, Path};
use tracing::warn;

/// Directory names that are never descended, whatever the configuration says.
pub const ALWAYS_EXCLUDED_DIRS: &[&str] = &[".git", ".hg", ".svn", "vendor"];

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
enum Matcher {
    Segments(Vec<String>),
    Glob(Pattern),
}

/// A compiled, ordered list of exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    matchers: Vec<Matcher>,
}

impl ExclusionSet {
    /// Compiles exclusion patterns.
    ///
    /// Patterns are trimmed and empty ones ignored. An invalid glob is
    /// logged and skipped.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = patterns
            .into_iter()
            .filter_map(|p| compile(p.as_ref()))
            .collect();
        Self { matchers }
    }

    /// Number of active patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether no pattern is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Whether a file (path relative to the root) is excluded.
    #[must_use]
    pub fn excludes_file(&self, rel: &Path) -> bool {
        let segments = segments(rel);
        if segments
            .iter()
            .rev()
            .skip(1)
            .any(|s| ALWAYS_EXCLUDED_DIRS.contains(&s.as_str()))
        {
            return true;
        }
        self.matchers.iter().any(|m| m.matches(&segments))
    }

    /// Whether a directory (path relative to the root) should not be
    /// descended into.
    #[must_use]
    pub fn prunes_dir(&self, rel: &Path) -> bool {
        let segments = segments(rel);
        let Some(last) = segments.last() else {
            return false;
        };
        if ALWAYS_EXCLUDED_DIRS.contains(&last.as_str()) {
            return true;
        }
        self.matchers.iter().any(|m| match m {
            Matcher::Segments(pattern) => segments.ends_with(pattern),
            Matcher::Glob(_) => false,
        })
    }
}

impl Matcher {
    fn matches(&self, segments: &[String]) -> bool {
        match self {
            Self::Segments(pattern) => segments
                .windows(pattern.len())
                .any(|window| window == pattern.as_slice()),
            Self::Glob(pattern) => {
                let base = segments.last().map_or("", String::as_str);
                pattern.matches_with(base, GLOB_OPTIONS)
                    || pattern.matches_with(&segments.join("/"), GLOB_OPTIONS)
            }
        }
    }
}

fn compile(raw: &str) -> Option<Matcher> {
    let raw = raw.trim().trim_matches('/');
    if raw.is_empty() {
        return None;
    }
    if raw.contains(['*', '?']) {
        return match Pattern::new(raw) {
            Ok(pattern) => Some(Matcher::Glob(pattern)),
            Err(e) => {
                warn!("Ignoring invalid exclusion pattern {raw:?}: {e}");
                None
            }
        };
    }
    let segments: Vec<String> = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect();
    (!segments.is_empty()).then_some(Matcher::Segments(segments))
}

fn segments(rel: &Path) -> Vec<String> {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
