//! Configuration types for gear-lint.
//!
//! A configuration document has two required-in-spirit sections, `exclude`
//! and `rules`, plus optional `module`, `classification` and `layout`
//! sections. Every field has a default so partial documents are valid.
//!
//! ```yaml
//! exclude:
//!   - "vendor"
//!   - "*_test.go"
//! rules:
//!   R02: "warning"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::types::Severity;

/// Top-level configuration for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclusion patterns: exact file names, directory segments, or globs.
    pub exclude: Vec<String>,

    /// Severity overrides keyed by rule code (`R01`) or rule name.
    pub rules: BTreeMap<String, Severity>,

    /// Go module path used to map import paths onto local directories.
    ///
    /// When unset, the `module` line of `go.mod` at the root is used.
    pub module: Option<String>,

    /// Naming and path heuristics used by the rules.
    pub classification: Classification,

    /// Expected project layout.
    pub layout: Layout,
}

impl Config {
    /// Loads configuration from a file.
    ///
    /// Files with a `.toml` extension are parsed as TOML, everything else
    /// (including `.gearrc`) as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_toml(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// Parses configuration from a YAML string.
    ///
    /// An empty document yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            format: "yaml",
            message: e.to_string(),
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })
    }

    /// Gets the severity override for a rule, looked up by code then name.
    #[must_use]
    pub fn rule_severity(&self, code: &str, name: &str) -> Option<Severity> {
        self.rules
            .get(code)
            .or_else(|| self.rules.get(name))
            .copied()
    }

    /// Replaces the exclusion list, keeping everything else.
    #[must_use]
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }
}

/// Heuristic tables that decide which declarations are data carriers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    /// Struct name suffixes that mark data-oriented types.
    pub data_suffixes: Vec<String>,
    /// Struct name prefixes that mark request-like data types.
    pub data_prefixes: Vec<String>,
    /// Directory names whose files hold data-carrying types.
    pub data_paths: Vec<String>,
    /// Function name prefix that marks a constructor.
    pub constructor_prefix: String,
    /// Directory names whose constructors may return concrete types.
    pub constructor_exempt_paths: Vec<String>,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            data_suffixes: strings(&[
                "Request",
                "Response",
                "Model",
                "DTO",
                "Data",
                "Entity",
                "Config",
                "Settings",
                "Options",
                "Params",
                "Result",
                "Info",
                "Status",
                "State",
                "Event",
                "Message",
                "Payload",
                "Body",
                "Error",
                "Exception",
                "Notification",
                "Alert",
                "Report",
            ]),
            data_prefixes: strings(&["Create", "Update", "Delete", "Get", "List", "Search"]),
            data_paths: strings(&[
                "model", "proto", "dto", "client", "provider", "config", "errors",
            ]),
            constructor_prefix: "New".to_string(),
            constructor_exempt_paths: strings(&[
                "utils", "util", "config", "model", "dto", "proto", "errors",
            ]),
        }
    }
}

impl Classification {
    /// Whether a struct name marks a data carrier.
    #[must_use]
    pub fn is_data_name(&self, name: &str) -> bool {
        self.data_suffixes.iter().any(|s| name.ends_with(s.as_str()))
            || self.data_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// Whether a file lives under one of the data-carrying directories.
    #[must_use]
    pub fn is_data_path(&self, path: &Path) -> bool {
        in_any_dir(path, &self.data_paths)
    }

    /// Whether constructors in this file are exempt from the interface rule.
    #[must_use]
    pub fn is_constructor_exempt(&self, path: &Path) -> bool {
        in_any_dir(path, &self.constructor_exempt_paths)
    }
}

/// Expected directory layout of a GEAR project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Centralized configuration package directory.
    pub config_dir: String,
    /// Centralized errors package directory.
    pub errors_dir: String,
    /// Directory that holds one sub-directory per domain.
    pub domains_dir: String,
    /// Layers every domain is expected to expose.
    pub domain_layers: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            config_dir: "internal/config".to_string(),
            errors_dir: "internal/errors".to_string(),
            domains_dir: "pkg".to_string(),
            domain_layers: strings(&["handler", "service", "repository", "model"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Checks whether any parent directory of `path` is named like one of `dirs`.
fn in_any_dir(path: &Path, dirs: &[String]) -> bool {
    path.parent().is_some_and(|parent| {
        parent.components().any(|c| {
            let c = c.as_os_str().to_string_lossy();
            dirs.iter().any(|d| *d == c)
        })
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        /// Document format that was being parsed.
        format: &'static str,
        /// Parse error message.
        message: String,
    },
}
