//! Configuration file loading for pact.
//!
//! Reads `.pact/pact.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.
//! The loaded value is passed explicitly to the engine; nothing reads it globally.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Top-level pact configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PactConfig {
    pub version: String,
    /// Directive prefix: `//pact:immutable`, `//pact:ignore IMM01`, ...
    #[serde(default = "default_prefix")]
    pub directive_prefix: String,
    #[serde(default)]
    pub enforce: EnforceConfig,
    #[serde(default = "default_test_file_suffixes")]
    pub test_file_suffixes: Vec<String>,
    #[serde(default = "default_test_module_suffixes")]
    pub test_module_suffixes: Vec<String>,
    /// Project-wide suppressed codes or categories.
    #[serde(default)]
    pub suppress: Vec<String>,
    /// Glob patterns of module paths that are never analyzed.
    #[serde(default)]
    pub exclude_modules: Vec<String>,
}

/// Per-rule toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforceConfig {
    #[serde(default = "default_true")]
    pub immutable: bool,
    #[serde(default = "default_true")]
    pub constructor: bool,
    #[serde(default = "default_true")]
    pub implements: bool,
    #[serde(default = "default_true")]
    pub test_only: bool,
    #[serde(default = "default_true")]
    pub package_only: bool,
}

fn default_true() -> bool {
    true
}
fn default_prefix() -> String {
    "pact".to_string()
}
fn default_test_file_suffixes() -> Vec<String> {
    vec!["_test.go".to_string()]
}
fn default_test_module_suffixes() -> Vec<String> {
    vec!["_test".to_string()]
}

impl Default for EnforceConfig {
    fn default() -> Self {
        Self {
            immutable: true,
            constructor: true,
            implements: true,
            test_only: true,
            package_only: true,
        }
    }
}

impl Default for PactConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            directive_prefix: default_prefix(),
            enforce: EnforceConfig::default(),
            test_file_suffixes: default_test_file_suffixes(),
            test_module_suffixes: default_test_module_suffixes(),
            suppress: vec![],
            exclude_modules: vec![],
        }
    }
}

impl PactConfig {
    /// Load configuration from `pact.json` inside the given pact directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(pact_dir: &Path) -> Self {
        let config_path = pact_dir.join("pact.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Whether a function in `file` of `module` counts as test code.
    pub fn is_test_code(&self, module: &str, file: &str) -> bool {
        self.test_file_suffixes.iter().any(|s| file.ends_with(s.as_str()))
            || self
                .test_module_suffixes
                .iter()
                .any(|s| module.ends_with(s.as_str()))
    }

    /// Compile `exclude_modules` into a matcher. Invalid patterns are skipped.
    pub fn exclude_matcher(&self) -> GlobSet {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_modules {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid exclude pattern");
                }
            }
        }
        builder.build().unwrap_or_else(|_| GlobSet::empty())
    }
}
