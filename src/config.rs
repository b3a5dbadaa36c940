//! Option surface for one transformation run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::resolve::Anchor;

/// A single substitution applied to every line, in list order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    pub replace: String,
}

/// One module to require at the top of the generated file.
///
/// An empty alias means a side-effecting require with no bound name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dependency {
    #[serde(default)]
    pub alias: String,
    pub specifier: String,
}

/// Everything configurable about a run. Loadable from a TOML file; CLI
/// flags override individual fields afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExposeOptions {
    /// Rewrite rules, applied to every line in this order.
    pub rewrite: Vec<RewriteRule>,
    /// Modules to require, injected in this order.
    pub dependencies: Vec<Dependency>,
    /// Lines of the existing output to preserve verbatim on re-runs.
    pub skip: usize,
    /// Base directory for relative dependency specifiers.
    pub anchor: Anchor,
    /// Suppress log output (events are still recorded).
    pub mute: bool,
    /// Style log lines written to a terminal.
    pub color: bool,
    /// Log to this file (or `log.txt` under this directory) instead of stdout.
    pub log: Option<String>,
}

impl Default for ExposeOptions {
    fn default() -> Self {
        Self {
            rewrite: Vec::new(),
            dependencies: Vec::new(),
            skip: 0,
            anchor: Anchor::default(),
            mute: false,
            color: true,
            log: None,
        }
    }
}

impl ExposeOptions {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        toml::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
