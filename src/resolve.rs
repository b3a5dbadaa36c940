//! Dependency-specifier resolution.
//!
//! A configured specifier is one of three shapes:
//! - `anchor::path` — the path resolves against the named anchor alone,
//!   ignoring the destination directory and the configured anchor;
//! - a bare platform module (`fs`, `xmlhttprequest-ssl`) — passed through
//!   verbatim, never validated, never created on disk;
//! - anything else — resolved to an absolute path and validated.
//!
//! Base directories are captured explicitly at construction instead of read
//! from ambient process state, so tests and embedders can supply their own.

use std::env;
use std::path::{Component, Path, PathBuf};

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::validate;

static BARE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]+$").unwrap());

/// Base directory a relative specifier is resolved against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// The process working directory
    Cwd,
    /// The directory this tool runs from
    #[default]
    Tool,
    /// The output root; specifiers resolve root-relative, skipping the
    /// destination directory
    #[serde(alias = "output-root")]
    Root,
}

impl Anchor {
    fn from_keyword(word: &str) -> Result<Self> {
        match word {
            "cwd" => Ok(Self::Cwd),
            "tool" => Ok(Self::Tool),
            "root" | "output-root" => Ok(Self::Root),
            other => Err(Error::UnknownAnchor(other.to_string())),
        }
    }
}

/// A dependency ready to be rendered as a require statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    pub alias: String,
    /// The raw specifier for bare platform modules, the resolved absolute
    /// path (forward slashes) otherwise.
    pub target: String,
    pub bare: bool,
}

/// Whether a specifier names a platform/built-in module: letters, digits,
/// underscore and hyphen only, no path separators or dots.
pub fn is_bare(specifier: &str) -> bool {
    BARE_PATTERN.is_match(specifier)
}

/// Repairs the single-colon anchor typo (`root:x` for `root::x`).
///
/// Returns the repaired specifier, or `None` when nothing needed fixing.
pub fn fix_common_typos(specifier: &str) -> Option<String> {
    for keyword in ["cwd", "tool", "root"] {
        if let Some(rest) = specifier.strip_prefix(keyword) {
            if let Some(path) = rest.strip_prefix(':') {
                if !path.is_empty() && !path.starts_with(':') {
                    return Some(format!("{keyword}::{path}"));
                }
            }
        }
    }

    None
}

/// Resolves configured dependencies against explicit base directories.
#[derive(Debug, Clone)]
pub struct Resolver {
    cwd: PathBuf,
    tool_dir: PathBuf,
    dest_dir: PathBuf,
    anchor: Anchor,
}

impl Resolver {
    /// Captures the process working directory and the tool's installation
    /// directory as resolution bases.
    pub fn new(dest_dir: impl Into<PathBuf>, anchor: Anchor) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| Error::io(".", e))?;
        let tool_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| cwd.clone());

        Ok(Self::with_roots(cwd, tool_dir, dest_dir, anchor))
    }

    /// Builds a resolver with caller-supplied base directories.
    pub fn with_roots(
        cwd: impl Into<PathBuf>,
        tool_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        anchor: Anchor,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            tool_dir: tool_dir.into(),
            dest_dir: dest_dir.into(),
            anchor,
        }
    }

    fn base_of(&self, anchor: Anchor) -> &Path {
        match anchor {
            Anchor::Cwd | Anchor::Root => &self.cwd,
            Anchor::Tool => &self.tool_dir,
        }
    }

    /// Resolves one configured dependency into its require target.
    pub fn resolve(&self, alias: &str, specifier: &str) -> Result<ResolvedImport> {
        if let Some((keyword, path)) = specifier.split_once("::") {
            let anchor = Anchor::from_keyword(keyword)?;
            let target = resolve_segments(self.base_of(anchor), &[Path::new(path)]);
            return self.validated(alias, specifier, target);
        }

        if is_bare(specifier) {
            return Ok(ResolvedImport {
                alias: alias.to_string(),
                target: specifier.to_string(),
                bare: true,
            });
        }

        // Root is root-relative: the destination directory never interposes.
        let target = match self.anchor {
            Anchor::Root => resolve_segments(self.base_of(Anchor::Root), &[Path::new(specifier)]),
            anchor => {
                resolve_segments(self.base_of(anchor), &[&self.dest_dir, Path::new(specifier)])
            }
        };

        self.validated(alias, specifier, target)
    }

    fn validated(&self, alias: &str, specifier: &str, target: PathBuf) -> Result<ResolvedImport> {
        if let Err(err) = validate::ensure_file(&target) {
            return Err(match err {
                Error::Io { source, .. } => Error::Resolution {
                    specifier: specifier.to_string(),
                    source,
                },
                other => other,
            });
        }

        Ok(ResolvedImport {
            alias: alias.to_string(),
            target: forward_slashes(&target),
            bare: false,
        })
    }
}

/// `path.resolve` semantics: segments apply left to right, an absolute
/// segment restarts resolution, `.` and `..` are folded lexically.
fn resolve_segments(base: &Path, segments: &[&Path]) -> PathBuf {
    let mut acc = normalize(base);

    for segment in segments {
        if segment.is_absolute() {
            acc = normalize(segment);
        } else {
            acc = normalize(&acc.join(segment));
        }
    }

    acc
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

fn forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(root: &Path, dest: &Path, anchor: Anchor) -> Resolver {
        Resolver::with_roots(root, root.join("tool"), dest, anchor)
    }

    #[test]
    fn test_bare_specifiers_pass_through_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let resolver = resolver(dir.path(), &dest, Anchor::Cwd);

        for name in ["fs", "events", "xmlhttprequest-ssl"] {
            let import = resolver.resolve("mod", name).unwrap();
            assert!(import.bare);
            assert_eq!(import.target, name);
        }

        // Nothing may be created for platform modules.
        assert!(!dest.join("xmlhttprequest-ssl").exists());
        assert!(!dir.path().join("fs").exists());
    }

    #[test]
    fn test_anchor_override_ignores_destination() {
        let dir = tempfile::tempdir().unwrap();
        let near = resolver(dir.path(), &dir.path().join("out/a"), Anchor::Tool);
        let far = resolver(dir.path(), &dir.path().join("elsewhere/b/c"), Anchor::Tool);

        let first = near.resolve("utils", "root::src/utils.js").unwrap();
        let second = far.resolve("utils", "root::src/utils.js").unwrap();

        assert_eq!(first.target, second.target);
        assert!(first.target.ends_with("src/utils.js"));
        assert!(dir.path().join("src/utils.js").exists());
    }

    #[test]
    fn test_relative_specifier_resolves_through_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let resolver = resolver(dir.path(), &dest, Anchor::Cwd);

        let import = resolver.resolve("lib", "lib/helper.js").unwrap();

        assert!(!import.bare);
        assert!(import.target.ends_with("out/lib/helper.js"));
        assert!(dest.join("lib/helper.js").exists());
    }

    #[test]
    fn test_root_anchor_is_root_relative() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(dir.path(), &dir.path().join("out"), Anchor::Root);

        let import = resolver.resolve("shared", "shared/api.js").unwrap();

        assert!(import.target.ends_with("shared/api.js"));
        assert!(!import.target.contains("/out/"));
        assert!(dir.path().join("shared/api.js").exists());
    }

    #[test]
    fn test_parent_segments_fold() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let resolver = resolver(dir.path(), &dest, Anchor::Cwd);

        let import = resolver.resolve("up", "../up.js").unwrap();

        assert!(!import.target.contains(".."));
        assert!(dir.path().join("up.js").exists());
    }

    #[test]
    fn test_unknown_override_keyword_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(dir.path(), &dir.path().join("out"), Anchor::Cwd);

        let err = resolver.resolve("x", "bogus::src/x.js").unwrap_err();
        assert!(matches!(err, Error::UnknownAnchor(word) if word == "bogus"));
    }

    #[test]
    fn test_fix_common_typos() {
        assert_eq!(
            fix_common_typos("root:src/utils.js").as_deref(),
            Some("root::src/utils.js")
        );
        assert_eq!(fix_common_typos("root::src/utils.js"), None);
        assert_eq!(fix_common_typos("cwd:a.js").as_deref(), Some("cwd::a.js"));
        assert_eq!(fix_common_typos("xmlhttprequest-ssl"), None);
        assert_eq!(fix_common_typos("root:"), None);
    }

    #[test]
    fn test_is_bare() {
        assert!(is_bare("fs"));
        assert!(is_bare("xmlhttprequest-ssl"));
        assert!(is_bare("lodash_4"));
        assert!(!is_bare("./local.js"));
        assert!(!is_bare("src/utils.js"));
        assert!(!is_bare("file.js"));
        assert!(!is_bare(""));
    }
}
