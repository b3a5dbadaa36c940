use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for one transformation run.
///
/// Configuration problems (bad anchor keyword, bad rewrite pattern) are
/// fatal and never fall back silently; a wrong anchor would produce wrong
/// require paths at runtime, which is exactly the class of bug the resolver
/// exists to prevent.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unrecognized anchor keyword `{0}`")]
    UnknownAnchor(String),

    #[error("invalid rewrite pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot resolve dependency `{specifier}`: {source}")]
    Resolution {
        specifier: String,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Attaches the offending path to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
