//! Filesystem bootstrap for inputs, outputs and log sinks.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ensures a directory exists, creating missing parents recursively.
pub fn ensure_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    }

    Ok(path.to_path_buf())
}

/// Ensures a file exists, creating it (and its parent directories) empty
/// when missing.
pub fn ensure_file(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .write(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    Ok(path.to_path_buf())
}

/// Derives and opens the log file for a path-shaped sink target.
///
/// A target with an extension is taken as the log file itself; a bare
/// directory path gets `log.txt` inside it. Opened append + create so
/// repeated runs share one log.
pub fn resolve_log_sink(target: &str) -> Result<File> {
    let path = Path::new(target);

    let log_path = if path.extension().is_some() {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }
        path.to_path_buf()
    } else {
        ensure_dir(path)?;
        path.join("log.txt")
    };

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| Error::io(&log_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_creates_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_file_creates_empty_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("no folder/noFile.js");

        ensure_file(&file).unwrap();
        assert!(file.is_file());
        assert_eq!(fs::metadata(&file).unwrap().len(), 0);
    }

    #[test]
    fn test_ensure_file_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("kept.js");
        fs::write(&file, "content").unwrap();

        ensure_file(&file).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "content");
    }

    #[test]
    fn test_log_sink_from_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        resolve_log_sink(logs.to_str().unwrap()).unwrap();
        assert!(logs.join("log.txt").is_file());
    }

    #[test]
    fn test_log_sink_from_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("run/out.log");

        resolve_log_sink(log.to_str().unwrap()).unwrap();
        assert!(log.is_file());
    }
}
