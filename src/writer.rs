//! Resumable destination writing.
//!
//! Re-runs can preserve a hand-written prefix of the previous output: the
//! caller names how many leading lines to keep, and the writer positions
//! the stream just past them. Everything from that byte onward is
//! overwritten by the new transformation output.

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use crate::error::{Error, Result};

/// Sums the byte length (plus one line-terminator byte) of the first
/// `lines` lines of an existing file. Zero lines means offset zero.
pub async fn line_bytes(path: &Path, lines: usize) -> Result<u64> {
    let file = File::open(path).await.map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::new(file).lines();

    let mut bytes = 0u64;
    let mut counted = 0usize;

    while counted < lines {
        match reader.next_line().await.map_err(|e| Error::io(path, e))? {
            Some(line) => {
                bytes += line.len() as u64 + 1;
                counted += 1;
            }
            None => break,
        }
    }

    Ok(bytes)
}

/// Opens the destination positioned for writing and returns the resume
/// offset.
///
/// A missing file or a zero skip count truncates and starts at byte 0;
/// otherwise the file is opened read-write without truncation and the
/// cursor lands just past the preserved prefix, leaving those bytes intact.
pub async fn open_destination(path: &Path, skip: usize) -> Result<(File, u64)> {
    if !path.exists() || skip == 0 {
        let file = File::create(path).await.map_err(|e| Error::io(path, e))?;
        return Ok((file, 0));
    }

    let offset = line_bytes(path, skip).await?;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    file.seek(SeekFrom::Start(offset))
        .await
        .map_err(|e| Error::io(path, e))?;

    Ok((file, offset))
}
