//! Log Compaction
//!
//! Rewrites the log from a snapshot of live records and swaps it into place.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SlateError};
use super::Record;

const TMP_SUFFIX: &str = ".compact.tmp";

/// Path of the scratch file a vacuum writes before the swap
pub fn tmp_path(log_path: &Path) -> PathBuf {
    let mut name = OsString::from(log_path.as_os_str());
    name.push(TMP_SUFFIX);
    PathBuf::from(name)
}

/// Atomic log rewriter
pub struct Compactor;

impl Compactor {
    /// Replace the log at `path` with exactly `records`, in the given order
    ///
    /// Steps:
    /// 1. Write every record to `{path}.compact.tmp` in the same directory
    /// 2. fsync the temp file
    /// 3. rename it over `path` (atomic on POSIX filesystems)
    /// 4. fsync the parent directory so the rename itself is durable
    ///
    /// At every point either the old or the new log is at `path`. Returns the
    /// size of the new log in bytes.
    pub fn rewrite(path: &Path, records: &[Record]) -> Result<u64> {
        let tmp = tmp_path(path);

        let written = match Self::write_tmp(&tmp, records) {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(SlateError::write(path, e));
        }

        if let Err(e) = sync_parent_dir(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not sync log directory after compaction");
        }

        Ok(written)
    }

    fn write_tmp(tmp: &Path, records: &[Record]) -> Result<u64> {
        let file = File::create(tmp).map_err(|e| SlateError::write(tmp, e))?;
        let mut out = BufWriter::new(file);
        let mut written = 0u64;

        for record in records {
            let line = record.encode()?;
            out.write_all(line.as_bytes())
                .map_err(|e| SlateError::write(tmp, e))?;
            written += line.len() as u64;
        }

        let file = out
            .into_inner()
            .map_err(|e| SlateError::write(tmp, e.into_error()))?;
        file.sync_all().map_err(|e| SlateError::write(tmp, e))?;

        Ok(written)
    }

    /// Remove a temp file left behind by an interrupted compaction
    ///
    /// Returns true if one was found. The live log is untouched: an
    /// interrupted rewrite never reached the rename.
    pub fn cleanup_stale(path: &Path) -> Result<bool> {
        let tmp = tmp_path(path);
        match fs::remove_file(&tmp) {
            Ok(()) => {
                tracing::warn!(path = %tmp.display(), "removed leftover compaction file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SlateError::Io(e)),
        }
    }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
