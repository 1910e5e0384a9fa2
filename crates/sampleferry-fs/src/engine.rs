//! The copy primitive behind the transfer queue.
//!
//! [`CopyEngine`] is the seam between the queue controller and the
//! disk. [`DiskEngine`] is the real implementation; tests drive the
//! controller against an in-memory stand-in instead.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Result of one copy attempt.
///
/// A name collision is its own variant so callers branch on it
/// directly instead of inspecting error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The item was copied.
    Ok,
    /// The destination name already exists and overwrite was not set.
    Conflict { path: PathBuf },
    /// Any other I/O failure.
    Io { message: String },
}

/// Copy primitive interface.
pub trait CopyEngine: Send + Sync {
    /// Copy `source` into the directory `dest_dir`, keeping its name.
    ///
    /// With `overwrite` set, an existing destination entry is removed
    /// first (a directory is replaced wholesale).
    fn copy_file(&self, source: &Path, dest_dir: &Path, overwrite: bool) -> CopyOutcome;

    /// Size of `source` in bytes, when it is a plain file.
    fn probe_size(&self, source: &Path) -> Option<u64>;
}

impl<E: CopyEngine + ?Sized> CopyEngine for std::sync::Arc<E> {
    fn copy_file(&self, source: &Path, dest_dir: &Path, overwrite: bool) -> CopyOutcome {
        (**self).copy_file(source, dest_dir, overwrite)
    }

    fn probe_size(&self, source: &Path) -> Option<u64> {
        (**self).probe_size(source)
    }
}

/// Copy engine backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskEngine;

impl CopyEngine for DiskEngine {
    fn copy_file(&self, source: &Path, dest_dir: &Path, overwrite: bool) -> CopyOutcome {
        let Some(file_name) = source.file_name() else {
            return CopyOutcome::Io {
                message: format!("source has no file name: {}", source.display()),
            };
        };
        let dest_path = dest_dir.join(file_name);

        if dest_path.exists() {
            if !overwrite {
                debug!(dest = %dest_path.display(), "copy blocked by existing name");
                return CopyOutcome::Conflict { path: dest_path };
            }
            if let Err(err) = remove_existing(&dest_path) {
                return CopyOutcome::Io {
                    message: format!("failed to replace '{}': {}", dest_path.display(), err),
                };
            }
        }

        let result = if source.is_dir() {
            copy_dir_recursive(source, &dest_path)
        } else {
            fs::copy(source, &dest_path).map(|_| ())
        };

        match result {
            Ok(()) => {
                debug!(source = %source.display(), dest = %dest_path.display(), "copied");
                CopyOutcome::Ok
            }
            Err(err) => CopyOutcome::Io {
                message: err.to_string(),
            },
        }
    }

    fn probe_size(&self, source: &Path) -> Option<u64> {
        let metadata = fs::metadata(source).ok()?;
        metadata.is_file().then(|| metadata.len())
    }
}

fn remove_existing(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn copy_dir_recursive(source: &Path, dest: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());
        if path.is_dir() {
            copy_dir_recursive(&path, &dest_path)?;
        } else {
            fs::copy(&path, &dest_path)?;
        }
    }
    Ok(())
}
