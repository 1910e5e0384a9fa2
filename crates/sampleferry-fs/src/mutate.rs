//! Rename, delete, and create-directory mutations.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use sampleferry_core::MutationError;

/// Validate an entry name for cross-platform compatibility.
pub fn validate_entry_name(name: &str) -> Result<(), MutationError> {
    if name.is_empty() {
        return Err(MutationError::invalid_name("Name cannot be empty"));
    }

    if name.len() > 255 {
        return Err(MutationError::invalid_name(
            "Name is too long (max 255 characters)",
        ));
    }

    for c in ['/', '\0'] {
        if name.contains(c) {
            return Err(MutationError::invalid_name(format!(
                "Name cannot contain '{}'",
                c.escape_default()
            )));
        }
    }

    // Windows restrictions, enforced everywhere since destinations are
    // often FAT-formatted device mounts.
    let windows_invalid = ['\\', ':', '*', '?', '"', '<', '>', '|'];
    for c in windows_invalid {
        if name.contains(c) {
            return Err(MutationError::invalid_name(format!(
                "Name cannot contain '{c}'"
            )));
        }
    }

    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(MutationError::invalid_name(
            "Name cannot start or end with spaces",
        ));
    }

    if name.ends_with('.') {
        return Err(MutationError::invalid_name("Name cannot end with a dot"));
    }

    if name == "." || name == ".." {
        return Err(MutationError::invalid_name("'.' and '..' are reserved names"));
    }

    Ok(())
}

/// Rename an entry in place, returning the new path.
pub fn rename_entry(old_path: &Path, new_name: &str) -> Result<PathBuf, MutationError> {
    validate_entry_name(new_name)?;

    let Some(parent) = old_path.parent() else {
        return Err(MutationError::invalid_name("Cannot rename the filesystem root"));
    };
    let new_path = parent.join(new_name);

    if new_path.exists() && new_path != old_path {
        return Err(MutationError::AlreadyExists { path: new_path });
    }

    fs::rename(old_path, &new_path).map_err(|e| MutationError::io(old_path, e))?;
    debug!(from = %old_path.display(), to = %new_path.display(), "renamed");
    Ok(new_path)
}

/// Delete a file or directory (directories recursively).
pub fn delete_entry(path: &Path) -> Result<(), MutationError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| MutationError::io(path, e))?;

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|e| MutationError::io(path, e))?;
    debug!(path = %path.display(), "deleted");
    Ok(())
}

/// Create a directory named `name` under `base`, returning its path.
pub fn create_directory(base: &Path, name: &str) -> Result<PathBuf, MutationError> {
    validate_entry_name(name)?;

    let path = base.join(name);
    if path.exists() {
        return Err(MutationError::AlreadyExists { path });
    }

    fs::create_dir(&path).map_err(|e| MutationError::io(&path, e))?;
    debug!(path = %path.display(), "created directory");
    Ok(path)
}
