//! Flat directory listings for the browser panes.

use std::path::{Path, PathBuf};

use tracing::warn;

use sampleferry_core::{FileEntry, ListingError};

use crate::wave::probe_wave;

/// Read one directory level into pane entries.
///
/// Non-recursive. Entries whose metadata cannot be read are logged and
/// skipped; only failure to open the directory itself is an error.
/// `.wav` files get their header probed for audio parameters.
pub fn list_directory(path: &Path) -> Result<Vec<FileEntry>, ListingError> {
    let read_dir = std::fs::read_dir(path).map_err(|e| ListingError::io(path, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let entry_path = dir_entry.path();
        let name = dir_entry.file_name().to_string_lossy().to_string();

        // Follows symlinks so a linked directory still navigates.
        let metadata = match std::fs::metadata(&entry_path) {
            Ok(m) => m,
            Err(err) => {
                warn!(path = %entry_path.display(), error = %err, "skipping entry without metadata");
                continue;
            }
        };

        if metadata.is_dir() {
            entries.push(FileEntry::new_directory(name, entry_path));
        } else {
            let mut entry = FileEntry::new_file(name.clone(), metadata.len(), entry_path.clone());
            if FileEntry::is_wave_name(&name)
                && let Some(wave) = probe_wave(&entry_path)
            {
                entry = entry.with_wave(wave);
            }
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// The user's home directory, used to seed the source pane.
pub fn home_directory() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("drums")).unwrap();
        fs::write(root.join("notes.txt"), "hello").unwrap();

        let mut entries = list_directory(root).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_directory);
        assert_eq!(entries[0].name, "drums");
        assert!(entries[1].is_file());
        assert_eq!(entries[1].size, 5);
        assert_eq!(entries[1].path, root.join("notes.txt"));
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = list_directory(&temp.path().join("gone")).unwrap_err();
        assert!(matches!(err, ListingError::NotFound { .. }));
    }

    #[test]
    fn test_file_path_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("sample.wav");
        fs::write(&file, "x").unwrap();

        let err = list_directory(&file).unwrap_err();
        assert!(matches!(err, ListingError::NotADirectory { .. }));
    }

    #[test]
    fn test_non_wave_files_carry_no_audio_info() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("readme.md"), "# hi").unwrap();

        let entries = list_directory(temp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].wave.is_none());
    }

    #[test]
    fn test_malformed_wave_listed_without_audio_info() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.wav"), "not a riff file").unwrap();

        let entries = list_directory(temp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "broken.wav");
        assert!(entries[0].wave.is_none());
    }
}
