//! Directory listing entry types.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Audio stream parameters read from a wave file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveInfo {
    /// Channel count (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Average bit rate in bits per second.
    pub bit_rate: u32,
}

impl WaveInfo {
    /// Create wave info from header fields.
    pub fn new(channels: u16, sample_rate: u32, bit_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bit_rate,
        }
    }
}

/// A single file or directory within a pane listing.
///
/// `path` is absolute and unique within its listing; it is the identity
/// used by selection sets and the transfer queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Entry name (not full path).
    pub name: CompactString,

    /// Size in bytes (0 for directories).
    pub size: u64,

    /// Audio parameters, present for wave files only.
    pub wave: Option<WaveInfo>,

    /// Whether the entry is a directory.
    pub is_directory: bool,

    /// Absolute path of the entry.
    pub path: PathBuf,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new_file(name: impl Into<CompactString>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            wave: None,
            is_directory: false,
            path: path.into(),
        }
    }

    /// Create a new directory entry.
    pub fn new_directory(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            wave: None,
            is_directory: true,
            path: path.into(),
        }
    }

    /// Attach wave header info to a file entry.
    pub fn with_wave(mut self, wave: WaveInfo) -> Self {
        self.wave = Some(wave);
        self
    }

    /// Check if this entry is a regular file.
    pub fn is_file(&self) -> bool {
        !self.is_directory
    }

    /// Channel count, if known.
    pub fn channels(&self) -> Option<u16> {
        self.wave.map(|w| w.channels)
    }

    /// Sample rate in Hz, if known.
    pub fn sample_rate(&self) -> Option<u32> {
        self.wave.map(|w| w.sample_rate)
    }

    /// Bit rate in bits per second, if known.
    pub fn bit_rate(&self) -> Option<u32> {
        self.wave.map(|w| w.bit_rate)
    }

    /// Check if the entry name has a `.wav` extension.
    pub fn is_wave_name(name: &str) -> bool {
        Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_creation() {
        let entry = FileEntry::new_file("kick.wav", 88244, "/samples/kick.wav");
        assert!(entry.is_file());
        assert!(!entry.is_directory);
        assert_eq!(entry.size, 88244);
        assert!(entry.wave.is_none());
    }

    #[test]
    fn test_directory_entry_creation() {
        let entry = FileEntry::new_directory("drums", "/samples/drums");
        assert!(entry.is_directory);
        assert!(!entry.is_file());
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn test_wave_info_accessors() {
        let entry = FileEntry::new_file("snare.wav", 176488, "/samples/snare.wav")
            .with_wave(WaveInfo::new(2, 44_100, 1_411_200));
        assert_eq!(entry.channels(), Some(2));
        assert_eq!(entry.sample_rate(), Some(44_100));
        assert_eq!(entry.bit_rate(), Some(1_411_200));
    }

    #[test]
    fn test_is_wave_name() {
        assert!(FileEntry::is_wave_name("kick.wav"));
        assert!(FileEntry::is_wave_name("KICK.WAV"));
        assert!(!FileEntry::is_wave_name("kick.aif"));
        assert!(!FileEntry::is_wave_name("wav"));
    }
}
