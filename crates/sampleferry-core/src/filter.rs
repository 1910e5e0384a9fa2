//! View filters for pane listings.
//!
//! Filters are a pure view transform: they compute which unfiltered
//! indices are visible and never touch listing order, selection, or the
//! cursor.

use crate::FileEntry;

/// Active filter set for one pane. All conditions compose with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Case-insensitive substring matched against entry names.
    pub text: String,
    /// Hide directory entries.
    pub hide_directories: bool,
    /// Keep only wave files with exactly this channel count.
    pub channels: Option<u16>,
    /// Keep only wave files with exactly this sample rate.
    pub sample_rate: Option<u32>,
}

impl ListingFilter {
    /// Check whether any condition is set.
    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
            || self.hide_directories
            || self.channels.is_some()
            || self.sample_rate.is_some()
    }

    /// Reset all conditions.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check whether an entry passes every active condition.
    pub fn matches(&self, entry: &FileEntry) -> bool {
        if self.hide_directories && entry.is_directory {
            return false;
        }
        if !self.text.is_empty()
            && !entry.name.to_lowercase().contains(&self.text.to_lowercase())
        {
            return false;
        }
        if let Some(channels) = self.channels
            && entry.channels() != Some(channels)
        {
            return false;
        }
        if let Some(rate) = self.sample_rate
            && entry.sample_rate() != Some(rate)
        {
            return false;
        }
        true
    }

    /// Indices into `entries` that survive the filter, in listing order.
    pub fn visible_indices(&self, entries: &[FileEntry]) -> Vec<usize> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.matches(entry))
            .map(|(index, _)| index)
            .collect()
    }

    /// Short summary for the status bar, `None` when inactive.
    pub fn summary(&self) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        let mut parts = Vec::new();
        if !self.text.is_empty() {
            parts.push(format!("\"{}\"", self.text));
        }
        if self.hide_directories {
            parts.push("files only".to_string());
        }
        if let Some(channels) = self.channels {
            parts.push(format!("ch:{channels}"));
        }
        if let Some(rate) = self.sample_rate {
            parts.push(format!("rate:{rate}"));
        }
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WaveInfo;

    fn listing() -> Vec<FileEntry> {
        vec![
            FileEntry::new_directory("drums", "/s/drums"),
            FileEntry::new_file("kick.wav", 100, "/s/kick.wav")
                .with_wave(WaveInfo::new(1, 44_100, 705_600)),
            FileEntry::new_file("Kick_Long.wav", 200, "/s/Kick_Long.wav")
                .with_wave(WaveInfo::new(2, 48_000, 1_536_000)),
            FileEntry::new_file("notes.txt", 10, "/s/notes.txt"),
        ]
    }

    #[test]
    fn test_inactive_filter_shows_everything() {
        let filter = ListingFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.visible_indices(&listing()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let filter = ListingFilter {
            text: "kick".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.visible_indices(&listing()), vec![1, 2]);
    }

    #[test]
    fn test_conditions_compose_with_and() {
        let filter = ListingFilter {
            text: "kick".to_string(),
            channels: Some(2),
            ..Default::default()
        };
        assert_eq!(filter.visible_indices(&listing()), vec![2]);
    }

    #[test]
    fn test_hide_directories() {
        let filter = ListingFilter {
            hide_directories: true,
            ..Default::default()
        };
        assert_eq!(filter.visible_indices(&listing()), vec![1, 2, 3]);
    }

    #[test]
    fn test_rate_filter_excludes_unknown() {
        let filter = ListingFilter {
            sample_rate: Some(44_100),
            ..Default::default()
        };
        // notes.txt has no wave info and the directory has none either.
        assert_eq!(filter.visible_indices(&listing()), vec![1]);
    }

    #[test]
    fn test_summary() {
        let filter = ListingFilter {
            text: "kick".to_string(),
            channels: Some(2),
            ..Default::default()
        };
        assert_eq!(filter.summary().as_deref(), Some("\"kick\" ch:2"));
        assert_eq!(ListingFilter::default().summary(), None);
    }
}
