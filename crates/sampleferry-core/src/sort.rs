//! Sort order for pane listings.

use std::cmp::Ordering;

use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use crate::FileEntry;

/// Column a listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr)]
pub enum SortColumn {
    /// Entry name.
    #[default]
    Name,
    /// Size in bytes.
    Size,
    /// Wave channel count.
    #[strum(to_string = "Ch")]
    Channels,
    /// Wave sample rate.
    #[strum(to_string = "Rate")]
    SampleRate,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        let current = self as usize;
        let next = (current + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr)]
pub enum SortDirection {
    #[default]
    #[strum(to_string = "↑")]
    Ascending,
    #[strum(to_string = "↓")]
    Descending,
}

impl SortDirection {
    /// Flip the direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Compare two entry names using natural order, case-insensitive.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    alphanumeric_sort::compare_str(a.to_lowercase(), b.to_lowercase())
}

/// Sort a listing in place.
///
/// Directories always come before files regardless of column and
/// direction. Within each group the active column decides, with natural
/// name order breaking ties.
pub fn sort_entries(entries: &mut [FileEntry], column: SortColumn, direction: SortDirection) {
    entries.sort_by(|a, b| {
        match (a.is_directory, b.is_directory) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        let primary = match column {
            SortColumn::Name => compare_names(&a.name, &b.name),
            SortColumn::Size => a.size.cmp(&b.size),
            SortColumn::Channels => a.channels().cmp(&b.channels()),
            SortColumn::SampleRate => a.sample_rate().cmp(&b.sample_rate()),
        };
        let primary = if primary == Ordering::Equal {
            compare_names(&a.name, &b.name)
        } else {
            primary
        };

        match direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WaveInfo;

    fn listing() -> Vec<FileEntry> {
        vec![
            FileEntry::new_file("snare_10.wav", 300, "/s/snare_10.wav")
                .with_wave(WaveInfo::new(1, 48_000, 768_000)),
            FileEntry::new_directory("Kits", "/s/Kits"),
            FileEntry::new_file("snare_2.wav", 100, "/s/snare_2.wav")
                .with_wave(WaveInfo::new(2, 44_100, 1_411_200)),
            FileEntry::new_directory("breaks", "/s/breaks"),
            FileEntry::new_file("Hat.wav", 200, "/s/Hat.wav"),
        ]
    }

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_directories_first_every_combination() {
        for column in SortColumn::iter() {
            for direction in SortDirection::iter() {
                let mut entries = listing();
                sort_entries(&mut entries, column, direction);
                assert!(entries[0].is_directory, "{column} {direction}");
                assert!(entries[1].is_directory, "{column} {direction}");
                assert!(entries[2..].iter().all(FileEntry::is_file));
            }
        }
    }

    #[test]
    fn test_natural_name_order() {
        let mut entries = listing();
        sort_entries(&mut entries, SortColumn::Name, SortDirection::Ascending);
        assert_eq!(
            names(&entries),
            vec!["breaks", "Kits", "Hat.wav", "snare_2.wav", "snare_10.wav"]
        );
    }

    #[test]
    fn test_size_descending() {
        let mut entries = listing();
        sort_entries(&mut entries, SortColumn::Size, SortDirection::Descending);
        assert_eq!(
            names(&entries[2..]),
            vec!["snare_10.wav", "Hat.wav", "snare_2.wav"]
        );
    }

    #[test]
    fn test_channels_sorts_unknown_first() {
        let mut entries = listing();
        sort_entries(&mut entries, SortColumn::Channels, SortDirection::Ascending);
        // Hat.wav carries no wave info, so it orders before mono and stereo.
        assert_eq!(
            names(&entries[2..]),
            vec!["Hat.wav", "snare_10.wav", "snare_2.wav"]
        );
    }

    #[test]
    fn test_column_cycle_wraps() {
        let mut column = SortColumn::default();
        for _ in 0..SortColumn::iter().count() {
            column = column.next();
        }
        assert_eq!(column, SortColumn::Name);
    }
}
