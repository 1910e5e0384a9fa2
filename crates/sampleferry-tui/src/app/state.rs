//! Application state types and persisted settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use sampleferry_core::{ListingFilter, SortColumn, SortDirection};

use crate::theme::ThemeVariant;

/// Application mode representing the current UI state.
/// Note: listing refreshes and transfers are NOT modes - they run in
/// the background while the user keeps browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Browse,
    Help,
    /// Renaming the entry under the cursor (text input mode).
    Renaming,
    /// Creating a directory in the active pane (text input mode).
    CreatingDirectory,
    /// Editing the active pane's filter (text input mode).
    Filtering,
    /// Confirming deletion of the entry under the cursor.
    ConfirmDelete,
    /// A batch is parked on a name conflict, waiting for a decision.
    Conflict,
    /// Blocking notice, shown until dismissed.
    Notice,
    Quit,
}

impl AppMode {
    /// Modes that route key events into the text input widget.
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            Self::Renaming | Self::CreatingDirectory | Self::Filtering
        )
    }
}

/// Persistent user settings stored in config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Theme variant name ("dark" or "light").
    pub theme: String,
    /// Show hidden files.
    pub show_hidden: bool,
    /// Sort column name ("name", "size", "channels", "rate").
    pub sort_column: String,
    /// Sort direction ("ascending" or "descending").
    pub sort_direction: String,
    /// Whether the source pane is open.
    pub source_pane_open: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            show_hidden: false,
            sort_column: "name".to_string(),
            sort_direction: "ascending".to_string(),
            source_pane_open: true,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sampleferry").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&path, content)
    }

    /// Theme variant these settings name.
    pub fn theme_variant(&self) -> ThemeVariant {
        ThemeVariant::from_name(&self.theme)
    }

    /// Remember a theme variant.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme = variant.as_str().to_string();
    }

    /// Sort order these settings name, defaulting to name ascending.
    pub fn sort(&self) -> (SortColumn, SortDirection) {
        let column = match self.sort_column.as_str() {
            "size" => SortColumn::Size,
            "channels" => SortColumn::Channels,
            "rate" => SortColumn::SampleRate,
            _ => SortColumn::Name,
        };
        let direction = match self.sort_direction.as_str() {
            "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        (column, direction)
    }

    /// Remember a sort order.
    pub fn set_sort(&mut self, column: SortColumn, direction: SortDirection) {
        self.sort_column = match column {
            SortColumn::Name => "name",
            SortColumn::Size => "size",
            SortColumn::Channels => "channels",
            SortColumn::SampleRate => "rate",
        }
        .to_string();
        self.sort_direction = match direction {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
        .to_string();
    }
}

/// Parse a filter input line into the pane filter.
///
/// Plain words become the substring match; `ch:N` and `rate:N` tokens
/// set the exact wave filters. The directory-hide toggle is keyed
/// separately and left untouched.
pub fn apply_filter_text(filter: &mut ListingFilter, raw: &str) {
    let mut words: Vec<&str> = Vec::new();
    let mut channels = None;
    let mut sample_rate = None;

    for token in raw.split_whitespace() {
        if let Some(value) = token.strip_prefix("ch:") {
            channels = value.parse().ok();
        } else if let Some(value) = token.strip_prefix("rate:") {
            sample_rate = value.parse().ok();
        } else {
            words.push(token);
        }
    }

    filter.text = words.join(" ");
    filter.channels = channels;
    filter.sample_rate = sample_rate;
}

/// Rebuild the filter input line from the active filter, so reopening
/// the input shows what is currently applied.
pub fn filter_input_seed(filter: &ListingFilter) -> String {
    let mut parts = Vec::new();
    if !filter.text.is_empty() {
        parts.push(filter.text.clone());
    }
    if let Some(channels) = filter.channels {
        parts.push(format!("ch:{channels}"));
    }
    if let Some(rate) = filter.sample_rate {
        parts.push(format!("rate:{rate}"));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = UserSettings::default();
        assert_eq!(settings.theme_variant(), ThemeVariant::Dark);
        assert_eq!(
            settings.sort(),
            (SortColumn::Name, SortDirection::Ascending)
        );
        assert!(settings.source_pane_open);
        assert!(!settings.show_hidden);
    }

    #[test]
    fn test_settings_toml_round_trip() {
        let mut settings = UserSettings::default();
        settings.set_theme(ThemeVariant::Light);
        settings.set_sort(SortColumn::SampleRate, SortDirection::Descending);
        settings.show_hidden = true;

        let raw = toml::to_string_pretty(&settings).unwrap();
        let loaded: UserSettings = toml::from_str(&raw).unwrap();
        assert_eq!(loaded.theme_variant(), ThemeVariant::Light);
        assert_eq!(
            loaded.sort(),
            (SortColumn::SampleRate, SortDirection::Descending)
        );
        assert!(loaded.show_hidden);
    }

    #[test]
    fn test_settings_tolerate_partial_file() {
        let loaded: UserSettings = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(loaded.theme_variant(), ThemeVariant::Light);
        assert_eq!(loaded.sort(), (SortColumn::Name, SortDirection::Ascending));
    }

    #[test]
    fn test_unknown_sort_names_fall_back() {
        let settings = UserSettings {
            sort_column: "modified".to_string(),
            sort_direction: "sideways".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.sort(), (SortColumn::Name, SortDirection::Ascending));
    }

    #[test]
    fn test_filter_text_tokens() {
        let mut filter = ListingFilter::default();
        apply_filter_text(&mut filter, "kick ch:2 rate:44100 long");
        assert_eq!(filter.text, "kick long");
        assert_eq!(filter.channels, Some(2));
        assert_eq!(filter.sample_rate, Some(44_100));
    }

    #[test]
    fn test_filter_text_replaces_previous_tokens() {
        let mut filter = ListingFilter {
            channels: Some(1),
            hide_directories: true,
            ..Default::default()
        };
        apply_filter_text(&mut filter, "snare");
        assert_eq!(filter.text, "snare");
        assert_eq!(filter.channels, None);
        // Directory hiding has its own key and survives re-filtering.
        assert!(filter.hide_directories);
    }

    #[test]
    fn test_filter_seed_round_trip() {
        let mut filter = ListingFilter::default();
        apply_filter_text(&mut filter, "hat ch:1");

        let seed = filter_input_seed(&filter);
        let mut reparsed = ListingFilter::default();
        apply_filter_text(&mut reparsed, &seed);
        assert_eq!(reparsed, filter);
    }
}
