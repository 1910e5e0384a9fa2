//! Color theme for the TUI.
//!
//! Dark and light themes over a slate-based palette (Tailwind CSS
//! colors). The variant is persisted in user settings by name.

use ratatui::style::{Color, Modifier, Style};

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Settings-file name for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parse a settings-file name, defaulting to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Interactive elements
    pub cursor: Style,
    pub hover: Style,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Listing entries
    pub directory: Style,
    pub file: Style,
    pub wave: Style,

    // Selected paths
    pub selected: Style,

    // Header/Status bar
    pub header: Style,
    pub status: Style,

    // Drop-target highlight while dragging
    pub drop_target: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS)
        let blue_400 = Color::Rgb(96, 165, 250);
        let blue_500 = Color::Rgb(59, 130, 246);
        let green_500 = Color::Rgb(34, 197, 94);
        let yellow_500 = Color::Rgb(234, 179, 8);
        let red_500 = Color::Rgb(239, 68, 68);
        let cyan_400 = Color::Rgb(34, 211, 238);
        let amber_500 = Color::Rgb(245, 158, 11);

        Self {
            variant: ThemeVariant::Dark,
            background: slate_900,
            foreground: slate_100,
            muted: slate_500,

            cursor: Style::new().bg(slate_700).fg(slate_50).add_modifier(Modifier::BOLD),
            hover: Style::new().bg(slate_800),

            success: green_500,
            warning: yellow_500,
            error: red_500,
            info: blue_400,

            border: Style::new().fg(slate_600),
            border_focused: Style::new().fg(blue_400),
            title: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_400),

            directory: Style::new().fg(blue_500).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_300),
            wave: Style::new().fg(cyan_400),

            selected: Style::new().fg(amber_500).add_modifier(Modifier::BOLD),

            header: Style::new().bg(slate_800).fg(slate_100),
            status: Style::new().bg(slate_800).fg(slate_400),

            drop_target: Style::new().fg(green_500).add_modifier(Modifier::BOLD),
        }
    }

    /// Light theme using a slate-based palette.
    pub fn light() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_200 = Color::Rgb(226, 232, 240);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS - darker variants for light theme)
        let blue_600 = Color::Rgb(37, 99, 235);
        let blue_700 = Color::Rgb(29, 78, 216);
        let green_600 = Color::Rgb(22, 163, 74);
        let yellow_600 = Color::Rgb(202, 138, 4);
        let red_600 = Color::Rgb(220, 38, 38);
        let cyan_600 = Color::Rgb(8, 145, 178);
        let amber_600 = Color::Rgb(217, 119, 6);

        Self {
            variant: ThemeVariant::Light,
            background: slate_50,
            foreground: slate_900,
            muted: slate_500,

            cursor: Style::new().bg(slate_200).fg(slate_900).add_modifier(Modifier::BOLD),
            hover: Style::new().bg(slate_100),

            success: green_600,
            warning: yellow_600,
            error: red_600,
            info: blue_600,

            border: Style::new().fg(slate_400),
            border_focused: Style::new().fg(blue_700),
            title: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_600),

            directory: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_700),
            wave: Style::new().fg(cyan_600),

            selected: Style::new().fg(amber_600).add_modifier(Modifier::BOLD),

            header: Style::new().bg(slate_100).fg(slate_800),
            status: Style::new().bg(slate_100).fg(slate_600),

            drop_target: Style::new().fg(green_600).add_modifier(Modifier::BOLD),
        }
    }

    /// Create theme from variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Toggle between dark and light themes.
    pub fn toggle(&self) -> Self {
        match self.variant {
            ThemeVariant::Dark => Self::light(),
            ThemeVariant::Light => Self::dark(),
        }
    }

    /// Color for a transfer status badge.
    pub fn status_color(&self, status: sampleferry_transfer::TransferStatus) -> Color {
        use sampleferry_transfer::TransferStatus;
        match status {
            TransferStatus::Pending => self.muted,
            TransferStatus::Copying => self.info,
            TransferStatus::Completed => self.success,
            TransferStatus::Failed => self.error,
            TransferStatus::Cancelled => self.warning,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_round_trip() {
        assert_eq!(ThemeVariant::from_name("light"), ThemeVariant::Light);
        assert_eq!(ThemeVariant::from_name("dark"), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::from_name("unknown"), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::Light.as_str(), "light");
    }

    #[test]
    fn test_toggle_flips_variant() {
        let theme = Theme::dark();
        assert_eq!(theme.toggle().variant, ThemeVariant::Light);
        assert_eq!(theme.toggle().toggle().variant, ThemeVariant::Dark);
    }
}
