//! UI components and widgets.

mod help;
pub mod modals;
mod panes;
mod transfers;

pub use help::HelpOverlay;
pub use panes::PaneView;
pub use transfers::TransferPanel;

use ratatui::layout::{Constraint, Layout, Position, Rect};

use sampleferry_core::PaneSide;

/// Layout areas for the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppLayout {
    pub header: Rect,
    pub source: Option<Rect>,
    pub dest: Rect,
    pub transfers: Option<Rect>,
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect, show_source: bool, show_transfers: bool) -> Self {
        let min_panes_width = 50;
        let transfers_width = 34;

        // Vertical split: header, browser panes, status bar
        let [header, content, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .areas(area);

        // Horizontal split for the transfer panel (if open and space available)
        let (panes_area, transfers) =
            if show_transfers && area.width >= min_panes_width + transfers_width {
                let [panes_area, transfers] = Layout::horizontal([
                    Constraint::Min(min_panes_width),
                    Constraint::Length(transfers_width),
                ])
                .areas(content);
                (panes_area, Some(transfers))
            } else {
                (content, None)
            };

        // Equal split between panes while the source pane is open
        let (source, dest) = if show_source {
            let [source, dest] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(panes_area);
            (Some(source), dest)
        } else {
            (None, panes_area)
        };

        Self {
            header,
            source,
            dest,
            transfers,
            status,
        }
    }

    /// Pane whose area contains the given screen position, if any.
    pub fn pane_at(&self, column: u16, row: u16) -> Option<PaneSide> {
        let position = Position::new(column, row);
        if let Some(source) = self.source
            && source.contains(position)
        {
            return Some(PaneSide::Source);
        }
        if self.dest.contains(position) {
            return Some(PaneSide::Destination);
        }
        None
    }

    /// Pane rect for a side, if that pane is shown.
    pub fn pane_rect(&self, side: PaneSide) -> Option<Rect> {
        match side {
            PaneSide::Source => self.source,
            PaneSide::Destination => Some(self.dest),
        }
    }
}

/// Format a byte size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Pad or truncate `text` to exactly `width` display columns, ending a
/// truncation with `…`.
pub(crate) fn fit_width(text: &str, width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if width == 0 {
        return String::new();
    }

    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        let mut out = String::with_capacity(text.len() + width - text_width);
        out.push_str(text);
        out.push_str(&" ".repeat(width - text_width));
        return out;
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width - 1 {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_layout_with_both_panes_and_transfers() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30), true, true);
        let source = layout.source.unwrap();
        let transfers = layout.transfers.unwrap();

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(transfers.width, 34);
        assert_eq!(source.width, layout.dest.width);
        assert!(source.x < layout.dest.x);
        assert!(layout.dest.x < transfers.x);
    }

    #[test]
    fn test_layout_single_pane() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30), false, false);
        assert!(layout.source.is_none());
        assert!(layout.transfers.is_none());
        assert_eq!(layout.dest.width, 100);
    }

    #[test]
    fn test_transfer_panel_dropped_when_narrow() {
        let layout = AppLayout::new(Rect::new(0, 0, 60, 30), true, true);
        assert!(layout.transfers.is_none());
    }

    #[test]
    fn test_pane_at_maps_positions() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30), true, false);
        assert_eq!(layout.pane_at(2, 5), Some(PaneSide::Source));
        assert_eq!(layout.pane_at(70, 5), Some(PaneSide::Destination));
        assert_eq!(layout.pane_at(2, 0), None);
    }

    #[test]
    fn test_fit_width_pads_short_names() {
        assert_eq!(fit_width("kick.wav", 10), "kick.wav  ");
    }

    #[test]
    fn test_fit_width_truncates_with_ellipsis() {
        let fitted = fit_width("a_very_long_sample_name.wav", 10);
        assert_eq!(fitted, "a_very_lo…");
        assert_eq!(UnicodeWidthStr::width(fitted.as_str()), 10);
    }

    #[test]
    fn test_fit_width_counts_display_columns() {
        // Wide characters take two columns each.
        let fitted = fit_width("ドラムループ.wav", 7);
        assert_eq!(UnicodeWidthStr::width(fitted.as_str()), 7);
        assert!(fitted.ends_with('…'));
    }
}
