//! Browser pane widget.

use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use sampleferry_core::{PaneModel, PaneSide, SortColumn, SortDirection};

use crate::theme::Theme;
use crate::ui::{fit_width, format_size};

const MARKER_WIDTH: usize = 2;
const SIZE_WIDTH: usize = 9;
const CHANNELS_WIDTH: usize = 4;
const RATE_WIDTH: usize = 6;
const BITRATE_WIDTH: usize = 5;

/// One browser pane: bordered listing with a column header row.
pub struct PaneView<'a> {
    pane: &'a PaneModel,
    theme: &'a Theme,
    focused: bool,
    offset: usize,
    drop_highlight: bool,
    sort_column: SortColumn,
    sort_direction: SortDirection,
}

impl<'a> PaneView<'a> {
    pub fn new(pane: &'a PaneModel, theme: &'a Theme) -> Self {
        Self {
            pane,
            theme,
            focused: false,
            offset: 0,
            drop_highlight: false,
            sort_column: SortColumn::Name,
            sort_direction: SortDirection::Ascending,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Scroll offset into the visible rows.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Highlight the pane as a drag drop target.
    pub fn drop_highlight(mut self, highlight: bool) -> Self {
        self.drop_highlight = highlight;
        self
    }

    pub fn sort(mut self, column: SortColumn, direction: SortDirection) -> Self {
        self.sort_column = column;
        self.sort_direction = direction;
        self
    }

    /// Number of listing rows that fit in a pane of this size.
    pub fn list_height(area: Rect) -> usize {
        // Borders take two rows, the column header one more.
        area.height.saturating_sub(3) as usize
    }

    /// Map a screen row inside `area` to an offset into the shown rows.
    /// The first row inside the border is the column header.
    pub fn row_offset(area: Rect, row: u16) -> Option<usize> {
        if area.height < 4 {
            return None;
        }
        let first = area.y + 2;
        let bottom = area.y + area.height - 1;
        if row < first || row >= bottom {
            return None;
        }
        Some((row - first) as usize)
    }

    fn title(&self) -> String {
        let label = match self.pane.side {
            PaneSide::Source => "Source",
            PaneSide::Destination => "Destination",
        };
        let suffix = if self.pane.loading { " (loading…)" } else { "" };
        format!(
            " {label}: {}{suffix} ",
            condense_path(&self.pane.current_path, 40)
        )
    }

    fn column_label(&self, label: &str, column: SortColumn) -> String {
        if column == self.sort_column {
            format!("{label} {}", self.sort_direction)
        } else {
            label.to_string()
        }
    }
}

impl Widget for PaneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.drop_highlight {
            self.theme.drop_target
        } else if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let title_style = if self.focused {
            self.theme.title
        } else {
            self.theme.border
        };

        let block = Block::default()
            .title(self.title())
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width == 0 {
            return;
        }

        // Wave columns are dropped first on narrow panes, then size.
        let width = inner.width as usize;
        let mut show_wave = true;
        let mut show_size = true;
        let mut name_width = width.saturating_sub(
            MARKER_WIDTH + 1 + SIZE_WIDTH + 1 + CHANNELS_WIDTH + 1 + RATE_WIDTH + 1 + BITRATE_WIDTH,
        );
        if name_width < 10 {
            show_wave = false;
            name_width = width.saturating_sub(MARKER_WIDTH + 1 + SIZE_WIDTH);
        }
        if name_width < 10 {
            show_size = false;
            name_width = width.saturating_sub(MARKER_WIDTH);
        }

        // Column header row
        let mut header = String::new();
        header.push_str(&" ".repeat(MARKER_WIDTH));
        header.push_str(&fit_width(
            &self.column_label("Name", SortColumn::Name),
            name_width,
        ));
        if show_size {
            header.push(' ');
            header.push_str(&format!(
                "{:>SIZE_WIDTH$}",
                self.column_label("Size", SortColumn::Size)
            ));
        }
        if show_wave {
            header.push(' ');
            header.push_str(&format!(
                "{:>CHANNELS_WIDTH$}",
                self.column_label("Ch", SortColumn::Channels)
            ));
            header.push(' ');
            header.push_str(&format!(
                "{:>RATE_WIDTH$}",
                self.column_label("Rate", SortColumn::SampleRate)
            ));
            header.push(' ');
            header.push_str(&format!("{:>BITRATE_WIDTH$}", "Kbps"));
        }
        let header_line = Line::styled(header, self.theme.header);
        Widget::render(
            header_line,
            Rect::new(inner.x, inner.y, inner.width, 1),
            buf,
        );

        let visible = self.pane.visible_indices();
        let list_area = Rect::new(
            inner.x,
            inner.y + 1,
            inner.width,
            inner.height - 1,
        );

        if visible.is_empty() {
            let text = if self.pane.loading {
                "loading…"
            } else if self.pane.filter.is_active() {
                "no entries match the filter"
            } else {
                "empty directory"
            };
            let line = Line::styled(
                format!("  {text}"),
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            );
            Widget::render(line, Rect::new(list_area.x, list_area.y, list_area.width, 1), buf);
            return;
        }

        let start = self.offset.min(visible.len().saturating_sub(1));
        let end = (start + list_area.height as usize).min(visible.len());

        for (row, &entry_index) in visible[start..end].iter().enumerate() {
            let Some(entry) = self.pane.entry_at(entry_index) else {
                continue;
            };
            let y = list_area.y + row as u16;
            let is_cursor = entry_index == self.pane.cursor_index;
            let is_selected = self.pane.is_selected(&entry.path);

            let marker = if is_selected { "\u{25cf} " } else { "  " };
            let name_style = if is_selected {
                self.theme.selected
            } else if entry.is_directory {
                self.theme.directory
            } else if entry.wave.is_some() {
                self.theme.wave
            } else {
                self.theme.file
            };

            let mut spans = vec![
                Span::styled(marker, self.theme.selected),
                Span::styled(fit_width(&entry.name, name_width), name_style),
            ];
            if show_size {
                let size_text = if entry.is_directory {
                    String::new()
                } else {
                    format_size(entry.size)
                };
                spans.push(Span::styled(
                    format!(" {size_text:>SIZE_WIDTH$}"),
                    Style::default().fg(self.theme.muted),
                ));
            }
            if show_wave {
                let channels = entry
                    .channels()
                    .map(|c| c.to_string())
                    .unwrap_or_default();
                let rate = entry
                    .sample_rate()
                    .map(|r| r.to_string())
                    .unwrap_or_default();
                let kbps = entry
                    .bit_rate()
                    .map(|b| (b / 1000).to_string())
                    .unwrap_or_default();
                spans.push(Span::styled(
                    format!(" {channels:>CHANNELS_WIDTH$} {rate:>RATE_WIDTH$} {kbps:>BITRATE_WIDTH$}"),
                    Style::default().fg(self.theme.muted),
                ));
            }

            let mut line = Line::from(spans);
            if is_cursor && self.focused {
                line = line.style(self.theme.cursor);
            } else if is_cursor {
                line = line.style(self.theme.hover);
            }

            Widget::render(line, Rect::new(list_area.x, y, list_area.width, 1), buf);
        }
    }
}

/// Shorten a path for display, replacing the home prefix with `~` and
/// trimming long paths from the left.
fn condense_path(path: &Path, max_width: usize) -> String {
    let mut text = path.display().to_string();
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        text = if rest.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", rest.display())
        };
    }

    if UnicodeWidthStr::width(text.as_str()) <= max_width {
        return text;
    }

    let mut tail = String::new();
    let mut used = 1;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        tail.push(ch);
        used += ch_width;
    }
    format!("…{}", tail.chars().rev().collect::<String>())
}
