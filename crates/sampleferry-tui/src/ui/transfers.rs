//! Transfer panel widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use sampleferry_transfer::{TransferItem, TransferStatus};

use crate::theme::Theme;
use crate::ui::{fit_width, format_size};

/// Side panel listing transfer items, oldest first.
pub struct TransferPanel<'a> {
    items: &'a [&'a TransferItem],
    theme: &'a Theme,
}

impl<'a> TransferPanel<'a> {
    pub fn new(items: &'a [&'a TransferItem], theme: &'a Theme) -> Self {
        Self { items, theme }
    }

    fn title(&self) -> String {
        if self.items.is_empty() {
            " Transfers ".to_string()
        } else {
            let done = self
                .items
                .iter()
                .filter(|item| item.status.is_terminal())
                .count();
            format!(" Transfers {done}/{} ", self.items.len())
        }
    }
}

/// Secondary line under an item: progress, outcome, or error.
fn status_note(item: &TransferItem) -> String {
    match item.status {
        TransferStatus::Pending => "queued".to_string(),
        TransferStatus::Copying => "copying…".to_string(),
        TransferStatus::Completed => item
            .file_size
            .map(format_size)
            .unwrap_or_else(|| "done".to_string()),
        TransferStatus::Failed | TransferStatus::Cancelled => item
            .error
            .clone()
            .unwrap_or_else(|| item.status.to_string()),
    }
}

impl Widget for TransferPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title())
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.items.is_empty() {
            let line = Line::styled(
                " no transfers yet",
                Style::default()
                    .fg(self.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            );
            Widget::render(line, Rect::new(inner.x, inner.y, inner.width, 1), buf);
            return;
        }

        let name_width = (inner.width as usize).saturating_sub(2);
        let note_width = (inner.width as usize).saturating_sub(4);

        let mut lines: Vec<Line> = Vec::with_capacity(self.items.len() * 2 + 2);
        for item in self.items {
            let badge_color = self.theme.status_color(item.status);
            lines.push(Line::from(vec![
                Span::styled("\u{25cf} ", Style::default().fg(badge_color)),
                Span::styled(
                    fit_width(&item.file_name, name_width),
                    Style::default().fg(self.theme.foreground),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    fit_width(&status_note(item), note_width),
                    Style::default().fg(self.theme.muted),
                ),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            " C clears finished",
            self.theme.help_desc,
        ));

        // Keep the newest items in view when the list overflows.
        let height = inner.height as usize;
        let start = lines.len().saturating_sub(height);
        for (row, line) in lines.into_iter().skip(start).take(height).enumerate() {
            Widget::render(
                line,
                Rect::new(inner.x, inner.y + row as u16, inner.width, 1),
                buf,
            );
        }
    }
}
