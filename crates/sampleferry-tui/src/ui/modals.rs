//! Modal dialog widgets.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use sampleferry_core::FileEntry;
use sampleferry_transfer::ConflictPrompt;

use crate::app::input::InputState;
use crate::theme::Theme;
use crate::ui::format_size;

/// Centered popup rect clamped to the terminal area.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(width)) / 2 + area.x;
    let y = (area.height.saturating_sub(height)) / 2 + area.y;
    Rect::new(x, y, width, height)
}

/// Truncate a display string from the left so the tail stays visible.
fn tail_text(text: &str, max_len: usize) -> String {
    let count = text.chars().count();
    if count <= max_len {
        return text.to_string();
    }
    let skip = count.saturating_sub(max_len.saturating_sub(1));
    format!("…{}", text.chars().skip(skip).collect::<String>())
}

/// Text input modal for rename, create and filter prompts.
pub struct InputModal<'a> {
    theme: &'a Theme,
    input: &'a InputState,
    title: &'a str,
    prompt: &'a str,
}

impl<'a> InputModal<'a> {
    pub fn new(theme: &'a Theme, input: &'a InputState, title: &'a str, prompt: &'a str) -> Self {
        Self {
            theme,
            input,
            title,
            prompt,
        }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.input.error().is_some() { 8 } else { 7 };
        let popup = popup_area(area, 50, height);

        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::styled(self.prompt, self.theme.help_desc), Line::raw("")];

        // Input field, scrolled so the cursor stays in view
        let buffer = self.input.buffer();
        let cursor = self.input.cursor();
        let max_visible = (inner.width as usize).saturating_sub(4).max(1);

        let (visible_start, cursor_in_view) = if cursor >= max_visible {
            (cursor - (max_visible - 1), max_visible - 1)
        } else {
            (0, cursor)
        };
        let visible_text: String = buffer.chars().skip(visible_start).take(max_visible).collect();

        let mut input_spans = vec![Span::raw("  ")];
        let before: String = visible_text.chars().take(cursor_in_view).collect();
        if !before.is_empty() {
            input_spans.push(Span::raw(before));
        }
        let cursor_char: String = visible_text.chars().skip(cursor_in_view).take(1).collect();
        input_spans.push(Span::styled(
            if cursor_char.is_empty() {
                " ".to_string()
            } else {
                cursor_char
            },
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        let after: String = visible_text.chars().skip(cursor_in_view + 1).collect();
        if !after.is_empty() {
            input_spans.push(Span::raw(after));
        }
        lines.push(Line::from(input_spans));

        if let Some(error) = self.input.error() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(self.theme.error),
            ));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.help_key),
            Span::raw("Confirm  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Cancel"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Confirmation dialog for deleting the entry under the cursor.
pub struct ConfirmDeleteModal<'a> {
    theme: &'a Theme,
    entry: &'a FileEntry,
}

impl<'a> ConfirmDeleteModal<'a> {
    pub fn new(theme: &'a Theme, entry: &'a FileEntry) -> Self {
        Self { theme, entry }
    }
}

impl Widget for ConfirmDeleteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 56, 9);

        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Confirm Deletion ")
            .title_style(
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let question = if self.entry.is_directory {
            "Delete this directory and everything in it?"
        } else {
            "Delete this file?"
        };
        let detail = if self.entry.is_directory {
            String::new()
        } else {
            format!(" ({})", format_size(self.entry.size))
        };
        let max_len = (inner.width as usize).saturating_sub(4 + detail.chars().count());

        let lines = vec![
            Line::styled(
                question,
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    tail_text(&self.entry.name, max_len),
                    if self.entry.is_directory {
                        self.theme.directory
                    } else {
                        self.theme.file
                    },
                ),
                Span::styled(detail, Style::default().fg(self.theme.muted)),
            ]),
            Line::raw(""),
            Line::styled(
                "This cannot be undone.",
                Style::default().fg(self.theme.muted),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" y/Enter ", self.theme.help_key),
                Span::raw("Delete  "),
                Span::styled(" n/Esc ", self.theme.help_key),
                Span::raw("Cancel"),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Name conflict prompt for a suspended transfer batch.
pub struct ConflictModal<'a> {
    theme: &'a Theme,
    prompt: &'a ConflictPrompt,
}

impl<'a> ConflictModal<'a> {
    pub fn new(theme: &'a Theme, prompt: &'a ConflictPrompt) -> Self {
        Self { theme, prompt }
    }
}

impl Widget for ConflictModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 60, 11);

        Clear.render(popup, buf);

        let block = Block::default()
            .title(" File Exists ")
            .title_style(
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.warning));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let max_len = (inner.width as usize).saturating_sub(6);

        let mut lines = vec![
            Line::styled(
                "The destination already has an entry with this name:",
                self.theme.help_desc,
            ),
            Line::raw(""),
            Line::styled(
                format!("  {}", tail_text(&self.prompt.file_name, max_len)),
                Style::default().fg(self.theme.info),
            ),
            Line::styled(
                format!(
                    "  \u{2192} {}",
                    tail_text(&self.prompt.dest_path.display().to_string(), max_len)
                ),
                Style::default().fg(self.theme.muted),
            ),
            Line::raw(""),
        ];

        lines.push(Line::styled(
            "O and S answer every later conflict in this batch.",
            Style::default().fg(self.theme.muted),
        ));
        lines.push(Line::raw(""));

        lines.push(Line::from(vec![
            Span::styled(" o ", self.theme.help_key),
            Span::raw("Overwrite  "),
            Span::styled(" O ", self.theme.help_key),
            Span::raw("Overwrite All  "),
            Span::styled(" s ", self.theme.help_key),
            Span::raw("Skip  "),
            Span::styled(" S ", self.theme.help_key),
            Span::raw("Skip All"),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Cancel Import"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Blocking notice dialog, dismissed with Enter or Esc.
pub struct NoticeModal<'a> {
    theme: &'a Theme,
    message: &'a str,
}

impl<'a> NoticeModal<'a> {
    pub fn new(theme: &'a Theme, message: &'a str) -> Self {
        Self { theme, message }
    }
}

impl Widget for NoticeModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 56, 8);

        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Notice ")
            .title_style(
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        // Wrap the message by words onto the popup width.
        let width = (inner.width as usize).saturating_sub(4).max(8);
        let mut current = String::new();
        for word in self.message.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
                lines.push(Line::raw(format!("  {current}")));
                current = String::new();
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(Line::raw(format!("  {current}")));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter/Esc ", self.theme.help_key),
            Span::raw("Dismiss"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_area_is_centered_and_clamped() {
        let popup = popup_area(Rect::new(0, 0, 100, 40), 60, 10);
        assert_eq!(popup, Rect::new(20, 15, 60, 10));

        let clamped = popup_area(Rect::new(0, 0, 30, 8), 60, 10);
        assert!(clamped.width <= 26);
        assert!(clamped.height <= 4);
    }

    #[test]
    fn test_tail_text_keeps_the_tail() {
        assert_eq!(tail_text("kick.wav", 10), "kick.wav");
        assert_eq!(tail_text("very_long_sample.wav", 8), "…ple.wav");
    }
}
