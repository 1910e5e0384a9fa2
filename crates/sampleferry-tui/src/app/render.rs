//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use sampleferry_core::{FileEntry, PaneModel, PaneSide, SortColumn, SortDirection};
use sampleferry_transfer::{ConflictPrompt, TransferItem};

use crate::theme::Theme;
use crate::ui::modals::{ConfirmDeleteModal, ConflictModal, InputModal, NoticeModal};
use crate::ui::{AppLayout, HelpOverlay, PaneView, TransferPanel};

use super::input::InputState;
use super::state::AppMode;

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub theme: &'a Theme,
    pub layout: AppLayout,
    pub source: Option<&'a PaneModel>,
    pub dest: &'a PaneModel,
    pub active: PaneSide,
    pub source_offset: usize,
    pub dest_offset: usize,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub show_hidden: bool,
    pub transfers: Vec<&'a TransferItem>,
    pub pending_conflict: Option<&'a ConflictPrompt>,
    pub input_state: Option<&'a InputState>,
    pub confirm_entry: Option<&'a FileEntry>,
    pub notice: Option<&'a str>,
    pub status_message: Option<&'a (bool, String)>,
    pub drop_target: Option<PaneSide>,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    // Fill entire area with theme background color
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    render_header(ctx, ctx.layout.header, buf);

    if let (Some(pane), Some(pane_area)) = (ctx.source, ctx.layout.source) {
        PaneView::new(pane, ctx.theme)
            .focused(ctx.active == PaneSide::Source && ctx.mode == AppMode::Browse)
            .offset(ctx.source_offset)
            .sort(ctx.sort_column, ctx.sort_direction)
            .drop_highlight(ctx.drop_target == Some(PaneSide::Source))
            .render(pane_area, buf);
    }

    PaneView::new(ctx.dest, ctx.theme)
        .focused(ctx.active == PaneSide::Destination && ctx.mode == AppMode::Browse)
        .offset(ctx.dest_offset)
        .sort(ctx.sort_column, ctx.sort_direction)
        .drop_highlight(ctx.drop_target == Some(PaneSide::Destination))
        .render(ctx.layout.dest, buf);

    if let Some(panel_area) = ctx.layout.transfers {
        TransferPanel::new(&ctx.transfers, ctx.theme).render(panel_area, buf);
    }

    render_status_bar(ctx, ctx.layout.status, buf);

    // Overlays
    match ctx.mode {
        AppMode::Help => {
            HelpOverlay::new(ctx.theme).render(area, buf);
        }
        AppMode::Renaming => {
            if let Some(input) = ctx.input_state {
                InputModal::new(ctx.theme, input, "Rename", "Enter new name:").render(area, buf);
            }
        }
        AppMode::CreatingDirectory => {
            if let Some(input) = ctx.input_state {
                InputModal::new(ctx.theme, input, "Create Directory", "Enter directory name:")
                    .render(area, buf);
            }
        }
        AppMode::Filtering => {
            if let Some(input) = ctx.input_state {
                InputModal::new(
                    ctx.theme,
                    input,
                    "Filter",
                    "Words match names; ch:N and rate:N match wave info:",
                )
                .render(area, buf);
            }
        }
        AppMode::ConfirmDelete => {
            if let Some(entry) = ctx.confirm_entry {
                ConfirmDeleteModal::new(ctx.theme, entry).render(area, buf);
            }
        }
        AppMode::Conflict => {
            if let Some(prompt) = ctx.pending_conflict {
                ConflictModal::new(ctx.theme, prompt).render(area, buf);
            }
        }
        AppMode::Notice => {
            if let Some(message) = ctx.notice {
                NoticeModal::new(ctx.theme, message).render(area, buf);
            }
        }
        _ => {}
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" sampleferry ", ctx.theme.title.add_modifier(Modifier::BOLD));

    let device = Span::styled(
        format!(" device: {} ", ctx.dest.root_bound.as_deref().unwrap_or(&ctx.dest.current_path).display()),
        ctx.theme.header,
    );

    let hidden = if ctx.show_hidden {
        Span::styled(" hidden shown ", Style::default().fg(ctx.theme.warning))
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![title, Span::raw(" "), device, hidden]);

    Paragraph::new(line).style(ctx.theme.header).render(area, buf);
}

fn render_status_bar(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let pane = match ctx.active {
        PaneSide::Source => ctx.source.unwrap_or(ctx.dest),
        PaneSide::Destination => ctx.dest,
    };

    let mut spans: Vec<Span> = Vec::new();

    if let Some((success, message)) = ctx.status_message {
        let color = if *success {
            ctx.theme.success
        } else {
            ctx.theme.warning
        };
        spans.push(Span::styled(
            format!(" {message} "),
            Style::default().fg(color),
        ));
    }

    let shown = pane.visible_indices().len();
    let total = pane.listing.len();
    let counts = if shown == total {
        format!(" {total} entries ")
    } else {
        format!(" {shown}/{total} entries ")
    };
    spans.push(Span::styled(counts, ctx.theme.status));

    if !pane.selection.is_empty() {
        spans.push(Span::styled(
            format!(" {} selected ", pane.selection.len()),
            Style::default()
                .fg(ctx.theme.background)
                .bg(ctx.theme.info),
        ));
    }

    if let Some(summary) = pane.filter.summary() {
        spans.push(Span::styled(
            format!(" {summary} "),
            Style::default().fg(ctx.theme.warning),
        ));
    }

    for (key, desc) in [("?", "Help"), ("q", "Quit")] {
        spans.push(Span::styled(format!(" {key} "), ctx.theme.help_key));
        spans.push(Span::styled(format!("{desc} "), ctx.theme.help_desc));
    }

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.status)
        .render(area, buf);
}
