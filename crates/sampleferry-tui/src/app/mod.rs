//! Application state and the event loop.

mod constants;
pub mod input;
mod listing;
mod render;
pub mod state;

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use indexmap::IndexMap;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use sampleferry_core::{
    ClickOutcome, FileEntry, Modifiers, PaneModel, PaneSide, SortColumn, SortDirection, click,
    move_cursor,
};
use sampleferry_fs::{
    DiskEngine, MutationError, create_directory, delete_entry, home_directory, rename_entry,
};
use sampleferry_transfer::{
    BatchRequest, ConflictDecision, ConflictPrompt, TransferCommand, TransferEvent, TransferId,
    TransferItem, batch_from_paths, encode_drag_payload, parse_drag_payload, parse_drop_text,
    start_transfer_worker,
};

use crate::RunOptions;
use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ui::{AppLayout, PaneView};

use self::constants::{LISTING_CHANNEL_SIZE, PAGE_SIZE, TICK_INTERVAL_MS};
use self::input::{InputResult, InputState};
use self::listing::{ListingUpdate, spawn_listing};
use self::render::{RenderContext, render_app};
use self::state::{AppMode, UserSettings, apply_filter_text, filter_input_seed};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    /// Current interaction mode.
    mode: AppMode,
    /// Active color theme.
    theme: Theme,
    /// Persistent user settings, saved on exit.
    user_settings: UserSettings,
    /// Left pane, absent while closed.
    source: Option<PaneModel>,
    /// Right pane, clamped to the device root.
    dest: PaneModel,
    /// Pane that receives keyboard input.
    active: PaneSide,
    /// Root the source pane reopens at.
    source_root: PathBuf,
    /// Sort order shared by both panes.
    sort_column: SortColumn,
    sort_direction: SortDirection,
    /// Show dotfiles in listings.
    show_hidden: bool,
    /// Listing results from background directory readers.
    listing_tx: mpsc::Sender<ListingUpdate>,
    listing_rx: mpsc::Receiver<ListingUpdate>,
    /// Transfer worker channels, wired up when the loop starts.
    transfer_tx: Option<mpsc::Sender<TransferCommand>>,
    transfer_rx: Option<mpsc::Receiver<TransferEvent>>,
    /// Transfer items mirrored from worker events, in submission order.
    transfers: IndexMap<TransferId, TransferItem>,
    /// Transfer side panel visibility.
    show_transfers: bool,
    /// A batch is running or suspended on a conflict.
    batch_running: bool,
    /// Conflict waiting for an answer.
    pending_conflict: Option<ConflictPrompt>,
    /// Text input for the rename, create and filter modes.
    input_state: Option<InputState>,
    /// Entry held for delete confirmation.
    confirm_entry: Option<FileEntry>,
    /// Blocking notice text.
    notice: Option<String>,
    /// Transient status line message and whether it reports success.
    status_message: Option<(bool, String)>,
    /// A mouse drag from the source pane is in progress.
    dragging: bool,
    /// Pane highlighted as the drop target.
    drop_target: Option<PaneSide>,
    /// Pane geometry from the last draw, used for mouse hit tests.
    layout: AppLayout,
    /// First visible row of each pane.
    source_offset: usize,
    dest_offset: usize,
    /// Redraw requested.
    needs_redraw: bool,
}

impl App {
    pub fn new(options: RunOptions) -> Self {
        let user_settings = UserSettings::load();

        let theme = if options.light_theme {
            Theme::light()
        } else {
            Theme::from_variant(user_settings.theme_variant())
        };
        let (sort_column, sort_direction) = user_settings.sort();

        let source_root = options.source.clone().unwrap_or_else(home_directory);
        let open_source = options.source.is_some() || user_settings.source_pane_open;
        let source = open_source.then(|| PaneModel::new(PaneSide::Source, source_root.clone()));
        let active = if source.is_some() {
            PaneSide::Source
        } else {
            PaneSide::Destination
        };

        let (listing_tx, listing_rx) = mpsc::channel(LISTING_CHANNEL_SIZE);
        let show_hidden = user_settings.show_hidden;

        Self {
            mode: AppMode::default(),
            theme,
            user_settings,
            source,
            dest: PaneModel::bounded(options.destination),
            active,
            source_root,
            sort_column,
            sort_direction,
            show_hidden,
            listing_tx,
            listing_rx,
            transfer_tx: None,
            transfer_rx: None,
            transfers: IndexMap::new(),
            show_transfers: false,
            batch_running: false,
            pending_conflict: None,
            input_state: None,
            confirm_entry: None,
            notice: None,
            status_message: None,
            dragging: false,
            drop_target: None,
            layout: AppLayout::default(),
            source_offset: 0,
            dest_offset: 0,
            needs_redraw: true,
        }
    }

    /// Run the application loop until the user quits.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        // Spawned here so the worker task lands on the running runtime.
        let (transfer_tx, transfer_rx) = start_transfer_worker();
        self.transfer_tx = Some(transfer_tx);
        self.transfer_rx = Some(transfer_rx);

        self.refresh_pane(PaneSide::Source);
        self.refresh_pane(PaneSide::Destination);

        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| App::render(&mut self, frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);

                    // Drain whatever else is already queued before redrawing.
                    while crossterm::event::poll(Duration::ZERO)? {
                        if let Ok(event) = crossterm::event::read() {
                            self.handle_terminal_event(event);
                            if self.mode == AppMode::Quit {
                                break;
                            }
                        }
                    }
                    self.needs_redraw = true;
                }

                Some(update) = self.listing_rx.recv() => {
                    self.handle_listing_update(update);
                    self.needs_redraw = true;
                }

                Some(event) = async {
                    if let Some(rx) = &mut self.transfer_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_transfer_event(event);
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {}
            }
        }

        if let Err(error) = self.user_settings.save() {
            warn!(%error, "failed to save settings");
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        if self.mode.is_text_input() {
            self.handle_input_event(key_event);
        } else if self.mode == AppMode::Conflict {
            self.handle_conflict_key(key_event);
        } else if self.mode == AppMode::ConfirmDelete {
            self.handle_confirm_delete_key(key_event);
        } else if self.mode == AppMode::Notice {
            self.handle_notice_key(key_event);
        } else {
            self.handle_action(KeyAction::from_key_event(key_event));
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        self.status_message = None;

        if self.mode == AppMode::Help {
            if matches!(
                action,
                KeyAction::ToggleHelp | KeyAction::Quit | KeyAction::Cancel
            ) {
                self.mode = AppMode::Browse;
            }
            return;
        }

        match action {
            KeyAction::MoveUp => self.move_cursor_action(-1, false),
            KeyAction::MoveDown => self.move_cursor_action(1, false),
            KeyAction::ExtendUp => self.move_cursor_action(-1, true),
            KeyAction::ExtendDown => self.move_cursor_action(1, true),
            KeyAction::PageUp => self.move_cursor_action(-(PAGE_SIZE as isize), false),
            KeyAction::PageDown => self.move_cursor_action(PAGE_SIZE as isize, false),
            KeyAction::JumpToTop => {
                let len = self.active_pane().listing.len() as isize;
                self.move_cursor_action(-len, false);
            }
            KeyAction::JumpToBottom => {
                let len = self.active_pane().listing.len() as isize;
                self.move_cursor_action(len, false);
            }
            KeyAction::FocusSource => {
                if self.source.is_some() {
                    self.active = PaneSide::Source;
                }
            }
            KeyAction::FocusDestination => self.active = PaneSide::Destination,
            KeyAction::Parent => {
                let side = self.active;
                if let Some(target) = self.active_pane().parent_target() {
                    self.navigate_to(side, target);
                }
            }
            KeyAction::Descend => {
                let side = self.active;
                let target = self
                    .active_pane()
                    .cursor_entry()
                    .filter(|entry| entry.is_directory)
                    .map(|entry| entry.path.clone());
                if let Some(path) = target {
                    self.navigate_to(side, path);
                }
            }
            KeyAction::Activate => self.activate_cursor(),
            KeyAction::SelectAll => self.active_pane_mut().select_all(),
            KeyAction::Cancel => {
                // Esc drops the filter first, the selection second.
                let pane = self.active_pane_mut();
                if pane.filter.is_active() {
                    pane.filter.clear();
                } else {
                    pane.clear_selection();
                }
            }
            KeyAction::CopySelection => self.copy_selection(),
            KeyAction::Rename => self.start_rename(),
            KeyAction::Delete => self.start_delete(),
            KeyAction::CreateDirectory => {
                self.input_state = Some(InputState::new());
                self.mode = AppMode::CreatingDirectory;
            }
            KeyAction::ToggleTransfers => self.show_transfers = !self.show_transfers,
            KeyAction::ClearFinished => {
                if !self.send_command(TransferCommand::ClearFinished) {
                    self.set_status(false, "Transfer worker is not available");
                }
            }
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.user_settings.set_theme(self.theme.variant);
            }
            KeyAction::CycleSort => {
                self.sort_column = self.sort_column.next();
                self.apply_sort();
            }
            KeyAction::ReverseSort => {
                self.sort_direction = self.sort_direction.reverse();
                self.apply_sort();
            }
            KeyAction::Filter => {
                let seed = filter_input_seed(&self.active_pane().filter);
                self.input_state = Some(InputState::with_initial(&seed));
                self.mode = AppMode::Filtering;
            }
            KeyAction::ToggleDirectoryFilter => {
                let pane = self.active_pane_mut();
                pane.filter.hide_directories = !pane.filter.hide_directories;
                snap_cursor_to_visible(pane);
            }
            KeyAction::ToggleHidden => {
                self.show_hidden = !self.show_hidden;
                self.user_settings.show_hidden = self.show_hidden;
                self.refresh_pane(PaneSide::Source);
                self.refresh_pane(PaneSide::Destination);
            }
            KeyAction::ToggleSourcePane => self.toggle_source_pane(),
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::None => {}
        }
    }

    fn handle_input_event(&mut self, key_event: KeyEvent) {
        let current_mode = self.mode;

        let Some(input) = &mut self.input_state else {
            self.mode = AppMode::Browse;
            return;
        };

        match input.handle_key(key_event) {
            InputResult::Continue => {}
            InputResult::Cancel => self.close_input(),
            InputResult::Submit(value) => match current_mode {
                AppMode::Renaming => self.execute_rename(&value),
                AppMode::CreatingDirectory => self.execute_create_directory(&value),
                AppMode::Filtering => self.apply_filter(&value),
                _ => self.close_input(),
            },
        }
    }

    fn handle_conflict_key(&mut self, key_event: KeyEvent) {
        let decision = match key_event.code {
            KeyCode::Char('o') => Some(ConflictDecision::Overwrite),
            KeyCode::Char('O') => Some(ConflictDecision::OverwriteAll),
            KeyCode::Char('s') => Some(ConflictDecision::Skip),
            KeyCode::Char('S') => Some(ConflictDecision::SkipAll),
            KeyCode::Esc => Some(ConflictDecision::CancelImport),
            _ => None,
        };

        let Some(decision) = decision else { return };

        self.pending_conflict = None;
        self.mode = AppMode::Browse;
        if !self.send_command(TransferCommand::Decide(decision)) {
            self.set_status(false, "Transfer worker is not available");
            self.batch_running = false;
        }
    }

    fn handle_confirm_delete_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('y') | KeyCode::Enter => self.execute_delete(),
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm_entry = None;
                self.mode = AppMode::Browse;
            }
            _ => {}
        }
    }

    fn handle_notice_key(&mut self, key_event: KeyEvent) {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            self.notice = None;
            self.mode = AppMode::Browse;
        }
    }

    fn activate_cursor(&mut self) {
        let side = self.active;
        let target = self
            .active_pane()
            .cursor_entry()
            .map(|entry| (entry.is_directory, entry.path.clone()));

        match target {
            Some((true, path)) => self.navigate_to(side, path),
            Some((false, _)) if side == PaneSide::Source => self.copy_selection(),
            _ => {}
        }
    }

    fn start_rename(&mut self) {
        let name = self
            .active_pane()
            .cursor_entry()
            .map(|entry| entry.name.to_string());
        if let Some(name) = name {
            self.input_state = Some(InputState::with_initial(&name));
            self.mode = AppMode::Renaming;
        }
    }

    fn start_delete(&mut self) {
        let entry = self.active_pane().cursor_entry().cloned();
        if let Some(entry) = entry {
            self.confirm_entry = Some(entry);
            self.mode = AppMode::ConfirmDelete;
        }
    }

    fn execute_rename(&mut self, new_name: &str) {
        let target = self
            .active_pane()
            .cursor_entry()
            .map(|entry| entry.path.clone());
        let Some(path) = target else {
            self.close_input();
            return;
        };

        match rename_entry(&path, new_name) {
            Ok(_) => {
                self.close_input();
                self.set_status(true, format!("Renamed to {new_name}"));
                let side = self.active;
                self.refresh_pane(side);
            }
            Err(
                error @ (MutationError::InvalidName { .. } | MutationError::AlreadyExists { .. }),
            ) => {
                // Keep the modal open so the name can be corrected.
                if let Some(input) = &mut self.input_state {
                    input.set_error(error.to_string());
                }
            }
            Err(error) => {
                self.close_input();
                self.show_notice(error.to_string());
                let side = self.active;
                self.refresh_pane(side);
            }
        }
    }

    fn execute_create_directory(&mut self, name: &str) {
        let base = self.active_pane().current_path.clone();

        match create_directory(&base, name) {
            Ok(_) => {
                self.close_input();
                self.set_status(true, format!("Created {name}"));
                let side = self.active;
                self.refresh_pane(side);
            }
            Err(
                error @ (MutationError::InvalidName { .. } | MutationError::AlreadyExists { .. }),
            ) => {
                if let Some(input) = &mut self.input_state {
                    input.set_error(error.to_string());
                }
            }
            Err(error) => {
                self.close_input();
                self.show_notice(error.to_string());
            }
        }
    }

    fn execute_delete(&mut self) {
        self.mode = AppMode::Browse;
        let Some(entry) = self.confirm_entry.take() else {
            return;
        };

        match delete_entry(&entry.path) {
            Ok(()) => self.set_status(true, format!("Deleted {}", entry.name)),
            Err(error) => self.show_notice(error.to_string()),
        }
        let side = self.active;
        self.refresh_pane(side);
    }

    fn apply_filter(&mut self, raw: &str) {
        self.close_input();

        let side = self.active;
        let pane = self.active_pane_mut();
        apply_filter_text(&mut pane.filter, raw);
        snap_cursor_to_visible(pane);

        match side {
            PaneSide::Source => self.source_offset = 0,
            PaneSide::Destination => self.dest_offset = 0,
        }
    }

    fn close_input(&mut self) {
        self.input_state = None;
        self.mode = AppMode::Browse;
    }

    fn copy_selection(&mut self) {
        let Some(source) = &self.source else {
            self.set_status(false, "Open the source pane first (b)");
            return;
        };

        let selected = source.selected_entries();
        let request = if selected.is_empty() {
            match source.cursor_entry() {
                Some(entry) => BatchRequest::from_entries([entry], self.dest.current_path.clone()),
                None => return,
            }
        } else {
            BatchRequest::from_entries(selected, self.dest.current_path.clone())
        };

        if self.submit_batch(request)
            && let Some(source) = &mut self.source
        {
            source.clear_selection();
        }
    }

    fn submit_batch(&mut self, request: BatchRequest) -> bool {
        if request.is_empty() {
            return false;
        }
        if self.batch_running || self.pending_conflict.is_some() {
            self.set_status(false, "A transfer is already running");
            return false;
        }

        if self.send_command(TransferCommand::Submit(request)) {
            self.batch_running = true;
            self.show_transfers = true;
            true
        } else {
            self.set_status(false, "Transfer worker is not available");
            false
        }
    }

    fn send_command(&self, command: TransferCommand) -> bool {
        let Some(tx) = &self.transfer_tx else {
            return false;
        };
        match tx.try_send(command) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "transfer command dropped");
                false
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if self.mode != AppMode::Browse {
            return;
        }

        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_mouse_down(mouse_event),
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.dragging {
                    let over = self.layout.pane_at(mouse_event.column, mouse_event.row);
                    self.drop_target =
                        (over == Some(PaneSide::Destination)).then_some(PaneSide::Destination);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.handle_mouse_up(mouse_event),
            MouseEventKind::ScrollUp => self.handle_mouse_scroll(mouse_event, -1),
            MouseEventKind::ScrollDown => self.handle_mouse_scroll(mouse_event, 1),
            _ => {}
        }
    }

    fn handle_mouse_down(&mut self, mouse_event: MouseEvent) {
        let Some(side) = self.layout.pane_at(mouse_event.column, mouse_event.row) else {
            return;
        };
        if self.pane(side).is_none() {
            return;
        }
        self.active = side;

        let Some(rect) = self.layout.pane_rect(side) else {
            return;
        };
        let Some(row) = PaneView::row_offset(rect, mouse_event.row) else {
            return;
        };
        let offset = match side {
            PaneSide::Source => self.source_offset,
            PaneSide::Destination => self.dest_offset,
        };
        let modifiers = Modifiers {
            ctrl: mouse_event.modifiers.contains(KeyModifiers::CONTROL),
            shift: mouse_event.modifiers.contains(KeyModifiers::SHIFT),
        };

        let Some(pane) = self.pane_mut(side) else {
            return;
        };
        let Some(&index) = pane.visible_indices().get(offset + row) else {
            return;
        };

        match click(pane, index, modifiers) {
            ClickOutcome::Navigate(path) => self.navigate_to(side, path),
            ClickOutcome::Updated => {
                if side == PaneSide::Source {
                    self.dragging = true;
                }
            }
            ClickOutcome::Ignored => {}
        }
    }

    fn handle_mouse_up(&mut self, mouse_event: MouseEvent) {
        let was_dragging = self.dragging;
        self.dragging = false;
        let hovered_target = self.drop_target.take();

        if !was_dragging {
            return;
        }

        let over = self.layout.pane_at(mouse_event.column, mouse_event.row);
        if over == Some(PaneSide::Destination) || hovered_target == Some(PaneSide::Destination) {
            self.ingest_drag();
        }
    }

    fn handle_mouse_scroll(&mut self, mouse_event: MouseEvent, delta: isize) {
        let Some(side) = self.layout.pane_at(mouse_event.column, mouse_event.row) else {
            return;
        };
        let Some(pane) = self.pane_mut(side) else {
            return;
        };
        move_cursor(pane, delta, false);
    }

    fn ingest_drag(&mut self) {
        let Some(source) = &self.source else {
            return;
        };

        let mut paths: Vec<PathBuf> = source
            .selected_entries()
            .iter()
            .map(|entry| entry.path.clone())
            .collect();
        if paths.is_empty()
            && let Some(entry) = source.cursor_entry()
        {
            paths.push(entry.path.clone());
        }
        if paths.is_empty() {
            return;
        }

        // Hand the paths through the drag payload format.
        let payload = encode_drag_payload(&paths);
        let dropped = parse_drag_payload(&payload);
        let request = batch_from_paths(&DiskEngine, dropped, self.dest.current_path.clone());
        if self.submit_batch(request)
            && let Some(source) = &mut self.source
        {
            source.clear_selection();
        }
    }

    fn handle_paste(&mut self, text: &str) {
        let paths = parse_drop_text(text);
        if paths.is_empty() {
            debug!("paste carried no absolute paths");
            return;
        }
        let request = batch_from_paths(&DiskEngine, paths, self.dest.current_path.clone());
        self.submit_batch(request);
    }

    fn navigate_to(&mut self, side: PaneSide, path: PathBuf) {
        let tx = self.listing_tx.clone();
        let Some(pane) = self.pane_mut(side) else {
            return;
        };
        if !pane.begin_navigation(path.clone()) {
            return;
        }
        pane.reset_cursor();
        spawn_listing(tx, side, path);

        match side {
            PaneSide::Source => self.source_offset = 0,
            PaneSide::Destination => self.dest_offset = 0,
        }
    }

    fn refresh_pane(&mut self, side: PaneSide) {
        let tx = self.listing_tx.clone();
        let Some(pane) = self.pane_mut(side) else {
            return;
        };
        pane.loading = true;
        spawn_listing(tx, side, pane.current_path.clone());
    }

    fn handle_listing_update(&mut self, update: ListingUpdate) {
        let show_hidden = self.show_hidden;
        let column = self.sort_column;
        let direction = self.sort_direction;

        let Some(pane) = self.pane_mut(update.side) else {
            return;
        };
        if pane.current_path != update.path {
            debug!(path = %update.path.display(), "dropping stale listing result");
            return;
        }

        let failure = match update.outcome {
            Ok(mut entries) => {
                if !show_hidden {
                    entries.retain(|entry| !entry.name.starts_with('.'));
                }
                pane.adopt_listing(entries, column, direction);
                None
            }
            Err(error) => {
                pane.fail_listing();
                Some(error)
            }
        };

        if let Some(error) = failure {
            warn!(path = %update.path.display(), %error, "listing refresh failed");
            self.set_status(false, error.to_string());
        }
    }

    fn handle_transfer_event(&mut self, event: TransferEvent) {
        match event {
            TransferEvent::ItemUpdated(item) => {
                self.transfers.insert(item.id, item);
            }
            TransferEvent::ConflictPending(prompt) => {
                self.pending_conflict = Some(prompt);
                self.mode = AppMode::Conflict;
            }
            TransferEvent::BatchFinished => {
                self.batch_running = false;
                self.pending_conflict = None;
                if self.mode == AppMode::Conflict {
                    self.mode = AppMode::Browse;
                }
                self.refresh_pane(PaneSide::Destination);
            }
            TransferEvent::ItemsSnapshot(items) => {
                self.transfers = items.into_iter().map(|item| (item.id, item)).collect();
            }
        }
    }

    fn toggle_source_pane(&mut self) {
        if self.source.is_some() {
            // Closing discards the pane's listing, selection and filter.
            self.source = None;
            self.active = PaneSide::Destination;
            self.source_offset = 0;
        } else {
            self.source = Some(PaneModel::new(PaneSide::Source, self.source_root.clone()));
            self.active = PaneSide::Source;
            self.refresh_pane(PaneSide::Source);
        }
        self.user_settings.source_pane_open = self.source.is_some();
    }

    fn apply_sort(&mut self) {
        let column = self.sort_column;
        let direction = self.sort_direction;
        if let Some(source) = &mut self.source {
            source.resort(column, direction);
        }
        self.dest.resort(column, direction);
        self.user_settings.set_sort(column, direction);
    }

    fn move_cursor_action(&mut self, delta: isize, extend: bool) {
        move_cursor(self.active_pane_mut(), delta, extend);
    }

    fn pane(&self, side: PaneSide) -> Option<&PaneModel> {
        match side {
            PaneSide::Source => self.source.as_ref(),
            PaneSide::Destination => Some(&self.dest),
        }
    }

    fn pane_mut(&mut self, side: PaneSide) -> Option<&mut PaneModel> {
        match side {
            PaneSide::Source => self.source.as_mut(),
            PaneSide::Destination => Some(&mut self.dest),
        }
    }

    fn active_pane(&self) -> &PaneModel {
        match self.active {
            PaneSide::Source => self.source.as_ref().unwrap_or(&self.dest),
            PaneSide::Destination => &self.dest,
        }
    }

    fn active_pane_mut(&mut self) -> &mut PaneModel {
        match self.active {
            PaneSide::Source => self.source.as_mut().unwrap_or(&mut self.dest),
            PaneSide::Destination => &mut self.dest,
        }
    }

    fn set_status(&mut self, success: bool, message: impl Into<String>) {
        self.status_message = Some((success, message.into()));
    }

    fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
        self.mode = AppMode::Notice;
    }

    fn render(&mut self, frame: &mut Frame) {
        self.layout = AppLayout::new(frame.area(), self.source.is_some(), self.show_transfers);

        if let (Some(pane), Some(rect)) = (&self.source, self.layout.source) {
            self.source_offset = scroll_to_cursor(pane, rect, self.source_offset);
        }
        self.dest_offset = scroll_to_cursor(&self.dest, self.layout.dest, self.dest_offset);

        frame.render_widget(&*self, frame.area());
    }
}

/// Clamp a scroll offset so the cursor row stays on screen.
fn scroll_to_cursor(pane: &PaneModel, area: Rect, offset: usize) -> usize {
    let height = PaneView::list_height(area);
    if height == 0 {
        return 0;
    }
    let visible = pane.visible_indices();
    let position = visible
        .iter()
        .position(|&index| index == pane.cursor_index)
        .unwrap_or(0);

    let mut offset = offset.min(visible.len().saturating_sub(1));
    if position < offset {
        offset = position;
    } else if position >= offset + height {
        offset = position - height + 1;
    }
    offset
}

/// Move the cursor onto the first visible row when the filter hides it.
fn snap_cursor_to_visible(pane: &mut PaneModel) {
    let visible = pane.visible_indices();
    if !visible.is_empty() && !visible.contains(&pane.cursor_index) {
        pane.cursor_index = visible[0];
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            mode: self.mode,
            theme: &self.theme,
            layout: self.layout,
            source: self.source.as_ref(),
            dest: &self.dest,
            active: self.active,
            source_offset: self.source_offset,
            dest_offset: self.dest_offset,
            sort_column: self.sort_column,
            sort_direction: self.sort_direction,
            show_hidden: self.show_hidden,
            transfers: self.transfers.values().collect(),
            pending_conflict: self.pending_conflict.as_ref(),
            input_state: self.input_state.as_ref(),
            confirm_entry: self.confirm_entry.as_ref(),
            notice: self.notice.as_deref(),
            status_message: self.status_message.as_ref(),
            drop_target: self.drop_target,
        };

        render_app(&ctx, area, buf);
    }
}
