//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Cursor movement
    MoveUp,
    MoveDown,
    /// Move up, adding the new cursor entry to the selection.
    ExtendUp,
    /// Move down, adding the new cursor entry to the selection.
    ExtendDown,
    PageUp,
    PageDown,
    JumpToTop,
    JumpToBottom,

    // Pane focus and navigation
    FocusSource,
    FocusDestination,
    /// Navigate the active pane to its parent directory.
    Parent,
    /// Enter the directory under the cursor.
    Descend,
    /// Enter a directory, or copy the source selection onto the device.
    Activate,

    // Selection
    SelectAll,
    Cancel,

    // Copying
    CopySelection,

    // File operations
    Rename,
    Delete,
    CreateDirectory,

    // Transfers
    ToggleTransfers,
    ClearFinished,

    // View toggles
    ToggleHelp,
    ToggleTheme,
    CycleSort,
    ReverseSort,
    Filter,
    ToggleDirectoryFilter,
    ToggleHidden,
    ToggleSourcePane,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            // Quit - only 'q' quits, Esc clears selection
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Cursor movement, Shift extends the selection
            (KeyCode::Up, KeyModifiers::SHIFT) => KeyAction::ExtendUp,
            (KeyCode::Down, KeyModifiers::SHIFT) => KeyAction::ExtendDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('K'), KeyModifiers::SHIFT) => KeyAction::ExtendUp,
            (KeyCode::Char('J'), KeyModifiers::SHIFT) => KeyAction::ExtendDown,

            // Jump and page
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,

            // Pane focus and navigation
            (KeyCode::Left, KeyModifiers::CONTROL) => KeyAction::Parent,
            (KeyCode::Right, KeyModifiers::CONTROL) => KeyAction::Descend,
            (KeyCode::Left, _) => KeyAction::FocusSource,
            (KeyCode::Right, _) => KeyAction::FocusDestination,
            (KeyCode::Backspace, _) => KeyAction::Parent,
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Descend,
            (KeyCode::Enter, _) => KeyAction::Activate,

            // Selection
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => KeyAction::SelectAll,

            // Copying
            (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::CopySelection,

            // File operations
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Rename,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,
            (KeyCode::Delete, _) => KeyAction::Delete,
            (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::CreateDirectory,

            // Transfers
            (KeyCode::Char('T'), KeyModifiers::SHIFT) => KeyAction::ToggleTransfers,
            (KeyCode::Char('C'), KeyModifiers::SHIFT) => KeyAction::ClearFinished,

            // View toggles
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
            (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,
            (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::CycleSort,
            (KeyCode::Char('S'), KeyModifiers::SHIFT) => KeyAction::ReverseSort,
            (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::Filter,
            (KeyCode::Char('.'), KeyModifiers::NONE) => KeyAction::ToggleDirectoryFilter,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::ToggleHidden,
            (KeyCode::Char('b'), KeyModifiers::NONE) => KeyAction::ToggleSourcePane,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            bindings: vec![
                KeyBinding { keys: "↑/↓ k/j", description: "Move cursor" },
                KeyBinding { keys: "Shift+↑/↓", description: "Extend selection" },
                KeyBinding { keys: "←/→", description: "Focus source/device pane" },
                KeyBinding { keys: "Space C-→", description: "Enter directory" },
                KeyBinding { keys: "Bksp C-←", description: "Parent directory" },
                KeyBinding { keys: "Home/End", description: "Jump to top/bottom" },
                KeyBinding { keys: "PgUp/PgDn", description: "Page up/down" },
            ],
        },
        HelpSection {
            title: "Selection",
            bindings: vec![
                KeyBinding { keys: "Click", description: "Select file / open directory" },
                KeyBinding { keys: "Ctrl+Click", description: "Toggle file in selection" },
                KeyBinding { keys: "Shift+Click", description: "Select range" },
                KeyBinding { keys: "Ctrl+A", description: "Select everything" },
                KeyBinding { keys: "Esc", description: "Clear selection" },
            ],
        },
        HelpSection {
            title: "Copying",
            bindings: vec![
                KeyBinding { keys: "Enter/c", description: "Copy selection to device" },
                KeyBinding { keys: "Drag", description: "Drag selection onto device pane" },
                KeyBinding { keys: "T", description: "Toggle transfer panel" },
                KeyBinding { keys: "C", description: "Clear finished transfers" },
            ],
        },
        HelpSection {
            title: "File Operations",
            bindings: vec![
                KeyBinding { keys: "r", description: "Rename" },
                KeyBinding { keys: "d/Del", description: "Delete (with confirm)" },
                KeyBinding { keys: "n", description: "New directory" },
            ],
        },
        HelpSection {
            title: "View",
            bindings: vec![
                KeyBinding { keys: "s/S", description: "Sort column / direction" },
                KeyBinding { keys: "/", description: "Filter (ch:N rate:N tokens)" },
                KeyBinding { keys: ".", description: "Hide directories" },
                KeyBinding { keys: "h", description: "Show hidden files" },
                KeyBinding { keys: "b", description: "Toggle source pane" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
            ],
        },
        HelpSection {
            title: "Application",
            bindings: vec![
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}
