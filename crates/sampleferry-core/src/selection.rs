//! Click and keyboard selection transitions.
//!
//! Pure state transforms over a pane: no filesystem access, no async.
//! The app layer translates terminal events into these calls.

use std::path::PathBuf;

use crate::{PaneModel, PaneSide};

/// Modifier keys attached to a click or cursor event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
    };

    /// Control held.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };

    /// Shift held.
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
    };
}

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Navigate into the clicked directory.
    Navigate(PathBuf),
    /// Selection state was updated.
    Updated,
    /// Click landed outside the listing.
    Ignored,
}

/// Apply a click on the entry at unfiltered index `index`.
///
/// Plain click on a directory navigates; plain click on a file selects
/// just that file. Ctrl toggles membership. Shift adds the inclusive
/// range from the click anchor, excluding directories on the
/// destination pane, and leaves the anchor where it was.
pub fn click(pane: &mut PaneModel, index: usize, modifiers: Modifiers) -> ClickOutcome {
    let Some(entry) = pane.listing.get(index) else {
        return ClickOutcome::Ignored;
    };
    let path = entry.path.clone();
    let is_directory = entry.is_directory;

    if modifiers.shift
        && let Some(anchor) = pane.last_clicked_index
    {
        let (low, high) = (anchor.min(index), anchor.max(index));
        let exclude_directories = pane.side == PaneSide::Destination;
        let added: Vec<PathBuf> = pane.listing[low..=high]
            .iter()
            .filter(|e| !(exclude_directories && e.is_directory))
            .map(|e| e.path.clone())
            .collect();
        pane.selection.extend(added);
        pane.cursor_index = index;
        return ClickOutcome::Updated;
    }

    if modifiers.ctrl {
        if !pane.selection.remove(&path) {
            pane.selection.insert(path);
        }
        pane.last_clicked_index = Some(index);
        pane.cursor_index = index;
        return ClickOutcome::Updated;
    }

    if is_directory {
        return ClickOutcome::Navigate(path);
    }

    pane.selection.clear();
    pane.selection.insert(path);
    pane.last_clicked_index = Some(index);
    pane.cursor_index = index;
    ClickOutcome::Updated
}

/// Move the cursor by `delta` rows, clamped to the listing.
///
/// Without `extend` the selection becomes the entry under the new
/// cursor; with `extend` that entry is added to the existing selection,
/// directories included.
pub fn move_cursor(pane: &mut PaneModel, delta: isize, extend: bool) {
    let visible = pane.visible_indices();
    if visible.is_empty() {
        return;
    }
    // Movement walks the filtered view, not the raw listing.
    let position = visible
        .iter()
        .position(|&index| index == pane.cursor_index)
        .unwrap_or(0);
    let last = (visible.len() - 1) as isize;
    let next = (position as isize + delta).clamp(0, last) as usize;
    pane.cursor_index = visible[next];

    let path = pane.listing[pane.cursor_index].path.clone();
    if !extend {
        pane.selection.clear();
    }
    pane.selection.insert(path);
}
