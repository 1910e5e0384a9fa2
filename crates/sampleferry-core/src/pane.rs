//! Pane state for the two browser panels.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{FileEntry, ListingFilter, SortColumn, SortDirection, sort_entries};

/// Which side of the browser a pane sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneSide {
    /// Left pane, seeded from the home directory.
    Source,
    /// Right pane, rooted at the device directory.
    Destination,
}

/// State of one file listing panel.
///
/// `cursor_index`, `selection`, and `last_clicked_index` always refer to
/// the unfiltered listing order. Filtering is applied at render time via
/// [`PaneModel::visible_indices`]. State changes go through the named
/// transition methods so the invariants (cursor within bounds, selection
/// subset of listing, root bound never escaped) hold everywhere.
#[derive(Debug, Clone)]
pub struct PaneModel {
    /// Which side this pane is.
    pub side: PaneSide,

    /// Navigation can never go above this path, when set.
    pub root_bound: Option<PathBuf>,

    /// Directory currently listed.
    pub current_path: PathBuf,

    /// Sorted entries of `current_path`.
    pub listing: Vec<FileEntry>,

    /// Cursor row in unfiltered listing order.
    pub cursor_index: usize,

    /// Paths currently selected.
    pub selection: HashSet<PathBuf>,

    /// Anchor for shift-click range selection.
    pub last_clicked_index: Option<usize>,

    /// A listing refresh is in flight; suppresses re-entrant refreshes.
    pub loading: bool,

    /// Active view filter.
    pub filter: ListingFilter,
}

impl PaneModel {
    /// Create a pane at the given directory.
    pub fn new(side: PaneSide, current_path: impl Into<PathBuf>) -> Self {
        Self {
            side,
            root_bound: None,
            current_path: current_path.into(),
            listing: Vec::new(),
            cursor_index: 0,
            selection: HashSet::new(),
            last_clicked_index: None,
            loading: false,
            filter: ListingFilter::default(),
        }
    }

    /// Create the destination pane, bounded at its starting directory.
    pub fn bounded(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut pane = Self::new(PaneSide::Destination, root.clone());
        pane.root_bound = Some(root);
        pane
    }

    /// Prepare to list `path`: remember it and mark loading.
    ///
    /// Returns `false` without changing anything when a refresh is
    /// already in flight.
    pub fn begin_navigation(&mut self, path: impl Into<PathBuf>) -> bool {
        if self.loading {
            return false;
        }
        self.current_path = path.into();
        self.loading = true;
        true
    }

    /// Adopt a freshly fetched listing.
    ///
    /// Sorts the entries, drops selection paths that no longer exist,
    /// and clamps the cursor and click anchor into range.
    pub fn adopt_listing(
        &mut self,
        mut entries: Vec<FileEntry>,
        column: SortColumn,
        direction: SortDirection,
    ) {
        sort_entries(&mut entries, column, direction);
        self.listing = entries;
        self.loading = false;

        let live: HashSet<&Path> = self.listing.iter().map(|e| e.path.as_path()).collect();
        self.selection.retain(|path| live.contains(path.as_path()));

        if self.listing.is_empty() {
            self.cursor_index = 0;
            self.last_clicked_index = None;
        } else {
            self.cursor_index = self.cursor_index.min(self.listing.len() - 1);
            if self
                .last_clicked_index
                .is_some_and(|index| index >= self.listing.len())
            {
                self.last_clicked_index = None;
            }
        }
    }

    /// Record a failed listing refresh: the listing becomes empty.
    pub fn fail_listing(&mut self) {
        self.adopt_listing(Vec::new(), SortColumn::default(), SortDirection::default());
    }

    /// Re-sort the current listing in place. Selection is untouched
    /// (it is keyed by path); the cursor stays on its row number.
    pub fn resort(&mut self, column: SortColumn, direction: SortDirection) {
        sort_entries(&mut self.listing, column, direction);
    }

    /// Entry at an unfiltered index.
    pub fn entry_at(&self, index: usize) -> Option<&FileEntry> {
        self.listing.get(index)
    }

    /// Entry under the cursor.
    pub fn cursor_entry(&self) -> Option<&FileEntry> {
        self.listing.get(self.cursor_index)
    }

    /// Check whether a path is selected.
    pub fn is_selected(&self, path: &Path) -> bool {
        self.selection.contains(path)
    }

    /// Selected entries in listing order.
    pub fn selected_entries(&self) -> Vec<&FileEntry> {
        self.listing
            .iter()
            .filter(|entry| self.selection.contains(&entry.path))
            .collect()
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select every entry in the listing, directories included.
    pub fn select_all(&mut self) {
        self.selection = self.listing.iter().map(|entry| entry.path.clone()).collect();
    }

    /// Reset the cursor to the top of the listing.
    pub fn reset_cursor(&mut self) {
        self.cursor_index = 0;
    }

    /// Parent directory to navigate to, honoring the root bound.
    ///
    /// Returns `None` at the filesystem root, and for a bounded pane
    /// already sitting at its bound. A computed parent that would fall
    /// outside the bound is clamped back to the bound itself.
    pub fn parent_target(&self) -> Option<PathBuf> {
        let parent = self.current_path.parent()?.to_path_buf();
        if let Some(bound) = &self.root_bound {
            if &self.current_path == bound {
                return None;
            }
            if !parent.starts_with(bound) {
                return Some(bound.clone());
            }
        }
        Some(parent)
    }

    /// Unfiltered indices visible under the active filter.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.filter.visible_indices(&self.listing)
    }
}
