//! Core types and pane state for sampleferry.
//!
//! This crate provides the fundamental data structures shared across
//! the sampleferry ecosystem: directory listing entries, sort and
//! filter rules, and the state of the two browser panes.

mod entry;
mod error;
mod filter;
mod pane;
mod selection;
mod sort;

pub use entry::{FileEntry, WaveInfo};
pub use error::{ListingError, MutationError};
pub use filter::ListingFilter;
pub use pane::{PaneModel, PaneSide};
pub use selection::{ClickOutcome, Modifiers, click, move_cursor};
pub use sort::{SortColumn, SortDirection, compare_names, sort_entries};
