//! Filesystem access layer for sampleferry.
//!
//! Everything that touches the disk lives here: flat directory listings
//! for the panes, the wave-header probe, the copy primitive behind the
//! [`CopyEngine`] seam, and the rename/delete/create-directory
//! mutations. The transfer queue and the TUI never call `std::fs`
//! directly.

mod engine;
mod listing;
mod mutate;
mod wave;

pub use engine::{CopyEngine, CopyOutcome, DiskEngine};
pub use listing::{home_directory, list_directory};
pub use mutate::{create_directory, delete_entry, rename_entry, validate_entry_name};
pub use wave::probe_wave;

// Re-export core types for convenience
pub use sampleferry_core::{FileEntry, ListingError, MutationError, WaveInfo};
