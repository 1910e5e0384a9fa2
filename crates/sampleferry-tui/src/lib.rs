//! Terminal user interface for sampleferry.
//!
//! This crate provides an interactive dual-pane browser for ferrying
//! audio samples onto a device directory, built with ratatui.
//!
//! # Overview
//!
//! `sampleferry-tui` puts two directory panes side by side:
//!
//! - **Source pane** - Browse the machine for samples to copy
//! - **Destination pane** - The device tree, clamped to its root
//! - **Transfer panel** - Follow copy batches as they run
//! - **Conflict prompts** - Decide overwrite or skip per file
//!
//! # Usage
//!
//! ```rust,no_run
//! use sampleferry_tui::RunOptions;
//! use std::path::PathBuf;
//!
//! // Run the TUI against a device directory
//! sampleferry_tui::run(RunOptions {
//!     destination: PathBuf::from("/media/device/samples"),
//!     source: None,
//!     light_theme: false,
//! })
//! .unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Left`/`Right` - Switch pane
//! - `Enter` - Enter directory, or copy the selection
//! - `c` - Copy the selection to the destination
//! - `r`/`d`/`n` - Rename, delete, create directory
//! - `/` - Filter the listing
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

use std::path::PathBuf;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};

pub use app::{App, AppResult};
pub use theme::Theme;

/// Startup options for the TUI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Device directory the destination pane is clamped to.
    pub destination: PathBuf,
    /// Starting directory for the source pane, home when absent.
    pub source: Option<PathBuf>,
    /// Start with the light theme regardless of saved settings.
    pub light_theme: bool,
}

/// Run the TUI application.
pub fn run(options: RunOptions) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture, EnableBracketedPaste)?;

    let result = rt.block_on(App::new(options).run(terminal));

    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture, DisableBracketedPaste);
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
