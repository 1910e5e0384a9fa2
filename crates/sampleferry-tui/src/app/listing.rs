//! Background directory listing for the browser panes.

use std::path::PathBuf;

use tokio::sync::mpsc;

use sampleferry_core::{FileEntry, ListingError, PaneSide};
use sampleferry_fs::list_directory;

/// Result of one pane refresh, tagged with the pane and the path it was
/// read for so stale replies can be dropped.
#[derive(Debug)]
pub struct ListingUpdate {
    pub side: PaneSide,
    pub path: PathBuf,
    pub outcome: Result<Vec<FileEntry>, ListingError>,
}

/// Read a directory on a blocking thread and report back on `tx`.
pub fn spawn_listing(tx: mpsc::Sender<ListingUpdate>, side: PaneSide, path: PathBuf) {
    tokio::spawn(async move {
        let read_path = path.clone();
        let outcome = match tokio::task::spawn_blocking(move || list_directory(&read_path)).await
        {
            Ok(result) => result,
            Err(join_error) => Err(ListingError::io(
                &path,
                std::io::Error::other(join_error.to_string()),
            )),
        };

        let _ = tx.send(ListingUpdate { side, path, outcome }).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::constants::LISTING_CHANNEL_SIZE;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_listing_reports_entries() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("kick.wav"), "x").unwrap();

        let (tx, mut rx) = mpsc::channel(LISTING_CHANNEL_SIZE);
        spawn_listing(tx, PaneSide::Destination, temp.path().to_path_buf());

        let update = rx.recv().await.unwrap();
        assert_eq!(update.side, PaneSide::Destination);
        assert_eq!(update.path, temp.path());
        let entries = update.outcome.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "kick.wav");
    }

    #[tokio::test]
    async fn test_listing_reports_failure() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("gone");

        let (tx, mut rx) = mpsc::channel(LISTING_CHANNEL_SIZE);
        spawn_listing(tx, PaneSide::Source, gone.clone());

        let update = rx.recv().await.unwrap();
        assert_eq!(update.side, PaneSide::Source);
        assert_eq!(update.path, gone);
        assert!(update.outcome.is_err());
    }
}
