//! Transfer list records.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use compact_str::CompactString;
use strum::Display;

/// Identifier for one transfer item, never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferId(u64);

impl TransferId {
    /// Create an id from a raw counter value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a transfer item.
///
/// `Pending → Copying → {Completed | Failed | Cancelled}`; transitions
/// only move forward and terminal statuses never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransferStatus {
    Pending,
    Copying,
    Completed,
    Failed,
    Cancelled,
}

impl TransferStatus {
    /// Whether this status admits no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// One entry in the transfer list.
#[derive(Debug, Clone)]
pub struct TransferItem {
    pub id: TransferId,
    pub file_name: CompactString,
    /// Size in bytes when known at enqueue time.
    pub file_size: Option<u64>,
    pub bytes_transferred: u64,
    pub status: TransferStatus,
    pub error: Option<String>,
    pub started_at: DateTime<Local>,
    pub source_path: PathBuf,
}

impl TransferItem {
    /// Create a pending item for `source_path`.
    pub fn new(id: TransferId, source_path: PathBuf, file_size: Option<u64>) -> Self {
        let file_name = source_path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_else(|| CompactString::new(source_path.to_string_lossy()));
        Self {
            id,
            file_name,
            file_size,
            bytes_transferred: 0,
            status: TransferStatus::Pending,
            error: None,
            started_at: Local::now(),
            source_path,
        }
    }

    /// Mark the copy as started.
    pub fn begin_copy(&mut self) {
        if self.status == TransferStatus::Pending {
            self.status = TransferStatus::Copying;
        }
    }

    /// Mark the item completed, filling in the transferred byte count.
    ///
    /// An unknown size counts as a single byte so progress math still
    /// registers the item as done.
    pub fn complete(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TransferStatus::Completed;
        self.bytes_transferred = self.file_size.unwrap_or(1);
    }

    /// Mark the item failed, recording the error message.
    pub fn fail(&mut self, error: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TransferStatus::Failed;
        self.error = Some(error.into());
    }

    /// Mark the item cancelled, recording the reason.
    pub fn cancel(&mut self, reason: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TransferStatus::Cancelled;
        self.error = Some(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> TransferItem {
        TransferItem::new(
            TransferId::new(1),
            PathBuf::from("/samples/kick.wav"),
            Some(4096),
        )
    }

    #[test]
    fn test_new_item_is_pending() {
        let item = item();
        assert_eq!(item.status, TransferStatus::Pending);
        assert_eq!(item.file_name, "kick.wav");
        assert_eq!(item.bytes_transferred, 0);
        assert!(item.error.is_none());
    }

    #[test]
    fn test_complete_fills_bytes() {
        let mut item = item();
        item.begin_copy();
        item.complete();
        assert_eq!(item.status, TransferStatus::Completed);
        assert_eq!(item.bytes_transferred, 4096);
    }

    #[test]
    fn test_unknown_size_completes_as_one_byte() {
        let mut item = TransferItem::new(TransferId::new(2), PathBuf::from("/samples/x.wav"), None);
        item.begin_copy();
        item.complete();
        assert_eq!(item.bytes_transferred, 1);
    }

    #[test]
    fn test_terminal_status_is_immutable() {
        let mut item = item();
        item.begin_copy();
        item.fail("disk full");
        assert_eq!(item.status, TransferStatus::Failed);

        item.complete();
        item.cancel("too late");
        assert_eq!(item.status, TransferStatus::Failed);
        assert_eq!(item.error.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_begin_copy_only_from_pending() {
        let mut item = item();
        item.begin_copy();
        item.cancel("stopped");
        item.begin_copy();
        assert_eq!(item.status, TransferStatus::Cancelled);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TransferStatus::Copying.to_string(), "Copying");
        assert_eq!(TransferStatus::Cancelled.to_string(), "Cancelled");
    }
}
