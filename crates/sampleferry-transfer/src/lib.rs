//! Transfer queue engine for sampleferry.
//!
//! Sequential copy batches over the [`sampleferry_fs::CopyEngine`]
//! primitive: one file in flight at a time, an insertion-ordered
//! transfer list, and a batch that suspends into an explicit
//! [`PendingBatch`] continuation when a name conflict needs a user
//! decision. Overwrite/skip decisions can stick for the rest of a
//! batch; they never outlive it.

mod conflict;
mod ingest;
mod item;
mod queue;
mod worker;

pub use conflict::{ConflictDecision, ConflictPrompt, ConflictResolver, StickyMode};
pub use ingest::{
    DRAG_PAYLOAD_TAG, batch_from_paths, encode_drag_payload, parse_drag_payload, parse_drop_text,
};
pub use item::{TransferId, TransferItem, TransferStatus};
pub use queue::{BatchOutcome, BatchRequest, PendingBatch, TransferQueueController};
pub use worker::{
    TRANSFER_CHANNEL_SIZE, TransferCommand, TransferEvent, start_transfer_worker,
    start_worker_with_engine,
};
