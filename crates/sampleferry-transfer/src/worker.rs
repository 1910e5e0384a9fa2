//! Dedicated transfer task bridging the UI and the queue controller.
//!
//! The worker owns the [`TransferQueueController`] and at most one
//! parked [`PendingBatch`]. The UI talks to it over bounded channels:
//! commands in, events out. Dropping the command sender shuts the
//! worker down.

use tokio::sync::mpsc;
use tracing::{info, warn};

use sampleferry_fs::{CopyEngine, DiskEngine};

use crate::conflict::{ConflictDecision, ConflictPrompt};
use crate::item::TransferItem;
use crate::queue::{BatchOutcome, BatchRequest, PendingBatch, TransferQueueController};

/// Channel buffer size for worker commands and events.
pub const TRANSFER_CHANNEL_SIZE: usize = 100;

/// Commands accepted by the transfer worker.
#[derive(Debug)]
pub enum TransferCommand {
    /// Submit a new batch. Ignored while a conflict is pending.
    Submit(BatchRequest),
    /// Resolve the pending conflict.
    Decide(ConflictDecision),
    /// Drop every terminal item from the transfer list.
    ClearFinished,
}

/// Events published by the transfer worker.
#[derive(Debug)]
pub enum TransferEvent {
    /// An item was appended or changed status.
    ItemUpdated(TransferItem),
    /// A conflict awaits a decision.
    ConflictPending(ConflictPrompt),
    /// A batch run ended, normally or via a cancel decision. The
    /// destination listing should refresh exactly once per batch.
    BatchFinished,
    /// Full list replacement after a clear.
    ItemsSnapshot(Vec<TransferItem>),
}

/// Spawn the transfer worker against the real filesystem.
pub fn start_transfer_worker() -> (mpsc::Sender<TransferCommand>, mpsc::Receiver<TransferEvent>) {
    start_worker_with_engine(DiskEngine)
}

/// Spawn the transfer worker with a caller-supplied copy engine.
pub fn start_worker_with_engine<E>(
    engine: E,
) -> (mpsc::Sender<TransferCommand>, mpsc::Receiver<TransferEvent>)
where
    E: CopyEngine + Clone + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(TRANSFER_CHANNEL_SIZE);
    let (event_tx, event_rx) = mpsc::channel(TRANSFER_CHANNEL_SIZE);

    tokio::spawn(async move {
        worker_loop(engine, command_rx, event_tx).await;
    });

    (command_tx, event_rx)
}

async fn worker_loop<E: CopyEngine + Clone + 'static>(
    engine: E,
    mut commands: mpsc::Receiver<TransferCommand>,
    events: mpsc::Sender<TransferEvent>,
) {
    let mut controller = TransferQueueController::new(engine);
    let mut parked: Option<PendingBatch> = None;

    while let Some(command) = commands.recv().await {
        match command {
            TransferCommand::Submit(request) => {
                if parked.is_some() {
                    warn!("batch submitted while a conflict is pending; ignored");
                    continue;
                }
                let outcome = controller.run_batch(request, &events).await;
                publish_outcome(outcome, &mut parked, &events).await;
            }
            TransferCommand::Decide(decision) => {
                let Some(pending) = parked.take() else {
                    warn!("conflict decision with no pending batch; ignored");
                    continue;
                };
                let outcome = controller.resume(pending, decision, &events).await;
                publish_outcome(outcome, &mut parked, &events).await;
            }
            TransferCommand::ClearFinished => {
                controller.clear_terminal();
                let snapshot = controller.items().cloned().collect();
                let _ = events.send(TransferEvent::ItemsSnapshot(snapshot)).await;
            }
        }
    }

    info!("transfer worker stopped");
}

async fn publish_outcome(
    outcome: BatchOutcome,
    parked: &mut Option<PendingBatch>,
    events: &mpsc::Sender<TransferEvent>,
) {
    match outcome {
        BatchOutcome::Finished => {
            let _ = events.send(TransferEvent::BatchFinished).await;
        }
        BatchOutcome::AwaitingDecision { prompt, pending } => {
            *parked = Some(pending);
            let _ = events.send(TransferEvent::ConflictPending(prompt)).await;
        }
    }
}
