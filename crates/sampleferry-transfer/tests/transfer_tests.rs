use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use sampleferry_fs::{CopyEngine, CopyOutcome};
use sampleferry_transfer::{
    BatchOutcome, BatchRequest, ConflictDecision, StickyMode, TransferCommand, TransferEvent,
    TransferQueueController, TransferStatus, start_worker_with_engine,
};

/// In-memory copy engine with a scripted destination.
#[derive(Default)]
struct MemoryEngine {
    /// Names already present at the destination.
    existing: Mutex<HashSet<String>>,
    /// Names that fail with an I/O error.
    failing: HashSet<String>,
    /// Log of (file name, overwrite flag) per attempt.
    attempts: Mutex<Vec<(String, bool)>>,
}

impl MemoryEngine {
    fn with_existing(names: &[&str]) -> Self {
        Self {
            existing: Mutex::new(names.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn with_failing(mut self, names: &[&str]) -> Self {
        self.failing = names.iter().map(|s| s.to_string()).collect();
        self
    }

    fn attempts(&self) -> Vec<(String, bool)> {
        self.attempts.lock().unwrap().clone()
    }
}

impl CopyEngine for MemoryEngine {
    fn copy_file(&self, source: &Path, dest_dir: &Path, overwrite: bool) -> CopyOutcome {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.attempts.lock().unwrap().push((name.clone(), overwrite));

        if self.failing.contains(&name) {
            return CopyOutcome::Io {
                message: "disk full".to_string(),
            };
        }

        let mut existing = self.existing.lock().unwrap();
        if existing.contains(&name) && !overwrite {
            return CopyOutcome::Conflict {
                path: dest_dir.join(&name),
            };
        }
        existing.insert(name);
        CopyOutcome::Ok
    }

    fn probe_size(&self, _source: &Path) -> Option<u64> {
        None
    }
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from(format!("/src/{n}"))).collect()
}

fn request(names: &[&str]) -> BatchRequest {
    BatchRequest::new(paths(names), PathBuf::from("/dest"))
}

fn event_channel() -> (mpsc::Sender<TransferEvent>, mpsc::Receiver<TransferEvent>) {
    mpsc::channel(256)
}

fn statuses<E: CopyEngine + Clone + 'static>(
    controller: &TransferQueueController<E>,
) -> Vec<(String, TransferStatus)> {
    controller
        .items()
        .map(|item| (item.file_name.to_string(), item.status))
        .collect()
}

#[tokio::test]
async fn test_clean_batch_completes_in_order() {
    let engine = Arc::new(MemoryEngine::default());
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller
        .run_batch(request(&["a.wav", "b.wav", "c.wav"]), &tx)
        .await;

    assert!(matches!(outcome, BatchOutcome::Finished));
    assert_eq!(
        statuses(&controller),
        vec![
            ("a.wav".to_string(), TransferStatus::Completed),
            ("b.wav".to_string(), TransferStatus::Completed),
            ("c.wav".to_string(), TransferStatus::Completed),
        ]
    );
}

#[tokio::test]
async fn test_listing_sizes_fill_byte_counts() {
    let engine = Arc::new(MemoryEngine::default());
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let mut request = request(&["a.wav"]);
    request
        .file_sizes
        .insert(PathBuf::from("/src/a.wav"), 2048);
    controller.run_batch(request, &tx).await;

    let item = controller.items().next().unwrap();
    assert_eq!(item.file_size, Some(2048));
    assert_eq!(item.bytes_transferred, 2048);
}

#[tokio::test]
async fn test_unknown_size_completes_as_one_byte() {
    let engine = Arc::new(MemoryEngine::default());
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    controller.run_batch(request(&["a.wav"]), &tx).await;

    let item = controller.items().next().unwrap();
    assert_eq!(item.file_size, None);
    assert_eq!(item.bytes_transferred, 1);
}

#[tokio::test]
async fn test_overwrite_decision_retries_single_file() {
    let engine = Arc::new(MemoryEngine::with_existing(&["a.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller.run_batch(request(&["a.wav"]), &tx).await;
    let BatchOutcome::AwaitingDecision { prompt, pending } = outcome else {
        panic!("expected a conflict");
    };
    assert_eq!(prompt.file_name, "a.wav");
    assert_eq!(pending.current_index(), 0);
    assert_eq!(
        controller.item(prompt.item_id).unwrap().status,
        TransferStatus::Copying
    );

    let outcome = controller
        .resume(pending, ConflictDecision::Overwrite, &tx)
        .await;

    assert!(matches!(outcome, BatchOutcome::Finished));
    assert_eq!(
        statuses(&controller),
        vec![("a.wav".to_string(), TransferStatus::Completed)]
    );
    // First attempt without overwrite, retry with it forced.
    assert_eq!(
        engine.attempts(),
        vec![("a.wav".to_string(), false), ("a.wav".to_string(), true)]
    );
    // A single-file decision does not stick.
    assert_eq!(controller.sticky_mode(), StickyMode::Ask);
}

#[tokio::test]
async fn test_overwrite_all_suppresses_later_prompts() {
    let engine = Arc::new(MemoryEngine::with_existing(&["a.wav", "b.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller.run_batch(request(&["a.wav", "b.wav"]), &tx).await;
    let BatchOutcome::AwaitingDecision { prompt, pending } = outcome else {
        panic!("expected a conflict");
    };
    assert_eq!(prompt.file_name, "a.wav");

    let outcome = controller
        .resume(pending, ConflictDecision::OverwriteAll, &tx)
        .await;

    // No second prompt: b.wav resolved under the sticky mode.
    assert!(matches!(outcome, BatchOutcome::Finished));
    assert_eq!(
        statuses(&controller),
        vec![
            ("a.wav".to_string(), TransferStatus::Completed),
            ("b.wav".to_string(), TransferStatus::Completed),
        ]
    );
    assert_eq!(controller.sticky_mode(), StickyMode::Overwrite);
    // b.wav went straight through with overwrite set.
    assert_eq!(engine.attempts().last(), Some(&("b.wav".to_string(), true)));
}

#[tokio::test]
async fn test_skip_marks_cancelled_and_continues() {
    let engine = Arc::new(MemoryEngine::with_existing(&["a.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller.run_batch(request(&["a.wav", "b.wav"]), &tx).await;
    let BatchOutcome::AwaitingDecision { pending, .. } = outcome else {
        panic!("expected a conflict");
    };

    let outcome = controller.resume(pending, ConflictDecision::Skip, &tx).await;

    assert!(matches!(outcome, BatchOutcome::Finished));
    assert_eq!(
        statuses(&controller),
        vec![
            ("a.wav".to_string(), TransferStatus::Cancelled),
            ("b.wav".to_string(), TransferStatus::Completed),
        ]
    );
    let skipped = controller.items().next().unwrap();
    assert_eq!(skipped.error.as_deref(), Some("Skipped (file exists)"));
}

#[tokio::test]
async fn test_skip_all_suppresses_later_prompts() {
    let engine = Arc::new(MemoryEngine::with_existing(&["a.wav", "b.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller
        .run_batch(request(&["a.wav", "b.wav", "c.wav"]), &tx)
        .await;
    let BatchOutcome::AwaitingDecision { pending, .. } = outcome else {
        panic!("expected a conflict");
    };

    let outcome = controller
        .resume(pending, ConflictDecision::SkipAll, &tx)
        .await;

    assert!(matches!(outcome, BatchOutcome::Finished));
    assert_eq!(
        statuses(&controller),
        vec![
            ("a.wav".to_string(), TransferStatus::Cancelled),
            ("b.wav".to_string(), TransferStatus::Cancelled),
            ("c.wav".to_string(), TransferStatus::Completed),
        ]
    );
}

#[tokio::test]
async fn test_cancel_import_stops_enqueueing() {
    let engine = Arc::new(MemoryEngine::with_existing(&["b.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller
        .run_batch(request(&["a.wav", "b.wav", "c.wav"]), &tx)
        .await;
    let BatchOutcome::AwaitingDecision { prompt, pending } = outcome else {
        panic!("expected a conflict");
    };
    assert_eq!(prompt.file_name, "b.wav");

    let outcome = controller
        .resume(pending, ConflictDecision::CancelImport, &tx)
        .await;

    assert!(matches!(outcome, BatchOutcome::Finished));
    // c.wav never entered the transfer list.
    assert_eq!(
        statuses(&controller),
        vec![
            ("a.wav".to_string(), TransferStatus::Completed),
            ("b.wav".to_string(), TransferStatus::Cancelled),
        ]
    );
    let cancelled = controller.items().nth(1).unwrap();
    assert_eq!(cancelled.error.as_deref(), Some("Import cancelled"));
}

#[tokio::test]
async fn test_io_failure_does_not_stop_batch() {
    let engine = Arc::new(MemoryEngine::default().with_failing(&["b.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller
        .run_batch(request(&["a.wav", "b.wav", "c.wav"]), &tx)
        .await;

    assert!(matches!(outcome, BatchOutcome::Finished));
    assert_eq!(
        statuses(&controller),
        vec![
            ("a.wav".to_string(), TransferStatus::Completed),
            ("b.wav".to_string(), TransferStatus::Failed),
            ("c.wav".to_string(), TransferStatus::Completed),
        ]
    );
    let failed = controller.items().nth(1).unwrap();
    assert_eq!(failed.error.as_deref(), Some("disk full"));
}

#[tokio::test]
async fn test_sticky_mode_resets_between_batches() {
    let engine = Arc::new(MemoryEngine::with_existing(&["a.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller.run_batch(request(&["a.wav"]), &tx).await;
    let BatchOutcome::AwaitingDecision { pending, .. } = outcome else {
        panic!("expected a conflict");
    };
    controller
        .resume(pending, ConflictDecision::OverwriteAll, &tx)
        .await;
    assert_eq!(controller.sticky_mode(), StickyMode::Overwrite);

    // The same name still conflicts; a fresh batch must prompt again.
    let outcome = controller.run_batch(request(&["a.wav"]), &tx).await;
    assert!(matches!(outcome, BatchOutcome::AwaitingDecision { .. }));
}

#[tokio::test]
async fn test_event_stream_tracks_item_lifecycle() {
    let engine = Arc::new(MemoryEngine::default());
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, mut rx) = event_channel();

    controller.run_batch(request(&["a.wav", "b.wav"]), &tx).await;

    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let TransferEvent::ItemUpdated(item) = event {
            seen.push((item.file_name.to_string(), item.status));
        }
    }
    assert_eq!(
        seen,
        vec![
            ("a.wav".to_string(), TransferStatus::Copying),
            ("a.wav".to_string(), TransferStatus::Completed),
            ("b.wav".to_string(), TransferStatus::Copying),
            ("b.wav".to_string(), TransferStatus::Completed),
        ]
    );
}

#[tokio::test]
async fn test_clear_terminal_keeps_active_items() {
    let engine = Arc::new(MemoryEngine::with_existing(&["b.wav"]));
    let mut controller = TransferQueueController::new(Arc::clone(&engine));
    let (tx, _rx) = event_channel();

    let outcome = controller.run_batch(request(&["a.wav", "b.wav"]), &tx).await;
    assert!(matches!(outcome, BatchOutcome::AwaitingDecision { .. }));

    // a.wav is terminal, b.wav is still waiting on the prompt.
    controller.clear_terminal();
    assert_eq!(
        statuses(&controller),
        vec![("b.wav".to_string(), TransferStatus::Copying)]
    );
}

async fn next_event(rx: &mut mpsc::Receiver<TransferEvent>) -> TransferEvent {
    rx.recv().await.expect("worker event")
}

#[tokio::test]
async fn test_worker_round_trip() {
    let engine = Arc::new(MemoryEngine::with_existing(&["b.wav"]));
    let (commands, mut events) = start_worker_with_engine(Arc::clone(&engine));

    commands
        .send(TransferCommand::Submit(request(&["a.wav", "b.wav"])))
        .await
        .unwrap();

    match next_event(&mut events).await {
        TransferEvent::ItemUpdated(item) => {
            assert_eq!(item.file_name, "a.wav");
            assert_eq!(item.status, TransferStatus::Copying);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match next_event(&mut events).await {
        TransferEvent::ItemUpdated(item) => assert_eq!(item.status, TransferStatus::Completed),
        other => panic!("unexpected event: {other:?}"),
    }
    match next_event(&mut events).await {
        TransferEvent::ItemUpdated(item) => {
            assert_eq!(item.file_name, "b.wav");
            assert_eq!(item.status, TransferStatus::Copying);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    let conflicted_id = match next_event(&mut events).await {
        TransferEvent::ConflictPending(prompt) => {
            assert_eq!(prompt.file_name, "b.wav");
            prompt.item_id
        }
        other => panic!("unexpected event: {other:?}"),
    };

    // A submission while the conflict is pending is dropped silently.
    commands
        .send(TransferCommand::Submit(request(&["c.wav"])))
        .await
        .unwrap();
    commands
        .send(TransferCommand::Decide(ConflictDecision::Overwrite))
        .await
        .unwrap();

    match next_event(&mut events).await {
        TransferEvent::ItemUpdated(item) => {
            assert_eq!(item.id, conflicted_id);
            assert_eq!(item.status, TransferStatus::Completed);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(matches!(
        next_event(&mut events).await,
        TransferEvent::BatchFinished
    ));

    commands.send(TransferCommand::ClearFinished).await.unwrap();
    match next_event(&mut events).await {
        TransferEvent::ItemsSnapshot(items) => assert!(items.is_empty()),
        other => panic!("unexpected event: {other:?}"),
    }
}
