//! Sequential batch execution with conflict suspension.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use sampleferry_core::FileEntry;
use sampleferry_fs::{CopyEngine, CopyOutcome};

use crate::conflict::{ConflictDecision, ConflictPrompt, ConflictResolver, StickyMode};
use crate::item::{TransferId, TransferItem};
use crate::worker::TransferEvent;

const SKIPPED_EXISTS: &str = "Skipped (file exists)";
const IMPORT_CANCELLED: &str = "Import cancelled";

/// One batch submission: ordered source paths, the destination
/// directory, and whatever sizes the caller already knows.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub source_paths: Vec<PathBuf>,
    pub dest_dir: PathBuf,
    pub file_sizes: HashMap<PathBuf, u64>,
    /// Force overwrite for every file in the batch.
    pub force_overwrite: bool,
}

impl BatchRequest {
    /// Batch over bare paths with no known sizes.
    pub fn new(source_paths: Vec<PathBuf>, dest_dir: PathBuf) -> Self {
        Self {
            source_paths,
            dest_dir,
            file_sizes: HashMap::new(),
            force_overwrite: false,
        }
    }

    /// Batch over listing entries, taking file sizes from the listing.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a FileEntry>,
        dest_dir: PathBuf,
    ) -> Self {
        let mut source_paths = Vec::new();
        let mut file_sizes = HashMap::new();
        for entry in entries {
            source_paths.push(entry.path.clone());
            if entry.is_file() {
                file_sizes.insert(entry.path.clone(), entry.size);
            }
        }
        Self {
            source_paths,
            dest_dir,
            file_sizes,
            force_overwrite: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source_paths.is_empty()
    }
}

/// Continuation for a batch suspended on a conflict.
///
/// Captured at suspension time and passed back into [`resume`];
/// everything needed to pick the batch up again lives here.
///
/// [`resume`]: TransferQueueController::resume
#[derive(Debug)]
pub struct PendingBatch {
    source_paths: Vec<PathBuf>,
    dest_dir: PathBuf,
    current_index: usize,
    file_sizes: HashMap<PathBuf, u64>,
    force_overwrite: bool,
    item_id: TransferId,
}

impl PendingBatch {
    /// Index of the conflicted source path.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Item awaiting the decision.
    pub fn item_id(&self) -> TransferId {
        self.item_id
    }
}

/// Result of a run or resume call.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Every processed path reached a terminal status, or the batch was
    /// cancelled. The destination listing should refresh once.
    Finished,
    /// Suspended on a conflict awaiting a decision.
    AwaitingDecision {
        prompt: ConflictPrompt,
        pending: PendingBatch,
    },
}

/// Sequential transfer queue.
///
/// One copy in flight at a time; the transfer list keeps enqueue
/// order. Owns the [`ConflictResolver`] so sticky decisions are scoped
/// to a single batch.
pub struct TransferQueueController<E> {
    engine: E,
    items: IndexMap<TransferId, TransferItem>,
    resolver: ConflictResolver,
    next_id: u64,
}

impl<E: CopyEngine + Clone + 'static> TransferQueueController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            items: IndexMap::new(),
            resolver: ConflictResolver::default(),
            next_id: 0,
        }
    }

    /// Items in enqueue order.
    pub fn items(&self) -> impl Iterator<Item = &TransferItem> {
        self.items.values()
    }

    pub fn item(&self, id: TransferId) -> Option<&TransferItem> {
        self.items.get(&id)
    }

    /// Current prompt policy of the running batch.
    pub fn sticky_mode(&self) -> StickyMode {
        self.resolver.mode()
    }

    /// Drop every terminal item from the list.
    pub fn clear_terminal(&mut self) {
        self.items.retain(|_, item| !item.status.is_terminal());
    }

    /// Run a new batch from the start. Resets the sticky policy.
    pub async fn run_batch(
        &mut self,
        request: BatchRequest,
        events: &mpsc::Sender<TransferEvent>,
    ) -> BatchOutcome {
        self.resolver.reset();
        info!(
            files = request.source_paths.len(),
            dest = %request.dest_dir.display(),
            "batch started"
        );
        self.run_from(
            request.source_paths,
            request.dest_dir,
            0,
            request.file_sizes,
            request.force_overwrite,
            events,
        )
        .await
    }

    /// Resume a suspended batch with the user's decision.
    pub async fn resume(
        &mut self,
        pending: PendingBatch,
        decision: ConflictDecision,
        events: &mpsc::Sender<TransferEvent>,
    ) -> BatchOutcome {
        let PendingBatch {
            source_paths,
            dest_dir,
            current_index,
            file_sizes,
            force_overwrite,
            item_id,
        } = pending;
        self.resolver.absorb(decision);

        match decision {
            ConflictDecision::Overwrite | ConflictDecision::OverwriteAll => {
                if let Some(source) = source_paths.get(current_index).cloned() {
                    self.retry_forced(item_id, &source, &dest_dir, events).await;
                }
                self.run_from(
                    source_paths,
                    dest_dir,
                    current_index + 1,
                    file_sizes,
                    force_overwrite,
                    events,
                )
                .await
            }
            ConflictDecision::Skip | ConflictDecision::SkipAll => {
                self.mark(item_id, events, |item| item.cancel(SKIPPED_EXISTS))
                    .await;
                self.run_from(
                    source_paths,
                    dest_dir,
                    current_index + 1,
                    file_sizes,
                    force_overwrite,
                    events,
                )
                .await
            }
            ConflictDecision::CancelImport => {
                self.mark(item_id, events, |item| item.cancel(IMPORT_CANCELLED))
                    .await;
                info!("batch cancelled by user");
                BatchOutcome::Finished
            }
        }
    }

    /// Process paths from `start_index` until done or suspended.
    async fn run_from(
        &mut self,
        source_paths: Vec<PathBuf>,
        dest_dir: PathBuf,
        start_index: usize,
        file_sizes: HashMap<PathBuf, u64>,
        force_overwrite: bool,
        events: &mpsc::Sender<TransferEvent>,
    ) -> BatchOutcome {
        for index in start_index..source_paths.len() {
            let source = source_paths[index].clone();
            let size = file_sizes.get(&source).copied();

            let id = self.allocate_id();
            let mut item = TransferItem::new(id, source.clone(), size);
            item.begin_copy();
            self.items.insert(id, item.clone());
            let _ = events.send(TransferEvent::ItemUpdated(item)).await;

            let overwrite = force_overwrite || self.resolver.wants_overwrite();
            let outcome = self.copy_one(&source, &dest_dir, overwrite).await;
            debug!(source = %source.display(), ?outcome, "copy attempt");

            match outcome {
                CopyOutcome::Ok => self.mark(id, events, |item| item.complete()).await,
                CopyOutcome::Conflict { path } => match self.resolver.mode() {
                    StickyMode::Overwrite => {
                        self.retry_forced(id, &source, &dest_dir, events).await;
                    }
                    StickyMode::Skip => {
                        self.mark(id, events, |item| item.cancel(SKIPPED_EXISTS))
                            .await;
                    }
                    StickyMode::Ask => {
                        let file_name = self
                            .items
                            .get(&id)
                            .map(|item| item.file_name.clone())
                            .unwrap_or_default();
                        info!(file = %file_name, "batch suspended on conflict");
                        return BatchOutcome::AwaitingDecision {
                            prompt: ConflictPrompt {
                                item_id: id,
                                file_name,
                                dest_path: path,
                            },
                            pending: PendingBatch {
                                source_paths,
                                dest_dir,
                                current_index: index,
                                file_sizes,
                                force_overwrite,
                                item_id: id,
                            },
                        };
                    }
                },
                CopyOutcome::Io { message } => {
                    self.mark(id, events, |item| item.fail(message)).await;
                }
            }
        }

        info!("batch finished");
        BatchOutcome::Finished
    }

    /// Retry one file with overwrite forced, then settle its item.
    async fn retry_forced(
        &mut self,
        id: TransferId,
        source: &Path,
        dest_dir: &Path,
        events: &mpsc::Sender<TransferEvent>,
    ) {
        match self.copy_one(source, dest_dir, true).await {
            CopyOutcome::Ok => self.mark(id, events, |item| item.complete()).await,
            CopyOutcome::Conflict { path } => {
                self.mark(id, events, |item| {
                    item.fail(format!("File exists: {}", path.display()))
                })
                .await;
            }
            CopyOutcome::Io { message } => {
                self.mark(id, events, |item| item.fail(message)).await;
            }
        }
    }

    async fn copy_one(&self, source: &Path, dest_dir: &Path, overwrite: bool) -> CopyOutcome {
        let engine = self.engine.clone();
        let source = source.to_path_buf();
        let dest_dir = dest_dir.to_path_buf();
        tokio::task::spawn_blocking(move || engine.copy_file(&source, &dest_dir, overwrite))
            .await
            .unwrap_or_else(|err| CopyOutcome::Io {
                message: format!("copy task failed: {err}"),
            })
    }

    /// Apply an update to an item and publish the new snapshot.
    async fn mark(
        &mut self,
        id: TransferId,
        events: &mpsc::Sender<TransferEvent>,
        update: impl FnOnce(&mut TransferItem),
    ) {
        if let Some(item) = self.items.get_mut(&id) {
            update(item);
            let snapshot = item.clone();
            let _ = events.send(TransferEvent::ItemUpdated(snapshot)).await;
        }
    }

    fn allocate_id(&mut self) -> TransferId {
        let id = TransferId::new(self.next_id);
        self.next_id += 1;
        id
    }
}
