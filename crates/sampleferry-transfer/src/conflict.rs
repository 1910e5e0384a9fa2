//! Conflict decisions and the sticky per-batch policy.

use std::path::PathBuf;

use compact_str::CompactString;

use crate::item::TransferId;

/// A destination-name collision surfaced to the user for a decision.
#[derive(Debug, Clone)]
pub struct ConflictPrompt {
    /// Transfer item waiting on the decision.
    pub item_id: TransferId,
    /// Name of the conflicting file.
    pub file_name: CompactString,
    /// Existing destination path.
    pub dest_path: PathBuf,
}

/// User answer to a conflict prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Overwrite this file only.
    Overwrite,
    /// Overwrite this and every remaining conflict in the batch.
    OverwriteAll,
    /// Skip this file only.
    Skip,
    /// Skip this and every remaining conflict in the batch.
    SkipAll,
    /// Stop the batch; remaining files are never enqueued.
    CancelImport,
}

impl ConflictDecision {
    /// Whether the decision sets the sticky mode for the batch.
    pub fn is_sticky(self) -> bool {
        matches!(self, Self::OverwriteAll | Self::SkipAll)
    }
}

/// Per-batch overwrite/skip policy.
///
/// `Ask` until the user picks an "All" decision; then every later
/// conflict in the batch resolves without a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StickyMode {
    /// Prompt on each conflict.
    #[default]
    Ask,
    /// Overwrite every remaining conflict.
    Overwrite,
    /// Skip every remaining conflict.
    Skip,
}

/// Owns the sticky policy for one batch run.
///
/// Reset at the start of every batch; decisions made in one batch never
/// leak into the next.
#[derive(Debug, Default)]
pub struct ConflictResolver {
    mode: StickyMode,
}

impl ConflictResolver {
    /// Current sticky mode.
    pub fn mode(&self) -> StickyMode {
        self.mode
    }

    /// Return to prompting; called when a new batch starts.
    pub fn reset(&mut self) {
        self.mode = StickyMode::Ask;
    }

    /// Fold a decision's "All" component into the sticky mode.
    pub fn absorb(&mut self, decision: ConflictDecision) {
        match decision {
            ConflictDecision::OverwriteAll => self.mode = StickyMode::Overwrite,
            ConflictDecision::SkipAll => self.mode = StickyMode::Skip,
            _ => {}
        }
    }

    /// Whether copies should currently force overwrite.
    pub fn wants_overwrite(&self) -> bool {
        self.mode == StickyMode::Overwrite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_starts_asking() {
        let resolver = ConflictResolver::default();
        assert_eq!(resolver.mode(), StickyMode::Ask);
        assert!(!resolver.wants_overwrite());
    }

    #[test]
    fn test_absorb_sticky_decisions() {
        let mut resolver = ConflictResolver::default();
        resolver.absorb(ConflictDecision::Overwrite);
        assert_eq!(resolver.mode(), StickyMode::Ask);

        resolver.absorb(ConflictDecision::OverwriteAll);
        assert_eq!(resolver.mode(), StickyMode::Overwrite);

        resolver.absorb(ConflictDecision::Skip);
        assert_eq!(resolver.mode(), StickyMode::Overwrite);

        resolver.absorb(ConflictDecision::SkipAll);
        assert_eq!(resolver.mode(), StickyMode::Skip);
    }

    #[test]
    fn test_reset_clears_mode() {
        let mut resolver = ConflictResolver::default();
        resolver.absorb(ConflictDecision::SkipAll);
        resolver.reset();
        assert_eq!(resolver.mode(), StickyMode::Ask);
    }

    #[test]
    fn test_is_sticky() {
        assert!(ConflictDecision::OverwriteAll.is_sticky());
        assert!(ConflictDecision::SkipAll.is_sticky());
        assert!(!ConflictDecision::Overwrite.is_sticky());
        assert!(!ConflictDecision::CancelImport.is_sticky());
    }
}
