//! Ingestion adapters normalizing drag and drop input into batches.
//!
//! Both entry points, the in-app drag payload between panes and an
//! OS-level external drop, resolve to a list of absolute source paths
//! and feed the same batch entry point. External drops therefore hit
//! the same conflict handling as in-app copies.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use sampleferry_fs::CopyEngine;

use crate::queue::BatchRequest;

/// Payload tag for the in-app drag format.
pub const DRAG_PAYLOAD_TAG: &str = "application/x-sampleferry-paths";

/// Encode source paths as the in-app drag payload (a JSON array of
/// absolute path strings).
pub fn encode_drag_payload(paths: &[PathBuf]) -> String {
    let strings: Vec<String> = paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    serde_json::to_string(&strings).unwrap_or_default()
}

/// Decode an in-app drag payload back into paths.
///
/// Malformed payloads and relative entries are dropped.
pub fn parse_drag_payload(raw: &str) -> Vec<PathBuf> {
    let Ok(strings) = serde_json::from_str::<Vec<String>>(raw) else {
        debug!("ignoring malformed drag payload");
        return Vec::new();
    };
    strings
        .into_iter()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .collect()
}

/// Parse an external drop event's text: one absolute path per line,
/// with an optional `file://` prefix.
pub fn parse_drop_text(raw: &str) -> Vec<PathBuf> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix("file://").unwrap_or(line))
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .collect()
}

/// Build a batch from ingested paths, probing each file's size so
/// progress math stays determinate where possible.
pub fn batch_from_paths<E: CopyEngine>(
    engine: &E,
    source_paths: Vec<PathBuf>,
    dest_dir: PathBuf,
) -> BatchRequest {
    let mut file_sizes = HashMap::new();
    for path in &source_paths {
        if let Some(size) = engine.probe_size(path) {
            file_sizes.insert(path.clone(), size);
        }
    }
    BatchRequest {
        source_paths,
        dest_dir,
        file_sizes,
        force_overwrite: false,
    }
}
