//! Snapshot files handed over by the session store.

use std::path::Path;

use shopfront_core::snapshot::parse_snapshot;
use shopfront_core::NewLineItem;
use tracing::info;

use crate::error::AppResult;

/// Reads a JSON snapshot file into line drafts.
///
/// An empty file is an empty cart.
pub fn load_snapshot_file(path: &Path) -> AppResult<Vec<NewLineItem>> {
    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        info!(?path, "Snapshot file is empty, starting with an empty cart");
        return Ok(Vec::new());
    }

    let drafts = parse_snapshot(&contents)?;
    info!(?path, lines = drafts.len(), "Loaded cart snapshot");
    Ok(drafts)
}
