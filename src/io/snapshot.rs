use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::models::AnalysisSnapshot;

/// Reads one crawler snapshot from a JSON file.
pub async fn load_snapshot(path: &Path) -> Result<AnalysisSnapshot> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: AnalysisSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

    debug!(domain = %snapshot.domain, pages = snapshot.pages.len(), "snapshot loaded");
    Ok(snapshot)
}
