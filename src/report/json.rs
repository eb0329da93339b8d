//! JSON report serialization.

use crate::types::{Result, ScanResult};
use std::path::Path;
use tracing::info;

/// Write the scan result as pretty-printed JSON to `path`.
pub fn write_report(result: &ScanResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    info!("report written to {}", path.display());
    Ok(())
}
