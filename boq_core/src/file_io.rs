//! # File I/O Module
//!
//! Reading and writing estimate files:
//! - **Atomic saves**: write to `<name>.tmp`, sync, rename over the target
//! - **Exports**: a self-contained JSON report with summary and totals
//!
//! Estimates are plain JSON snapshots with no schema version. Fields added
//! later fall back to their defaults on load.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boq_core::estimate::Estimate;
//! use boq_core::file_io::{load_estimate, save_estimate};
//! use std::path::Path;
//!
//! let estimate = Estimate::new("Duplex");
//! save_estimate(&estimate, Path::new("duplex.json"))?;
//! let loaded = load_estimate(Path::new("duplex.json"))?;
//! assert_eq!(loaded.project_name, "Duplex");
//! # Ok::<(), boq_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::ProjectTotals;
use crate::errors::{CalcError, CalcResult};
use crate::estimate::{ClientInfo, Estimate, EstimateEntry, ProjectSummary};
use crate::rates::EstimationRates;

/// Exported estimate report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateExport {
    pub project_name: String,
    pub summary: ProjectSummary,
    pub totals: ProjectTotals,
    pub items: Vec<EstimateEntry>,
    pub rates: EstimationRates,
    pub client: ClientInfo,
    pub exported_at: DateTime<Utc>,
}

impl EstimateExport {
    pub fn from_estimate(estimate: &Estimate) -> Self {
        EstimateExport {
            project_name: estimate.project_name.clone(),
            summary: estimate.summary(),
            totals: estimate.totals(),
            items: estimate.items.clone(),
            rates: estimate.rates.clone(),
            client: estimate.client.clone(),
            exported_at: Utc::now(),
        }
    }
}

/// Save an estimate with atomic write semantics.
///
/// The file is written to a sibling `.tmp` file, synced, then renamed over
/// `path`, so an interrupted save never leaves a truncated estimate.
pub fn save_estimate(estimate: &Estimate, path: &Path) -> CalcResult<()> {
    write_json_atomic(estimate, path)?;
    tracing::info!(path = %path.display(), items = estimate.item_count(), "saved estimate");
    Ok(())
}

/// Load an estimate snapshot.
///
/// # Errors
///
/// * `FileError` - file cannot be read
/// * `SerializationError` - file is not a valid estimate
pub fn load_estimate(path: &Path) -> CalcResult<Estimate> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let estimate: Estimate = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid estimate in {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), items = estimate.item_count(), "loaded estimate");
    Ok(estimate)
}

/// Write an export report for `estimate` to `path`.
///
/// Use [`Estimate::export_file_name`] for the conventional file name.
pub fn export_estimate(estimate: &Estimate, path: &Path) -> CalcResult<EstimateExport> {
    let export = EstimateExport::from_estimate(estimate);
    write_json_atomic(&export, path)?;
    tracing::info!(path = %path.display(), "exported estimate");
    Ok(export)
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// `estimate.json` -> `estimate.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
