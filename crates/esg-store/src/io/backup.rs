//! Report backup files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use esg_model::ReportId;

use crate::error::{Result, StoreError};
use crate::medium::StorageMedium;
use crate::store::ReportStore;

/// Write the export of `report_id` to `path`.
///
/// Uses atomic write (temp file + rename) so an interrupted export never
/// leaves a truncated backup behind.
pub fn export_to_file<M: StorageMedium>(
    store: &ReportStore<M>,
    report_id: &ReportId,
    path: &Path,
) -> Result<()> {
    let text = store.export_report_data(report_id)?;

    // Create parent directory if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(text.as_bytes()).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(report_id = %report_id, "Exported report to {}", path.display());
    Ok(())
}

/// Import `report_id` from a backup file written by [`export_to_file`].
///
/// Returns `Ok(false)` if the file content is rejected (see
/// [`ReportStore::import_report_data`]).
pub fn import_from_file<M: StorageMedium>(
    store: &ReportStore<M>,
    report_id: &ReportId,
    path: &Path,
) -> Result<bool> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let imported = store.import_report_data(report_id, &text)?;
    if imported {
        tracing::info!(report_id = %report_id, "Imported report from {}", path.display());
    }
    Ok(imported)
}

/// Export asynchronously.
///
/// Spawns the export on a blocking thread pool; the returned future
/// completes only after the file is written (or the write failed).
pub async fn export_to_file_async<M: StorageMedium + 'static>(
    store: Arc<ReportStore<M>>,
    report_id: ReportId,
    path: PathBuf,
) -> Result<()> {
    tokio::task::spawn_blocking(move || export_to_file(&store, &report_id, &path))
        .await
        .map_err(|source| StoreError::TaskFailed { source })?
}

/// Import asynchronously.
///
/// Spawns the import on a blocking thread pool; the returned future
/// completes only after the aggregate is persisted (or rejected).
pub async fn import_from_file_async<M: StorageMedium + 'static>(
    store: Arc<ReportStore<M>>,
    report_id: ReportId,
    path: PathBuf,
) -> Result<bool> {
    tokio::task::spawn_blocking(move || import_from_file(&store, &report_id, &path))
        .await
        .map_err(|source| StoreError::TaskFailed { source })?
}
