//! CSV output writer for export records.

use std::path::Path;

use crate::domain::{AppError, ExportRecord, Result};

/// Write one row per record to a newly created file at `path`, overwriting
/// any existing file. Four columns, no header row. Zero records produce an
/// empty file, not an error.
///
/// # Errors
/// Returns error if the file cannot be created or a row cannot be written.
pub fn write_records(path: &Path, records: &[ExportRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(AppError::csv)?;

    for record in records {
        writer.serialize(record).map_err(AppError::csv)?;
    }

    writer.flush().map_err(|e| AppError::io("Failed to flush CSV file", e))?;

    tracing::debug!(rows = records.len(), path = %path.display(), "Wrote CSV export");
    Ok(())
}
