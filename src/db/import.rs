//! Reading the reference workbook from per-sheet CSV exports.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::models::*;

/// Expected file names, one per workbook sheet, in load order.
pub const WORKBOOK_FILES: [&str; 5] = [
    "pages.csv",
    "etl_tasks.csv",
    "deployment_tasks.csv",
    "managers.csv",
    "developers.csv",
];

/// Read all five sheets from `dir`.
///
/// Columns are matched by the workbook's header names (`Page Name`,
/// `Section IDs`, `Salary Rate per Hour`, ...). Extra columns are ignored.
pub fn read_workbook_dir(dir: &Path) -> Result<RawDataset> {
    let [pages, etl_tasks, deployment_tasks, managers, developers] = WORKBOOK_FILES;

    Ok(RawDataset {
        pages: read_sheet(&dir.join(pages))?,
        etl_tasks: read_sheet(&dir.join(etl_tasks))?,
        deployment_tasks: read_sheet(&dir.join(deployment_tasks))?,
        managers: read_sheet(&dir.join(managers))?,
        developers: read_sheet(&dir.join(developers))?,
    })
}

fn read_sheet<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let rows = reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| {
            // Header is line 1, so the first record is line 2.
            row.with_context(|| format!("{}: bad row at line {}", path.display(), i + 2))
        })
        .collect::<Result<Vec<T>>>()?;

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
