//! Export batch results to CSV and JSON.
//!
//! The CSV is long-format (one row per parcel and parameter) so it pivots
//! easily in a spreadsheet. The JSON keeps the typed records intact inside a
//! small envelope identifying the tool and legislation.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Locale, ParcelResult};
use crate::error::AppError;

pub const TOOL_NAME: &str = "zoning";

const CSV_HEADER: [&str; 7] = ["parcel_id", "parameter", "value", "unit", "rule", "depends_on", "error"];

/// Top-level JSON export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsFile {
    pub tool: String,
    pub legislation: String,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ParcelResult>,
}

impl ResultsFile {
    pub fn new(legislation: impl Into<String>, results: Vec<ParcelResult>) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            legislation: legislation.into(),
            generated_at: Utc::now(),
            results,
        }
    }
}

/// Write results as long-format CSV to a file.
pub fn write_results_csv(path: &Path, results: &[ParcelResult], locale: Locale) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results_csv_to(file, results, locale)
}

pub fn write_results_csv_to<W: Write>(out: W, results: &[ParcelResult], locale: Locale) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for result in results {
        for p in result.parameters.iter() {
            let value = if p.is_blocked() {
                String::new()
            } else {
                p.display_value(locale)
            };
            let depends_on = p.depends_on.iter().map(|f| f.key()).collect::<Vec<_>>().join(";");
            let error = p.error.as_ref().map(|e| e.localized(locale)).unwrap_or_default();
            writer
                .write_record([
                    result.parcel_id.as_str(),
                    p.name.key(),
                    value.as_str(),
                    p.unit.key(),
                    p.rule.as_str(),
                    depends_on.as_str(),
                    error.as_str(),
                ])
                .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write results as a pretty-printed JSON document.
pub fn write_results_json(path: &Path, document: &ResultsFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, document)
        .map_err(|e| AppError::input(format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

/// Read a JSON document written by `write_results_json`.
pub fn read_results_json(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open results JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid results JSON: {e}")))
}
