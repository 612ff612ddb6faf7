//! CSV ingest of parcel batches.
//!
//! Turns a parcel CSV into validated `CalculationInput`s keyed by parcel id.
//!
//! - **Strict schema** for the required columns (exit code 2)
//! - **Row-level validation**: bad rows are skipped and reported, never fatal
//! - **Caller preconditions** (two-decimal measures, known zone codes) are
//!   enforced here so the evaluators only ever see well-formed input

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::{BuildingNature, CalculationInput, ZoneCode};
use crate::error::{AppError, EXIT_EMPTY};
use crate::precision::validate_input;

const REQUIRED_COLUMNS: [&str; 3] = ["parcel_id", "zone", "use"];

/// One usable CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelRow {
    pub id: String,
    pub input: CalculationInput,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct IngestedParcels {
    pub parcels: Vec<ParcelRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedParcels {
    pub fn rows_used(&self) -> usize {
        self.parcels.len()
    }
}

/// Load a parcel CSV from disk.
///
/// Rows without a `municipality` value get `default_municipality`.
pub fn load_parcels(path: &Path, default_municipality: &str) -> Result<IngestedParcels, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let data = ingest_reader(file, default_municipality)?;
    info!(
        path = %path.display(),
        rows_read = data.rows_read,
        rows_used = data.rows_used(),
        row_errors = data.row_errors.len(),
        "parcels loaded"
    );
    Ok(data)
}

/// Ingest parcels from any reader (file, stdin, in-memory buffer).
pub fn ingest_reader<R: Read>(source: R, default_municipality: &str) -> Result<IngestedParcels, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(AppError::input(format!("Missing required column: `{column}`")));
        }
    }

    let mut parcels = Vec::new();
    let mut row_errors = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Line 1 is the header row.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = get_optional(&record, &header_map, "parcel_id").map(str::to_string);
        let parsed = parse_row(&record, &header_map, default_municipality).and_then(|row| {
            if seen_ids.insert(row.id.clone()) {
                Ok(row)
            } else {
                Err(format!("Duplicate parcel_id `{}`.", row.id))
            }
        });

        match parsed {
            Ok(row) => parcels.push(row),
            Err(message) => row_errors.push(RowError { line, id, message }),
        }
    }

    for err in &row_errors {
        warn!(line = err.line, id = err.id.as_deref().unwrap_or("-"), "skipping row: {}", err.message);
    }

    if parcels.is_empty() {
        return Err(AppError::new(EXIT_EMPTY, "No usable parcel rows in the CSV."));
    }

    Ok(IngestedParcels {
        parcels,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    default_municipality: &str,
) -> Result<ParcelRow, String> {
    let id = get_required(record, header_map, "parcel_id")?.to_string();
    let zone: ZoneCode = get_required(record, header_map, "zone")?
        .parse()
        .map_err(|e| format!("{e}"))?;
    let land_use = get_required(record, header_map, "use")?;

    let mut input = CalculationInput::new(zone, land_use);
    input.municipality = get_optional(record, header_map, "municipality")
        .unwrap_or(default_municipality)
        .to_string();
    input.nature = parse_opt::<BuildingNature>(record, header_map, "nature")?;
    input.floors = parse_opt::<u32>(record, header_map, "floors")?;
    input.total_height = parse_opt::<f64>(record, header_map, "total_height")?;
    input.avenue = get_optional(record, header_map, "avenue").map(str::to_string);
    input.crossed_zone = parse_opt::<ZoneCode>(record, header_map, "crossed_zone")?;
    input.built_area = parse_opt::<f64>(record, header_map, "built_area")?;

    validate_input(&input).map_err(|e| e.to_string())?;
    Ok(ParcelRow { id, input })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Blank is `None`; a present value that does not parse is a row error.
fn parse_opt<T>(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional(record, header_map, name)
        .map(|raw| raw.parse::<T>().map_err(|e| format!("Invalid `{name}` value '{raw}': {e}")))
        .transpose()
}
