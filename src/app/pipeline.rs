//! Shared batch pipeline.
//!
//! CSV ingest -> per-parcel evaluation (parallel) -> missing-field check ->
//! summary. The CLI only decides what to print and where to export.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::info;

use crate::catalog::Catalog;
use crate::deps::{missing_fields, resolve_dependencies};
use crate::domain::ParcelResult;
use crate::error::AppError;
use crate::eval::evaluate_with;
use crate::io::ingest::{IngestedParcels, ParcelRow, load_parcels};
use crate::report::{BatchSummary, summarize};

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input: PathBuf,
    /// Applied to rows with a blank `municipality`.
    pub default_municipality: String,
}

/// All computed outputs of a single `zoning batch` run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub ingest: IngestedParcels,
    pub results: Vec<ParcelResult>,
    pub summary: BatchSummary,
}

pub fn run_batch(config: &BatchConfig, catalog: &Catalog) -> Result<BatchOutput, AppError> {
    let ingest = load_parcels(&config.input, &config.default_municipality)?;
    let results = evaluate_parcels(&ingest.parcels, catalog);
    let summary = summarize(&results);
    info!(
        parcels = summary.parcels,
        complete = summary.complete,
        blocked = summary.blocked,
        "batch evaluated"
    );

    Ok(BatchOutput {
        ingest,
        results,
        summary,
    })
}

/// Evaluate parcels in parallel. Output order matches input order.
pub fn evaluate_parcels(parcels: &[ParcelRow], catalog: &Catalog) -> Vec<ParcelResult> {
    parcels
        .par_iter()
        .map(|row| {
            let spec = resolve_dependencies(row.input.zone, row.input.nature, catalog);
            ParcelResult {
                parcel_id: row.id.clone(),
                parameters: evaluate_with(&row.input, catalog),
                missing_fields: missing_fields(&spec, &row.input),
            }
        })
        .collect()
}
