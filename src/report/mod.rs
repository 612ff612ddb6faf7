//! Reporting utilities: batch statistics and formatted terminal output.

pub mod format;

pub use format::*;

use std::collections::BTreeMap;

use crate::domain::{ParameterName, ParcelResult};

/// Aggregate counts over a batch of parcel results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub parcels: usize,
    /// Parcels with every parameter resolved.
    pub complete: usize,
    pub resolved: usize,
    pub not_applicable: usize,
    pub blocked: usize,
    /// Blocked parameter count keyed by `ParamError::code()`.
    pub blocked_by_code: BTreeMap<&'static str, usize>,
    /// Blocked count per parameter, in `ParameterName::ALL` order.
    pub blocked_by_parameter: Vec<(ParameterName, usize)>,
}

pub fn summarize(results: &[ParcelResult]) -> BatchSummary {
    let mut summary = BatchSummary {
        parcels: results.len(),
        blocked_by_parameter: ParameterName::ALL.iter().map(|n| (*n, 0)).collect(),
        ..BatchSummary::default()
    };

    for result in results {
        let mut any_blocked = false;
        for p in result.parameters.iter() {
            match &p.error {
                Some(err) => {
                    any_blocked = true;
                    summary.blocked += 1;
                    *summary.blocked_by_code.entry(err.code()).or_default() += 1;
                    if let Some(slot) = summary.blocked_by_parameter.iter_mut().find(|(n, _)| *n == p.name) {
                        slot.1 += 1;
                    }
                }
                None if p.value.is_absent() => summary.not_applicable += 1,
                None => summary.resolved += 1,
            }
        }
        if !any_blocked {
            summary.complete += 1;
        }
    }

    summary
}
