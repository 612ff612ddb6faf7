//! Parameter evaluators and the parameter set aggregator.
//!
//! Each evaluator is a pure function `(input, catalog) -> CalculatedParameter`.
//! Failures are attached to the parameter they concern; the aggregator runs
//! every evaluator regardless of what the others produced.

pub mod frontage;
pub mod height;
pub mod setback;

pub use frontage::*;
pub use height::*;
pub use setback::*;

use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{CalculatedParameter, CalculationInput, ParameterName, ParameterSet};

type Evaluator = fn(&CalculationInput, &Catalog) -> CalculatedParameter;

/// Evaluator for each parameter.
pub fn evaluator(name: ParameterName) -> Evaluator {
    match name {
        ParameterName::FrontalSetback => frontal_setback,
        ParameterName::LateralSetback => lateral_setback,
        ParameterName::RearSetback => rear_setback,
        ParameterName::MinimumFrontage => minimum_frontage,
        ParameterName::MaximumHeight => maximum_height,
        ParameterName::DevelopmentLevy => development_levy,
    }
}

/// Evaluate all six parameters against the standard catalog.
pub fn evaluate(input: &CalculationInput) -> ParameterSet {
    evaluate_with(input, Catalog::standard())
}

/// Evaluate all six parameters against `catalog`.
///
/// Total for any well-formed input: the result always holds one entry per
/// `ParameterName`, in `ParameterName::ALL` order.
pub fn evaluate_with(input: &CalculationInput, catalog: &Catalog) -> ParameterSet {
    let mut set = ParameterSet::new(catalog.legislation, input.municipality.clone());
    for name in ParameterName::ALL {
        let parameter = evaluator(name)(input, catalog);
        match &parameter.error {
            Some(err) => debug!(zone = %input.zone, parameter = %name, error = %err, "parameter blocked"),
            None => debug!(zone = %input.zone, parameter = %name, value = ?parameter.value, "parameter resolved"),
        }
        set.insert(parameter);
    }
    set
}
