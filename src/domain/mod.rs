//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - closed input enumerations (`ZoneCode`, `BuildingNature`, `LandUse`, `Field`)
//! - the parcel input record (`CalculationInput`)
//! - evaluation outputs (`CalculatedParameter`, `ParameterSet`, `ParamError`)
//! - dependency resolver outputs (`FieldDependencySpec`, `Advisory`, ...)

pub mod fields;
pub mod parameter;
pub mod types;

pub use fields::*;
pub use parameter::*;
pub use types::*;
