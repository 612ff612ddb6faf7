//! `zoning-params` library crate.
//!
//! Computes the urban parameters a parcel must respect (setbacks, minimum
//! frontage, maximum height, development levy) from its zone and building
//! data, and tells a form which fields it needs before evaluation.
//!
//! The binary (`zoning`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the evaluators can be embedded in other front-ends unchanged

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod deps;
pub mod domain;
pub mod error;
pub mod eval;
pub mod io;
pub mod precision;
pub mod report;
