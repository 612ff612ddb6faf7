//! Command-line parsing for the zoning parameter calculator.
//!
//! Argument parsing and command dispatch stay separate from the evaluators
//! and the dependency resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BuildingNature, CalculationInput, Locale, ZoneCode};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "zoning", version, about = "Urban zoning parameter calculator (Sorriso/MT, LC 108/2009)")]
pub struct Cli {
    /// Output language. Overrides `ZONING_LOCALE`.
    #[arg(long, global = true, value_enum)]
    pub locale: Option<Locale>,

    /// Debug-level logging (unless `RUST_LOG` says otherwise).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate all six parameters for one parcel.
    Eval(EvalArgs),
    /// Show the form fields a zone (and nature) requires.
    Deps(DepsArgs),
    /// Evaluate every parcel in a CSV file.
    Batch(BatchArgs),
    /// List the zone codes and the catalog tables each one appears in.
    Zones,
}

#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    /// Zone code (e.g. ZC1, ZCT2).
    #[arg(short, long)]
    pub zone: ZoneCode,

    /// Land use: residential or commercial.
    #[arg(short = 'u', long = "use")]
    pub land_use: String,

    #[arg(short, long, value_enum)]
    pub nature: Option<BuildingNature>,

    /// Number of floors.
    #[arg(short, long)]
    pub floors: Option<u32>,

    /// Total building height in meters.
    #[arg(long)]
    pub height: Option<f64>,

    /// Avenue the parcel fronts.
    #[arg(short, long)]
    pub avenue: Option<String>,

    /// Zone crossed by a transition zone parcel.
    #[arg(long)]
    pub crossed_zone: Option<ZoneCode>,

    /// Built area in square meters.
    #[arg(long)]
    pub built_area: Option<f64>,

    /// Municipality. Overrides `ZONING_MUNICIPALITY`.
    #[arg(long)]
    pub municipality: Option<String>,

    /// Print the parameter set as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl EvalArgs {
    /// Build the evaluator input, falling back to `default_municipality`.
    pub fn to_input(&self, default_municipality: &str) -> CalculationInput {
        CalculationInput {
            zone: self.zone,
            land_use: self.land_use.clone(),
            municipality: self
                .municipality
                .clone()
                .unwrap_or_else(|| default_municipality.to_string()),
            floors: self.floors,
            total_height: self.height,
            avenue: self.avenue.clone(),
            nature: self.nature,
            crossed_zone: self.crossed_zone,
            built_area: self.built_area,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct DepsArgs {
    #[arg(short, long)]
    pub zone: ZoneCode,

    #[arg(short, long, value_enum)]
    pub nature: Option<BuildingNature>,

    /// Print the dependency spec as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Parcel CSV (columns: parcel_id, zone, use, and optional inputs).
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Export results to long-format CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export results to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn eval_parses_all_inputs() {
        let cli = Cli::try_parse_from([
            "zoning",
            "--locale",
            "pt-br",
            "eval",
            "--zone",
            "zct2",
            "--use",
            "residential",
            "--nature",
            "allotment-with-condominium",
            "--floors",
            "4",
            "--height",
            "12.5",
            "--avenue",
            "Av. Brasil",
            "--crossed-zone",
            "ZI1",
        ])
        .unwrap();

        assert_eq!(cli.locale, Some(Locale::PtBr));
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        let input = args.to_input("SORRISO");
        assert_eq!(input.zone, ZoneCode::Zct2);
        assert_eq!(input.nature, Some(BuildingNature::AllotmentWithCondominium));
        assert_eq!(input.floors, Some(4));
        assert_eq!(input.total_height, Some(12.5));
        assert_eq!(input.crossed_zone, Some(ZoneCode::Zi1));
        assert_eq!(input.municipality, "SORRISO");
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = Cli::try_parse_from(["zoning", "deps", "--zone", "ZX1"]).unwrap_err();
        assert!(err.to_string().contains("ZX1"));
    }

    #[test]
    fn global_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from(["zoning", "zones", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Zones));
    }
}
