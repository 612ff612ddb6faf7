//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads settings and initialises logging
//! - runs the evaluators, the dependency resolver or a batch
//! - prints reports and writes optional exports

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::catalog::Catalog;
use crate::cli::{BatchArgs, Cli, Command, DepsArgs, EvalArgs};
use crate::config::Settings;
use crate::deps::{missing_fields, resolve_dependencies};
use crate::domain::Locale;
use crate::error::AppError;
use crate::eval::evaluate_with;
use crate::precision::validate_input;

pub mod pipeline;

/// Entry point for the `zoning` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::from_env()?;
    let locale = cli.locale.unwrap_or(settings.locale);
    let catalog = Catalog::standard();
    debug!(legislation = catalog.legislation, ?locale, "starting");

    match cli.command {
        Command::Eval(args) => handle_eval(&args, &settings, locale, catalog),
        Command::Deps(args) => handle_deps(&args, locale, catalog),
        Command::Batch(args) => handle_batch(&args, &settings, locale, catalog),
        Command::Zones => {
            print!("{}", crate::report::format_catalog(catalog));
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn handle_eval(args: &EvalArgs, settings: &Settings, locale: Locale, catalog: &Catalog) -> Result<(), AppError> {
    let input = args.to_input(&settings.municipality);
    validate_input(&input)?;

    let set = evaluate_with(&input, catalog);
    let spec = resolve_dependencies(input.zone, input.nature, catalog);
    let missing = missing_fields(&spec, &input);

    if args.json {
        let json = serde_json::to_string_pretty(&set)
            .map_err(|e| AppError::input(format!("Failed to serialize result: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    print!("{}", crate::report::format_parameter_set(&set, locale));
    let missing = crate::report::format_missing_fields(&missing, locale);
    if !missing.is_empty() {
        println!();
        print!("{missing}");
    }
    Ok(())
}

fn handle_deps(args: &DepsArgs, locale: Locale, catalog: &Catalog) -> Result<(), AppError> {
    let spec = resolve_dependencies(args.zone, args.nature, catalog);

    if args.json {
        let json = serde_json::to_string_pretty(&spec)
            .map_err(|e| AppError::input(format!("Failed to serialize dependencies: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    print!("{}", crate::report::format_dependencies(&spec, locale));
    Ok(())
}

fn handle_batch(args: &BatchArgs, settings: &Settings, locale: Locale, catalog: &Catalog) -> Result<(), AppError> {
    let config = pipeline::BatchConfig {
        input: args.input.clone(),
        default_municipality: settings.municipality.clone(),
    };
    let run = pipeline::run_batch(&config, catalog)?;

    print!(
        "{}",
        crate::report::format_batch_summary(&run.summary, &run.ingest.row_errors)
    );

    if let Some(path) = &args.export {
        crate::io::export::write_results_csv(path, &run.results, locale)?;
        info!(path = %path.display(), "wrote CSV export");
    }
    if let Some(path) = &args.export_json {
        let document = crate::io::export::ResultsFile::new(catalog.legislation, run.results);
        crate::io::export::write_results_json(path, &document)?;
        info!(path = %path.display(), "wrote JSON export");
    }

    Ok(())
}
