//! # Floorwise CLI
//!
//! Terminal front end for the flooring estimator.
//!
//! - `floor_cli quote` (default) walks through the questionnaire
//! - `floor_cli estimate --answers answers.json` estimates without prompting
//! - `floor_cli config` prints the rate table in use
//!
//! `--config rates.json` swaps the built-in rate table for a file.
//! Set `RUST_LOG=debug` (or pass `--verbose`) to see estimator logging.

mod questionnaire;

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use floor_core::answers::Answers;
use floor_core::config::EstimatorConfig;
use floor_core::errors::{EstimateError, EstimateResult};
use floor_core::estimate::estimate;
use floor_core::file_io::{load_answers, load_config};
use floor_core::quote::Quote;
use floor_core::report::render_summary;

use crate::questionnaire::Questionnaire;

#[derive(Parser, Debug)]
#[command(
    name = "floor_cli",
    about = "Estimate the cost of new floors from a few questions",
    version
)]
struct Cli {
    /// Rate table JSON file (defaults to the built-in rates)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log estimator decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer the questionnaire interactively (default command)
    Quote {
        /// Print the full quote as JSON after the summary
        #[arg(long)]
        json: bool,
    },
    /// Estimate from an answers JSON file
    Estimate {
        /// Answers file; missing fields take the questionnaire defaults
        #[arg(long)]
        answers: PathBuf,
        /// Print the result as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Print the rate table as JSON
    Config,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> EstimateResult<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            debug!("using built-in rate table");
            EstimatorConfig::default()
        }
    };

    match cli.command.unwrap_or(Command::Quote { json: false }) {
        Command::Quote { json } => run_questionnaire(&config, json),
        Command::Estimate { answers, json } => {
            let answers = load_answers(&answers)?;
            let result = estimate(&answers, &config);
            if json {
                print_json(&result)
            } else {
                println!("{}", render_summary(&result));
                Ok(())
            }
        }
        Command::Config => print_json(&config),
    }
}

fn run_questionnaire(config: &EstimatorConfig, json: bool) -> EstimateResult<()> {
    println!("Floorwise - Flooring Cost Estimator");
    println!("===================================");
    println!("Press Enter to keep the answer shown in brackets.");

    let answers = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut questionnaire = Questionnaire::new(stdin.lock(), BufWriter::new(stdout.lock()));
        questionnaire.run(Answers::default())
    };

    let missing = answers.contact.missing_fields();
    if !missing.is_empty() {
        info!(missing = ?missing, "questionnaire ended without contact details");
    }
    let quote = Quote::prepare(answers, config)?;

    println!();
    println!("═══════════════════════════════════════");
    println!("  YOUR ESTIMATE IS READY");
    println!("═══════════════════════════════════════");
    println!();
    println!("{}", render_summary(&quote.result));

    if json {
        println!();
        println!("JSON Output:");
        print_json(&quote)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(EstimateError::from)?;
    println!("{}", json);
    Ok(())
}
