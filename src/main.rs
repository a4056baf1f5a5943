//! heredity CLI - posterior gene and trait probabilities for a pedigree
//!
//! Usage:
//!   heredity <data.csv>                      # Text report
//!   heredity <data.csv> --format json        # JSON report
//!   heredity <data.csv> --tables probs.json  # Custom probability tables

use clap::{Parser, ValueEnum};
use heredity::prelude::*;
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "heredity")]
#[command(version)]
#[command(about = "Exact posterior gene and trait probabilities across a family pedigree")]
struct Cli {
    /// Pedigree table with name, mother, father and trait columns
    #[arg(value_name = "DATA")]
    data: PathBuf,

    /// JSON file overriding the default probability tables
    #[arg(long, value_name = "PATH", env = "HEREDITY_TABLES")]
    tables: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let err = HeredityError::Usage(err.to_string());
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    };
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        error!(exit_code = err.exit_code(), "run failed");
        eprintln!("Error: {}", err);
        process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> heredity::Result<()> {
    let tables = match &cli.tables {
        Some(path) => ProbabilityTables::from_path(path)?,
        None => ProbabilityTables::default(),
    };
    let pedigree = Pedigree::from_path(&cli.data, &CsvBuilder::new())?;
    let posteriors = infer(&pedigree, &tables)?;

    match cli.format {
        Format::Text => print!("{}", posteriors),
        Format::Json => println!("{}", posteriors.to_json()?),
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
