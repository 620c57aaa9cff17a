use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use kra_ranker::config::ScoringConfig;
use kra_ranker::reporter::cli::CliReporter;
use kra_ranker::reporter::json::JsonReporter;
use kra_ranker::reporter::{score_only, Reporter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Cli,
    Json,
}

#[derive(Parser)]
#[command(
    name = "kra-ranker",
    version,
    about = "Score faculty evaluation applications and resolve their attainable rank"
)]
struct Cli {
    /// JSON file holding an array of applications
    applications: PathBuf,

    /// Scoring tables (defaults to ./kra-ranker.toml, then the built-in reference tables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Cli)]
    format: Format,

    /// Only output each application's final score
    #[arg(long)]
    score: bool,

    /// Write the finalized application records to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show the per-KRA breakdown
    #[arg(long, short)]
    verbose: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = kra_ranker::telemetry::init(&cli.log_level) {
        eprintln!("Error: {e}");
        process::exit(2);
    }

    let config = match &cli.config {
        Some(path) => ScoringConfig::from_file(path),
        None => ScoringConfig::load(Path::new(".")),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let started = Instant::now();
    let result = match kra_ranker::engine::run(&cli.applications, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    let elapsed = started.elapsed();

    if let Some(output) = &cli.output {
        if let Err(e) = kra_ranker::engine::write_applications(output, &result) {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }

    let rendered = if cli.score {
        score_only(&result)
    } else {
        match cli.format {
            Format::Cli => CliReporter.format(&result, cli.verbose, elapsed),
            Format::Json => JsonReporter.format(&result, cli.verbose, elapsed),
        }
    };
    print!("{rendered}");

    if !result.all_succeeded() {
        process::exit(1);
    }
}
