use std::io;
use std::path::PathBuf;

use clap::Parser;
use em_weeks::config;
use em_weeks::io::{write_csv, write_report, write_stats};
use em_weeks::simulation::extract;

/// Per-unit-length R and L matrices of a multiconductor cross-section
#[derive(Parser)]
#[command(name = "em-weeks", version)]
struct Cli {
    /// YAML file describing the return conductor and signal lines
    input: PathBuf,

    /// Override the operating frequency in hertz
    #[arg(long)]
    frequency: Option<f64>,

    /// Print one CSV row per conductor pair instead of the tables
    #[arg(long)]
    csv: bool,

    /// Print sizes and timings to stderr
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load_yaml_file(&cli.input).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", cli.input.display(), e);
        std::process::exit(1);
    });
    if let Some(frequency) = cli.frequency {
        config.frequency = frequency;
    }

    let result = extract(&config).unwrap_or_else(|e| {
        eprintln!("Extraction error: {}", e);
        std::process::exit(1);
    });

    let stdout = io::stdout().lock();
    let written = if cli.csv {
        write_csv(stdout, &result)
    } else {
        write_report(stdout, &result)
    };
    written.unwrap_or_else(|e| {
        eprintln!("Output error: {}", e);
        std::process::exit(1);
    });

    if cli.stats {
        write_stats(io::stderr().lock(), &result).unwrap_or_else(|e| {
            eprintln!("Output error: {}", e);
            std::process::exit(1);
        });
    }
}
