//! pymood CLI - MOOD metrics for Python projects
//!
//! Analyzes the class hierarchy of a Python codebase and prints a JSON
//! report with the five MOOD ratios and per-class hierarchy statistics.
//!
//! Usage:
//!   pymood [OPTIONS] <PATH>

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;

use pymood::{CompiledConfig, analyze_project, build_report, load_compiled_config, write_report};

/// pymood - MOOD design-quality metrics for Python projects
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project or source file to analyze
    path: PathBuf,

    /// Output file for the report (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit one-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Config file path (default: search for .mood.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show timing information
    #[arg(long)]
    timing: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let total_start = Instant::now();

    // Load configuration file
    let config_path = cli.config.as_ref().unwrap_or(&cli.path);
    let config = match load_compiled_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            if cli.verbose {
                eprintln!("Note: No config file loaded: {}", e);
            }
            CompiledConfig::empty()
        }
    };

    if cli.verbose {
        eprintln!("Analyzing project at '{}'...", cli.path.display());
    }

    let analysis_start = Instant::now();
    let analysis = analyze_project(&cli.path, &config)?;
    let analysis_time = analysis_start.elapsed();

    if cli.verbose {
        eprintln!(
            "Analysis complete: {} files, {} classes",
            analysis.total_files,
            analysis.classes.len()
        );
    }

    let report = build_report(&analysis.classes);

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(stdout()),
    };
    write_report(&report, &mut writer, cli.compact)?;
    writer.flush()?;

    if let Some(path) = &cli.output {
        eprintln!("Report written to: {}", path.display());
    }

    if cli.timing {
        eprintln!(
            "Analysis: {:.2?}, total: {:.2?}",
            analysis_time,
            total_start.elapsed()
        );
    }

    Ok(())
}
