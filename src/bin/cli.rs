//! Routemap CLI - endpoint inventory for Java/Kotlin controllers.
//!
//! Usage:
//!   routemap analyze <model.json>            # Full report as JSON
//!   routemap analyze <model.json> --pretty   # Same, indented
//!   routemap conflicts <model.json>          # Duplicate routes, exit 2 if any
//!   routemap stats <model.json>              # Counts only
//!
//! The model is the extractor's JSON: an array of class records.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use routemap::{analyze, AnalysisReport, ClassModel, RoutemapConfig};
use std::path::{Path, PathBuf};
use tracing::info;

/// Exit status when the model contains conflicting routes.
const EXIT_CONFLICTS: i32 = 2;

#[derive(Parser)]
#[command(name = "routemap")]
#[command(about = "Routemap - HTTP route inventory for Spring controllers", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = ".routemap/config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every route and print the report as JSON
    Analyze {
        /// Extractor output (JSON array of classes)
        model: PathBuf,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print conflicting routes; exits with status 2 when there are any
    Conflicts {
        /// Extractor output (JSON array of classes)
        model: PathBuf,
    },

    /// Print class, route and conflict counts
    Stats {
        /// Extractor output (JSON array of classes)
        model: PathBuf,
    },
}

fn main() {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = RoutemapConfig::load(&cli.config);

    match cli.command {
        Commands::Analyze { model, pretty } => {
            let report = load_and_analyze(&model, &config)?;
            let json = if pretty {
                report.to_json_pretty()?
            } else {
                serde_json::to_string(&report).context("failed to encode report")?
            };
            println!("{}", json);
            Ok(0)
        }

        Commands::Conflicts { model } => {
            let report = load_and_analyze(&model, &config)?;
            if !report.has_conflicts() {
                println!("No conflicting routes.");
                return Ok(0);
            }

            println!("Conflicting routes: {}", report.conflicts.len());
            for conflict in &report.conflicts {
                println!();
                println!("  {}", conflict.signature);
                for handler in &conflict.handlers {
                    println!("    - {}", handler);
                }
            }
            Ok(EXIT_CONFLICTS)
        }

        Commands::Stats { model } => {
            let report = load_and_analyze(&model, &config)?;
            let stats = report.stats();
            println!("Routemap - Statistics");
            println!("═════════════════════");
            println!("Classes:     {}", stats.classes);
            println!("Controllers: {}", stats.controllers);
            println!("Routes:      {}", stats.routes);
            println!("Conflicts:   {}", stats.conflicts);
            println!(
                "Diagnostics: {} ({} warnings)",
                stats.diagnostics, stats.warnings
            );
            Ok(0)
        }
    }
}

fn load_and_analyze(model_path: &Path, config: &RoutemapConfig) -> Result<AnalysisReport> {
    let json = std::fs::read_to_string(model_path)
        .with_context(|| format!("failed to read model {}", model_path.display()))?;
    let model = ClassModel::from_json(&json)
        .with_context(|| format!("failed to decode model {}", model_path.display()))?;

    info!(model = %model_path.display(), classes = model.len(), "model loaded");

    let report = analyze(&model.classes, config);
    for diagnostic in &report.diagnostics {
        eprintln!("{}", diagnostic);
    }
    Ok(report)
}
