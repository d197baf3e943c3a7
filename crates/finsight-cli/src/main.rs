mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::agents::AgentsArgs;
use commands::analyze::AnalyzeArgs;
use commands::catalog::CatalogArgs;
use commands::classify::ClassifyArgs;
use commands::report::ReportArgs;

/// Catalog-driven financial statement analysis
#[derive(Parser)]
#[command(
    name = "finsight",
    version,
    about = "Catalog-driven financial statement analysis",
    long_about = "Runs the basic (106), applied (21) and advanced (53) metric catalogs over a \
                  JSON or YAML financial record with decimal precision, classifies every metric \
                  against its benchmark, and assembles scored reports in English or Arabic."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (.json, .yaml or .yml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Output language for names and interpretations (en, ar)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the basic catalog (structure, ratios, cash flow)
    Basic(AnalyzeArgs),
    /// Run the applied catalog (valuation, performance, distress)
    Applied(AnalyzeArgs),
    /// Run the advanced catalog with Monte Carlo and sensitivity
    Advanced(AnalyzeArgs),
    /// Build a scored report across catalogs
    Report(ReportArgs),
    /// Classify a value against a benchmark
    Classify(ClassifyArgs),
    /// List metric definitions
    Catalog(CatalogArgs),
    /// Run the agent panel over a report
    Agents(AgentsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let settings = commands::Settings {
        config: cli.config.clone(),
        locale: cli.locale.clone(),
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Basic(args) => commands::analyze::run_basic(args, &settings),
        Commands::Applied(args) => commands::analyze::run_applied(args, &settings),
        Commands::Advanced(args) => commands::analyze::run_advanced(args, &settings),
        Commands::Report(args) => commands::report::run_report(args, &settings),
        Commands::Classify(args) => commands::classify::run_classify(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args, &settings),
        Commands::Agents(args) => commands::agents::run_agents(args, &settings),
        Commands::Version => {
            println!("finsight {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
