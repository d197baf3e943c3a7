use clap::Args;
use serde_json::Value;

use finsight_core::{analyze_advanced, analyze_applied, analyze_basic};

use super::Settings;
use crate::input;

/// Arguments shared by the catalog commands
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML financial record (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluate metrics on the rayon pool
    #[arg(long)]
    pub parallel: bool,

    /// Ignore `industry_averages` in the record and use catalog benchmarks
    #[arg(long)]
    pub static_benchmarks: bool,

    /// Monte Carlo draws per metric (advanced only)
    #[arg(long)]
    pub simulations: Option<u32>,

    /// Monte Carlo seed (advanced only)
    #[arg(long)]
    pub seed: Option<u64>,
}

fn prepare(
    args: &AnalyzeArgs,
    settings: &Settings,
) -> Result<(finsight_core::FinancialData, finsight_core::EngineConfig), Box<dyn std::error::Error>> {
    let data = input::financial_data(args.input.as_deref())?;
    let mut config = settings.engine_config()?;
    config.parallel |= args.parallel;
    if args.static_benchmarks {
        config.use_industry_averages = false;
    }
    if let Some(n) = args.simulations {
        config.monte_carlo.simulations = n;
    }
    if let Some(seed) = args.seed {
        config.monte_carlo.seed = seed;
    }
    Ok((data, config))
}

pub fn run_basic(args: AnalyzeArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let (data, config) = prepare(&args, settings)?;
    let result = analyze_basic(&data, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_applied(args: AnalyzeArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let (data, config) = prepare(&args, settings)?;
    let result = analyze_applied(&data, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_advanced(args: AnalyzeArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let (data, config) = prepare(&args, settings)?;
    let result = analyze_advanced(&data, &config)?;
    Ok(serde_json::to_value(result)?)
}
