use clap::Args;
use serde_json::Value;

use finsight_core::catalog::{self, Tier};
use finsight_core::report;

use super::Settings;
use crate::input;

/// Arguments for report assembly
#[derive(Args)]
pub struct ReportArgs {
    /// Path to JSON or YAML financial record (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Catalogs to include, comma-separated (default: all)
    #[arg(long, value_delimiter = ',')]
    pub tiers: Vec<String>,
}

pub fn parse_tiers(names: &[String]) -> Result<Vec<Tier>, Box<dyn std::error::Error>> {
    if names.is_empty() {
        return Ok(catalog::enabled_tiers());
    }
    let mut tiers = Vec::new();
    for name in names {
        let tier: Tier = name.trim().parse()?;
        if !tiers.contains(&tier) {
            tiers.push(tier);
        }
    }
    Ok(tiers)
}

pub fn run_report(args: ReportArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let data = input::financial_data(args.input.as_deref())?;
    let config = settings.engine_config()?;
    let tiers = parse_tiers(&args.tiers)?;
    let result = report::build_report(&data, &tiers, &config)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tiers() {
        let names = vec!["Applied".to_string(), "basic".into(), "applied".into()];
        assert_eq!(parse_tiers(&names).unwrap(), vec![Tier::Applied, Tier::Basic]);
        assert_eq!(parse_tiers(&[]).unwrap(), Tier::ALL.to_vec());
        assert!(parse_tiers(&["premium".to_string()]).is_err());
    }
}
