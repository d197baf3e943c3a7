use clap::Args;
use serde_json::{json, Value};

use finsight_core::catalog::{self, Category, Tier};

use super::Settings;

/// Arguments for catalog listing
#[derive(Args)]
pub struct CatalogArgs {
    /// Restrict to one catalog: basic, applied or advanced
    #[arg(long)]
    pub tier: Option<String>,

    /// Restrict to one category, e.g. liquidity or credit_risk
    #[arg(long)]
    pub category: Option<String>,

    /// Print per-category counts instead of definitions
    #[arg(long)]
    pub counts: bool,
}

fn parse_category(name: &str) -> Result<Category, Box<dyn std::error::Error>> {
    serde_json::from_value(Value::String(name.trim().to_ascii_lowercase()))
        .map_err(|_| format!("Unknown category '{name}'").into())
}

pub fn run_catalog(args: CatalogArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let locale = settings.locale()?.unwrap_or_default();
    let tier: Option<Tier> = args.tier.as_deref().map(str::parse).transpose()?;

    if args.counts {
        let tiers = match tier {
            Some(t) => vec![t],
            None => catalog::enabled_tiers(),
        };
        let mut counts = serde_json::Map::new();
        for t in tiers {
            counts.insert(
                t.to_string(),
                serde_json::to_value(catalog::category_counts(t, locale)?)?,
            );
        }
        return Ok(json!({ "result": counts }));
    }

    let category = args.category.as_deref().map(parse_category).transpose()?;
    let metrics = catalog::list(tier, category, locale)?;
    Ok(json!({ "result": metrics }))
}
