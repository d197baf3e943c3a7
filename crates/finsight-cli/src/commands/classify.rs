use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use finsight_core::classification::{Policy, ThresholdTable};
use finsight_core::Locale;

/// Arguments for ad-hoc classification
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ClassifyArgs {
    /// Metric value
    #[arg(long)]
    pub value: Decimal,

    /// Benchmark the value is compared against (must be positive)
    #[arg(long)]
    pub benchmark: Decimal,

    /// Directionality: higher, lower or optimal
    #[arg(long, default_value = "higher")]
    pub policy: String,

    /// Threshold table: basic, applied or advanced
    #[arg(long, default_value = "basic")]
    pub table: String,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let policy: Policy = args.policy.parse()?;
    let table = ThresholdTable::by_name(&args.table.to_ascii_lowercase()).ok_or_else(|| {
        format!(
            "Unknown threshold table '{}' (expected basic, applied or advanced)",
            args.table
        )
    })?;
    let status = table.classify(args.value, args.benchmark, policy)?;
    Ok(json!({
        "value": args.value,
        "benchmark": args.benchmark,
        "policy": policy,
        "table": table.name,
        "ratio": args.value.checked_div(args.benchmark).map(|r| r.round_dp(4)),
        "status": status,
        "label_en": status.label(Locale::En),
        "label_ar": status.label(Locale::Ar),
    }))
}
