use napi::Result as NapiResult;
use napi_derive::napi;

use finsight_core::catalog::{self, Category, Tier};
use finsight_core::{EngineConfig, FinancialData, Locale};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_inputs(
    data_json: &str,
    config_json: Option<String>,
) -> NapiResult<(FinancialData, EngineConfig)> {
    let data: FinancialData = serde_json::from_str(data_json).map_err(to_napi_error)?;
    let config: EngineConfig = match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => EngineConfig::default(),
    };
    Ok((data, config))
}

// ---------------------------------------------------------------------------
// Catalog runs
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_basic(data_json: String, config_json: Option<String>) -> NapiResult<String> {
    let (data, config) = parse_inputs(&data_json, config_json)?;
    let output = finsight_core::analyze_basic(&data, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_applied(data_json: String, config_json: Option<String>) -> NapiResult<String> {
    let (data, config) = parse_inputs(&data_json, config_json)?;
    let output = finsight_core::analyze_applied(&data, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_advanced(data_json: String, config_json: Option<String>) -> NapiResult<String> {
    let (data, config) = parse_inputs(&data_json, config_json)?;
    let output = finsight_core::analyze_advanced(&data, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// `tiers` defaults to every catalog.
#[napi]
pub fn build_report(
    data_json: String,
    tiers: Option<Vec<String>>,
    config_json: Option<String>,
) -> NapiResult<String> {
    let (data, config) = parse_inputs(&data_json, config_json)?;
    let tiers: Vec<Tier> = match tiers {
        Some(names) => names
            .iter()
            .map(|n| n.parse::<Tier>())
            .collect::<Result<_, _>>()
            .map_err(to_napi_error)?,
        None => Tier::ALL.to_vec(),
    };
    let output = finsight_core::build_report(&data, &tiers, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Catalog listing
// ---------------------------------------------------------------------------

#[napi]
pub fn list_catalog(
    tier: Option<String>,
    category: Option<String>,
    locale: Option<String>,
) -> NapiResult<String> {
    let tier: Option<Tier> = tier
        .map(|t| t.parse::<Tier>())
        .transpose()
        .map_err(to_napi_error)?;
    let category: Option<Category> = category
        .map(|c| serde_json::from_value(serde_json::Value::String(c)))
        .transpose()
        .map_err(to_napi_error)?;
    let locale: Locale = locale
        .map(|l| l.parse::<Locale>())
        .transpose()
        .map_err(to_napi_error)?
        .unwrap_or_default();
    let metrics = catalog::list(tier, category, locale).map_err(to_napi_error)?;
    serde_json::to_string(&metrics).map_err(to_napi_error)
}
