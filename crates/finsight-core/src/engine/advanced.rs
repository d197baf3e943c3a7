//! Advanced tier: runner results decorated with model confidence, a seeded
//! Monte Carlo stability estimate and per-input sensitivity.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use super::runner::{self, AnalysisResult, Evaluation};
use crate::catalog::advanced::ADVANCED_METRICS;
use crate::catalog::{self, AdvancedDefinition, MetricDefinition, Tier};
use crate::classification::{Status, ThresholdTable};
use crate::config::EngineConfig;
use crate::data::{FinancialData, Inputs, Shocks};
use crate::error::FinsightError;
use crate::math::{growth, HUNDRED};
use crate::types::{with_metadata, ComputationOutput};
use crate::FinsightResult;

/// Confidence deducted per figure the engine had to reconstruct.
const DERIVED_INPUT_PENALTY: Decimal = dec!(5);
const SIGNIFICANCE_CAP: Decimal = dec!(10);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityFactor {
    /// Input field name as it appears in the calculation trace.
    pub factor: String,
    /// Percent change of the metric when the input is bumped.
    pub impact: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAnalysisResult {
    #[serde(flatten)]
    pub base: AnalysisResult,
    /// 0-100.
    pub confidence: Decimal,
    pub model_accuracy: Option<Decimal>,
    pub statistical_significance: Option<Decimal>,
    /// Percent of simulated draws classified average or better.
    pub monte_carlo_probability: Option<Decimal>,
    pub sensitivity: Vec<SensitivityFactor>,
}

// ---------------------------------------------------------------------------
// Decorations
// ---------------------------------------------------------------------------

fn confidence(def: &AdvancedDefinition, derived_inputs: usize) -> Decimal {
    let penalty = DERIVED_INPUT_PENALTY * Decimal::from(derived_inputs);
    (def.profile.base_confidence - penalty).clamp(Decimal::ZERO, HUNDRED)
}

/// Bump each reported input by `bump` and measure the metric's response.
fn sensitivity(
    def: &MetricDefinition,
    data: &FinancialData,
    value: Decimal,
    fields: &[&'static str],
    config: &EngineConfig,
) -> Vec<SensitivityFactor> {
    let multiplier = Decimal::ONE + config.sensitivity_bump;
    let mut factors: Vec<SensitivityFactor> = fields
        .iter()
        .filter_map(|field| {
            let shocks: Shocks = [(*field, multiplier)].into_iter().collect();
            let bumped = (def.calculate)(&mut Inputs::with_shocks(data, &shocks)).ok()?;
            let impact = growth(bumped, value, "sensitivity").ok()?;
            Some(SensitivityFactor {
                factor: field.to_string(),
                impact: impact.round_dp(config.decimal_places),
            })
        })
        .collect();
    factors.sort_by(|a, b| b.impact.abs().cmp(&a.impact.abs()));
    factors
}

struct Simulation {
    probability: Decimal,
    significance: Option<Decimal>,
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Re-run the calculator with every reported input multiplied by a draw
/// from `shock`. Draws whose calculation fails count as below average.
#[allow(clippy::too_many_arguments)]
fn simulate(
    def: &MetricDefinition,
    data: &FinancialData,
    value: Decimal,
    benchmark: Decimal,
    fields: &[&'static str],
    table: &ThresholdTable,
    shock: &Normal,
    config: &EngineConfig,
    index: usize,
) -> Simulation {
    let mc = &config.monte_carlo;
    let mut rng = StdRng::seed_from_u64(mc.seed.wrapping_add(index as u64));
    let mut favourable = 0u32;
    let mut draws: Vec<f64> = Vec::with_capacity(mc.simulations as usize);

    for _ in 0..mc.simulations {
        let shocks: Shocks = fields
            .iter()
            .map(|field| {
                let m: f64 = rng.sample(shock);
                (*field, Decimal::from_f64(m).unwrap_or(Decimal::ONE))
            })
            .collect();
        let Ok(raw) = (def.calculate)(&mut Inputs::with_shocks(data, &shocks)) else {
            continue;
        };
        let drawn = raw.round_dp(config.decimal_places);
        if let Ok(status) = table.classify(drawn, benchmark, def.policy) {
            if status >= Status::Average {
                favourable += 1;
            }
        }
        if let Some(v) = drawn.to_f64() {
            draws.push(v);
        }
    }

    let probability = (Decimal::from(favourable) * HUNDRED / Decimal::from(mc.simulations))
        .round_dp(config.decimal_places);
    let spread = std_dev(&draws);
    let significance = if spread.is_finite() && spread > f64::EPSILON {
        // A quotient too large to represent is past the cap anyway.
        Decimal::from_f64(spread).map(|sd| {
            value
                .saturating_sub(benchmark)
                .abs()
                .checked_div(sd)
                .unwrap_or(SIGNIFICANCE_CAP)
                .min(SIGNIFICANCE_CAP)
                .round_dp(config.decimal_places)
        })
    } else {
        None
    };
    Simulation {
        probability,
        significance,
    }
}

fn decorate(
    def: &AdvancedDefinition,
    evaluation: &Evaluation,
    data: &FinancialData,
    table: &ThresholdTable,
    shock: &Normal,
    config: &EngineConfig,
    index: usize,
) -> AdvancedAnalysisResult {
    let base = evaluation.result.clone();
    let Some(value) = base.value else {
        return AdvancedAnalysisResult {
            base,
            confidence: Decimal::ZERO,
            model_accuracy: def.profile.model_accuracy,
            statistical_significance: None,
            monte_carlo_probability: None,
            sensitivity: Vec::new(),
        };
    };

    let fields: Vec<&'static str> = evaluation
        .inputs
        .iter()
        .filter(|v| !v.estimated)
        .map(|v| v.field)
        .collect();
    let derived = evaluation.inputs.len() - fields.len();
    let sim = simulate(
        &def.metric,
        data,
        value,
        base.benchmark,
        &fields,
        table,
        shock,
        config,
        index,
    );

    AdvancedAnalysisResult {
        confidence: confidence(def, derived),
        model_accuracy: def.profile.model_accuracy,
        statistical_significance: sim.significance,
        monte_carlo_probability: Some(sim.probability),
        sensitivity: sensitivity(&def.metric, data, value, &fields, config),
        base,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the 53-metric advanced catalog.
pub fn analyze_advanced(
    data: &FinancialData,
    config: &EngineConfig,
) -> FinsightResult<ComputationOutput<Vec<AdvancedAnalysisResult>>> {
    let start = Instant::now();
    runner::check_preconditions(data, config)?;
    let table = catalog::threshold_table(Tier::Advanced);
    let shock = Normal::new(1.0, config.monte_carlo.shock_std_dev).map_err(|e| {
        FinsightError::InvalidInput {
            field: "monte_carlo.shock_std_dev".into(),
            reason: format!("Invalid Normal parameters: {e}"),
        }
    })?;

    let evaluated: Vec<(Evaluation, AdvancedAnalysisResult)> =
        runner::map_definitions(ADVANCED_METRICS, config.parallel, |index, def| {
            let evaluation = runner::evaluate(&def.metric, data, table, config);
            let result = decorate(def, &evaluation, data, table, &shock, config, index);
            (evaluation, result)
        });
    let (evaluations, results): (Vec<_>, Vec<_>) = evaluated.into_iter().unzip();
    let mut warnings = runner::run_warnings(&evaluations);

    let low_confidence = results
        .iter()
        .filter(|r| r.base.is_available() && r.confidence < dec!(50))
        .count();
    if low_confidence > 0 {
        warnings.push(format!(
            "{low_confidence} metrics rely on several reconstructed figures (confidence below 50)"
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let available = results.iter().filter(|r| r.base.is_available()).count();
    tracing::info!(
        "advanced catalog: {}/{} metrics available, {} simulations each, in {}us",
        available,
        results.len(),
        config.monte_carlo.simulations,
        elapsed
    );

    Ok(with_metadata(
        "Advanced financial analysis catalog with seeded Monte Carlo and sensitivity",
        &serde_json::json!({
            "tier": Tier::Advanced,
            "thresholds": table.name,
            "simulations": config.monte_carlo.simulations,
            "seed": config.monte_carlo.seed,
            "shock_std_dev": config.monte_carlo.shock_std_dev,
            "sensitivity_bump": config.sensitivity_bump,
            "use_industry_averages": config.use_industry_averages,
        }),
        warnings,
        elapsed,
        results,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn company() -> FinancialData {
        FinancialData {
            total_assets: Some(dec!(1000)),
            current_assets: Some(dec!(400)),
            cash: Some(dec!(100)),
            accounts_receivable: Some(dec!(120)),
            inventory: Some(dec!(150)),
            fixed_assets: Some(dec!(500)),
            total_liabilities: Some(dec!(500)),
            current_liabilities: Some(dec!(200)),
            short_term_debt: Some(dec!(50)),
            long_term_debt: Some(dec!(250)),
            total_equity: Some(dec!(500)),
            retained_earnings: Some(dec!(300)),
            revenue: Some(dec!(1200)),
            cost_of_goods_sold: Some(dec!(700)),
            selling_general_admin: Some(dec!(200)),
            depreciation_amortisation: Some(dec!(60)),
            operating_income: Some(dec!(240)),
            interest_expense: Some(dec!(30)),
            income_tax: Some(dec!(50)),
            net_income: Some(dec!(160)),
            operating_cash_flow: Some(dec!(220)),
            capital_expenditure: Some(dec!(-80)),
            dividends_paid: Some(dec!(-40)),
            share_price: Some(dec!(25)),
            shares_outstanding: Some(dec!(100)),
            beta: Some(dec!(1.2)),
            risk_free_rate: Some(dec!(0.04)),
            market_return: Some(dec!(0.09)),
            expected_growth_rate: Some(dec!(0.05)),
            stock_return: Some(dec!(0.12)),
            return_volatility: Some(dec!(0.25)),
            market_volatility: Some(dec!(0.18)),
            ..Default::default()
        }
    }

    fn small_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.monte_carlo.simulations = 50;
        config
    }

    #[test]
    fn test_result_count_and_order() {
        let out = analyze_advanced(&company(), &small_config()).unwrap();
        let ids: Vec<&str> = out.result.iter().map(|r| r.base.id.as_str()).collect();
        let expected: Vec<&str> = ADVANCED_METRICS.iter().map(|d| d.metric.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = analyze_advanced(&company(), &small_config()).unwrap().result;
        let b = analyze_advanced(&company(), &small_config()).unwrap().result;
        assert_eq!(a, b);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_advanced_matches_sequential() {
        let sequential = small_config();
        let parallel = EngineConfig {
            parallel: true,
            ..small_config()
        };
        let a = analyze_advanced(&company(), &sequential).unwrap().result;
        let b = analyze_advanced(&company(), &parallel).unwrap().result;
        assert_eq!(a, b);
        assert!(b.iter().any(|r| r.monte_carlo_probability.is_some()));
    }

    #[test]
    fn test_decorations_in_range() {
        let out = analyze_advanced(&company(), &small_config()).unwrap();
        for r in out.result.iter().filter(|r| r.base.is_available()) {
            assert!(r.confidence >= Decimal::ZERO && r.confidence <= HUNDRED, "{}", r.base.id);
            let p = r.monte_carlo_probability.unwrap();
            assert!(p >= Decimal::ZERO && p <= HUNDRED, "{}", r.base.id);
            if let Some(z) = r.statistical_significance {
                assert!(z >= Decimal::ZERO && z <= SIGNIFICANCE_CAP, "{}", r.base.id);
            }
            for pair in r.sensitivity.windows(2) {
                assert!(pair[0].impact.abs() >= pair[1].impact.abs());
            }
        }
    }

    #[test]
    fn test_unavailable_metric_has_no_decorations() {
        let data = FinancialData {
            revenue: Some(dec!(100)),
            ..Default::default()
        };
        let out = analyze_advanced(&data, &small_config()).unwrap();
        let merton = out
            .result
            .iter()
            .find(|r| r.base.id == "merton_distance_to_default")
            .unwrap();
        assert_eq!(merton.base.status, Status::Unavailable);
        assert_eq!(merton.confidence, Decimal::ZERO);
        assert!(merton.monte_carlo_probability.is_none());
        assert!(merton.sensitivity.is_empty());
    }

    #[test]
    fn test_confidence_deducts_derived_inputs() {
        let def = &ADVANCED_METRICS[0];
        let base = def.profile.base_confidence;
        assert_eq!(confidence(def, 0), base);
        assert_eq!(confidence(def, 2), base - dec!(10));
        assert_eq!(confidence(def, 100), Decimal::ZERO);
    }

    #[test]
    fn test_sensitivity_of_linear_metric() {
        // Equity risk premium moves with the market return only.
        let def = ADVANCED_METRICS
            .iter()
            .find(|d| d.metric.id == "equity_risk_premium")
            .unwrap();
        let data = company();
        let value = (def.metric.calculate)(&mut Inputs::new(&data)).unwrap();
        let factors = sensitivity(
            &def.metric,
            &data,
            value,
            &["market_return", "risk_free_rate"],
            &EngineConfig::default(),
        );
        assert_eq!(factors[0].factor, "market_return");
        assert!(factors[0].impact > Decimal::ZERO);
        assert!(factors[1].impact < Decimal::ZERO);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[1.0]), 0.0);
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.138).abs() < 1e-3);
    }
}
