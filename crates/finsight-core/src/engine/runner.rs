//! Catalog runner: evaluate definitions against one record.
//!
//! A failing calculator never aborts the run. Its `DataError` becomes an
//! `unavailable` result for that metric, and results always come back in
//! definition order.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Category, MetricDefinition, Tier, Unit};
use crate::classification::interpretation::unavailable_text;
use crate::classification::{Status, ThresholdTable};
use crate::config::EngineConfig;
use crate::data::{FinancialData, InputValue, Inputs};
use crate::error::{DataError, FinsightError};
use crate::types::{with_metadata, ComputationOutput};
use crate::FinsightResult;

/// One metric evaluated for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// `None` when the metric could not be computed.
    pub value: Option<Decimal>,
    pub formula: String,
    pub interpretation: String,
    pub benchmark: Decimal,
    pub status: Status,
    pub description: String,
    /// `formula | field=value; ... | = value`
    pub calculation: String,
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

/// Evaluation of a single definition, with what the runner needs beyond
/// the public result.
#[derive(Debug, Clone)]
pub(crate) struct Evaluation {
    pub result: AnalysisResult,
    pub inputs: Vec<InputValue>,
    /// The benchmark was not positive, so the status fell back to critical.
    pub benchmark_fallback: bool,
}

/// Benchmark in force for `def`: the record's industry average when
/// configured and present, otherwise the catalog value.
pub fn resolve_benchmark(def: &MetricDefinition, data: &FinancialData, config: &EngineConfig) -> Decimal {
    if config.use_industry_averages {
        if let Some(avg) = data.industry_average(def.id) {
            return avg;
        }
    }
    def.benchmark
}

/// Classify a value, recording `critical` when the benchmark is unusable.
pub(crate) fn status_for(
    def: &MetricDefinition,
    value: Decimal,
    benchmark: Decimal,
    table: &ThresholdTable,
) -> (Status, bool) {
    match table.classify(value, benchmark, def.policy) {
        Ok(status) => (status, false),
        Err(e) => {
            tracing::warn!("{}: {}; recording critical", def.id, e);
            (Status::Critical, true)
        }
    }
}

fn format_trace(formula: &str, inputs: &[InputValue], outcome: &str) -> String {
    let figures = inputs
        .iter()
        .map(|v| {
            let marker = if v.estimated { "~" } else { "" };
            format!("{}={}{}", v.field, marker, v.value.normalize())
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!("{formula} | {figures} | {outcome}")
}

pub(crate) fn evaluate(
    def: &MetricDefinition,
    data: &FinancialData,
    table: &ThresholdTable,
    config: &EngineConfig,
) -> Evaluation {
    let locale = config.locale;
    let benchmark = resolve_benchmark(def, data, config);
    let mut inputs = Inputs::new(data);
    let outcome = (def.calculate)(&mut inputs);
    let used = inputs.into_used();

    match outcome {
        Ok(raw) => {
            let value = raw.round_dp(config.decimal_places);
            let (status, benchmark_fallback) = status_for(def, value, benchmark, table);
            Evaluation {
                result: AnalysisResult {
                    id: def.id.to_string(),
                    name: def.name(locale).to_string(),
                    category: def.category,
                    value: Some(value),
                    formula: def.formula.to_string(),
                    interpretation: def.reading.interpret(def.category, value, locale).to_string(),
                    benchmark,
                    status,
                    description: def.description.to_string(),
                    calculation: format_trace(def.formula, &used, &format!("= {}", value.normalize())),
                    unit: def.unit,
                    error: None,
                },
                inputs: used,
                benchmark_fallback,
            }
        }
        Err(e) => {
            tracing::debug!("{} unavailable: {}", def.id, e);
            Evaluation {
                result: unavailable(def, benchmark, &used, &e, config),
                inputs: used,
                benchmark_fallback: false,
            }
        }
    }
}

fn unavailable(
    def: &MetricDefinition,
    benchmark: Decimal,
    used: &[InputValue],
    error: &DataError,
    config: &EngineConfig,
) -> AnalysisResult {
    let locale = config.locale;
    AnalysisResult {
        id: def.id.to_string(),
        name: def.name(locale).to_string(),
        category: def.category,
        value: None,
        formula: def.formula.to_string(),
        interpretation: unavailable_text(locale).to_string(),
        benchmark,
        status: Status::Unavailable,
        description: def.description.to_string(),
        calculation: format_trace(def.formula, used, &format!("unavailable: {error}")),
        unit: def.unit,
        error: Some(error.to_string()),
    }
}

/// Map `f` over the definitions, on the rayon pool when enabled.
///
/// The index passed to `f` is the definition's position, so per-metric
/// seeds agree between sequential and parallel runs.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub(crate) fn map_definitions<D, T, F>(defs: &[D], parallel: bool, f: F) -> Vec<T>
where
    D: Sync,
    T: Send,
    F: Fn(usize, &D) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        return defs.par_iter().enumerate().map(|(i, d)| f(i, d)).collect();
    }
    defs.iter().enumerate().map(|(i, d)| f(i, d)).collect()
}

/// Evaluate every definition against `data`, in order.
pub fn run_catalog(
    data: &FinancialData,
    definitions: &[&MetricDefinition],
    table: &ThresholdTable,
    config: &EngineConfig,
) -> Vec<AnalysisResult> {
    map_definitions(definitions, config.parallel, |_, def| {
        evaluate(def, data, table, config).result
    })
}

/// Reject records that cannot produce any metric and invalid settings.
pub(crate) fn check_preconditions(data: &FinancialData, config: &EngineConfig) -> FinsightResult<()> {
    config.validate()?;
    if data.figure_count() == 0 {
        return Err(FinsightError::InsufficientData(
            "the record carries no financial figures".into(),
        ));
    }
    if config.parallel && !cfg!(feature = "parallel") {
        tracing::warn!("parallel evaluation requested but the `parallel` feature is disabled");
    }
    Ok(())
}

/// Warnings shared by every tier.
pub(crate) fn run_warnings(evaluations: &[Evaluation]) -> Vec<String> {
    let mut warnings = Vec::new();
    let unavailable = evaluations.iter().filter(|e| !e.result.is_available()).count();
    if unavailable > 0 {
        warnings.push(format!(
            "{unavailable} of {} metrics unavailable from the supplied data",
            evaluations.len()
        ));
    }
    for e in evaluations.iter().filter(|e| e.benchmark_fallback) {
        warnings.push(format!(
            "{}: benchmark {} is not positive; status recorded as critical",
            e.result.id, e.result.benchmark
        ));
    }
    warnings
}

#[derive(Serialize)]
struct RunAssumptions<'a> {
    tier: Tier,
    thresholds: &'a str,
    use_industry_averages: bool,
    decimal_places: u32,
    has_prior_period: bool,
}

fn run_tier(
    tier: Tier,
    data: &FinancialData,
    config: &EngineConfig,
) -> FinsightResult<ComputationOutput<Vec<AnalysisResult>>> {
    let start = Instant::now();
    check_preconditions(data, config)?;
    let definitions = catalog::definitions(tier)?;
    let table = catalog::threshold_table(tier);

    let evaluations = map_definitions(&definitions, config.parallel, |_, def| {
        evaluate(def, data, table, config)
    });
    let warnings = run_warnings(&evaluations);
    let results: Vec<AnalysisResult> = evaluations.into_iter().map(|e| e.result).collect();

    let elapsed = start.elapsed().as_micros() as u64;
    let available = results.iter().filter(|r| r.is_available()).count();
    tracing::info!(
        "{} catalog: {}/{} metrics available in {}us",
        tier,
        available,
        results.len(),
        elapsed
    );

    let assumptions = RunAssumptions {
        tier,
        thresholds: table.name,
        use_industry_averages: config.use_industry_averages,
        decimal_places: config.decimal_places,
        has_prior_period: data.has_prior_period(),
    };
    Ok(with_metadata(
        &format!("{} financial analysis catalog", capitalise(tier.as_str())),
        &assumptions,
        warnings,
        elapsed,
        results,
    ))
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Run the 106-metric basic catalog.
pub fn analyze_basic(
    data: &FinancialData,
    config: &EngineConfig,
) -> FinsightResult<ComputationOutput<Vec<AnalysisResult>>> {
    run_tier(Tier::Basic, data, config)
}

/// Run the 21-metric applied catalog.
pub fn analyze_applied(
    data: &FinancialData,
    config: &EngineConfig,
) -> FinsightResult<ComputationOutput<Vec<AnalysisResult>>> {
    run_tier(Tier::Applied, data, config)
}

#[cfg(all(test, feature = "basic"))]
mod tests {
    use super::*;
    use crate::catalog::basic::BASIC_METRICS;
    use crate::classification::BASIC;
    use crate::types::Locale;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn def(id: &str) -> &'static MetricDefinition {
        BASIC_METRICS.iter().find(|d| d.id == id).unwrap()
    }

    fn eval(id: &str, data: &FinancialData) -> AnalysisResult {
        evaluate(def(id), data, &BASIC, &EngineConfig::default()).result
    }

    #[test]
    fn test_current_ratio_result() {
        let data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            ..Default::default()
        };
        let r = eval("current_ratio", &data);
        assert_eq!(r.value, Some(dec!(2)));
        assert_eq!(r.status, Status::Excellent);
        assert_eq!(
            r.calculation,
            "current_assets / current_liabilities | current_assets=200; current_liabilities=100 | = 2"
        );
        assert!(r.error.is_none());
    }

    #[test]
    fn test_return_on_equity_is_poor_against_fifteen() {
        let data = FinancialData {
            net_income: Some(dec!(100)),
            total_equity: Some(dec!(1000)),
            ..Default::default()
        };
        let r = eval("return_on_equity", &data);
        assert_eq!(r.value, Some(dec!(10)));
        assert_eq!(r.status, Status::Poor);
    }

    #[test]
    fn test_zero_equity_is_unavailable() {
        let data = FinancialData {
            total_liabilities: Some(dec!(500)),
            total_equity: Some(Decimal::ZERO),
            ..Default::default()
        };
        let r = eval("debt_to_equity", &data);
        assert_eq!(r.value, None);
        assert_eq!(r.status, Status::Unavailable);
        assert_eq!(r.interpretation, "Data unavailable");
        assert_eq!(r.error.as_deref(), Some("zero denominator in total liabilities / equity"));
        assert!(r.calculation.ends_with("| unavailable: zero denominator in total liabilities / equity"));
    }

    #[test]
    fn test_industry_average_replaces_benchmark() {
        let mut data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            ..Default::default()
        };
        data.industry_averages.insert("current_ratio".into(), dec!(4));
        let r = eval("current_ratio", &data);
        assert_eq!(r.benchmark, dec!(4));
        // 2 / 4 = 0.5, below every basic band
        assert_eq!(r.status, Status::Critical);

        let config = EngineConfig {
            use_industry_averages: false,
            ..EngineConfig::default()
        };
        let r = evaluate(def("current_ratio"), &data, &BASIC, &config).result;
        assert_eq!(r.benchmark, dec!(2.0));
        assert_eq!(r.status, Status::Excellent);
    }

    #[test]
    fn test_zero_benchmark_falls_back_to_critical() {
        let mut data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            ..Default::default()
        };
        data.industry_averages.insert("current_ratio".into(), Decimal::ZERO);
        let e = evaluate(def("current_ratio"), &data, &BASIC, &EngineConfig::default());
        assert!(e.benchmark_fallback);
        assert_eq!(e.result.status, Status::Critical);
        let warnings = run_warnings(&[e]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("current_ratio: benchmark 0"));
    }

    #[test]
    fn test_arabic_locale() {
        let data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            ..Default::default()
        };
        let config = EngineConfig {
            locale: Locale::Ar,
            ..EngineConfig::default()
        };
        let r = evaluate(def("current_ratio"), &data, &BASIC, &config).result;
        assert_eq!(r.name, "نسبة التداول");
    }

    #[test]
    fn test_empty_record_is_rejected() {
        match analyze_basic(&FinancialData::default(), &EngineConfig::default()) {
            Err(FinsightError::InsufficientData(_)) => {}
            other => panic!("Expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_record_keeps_every_metric() {
        let data = FinancialData {
            revenue: Some(dec!(1000)),
            net_income: Some(dec!(80)),
            ..Default::default()
        };
        let out = analyze_basic(&data, &EngineConfig::default()).unwrap();
        assert_eq!(out.result.len(), BASIC_METRICS.len());
        let net_margin = out.result.iter().find(|r| r.id == "net_margin").unwrap();
        assert_eq!(net_margin.value, Some(dec!(8)));
        assert!(out.warnings[0].contains("metrics unavailable"));
    }

    #[test]
    fn test_run_catalog_preserves_order() {
        let data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            ..Default::default()
        };
        let defs: Vec<&MetricDefinition> = BASIC_METRICS.iter().rev().collect();
        let results = run_catalog(&data, &defs, &BASIC, &EngineConfig::default());
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = defs.iter().map(|d| d.id).collect();
        assert_eq!(ids, expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            net_income: Some(dec!(100)),
            total_equity: Some(dec!(1000)),
            ..Default::default()
        };
        let parallel = EngineConfig {
            parallel: true,
            ..EngineConfig::default()
        };
        let a = analyze_basic(&data, &EngineConfig::default()).unwrap().result;
        let b = analyze_basic(&data, &parallel).unwrap().result;
        assert_eq!(a, b);
    }
}
