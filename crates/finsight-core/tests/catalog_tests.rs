use finsight_core::catalog::{self, Category, Tier};
use finsight_core::classification::{classify, Policy, Status, ADVANCED, APPLIED, BASIC};
use finsight_core::data::{CompanyInfo, FinancialData};
use finsight_core::{analyze_advanced, analyze_applied, analyze_basic, EngineConfig, Locale};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn manufacturer() -> FinancialData {
    let prior = FinancialData {
        total_assets: Some(dec!(920)),
        current_assets: Some(dec!(360)),
        accounts_receivable: Some(dec!(110)),
        fixed_assets: Some(dec!(470)),
        total_liabilities: Some(dec!(480)),
        current_liabilities: Some(dec!(190)),
        long_term_debt: Some(dec!(260)),
        total_equity: Some(dec!(440)),
        revenue: Some(dec!(1100)),
        cost_of_goods_sold: Some(dec!(660)),
        selling_general_admin: Some(dec!(190)),
        depreciation_amortisation: Some(dec!(55)),
        operating_income: Some(dec!(210)),
        net_income: Some(dec!(140)),
        operating_cash_flow: Some(dec!(190)),
        shares_outstanding: Some(dec!(100)),
        ..Default::default()
    };
    FinancialData {
        company: Some(CompanyInfo {
            name: "Acme Industrial".into(),
            sector: Some("Industrials".into()),
            currency: Some("USD".into()),
            period: Some("FY2025".into()),
        }),
        total_assets: Some(dec!(1000)),
        current_assets: Some(dec!(400)),
        cash: Some(dec!(100)),
        marketable_securities: Some(dec!(20)),
        accounts_receivable: Some(dec!(120)),
        inventory: Some(dec!(150)),
        prepaid_expenses: Some(dec!(10)),
        fixed_assets: Some(dec!(500)),
        intangible_assets: Some(dec!(60)),
        goodwill: Some(dec!(40)),
        total_liabilities: Some(dec!(500)),
        current_liabilities: Some(dec!(200)),
        accounts_payable: Some(dec!(90)),
        short_term_debt: Some(dec!(50)),
        long_term_debt: Some(dec!(250)),
        total_equity: Some(dec!(500)),
        retained_earnings: Some(dec!(300)),
        revenue: Some(dec!(1200)),
        cost_of_goods_sold: Some(dec!(700)),
        operating_expenses: Some(dec!(260)),
        selling_general_admin: Some(dec!(200)),
        research_development: Some(dec!(40)),
        depreciation_amortisation: Some(dec!(60)),
        operating_income: Some(dec!(240)),
        interest_expense: Some(dec!(30)),
        income_tax: Some(dec!(50)),
        net_income: Some(dec!(160)),
        operating_cash_flow: Some(dec!(220)),
        investing_cash_flow: Some(dec!(-90)),
        financing_cash_flow: Some(dec!(-60)),
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
        employees: Some(dec!(400)),
        prior_period: Some(Box::new(prior)),
        ..Default::default()
    }
}

fn config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.monte_carlo.simulations = 40;
    config
}

// ===========================================================================
// Classifier properties
// ===========================================================================

#[test]
fn test_higher_is_better_is_monotonic() {
    for table in [&BASIC, &APPLIED, &ADVANCED] {
        let benchmark = dec!(2);
        let mut previous = Status::Unavailable;
        let mut v = dec!(-1);
        while v <= dec!(5) {
            let status = classify(v, benchmark, Policy::HigherIsBetter, table).unwrap();
            assert!(status >= previous, "{} dropped at {v}", table.name);
            previous = status;
            v += dec!(0.05);
        }
    }
}

#[test]
fn test_lower_is_better_is_antitonic() {
    let mut previous = Status::Excellent;
    let mut v = Decimal::ZERO;
    while v <= dec!(4) {
        let status = classify(v, dec!(1), Policy::LowerIsBetter, &BASIC).unwrap();
        assert!(status <= previous, "rose at {v}");
        previous = status;
        v += dec!(0.05);
    }
}

#[test]
fn test_classification_is_scale_invariant() {
    let values = [dec!(0.3), dec!(0.75), dec!(1), dec!(1.18), dec!(1.45), dec!(2.6)];
    for table in [&BASIC, &APPLIED, &ADVANCED] {
        for policy in [Policy::HigherIsBetter, Policy::LowerIsBetter, Policy::Optimal] {
            for v in values {
                let base = classify(v, dec!(1), policy, table).unwrap();
                for k in [dec!(0.01), dec!(3), dec!(250)] {
                    assert_eq!(classify(v * k, k, policy, table).unwrap(), base);
                }
            }
        }
    }
}

#[test]
fn test_non_positive_benchmark_is_an_error() {
    assert!(classify(dec!(1), Decimal::ZERO, Policy::HigherIsBetter, &BASIC).is_err());
    assert!(classify(dec!(1), dec!(-2), Policy::Optimal, &ADVANCED).is_err());
}

// ===========================================================================
// Catalog runs
// ===========================================================================

#[test]
fn test_basic_category_counts_match_catalog() {
    let out = analyze_basic(&manufacturer(), &config()).unwrap();
    let mut counts: Vec<(Category, usize)> = Vec::new();
    for r in &out.result {
        match counts.iter_mut().find(|(c, _)| *c == r.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((r.category, 1)),
        }
    }
    let expected: Vec<(Category, usize)> = catalog::category_counts(Tier::Basic, Locale::En)
        .unwrap()
        .into_iter()
        .map(|c| (c.category, c.count))
        .collect();
    assert_eq!(counts, expected);
    let ratios: usize = counts
        .iter()
        .filter(|(c, _)| c.group() == Some("ratios"))
        .map(|(_, n)| n)
        .sum();
    assert_eq!(ratios, 75);
}

#[test]
fn test_full_record_computes_basic_catalog() {
    let out = analyze_basic(&manufacturer(), &config()).unwrap();
    let unavailable: Vec<&str> = out
        .result
        .iter()
        .filter(|r| r.status == Status::Unavailable)
        .map(|r| r.id.as_str())
        .collect();
    assert!(
        unavailable.len() < 10,
        "too many unavailable metrics: {unavailable:?}"
    );
}

#[test]
fn test_runs_are_deterministic() {
    let data = manufacturer();
    let cfg = config();
    assert_eq!(
        analyze_basic(&data, &cfg).unwrap().result,
        analyze_basic(&data, &cfg).unwrap().result
    );
    assert_eq!(
        analyze_applied(&data, &cfg).unwrap().result,
        analyze_applied(&data, &cfg).unwrap().result
    );
    assert_eq!(
        analyze_advanced(&data, &cfg).unwrap().result,
        analyze_advanced(&data, &cfg).unwrap().result
    );
}

#[test]
fn test_zero_equity_isolated_to_affected_metrics() {
    let mut data = manufacturer();
    data.total_equity = Some(Decimal::ZERO);
    let out = analyze_basic(&data, &config()).unwrap();
    let d2e = out.result.iter().find(|r| r.id == "debt_to_equity").unwrap();
    assert_eq!(d2e.status, Status::Unavailable);
    assert!(d2e.value.is_none());
    assert!(d2e.error.as_deref().unwrap().contains("zero denominator"));

    let current = out.result.iter().find(|r| r.id == "current_ratio").unwrap();
    assert_eq!(current.value, Some(dec!(2)));
    assert_eq!(out.result.len(), 106);
}

#[test]
fn test_overflowing_market_figures_isolated_to_affected_metrics() {
    let mut data = manufacturer();
    data.share_price = Some(dec!(1000000000000000));
    data.shares_outstanding = Some(dec!(1000000000000000));
    let out = analyze_basic(&data, &config()).unwrap();
    assert_eq!(out.result.len(), 106);
    for id in ["price_to_sales", "ev_to_ebitda", "tobins_q"] {
        let metric = out.result.iter().find(|r| r.id == id).unwrap();
        assert_eq!(metric.status, Status::Unavailable, "{id}");
        assert!(metric.error.as_deref().unwrap().contains("overflow"), "{id}");
    }
    let current = out.result.iter().find(|r| r.id == "current_ratio").unwrap();
    assert_eq!(current.value, Some(dec!(2)));
    assert_eq!(current.status, Status::Excellent);

    // The model tiers share the same figures and must also complete.
    assert_eq!(analyze_applied(&data, &config()).unwrap().result.len(), 21);
    assert_eq!(analyze_advanced(&data, &config()).unwrap().result.len(), 53);
}

#[test]
fn test_overflowing_margin_isolated_to_affected_metrics() {
    let mut data = manufacturer();
    data.net_income = Some(dec!(1000000000000000000000000000));
    data.revenue = Some(Decimal::ONE);
    let out = analyze_basic(&data, &config()).unwrap();
    let margin = out.result.iter().find(|r| r.id == "net_margin").unwrap();
    assert_eq!(margin.status, Status::Unavailable);
    assert_eq!(
        margin.error.as_deref(),
        Some("numeric overflow in net income / revenue")
    );
    let current = out.result.iter().find(|r| r.id == "current_ratio").unwrap();
    assert_eq!(current.value, Some(dec!(2)));
    assert_eq!(analyze_advanced(&data, &config()).unwrap().result.len(), 53);
}

#[test]
fn test_applied_and_advanced_sizes() {
    let data = manufacturer();
    assert_eq!(analyze_applied(&data, &config()).unwrap().result.len(), 21);
    assert_eq!(analyze_advanced(&data, &config()).unwrap().result.len(), 53);
}

#[test]
fn test_seed_changes_simulation_only() {
    let data = manufacturer();
    let a = analyze_advanced(&data, &config()).unwrap().result;
    let mut reseeded = config();
    reseeded.monte_carlo.seed = 7;
    let b = analyze_advanced(&data, &reseeded).unwrap().result;
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.base, y.base);
        assert_eq!(x.confidence, y.confidence);
        assert_eq!(x.sensitivity, y.sensitivity);
    }
}

#[test]
fn test_serialized_result_uses_ui_field_names() {
    let out = analyze_advanced(&manufacturer(), &config()).unwrap();
    let json = serde_json::to_value(&out.result[0]).unwrap();
    for key in [
        "id",
        "name",
        "category",
        "value",
        "formula",
        "interpretation",
        "benchmark",
        "status",
        "description",
        "calculation",
        "unit",
        "confidence",
        "modelAccuracy",
        "statisticalSignificance",
        "monteCarloProbability",
        "sensitivity",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}
