use finsight_core::catalog::Tier;
use finsight_core::data::FinancialData;
use finsight_core::report::{build_report, risk_level, RiskLevel};
use finsight_core::{EngineConfig, FinsightError, Locale};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample() -> FinancialData {
    serde_json::from_str(
        r#"{
            "company": {"name": "Gulf Trading Co", "currency": "SAR"},
            "total_assets": 5000,
            "current_assets": 2100,
            "cash": 600,
            "accounts_receivable": 700,
            "inventory": 650,
            "total_liabilities": 2300,
            "current_liabilities": 1200,
            "short_term_debt": 300,
            "long_term_debt": 800,
            "total_equity": 2700,
            "retained_earnings": 1500,
            "revenue": 6400,
            "cost_of_goods_sold": 4500,
            "operating_income": 820,
            "interest_expense": 70,
            "income_tax": 150,
            "net_income": 600,
            "operating_cash_flow": 750,
            "capital_expenditure": -240,
            "dividends_paid": -200,
            "share_price": 42,
            "shares_outstanding": 150,
            "beta": 0.9,
            "risk_free_rate": 0.045,
            "market_return": 0.1
        }"#,
    )
    .unwrap()
}

#[test]
fn test_report_covers_requested_tiers() {
    let mut config = EngineConfig::default();
    config.monte_carlo.simulations = 20;
    let out = build_report(&sample(), &Tier::ALL, &config).unwrap();
    let report = out.result;

    let tiers: Vec<Tier> = report.tiers.iter().map(|t| t.tier).collect();
    assert_eq!(tiers, Tier::ALL.to_vec());
    assert_eq!(report.tiers[0].counts.total(), 106);
    assert_eq!(report.tiers[1].counts.total(), 21);
    assert_eq!(report.tiers[2].counts.total(), 53);
    assert_eq!(report.company.unwrap().name, "Gulf Trading Co");
    assert_eq!(report.summary.risk_level, risk_level(report.summary.score));
    assert!(report.tiers[2]
        .sections
        .iter()
        .any(|s| s.average_confidence.is_some()));
}

#[test]
fn test_arabic_report_text() {
    let config = EngineConfig {
        locale: Locale::Ar,
        ..EngineConfig::default()
    };
    let out = build_report(&sample(), &[Tier::Basic], &config).unwrap();
    assert!(out.result.summary.summary.starts_with("الدرجة الإجمالية"));
    assert_eq!(out.result.tiers[0].sections[0].name, "التحليل الهيكلي");
}

#[test]
fn test_unusable_record_has_no_score() {
    let data = FinancialData {
        employees: Some(dec!(12)),
        ..Default::default()
    };
    match build_report(&data, &[Tier::Applied], &EngineConfig::default()) {
        Err(FinsightError::InsufficientData(_)) => {}
        other => panic!("Expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn test_risk_level_from_score() {
    assert_eq!(risk_level(dec!(92)), RiskLevel::Low);
    assert_eq!(risk_level(dec!(55)), RiskLevel::Elevated);
    assert_eq!(risk_level(Decimal::ZERO), RiskLevel::High);
}
