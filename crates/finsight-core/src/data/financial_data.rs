use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Money, Rate};

/// Descriptive information about the reporting entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// Flat record of financial-statement figures for one reporting period.
///
/// Every figure is optional. A metric whose inputs are absent is reported as
/// unavailable instead of being computed from a placeholder. All money
/// figures must share a currency and period; rates (`risk_free_rate`,
/// `market_return`, `expected_growth_rate`, `stock_return`, volatilities) are
/// decimals, so 4% is `0.04`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyInfo>,

    // -- Balance sheet --------------------------------------------------------
    pub total_assets: Option<Money>,
    pub current_assets: Option<Money>,
    pub cash: Option<Money>,
    pub marketable_securities: Option<Money>,
    pub accounts_receivable: Option<Money>,
    pub inventory: Option<Money>,
    pub prepaid_expenses: Option<Money>,
    pub fixed_assets: Option<Money>,
    pub intangible_assets: Option<Money>,
    pub goodwill: Option<Money>,
    pub total_liabilities: Option<Money>,
    pub current_liabilities: Option<Money>,
    pub accounts_payable: Option<Money>,
    pub short_term_debt: Option<Money>,
    pub long_term_debt: Option<Money>,
    pub total_equity: Option<Money>,
    pub retained_earnings: Option<Money>,

    // -- Income statement -----------------------------------------------------
    pub revenue: Option<Money>,
    pub cost_of_goods_sold: Option<Money>,
    pub gross_profit: Option<Money>,
    pub operating_expenses: Option<Money>,
    pub selling_general_admin: Option<Money>,
    pub research_development: Option<Money>,
    pub depreciation_amortisation: Option<Money>,
    pub ebitda: Option<Money>,
    pub operating_income: Option<Money>,
    pub interest_expense: Option<Money>,
    pub pre_tax_income: Option<Money>,
    pub income_tax: Option<Money>,
    pub net_income: Option<Money>,

    // -- Cash flow statement --------------------------------------------------
    pub operating_cash_flow: Option<Money>,
    pub investing_cash_flow: Option<Money>,
    pub financing_cash_flow: Option<Money>,
    pub capital_expenditure: Option<Money>,
    pub free_cash_flow: Option<Money>,
    pub dividends_paid: Option<Money>,

    // -- Market data ----------------------------------------------------------
    pub share_price: Option<Money>,
    pub shares_outstanding: Option<Decimal>,
    pub beta: Option<Decimal>,
    pub risk_free_rate: Option<Rate>,
    pub market_return: Option<Rate>,
    pub expected_growth_rate: Option<Rate>,
    pub stock_return: Option<Rate>,
    pub return_volatility: Option<Rate>,
    pub market_volatility: Option<Rate>,

    // -- Other ----------------------------------------------------------------
    pub employees: Option<Decimal>,

    /// Industry comparators keyed by metric id. When enabled in the engine
    /// configuration these replace the metric's static benchmark.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub industry_averages: BTreeMap<String, Decimal>,

    /// The same figures for the previous period, used by trend metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_period: Option<Box<FinancialData>>,
}

impl FinancialData {
    /// Number of statement and market figures that are present (nested
    /// records excluded).
    pub fn figure_count(&self) -> usize {
        [
            self.total_assets,
            self.current_assets,
            self.cash,
            self.marketable_securities,
            self.accounts_receivable,
            self.inventory,
            self.prepaid_expenses,
            self.fixed_assets,
            self.intangible_assets,
            self.goodwill,
            self.total_liabilities,
            self.current_liabilities,
            self.accounts_payable,
            self.short_term_debt,
            self.long_term_debt,
            self.total_equity,
            self.retained_earnings,
            self.revenue,
            self.cost_of_goods_sold,
            self.gross_profit,
            self.operating_expenses,
            self.selling_general_admin,
            self.research_development,
            self.depreciation_amortisation,
            self.ebitda,
            self.operating_income,
            self.interest_expense,
            self.pre_tax_income,
            self.income_tax,
            self.net_income,
            self.operating_cash_flow,
            self.investing_cash_flow,
            self.financing_cash_flow,
            self.capital_expenditure,
            self.free_cash_flow,
            self.dividends_paid,
            self.share_price,
            self.shares_outstanding,
            self.beta,
            self.risk_free_rate,
            self.market_return,
            self.expected_growth_rate,
            self.stock_return,
            self.return_volatility,
            self.market_volatility,
            self.employees,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }

    pub fn has_prior_period(&self) -> bool {
        self.prior_period.is_some()
    }

    /// Industry comparator for a metric, if one was supplied.
    pub fn industry_average(&self, metric_id: &str) -> Option<Decimal> {
        self.industry_averages.get(metric_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let data: FinancialData =
            serde_json::from_str(r#"{"current_assets": 200, "current_liabilities": "100"}"#)
                .unwrap();
        assert_eq!(data.current_assets, Some(dec!(200)));
        assert_eq!(data.current_liabilities, Some(dec!(100)));
        assert_eq!(data.revenue, None);
        assert_eq!(data.figure_count(), 2);
    }

    #[test]
    fn test_nested_prior_period_and_averages() {
        let data: FinancialData = serde_json::from_str(
            r#"{
                "revenue": 1200,
                "industry_averages": {"current_ratio": 1.8},
                "prior_period": {"revenue": 1000}
            }"#,
        )
        .unwrap();
        assert!(data.has_prior_period());
        assert_eq!(data.prior_period.unwrap().revenue, Some(dec!(1000)));
        assert_eq!(data.industry_averages.get("current_ratio"), Some(&dec!(1.8)));
    }
}
