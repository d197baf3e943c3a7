//! Input recorder handed to every metric calculator.
//!
//! Calculators read figures through `Inputs` rather than touching
//! `FinancialData` directly. Each read is recorded so the runner can print a
//! calculation trace, bump inputs for sensitivity factors, and shock them for
//! Monte Carlo runs without the calculators knowing about either.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::FinancialData;
use crate::error::DataError;
use crate::math::{self, DataResult};

/// One figure read by a calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputValue {
    pub field: &'static str,
    pub value: Decimal,
    /// True when the figure was absent and reconstructed from other figures.
    pub estimated: bool,
}

/// Multipliers applied to reported figures as they are read.
pub type Shocks = BTreeMap<&'static str, Decimal>;

pub struct Inputs<'a> {
    data: &'a FinancialData,
    shocks: Option<&'a Shocks>,
    used: Vec<InputValue>,
}

impl<'a> Inputs<'a> {
    pub fn new(data: &'a FinancialData) -> Self {
        Self {
            data,
            shocks: None,
            used: Vec::new(),
        }
    }

    pub fn with_shocks(data: &'a FinancialData, shocks: &'a Shocks) -> Self {
        Self {
            data,
            shocks: Some(shocks),
            used: Vec::new(),
        }
    }

    pub fn data(&self) -> &FinancialData {
        self.data
    }

    /// Figures read so far, in first-read order.
    pub fn used(&self) -> &[InputValue] {
        &self.used
    }

    pub fn into_used(self) -> Vec<InputValue> {
        self.used
    }

    /// Names of reported (not estimated) figures, the ones that can be shocked.
    pub fn reported_fields(&self) -> Vec<&'static str> {
        self.used
            .iter()
            .filter(|v| !v.estimated)
            .map(|v| v.field)
            .collect()
    }

    pub fn estimated_count(&self) -> usize {
        self.used.iter().filter(|v| v.estimated).count()
    }

    fn take(&mut self, field: &'static str, value: Option<Decimal>) -> DataResult<Decimal> {
        let raw = value.ok_or(DataError::MissingField(field))?;
        let value = match self.shocks.and_then(|s| s.get(field)) {
            Some(multiplier) => math::mul(raw, *multiplier, field)?,
            None => raw,
        };
        self.record(field, value, false);
        Ok(value)
    }

    fn record(&mut self, field: &'static str, value: Decimal, estimated: bool) {
        if !self.used.iter().any(|v| v.field == field) {
            self.used.push(InputValue {
                field,
                value,
                estimated,
            });
        }
    }

    /// Use the stored figure when present, otherwise reconstruct it.
    fn reported_or(
        &mut self,
        field: &'static str,
        stored: Option<Decimal>,
        derive: impl FnOnce(&mut Self) -> DataResult<Decimal>,
    ) -> DataResult<Decimal> {
        if stored.is_some() {
            return self.take(field, stored);
        }
        let value = derive(self).map_err(|e| match e {
            // Report the figure the caller asked for, not the component.
            DataError::MissingField(_) => DataError::MissingField(field),
            other => other,
        })?;
        self.record(field, value, true);
        Ok(value)
    }

    fn prior(&self) -> Option<&'a FinancialData> {
        self.data.prior_period.as_deref()
    }
}

macro_rules! figures {
    ($($field:ident / $prior:ident),* $(,)?) => {
        impl<'a> Inputs<'a> {
            $(
                pub fn $field(&mut self) -> DataResult<Decimal> {
                    let value = self.data.$field;
                    self.take(stringify!($field), value)
                }

                pub fn $prior(&mut self) -> DataResult<Decimal> {
                    let value = self.prior().and_then(|p| p.$field);
                    self.take(concat!("prior_period.", stringify!($field)), value)
                }
            )*
        }
    };
}

figures! {
    total_assets / prior_total_assets,
    current_assets / prior_current_assets,
    cash / prior_cash,
    marketable_securities / prior_marketable_securities,
    accounts_receivable / prior_accounts_receivable,
    inventory / prior_inventory,
    prepaid_expenses / prior_prepaid_expenses,
    fixed_assets / prior_fixed_assets,
    intangible_assets / prior_intangible_assets,
    goodwill / prior_goodwill,
    total_liabilities / prior_total_liabilities,
    current_liabilities / prior_current_liabilities,
    accounts_payable / prior_accounts_payable,
    short_term_debt / prior_short_term_debt,
    long_term_debt / prior_long_term_debt,
    total_equity / prior_total_equity,
    retained_earnings / prior_retained_earnings,
    revenue / prior_revenue,
    cost_of_goods_sold / prior_cost_of_goods_sold,
    operating_expenses / prior_operating_expenses,
    selling_general_admin / prior_selling_general_admin,
    research_development / prior_research_development,
    depreciation_amortisation / prior_depreciation_amortisation,
    operating_income / prior_operating_income,
    interest_expense / prior_interest_expense,
    income_tax / prior_income_tax,
    net_income / prior_net_income,
    operating_cash_flow / prior_operating_cash_flow,
    investing_cash_flow / prior_investing_cash_flow,
    financing_cash_flow / prior_financing_cash_flow,
    capital_expenditure / prior_capital_expenditure,
    dividends_paid / prior_dividends_paid,
    share_price / prior_share_price,
    shares_outstanding / prior_shares_outstanding,
    beta / prior_beta,
    risk_free_rate / prior_risk_free_rate,
    market_return / prior_market_return,
    expected_growth_rate / prior_expected_growth_rate,
    stock_return / prior_stock_return,
    return_volatility / prior_return_volatility,
    market_volatility / prior_market_volatility,
    employees / prior_employees,
}

// ---------------------------------------------------------------------------
// Figures with a standard reconstruction
// ---------------------------------------------------------------------------

impl<'a> Inputs<'a> {
    /// Revenue − COGS when gross profit is not reported.
    pub fn gross_profit(&mut self) -> DataResult<Decimal> {
        let stored = self.data.gross_profit;
        self.reported_or("gross_profit", stored, |x| {
            math::sub(x.revenue()?, x.cost_of_goods_sold()?, "revenue - COGS")
        })
    }

    pub fn prior_gross_profit(&mut self) -> DataResult<Decimal> {
        let stored = self.prior().and_then(|p| p.gross_profit);
        self.reported_or("prior_period.gross_profit", stored, |x| {
            math::sub(x.prior_revenue()?, x.prior_cost_of_goods_sold()?, "prior revenue - COGS")
        })
    }

    /// Operating income + D&A when EBITDA is not reported.
    pub fn ebitda(&mut self) -> DataResult<Decimal> {
        let stored = self.data.ebitda;
        self.reported_or("ebitda", stored, |x| {
            math::add(x.operating_income()?, x.depreciation_amortisation()?, "operating income + D&A")
        })
    }

    /// Operating income − interest when pre-tax income is not reported.
    pub fn pre_tax_income(&mut self) -> DataResult<Decimal> {
        let stored = self.data.pre_tax_income;
        self.reported_or("pre_tax_income", stored, |x| {
            math::sub(x.operating_income()?, x.interest_expense()?, "operating income - interest")
        })
    }

    /// OCF − |capex| when free cash flow is not reported.
    pub fn free_cash_flow(&mut self) -> DataResult<Decimal> {
        let stored = self.data.free_cash_flow;
        self.reported_or("free_cash_flow", stored, |x| {
            math::sub(x.operating_cash_flow()?, x.capital_expenditure()?.abs(), "OCF - capex")
        })
    }

    // -- Intermediates (not recorded themselves; their components are) -------

    pub fn total_debt(&mut self) -> DataResult<Decimal> {
        let (st, lt) = (self.short_term_debt()?, self.long_term_debt()?);
        math::add(st, lt, "short-term + long-term debt")
    }

    pub fn prior_total_debt(&mut self) -> DataResult<Decimal> {
        let (st, lt) = (self.prior_short_term_debt()?, self.prior_long_term_debt()?);
        math::add(st, lt, "prior short-term + long-term debt")
    }

    pub fn net_debt(&mut self) -> DataResult<Decimal> {
        let debt = self.total_debt()?;
        math::sub(debt, self.cash()?, "total debt - cash")
    }

    pub fn working_capital(&mut self) -> DataResult<Decimal> {
        let ca = self.current_assets()?;
        math::sub(ca, self.current_liabilities()?, "current assets - current liabilities")
    }

    pub fn prior_working_capital(&mut self) -> DataResult<Decimal> {
        let ca = self.prior_current_assets()?;
        math::sub(ca, self.prior_current_liabilities()?, "prior working capital")
    }

    /// Cash + marketable securities.
    pub fn liquid_funds(&mut self) -> DataResult<Decimal> {
        let cash = self.cash()?;
        math::add(cash, self.marketable_securities()?, "cash + marketable securities")
    }

    pub fn capital_employed(&mut self) -> DataResult<Decimal> {
        let ta = self.total_assets()?;
        math::sub(ta, self.current_liabilities()?, "total assets - current liabilities")
    }

    /// Debt + equity − cash.
    pub fn invested_capital(&mut self) -> DataResult<Decimal> {
        let terms = [self.total_debt()?, self.total_equity()?, -self.cash()?];
        math::sum(&terms, "debt + equity - cash")
    }

    pub fn market_cap(&mut self) -> DataResult<Decimal> {
        let price = self.share_price()?;
        math::mul(price, self.shares_outstanding()?, "share price * shares")
    }

    pub fn enterprise_value(&mut self) -> DataResult<Decimal> {
        let terms = [self.market_cap()?, self.total_debt()?, -self.cash()?];
        math::sum(&terms, "market cap + debt - cash")
    }

    pub fn tangible_assets(&mut self) -> DataResult<Decimal> {
        let terms = [self.total_assets()?, -self.intangible_assets()?, -self.goodwill()?];
        math::sum(&terms, "total assets - intangibles")
    }

    /// Effective tax rate as a decimal, income tax / pre-tax income.
    pub fn tax_rate(&mut self) -> DataResult<Decimal> {
        let tax = self.income_tax()?;
        let pbt = self.pre_tax_income()?;
        math::div(tax, pbt, "income tax / pre-tax income")
    }

    /// Operating income after tax.
    pub fn nopat(&mut self) -> DataResult<Decimal> {
        let t = self.tax_rate()?;
        let retained = math::sub(Decimal::ONE, t, "1 - tax rate")?;
        math::mul(self.operating_income()?, retained, "operating income * (1 - t)")
    }

    pub fn earnings_per_share(&mut self) -> DataResult<Decimal> {
        let ni = self.net_income()?;
        math::div(ni, self.shares_outstanding()?, "net income / shares")
    }

    pub fn prior_earnings_per_share(&mut self) -> DataResult<Decimal> {
        let ni = self.prior_net_income()?;
        math::div(ni, self.prior_shares_outstanding()?, "prior net income / shares")
    }

    pub fn book_value_per_share(&mut self) -> DataResult<Decimal> {
        let eq = self.total_equity()?;
        math::div(eq, self.shares_outstanding()?, "equity / shares")
    }

    pub fn dividends_per_share(&mut self) -> DataResult<Decimal> {
        let d = self.dividends_paid()?.abs();
        math::div(d, self.shares_outstanding()?, "dividends / shares")
    }

    /// CAPM required return on equity, as a decimal.
    pub fn cost_of_equity(&mut self) -> DataResult<Decimal> {
        let rf = self.risk_free_rate()?;
        let beta = self.beta()?;
        let rm = self.market_return()?;
        let premium = math::sub(rm, rf, "market risk premium")?;
        math::add(rf, math::mul(beta, premium, "beta * premium")?, "CAPM")
    }

    /// Interest expense / total debt, as a decimal.
    pub fn cost_of_debt(&mut self) -> DataResult<Decimal> {
        let interest = self.interest_expense()?;
        math::div(interest, self.total_debt()?, "interest / total debt")
    }

    /// Market-value weighted average cost of capital, as a decimal.
    pub fn wacc(&mut self) -> DataResult<Decimal> {
        let e = self.market_cap()?;
        let d = self.total_debt()?;
        let ke = self.cost_of_equity()?;
        let kd = self.cost_of_debt()?;
        let t = self.tax_rate()?;
        let v = math::add(e, d, "equity + debt")?;
        let we = math::div(e, v, "equity / (equity + debt)")?;
        let wd = math::div(d, v, "debt / (equity + debt)")?;
        let retained = math::sub(Decimal::ONE, t, "1 - tax rate")?;
        let after_tax_kd = math::mul(kd, retained, "kd * (1 - t)")?;
        math::weighted_sum(&[(we, ke), (wd, after_tax_kd)], "WACC")
    }

    /// Average of opening and closing total assets; falls back to closing.
    pub fn average_total_assets(&mut self) -> DataResult<Decimal> {
        let closing = self.total_assets()?;
        match self.prior().and_then(|p| p.total_assets) {
            Some(_) => math::mean2(closing, self.prior_total_assets()?, "average total assets"),
            None => Ok(closing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn data() -> FinancialData {
        FinancialData {
            revenue: Some(dec!(1000)),
            cost_of_goods_sold: Some(dec!(600)),
            operating_income: Some(dec!(150)),
            depreciation_amortisation: Some(dec!(50)),
            ..FinancialData::default()
        }
    }

    #[test]
    fn test_reads_are_recorded_once() {
        let d = data();
        let mut x = Inputs::new(&d);
        x.revenue().unwrap();
        x.revenue().unwrap();
        assert_eq!(x.used().len(), 1);
        assert_eq!(x.used()[0].field, "revenue");
        assert!(!x.used()[0].estimated);
    }

    #[test]
    fn test_gross_profit_is_estimated_when_absent() {
        let d = data();
        let mut x = Inputs::new(&d);
        assert_eq!(x.gross_profit().unwrap(), dec!(400));
        assert_eq!(x.estimated_count(), 1);
        assert_eq!(x.reported_fields(), vec!["revenue", "cost_of_goods_sold"]);
    }

    #[test]
    fn test_missing_component_reports_requested_figure() {
        let d = FinancialData {
            revenue: Some(dec!(1000)),
            ..FinancialData::default()
        };
        let mut x = Inputs::new(&d);
        assert_eq!(x.gross_profit(), Err(DataError::MissingField("gross_profit")));
    }

    #[test]
    fn test_missing_prior_period_field() {
        let d = data();
        let mut x = Inputs::new(&d);
        assert_eq!(
            x.prior_revenue(),
            Err(DataError::MissingField("prior_period.revenue"))
        );
    }

    #[test]
    fn test_shocks_scale_reported_figures() {
        let d = data();
        let mut shocks = Shocks::new();
        shocks.insert("revenue", dec!(1.1));
        let mut x = Inputs::with_shocks(&d, &shocks);
        assert_eq!(x.revenue().unwrap(), dec!(1100));
        assert_eq!(x.ebitda().unwrap(), dec!(200));
    }

    #[test]
    fn test_market_cap_overflow_is_a_data_error() {
        let d = FinancialData {
            share_price: Some(dec!(1000000000000000)),
            shares_outstanding: Some(dec!(1000000000000000)),
            ..FinancialData::default()
        };
        let mut x = Inputs::new(&d);
        assert_eq!(
            x.market_cap(),
            Err(DataError::Overflow { context: "share price * shares" })
        );
    }

    #[test]
    fn test_shock_overflow_is_a_data_error() {
        let d = FinancialData {
            revenue: Some(Decimal::MAX),
            ..FinancialData::default()
        };
        let mut shocks = Shocks::new();
        shocks.insert("revenue", dec!(2));
        let mut x = Inputs::with_shocks(&d, &shocks);
        assert_eq!(x.revenue(), Err(DataError::Overflow { context: "revenue" }));
    }
}
