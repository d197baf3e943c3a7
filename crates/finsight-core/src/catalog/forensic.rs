//! Period-over-period forensic indices (Beneish family).
//!
//! Each index compares the current period with `prior_period`; a value
//! above 1.0 means the ratio deteriorated in the direction associated with
//! earnings manipulation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::data::Inputs;
use crate::math::{self, add, div, linear_score, mul, sub, DataResult};

/// Days sales in receivables index.
pub(crate) fn dsri(x: &mut Inputs) -> DataResult<Decimal> {
    let current = div(x.accounts_receivable()?, x.revenue()?, "receivables / revenue")?;
    let prior = div(
        x.prior_accounts_receivable()?,
        x.prior_revenue()?,
        "prior receivables / revenue",
    )?;
    div(current, prior, "DSRI")
}

/// Gross margin index: prior margin over current margin.
pub(crate) fn gmi(x: &mut Inputs) -> DataResult<Decimal> {
    let current = div(x.gross_profit()?, x.revenue()?, "gross margin")?;
    let prior = div(x.prior_gross_profit()?, x.prior_revenue()?, "prior gross margin")?;
    div(prior, current, "GMI")
}

/// Asset quality index: share of assets that are neither current nor PP&E.
pub(crate) fn aqi(x: &mut Inputs) -> DataResult<Decimal> {
    let hard = add(x.current_assets()?, x.fixed_assets()?, "hard assets")?;
    let hard_share = div(hard, x.total_assets()?, "hard assets / total assets")?;
    let current = sub(Decimal::ONE, hard_share, "soft asset share")?;
    let prior_hard = add(x.prior_current_assets()?, x.prior_fixed_assets()?, "prior hard assets")?;
    let prior_share = div(prior_hard, x.prior_total_assets()?, "prior hard assets / total assets")?;
    let prior = sub(Decimal::ONE, prior_share, "prior soft asset share")?;
    div(current, prior, "AQI")
}

/// Sales growth index.
pub(crate) fn sgi(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.prior_revenue()?, "SGI")
}

/// Depreciation index: prior depreciation rate over current.
pub(crate) fn depi(x: &mut Inputs) -> DataResult<Decimal> {
    let dep = x.depreciation_amortisation()?;
    let base = add(dep, x.fixed_assets()?, "D&A + fixed assets")?;
    let current = div(dep, base, "depreciation rate")?;
    let prior_dep = x.prior_depreciation_amortisation()?;
    let prior_base = add(prior_dep, x.prior_fixed_assets()?, "prior D&A + fixed assets")?;
    let prior = div(prior_dep, prior_base, "prior depreciation rate")?;
    div(prior, current, "DEPI")
}

/// SG&A expense index.
pub(crate) fn sgai(x: &mut Inputs) -> DataResult<Decimal> {
    let current = div(x.selling_general_admin()?, x.revenue()?, "SG&A / revenue")?;
    let prior = div(
        x.prior_selling_general_admin()?,
        x.prior_revenue()?,
        "prior SG&A / revenue",
    )?;
    div(current, prior, "SGAI")
}

/// Leverage index on (current liabilities + long-term debt) / total assets.
pub(crate) fn lvgi(x: &mut Inputs) -> DataResult<Decimal> {
    let obligations = add(x.current_liabilities()?, x.long_term_debt()?, "leverage")?;
    let current = div(obligations, x.total_assets()?, "leverage")?;
    let prior_obligations = add(
        x.prior_current_liabilities()?,
        x.prior_long_term_debt()?,
        "prior leverage",
    )?;
    let prior = div(prior_obligations, x.prior_total_assets()?, "prior leverage")?;
    div(current, prior, "LVGI")
}

/// Total accruals to total assets, as a decimal.
pub(crate) fn tata(x: &mut Inputs) -> DataResult<Decimal> {
    let accruals = sub(x.net_income()?, x.operating_cash_flow()?, "net income - OCF")?;
    div(accruals, x.total_assets()?, "total accruals / total assets")
}

/// Eight-variable Beneish M-score.
pub(crate) fn m_score(x: &mut Inputs) -> DataResult<Decimal> {
    let terms = [
        (dec!(0.920), dsri(x)?),
        (dec!(0.528), gmi(x)?),
        (dec!(0.404), aqi(x)?),
        (dec!(0.892), sgi(x)?),
        (dec!(0.115), depi(x)?),
        (dec!(-0.172), sgai(x)?),
        (dec!(4.679), tata(x)?),
        (dec!(-0.327), lvgi(x)?),
    ];
    linear_score(dec!(-4.84), &terms, "Beneish M-score")
}

/// Probit reading of the M-score, in percent.
pub(crate) fn manipulation_probability(x: &mut Inputs) -> DataResult<Decimal> {
    mul(math::norm_cdf(m_score(x)?), math::HUNDRED, "manipulation probability")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FinancialData;
    use pretty_assertions::assert_eq;

    fn period(revenue: Decimal, receivables: Decimal) -> FinancialData {
        FinancialData {
            revenue: Some(revenue),
            cost_of_goods_sold: Some(revenue * dec!(0.6)),
            accounts_receivable: Some(receivables),
            selling_general_admin: Some(revenue * dec!(0.1)),
            depreciation_amortisation: Some(dec!(50)),
            fixed_assets: Some(dec!(500)),
            current_assets: Some(dec!(400)),
            current_liabilities: Some(dec!(200)),
            long_term_debt: Some(dec!(300)),
            total_assets: Some(dec!(1000)),
            net_income: Some(dec!(80)),
            operating_cash_flow: Some(dec!(80)),
            ..FinancialData::default()
        }
    }

    #[test]
    fn test_unchanged_company_has_unit_indices() {
        let mut current = period(dec!(1000), dec!(100));
        current.prior_period = Some(Box::new(period(dec!(1000), dec!(100))));
        let mut x = Inputs::new(&current);
        assert_eq!(dsri(&mut x).unwrap(), Decimal::ONE);
        assert_eq!(gmi(&mut x).unwrap(), Decimal::ONE);
        assert_eq!(sgi(&mut x).unwrap(), Decimal::ONE);
        assert_eq!(lvgi(&mut x).unwrap(), Decimal::ONE);
        assert_eq!(tata(&mut x).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_receivables_build_up_raises_dsri() {
        let mut current = period(dec!(1000), dec!(200));
        current.prior_period = Some(Box::new(period(dec!(1000), dec!(100))));
        let mut x = Inputs::new(&current);
        assert_eq!(dsri(&mut x).unwrap(), dec!(2));
    }

    #[test]
    fn test_clean_company_scores_below_threshold() {
        let mut current = period(dec!(1000), dec!(100));
        current.prior_period = Some(Box::new(period(dec!(1000), dec!(100))));
        let mut x = Inputs::new(&current);
        // All indices at 1.0 and zero accruals gives M = -2.48.
        assert_eq!(m_score(&mut x).unwrap(), dec!(-2.480));
        assert!(manipulation_probability(&mut x).unwrap() < dec!(5));
    }
}
