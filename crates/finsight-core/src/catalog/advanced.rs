//! Advanced catalog: 53 model-driven metrics.
//!
//! Intrinsic value (12), market risk (12), credit risk (15) and earnings
//! quality (14). Each definition carries a [`ModelProfile`] used by the
//! runner to report confidence and model accuracy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::definition::{AdvancedDefinition, Category::*, MetricDefinition, ModelProfile, Unit::*};
use crate::catalog::forensic;
use crate::classification::{Policy::*, Reading, Tone::*};
use crate::data::Inputs;
use crate::math::{
    self, add, div, linear_score, ln, logistic, mul, pct, perpetuity_spread, positive, sub, sum,
    weighted_sum, DataResult, HUNDRED,
};

/// Long-run growth assumed after the explicit forecast horizon.
const TERMINAL_GROWTH: Decimal = dec!(0.025);
const HIGH_GROWTH_YEARS: usize = 5;
/// Half-life of the growth fade in the H-model, in years.
const H_MODEL_HALF_LIFE: Decimal = dec!(5);
/// One-tailed 95% standard normal quantile.
const Z_95: Decimal = dec!(1.645);
const TAIL_95: Decimal = dec!(0.05);
/// Debt capacity expressed as a multiple of EBITDA.
const DEBT_CAPACITY_MULTIPLE: Decimal = dec!(3);
/// Share of tangible book value assumed recoverable in liquidation.
const RECOVERY_HAIRCUT: Decimal = dec!(0.7);
/// Rate shock applied to the whole debt stock in the coverage stress test.
const STRESS_RATE_SHOCK: Decimal = dec!(0.02);
const STRESS_EBIT_FACTOR: Decimal = dec!(0.8);

// ---------------------------------------------------------------------------
// Intrinsic value
// ---------------------------------------------------------------------------

fn two_stage_dcf_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let fcf = x.free_cash_flow()?;
    let g = x.expected_growth_rate()?;
    let wacc = x.wacc()?;
    let spread = perpetuity_spread(wacc, TERMINAL_GROWTH, "terminal value")?;
    let growth_factor = add(Decimal::ONE, g, "1 + g")?;
    let discount_factor = add(Decimal::ONE, wacc, "1 + WACC")?;

    let mut cash = fcf;
    let mut discount = Decimal::ONE;
    let mut present_value = Decimal::ZERO;
    for _ in 0..HIGH_GROWTH_YEARS {
        cash = mul(cash, growth_factor, "projected free cash flow")?;
        discount = mul(discount, discount_factor, "discount factor")?;
        let pv = div(cash, discount, "discounted free cash flow")?;
        present_value = add(present_value, pv, "present value")?;
    }
    let terminal_cash = mul(cash, Decimal::ONE + TERMINAL_GROWTH, "terminal cash flow")?;
    let terminal = div(terminal_cash, spread, "terminal value")?;
    let terminal_pv = div(terminal, discount, "discounted terminal value")?;
    present_value = add(present_value, terminal_pv, "present value")?;

    let equity = sub(present_value, x.net_debt()?, "DCF value - net debt")?;
    let market_cap = positive(x.market_cap()?, "market capitalisation")?;
    div(equity, market_cap, "DCF equity value / market cap")
}

fn fcfe_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let t = x.tax_rate()?;
    let after_tax_interest = mul(
        x.interest_expense()?,
        sub(Decimal::ONE, t, "1 - tax rate")?,
        "after-tax interest",
    )?;
    let fcfe = sub(x.free_cash_flow()?, after_tax_interest, "FCF - after-tax interest")?;
    let g = x.expected_growth_rate()?;
    let ke = x.cost_of_equity()?;
    let spread = perpetuity_spread(ke, g, "FCFE model")?;
    let next_fcfe = mul(fcfe, add(Decimal::ONE, g, "1 + g")?, "FCFE1")?;
    let value = div(next_fcfe, spread, "FCFE1 / (ke - g)")?;
    let market_cap = positive(x.market_cap()?, "market capitalisation")?;
    div(value, market_cap, "FCFE value / market cap")
}

fn h_model_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let d0 = x.dividends_per_share()?;
    let short_growth = x.expected_growth_rate()?;
    let ke = x.cost_of_equity()?;
    let spread = perpetuity_spread(ke, TERMINAL_GROWTH, "H-model")?;
    let excess_growth = sub(short_growth, TERMINAL_GROWTH, "excess growth")?;
    let fade = mul(H_MODEL_HALF_LIFE, excess_growth, "growth fade")?;
    let multiplier = add(Decimal::ONE + TERMINAL_GROWTH, fade, "H-model multiplier")?;
    let numerator = mul(d0, multiplier, "H-model dividend")?;
    let value = div(numerator, spread, "H-model value")?;
    div(value, x.share_price()?, "H-model value / price")
}

fn justified_pe_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let ni = positive(x.net_income()?, "net income")?;
    let payout = div(x.dividends_paid()?.abs(), ni, "payout ratio")?;
    let g = x.expected_growth_rate()?;
    let ke = x.cost_of_equity()?;
    let spread = perpetuity_spread(ke, g, "justified P/E")?;
    let grown_payout = mul(payout, add(Decimal::ONE, g, "1 + g")?, "payout * (1 + g)")?;
    let justified = div(grown_payout, spread, "justified P/E")?;
    let eps = positive(x.earnings_per_share()?, "earnings per share")?;
    let actual = div(x.share_price()?, eps, "price / EPS")?;
    div(justified, actual, "justified P/E / actual P/E")
}

fn justified_pb_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let roe = div(x.net_income()?, x.total_equity()?, "return on equity")?;
    let g = x.expected_growth_rate()?;
    let ke = x.cost_of_equity()?;
    let spread = perpetuity_spread(ke, g, "justified P/B")?;
    let justified = div(sub(roe, g, "ROE - g")?, spread, "justified P/B")?;
    let bvps = positive(x.book_value_per_share()?, "book value per share")?;
    let actual = div(x.share_price()?, bvps, "price / book")?;
    div(justified, actual, "justified P/B / actual P/B")
}

fn residual_income_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let bvps = x.book_value_per_share()?;
    let roe = div(x.net_income()?, x.total_equity()?, "return on equity")?;
    let g = x.expected_growth_rate()?;
    let ke = x.cost_of_equity()?;
    let spread = perpetuity_spread(ke, g, "residual income model")?;
    let residual = mul(bvps, sub(roe, ke, "ROE - ke")?, "residual income")?;
    let capitalised = div(residual, spread, "capitalised residual income")?;
    let value = add(bvps, capitalised, "residual income value")?;
    div(value, x.share_price()?, "residual income value / price")
}

fn economic_value_added_margin(x: &mut Inputs) -> DataResult<Decimal> {
    let capital_charge = mul(x.wacc()?, x.invested_capital()?, "capital charge")?;
    let eva = sub(x.nopat()?, capital_charge, "NOPAT - capital charge")?;
    pct(eva, x.revenue()?, "EVA / revenue")
}

fn implied_growth_rate(x: &mut Inputs) -> DataResult<Decimal> {
    let price = x.share_price()?;
    let d0 = x.dividends_per_share()?;
    let ke = x.cost_of_equity()?;
    let numerator = sub(mul(ke, price, "ke * price")?, d0, "ke * price - D0")?;
    pct(numerator, add(price, d0, "price + D0")?, "Gordon growth solved for g")
}

/// Equity value of current earnings power with no growth.
fn earnings_power_equity(x: &mut Inputs) -> DataResult<Decimal> {
    let wacc = positive(x.wacc()?, "WACC")?;
    let epv = div(x.nopat()?, wacc, "NOPAT / WACC")?;
    sub(epv, x.net_debt()?, "EPV - net debt")
}

fn earnings_power_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let equity = earnings_power_equity(x)?;
    let market_cap = positive(x.market_cap()?, "market capitalisation")?;
    div(equity, market_cap, "EPV equity / market cap")
}

fn ev_to_invested_capital(x: &mut Inputs) -> DataResult<Decimal> {
    let ev = x.enterprise_value()?;
    let invested = positive(x.invested_capital()?, "invested capital")?;
    div(ev, invested, "EV / invested capital")
}

fn growth_premium_share(x: &mut Inputs) -> DataResult<Decimal> {
    let equity = earnings_power_equity(x)?;
    let market_cap = positive(x.market_cap()?, "market capitalisation")?;
    let premium = sub(market_cap, equity, "market cap - EPV equity")?;
    pct(premium, market_cap, "(market cap - EPV equity) / market cap")
}

fn graham_growth_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let eps = x.earnings_per_share()?;
    let g = mul(x.expected_growth_rate()?, HUNDRED, "growth rate")?;
    let yield_pct = positive(mul(x.risk_free_rate()?, HUNDRED, "bond yield")?, "bond yield")?;
    let multiple = linear_score(dec!(8.5), &[(dec!(2), g)], "8.5 + 2g")?;
    let scaled = mul(mul(eps, multiple, "EPS * (8.5 + 2g)")?, dec!(4.4), "Graham growth value")?;
    let value = div(scaled, yield_pct, "Graham growth value")?;
    div(value, x.share_price()?, "Graham growth value / price")
}

// ---------------------------------------------------------------------------
// Market risk
// ---------------------------------------------------------------------------

fn capm_required_return(x: &mut Inputs) -> DataResult<Decimal> {
    mul(x.cost_of_equity()?, HUNDRED, "cost of equity")
}

fn market_premium(x: &mut Inputs) -> DataResult<Decimal> {
    sub(x.market_return()?, x.risk_free_rate()?, "market return - risk-free rate")
}

fn equity_risk_premium(x: &mut Inputs) -> DataResult<Decimal> {
    mul(market_premium(x)?, HUNDRED, "equity risk premium")
}

fn adjusted_beta(x: &mut Inputs) -> DataResult<Decimal> {
    linear_score(dec!(0.33), &[(dec!(0.67), x.beta()?)], "Blume adjustment")
}

fn unlevered_beta_value(x: &mut Inputs) -> DataResult<Decimal> {
    let beta = x.beta()?;
    let t = x.tax_rate()?;
    let de = div(x.total_debt()?, x.market_cap()?, "debt / market cap")?;
    let tax_shielded = mul(sub(Decimal::ONE, t, "1 - tax rate")?, de, "(1 - t) * D/E")?;
    div(beta, add(Decimal::ONE, tax_shielded, "Hamada factor")?, "Hamada unlevering")
}

fn unlevered_beta(x: &mut Inputs) -> DataResult<Decimal> {
    unlevered_beta_value(x)
}

fn financial_risk_premium(x: &mut Inputs) -> DataResult<Decimal> {
    let levered = x.beta()?;
    let unlevered = unlevered_beta_value(x)?;
    let premium = market_premium(x)?;
    let beta_gap = sub(levered, unlevered, "levered - unlevered beta")?;
    mul(mul(beta_gap, premium, "financial risk premium")?, HUNDRED, "financial risk premium")
}

fn excess_return(x: &mut Inputs) -> DataResult<Decimal> {
    sub(x.stock_return()?, x.risk_free_rate()?, "stock return - risk-free rate")
}

fn sharpe_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let excess = excess_return(x)?;
    let sigma = positive(x.return_volatility()?, "return volatility")?;
    div(excess, sigma, "excess return / volatility")
}

fn treynor_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let excess = excess_return(x)?;
    let beta = positive(x.beta()?, "beta")?;
    pct(excess, beta, "excess return / beta")
}

/// `(scale × σ − μ)` in percent, the parametric loss at the 95% tail.
fn parametric_loss(x: &mut Inputs, scale: Decimal, context: &'static str) -> DataResult<Decimal> {
    let sigma = x.return_volatility()?;
    let mu = x.stock_return()?;
    let loss = sub(mul(scale, sigma, context)?, mu, context)?;
    mul(loss, HUNDRED, context)
}

fn value_at_risk_95(x: &mut Inputs) -> DataResult<Decimal> {
    parametric_loss(x, Z_95, "95% value at risk")
}

fn expected_shortfall_95(x: &mut Inputs) -> DataResult<Decimal> {
    let tail_mean = div(math::norm_pdf(Z_95), TAIL_95, "normal tail mean")?;
    parametric_loss(x, tail_mean, "95% expected shortfall")
}

fn after_tax_cost_of_debt(x: &mut Inputs) -> DataResult<Decimal> {
    let kd = x.cost_of_debt()?;
    let t = x.tax_rate()?;
    let after_tax = mul(kd, sub(Decimal::ONE, t, "1 - tax rate")?, "kd * (1 - t)")?;
    mul(after_tax, HUNDRED, "after-tax cost of debt")
}

fn jensens_alpha(x: &mut Inputs) -> DataResult<Decimal> {
    let alpha = sub(x.stock_return()?, x.cost_of_equity()?, "stock return - CAPM return")?;
    mul(alpha, HUNDRED, "Jensen's alpha")
}

fn systematic_risk_share(x: &mut Inputs) -> DataResult<Decimal> {
    let beta = x.beta()?;
    let market_sigma = x.market_volatility()?;
    let sigma = positive(x.return_volatility()?, "return volatility")?;
    let covariance = mul(beta, market_sigma, "beta * market volatility")?;
    let correlation = div(covariance, sigma, "beta * market volatility / volatility")?;
    mul(mul(correlation, correlation, "R-squared")?, HUNDRED, "R-squared")
}

// ---------------------------------------------------------------------------
// Credit risk
// ---------------------------------------------------------------------------

/// One-year Merton distance to default, with the KMV default point
/// (current liabilities plus half of long-term debt).
fn distance_to_default(x: &mut Inputs) -> DataResult<Decimal> {
    let equity = positive(x.market_cap()?, "market capitalisation")?;
    let half_ltd = div(x.long_term_debt()?, Decimal::TWO, "half of long-term debt")?;
    let default_point = positive(
        add(x.current_liabilities()?, half_ltd, "default point")?,
        "default point",
    )?;
    let assets = add(equity, default_point, "asset value")?;
    let sigma_equity = x.return_volatility()?;
    let sigma_assets = positive(
        mul(sigma_equity, div(equity, assets, "equity / asset value")?, "asset volatility")?,
        "asset volatility",
    )?;
    let r = x.risk_free_rate()?;
    let log_ratio = ln(div(assets, default_point, "asset value / default point")?, "ln(V/D)")?;
    let half_variance = div(
        mul(sigma_assets, sigma_assets, "asset variance")?,
        Decimal::TWO,
        "half asset variance",
    )?;
    let drift = sum(&[log_ratio, r, -half_variance], "distance to default drift")?;
    div(drift, sigma_assets, "distance to default")
}

fn merton_distance_to_default(x: &mut Inputs) -> DataResult<Decimal> {
    distance_to_default(x)
}

fn merton_pd(x: &mut Inputs) -> DataResult<Decimal> {
    mul(math::norm_cdf(-distance_to_default(x)?), HUNDRED, "Merton default probability")
}

fn merton_default_probability(x: &mut Inputs) -> DataResult<Decimal> {
    merton_pd(x)
}

fn altman_z_double_prime(x: &mut Inputs) -> DataResult<Decimal> {
    let ta = x.total_assets()?;
    let wc = div(x.working_capital()?, ta, "working capital / total assets")?;
    let re = div(x.retained_earnings()?, ta, "retained earnings / total assets")?;
    let ebit = div(x.operating_income()?, ta, "EBIT / total assets")?;
    let be = div(x.total_equity()?, x.total_liabilities()?, "equity / total liabilities")?;
    weighted_sum(
        &[
            (dec!(6.56), wc),
            (dec!(3.26), re),
            (dec!(6.72), ebit),
            (dec!(1.05), be),
        ],
        "Altman Z''",
    )
}

fn ohlson_default_probability(x: &mut Inputs) -> DataResult<Decimal> {
    let ta = x.total_assets()?;
    let tl = x.total_liabilities()?;
    let ni = x.net_income()?;
    let prior_ni = x.prior_net_income()?;
    // Size term in millions of the reporting currency.
    let size = ln(div(ta, dec!(1000000), "total assets in millions")?, "ln(total assets)")?;
    let leverage = div(tl, ta, "total liabilities / total assets")?;
    let wc = div(x.working_capital()?, ta, "working capital / total assets")?;
    let cl_ca = div(
        x.current_liabilities()?,
        x.current_assets()?,
        "current liabilities / current assets",
    )?;
    let insolvent = if tl > ta { Decimal::ONE } else { Decimal::ZERO };
    let roa = div(ni, ta, "net income / total assets")?;
    let funds = div(x.operating_cash_flow()?, tl, "funds from operations / total liabilities")?;
    let two_losses = if ni < Decimal::ZERO && prior_ni < Decimal::ZERO {
        Decimal::ONE
    } else {
        Decimal::ZERO
    };
    let change = div(
        sub(ni, prior_ni, "change in net income")?,
        add(ni.abs(), prior_ni.abs(), "net income scale")?,
        "scaled change in net income",
    )?;

    let o_score = linear_score(
        dec!(-1.32),
        &[
            (dec!(-0.407), size),
            (dec!(6.03), leverage),
            (dec!(-1.43), wc),
            (dec!(0.0757), cl_ca),
            (dec!(-1.72), insolvent),
            (dec!(-2.37), roa),
            (dec!(-1.83), funds),
            (dec!(0.285), two_losses),
            (dec!(-0.521), change),
        ],
        "Ohlson O-score",
    )?;
    mul(logistic(o_score, "Ohlson O-score")?, HUNDRED, "Ohlson default probability")
}

/// Interest-coverage rating grid: (minimum coverage, spread %, notch score).
const RATING_GRID: &[(Decimal, Decimal, Decimal)] = &[
    (dec!(8.5), dec!(0.63), dec!(15)),
    (dec!(6.5), dec!(0.78), dec!(14)),
    (dec!(5.5), dec!(0.98), dec!(13)),
    (dec!(4.25), dec!(1.08), dec!(12)),
    (dec!(3.0), dec!(1.22), dec!(11)),
    (dec!(2.5), dec!(1.56), dec!(10)),
    (dec!(2.25), dec!(2.00), dec!(9)),
    (dec!(2.0), dec!(2.40), dec!(8)),
    (dec!(1.75), dec!(3.51), dec!(7)),
    (dec!(1.5), dec!(4.21), dec!(6)),
    (dec!(1.25), dec!(5.15), dec!(5)),
    (dec!(0.8), dec!(8.20), dec!(4)),
    (dec!(0.65), dec!(8.64), dec!(3)),
    (dec!(0.2), dec!(11.34), dec!(2)),
];
const DEFAULT_GRADE: (Decimal, Decimal) = (dec!(15.12), dec!(1));

/// (spread %, notch score) implied by interest coverage.
fn synthetic_rating(x: &mut Inputs) -> DataResult<(Decimal, Decimal)> {
    let coverage = div(x.operating_income()?, x.interest_expense()?, "EBIT / interest")?;
    Ok(RATING_GRID
        .iter()
        .find(|(floor, _, _)| coverage >= *floor)
        .map(|(_, spread, score)| (*spread, *score))
        .unwrap_or(DEFAULT_GRADE))
}

fn synthetic_rating_spread(x: &mut Inputs) -> DataResult<Decimal> {
    Ok(synthetic_rating(x)?.0)
}

fn implied_credit_score(x: &mut Inputs) -> DataResult<Decimal> {
    Ok(synthetic_rating(x)?.1)
}

fn interest_coverage_stress(x: &mut Inputs) -> DataResult<Decimal> {
    let stressed_ebit = mul(x.operating_income()?, STRESS_EBIT_FACTOR, "stressed EBIT")?;
    let rate_shock = mul(x.total_debt()?, STRESS_RATE_SHOCK, "rate shock on debt")?;
    let stressed_interest = add(x.interest_expense()?, rate_shock, "stressed interest")?;
    div(stressed_ebit, stressed_interest, "stressed EBIT / stressed interest")
}

fn debt_capacity_utilisation(x: &mut Inputs) -> DataResult<Decimal> {
    let debt = x.total_debt()?;
    let ebitda = positive(x.ebitda()?, "EBITDA")?;
    let capacity = mul(ebitda, DEBT_CAPACITY_MULTIPLE, "debt capacity")?;
    pct(debt, capacity, "total debt / debt capacity")
}

fn fixed_charge_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    let available = sum(
        &[x.ebitda()?, -x.capital_expenditure()?.abs(), -x.income_tax()?],
        "EBITDA - capex - tax",
    )?;
    let charges = add(x.interest_expense()?, x.short_term_debt()?, "fixed charges")?;
    div(available, charges, "(EBITDA - capex - tax) / (interest + short-term debt)")
}

fn cash_flow_leverage(x: &mut Inputs) -> DataResult<Decimal> {
    let debt = x.total_debt()?;
    let ocf = positive(x.operating_cash_flow()?, "operating cash flow")?;
    div(debt, ocf, "total debt / OCF")
}

fn recovery_rate(x: &mut Inputs) -> DataResult<Decimal> {
    let recoverable = mul(x.tangible_assets()?, RECOVERY_HAIRCUT, "recoverable assets")?;
    let rate = pct(recoverable, x.total_liabilities()?, "recoverable assets / liabilities")?;
    Ok(math::clamp(rate, Decimal::ZERO, HUNDRED))
}

fn recovery_rate_estimate(x: &mut Inputs) -> DataResult<Decimal> {
    recovery_rate(x)
}

// Recovery is clamped to 0..=100, so the complement cannot overflow.
fn loss_given_default(x: &mut Inputs) -> DataResult<Decimal> {
    Ok(HUNDRED - recovery_rate(x)?)
}

fn expected_loss(x: &mut Inputs) -> DataResult<Decimal> {
    let pd = merton_pd(x)?;
    let lgd = loss_given_default(x)?;
    div(mul(pd, lgd, "PD * LGD")?, HUNDRED, "expected loss")
}

fn debt_maturity_pressure(x: &mut Inputs) -> DataResult<Decimal> {
    let std = x.short_term_debt()?;
    pct(std, x.total_debt()?, "short-term debt / total debt")
}

fn credit_spread_implied_pd(x: &mut Inputs) -> DataResult<Decimal> {
    let (spread, _) = synthetic_rating(x)?;
    let lgd = positive(loss_given_default(x)?, "loss given default")?;
    pct(spread, lgd, "spread / loss given default")
}

// ---------------------------------------------------------------------------
// Earnings quality
// ---------------------------------------------------------------------------

fn internal_growth_rate(x: &mut Inputs) -> DataResult<Decimal> {
    let ni = positive(x.net_income()?, "net income")?;
    let roa = div(ni, x.total_assets()?, "return on assets")?;
    let payout = div(x.dividends_paid()?.abs(), ni, "payout ratio")?;
    let retention = sub(Decimal::ONE, payout, "retention ratio")?;
    let reinvested = mul(roa, retention, "ROA * b")?;
    let base = sub(Decimal::ONE, reinvested, "1 - ROA * b")?;
    pct(reinvested, base, "ROA * b / (1 - ROA * b)")
}

fn sloan_accrual_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let accruals = sum(
        &[
            x.net_income()?,
            -x.operating_cash_flow()?,
            -x.investing_cash_flow()?,
        ],
        "NI - CFO - CFI",
    )?;
    let assets = x.average_total_assets()?;
    pct(accruals, assets, "(NI - CFO - CFI) / average total assets")
}

fn balance_sheet_accruals(x: &mut Inputs) -> DataResult<Decimal> {
    let change_ca = sub(
        x.current_assets()?,
        x.prior_current_assets()?,
        "change in current assets",
    )?;
    let change_cash = sub(x.cash()?, x.prior_cash()?, "change in cash")?;
    let change_cl = sub(
        x.current_liabilities()?,
        x.prior_current_liabilities()?,
        "change in current liabilities",
    )?;
    let change_std = sub(
        x.short_term_debt()?,
        x.prior_short_term_debt()?,
        "change in short-term debt",
    )?;
    let accruals = sum(
        &[
            change_ca,
            -change_cash,
            -change_cl,
            change_std,
            -x.depreciation_amortisation()?,
        ],
        "balance-sheet accruals",
    )?;
    let assets = x.average_total_assets()?;
    pct(accruals, assets, "balance-sheet accruals / average total assets")
}

fn days_sales_receivable_index(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::dsri(x)
}

fn gross_margin_index(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::gmi(x)
}

fn asset_quality_index(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::aqi(x)
}

fn sales_growth_index(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::sgi(x)
}

fn depreciation_index(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::depi(x)
}

fn sga_index(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::sgai(x)
}

fn leverage_index(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::lvgi(x)
}

fn total_accruals_to_total_assets(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::tata(x)
}

fn cash_revenue_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let revenue = x.revenue()?;
    let receivables_build = sub(
        x.accounts_receivable()?,
        x.prior_accounts_receivable()?,
        "change in receivables",
    )?;
    let collected = sub(revenue, receivables_build, "cash collected")?;
    pct(collected, revenue, "cash collected / revenue")
}

fn operating_efficiency_trend(x: &mut Inputs) -> DataResult<Decimal> {
    let margin = pct(x.operating_income()?, x.revenue()?, "operating margin")?;
    let prior = pct(
        x.prior_operating_income()?,
        x.prior_revenue()?,
        "prior operating margin",
    )?;
    sub(margin, prior, "change in operating margin")
}

fn earnings_stability(x: &mut Inputs) -> DataResult<Decimal> {
    let ni = positive(x.net_income()?, "net income")?;
    let prior = positive(x.prior_net_income()?, "prior net income")?;
    pct(ni.min(prior), ni.max(prior), "smaller / larger net income")
}

// ---------------------------------------------------------------------------
// Model profiles
// ---------------------------------------------------------------------------

const CLOSED_FORM: ModelProfile = ModelProfile {
    base_confidence: dec!(90),
    model_accuracy: None,
};
const MARKET_MODEL: ModelProfile = ModelProfile {
    base_confidence: dec!(80),
    model_accuracy: None,
};
const VALUATION_MODEL: ModelProfile = ModelProfile {
    base_confidence: dec!(75),
    model_accuracy: None,
};
const FORENSIC_INDEX: ModelProfile = ModelProfile {
    base_confidence: dec!(85),
    model_accuracy: Some(dec!(0.76)),
};

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

pub static ADVANCED_METRICS: &[AdvancedDefinition] = &[
    // -- Intrinsic value ----------------------------------------------------
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "two_stage_dcf_value_ratio",
            name_en: "Two-Stage DCF Value to Market Cap",
            name_ar: "قيمة التدفقات المخصومة على مرحلتين إلى القيمة السوقية",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "(PV(5y FCF at g) + PV(terminal at 2.5%) - net_debt) / market_cap",
            description: "Equity value from five years of growth plus a terminal value, relative to market value.",
            calculate: two_stage_dcf_value_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "fcfe_value_ratio",
            name_en: "FCFE Value to Market Cap",
            name_ar: "قيمة التدفق النقدي الحر لحملة الأسهم إلى القيمة السوقية",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "(FCF - interest * (1 - t)) * (1 + g) / (cost_of_equity - g) / market_cap",
            description: "Value of free cash flow to equity as a growing perpetuity, relative to market value.",
            calculate: fcfe_value_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "h_model_value_ratio",
            name_en: "H-Model Value to Price",
            name_ar: "قيمة نموذج H إلى السعر",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "D0 * ((1 + gL) + H * (gS - gL)) / (cost_of_equity - gL) / share_price",
            description: "Dividend value with growth fading linearly to the long-run rate.",
            calculate: h_model_value_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "justified_pe_ratio",
            name_en: "Justified to Actual P/E",
            name_ar: "مضاعف الربحية المبرر إلى الفعلي",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "(payout * (1 + g) / (cost_of_equity - g)) / (share_price / eps)",
            description: "Fundamentally justified earnings multiple relative to the multiple the market pays.",
            calculate: justified_pe_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "justified_pb_ratio",
            name_en: "Justified to Actual P/B",
            name_ar: "مضاعف القيمة الدفترية المبرر إلى الفعلي",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "((roe - g) / (cost_of_equity - g)) / (share_price / book_value_per_share)",
            description: "Fundamentally justified book multiple relative to the multiple the market pays.",
            calculate: justified_pb_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "residual_income_value_ratio",
            name_en: "Residual Income Value to Price",
            name_ar: "قيمة الدخل المتبقي إلى السعر",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "(bvps + bvps * (roe - cost_of_equity) / (cost_of_equity - g)) / share_price",
            description: "Book value plus capitalised excess returns, relative to price.",
            calculate: residual_income_value_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "economic_value_added_margin",
            name_en: "EVA Margin",
            name_ar: "هامش القيمة الاقتصادية المضافة",
            category: IntrinsicValue,
            unit: Percent,
            formula: "(nopat - wacc * invested_capital) / revenue * 100",
            description: "Economic profit after a full capital charge, per unit of sales.",
            calculate: economic_value_added_margin,
            benchmark: dec!(5),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(8), Strong), (dec!(4), Sound), (dec!(0), Moderate), (dec!(-4), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "implied_growth_rate",
            name_en: "Market-Implied Growth",
            name_ar: "معدل النمو الضمني في السعر",
            category: IntrinsicValue,
            unit: Percent,
            formula: "(cost_of_equity * share_price - dps) / (share_price + dps) * 100",
            description: "Perpetual dividend growth the current price assumes.",
            calculate: implied_growth_rate,
            benchmark: dec!(5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(3), Strong), (dec!(5), Sound), (dec!(7), Moderate), (dec!(10), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "earnings_power_value_ratio",
            name_en: "Earnings Power Value to Market Cap",
            name_ar: "قيمة القدرة الربحية إلى القيمة السوقية",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "(nopat / wacc - net_debt) / market_cap",
            description: "No-growth value of current earnings relative to market value.",
            calculate: earnings_power_value_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.2), Strong), (dec!(0.9), Sound), (dec!(0.6), Moderate), (dec!(0.4), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "ev_to_invested_capital",
            name_en: "EV to Invested Capital",
            name_ar: "قيمة المنشأة إلى رأس المال المستثمر",
            category: IntrinsicValue,
            unit: Times,
            formula: "enterprise_value / (total_debt + total_equity - cash)",
            description: "Market premium over the capital invested in the business.",
            calculate: ev_to_invested_capital,
            benchmark: dec!(2),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.5), Strong), (dec!(2), Sound), (dec!(3), Moderate), (dec!(5), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "growth_premium_share",
            name_en: "Growth Premium Share",
            name_ar: "حصة علاوة النمو من القيمة السوقية",
            category: IntrinsicValue,
            unit: Percent,
            formula: "(market_cap - epv_equity) / market_cap * 100",
            description: "Share of market value that depends on future growth.",
            calculate: growth_premium_share,
            benchmark: dec!(40),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(20), Strong), (dec!(40), Sound), (dec!(60), Moderate), (dec!(80), Weak)], Alarming),
        },
        profile: VALUATION_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "graham_growth_value_ratio",
            name_en: "Graham Growth Value to Price",
            name_ar: "قيمة جراهام للنمو إلى السعر",
            category: IntrinsicValue,
            unit: Ratio,
            formula: "eps * (8.5 + 2g) * 4.4 / (risk_free_rate * 100) / share_price",
            description: "Graham's revised growth formula relative to price.",
            calculate: graham_growth_value_ratio,
            benchmark: dec!(1.0),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(70),
            model_accuracy: None,
        },
    },
    // -- Market risk --------------------------------------------------------
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "capm_required_return",
            name_en: "CAPM Required Return",
            name_ar: "العائد المطلوب وفق نموذج تسعير الأصول",
            category: MarketRisk,
            unit: Percent,
            formula: "(risk_free_rate + beta * (market_return - risk_free_rate)) * 100",
            description: "Return required for bearing the stock's systematic risk.",
            calculate: capm_required_return,
            benchmark: dec!(10),
            policy: Optimal,
            reading: Reading::at_most(&[(dec!(8), Strong), (dec!(10), Sound), (dec!(13), Moderate), (dec!(16), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "equity_risk_premium",
            name_en: "Equity Risk Premium",
            name_ar: "علاوة مخاطر الأسهم",
            category: MarketRisk,
            unit: Percent,
            formula: "(market_return - risk_free_rate) * 100",
            description: "Excess return the market pays over the risk-free rate.",
            calculate: equity_risk_premium,
            benchmark: dec!(5.5),
            policy: Optimal,
            reading: Reading::at_most(&[(dec!(4), Strong), (dec!(6), Sound), (dec!(8), Moderate), (dec!(10), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "adjusted_beta",
            name_en: "Adjusted Beta",
            name_ar: "معامل بيتا المعدل",
            category: MarketRisk,
            unit: Ratio,
            formula: "0.67 * beta + 0.33",
            description: "Blume-adjusted beta, pulled towards the market average of 1.",
            calculate: adjusted_beta,
            benchmark: dec!(1.0),
            policy: Optimal,
            reading: Reading::at_most(&[(dec!(0.8), Strong), (dec!(1.0), Sound), (dec!(1.2), Moderate), (dec!(1.5), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(85),
            model_accuracy: None,
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "unlevered_beta",
            name_en: "Unlevered Beta",
            name_ar: "معامل بيتا غير المرفوع",
            category: MarketRisk,
            unit: Ratio,
            formula: "beta / (1 + (1 - tax_rate) * total_debt / market_cap)",
            description: "Business risk with the effect of financial leverage removed (Hamada).",
            calculate: unlevered_beta,
            benchmark: dec!(0.9),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(0.7), Strong), (dec!(0.9), Sound), (dec!(1.1), Moderate), (dec!(1.4), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "financial_risk_premium",
            name_en: "Financial Risk Premium",
            name_ar: "علاوة المخاطر المالية",
            category: MarketRisk,
            unit: Percent,
            formula: "(beta - unlevered_beta) * (market_return - risk_free_rate) * 100",
            description: "Part of the equity premium caused by leverage.",
            calculate: financial_risk_premium,
            benchmark: dec!(1.5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(0.5), Strong), (dec!(1.5), Sound), (dec!(2.5), Moderate), (dec!(4), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "sharpe_ratio",
            name_en: "Sharpe Ratio",
            name_ar: "نسبة شارب",
            category: MarketRisk,
            unit: Ratio,
            formula: "(stock_return - risk_free_rate) / return_volatility",
            description: "Excess return per unit of total risk.",
            calculate: sharpe_ratio,
            benchmark: dec!(0.5),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(1), Strong), (dec!(0.5), Sound), (dec!(0.2), Moderate), (dec!(0), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "treynor_ratio",
            name_en: "Treynor Ratio",
            name_ar: "نسبة ترينور",
            category: MarketRisk,
            unit: Percent,
            formula: "(stock_return - risk_free_rate) / beta * 100",
            description: "Excess return per unit of systematic risk.",
            calculate: treynor_ratio,
            benchmark: dec!(5),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(8), Strong), (dec!(5), Sound), (dec!(2), Moderate), (dec!(0), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "value_at_risk_95",
            name_en: "Value at Risk (95%)",
            name_ar: "القيمة المعرضة للخطر عند 95%",
            category: MarketRisk,
            unit: Percent,
            formula: "(1.645 * return_volatility - stock_return) * 100",
            description: "Parametric one-year loss not exceeded with 95% confidence.",
            calculate: value_at_risk_95,
            benchmark: dec!(20),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(15), Strong), (dec!(20), Sound), (dec!(30), Moderate), (dec!(45), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(75),
            model_accuracy: Some(dec!(0.95)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "expected_shortfall_95",
            name_en: "Expected Shortfall (95%)",
            name_ar: "العجز المتوقع عند 95%",
            category: MarketRisk,
            unit: Percent,
            formula: "(return_volatility * pdf(1.645) / 0.05 - stock_return) * 100",
            description: "Average one-year loss in the worst 5% of outcomes.",
            calculate: expected_shortfall_95,
            benchmark: dec!(25),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(20), Strong), (dec!(25), Sound), (dec!(35), Moderate), (dec!(55), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(75),
            model_accuracy: Some(dec!(0.95)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "after_tax_cost_of_debt",
            name_en: "After-Tax Cost of Debt",
            name_ar: "تكلفة الدين بعد الضريبة",
            category: MarketRisk,
            unit: Percent,
            formula: "interest_expense / total_debt * (1 - tax_rate) * 100",
            description: "Effective borrowing cost net of the interest tax shield.",
            calculate: after_tax_cost_of_debt,
            benchmark: dec!(5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(3.5), Strong), (dec!(5), Sound), (dec!(7), Moderate), (dec!(10), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "jensens_alpha",
            name_en: "Jensen's Alpha",
            name_ar: "ألفا جنسن",
            category: MarketRisk,
            unit: Percent,
            formula: "(stock_return - capm_required_return) * 100",
            description: "Return earned above what CAPM requires for the stock's beta.",
            calculate: jensens_alpha,
            benchmark: dec!(2),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(3), Strong), (dec!(1), Sound), (dec!(0), Moderate), (dec!(-3), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "systematic_risk_share",
            name_en: "Systematic Risk Share",
            name_ar: "حصة المخاطر المنتظمة",
            category: MarketRisk,
            unit: Percent,
            formula: "(beta * market_volatility / return_volatility)^2 * 100",
            description: "Share of return variance explained by the market.",
            calculate: systematic_risk_share,
            benchmark: dec!(50),
            policy: Optimal,
            reading: Reading::at_least(&[(dec!(60), Strong), (dec!(45), Sound), (dec!(30), Moderate), (dec!(15), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    // -- Credit risk --------------------------------------------------------
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "merton_distance_to_default",
            name_en: "Merton Distance to Default",
            name_ar: "المسافة إلى التعثر وفق ميرتون",
            category: CreditRisk,
            unit: Score,
            formula: "(ln(V / D) + r - sigma_v^2 / 2) / sigma_v",
            description: "Standard deviations between asset value and the default point over one year.",
            calculate: merton_distance_to_default,
            benchmark: dec!(3),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(4), Strong), (dec!(3), Sound), (dec!(2), Moderate), (dec!(1), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(80),
            model_accuracy: Some(dec!(0.80)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "merton_default_probability",
            name_en: "Merton Default Probability",
            name_ar: "احتمال التعثر وفق ميرتون",
            category: CreditRisk,
            unit: Percent,
            formula: "N(-distance_to_default) * 100",
            description: "One-year probability that asset value falls below the default point.",
            calculate: merton_default_probability,
            benchmark: dec!(1),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(0.5), Strong), (dec!(1), Sound), (dec!(3), Moderate), (dec!(10), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(80),
            model_accuracy: Some(dec!(0.80)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "altman_z_double_prime",
            name_en: "Altman Z''-Score",
            name_ar: "نموذج ألتمان Z للأسواق الناشئة",
            category: CreditRisk,
            unit: Score,
            formula: "6.56*WC/TA + 3.26*RE/TA + 6.72*EBIT/TA + 1.05*BVE/TL",
            description: "Four-ratio Altman variant for non-manufacturers; below 1.1 is the distress zone.",
            calculate: altman_z_double_prime,
            benchmark: dec!(2.6),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(2.6), Strong), (dec!(2), Sound), (dec!(1.1), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(85),
            model_accuracy: Some(dec!(0.84)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "ohlson_default_probability",
            name_en: "Ohlson Default Probability",
            name_ar: "احتمال التعثر وفق أولسون",
            category: CreditRisk,
            unit: Percent,
            formula: "logistic(O-score) * 100",
            description: "Nine-factor logit estimate of the probability of bankruptcy within two years.",
            calculate: ohlson_default_probability,
            benchmark: dec!(5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(2), Strong), (dec!(5), Sound), (dec!(15), Moderate), (dec!(40), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(80),
            model_accuracy: Some(dec!(0.85)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "synthetic_rating_spread",
            name_en: "Synthetic Rating Spread",
            name_ar: "هامش الائتمان وفق التصنيف التقديري",
            category: CreditRisk,
            unit: Percent,
            formula: "default spread for the rating implied by operating_income / interest_expense",
            description: "Credit spread a lender would charge at the rating implied by interest coverage.",
            calculate: synthetic_rating_spread,
            benchmark: dec!(1.5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1), Strong), (dec!(1.6), Sound), (dec!(3), Moderate), (dec!(6), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "implied_credit_score",
            name_en: "Implied Credit Score",
            name_ar: "درجة الائتمان الضمنية",
            category: CreditRisk,
            unit: Score,
            formula: "rating notch implied by operating_income / interest_expense (AAA = 15, D = 1)",
            description: "Rating notch implied by interest coverage, on a 1 to 15 scale.",
            calculate: implied_credit_score,
            benchmark: dec!(11),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(13), Strong), (dec!(10), Sound), (dec!(8), Moderate), (dec!(5), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "interest_coverage_stress",
            name_en: "Stressed Interest Coverage",
            name_ar: "تغطية الفوائد تحت الضغط",
            category: CreditRisk,
            unit: Times,
            formula: "0.8 * operating_income / (interest_expense + 0.02 * total_debt)",
            description: "Interest coverage after a 20% earnings fall and a 200bp rate rise.",
            calculate: interest_coverage_stress,
            benchmark: dec!(3),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(4), Strong), (dec!(2.5), Sound), (dec!(1.5), Moderate), (dec!(1), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "debt_capacity_utilisation",
            name_en: "Debt Capacity Utilisation",
            name_ar: "نسبة استغلال الطاقة الاقتراضية",
            category: CreditRisk,
            unit: Percent,
            formula: "total_debt / (3 * ebitda) * 100",
            description: "Debt drawn against a capacity of three times EBITDA.",
            calculate: debt_capacity_utilisation,
            benchmark: dec!(70),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(50), Strong), (dec!(70), Sound), (dec!(90), Moderate), (dec!(120), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "fixed_charge_coverage",
            name_en: "Fixed Charge Coverage",
            name_ar: "تغطية الأعباء الثابتة",
            category: CreditRisk,
            unit: Times,
            formula: "(ebitda - |capital_expenditure| - income_tax) / (interest_expense + short_term_debt)",
            description: "Cash earnings after capex and tax relative to interest and maturing debt.",
            calculate: fixed_charge_coverage,
            benchmark: dec!(1.25),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(2), Strong), (dec!(1.25), Sound), (dec!(1), Moderate), (dec!(0.75), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "cash_flow_leverage",
            name_en: "Cash Flow Leverage",
            name_ar: "الرافعة على أساس التدفق النقدي",
            category: CreditRisk,
            unit: Times,
            formula: "total_debt / operating_cash_flow",
            description: "Years of operating cash flow needed to repay all debt.",
            calculate: cash_flow_leverage,
            benchmark: dec!(3),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(2), Strong), (dec!(3), Sound), (dec!(4.5), Moderate), (dec!(7), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "recovery_rate_estimate",
            name_en: "Recovery Rate Estimate",
            name_ar: "معدل الاسترداد التقديري",
            category: CreditRisk,
            unit: Percent,
            formula: "min(0.7 * tangible_assets / total_liabilities, 1) * 100",
            description: "Share of liabilities recoverable from tangible assets after a liquidation haircut.",
            calculate: recovery_rate_estimate,
            benchmark: dec!(60),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(80), Strong), (dec!(60), Sound), (dec!(40), Moderate), (dec!(25), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(70),
            model_accuracy: None,
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "loss_given_default",
            name_en: "Loss Given Default",
            name_ar: "الخسارة عند التعثر",
            category: CreditRisk,
            unit: Percent,
            formula: "100 - recovery_rate_estimate",
            description: "Share of liabilities lost if the company defaults.",
            calculate: loss_given_default,
            benchmark: dec!(40),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(20), Strong), (dec!(40), Sound), (dec!(60), Moderate), (dec!(75), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(70),
            model_accuracy: None,
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "expected_loss",
            name_en: "Expected Credit Loss",
            name_ar: "الخسارة الائتمانية المتوقعة",
            category: CreditRisk,
            unit: Percent,
            formula: "merton_default_probability * loss_given_default / 100",
            description: "One-year expected loss per unit of exposure.",
            calculate: expected_loss,
            benchmark: dec!(0.5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(0.25), Strong), (dec!(0.5), Sound), (dec!(1.5), Moderate), (dec!(5), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(70),
            model_accuracy: Some(dec!(0.80)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "debt_maturity_pressure",
            name_en: "Debt Maturity Pressure",
            name_ar: "ضغط استحقاق الديون",
            category: CreditRisk,
            unit: Percent,
            formula: "short_term_debt / total_debt * 100",
            description: "Share of borrowing that must be repaid or refinanced within a year.",
            calculate: debt_maturity_pressure,
            benchmark: dec!(30),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(20), Strong), (dec!(30), Sound), (dec!(45), Moderate), (dec!(65), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "credit_spread_implied_pd",
            name_en: "Spread-Implied Default Probability",
            name_ar: "احتمال التعثر الضمني في الهامش الائتماني",
            category: CreditRisk,
            unit: Percent,
            formula: "synthetic_rating_spread / (loss_given_default / 100)",
            description: "Annual default probability a lender prices in at the synthetic spread.",
            calculate: credit_spread_implied_pd,
            benchmark: dec!(2.5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.5), Strong), (dec!(2.5), Sound), (dec!(5), Moderate), (dec!(10), Weak)], Alarming),
        },
        profile: MARKET_MODEL,
    },
    // -- Earnings quality ---------------------------------------------------
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "internal_growth_rate",
            name_en: "Internal Growth Rate",
            name_ar: "معدل النمو الداخلي",
            category: EarningsQuality,
            unit: Percent,
            formula: "roa * b / (1 - roa * b) * 100",
            description: "Growth fundable from retained earnings without new external capital.",
            calculate: internal_growth_rate,
            benchmark: dec!(5),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(8), Strong), (dec!(5), Sound), (dec!(2), Moderate), (dec!(0.5), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "sloan_accrual_ratio",
            name_en: "Sloan Accrual Ratio",
            name_ar: "نسبة المستحقات وفق سلون",
            category: EarningsQuality,
            unit: Percent,
            formula: "(net_income - operating_cash_flow - investing_cash_flow) / average_total_assets * 100",
            description: "Earnings not supported by operating or investing cash flows.",
            calculate: sloan_accrual_ratio,
            benchmark: dec!(10),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(0), Strong), (dec!(10), Sound), (dec!(15), Moderate), (dec!(25), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(85),
            model_accuracy: Some(dec!(0.70)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "balance_sheet_accruals",
            name_en: "Balance-Sheet Accruals",
            name_ar: "مستحقات الميزانية",
            category: EarningsQuality,
            unit: Percent,
            formula: "((dCA - dCash) - (dCL - dSTD) - D&A) / average_total_assets * 100",
            description: "Working-capital accruals net of depreciation, scaled by assets.",
            calculate: balance_sheet_accruals,
            benchmark: dec!(5),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(0), Strong), (dec!(5), Sound), (dec!(10), Moderate), (dec!(20), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(85),
            model_accuracy: Some(dec!(0.70)),
        },
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "days_sales_receivable_index",
            name_en: "Days Sales in Receivables Index",
            name_ar: "مؤشر أيام المبيعات في الذمم المدينة",
            category: EarningsQuality,
            unit: Ratio,
            formula: "(AR / revenue) / (prior AR / prior revenue)",
            description: "Build-up of receivables relative to sales; high values can signal revenue inflation.",
            calculate: days_sales_receivable_index,
            benchmark: dec!(1.0),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.0), Strong), (dec!(1.1), Sound), (dec!(1.3), Moderate), (dec!(1.465), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "gross_margin_index",
            name_en: "Gross Margin Index",
            name_ar: "مؤشر هامش الربح الإجمالي",
            category: EarningsQuality,
            unit: Ratio,
            formula: "prior gross margin / gross margin",
            description: "Deterioration of gross margin; above 1 means margins shrank.",
            calculate: gross_margin_index,
            benchmark: dec!(1.0),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.0), Strong), (dec!(1.05), Sound), (dec!(1.193), Moderate), (dec!(1.4), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "asset_quality_index",
            name_en: "Asset Quality Index",
            name_ar: "مؤشر جودة الأصول",
            category: EarningsQuality,
            unit: Ratio,
            formula: "(1 - (CA + PPE) / TA) / prior (1 - (CA + PPE) / TA)",
            description: "Growth in soft assets; high values can signal capitalised costs.",
            calculate: asset_quality_index,
            benchmark: dec!(1.0),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.0), Strong), (dec!(1.1), Sound), (dec!(1.254), Moderate), (dec!(1.5), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "sales_growth_index",
            name_en: "Sales Growth Index",
            name_ar: "مؤشر نمو المبيعات",
            category: EarningsQuality,
            unit: Ratio,
            formula: "revenue / prior revenue",
            description: "Sales growth; rapid growth raises pressure to sustain reported results.",
            calculate: sales_growth_index,
            benchmark: dec!(1.1),
            policy: Optimal,
            reading: Reading::at_most(&[(dec!(1.1), Strong), (dec!(1.2), Sound), (dec!(1.4), Moderate), (dec!(1.6), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "depreciation_index",
            name_en: "Depreciation Index",
            name_ar: "مؤشر الإهلاك",
            category: EarningsQuality,
            unit: Ratio,
            formula: "prior D&A rate / D&A rate, rate = D&A / (D&A + PPE)",
            description: "Slowing depreciation; above 1 can signal stretched asset lives.",
            calculate: depreciation_index,
            benchmark: dec!(1.0),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.0), Strong), (dec!(1.1), Sound), (dec!(1.3), Moderate), (dec!(1.5), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "sga_index",
            name_en: "SG&A Index",
            name_ar: "مؤشر المصاريف البيعية والإدارية",
            category: EarningsQuality,
            unit: Ratio,
            formula: "(SG&A / revenue) / (prior SG&A / prior revenue)",
            description: "Change in overhead intensity relative to the prior period.",
            calculate: sga_index,
            benchmark: dec!(1.0),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.0), Strong), (dec!(1.05), Sound), (dec!(1.2), Moderate), (dec!(1.4), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "leverage_index",
            name_en: "Leverage Index",
            name_ar: "مؤشر الرافعة",
            category: EarningsQuality,
            unit: Ratio,
            formula: "((CL + LTD) / TA) / prior ((CL + LTD) / TA)",
            description: "Change in balance-sheet leverage relative to the prior period.",
            calculate: leverage_index,
            benchmark: dec!(1.0),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(1.0), Strong), (dec!(1.05), Sound), (dec!(1.2), Moderate), (dec!(1.4), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "total_accruals_to_total_assets",
            name_en: "Total Accruals to Total Assets",
            name_ar: "إجمالي المستحقات إلى إجمالي الأصول",
            category: EarningsQuality,
            unit: Ratio,
            formula: "(net_income - operating_cash_flow) / total_assets",
            description: "Beneish accrual term; positive values mean profits exceed cash generation.",
            calculate: total_accruals_to_total_assets,
            benchmark: dec!(0.03),
            policy: LowerIsBetter,
            reading: Reading::at_most(&[(dec!(0), Strong), (dec!(0.03), Sound), (dec!(0.06), Moderate), (dec!(0.1), Weak)], Alarming),
        },
        profile: FORENSIC_INDEX,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "cash_revenue_ratio",
            name_en: "Cash Revenue Ratio",
            name_ar: "نسبة الإيرادات المحصلة نقداً",
            category: EarningsQuality,
            unit: Percent,
            formula: "(revenue - (AR - prior AR)) / revenue * 100",
            description: "Share of reported sales collected in cash during the period.",
            calculate: cash_revenue_ratio,
            benchmark: dec!(98),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(100), Strong), (dec!(97), Sound), (dec!(93), Moderate), (dec!(88), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "operating_efficiency_trend",
            name_en: "Operating Margin Trend",
            name_ar: "اتجاه الكفاءة التشغيلية",
            category: EarningsQuality,
            unit: Percent,
            formula: "operating_margin - prior operating_margin",
            description: "Change in operating margin in percentage points.",
            calculate: operating_efficiency_trend,
            benchmark: dec!(1),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(2), Strong), (dec!(0.5), Sound), (dec!(-0.5), Moderate), (dec!(-3), Weak)], Alarming),
        },
        profile: CLOSED_FORM,
    },
    AdvancedDefinition {
        metric: MetricDefinition {
            id: "earnings_stability",
            name_en: "Earnings Stability",
            name_ar: "استقرار الأرباح",
            category: EarningsQuality,
            unit: Percent,
            formula: "min(net_income, prior net_income) / max(net_income, prior net_income) * 100",
            description: "Closeness of this period's profit to last period's.",
            calculate: earnings_stability,
            benchmark: dec!(85),
            policy: HigherIsBetter,
            reading: Reading::at_least(&[(dec!(90), Strong), (dec!(80), Sound), (dec!(65), Moderate), (dec!(45), Weak)], Alarming),
        },
        profile: ModelProfile {
            base_confidence: dec!(80),
            model_accuracy: None,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FinancialData;
    use crate::error::DataError;
    use pretty_assertions::assert_eq;

    fn company() -> FinancialData {
        FinancialData {
            total_assets: Some(dec!(1000)),
            current_assets: Some(dec!(400)),
            current_liabilities: Some(dec!(200)),
            total_liabilities: Some(dec!(500)),
            total_equity: Some(dec!(500)),
            long_term_debt: Some(dec!(200)),
            short_term_debt: Some(dec!(50)),
            cash: Some(dec!(100)),
            intangible_assets: Some(dec!(50)),
            goodwill: Some(dec!(50)),
            operating_income: Some(dec!(200)),
            interest_expense: Some(dec!(40)),
            net_income: Some(dec!(120)),
            share_price: Some(dec!(20)),
            shares_outstanding: Some(dec!(50)),
            beta: Some(dec!(1.2)),
            risk_free_rate: Some(dec!(0.04)),
            market_return: Some(dec!(0.09)),
            stock_return: Some(dec!(0.10)),
            return_volatility: Some(dec!(0.20)),
            ..FinancialData::default()
        }
    }

    fn run(calc: fn(&mut Inputs) -> DataResult<Decimal>, data: &FinancialData) -> DataResult<Decimal> {
        calc(&mut Inputs::new(data))
    }

    #[test]
    fn test_synthetic_rating_uses_coverage_grid() {
        let data = company();
        // Coverage 5.0 lands in the 4.25 band.
        assert_eq!(run(synthetic_rating_spread, &data).unwrap(), dec!(1.08));
        assert_eq!(run(implied_credit_score, &data).unwrap(), dec!(12));
    }

    #[test]
    fn test_rating_below_grid_defaults() {
        let mut data = company();
        data.operating_income = Some(dec!(4));
        assert_eq!(run(implied_credit_score, &data).unwrap(), dec!(1));
    }

    #[test]
    fn test_parametric_var() {
        let data = company();
        assert_eq!(run(value_at_risk_95, &data).unwrap(), dec!(22.9));
        let es = run(expected_shortfall_95, &data).unwrap();
        assert!(es > dec!(22.9), "shortfall {es} should exceed VaR");
    }

    #[test]
    fn test_adjusted_beta() {
        assert_eq!(run(adjusted_beta, &company()).unwrap(), dec!(1.134));
    }

    #[test]
    fn test_recovery_and_loss_sum_to_hundred() {
        let data = company();
        // 0.7 * 900 / 500 = 126% is capped at 100.
        assert_eq!(run(recovery_rate_estimate, &data).unwrap(), dec!(100));
        assert_eq!(run(loss_given_default, &data).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_merton_distance_is_finite_and_ordered() {
        let data = company();
        let dd = run(merton_distance_to_default, &data).unwrap();
        let pd = run(merton_default_probability, &data).unwrap();
        assert!(dd > Decimal::ZERO);
        assert!(pd < dec!(50));
    }

    #[test]
    fn test_merton_requires_volatility() {
        let mut data = company();
        data.return_volatility = Some(Decimal::ZERO);
        match run(merton_distance_to_default, &data) {
            Err(DataError::Undefined { context, .. }) => assert_eq!(context, "asset volatility"),
            other => panic!("Expected Undefined, got {other:?}"),
        }
    }

    #[test]
    fn test_earnings_stability_needs_prior_profit() {
        let mut data = company();
        assert!(run(earnings_stability, &data).is_err());
        data.prior_period = Some(Box::new(FinancialData {
            net_income: Some(dec!(100)),
            ..FinancialData::default()
        }));
        let value = run(earnings_stability, &data).unwrap();
        assert_eq!(value.round_dp(2), dec!(83.33));
    }

    #[test]
    fn test_catalog_shape() {
        let count = |c| ADVANCED_METRICS.iter().filter(|d| d.metric.category == c).count();
        assert_eq!(ADVANCED_METRICS.len(), 53);
        assert_eq!(count(IntrinsicValue), 12);
        assert_eq!(count(MarketRisk), 12);
        assert_eq!(count(CreditRisk), 15);
        assert_eq!(count(EarningsQuality), 14);
    }

    #[test]
    fn test_profiles_are_in_range() {
        for def in ADVANCED_METRICS {
            assert!(def.profile.base_confidence <= HUNDRED, "{}", def.metric.id);
            if let Some(acc) = def.profile.model_accuracy {
                assert!(acc > Decimal::ZERO && acc <= Decimal::ONE, "{}", def.metric.id);
            }
        }
    }
}
