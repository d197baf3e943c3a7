//! Applied catalog: 21 model-based metrics.
//!
//! Valuation (7), performance drivers (7) and distress models (7). Values
//! that compare an intrinsic estimate with the market are expressed as
//! `estimate / price`, so 1.0 means fairly priced.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::definition::{Category::*, MetricDefinition, Unit::*};
use crate::catalog::forensic;
use crate::classification::{Policy::*, Reading, Tone::*};
use crate::data::Inputs;
use crate::math::{
    add, div, linear_score, logistic, mul, pct, perpetuity_spread, positive, sqrt, sub, sum, weighted_sum,
    DataResult, HUNDRED,
};

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

fn graham_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let eps = positive(x.earnings_per_share()?, "earnings per share")?;
    let bvps = positive(x.book_value_per_share()?, "book value per share")?;
    let product = mul(mul(dec!(22.5), eps, "22.5 * EPS")?, bvps, "22.5 * EPS * BVPS")?;
    let graham_number = sqrt(product, "Graham number")?;
    div(graham_number, x.share_price()?, "Graham number / price")
}

fn dividend_discount_value_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let dps = x.dividends_per_share()?;
    let g = x.expected_growth_rate()?;
    let ke = x.cost_of_equity()?;
    let spread = perpetuity_spread(ke, g, "dividend discount model")?;
    let next_dividend = mul(dps, add(Decimal::ONE, g, "1 + g")?, "D1")?;
    let value = div(next_dividend, spread, "D1 / (ke - g)")?;
    div(value, x.share_price()?, "DDM value / price")
}

fn capm_cost_of_equity(x: &mut Inputs) -> DataResult<Decimal> {
    mul(x.cost_of_equity()?, HUNDRED, "cost of equity")
}

fn weighted_average_cost_of_capital(x: &mut Inputs) -> DataResult<Decimal> {
    mul(x.wacc()?, HUNDRED, "WACC")
}

fn economic_value_added_spread(x: &mut Inputs) -> DataResult<Decimal> {
    let roic = div(x.nopat()?, x.invested_capital()?, "NOPAT / invested capital")?;
    mul(sub(roic, x.wacc()?, "ROIC - WACC")?, HUNDRED, "EVA spread")
}

fn residual_income_spread(x: &mut Inputs) -> DataResult<Decimal> {
    let roe = div(x.net_income()?, x.total_equity()?, "net income / equity")?;
    mul(sub(roe, x.cost_of_equity()?, "ROE - ke")?, HUNDRED, "residual income spread")
}

fn dcf_value_to_enterprise_value(x: &mut Inputs) -> DataResult<Decimal> {
    let fcf = x.free_cash_flow()?;
    let g = x.expected_growth_rate()?;
    let wacc = x.wacc()?;
    let spread = perpetuity_spread(wacc, g, "single-stage DCF")?;
    let next_fcf = mul(fcf, add(Decimal::ONE, g, "1 + g")?, "FCF1")?;
    let value = div(next_fcf, spread, "FCF1 / (WACC - g)")?;
    let ev = positive(x.enterprise_value()?, "enterprise value")?;
    div(value, ev, "DCF value / enterprise value")
}

// ---------------------------------------------------------------------------
// Performance drivers
// ---------------------------------------------------------------------------

fn dupont_return_on_equity(x: &mut Inputs) -> DataResult<Decimal> {
    let revenue = x.revenue()?;
    let assets = x.total_assets()?;
    let margin = div(x.net_income()?, revenue, "net margin")?;
    let turnover = div(revenue, assets, "asset turnover")?;
    let multiplier = div(assets, x.total_equity()?, "equity multiplier")?;
    [turnover, multiplier, HUNDRED]
        .into_iter()
        .try_fold(margin, |acc, factor| mul(acc, factor, "DuPont ROE"))
}

fn dupont_tax_burden(x: &mut Inputs) -> DataResult<Decimal> {
    let pbt = x.pre_tax_income()?;
    div(x.net_income()?, pbt, "net income / pre-tax income")
}

fn dupont_interest_burden(x: &mut Inputs) -> DataResult<Decimal> {
    let pbt = x.pre_tax_income()?;
    div(pbt, x.operating_income()?, "pre-tax income / EBIT")
}

/// Revenue at which gross profit exactly covers operating expenses.
fn breakeven_revenue(x: &mut Inputs) -> DataResult<Decimal> {
    let revenue = x.revenue()?;
    let contribution = positive(
        div(x.gross_profit()?, revenue, "contribution margin")?,
        "contribution margin",
    )?;
    div(x.operating_expenses()?, contribution, "fixed costs / contribution margin")
}

fn breakeven_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    let breakeven = breakeven_revenue(x)?;
    div(x.revenue()?, breakeven, "revenue / breakeven revenue")
}

fn margin_of_safety(x: &mut Inputs) -> DataResult<Decimal> {
    let breakeven = breakeven_revenue(x)?;
    let revenue = x.revenue()?;
    let cushion = sub(revenue, breakeven, "revenue - breakeven")?;
    pct(cushion, revenue, "(revenue - breakeven) / revenue")
}

fn degree_of_financial_leverage(x: &mut Inputs) -> DataResult<Decimal> {
    let ebit = x.operating_income()?;
    let after_interest = positive(
        sub(ebit, x.interest_expense()?, "EBIT - interest")?,
        "EBIT - interest",
    )?;
    div(ebit, after_interest, "EBIT / (EBIT - interest)")
}

fn degree_of_combined_leverage(x: &mut Inputs) -> DataResult<Decimal> {
    let contribution = x.gross_profit()?;
    let after_interest = positive(
        sub(x.operating_income()?, x.interest_expense()?, "EBIT - interest")?,
        "EBIT - interest",
    )?;
    div(contribution, after_interest, "contribution / (EBIT - interest)")
}

// ---------------------------------------------------------------------------
// Distress models
// ---------------------------------------------------------------------------

/// Ratios shared by the Z-score family, all scaled by total assets.
struct ZInputs {
    working_capital: Decimal,
    retained_earnings: Decimal,
    ebit: Decimal,
    revenue: Decimal,
}

fn z_inputs(x: &mut Inputs) -> DataResult<ZInputs> {
    let ta = x.total_assets()?;
    Ok(ZInputs {
        working_capital: div(x.working_capital()?, ta, "working capital / total assets")?,
        retained_earnings: div(x.retained_earnings()?, ta, "retained earnings / total assets")?,
        ebit: div(x.operating_income()?, ta, "EBIT / total assets")?,
        revenue: div(x.revenue()?, ta, "revenue / total assets")?,
    })
}

fn altman_z_score(x: &mut Inputs) -> DataResult<Decimal> {
    let z = z_inputs(x)?;
    let market_equity = div(x.market_cap()?, x.total_liabilities()?, "market cap / total liabilities")?;
    weighted_sum(
        &[
            (dec!(1.2), z.working_capital),
            (dec!(1.4), z.retained_earnings),
            (dec!(3.3), z.ebit),
            (dec!(0.6), market_equity),
            (dec!(1.0), z.revenue),
        ],
        "Altman Z",
    )
}

fn altman_z_prime(x: &mut Inputs) -> DataResult<Decimal> {
    let z = z_inputs(x)?;
    let book_equity = div(x.total_equity()?, x.total_liabilities()?, "equity / total liabilities")?;
    weighted_sum(
        &[
            (dec!(0.717), z.working_capital),
            (dec!(0.847), z.retained_earnings),
            (dec!(3.107), z.ebit),
            (dec!(0.420), book_equity),
            (dec!(0.998), z.revenue),
        ],
        "Altman Z'",
    )
}

fn springate_s_score(x: &mut Inputs) -> DataResult<Decimal> {
    let ta = x.total_assets()?;
    let a = div(x.working_capital()?, ta, "working capital / total assets")?;
    let b = div(x.operating_income()?, ta, "EBIT / total assets")?;
    let pbt = x.pre_tax_income()?;
    let c = div(pbt, x.current_liabilities()?, "pre-tax income / current liabilities")?;
    let d = div(x.revenue()?, ta, "revenue / total assets")?;
    weighted_sum(
        &[(dec!(1.03), a), (dec!(3.07), b), (dec!(0.66), c), (dec!(0.4), d)],
        "Springate S",
    )
}

fn taffler_z_score(x: &mut Inputs) -> DataResult<Decimal> {
    let cl = x.current_liabilities()?;
    let pbt = x.pre_tax_income()?;
    let profitability = div(pbt, cl, "pre-tax income / current liabilities")?;
    let working_capital = div(
        x.current_assets()?,
        x.total_liabilities()?,
        "current assets / total liabilities",
    )?;
    let financial_risk = div(cl, x.total_assets()?, "current liabilities / total assets")?;
    // No-credit interval in years of operating cash costs.
    let quick = sum(
        &[x.current_assets()?, -x.inventory()?, -cl],
        "immediate assets - current liabilities",
    )?;
    let cash_costs = sum(
        &[
            x.cost_of_goods_sold()?,
            x.operating_expenses()?,
            -x.depreciation_amortisation()?,
        ],
        "cash operating costs",
    )?;
    let no_credit = div(quick, cash_costs, "no-credit interval")?;
    weighted_sum(
        &[
            (dec!(0.53), profitability),
            (dec!(0.13), working_capital),
            (dec!(0.18), financial_risk),
            (dec!(0.16), no_credit),
        ],
        "Taffler Z",
    )
}

fn zmijewski_probability(x: &mut Inputs) -> DataResult<Decimal> {
    let ta = x.total_assets()?;
    let roa = div(x.net_income()?, ta, "net income / total assets")?;
    let leverage = div(x.total_liabilities()?, ta, "total liabilities / total assets")?;
    let liquidity = div(x.current_assets()?, x.current_liabilities()?, "current ratio")?;
    let score = linear_score(
        dec!(-4.336),
        &[
            (dec!(-4.513), roa),
            (dec!(5.679), leverage),
            (dec!(0.004), liquidity),
        ],
        "Zmijewski score",
    )?;
    mul(logistic(score, "Zmijewski probit")?, HUNDRED, "Zmijewski probability")
}

fn beneish_manipulation_probability(x: &mut Inputs) -> DataResult<Decimal> {
    forensic::manipulation_probability(x)
}

fn piotroski_f_score(x: &mut Inputs) -> DataResult<Decimal> {
    let ta = x.total_assets()?;
    let prior_ta = x.prior_total_assets()?;
    let ni = x.net_income()?;
    let ocf = x.operating_cash_flow()?;

    let roa = div(ni, ta, "ROA")?;
    let prior_roa = div(x.prior_net_income()?, prior_ta, "prior ROA")?;
    let leverage = div(x.long_term_debt()?, ta, "long-term debt / assets")?;
    let prior_leverage = div(x.prior_long_term_debt()?, prior_ta, "prior long-term debt / assets")?;
    let current = div(x.current_assets()?, x.current_liabilities()?, "current ratio")?;
    let prior_current = div(
        x.prior_current_assets()?,
        x.prior_current_liabilities()?,
        "prior current ratio",
    )?;
    let revenue = x.revenue()?;
    let prior_revenue = x.prior_revenue()?;
    let margin = div(x.gross_profit()?, revenue, "gross margin")?;
    let prior_margin = div(x.prior_gross_profit()?, prior_revenue, "prior gross margin")?;
    let turnover = div(revenue, ta, "asset turnover")?;
    let prior_turnover = div(prior_revenue, prior_ta, "prior asset turnover")?;
    let no_dilution = x.shares_outstanding()? <= x.prior_shares_outstanding()?;

    let signals = [
        roa > Decimal::ZERO,
        ocf > Decimal::ZERO,
        roa > prior_roa,
        ocf > ni,
        leverage < prior_leverage,
        current > prior_current,
        no_dilution,
        margin > prior_margin,
        turnover > prior_turnover,
    ];
    Ok(Decimal::from(signals.iter().filter(|s| **s).count()))
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

pub static APPLIED_METRICS: &[MetricDefinition] = &[
    // -- Valuation ----------------------------------------------------------
    MetricDefinition {
        id: "graham_value_ratio",
        name_en: "Graham Number to Price",
        name_ar: "رقم جراهام إلى السعر",
        category: Valuation,
        unit: Ratio,
        formula: "sqrt(22.5 * eps * book_value_per_share) / share_price",
        description: "Benjamin Graham's defensive value estimate relative to the market price.",
        calculate: graham_value_ratio,
        benchmark: dec!(1.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "dividend_discount_value_ratio",
        name_en: "Dividend Discount Value to Price",
        name_ar: "قيمة خصم التوزيعات إلى السعر",
        category: Valuation,
        unit: Ratio,
        formula: "dps * (1 + g) / (cost_of_equity - g) / share_price",
        description: "Gordon growth value of the dividend stream relative to the market price.",
        calculate: dividend_discount_value_ratio,
        benchmark: dec!(1.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "capm_cost_of_equity",
        name_en: "CAPM Cost of Equity",
        name_ar: "تكلفة حقوق الملكية وفق نموذج تسعير الأصول",
        category: Valuation,
        unit: Percent,
        formula: "(risk_free_rate + beta * (market_return - risk_free_rate)) * 100",
        description: "Return shareholders require for the company's systematic risk.",
        calculate: capm_cost_of_equity,
        benchmark: dec!(10),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(8), Strong), (dec!(10), Sound), (dec!(13), Moderate), (dec!(16), Weak)], Alarming),
    },
    MetricDefinition {
        id: "weighted_average_cost_of_capital",
        name_en: "Weighted Average Cost of Capital",
        name_ar: "المتوسط المرجح لتكلفة رأس المال",
        category: Valuation,
        unit: Percent,
        formula: "(E/V * cost_of_equity + D/V * cost_of_debt * (1 - tax_rate)) * 100",
        description: "Blended required return of shareholders and lenders at market weights.",
        calculate: weighted_average_cost_of_capital,
        benchmark: dec!(9),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(7), Strong), (dec!(9), Sound), (dec!(11), Moderate), (dec!(14), Weak)], Alarming),
    },
    MetricDefinition {
        id: "economic_value_added_spread",
        name_en: "EVA Spread",
        name_ar: "هامش القيمة الاقتصادية المضافة",
        category: Valuation,
        unit: Percent,
        formula: "(nopat / invested_capital - wacc) * 100",
        description: "Return on invested capital in excess of the cost of capital, in points.",
        calculate: economic_value_added_spread,
        benchmark: dec!(3),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(5), Strong), (dec!(2), Sound), (dec!(0), Moderate), (dec!(-3), Weak)], Alarming),
    },
    MetricDefinition {
        id: "residual_income_spread",
        name_en: "Residual Income Spread",
        name_ar: "هامش الدخل المتبقي",
        category: Valuation,
        unit: Percent,
        formula: "(net_income / total_equity - cost_of_equity) * 100",
        description: "Return on equity in excess of the cost of equity, in points.",
        calculate: residual_income_spread,
        benchmark: dec!(5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(5), Strong), (dec!(2), Sound), (dec!(0), Moderate), (dec!(-5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "dcf_value_to_enterprise_value",
        name_en: "DCF Value to Enterprise Value",
        name_ar: "قيمة التدفقات المخصومة إلى قيمة المنشأة",
        category: Valuation,
        unit: Ratio,
        formula: "free_cash_flow * (1 + g) / (wacc - g) / enterprise_value",
        description: "Single-stage discounted cash flow value relative to the market enterprise value.",
        calculate: dcf_value_to_enterprise_value,
        benchmark: dec!(1.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.3), Strong), (dec!(1.0), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    // -- Performance drivers ------------------------------------------------
    MetricDefinition {
        id: "dupont_return_on_equity",
        name_en: "DuPont Return on Equity",
        name_ar: "العائد على حقوق الملكية وفق ديبونت",
        category: Performance,
        unit: Percent,
        formula: "net_margin * asset_turnover * equity_multiplier * 100",
        description: "Return on equity decomposed into margin, turnover and leverage.",
        calculate: dupont_return_on_equity,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(15), Sound), (dec!(8), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "dupont_tax_burden",
        name_en: "Tax Burden",
        name_ar: "العبء الضريبي",
        category: Performance,
        unit: Ratio,
        formula: "net_income / pre_tax_income",
        description: "Share of pre-tax profit kept after income tax.",
        calculate: dupont_tax_burden,
        benchmark: dec!(0.75),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(0.8), Strong), (dec!(0.72), Sound), (dec!(0.65), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "dupont_interest_burden",
        name_en: "Interest Burden",
        name_ar: "عبء الفوائد",
        category: Performance,
        unit: Ratio,
        formula: "pre_tax_income / operating_income",
        description: "Share of operating profit left after financing costs.",
        calculate: dupont_interest_burden,
        benchmark: dec!(0.85),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(0.9), Strong), (dec!(0.8), Sound), (dec!(0.65), Moderate), (dec!(0.4), Weak)], Alarming),
    },
    MetricDefinition {
        id: "breakeven_coverage",
        name_en: "Breakeven Coverage",
        name_ar: "تغطية نقطة التعادل",
        category: Performance,
        unit: Times,
        formula: "revenue / (operating_expenses / (gross_profit / revenue))",
        description: "Actual sales relative to the sales needed to break even.",
        calculate: breakeven_coverage,
        benchmark: dec!(1.5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.6), Strong), (dec!(1.3), Sound), (dec!(1.1), Moderate), (dec!(1.0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "margin_of_safety",
        name_en: "Margin of Safety",
        name_ar: "هامش الأمان",
        category: Performance,
        unit: Percent,
        formula: "(revenue - breakeven_revenue) / revenue * 100",
        description: "Fall in sales the business can absorb before making a loss.",
        calculate: margin_of_safety,
        benchmark: dec!(25),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(35), Strong), (dec!(20), Sound), (dec!(10), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "degree_of_financial_leverage",
        name_en: "Degree of Financial Leverage",
        name_ar: "درجة الرافعة المالية",
        category: Performance,
        unit: Times,
        formula: "operating_income / (operating_income - interest_expense)",
        description: "Amplification of an EBIT change into pre-tax earnings.",
        calculate: degree_of_financial_leverage,
        benchmark: dec!(1.3),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(1.1), Strong), (dec!(1.3), Sound), (dec!(1.6), Moderate), (dec!(2.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "degree_of_combined_leverage",
        name_en: "Degree of Combined Leverage",
        name_ar: "درجة الرافعة المركبة",
        category: Performance,
        unit: Times,
        formula: "gross_profit / (operating_income - interest_expense)",
        description: "Amplification of a sales change into pre-tax earnings.",
        calculate: degree_of_combined_leverage,
        benchmark: dec!(2.5),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(2), Strong), (dec!(3), Sound), (dec!(4.5), Moderate), (dec!(7), Weak)], Alarming),
    },
    // -- Distress models ----------------------------------------------------
    MetricDefinition {
        id: "altman_z_score",
        name_en: "Altman Z-Score",
        name_ar: "نموذج ألتمان Z",
        category: Distress,
        unit: Score,
        formula: "1.2*WC/TA + 1.4*RE/TA + 3.3*EBIT/TA + 0.6*MVE/TL + 1.0*Sales/TA",
        description: "Bankruptcy predictor for listed manufacturers; below 1.81 is the distress zone.",
        calculate: altman_z_score,
        benchmark: dec!(3.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(3.0), Strong), (dec!(2.7), Sound), (dec!(1.81), Moderate), (dec!(1.2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "altman_z_prime",
        name_en: "Altman Z'-Score",
        name_ar: "نموذج ألتمان Z المعدل",
        category: Distress,
        unit: Score,
        formula: "0.717*WC/TA + 0.847*RE/TA + 3.107*EBIT/TA + 0.420*BVE/TL + 0.998*Sales/TA",
        description: "Altman variant for private firms using book equity; below 1.23 is the distress zone.",
        calculate: altman_z_prime,
        benchmark: dec!(2.9),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(2.9), Strong), (dec!(2.2), Sound), (dec!(1.23), Moderate), (dec!(0.8), Weak)], Alarming),
    },
    MetricDefinition {
        id: "springate_s_score",
        name_en: "Springate S-Score",
        name_ar: "نموذج سبرينجيت",
        category: Distress,
        unit: Score,
        formula: "1.03*WC/TA + 3.07*EBIT/TA + 0.66*EBT/CL + 0.4*Sales/TA",
        description: "Four-ratio failure model; below 0.862 signals distress.",
        calculate: springate_s_score,
        benchmark: dec!(0.862),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.5), Strong), (dec!(1.0), Sound), (dec!(0.862), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "taffler_z_score",
        name_en: "Taffler Z-Score",
        name_ar: "نموذج تافلر",
        category: Distress,
        unit: Score,
        formula: "0.53*EBT/CL + 0.13*CA/TL + 0.18*CL/TA + 0.16*no_credit_interval",
        description: "UK failure model; below 0.2 signals distress.",
        calculate: taffler_z_score,
        benchmark: dec!(0.3),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(0.4), Strong), (dec!(0.3), Sound), (dec!(0.2), Moderate), (dec!(0.1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "zmijewski_probability",
        name_en: "Zmijewski Default Probability",
        name_ar: "احتمال التعثر وفق زميجفسكي",
        category: Distress,
        unit: Percent,
        formula: "logistic(-4.336 - 4.513*NI/TA + 5.679*TL/TA + 0.004*CA/CL) * 100",
        description: "Probit-style estimate of the chance of financial distress.",
        calculate: zmijewski_probability,
        benchmark: dec!(10),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(5), Strong), (dec!(10), Sound), (dec!(25), Moderate), (dec!(50), Weak)], Alarming),
    },
    MetricDefinition {
        id: "beneish_manipulation_probability",
        name_en: "Beneish Manipulation Probability",
        name_ar: "احتمال التلاعب بالأرباح وفق بينيش",
        category: Distress,
        unit: Percent,
        formula: "N(-4.84 + 0.92*DSRI + 0.528*GMI + 0.404*AQI + 0.892*SGI + 0.115*DEPI - 0.172*SGAI + 4.679*TATA - 0.327*LVGI) * 100",
        description: "Probability that reported earnings are manipulated, from the eight-variable M-score.",
        calculate: beneish_manipulation_probability,
        benchmark: dec!(5),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(2), Strong), (dec!(4), Sound), (dec!(8), Moderate), (dec!(15), Weak)], Alarming),
    },
    MetricDefinition {
        id: "piotroski_f_score",
        name_en: "Piotroski F-Score",
        name_ar: "مؤشر بيوتروسكي",
        category: Distress,
        unit: Score,
        formula: "count of 9 profitability, leverage and efficiency signals",
        description: "Nine binary signals of improving fundamentals; 7 or more is strong.",
        calculate: piotroski_f_score,
        benchmark: dec!(7),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(6), Sound), (dec!(4), Moderate), (dec!(2), Weak)], Alarming),
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
            retained_earnings: Some(dec!(300)),
            revenue: Some(dec!(1000)),
            cost_of_goods_sold: Some(dec!(600)),
            operating_expenses: Some(dec!(200)),
            operating_income: Some(dec!(200)),
            interest_expense: Some(dec!(40)),
            net_income: Some(dec!(120)),
            share_price: Some(dec!(20)),
            shares_outstanding: Some(dec!(50)),
            ..FinancialData::default()
        }
    }

    fn run(calc: fn(&mut Inputs) -> DataResult<Decimal>, data: &FinancialData) -> DataResult<Decimal> {
        calc(&mut Inputs::new(data))
    }

    #[test]
    fn test_breakeven_figures() {
        let data = company();
        // Contribution margin 40%, fixed costs 200 → breakeven revenue 500.
        assert_eq!(run(breakeven_coverage, &data).unwrap(), dec!(2));
        assert_eq!(run(margin_of_safety, &data).unwrap(), dec!(50));
    }

    #[test]
    fn test_degree_of_financial_leverage() {
        let data = company();
        assert_eq!(run(degree_of_financial_leverage, &data).unwrap(), dec!(1.25));
    }

    #[test]
    fn test_altman_z_score_components() {
        let data = company();
        // 1.2*0.2 + 1.4*0.3 + 3.3*0.2 + 0.6*2.0 + 1.0*1.0
        assert_eq!(run(altman_z_score, &data).unwrap(), dec!(3.52));
    }

    #[test]
    fn test_ddm_requires_cost_of_equity_above_growth() {
        let data = FinancialData {
            dividends_paid: Some(dec!(-50)),
            shares_outstanding: Some(dec!(50)),
            share_price: Some(dec!(20)),
            risk_free_rate: Some(dec!(0.03)),
            beta: Some(dec!(1)),
            market_return: Some(dec!(0.08)),
            expected_growth_rate: Some(dec!(0.09)),
            ..FinancialData::default()
        };
        match run(dividend_discount_value_ratio, &data) {
            Err(DataError::Undefined { .. }) => {}
            other => panic!("Expected Undefined, got {other:?}"),
        }
    }

    #[test]
    fn test_piotroski_requires_prior_period() {
        let data = company();
        assert!(matches!(
            run(piotroski_f_score, &data),
            Err(DataError::MissingField(f)) if f.starts_with("prior_period.")
        ));
    }

    #[test]
    fn test_piotroski_counts_signals() {
        let mut data = company();
        data.long_term_debt = Some(dec!(200));
        data.operating_cash_flow = Some(dec!(150));
        let mut prior = company();
        prior.net_income = Some(dec!(100));
        prior.long_term_debt = Some(dec!(250));
        prior.current_assets = Some(dec!(380));
        prior.revenue = Some(dec!(900));
        prior.cost_of_goods_sold = Some(dec!(560));
        data.prior_period = Some(Box::new(prior));
        // Every signal passes.
        assert_eq!(run(piotroski_f_score, &data).unwrap(), dec!(9));
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(APPLIED_METRICS.len(), 21);
        for category in [Valuation, Performance, Distress] {
            assert_eq!(
                APPLIED_METRICS.iter().filter(|m| m.category == category).count(),
                7,
                "{category:?}"
            );
        }
    }
}
