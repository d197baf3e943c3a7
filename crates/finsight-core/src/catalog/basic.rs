//! Basic catalog: 106 statement-level metrics.
//!
//! Structural (13), the five ratio groups (liquidity, activity,
//! profitability, leverage, market; 15 each) and cash flow (18).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::definition::{Category::*, MetricDefinition, Unit::*};
use crate::classification::{Policy::*, Reading, Tone::*};
use crate::data::Inputs;
use crate::math::{add, div, growth, mul, pct, positive, sub, sum, DataResult, DAYS_PER_YEAR};

// ---------------------------------------------------------------------------
// Structural
// ---------------------------------------------------------------------------

fn cash_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.cash()?, x.total_assets()?, "cash / total assets")
}

fn receivables_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.accounts_receivable()?, x.total_assets()?, "receivables / total assets")
}

fn inventory_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.inventory()?, x.total_assets()?, "inventory / total assets")
}

fn current_assets_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.current_assets()?, x.total_assets()?, "current assets / total assets")
}

fn fixed_assets_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.fixed_assets()?, x.total_assets()?, "fixed assets / total assets")
}

fn intangibles_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    let intangibles = add(x.intangible_assets()?, x.goodwill()?, "intangibles + goodwill")?;
    pct(intangibles, x.total_assets()?, "intangibles / total assets")
}

fn current_liabilities_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.current_liabilities()?, x.total_assets()?, "current liabilities / total assets")
}

fn long_term_debt_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.long_term_debt()?, x.total_assets()?, "long-term debt / total assets")
}

fn equity_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.total_equity()?, x.total_assets()?, "equity / total assets")
}

fn cogs_to_revenue(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.cost_of_goods_sold()?, x.revenue()?, "COGS / revenue")
}

fn opex_to_revenue(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.operating_expenses()?, x.revenue()?, "operating expenses / revenue")
}

fn revenue_growth(x: &mut Inputs) -> DataResult<Decimal> {
    growth(x.revenue()?, x.prior_revenue()?, "revenue growth")
}

fn net_income_growth(x: &mut Inputs) -> DataResult<Decimal> {
    growth(x.net_income()?, x.prior_net_income()?, "net income growth")
}

// ---------------------------------------------------------------------------
// Liquidity
// ---------------------------------------------------------------------------

fn current_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.current_assets()?, x.current_liabilities()?, "current assets / current liabilities")
}

fn quick_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let quick = sub(x.current_assets()?, x.inventory()?, "current assets - inventory")?;
    div(quick, x.current_liabilities()?, "quick assets / current liabilities")
}

fn cash_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.liquid_funds()?, x.current_liabilities()?, "cash / current liabilities")
}

fn operating_cash_flow_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.operating_cash_flow()?, x.current_liabilities()?, "OCF / current liabilities")
}

fn working_capital_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.working_capital()?, x.total_assets()?, "working capital / total assets")
}

fn working_capital_to_revenue(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.working_capital()?, x.revenue()?, "working capital / revenue")
}

fn defensive_interval(x: &mut Inputs) -> DataResult<Decimal> {
    let defensive = add(x.liquid_funds()?, x.accounts_receivable()?, "defensive assets")?;
    let cash_expenses = sum(
        &[
            x.cost_of_goods_sold()?,
            x.operating_expenses()?,
            -x.depreciation_amortisation()?,
        ],
        "cash operating expenses",
    )?;
    let daily = div(cash_expenses, DAYS_PER_YEAR, "daily cash expenses")?;
    div(defensive, daily, "defensive assets / daily cash expenses")
}

fn cash_to_current_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.cash()?, x.current_assets()?, "cash / current assets")
}

fn acid_test_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let liquid = add(x.liquid_funds()?, x.accounts_receivable()?, "liquid assets")?;
    div(liquid, x.current_liabilities()?, "liquid assets / current liabilities")
}

fn cash_coverage_months(x: &mut Inputs) -> DataResult<Decimal> {
    let monthly = div(
        add(x.cost_of_goods_sold()?, x.operating_expenses()?, "operating costs")?,
        dec!(12),
        "monthly operating costs",
    )?;
    div(x.cash()?, monthly, "cash / monthly operating costs")
}

fn inventory_to_working_capital(x: &mut Inputs) -> DataResult<Decimal> {
    let wc = positive(x.working_capital()?, "working capital")?;
    pct(x.inventory()?, wc, "inventory / working capital")
}

fn short_term_debt_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.operating_cash_flow()?, x.short_term_debt()?, "OCF / short-term debt")
}

fn net_liquid_balance(x: &mut Inputs) -> DataResult<Decimal> {
    let balance = sub(x.liquid_funds()?, x.short_term_debt()?, "net liquid balance")?;
    pct(balance, x.total_assets()?, "net liquid balance / total assets")
}

fn liquid_assets_to_assets(x: &mut Inputs) -> DataResult<Decimal> {
    let liquid = add(x.liquid_funds()?, x.accounts_receivable()?, "liquid assets")?;
    pct(liquid, x.total_assets()?, "liquid assets / total assets")
}

fn short_term_debt_share(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.short_term_debt()?, x.current_liabilities()?, "short-term debt / current liabilities")
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

fn asset_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.total_assets()?, "revenue / total assets")
}

fn fixed_asset_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.fixed_assets()?, "revenue / fixed assets")
}

fn current_asset_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.current_assets()?, "revenue / current assets")
}

fn working_capital_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    let wc = positive(x.working_capital()?, "working capital")?;
    div(x.revenue()?, wc, "revenue / working capital")
}

fn inventory_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.cost_of_goods_sold()?, x.inventory()?, "COGS / inventory")
}

fn days_inventory_outstanding(x: &mut Inputs) -> DataResult<Decimal> {
    let share = div(x.inventory()?, x.cost_of_goods_sold()?, "inventory / COGS")?;
    mul(share, DAYS_PER_YEAR, "days inventory")
}

fn receivables_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.accounts_receivable()?, "revenue / receivables")
}

fn days_sales_outstanding(x: &mut Inputs) -> DataResult<Decimal> {
    let share = div(x.accounts_receivable()?, x.revenue()?, "receivables / revenue")?;
    mul(share, DAYS_PER_YEAR, "days sales")
}

fn payables_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.cost_of_goods_sold()?, x.accounts_payable()?, "COGS / payables")
}

fn days_payables_outstanding(x: &mut Inputs) -> DataResult<Decimal> {
    let share = div(x.accounts_payable()?, x.cost_of_goods_sold()?, "payables / COGS")?;
    mul(share, DAYS_PER_YEAR, "days payables")
}

fn cash_conversion_cycle(x: &mut Inputs) -> DataResult<Decimal> {
    let terms = [
        days_inventory_outstanding(x)?,
        days_sales_outstanding(x)?,
        -days_payables_outstanding(x)?,
    ];
    sum(&terms, "DIO + DSO - DPO")
}

fn operating_cycle(x: &mut Inputs) -> DataResult<Decimal> {
    add(days_inventory_outstanding(x)?, days_sales_outstanding(x)?, "DIO + DSO")
}

fn equity_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.total_equity()?, "revenue / equity")
}

fn cash_turnover(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.cash()?, "revenue / cash")
}

fn revenue_per_employee(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.revenue()?, x.employees()?, "revenue / employees")
}

// ---------------------------------------------------------------------------
// Profitability
// ---------------------------------------------------------------------------

fn gross_margin(x: &mut Inputs) -> DataResult<Decimal> {
    let gp = x.gross_profit()?;
    pct(gp, x.revenue()?, "gross profit / revenue")
}

fn operating_margin(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.operating_income()?, x.revenue()?, "operating income / revenue")
}

fn ebitda_margin(x: &mut Inputs) -> DataResult<Decimal> {
    let ebitda = x.ebitda()?;
    pct(ebitda, x.revenue()?, "EBITDA / revenue")
}

fn pre_tax_margin(x: &mut Inputs) -> DataResult<Decimal> {
    let pbt = x.pre_tax_income()?;
    pct(pbt, x.revenue()?, "pre-tax income / revenue")
}

fn net_margin(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.net_income()?, x.revenue()?, "net income / revenue")
}

fn return_on_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.net_income()?, x.total_assets()?, "net income / total assets")
}

fn return_on_equity(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.net_income()?, x.total_equity()?, "net income / equity")
}

fn return_on_capital_employed(x: &mut Inputs) -> DataResult<Decimal> {
    let ebit = x.operating_income()?;
    pct(ebit, x.capital_employed()?, "EBIT / capital employed")
}

fn return_on_invested_capital(x: &mut Inputs) -> DataResult<Decimal> {
    let nopat = x.nopat()?;
    pct(nopat, x.invested_capital()?, "NOPAT / invested capital")
}

fn operating_return_on_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.operating_income()?, x.total_assets()?, "EBIT / total assets")
}

fn cash_return_on_assets(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.operating_cash_flow()?, x.total_assets()?, "OCF / total assets")
}

fn effective_tax_rate(x: &mut Inputs) -> DataResult<Decimal> {
    mul(x.tax_rate()?, dec!(100), "tax rate")
}

fn rd_intensity(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.research_development()?, x.revenue()?, "R&D / revenue")
}

fn sga_to_gross_profit(x: &mut Inputs) -> DataResult<Decimal> {
    let sga = x.selling_general_admin()?;
    let gp = positive(x.gross_profit()?, "gross profit")?;
    pct(sga, gp, "SG&A / gross profit")
}

fn degree_of_operating_leverage(x: &mut Inputs) -> DataResult<Decimal> {
    let ebit_change = growth(x.operating_income()?, x.prior_operating_income()?, "EBIT growth")?;
    let revenue_change = growth(x.revenue()?, x.prior_revenue()?, "revenue growth")?;
    div(ebit_change, revenue_change, "EBIT growth / revenue growth")
}

// ---------------------------------------------------------------------------
// Leverage
// ---------------------------------------------------------------------------

fn debt_to_equity(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.total_liabilities()?, x.total_equity()?, "total liabilities / equity")
}

fn debt_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.total_liabilities()?, x.total_assets()?, "total liabilities / total assets")
}

fn equity_multiplier(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.total_assets()?, x.total_equity()?, "total assets / equity")
}

fn interest_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.operating_income()?, x.interest_expense()?, "EBIT / interest")
}

fn ebitda_interest_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    let ebitda = x.ebitda()?;
    div(ebitda, x.interest_expense()?, "EBITDA / interest")
}

fn financial_debt_to_equity(x: &mut Inputs) -> DataResult<Decimal> {
    let debt = x.total_debt()?;
    div(debt, x.total_equity()?, "total debt / equity")
}

fn long_term_debt_to_equity(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.long_term_debt()?, x.total_equity()?, "long-term debt / equity")
}

fn long_term_debt_to_capitalization(x: &mut Inputs) -> DataResult<Decimal> {
    let ltd = x.long_term_debt()?;
    let capitalization = add(ltd, x.total_equity()?, "long-term debt + equity")?;
    div(ltd, capitalization, "long-term debt / (long-term debt + equity)")
}

fn net_debt_to_ebitda(x: &mut Inputs) -> DataResult<Decimal> {
    let net_debt = x.net_debt()?;
    let ebitda = positive(x.ebitda()?, "EBITDA")?;
    div(net_debt, ebitda, "net debt / EBITDA")
}

fn debt_to_ebitda(x: &mut Inputs) -> DataResult<Decimal> {
    let debt = x.total_debt()?;
    let ebitda = positive(x.ebitda()?, "EBITDA")?;
    div(debt, ebitda, "total debt / EBITDA")
}

fn operating_cash_flow_to_debt(x: &mut Inputs) -> DataResult<Decimal> {
    let ocf = x.operating_cash_flow()?;
    div(ocf, x.total_debt()?, "OCF / total debt")
}

fn debt_service_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    let ebitda = x.ebitda()?;
    let service = add(x.interest_expense()?, x.short_term_debt()?, "debt service")?;
    div(ebitda, service, "EBITDA / (interest + short-term debt)")
}

fn fixed_assets_to_equity(x: &mut Inputs) -> DataResult<Decimal> {
    div(x.fixed_assets()?, x.total_equity()?, "fixed assets / equity")
}

fn capitalization_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let debt = x.total_debt()?;
    let capital = add(debt, x.total_equity()?, "total debt + equity")?;
    div(debt, capital, "total debt / (total debt + equity)")
}

fn tangible_equity_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let tangible = sum(
        &[x.total_equity()?, -x.intangible_assets()?, -x.goodwill()?],
        "tangible equity",
    )?;
    pct(tangible, x.total_assets()?, "tangible equity / total assets")
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

fn price_to_earnings(x: &mut Inputs) -> DataResult<Decimal> {
    let eps = positive(x.earnings_per_share()?, "earnings per share")?;
    div(x.share_price()?, eps, "price / EPS")
}

fn price_to_book(x: &mut Inputs) -> DataResult<Decimal> {
    let bvps = positive(x.book_value_per_share()?, "book value per share")?;
    div(x.share_price()?, bvps, "price / book value per share")
}

fn price_to_sales(x: &mut Inputs) -> DataResult<Decimal> {
    let mcap = x.market_cap()?;
    div(mcap, x.revenue()?, "market cap / revenue")
}

fn price_to_cash_flow(x: &mut Inputs) -> DataResult<Decimal> {
    let mcap = x.market_cap()?;
    let ocf = positive(x.operating_cash_flow()?, "operating cash flow")?;
    div(mcap, ocf, "market cap / OCF")
}

fn ev_to_ebitda(x: &mut Inputs) -> DataResult<Decimal> {
    let ev = x.enterprise_value()?;
    let ebitda = positive(x.ebitda()?, "EBITDA")?;
    div(ev, ebitda, "EV / EBITDA")
}

fn ev_to_revenue(x: &mut Inputs) -> DataResult<Decimal> {
    let ev = x.enterprise_value()?;
    div(ev, x.revenue()?, "EV / revenue")
}

fn earnings_yield(x: &mut Inputs) -> DataResult<Decimal> {
    let eps = x.earnings_per_share()?;
    pct(eps, x.share_price()?, "EPS / price")
}

fn dividend_yield(x: &mut Inputs) -> DataResult<Decimal> {
    let dps = x.dividends_per_share()?;
    pct(dps, x.share_price()?, "DPS / price")
}

fn dividend_payout_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let dividends = x.dividends_paid()?.abs();
    let ni = positive(x.net_income()?, "net income")?;
    pct(dividends, ni, "dividends / net income")
}

fn free_cash_flow_yield(x: &mut Inputs) -> DataResult<Decimal> {
    let fcf = x.free_cash_flow()?;
    pct(fcf, x.market_cap()?, "FCF / market cap")
}

fn peg_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let pe = price_to_earnings(x)?;
    let eps_growth = positive(
        growth(
            x.earnings_per_share()?,
            x.prior_earnings_per_share()?,
            "EPS growth",
        )?,
        "EPS growth",
    )?;
    div(pe, eps_growth, "P/E / EPS growth")
}

fn tobins_q(x: &mut Inputs) -> DataResult<Decimal> {
    let value = add(x.market_cap()?, x.total_liabilities()?, "market cap + liabilities")?;
    div(value, x.total_assets()?, "(market cap + liabilities) / total assets")
}

fn retention_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let ni = positive(x.net_income()?, "net income")?;
    let retained = sub(ni, x.dividends_paid()?.abs(), "net income - dividends")?;
    pct(retained, ni, "retained earnings / net income")
}

fn sustainable_growth_rate(x: &mut Inputs) -> DataResult<Decimal> {
    let roe = return_on_equity(x)?;
    let retention = retention_ratio(x)?;
    div(mul(roe, retention, "ROE * retention")?, dec!(100), "ROE * retention")
}

fn eps_growth(x: &mut Inputs) -> DataResult<Decimal> {
    let eps = x.earnings_per_share()?;
    let prior = x.prior_earnings_per_share()?;
    growth(eps, prior, "EPS growth")
}

// ---------------------------------------------------------------------------
// Cash flow
// ---------------------------------------------------------------------------

fn operating_cash_flow_margin(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.operating_cash_flow()?, x.revenue()?, "OCF / revenue")
}

fn free_cash_flow_margin(x: &mut Inputs) -> DataResult<Decimal> {
    let fcf = x.free_cash_flow()?;
    pct(fcf, x.revenue()?, "FCF / revenue")
}

fn cash_flow_to_net_income(x: &mut Inputs) -> DataResult<Decimal> {
    let ocf = x.operating_cash_flow()?;
    let ni = positive(x.net_income()?, "net income")?;
    div(ocf, ni, "OCF / net income")
}

fn capex_to_operating_cash_flow(x: &mut Inputs) -> DataResult<Decimal> {
    let capex = x.capital_expenditure()?.abs();
    let ocf = positive(x.operating_cash_flow()?, "operating cash flow")?;
    pct(capex, ocf, "capex / OCF")
}

fn capex_to_revenue(x: &mut Inputs) -> DataResult<Decimal> {
    let capex = x.capital_expenditure()?.abs();
    pct(capex, x.revenue()?, "capex / revenue")
}

fn capex_to_depreciation(x: &mut Inputs) -> DataResult<Decimal> {
    let capex = x.capital_expenditure()?.abs();
    div(capex, x.depreciation_amortisation()?, "capex / D&A")
}

fn free_cash_flow_to_equity(x: &mut Inputs) -> DataResult<Decimal> {
    let fcf = x.free_cash_flow()?;
    pct(fcf, x.total_equity()?, "FCF / equity")
}

fn dividend_cash_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    let ocf = x.operating_cash_flow()?;
    div(ocf, x.dividends_paid()?.abs(), "OCF / dividends")
}

fn cash_reinvestment_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let dividends = x.dividends_paid()?.abs();
    let retained_cash = sub(x.operating_cash_flow()?, dividends, "OCF - dividends")?;
    let base = add(x.fixed_assets()?, x.working_capital()?, "fixed assets + working capital")?;
    pct(retained_cash, base, "(OCF - dividends) / (fixed assets + working capital)")
}

fn free_cash_flow_to_debt(x: &mut Inputs) -> DataResult<Decimal> {
    let fcf = x.free_cash_flow()?;
    pct(fcf, x.total_debt()?, "FCF / total debt")
}

fn accrual_ratio(x: &mut Inputs) -> DataResult<Decimal> {
    let accruals = sub(x.net_income()?, x.operating_cash_flow()?, "net income - OCF")?;
    pct(accruals, x.total_assets()?, "(net income - OCF) / total assets")
}

fn cash_interest_coverage(x: &mut Inputs) -> DataResult<Decimal> {
    let interest = x.interest_expense()?;
    let cash_before = sum(
        &[x.operating_cash_flow()?, interest, x.income_tax()?],
        "OCF + interest + tax",
    )?;
    div(cash_before, interest, "(OCF + interest + tax) / interest")
}

fn investing_to_operating_cash_flow(x: &mut Inputs) -> DataResult<Decimal> {
    let investing = x.investing_cash_flow()?.abs();
    let ocf = positive(x.operating_cash_flow()?, "operating cash flow")?;
    pct(investing, ocf, "|investing cash flow| / OCF")
}

fn financing_to_operating_cash_flow(x: &mut Inputs) -> DataResult<Decimal> {
    let financing = x.financing_cash_flow()?.abs();
    let ocf = positive(x.operating_cash_flow()?, "operating cash flow")?;
    pct(financing, ocf, "|financing cash flow| / OCF")
}

fn free_cash_flow_conversion(x: &mut Inputs) -> DataResult<Decimal> {
    let fcf = x.free_cash_flow()?;
    let ebitda = positive(x.ebitda()?, "EBITDA")?;
    pct(fcf, ebitda, "FCF / EBITDA")
}

fn cash_return_on_equity(x: &mut Inputs) -> DataResult<Decimal> {
    pct(x.operating_cash_flow()?, x.total_equity()?, "OCF / equity")
}

fn operating_cash_flow_growth(x: &mut Inputs) -> DataResult<Decimal> {
    growth(
        x.operating_cash_flow()?,
        x.prior_operating_cash_flow()?,
        "OCF growth",
    )
}

fn debt_payback_years(x: &mut Inputs) -> DataResult<Decimal> {
    let debt = x.total_debt()?;
    let fcf = positive(x.free_cash_flow()?, "free cash flow")?;
    div(debt, fcf, "total debt / FCF")
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

pub static BASIC_METRICS: &[MetricDefinition] = &[
    // -- Structural ---------------------------------------------------------
    MetricDefinition {
        id: "cash_to_assets",
        name_en: "Cash to Total Assets",
        name_ar: "النقدية إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "cash / total_assets * 100",
        description: "Share of the balance sheet held as cash.",
        calculate: cash_to_assets,
        benchmark: dec!(10),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(5), Sound), (dec!(2), Moderate), (dec!(1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "receivables_to_assets",
        name_en: "Receivables to Total Assets",
        name_ar: "الذمم المدينة إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "accounts_receivable / total_assets * 100",
        description: "Share of the balance sheet tied up in customer credit.",
        calculate: receivables_to_assets,
        benchmark: dec!(15),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(15), Strong), (dec!(20), Sound), (dec!(30), Moderate), (dec!(40), Weak)], Alarming),
    },
    MetricDefinition {
        id: "inventory_to_assets",
        name_en: "Inventory to Total Assets",
        name_ar: "المخزون إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "inventory / total_assets * 100",
        description: "Share of the balance sheet tied up in stock.",
        calculate: inventory_to_assets,
        benchmark: dec!(15),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(15), Strong), (dec!(20), Sound), (dec!(30), Moderate), (dec!(40), Weak)], Alarming),
    },
    MetricDefinition {
        id: "current_assets_to_assets",
        name_en: "Current Assets to Total Assets",
        name_ar: "الأصول المتداولة إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "current_assets / total_assets * 100",
        description: "Proportion of assets expected to turn into cash within a year.",
        calculate: current_assets_to_assets,
        benchmark: dec!(40),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(40), Strong), (dec!(30), Sound), (dec!(20), Moderate), (dec!(10), Weak)], Alarming),
    },
    MetricDefinition {
        id: "fixed_assets_to_assets",
        name_en: "Fixed Assets to Total Assets",
        name_ar: "الأصول الثابتة إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "fixed_assets / total_assets * 100",
        description: "Capital intensity of the asset base.",
        calculate: fixed_assets_to_assets,
        benchmark: dec!(40),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(40), Strong), (dec!(50), Sound), (dec!(60), Moderate), (dec!(75), Weak)], Alarming),
    },
    MetricDefinition {
        id: "intangibles_to_assets",
        name_en: "Intangibles to Total Assets",
        name_ar: "الأصول غير الملموسة إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "(intangible_assets + goodwill) / total_assets * 100",
        description: "Share of assets with no physical backing, including goodwill.",
        calculate: intangibles_to_assets,
        benchmark: dec!(10),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(10), Strong), (dec!(20), Sound), (dec!(30), Moderate), (dec!(45), Weak)], Alarming),
    },
    MetricDefinition {
        id: "current_liabilities_to_assets",
        name_en: "Current Liabilities to Total Assets",
        name_ar: "الخصوم المتداولة إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "current_liabilities / total_assets * 100",
        description: "Share of the balance sheet funded by obligations due within a year.",
        calculate: current_liabilities_to_assets,
        benchmark: dec!(25),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(20), Strong), (dec!(30), Sound), (dec!(40), Moderate), (dec!(55), Weak)], Alarming),
    },
    MetricDefinition {
        id: "long_term_debt_to_assets",
        name_en: "Long-Term Debt to Total Assets",
        name_ar: "الديون طويلة الأجل إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "long_term_debt / total_assets * 100",
        description: "Share of the balance sheet funded by long-term borrowing.",
        calculate: long_term_debt_to_assets,
        benchmark: dec!(20),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(15), Strong), (dec!(25), Sound), (dec!(35), Moderate), (dec!(50), Weak)], Alarming),
    },
    MetricDefinition {
        id: "equity_to_assets",
        name_en: "Equity to Total Assets",
        name_ar: "حقوق الملكية إلى إجمالي الأصول",
        category: Structural,
        unit: Percent,
        formula: "total_equity / total_assets * 100",
        description: "Share of the balance sheet funded by shareholders.",
        calculate: equity_to_assets,
        benchmark: dec!(50),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(50), Strong), (dec!(40), Sound), (dec!(30), Moderate), (dec!(15), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cogs_to_revenue",
        name_en: "Cost of Sales to Revenue",
        name_ar: "تكلفة المبيعات إلى الإيرادات",
        category: Structural,
        unit: Percent,
        formula: "cost_of_goods_sold / revenue * 100",
        description: "Portion of each sale consumed by direct costs.",
        calculate: cogs_to_revenue,
        benchmark: dec!(60),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(50), Strong), (dec!(60), Sound), (dec!(70), Moderate), (dec!(85), Weak)], Alarming),
    },
    MetricDefinition {
        id: "opex_to_revenue",
        name_en: "Operating Expenses to Revenue",
        name_ar: "المصاريف التشغيلية إلى الإيرادات",
        category: Structural,
        unit: Percent,
        formula: "operating_expenses / revenue * 100",
        description: "Portion of each sale consumed by overheads.",
        calculate: opex_to_revenue,
        benchmark: dec!(25),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(20), Strong), (dec!(25), Sound), (dec!(35), Moderate), (dec!(45), Weak)], Alarming),
    },
    MetricDefinition {
        id: "revenue_growth",
        name_en: "Revenue Growth",
        name_ar: "نمو الإيرادات",
        category: Structural,
        unit: Percent,
        formula: "(revenue - prior_period.revenue) / |prior_period.revenue| * 100",
        description: "Year-on-year change in sales.",
        calculate: revenue_growth,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(8), Sound), (dec!(0), Moderate), (dec!(-10), Weak)], Alarming),
    },
    MetricDefinition {
        id: "net_income_growth",
        name_en: "Net Income Growth",
        name_ar: "نمو صافي الدخل",
        category: Structural,
        unit: Percent,
        formula: "(net_income - prior_period.net_income) / |prior_period.net_income| * 100",
        description: "Year-on-year change in bottom-line earnings.",
        calculate: net_income_growth,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(8), Sound), (dec!(0), Moderate), (dec!(-15), Weak)], Alarming),
    },
    // -- Liquidity ----------------------------------------------------------
    MetricDefinition {
        id: "current_ratio",
        name_en: "Current Ratio",
        name_ar: "نسبة التداول",
        category: Liquidity,
        unit: Ratio,
        formula: "current_assets / current_liabilities",
        description: "Current assets available per unit of current liabilities.",
        calculate: current_ratio,
        benchmark: dec!(2.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(2), Strong), (dec!(1.5), Sound), (dec!(1), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "quick_ratio",
        name_en: "Quick Ratio",
        name_ar: "نسبة السيولة السريعة",
        category: Liquidity,
        unit: Ratio,
        formula: "(current_assets - inventory) / current_liabilities",
        description: "Current liabilities covered without selling inventory.",
        calculate: quick_ratio,
        benchmark: dec!(1.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.2), Strong), (dec!(1), Sound), (dec!(0.7), Moderate), (dec!(0.4), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_ratio",
        name_en: "Cash Ratio",
        name_ar: "نسبة النقدية",
        category: Liquidity,
        unit: Ratio,
        formula: "(cash + marketable_securities) / current_liabilities",
        description: "Current liabilities covered by cash and near-cash alone.",
        calculate: cash_ratio,
        benchmark: dec!(0.5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(0.5), Strong), (dec!(0.3), Sound), (dec!(0.2), Moderate), (dec!(0.1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "operating_cash_flow_ratio",
        name_en: "Operating Cash Flow Ratio",
        name_ar: "نسبة التدفق النقدي التشغيلي",
        category: Liquidity,
        unit: Ratio,
        formula: "operating_cash_flow / current_liabilities",
        description: "Current liabilities covered by a year of operating cash flow.",
        calculate: operating_cash_flow_ratio,
        benchmark: dec!(1.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1), Strong), (dec!(0.7), Sound), (dec!(0.4), Moderate), (dec!(0.2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "working_capital_to_assets",
        name_en: "Working Capital to Total Assets",
        name_ar: "رأس المال العامل إلى إجمالي الأصول",
        category: Liquidity,
        unit: Percent,
        formula: "(current_assets - current_liabilities) / total_assets * 100",
        description: "Net liquid cushion relative to the size of the business.",
        calculate: working_capital_to_assets,
        benchmark: dec!(20),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(10), Sound), (dec!(5), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "working_capital_to_revenue",
        name_en: "Working Capital to Revenue",
        name_ar: "رأس المال العامل إلى الإيرادات",
        category: Liquidity,
        unit: Percent,
        formula: "(current_assets - current_liabilities) / revenue * 100",
        description: "Working capital required per unit of sales.",
        calculate: working_capital_to_revenue,
        benchmark: dec!(15),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(10), Strong), (dec!(5), Sound), (dec!(0), Moderate), (dec!(-10), Weak)], Alarming),
    },
    MetricDefinition {
        id: "defensive_interval",
        name_en: "Defensive Interval",
        name_ar: "فترة الدفاع",
        category: Liquidity,
        unit: Days,
        formula: "(cash + marketable_securities + accounts_receivable) / ((cost_of_goods_sold + operating_expenses - depreciation_amortisation) / 365)",
        description: "Days the business can pay its cash expenses from liquid assets.",
        calculate: defensive_interval,
        benchmark: dec!(90),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(90), Strong), (dec!(60), Sound), (dec!(30), Moderate), (dec!(15), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_to_current_assets",
        name_en: "Cash to Current Assets",
        name_ar: "النقدية إلى الأصول المتداولة",
        category: Liquidity,
        unit: Percent,
        formula: "cash / current_assets * 100",
        description: "Share of current assets already held as cash.",
        calculate: cash_to_current_assets,
        benchmark: dec!(20),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(12), Sound), (dec!(6), Moderate), (dec!(3), Weak)], Alarming),
    },
    MetricDefinition {
        id: "acid_test_ratio",
        name_en: "Acid-Test Ratio",
        name_ar: "نسبة الاختبار الحمضي",
        category: Liquidity,
        unit: Ratio,
        formula: "(cash + marketable_securities + accounts_receivable) / current_liabilities",
        description: "Current liabilities covered by the most liquid assets.",
        calculate: acid_test_ratio,
        benchmark: dec!(1.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.2), Strong), (dec!(1), Sound), (dec!(0.7), Moderate), (dec!(0.4), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_coverage_months",
        name_en: "Cash Coverage",
        name_ar: "تغطية النقدية بالأشهر",
        category: Liquidity,
        unit: Months,
        formula: "cash / ((cost_of_goods_sold + operating_expenses) / 12)",
        description: "Months of operating costs covered by cash on hand.",
        calculate: cash_coverage_months,
        benchmark: dec!(6),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(6), Strong), (dec!(3), Sound), (dec!(2), Moderate), (dec!(1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "inventory_to_working_capital",
        name_en: "Inventory to Working Capital",
        name_ar: "المخزون إلى رأس المال العامل",
        category: Liquidity,
        unit: Percent,
        formula: "inventory / (current_assets - current_liabilities) * 100",
        description: "Dependence of the liquidity cushion on stock that must still be sold.",
        calculate: inventory_to_working_capital,
        benchmark: dec!(50),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(40), Strong), (dec!(60), Sound), (dec!(80), Moderate), (dec!(100), Weak)], Alarming),
    },
    MetricDefinition {
        id: "short_term_debt_coverage",
        name_en: "Short-Term Debt Coverage",
        name_ar: "تغطية الديون قصيرة الأجل",
        category: Liquidity,
        unit: Times,
        formula: "operating_cash_flow / short_term_debt",
        description: "Times a year of operating cash flow repays short-term borrowing.",
        calculate: short_term_debt_coverage,
        benchmark: dec!(2.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(2), Strong), (dec!(1.5), Sound), (dec!(1), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "net_liquid_balance",
        name_en: "Net Liquid Balance",
        name_ar: "صافي الرصيد السائل",
        category: Liquidity,
        unit: Percent,
        formula: "(cash + marketable_securities - short_term_debt) / total_assets * 100",
        description: "Liquid funds left after repaying short-term borrowing.",
        calculate: net_liquid_balance,
        benchmark: dec!(5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(5), Strong), (dec!(2), Sound), (dec!(0), Moderate), (dec!(-5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "liquid_assets_to_assets",
        name_en: "Liquid Assets to Total Assets",
        name_ar: "الأصول السائلة إلى إجمالي الأصول",
        category: Liquidity,
        unit: Percent,
        formula: "(cash + marketable_securities + accounts_receivable) / total_assets * 100",
        description: "Share of assets convertible to cash at short notice.",
        calculate: liquid_assets_to_assets,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(10), Sound), (dec!(6), Moderate), (dec!(3), Weak)], Alarming),
    },
    MetricDefinition {
        id: "short_term_debt_share",
        name_en: "Short-Term Debt Share",
        name_ar: "حصة الديون قصيرة الأجل",
        category: Liquidity,
        unit: Percent,
        formula: "short_term_debt / current_liabilities * 100",
        description: "Share of current liabilities that is interest-bearing debt.",
        calculate: short_term_debt_share,
        benchmark: dec!(30),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(20), Strong), (dec!(30), Sound), (dec!(45), Moderate), (dec!(60), Weak)], Alarming),
    },
    // -- Activity -----------------------------------------------------------
    MetricDefinition {
        id: "asset_turnover",
        name_en: "Asset Turnover",
        name_ar: "معدل دوران الأصول",
        category: Activity,
        unit: Times,
        formula: "revenue / total_assets",
        description: "Sales generated per unit of assets.",
        calculate: asset_turnover,
        benchmark: dec!(1.0),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.2), Strong), (dec!(0.9), Sound), (dec!(0.6), Moderate), (dec!(0.3), Weak)], Alarming),
    },
    MetricDefinition {
        id: "fixed_asset_turnover",
        name_en: "Fixed Asset Turnover",
        name_ar: "معدل دوران الأصول الثابتة",
        category: Activity,
        unit: Times,
        formula: "revenue / fixed_assets",
        description: "Sales generated per unit of property, plant and equipment.",
        calculate: fixed_asset_turnover,
        benchmark: dec!(3),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(4), Strong), (dec!(3), Sound), (dec!(2), Moderate), (dec!(1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "current_asset_turnover",
        name_en: "Current Asset Turnover",
        name_ar: "معدل دوران الأصول المتداولة",
        category: Activity,
        unit: Times,
        formula: "revenue / current_assets",
        description: "Sales generated per unit of current assets.",
        calculate: current_asset_turnover,
        benchmark: dec!(2),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(2.5), Strong), (dec!(2), Sound), (dec!(1.5), Moderate), (dec!(1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "working_capital_turnover",
        name_en: "Working Capital Turnover",
        name_ar: "معدل دوران رأس المال العامل",
        category: Activity,
        unit: Times,
        formula: "revenue / (current_assets - current_liabilities)",
        description: "Sales supported per unit of working capital.",
        calculate: working_capital_turnover,
        benchmark: dec!(5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(6), Strong), (dec!(4), Sound), (dec!(3), Moderate), (dec!(2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "inventory_turnover",
        name_en: "Inventory Turnover",
        name_ar: "معدل دوران المخزون",
        category: Activity,
        unit: Times,
        formula: "cost_of_goods_sold / inventory",
        description: "Times stock is sold and replaced during the year.",
        calculate: inventory_turnover,
        benchmark: dec!(6),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(6), Sound), (dec!(4), Moderate), (dec!(2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "days_inventory_outstanding",
        name_en: "Days Inventory Outstanding",
        name_ar: "متوسط فترة الاحتفاظ بالمخزون",
        category: Activity,
        unit: Days,
        formula: "inventory / cost_of_goods_sold * 365",
        description: "Average days stock is held before sale.",
        calculate: days_inventory_outstanding,
        benchmark: dec!(60),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(45), Strong), (dec!(60), Sound), (dec!(90), Moderate), (dec!(150), Weak)], Alarming),
    },
    MetricDefinition {
        id: "receivables_turnover",
        name_en: "Receivables Turnover",
        name_ar: "معدل دوران الذمم المدينة",
        category: Activity,
        unit: Times,
        formula: "revenue / accounts_receivable",
        description: "Times customer balances are collected during the year.",
        calculate: receivables_turnover,
        benchmark: dec!(8),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(10), Strong), (dec!(8), Sound), (dec!(6), Moderate), (dec!(4), Weak)], Alarming),
    },
    MetricDefinition {
        id: "days_sales_outstanding",
        name_en: "Days Sales Outstanding",
        name_ar: "متوسط فترة التحصيل",
        category: Activity,
        unit: Days,
        formula: "accounts_receivable / revenue * 365",
        description: "Average days taken to collect from customers.",
        calculate: days_sales_outstanding,
        benchmark: dec!(45),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(30), Strong), (dec!(45), Sound), (dec!(60), Moderate), (dec!(90), Weak)], Alarming),
    },
    MetricDefinition {
        id: "payables_turnover",
        name_en: "Payables Turnover",
        name_ar: "معدل دوران الذمم الدائنة",
        category: Activity,
        unit: Times,
        formula: "cost_of_goods_sold / accounts_payable",
        description: "Times supplier balances are settled during the year.",
        calculate: payables_turnover,
        benchmark: dec!(8),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(6), Strong), (dec!(4), Sound), (dec!(3), Moderate), (dec!(2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "days_payables_outstanding",
        name_en: "Days Payables Outstanding",
        name_ar: "متوسط فترة السداد",
        category: Activity,
        unit: Days,
        formula: "accounts_payable / cost_of_goods_sold * 365",
        description: "Average days taken to pay suppliers.",
        calculate: days_payables_outstanding,
        benchmark: dec!(45),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(60), Strong), (dec!(90), Sound), (dec!(120), Moderate), (dec!(180), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_conversion_cycle",
        name_en: "Cash Conversion Cycle",
        name_ar: "دورة التحويل النقدي",
        category: Activity,
        unit: Days,
        formula: "days_inventory_outstanding + days_sales_outstanding - days_payables_outstanding",
        description: "Days between paying suppliers and collecting from customers.",
        calculate: cash_conversion_cycle,
        benchmark: dec!(60),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(30), Strong), (dec!(60), Sound), (dec!(90), Moderate), (dec!(150), Weak)], Alarming),
    },
    MetricDefinition {
        id: "operating_cycle",
        name_en: "Operating Cycle",
        name_ar: "الدورة التشغيلية",
        category: Activity,
        unit: Days,
        formula: "days_inventory_outstanding + days_sales_outstanding",
        description: "Days from purchasing stock to collecting the sale.",
        calculate: operating_cycle,
        benchmark: dec!(105),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(75), Strong), (dec!(105), Sound), (dec!(150), Moderate), (dec!(220), Weak)], Alarming),
    },
    MetricDefinition {
        id: "equity_turnover",
        name_en: "Equity Turnover",
        name_ar: "معدل دوران حقوق الملكية",
        category: Activity,
        unit: Times,
        formula: "revenue / total_equity",
        description: "Sales generated per unit of shareholders' funds.",
        calculate: equity_turnover,
        benchmark: dec!(2),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(2.5), Strong), (dec!(1.8), Sound), (dec!(1.2), Moderate), (dec!(0.6), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_turnover",
        name_en: "Cash Turnover",
        name_ar: "معدل دوران النقدية",
        category: Activity,
        unit: Times,
        formula: "revenue / cash",
        description: "Sales generated per unit of cash held.",
        calculate: cash_turnover,
        benchmark: dec!(10),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(5), Sound), (dec!(3), Moderate), (dec!(1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "revenue_per_employee",
        name_en: "Revenue per Employee",
        name_ar: "الإيرادات لكل موظف",
        category: Activity,
        unit: Currency,
        formula: "revenue / employees",
        description: "Sales generated per head.",
        calculate: revenue_per_employee,
        benchmark: dec!(200000),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(300000), Strong), (dec!(200000), Sound), (dec!(120000), Moderate), (dec!(60000), Weak)], Alarming),
    },
    // -- Profitability ------------------------------------------------------
    MetricDefinition {
        id: "gross_margin",
        name_en: "Gross Profit Margin",
        name_ar: "هامش الربح الإجمالي",
        category: Profitability,
        unit: Percent,
        formula: "gross_profit / revenue * 100",
        description: "Share of sales left after direct costs.",
        calculate: gross_margin,
        benchmark: dec!(40),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(50), Strong), (dec!(35), Sound), (dec!(20), Moderate), (dec!(10), Weak)], Alarming),
    },
    MetricDefinition {
        id: "operating_margin",
        name_en: "Operating Profit Margin",
        name_ar: "هامش الربح التشغيلي",
        category: Profitability,
        unit: Percent,
        formula: "operating_income / revenue * 100",
        description: "Share of sales left after operating costs.",
        calculate: operating_margin,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(12), Sound), (dec!(6), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "ebitda_margin",
        name_en: "EBITDA Margin",
        name_ar: "هامش الأرباح قبل الفوائد والضرائب والإهلاك",
        category: Profitability,
        unit: Percent,
        formula: "ebitda / revenue * 100",
        description: "Cash-style operating profit per unit of sales.",
        calculate: ebitda_margin,
        benchmark: dec!(20),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(25), Strong), (dec!(18), Sound), (dec!(10), Moderate), (dec!(3), Weak)], Alarming),
    },
    MetricDefinition {
        id: "pre_tax_margin",
        name_en: "Pre-Tax Margin",
        name_ar: "هامش الربح قبل الضريبة",
        category: Profitability,
        unit: Percent,
        formula: "pre_tax_income / revenue * 100",
        description: "Share of sales left before income tax.",
        calculate: pre_tax_margin,
        benchmark: dec!(12),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(10), Sound), (dec!(5), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "net_margin",
        name_en: "Net Profit Margin",
        name_ar: "هامش صافي الربح",
        category: Profitability,
        unit: Percent,
        formula: "net_income / revenue * 100",
        description: "Share of sales kept as bottom-line profit.",
        calculate: net_margin,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(8), Sound), (dec!(4), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "return_on_assets",
        name_en: "Return on Assets",
        name_ar: "العائد على الأصول",
        category: Profitability,
        unit: Percent,
        formula: "net_income / total_assets * 100",
        description: "Profit generated per unit of assets.",
        calculate: return_on_assets,
        benchmark: dec!(5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(5), Sound), (dec!(2), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "return_on_equity",
        name_en: "Return on Equity",
        name_ar: "العائد على حقوق الملكية",
        category: Profitability,
        unit: Percent,
        formula: "net_income / total_equity * 100",
        description: "Profit generated per unit of shareholders' funds.",
        calculate: return_on_equity,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(15), Sound), (dec!(8), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "return_on_capital_employed",
        name_en: "Return on Capital Employed",
        name_ar: "العائد على رأس المال المستخدم",
        category: Profitability,
        unit: Percent,
        formula: "operating_income / (total_assets - current_liabilities) * 100",
        description: "Operating profit per unit of long-term capital.",
        calculate: return_on_capital_employed,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(12), Sound), (dec!(6), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "return_on_invested_capital",
        name_en: "Return on Invested Capital",
        name_ar: "العائد على رأس المال المستثمر",
        category: Profitability,
        unit: Percent,
        formula: "operating_income * (1 - tax_rate) / (total_debt + total_equity - cash) * 100",
        description: "After-tax operating profit per unit of invested capital.",
        calculate: return_on_invested_capital,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(10), Sound), (dec!(6), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "operating_return_on_assets",
        name_en: "Operating Return on Assets",
        name_ar: "العائد التشغيلي على الأصول",
        category: Profitability,
        unit: Percent,
        formula: "operating_income / total_assets * 100",
        description: "Operating profit per unit of assets, before financing and tax.",
        calculate: operating_return_on_assets,
        benchmark: dec!(8),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(12), Strong), (dec!(8), Sound), (dec!(4), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_return_on_assets",
        name_en: "Cash Return on Assets",
        name_ar: "العائد النقدي على الأصول",
        category: Profitability,
        unit: Percent,
        formula: "operating_cash_flow / total_assets * 100",
        description: "Operating cash generated per unit of assets.",
        calculate: cash_return_on_assets,
        benchmark: dec!(8),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(12), Strong), (dec!(8), Sound), (dec!(4), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "effective_tax_rate",
        name_en: "Effective Tax Rate",
        name_ar: "معدل الضريبة الفعلي",
        category: Profitability,
        unit: Percent,
        formula: "income_tax / pre_tax_income * 100",
        description: "Share of pre-tax profit paid as income tax.",
        calculate: effective_tax_rate,
        benchmark: dec!(21),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(15), Strong), (dec!(25), Sound), (dec!(32), Moderate), (dec!(40), Weak)], Alarming),
    },
    MetricDefinition {
        id: "rd_intensity",
        name_en: "R&D Intensity",
        name_ar: "كثافة البحث والتطوير",
        category: Profitability,
        unit: Percent,
        formula: "research_development / revenue * 100",
        description: "Share of sales reinvested in research and development.",
        calculate: rd_intensity,
        benchmark: dec!(5),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(4), Sound), (dec!(2), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "sga_to_gross_profit",
        name_en: "SG&A to Gross Profit",
        name_ar: "المصاريف البيعية والإدارية إلى الربح الإجمالي",
        category: Profitability,
        unit: Percent,
        formula: "selling_general_admin / gross_profit * 100",
        description: "Share of gross profit absorbed by selling and administrative costs.",
        calculate: sga_to_gross_profit,
        benchmark: dec!(50),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(40), Strong), (dec!(55), Sound), (dec!(70), Moderate), (dec!(90), Weak)], Alarming),
    },
    MetricDefinition {
        id: "degree_of_operating_leverage",
        name_en: "Degree of Operating Leverage",
        name_ar: "درجة الرافعة التشغيلية",
        category: Profitability,
        unit: Times,
        formula: "operating_income_growth / revenue_growth",
        description: "Sensitivity of operating profit to a change in sales.",
        calculate: degree_of_operating_leverage,
        benchmark: dec!(1.5),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(1.5), Strong), (dec!(2), Sound), (dec!(3), Moderate), (dec!(5), Weak)], Alarming),
    },
    // -- Leverage -----------------------------------------------------------
    MetricDefinition {
        id: "debt_to_equity",
        name_en: "Debt to Equity",
        name_ar: "نسبة الديون إلى حقوق الملكية",
        category: Leverage,
        unit: Ratio,
        formula: "total_liabilities / total_equity",
        description: "Creditor funding per unit of shareholder funding.",
        calculate: debt_to_equity,
        benchmark: dec!(1.0),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.5), Strong), (dec!(1), Sound), (dec!(1.5), Moderate), (dec!(2.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "debt_ratio",
        name_en: "Debt Ratio",
        name_ar: "نسبة المديونية",
        category: Leverage,
        unit: Ratio,
        formula: "total_liabilities / total_assets",
        description: "Share of assets funded by creditors.",
        calculate: debt_ratio,
        benchmark: dec!(0.5),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.4), Strong), (dec!(0.5), Sound), (dec!(0.6), Moderate), (dec!(0.75), Weak)], Alarming),
    },
    MetricDefinition {
        id: "equity_multiplier",
        name_en: "Equity Multiplier",
        name_ar: "مضاعف حقوق الملكية",
        category: Leverage,
        unit: Times,
        formula: "total_assets / total_equity",
        description: "Assets carried per unit of equity.",
        calculate: equity_multiplier,
        benchmark: dec!(2.0),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(1.5), Strong), (dec!(2), Sound), (dec!(3), Moderate), (dec!(4), Weak)], Alarming),
    },
    MetricDefinition {
        id: "interest_coverage",
        name_en: "Interest Coverage",
        name_ar: "تغطية الفوائد",
        category: Leverage,
        unit: Times,
        formula: "operating_income / interest_expense",
        description: "Times operating profit covers interest.",
        calculate: interest_coverage,
        benchmark: dec!(5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(5), Sound), (dec!(3), Moderate), (dec!(1.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "ebitda_interest_coverage",
        name_en: "EBITDA Interest Coverage",
        name_ar: "تغطية الفوائد بالأرباح قبل الإهلاك",
        category: Leverage,
        unit: Times,
        formula: "ebitda / interest_expense",
        description: "Times EBITDA covers interest.",
        calculate: ebitda_interest_coverage,
        benchmark: dec!(8),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(10), Strong), (dec!(6), Sound), (dec!(4), Moderate), (dec!(2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "financial_debt_to_equity",
        name_en: "Financial Debt to Equity",
        name_ar: "الديون التمويلية إلى حقوق الملكية",
        category: Leverage,
        unit: Ratio,
        formula: "(short_term_debt + long_term_debt) / total_equity",
        description: "Interest-bearing debt per unit of equity.",
        calculate: financial_debt_to_equity,
        benchmark: dec!(0.8),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.4), Strong), (dec!(0.8), Sound), (dec!(1.2), Moderate), (dec!(2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "long_term_debt_to_equity",
        name_en: "Long-Term Debt to Equity",
        name_ar: "الديون طويلة الأجل إلى حقوق الملكية",
        category: Leverage,
        unit: Ratio,
        formula: "long_term_debt / total_equity",
        description: "Long-term borrowing per unit of equity.",
        calculate: long_term_debt_to_equity,
        benchmark: dec!(0.5),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.3), Strong), (dec!(0.5), Sound), (dec!(0.8), Moderate), (dec!(1.2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "long_term_debt_to_capitalization",
        name_en: "Long-Term Debt to Capitalization",
        name_ar: "الديون طويلة الأجل إلى هيكل رأس المال",
        category: Leverage,
        unit: Ratio,
        formula: "long_term_debt / (long_term_debt + total_equity)",
        description: "Share of permanent capital provided by long-term lenders.",
        calculate: long_term_debt_to_capitalization,
        benchmark: dec!(0.35),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.25), Strong), (dec!(0.35), Sound), (dec!(0.5), Moderate), (dec!(0.65), Weak)], Alarming),
    },
    MetricDefinition {
        id: "net_debt_to_ebitda",
        name_en: "Net Debt to EBITDA",
        name_ar: "صافي الدين إلى الأرباح قبل الفوائد والضرائب والإهلاك",
        category: Leverage,
        unit: Times,
        formula: "(short_term_debt + long_term_debt - cash) / ebitda",
        description: "Years of EBITDA needed to clear net debt.",
        calculate: net_debt_to_ebitda,
        benchmark: dec!(2.5),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(1), Strong), (dec!(2.5), Sound), (dec!(3.5), Moderate), (dec!(5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "debt_to_ebitda",
        name_en: "Debt to EBITDA",
        name_ar: "الديون إلى الأرباح قبل الفوائد والضرائب والإهلاك",
        category: Leverage,
        unit: Times,
        formula: "(short_term_debt + long_term_debt) / ebitda",
        description: "Years of EBITDA needed to clear gross debt.",
        calculate: debt_to_ebitda,
        benchmark: dec!(3),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(1.5), Strong), (dec!(3), Sound), (dec!(4), Moderate), (dec!(6), Weak)], Alarming),
    },
    MetricDefinition {
        id: "operating_cash_flow_to_debt",
        name_en: "Operating Cash Flow to Debt",
        name_ar: "التدفق النقدي التشغيلي إلى الديون",
        category: Leverage,
        unit: Ratio,
        formula: "operating_cash_flow / (short_term_debt + long_term_debt)",
        description: "Share of debt repayable from one year of operating cash flow.",
        calculate: operating_cash_flow_to_debt,
        benchmark: dec!(0.4),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(0.5), Strong), (dec!(0.35), Sound), (dec!(0.2), Moderate), (dec!(0.1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "debt_service_coverage",
        name_en: "Debt Service Coverage",
        name_ar: "تغطية خدمة الدين",
        category: Leverage,
        unit: Times,
        formula: "ebitda / (interest_expense + short_term_debt)",
        description: "Times EBITDA covers interest plus debt falling due.",
        calculate: debt_service_coverage,
        benchmark: dec!(1.5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(2), Strong), (dec!(1.5), Sound), (dec!(1.2), Moderate), (dec!(1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "fixed_assets_to_equity",
        name_en: "Fixed Assets to Equity",
        name_ar: "الأصول الثابتة إلى حقوق الملكية",
        category: Leverage,
        unit: Ratio,
        formula: "fixed_assets / total_equity",
        description: "Extent to which long-lived assets are financed by equity.",
        calculate: fixed_assets_to_equity,
        benchmark: dec!(0.75),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.6), Strong), (dec!(0.8), Sound), (dec!(1), Moderate), (dec!(1.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "capitalization_ratio",
        name_en: "Capitalization Ratio",
        name_ar: "نسبة الرسملة",
        category: Leverage,
        unit: Ratio,
        formula: "(short_term_debt + long_term_debt) / (short_term_debt + long_term_debt + total_equity)",
        description: "Share of total capital provided by lenders.",
        calculate: capitalization_ratio,
        benchmark: dec!(0.4),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.3), Strong), (dec!(0.4), Sound), (dec!(0.55), Moderate), (dec!(0.7), Weak)], Alarming),
    },
    MetricDefinition {
        id: "tangible_equity_ratio",
        name_en: "Tangible Equity Ratio",
        name_ar: "نسبة حقوق الملكية الملموسة",
        category: Leverage,
        unit: Percent,
        formula: "(total_equity - intangible_assets - goodwill) / total_assets * 100",
        description: "Equity left after writing off intangibles, relative to assets.",
        calculate: tangible_equity_ratio,
        benchmark: dec!(30),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(35), Strong), (dec!(25), Sound), (dec!(15), Moderate), (dec!(5), Weak)], Alarming),
    },
    // -- Market -------------------------------------------------------------
    MetricDefinition {
        id: "price_to_earnings",
        name_en: "Price to Earnings",
        name_ar: "مضاعف الربحية",
        category: Market,
        unit: Times,
        formula: "share_price / (net_income / shares_outstanding)",
        description: "Price paid per unit of earnings per share.",
        calculate: price_to_earnings,
        benchmark: dec!(15),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(12), Strong), (dec!(18), Sound), (dec!(25), Moderate), (dec!(40), Weak)], Alarming),
    },
    MetricDefinition {
        id: "price_to_book",
        name_en: "Price to Book",
        name_ar: "مضاعف القيمة الدفترية",
        category: Market,
        unit: Times,
        formula: "share_price / (total_equity / shares_outstanding)",
        description: "Price paid per unit of book equity.",
        calculate: price_to_book,
        benchmark: dec!(3),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(1.5), Strong), (dec!(3), Sound), (dec!(4.5), Moderate), (dec!(7), Weak)], Alarming),
    },
    MetricDefinition {
        id: "price_to_sales",
        name_en: "Price to Sales",
        name_ar: "مضاعف المبيعات",
        category: Market,
        unit: Times,
        formula: "share_price * shares_outstanding / revenue",
        description: "Market value placed on each unit of sales.",
        calculate: price_to_sales,
        benchmark: dec!(2),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(1), Strong), (dec!(2), Sound), (dec!(4), Moderate), (dec!(8), Weak)], Alarming),
    },
    MetricDefinition {
        id: "price_to_cash_flow",
        name_en: "Price to Cash Flow",
        name_ar: "مضاعف التدفق النقدي",
        category: Market,
        unit: Times,
        formula: "share_price * shares_outstanding / operating_cash_flow",
        description: "Market value placed on each unit of operating cash flow.",
        calculate: price_to_cash_flow,
        benchmark: dec!(10),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(8), Strong), (dec!(12), Sound), (dec!(18), Moderate), (dec!(30), Weak)], Alarming),
    },
    MetricDefinition {
        id: "ev_to_ebitda",
        name_en: "EV to EBITDA",
        name_ar: "قيمة المنشأة إلى الأرباح قبل الفوائد والضرائب والإهلاك",
        category: Market,
        unit: Times,
        formula: "(market_cap + total_debt - cash) / ebitda",
        description: "Enterprise value placed on each unit of EBITDA.",
        calculate: ev_to_ebitda,
        benchmark: dec!(10),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(7), Strong), (dec!(10), Sound), (dec!(14), Moderate), (dec!(20), Weak)], Alarming),
    },
    MetricDefinition {
        id: "ev_to_revenue",
        name_en: "EV to Revenue",
        name_ar: "قيمة المنشأة إلى الإيرادات",
        category: Market,
        unit: Times,
        formula: "(market_cap + total_debt - cash) / revenue",
        description: "Enterprise value placed on each unit of sales.",
        calculate: ev_to_revenue,
        benchmark: dec!(2.5),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(1.5), Strong), (dec!(2.5), Sound), (dec!(4), Moderate), (dec!(7), Weak)], Alarming),
    },
    MetricDefinition {
        id: "earnings_yield",
        name_en: "Earnings Yield",
        name_ar: "عائد الأرباح",
        category: Market,
        unit: Percent,
        formula: "earnings_per_share / share_price * 100",
        description: "Earnings earned per unit of price paid.",
        calculate: earnings_yield,
        benchmark: dec!(6),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(6), Sound), (dec!(4), Moderate), (dec!(2), Weak)], Alarming),
    },
    MetricDefinition {
        id: "dividend_yield",
        name_en: "Dividend Yield",
        name_ar: "عائد التوزيعات",
        category: Market,
        unit: Percent,
        formula: "|dividends_paid| / shares_outstanding / share_price * 100",
        description: "Cash dividends received per unit of price paid.",
        calculate: dividend_yield,
        benchmark: dec!(3),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(4), Strong), (dec!(2.5), Sound), (dec!(1), Moderate), (dec!(0.1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "dividend_payout_ratio",
        name_en: "Dividend Payout Ratio",
        name_ar: "نسبة توزيع الأرباح",
        category: Market,
        unit: Percent,
        formula: "|dividends_paid| / net_income * 100",
        description: "Share of earnings paid out as dividends.",
        calculate: dividend_payout_ratio,
        benchmark: dec!(40),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(40), Strong), (dec!(60), Sound), (dec!(80), Moderate), (dec!(100), Weak)], Alarming),
    },
    MetricDefinition {
        id: "free_cash_flow_yield",
        name_en: "Free Cash Flow Yield",
        name_ar: "عائد التدفق النقدي الحر",
        category: Market,
        unit: Percent,
        formula: "free_cash_flow / market_cap * 100",
        description: "Free cash flow earned per unit of market value.",
        calculate: free_cash_flow_yield,
        benchmark: dec!(5),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(7), Strong), (dec!(5), Sound), (dec!(3), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "peg_ratio",
        name_en: "PEG Ratio",
        name_ar: "مضاعف الربحية إلى النمو",
        category: Market,
        unit: Ratio,
        formula: "price_to_earnings / eps_growth",
        description: "Earnings multiple adjusted for earnings growth.",
        calculate: peg_ratio,
        benchmark: dec!(1),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0.8), Strong), (dec!(1), Sound), (dec!(1.5), Moderate), (dec!(2.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "tobins_q",
        name_en: "Tobin's Q",
        name_ar: "نسبة توبين",
        category: Market,
        unit: Ratio,
        formula: "(market_cap + total_liabilities) / total_assets",
        description: "Market value of the firm relative to the book value of its assets.",
        calculate: tobins_q,
        benchmark: dec!(1.2),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(1.5), Strong), (dec!(1), Sound), (dec!(0.8), Moderate), (dec!(0.6), Weak)], Alarming),
    },
    MetricDefinition {
        id: "retention_ratio",
        name_en: "Retention Ratio",
        name_ar: "نسبة الأرباح المحتجزة",
        category: Market,
        unit: Percent,
        formula: "(net_income - |dividends_paid|) / net_income * 100",
        description: "Share of earnings kept in the business.",
        calculate: retention_ratio,
        benchmark: dec!(60),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(60), Strong), (dec!(40), Sound), (dec!(20), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "sustainable_growth_rate",
        name_en: "Sustainable Growth Rate",
        name_ar: "معدل النمو المستدام",
        category: Market,
        unit: Percent,
        formula: "return_on_equity * retention_ratio / 100",
        description: "Growth the business can fund from retained earnings.",
        calculate: sustainable_growth_rate,
        benchmark: dec!(8),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(10), Strong), (dec!(6), Sound), (dec!(3), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "eps_growth",
        name_en: "EPS Growth",
        name_ar: "نمو ربحية السهم",
        category: Market,
        unit: Percent,
        formula: "(eps - prior_period.eps) / |prior_period.eps| * 100",
        description: "Year-on-year change in earnings per share.",
        calculate: eps_growth,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(8), Sound), (dec!(0), Moderate), (dec!(-15), Weak)], Alarming),
    },
    // -- Cash flow ----------------------------------------------------------
    MetricDefinition {
        id: "operating_cash_flow_margin",
        name_en: "Operating Cash Flow Margin",
        name_ar: "هامش التدفق النقدي التشغيلي",
        category: CashFlow,
        unit: Percent,
        formula: "operating_cash_flow / revenue * 100",
        description: "Operating cash generated per unit of sales.",
        calculate: operating_cash_flow_margin,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(12), Sound), (dec!(6), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "free_cash_flow_margin",
        name_en: "Free Cash Flow Margin",
        name_ar: "هامش التدفق النقدي الحر",
        category: CashFlow,
        unit: Percent,
        formula: "free_cash_flow / revenue * 100",
        description: "Free cash flow generated per unit of sales.",
        calculate: free_cash_flow_margin,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(12), Strong), (dec!(8), Sound), (dec!(3), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_flow_to_net_income",
        name_en: "Cash Flow to Net Income",
        name_ar: "التدفق النقدي إلى صافي الدخل",
        category: CashFlow,
        unit: Ratio,
        formula: "operating_cash_flow / net_income",
        description: "Operating cash backing each unit of reported profit.",
        calculate: cash_flow_to_net_income,
        benchmark: dec!(1.2),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(1.2), Strong), (dec!(1), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "capex_to_operating_cash_flow",
        name_en: "Capex to Operating Cash Flow",
        name_ar: "النفقات الرأسمالية إلى التدفق النقدي التشغيلي",
        category: CashFlow,
        unit: Percent,
        formula: "|capital_expenditure| / operating_cash_flow * 100",
        description: "Share of operating cash reinvested in fixed assets.",
        calculate: capex_to_operating_cash_flow,
        benchmark: dec!(50),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(40), Strong), (dec!(55), Sound), (dec!(75), Moderate), (dec!(100), Weak)], Alarming),
    },
    MetricDefinition {
        id: "capex_to_revenue",
        name_en: "Capex to Revenue",
        name_ar: "النفقات الرأسمالية إلى الإيرادات",
        category: CashFlow,
        unit: Percent,
        formula: "|capital_expenditure| / revenue * 100",
        description: "Investment intensity relative to sales.",
        calculate: capex_to_revenue,
        benchmark: dec!(6),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(6), Strong), (dec!(10), Sound), (dec!(15), Moderate), (dec!(25), Weak)], Alarming),
    },
    MetricDefinition {
        id: "capex_to_depreciation",
        name_en: "Capex to Depreciation",
        name_ar: "النفقات الرأسمالية إلى الإهلاك",
        category: CashFlow,
        unit: Ratio,
        formula: "|capital_expenditure| / depreciation_amortisation",
        description: "Reinvestment relative to the wear of the existing asset base.",
        calculate: capex_to_depreciation,
        benchmark: dec!(1.2),
        policy: Optimal,
        reading: Reading::at_least(&[(dec!(1.2), Strong), (dec!(1), Sound), (dec!(0.8), Moderate), (dec!(0.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "free_cash_flow_to_equity",
        name_en: "Free Cash Flow to Equity",
        name_ar: "التدفق النقدي الحر إلى حقوق الملكية",
        category: CashFlow,
        unit: Percent,
        formula: "free_cash_flow / total_equity * 100",
        description: "Free cash flow generated per unit of book equity.",
        calculate: free_cash_flow_to_equity,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(12), Strong), (dec!(8), Sound), (dec!(4), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "dividend_cash_coverage",
        name_en: "Dividend Cash Coverage",
        name_ar: "تغطية التوزيعات نقداً",
        category: CashFlow,
        unit: Times,
        formula: "operating_cash_flow / |dividends_paid|",
        description: "Times operating cash flow covers dividends.",
        calculate: dividend_cash_coverage,
        benchmark: dec!(3),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(3), Strong), (dec!(2), Sound), (dec!(1.5), Moderate), (dec!(1), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_reinvestment_ratio",
        name_en: "Cash Reinvestment Ratio",
        name_ar: "نسبة إعادة استثمار النقد",
        category: CashFlow,
        unit: Percent,
        formula: "(operating_cash_flow - |dividends_paid|) / (fixed_assets + working_capital) * 100",
        description: "Retained operating cash relative to the operating asset base.",
        calculate: cash_reinvestment_ratio,
        benchmark: dec!(8),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(10), Strong), (dec!(7), Sound), (dec!(4), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "free_cash_flow_to_debt",
        name_en: "Free Cash Flow to Debt",
        name_ar: "التدفق النقدي الحر إلى الديون",
        category: CashFlow,
        unit: Percent,
        formula: "free_cash_flow / (short_term_debt + long_term_debt) * 100",
        description: "Share of debt repayable from one year of free cash flow.",
        calculate: free_cash_flow_to_debt,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(25), Strong), (dec!(15), Sound), (dec!(8), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "accrual_ratio",
        name_en: "Accrual Ratio",
        name_ar: "نسبة المستحقات",
        category: CashFlow,
        unit: Percent,
        formula: "(net_income - operating_cash_flow) / total_assets * 100",
        description: "Earnings not backed by cash, relative to assets.",
        calculate: accrual_ratio,
        benchmark: dec!(5),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(0), Strong), (dec!(5), Sound), (dec!(10), Moderate), (dec!(20), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_interest_coverage",
        name_en: "Cash Interest Coverage",
        name_ar: "التغطية النقدية للفوائد",
        category: CashFlow,
        unit: Times,
        formula: "(operating_cash_flow + interest_expense + income_tax) / interest_expense",
        description: "Times pre-interest operating cash covers interest.",
        calculate: cash_interest_coverage,
        benchmark: dec!(6),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(8), Strong), (dec!(5), Sound), (dec!(3), Moderate), (dec!(1.5), Weak)], Alarming),
    },
    MetricDefinition {
        id: "investing_to_operating_cash_flow",
        name_en: "Investing to Operating Cash Flow",
        name_ar: "التدفق الاستثماري إلى التدفق التشغيلي",
        category: CashFlow,
        unit: Percent,
        formula: "|investing_cash_flow| / operating_cash_flow * 100",
        description: "Share of operating cash deployed into investments.",
        calculate: investing_to_operating_cash_flow,
        benchmark: dec!(60),
        policy: Optimal,
        reading: Reading::at_most(&[(dec!(60), Strong), (dec!(80), Sound), (dec!(100), Moderate), (dec!(140), Weak)], Alarming),
    },
    MetricDefinition {
        id: "financing_to_operating_cash_flow",
        name_en: "Financing to Operating Cash Flow",
        name_ar: "التدفق التمويلي إلى التدفق التشغيلي",
        category: CashFlow,
        unit: Percent,
        formula: "|financing_cash_flow| / operating_cash_flow * 100",
        description: "Financing activity relative to operating cash generation.",
        calculate: financing_to_operating_cash_flow,
        benchmark: dec!(50),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(30), Strong), (dec!(50), Sound), (dec!(80), Moderate), (dec!(120), Weak)], Alarming),
    },
    MetricDefinition {
        id: "free_cash_flow_conversion",
        name_en: "Free Cash Flow Conversion",
        name_ar: "معدل تحويل التدفق النقدي الحر",
        category: CashFlow,
        unit: Percent,
        formula: "free_cash_flow / ebitda * 100",
        description: "Share of EBITDA that ends up as free cash flow.",
        calculate: free_cash_flow_conversion,
        benchmark: dec!(50),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(60), Strong), (dec!(45), Sound), (dec!(30), Moderate), (dec!(10), Weak)], Alarming),
    },
    MetricDefinition {
        id: "cash_return_on_equity",
        name_en: "Cash Return on Equity",
        name_ar: "العائد النقدي على حقوق الملكية",
        category: CashFlow,
        unit: Percent,
        formula: "operating_cash_flow / total_equity * 100",
        description: "Operating cash generated per unit of book equity.",
        calculate: cash_return_on_equity,
        benchmark: dec!(15),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(20), Strong), (dec!(15), Sound), (dec!(8), Moderate), (dec!(0), Weak)], Alarming),
    },
    MetricDefinition {
        id: "operating_cash_flow_growth",
        name_en: "Operating Cash Flow Growth",
        name_ar: "نمو التدفق النقدي التشغيلي",
        category: CashFlow,
        unit: Percent,
        formula: "(operating_cash_flow - prior_period.operating_cash_flow) / |prior_period.operating_cash_flow| * 100",
        description: "Year-on-year change in operating cash flow.",
        calculate: operating_cash_flow_growth,
        benchmark: dec!(10),
        policy: HigherIsBetter,
        reading: Reading::at_least(&[(dec!(15), Strong), (dec!(8), Sound), (dec!(0), Moderate), (dec!(-15), Weak)], Alarming),
    },
    MetricDefinition {
        id: "debt_payback_years",
        name_en: "Debt Payback Period",
        name_ar: "فترة سداد الديون",
        category: CashFlow,
        unit: Years,
        formula: "(short_term_debt + long_term_debt) / free_cash_flow",
        description: "Years of free cash flow needed to repay all debt.",
        calculate: debt_payback_years,
        benchmark: dec!(4),
        policy: LowerIsBetter,
        reading: Reading::at_most(&[(dec!(2), Strong), (dec!(4), Sound), (dec!(6), Moderate), (dec!(10), Weak)], Alarming),
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
            revenue: Some(dec!(1000)),
            cost_of_goods_sold: Some(dec!(600)),
            inventory: Some(dec!(100)),
            accounts_receivable: Some(dec!(125)),
            accounts_payable: Some(dec!(75)),
            current_assets: Some(dec!(400)),
            current_liabilities: Some(dec!(200)),
            net_income: Some(dec!(80)),
            dividends_paid: Some(dec!(-20)),
            total_equity: Some(dec!(0)),
            total_liabilities: Some(dec!(500)),
            ..FinancialData::default()
        }
    }

    fn run(calc: fn(&mut Inputs) -> DataResult<Decimal>) -> DataResult<Decimal> {
        let data = company();
        let mut inputs = Inputs::new(&data);
        calc(&mut inputs)
    }

    #[test]
    fn test_current_ratio() {
        assert_eq!(run(current_ratio).unwrap(), dec!(2));
    }

    #[test]
    fn test_cash_conversion_cycle_combines_day_counts() {
        // DSO and DPO are both 45.625 days, so the cycle equals DIO.
        let ccc = run(cash_conversion_cycle).unwrap();
        let dio = run(days_inventory_outstanding).unwrap();
        assert_eq!(ccc.round_dp(6), dio.round_dp(6));
        assert_eq!(run(operating_cycle).unwrap().round_dp(3), dec!(106.458));
    }

    #[test]
    fn test_payout_uses_absolute_dividends() {
        assert_eq!(run(dividend_payout_ratio).unwrap(), dec!(25));
        assert_eq!(run(retention_ratio).unwrap(), dec!(75));
    }

    #[test]
    fn test_zero_equity_is_a_data_error() {
        match run(debt_to_equity) {
            Err(DataError::ZeroDenominator { .. }) => {}
            other => panic!("Expected ZeroDenominator, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_figure_names_the_field() {
        assert_eq!(
            run(cash_ratio),
            Err(DataError::MissingField("cash"))
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = BASIC_METRICS.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BASIC_METRICS.len());
    }
}
