use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classification::{Policy, Reading};
use crate::data::Inputs;
use crate::math::DataResult;
use crate::types::Locale;

/// One closed-form formula over the input record.
pub type Calculator = fn(&mut Inputs<'_>) -> DataResult<Decimal>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Applied,
    Advanced,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Applied, Tier::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Applied => "applied",
            Self::Advanced => "advanced",
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = crate::FinsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "applied" => Ok(Self::Applied),
            "advanced" => Ok(Self::Advanced),
            other => Err(crate::FinsightError::UnknownCatalog(other.to_string())),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // basic
    Structural,
    Liquidity,
    Activity,
    Profitability,
    Leverage,
    Market,
    CashFlow,
    // applied
    Valuation,
    Performance,
    Distress,
    // advanced
    IntrinsicValue,
    MarketRisk,
    CreditRisk,
    EarningsQuality,
}

impl Category {
    pub fn name(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Structural => "Structural Analysis",
                Self::Liquidity => "Liquidity Ratios",
                Self::Activity => "Activity Ratios",
                Self::Profitability => "Profitability Ratios",
                Self::Leverage => "Leverage Ratios",
                Self::Market => "Market Ratios",
                Self::CashFlow => "Cash Flow Analysis",
                Self::Valuation => "Valuation",
                Self::Performance => "Performance Drivers",
                Self::Distress => "Distress Models",
                Self::IntrinsicValue => "Intrinsic Value Models",
                Self::MarketRisk => "Market Risk",
                Self::CreditRisk => "Credit Risk",
                Self::EarningsQuality => "Earnings Quality",
            },
            Locale::Ar => match self {
                Self::Structural => "التحليل الهيكلي",
                Self::Liquidity => "نسب السيولة",
                Self::Activity => "نسب النشاط",
                Self::Profitability => "نسب الربحية",
                Self::Leverage => "نسب الرافعة المالية",
                Self::Market => "نسب السوق",
                Self::CashFlow => "تحليل التدفقات النقدية",
                Self::Valuation => "التقييم",
                Self::Performance => "محركات الأداء",
                Self::Distress => "نماذج التعثر المالي",
                Self::IntrinsicValue => "نماذج القيمة الجوهرية",
                Self::MarketRisk => "مخاطر السوق",
                Self::CreditRisk => "مخاطر الائتمان",
                Self::EarningsQuality => "جودة الأرباح",
            },
        }
    }

    /// The five basic-tier ratio categories share the "ratios" group.
    pub fn group(self) -> Option<&'static str> {
        match self {
            Self::Liquidity
            | Self::Activity
            | Self::Profitability
            | Self::Leverage
            | Self::Market => Some("ratios"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name(Locale::En))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Plain ratio, e.g. 1.8
    Ratio,
    /// Multiple of earnings or coverage, e.g. 6.5x
    Times,
    /// 0–100
    Percent,
    Days,
    Years,
    Months,
    /// Currency amount (per share or per employee)
    Currency,
    /// Model score without a natural unit
    Score,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Ratio | Self::Currency | Self::Score => "",
            Self::Times => "x",
            Self::Percent => "%",
            Self::Days => " days",
            Self::Years => " years",
            Self::Months => " months",
        }
    }
}

/// Static description of one metric in a catalog.
#[derive(Clone, Copy)]
pub struct MetricDefinition {
    pub id: &'static str,
    pub name_en: &'static str,
    pub name_ar: &'static str,
    pub category: Category,
    pub unit: Unit,
    pub formula: &'static str,
    pub description: &'static str,
    pub calculate: Calculator,
    pub benchmark: Decimal,
    pub policy: Policy,
    pub reading: Reading,
}

impl MetricDefinition {
    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.name_en,
            Locale::Ar => self.name_ar,
        }
    }
}

impl std::fmt::Debug for MetricDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricDefinition")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("benchmark", &self.benchmark)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Model metadata carried by advanced-tier metrics.
#[derive(Debug, Clone, Copy)]
pub struct ModelProfile {
    /// Starting confidence (0–100) before data-quality deductions.
    pub base_confidence: Decimal,
    /// Published or back-tested accuracy of the underlying model (0–1).
    pub model_accuracy: Option<Decimal>,
}

#[derive(Debug, Clone, Copy)]
pub struct AdvancedDefinition {
    pub metric: MetricDefinition,
    pub profile: ModelProfile,
}

/// Serializable summary of a definition, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: Tier,
    pub category: Category,
    pub unit: Unit,
    pub formula: &'static str,
    pub description: &'static str,
    pub benchmark: Decimal,
    pub policy: Policy,
}

impl MetricInfo {
    pub fn new(def: &MetricDefinition, tier: Tier, locale: Locale) -> Self {
        Self {
            id: def.id,
            name: def.name(locale),
            tier,
            category: def.category,
            unit: def.unit,
            formula: def.formula,
            description: def.description,
            benchmark: def.benchmark,
            policy: def.policy,
        }
    }
}
