//! Human-readable interpretation of metric values.
//!
//! Each metric carries its own [`Reading`]: a list of breakpoints mapping the
//! raw value to a [`Tone`]. The breakpoints belong to the metric and are not
//! derived from the status thresholds, so a value can be "average" against
//! its benchmark while still reading as sound. The sentence itself comes from
//! the metric's category and the requested locale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::types::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Strong,
    Sound,
    Moderate,
    Weak,
    Alarming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Rules are `value >= bound`, checked in order.
    AtLeast,
    /// Rules are `value <= bound`, checked in order.
    AtMost,
}

/// Breakpoint table for one metric.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    pub direction: Direction,
    pub rules: &'static [(Decimal, Tone)],
    pub fallback: Tone,
}

impl Reading {
    pub const fn at_least(rules: &'static [(Decimal, Tone)], fallback: Tone) -> Self {
        Self {
            direction: Direction::AtLeast,
            rules,
            fallback,
        }
    }

    pub const fn at_most(rules: &'static [(Decimal, Tone)], fallback: Tone) -> Self {
        Self {
            direction: Direction::AtMost,
            rules,
            fallback,
        }
    }

    pub fn tone(&self, value: Decimal) -> Tone {
        self.rules
            .iter()
            .find(|(bound, _)| match self.direction {
                Direction::AtLeast => value >= *bound,
                Direction::AtMost => value <= *bound,
            })
            .map(|(_, tone)| *tone)
            .unwrap_or(self.fallback)
    }

    pub fn interpret(&self, category: Category, value: Decimal, locale: Locale) -> &'static str {
        sentence(category, self.tone(value), locale)
    }
}

/// Text shown in place of an interpretation when the metric is unavailable.
pub fn unavailable_text(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Data unavailable",
        Locale::Ar => "البيانات غير متوفرة",
    }
}

pub fn sentence(category: Category, tone: Tone, locale: Locale) -> &'static str {
    use Category::*;
    use Tone::*;

    match locale {
        Locale::En => match (category, tone) {
            (Structural, Strong) => "The balance-sheet and cost structure is well balanced.",
            (Structural, Sound) => "The structure is broadly in line with a healthy profile.",
            (Structural, Moderate) => "The structure is acceptable but shows some concentration.",
            (Structural, Weak) => "The structure is skewed and deserves review.",
            (Structural, Alarming) => "The structure is heavily imbalanced.",

            (Liquidity, Strong) => "Liquidity is strong; short-term obligations are comfortably covered.",
            (Liquidity, Sound) => "Liquidity is adequate for day-to-day obligations.",
            (Liquidity, Moderate) => "Liquidity is acceptable but leaves a thin cushion.",
            (Liquidity, Weak) => "Liquidity is weak; short-term obligations may be hard to meet.",
            (Liquidity, Alarming) => "Liquidity is critically low.",

            (Activity, Strong) => "Assets and working capital are used very efficiently.",
            (Activity, Sound) => "Operating efficiency is good.",
            (Activity, Moderate) => "Operating efficiency is around the norm.",
            (Activity, Weak) => "Assets and working capital are turning over slowly.",
            (Activity, Alarming) => "Operating efficiency is very poor.",

            (Profitability, Strong) => "Profitability is excellent.",
            (Profitability, Sound) => "Profitability is healthy.",
            (Profitability, Moderate) => "Profitability is modest.",
            (Profitability, Weak) => "Profitability is weak.",
            (Profitability, Alarming) => "The business is loss-making or close to it.",

            (Leverage, Strong) => "Leverage is conservative and debt is well covered.",
            (Leverage, Sound) => "Leverage is at a comfortable level.",
            (Leverage, Moderate) => "Leverage is moderate; monitor debt service.",
            (Leverage, Weak) => "Leverage is high relative to earnings and equity.",
            (Leverage, Alarming) => "Leverage is excessive and debt service is at risk.",

            (Market, Strong) => "Market valuation looks attractive.",
            (Market, Sound) => "Market valuation is reasonable.",
            (Market, Moderate) => "Market valuation is neutral.",
            (Market, Weak) => "Market valuation looks stretched.",
            (Market, Alarming) => "Market valuation is hard to justify on current fundamentals.",

            (CashFlow, Strong) => "Cash generation is strong and well ahead of needs.",
            (CashFlow, Sound) => "Cash generation is healthy.",
            (CashFlow, Moderate) => "Cash generation is adequate.",
            (CashFlow, Weak) => "Cash generation is weak relative to needs.",
            (CashFlow, Alarming) => "The business is consuming cash.",

            (Valuation, Strong) => "Intrinsic value comfortably exceeds the market price.",
            (Valuation, Sound) => "Value creation is positive.",
            (Valuation, Moderate) => "Value and price are roughly aligned.",
            (Valuation, Weak) => "Value creation is thin.",
            (Valuation, Alarming) => "The business appears to be destroying value.",

            (Performance, Strong) => "Operating and financial performance is very strong.",
            (Performance, Sound) => "Performance drivers are healthy.",
            (Performance, Moderate) => "Performance drivers are average.",
            (Performance, Weak) => "Performance drivers are under pressure.",
            (Performance, Alarming) => "Performance drivers are deteriorating sharply.",

            (Distress, Strong) => "Financial distress risk is very low.",
            (Distress, Sound) => "Financial distress risk is low.",
            (Distress, Moderate) => "The company sits in the grey zone.",
            (Distress, Weak) => "Warning signs of distress are present.",
            (Distress, Alarming) => "Distress indicators are in the danger zone.",

            (IntrinsicValue, Strong) => "Model value is well above the market price.",
            (IntrinsicValue, Sound) => "Model value supports the market price.",
            (IntrinsicValue, Moderate) => "Model value is close to the market price.",
            (IntrinsicValue, Weak) => "Model value is below the market price.",
            (IntrinsicValue, Alarming) => "Model value is far below the market price.",

            (MarketRisk, Strong) => "Market risk is low for the return on offer.",
            (MarketRisk, Sound) => "Market risk is acceptable.",
            (MarketRisk, Moderate) => "Market risk is moderate.",
            (MarketRisk, Weak) => "Market risk is elevated.",
            (MarketRisk, Alarming) => "Market risk is severe.",

            (CreditRisk, Strong) => "Credit risk is minimal.",
            (CreditRisk, Sound) => "Credit quality is solid.",
            (CreditRisk, Moderate) => "Credit quality is adequate.",
            (CreditRisk, Weak) => "Credit risk is elevated.",
            (CreditRisk, Alarming) => "Default risk is high.",

            (EarningsQuality, Strong) => "Earnings are of high quality and backed by cash.",
            (EarningsQuality, Sound) => "Earnings quality is good.",
            (EarningsQuality, Moderate) => "Earnings quality is acceptable.",
            (EarningsQuality, Weak) => "Earnings quality is questionable.",
            (EarningsQuality, Alarming) => "Earnings show signs of manipulation or heavy accruals.",
        },
        Locale::Ar => match (category, tone) {
            (Structural, Strong) => "هيكل الميزانية والتكاليف متوازن بشكل جيد.",
            (Structural, Sound) => "الهيكل متوافق عموماً مع وضع مالي سليم.",
            (Structural, Moderate) => "الهيكل مقبول مع وجود بعض التركز.",
            (Structural, Weak) => "الهيكل غير متوازن ويحتاج إلى مراجعة.",
            (Structural, Alarming) => "الهيكل مختل بشكل كبير.",

            (Liquidity, Strong) => "السيولة قوية والالتزامات قصيرة الأجل مغطاة بارتياح.",
            (Liquidity, Sound) => "السيولة كافية للالتزامات اليومية.",
            (Liquidity, Moderate) => "السيولة مقبولة لكن هامش الأمان ضيق.",
            (Liquidity, Weak) => "السيولة ضعيفة وقد يصعب الوفاء بالالتزامات قصيرة الأجل.",
            (Liquidity, Alarming) => "السيولة منخفضة بشكل حرج.",

            (Activity, Strong) => "تُستخدم الأصول ورأس المال العامل بكفاءة عالية.",
            (Activity, Sound) => "الكفاءة التشغيلية جيدة.",
            (Activity, Moderate) => "الكفاءة التشغيلية في حدود المعدل.",
            (Activity, Weak) => "دوران الأصول ورأس المال العامل بطيء.",
            (Activity, Alarming) => "الكفاءة التشغيلية ضعيفة جداً.",

            (Profitability, Strong) => "الربحية ممتازة.",
            (Profitability, Sound) => "الربحية جيدة.",
            (Profitability, Moderate) => "الربحية متواضعة.",
            (Profitability, Weak) => "الربحية ضعيفة.",
            (Profitability, Alarming) => "النشاط خاسر أو قريب من الخسارة.",

            (Leverage, Strong) => "الرافعة المالية متحفظة والديون مغطاة جيداً.",
            (Leverage, Sound) => "مستوى الرافعة المالية مريح.",
            (Leverage, Moderate) => "الرافعة المالية معتدلة؛ يجب مراقبة خدمة الدين.",
            (Leverage, Weak) => "الرافعة المالية مرتفعة مقارنة بالأرباح وحقوق الملكية.",
            (Leverage, Alarming) => "الرافعة المالية مفرطة وخدمة الدين معرضة للخطر.",

            (Market, Strong) => "التقييم السوقي جذاب.",
            (Market, Sound) => "التقييم السوقي معقول.",
            (Market, Moderate) => "التقييم السوقي محايد.",
            (Market, Weak) => "التقييم السوقي مبالغ فيه.",
            (Market, Alarming) => "يصعب تبرير التقييم السوقي بالأساسيات الحالية.",

            (CashFlow, Strong) => "توليد النقد قوي ويتجاوز الاحتياجات بوضوح.",
            (CashFlow, Sound) => "توليد النقد جيد.",
            (CashFlow, Moderate) => "توليد النقد كافٍ.",
            (CashFlow, Weak) => "توليد النقد ضعيف مقارنة بالاحتياجات.",
            (CashFlow, Alarming) => "النشاط يستهلك النقد.",

            (Valuation, Strong) => "القيمة الجوهرية تتجاوز سعر السوق بوضوح.",
            (Valuation, Sound) => "خلق القيمة إيجابي.",
            (Valuation, Moderate) => "القيمة والسعر متقاربان.",
            (Valuation, Weak) => "خلق القيمة محدود.",
            (Valuation, Alarming) => "يبدو أن الشركة تهدر القيمة.",

            (Performance, Strong) => "الأداء التشغيلي والمالي قوي جداً.",
            (Performance, Sound) => "محركات الأداء جيدة.",
            (Performance, Moderate) => "محركات الأداء متوسطة.",
            (Performance, Weak) => "محركات الأداء تحت الضغط.",
            (Performance, Alarming) => "محركات الأداء تتدهور بشدة.",

            (Distress, Strong) => "مخاطر التعثر المالي منخفضة جداً.",
            (Distress, Sound) => "مخاطر التعثر المالي منخفضة.",
            (Distress, Moderate) => "الشركة في المنطقة الرمادية.",
            (Distress, Weak) => "توجد مؤشرات إنذار بالتعثر.",
            (Distress, Alarming) => "مؤشرات التعثر في منطقة الخطر.",

            (IntrinsicValue, Strong) => "قيمة النموذج أعلى بكثير من سعر السوق.",
            (IntrinsicValue, Sound) => "قيمة النموذج تدعم سعر السوق.",
            (IntrinsicValue, Moderate) => "قيمة النموذج قريبة من سعر السوق.",
            (IntrinsicValue, Weak) => "قيمة النموذج أقل من سعر السوق.",
            (IntrinsicValue, Alarming) => "قيمة النموذج أقل بكثير من سعر السوق.",

            (MarketRisk, Strong) => "مخاطر السوق منخفضة مقارنة بالعائد المتاح.",
            (MarketRisk, Sound) => "مخاطر السوق مقبولة.",
            (MarketRisk, Moderate) => "مخاطر السوق معتدلة.",
            (MarketRisk, Weak) => "مخاطر السوق مرتفعة.",
            (MarketRisk, Alarming) => "مخاطر السوق شديدة.",

            (CreditRisk, Strong) => "مخاطر الائتمان ضئيلة.",
            (CreditRisk, Sound) => "الجودة الائتمانية متينة.",
            (CreditRisk, Moderate) => "الجودة الائتمانية كافية.",
            (CreditRisk, Weak) => "مخاطر الائتمان مرتفعة.",
            (CreditRisk, Alarming) => "مخاطر التعثر عن السداد عالية.",

            (EarningsQuality, Strong) => "الأرباح عالية الجودة ومدعومة بالنقد.",
            (EarningsQuality, Sound) => "جودة الأرباح جيدة.",
            (EarningsQuality, Moderate) => "جودة الأرباح مقبولة.",
            (EarningsQuality, Weak) => "جودة الأرباح موضع تساؤل.",
            (EarningsQuality, Alarming) => "تظهر الأرباح مؤشرات تلاعب أو استحقاقات مرتفعة.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CURRENT: Reading = Reading::at_least(
        &[
            (dec!(2.0), Tone::Strong),
            (dec!(1.5), Tone::Sound),
            (dec!(1.0), Tone::Moderate),
            (dec!(0.5), Tone::Weak),
        ],
        Tone::Alarming,
    );

    const DSO: Reading = Reading::at_most(
        &[(dec!(30), Tone::Strong), (dec!(60), Tone::Moderate)],
        Tone::Weak,
    );

    #[test]
    fn test_at_least_breakpoints() {
        assert_eq!(CURRENT.tone(dec!(2.0)), Tone::Strong);
        assert_eq!(CURRENT.tone(dec!(1.7)), Tone::Sound);
        assert_eq!(CURRENT.tone(dec!(1.0)), Tone::Moderate);
        assert_eq!(CURRENT.tone(dec!(0.2)), Tone::Alarming);
    }

    #[test]
    fn test_at_most_breakpoints() {
        assert_eq!(DSO.tone(dec!(25)), Tone::Strong);
        assert_eq!(DSO.tone(dec!(45)), Tone::Moderate);
        assert_eq!(DSO.tone(dec!(90)), Tone::Weak);
    }

    #[test]
    fn test_sentences_are_localised() {
        let en = CURRENT.interpret(Category::Liquidity, dec!(2.5), Locale::En);
        let ar = CURRENT.interpret(Category::Liquidity, dec!(2.5), Locale::Ar);
        assert!(en.starts_with("Liquidity is strong"));
        assert!(ar.contains("السيولة"));
        assert_ne!(en, ar);
    }
}
