//! Metric catalogs and lookup.
//!
//! Each tier is a static, ordered slice of definitions. Tiers are compiled
//! in through the `basic`, `applied` and `advanced` features.

pub mod definition;

#[cfg(feature = "advanced")]
pub mod advanced;
#[cfg(feature = "applied")]
pub mod applied;
#[cfg(feature = "basic")]
pub mod basic;
#[cfg(any(feature = "applied", feature = "advanced"))]
mod forensic;

pub use definition::{
    AdvancedDefinition, Calculator, Category, MetricDefinition, MetricInfo, ModelProfile, Tier,
    Unit,
};

use serde::Serialize;

use crate::classification::{ThresholdTable, ADVANCED, APPLIED, BASIC};
use crate::error::FinsightError;
use crate::types::Locale;
use crate::FinsightResult;

/// Tiers compiled into this build, in catalog order.
pub fn enabled_tiers() -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|tier| definitions(*tier).is_ok())
        .collect()
}

/// Ordered definitions of one tier.
pub fn definitions(tier: Tier) -> FinsightResult<Vec<&'static MetricDefinition>> {
    match tier {
        #[cfg(feature = "basic")]
        Tier::Basic => Ok(basic::BASIC_METRICS.iter().collect()),
        #[cfg(feature = "applied")]
        Tier::Applied => Ok(applied::APPLIED_METRICS.iter().collect()),
        #[cfg(feature = "advanced")]
        Tier::Advanced => Ok(advanced::ADVANCED_METRICS.iter().map(|d| &d.metric).collect()),
        #[allow(unreachable_patterns)]
        other => Err(FinsightError::UnknownCatalog(format!(
            "{other} (not compiled into this build)"
        ))),
    }
}

/// Catalog lookup by name (`basic`, `applied` or `advanced`).
pub fn by_name(name: &str) -> FinsightResult<Vec<&'static MetricDefinition>> {
    definitions(name.parse()?)
}

/// The status threshold table each tier classifies against.
pub fn threshold_table(tier: Tier) -> &'static ThresholdTable {
    match tier {
        Tier::Basic => &BASIC,
        Tier::Applied => &APPLIED,
        Tier::Advanced => &ADVANCED,
    }
}

/// Find a metric by id across every enabled tier.
pub fn find(id: &str) -> Option<(Tier, &'static MetricDefinition)> {
    enabled_tiers().into_iter().find_map(|tier| {
        definitions(tier)
            .ok()?
            .into_iter()
            .find(|def| def.id == id)
            .map(|def| (tier, def))
    })
}

pub fn lookup(id: &str) -> FinsightResult<(Tier, &'static MetricDefinition)> {
    find(id).ok_or_else(|| FinsightError::UnknownMetric(id.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub name: &'static str,
    pub count: usize,
}

/// Metric count per category, in first-seen order.
pub fn category_counts(tier: Tier, locale: Locale) -> FinsightResult<Vec<CategoryCount>> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for def in definitions(tier)? {
        match counts.iter_mut().find(|c| c.category == def.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: def.category,
                name: def.category.name(locale),
                count: 1,
            }),
        }
    }
    Ok(counts)
}

/// Serializable listing, optionally narrowed to one tier and/or category.
pub fn list(
    tier: Option<Tier>,
    category: Option<Category>,
    locale: Locale,
) -> FinsightResult<Vec<MetricInfo>> {
    let tiers = match tier {
        Some(t) => vec![t],
        None => enabled_tiers(),
    };
    let mut infos = Vec::new();
    for t in tiers {
        infos.extend(
            definitions(t)?
                .into_iter()
                .filter(|def| category.map_or(true, |c| def.category == c))
                .map(|def| MetricInfo::new(def, t, locale)),
        );
    }
    Ok(infos)
}

#[cfg(all(test, feature = "basic", feature = "applied", feature = "advanced"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tier_sizes() {
        assert_eq!(definitions(Tier::Basic).unwrap().len(), 106);
        assert_eq!(definitions(Tier::Applied).unwrap().len(), 21);
        assert_eq!(definitions(Tier::Advanced).unwrap().len(), 53);
    }

    #[test]
    fn test_ids_unique_across_tiers() {
        let mut ids: Vec<&str> = list(None, None, Locale::En)
            .unwrap()
            .into_iter()
            .map(|info| info.id)
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_basic_category_counts() {
        let counts: Vec<(Category, usize)> = category_counts(Tier::Basic, Locale::En)
            .unwrap()
            .into_iter()
            .map(|c| (c.category, c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                (Category::Structural, 13),
                (Category::Liquidity, 15),
                (Category::Activity, 15),
                (Category::Profitability, 15),
                (Category::Leverage, 15),
                (Category::Market, 15),
                (Category::CashFlow, 18),
            ]
        );
    }

    #[test]
    fn test_ratio_group_totals_seventy_five() {
        let ratios: usize = definitions(Tier::Basic)
            .unwrap()
            .iter()
            .filter(|def| def.category.group() == Some("ratios"))
            .count();
        assert_eq!(ratios, 75);
    }

    #[test]
    fn test_lookup_by_name_and_id() {
        assert_eq!(by_name("Applied").unwrap().len(), 21);
        assert!(matches!(by_name("premium"), Err(FinsightError::UnknownCatalog(_))));

        let (tier, def) = lookup("altman_z_score").unwrap();
        assert_eq!(tier, Tier::Applied);
        assert_eq!(def.category, Category::Distress);
        assert!(matches!(lookup("nope"), Err(FinsightError::UnknownMetric(_))));
    }

    #[test]
    fn test_every_benchmark_is_positive() {
        for info in list(None, None, Locale::En).unwrap() {
            assert!(info.benchmark > rust_decimal::Decimal::ZERO, "{}", info.id);
        }
    }

    #[test]
    fn test_list_filters_by_category() {
        let liquidity = list(Some(Tier::Basic), Some(Category::Liquidity), Locale::Ar).unwrap();
        assert_eq!(liquidity.len(), 15);
        assert_eq!(liquidity[0].name, "نسبة التداول");
    }
}
