//! Report assembly: per-tier sections plus an overall summary.
//!
//! The summary mirrors the shape the web front-end already consumes
//! (`summary`, `score`, `riskLevel`, `keyFindings`).

pub mod assembler;

pub use assembler::{assemble, Highlight, ReportItem, ReportSection, StatusCounts};

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::Tier;
use crate::config::EngineConfig;
use crate::data::{CompanyInfo, FinancialData};
use crate::engine;
use crate::error::FinsightError;
use crate::types::{with_metadata, ComputationOutput, Locale};
use crate::FinsightResult;

const MAX_KEY_FINDINGS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    High,
}

impl RiskLevel {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Low, Locale::En) => "Low",
            (Self::Moderate, Locale::En) => "Moderate",
            (Self::Elevated, Locale::En) => "Elevated",
            (Self::High, Locale::En) => "High",
            (Self::Low, Locale::Ar) => "منخفض",
            (Self::Moderate, Locale::Ar) => "معتدل",
            (Self::Elevated, Locale::Ar) => "مرتفع",
            (Self::High, Locale::Ar) => "عالٍ",
        }
    }
}

/// Risk band of a 0-100 composite score.
pub fn risk_level(score: Decimal) -> RiskLevel {
    if score >= dec!(80) {
        RiskLevel::Low
    } else if score >= dec!(60) {
        RiskLevel::Moderate
    } else if score >= dec!(40) {
        RiskLevel::Elevated
    } else {
        RiskLevel::High
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierReport {
    pub tier: Tier,
    pub counts: StatusCounts,
    pub composite_score: Option<Decimal>,
    pub sections: Vec<ReportSection>,
}

impl TierReport {
    fn new(tier: Tier, sections: Vec<ReportSection>) -> Self {
        let mut counts = StatusCounts::default();
        for s in &sections {
            counts.merge(&s.counts);
        }
        Self {
            tier,
            composite_score: counts.composite_score(),
            counts,
            sections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub summary: String,
    pub score: Decimal,
    pub risk_level: RiskLevel,
    pub key_findings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub company: Option<CompanyInfo>,
    pub generated_at: DateTime<Utc>,
    pub locale: Locale,
    pub tiers: Vec<TierReport>,
    pub summary: ReportSummary,
}

fn key_findings(tiers: &[TierReport], locale: Locale) -> Vec<String> {
    let mut findings = Vec::new();
    let scored: Vec<(&TierReport, &ReportSection, Decimal)> = tiers
        .iter()
        .flat_map(|t| {
            t.sections
                .iter()
                .filter_map(move |s| s.composite_score.map(|score| (t, s, score)))
        })
        .collect();

    if let Some((t, s, score)) = scored.iter().max_by_key(|(_, _, score)| *score) {
        findings.push(match locale {
            Locale::En => format!("Strongest area: {} ({} catalog) at {}/100", s.name, t.tier, score.normalize()),
            Locale::Ar => format!("أقوى مجال: {} (كتالوج {}) بدرجة {}/100", s.name, t.tier, score.normalize()),
        });
    }
    if let Some((t, s, score)) = scored.iter().min_by_key(|(_, _, score)| *score) {
        findings.push(match locale {
            Locale::En => format!("Weakest area: {} ({} catalog) at {}/100", s.name, t.tier, score.normalize()),
            Locale::Ar => format!("أضعف مجال: {} (كتالوج {}) بدرجة {}/100", s.name, t.tier, score.normalize()),
        });
    }
    for concern in tiers.iter().flat_map(|t| t.sections.iter()).flat_map(|s| s.concerns.iter()) {
        if findings.len() >= MAX_KEY_FINDINGS {
            break;
        }
        let value = concern.value.map(|v| v.normalize().to_string()).unwrap_or_default();
        findings.push(match locale {
            Locale::En => format!("{} is critical ({})", concern.name, value),
            Locale::Ar => format!("{} في وضع حرج ({})", concern.name, value),
        });
    }
    findings
}

fn summarise(tiers: &[TierReport], score: Decimal, locale: Locale) -> ReportSummary {
    let mut counts = StatusCounts::default();
    for t in tiers {
        counts.merge(&t.counts);
    }
    let level = risk_level(score);
    let summary = match locale {
        Locale::En => format!(
            "Overall score {}/100, {} risk. {} of {} metrics computed; {} excellent, {} critical.",
            score.normalize(),
            level.label(locale).to_lowercase(),
            counts.scored(),
            counts.total(),
            counts.excellent,
            counts.critical
        ),
        Locale::Ar => format!(
            "الدرجة الإجمالية {}/100، مستوى المخاطر {}. تم احتساب {} من {} مؤشراً؛ {} ممتاز و{} حرج.",
            score.normalize(),
            level.label(locale),
            counts.scored(),
            counts.total(),
            counts.excellent,
            counts.critical
        ),
    };
    ReportSummary {
        summary,
        score,
        risk_level: level,
        key_findings: key_findings(tiers, locale),
    }
}

fn tier_report(
    tier: Tier,
    data: &FinancialData,
    config: &EngineConfig,
    warnings: &mut Vec<String>,
) -> FinsightResult<TierReport> {
    let locale = config.locale;
    let (sections, tier_warnings) = match tier {
        Tier::Basic => {
            let out = engine::analyze_basic(data, config)?;
            (assemble(&out.result, locale), out.warnings)
        }
        Tier::Applied => {
            let out = engine::analyze_applied(data, config)?;
            (assemble(&out.result, locale), out.warnings)
        }
        #[cfg(feature = "advanced")]
        Tier::Advanced => {
            let out = engine::analyze_advanced(data, config)?;
            (assemble(&out.result, locale), out.warnings)
        }
        #[cfg(not(feature = "advanced"))]
        Tier::Advanced => {
            return Err(FinsightError::UnknownCatalog(
                "advanced (not compiled into this build)".into(),
            ))
        }
    };
    warnings.extend(tier_warnings.into_iter().map(|w| format!("{tier}: {w}")));
    Ok(TierReport::new(tier, sections))
}

/// Run the requested tiers and aggregate them into one report.
pub fn build_report(
    data: &FinancialData,
    tiers: &[Tier],
    config: &EngineConfig,
) -> FinsightResult<ComputationOutput<ReportData>> {
    let start = Instant::now();
    if tiers.is_empty() {
        return Err(FinsightError::InvalidInput {
            field: "tiers".into(),
            reason: "At least one catalog must be requested".into(),
        });
    }

    // Each catalog is scored once, in first-requested order.
    let mut requested: Vec<Tier> = Vec::with_capacity(tiers.len());
    for tier in tiers {
        if !requested.contains(tier) {
            requested.push(*tier);
        }
    }

    let mut warnings = Vec::new();
    let reports = requested
        .iter()
        .map(|tier| tier_report(*tier, data, config, &mut warnings))
        .collect::<FinsightResult<Vec<_>>>()?;

    let mut overall = StatusCounts::default();
    for r in &reports {
        overall.merge(&r.counts);
    }
    let score = overall.composite_score().ok_or_else(|| {
        FinsightError::InsufficientData("no metric could be computed from the record".into())
    })?;
    let summary = summarise(&reports, score, config.locale);
    tracing::info!(
        "report built: score {} ({:?} risk) over {} tiers",
        score,
        summary.risk_level,
        reports.len()
    );

    let report = ReportData {
        company: data.company.clone(),
        generated_at: Utc::now(),
        locale: config.locale,
        tiers: reports,
        summary,
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Composite status scoring across analysis catalogs",
        &serde_json::json!({
            "tiers": requested,
            "weights": { "excellent": 5, "good": 4, "average": 3, "poor": 2, "critical": 1 },
            "risk_bands": { "low": 80, "moderate": 60, "elevated": 40 },
        }),
        warnings,
        elapsed,
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_risk_bands() {
        assert_eq!(risk_level(dec!(80)), RiskLevel::Low);
        assert_eq!(risk_level(dec!(79.99)), RiskLevel::Moderate);
        assert_eq!(risk_level(dec!(60)), RiskLevel::Moderate);
        assert_eq!(risk_level(dec!(40)), RiskLevel::Elevated);
        assert_eq!(risk_level(dec!(39.9)), RiskLevel::High);
        assert_eq!(risk_level(Decimal::ZERO), RiskLevel::High);
    }

    #[test]
    fn test_summary_uses_front_end_field_names() {
        let summary = ReportSummary {
            summary: String::new(),
            score: dec!(70),
            risk_level: RiskLevel::Moderate,
            key_findings: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["riskLevel"], "moderate");
        assert!(json.get("keyFindings").is_some());
    }

    #[test]
    fn test_no_tiers_rejected() {
        let data = FinancialData {
            revenue: Some(dec!(1)),
            ..Default::default()
        };
        match build_report(&data, &[], &EngineConfig::default()) {
            Err(FinsightError::InvalidInput { field, .. }) => assert_eq!(field, "tiers"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[cfg(feature = "basic")]
    #[test]
    fn test_basic_report() {
        let data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            net_income: Some(dec!(100)),
            total_equity: Some(dec!(1000)),
            revenue: Some(dec!(1000)),
            ..Default::default()
        };
        let out = build_report(&data, &[Tier::Basic], &EngineConfig::default()).unwrap();
        let report = out.result;
        assert_eq!(report.tiers.len(), 1);
        assert_eq!(report.tiers[0].counts.total(), 106);
        assert!(report.summary.score >= Decimal::ZERO && report.summary.score <= dec!(100));
        assert_eq!(report.summary.risk_level, risk_level(report.summary.score));
        assert!(!report.summary.key_findings.is_empty());
        assert!(out.warnings.iter().all(|w| w.starts_with("basic: ")));
    }

    #[cfg(feature = "basic")]
    #[test]
    fn test_repeated_tier_scored_once() {
        let data = FinancialData {
            current_assets: Some(dec!(200)),
            current_liabilities: Some(dec!(100)),
            net_income: Some(dec!(100)),
            total_equity: Some(dec!(1000)),
            revenue: Some(dec!(1000)),
            ..Default::default()
        };
        let config = EngineConfig::default();
        let once = build_report(&data, &[Tier::Basic], &config).unwrap();
        let twice = build_report(&data, &[Tier::Basic, Tier::Basic], &config).unwrap();
        assert_eq!(twice.result.tiers.len(), 1);
        assert_eq!(twice.result.tiers[0].counts, once.result.tiers[0].counts);
        assert_eq!(twice.result.summary, once.result.summary);
        assert_eq!(twice.assumptions["tiers"], serde_json::json!(["basic"]));
    }
}
