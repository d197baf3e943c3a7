//! Per-category aggregation of catalog results.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::classification::Status;
use crate::engine::AnalysisResult;
#[cfg(feature = "advanced")]
use crate::engine::AdvancedAnalysisResult;
use crate::types::Locale;

const MAX_HIGHLIGHTS: usize = 3;

/// Anything the assembler can group: a plain or decorated catalog result.
pub trait ReportItem {
    fn analysis(&self) -> &AnalysisResult;

    /// Model confidence, for items that carry one.
    fn confidence(&self) -> Option<Decimal> {
        None
    }
}

impl ReportItem for AnalysisResult {
    fn analysis(&self) -> &AnalysisResult {
        self
    }
}

#[cfg(feature = "advanced")]
impl ReportItem for AdvancedAnalysisResult {
    fn analysis(&self) -> &AnalysisResult {
        &self.base
    }

    fn confidence(&self) -> Option<Decimal> {
        self.base.is_available().then_some(self.confidence)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub poor: usize,
    pub critical: usize,
    pub unavailable: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Excellent => self.excellent += 1,
            Status::Good => self.good += 1,
            Status::Average => self.average += 1,
            Status::Poor => self.poor += 1,
            Status::Critical => self.critical += 1,
            Status::Unavailable => self.unavailable += 1,
        }
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.excellent += other.excellent;
        self.good += other.good;
        self.average += other.average;
        self.poor += other.poor;
        self.critical += other.critical;
        self.unavailable += other.unavailable;
    }

    pub fn scored(&self) -> usize {
        self.excellent + self.good + self.average + self.poor + self.critical
    }

    pub fn total(&self) -> usize {
        self.scored() + self.unavailable
    }

    /// Mean status weight mapped onto 0-100: `(w - 1) / 4 * 100`.
    /// `None` when nothing was scored.
    pub fn composite_score(&self) -> Option<Decimal> {
        let scored = self.scored();
        if scored == 0 {
            return None;
        }
        let weighted = 5 * self.excellent + 4 * self.good + 3 * self.average + 2 * self.poor + self.critical;
        let mean = Decimal::from(weighted) / Decimal::from(scored);
        Some(((mean - Decimal::ONE) / dec!(4) * dec!(100)).round_dp(2))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub name: String,
    pub value: Option<Decimal>,
    pub status: Status,
}

impl Highlight {
    fn of(result: &AnalysisResult) -> Self {
        Self {
            id: result.id.clone(),
            name: result.name.clone(),
            value: result.value,
            status: result.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub category: Category,
    pub name: String,
    pub counts: StatusCounts,
    pub composite_score: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<Decimal>,
    /// Up to three excellent metrics.
    pub strengths: Vec<Highlight>,
    /// Up to three critical metrics.
    pub concerns: Vec<Highlight>,
}

impl ReportSection {
    fn new(category: Category, locale: Locale) -> Self {
        Self {
            category,
            name: category.name(locale).to_string(),
            counts: StatusCounts::default(),
            composite_score: None,
            average_confidence: None,
            strengths: Vec::new(),
            concerns: Vec::new(),
        }
    }
}

/// Group `results` by category in first-seen order and score each group.
pub fn assemble<T: ReportItem>(results: &[T], locale: Locale) -> Vec<ReportSection> {
    let mut sections: Vec<ReportSection> = Vec::new();
    let mut confidences: Vec<Vec<Decimal>> = Vec::new();

    for item in results {
        let r = item.analysis();
        let pos = match sections.iter().position(|s| s.category == r.category) {
            Some(pos) => pos,
            None => {
                sections.push(ReportSection::new(r.category, locale));
                confidences.push(Vec::new());
                sections.len() - 1
            }
        };
        let section = &mut sections[pos];
        section.counts.record(r.status);
        match r.status {
            Status::Excellent if section.strengths.len() < MAX_HIGHLIGHTS => {
                section.strengths.push(Highlight::of(r))
            }
            Status::Critical if section.concerns.len() < MAX_HIGHLIGHTS => {
                section.concerns.push(Highlight::of(r))
            }
            _ => {}
        }
        if let Some(c) = item.confidence() {
            confidences[pos].push(c);
        }
    }

    for (section, confs) in sections.iter_mut().zip(confidences) {
        section.composite_score = section.counts.composite_score();
        if !confs.is_empty() {
            let sum: Decimal = confs.iter().copied().sum();
            section.average_confidence = Some((sum / Decimal::from(confs.len())).round_dp(2));
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Unit;
    use pretty_assertions::assert_eq;

    fn result(id: &str, category: Category, status: Status) -> AnalysisResult {
        AnalysisResult {
            id: id.into(),
            name: id.into(),
            category,
            value: status.is_scored().then_some(Decimal::ONE),
            formula: String::new(),
            interpretation: String::new(),
            benchmark: Decimal::ONE,
            status,
            description: String::new(),
            calculation: String::new(),
            unit: Unit::Ratio,
            error: None,
        }
    }

    #[test]
    fn test_composite_score_bounds() {
        let mut all_excellent = StatusCounts::default();
        all_excellent.record(Status::Excellent);
        assert_eq!(all_excellent.composite_score(), Some(dec!(100)));

        let mut all_critical = StatusCounts::default();
        all_critical.record(Status::Critical);
        all_critical.record(Status::Critical);
        assert_eq!(all_critical.composite_score(), Some(Decimal::ZERO));

        let mut none_scored = StatusCounts::default();
        none_scored.record(Status::Unavailable);
        assert_eq!(none_scored.composite_score(), None);
    }

    #[test]
    fn test_unavailable_excluded_from_score() {
        let mut counts = StatusCounts::default();
        counts.record(Status::Good);
        counts.record(Status::Average);
        counts.record(Status::Unavailable);
        // mean weight 3.5 -> 62.5
        assert_eq!(counts.composite_score(), Some(dec!(62.5)));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_sections_in_first_seen_order() {
        let results = vec![
            result("a", Category::Liquidity, Status::Excellent),
            result("b", Category::Structural, Status::Critical),
            result("c", Category::Liquidity, Status::Good),
        ];
        let sections = assemble(&results, Locale::En);
        let cats: Vec<Category> = sections.iter().map(|s| s.category).collect();
        assert_eq!(cats, vec![Category::Liquidity, Category::Structural]);
        assert_eq!(sections[0].counts.total(), 2);
        assert_eq!(sections[0].strengths[0].id, "a");
        assert_eq!(sections[1].concerns[0].id, "b");
        assert_eq!(sections[1].composite_score, Some(Decimal::ZERO));
        assert!(sections[0].average_confidence.is_none());
    }

    #[test]
    fn test_highlights_capped_at_three() {
        let results: Vec<AnalysisResult> = (0..5)
            .map(|i| result(&format!("m{i}"), Category::Market, Status::Excellent))
            .collect();
        let sections = assemble(&results, Locale::En);
        let ids: Vec<&str> = sections[0].strengths.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["m0", "m1", "m2"]);
    }
}
