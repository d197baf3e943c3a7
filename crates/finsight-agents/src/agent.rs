//! Agent roles, their prompts and the JSON contract they answer with.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;

use finsight_core::ReportData;

use crate::error::{AgentError, AgentResult};

const RESPONSE_SCHEMA: &str = r#"{
  "insights": ["string", "..."],
  "recommendations": ["string", "..."],
  "confidence": 0-100
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    FinancialAnalyst,
    RiskAnalyst,
    ValuationAnalyst,
    Strategist,
}

impl AgentRole {
    pub const ALL: [AgentRole; 4] = [
        AgentRole::FinancialAnalyst,
        AgentRole::RiskAnalyst,
        AgentRole::ValuationAnalyst,
        AgentRole::Strategist,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::FinancialAnalyst => "Financial Analyst",
            Self::RiskAnalyst => "Risk Analyst",
            Self::ValuationAnalyst => "Valuation Analyst",
            Self::Strategist => "Strategy Advisor",
        }
    }

    fn focus(self) -> &'static str {
        match self {
            Self::FinancialAnalyst => {
                "Assess liquidity, profitability, efficiency and cash generation."
            }
            Self::RiskAnalyst => {
                "Assess leverage, distress indicators, credit risk and earnings quality."
            }
            Self::ValuationAnalyst => {
                "Assess market valuation against intrinsic value and the cost of capital."
            }
            Self::Strategist => {
                "Combine the findings into priorities for management and investors."
            }
        }
    }

    /// Prompt embedding a condensed view of the report and the answer schema.
    pub fn prompt(self, report: &ReportData) -> AgentResult<String> {
        let sections: Vec<_> = report
            .tiers
            .iter()
            .flat_map(|t| {
                t.sections.iter().map(move |s| {
                    json!({
                        "catalog": t.tier,
                        "area": s.name,
                        "score": s.composite_score,
                        "strengths": s.strengths.iter().map(|h| &h.name).collect::<Vec<_>>(),
                        "concerns": s.concerns.iter().map(|h| &h.name).collect::<Vec<_>>(),
                    })
                })
            })
            .collect();
        let brief = json!({
            "company": report.company.as_ref().map(|c| &c.name),
            "summary": report.summary,
            "sections": sections,
        });
        let language = match report.locale {
            finsight_core::Locale::En => "English",
            finsight_core::Locale::Ar => "Arabic",
        };
        Ok(format!(
            "Role: {}\nTask: {}\nWrite in {}.\n\nAnalysis results:\n{}\n\n\
             Answer with a JSON object of exactly this shape:\n{}",
            self.title(),
            self.focus(),
            language,
            serde_json::to_string_pretty(&brief)?,
            RESPONSE_SCHEMA
        ))
    }
}

/// One agent's structured answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReport {
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub confidence: Decimal,
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

impl AgentReport {
    pub fn parse(raw: &str) -> AgentResult<Self> {
        let report: AgentReport = serde_json::from_str(strip_code_fence(raw))
            .map_err(|e| AgentError::MalformedResponse(e.to_string()))?;
        if !(Decimal::ZERO..=dec!(100)).contains(&report.confidence) {
            return Err(AgentError::MalformedResponse(format!(
                "confidence {} outside 0-100",
                report.confidence
            )));
        }
        if report.insights.iter().all(|i| i.trim().is_empty()) {
            return Err(AgentError::MalformedResponse("no insights".into()));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_json() {
        let r = AgentReport::parse(
            r#"{"insights":["Liquidity is strong"],"recommendations":["Reduce inventory"],"confidence":82}"#,
        )
        .unwrap();
        assert_eq!(r.insights, vec!["Liquidity is strong"]);
        assert_eq!(r.confidence, dec!(82));
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"insights\":[\"a\"],\"confidence\":50}\n```";
        let r = AgentReport::parse(raw).unwrap();
        assert!(r.recommendations.is_empty());
        assert_eq!(r.confidence, dec!(50));
    }

    #[test]
    fn test_rejects_free_text() {
        match AgentReport::parse("Confidence: 80%\n- Liquidity is strong") {
            Err(AgentError::MalformedResponse(_)) => {}
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        assert!(AgentReport::parse(r#"{"insights":["a"],"confidence":140}"#).is_err());
        assert!(AgentReport::parse(r#"{"insights":[],"confidence":40}"#).is_err());
    }
}
