//! Runs the agent panel concurrently and folds the answers into a consensus.
//!
//! Every agent call is bounded by the configured timeout and retried once on
//! a transient failure. An agent that still fails is reported as an
//! [`AgentFailure`] and left out of the consensus.

use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use finsight_core::ReportData;

use crate::agent::{AgentReport, AgentRole};
use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::service::CompletionService;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentOutcome {
    pub role: AgentRole,
    pub attempts: u32,
    pub report: AgentReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentFailure {
    pub role: AgentRole,
    pub attempts: u32,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consensus {
    /// Mean confidence of the agents that answered.
    pub confidence: Decimal,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub contributors: Vec<AgentRole>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelResult {
    pub outcomes: Vec<AgentOutcome>,
    pub failures: Vec<AgentFailure>,
    pub consensus: Option<Consensus>,
}

async fn attempt(
    service: &dyn CompletionService,
    prompt: &str,
    config: &AgentConfig,
) -> AgentResult<AgentReport> {
    let options = config.options();
    match tokio::time::timeout(config.timeout, service.complete(prompt, &options)).await {
        Ok(raw) => AgentReport::parse(&raw?),
        Err(_) => Err(AgentError::Timeout {
            after_ms: config.timeout.as_millis() as u64,
        }),
    }
}

async fn consult(
    service: &dyn CompletionService,
    role: AgentRole,
    report: &ReportData,
    config: &AgentConfig,
) -> Result<AgentOutcome, AgentFailure> {
    let prompt = role.prompt(report).map_err(|e| AgentFailure {
        role,
        attempts: 0,
        error: e.to_string(),
    })?;

    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt(service, &prompt, config).await {
            Ok(report) => {
                return Ok(AgentOutcome {
                    role,
                    attempts,
                    report,
                })
            }
            Err(e) if e.is_transient() && attempts <= config.retries => {
                warn!("{} failed: {}. Retrying", role.title(), e);
            }
            Err(e) => {
                warn!("{} failed after {} attempts: {}", role.title(), attempts, e);
                return Err(AgentFailure {
                    role,
                    attempts,
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Case-insensitive de-duplication that keeps first-seen order.
fn merge_unique<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut merged = Vec::new();
    for item in items {
        let key = item.trim().to_lowercase();
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        merged.push(item.trim().to_string());
    }
    merged
}

pub fn consensus(outcomes: &[AgentOutcome]) -> Option<Consensus> {
    if outcomes.is_empty() {
        return None;
    }
    let total: Decimal = outcomes.iter().map(|o| o.report.confidence).sum();
    Some(Consensus {
        confidence: (total / Decimal::from(outcomes.len())).round_dp(2),
        insights: merge_unique(outcomes.iter().flat_map(|o| o.report.insights.iter())),
        recommendations: merge_unique(
            outcomes
                .iter()
                .flat_map(|o| o.report.recommendations.iter()),
        ),
        contributors: outcomes.iter().map(|o| o.role).collect(),
    })
}

/// Consult every role concurrently against the same report.
pub async fn run_panel(
    service: &dyn CompletionService,
    roles: &[AgentRole],
    report: &ReportData,
    config: &AgentConfig,
) -> PanelResult {
    let calls = roles
        .iter()
        .map(|role| consult(service, *role, report, config));
    let mut outcomes = Vec::new();
    let mut failures = Vec::new();
    for result in join_all(calls).await {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(failure) => failures.push(failure),
        }
    }

    let consensus = consensus(&outcomes);
    info!(
        "Agent panel via {}: {} answered, {} failed",
        service.backend_name(),
        outcomes.len(),
        failures.len()
    );
    PanelResult {
        outcomes,
        failures,
        consensus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn outcome(role: AgentRole, insights: &[&str], confidence: Decimal) -> AgentOutcome {
        AgentOutcome {
            role,
            attempts: 1,
            report: AgentReport {
                insights: insights.iter().map(|s| s.to_string()).collect(),
                recommendations: vec![],
                confidence,
            },
        }
    }

    #[test]
    fn test_consensus_mean_and_dedup() {
        let c = consensus(&[
            outcome(AgentRole::FinancialAnalyst, &["Strong liquidity", "Thin margins"], dec!(80)),
            outcome(AgentRole::RiskAnalyst, &["strong liquidity ", "High leverage"], dec!(70)),
        ])
        .unwrap();
        assert_eq!(c.confidence, dec!(75));
        assert_eq!(c.insights, vec!["Strong liquidity", "Thin margins", "High leverage"]);
        assert_eq!(
            c.contributors,
            vec![AgentRole::FinancialAnalyst, AgentRole::RiskAnalyst]
        );
    }

    #[test]
    fn test_no_consensus_without_answers() {
        assert!(consensus(&[]).is_none());
    }
}
