use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use finsight_agents::{
    run_panel, AgentConfig, AgentError, AgentResult, AgentRole, CompletionOptions,
    CompletionService,
};
use finsight_core::catalog::Tier;
use finsight_core::data::FinancialData;
use finsight_core::{build_report, EngineConfig, ReportData};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn report() -> ReportData {
    let data = FinancialData {
        current_assets: Some(dec!(200)),
        current_liabilities: Some(dec!(100)),
        net_income: Some(dec!(100)),
        total_equity: Some(dec!(1000)),
        revenue: Some(dec!(900)),
        ..Default::default()
    };
    build_report(&data, &[Tier::Basic], &EngineConfig::default())
        .unwrap()
        .result
}

fn config() -> AgentConfig {
    AgentConfig {
        timeout: Duration::from_secs(2),
        ..AgentConfig::default()
    }
}

/// Answers by role title found in the prompt.
struct ScriptedService {
    calls: AtomicUsize,
    /// Role whose first call fails with a transient error.
    flaky: Option<AgentRole>,
    /// Role that answers with free text.
    garbled: Option<AgentRole>,
    /// Role that never answers in time.
    stalled: Option<AgentRole>,
}

impl ScriptedService {
    fn healthy() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            flaky: None,
            garbled: None,
            stalled: None,
        }
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    async fn complete(&self, prompt: &str, _options: &CompletionOptions) -> AgentResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let role = AgentRole::ALL
            .into_iter()
            .find(|r| prompt.contains(r.title()))
            .ok_or_else(|| AgentError::MalformedResponse("unknown role".into()))?;

        if Some(role) == self.stalled {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        if Some(role) == self.garbled {
            return Ok("Confidence: 90%\n- Everything looks fine".into());
        }
        if Some(role) == self.flaky && call == 0 {
            return Err(AgentError::Status { code: 503 });
        }
        let confidence = match role {
            AgentRole::FinancialAnalyst => 80,
            AgentRole::RiskAnalyst => 60,
            AgentRole::ValuationAnalyst => 70,
            AgentRole::Strategist => 90,
        };
        Ok(format!(
            r#"{{"insights":["{} view","Liquidity is strong"],"recommendations":["Review pricing"],"confidence":{}}}"#,
            role.title(),
            confidence
        ))
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

#[tokio::test]
async fn test_all_agents_answer() {
    let service = ScriptedService::healthy();
    let panel = run_panel(&service, &AgentRole::ALL, &report(), &config()).await;
    assert!(panel.failures.is_empty());
    let consensus = panel.consensus.unwrap();
    assert_eq!(consensus.confidence, dec!(75));
    assert_eq!(consensus.recommendations, vec!["Review pricing"]);
    // four role-specific insights plus one shared
    assert_eq!(consensus.insights.len(), 5);
}

#[tokio::test]
async fn test_malformed_answer_is_excluded() {
    let service = ScriptedService {
        garbled: Some(AgentRole::Strategist),
        ..ScriptedService::healthy()
    };
    let panel = run_panel(&service, &AgentRole::ALL, &report(), &config()).await;
    assert_eq!(panel.failures.len(), 1);
    assert_eq!(panel.failures[0].role, AgentRole::Strategist);
    assert_eq!(panel.failures[0].attempts, 1);
    // (80 + 60 + 70) / 3
    assert_eq!(panel.consensus.unwrap().confidence, dec!(70));
}

#[tokio::test]
async fn test_transient_failure_is_retried_once() {
    let service = ScriptedService {
        flaky: Some(AgentRole::FinancialAnalyst),
        ..ScriptedService::healthy()
    };
    let panel = run_panel(&service, &[AgentRole::FinancialAnalyst], &report(), &config()).await;
    assert!(panel.failures.is_empty());
    assert_eq!(panel.outcomes[0].attempts, 2);
    assert_eq!(service.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_agent_times_out() {
    let service = ScriptedService {
        stalled: Some(AgentRole::RiskAnalyst),
        ..ScriptedService::healthy()
    };
    let roles = [AgentRole::FinancialAnalyst, AgentRole::RiskAnalyst];
    let panel = run_panel(&service, &roles, &report(), &config()).await;
    assert_eq!(panel.outcomes.len(), 1);
    assert_eq!(panel.failures[0].role, AgentRole::RiskAnalyst);
    // timeout is transient, so the call was retried before giving up
    assert_eq!(panel.failures[0].attempts, 2);
    assert!(panel.failures[0].error.contains("Timed out"));
}

#[tokio::test]
async fn test_every_agent_failing_gives_no_consensus() {
    let service = ScriptedService {
        garbled: Some(AgentRole::Strategist),
        ..ScriptedService::healthy()
    };
    let panel = run_panel(&service, &[AgentRole::Strategist], &report(), &config()).await;
    assert!(panel.consensus.is_none());
    assert_eq!(panel.failures.len(), 1);
}
