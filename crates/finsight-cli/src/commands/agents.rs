use clap::Args;
use serde_json::{json, Value};

use finsight_agents::{run_panel, AgentConfig, AgentRole, HttpCompletionService};
use finsight_core::report;

use super::report::parse_tiers;
use super::Settings;
use crate::input;

/// Arguments for the agent panel
#[derive(Args)]
pub struct AgentsArgs {
    /// Path to JSON or YAML financial record (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Catalogs the report covers, comma-separated (default: all)
    #[arg(long, value_delimiter = ',')]
    pub tiers: Vec<String>,

    /// Agents to consult, comma-separated (financial_analyst, risk_analyst,
    /// valuation_analyst, strategist; default: all)
    #[arg(long, value_delimiter = ',')]
    pub roles: Vec<String>,
}

fn parse_roles(names: &[String]) -> Result<Vec<AgentRole>, Box<dyn std::error::Error>> {
    if names.is_empty() {
        return Ok(AgentRole::ALL.to_vec());
    }
    names
        .iter()
        .map(|n| {
            serde_json::from_value(Value::String(n.trim().to_ascii_lowercase()))
                .map_err(|_| format!("Unknown agent role '{n}'").into())
        })
        .collect()
}

pub fn run_agents(args: AgentsArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let data = input::financial_data(args.input.as_deref())?;
    let config = settings.engine_config()?;
    let tiers = parse_tiers(&args.tiers)?;
    let roles = parse_roles(&args.roles)?;
    let agent_config = AgentConfig::from_env()?;
    let service = HttpCompletionService::new(&agent_config)?;

    let built = report::build_report(&data, &tiers, &config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let panel = runtime.block_on(run_panel(&service, &roles, &built.result, &agent_config));

    Ok(json!({
        "result": {
            "report": built.result.summary,
            "consensus": panel.consensus,
            "agents": panel.outcomes,
            "failures": panel.failures,
        },
        "warnings": built.warnings,
    }))
}
