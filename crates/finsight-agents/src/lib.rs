//! Agent panel over a finished analysis report.
//!
//! Each agent answers with a JSON object (`insights`, `recommendations`,
//! `confidence`) instead of free text, so responses are validated rather
//! than scraped.

pub mod agent;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod service;

pub use agent::{AgentReport, AgentRole};
pub use config::AgentConfig;
pub use error::{AgentError, AgentResult};
pub use orchestrator::{run_panel, AgentFailure, AgentOutcome, Consensus, PanelResult};
pub use service::{CompletionOptions, CompletionService, HttpCompletionService};
