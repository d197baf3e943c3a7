//! Connection settings for the completion service.

use std::time::Duration;

use crate::error::{AgentError, AgentResult};
use crate::service::CompletionOptions;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// OpenAI-compatible chat-completions URL.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-attempt limit.
    pub timeout: Duration,
    /// Extra attempts after a transient failure.
    pub retries: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: 1200,
            timeout: Duration::from_secs(60),
            retries: 1,
        }
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> AgentResult<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AgentError::Config(format!("{key}: cannot parse '{raw}'"))),
        None => Ok(default),
    }
}

impl AgentConfig {
    /// Read `FINSIGHT_LLM_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> AgentResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AgentResult<Self> {
        let defaults = Self::default();
        let config = Self {
            endpoint: lookup("FINSIGHT_LLM_ENDPOINT").unwrap_or(defaults.endpoint),
            api_key: lookup("FINSIGHT_LLM_API_KEY").filter(|k| !k.is_empty()),
            model: lookup("FINSIGHT_LLM_MODEL").unwrap_or(defaults.model),
            temperature: parsed(&lookup, "FINSIGHT_LLM_TEMPERATURE", defaults.temperature)?,
            max_tokens: parsed(&lookup, "FINSIGHT_LLM_MAX_TOKENS", defaults.max_tokens)?,
            timeout: Duration::from_secs(parsed(
                &lookup,
                "FINSIGHT_LLM_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            retries: parsed(&lookup, "FINSIGHT_LLM_RETRIES", defaults.retries)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AgentResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AgentError::Config(format!(
                "temperature must be within 0-2 (got {})",
                self.temperature
            )));
        }
        if self.timeout.is_zero() {
            return Err(AgentError::Config("timeout must be positive".into()));
        }
        if self.max_tokens == 0 {
            return Err(AgentError::Config("max_tokens must be positive".into()));
        }
        Ok(())
    }

    pub fn options(&self) -> CompletionOptions {
        CompletionOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AgentConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.retries, 1);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AgentConfig::from_lookup(lookup(&[
            ("FINSIGHT_LLM_MODEL", "local-model"),
            ("FINSIGHT_LLM_TIMEOUT_SECS", "5"),
            ("FINSIGHT_LLM_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.model, "local-model");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_bad_number_is_config_error() {
        match AgentConfig::from_lookup(lookup(&[("FINSIGHT_LLM_RETRIES", "many")])) {
            Err(AgentError::Config(msg)) => assert!(msg.contains("FINSIGHT_LLM_RETRIES")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_temperature_range() {
        assert!(AgentConfig::from_lookup(lookup(&[("FINSIGHT_LLM_TEMPERATURE", "3.5")])).is_err());
    }
}
