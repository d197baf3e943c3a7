use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned status {code}")]
    Status { code: u16 },

    #[error("Timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentError {
    /// Whether a single retry is worth attempting.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { code } => *code == 429 || *code >= 500,
            Self::Timeout { .. } => true,
            Self::MalformedResponse(_) | Self::Config(_) | Self::Serialization(_) => false,
        }
    }
}

pub type AgentResult<T> = Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(AgentError::Status { code: 503 }.is_transient());
        assert!(AgentError::Status { code: 429 }.is_transient());
        assert!(!AgentError::Status { code: 401 }.is_transient());
        assert!(AgentError::Timeout { after_ms: 10 }.is_transient());
        assert!(!AgentError::MalformedResponse("x".into()).is_transient());
    }
}
