use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};

const SYSTEM_PROMPT: &str = "You are a member of a financial analysis panel. \
Reply with a single JSON object and nothing else.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Text-completion backend used by the agent panel.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> AgentResult<String>;

    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client asking for JSON-object output.
#[derive(Clone)]
pub struct HttpCompletionService {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpCompletionService {
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionService for HttpCompletionService {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> AgentResult<String> {
        let body = json!({
            "model": options.model,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(AgentError::Status {
                code: response.status().as_u16(),
            });
        }

        let parsed = response.json::<ChatResponse>().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AgentError::MalformedResponse("response has no message content".into()))
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
