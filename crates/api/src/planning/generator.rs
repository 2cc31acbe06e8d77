use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use super::payload::AiPlanningData;
use super::prompt::SYSTEM_PROMPT;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("invalid planning payload: {0}")]
    InvalidPayload(String),
}

/// Collaborator that turns a prompt into a structured planning payload.
/// Object-safe so the orchestrator can be handed a fake in tests.
#[async_trait]
pub trait PlanningGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<AiPlanningData, GeneratorError>;
}

#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY manquant dans l'environnement"))?;

        Ok(Self {
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        })
    }
}

/// Production generator backed by the OpenAI chat completions API.
#[derive(Clone)]
pub struct OpenAiPlanner {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiPlanner {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl PlanningGenerator for OpenAiPlanner {
    async fn generate(&self, prompt: &str) -> Result<AiPlanningData, GeneratorError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api { status, body });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidPayload(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| GeneratorError::InvalidPayload("reponse sans choix".to_string()))?;

        let payload: AiPlanningData = serde_json::from_str(content)
            .map_err(|e| GeneratorError::InvalidPayload(e.to_string()))?;

        info!(
            model = %self.config.model,
            type_tournoi = payload.type_tournoi(),
            "planning genere par le modele"
        );
        Ok(payload)
    }
}
