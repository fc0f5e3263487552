//! OpenAI-compatible chat completion client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::ChatMessage;
use super::LanguageModel;
use crate::config::AppConfig;
use crate::config::LlmConfig;
use crate::errors::CiteRagError;
use crate::errors::Result;
use crate::http_client::build_client;
use crate::http_client::ensure_success;
use crate::http_client::join_url;
use crate::retry::with_retries;

const SERVICE: &str = "language model service";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completion client for any endpoint speaking the OpenAI protocol
#[derive(Clone)]
pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    max_attempts: usize,
}

impl LlmService {
    /// Create a new LLM client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid TLS configuration)
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            endpoint: config.llm_endpoint.clone(),
            api_key: config.llm_key.clone(),
            model: config.llm_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_attempts: config.max_attempts,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.llm)
    }

    /// Send a chat completion and return the first choice's text
    ///
    /// # Errors
    /// - Network errors (timeouts, connection failures), retried
    /// - API errors (authentication, rate limits, invalid model)
    /// - Responses without any choice content
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        with_retries("chat completion", self.max_attempts, || {
            self.chat_once(messages)
        })
        .await
    }

    async fn chat_once(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = join_url(&self.endpoint, "chat/completions");
        debug!("Calling chat completions API: {} ({})", url, self.model);

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response, SERVICE).await?;

        let result: ChatResponse = response.json().await?;
        result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CiteRagError::MalformedResponse("No completion in response".to_string()))
    }
}

#[async_trait]
impl LanguageModel for LlmService {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let messages = [ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)];
        self.chat(&messages).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
