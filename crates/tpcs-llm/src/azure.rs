//! Azure OpenAI chat completions backend.
//!
//! Uses a blocking `ureq` agent on tokio's blocking pool. One request per
//! call, no retries; a non-2xx status surfaces as an invocation error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use tpcs_core::models::cost::ModelPricing;
use tpcs_core::models::token_count::TokenCount;

use crate::error::LlmError;
use crate::generator::{BoxFuture, Generation, TextGenerator};
use crate::tokens;

/// Connection settings for one Azure OpenAI deployment.
#[derive(Clone, Serialize, Deserialize)]
pub struct AzureSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
}

impl AzureSettings {
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

impl std::fmt::Debug for AzureSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}

/// Request body for a single-turn chat completion.
pub fn request_body(system_prompt: &str, user_message: &str, temperature: f32) -> serde_json::Value {
    json!({
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_message },
        ],
        "temperature": temperature,
    })
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl ChatCompletionResponse {
    /// Text of the first choice plus token counts.
    pub fn into_parts(self) -> Result<(String, TokenCount), LlmError> {
        let tokens = self
            .usage
            .map(|u| TokenCount {
                input: u.prompt_tokens,
                output: u.completion_tokens,
            })
            .unwrap_or_default();

        let text = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ResponseParse("no choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok((text, tokens))
    }
}

pub struct AzureGenerator {
    agent: ureq::Agent,
    settings: AzureSettings,
    url: String,
    temperature: f32,
    timeout: Duration,
    pricing: Option<ModelPricing>,
}

impl AzureGenerator {
    pub fn new(settings: AzureSettings, temperature: f32, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            url: settings.chat_completions_url(),
            pricing: tokens::get_pricing(&settings.deployment),
            settings,
            temperature,
            timeout,
        }
    }

    async fn invoke(&self, system_prompt: &str, user_message: &str) -> Result<Generation, LlmError> {
        let agent = self.agent.clone();
        let url = self.url.clone();
        let api_key = self.settings.api_key.clone();
        let body = request_body(system_prompt, user_message, self.temperature);
        let timeout_secs = self.timeout.as_secs();

        let parsed = tokio::task::spawn_blocking(move || {
            let mut response = agent
                .post(url.as_str())
                .header("api-key", api_key.as_str())
                .send_json(&body)
                .map_err(|e| match e {
                    ureq::Error::Timeout(_) => LlmError::Timeout(timeout_secs),
                    other => LlmError::Invocation(other.to_string()),
                })?;
            response
                .body_mut()
                .read_json::<ChatCompletionResponse>()
                .map_err(|e| LlmError::ResponseParse(e.to_string()))
        })
        .await
        .map_err(|e| LlmError::Invocation(format!("request task failed: {e}")))??;

        let (text, token_count) = parsed.into_parts()?;

        debug!(
            deployment = %self.settings.deployment,
            input_tokens = token_count.input,
            output_tokens = token_count.output,
            "chat completion call complete"
        );

        Ok(Generation {
            text,
            model_id: self.settings.deployment.clone(),
            usage: tokens::calculate_cost(token_count, self.pricing.as_ref()),
        })
    }
}

impl TextGenerator for AzureGenerator {
    fn model_id(&self) -> &str {
        &self.settings.deployment
    }

    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        user_message: &'a str,
    ) -> BoxFuture<'a, Result<Generation, LlmError>> {
        Box::pin(self.invoke(system_prompt, user_message))
    }
}
