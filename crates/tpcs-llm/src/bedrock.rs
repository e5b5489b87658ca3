//! Bedrock Converse backend.

use std::time::Duration;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::debug;

use tpcs_core::models::cost::ModelPricing;

use crate::error::LlmError;
use crate::generator::{BoxFuture, Generation, TextGenerator};
use crate::tokens;

/// Build an `SdkConfig` for a region and optional named profile.
pub async fn build_aws_config(region: &str, profile: Option<&str>) -> aws_config::SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    if let Some(profile_name) = profile {
        builder = builder.profile_name(profile_name);
    }

    builder.load().await
}

pub struct BedrockGenerator {
    client: Client,
    model_id: String,
    temperature: f32,
    timeout: Duration,
    pricing: Option<ModelPricing>,
}

impl BedrockGenerator {
    pub fn new(
        config: &aws_config::SdkConfig,
        model_id: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Self {
        let model_id = model_id.into();
        Self {
            client: Client::new(config),
            pricing: tokens::get_pricing(&model_id),
            model_id,
            temperature,
            timeout,
        }
    }

    async fn invoke_converse(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Generation, LlmError> {
        let request = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(
                Message::builder()
                    .role(ConversationRole::User)
                    .content(ContentBlock::Text(user_message.to_string()))
                    .build()
                    .map_err(|e| LlmError::Invocation(e.to_string()))?,
            )
            .inference_config(
                InferenceConfiguration::builder()
                    .temperature(self.temperature)
                    .build(),
            )
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| LlmError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| LlmError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        let token_count = response
            .usage()
            .map(tokens::extract_token_usage)
            .unwrap_or_default();
        let usage = tokens::calculate_cost(token_count, self.pricing.as_ref());

        debug!(
            model = %self.model_id,
            input_tokens = token_count.input,
            output_tokens = token_count.output,
            cost_usd = usage.cost_usd,
            "converse call complete"
        );

        Ok(Generation {
            text,
            model_id: self.model_id.clone(),
            usage,
        })
    }
}

impl TextGenerator for BedrockGenerator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        user_message: &'a str,
    ) -> BoxFuture<'a, Result<Generation, LlmError>> {
        Box::pin(self.invoke_converse(system_prompt, user_message))
    }
}

impl std::fmt::Debug for BedrockGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockGenerator")
            .field("model_id", &self.model_id)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

