//! Provider selection and generator construction.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::azure::{AzureGenerator, AzureSettings};
use crate::bedrock::{self, BedrockGenerator};
use crate::error::LlmError;
use crate::generator::TextGenerator;

pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_AWS_REGION: &str = "us-east-1";
pub const DEFAULT_BEDROCK_MODEL: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";
pub const DEFAULT_AZURE_DEPLOYMENT: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum ProviderConfig {
    Bedrock {
        region: String,
        profile: Option<String>,
        model_id: String,
    },
    Azure(AzureSettings),
}

impl ProviderConfig {
    /// Reject settings that cannot possibly produce a working client.
    pub fn validate(&self) -> Result<(), LlmError> {
        match self {
            ProviderConfig::Bedrock {
                region, model_id, ..
            } => {
                if region.trim().is_empty() {
                    return Err(LlmError::Config("AWS region is empty".to_string()));
                }
                if model_id.trim().is_empty() {
                    return Err(LlmError::Config("Bedrock model id is empty".to_string()));
                }
            }
            ProviderConfig::Azure(settings) => {
                for (name, value) in [
                    ("AZURE_ENDPOINT", &settings.endpoint),
                    ("AZURE_API_KEY", &settings.api_key),
                    ("AZURE_API_VERSION", &settings.api_version),
                    ("AZURE_GPT4O_DEPLOYMENT", &settings.deployment),
                ] {
                    if value.trim().is_empty() {
                        return Err(LlmError::Config(format!("{name} is not set")));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn provider_name(&self) -> &'static str {
        match self {
            ProviderConfig::Bedrock { .. } => "bedrock",
            ProviderConfig::Azure(_) => "azure",
        }
    }
}

/// Sampling and transport settings shared by every backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Construct the configured backend.
pub async fn build_generator(
    provider: &ProviderConfig,
    settings: GenerationSettings,
) -> Result<Arc<dyn TextGenerator>, LlmError> {
    provider.validate()?;

    let generator: Arc<dyn TextGenerator> = match provider {
        ProviderConfig::Bedrock {
            region,
            profile,
            model_id,
        } => {
            let sdk_config = bedrock::build_aws_config(region, profile.as_deref()).await;
            Arc::new(BedrockGenerator::new(
                &sdk_config,
                model_id.clone(),
                settings.temperature,
                settings.timeout,
            ))
        }
        ProviderConfig::Azure(azure) => Arc::new(AzureGenerator::new(
            azure.clone(),
            settings.temperature,
            settings.timeout,
        )),
    };

    info!(
        provider = provider.provider_name(),
        model = generator.model_id(),
        temperature = settings.temperature,
        "text generator ready"
    );
    Ok(generator)
}
