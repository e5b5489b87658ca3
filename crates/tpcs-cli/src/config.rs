//! Provider configuration from CLI flags and environment.

use std::time::Duration;

use eyre::{Result, bail, eyre};

use tpcs_llm::azure::AzureSettings;
use tpcs_llm::config::{GenerationSettings, ProviderConfig};

use crate::cli::{ProviderArgs, ProviderKind};

/// Resolve the selected provider's settings, naming the first missing one.
pub fn provider_config(args: &ProviderArgs) -> Result<ProviderConfig> {
    let config = match args.provider {
        ProviderKind::Bedrock => ProviderConfig::Bedrock {
            region: args.aws_region.clone(),
            profile: args.aws_profile.clone().filter(|p| !p.trim().is_empty()),
            model_id: args.model.clone(),
        },
        ProviderKind::Azure => ProviderConfig::Azure(AzureSettings {
            endpoint: required(&args.azure_endpoint, "AZURE_ENDPOINT")?,
            api_key: required(&args.azure_api_key, "AZURE_API_KEY")?,
            api_version: required(&args.azure_api_version, "AZURE_API_VERSION")?,
            deployment: args.azure_deployment.clone(),
        }),
    };
    config.validate().map_err(|e| eyre!(e))?;
    Ok(config)
}

pub fn generation_settings(args: &ProviderArgs) -> Result<GenerationSettings> {
    if !(0.0..=2.0).contains(&args.temperature) {
        bail!("temperature must be between 0.0 and 2.0, got {}", args.temperature);
    }
    if args.timeout_secs == 0 {
        bail!("timeout must be at least one second");
    }
    Ok(GenerationSettings {
        temperature: args.temperature,
        timeout: Duration::from_secs(args.timeout_secs),
    })
}

fn required(value: &Option<String>, name: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(eyre!(
            "{name} is not set; export it, add it to .env, or pass the matching --azure-* flag"
        )),
    }
}
