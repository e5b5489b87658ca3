use std::time::Duration;

use tpcs_cli::cli::{ProviderArgs, ProviderKind};
use tpcs_cli::config::{generation_settings, provider_config};
use tpcs_llm::config::ProviderConfig;

fn args(provider: ProviderKind) -> ProviderArgs {
    ProviderArgs {
        provider,
        temperature: 0.3,
        timeout_secs: 120,
        aws_region: "us-east-1".into(),
        aws_profile: None,
        model: "us.anthropic.claude-sonnet-4-20250514-v1:0".into(),
        azure_endpoint: Some("https://staging.openai.azure.com".into()),
        azure_api_key: Some("secret".into()),
        azure_api_version: Some("2024-08-01-preview".into()),
        azure_deployment: "gpt-4o-mini".into(),
    }
}

#[test]
fn bedrock_config_uses_region_and_model() {
    let mut input = args(ProviderKind::Bedrock);
    input.aws_profile = Some("research".into());
    match provider_config(&input).expect("valid config") {
        ProviderConfig::Bedrock {
            region,
            profile,
            model_id,
        } => {
            assert_eq!(region, "us-east-1");
            assert_eq!(profile.as_deref(), Some("research"));
            assert_eq!(model_id, "us.anthropic.claude-sonnet-4-20250514-v1:0");
        }
        other => panic!("expected bedrock, got {other:?}"),
    }
}

#[test]
fn blank_aws_profile_is_ignored() {
    let mut input = args(ProviderKind::Bedrock);
    input.aws_profile = Some("  ".into());
    match provider_config(&input).expect("valid config") {
        ProviderConfig::Bedrock { profile, .. } => assert!(profile.is_none()),
        other => panic!("expected bedrock, got {other:?}"),
    }
}

#[test]
fn azure_config_collects_settings() {
    match provider_config(&args(ProviderKind::Azure)).expect("valid config") {
        ProviderConfig::Azure(settings) => {
            assert_eq!(settings.endpoint, "https://staging.openai.azure.com");
            assert_eq!(settings.api_key, "secret");
            assert_eq!(settings.api_version, "2024-08-01-preview");
            assert_eq!(settings.deployment, "gpt-4o-mini");
        }
        other => panic!("expected azure, got {other:?}"),
    }
}

#[test]
fn missing_azure_key_names_the_variable() {
    let mut input = args(ProviderKind::Azure);
    input.azure_api_key = None;
    let err = provider_config(&input).unwrap_err();
    assert!(err.to_string().contains("AZURE_API_KEY"), "{err}");
}

#[test]
fn blank_azure_api_version_is_missing() {
    let mut input = args(ProviderKind::Azure);
    input.azure_api_version = Some(String::new());
    let err = provider_config(&input).unwrap_err();
    assert!(err.to_string().contains("AZURE_API_VERSION"), "{err}");
}

#[test]
fn azure_settings_are_not_required_for_bedrock() {
    let mut input = args(ProviderKind::Bedrock);
    input.azure_endpoint = None;
    input.azure_api_key = None;
    input.azure_api_version = None;
    assert!(provider_config(&input).is_ok());
}

#[test]
fn generation_settings_pass_through() {
    let mut input = args(ProviderKind::Bedrock);
    input.temperature = 0.0;
    input.timeout_secs = 45;
    let settings = generation_settings(&input).expect("valid settings");
    assert_eq!(settings.temperature, 0.0);
    assert_eq!(settings.timeout, Duration::from_secs(45));
}

#[test]
fn temperature_out_of_range_is_rejected() {
    let mut input = args(ProviderKind::Bedrock);
    input.temperature = 2.5;
    assert!(generation_settings(&input).is_err());
    input.temperature = -0.1;
    assert!(generation_settings(&input).is_err());
}

#[test]
fn zero_timeout_is_rejected() {
    let mut input = args(ProviderKind::Bedrock);
    input.timeout_secs = 0;
    assert!(generation_settings(&input).is_err());
}
