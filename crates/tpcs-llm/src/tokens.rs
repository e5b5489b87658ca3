use tpcs_core::models::cost::ModelPricing;
use tpcs_core::models::token_count::{TokenCount, TokenUsage};

/// Extract token counts from a Bedrock Converse response.
pub fn extract_token_usage(usage: &aws_sdk_bedrockruntime::types::TokenUsage) -> TokenCount {
    TokenCount {
        input: usage.input_tokens.max(0) as u64,
        output: usage.output_tokens.max(0) as u64,
    }
}

/// Calculate the cost for a token count given model pricing.
pub fn calculate_cost(tokens: TokenCount, pricing: Option<&ModelPricing>) -> TokenUsage {
    TokenUsage {
        tokens,
        cost_usd: pricing.map_or(0.0, |p| p.estimate_cost(tokens)),
    }
}

/// Known model pricing (per million tokens).
/// These are approximate and should be updated as pricing changes.
pub fn get_pricing(model_id: &str) -> Option<ModelPricing> {
    match model_id {
        id if id.contains("claude-opus-4") => Some(ModelPricing {
            input_per_million: 15.0,
            output_per_million: 75.0,
        }),
        id if id.contains("claude-sonnet-4") => Some(ModelPricing {
            input_per_million: 3.0,
            output_per_million: 15.0,
        }),
        id if id.contains("claude-haiku") => Some(ModelPricing {
            input_per_million: 0.80,
            output_per_million: 4.0,
        }),
        // Checked before the broader gpt-4o arm.
        id if id.contains("gpt-4o-mini") => Some(ModelPricing {
            input_per_million: 0.15,
            output_per_million: 0.60,
        }),
        id if id.contains("gpt-4o") => Some(ModelPricing {
            input_per_million: 2.50,
            output_per_million: 10.0,
        }),
        _ => None,
    }
}
