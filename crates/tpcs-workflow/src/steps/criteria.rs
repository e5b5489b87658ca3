use tracing::info;

use tpcs_core::context::StagingContext;
use tpcs_core::models::case::{CriteriaFindings, Step, StepRecord};
use tpcs_llm::TextGenerator;

use super::invoke;
use crate::error::WorkflowError;
use crate::prompts;

/// Ask for per-criterion findings for a covered category.
///
/// The response is kept as opaque text and handed to the stage step.
pub async fn analyze_criteria(
    ctx: &StagingContext,
    generator: &dyn TextGenerator,
    category: &str,
    note: &str,
) -> Result<(CriteriaFindings, StepRecord), WorkflowError> {
    let prompt = prompts::criteria(ctx, category, note);
    let record = invoke(generator, Step::AnalyzeCriteria, &prompt).await?;

    info!(category, findings_len = record.response.len(), "criteria analyzed");
    Ok((CriteriaFindings::Analysis(record.response.clone()), record))
}
