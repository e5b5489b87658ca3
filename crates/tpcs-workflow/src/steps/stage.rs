use tracing::{info, warn};

use tpcs_core::context::StagingContext;
use tpcs_core::models::case::{CalculatedStage, CriteriaFindings, StageAssessment, Step, StepRecord};
use tpcs_llm::TextGenerator;

use super::invoke;
use crate::error::WorkflowError;
use crate::parse;
use crate::prompts;

/// Select a stage for a covered category from the criteria findings.
///
/// The whole response is kept as the explanation.
pub async fn calculate_stage(
    ctx: &StagingContext,
    generator: &dyn TextGenerator,
    category: &str,
    note: &str,
    findings: &CriteriaFindings,
) -> Result<(StageAssessment, StepRecord), WorkflowError> {
    let prompt = prompts::stage(ctx, category, note, findings.as_text());
    let record = invoke(generator, Step::CalculateStage, &prompt).await?;

    let stage = match ctx.table.get(category) {
        Some(entry) => parse::parse_stage(&record.response, entry),
        None => {
            warn!(category, "category vanished from reference table");
            CalculatedStage::InsufficientInformation
        }
    };

    info!(category, stage = %stage, "stage calculated");
    let assessment = StageAssessment {
        stage,
        explanation: record.response.clone(),
    };
    Ok((assessment, record))
}
