use tracing::{info, warn};

use tpcs_core::context::StagingContext;
use tpcs_core::models::case::{Identification, Step, StepRecord};
use tpcs_llm::TextGenerator;

use super::invoke;
use crate::error::WorkflowError;
use crate::parse;
use crate::prompts;

/// Extract the cancer type and incidental fields, and decide coverage.
///
/// Coverage requires both that the response lacks the not-covered marker
/// and that the reported category resolves to a reference table key.
pub async fn identify_cancer(
    ctx: &StagingContext,
    generator: &dyn TextGenerator,
    note: &str,
) -> Result<(Identification, StepRecord), WorkflowError> {
    let prompt = prompts::identify(ctx, note);
    let record = invoke(generator, Step::IdentifyCancer, &prompt).await?;
    let identification = interpret_identification(ctx, &record.response);

    info!(
        cancer_type = %identification.cancer_type,
        category = %identification.category_label(),
        covered = identification.covered,
        "cancer identified"
    );
    Ok((identification, record))
}

/// Turn an extraction response into an [`Identification`].
pub fn interpret_identification(ctx: &StagingContext, response: &str) -> Identification {
    let fields = parse::parse_extraction(response);

    let resolved = ctx.resolve_category(&fields.category).map(str::to_string);
    let standardized_category = if fields.not_covered_marker {
        None
    } else {
        if resolved.is_none() {
            warn!(
                category = %fields.category,
                "reported category does not resolve to a reference table key, treating as not covered"
            );
        }
        resolved
    };

    Identification {
        cancer_type: fields.cancer_type,
        reported_category: fields.category,
        covered: standardized_category.is_some(),
        standardized_category,
        primary_site: fields.primary_site,
        metastasis_sites: fields.metastasis_sites,
        emr_stage: fields.emr_stage,
    }
}
