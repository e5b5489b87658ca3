//! Prompt text for each step.
//!
//! Every prompt is a system instruction plus a single user message with
//! the note and the relevant reference material interpolated. The response
//! formats requested here are what [`crate::parse`] reads back.

use tpcs_core::context::StagingContext;
use tpcs_core::models::case::{CriteriaFindings, Identification, StageAssessment};

/// Sentence the extraction prompt asks for when no covered category fits.
pub const NOT_COVERED_SENTENCE: &str =
    "THIS CANCER TYPE IS NOT COVERED BY THE TORONTO PEDIATRIC CANCER STAGING SYSTEM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn identify(ctx: &StagingContext, note: &str) -> Prompt {
    let categories: Vec<&str> = ctx.table.categories().collect();
    let system = format!(
        "You are a pediatric oncologist who identifies cancer types in medical notes \
and maps them to standardized categories.\n\
\n\
The Toronto Pediatric Cancer Staging System covers only these categories:\n\
{categories}\n\
\n\
Specific diagnoses map to categories as follows:\n\
{synonyms}\n\
Always check whether the diagnosis maps to one of the covered categories. \
If it does not, include this sentence verbatim in your answer:\n\
{NOT_COVERED_SENTENCE}\n\
\n\
Answer with one labeled field per line:\n\
Cancer Type: <diagnosis as written in the note>\n\
Standardized Category: <one covered category name, exactly as listed>\n\
Primary Site: <anatomic site of the primary tumor>\n\
Metastasis Sites: <sites of metastasis, or None identified>\n\
Extracted Stage: <stage explicitly written in the note, or Not mentioned>",
        categories = categories.join(", "),
        synonyms = ctx.synonyms.reference_text(),
    );

    let user = format!(
        "Analyze this medical note and identify the cancer type and the fields above. \
If several cancers are mentioned, report the primary diagnosis.\n\
\n\
Medical Note:\n{note}"
    );

    Prompt { system, user }
}

pub fn criteria(ctx: &StagingContext, category: &str, note: &str) -> Prompt {
    let system = format!(
        "You are a pediatric oncology staging specialist. You analyze medical notes \
for the staging criteria of {category} under the Toronto Pediatric Cancer Staging System.\n\
\n\
Valid stages per category:\n\
{terminology}",
        terminology = ctx.table.stage_terminology_text(),
    );

    let reference = ctx
        .table
        .entry_json(category)
        .unwrap_or_else(|| "{}".to_string());
    let user = format!(
        "Identify which staging criteria for {category} are present in this note.\n\
\n\
Medical Note:\n{note}\n\
\n\
Toronto staging criteria for {category}:\n{reference}\n\
\n\
Write one line per criterion: the criterion, then present, absent, or unknown, \
then the supporting excerpt from the note."
    );

    Prompt { system, user }
}

pub fn stage(ctx: &StagingContext, category: &str, note: &str, findings: &str) -> Prompt {
    let reference = ctx
        .table
        .entry_json(category)
        .unwrap_or_else(|| "{}".to_string());
    let stage_names = ctx.table.stage_names(category).join(", ");
    let system = format!(
        "You are a pediatric oncology staging expert for the Toronto Pediatric Cancer \
Staging System. You determine the stage of {category} from the criteria found in a note.\n\
\n\
Stages and criteria for {category}:\n{reference}"
    );

    let user = format!(
        "Using the criteria analysis below, determine the Toronto stage for this \
{category} case.\n\
\n\
Medical Note:\n{note}\n\
\n\
Criteria Analysis:\n{findings}\n\
\n\
Start your answer with a line of the form\n\
Stage: <one of {stage_names}>\n\
or \"Stage: Insufficient information\" if the note does not allow a decision, \
then explain in detail how you reached it."
    );

    Prompt { system, user }
}

pub fn report(
    note: &str,
    identification: &Identification,
    criteria: &CriteriaFindings,
    assessment: &StageAssessment,
) -> Prompt {
    let system = "You are a pediatric oncology report specialist. You write clear, \
professional staging reports for medical records: comprehensive, but focused on the \
most important clinical information."
        .to_string();

    let user = format!(
        "Write a professional cancer staging report from the following information.\n\
\n\
Cancer Type: {cancer_type}\n\
Standardized Category: {category}\n\
Primary Site: {primary_site}\n\
Metastasis Sites: {metastasis}\n\
Stage Stated in Note (EMR): {emr_stage}\n\
Calculated Stage: {stage}\n\
\n\
Criteria Findings:\n{criteria}\n\
\n\
Staging Explanation:\n{explanation}\n\
\n\
Medical Note:\n{note}",
        cancer_type = identification.cancer_type,
        category = identification.category_label(),
        primary_site = identification.primary_site,
        metastasis = identification.metastasis_sites,
        emr_stage = identification.emr_stage,
        stage = assessment.stage,
        criteria = criteria.as_text(),
        explanation = assessment.explanation,
    );

    Prompt { system, user }
}
