mod common;

use common::{ScriptedGenerator, context};
use tpcs_core::context::StagingContext;
use tpcs_core::models::case::{CalculatedStage, CriteriaFindings, Note, Step};
use tpcs_core::reference::ReferenceTable;
use tpcs_core::sentinel;
use tpcs_core::synonyms::SynonymMap;
use tpcs_llm::error::LlmError;
use tpcs_workflow::Workflow;
use tpcs_workflow::error::WorkflowError;

const WILMS_EXTRACTION: &str =
    "Cancer Type: Wilms Tumor\nStandardized Category: Wilms Tumor (Renal Tumors)\n";
const NOTE: &str = "4-year-old with a left renal mass. Nephrectomy showed tumor spillage.";

fn note() -> Note {
    Note::new("notes/case1.txt", NOTE)
}

#[tokio::test]
async fn covered_category_runs_every_step() {
    let ctx = context();
    let generator = ScriptedGenerator::new([
        WILMS_EXTRACTION,
        "Tumor confined to kidney: absent\nLymph node involvement: unknown",
        "Stage: Stage III\nSpillage during surgery places this tumor in Stage III.",
        "Staging Summary: Wilms tumor, Toronto Stage III.",
    ]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert!(case.covered());
    assert_eq!(
        case.identification.standardized_category.as_deref(),
        Some("Wilms Tumor (Renal Tumors)")
    );
    assert_eq!(case.identification.cancer_type, "Wilms Tumor");
    assert_eq!(
        case.steps_run(),
        vec![
            Step::IdentifyCancer,
            Step::AnalyzeCriteria,
            Step::CalculateStage,
            Step::GenerateReport
        ]
    );
    assert_eq!(
        case.calculated_stage(),
        &CalculatedStage::Named("Stage III".to_string())
    );
    assert!(case.assessment.explanation.contains("Spillage during surgery"));
    assert_eq!(case.report, "Staging Summary: Wilms tumor, Toronto Stage III.");
    assert_eq!(case.tokens.input, 400);
    assert_eq!(case.tokens.output, 40);
    assert!(case.transcript.iter().all(|r| r.cost_usd == 0.25));
    assert!((case.cost_usd() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn missing_labels_take_named_defaults() {
    let ctx = context();
    let generator = ScriptedGenerator::new([WILMS_EXTRACTION, "findings", "Stage: Stage I", "report"]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert_eq!(case.identification.primary_site, sentinel::NOT_SPECIFIED);
    assert_eq!(case.identification.metastasis_sites, sentinel::NONE_IDENTIFIED);
    assert_eq!(case.emr_stage(), sentinel::NOT_MENTIONED);
}

#[tokio::test]
async fn not_covered_marker_skips_criteria_and_stage() {
    let ctx = context();
    // The marker wins even though the category line names a covered key.
    let generator = ScriptedGenerator::new([
        "Cancer Type: Retinoblastoma\n\
         Standardized Category: Wilms Tumor (Renal Tumors)\n\
         THIS CANCER TYPE IS NOT COVERED BY THE TORONTO PEDIATRIC CANCER STAGING SYSTEM",
        "Report for an uncovered cancer.",
    ]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert!(!case.covered());
    assert_eq!(case.identification.standardized_category, None);
    assert_eq!(case.identification.category_label(), "Wilms Tumor (Renal Tumors)");
    assert_eq!(generator.call_count(), 2);
    assert_eq!(case.steps_run(), vec![Step::IdentifyCancer, Step::GenerateReport]);
    assert_eq!(case.criteria, CriteriaFindings::NotApplicable);
    assert_eq!(case.calculated_stage(), &CalculatedStage::NotApplicable);
    assert_eq!(case.calculated_stage().as_str(), sentinel::NOT_APPLICABLE);
    assert_eq!(case.assessment.explanation, sentinel::NOT_COVERED_EXPLANATION);
    assert_eq!(case.report, "Report for an uncovered cancer.");

    let report_request = &generator.requests()[1];
    assert!(report_request.user.contains("Calculated Stage: Not applicable"));
}

#[tokio::test]
async fn unresolvable_category_is_not_covered() {
    let ctx = context();
    let generator = ScriptedGenerator::new([
        "Cancer Type: Retinoblastoma\nStandardized Category: Retinoblastoma\n",
        "report",
    ]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert!(!case.covered());
    assert_eq!(generator.call_count(), 2);
    assert_eq!(case.identification.reported_category, "Retinoblastoma");
}

#[tokio::test]
async fn synonym_category_resolves_to_table_key() {
    let ctx = context();
    let generator = ScriptedGenerator::new([
        "Cancer Type: Nephroblastoma\nStandardized Category: **Renal Tumors**\n",
        "findings",
        "Stage: stage ii",
        "report",
    ]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert!(case.covered());
    assert_eq!(
        case.identification.standardized_category.as_deref(),
        Some("Wilms Tumor (Renal Tumors)")
    );
    assert_eq!(
        case.calculated_stage(),
        &CalculatedStage::Named("Stage II".to_string())
    );
}

#[tokio::test]
async fn empty_table_treats_everything_as_not_covered() {
    let ctx = StagingContext::new(ReferenceTable::empty(), SynonymMap::embedded());
    let generator = ScriptedGenerator::new([WILMS_EXTRACTION, "report"]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert!(!case.covered());
    assert_eq!(case.steps_run(), vec![Step::IdentifyCancer, Step::GenerateReport]);
}

#[tokio::test]
async fn ordinal_fallback_prefers_stage_i_over_stage_iii() {
    let ctx = context();
    let generator = ScriptedGenerator::new([
        WILMS_EXTRACTION,
        "findings",
        "The tumor is best described as Stage III. Earlier imaging suggested Stage I disease.",
        "report",
    ]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert_eq!(
        case.calculated_stage(),
        &CalculatedStage::Named("Stage I".to_string())
    );
}

#[tokio::test]
async fn invented_stage_label_becomes_insufficient_information() {
    let ctx = context();
    let generator = ScriptedGenerator::new([
        WILMS_EXTRACTION,
        "findings",
        "Stage: Stage IIIB\nThe note is ambiguous.",
        "report",
    ]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();

    assert_eq!(case.calculated_stage(), &CalculatedStage::InsufficientInformation);
    assert_eq!(case.calculated_stage().as_str(), sentinel::INSUFFICIENT_INFORMATION);
}

#[tokio::test]
async fn stage_prompts_carry_category_reference() {
    let ctx = context();
    let generator = ScriptedGenerator::new([
        "Cancer Type: Neuroblastoma\nStandardized Category: Neuroblastoma\nPrimary Site: Adrenal gland",
        "Image-defined risk factors: present",
        "Stage: L2",
        "report",
    ]);

    let case = Workflow::new(&ctx, &generator).run(&note()).await.unwrap();
    let requests = generator.requests();

    assert_eq!(case.calculated_stage().as_str(), "L2");
    assert_eq!(case.identification.primary_site, "Adrenal gland");

    let identify = &requests[0];
    assert!(identify.system.contains("Wilms Tumor (Renal Tumors), Neuroblastoma"));
    assert!(identify.system.contains("- 'ganglioneuroma' maps to 'Neuroblastoma'"));
    assert!(identify.user.contains(NOTE));

    let criteria = &requests[1];
    assert!(criteria.user.contains("Image-defined risk factors"));
    assert!(criteria.system.contains("Neuroblastoma: L1, L2, M, MS"));

    let stage = &requests[2];
    assert!(stage.user.contains("Image-defined risk factors: present"));
    assert!(stage.user.contains("L1, L2, M, MS"));
}

#[tokio::test]
async fn identical_inputs_give_identical_results() {
    let ctx = context();
    let script = [
        WILMS_EXTRACTION,
        "findings",
        "Stage: Stage IV\nLung nodules.",
        "report",
    ];

    let first_gen = ScriptedGenerator::new(script);
    let second_gen = ScriptedGenerator::new(script);
    let first = Workflow::new(&ctx, &first_gen).run(&note()).await.unwrap();
    let second = Workflow::new(&ctx, &second_gen).run(&note()).await.unwrap();

    assert_ne!(first.case_id, second.case_id);
    assert_eq!(first.identification, second.identification);
    assert_eq!(first.criteria, second.criteria);
    assert_eq!(first.assessment, second.assessment);
    assert_eq!(first.report, second.report);
    assert_eq!(first.steps_run(), second.steps_run());

    let first_requests: Vec<_> = first_gen.requests().into_iter().map(|r| (r.system, r.user)).collect();
    let second_requests: Vec<_> = second_gen.requests().into_iter().map(|r| (r.system, r.user)).collect();
    assert_eq!(first_requests, second_requests);
}

#[tokio::test]
async fn generation_failure_names_the_step() {
    let ctx = context();
    let generator = ScriptedGenerator::with_results([
        Ok(WILMS_EXTRACTION.to_string()),
        Err("throttled".to_string()),
    ]);

    let err = Workflow::new(&ctx, &generator).run(&note()).await.unwrap_err();

    assert_eq!(err.step(), Step::AnalyzeCriteria);
    assert!(matches!(
        err,
        WorkflowError::Step { source: LlmError::Invocation(ref msg), .. } if msg == "throttled"
    ));
    assert_eq!(generator.call_count(), 2);
}
