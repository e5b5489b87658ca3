use tpcs_core::models::case::Step;
use tpcs_core::models::token_count::TokenCount;
use tpcs_export::status::{RunStatus, render_status, write_status};
use tpcs_workflow::batch::FailedNote;

fn status(failed: Vec<FailedNote>) -> RunStatus {
    RunStatus {
        generated_at: "2026-03-04 09:05:07".to_string(),
        model_id: "gpt-4o-mini".to_string(),
        staging_data: "data/toronto_staging.json".to_string(),
        processed: 2,
        failed,
        csv_path: Some("results.csv".to_string()),
        report_paths: vec!["results_a_20260304_090507.md".to_string()],
        tokens: TokenCount { input: 800, output: 160 },
        cost_usd: 0.0048,
    }
}

#[test]
fn successful_run_lists_outputs() {
    let md = render_status(&status(Vec::new())).unwrap();
    assert!(md.contains("- Notes processed: 2"));
    assert!(md.contains("- Notes failed: 0"));
    assert!(md.contains("- Results CSV: results.csv"));
    assert!(md.contains("- Estimated cost: $0.0048"));
    assert!(md.contains("- results_a_20260304_090507.md"));
    assert!(md.contains("All notes were processed successfully."));
    assert!(!md.contains("## Failed Notes"));
}

#[test]
fn failed_notes_are_listed_with_step() {
    let md = render_status(&status(vec![
        FailedNote {
            note_id: "b.txt".to_string(),
            step: Some(Step::CalculateStage),
            error: "model call timed out after 120 seconds".to_string(),
        },
        FailedNote {
            note_id: "c.txt".to_string(),
            step: None,
            error: "file not found".to_string(),
        },
    ]))
    .unwrap();

    assert!(md.contains("- Notes failed: 2"));
    assert!(md.contains("- b.txt (step `calculate_stage`): model call timed out after 120 seconds"));
    assert!(md.contains("- c.txt: file not found"));
}

#[test]
fn unknown_cost_is_omitted() {
    let mut run = status(Vec::new());
    run.cost_usd = 0.0;
    let md = render_status(&run).unwrap();
    assert!(!md.contains("Estimated cost"));
}

#[test]
fn write_status_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project_status.md");
    write_status(&path, &status(Vec::new())).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().starts_with("# Pediatric Cancer Staging Run Status"));
}
