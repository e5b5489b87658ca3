mod common;

use common::{ScriptedGenerator, context};
use tpcs_core::models::case::{Note, Step};
use tpcs_workflow::Workflow;

#[tokio::test]
async fn batch_continues_past_failed_note() {
    let ctx = context();
    let generator = ScriptedGenerator::with_results([
        Err("connection reset".to_string()),
        Ok("Cancer Type: Hepatoblastoma\nStandardized Category: Hepatoblastoma\n".to_string()),
        Ok("report".to_string()),
    ]);

    let notes = vec![
        Note::new("a.txt", "first note"),
        Note::new("b.txt", "second note"),
    ];
    let mut seen = Vec::new();
    let outcome = Workflow::new(&ctx, &generator)
        .run_batch(notes, |case| seen.push(case.note.id.clone()))
        .await;

    assert_eq!(outcome.total(), 2);
    assert!(outcome.has_failures());
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].note_id, "a.txt");
    assert_eq!(outcome.failed[0].step, Some(Step::IdentifyCancer));
    assert!(outcome.failed[0].error.contains("connection reset"));
    assert_eq!(seen, vec!["b.txt".to_string()]);
    assert_eq!(outcome.completed[0].note.id, "b.txt");
    assert_eq!(outcome.tokens().input, 200);
}

#[tokio::test]
async fn record_failure_counts_notes_that_never_ran() {
    let ctx = context();
    let generator = ScriptedGenerator::new(Vec::<String>::new());

    let mut outcome = Workflow::new(&ctx, &generator).run_batch(Vec::<Note>::new(), |_| {}).await;
    outcome.record_failure("missing.txt", None, "file not found");

    assert_eq!(outcome.total(), 1);
    assert_eq!(outcome.failed[0].step, None);
    assert_eq!(generator.call_count(), 0);
}
