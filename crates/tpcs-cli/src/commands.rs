use std::path::Path;

use eyre::{Result, WrapErr, bail};
use jiff::Zoned;
use tracing::{error, info};

use tpcs_cli::cli::StageArgs;
use tpcs_cli::config::{generation_settings, provider_config};
use tpcs_cli::notes::{discover_notes, read_note};
use tpcs_cli::outputs::{CaseOutputs, parent_dir, stage_notes};
use tpcs_core::context::StagingContext;
use tpcs_core::models::case::Note;
use tpcs_core::reference::ReferenceTable;
use tpcs_core::synonyms::SynonymMap;
use tpcs_export::status::{RunStatus, write_status};
use tpcs_llm::config::build_generator;
use tpcs_workflow::Workflow;
use tpcs_workflow::batch::FailedNote;

use crate::summary;

/// Load the reference table. Only an unreadable file is fatal.
fn load_context(staging_data: &Path) -> Result<StagingContext> {
    let table = ReferenceTable::load(staging_data)
        .wrap_err("cannot start without a reference table; pass --staging-data")?;
    Ok(StagingContext::new(table, SynonymMap::embedded()))
}

/// Returns whether any note failed.
pub async fn run_stage(args: &StageArgs, staging_data: &Path) -> Result<bool> {
    let ctx = load_context(staging_data)?;

    let paths = match &args.notes_dir {
        Some(dir) => discover_notes(dir)?,
        None => args.notes.clone(),
    };
    if paths.is_empty() {
        bail!("no notes to process");
    }

    let provider = provider_config(&args.provider)?;
    let settings = generation_settings(&args.provider)?;
    let generator = build_generator(&provider, settings)
        .await
        .wrap_err("failed to configure the text generator")?;

    let report_dir = if args.no_markdown {
        None
    } else {
        Some(args.report_dir.clone().unwrap_or_else(|| parent_dir(&args.output)))
    };
    let mut outputs = CaseOutputs::create(&args.output, report_dir)?;

    let mut notes: Vec<Note> = Vec::with_capacity(paths.len());
    let mut unreadable: Vec<FailedNote> = Vec::new();
    for path in &paths {
        match read_note(path) {
            Ok(note) => notes.push(note),
            Err(e) => {
                error!(note = %path.display(), error = %e, "note skipped");
                unreadable.push(FailedNote {
                    note_id: path.display().to_string(),
                    step: None,
                    error: format!("{e:#}"),
                });
            }
        }
    }

    info!(
        notes = notes.len(),
        model = generator.model_id(),
        "staging notes"
    );

    let workflow = Workflow::new(&ctx, generator.as_ref());
    let mut outcome = stage_notes(&workflow, notes, &mut outputs, |case| {
        if args.show_responses {
            summary::print_responses(case);
        }
    })
    .await;
    unreadable.append(&mut outcome.failed);
    outcome.failed = unreadable;

    summary::print_run_summary(&outcome);

    let status = RunStatus {
        generated_at: Zoned::now().strftime("%Y-%m-%d %H:%M:%S %Z").to_string(),
        model_id: generator.model_id().to_string(),
        staging_data: staging_data.display().to_string(),
        processed: outcome.completed.len(),
        failed: outcome.failed.clone(),
        csv_path: Some(outputs.csv_path().display().to_string()),
        report_paths: outputs
            .report_paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        tokens: outcome.tokens(),
        cost_usd: outcome.cost_usd(),
    };
    write_status(&args.status_file, &status)?;

    println!(
        "Results CSV: {} ({} rows)",
        outputs.csv_path().display(),
        outputs.rows()
    );
    if let Some(dir) = outputs.report_dir() {
        println!("Markdown reports: {}", dir.display());
    }
    println!("Status: {}", args.status_file.display());

    Ok(outcome.has_failures())
}

pub fn run_categories(staging_data: &Path) -> Result<()> {
    let ctx = load_context(staging_data)?;
    summary::print_categories(&ctx.table);
    Ok(())
}

pub fn run_synonyms() {
    summary::print_synonyms(&SynonymMap::embedded());
}
