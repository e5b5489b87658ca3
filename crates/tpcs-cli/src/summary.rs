use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tpcs_core::models::case::{CalculatedStage, CaseState};
use tpcs_core::reference::{ReferenceTable, TableSource};
use tpcs_core::synonyms::SynonymMap;
use tpcs_workflow::batch::BatchOutcome;

pub fn print_run_summary(outcome: &BatchOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Note"),
        header_cell("Cancer Type"),
        header_cell("Category"),
        header_cell("Covered"),
        header_cell("EMR Stage"),
        header_cell("Calculated Stage"),
        header_cell("Tokens"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 6, CellAlignment::Right);

    for case in &outcome.completed {
        table.add_row(vec![
            Cell::new(&case.note.id),
            Cell::new(&case.identification.cancer_type),
            Cell::new(case.identification.category_label()),
            covered_cell(case.covered()),
            Cell::new(case.emr_stage()),
            stage_cell(case.calculated_stage()),
            Cell::new(case.tokens.total()),
        ]);
    }
    for failed in &outcome.failed {
        let label = match failed.step {
            Some(step) => format!("failed at {step}"),
            None => "failed".to_string(),
        };
        table.add_row(vec![
            Cell::new(&failed.note_id),
            Cell::new(label).fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }

    let tokens = outcome.tokens();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} staged, {} failed",
            outcome.completed.len(),
            outcome.failed.len()
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(tokens.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    // Zero means no priced model was used.
    let cost = outcome.cost_usd();
    if cost > 0.0 {
        println!(
            "Tokens: {} in / {} out, estimated cost ${cost:.4}",
            tokens.input, tokens.output
        );
    } else {
        println!("Tokens: {} in / {} out", tokens.input, tokens.output);
    }
    for failed in &outcome.failed {
        println!("  {}: {}", failed.note_id, failed.error);
    }
}

/// Echo every model response for a case to stdout.
pub fn print_responses(case: &CaseState) {
    println!("==== {} ====", case.note.id);
    for record in &case.transcript {
        println!("---- {} ({}) ----", record.step, record.model_id);
        println!("{}", record.response.trim_end());
    }
    println!();
}

pub fn print_categories(reference: &ReferenceTable) {
    let source = match reference.source {
        TableSource::Parsed => "parsed",
        TableSource::Repaired => "repaired",
        TableSource::Fallback => "built-in fallback",
    };
    println!("Reference table: {} categories ({source})", reference.len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Stages"),
        header_cell("Criteria"),
        header_cell("Definitions"),
    ]);
    apply_list_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (category, entry) in reference.iter() {
        table.add_row(vec![
            Cell::new(category).add_attribute(Attribute::Bold),
            Cell::new(entry.stage_names().collect::<Vec<_>>().join(", ")),
            Cell::new(entry.criteria.len()),
            Cell::new(entry.definitions.len()),
        ]);
    }
    println!("{table}");

    for skipped in &reference.skipped {
        println!("  skipped {}: {}", skipped.category, skipped.reason);
    }
}

pub fn print_synonyms(synonyms: &SynonymMap) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Subtype"), header_cell("Category")]);
    apply_list_table_style(&mut table);
    for (subtype, category) in synonyms.iter() {
        table.add_row(vec![Cell::new(subtype), Cell::new(category)]);
    }
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn apply_list_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn covered_cell(covered: bool) -> Cell {
    if covered {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Yellow)
    }
}

fn stage_cell(stage: &CalculatedStage) -> Cell {
    match stage {
        CalculatedStage::Named(name) => Cell::new(name).add_attribute(Attribute::Bold),
        CalculatedStage::InsufficientInformation => Cell::new(stage.as_str()).fg(Color::Yellow),
        CalculatedStage::NotApplicable => dim_cell(stage.as_str()),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
