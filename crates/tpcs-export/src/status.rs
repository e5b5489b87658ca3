//! The run status file (`project_status.md`).

use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::info;

use tpcs_core::models::token_count::TokenCount;
use tpcs_workflow::batch::FailedNote;

use crate::error::ExportError;

pub const DEFAULT_STATUS_FILE: &str = "project_status.md";

const TEMPLATE_NAME: &str = "status.md";
const TEMPLATE: &str = include_str!("templates/status.md.tera");

/// What one `tpcs stage` run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunStatus {
    pub generated_at: String,
    pub model_id: String,
    pub staging_data: String,
    pub processed: usize,
    pub failed: Vec<FailedNote>,
    pub csv_path: Option<String>,
    pub report_paths: Vec<String>,
    pub tokens: TokenCount,
    pub cost_usd: f64,
}

pub fn render_status(status: &RunStatus) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(status)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

pub fn write_status(path: &Path, status: &RunStatus) -> Result<(), ExportError> {
    let rendered = render_status(status)?;
    std::fs::write(path, rendered).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "status file written");
    Ok(())
}
