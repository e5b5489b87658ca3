//! Finding and reading note files.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use tpcs_core::models::case::Note;

/// Every `*.txt` file directly inside `dir`, sorted by path.
pub fn discover_notes(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .wrap_err_with(|| format!("failed to read notes directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .wrap_err_with(|| format!("failed to list {}", dir.display()))?
            .path();
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read a note; its id is the path as given.
pub fn read_note(path: &Path) -> Result<Note> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read note {}", path.display()))?;
    Ok(Note::new(path.display().to_string(), text))
}
