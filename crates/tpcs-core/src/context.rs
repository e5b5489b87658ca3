use crate::reference::ReferenceTable;
use crate::synonyms::SynonymMap;

/// Read-only configuration shared by every workflow step.
///
/// Built once at startup and passed by reference; nothing mutates it after
/// construction, so batches may share one instance freely.
#[derive(Debug, Clone)]
pub struct StagingContext {
    pub table: ReferenceTable,
    pub synonyms: SynonymMap,
}

impl StagingContext {
    pub fn new(table: ReferenceTable, synonyms: SynonymMap) -> Self {
        Self { table, synonyms }
    }

    /// Resolve free text to a reference table key, if it maps to one.
    pub fn resolve_category(&self, raw: &str) -> Option<&str> {
        self.table.resolve_category(&self.synonyms, raw)
    }
}
