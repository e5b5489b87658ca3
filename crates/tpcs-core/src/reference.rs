//! The Toronto Pediatric Cancer Staging reference table.
//!
//! The table maps a standardized category name to its staging criteria,
//! its ordered stage definitions, and auxiliary term definitions. It is
//! loaded once from JSON and shared read-only by every workflow step:
//!
//! ```json
//! {
//!   "Neuroblastoma": {
//!     "criteria": ["Image-defined risk factors", "..."],
//!     "stages": { "L1": "...", "L2": "...", "M": "...", "MS": "..." },
//!     "definitions": { "IDRF": "..." }
//!   }
//! }
//! ```
//!
//! Loading is tolerant: invalid JSON is repaired when the defect is one of
//! the known kinds, individual malformed entries are skipped with a
//! warning, and a file that cannot be salvaged at all degrades to a
//! minimal single-category table. Only a missing or unreadable file is an
//! error.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::ReferenceError;
use crate::repair::repair_json;
use crate::synonyms::SynonymMap;

const FALLBACK_TABLE: &str = include_str!("fallback_reference.json");

/// One named stage and its definition, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub name: String,
    pub definition: String,
}

/// One auxiliary term used inside criteria or stage text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDefinition {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub criteria: Vec<String>,
    pub stages: Vec<StageDefinition>,
    pub definitions: Vec<TermDefinition>,
}

impl ReferenceEntry {
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name.as_str())
    }

    /// Match a model-written stage name against this entry's stages.
    ///
    /// Exact match first, then case-insensitive. Returns the canonical name.
    pub fn canonical_stage(&self, candidate: &str) -> Option<&str> {
        let candidate = candidate.trim();
        self.stage_names()
            .find(|name| *name == candidate)
            .or_else(|| {
                self.stage_names()
                    .find(|name| name.eq_ignore_ascii_case(candidate))
            })
    }

    /// Longest stage name that opens `value` and ends on a word boundary,
    /// ignoring case. `Stage III (residual tumor)` yields `Stage III`;
    /// `Stage IIIB` yields nothing.
    pub fn leading_stage(&self, value: &str) -> Option<&str> {
        let value = value.trim();
        self.stage_names()
            .filter(|name| {
                let Some(head) = value.get(..name.len()) else {
                    return false;
                };
                let boundary = value[name.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| !c.is_alphanumeric());
                head.eq_ignore_ascii_case(name) && boundary
            })
            .max_by_key(|name| name.len())
    }

    /// The entry rendered back to JSON, preserving table order.
    pub fn to_json_value(&self) -> Value {
        let stages: Map<String, Value> = self
            .stages
            .iter()
            .map(|s| (s.name.clone(), Value::String(s.definition.clone())))
            .collect();
        let definitions: Map<String, Value> = self
            .definitions
            .iter()
            .map(|d| (d.term.clone(), Value::String(d.definition.clone())))
            .collect();

        let mut obj = Map::new();
        obj.insert(
            "criteria".to_string(),
            Value::Array(self.criteria.iter().cloned().map(Value::String).collect()),
        );
        obj.insert("stages".to_string(), Value::Object(stages));
        obj.insert("definitions".to_string(), Value::Object(definitions));
        Value::Object(obj)
    }
}

/// How the table content was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSource {
    Parsed,
    Repaired,
    Fallback,
}

/// An entry that was present in the file but could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub category: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTable {
    entries: Vec<(String, ReferenceEntry)>,
    pub source: TableSource,
    pub skipped: Vec<SkippedEntry>,
}

impl ReferenceTable {
    /// Load a table from disk. A missing or unreadable file is an error;
    /// everything after the read degrades rather than fails.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_json_str(&content);
        info!(
            path = %path.display(),
            categories = table.len(),
            skipped = table.skipped.len(),
            source = ?table.source,
            "loaded reference table"
        );
        Ok(table)
    }

    /// Parse table JSON, repairing or falling back as needed.
    pub fn from_json_str(content: &str) -> Self {
        let (value, source) = match serde_json::from_str::<Value>(content) {
            Ok(value) => (value, TableSource::Parsed),
            Err(e) => {
                warn!(error = %e, "reference table is not valid JSON, attempting repair");
                match serde_json::from_str::<Value>(&repair_json(content)) {
                    Ok(value) => {
                        info!("reference table repaired");
                        (value, TableSource::Repaired)
                    }
                    Err(e) => {
                        warn!(error = %e, "reference table repair failed, using fallback table");
                        return Self::fallback();
                    }
                }
            }
        };

        match Self::from_value(&value) {
            Ok(mut table) => {
                table.source = source;
                table
            }
            Err(e) => {
                warn!(error = %e, "reference table unusable, using fallback table");
                Self::fallback()
            }
        }
    }

    /// Build a table from an already-parsed JSON object.
    ///
    /// Entries that fail validation are recorded in `skipped` and logged.
    pub fn from_value(value: &Value) -> Result<Self, ReferenceError> {
        let root = value.as_object().ok_or(ReferenceError::NotAnObject)?;

        let mut entries = Vec::with_capacity(root.len());
        let mut skipped = Vec::new();

        for (category, raw) in root {
            match parse_entry(category, raw) {
                Ok(entry) => entries.push((category.clone(), entry)),
                Err(e) => {
                    warn!(category = %category, error = %e, "skipping reference entry");
                    let reason = match e {
                        ReferenceError::InvalidEntry { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    skipped.push(SkippedEntry {
                        category: category.clone(),
                        reason,
                    });
                }
            }
        }

        if entries.is_empty() {
            warn!("reference table has no usable categories; every case will be treated as not covered");
        }

        Ok(Self {
            entries,
            source: TableSource::Parsed,
            skipped,
        })
    }

    /// The minimal single-category table used when the configured file
    /// cannot be salvaged.
    pub fn fallback() -> Self {
        let mut table = serde_json::from_str::<Value>(FALLBACK_TABLE)
            .map_err(ReferenceError::from)
            .and_then(|v| Self::from_value(&v))
            .unwrap_or_else(|e| {
                warn!(error = %e, "embedded fallback table unusable");
                Self::empty()
            });
        table.source = TableSource::Fallback;
        table
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            source: TableSource::Parsed,
            skipped: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category names in table order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn get(&self, category: &str) -> Option<&ReferenceEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn stage_names(&self, category: &str) -> Vec<&str> {
        self.get(category)
            .map(|e| e.stage_names().collect())
            .unwrap_or_default()
    }

    pub fn is_valid_stage(&self, category: &str, stage: &str) -> bool {
        self.get(category)
            .is_some_and(|e| e.stage_names().any(|name| name == stage))
    }

    /// One `Category: Stage A, Stage B` line per entry.
    pub fn stage_terminology_text(&self) -> String {
        let mut text = String::new();
        for (name, entry) in &self.entries {
            let stages: Vec<&str> = entry.stage_names().collect();
            text.push_str(&format!("{name}: {}\n", stages.join(", ")));
        }
        text
    }

    /// Pretty JSON of a single entry, for interpolation into prompts.
    pub fn entry_json(&self, category: &str) -> Option<String> {
        let entry = self.get(category)?;
        serde_json::to_string_pretty(&entry.to_json_value()).ok()
    }

    /// Resolve free text to a table key.
    ///
    /// Tries, in order: the text itself as a key (exact, then ignoring
    /// case, then against a key's base name or parenthetical qualifier, so
    /// `Renal Tumors` finds `Wilms Tumor (Renal Tumors)`), and then the same
    /// for the text's synonym. The result is always a key, so resolving a
    /// resolved name returns it unchanged.
    pub fn resolve_category(&self, synonyms: &SynonymMap, raw: &str) -> Option<&str> {
        let cleaned = raw
            .trim()
            .trim_matches(|c: char| c == '*' || c == '[' || c == ']' || c == '"')
            .trim();
        if cleaned.is_empty() {
            return None;
        }

        self.match_key(cleaned).or_else(|| {
            synonyms
                .lookup(cleaned)
                .and_then(|category| self.match_key(category))
        })
    }

    fn match_key(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.entries.iter().find(|(key, _)| key == name) {
            return Some(key);
        }

        let needle = name.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| key.to_lowercase() == needle)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(key, _)| key_aliases(key).iter().any(|alias| *alias == needle))
            })
            .map(|(key, _)| key.as_str())
    }
}

/// Lowercased base name and parenthetical qualifier of a key such as
/// `Wilms Tumor (Renal Tumors)`. Keys without a qualifier have no aliases.
fn key_aliases(key: &str) -> Vec<String> {
    let Some((base, rest)) = key.split_once('(') else {
        return Vec::new();
    };
    let qualifier = rest.trim_end().trim_end_matches(')');
    [base, qualifier]
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_entry(category: &str, raw: &Value) -> Result<ReferenceEntry, ReferenceError> {
    let invalid = |reason: &str| ReferenceError::InvalidEntry {
        category: category.to_string(),
        reason: reason.to_string(),
    };

    let obj = raw.as_object().ok_or_else(|| invalid("entry is not an object"))?;

    let criteria = match obj.get("criteria") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid("criteria must be a list of strings"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(invalid("criteria must be a list of strings")),
    };

    let stages = obj
        .get("stages")
        .ok_or_else(|| invalid("missing stages"))
        .and_then(|v| string_map(v).ok_or_else(|| invalid("stages must map names to strings")))?
        .into_iter()
        .map(|(name, definition)| StageDefinition { name, definition })
        .collect::<Vec<_>>();
    if stages.is_empty() {
        return Err(invalid("no stages defined"));
    }

    let definitions = match obj.get("definitions") {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => string_map(v)
            .ok_or_else(|| invalid("definitions must map terms to strings"))?
            .into_iter()
            .map(|(term, definition)| TermDefinition { term, definition })
            .collect(),
    };

    Ok(ReferenceEntry {
        criteria,
        stages,
        definitions,
    })
}

fn string_map(value: &Value) -> Option<Vec<(String, String)>> {
    value
        .as_object()?
        .iter()
        .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}
