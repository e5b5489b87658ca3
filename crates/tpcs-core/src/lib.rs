//! tpcs-core
//!
//! Pure domain types for Toronto Pediatric Cancer Staging: the reference
//! table, the subtype synonym map, case state and token accounting.
//! No network dependency. This is the shared vocabulary of the workspace.

pub mod context;
pub mod error;
pub mod models;
pub mod reference;
pub mod repair;
pub mod sentinel;
pub mod synonyms;
