//! tpcs-cli
//!
//! Argument parsing, provider configuration, logging, note discovery and
//! output writing for the `tpcs` binary.

pub mod cli;
pub mod config;
pub mod logging;
pub mod notes;
pub mod outputs;
