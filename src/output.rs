//! Report rendering and persistence.
//!
//! Supports debug pretty-printing, JSON on stdout, and a JSON report file
//! for the charting frontend.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::TranscriptAggregate;

/// Logs the aggregate using Rust's debug pretty-print format.
pub fn print_pretty(aggregate: &TranscriptAggregate) {
    debug!("{:#?}", aggregate);
}

/// Prints the aggregate as pretty JSON on stdout.
pub fn print_json(aggregate: &TranscriptAggregate) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(aggregate)?);
    Ok(())
}

/// Writes the aggregate as pretty JSON to `path`.
pub fn write_report(path: &str, aggregate: &TranscriptAggregate) -> Result<()> {
    let body = serde_json::to_vec_pretty(aggregate)?;
    std::fs::write(path, body)?;

    info!(path, "Report written");
    Ok(())
}
