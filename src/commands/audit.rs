use super::{read_input, resolve_config};
use crate::audit::{audit_ranges, summarize, RangeAudit, TableSummary};
use crate::scoring::ScoringPipeline;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub ranges: RangeAudit,
    pub summary: TableSummary,
}

pub fn build_report(input: &Path, config: Option<&Path>) -> Result<AuditReport> {
    let config = resolve_config(config)?;
    let table = read_input(input)?;
    let ranges = audit_ranges(&table, &config)?;
    if !ranges.is_clean() {
        warn!("some readings fall outside the reference ranges and will saturate");
    }
    let scored = ScoringPipeline::new(&config)?.score_table(&table)?;
    Ok(AuditReport {
        ranges,
        summary: summarize(&scored)?,
    })
}

pub fn audit_file(input: &Path, config: Option<&Path>) -> Result<()> {
    let report = build_report(input, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
