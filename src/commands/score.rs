use super::{emit_table, read_input, resolve_config};
use crate::cli::TableOutput;
use crate::scoring::ScoringPipeline;
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn score_file(input: &Path, output: &TableOutput) -> Result<()> {
    let config = resolve_config(output.config.as_deref())?;
    let pipeline = ScoringPipeline::new(&config)?;
    let table = read_input(input)?;
    let scored = pipeline.score_table(&table)?;
    info!(rows = scored.len(), input = %input.display(), "scored zones");
    emit_table(scored, output, &config)
}
