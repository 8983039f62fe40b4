use super::{emit_table, read_input, resolve_config};
use crate::cli::TableOutput;
use crate::simulator::{Delta, Simulator};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn simulate_file(input: &Path, delta: Delta, clamp: bool, output: &TableOutput) -> Result<()> {
    let config = resolve_config(output.config.as_deref())?;
    let simulator = Simulator::from_config(&config)?;
    let table = read_input(input)?;
    if delta.is_zero() {
        info!("all deltas are zero; output equals a plain score");
    }
    let simulated = simulator.simulate(&table, &delta, clamp)?;
    emit_table(simulated, output, &config)
}
