//! CLI command implementations.
//!
//! - **score**: score every zone of a CSV file
//! - **simulate**: apply uniform deltas and re-score
//! - **audit**: report out-of-range readings and the score spread
//! - **init**: write a default configuration file

pub mod audit;
pub mod init;
pub mod score;
pub mod simulate;

pub use audit::{audit_file, AuditReport};
pub use init::init_config;
pub use score::score_file;
pub use simulate::simulate_file;

use crate::classification::classify_table;
use crate::cli::{OutputFormat, TableOutput};
use crate::config::{load_config, load_config_from_path, UrbesenseConfig};
use crate::core::ZoneTable;
use crate::io;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// An explicit `--config` must load cleanly; otherwise the nearest
/// `.urbesense.toml` is used, falling back to defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<UrbesenseConfig> {
    match path {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(load_config()),
    }
}

/// Optionally classify, then write `table` where `output` says.
pub fn emit_table(table: ZoneTable, output: &TableOutput, config: &UrbesenseConfig) -> Result<()> {
    let table = if output.bands {
        classify_table(&table, &config.bands)?
    } else {
        table
    };

    let writer: Box<dyn Write> = match &output.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    match output.format {
        OutputFormat::Csv => io::write_table(&table, writer)?,
        OutputFormat::Json => {
            let mut writer = writer;
            io::write_json(&table, &mut writer)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

pub(crate) fn read_input(path: &Path) -> Result<ZoneTable> {
    io::read_table_from_path(path).with_context(|| format!("Failed to read {}", path.display()))
}
