//! CSV and JSON encoding of zone tables.

use crate::core::{Value, ZoneTable, NOISE, SAFETY, TEMPERATURE};
use crate::errors::Result;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::debug;

/// Alternative header names accepted on input, as `(alias, canonical)`.
pub const COLUMN_ALIASES: [(&str, &str); 5] = [
    ("ruido", NOISE),
    ("temperatura", TEMPERATURE),
    ("seguridad", SAFETY),
    ("zona_id", "zone_id"),
    ("nombre", "name"),
];

/// Rename aliased columns to their canonical names.
///
/// An alias is only applied when the canonical column is absent, so a file
/// carrying both keeps both untouched.
pub fn apply_aliases(table: &mut ZoneTable) {
    for (alias, canonical) in COLUMN_ALIASES {
        if !table.has_column(canonical) && table.rename_column(alias, canonical) {
            debug!(alias, canonical, "renamed aliased column");
        }
    }
}

/// Read a headed CSV document into a table.
///
/// Cells are trimmed; blank cells become [`Value::Empty`], numeric cells
/// [`Value::Number`] and everything else [`Value::Text`]. Column aliases are
/// applied.
pub fn read_table<R: Read>(input: R) -> Result<ZoneTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record = record?;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.push(Value::parse(cell));
        }
    }

    let mut table = ZoneTable::from_columns(headers.into_iter().zip(columns))?;
    apply_aliases(&mut table);
    debug!(rows = table.len(), columns = table.columns().len(), "read zone table");
    Ok(table)
}

pub fn read_table_from_path(path: &Path) -> Result<ZoneTable> {
    read_table(BufReader::new(File::open(path)?))
}

/// Write `table` as CSV with a header row, preserving column order.
pub fn write_table<W: Write>(table: &ZoneTable, writer: W) -> Result<()> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(table.column_names())?;
    for i in 0..table.len() {
        if let Some(row) = table.row(i) {
            out.write_record(row.iter().map(|v| v.to_string()))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write `table` as a pretty-printed JSON array of row objects.
pub fn write_json<W: Write>(table: &ZoneTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &table.to_records())?;
    Ok(())
}
