pub mod tables;

pub use tables::{
    apply_aliases, read_table, read_table_from_path, write_json, write_table, COLUMN_ALIASES,
};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
