use crate::config::{UrbesenseConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const HEADER: &str = "# urbesense configuration\n#\n# Weights are relative; they are normalized by their sum at scoring time.\n\n";

/// Write the default configuration into `dir`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if io::file_exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = UrbesenseConfig::default().to_toml_string()?;
    io::write_file(&config_path, &format!("{HEADER}{body}"))?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    write_default_config(Path::new("."), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}
