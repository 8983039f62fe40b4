use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::UrbesenseConfig;
use super::scoring::{ImpactWeights, ReferenceRanges, ScoringWeights};
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".urbesense.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string, falling back to defaults for any
/// section that fails validation
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<UrbesenseConfig, String> {
    let mut config = toml::from_str::<UrbesenseConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.ranges.validate() {
        log::warn!("Invalid reference ranges: {}. Using defaults.", e);
        config.ranges = ReferenceRanges::default();
    }
    if let Err(e) = config.scoring.validate() {
        log::warn!("Invalid scoring weights: {}. Using defaults.", e);
        config.scoring = ScoringWeights::default();
    }
    if let Err(e) = config.impact.validate() {
        log::warn!("Invalid impact weights: {}. Using defaults.", e);
        config.impact = ImpactWeights::default();
    } else if !config.impact.is_unit_sum() {
        log::warn!(
            "Impact weights sum to {:.3}, not 1.0; impact will rely on final clamping",
            config.impact.sum()
        );
    }
    if let Err(e) = config.simulation.validate_against(&config.ranges) {
        log::warn!("Invalid simulation bounds: {}. Using defaults.", e);
        config.simulation = Default::default();
    }
    if let Err(e) = config.bands.validate() {
        log::warn!("Invalid band thresholds: {}. Using defaults.", e);
        config.bands = Default::default();
    }

    Ok(config)
}

/// Load and strictly validate a config file at an explicit path
///
/// Unlike [`load_config`], problems are surfaced instead of defaulted.
pub fn load_config_from_path(path: &Path) -> Result<UrbesenseConfig> {
    let contents = read_config_file(path)?;
    let config = toml::from_str::<UrbesenseConfig>(&contents).map_err(|e| {
        Error::configuration(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    config
        .validate()
        .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e)))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<UrbesenseConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.urbesense.toml`
pub fn load_config_from(start: PathBuf) -> UrbesenseConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            UrbesenseConfig::default()
        })
}

pub fn load_config() -> UrbesenseConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            UrbesenseConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, UrbesenseConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [scoring]
            safety = 0.5

            [ranges.co2]
            lo = 350.0
            hi = 1000.0
        "#})
        .unwrap();

        assert_eq!(config.scoring.safety, 0.5);
        assert_eq!(config.scoring.co2, 0.20);
        assert_eq!(config.ranges.co2.lo, 350.0);
        assert_eq!(config.ranges.noise.hi, 90.0);
        assert_eq!(config.ranges.temperature.comfort_lo, 22.0);
    }

    #[test]
    fn test_invalid_weights_fall_back_to_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [scoring]
            co2 = -1.0
        "#})
        .unwrap();
        assert_eq!(config.scoring, ScoringWeights::default());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(parse_and_validate_config("[scoring").is_err());
    }

    #[test]
    fn test_explicit_path_surfaces_invalid_weights() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");
        fs::write(&path, "[impact]\nindex = -0.5\n").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "{err}");
    }

    #[test]
    fn test_nan_simulation_bounds() {
        let contents = indoc! {r#"
            [simulation.co2]
            lo = nan
            hi = 2000.0
        "#};
        let config = parse_and_validate_config(contents).unwrap();
        assert_eq!(config.simulation, crate::config::SafeBounds::default());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bounds.toml");
        fs::write(&path, contents).unwrap();
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("co2 safe bounds"), "{err}");
    }

    #[test]
    fn test_config_is_found_in_ancestor_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[bands]\nhigh = 80.0\n",
        )
        .unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.bands.high, 80.0);
        assert_eq!(config.bands.mid, 40.0);
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let rendered = UrbesenseConfig::default().to_toml_string().unwrap();
        let parsed = parse_and_validate_config(&rendered).unwrap();
        assert_eq!(parsed, UrbesenseConfig::default());
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let ancestors: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(
            ancestors,
            vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]
        );
    }
}
