use serde::{Deserialize, Serialize};

use super::scoring::{BandThresholds, ImpactWeights, ReferenceRanges, SafeBounds, ScoringWeights};

/// Root configuration structure for urbesense
///
/// Every section is optional in `.urbesense.toml`; absent sections and
/// absent fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UrbesenseConfig {
    /// Normalizer reference ranges
    #[serde(default)]
    pub ranges: ReferenceRanges,

    /// Index aggregation weights
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Impact mixing weights
    #[serde(default)]
    pub impact: ImpactWeights,

    /// Simulator safe operating bounds
    #[serde(default)]
    pub simulation: SafeBounds,

    /// Index band thresholds
    #[serde(default)]
    pub bands: BandThresholds,
}

impl UrbesenseConfig {
    /// Validate every section, reporting the first problem found
    pub fn validate(&self) -> Result<(), String> {
        self.ranges.validate()?;
        self.scoring.validate()?;
        self.impact.validate()?;
        self.simulation.validate_against(&self.ranges)?;
        self.bands.validate()
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
