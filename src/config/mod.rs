//! Configuration for the scoring pipeline.
//!
//! Configuration is an explicit value handed to the normalizer, aggregator
//! and simulator at construction time. Nothing here is global, so several
//! independently configured pipelines can run side by side.

mod core;
mod loader;
mod scoring;

pub use self::core::UrbesenseConfig;

pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

pub use scoring::{
    default_abs_max, default_abs_min, default_co2_bounds, default_co2_range, default_co2_weight,
    default_comfort_hi, default_comfort_lo, default_high_threshold, default_index_mix,
    default_mid_threshold, default_noise_bounds, default_noise_range, default_noise_weight,
    default_safety_bounds, default_safety_mix, default_safety_weight, default_temperature_bounds,
    default_temperature_weight, BandThresholds, ImpactWeights, NonNegativeWeight, ReferenceRange,
    ReferenceRanges, SafeBounds, ScoringWeights, TemperatureBand,
};
