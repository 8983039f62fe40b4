//! Scoring configuration for zone index and impact computation
//!
//! This module contains all scoring-related configuration types including:
//! - Reference ranges used by the normalizer (CO2, noise, temperature band)
//! - Aggregation weights for the environmental activity index
//! - Mixing weights for the impact score
//! - Safe operating bounds used by the delta simulator
//! - Index band thresholds

use serde::{Deserialize, Serialize};
use stillwater::refined::Predicate;

/// Predicate for weights that must be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegativeWeight;

impl Predicate<f64> for NonNegativeWeight {
    type Error = &'static str;

    fn check(value: &f64) -> Result<(), Self::Error> {
        if value.is_finite() && *value >= 0.0 {
            Ok(())
        } else {
            Err("weight must be finite and non-negative")
        }
    }
}

/// Linear reference range: `lo` maps to badness 0, `hi` to badness 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub lo: f64,
    pub hi: f64,
}

impl ReferenceRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }

    /// Both ends finite and in order.
    pub fn is_well_formed(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite() && self.lo <= self.hi
    }

    /// Clamp that never panics: `NaN` passes through, and a malformed range
    /// resolves towards `hi`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            value
        } else {
            value.max(self.lo).min(self.hi)
        }
    }
}

/// Temperature comfort band with its absolute saturation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBand {
    /// Lower edge of the comfort band (°C)
    #[serde(default = "default_comfort_lo")]
    pub comfort_lo: f64,

    /// Upper edge of the comfort band (°C)
    #[serde(default = "default_comfort_hi")]
    pub comfort_hi: f64,

    /// Temperature at which cold discomfort saturates (°C)
    #[serde(default = "default_abs_min")]
    pub abs_min: f64,

    /// Temperature at which heat discomfort saturates (°C)
    #[serde(default = "default_abs_max")]
    pub abs_max: f64,
}

impl Default for TemperatureBand {
    fn default() -> Self {
        Self {
            comfort_lo: default_comfort_lo(),
            comfort_hi: default_comfort_hi(),
            abs_min: default_abs_min(),
            abs_max: default_abs_max(),
        }
    }
}

impl TemperatureBand {
    pub fn is_comfortable(&self, t: f64) -> bool {
        (self.comfort_lo..=self.comfort_hi).contains(&t)
    }

    pub fn validate(&self) -> Result<(), String> {
        let ordered = self.abs_min <= self.comfort_lo
            && self.comfort_lo <= self.comfort_hi
            && self.comfort_hi <= self.abs_max;
        if ordered {
            Ok(())
        } else {
            Err(format!(
                "Temperature band must satisfy abs_min <= comfort_lo <= comfort_hi <= abs_max, got {} <= {} <= {} <= {}",
                self.abs_min, self.comfort_lo, self.comfort_hi, self.abs_max
            ))
        }
    }
}

pub fn default_comfort_lo() -> f64 {
    22.0
}
pub fn default_comfort_hi() -> f64 {
    26.0
}
pub fn default_abs_min() -> f64 {
    15.0
}
pub fn default_abs_max() -> f64 {
    35.0
}

/// Per-signal reference ranges used by the normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRanges {
    /// CO2 concentration in ppm (default: 400-1200)
    #[serde(default = "default_co2_range")]
    pub co2: ReferenceRange,

    /// Noise level in dB (default: 40-90)
    #[serde(default = "default_noise_range")]
    pub noise: ReferenceRange,

    /// Temperature comfort band (default: comfort 22-26, saturating at 15 and 35)
    #[serde(default)]
    pub temperature: TemperatureBand,
}

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self {
            co2: default_co2_range(),
            noise: default_noise_range(),
            temperature: TemperatureBand::default(),
        }
    }
}

impl ReferenceRanges {
    pub fn validate(&self) -> Result<(), String> {
        for (name, range) in [("co2", self.co2), ("noise", self.noise)] {
            if !(range.lo.is_finite() && range.hi.is_finite()) || range.lo > range.hi {
                return Err(format!(
                    "{} range must be finite with lo <= hi, got [{}, {}]",
                    name, range.lo, range.hi
                ));
            }
        }
        self.temperature.validate()
    }
}

pub fn default_co2_range() -> ReferenceRange {
    ReferenceRange::new(400.0, 1200.0)
}
pub fn default_noise_range() -> ReferenceRange {
    ReferenceRange::new(40.0, 90.0)
}

/// Aggregation weights for the environmental activity index
///
/// Weights need not sum to 1.0; the aggregator divides by their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for CO2 goodness (default: 0.20)
    #[serde(default = "default_co2_weight")]
    pub co2: f64,

    /// Weight for noise goodness (default: 0.20)
    #[serde(default = "default_noise_weight")]
    pub noise: f64,

    /// Weight for temperature comfort (default: 0.25)
    #[serde(default = "default_temperature_weight")]
    pub temperature: f64,

    /// Weight for safety (default: 0.35)
    #[serde(default = "default_safety_weight")]
    pub safety: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            co2: default_co2_weight(),
            noise: default_noise_weight(),
            temperature: default_temperature_weight(),
            safety: default_safety_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        NonNegativeWeight::check(&weight)
            .map_err(|e| format!("{} weight {}: {}", name, weight, e))
    }

    pub fn sum(&self) -> f64 {
        self.co2 + self.noise + self.temperature + self.safety
    }

    /// Validate each weight and require a positive total
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.co2, "CO2")?;
        Self::validate_weight(self.noise, "Noise")?;
        Self::validate_weight(self.temperature, "Temperature")?;
        Self::validate_weight(self.safety, "Safety")?;

        if self.sum() <= 0.0 {
            return Err("Scoring weights must have a positive sum".to_string());
        }
        Ok(())
    }

}

pub fn default_co2_weight() -> f64 {
    0.20
}
pub fn default_noise_weight() -> f64 {
    0.20
}
pub fn default_temperature_weight() -> f64 {
    0.25
}
pub fn default_safety_weight() -> f64 {
    0.35
}

/// Mixing weights for the impact score
///
/// These are used as given and are expected to sum to roughly 1.0; the
/// final impact is clamped to [0, 100] either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactWeights {
    /// Weight for low index (default: 0.60)
    #[serde(default = "default_index_mix")]
    pub index: f64,

    /// Weight for unsafety (default: 0.40)
    #[serde(default = "default_safety_mix")]
    pub safety: f64,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            index: default_index_mix(),
            safety: default_safety_mix(),
        }
    }
}

impl ImpactWeights {
    pub fn sum(&self) -> f64 {
        self.index + self.safety
    }

    pub fn is_unit_sum(&self) -> bool {
        (self.sum() - 1.0).abs() <= 0.001
    }

    pub fn validate(&self) -> Result<(), String> {
        ScoringWeights::validate_weight(self.index, "Impact index")?;
        ScoringWeights::validate_weight(self.safety, "Impact safety")
    }
}

pub fn default_index_mix() -> f64 {
    0.60
}
pub fn default_safety_mix() -> f64 {
    0.40
}

/// Safe operating envelope applied after simulator deltas
///
/// Wider than the reference ranges; it only catches runaway deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeBounds {
    #[serde(default = "default_co2_bounds")]
    pub co2: ReferenceRange,

    #[serde(default = "default_temperature_bounds")]
    pub temperature: ReferenceRange,

    #[serde(default = "default_noise_bounds")]
    pub noise: ReferenceRange,

    /// Safety bounds, always in 0-100 points
    #[serde(default = "default_safety_bounds")]
    pub safety: ReferenceRange,
}

impl Default for SafeBounds {
    fn default() -> Self {
        Self {
            co2: default_co2_bounds(),
            temperature: default_temperature_bounds(),
            noise: default_noise_bounds(),
            safety: default_safety_bounds(),
        }
    }
}

impl SafeBounds {
    /// The envelope must contain the normalizer's saturation points, so that
    /// clamping never changes a badness score by itself.
    pub fn validate_against(&self, ranges: &ReferenceRanges) -> Result<(), String> {
        let checks = [
            ("co2", self.co2, ranges.co2),
            ("noise", self.noise, ranges.noise),
            (
                "temperature",
                self.temperature,
                ReferenceRange::new(ranges.temperature.abs_min, ranges.temperature.abs_max),
            ),
            ("safety", self.safety, default_safety_bounds()),
        ];
        for (name, bounds, reference) in checks {
            let covers = bounds.lo <= reference.lo && bounds.hi >= reference.hi;
            if !bounds.is_well_formed() || !covers {
                return Err(format!(
                    "{} safe bounds [{}, {}] must contain [{}, {}]",
                    name, bounds.lo, bounds.hi, reference.lo, reference.hi
                ));
            }
        }
        Ok(())
    }
}

pub fn default_co2_bounds() -> ReferenceRange {
    ReferenceRange::new(300.0, 2000.0)
}
pub fn default_temperature_bounds() -> ReferenceRange {
    ReferenceRange::new(10.0, 45.0)
}
pub fn default_noise_bounds() -> ReferenceRange {
    ReferenceRange::new(30.0, 110.0)
}
pub fn default_safety_bounds() -> ReferenceRange {
    ReferenceRange::new(0.0, 100.0)
}

/// Index thresholds for high / medium / low classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    /// Minimum index for the high band (default: 70)
    #[serde(default = "default_high_threshold")]
    pub high: f64,

    /// Minimum index for the medium band (default: 40)
    #[serde(default = "default_mid_threshold")]
    pub mid: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            high: default_high_threshold(),
            mid: default_mid_threshold(),
        }
    }
}

impl BandThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.mid <= self.high {
            Ok(())
        } else {
            Err(format!(
                "Band thresholds must satisfy mid <= high, got mid={} high={}",
                self.mid, self.high
            ))
        }
    }
}

pub fn default_high_threshold() -> f64 {
    70.0
}
pub fn default_mid_threshold() -> f64 {
    40.0
}
