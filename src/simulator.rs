//! Delta-based what-if simulation.
//!
//! The simulator shifts every row's raw signals by a uniform delta,
//! optionally clamps the shifted values into a safe operating envelope, and
//! re-runs the scoring pipeline on the result. Each call starts from the
//! table it is given; deltas never accumulate across calls.
//!
//! The safety delta is always in 0-100 points. Stored safety values are
//! first brought onto the point scale, shifted, and written back as points.
//! Re-scoring reads the shifted safety as tagged points rather than
//! re-detecting its scale, so a shifted value such as 0.5 points is never
//! mistaken for a 0.5 fraction.

use crate::config::{ReferenceRange, SafeBounds, UrbesenseConfig};
use crate::core::{
    PointScale, Scaled, ZoneTable, CO2, NOISE, REQUIRED_INPUT_COLUMNS, SAFETY, TEMPERATURE,
};
use crate::errors::{Error, Result};
use crate::scoring::ScoringPipeline;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Uniform additive deltas applied to every row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    /// ppm
    #[serde(default)]
    pub co2: f64,
    /// °C
    #[serde(default)]
    pub temperature: f64,
    /// dB
    #[serde(default)]
    pub noise: f64,
    /// 0-100 safety points, regardless of how safety is stored
    #[serde(default)]
    pub safety: f64,
}

impl Delta {
    pub fn new(co2: f64, temperature: f64, noise: f64, safety: f64) -> Self {
        Self {
            co2,
            temperature,
            noise,
            safety,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.co2 == 0.0 && self.temperature == 0.0 && self.noise == 0.0 && self.safety == 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Simulator {
    pipeline: ScoringPipeline,
    bounds: SafeBounds,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(ScoringPipeline::default(), SafeBounds::default())
    }
}

impl Simulator {
    pub fn new(pipeline: ScoringPipeline, bounds: SafeBounds) -> Self {
        Self { pipeline, bounds }
    }

    pub fn from_config(config: &UrbesenseConfig) -> Result<Self> {
        Ok(Self::new(ScoringPipeline::new(config)?, config.simulation))
    }

    pub fn pipeline(&self) -> &ScoringPipeline {
        &self.pipeline
    }

    /// Raw-signal table with `delta` applied, before re-scoring.
    pub fn apply_delta(&self, table: &ZoneTable, delta: &Delta, clamp: bool) -> Result<ZoneTable> {
        table.require_columns(&REQUIRED_INPUT_COLUMNS)?;
        let bounds = &self.bounds;

        let shift = |name: &str, d: f64, range: ReferenceRange| -> Result<Vec<f64>> {
            let values = table
                .numeric_column(name)
                .ok_or_else(|| Error::missing_columns(&[name], &REQUIRED_INPUT_COLUMNS))?;
            Ok(values
                .into_iter()
                .map(|x| x + d)
                .map(|x| if clamp { range.clamp(x) } else { x })
                .collect())
        };

        let co2 = shift(CO2, delta.co2, bounds.co2)?;
        let temperature = shift(TEMPERATURE, delta.temperature, bounds.temperature)?;
        let noise = shift(NOISE, delta.noise, bounds.noise)?;

        let safety: Vec<f64> = table
            .column(SAFETY)
            .ok_or_else(|| Error::missing_columns(&[SAFETY], &REQUIRED_INPUT_COLUMNS))?
            .iter()
            .map(|v| PointScale::detect(v.as_f64_or_nan()).points() + delta.safety)
            .map(|s| if clamp { bounds.safety.clamp(s) } else { s })
            .collect();

        let mut shifted = table.clone();
        shifted.set_numeric_column(CO2, co2)?;
        shifted.set_numeric_column(TEMPERATURE, temperature)?;
        shifted.set_numeric_column(NOISE, noise)?;
        shifted.set_numeric_column(SAFETY, safety)?;
        Ok(shifted)
    }

    /// Apply `delta` to every row and return the fully re-scored table.
    pub fn simulate(&self, table: &ZoneTable, delta: &Delta, clamp: bool) -> Result<ZoneTable> {
        let shifted = self.apply_delta(table, delta, clamp)?;
        let safety: Vec<Scaled> = shifted
            .numeric_column(SAFETY)
            .ok_or_else(|| Error::missing_columns(&[SAFETY], &REQUIRED_INPUT_COLUMNS))?
            .into_iter()
            .map(Scaled::Points)
            .collect();
        debug!(
            rows = shifted.len(),
            d_co2 = delta.co2,
            d_temperature = delta.temperature,
            d_noise = delta.noise,
            d_safety = delta.safety,
            clamp,
            "simulating deltas"
        );
        self.pipeline.score_table_with_safety(&shifted, &safety)
    }
}

/// [`Simulator::simulate`] with the default configuration.
pub fn simulate(
    table: &ZoneTable,
    delta_co2: f64,
    delta_temperature: f64,
    delta_noise: f64,
    delta_safety: f64,
    clamp: bool,
) -> Result<ZoneTable> {
    Simulator::default().simulate(
        table,
        &Delta::new(delta_co2, delta_temperature, delta_noise, delta_safety),
        clamp,
    )
}
