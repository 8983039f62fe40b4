//! Zone scoring: normalization plus aggregation.
//!
//! [`ScoringPipeline`] binds a [`Normalizer`] and an [`Aggregator`] built from
//! one [`UrbesenseConfig`] and exposes both the scalar entry points
//! ([`ScoringPipeline::score_one`], [`ScoringPipeline::impact_one`]) and the
//! table entry point ([`ScoringPipeline::score_table`]). The table form is
//! the scalar form applied to every row.
//!
//! # Example
//!
//! ```rust
//! use urbesense::scoring::ScoringPipeline;
//!
//! let pipeline = ScoringPipeline::default();
//! let index = pipeline.score_one(800.0, 65.0, 30.0, 50.0);
//! assert_eq!(index, 51.39);
//! assert_eq!(pipeline.impact_one(index, 50.0), 49.17);
//! ```

pub mod aggregator;
pub mod normalizer;

pub use aggregator::{round2, Aggregator};
pub use normalizer::{
    clamp_unit, linear_badness, safety_badness, temperature_discomfort, Normalizer, Reading,
    SignalBadness,
};

use crate::config::UrbesenseConfig;
use crate::core::{
    Scaled, Signal, Value, ZoneTable, CO2, IMPACT, INDEX, NOISE, REQUIRED_INPUT_COLUMNS, SAFETY,
    TEMPERATURE,
};
use crate::errors::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Tables smaller than this are scored sequentially even when parallel
/// scoring is enabled.
const PARALLEL_ROW_THRESHOLD: usize = 512;

/// Derived values for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneScore {
    pub badness: SignalBadness,
    pub index: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPipeline {
    normalizer: Normalizer,
    aggregator: Aggregator,
    parallel: bool,
}

impl Default for ScoringPipeline {
    fn default() -> Self {
        Self::from_parts(Normalizer::default(), Aggregator::default())
    }
}

impl ScoringPipeline {
    /// Build a pipeline from a validated configuration.
    pub fn new(config: &UrbesenseConfig) -> Result<Self> {
        config.validate().map_err(Error::Configuration)?;
        Ok(Self::from_parts(
            Normalizer::new(config.ranges.clone()),
            Aggregator::new(config.scoring, config.impact),
        ))
    }

    pub fn from_parts(normalizer: Normalizer, aggregator: Aggregator) -> Self {
        Self {
            normalizer,
            aggregator,
            parallel: true,
        }
    }

    /// Enable or disable rayon row parallelism for table scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn score_reading(&self, reading: &Reading) -> ZoneScore {
        let badness = self.normalizer.badness(reading);
        let index = self.aggregator.index(&badness);
        let impact = self.aggregator.impact(index, badness.safety);
        ZoneScore {
            badness,
            index,
            impact,
        }
    }

    /// Index for one observation. `safety` may be a fraction or points.
    pub fn score_one(
        &self,
        co2: f64,
        noise: f64,
        temperature: f64,
        safety: impl Into<Scaled>,
    ) -> f64 {
        self.score_reading(&Reading::new(co2, noise, temperature, safety))
            .index
    }

    /// Impact for one observation.
    ///
    /// A bare `f64` index or safety is scale-detected: values in `[0, 1]`
    /// are read as fractions. Pass [`Scaled::Points`] to pin the scale.
    pub fn impact_one(&self, index: impl Into<Scaled>, safety: impl Into<Scaled>) -> f64 {
        let index = index.into().to_points().points();
        let safety_bad = self.normalizer.safety_badness(safety);
        self.aggregator.impact(index, safety_bad)
    }

    /// Score every row of `table`, returning a new table with the badness,
    /// index and impact columns written.
    ///
    /// Fails with [`Error::MissingColumns`] before reading any row when a
    /// raw-signal column is absent.
    pub fn score_table(&self, table: &ZoneTable) -> Result<ZoneTable> {
        table.require_columns(&REQUIRED_INPUT_COLUMNS)?;
        let safety = detect_safety_column(table)?;
        self.score_rows(table, &safety)
    }

    /// Like [`score_table`](Self::score_table), but reads safety from
    /// `safety` (one tagged value per row) instead of detecting the scale of
    /// the table's safety column.
    pub fn score_table_with_safety(&self, table: &ZoneTable, safety: &[Scaled]) -> Result<ZoneTable> {
        table.require_columns(&REQUIRED_INPUT_COLUMNS)?;
        if safety.len() != table.len() {
            return Err(Error::ShapeMismatch {
                column: SAFETY.to_string(),
                expected: table.len(),
                found: safety.len(),
            });
        }
        self.score_rows(table, safety)
    }

    fn score_rows(&self, table: &ZoneTable, safety: &[Scaled]) -> Result<ZoneTable> {
        let co2 = required_numbers(table, CO2)?;
        let noise = required_numbers(table, NOISE)?;
        let temperature = required_numbers(table, TEMPERATURE)?;
        let score_row =
            |i: usize| self.score_reading(&Reading::new(co2[i], noise[i], temperature[i], safety[i]));

        let scores: Vec<ZoneScore> = if self.parallel && table.len() >= PARALLEL_ROW_THRESHOLD {
            (0..table.len()).into_par_iter().map(score_row).collect()
        } else {
            (0..table.len()).map(score_row).collect()
        };
        debug!(rows = scores.len(), parallel = self.parallel, "scored zone table");

        let mut out = table.clone();
        write_scores(&mut out, &scores)?;
        Ok(out)
    }
}

fn required_numbers(table: &ZoneTable, name: &str) -> Result<Vec<f64>> {
    table
        .numeric_column(name)
        .ok_or_else(|| Error::missing_columns(&[name], &REQUIRED_INPUT_COLUMNS))
}

/// Scale-detected safety for each row. Unparseable cells count as 0 points
/// and are reported once per table.
fn detect_safety_column(table: &ZoneTable) -> Result<Vec<Scaled>> {
    let safety = table
        .column(SAFETY)
        .ok_or_else(|| Error::missing_columns(&[SAFETY], &REQUIRED_INPUT_COLUMNS))?;

    let unparseable = safety.iter().filter(|v| !v.is_numeric()).count();
    if unparseable > 0 {
        warn!(
            rows = unparseable,
            "non-numeric safety values treated as 0 (unsafe)"
        );
    }

    Ok(safety
        .iter()
        .map(|v| Scaled::Auto(v.as_f64_or_nan()))
        .collect())
}

fn write_scores(table: &mut ZoneTable, scores: &[ZoneScore]) -> Result<()> {
    let column = |f: &dyn Fn(&ZoneScore) -> f64| -> Vec<Value> {
        scores.iter().map(|s| Value::Number(f(s))).collect()
    };
    for signal in Signal::ALL {
        table.set_column(
            signal.badness_column(),
            column(&|s: &ZoneScore| s.badness.get(signal)),
        )?;
    }
    table.set_column(INDEX, column(&|s: &ZoneScore| s.index))?;
    table.set_column(IMPACT, column(&|s: &ZoneScore| s.impact))?;
    Ok(())
}

/// [`ScoringPipeline::score_one`] with the default configuration.
pub fn score_one(co2: f64, noise: f64, temperature: f64, safety: impl Into<Scaled>) -> f64 {
    ScoringPipeline::default().score_one(co2, noise, temperature, safety)
}

/// [`ScoringPipeline::impact_one`] with the default configuration.
pub fn impact_one(index: impl Into<Scaled>, safety: impl Into<Scaled>) -> f64 {
    ScoringPipeline::default().impact_one(index, safety)
}

/// [`ScoringPipeline::score_table`] with the default configuration.
pub fn score_table(table: &ZoneTable) -> Result<ZoneTable> {
    ScoringPipeline::default().score_table(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringWeights;
    use crate::core::{CO2_BAD, NOISE_BAD, SAFETY_BAD, TEMP_BAD};
    use pretty_assertions::assert_eq;

    fn table(rows: &[(f64, f64, f64, f64)]) -> ZoneTable {
        ZoneTable::from_numeric_columns([
            (CO2, rows.iter().map(|r| r.0).collect()),
            (NOISE, rows.iter().map(|r| r.1).collect()),
            (TEMPERATURE, rows.iter().map(|r| r.2).collect()),
            (SAFETY, rows.iter().map(|r| r.3).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_ideal_zone() {
        let p = ScoringPipeline::default();
        let score = p.score_reading(&Reading::new(400.0, 40.0, 24.0, 100.0));
        assert_eq!(score.badness, SignalBadness::default());
        assert_eq!(score.index, 100.0);
        assert_eq!(score.impact, 0.0);
    }

    #[test]
    fn test_worst_zone() {
        let p = ScoringPipeline::default();
        let score = p.score_reading(&Reading::new(1200.0, 90.0, 35.0, 0.0));
        assert_eq!(score.badness.co2, 1.0);
        assert_eq!(score.badness.noise, 1.0);
        assert_eq!(score.badness.temperature, 1.0);
        assert_eq!(score.badness.safety, 1.0);
        assert_eq!(score.index, 0.0);
        assert_eq!(score.impact, 100.0);
    }

    #[test]
    fn test_mid_zone() {
        assert_eq!(score_one(800.0, 65.0, 30.0, 50.0), 51.39);
        assert_eq!(impact_one(51.39, 50.0), 49.17);
        assert_eq!(impact_one(0.5139, 0.5), 49.17);
    }

    #[test]
    fn test_impact_one_pins_scale_when_tagged() {
        // 0.8 read as points means an almost-zero index
        let tagged = impact_one(Scaled::Points(0.8), 100.0);
        let detected = impact_one(0.8, 100.0);
        assert_eq!(tagged, 59.52);
        assert_eq!(detected, 12.0);
    }

    #[test]
    fn test_score_table_appends_derived_columns() {
        let input = table(&[(800.0, 65.0, 30.0, 50.0), (400.0, 40.0, 24.0, 1.0)]);
        let out = score_table(&input).unwrap();

        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            vec![
                CO2, NOISE, TEMPERATURE, SAFETY, CO2_BAD, NOISE_BAD, TEMP_BAD, SAFETY_BAD, INDEX,
                IMPACT
            ]
        );
        assert_eq!(out.numeric_column(INDEX).unwrap(), vec![51.39, 100.0]);
        assert_eq!(out.numeric_column(IMPACT).unwrap(), vec![49.17, 0.0]);
        // input is untouched
        assert_eq!(input.len(), 2);
        assert!(!input.has_column(INDEX));
    }

    #[test]
    fn test_score_table_overwrites_stale_metrics() {
        let mut input = table(&[(400.0, 40.0, 24.0, 100.0)]);
        input.set_numeric_column(INDEX, vec![-7.0]).unwrap();
        let out = score_table(&input).unwrap();
        assert_eq!(out.numeric_column(INDEX).unwrap(), vec![100.0]);
        assert_eq!(out.columns().len(), 10);
    }

    #[test]
    fn test_missing_temperature_column_fails_fast() {
        let input = ZoneTable::from_numeric_columns([
            (CO2, vec![400.0]),
            (NOISE, vec![40.0]),
            (SAFETY, vec![1.0]),
        ])
        .unwrap();

        match score_table(&input).unwrap_err() {
            Error::MissingColumns { missing, expected } => {
                assert_eq!(missing, vec![TEMPERATURE]);
                assert_eq!(expected, REQUIRED_INPUT_COLUMNS.to_vec());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_text_safety_is_treated_as_unsafe() {
        let mut input = table(&[(400.0, 40.0, 24.0, 0.0)]);
        input
            .set_column(SAFETY, vec![Value::from("unknown")])
            .unwrap();
        let out = score_table(&input).unwrap();
        assert_eq!(out.numeric_column(SAFETY_BAD).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_tagged_safety_overrides_detection() {
        let input = table(&[(400.0, 40.0, 24.0, 0.5)]);
        let detected = score_table(&input).unwrap();
        let tagged = ScoringPipeline::default()
            .score_table_with_safety(&input, &[Scaled::Points(0.5)])
            .unwrap();
        assert_eq!(detected.numeric_column(SAFETY_BAD).unwrap(), vec![0.5]);
        assert!((tagged.numeric_column(SAFETY_BAD).unwrap()[0] - 0.995).abs() < 1e-12);
    }

    #[test]
    fn test_tagged_safety_length_must_match() {
        let input = table(&[(400.0, 40.0, 24.0, 0.5)]);
        let err = ScoringPipeline::default()
            .score_table_with_safety(&input, &[])
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let rows: Vec<_> = (0..2000)
            .map(|i| {
                let x = i as f64;
                (300.0 + x, 30.0 + x / 20.0, 10.0 + x / 50.0, x / 20.0)
            })
            .collect();
        let input = table(&rows);
        let parallel = ScoringPipeline::default().score_table(&input).unwrap();
        let sequential = ScoringPipeline::default()
            .with_parallel(false)
            .score_table(&input)
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_pipelines_with_different_weights_coexist() {
        let safety_heavy = ScoringPipeline::new(&UrbesenseConfig {
            scoring: ScoringWeights {
                co2: 0.0,
                noise: 0.0,
                temperature: 0.0,
                safety: 1.0,
            },
            ..Default::default()
        })
        .unwrap();
        let default = ScoringPipeline::default();

        assert_eq!(safety_heavy.score_one(1200.0, 90.0, 35.0, 1.0), 100.0);
        assert_eq!(default.score_one(1200.0, 90.0, 35.0, 1.0), 35.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = UrbesenseConfig {
            scoring: ScoringWeights {
                co2: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            ScoringPipeline::new(&config),
            Err(Error::Configuration(_))
        ));
    }
}
