//! Raw signal to badness normalization.
//!
//! Every function here maps a raw reading onto `[0, 1]`, where 0 is ideal
//! and 1 is the worst plausible value. None of them can fail: values outside
//! the reference range saturate, and `NaN` saturates to the worst case.

use crate::config::{ReferenceRange, ReferenceRanges, TemperatureBand};
use crate::core::{PointScale, Scaled, Signal};
use serde::{Deserialize, Serialize};

/// Divisor guard for degenerate temperature bands.
const EPSILON: f64 = 1e-9;

/// Clamp into the unit interval; `NaN` counts as worst.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        1.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Linear badness: `range.lo` is good (0), `range.hi` is bad (1).
pub fn linear_badness(x: f64, range: ReferenceRange) -> f64 {
    if range.hi == range.lo {
        return if x.is_nan() { 1.0 } else { 0.0 };
    }
    clamp_unit((x - range.lo) / (range.hi - range.lo))
}

/// V-shaped discomfort: zero inside the comfort band, rising linearly to 1
/// at `abs_min` below it and at `abs_max` above it.
pub fn temperature_discomfort(t: f64, band: &TemperatureBand) -> f64 {
    if t.is_nan() {
        return 1.0;
    }
    if band.is_comfortable(t) {
        return 0.0;
    }
    if t < band.comfort_lo {
        return clamp_unit((band.comfort_lo - t) / (band.comfort_lo - band.abs_min).max(EPSILON));
    }
    clamp_unit((t - band.comfort_hi) / (band.abs_max - band.comfort_hi).max(EPSILON))
}

/// Safety badness is `1 - points / 100`.
pub fn safety_badness(safety: PointScale) -> f64 {
    1.0 - safety.fraction()
}

/// Badness of each raw signal for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalBadness {
    pub co2: f64,
    pub noise: f64,
    pub temperature: f64,
    pub safety: f64,
}

impl SignalBadness {
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Co2 => self.co2,
            Signal::Noise => self.noise,
            Signal::Temperature => self.temperature,
            Signal::Safety => self.safety,
        }
    }
}

/// One raw observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub co2: f64,
    pub noise: f64,
    pub temperature: f64,
    pub safety: Scaled,
}

impl Reading {
    pub fn new(co2: f64, noise: f64, temperature: f64, safety: impl Into<Scaled>) -> Self {
        Self {
            co2,
            noise,
            temperature,
            safety: safety.into(),
        }
    }
}

/// Normalizer bound to a set of reference ranges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalizer {
    ranges: ReferenceRanges,
}

impl Normalizer {
    pub fn new(ranges: ReferenceRanges) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &ReferenceRanges {
        &self.ranges
    }

    pub fn co2_badness(&self, co2: f64) -> f64 {
        linear_badness(co2, self.ranges.co2)
    }

    pub fn noise_badness(&self, noise: f64) -> f64 {
        linear_badness(noise, self.ranges.noise)
    }

    pub fn temperature_badness(&self, temperature: f64) -> f64 {
        temperature_discomfort(temperature, &self.ranges.temperature)
    }

    pub fn safety_badness(&self, safety: impl Into<Scaled>) -> f64 {
        safety_badness(safety.into().to_points())
    }

    pub fn badness(&self, reading: &Reading) -> SignalBadness {
        SignalBadness {
            co2: self.co2_badness(reading.co2),
            noise: self.noise_badness(reading.noise),
            temperature: self.temperature_badness(reading.temperature),
            safety: self.safety_badness(reading.safety),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_co2_reference_range() {
        let n = Normalizer::default();
        assert_eq!(n.co2_badness(400.0), 0.0);
        assert_eq!(n.co2_badness(800.0), 0.5);
        assert_eq!(n.co2_badness(1200.0), 1.0);
        assert_eq!(n.co2_badness(150.0), 0.0);
        assert_eq!(n.co2_badness(5000.0), 1.0);
    }

    #[test]
    fn test_noise_reference_range() {
        let n = Normalizer::default();
        assert_eq!(n.noise_badness(40.0), 0.0);
        assert_eq!(n.noise_badness(65.0), 0.5);
        assert_eq!(n.noise_badness(90.0), 1.0);
    }

    #[test]
    fn test_temperature_is_zero_inside_comfort_band() {
        let n = Normalizer::default();
        for t in [22.0, 23.5, 24.0, 26.0] {
            assert_eq!(n.temperature_badness(t), 0.0, "t = {t}");
        }
    }

    #[test]
    fn test_temperature_discomfort_is_v_shaped() {
        let n = Normalizer::default();
        assert!(approx(n.temperature_badness(30.0), 4.0 / 9.0));
        assert!(approx(n.temperature_badness(18.5), 0.5));
        assert_eq!(n.temperature_badness(15.0), 1.0);
        assert_eq!(n.temperature_badness(35.0), 1.0);
        assert_eq!(n.temperature_badness(-10.0), 1.0);
        assert_eq!(n.temperature_badness(50.0), 1.0);
    }

    #[test]
    fn test_degenerate_band_does_not_divide_by_zero() {
        let band = TemperatureBand {
            comfort_lo: 20.0,
            comfort_hi: 20.0,
            abs_min: 20.0,
            abs_max: 20.0,
        };
        assert_eq!(temperature_discomfort(19.9, &band), 1.0);
        assert_eq!(temperature_discomfort(20.0, &band), 0.0);
        assert_eq!(temperature_discomfort(20.1, &band), 1.0);
    }

    #[test]
    fn test_safety_accepts_fraction_or_points() {
        let n = Normalizer::default();
        assert!(approx(n.safety_badness(0.8), 0.2));
        assert!(approx(n.safety_badness(80.0), 0.2));
        assert_eq!(n.safety_badness(100.0), 0.0);
        assert_eq!(n.safety_badness(250.0), 0.0);
        assert_eq!(n.safety_badness(-4.0), 1.0);
        assert_eq!(n.safety_badness(f64::NAN), 1.0);
    }

    #[test]
    fn test_nan_readings_are_worst_case() {
        let n = Normalizer::default();
        assert_eq!(n.co2_badness(f64::NAN), 1.0);
        assert_eq!(n.noise_badness(f64::NAN), 1.0);
        assert_eq!(n.temperature_badness(f64::NAN), 1.0);
    }

    #[test]
    fn test_badness_of_reading() {
        let badness = Normalizer::default().badness(&Reading::new(800.0, 65.0, 30.0, 50.0));
        assert_eq!(badness.co2, 0.5);
        assert_eq!(badness.noise, 0.5);
        assert!(approx(badness.temperature, 4.0 / 9.0));
        assert_eq!(badness.safety, 0.5);
        assert_eq!(badness.get(Signal::Temperature), badness.temperature);
        assert_eq!(badness.get(Signal::Co2), 0.5);
    }
}
