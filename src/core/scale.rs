//! Fraction-or-points scale detection.
//!
//! Safety readings and externally computed indices arrive either as a 0-1
//! fraction or as a 0-100 point value. Both call sites share the single
//! detection rule implemented here:
//!
//! - a value inside `[0, 1]` (inclusive) is a fraction and is multiplied by 100
//! - any other value is already in points and is clamped to `[0, 100]`
//! - `NaN` is treated as 0 points
//!
//! Callers that know the scale can say so with [`Scaled::Fraction`] or
//! [`Scaled::Points`] and bypass detection.

use serde::{Deserialize, Serialize};

/// A value on the 0-100 point scale, always finite and inside `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointScale(f64);

impl PointScale {
    pub const MIN: PointScale = PointScale(0.0);
    pub const MAX: PointScale = PointScale(100.0);

    /// Detect the scale of `raw` and express it in points.
    pub fn detect(raw: f64) -> Self {
        if raw.is_nan() {
            Self::MIN
        } else if (0.0..=1.0).contains(&raw) {
            Self(raw * 100.0)
        } else {
            Self::from_points(raw)
        }
    }

    /// Clamp a value already known to be in points.
    pub fn from_points(points: f64) -> Self {
        if points.is_nan() {
            Self::MIN
        } else {
            Self(points.clamp(0.0, 100.0))
        }
    }

    /// Convert a value known to be a 0-1 fraction.
    pub fn from_fraction(fraction: f64) -> Self {
        Self::from_points(fraction * 100.0)
    }

    pub fn points(self) -> f64 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl Default for PointScale {
    fn default() -> Self {
        Self::MIN
    }
}

/// A raw reading tagged with the scale it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scale", content = "value", rename_all = "snake_case")]
pub enum Scaled {
    /// 0-1 fraction
    Fraction(f64),
    /// 0-100 points
    Points(f64),
    /// Unknown scale, resolved by [`PointScale::detect`]
    Auto(f64),
}

impl Scaled {
    pub fn to_points(self) -> PointScale {
        match self {
            Scaled::Fraction(f) => PointScale::from_fraction(f),
            Scaled::Points(p) => PointScale::from_points(p),
            Scaled::Auto(raw) => PointScale::detect(raw),
        }
    }
}

impl From<f64> for Scaled {
    fn from(raw: f64) -> Self {
        Scaled::Auto(raw)
    }
}

impl From<PointScale> for Scaled {
    fn from(points: PointScale) -> Self {
        Scaled::Points(points.points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_is_a_fraction() {
        assert_eq!(PointScale::detect(0.0).points(), 0.0);
        assert_eq!(PointScale::detect(0.5).points(), 50.0);
        assert_eq!(PointScale::detect(1.0).points(), 100.0);
    }

    #[test]
    fn test_values_above_one_are_points() {
        assert_eq!(PointScale::detect(1.5).points(), 1.5);
        assert_eq!(PointScale::detect(73.0).points(), 73.0);
        assert_eq!(PointScale::detect(250.0).points(), 100.0);
    }

    #[test]
    fn test_negative_and_nan_collapse_to_zero() {
        assert_eq!(PointScale::detect(-3.0).points(), 0.0);
        assert_eq!(PointScale::detect(f64::NAN).points(), 0.0);
        assert_eq!(PointScale::detect(f64::NEG_INFINITY).points(), 0.0);
        assert_eq!(PointScale::detect(f64::INFINITY).points(), 100.0);
    }

    #[test]
    fn test_explicit_tags_skip_detection() {
        // 0.8 points is not 80 points when the caller says so
        assert_eq!(Scaled::Points(0.8).to_points().points(), 0.8);
        assert_eq!(Scaled::Auto(0.8).to_points().points(), 80.0);
        assert_eq!(Scaled::Fraction(0.25).to_points().points(), 25.0);
        assert_eq!(Scaled::Fraction(4.0).to_points().points(), 100.0);
    }
}
