//! Weighted aggregation of signal badness into index and impact.

use super::normalizer::SignalBadness;
use crate::config::{ImpactWeights, ScoringWeights};

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Clamp a 0-100 metric; `NaN` collapses to 0.
fn clamp_metric(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aggregator {
    weights: ScoringWeights,
    impact: ImpactWeights,
}

impl Aggregator {
    pub fn new(weights: ScoringWeights, impact: ImpactWeights) -> Self {
        Self { weights, impact }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn impact_weights(&self) -> &ImpactWeights {
        &self.impact
    }

    /// Weighted mean of per-signal goodness (`1 - badness`), in `[0, 1]`.
    pub fn goodness(&self, badness: &SignalBadness) -> f64 {
        let w = &self.weights;
        let sum = w.sum();
        if sum <= 0.0 {
            return 0.0;
        }
        (w.co2 * (1.0 - badness.co2)
            + w.noise * (1.0 - badness.noise)
            + w.temperature * (1.0 - badness.temperature)
            + w.safety * (1.0 - badness.safety))
            / sum
    }

    /// Environmental activity index (0-100, higher is better).
    pub fn index(&self, badness: &SignalBadness) -> f64 {
        clamp_metric(round2(100.0 * self.goodness(badness)))
    }

    /// Impact (0-100, higher is worse) from an index in points and the
    /// safety badness.
    pub fn impact(&self, index_points: f64, safety_badness: f64) -> f64 {
        let raw = 100.0
            * (self.impact.index * (1.0 - index_points / 100.0)
                + self.impact.safety * safety_badness);
        clamp_metric(round2(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(b: f64) -> SignalBadness {
        SignalBadness {
            co2: b,
            noise: b,
            temperature: b,
            safety: b,
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(51.3888), 51.39);
        assert_eq!(round2(49.1666), 49.17);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_extremes() {
        let agg = Aggregator::default();
        assert_eq!(agg.index(&uniform(0.0)), 100.0);
        assert_eq!(agg.index(&uniform(1.0)), 0.0);
        assert_eq!(agg.impact(100.0, 0.0), 0.0);
        assert_eq!(agg.impact(0.0, 1.0), 100.0);
    }

    #[test]
    fn test_weights_are_normalized_by_their_sum() {
        let scaled = Aggregator::new(
            ScoringWeights {
                co2: 2.0,
                noise: 2.0,
                temperature: 2.5,
                safety: 3.5,
            },
            ImpactWeights::default(),
        );
        let badness = SignalBadness {
            co2: 0.1,
            noise: 0.7,
            temperature: 0.3,
            safety: 0.9,
        };
        assert_eq!(scaled.index(&badness), Aggregator::default().index(&badness));
    }

    #[test]
    fn test_impact_is_clamped_when_mix_exceeds_one() {
        let agg = Aggregator::new(
            ScoringWeights::default(),
            ImpactWeights {
                index: 0.9,
                safety: 0.9,
            },
        );
        assert_eq!(agg.impact(0.0, 1.0), 100.0);
    }

    #[test]
    fn test_zero_weights_yield_zero_index() {
        let agg = Aggregator::new(
            ScoringWeights {
                co2: 0.0,
                noise: 0.0,
                temperature: 0.0,
                safety: 0.0,
            },
            ImpactWeights::default(),
        );
        assert_eq!(agg.index(&uniform(0.0)), 0.0);
    }
}
