//! Dataset sanity checks.
//!
//! [`audit_ranges`] counts how many raw readings fall outside the ranges the
//! normalizer saturates at, so a caller can tell when a dataset is mostly
//! clipped, and how many rows repeat an earlier row. [`summarize`] reports
//! the spread of an already scored table.

use crate::config::{ReferenceRange, UrbesenseConfig};
use crate::core::{PointScale, Signal, Value, ZoneTable, IMPACT, INDEX, REQUIRED_INPUT_COLUMNS};
use crate::errors::Result;
use serde::Serialize;
use std::collections::HashSet;

/// Out-of-range counts for one raw signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalAudit {
    pub signal: Signal,
    pub below: usize,
    pub above: usize,
    pub non_numeric: usize,
}

impl SignalAudit {
    pub fn is_clean(&self) -> bool {
        self.below == 0 && self.above == 0 && self.non_numeric == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeAudit {
    pub rows: usize,
    /// Rows identical to an earlier row in every cell
    pub duplicate_rows: usize,
    pub signals: Vec<SignalAudit>,
}

impl RangeAudit {
    pub fn is_clean(&self) -> bool {
        self.duplicate_rows == 0 && self.signals.iter().all(SignalAudit::is_clean)
    }

    pub fn signal(&self, signal: Signal) -> Option<&SignalAudit> {
        self.signals.iter().find(|s| s.signal == signal)
    }
}

fn count_outside(
    signal: Signal,
    values: &[Value],
    range: ReferenceRange,
    rescale: impl Fn(f64) -> f64,
) -> SignalAudit {
    let mut audit = SignalAudit {
        signal,
        below: 0,
        above: 0,
        non_numeric: 0,
    };
    for value in values {
        match value.as_f64().filter(|x| !x.is_nan()).map(&rescale) {
            None => audit.non_numeric += 1,
            Some(x) if range.contains(x) => {}
            Some(x) if x < range.lo => audit.below += 1,
            Some(_) => audit.above += 1,
        }
    }
    audit
}

/// Count readings outside the configured reference ranges.
///
/// Temperature is checked against its saturation bounds rather than the
/// comfort band. Safety is checked on the 0-100 point scale after the
/// fraction/points detection, so only negative raw values count as below.
pub fn audit_ranges(table: &ZoneTable, config: &UrbesenseConfig) -> Result<RangeAudit> {
    table.require_columns(&REQUIRED_INPUT_COLUMNS)?;
    let ranges = &config.ranges;

    let signals = Signal::ALL
        .iter()
        .filter_map(|&signal| {
            let values = table.column(signal.column())?;
            Some(match signal {
                Signal::Co2 => count_outside(signal, values, ranges.co2, |x| x),
                Signal::Noise => count_outside(signal, values, ranges.noise, |x| x),
                Signal::Temperature => count_outside(
                    signal,
                    values,
                    ReferenceRange::new(ranges.temperature.abs_min, ranges.temperature.abs_max),
                    |x| x,
                ),
                // detection clamps above 100, so compare the raw value there
                Signal::Safety => count_outside(
                    signal,
                    values,
                    ReferenceRange::new(PointScale::MIN.points(), PointScale::MAX.points()),
                    |x| if (0.0..=1.0).contains(&x) { PointScale::detect(x).points() } else { x },
                ),
            })
        })
        .collect();

    Ok(RangeAudit {
        rows: table.len(),
        duplicate_rows: count_duplicate_rows(table),
        signals,
    })
}

/// Hashable view of a cell. All `NaN`s compare equal, as do `0.0` and `-0.0`.
#[derive(PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
    Empty,
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Number(x) if x.is_nan() => CellKey::Number(f64::NAN.to_bits()),
            Value::Number(x) => CellKey::Number((x + 0.0).to_bits()),
            Value::Text(s) => CellKey::Text(s),
            Value::Empty => CellKey::Empty,
        }
    }
}

/// Number of rows that repeat an earlier row across every column.
pub fn count_duplicate_rows(table: &ZoneTable) -> usize {
    let mut seen = HashSet::new();
    (0..table.len())
        .filter_map(|i| table.row(i))
        .filter(|row| !seen.insert(row.iter().map(|v| CellKey::from(*v)).collect::<Vec<_>>()))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Stats {
    /// `None` when `values` has no non-`NaN` entry.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
        if finite.is_empty() {
            return None;
        }
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        Some(Self { min, mean, max })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalStats {
    pub signal: Signal,
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub signals: Vec<SignalStats>,
    pub index: Option<Stats>,
    pub impact: Option<Stats>,
}

impl TableSummary {
    pub fn signal(&self, signal: Signal) -> Option<Stats> {
        self.signals
            .iter()
            .find(|s| s.signal == signal)
            .and_then(|s| s.stats)
    }
}

/// Row count plus min/mean/max of each raw signal, `index` and `impact`.
///
/// Safety is summarized in 0-100 points so that fraction and point rows mix.
/// Non-numeric cells are skipped, and a raw signal column that is absent
/// yields `None`.
pub fn summarize(table: &ZoneTable) -> Result<TableSummary> {
    table.require_columns(&[INDEX, IMPACT])?;
    let stats = |name: &str| {
        table
            .numeric_column(name)
            .and_then(|values| Stats::from_values(&values))
    };
    let signals = Signal::ALL
        .into_iter()
        .map(|signal| {
            let stats = match signal {
                Signal::Safety => table.numeric_column(signal.column()).and_then(|values| {
                    let points: Vec<f64> = values
                        .into_iter()
                        .map(|x| if x.is_nan() { x } else { PointScale::detect(x).points() })
                        .collect();
                    Stats::from_values(&points)
                }),
                _ => stats(signal.column()),
            };
            SignalStats { signal, stats }
        })
        .collect();
    Ok(TableSummary {
        rows: table.len(),
        signals,
        index: stats(INDEX),
        impact: stats(IMPACT),
    })
}
