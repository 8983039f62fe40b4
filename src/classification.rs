//! High / medium / low classification of the activity index.

use crate::config::BandThresholds;
use crate::core::{Value, ZoneTable, BAND, INDEX};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBand {
    Low,
    Medium,
    High,
}

impl IndexBand {
    pub fn classify(index: f64, thresholds: &BandThresholds) -> Self {
        if index >= thresholds.high {
            IndexBand::High
        } else if index >= thresholds.mid {
            IndexBand::Medium
        } else {
            IndexBand::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndexBand::Low => "low",
            IndexBand::Medium => "medium",
            IndexBand::High => "high",
        }
    }
}

impl fmt::Display for IndexBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append a `band` column to an already scored table.
///
/// Rows whose index is not numeric get an empty band.
pub fn classify_table(table: &ZoneTable, thresholds: &BandThresholds) -> Result<ZoneTable> {
    let index = table
        .column(INDEX)
        .ok_or_else(|| Error::missing_columns(&[INDEX], &[INDEX]))?;

    let bands = index
        .iter()
        .map(|v| match v.as_f64() {
            Some(i) if !i.is_nan() => Value::from(IndexBand::classify(i, thresholds).as_str()),
            _ => Value::Empty,
        })
        .collect();

    let mut out = table.clone();
    out.set_column(BAND, bands)?;
    Ok(out)
}
