//! Environmental activity index and impact scoring for urban zones.
//!
//! Each zone observation carries four raw signals: CO2 (ppm), noise (dB),
//! temperature (°C) and a safety rating given either as a 0-1 fraction or as
//! 0-100 points. The [`scoring`] module normalizes each signal to a badness
//! in `[0, 1]` and aggregates them into an activity index (0-100, higher is
//! better) and an impact score (0-100, higher is worse). The [`simulator`]
//! applies uniform what-if deltas to a table and re-scores it.
//!
//! ```rust
//! use urbesense::{score_table, ZoneTable};
//!
//! let zones = ZoneTable::from_numeric_columns([
//!     ("co2", vec![800.0, 400.0]),
//!     ("noise", vec![65.0, 40.0]),
//!     ("temperature", vec![30.0, 24.0]),
//!     ("safety", vec![0.5, 1.0]),
//! ])?;
//! let scored = score_table(&zones)?;
//! assert_eq!(scored.numeric_column("index").unwrap(), vec![51.39, 100.0]);
//! # Ok::<(), urbesense::Error>(())
//! ```

// Export modules for library usage
pub mod audit;
pub mod classification;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod scoring;
pub mod simulator;

// Re-export commonly used types
pub use crate::core::{PointScale, Scaled, Signal, Value, ZoneTable};

pub use crate::config::UrbesenseConfig;

pub use crate::errors::{Error, Result};

pub use crate::scoring::{impact_one, score_one, score_table, ScoringPipeline, ZoneScore};

pub use crate::simulator::{simulate, Delta, Simulator};

pub use crate::classification::{classify_table, IndexBand};

pub use crate::audit::{
    audit_ranges, count_duplicate_rows, summarize, RangeAudit, SignalStats, TableSummary,
};
