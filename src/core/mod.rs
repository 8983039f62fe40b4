pub mod scale;
pub mod table;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

pub use scale::{PointScale, Scaled};
pub use table::{Column, ZoneTable};

/// Raw-signal column names every scoring input must carry.
pub const CO2: &str = "co2";
pub const NOISE: &str = "noise";
pub const TEMPERATURE: &str = "temperature";
pub const SAFETY: &str = "safety";

pub const REQUIRED_INPUT_COLUMNS: [&str; 4] = [CO2, NOISE, TEMPERATURE, SAFETY];

/// Derived columns written by table scoring.
pub const CO2_BAD: &str = "co2_bad";
pub const NOISE_BAD: &str = "noise_bad";
pub const TEMP_BAD: &str = "temp_bad";
pub const SAFETY_BAD: &str = "safety_bad";
pub const INDEX: &str = "index";
pub const IMPACT: &str = "impact";
pub const BAND: &str = "band";

/// The four raw signals a zone observation carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Co2,
    Noise,
    Temperature,
    Safety,
}

impl Signal {
    pub const ALL: [Signal; 4] = [
        Signal::Co2,
        Signal::Noise,
        Signal::Temperature,
        Signal::Safety,
    ];

    /// Input column holding this signal's raw value.
    pub fn column(self) -> &'static str {
        match self {
            Signal::Co2 => CO2,
            Signal::Noise => NOISE,
            Signal::Temperature => TEMPERATURE,
            Signal::Safety => SAFETY,
        }
    }

    /// Derived column holding this signal's badness.
    pub fn badness_column(self) -> &'static str {
        match self {
            Signal::Co2 => CO2_BAD,
            Signal::Noise => NOISE_BAD,
            Signal::Temperature => TEMP_BAD,
            Signal::Safety => SAFETY_BAD,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Value {
    /// Parse a textual cell: blank is `Empty`, numeric text is `Number`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Value::Empty
        } else {
            match trimmed.parse::<f64>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::Text(raw.to_string()),
            }
        }
    }

    /// Numeric view of the cell; numeric text counts as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Empty => None,
        }
    }

    pub fn as_f64_or_nan(&self) -> f64 {
        self.as_f64().unwrap_or(f64::NAN)
    }

    /// Whether the cell carries a usable (non-NaN) number.
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some_and(|n| !n.is_nan())
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Empty => JsonValue::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Empty => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
