//! Column-oriented zone table.
//!
//! A [`ZoneTable`] is the tabular shape the scoring core consumes and
//! produces: an ordered list of named columns of equal length. The core
//! only ever reads the raw-signal columns and writes the derived ones;
//! every other column (zone id, name, coordinates, ...) passes through
//! untouched and in its original position.

use super::Value;
use crate::errors::{Error, Result};
use serde_json::{Map, Value as JsonValue};

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// An ordered set of equally sized named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneTable {
    columns: Vec<Column>,
    rows: usize,
}

impl ZoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs.
    ///
    /// Fails with [`Error::ShapeMismatch`] if the columns differ in length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.set_column(name, values)?;
        }
        Ok(table)
    }

    /// Convenience constructor for all-numeric columns.
    pub fn from_numeric_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        Self::from_columns(
            columns
                .into_iter()
                .map(|(name, values)| (name, values.into_iter().map(Value::Number).collect())),
        )
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Read a column as numbers. Non-numeric and empty cells become `NaN`.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|values| values.iter().map(Value::as_f64_or_nan).collect())
    }

    /// Overwrite the column called `name`, or append it if absent.
    ///
    /// The first column added to an empty table fixes the row count.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.rows {
            return Err(Error::ShapeMismatch {
                column: name,
                expected: self.rows,
                found: values.len(),
            });
        }
        self.rows = values.len();

        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(Column { name, values }),
        }
        Ok(())
    }

    pub fn set_numeric_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        self.set_column(name, values.into_iter().map(Value::Number).collect())
    }

    /// Rename a column in place. Returns `false` if `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: impl Into<String>) -> bool {
        match self.columns.iter_mut().find(|c| c.name == from) {
            Some(column) => {
                column.name = to.into();
                true
            }
            None => false,
        }
    }

    /// Names from `expected` that this table lacks, in `expected` order.
    pub fn missing_columns(&self, expected: &[&str]) -> Vec<String> {
        expected
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Fail with [`Error::MissingColumns`] unless every `expected` column exists.
    pub fn require_columns(&self, expected: &[&str]) -> Result<()> {
        let missing = self.missing_columns(expected);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingColumns {
                missing,
                expected: expected.iter().map(|c| c.to_string()).collect(),
            })
        }
    }

    /// Cells of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        (index < self.rows).then(|| self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_records(&self) -> Vec<Map<String, JsonValue>> {
        (0..self.rows)
            .map(|i| {
                self.columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values[i].to_json()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ZoneTable {
        ZoneTable::from_columns([
            ("zone_id", vec![Value::from("Z1"), Value::from("Z2")]),
            ("co2", vec![Value::Number(450.0), Value::Text("n/a".into())]),
        ])
        .unwrap()
    }

    #[test]
    fn test_set_column_appends_then_overwrites() {
        let mut table = sample();
        table.set_numeric_column("index", vec![1.0, 2.0]).unwrap();
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["zone_id", "co2", "index"]
        );

        table.set_numeric_column("co2", vec![500.0, 600.0]).unwrap();
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["zone_id", "co2", "index"]
        );
        assert_eq!(table.numeric_column("co2").unwrap(), vec![500.0, 600.0]);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let mut table = sample();
        let err = table.set_numeric_column("noise", vec![40.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_numeric_column_maps_garbage_to_nan() {
        let values = sample().numeric_column("co2").unwrap();
        assert_eq!(values[0], 450.0);
        assert!(values[1].is_nan());
    }

    #[test]
    fn test_require_columns_lists_missing_in_expected_order() {
        let err = sample()
            .require_columns(&["co2", "noise", "temperature"])
            .unwrap_err();
        match err {
            Error::MissingColumns { missing, expected } => {
                assert_eq!(missing, vec!["noise", "temperature"]);
                assert_eq!(expected, vec!["co2", "noise", "temperature"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_records_are_keyed_by_column_name() {
        let records = sample().to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["zone_id"], JsonValue::String("Z1".into()));
        assert_eq!(records[1]["co2"], JsonValue::String("n/a".into()));
    }
}
