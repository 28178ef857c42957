//! Labeled landmark tables.
//!
//! A [`Table`] is the in-memory form of a landmark spreadsheet: one [`Row`]
//! per point with a free-text `Type` label and `X`, `Y` (and optionally `Z`)
//! columns. Parsing files into tables is the caller's job.

use crate::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One labeled row of a landmark table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    /// The `Type` label, e.g. `Repere1` or `Mesure2`.
    pub label: String,
    /// The `X` column.
    pub x: f64,
    /// The `Y` column.
    pub y: f64,
    /// The optional `Z` column. Carried through but never used for planar
    /// registration.
    pub z: Option<f64>,
}

impl Row {
    /// Creates a planar row.
    #[must_use]
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            z: None,
        }
    }

    /// Creates a row that also carries a `Z` value.
    #[must_use]
    pub fn with_z(label: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            z: Some(z),
        }
    }

    /// The planar position of this row.
    #[inline]
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An ordered collection of labeled rows.
///
/// # Example
///
/// ```
/// use coord_types::{Row, Table};
///
/// let mut table = Table::new();
/// table.push(Row::new("Repere1", 10.0, 20.0));
/// table.push(Row::with_z("Mesure1", 11.0, 21.0, 0.5));
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Repere1", "Mesure1"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates a table from rows, keeping their order.
    #[must_use]
    pub const fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Appends a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Borrow the rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the `Type` labels in row order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_point_ignores_z() {
        let row = Row::with_z("Repere1", 1.5, -2.5, 9.0);
        assert_eq!(row.point(), Point::new(1.5, -2.5));
        assert_eq!(row.z, Some(9.0));
    }

    #[test]
    fn test_table_keeps_row_order() {
        let table: Table = ["c", "a", "b"]
            .iter()
            .enumerate()
            .map(|(i, l)| Row::new(*l, i as f64, 0.0))
            .collect();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert!(!table.is_empty());
    }
}
