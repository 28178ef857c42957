//! Labeled prediction rows for the caller's output table.
//!
//! Predictions keep full precision. Only [`PredictedRow`]'s `Display`
//! rounds, to the two decimals used in output spreadsheets.

use coord_types::{Point, PointSet, Table};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One predicted point, labeled for the output table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictedRow {
    /// Row label, e.g. `Mesure3`.
    pub label: String,
    /// Predicted coordinates in the destination system.
    pub point: Point,
}

impl fmt::Display for PredictedRow {
    /// Renders `label,X,Y` with two decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:.2},{:.2}", self.label, self.point.x, self.point.y)
    }
}

/// Labels predictions after the measurement rows of `input`.
///
/// The label stem is the longest common prefix of the last two labels of
/// `input` (with a single row, its whole label; with none, empty). Row `i`
/// is labeled `stem` followed by `i + 1`.
///
/// # Example
///
/// ```
/// use coord_registration::label_predictions;
/// use coord_types::{PointSet, Row, Table};
///
/// let input = Table::from_rows(vec![
///     Row::new("Repere1", 0.0, 0.0),
///     Row::new("Mesure1", 5.0, 5.0),
///     Row::new("Mesure2", 6.0, 7.0),
/// ]);
/// let predicted = PointSet::from_coords(&[(10.126, 3.0), (11.0, 4.5)]);
///
/// let rows = label_predictions(&input, &predicted);
/// assert_eq!(rows[0].to_string(), "Mesure1,10.13,3.00");
/// assert_eq!(rows[1].label, "Mesure2");
/// ```
#[must_use]
pub fn label_predictions(input: &Table, predictions: &PointSet) -> Vec<PredictedRow> {
    let stem = label_stem(input);
    predictions
        .iter()
        .enumerate()
        .map(|(i, p)| PredictedRow {
            label: format!("{stem}{}", i + 1),
            point: *p,
        })
        .collect()
}

fn label_stem(input: &Table) -> String {
    match input.rows() {
        [] => String::new(),
        [only] => only.label.clone(),
        [.., a, b] => common_prefix(&a.label, &b.label).to_string(),
    }
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|&((_, ca), cb)| ca != cb)
        .map_or(a.len().min(b.len()), |((i, _), _)| i);
    &a[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use coord_types::Row;

    #[test]
    fn test_common_prefix() {
        assert_eq!(common_prefix("Mesure1", "Mesure2"), "Mesure");
        assert_eq!(common_prefix("Mesure9", "Mesure10"), "Mesure");
        assert_eq!(common_prefix("abc", "abcdef"), "abc");
        assert_eq!(common_prefix("xyz", "abc"), "");
        assert_eq!(common_prefix("Repère1", "Repère2"), "Repère");
    }

    #[test]
    fn test_stem_edge_cases() {
        assert_eq!(label_stem(&Table::new()), "");
        let single = Table::from_rows(vec![Row::new("Point", 0.0, 0.0)]);
        assert_eq!(label_stem(&single), "Point");
    }

    #[test]
    fn test_display_rounds_but_point_keeps_precision() {
        let row = PredictedRow {
            label: "Mesure1".to_string(),
            point: Point::new(124.390_441, 36.805_390),
        };
        assert_eq!(row.to_string(), "Mesure1,124.39,36.81");
        assert!((row.point.x - 124.390_441).abs() < 1e-12);
    }

    #[test]
    fn test_labels_are_one_based() {
        let input = Table::from_rows(vec![
            Row::new("Measure1", 0.0, 0.0),
            Row::new("Measure2", 0.0, 0.0),
        ]);
        let preds = PointSet::from_coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let labels: Vec<String> = label_predictions(&input, &preds)
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["Measure1", "Measure2", "Measure3"]);
    }
}
