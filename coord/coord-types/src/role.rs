//! Label-based role selection.
//!
//! Landmark tables mark each row's role only through its free-text label.
//! The matching rule lives behind [`RolePredicate`] so it can be swapped
//! without touching estimation code.

use crate::{PointSet, Table};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The role a table row plays in a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Landmark known in both coordinate systems.
    Reference,
    /// Point whose destination coordinates are to be predicted.
    Measurement,
}

/// Decides whether a row label belongs to a role.
///
/// Any `Fn(&str) -> bool` closure is a predicate:
///
/// ```
/// use coord_types::{extract, Row, Table};
///
/// let table = Table::from_rows(vec![
///     Row::new("LM-1", 0.0, 0.0),
///     Row::new("PT-1", 1.0, 1.0),
/// ]);
/// let landmarks = extract(&table, &|label: &str| label.starts_with("LM"));
/// assert_eq!(landmarks.len(), 1);
/// ```
pub trait RolePredicate {
    /// Returns true if `label` selects the row.
    fn matches(&self, label: &str) -> bool;
}

impl<F> RolePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, label: &str) -> bool {
        self(label)
    }
}

/// Case-sensitive substring containment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringMatch {
    needle: String,
}

impl SubstringMatch {
    /// Creates a predicate matching labels that contain `needle`.
    #[must_use]
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    /// The substring being searched for.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }
}

impl RolePredicate for SubstringMatch {
    fn matches(&self, label: &str) -> bool {
        label.contains(self.needle.as_str())
    }
}

/// Substring markers identifying reference and measurement rows.
///
/// The defaults, `"ef"` and `"easure"`, select `Ref`/`Reference` and
/// `Measure` labels. Sheets labeled in French (`Repere1`, `Mesure1`) need
/// their own markers, e.g. `RoleMarkers::new("Repere", "Mesure")`.
///
/// # Example
///
/// ```
/// use coord_types::{Role, RoleMarkers, RolePredicate};
///
/// let markers = RoleMarkers::default();
/// assert!(markers.predicate(Role::Reference).matches("Reference3"));
/// assert!(markers.predicate(Role::Measurement).matches("Measure12"));
/// assert!(!markers.predicate(Role::Measurement).matches("Mesure12"));
///
/// let french = RoleMarkers::new("Repere", "Mesure");
/// assert!(french.predicate(Role::Measurement).matches("Mesure12"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleMarkers {
    /// Substring marking reference rows.
    pub reference: String,
    /// Substring marking measurement rows.
    pub measurement: String,
}

impl Default for RoleMarkers {
    fn default() -> Self {
        Self {
            reference: "ef".to_string(),
            measurement: "easure".to_string(),
        }
    }
}

impl RoleMarkers {
    /// Creates markers from explicit substrings.
    #[must_use]
    pub fn new(reference: impl Into<String>, measurement: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            measurement: measurement.into(),
        }
    }

    /// Replaces the reference marker.
    #[must_use]
    pub fn with_reference(mut self, marker: impl Into<String>) -> Self {
        self.reference = marker.into();
        self
    }

    /// Replaces the measurement marker.
    #[must_use]
    pub fn with_measurement(mut self, marker: impl Into<String>) -> Self {
        self.measurement = marker.into();
        self
    }

    /// The marker for `role`.
    #[must_use]
    pub fn marker(&self, role: Role) -> &str {
        match role {
            Role::Reference => &self.reference,
            Role::Measurement => &self.measurement,
        }
    }

    /// The containment predicate for `role`.
    #[must_use]
    pub fn predicate(&self, role: Role) -> SubstringMatch {
        SubstringMatch::new(self.marker(role))
    }
}

/// Collects the points of all rows whose label satisfies `predicate`.
///
/// Row order is preserved. An empty result is not an error here; estimation
/// reports too few points later if the set is needed.
pub fn extract<P>(table: &Table, predicate: &P) -> PointSet
where
    P: RolePredicate + ?Sized,
{
    table
        .rows()
        .iter()
        .filter(|row| predicate.matches(&row.label))
        .map(crate::Row::point)
        .collect()
}

/// Collects the points of all rows playing `role` under `markers`.
pub fn extract_role(table: &Table, markers: &RoleMarkers, role: Role) -> PointSet {
    extract(table, &markers.predicate(role))
}
