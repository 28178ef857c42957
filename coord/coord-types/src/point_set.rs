//! Ordered planar point sets.

use crate::Point;
use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered, immutable sequence of planar points.
///
/// Point sets are built once (by [`extract`](crate::extract), [`PointSet::new`]
/// or by collecting an iterator) and never mutated afterwards. Two point sets
/// used together for estimation are paired by index: point `i` of the source
/// corresponds to point `i` of the destination.
///
/// # Example
///
/// ```
/// use coord_types::{Point, PointSet};
///
/// let set: PointSet = [(0.0, 0.0), (2.0, 0.0), (1.0, 3.0)]
///     .into_iter()
///     .map(|(x, y)| Point::new(x, y))
///     .collect();
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.get(2), Some(&Point::new(1.0, 3.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Creates a point set from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Creates a point set from raw `(x, y)` pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use coord_types::PointSet;
    ///
    /// let set = PointSet::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set holds no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Borrow the points as a slice.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the point at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Arithmetic mean of the points, or `None` for an empty set.
    ///
    /// # Example
    ///
    /// ```
    /// use coord_types::{Point, PointSet};
    ///
    /// let set = PointSet::from_coords(&[(0.0, 0.0), (2.0, 0.0), (1.0, 3.0)]);
    /// assert_eq!(set.centroid(), Some(Point::new(1.0, 1.0)));
    /// ```
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.points.len() as f64;
        let sum: Vector2<f64> = self.points.iter().map(|p| p.coords).sum();
        Some(Point::from(sum / n))
    }

    /// Consume the set, returning the underlying points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for PointSet {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
