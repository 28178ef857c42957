//! Residuals between mapped and measured reference points.

use crate::{PlanarTransform, RegistrationError, RegistrationResult};
use coord_types::PointSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-landmark alignment error after applying a transform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Residuals {
    /// Euclidean distance between each mapped source point and its destination.
    pub distances: Vec<f64>,
    /// Root mean square of `distances`.
    pub rms: f64,
    /// Largest entry of `distances`.
    pub max: f64,
}

impl Residuals {
    /// Builds residuals from raw distances.
    #[must_use]
    pub fn from_distances(distances: Vec<f64>) -> Self {
        if distances.is_empty() {
            return Self {
                distances,
                rms: 0.0,
                max: 0.0,
            };
        }
        let sum_sq: f64 = distances.iter().map(|d| d * d).sum();
        #[allow(clippy::cast_precision_loss)]
        let rms = (sum_sq / distances.len() as f64).sqrt();
        let max = distances.iter().copied().fold(0.0, f64::max);
        Self {
            distances,
            rms,
            max,
        }
    }

    /// Index and distance of the worst-fitting landmark.
    #[must_use]
    pub fn worst(&self) -> Option<(usize, f64)> {
        self.distances
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Maps `source` through `transform` and measures the distance to `destination`.
///
/// # Errors
///
/// Returns [`RegistrationError::MismatchedLength`] if the sets differ in
/// length, or [`RegistrationError::SingularMapping`] if a source point maps
/// to infinity.
///
/// # Example
///
/// ```
/// use coord_registration::{fit, residuals, TransformKind};
/// use coord_types::PointSet;
///
/// let src = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
/// let dst = PointSet::from_coords(&[(3.0, 3.0), (4.0, 3.0), (3.0, 4.0)]);
/// let t = fit(&src, &dst, TransformKind::Affine).unwrap();
///
/// let r = residuals(&t, &src, &dst).unwrap();
/// assert!(r.rms < 1e-9);
/// ```
pub fn residuals(
    transform: &PlanarTransform,
    source: &PointSet,
    destination: &PointSet,
) -> RegistrationResult<Residuals> {
    if source.len() != destination.len() {
        return Err(RegistrationError::MismatchedLength {
            source_len: source.len(),
            destination_len: destination.len(),
        });
    }
    let mapped = transform.apply(source)?;
    let distances = mapped
        .iter()
        .zip(destination.iter())
        .map(|(m, d)| (m.coords - d.coords).norm())
        .collect();
    Ok(Residuals::from_distances(distances))
}
