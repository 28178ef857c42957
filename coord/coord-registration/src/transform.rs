//! Planar transform type for registration results.

use crate::{RegistrationError, RegistrationResult};
use coord_types::{Point, PointSet};
use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest homogeneous scale accepted by a perspective divide.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

/// The family of planar transform to estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransformKind {
    /// Linear map plus translation, 6 degrees of freedom.
    Affine,
    /// Homography, 8 degrees of freedom.
    #[default]
    Projective,
}

impl TransformKind {
    /// Minimum number of correspondences for a unique fit.
    #[must_use]
    pub const fn min_points(self) -> usize {
        match self {
            Self::Affine => 3,
            Self::Projective => 4,
        }
    }

    /// Number of free parameters solved for.
    #[must_use]
    pub const fn parameter_count(self) -> usize {
        match self {
            Self::Affine => 6,
            Self::Projective => 8,
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affine => f.write_str("affine"),
            Self::Projective => f.write_str("projective"),
        }
    }
}

impl FromStr for TransformKind {
    type Err = RegistrationError;

    /// Parses `affine` or `projective` (also `proj`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "affine" => Ok(Self::Affine),
            "projective" | "proj" | "homography" => Ok(Self::Projective),
            other => Err(RegistrationError::InvalidParameter(format!(
                "unknown transform kind '{other}'"
            ))),
        }
    }
}

/// An estimated planar transform: a kind tag plus a 3x3 homogeneous matrix.
///
/// Affine transforms always have the bottom row `[0, 0, 1]`. Projective
/// transforms are normalized so the bottom-right entry is `1`.
///
/// A transform is an immutable value. It is normally produced by
/// [`fit`](crate::fit); the direct constructors exist for callers that
/// already hold a matrix.
///
/// # Example
///
/// ```
/// use coord_registration::PlanarTransform;
/// use coord_types::Point;
/// use nalgebra::Matrix3;
///
/// #[rustfmt::skip]
/// let shift = PlanarTransform::affine(Matrix3::new(
///     1.0, 0.0, 2.0,
///     0.0, 1.0, 3.0,
///     0.0, 0.0, 1.0,
/// )).unwrap();
///
/// let p = shift.transform_point(&Point::new(1.0, 1.0)).unwrap();
/// assert_eq!(p, Point::new(3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanarTransform {
    kind: TransformKind,
    matrix: Matrix3<f64>,
}

impl PlanarTransform {
    /// Builds an affine transform from a homogeneous matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidMatrix`] if the matrix has a
    /// non-finite entry or its bottom row is not `[0, 0, 1]`.
    pub fn affine(matrix: Matrix3<f64>) -> RegistrationResult<Self> {
        ensure_finite(&matrix)?;
        let bottom_ok = matrix[(2, 0)].abs() <= f64::EPSILON
            && matrix[(2, 1)].abs() <= f64::EPSILON
            && (matrix[(2, 2)] - 1.0).abs() <= f64::EPSILON;
        if !bottom_ok {
            return Err(RegistrationError::InvalidMatrix(format!(
                "affine bottom row must be [0, 0, 1], got [{}, {}, {}]",
                matrix[(2, 0)],
                matrix[(2, 1)],
                matrix[(2, 2)]
            )));
        }
        Ok(Self::from_affine_unchecked(matrix))
    }

    /// Builds a projective transform, rescaling so the bottom-right entry is `1`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidMatrix`] if the matrix has a
    /// non-finite entry or a (near-)zero bottom-right entry.
    pub fn projective(matrix: Matrix3<f64>) -> RegistrationResult<Self> {
        ensure_finite(&matrix)?;
        let scale = matrix[(2, 2)];
        if scale.abs() < f64::EPSILON * matrix.amax().max(1.0) {
            return Err(RegistrationError::InvalidMatrix(
                "projective matrix has a zero bottom-right entry".to_string(),
            ));
        }
        let mut matrix = matrix / scale;
        matrix[(2, 2)] = 1.0;
        Ok(Self {
            kind: TransformKind::Projective,
            matrix,
        })
    }

    /// The identity transform of the given kind.
    #[must_use]
    pub fn identity(kind: TransformKind) -> Self {
        Self {
            kind,
            matrix: Matrix3::identity(),
        }
    }

    /// Wraps an affine matrix, forcing the bottom row to `[0, 0, 1]`.
    pub(crate) fn from_affine_unchecked(mut matrix: Matrix3<f64>) -> Self {
        matrix[(2, 0)] = 0.0;
        matrix[(2, 1)] = 0.0;
        matrix[(2, 2)] = 1.0;
        Self {
            kind: TransformKind::Affine,
            matrix,
        }
    }

    /// The transform kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TransformKind {
        self.kind
    }

    /// The 3x3 homogeneous matrix.
    #[inline]
    #[must_use]
    pub const fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Maps a single point.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::SingularMapping`] (index `0`) if a
    /// projective transform sends the point to infinity.
    pub fn transform_point(&self, point: &Point) -> RegistrationResult<Point> {
        self.map_point(point, DEFAULT_SINGULAR_TOLERANCE)
            .ok_or(RegistrationError::SingularMapping { index: 0 })
    }

    /// Maps every point of `points`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::SingularMapping`] with the index of the
    /// first point a projective transform sends to infinity.
    pub fn apply(&self, points: &PointSet) -> RegistrationResult<PointSet> {
        self.apply_with_tolerance(points, DEFAULT_SINGULAR_TOLERANCE)
    }

    /// Like [`apply`](Self::apply) with an explicit perspective-divide tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::SingularMapping`] if `|w| < tolerance` for
    /// some point.
    pub fn apply_with_tolerance(
        &self,
        points: &PointSet,
        tolerance: f64,
    ) -> RegistrationResult<PointSet> {
        points
            .iter()
            .enumerate()
            .map(|(index, p)| {
                self.map_point(p, tolerance)
                    .ok_or(RegistrationError::SingularMapping { index })
            })
            .collect::<RegistrationResult<Vec<Point>>>()
            .map(PointSet::new)
    }

    fn map_point(&self, point: &Point, tolerance: f64) -> Option<Point> {
        let h = self.matrix * Vector3::new(point.x, point.y, 1.0);
        match self.kind {
            TransformKind::Affine => Some(Point::new(h.x, h.y)),
            TransformKind::Projective => {
                if h.z.abs() < tolerance {
                    None
                } else {
                    Some(Point::new(h.x / h.z, h.y / h.z))
                }
            }
        }
    }

    /// Computes the inverse transform. Affine stays affine.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotInvertible`] if the matrix is singular,
    /// or [`RegistrationError::InvalidMatrix`] if a projective inverse cannot
    /// be normalized.
    pub fn inverse(&self) -> RegistrationResult<Self> {
        let inv = self
            .matrix
            .try_inverse()
            .ok_or(RegistrationError::NotInvertible)?;
        match self.kind {
            TransformKind::Affine => Ok(Self::from_affine_unchecked(inv)),
            TransformKind::Projective => Self::projective(inv),
        }
    }

    /// Composes this transform with another (`self * other`).
    ///
    /// The result applies `other` first, then `self`. Two affine transforms
    /// compose to an affine one; anything else is projective.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidMatrix`] if the projective product
    /// cannot be normalized.
    pub fn compose(&self, other: &Self) -> RegistrationResult<Self> {
        let product = self.matrix * other.matrix;
        match (self.kind, other.kind) {
            (TransformKind::Affine, TransformKind::Affine) => {
                Ok(Self::from_affine_unchecked(product))
            }
            _ => Self::projective(product),
        }
    }

    /// Returns true if every matrix entry is within `epsilon` of the identity.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        (self.matrix - Matrix3::identity()).amax() < epsilon
    }
}

/// Read-only matrix accessor.
#[must_use]
pub fn matrix(transform: &PlanarTransform) -> Matrix3<f64> {
    *transform.matrix()
}

/// Maps a point set through `transform`.
///
/// # Errors
///
/// See [`PlanarTransform::apply`].
pub fn apply(transform: &PlanarTransform, points: &PointSet) -> RegistrationResult<PointSet> {
    transform.apply(points)
}

fn ensure_finite(matrix: &Matrix3<f64>) -> RegistrationResult<()> {
    if matrix.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RegistrationError::InvalidMatrix(
            "matrix has a non-finite entry".to_string(),
        ))
    }
}
