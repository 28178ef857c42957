//! Least-squares estimation of planar transforms from landmark pairs.
//!
//! Both kinds solve a linear system with two rows per correspondence:
//!
//! - **Affine**: `x' = a x + b y + c`, `y' = d x + e y + f` (6 unknowns).
//! - **Projective**: the homogeneous Direct Linear Transform, obtained by
//!   cross-multiplying `x' = (h11 x + h12 y + h13) / (h31 x + h32 y + h33)`
//!   and its `y'` counterpart (9 unknowns up to scale). The estimate is the
//!   right singular vector of the smallest singular value, rescaled so
//!   `h33 = 1` after denormalization.
//!
//! Points are Hartley-normalized before the solve (centroid at the origin,
//! mean distance `sqrt(2)`), the system is solved by SVD, and the result is
//! mapped back to the original coordinates. The singular values of the
//! normalized design matrix double as the degeneracy test. A homography must
//! also be nonsingular: with three collinear landmarks in either set the only
//! solutions collapse the plane, and those are rejected too.

use crate::{FitParams, PlanarTransform, RegistrationError, RegistrationResult, TransformKind};
use coord_types::{Point, PointSet};
use nalgebra::{DMatrix, DVector, Matrix3};
use tracing::{debug, warn};

/// Fits a transform of the given kind mapping `source` onto `destination`.
///
/// Points are paired by index. Uses [`FitParams::default`].
///
/// # Errors
///
/// - [`RegistrationError::MismatchedLength`] if the sets differ in length
/// - [`RegistrationError::InsufficientPoints`] if there are fewer than
///   [`TransformKind::min_points`] pairs
/// - [`RegistrationError::NonFiniteCoordinate`] for NaN or infinite input
/// - [`RegistrationError::DegenerateConfiguration`] for collinear or
///   coincident reference points
///
/// # Example
///
/// ```
/// use coord_registration::{fit, TransformKind};
/// use coord_types::{Point, PointSet};
///
/// let source = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
/// let destination = PointSet::from_coords(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)]);
///
/// let transform = fit(&source, &destination, TransformKind::Affine).unwrap();
/// let p = transform.transform_point(&Point::new(5.0, 5.0)).unwrap();
///
/// assert!((p.x - 6.0).abs() < 1e-9);
/// assert!((p.y - 6.0).abs() < 1e-9);
/// ```
pub fn fit(
    source: &PointSet,
    destination: &PointSet,
    kind: TransformKind,
) -> RegistrationResult<PlanarTransform> {
    fit_with_params(source, destination, kind, &FitParams::default())
}

/// Like [`fit`] with explicit estimation parameters.
///
/// # Errors
///
/// See [`fit`].
pub fn fit_with_params(
    source: &PointSet,
    destination: &PointSet,
    kind: TransformKind,
    params: &FitParams,
) -> RegistrationResult<PlanarTransform> {
    if source.len() != destination.len() {
        return Err(RegistrationError::MismatchedLength {
            source_len: source.len(),
            destination_len: destination.len(),
        });
    }
    if source.len() < kind.min_points() {
        return Err(RegistrationError::InsufficientPoints {
            kind,
            required: kind.min_points(),
            provided: source.len(),
        });
    }
    ensure_finite(source)?;
    ensure_finite(destination)?;

    debug!(%kind, pairs = source.len(), "Estimating planar transform");

    let src = Normalization::of(source);
    let dst = Normalization::of(destination);

    let (normalized, condition) = match kind {
        TransformKind::Affine => solve_affine(&src.points, &dst.points, params)?,
        TransformKind::Projective => solve_projective(&src.points, &dst.points, params)?,
    };

    let matrix = dst.inverse * normalized * src.forward;
    if !matrix.iter().all(|v| v.is_finite()) {
        return Err(RegistrationError::DegenerateConfiguration {
            reason: "solution is not finite".to_string(),
        });
    }

    let transform = match kind {
        TransformKind::Affine => PlanarTransform::from_affine_unchecked(matrix),
        TransformKind::Projective => PlanarTransform::projective(matrix).map_err(|_| {
            RegistrationError::DegenerateConfiguration {
                reason: "homography sends the source origin to infinity".to_string(),
            }
        })?,
    };

    debug!(%kind, condition, "Planar transform estimated");
    Ok(transform)
}

/// Similarity taking a point set to centroid zero and mean radius `sqrt(2)`.
struct Normalization {
    forward: Matrix3<f64>,
    inverse: Matrix3<f64>,
    points: Vec<Point>,
}

impl Normalization {
    fn of(set: &PointSet) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let n = set.len() as f64;
        let c = set.centroid().unwrap_or_else(Point::origin);
        let mean_dist = set.iter().map(|p| (p.coords - c.coords).norm()).sum::<f64>() / n;

        // Coincident points keep unit scale; the rank test rejects them.
        let s = if mean_dist > f64::EPSILON * (1.0 + c.coords.norm()) {
            std::f64::consts::SQRT_2 / mean_dist
        } else {
            1.0
        };

        #[rustfmt::skip]
        let forward = Matrix3::new(
            s,   0.0, -s * c.x,
            0.0, s,   -s * c.y,
            0.0, 0.0, 1.0,
        );
        #[rustfmt::skip]
        let inverse = Matrix3::new(
            1.0 / s, 0.0,     c.x,
            0.0,     1.0 / s, c.y,
            0.0,     0.0,     1.0,
        );
        let points = set
            .iter()
            .map(|p| Point::new(s * (p.x - c.x), s * (p.y - c.y)))
            .collect();

        Self {
            forward,
            inverse,
            points,
        }
    }
}

#[allow(clippy::similar_names)]
fn solve_affine(
    src: &[Point],
    dst: &[Point],
    params: &FitParams,
) -> RegistrationResult<(Matrix3<f64>, f64)> {
    let n = src.len();
    let mut design = DMatrix::<f64>::zeros(2 * n, 6);
    let mut target = DVector::<f64>::zeros(2 * n);

    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        design[(2 * i, 0)] = s.x;
        design[(2 * i, 1)] = s.y;
        design[(2 * i, 2)] = 1.0;
        target[2 * i] = d.x;

        design[(2 * i + 1, 3)] = s.x;
        design[(2 * i + 1, 4)] = s.y;
        design[(2 * i + 1, 5)] = 1.0;
        target[2 * i + 1] = d.y;
    }

    let (p, condition) = solve_least_squares(design, &target, params)?;

    #[rustfmt::skip]
    let matrix = Matrix3::new(
        p[0], p[1], p[2],
        p[3], p[4], p[5],
        0.0,  0.0,  1.0,
    );
    Ok((matrix, condition))
}

#[allow(clippy::similar_names)]
fn solve_projective(
    src: &[Point],
    dst: &[Point],
    params: &FitParams,
) -> RegistrationResult<(Matrix3<f64>, f64)> {
    let n = src.len();
    // At least 9 rows, so the thin SVD still yields the full 9x9 right basis
    let mut design = DMatrix::<f64>::zeros((2 * n).max(9), 9);

    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let (x, y) = (s.x, s.y);
        let (u, v) = (d.x, d.y);

        // h1 . (x, y, 1) - x' h3 . (x, y, 1) = 0
        design[(2 * i, 0)] = x;
        design[(2 * i, 1)] = y;
        design[(2 * i, 2)] = 1.0;
        design[(2 * i, 6)] = -u * x;
        design[(2 * i, 7)] = -u * y;
        design[(2 * i, 8)] = -u;

        // h2 . (x, y, 1) - y' h3 . (x, y, 1) = 0
        design[(2 * i + 1, 3)] = x;
        design[(2 * i + 1, 4)] = y;
        design[(2 * i + 1, 5)] = 1.0;
        design[(2 * i + 1, 6)] = -v * x;
        design[(2 * i + 1, 7)] = -v * y;
        design[(2 * i + 1, 8)] = -v;
    }

    let svd = design
        .try_svd(false, true, f64::EPSILON, 10_000)
        .ok_or(RegistrationError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(RegistrationError::SvdFailed)?;

    let sigma = &svd.singular_values;
    let mut order: Vec<usize> = (0..sigma.len()).collect();
    order.sort_by(|&a, &b| sigma[a].total_cmp(&sigma[b]));
    let (Some(&smallest), Some(&next), Some(&largest)) =
        (order.first(), order.get(1), order.last())
    else {
        return Err(RegistrationError::SvdFailed);
    };

    // The solution is the right singular vector of the smallest singular
    // value; it is unique only if the next one is clearly nonzero.
    let condition = if sigma[largest] > 0.0 {
        sigma[next] / sigma[largest]
    } else {
        0.0
    };
    check_condition(condition, params)?;

    let h = v_t.row(smallest);
    #[rustfmt::skip]
    let matrix = Matrix3::new(
        h[0], h[1], h[2],
        h[3], h[4], h[5],
        h[6], h[7], h[8],
    );

    // Three collinear landmarks in either set only admit a singular solution
    let det_ratio = matrix.determinant().abs() / matrix.norm().powi(3);
    if det_ratio.is_nan() || det_ratio < params.rank_tolerance {
        return Err(RegistrationError::DegenerateConfiguration {
            reason: format!(
                "homography is singular (normalized determinant {det_ratio:.3e}); \
                 reference points are nearly collinear in one of the point sets"
            ),
        });
    }

    Ok((matrix, condition))
}

/// Minimizes `|A p - b|` by SVD, rejecting rank-deficient `A`.
///
/// Returns the solution and the smallest-to-largest singular value ratio.
fn solve_least_squares(
    design: DMatrix<f64>,
    target: &DVector<f64>,
    params: &FitParams,
) -> RegistrationResult<(DVector<f64>, f64)> {
    let svd = design
        .try_svd(true, true, f64::EPSILON, 10_000)
        .ok_or(RegistrationError::SvdFailed)?;

    let s_max = svd.singular_values.max();
    let s_min = svd.singular_values.min();
    let condition = if s_max > 0.0 { s_min / s_max } else { 0.0 };
    check_condition(condition, params)?;

    let solution = svd
        .solve(target, 0.0)
        .map_err(|e| RegistrationError::DegenerateConfiguration {
            reason: e.to_string(),
        })?;

    Ok((solution, condition))
}

fn check_condition(condition: f64, params: &FitParams) -> RegistrationResult<()> {
    if condition.is_nan() || condition < params.rank_tolerance {
        return Err(RegistrationError::DegenerateConfiguration {
            reason: format!(
                "design matrix is rank-deficient (singular value ratio {condition:.3e}); \
                 reference points are collinear or coincident"
            ),
        });
    }
    if condition < params.warn_condition {
        warn!(
            condition,
            "Ill-conditioned landmark configuration; fitted transform may be inaccurate"
        );
    }
    Ok(())
}

fn ensure_finite(set: &PointSet) -> RegistrationResult<()> {
    match set
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        Some(index) => Err(RegistrationError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}
