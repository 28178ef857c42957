//! End-to-end registration tests.
//!
//! These exercise the public API the way a caller would: build point sets or
//! tables, fit, apply, and check the mapped coordinates.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use coord_registration::{
    apply, fit, fit_with_params, matrix, register, residuals, FitParams, PlanarTransform,
    RegisterParams, RegistrationError, TransformKind,
};
use coord_types::{Point, PointSet, RoleMarkers, Row, Table};
use nalgebra::{Matrix3, Vector3};

fn unit_square() -> PointSet {
    PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

// =============================================================================
// Point-set fitting
// =============================================================================

#[test]
fn affine_translation_predicts_measurement() {
    let src = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let dst = PointSet::from_coords(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)]);

    let t = fit(&src, &dst, TransformKind::Affine).unwrap();
    let out = apply(&t, &PointSet::from_coords(&[(5.0, 5.0)])).unwrap();

    let p = out.get(0).unwrap();
    assert_relative_eq!(p.x, 6.0, epsilon = 1e-9);
    assert_relative_eq!(p.y, 6.0, epsilon = 1e-9);
}

#[test]
fn square_to_trapezoid_homography() {
    let src = unit_square();
    let dst = PointSet::from_coords(&[(0.0, 0.0), (2.0, 0.0), (1.5, 1.0), (0.5, 1.0)]);

    let t = fit(&src, &dst, TransformKind::Projective).unwrap();
    let mapped = apply(&t, &src).unwrap();

    for (m, d) in mapped.iter().zip(dst.iter()) {
        assert_relative_eq!(m.x, d.x, epsilon = 1e-9);
        assert_relative_eq!(m.y, d.y, epsilon = 1e-9);
    }

    // The short edge is the far one, so the square's middle lands past mid-height
    let center = t.transform_point(&Point::new(0.5, 0.5)).unwrap();
    assert_relative_eq!(center.x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(center.y, 2.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn projective_reduces_to_affine_on_affine_data() {
    #[rustfmt::skip]
    let truth = Matrix3::new(
        1.2, -0.3, 40.0,
        0.25, 0.9, -15.0,
        0.0,  0.0,  1.0,
    );
    let src = PointSet::from_coords(&[
        (0.0, 0.0),
        (100.0, 0.0),
        (100.0, 80.0),
        (0.0, 80.0),
        (45.0, 30.0),
    ]);
    let dst: PointSet = src
        .iter()
        .map(|p| {
            let v = truth * Vector3::new(p.x, p.y, 1.0);
            Point::new(v.x, v.y)
        })
        .collect();

    let affine = fit(&src, &dst, TransformKind::Affine).unwrap();
    let projective = fit(&src, &dst, TransformKind::Projective).unwrap();

    let m = matrix(&projective);
    assert_relative_eq!(m[(2, 0)], 0.0, epsilon = 1e-9);
    assert_relative_eq!(m[(2, 1)], 0.0, epsilon = 1e-9);
    assert_relative_eq!(m, matrix(&affine), epsilon = 1e-8);
    assert_relative_eq!(matrix(&affine), truth, epsilon = 1e-8);
}

#[test]
fn identity_landmarks_give_identity() {
    let pts = PointSet::from_coords(&[(3.0, 4.0), (10.0, -2.0), (-6.0, 8.0), (1.0, 1.0)]);

    for kind in [TransformKind::Affine, TransformKind::Projective] {
        let t = fit(&pts, &pts, kind).unwrap();
        assert!(t.is_identity(1e-9), "{kind} fit is not the identity");
    }
}

#[test]
fn apply_preserves_order_under_permutation() {
    let src = unit_square();
    let dst = PointSet::from_coords(&[(0.0, 0.0), (3.0, 0.5), (2.5, 2.0), (0.2, 1.8)]);
    let t = fit(&src, &dst, TransformKind::Projective).unwrap();

    let batch = PointSet::from_coords(&[(0.1, 0.2), (0.7, 0.4), (0.3, 0.9)]);
    let reversed: PointSet = batch.iter().rev().copied().collect();

    let forward = t.apply(&batch).unwrap();
    let backward = t.apply(&reversed).unwrap();

    for (a, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(a, b);
    }
}

#[test]
fn residuals_report_least_squares_misfit() {
    let src = unit_square();
    let mut dst = unit_square().into_points();
    dst[2] = Point::new(1.1, 1.0);
    let dst = PointSet::new(dst);

    let t = fit(&src, &dst, TransformKind::Affine).unwrap();
    let r = residuals(&t, &src, &dst).unwrap();

    assert_eq!(r.distances.len(), 4);
    assert!(r.rms > 0.0);
    assert!(r.max >= r.rms);
}

#[test]
fn inverse_maps_back() {
    let src = unit_square();
    let dst = PointSet::from_coords(&[(10.0, 10.0), (14.0, 11.0), (13.0, 15.0), (9.5, 13.0)]);
    let t = fit(&src, &dst, TransformKind::Projective).unwrap();
    let inv = t.inverse().unwrap();

    let back = inv.apply(&dst).unwrap();
    for (b, s) in back.iter().zip(src.iter()) {
        assert_relative_eq!(b.x, s.x, epsilon = 1e-9);
        assert_relative_eq!(b.y, s.y, epsilon = 1e-9);
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn collinear_references_are_degenerate() {
    let src = PointSet::from_coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    let dst = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);

    let err = fit(&src, &dst, TransformKind::Affine).unwrap_err();

    assert!(matches!(err, RegistrationError::DegenerateConfiguration { .. }));
    assert!(err.to_string().contains("degenerate"));
}

#[test]
fn projective_rejects_three_collinear_landmarks() {
    let bent = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0)]);
    let square = unit_square();

    for (src, dst) in [(&bent, &square), (&square, &bent)] {
        assert!(matches!(
            fit(src, dst, TransformKind::Projective),
            Err(RegistrationError::DegenerateConfiguration { .. })
        ));
    }
}

#[test]
fn mismatched_lengths_are_rejected() {
    let src = unit_square();
    let dst = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);

    assert_eq!(
        fit(&src, &dst, TransformKind::Projective),
        Err(RegistrationError::MismatchedLength {
            source_len: 4,
            destination_len: 3
        })
    );
}

#[test]
fn too_few_points_for_projective() {
    let three = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);

    let err = fit(&three, &three, TransformKind::Projective).unwrap_err();

    assert_eq!(
        err.to_string(),
        "projective transform needs at least 4 point pairs, got 3"
    );
}

#[test]
fn point_on_vanishing_line_is_singular() {
    #[rustfmt::skip]
    let h = PlanarTransform::projective(Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.5, 1.0,
    ))
    .unwrap();

    let pts = PointSet::from_coords(&[(1.0, 1.0), (5.0, -2.0)]);
    assert_eq!(
        h.apply(&pts),
        Err(RegistrationError::SingularMapping { index: 1 })
    );
}

#[test]
fn strict_params_reject_near_collinear_layout() {
    let src = PointSet::from_coords(&[(0.0, 0.0), (50.0, 0.0), (100.0, 0.01)]);
    let dst = PointSet::from_coords(&[(0.0, 0.0), (50.0, 0.0), (100.0, 5.0)]);
    let strict = FitParams::default().with_rank_tolerance(1e-3);

    assert!(fit(&src, &dst, TransformKind::Affine).is_ok());
    assert!(fit_with_params(&src, &dst, TransformKind::Affine, &strict).is_err());
}

// =============================================================================
// Table pipeline
// =============================================================================

#[test]
fn register_french_sheet() {
    let source = Table::from_rows(vec![
        Row::new("Repere1", 0.0, 0.0),
        Row::new("Repere2", 100.0, 0.0),
        Row::new("Repere3", 100.0, 100.0),
        Row::new("Repere4", 0.0, 100.0),
        Row::new("Mesure1", 25.0, 50.0),
        Row::new("Mesure2", 75.0, 10.0),
    ]);
    // Scale by 2, shift by (500, 300)
    let destination = Table::from_rows(vec![
        Row::new("Repere1", 500.0, 300.0),
        Row::new("Repere2", 700.0, 300.0),
        Row::new("Repere3", 700.0, 500.0),
        Row::new("Repere4", 500.0, 500.0),
    ]);
    let params = RegisterParams::new().with_markers(RoleMarkers::new("Repere", "Mesure"));

    let result = register(&source, &destination, TransformKind::default(), &params).unwrap();

    let lines: Vec<String> = result.rows.iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["Mesure1,550.00,400.00", "Mesure2,650.00,320.00"]);
    assert!(result.residuals.max < 1e-9);
}

#[test]
fn register_rejects_collinear_destination_references() {
    let source = Table::from_rows(vec![
        Row::new("Ref1", 0.0, 0.0),
        Row::new("Ref2", 10.0, 0.0),
        Row::new("Ref3", 10.0, 10.0),
        Row::new("Ref4", 0.0, 10.0),
        Row::new("Measure1", 5.0, 5.0),
    ]);
    let destination = Table::from_rows(vec![
        Row::new("Ref1", 0.0, 0.0),
        Row::new("Ref2", 10.0, 0.0),
        Row::new("Ref3", 20.0, 0.0),
        Row::new("Ref4", 0.0, 10.0),
    ]);

    let result = register(
        &source,
        &destination,
        TransformKind::Projective,
        &RegisterParams::default(),
    );

    assert!(matches!(
        result,
        Err(RegistrationError::DegenerateConfiguration { .. })
    ));
}

#[test]
fn register_reports_reference_count_mismatch() {
    let source = Table::from_rows(vec![
        Row::new("Ref1", 0.0, 0.0),
        Row::new("Ref2", 1.0, 0.0),
        Row::new("Ref3", 0.0, 1.0),
        Row::new("Measure1", 0.5, 0.5),
    ]);
    let destination = Table::from_rows(vec![
        Row::new("Ref1", 0.0, 0.0),
        Row::new("Ref2", 1.0, 0.0),
    ]);

    let result = register(
        &source,
        &destination,
        TransformKind::Affine,
        &RegisterParams::default(),
    );

    assert!(matches!(
        result,
        Err(RegistrationError::MismatchedLength {
            source_len: 3,
            destination_len: 2
        })
    ));
}
