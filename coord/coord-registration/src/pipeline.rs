//! Table-to-table registration.
//!
//! Wires extraction, estimation and application together for the usual
//! workflow: reference landmarks measured in both systems, measurement
//! points measured only in the source system.

use crate::{
    fit_with_params, label_predictions, PlanarTransform, PredictedRow, RegisterParams,
    RegistrationResult, Residuals, TransformKind,
};
use coord_types::{extract_role, PointSet, Role, Table};
use tracing::{info, warn};

/// Everything computed by [`register`].
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// The fitted transform.
    pub transform: PlanarTransform,
    /// Measurement points mapped into the destination system.
    pub predicted: PointSet,
    /// Source reference points mapped into the destination system.
    pub mapped_references: PointSet,
    /// Distances between `mapped_references` and the destination references.
    pub residuals: Residuals,
    /// `predicted`, labeled for the output table.
    pub rows: Vec<PredictedRow>,
}

/// Registers the measurement rows of `source_table` into the destination system.
///
/// Reference rows of `source_table` and `destination_table` are paired by
/// order and used to fit a transform of the requested kind; measurement rows
/// of `source_table` are then mapped through it.
///
/// # Errors
///
/// Any error of [`fit_with_params`], or [`RegistrationError::SingularMapping`]
/// if a reference or measurement maps to infinity under
/// [`RegisterParams::singular_tolerance`].
///
/// [`RegistrationError::SingularMapping`]: crate::RegistrationError::SingularMapping
///
/// # Example
///
/// ```
/// use coord_registration::{register, RegisterParams, TransformKind};
/// use coord_types::{Row, Table};
///
/// let source = Table::from_rows(vec![
///     Row::new("Ref1", 0.0, 0.0),
///     Row::new("Ref2", 1.0, 0.0),
///     Row::new("Ref3", 0.0, 1.0),
///     Row::new("Measure1", 5.0, 5.0),
///     Row::new("Measure2", 2.0, 3.0),
/// ]);
/// let destination = Table::from_rows(vec![
///     Row::new("Ref1", 1.0, 1.0),
///     Row::new("Ref2", 2.0, 1.0),
///     Row::new("Ref3", 1.0, 2.0),
/// ]);
///
/// let result = register(&source, &destination, TransformKind::Affine, &RegisterParams::default())
///     .unwrap();
///
/// assert_eq!(result.rows[0].to_string(), "Measure1,6.00,6.00");
/// assert_eq!(result.rows[1].to_string(), "Measure2,3.00,4.00");
/// ```
pub fn register(
    source_table: &Table,
    destination_table: &Table,
    kind: TransformKind,
    params: &RegisterParams,
) -> RegistrationResult<Registration> {
    let source_refs = extract_role(source_table, &params.markers, Role::Reference);
    let destination_refs = extract_role(destination_table, &params.markers, Role::Reference);
    let measurements = extract_role(source_table, &params.markers, Role::Measurement);

    if measurements.is_empty() {
        warn!(
            marker = params.markers.marker(Role::Measurement),
            "No measurement rows found in source table"
        );
    }

    let transform = fit_with_params(&source_refs, &destination_refs, kind, &params.fit)?;
    let tolerance = params.singular_tolerance;

    let predicted = transform.apply_with_tolerance(&measurements, tolerance)?;
    let mapped_references = transform.apply_with_tolerance(&source_refs, tolerance)?;
    let residuals = Residuals::from_distances(
        mapped_references
            .iter()
            .zip(destination_refs.iter())
            .map(|(m, d)| (m.coords - d.coords).norm())
            .collect(),
    );
    let rows = label_predictions(source_table, &predicted);

    info!(
        %kind,
        references = source_refs.len(),
        measurements = measurements.len(),
        rms = residuals.rms,
        max = residuals.max,
        "Registration complete"
    );

    Ok(Registration {
        transform,
        predicted,
        mapped_references,
        residuals,
        rows,
    })
}
