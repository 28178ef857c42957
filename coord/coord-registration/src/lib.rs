//! Planar coordinate registration from paired landmarks.
//!
//! This crate estimates a 2D transform that carries points measured in one
//! coordinate system into another, given landmarks measured in both:
//! - **Affine** - 6 parameters, straight lines and parallelism preserved
//! - **Projective** - 8 parameters (homography), straight lines preserved
//!
//! Both are fitted by linear least squares on Hartley-normalized points and
//! returned as a 3x3 homogeneous matrix.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no I/O and no global state. Diagnostics are
//! emitted as `tracing` events; installing a subscriber is up to the caller.
//!
//! # Quick Start
//!
//! ## Fitting point sets
//!
//! ```
//! use coord_registration::{fit, TransformKind};
//! use coord_types::PointSet;
//!
//! let source = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
//! let destination = PointSet::from_coords(&[(0.0, 0.0), (2.0, 0.0), (1.5, 1.0), (0.5, 1.0)]);
//!
//! let transform = fit(&source, &destination, TransformKind::Projective).unwrap();
//! let mapped = transform.apply(&source).unwrap();
//!
//! for (m, d) in mapped.iter().zip(destination.iter()) {
//!     assert!((m.coords - d.coords).norm() < 1e-9);
//! }
//! ```
//!
//! ## Registering tables
//!
//! Rows are split into references and measurements by their labels:
//!
//! ```
//! use coord_registration::{register, RegisterParams, TransformKind};
//! use coord_types::{Row, Table};
//!
//! let source = Table::from_rows(vec![
//!     Row::new("Ref1", 0.0, 0.0),
//!     Row::new("Ref2", 1.0, 0.0),
//!     Row::new("Ref3", 0.0, 1.0),
//!     Row::new("Measure1", 5.0, 5.0),
//! ]);
//! let destination = Table::from_rows(vec![
//!     Row::new("Ref1", 1.0, 1.0),
//!     Row::new("Ref2", 2.0, 1.0),
//!     Row::new("Ref3", 1.0, 2.0),
//! ]);
//!
//! let result = register(&source, &destination, TransformKind::Affine, &RegisterParams::default())
//!     .unwrap();
//! let p = result.predicted.get(0).unwrap();
//! assert!((p.x - 6.0).abs() < 1e-9 && (p.y - 6.0).abs() < 1e-9);
//! ```
//!
//! # Choosing a kind
//!
//! | Landmarks | Distortion | Kind |
//! |-----------|------------|------|
//! | 3 or more | shift, rotation, scale, shear | `Affine` |
//! | 4 or more | perspective (tilted camera, scanned plan) | `Projective` |
//!
//! Extra landmarks are used in the least-squares sense; [`residuals`] reports
//! how well each one fits.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod estimate;
mod output;
mod params;
mod pipeline;
mod residual;
mod transform;

pub use error::{RegistrationError, RegistrationResult};
pub use estimate::{fit, fit_with_params};
pub use output::{label_predictions, PredictedRow};
pub use params::{FitParams, RegisterParams};
pub use pipeline::{register, Registration};
pub use residual::{residuals, Residuals};
pub use transform::{apply, matrix, PlanarTransform, TransformKind, DEFAULT_SINGULAR_TOLERANCE};
