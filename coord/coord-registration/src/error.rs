//! Error types for planar registration.

use crate::TransformKind;
use thiserror::Error;

/// Errors that can occur while estimating or applying a planar transform.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// Fewer correspondences than the transform kind requires.
    #[error("{kind} transform needs at least {required} point pairs, got {provided}")]
    InsufficientPoints {
        /// Requested transform kind.
        kind: TransformKind,
        /// Minimum number of correspondences.
        required: usize,
        /// Number of correspondences supplied.
        provided: usize,
    },

    /// Source and destination point sets have different lengths.
    #[error("source has {source_len} points but destination has {destination_len}")]
    MismatchedLength {
        /// Number of source points.
        source_len: usize,
        /// Number of destination points.
        destination_len: usize,
    },

    /// Reference points are collinear or coincident.
    #[error("degenerate landmark configuration: {reason}")]
    DegenerateConfiguration {
        /// What made the linear system rank-deficient.
        reason: String,
    },

    /// Perspective divide by a (near-)zero homogeneous component.
    #[error("point {index} maps to infinity (homogeneous scale is zero)")]
    SingularMapping {
        /// Index of the offending point in the input batch.
        index: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// SVD did not converge.
    #[error("SVD computation failed during transform estimation")]
    SvdFailed,

    /// A matrix handed to a direct constructor is not a valid transform.
    #[error("invalid transform matrix: {0}")]
    InvalidMatrix(String),

    /// The transform matrix has no inverse.
    #[error("transform matrix is not invertible")]
    NotInvertible,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;
