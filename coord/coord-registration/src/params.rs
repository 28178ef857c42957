//! Parameters for transform estimation and registration.

use crate::transform::DEFAULT_SINGULAR_TOLERANCE;
use coord_types::RoleMarkers;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for least-squares transform estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitParams {
    /// Smallest accepted ratio between the smallest and largest singular
    /// value of the normalized design matrix. Below it the landmark layout
    /// is reported as degenerate. Default: `1e-10`
    pub rank_tolerance: f64,

    /// Ratio below which a fit is logged as ill-conditioned but still
    /// returned. Default: `1e-6`
    pub warn_condition: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            rank_tolerance: 1e-10,
            warn_condition: 1e-6,
        }
    }
}

impl FitParams {
    /// Creates default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rank tolerance.
    #[must_use]
    pub const fn with_rank_tolerance(mut self, tolerance: f64) -> Self {
        self.rank_tolerance = tolerance;
        self
    }

    /// Sets the ill-conditioning warning threshold.
    #[must_use]
    pub const fn with_warn_condition(mut self, ratio: f64) -> Self {
        self.warn_condition = ratio;
        self
    }
}

/// Parameters for the table-to-table [`register`](crate::register) pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterParams {
    /// Label markers used to pick reference and measurement rows.
    pub markers: RoleMarkers,
    /// Estimation parameters.
    pub fit: FitParams,
    /// Smallest homogeneous scale accepted when mapping references and
    /// measurements through the fitted transform. Default: `1e-12`
    pub singular_tolerance: f64,
}

impl Default for RegisterParams {
    fn default() -> Self {
        Self {
            markers: RoleMarkers::default(),
            fit: FitParams::default(),
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }
}

impl RegisterParams {
    /// Creates default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the role markers.
    #[must_use]
    pub fn with_markers(mut self, markers: RoleMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Replaces the estimation parameters.
    #[must_use]
    pub fn with_fit(mut self, fit: FitParams) -> Self {
        self.fit = fit;
        self
    }

    /// Sets the perspective-divide tolerance.
    #[must_use]
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }
}
