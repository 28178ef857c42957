//! Core landmark types for planar coordinate registration.
//!
//! This crate provides the foundational types shared by the registration
//! crates:
//!
//! - [`Point`] - A planar coordinate (`nalgebra::Point2<f64>`)
//! - [`PointSet`] - An ordered, immutable sequence of points
//! - [`Row`] and [`Table`] - Labeled landmark rows as supplied by a spreadsheet
//!   or CSV reader
//! - [`Role`], [`RoleMarkers`] and [`RolePredicate`] - Label-based selection of
//!   reference and measurement rows
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no I/O. Reading and writing tables is left to
//! the caller; this crate only describes what an in-memory table looks like.
//!
//! # Roles
//!
//! Each row of a table carries a free-text `Type` label. Rows whose label
//! contains the reference marker are landmarks (known in both coordinate
//! systems); rows whose label contains the measurement marker are points to be
//! predicted. Matching is case-sensitive substring containment, and the
//! markers themselves are configuration ([`RoleMarkers`]).
//!
//! # Example
//!
//! ```
//! use coord_types::{Role, RoleMarkers, Row, Table, extract_role};
//!
//! let table = Table::from_rows(vec![
//!     Row::new("Ref1", 0.0, 0.0),
//!     Row::new("Ref2", 1.0, 0.0),
//!     Row::new("Reference3", 0.0, 1.0),
//!     Row::new("Measure1", 5.0, 5.0),
//! ]);
//!
//! let markers = RoleMarkers::default();
//! let references = extract_role(&table, &markers, Role::Reference);
//! let measurements = extract_role(&table, &markers, Role::Measurement);
//!
//! assert_eq!(references.len(), 3);
//! assert_eq!(measurements.len(), 1);
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod point_set;
mod role;
mod table;

pub use point_set::PointSet;
pub use role::{extract, extract_role, Role, RoleMarkers, RolePredicate, SubstringMatch};
pub use table::{Row, Table};

/// A planar coordinate.
///
/// Equality is coordinate equality; a point carries no identity of its own.
pub type Point = nalgebra::Point2<f64>;
