#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Canonical corner ordering of four unordered points.
pub mod corners;

/// Error types for the geometry module.
pub mod error;

/// Planar homography estimation from four correspondences.
pub mod homography;

/// Small fixed-size linear algebra helpers.
pub mod linalg;

/// Point and quadrilateral types.
pub mod point;

pub use crate::corners::{order_corners, order_points};
pub use crate::error::GeometryError;
pub use crate::homography::{homography_4pt2d, EstimateConfig, Homography};
pub use crate::point::{OrderedQuad, Point2d, Quad};
