//! Pixel interpolation methods for image transformations.
//!
//! This module provides the interpolation kernels used when resampling images through a
//! geometric transformation.
//!
//! # Interpolation Modes
//!
//! - **Bilinear**: Weighted blend of the four neighbouring pixels
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)

mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating the coordinate maps used in image warping.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
