//! Perspective warping of images.
//!
//! The warp is computed by inverse mapping: every destination pixel is mapped back through
//! the inverse of the homography and the source is sampled at that location.
//!
//! # Examples
//!
//! Shifting an image one pixel to the right:
//!
//! ```no_run
//! use rectify_image::{Image, ImageSize};
//! use rectify_imgproc::{interpolation::InterpolationMode, parallel::ExecutionStrategy};
//! use rectify_imgproc::warp::warp_perspective;
//!
//! let size = ImageSize { width: 64, height: 48 };
//! let src = Image::<u8, 3>::from_size_val(size, 128).unwrap();
//! let mut dst = Image::<u8, 3>::from_size_val(size, 0).unwrap();
//!
//! let m = [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
//! warp_perspective(
//!     &src,
//!     &mut dst,
//!     &m,
//!     InterpolationMode::Bilinear,
//!     ExecutionStrategy::default(),
//! )
//! .unwrap();
//! ```

mod perspective;

pub use perspective::{inverse_perspective_matrix, warp_perspective};
