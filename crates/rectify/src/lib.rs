#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use rectify_image as image;

#[doc(inline)]
pub use rectify_imgproc as imgproc;

#[doc(inline)]
pub use rectify_geometry as geometry;

#[doc(inline)]
pub use rectify_io as io;

/// Error type of the rectification pipeline.
pub mod error;

/// The order, estimate and warp pipeline.
pub mod pipeline;

pub use crate::error::RectifyError;
pub use crate::pipeline::{rectify, rectify_raw, rectify_with_config, RectifyConfig};
