#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the io module.
pub mod error;

/// High-level read, write, decode and encode functions.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{
    decode_image_rgb8, encode_image_jpeg, read_image_any_rgb8, write_image_any,
    DEFAULT_JPEG_QUALITY,
};
