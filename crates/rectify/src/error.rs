use rectify_geometry::GeometryError;
use rectify_image::ImageError;

/// An error type for the rectification pipeline.
///
/// No partial image is produced when any of these is returned.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RectifyError {
    /// The caller did not supply exactly four points.
    #[error("Exactly 4 points are required, got {0}")]
    InvalidPointCount(usize),

    /// The pixel buffer is not an 8-bit, 3-channel image of the declared size.
    #[error(
        "Unsupported image format: {channels} channels and {len} bytes, expected 3 channels and {expected} bytes"
    )]
    UnsupportedImageFormat {
        /// Declared number of channels.
        channels: usize,
        /// Length of the supplied buffer.
        len: usize,
        /// Length a 3-channel buffer of the declared size must have.
        expected: usize,
    },

    /// The points do not define a unique, invertible homography.
    #[error("Degenerate geometry. {0}")]
    DegenerateGeometry(GeometryError),

    /// Error from the image container or the warp.
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl From<GeometryError> for RectifyError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::InvalidPointCount(n) => RectifyError::InvalidPointCount(n),
            other => RectifyError::DegenerateGeometry(other),
        }
    }
}
