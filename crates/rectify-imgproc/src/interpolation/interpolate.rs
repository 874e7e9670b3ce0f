use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use rectify_image::{Image, ImageDtype};

/// Interpolation mode for the warp operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// PRECONDITION: `0 <= u < cols` and `0 <= v < rows`.
///
/// # Returns
///
/// The interpolated pixel values, one per channel.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> [f32; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}
