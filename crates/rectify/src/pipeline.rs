use std::time::Instant;

use rectify_geometry::{order_points, EstimateConfig, Homography, OrderedQuad, Point2d};
use rectify_image::{Image, ImageSize};
use rectify_imgproc::{
    interpolation::InterpolationMode, parallel::ExecutionStrategy, warp::warp_perspective,
};

use crate::error::RectifyError;

/// Parameters of a rectification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectifyConfig {
    /// Kernel used to sample the source image.
    pub interpolation: InterpolationMode,
    /// How the output rows are scheduled.
    pub strategy: ExecutionStrategy,
    /// Relative tolerance under which three corners count as collinear.
    pub collinearity_tolerance: f64,
    /// Relative tolerance under which the homography divisor counts as zero.
    pub normalization_tolerance: f64,
}

impl Default for RectifyConfig {
    fn default() -> Self {
        let estimate = EstimateConfig::default();
        Self {
            interpolation: InterpolationMode::Bilinear,
            strategy: ExecutionStrategy::ParallelRows,
            collinearity_tolerance: estimate.collinearity_tolerance,
            normalization_tolerance: estimate.normalization_tolerance,
        }
    }
}

impl RectifyConfig {
    fn estimate_config(&self) -> EstimateConfig {
        EstimateConfig {
            collinearity_tolerance: self.collinearity_tolerance,
            normalization_tolerance: self.normalization_tolerance,
        }
    }
}

/// Rectify the quadrilateral spanned by `points` into an image of the same size.
///
/// The points may be given in any order. They are labeled top-left, top-right,
/// bottom-right and bottom-left and mapped onto the corners `(0, 0)`, `(W - 1, 0)`,
/// `(W - 1, H - 1)` and `(0, H - 1)` of the output.
///
/// # Example
///
/// ```
/// use rectify::{image::Image, geometry::Point2d, rectify};
///
/// let image = Image::<u8, 3>::from_size_val([100, 100].into(), 200).unwrap();
/// let points = [
///     Point2d::new(10.0, 10.0),
///     Point2d::new(90.0, 12.0),
///     Point2d::new(88.0, 90.0),
///     Point2d::new(12.0, 88.0),
/// ];
///
/// let output = rectify(&image, &points).unwrap();
/// assert_eq!(output.size(), image.size());
/// ```
pub fn rectify(image: &Image<u8, 3>, points: &[Point2d]) -> Result<Image<u8, 3>, RectifyError> {
    rectify_with_config(image, points, &RectifyConfig::default())
}

/// Rectify with explicit parameters. See [`rectify`].
///
/// # Errors
///
/// * [`RectifyError::InvalidPointCount`] unless exactly four points are given.
/// * [`RectifyError::DegenerateGeometry`] if the points, or the output rectangle, do not
///   admit a unique invertible homography.
pub fn rectify_with_config(
    image: &Image<u8, 3>,
    points: &[Point2d],
    config: &RectifyConfig,
) -> Result<Image<u8, 3>, RectifyError> {
    if points.len() != 4 {
        return Err(RectifyError::InvalidPointCount(points.len()));
    }

    let start = Instant::now();

    let src = order_points(points)?;
    let dst = OrderedQuad::image_bounds(image.width(), image.height());

    let homography = Homography::estimate_with_config(&src, &dst, &config.estimate_config())?;
    let estimated = start.elapsed();

    let mut output = Image::from_size_val(image.size(), 0u8)?;
    warp_perspective(
        image,
        &mut output,
        &homography.to_flat_array(),
        config.interpolation,
        config.strategy,
    )?;

    log::debug!(
        "rectified {} image: estimate {:?}, warp {:?}",
        image.size(),
        estimated,
        start.elapsed() - estimated
    );

    Ok(output)
}

/// Rectify a raw interleaved RGB buffer.
///
/// # Arguments
///
/// * `data` - Row-major interleaved pixels of `size`.
/// * `size` - The image size.
/// * `channels` - Number of interleaved channels in `data`; only 3 is supported.
/// * `points` - The four corner coordinates `[x, y]` in any order.
///
/// # Returns
///
/// The rectified pixels with the same size and layout as the input.
pub fn rectify_raw(
    data: &[u8],
    size: ImageSize,
    channels: usize,
    points: &[[f64; 2]],
) -> Result<Vec<u8>, RectifyError> {
    let expected = size.area() * 3;
    if channels != 3 || data.len() != expected {
        return Err(RectifyError::UnsupportedImageFormat {
            channels,
            len: data.len(),
            expected,
        });
    }

    let image = Image::<u8, 3>::new(size, data.to_vec())?;
    let points = points.iter().copied().map(Point2d::from).collect::<Vec<_>>();

    Ok(rectify(&image, &points)?.into_vec())
}
