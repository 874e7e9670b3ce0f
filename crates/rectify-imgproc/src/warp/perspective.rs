use crate::{
    interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode},
    parallel::{self, ExecutionStrategy},
};

use rectify_image::{Image, ImageDtype, ImageError};

#[rustfmt::skip]
fn determinant3x3(m: &[f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f64; 9]) -> [f64; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

/// Invert a row-major 3x3 perspective matrix.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if the matrix is singular or holds
/// non-finite entries.
pub fn inverse_perspective_matrix(m: &[f64; 9]) -> Result<[f64; 9], ImageError> {
    let det = determinant3x3(m);

    if det == 0.0 || !det.is_finite() {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let inv_det = 1.0 / det;
    Ok(adjugate3x3(m).map(|v| v * inv_det))
}

// back-projected coordinates this close to an edge of the sampling region are put on it
const EDGE_TOLERANCE: f64 = 1e-6;

fn snap_to_edges(v: f64, max: f64) -> f64 {
    if v.abs() < EDGE_TOLERANCE {
        0.0
    } else if (v - max).abs() < EDGE_TOLERANCE {
        max
    } else {
        v
    }
}

fn transform_point(x: f64, y: f64, m: &[f64; 9]) -> (f64, f64) {
    let w = m[6] * x + m[7] * y + m[8];
    let xt = (m[0] * x + m[1] * y + m[2]) / w;
    let yt = (m[3] * x + m[4] * y + m[5]) / w;
    (xt, yt)
}

/// Applies a perspective transformation to an image.
///
/// Each destination pixel `(x, y)` is mapped through the inverse of `m` to a source location
/// `(u, v)`. When `0 <= u < src_width - 1` and `0 <= v < src_height - 1` the source is sampled
/// with `interpolation`; every other destination pixel, including those whose mapping has a
/// vanishing divisor, is set to `T::default()`. Locations within `1e-6` of an edge of that
/// region are moved onto the edge before the test, so rounding noise in `m` neither drops the
/// first row and column nor admits the last ones.
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels). Every pixel is written.
/// * `m` - The 3x3 perspective transformation matrix src -> dst in row-major order.
/// * `interpolation` - The interpolation mode to use.
/// * `strategy` - How the destination rows are scheduled.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if `m` is not invertible.
///
/// # Example
///
/// ```
/// use rectify_image::{Image, ImageSize};
/// use rectify_imgproc::interpolation::InterpolationMode;
/// use rectify_imgproc::parallel::ExecutionStrategy;
/// use rectify_imgproc::warp::warp_perspective;
///
/// let src = Image::<f32, 1>::new(
///   ImageSize {
///     width: 4,
///     height: 5,
///   },
///   vec![0.0f32; 4 * 5]
/// ).unwrap();
///
/// let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
///
/// let mut dst = Image::<f32, 1>::from_size_val(
///   ImageSize {
///     width: 2,
///     height: 3,
///   },
///   0.0
/// ).unwrap();
///
/// warp_perspective(
///   &src,
///   &mut dst,
///   &m,
///   InterpolationMode::Bilinear,
///   ExecutionStrategy::Serial,
/// ).unwrap();
///
/// assert_eq!(dst.size().width, 2);
/// assert_eq!(dst.size().height, 3);
/// ```
pub fn warp_perspective<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f64; 9],
    interpolation: InterpolationMode,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let inv_m = inverse_perspective_matrix(m)?;

    // the last row and column are excluded so the 2x2 neighbourhood stays inside the image
    let (max_x, max_y) = (src.cols() as f64 - 1.0, src.rows() as f64 - 1.0);

    // source location of every destination pixel, NaN where nothing is sampled
    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, strategy, |x, y| {
        let (xsrc, ysrc) = transform_point(x as f64, y as f64, &inv_m);
        let (xsrc, ysrc) = (snap_to_edges(xsrc, max_x), snap_to_edges(ysrc, max_y));
        if xsrc >= 0.0 && xsrc < max_x && ysrc >= 0.0 && ysrc < max_y {
            (xsrc as f32, ysrc as f32)
        } else {
            (f32::NAN, f32::NAN)
        }
    })?;

    log::debug!(
        "warp_perspective: {} -> {} ({:?}, {:?})",
        src.size(),
        dst.size(),
        interpolation,
        strategy
    );

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, strategy, |&x, &y, dst_pixel| {
        if !x.is_nan() && !y.is_nan() {
            let pixel = interpolate_pixel(src, x, y, interpolation);
            dst_pixel
                .iter_mut()
                .zip(pixel.iter())
                .for_each(|(d, &p)| *d = T::from_f32(p));
        } else {
            dst_pixel.iter_mut().for_each(|d| *d = T::default());
        }
    });

    Ok(())
}
