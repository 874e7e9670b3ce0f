use rectify_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = u.floor() as usize;
    let iv = v.floor() as usize;

    let iu0 = iu.min(cols - 1);
    let iv0 = iv.min(rows - 1);

    let frac_u = u - iu as f32;
    let frac_v = v - iv as f32;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    // the last row and column reuse themselves as neighbour
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let data = image.as_slice();

    let p00 = &data[base00..base00 + C];
    let p01 = &data[base01..base01 + C];
    let p10 = &data[base10..base10 + C];
    let p11 = &data[base11..base11 + C];

    let mut pixel = [0.0; C];
    for k in 0..C {
        let (a, b, c, d): (f32, f32, f32, f32) =
            (p00[k].into(), p01[k].into(), p10[k].into(), p11[k].into());
        pixel[k] = a * w00 + b * w01 + c * w10 + d * w11;
    }

    pixel
}
