use crate::{
    error::GeometryError,
    linalg,
    point::{OrderedQuad, Point2d},
};

// smallest accepted ratio between the last and the first singular value of the DLT system
const RANK_TOLERANCE: f64 = 1e-12;

// smallest accepted |det| of the normalized homography
const DETERMINANT_TOLERANCE: f64 = 1e-12;

// every triple out of four points
const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// Thresholds used to reject degenerate correspondences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateConfig {
    /// Three points are collinear when twice the area of their triangle is at most this
    /// fraction of the squared longest side.
    pub collinearity_tolerance: f64,
    /// The homography is rejected when `|H[2][2]|` is at most this fraction of its largest
    /// absolute entry.
    pub normalization_tolerance: f64,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            collinearity_tolerance: 1e-6,
            normalization_tolerance: 1e-12,
        }
    }
}

fn check_collinear(
    points: &[[f64; 2]; 4],
    set: &'static str,
    tolerance: f64,
) -> Result<(), GeometryError> {
    for indices in TRIPLES {
        let [a, b, c] = indices.map(|i| points[i]);
        let (abx, aby) = (b[0] - a[0], b[1] - a[1]);
        let (acx, acy) = (c[0] - a[0], c[1] - a[1]);
        let (bcx, bcy) = (c[0] - b[0], c[1] - b[1]);

        let cross = abx * acy - aby * acx;
        let longest = (abx * abx + aby * aby)
            .max(acx * acx + acy * acy)
            .max(bcx * bcx + bcy * bcy);

        if cross.abs() <= tolerance * longest {
            return Err(GeometryError::CollinearPoints { set, indices });
        }
    }
    Ok(())
}

/// Compute the homography matrix from four 2d point correspondences.
///
/// Solves the direct linear transform: every correspondence `(x, y) -> (u, v)` contributes
/// the rows `[-x, -y, -1, 0, 0, 0, ux, uy, u]` and `[0, 0, 0, -x, -y, -1, vx, vy, v]` to an
/// 8x9 system whose null space is the flattened homography. The points are Hartley-normalized
/// before building the system and the solution is mapped back afterwards.
///
/// * `src` - The source 2d points with shape (4, 2).
/// * `dst` - The destination 2d points with shape (4, 2).
/// * `config` - The degeneracy thresholds.
///
/// # Returns
///
/// The homography from src to dst with shape (3, 3), scaled so that `H[2][2] == 1`.
///
/// # Errors
///
/// Fails with a [`GeometryError`] when three points of either set are collinear, when the
/// system has no unique solution or when the solution cannot be normalized or inverted.
pub fn homography_4pt2d(
    src: &[[f64; 2]; 4],
    dst: &[[f64; 2]; 4],
    config: &EstimateConfig,
) -> Result<[[f64; 3]; 3], GeometryError> {
    check_collinear(src, "source", config.collinearity_tolerance)?;
    check_collinear(dst, "destination", config.collinearity_tolerance)?;

    let (src_n, t_src, _) = linalg::normalize_points_2d(src);
    let (dst_n, _, t_dst_inv) = linalg::normalize_points_2d(dst);

    // construct matrix A
    let mut rows = [[0.0f64; 9]; 8];
    for i in 0..4 {
        let [x, y] = src_n[i];
        let [u, v] = dst_n[i];
        rows[2 * i] = [-x, -y, -1.0, 0.0, 0.0, 0.0, u * x, u * y, u];
        rows[2 * i + 1] = [0.0, 0.0, 0.0, -x, -y, -1.0, v * x, v * y, v];
    }
    let mat_a = faer::Mat::<f64>::from_fn(8, 9, |i, j| rows[i][j]);

    let svd = mat_a.svd();

    let s = svd.s_diagonal();
    let (s_max, s_min) = (0..s.nrows())
        .map(|i| s[i])
        .fold((0.0f64, f64::INFINITY), |(max, min), v| (max.max(v), min.min(v)));
    let ratio = if s_max > 0.0 { s_min / s_max } else { 0.0 };
    if ratio.is_nan() || ratio <= RANK_TOLERANCE {
        return Err(GeometryError::RankDeficient(ratio));
    }

    // the right singular vector without a singular value spans the null space
    let h = svd.v().col(8);
    let homo_n = [[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], h[8]]];

    // undo the normalization: H = T_dst^-1 * Hn * T_src
    let mut homo = linalg::mat33_mul(&linalg::mat33_mul(&t_dst_inv, &homo_n), &t_src);

    let divisor = homo[2][2];
    let max_abs = homo
        .iter()
        .flatten()
        .fold(0.0f64, |acc, v| acc.max(v.abs()));
    if !homo.iter().flatten().all(|v| v.is_finite())
        || divisor.abs() <= config.normalization_tolerance * max_abs
    {
        return Err(GeometryError::DegenerateNormalization(divisor));
    }

    homo.iter_mut()
        .flatten()
        .for_each(|v| *v /= divisor);

    let det = linalg::det_mat33(&homo);
    if !det.is_finite() || det.abs() < DETERMINANT_TOLERANCE {
        return Err(GeometryError::SingularMatrix(det));
    }

    log::debug!("estimated homography: {:?}", homo);

    Ok(homo)
}

/// A planar projective transform acting on homogeneous pixel coordinates.
///
/// The matrix is stored row-major and is normally scaled so that its bottom-right entry is one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography([[f64; 3]; 3]);

impl Homography {
    /// The identity transform.
    pub fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Wrap a row-major 3x3 matrix as it is.
    pub fn from_array(m: [[f64; 3]; 3]) -> Self {
        Self(m)
    }

    /// Estimate the transform mapping each corner of `src` onto the same corner of `dst`.
    ///
    /// # Example
    ///
    /// ```
    /// use rectify_geometry::{Homography, OrderedQuad, Point2d};
    ///
    /// let src = OrderedQuad {
    ///     top_left: Point2d::new(10.0, 10.0),
    ///     top_right: Point2d::new(90.0, 12.0),
    ///     bottom_right: Point2d::new(88.0, 90.0),
    ///     bottom_left: Point2d::new(12.0, 88.0),
    /// };
    /// let dst = OrderedQuad::image_bounds(100, 100);
    ///
    /// let homo = Homography::estimate(&src, &dst).unwrap();
    /// let p = homo.transform_point(src.bottom_right).unwrap();
    ///
    /// assert!((p.x - 99.0).abs() < 1e-6);
    /// assert!((p.y - 99.0).abs() < 1e-6);
    /// ```
    pub fn estimate(src: &OrderedQuad, dst: &OrderedQuad) -> Result<Self, GeometryError> {
        Self::estimate_with_config(src, dst, &EstimateConfig::default())
    }

    /// Same as [`Homography::estimate`] with explicit degeneracy thresholds.
    pub fn estimate_with_config(
        src: &OrderedQuad,
        dst: &OrderedQuad,
        config: &EstimateConfig,
    ) -> Result<Self, GeometryError> {
        let src = src.as_array().map(<[f64; 2]>::from);
        let dst = dst.as_array().map(<[f64; 2]>::from);
        homography_4pt2d(&src, &dst, config).map(Self)
    }

    /// The row-major matrix.
    pub fn as_array(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// The row-major matrix flattened to `[h00, h01, h02, h10, .., h22]`.
    pub fn to_flat_array(&self) -> [f64; 9] {
        let [r0, r1, r2] = self.0;
        [r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2]]
    }

    /// The inverse transform, scaled so that its bottom-right entry is one when possible.
    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let mut inv = linalg::inverse_mat33(&self.0)
            .ok_or_else(|| GeometryError::SingularMatrix(linalg::det_mat33(&self.0)))?;

        let divisor = inv[2][2];
        if divisor != 0.0 {
            inv.iter_mut().flatten().for_each(|v| *v /= divisor);
        }

        Ok(Self(inv))
    }

    /// Map a point through the transform.
    ///
    /// Returns `None` when the point is sent to infinity.
    pub fn transform_point(&self, p: Point2d) -> Option<Point2d> {
        let mut q = [0.0; 3];
        linalg::mat33_mul_vec3(&self.0, &[p.x, p.y, 1.0], &mut q);
        if q[2] == 0.0 {
            return None;
        }
        Some(Point2d::new(q[0] / q[2], q[1] / q[2]))
    }
}
