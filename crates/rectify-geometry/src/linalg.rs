//! Fixed-size 3x3 helpers shared by the estimator and the warper.

/// Compute the determinant of a 3x3 matrix.
#[rustfmt::skip]
pub fn det_mat33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) -
    m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]) +
    m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[rustfmt::skip]
fn adjugate_mat33(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [
            m[1][1] * m[2][2] - m[1][2] * m[2][1],
            m[0][2] * m[2][1] - m[0][1] * m[2][2],
            m[0][1] * m[1][2] - m[0][2] * m[1][1],
        ],
        [
            m[1][2] * m[2][0] - m[1][0] * m[2][2],
            m[0][0] * m[2][2] - m[0][2] * m[2][0],
            m[0][2] * m[1][0] - m[0][0] * m[1][2],
        ],
        [
            m[1][0] * m[2][1] - m[1][1] * m[2][0],
            m[0][1] * m[2][0] - m[0][0] * m[2][1],
            m[0][0] * m[1][1] - m[0][1] * m[1][0],
        ],
    ]
}

/// Invert a 3x3 matrix through its adjugate.
///
/// Returns `None` if the determinant is zero or not finite.
pub fn inverse_mat33(m: &[[f64; 3]; 3]) -> Option<[[f64; 3]; 3]> {
    let det = det_mat33(m);
    if det == 0.0 || !det.is_finite() {
        return None;
    }

    let inv_det = 1.0 / det;
    let adj = adjugate_mat33(m);
    Some(adj.map(|row| row.map(|v| v * inv_det)))
}

/// Multiply two 3x3 matrices.
pub fn mat33_mul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// Multiply a 3x3 matrix by a 3-vector.
///
/// PRECONDITION: `dst` does not alias `v`.
pub fn mat33_mul_vec3(m: &[[f64; 3]; 3], v: &[f64; 3], dst: &mut [f64; 3]) {
    for (i, d) in dst.iter_mut().enumerate() {
        *d = m[i][0] * v[0] + m[i][1] * v[1] + m[i][2] * v[2];
    }
}

/// Normalize four 2d points so their centroid is the origin and their mean distance to it
/// is `sqrt(2)`.
///
/// Returns the normalized points, the similarity `T` applied to them and its inverse.
pub fn normalize_points_2d(
    points: &[[f64; 2]; 4],
) -> ([[f64; 2]; 4], [[f64; 3]; 3], [[f64; 3]; 3]) {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mean_dist = points
        .iter()
        .map(|p| ((p[0] - cx).powi(2) + (p[1] - cy).powi(2)).sqrt())
        .sum::<f64>()
        / n;

    let scale = if mean_dist > f64::EPSILON {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };

    let normalized = points.map(|p| [scale * (p[0] - cx), scale * (p[1] - cy)]);

    let t = [
        [scale, 0.0, -scale * cx],
        [0.0, scale, -scale * cy],
        [0.0, 0.0, 1.0],
    ];
    let t_inv = [[1.0 / scale, 0.0, cx], [0.0, 1.0 / scale, cy], [0.0, 0.0, 1.0]];

    (normalized, t, t_inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_det_mat33() {
        let m = [[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]];
        assert_relative_eq!(det_mat33(&m), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_mat33() {
        let m = [[1.0, 0.0, -1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]];
        let expected = [[1.0, 0.0, 1.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]];
        let inv = inverse_mat33(&m).unwrap();
        assert_eq!(inv, expected);

        let identity = mat33_mul(&m, &inv);
        for (i, row) in identity.iter().enumerate() {
            for (j, val) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(*val, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_singular() {
        let m = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]];
        assert_eq!(inverse_mat33(&m), None);
    }

    #[test]
    fn test_mat33_mul_vec3() {
        let m = [[1.0, 0.0, 2.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]];
        let mut dst = [0.0; 3];
        mat33_mul_vec3(&m, &[3.0, 4.0, 1.0], &mut dst);
        assert_eq!(dst, [5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_normalize_points_2d() {
        let points = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let (normalized, t, t_inv) = normalize_points_2d(&points);

        let cx = normalized.iter().map(|p| p[0]).sum::<f64>();
        let cy = normalized.iter().map(|p| p[1]).sum::<f64>();
        assert_relative_eq!(cx, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cy, 0.0, epsilon = 1e-12);

        for p in normalized.iter() {
            assert_relative_eq!(
                (p[0] * p[0] + p[1] * p[1]).sqrt(),
                std::f64::consts::SQRT_2,
                epsilon = 1e-12
            );
        }

        let identity = mat33_mul(&t, &t_inv);
        assert_relative_eq!(identity[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(identity[0][2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(identity[1][2], 0.0, epsilon = 1e-12);
    }
}
