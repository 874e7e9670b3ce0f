/// An error type for the geometry module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The number of points is not exactly four.
    #[error("Exactly 4 points are required, got {0}")]
    InvalidPointCount(usize),

    /// Three of the points lie on a line (or coincide).
    #[error("The {set} points {indices:?} are collinear")]
    CollinearPoints {
        /// Which point set failed, `source` or `destination`.
        set: &'static str,
        /// Indices of the offending triple in slot order.
        indices: [usize; 3],
    },

    /// The DLT system does not have a one dimensional null space.
    #[error("The linear system is rank deficient (singular value ratio {0:e})")]
    RankDeficient(f64),

    /// The bottom-right entry of the homography vanishes.
    #[error("The homography cannot be normalized, divisor is {0:e}")]
    DegenerateNormalization(f64),

    /// The homography cannot be inverted.
    #[error("The homography is singular (determinant {0:e})")]
    SingularMatrix(f64),
}
