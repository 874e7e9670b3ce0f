use crate::{
    error::GeometryError,
    point::{OrderedQuad, Point2d, Quad},
};

// first index wins on ties
fn argmin_by(points: &Quad, key: impl Fn(&Point2d) -> f64) -> usize {
    let mut best = 0;
    for i in 1..points.len() {
        if key(&points[i]) < key(&points[best]) {
            best = i;
        }
    }
    best
}

fn argmax_by(points: &Quad, key: impl Fn(&Point2d) -> f64) -> usize {
    argmin_by(points, |p| -key(p))
}

/// Label four unordered points as the corners of a quadrilateral.
///
/// The top-left corner has the smallest `x + y`, the bottom-right the largest. The top-right
/// corner has the smallest `y - x`, the bottom-left the largest.
///
/// The rule assumes a convex quadrilateral that is roughly upright. Rotations past 45 degrees
/// or self-intersecting inputs may produce a labeling that reuses a point.
///
/// # Example
///
/// ```
/// use rectify_geometry::{order_corners, Point2d};
///
/// let quad = order_corners(&[
///     Point2d::new(88.0, 90.0),
///     Point2d::new(10.0, 10.0),
///     Point2d::new(12.0, 88.0),
///     Point2d::new(90.0, 12.0),
/// ]);
///
/// assert_eq!(quad.top_left, Point2d::new(10.0, 10.0));
/// assert_eq!(quad.top_right, Point2d::new(90.0, 12.0));
/// assert_eq!(quad.bottom_right, Point2d::new(88.0, 90.0));
/// assert_eq!(quad.bottom_left, Point2d::new(12.0, 88.0));
/// ```
pub fn order_corners(points: &Quad) -> OrderedQuad {
    let sum = |p: &Point2d| p.x + p.y;
    let diff = |p: &Point2d| p.y - p.x;

    OrderedQuad {
        top_left: points[argmin_by(points, sum)],
        top_right: points[argmin_by(points, diff)],
        bottom_right: points[argmax_by(points, sum)],
        bottom_left: points[argmax_by(points, diff)],
    }
}

/// Same as [`order_corners`] for a slice, failing unless it holds exactly four points.
pub fn order_points(points: &[Point2d]) -> Result<OrderedQuad, GeometryError> {
    let quad: &Quad = points
        .try_into()
        .map_err(|_| GeometryError::InvalidPointCount(points.len()))?;
    Ok(order_corners(quad))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permutations(points: &Quad) -> Vec<Quad> {
        let mut out = Vec::with_capacity(24);
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        if a != b && a != c && a != d && b != c && b != d && c != d {
                            out.push([points[a], points[b], points[c], points[d]]);
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn order_axis_aligned() {
        let quad = order_corners(&[
            Point2d::new(0.0, 10.0),
            Point2d::new(10.0, 10.0),
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 0.0),
        ]);
        assert_eq!(quad.top_left, Point2d::new(0.0, 0.0));
        assert_eq!(quad.top_right, Point2d::new(10.0, 0.0));
        assert_eq!(quad.bottom_right, Point2d::new(10.0, 10.0));
        assert_eq!(quad.bottom_left, Point2d::new(0.0, 10.0));
    }

    #[test]
    fn order_is_permutation_invariant() {
        let skewed = [
            Point2d::new(10.0, 10.0),
            Point2d::new(90.0, 12.0),
            Point2d::new(88.0, 90.0),
            Point2d::new(12.0, 88.0),
        ];
        let expected = OrderedQuad {
            top_left: skewed[0],
            top_right: skewed[1],
            bottom_right: skewed[2],
            bottom_left: skewed[3],
        };

        let perms = permutations(&skewed);
        assert_eq!(perms.len(), 24);
        for perm in perms {
            assert_eq!(order_corners(&perm), expected);
        }
    }

    #[test]
    fn order_perspective_trapezoid() {
        // a page photographed from below: narrow top edge
        let points = [
            Point2d::new(420.0, 610.0),
            Point2d::new(180.0, 95.0),
            Point2d::new(35.0, 590.0),
            Point2d::new(330.0, 100.0),
        ];
        for perm in permutations(&points) {
            let quad = order_corners(&perm);
            assert_eq!(quad.top_left, Point2d::new(180.0, 95.0));
            assert_eq!(quad.top_right, Point2d::new(330.0, 100.0));
            assert_eq!(quad.bottom_right, Point2d::new(420.0, 610.0));
            assert_eq!(quad.bottom_left, Point2d::new(35.0, 590.0));
        }
    }

    #[test]
    fn order_ties_pick_first() {
        // all four points share the same sum, the first one wins both slots
        let quad = order_corners(&[
            Point2d::new(2.0, 2.0),
            Point2d::new(0.0, 4.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(1.0, 3.0),
        ]);
        assert_eq!(quad.top_left, Point2d::new(2.0, 2.0));
        assert_eq!(quad.bottom_right, Point2d::new(2.0, 2.0));
        assert_eq!(quad.top_right, Point2d::new(4.0, 0.0));
        assert_eq!(quad.bottom_left, Point2d::new(0.0, 4.0));
    }

    #[test]
    fn order_points_arity() {
        let points = vec![Point2d::default(); 3];
        assert_eq!(
            order_points(&points),
            Err(GeometryError::InvalidPointCount(3))
        );

        let points = vec![Point2d::default(); 5];
        assert_eq!(
            order_points(&points),
            Err(GeometryError::InvalidPointCount(5))
        );

        let points = [
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(0.0, 1.0),
        ];
        assert!(order_points(&points).is_ok());
    }
}
