/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2d {
    /// The x coordinate (column).
    pub x: f64,
    /// The y coordinate (row).
    pub y: f64,
}

impl Point2d {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2d {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<(f64, f64)> for Point2d {
    fn from(p: (f64, f64)) -> Self {
        Self { x: p.0, y: p.1 }
    }
}

impl From<Point2d> for [f64; 2] {
    fn from(p: Point2d) -> Self {
        [p.x, p.y]
    }
}

/// Four points in no particular order.
pub type Quad = [Point2d; 4];

/// Four points labeled by the corner they play in a quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedQuad {
    /// Top-left corner.
    pub top_left: Point2d,
    /// Top-right corner.
    pub top_right: Point2d,
    /// Bottom-right corner.
    pub bottom_right: Point2d,
    /// Bottom-left corner.
    pub bottom_left: Point2d,
}

impl OrderedQuad {
    /// The corners of a `width` x `height` pixel grid.
    ///
    /// The corners are the centers of the extreme pixels, i.e. `(0, 0)`, `(width - 1, 0)`,
    /// `(width - 1, height - 1)` and `(0, height - 1)`.
    ///
    /// # Example
    ///
    /// ```
    /// use rectify_geometry::{OrderedQuad, Point2d};
    ///
    /// let quad = OrderedQuad::image_bounds(100, 50);
    /// assert_eq!(quad.bottom_right, Point2d::new(99.0, 49.0));
    /// ```
    pub fn image_bounds(width: usize, height: usize) -> Self {
        let (w, h) = (width as f64 - 1.0, height as f64 - 1.0);
        Self {
            top_left: Point2d::new(0.0, 0.0),
            top_right: Point2d::new(w, 0.0),
            bottom_right: Point2d::new(w, h),
            bottom_left: Point2d::new(0.0, h),
        }
    }

    /// The corners in slot order: top-left, top-right, bottom-right, bottom-left.
    pub fn as_array(&self) -> [Point2d; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}
