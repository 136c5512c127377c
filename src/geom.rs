//! Shared geometry utilities.

use core::ops::{Add, Mul, Sub};

/// A point in pixel or output space. `x` is the column axis, `y` the row axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Centre of the pixel at `(row, col)`, in the grid's own coordinates.
    pub fn from_cell(row: usize, col: usize) -> Self {
        Self::new(col as f64, row as f64)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// One step of an arc-length walk: a non-degenerate segment with its unit direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment {
    pub start: Point,
    pub length: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Segment {
    pub fn at(&self, offset: f64) -> Point {
        Point::new(self.start.x + self.dx * offset, self.start.y + self.dy * offset)
    }
}

/// Consecutive segments of `points`, skipping zero-length ones.
pub(crate) fn segments(points: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    points.windows(2).filter_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        let length = a.distance(b);
        (length > 0.0).then(|| Segment {
            start: a,
            length,
            dx: (b.x - a.x) / length,
            dy: (b.y - a.y) / length,
        })
    })
}
