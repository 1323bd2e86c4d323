use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub};

/// A point in schematic units (mils), Y growing downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Midpoint of a segment, truncated toward zero.
pub fn midpoint(a: Point, b: Point) -> Point {
    let x = (i64::from(a.x) + i64::from(b.x)) / 2;
    let y = (i64::from(a.y) + i64::from(b.y)) / 2;
    Point::new(x as i32, y as i32)
}

/// Whether `p` lies within `tolerance` of the segment `a`-`b`.
///
/// With a zero tolerance the test is exact: `p` must be collinear with the
/// segment and between its endpoints.
pub fn segment_hit(p: Point, a: Point, b: Point, tolerance: i32) -> bool {
    let (dx, dy) = (i128::from(b.x) - i128::from(a.x), i128::from(b.y) - i128::from(a.y));
    let (vx, vy) = (i128::from(p.x) - i128::from(a.x), i128::from(p.y) - i128::from(a.y));
    let tol2 = i128::from(tolerance) * i128::from(tolerance);

    let len2 = dx * dx + dy * dy;
    if len2 == 0 {
        return vx * vx + vy * vy <= tol2;
    }

    let dot = dx * vx + dy * vy;
    if dot < 0 {
        return vx * vx + vy * vy <= tol2;
    }
    if dot > len2 {
        let (wx, wy) = (vx - dx, vy - dy);
        return wx * wx + wy * wy <= tol2;
    }

    let cross = dx * vy - dy * vx;
    if tolerance == 0 {
        return cross == 0;
    }

    // cross^2 / len2 is the squared distance to the carrier line
    (cross as f64) * (cross as f64) <= (tol2 as f64) * (len2 as f64)
}

/// Axis-aligned box, `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn from_point(p: Point) -> Self {
        Self { min: p, max: p }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bbox = Self::from_point(iter.next()?);
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&mut self, other: &BoundingBox) {
        self.include(other.min);
        self.include(other.max);
    }

    pub fn inflate(mut self, amount: i32) -> Self {
        self.min = self.min - Point::new(amount, amount);
        self.max = self.max + Point::new(amount, amount);
        self
    }

    pub fn translated(self, delta: Point) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn centre(&self) -> Point {
        midpoint(self.min, self.max)
    }
}

/// Placement rotation, counter-clockwise as seen on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Orientation {
    /// Nearest quarter turn for an angle in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        let quarter = (degrees / 90.0).round() as i64;
        match quarter.rem_euclid(4) {
            0 => Orientation::R0,
            1 => Orientation::R90,
            2 => Orientation::R180,
            _ => Orientation::R270,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Orientation::R0 => 0,
            Orientation::R90 => 90,
            Orientation::R180 => 180,
            Orientation::R270 => 270,
        }
    }
}

/// Map a symbol-local offset into sheet orientation.
///
/// Mirroring flips X before the rotation is applied.
pub fn transform(p: Point, orientation: Orientation, mirror: bool) -> Point {
    let p = if mirror { Point::new(-p.x, p.y) } else { p };
    match orientation {
        Orientation::R0 => p,
        Orientation::R90 => Point::new(p.y, -p.x),
        Orientation::R180 => Point::new(-p.x, -p.y),
        Orientation::R270 => Point::new(-p.y, p.x),
    }
}
