//! Integer pixel geometry shared by the layouter, compaction and rendering.
//!
//! Screen coordinates: x grows to the right, y grows downwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Squared Euclidean distance, exact in integers.
    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

/// Width and height in pixels.
///
/// Signed so that callers can hand over whatever their measurement produced;
/// only strictly positive sizes are accepted by the layouter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn area(self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Length of the diagonal in pixels.
    pub fn diagonal(self) -> f64 {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        (w * w + h * h).sqrt()
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// The rectangle of `size` whose center is `center`.
    ///
    /// Inverse of [`Rect::center`] under integer division, so
    /// `Rect::centered_at(c, s).center() == c` for every size.
    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(center.offset(-size.width / 2, -size.height / 2), size)
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    pub fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        self.origin.offset(self.size.width / 2, self.size.height / 2)
    }

    /// Strict intersection: the shared region must have positive width and
    /// positive height. Rectangles that only touch along an edge or at a
    /// corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether `p` lies inside the rectangle or on its border.
    pub fn touches(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(Point::new(left, top), Size::new(right - left, bottom - top))
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Distance from `p` to the farthest corner.
    pub fn max_corner_distance(&self, p: Point) -> f64 {
        self.corners()
            .iter()
            .map(|c| c.distance_squared(p))
            .max()
            .map(|d| (d as f64).sqrt())
            .unwrap_or(0.0)
    }
}

/// Union bounding box of `rects`, `None` when empty.
pub fn bounding_box<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    rects
        .into_iter()
        .fold(None, |acc: Option<Rect>, r| Some(acc.map_or(*r, |b| b.union(r))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let a = rect(0, 0, 10, 10);
        let right = rect(10, 0, 10, 10);
        let below = rect(0, 10, 10, 10);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn shared_corner_is_not_overlap() {
        let a = rect(0, 0, 10, 10);
        let diag = rect(10, 10, 4, 4);
        assert!(!a.intersects(&diag));
    }

    #[test]
    fn one_axis_overlap_is_not_enough() {
        let a = rect(0, 0, 10, 10);
        let b = rect(3, 20, 4, 4);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn contained_rect_intersects() {
        let outer = rect(0, 0, 30, 30);
        let inner = rect(10, 10, 2, 2);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn centered_at_inverts_center() {
        for (w, h) in [(10, 10), (7, 3), (1, 1), (20, 9)] {
            let c = Point::new(13, -4);
            assert_eq!(Rect::centered_at(c, Size::new(w, h)).center(), c);
        }
        assert_eq!(
            Rect::centered_at(Point::new(0, 0), Size::new(10, 10)).origin,
            Point::new(-5, -5)
        );
    }

    #[test]
    fn union_and_bounding_box() {
        let a = rect(0, 0, 10, 10);
        let b = rect(-5, 20, 5, 5);
        assert_eq!(a.union(&b), rect(-5, 0, 15, 25));
        assert_eq!(bounding_box([a, b].iter()), Some(rect(-5, 0, 15, 25)));
        let none: [Rect; 0] = [];
        assert_eq!(bounding_box(none.iter()), None);
    }

    #[test]
    fn size_validity() {
        assert!(Size::new(1, 1).is_valid());
        assert!(!Size::new(0, 5).is_valid());
        assert!(!Size::new(4, -5).is_valid());
    }

    #[test]
    fn max_corner_distance_picks_farthest() {
        let r = rect(0, 0, 3, 4);
        assert!((r.max_corner_distance(Point::new(0, 0)) - 5.0).abs() < 1e-9);
    }
}
