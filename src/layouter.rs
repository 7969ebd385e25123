//! Spiral rectangle layouter.
//!
//! Each incoming size is placed at the first point of an outward spiral
//! (starting at the layouter's fixed center) where a rectangle of that size
//! does not overlap anything placed before. Placement is incremental: a
//! rectangle's position is final as soon as `place_next` returns it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::compact;
use crate::geometry::{self, Point, Rect, Size};
use crate::spiral::{Spiral, SpiralSettings};

/// Slack added to the search radius limit, in pixels.
const SEARCH_LIMIT_SLACK: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid rectangle size {width}x{height}: both dimensions must be positive")]
    InvalidSize { width: i32, height: i32 },

    /// The spiral went past a radius where a free position is guaranteed to
    /// exist. Only reachable through a broken overlap test or a search cap
    /// that is too tight.
    #[error(
        "spiral search exhausted at radius {radius:.1} (limit {limit:.1}) with {placed} rectangles placed"
    )]
    LayoutExhausted { radius: f64, limit: f64, placed: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Pull rectangles toward the center once everything is placed.
    pub compact: bool,
    /// Hard cap on the spiral radius. When unset the cap is derived from
    /// the extent of the rectangles already placed.
    pub max_search_radius: Option<f64>,
    pub spiral: SpiralSettings,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            compact: true,
            max_search_radius: None,
            spiral: SpiralSettings::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CloudLayouter {
    center: Point,
    settings: LayoutSettings,
    placed: Vec<Rect>,
}

impl CloudLayouter {
    pub fn new(center: Point) -> Self {
        Self::with_settings(center, LayoutSettings::default())
    }

    pub fn with_settings(center: Point, settings: LayoutSettings) -> Self {
        Self {
            center,
            settings,
            placed: Vec::new(),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Every rectangle returned so far, in emission order.
    pub fn placed(&self) -> &[Rect] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn bounds(&self) -> Option<Rect> {
        geometry::bounding_box(&self.placed)
    }

    /// Place a rectangle of `size` as close to the center as the spiral
    /// finds a free spot, and record it.
    ///
    /// On error nothing is recorded.
    pub fn place_next(&mut self, size: Size) -> Result<Rect, LayoutError> {
        if !size.is_valid() {
            return Err(LayoutError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        let limit = self.search_limit(size);
        let mut spiral = Spiral::new(self.center, self.settings.spiral);
        let mut blocker: Option<usize> = None;
        let mut candidates = 0usize;

        loop {
            let radius = spiral.radius();
            if radius > limit {
                warn!(
                    radius,
                    limit,
                    placed = self.placed.len(),
                    width = size.width,
                    height = size.height,
                    "spiral search exhausted"
                );
                return Err(LayoutError::LayoutExhausted {
                    radius,
                    limit,
                    placed: self.placed.len(),
                });
            }

            let point = spiral.next_point();
            candidates += 1;

            let candidate = Rect::centered_at(point, size);
            match self.find_blocker(&candidate, blocker) {
                Some(index) => blocker = Some(index),
                None => {
                    trace!(candidates, radius, "spiral search finished");
                    debug!(
                        index = self.placed.len(),
                        x = candidate.left(),
                        y = candidate.top(),
                        width = size.width,
                        height = size.height,
                        "placed rectangle"
                    );
                    self.placed.push(candidate);
                    return Ok(candidate);
                }
            }
        }
    }

    /// Place every size in order, stopping at the first error.
    pub fn place_all<I>(&mut self, sizes: I) -> Result<Vec<Rect>, LayoutError>
    where
        I: IntoIterator<Item = Size>,
    {
        sizes.into_iter().map(|size| self.place_next(size)).collect()
    }

    /// The placed rectangles after compaction toward the center.
    ///
    /// The recorded history is left as it is.
    pub fn compacted(&self) -> Vec<Rect> {
        compact::compact(self.center, &self.placed)
    }

    /// Index of a placed rectangle overlapping `candidate`. The previous
    /// blocker is tried first since neighbouring candidates usually hit the
    /// same rectangle; the answer is the same as a plain linear scan's.
    fn find_blocker(&self, candidate: &Rect, hint: Option<usize>) -> Option<usize> {
        if let Some(index) = hint {
            if self.placed[index].intersects(candidate) {
                return Some(index);
            }
        }
        self.placed.iter().position(|r| r.intersects(candidate))
    }

    /// Radius past which every candidate is free: the farthest placed corner
    /// plus the new rectangle's diagonal, doubled, plus slack.
    fn search_limit(&self, size: Size) -> f64 {
        let extent = self
            .placed
            .iter()
            .map(|r| r.max_corner_distance(self.center))
            .fold(0.0_f64, f64::max);
        let derived = 2.0 * (extent + size.diagonal()) + SEARCH_LIMIT_SLACK;
        match self.settings.max_search_radius {
            Some(cap) => derived.min(cap),
            None => derived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rect_is_centered() {
        let mut layouter = CloudLayouter::new(Point::new(0, 0));
        let rect = layouter.place_next(Size::new(10, 10)).unwrap();
        assert_eq!(rect.origin, Point::new(-5, -5));
        assert_eq!(rect.center(), Point::new(0, 0));
        assert_eq!(layouter.len(), 1);
    }

    #[test]
    fn rejects_zero_width() {
        let mut layouter = CloudLayouter::new(Point::new(0, 0));
        let err = layouter.place_next(Size::new(0, 10)).unwrap_err();
        assert_eq!(err, LayoutError::InvalidSize { width: 0, height: 10 });
        assert!(layouter.is_empty());
    }

    #[test]
    fn rejects_negative_height_after_placements() {
        let mut layouter = CloudLayouter::new(Point::new(0, 0));
        layouter.place_next(Size::new(4, 4)).unwrap();
        let err = layouter.place_next(Size::new(3, -5)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSize { width: 3, height: -5 }));
        assert_eq!(layouter.len(), 1);
    }

    #[test]
    fn second_rect_does_not_overlap_first() {
        let mut layouter = CloudLayouter::new(Point::new(0, 0));
        let a = layouter.place_next(Size::new(10, 10)).unwrap();
        let b = layouter.place_next(Size::new(10, 10)).unwrap();
        assert!(!a.intersects(&b));
        assert_ne!(b.center(), Point::new(0, 0));
    }

    #[test]
    fn tight_search_cap_reports_exhaustion() {
        let settings = LayoutSettings {
            max_search_radius: Some(3.0),
            ..LayoutSettings::default()
        };
        let mut layouter = CloudLayouter::with_settings(Point::new(0, 0), settings);
        layouter.place_next(Size::new(20, 20)).unwrap();
        let err = layouter.place_next(Size::new(20, 20)).unwrap_err();
        assert!(matches!(err, LayoutError::LayoutExhausted { placed: 1, .. }));
        assert_eq!(layouter.len(), 1);
    }

    #[test]
    fn place_all_keeps_input_order() {
        let mut layouter = CloudLayouter::new(Point::new(50, 50));
        let sizes = [Size::new(30, 12), Size::new(8, 8), Size::new(16, 6)];
        let rects = layouter.place_all(sizes).unwrap();
        assert_eq!(rects.len(), 3);
        for (rect, size) in rects.iter().zip(sizes) {
            assert_eq!(rect.size, size);
        }
        assert_eq!(layouter.placed(), rects.as_slice());
    }

    #[test]
    fn place_all_stops_at_first_error() {
        let mut layouter = CloudLayouter::new(Point::new(0, 0));
        let result = layouter.place_all([Size::new(5, 5), Size::new(0, 0), Size::new(5, 5)]);
        assert!(result.is_err());
        assert_eq!(layouter.len(), 1);
    }

    #[test]
    fn bounds_cover_all_placed() {
        let mut layouter = CloudLayouter::new(Point::new(0, 0));
        assert!(layouter.bounds().is_none());
        layouter
            .place_all([Size::new(12, 6), Size::new(9, 9), Size::new(4, 14)])
            .unwrap();
        let bounds = layouter.bounds().unwrap();
        for rect in layouter.placed() {
            assert_eq!(bounds.union(rect), bounds);
        }
    }
}
