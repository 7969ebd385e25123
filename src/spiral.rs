//! Archimedean spiral of candidate points.
//!
//! The radius grows linearly with the accumulated angle (`r = alpha * theta`).
//! The angular increment shrinks with the radius so that consecutive samples
//! stay roughly `arc_step` pixels apart, which keeps the trace tight near the
//! origin and avoids skipping narrow gaps further out.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralSettings {
    /// Pixels of radius gained per radian turned.
    pub radius_growth: f64,
    /// Upper bound on the angular increment, in radians.
    pub max_angle_step: f64,
    /// Target path length between consecutive samples, in pixels.
    pub arc_step: f64,
}

impl Default for SpiralSettings {
    fn default() -> Self {
        Self {
            radius_growth: 0.5,
            max_angle_step: 0.25,
            arc_step: 1.0,
        }
    }
}

impl SpiralSettings {
    /// Settings with non-positive fields replaced by their defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };
        Self {
            radius_growth: pick(self.radius_growth, defaults.radius_growth),
            max_angle_step: pick(self.max_angle_step, defaults.max_angle_step),
            arc_step: pick(self.arc_step, defaults.arc_step),
        }
    }
}

/// Unbounded spiral walking outward from a center point.
///
/// Never returns `None`. Consecutive samples that round to the same pixel
/// are collapsed, and the first sample is always the center itself.
#[derive(Debug, Clone)]
pub struct Spiral {
    center: Point,
    settings: SpiralSettings,
    theta: f64,
    last: Option<Point>,
}

impl Spiral {
    pub fn new(center: Point, settings: SpiralSettings) -> Self {
        Self {
            center,
            settings: settings.sanitized(),
            theta: 0.0,
            last: None,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn angle(&self) -> f64 {
        self.theta
    }

    /// Radius of the next sample to be produced.
    pub fn radius(&self) -> f64 {
        self.settings.radius_growth * self.theta
    }

    fn sample(&self) -> Point {
        let r = self.radius();
        let dx = (r * self.theta.cos()).round() as i32;
        let dy = (r * self.theta.sin()).round() as i32;
        self.center.offset(dx, dy)
    }

    /// Next sample; the spiral never runs out.
    pub fn next_point(&mut self) -> Point {
        loop {
            let p = self.sample();
            self.advance();
            if self.last != Some(p) {
                self.last = Some(p);
                return p;
            }
        }
    }

    fn advance(&mut self) {
        let r = self.radius();
        let alpha = self.settings.radius_growth;
        // ds/dtheta of the Archimedean spiral is sqrt(r^2 + alpha^2).
        let by_arc = self.settings.arc_step / (r * r + alpha * alpha).sqrt();
        self.theta += by_arc.min(self.settings.max_angle_step);
    }
}

impl Iterator for Spiral {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        Some(self.next_point())
    }
}
