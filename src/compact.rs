//! Post-placement compaction.
//!
//! Rectangles are visited closest-first and each one is slid along the
//! straight line from its center toward the cloud center, one pixel of path
//! at a time, until the next step would overlap a neighbour or the center is
//! reached.

use tracing::debug;

use crate::geometry::{Point, Rect};

/// Compacted copy of `rects`, same order and sizes.
///
/// Ties in distance are broken by index so the result only depends on the
/// input.
pub fn compact(center: Point, rects: &[Rect]) -> Vec<Rect> {
    let mut out = rects.to_vec();

    let mut order: Vec<usize> = (0..out.len()).collect();
    order.sort_by_key(|&i| (out[i].center().distance_squared(center), i));

    let mut moved = 0usize;
    for index in order {
        let pulled = pull_toward(center, index, &out);
        if pulled != out[index] {
            moved += 1;
            out[index] = pulled;
        }
    }

    debug!(moved, total = out.len(), "compacted cloud");
    out
}

/// Farthest position along the ray to `center` that `rects[index]` can reach
/// without touching any other rectangle's interior.
fn pull_toward(center: Point, index: usize, rects: &[Rect]) -> Rect {
    let start = rects[index];
    let from = start.center();
    let dx = f64::from(from.x - center.x);
    let dy = f64::from(from.y - center.y);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return start;
    }

    let steps = length.ceil() as i32;
    let mut best = start;
    for step in 1..=steps {
        let t = (f64::from(step) / length).min(1.0);
        let target = from.offset(-(dx * t).round() as i32, -(dy * t).round() as i32);
        let candidate = Rect::centered_at(target, start.size);
        let blocked = rects
            .iter()
            .enumerate()
            .any(|(other, r)| other != index && r.intersects(&candidate));
        if blocked {
            break;
        }
        best = candidate;
    }
    best
}
