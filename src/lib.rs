//! tag-cloud: word-frequency clouds packed along an outward spiral.
//!
//! The core is [`CloudLayouter`], which places rectangles one at a time at
//! the first spiral position that overlaps nothing placed before. The rest
//! of the crate turns text into sized tags and renders the result.

pub mod compact;
pub mod config;
pub mod geometry;
pub mod layouter;
pub mod logging;
pub mod render;
pub mod spiral;
pub mod tags;
pub mod theme;

pub use config::CloudConfig;
pub use geometry::{Point, Rect, Size};
pub use layouter::{CloudLayouter, LayoutError, LayoutSettings};
pub use spiral::{Spiral, SpiralSettings};
pub use tags::{ApproximateMetrics, PlacedTag, TagCloud, TextMeasurer};
