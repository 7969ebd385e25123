//! Text to tags: normalize, filter, count, size, place.
//!
//! The most frequent words are placed first, which is what keeps the spiral
//! layout dense: big tags claim the middle and small ones fill the gaps.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CloudConfig, MetricsSettings};
use crate::geometry::{self, Point, Rect, Size};
use crate::layouter::{CloudLayouter, LayoutError};

/// Largest allowed minimum font size.
pub const MAX_MIN_FONT_SIZE: u32 = 120;

/// Growth applied to the minimum font size for the least frequent word.
const BASE_FONT_SCALE: f64 = 1.15;

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// Extent of `text` rendered at `font_size`.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: u32) -> Size;
}

/// Estimates extents from a fixed average advance and line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateMetrics {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl From<&MetricsSettings> for ApproximateMetrics {
    fn from(m: &MetricsSettings) -> Self {
        Self {
            advance_ratio: m.advance_ratio,
            line_height_ratio: m.line_height_ratio,
        }
    }
}

impl TextMeasurer for ApproximateMetrics {
    fn measure(&self, text: &str, font_size: u32) -> Size {
        let chars = text.chars().count() as f64;
        let font = f64::from(font_size);
        let width = (chars * font * self.advance_ratio).ceil() as i32;
        let height = (font * self.line_height_ratio).ceil() as i32;
        Size::new(width.max(1), height.max(1))
    }
}

// ---------------------------------------------------------------------------
// Words
// ---------------------------------------------------------------------------

/// Lowercased words, split at anything that is not a letter.
pub fn normalize_words<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .flat_map(|line| {
            line.as_ref()
                .split(|c: char| !c.is_alphabetic())
                .filter(|w| !w.is_empty())
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn filter_words(words: Vec<String>, boring: &HashSet<String>, min_len: usize) -> Vec<String> {
    words
        .into_iter()
        .filter(|w| w.chars().count() >= min_len && !boring.contains(w))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub frequency: u32,
}

/// Word frequencies, most frequent first. Equal counts keep the order in
/// which the words first appeared.
pub fn count_frequencies<I>(words: I) -> Vec<WordCount>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();
    for word in words {
        match index.get(&word) {
            Some(&i) => counts[i].frequency += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push(WordCount { word, frequency: 1 });
            }
        }
    }
    // Stable sort keeps first-appearance order among ties.
    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    counts
}

/// `frequency - min_frequency + floor(min(120, min_font_size) * 1.15)`.
pub fn font_size_for(frequency: u32, min_frequency: u32, min_font_size: u32) -> u32 {
    let min_font = min_font_size.min(MAX_MIN_FONT_SIZE);
    let base = (f64::from(min_font) * BASE_FONT_SCALE) as u32;
    frequency.saturating_sub(min_frequency) + base
}

// ---------------------------------------------------------------------------
// Cloud
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedTag {
    pub text: String,
    pub frequency: u32,
    pub font_size: u32,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCloud {
    pub center: Point,
    pub tags: Vec<PlacedTag>,
}

impl TagCloud {
    pub fn bounds(&self) -> Option<Rect> {
        geometry::bounding_box(self.tags.iter().map(|t| &t.rect))
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Run the whole pipeline over `lines` and lay the tags out around the
/// origin.
pub fn build_cloud<I, S>(
    lines: I,
    config: &CloudConfig,
    measurer: &dyn TextMeasurer,
) -> Result<TagCloud, LayoutError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let boring: HashSet<String> = config
        .text
        .boring_words
        .iter()
        .map(|w| w.to_lowercase())
        .collect();

    let words = filter_words(normalize_words(lines), &boring, config.text.min_word_length);
    let mut counts = count_frequencies(words);
    if let Some(max) = config.text.max_tags {
        counts.truncate(max);
    }
    let min_frequency = counts.iter().map(|c| c.frequency).min().unwrap_or(0);
    info!(tags = counts.len(), min_frequency, "counted words");

    let center = Point::new(0, 0);
    let mut layouter = CloudLayouter::with_settings(center, config.layout.clone());
    let mut tags = Vec::with_capacity(counts.len());
    for count in counts {
        let font_size = font_size_for(count.frequency, min_frequency, config.text.min_font_size);
        let size = measurer.measure(&count.word, font_size);
        let rect = layouter.place_next(size)?;
        tags.push(PlacedTag {
            text: count.word,
            frequency: count.frequency,
            font_size,
            rect,
        });
    }

    if config.layout.compact {
        for (tag, rect) in tags.iter_mut().zip(layouter.compacted()) {
            tag.rect = rect;
        }
    }
    debug!(bounds = ?layouter.bounds(), "laid out cloud");

    Ok(TagCloud { center, tags })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
