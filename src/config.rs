//! Configuration for tag-cloud.
//!
//! Everything tunable lives in a single `CloudConfig` that can be read from
//! and written to TOML. Every section is `#[serde(default)]`, so a file only
//! needs to mention the values it overrides.
//!
//! The default location is `~/.config/tag-cloud/cloud.toml` (or
//! `$XDG_CONFIG_HOME/tag-cloud/cloud.toml`). CLI flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layouter::LayoutSettings;
use crate::theme::ColorTheme;

const APP_NAME: &str = "tag-cloud";
const CONFIG_FILE: &str = "cloud.toml";

/// Common English words that say nothing about a text.
const DEFAULT_BORING_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "him", "his", "how", "its", "who", "did", "yes", "she", "they",
    "them", "then", "than", "that", "this", "with", "from", "have", "were", "will", "what", "when",
    "where", "which", "while", "would", "there", "their", "these", "those", "been", "into", "also",
    "only", "some", "such", "very", "just", "about",
];

// ---------------------------------------------------------------------------
// CloudConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub layout: LayoutSettings,
    pub text: TextSettings,
    pub metrics: MetricsSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Font size of the least frequent word. Clamped to 120.
    pub min_font_size: u32,
    /// Shorter words are dropped.
    pub min_word_length: usize,
    /// Keep only this many of the most frequent words.
    pub max_tags: Option<usize>,
    pub boring_words: Vec<String>,
}

/// Ratios used to estimate rendered text extents from the font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Average glyph advance as a fraction of the font size.
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Margin around the cloud before scaling, in layout pixels.
    pub padding: u32,
    pub font_family: String,
    pub theme: ColorTheme,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            min_font_size: 12,
            min_word_length: 3,
            max_tags: Some(150),
            boring_words: DEFAULT_BORING_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            padding: 16,
            font_family: "sans-serif".to_string(),
            theme: ColorTheme::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// TOML I/O
// ---------------------------------------------------------------------------

impl CloudConfig {
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load `path` when given, otherwise the default config file if it
    /// exists, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match config_path() {
            Some(default) if default.exists() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/tag-cloud/cloud.toml`, falling back to
/// `$HOME/.config/tag-cloud/cloud.toml`. `None` when neither is set.
pub fn config_path() -> Option<PathBuf> {
    let dir = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => PathBuf::from(std::env::var("HOME").ok()?).join(".config"),
    };
    Some(dir.join(APP_NAME).join(CONFIG_FILE))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = CloudConfig::default();
        assert!(c.layout.compact);
        assert!(c.layout.max_search_radius.is_none());
        assert!((c.layout.spiral.radius_growth - 0.5).abs() < f64::EPSILON);
        assert_eq!(c.text.min_font_size, 12);
        assert_eq!(c.text.min_word_length, 3);
        assert!(c.text.boring_words.iter().any(|w| w == "the"));
        assert!((c.metrics.advance_ratio - 0.6).abs() < f64::EPSILON);
        assert_eq!(c.render.width, 1024);
        assert_eq!(c.render.theme, ColorTheme::Bisque);
    }

    #[test]
    fn toml_roundtrip() {
        let original = CloudConfig::default();
        let parsed = CloudConfig::from_toml(&original.to_toml()).expect("roundtrip parse failed");
        assert_eq!(parsed, original);
    }

    #[test]
    fn partial_toml() {
        let partial = r#"
[layout]
compact = false

[layout.spiral]
radius_growth = 0.25

[render]
theme = "dark"
width = 640
"#;
        let c = CloudConfig::from_toml(partial).expect("partial parse failed");
        assert!(!c.layout.compact);
        assert!((c.layout.spiral.radius_growth - 0.25).abs() < f64::EPSILON);
        // Untouched values keep their defaults
        assert!((c.layout.spiral.arc_step - 1.0).abs() < f64::EPSILON);
        assert_eq!(c.render.theme, ColorTheme::Dark);
        assert_eq!(c.render.width, 640);
        assert_eq!(c.render.height, 768);
        assert_eq!(c.text.min_font_size, 12);
    }

    #[test]
    fn invalid_toml() {
        assert!(CloudConfig::from_toml("this is not [[ valid toml").is_err());
        assert!(CloudConfig::from_toml("[render]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud.toml");
        std::fs::write(&path, "[text]\nmin_font_size = 20\n").unwrap();
        let c = CloudConfig::load(&path).unwrap();
        assert_eq!(c.text.min_font_size, 20);

        let explicit = CloudConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(explicit, c);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = CloudConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
