//! Color themes for rendered clouds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Light,
    Dark,
    #[default]
    Bisque,
    Contrast,
}

/// Hex colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub primary: &'static str,
    /// Used for the most frequent tag.
    pub accent: &'static str,
}

impl ColorTheme {
    pub fn palette(self) -> Palette {
        match self {
            ColorTheme::Light => Palette {
                background: "#ffffff",
                primary: "#2b2b2b",
                accent: "#1f5fbf",
            },
            ColorTheme::Dark => Palette {
                background: "#16161d",
                primary: "#d8d8e0",
                accent: "#f0b429",
            },
            ColorTheme::Bisque => Palette {
                background: "#ffe4c4",
                primary: "#3b2a1a",
                accent: "#a0522d",
            },
            ColorTheme::Contrast => Palette {
                background: "#000000",
                primary: "#ffffff",
                accent: "#ffff00",
            },
        }
    }
}
