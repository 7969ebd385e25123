//! SVG and JSON output for a laid-out cloud.
//!
//! The SVG is fitted into the configured canvas: the cloud's bounding box
//! plus padding is scaled uniformly and centered.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::RenderSettings;
use crate::geometry::Rect;
use crate::tags::TagCloud;
use crate::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    /// Guess from the file extension; `None` for anything unrecognised.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Uniform scale and offset from layout pixels to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fit {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Fit {
    fn new(bounds: Rect, settings: &RenderSettings) -> Self {
        let pad = f64::from(settings.padding);
        let content_w = f64::from(bounds.size.width) + 2.0 * pad;
        let content_h = f64::from(bounds.size.height) + 2.0 * pad;
        let canvas_w = f64::from(settings.width);
        let canvas_h = f64::from(settings.height);
        let scale = (canvas_w / content_w).min(canvas_h / content_h);
        Self {
            scale,
            offset_x: (canvas_w - content_w * scale) / 2.0 + (pad - f64::from(bounds.left())) * scale,
            offset_y: (canvas_h - content_h * scale) / 2.0 + (pad - f64::from(bounds.top())) * scale,
        }
    }

    fn x(&self, x: f64) -> f64 {
        x * self.scale + self.offset_x
    }

    fn y(&self, y: f64) -> f64 {
        y * self.scale + self.offset_y
    }
}

pub fn render_svg(cloud: &TagCloud, settings: &RenderSettings, palette: Palette) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = settings.width,
        h = settings.height,
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        palette.background
    );

    if let Some(bounds) = cloud.bounds() {
        let fit = Fit::new(bounds, settings);
        let family = escape_xml(&settings.font_family);
        for (i, tag) in cloud.tags.iter().enumerate() {
            let center = tag.rect.center();
            let fill = if i == 0 { palette.accent } else { palette.primary };
            let _ = writeln!(
                svg,
                r#"  <text x="{:.1}" y="{:.1}" font-family="{}" font-size="{:.1}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                fit.x(f64::from(center.x)),
                fit.y(f64::from(center.y)),
                family,
                f64::from(tag.font_size) * fit.scale,
                fill,
                escape_xml(&tag.text),
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn render_json(cloud: &TagCloud) -> serde_json::Result<String> {
    serde_json::to_string_pretty(cloud)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::tags::PlacedTag;
    use crate::theme::ColorTheme;

    fn cloud() -> TagCloud {
        TagCloud {
            center: Point::new(0, 0),
            tags: vec![
                PlacedTag {
                    text: "big".to_string(),
                    frequency: 5,
                    font_size: 20,
                    rect: Rect::new(Point::new(-20, -10), Size::new(40, 20)),
                },
                PlacedTag {
                    text: "a<b&c".to_string(),
                    frequency: 1,
                    font_size: 10,
                    rect: Rect::new(Point::new(20, -5), Size::new(30, 10)),
                },
            ],
        }
    }

    #[test]
    fn svg_has_one_text_per_tag_and_escapes() {
        let svg = render_svg(&cloud(), &RenderSettings::default(), ColorTheme::Light.palette());
        assert_eq!(svg.matches("<text ").count(), 2);
        assert!(svg.contains("a&lt;b&amp;c"));
        assert!(!svg.contains("a<b&c"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn largest_tag_uses_accent() {
        let palette = ColorTheme::Dark.palette();
        let svg = render_svg(&cloud(), &RenderSettings::default(), palette);
        let first_text = svg.lines().find(|l| l.contains("<text ")).unwrap();
        assert!(first_text.contains(palette.accent));
    }

    #[test]
    fn fit_keeps_content_inside_canvas() {
        let settings = RenderSettings {
            width: 200,
            height: 100,
            padding: 0,
            ..RenderSettings::default()
        };
        let bounds = Rect::new(Point::new(-50, -10), Size::new(100, 20));
        let fit = Fit::new(bounds, &settings);
        assert!((fit.scale - 2.0).abs() < 1e-9);
        assert!((fit.x(-50.0) - 0.0).abs() < 1e-9);
        assert!((fit.x(50.0) - 200.0).abs() < 1e-9);
        assert!((fit.y(-10.0) - 30.0).abs() < 1e-9);
        assert!((fit.y(10.0) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn empty_cloud_is_background_only() {
        let empty = TagCloud {
            center: Point::new(0, 0),
            tags: Vec::new(),
        };
        let svg = render_svg(&empty, &RenderSettings::default(), ColorTheme::Bisque.palette());
        assert!(!svg.contains("<text"));
        assert!(svg.contains("#ffe4c4"));
    }

    #[test]
    fn json_lists_every_tag() {
        let json = render_json(&cloud()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let tags = value["tags"].as_array().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0]["text"], "big");
        assert_eq!(tags[1]["rect"]["origin"]["x"], 20);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.SVG")), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_path(Path::new("a/b.json")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("cloud.png")), None);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
    }
}
