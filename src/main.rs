//! tag-cloud: render a word-frequency cloud from a text file.
//!
//! Reads the input, counts words, lays the tags out on a spiral and writes
//! an SVG (or the raw layout as JSON).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use tag_cloud::render::{self, OutputFormat};
use tag_cloud::theme::ColorTheme;
use tag_cloud::{ApproximateMetrics, CloudConfig, logging, tags};

/// Word-frequency tag cloud generator
#[derive(Parser, Debug)]
#[command(name = "tag-cloud", version, about = "Word-frequency tag cloud generator")]
struct Args {
    /// Text file to build the cloud from
    input: PathBuf,

    /// Where to write the result (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ~/.config/tag-cloud/cloud.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format; guessed from the output extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Font size of the least frequent word (at most 120)
    #[arg(long)]
    min_font_size: Option<u32>,

    #[arg(long)]
    font_family: Option<String>,

    #[arg(short, long, value_enum)]
    theme: Option<ColorTheme>,

    /// File with extra words to leave out, one per line
    #[arg(long)]
    boring_words: Option<PathBuf>,

    /// Keep only the N most frequent words
    #[arg(long)]
    max_tags: Option<usize>,

    /// Skip pulling tags toward the center after placement
    #[arg(long)]
    no_compact: bool,

    /// Log placement details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut CloudConfig) -> Result<()> {
        if let Some(width) = self.width {
            config.render.width = width;
        }
        if let Some(height) = self.height {
            config.render.height = height;
        }
        if config.render.width == 0 || config.render.height == 0 {
            bail!(
                "canvas must be non-empty, got {}x{}",
                config.render.width,
                config.render.height
            );
        }
        if let Some(size) = self.min_font_size {
            config.text.min_font_size = size;
        }
        if let Some(family) = &self.font_family {
            config.render.font_family = family.clone();
        }
        if let Some(theme) = self.theme {
            config.render.theme = theme;
        }
        if let Some(max) = self.max_tags {
            config.text.max_tags = Some(max);
        }
        if self.no_compact {
            config.layout.compact = false;
        }
        if let Some(path) = &self.boring_words {
            let extra = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read boring words {}", path.display()))?;
            config.text.boring_words.extend(
                extra
                    .lines()
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string),
            );
        }
        Ok(())
    }

    fn format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(OutputFormat::Svg)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.verbose);

    let mut config = CloudConfig::load_or_default(args.config.as_deref())?;
    args.apply(&mut config)?;

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input {}", args.input.display()))?;

    let metrics = ApproximateMetrics::from(&config.metrics);
    let cloud = tags::build_cloud(text.lines(), &config, &metrics)?;
    info!(tags = cloud.tags.len(), bounds = ?cloud.bounds(), "cloud built");

    let rendered = match args.format() {
        OutputFormat::Svg => {
            render::render_svg(&cloud, &config.render, config.render.theme.palette())
        }
        OutputFormat::Json => render::render_json(&cloud)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote cloud");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
