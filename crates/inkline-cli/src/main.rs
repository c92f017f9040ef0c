//! Inkline command-line renderer.
//!
//! Reads a stroke from JSON, runs it through the stroke engine and writes
//! the outline as SVG.

mod input;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use inkline_core::StrokeConfig;
use inkline_render::{PathStyle, SvgDocument};
use std::path::PathBuf;

use input::{InputFormat, load_stroke, parse_color};

/// Outline path style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Style {
    Polygon,
    Smooth,
}

impl From<Style> for PathStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Polygon => PathStyle::Polygon,
            Style::Smooth => PathStyle::Smooth,
        }
    }
}

/// Render freehand strokes to SVG.
#[derive(Parser, Debug)]
#[command(name = "inkline")]
#[command(version, about = "Render freehand ink strokes to SVG", long_about = None)]
struct Args {
    /// Input JSON file
    input: PathBuf,

    /// Output SVG file
    #[arg(short, long, default_value = "stroke.svg")]
    output: PathBuf,

    /// Input layout
    #[arg(short, long, value_enum, default_value_t = InputFormat::Samples)]
    format: InputFormat,

    /// Stroke config (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stroke width
    #[arg(short, long, default_value_t = 8.0)]
    size: f64,

    /// Fill color (#rrggbb or #rrggbbaa)
    #[arg(long, default_value = "#1e1e1e")]
    color: String,

    /// Background color
    #[arg(long)]
    background: Option<String>,

    #[arg(long, value_enum, default_value_t = Style::Smooth)]
    style: Style,

    /// Also save the retained points as compact JSON
    #[arg(long)]
    save_points: Option<PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            StrokeConfig::from_toml_str(&text)?
        }
        None => StrokeConfig::default(),
    };
    log::debug!("Config: {:?}", config);

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let stroke = load_stroke(&text, args.format, config)?;
    log::info!(
        "Loaded {} points, length {:.1}, {} sections",
        stroke.len(),
        stroke.length(),
        stroke.sections().len()
    );

    let mut doc = SvgDocument::new().with_margin(args.size);
    if let Some(background) = &args.background {
        doc = doc.with_background(parse_color(background)?);
    }
    doc.add_stroke(&stroke, args.size, args.style.into(), parse_color(&args.color)?);
    doc.write_to(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    if let Some(path) = &args.save_points {
        std::fs::write(path, stroke.to_json_string()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved points to {}", path.display());
    }

    Ok(())
}
