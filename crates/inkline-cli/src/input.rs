//! Input file parsing.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use inkline_core::{RawPoint, Stroke, StrokeConfig};
use peniko::Color;

/// Layout of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Raw samples `[[x, y, pressure, timestamp?], ...]`, smoothed and filtered.
    Samples,
    /// Saved stroke points `[[x, y, pressure], ...]`, used as-is.
    Compact,
}

/// Build a stroke from the contents of an input file.
pub fn load_stroke(text: &str, format: InputFormat, config: StrokeConfig) -> Result<Stroke> {
    match format {
        InputFormat::Samples => Ok(Stroke::with_points(config, parse_samples(text)?)),
        InputFormat::Compact => Stroke::from_json_str(config, text).context("Invalid stroke data"),
    }
}

fn parse_samples(text: &str) -> Result<Vec<RawPoint>> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(text).context("Samples must be an array of number arrays")?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row.as_slice() {
            [x, y, pressure] => Ok(RawPoint::of(*x, *y, *pressure)),
            [x, y, pressure, timestamp] => Ok(RawPoint {
                x: *x,
                y: *y,
                pressure: pressure.clamp(0.0, 1.0),
                timestamp: *timestamp,
            }),
            _ => bail!("Sample {} has {} values, expected 3 or 4", i, row.len()),
        })
        .collect()
}

/// Parse `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(input: &str) -> Result<Color> {
    let hex = input.trim_start_matches('#');
    if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
        bail!("Color must be #rrggbb or #rrggbbaa, got {:?}", input);
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("Invalid color {:?}", input))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
}
