//! Standalone SVG export.

use crate::path::PathStyle;
use inkline_core::Stroke;
use kurbo::{BezPath, Rect, Shape};
use peniko::Color;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Nothing to export")]
    Empty,
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Filled paths collected into an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    items: Vec<(BezPath, Color)>,
    background: Option<Color>,
    margin: f64,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Space kept around the content in the view box.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn add_path(&mut self, path: BezPath, color: Color) {
        self.items.push((path, color));
    }

    /// Add every section of `stroke` as its own path.
    pub fn add_stroke(&mut self, stroke: &Stroke, size: f64, style: PathStyle, color: Color) {
        for &section in stroke.sections() {
            let outline = stroke.outline(section, size);
            if !outline.is_empty() {
                self.add_path(style.build(&outline), color);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds of all paths, without the margin.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(|(path, _)| path.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    pub fn to_svg_string(&self) -> String {
        let view = self
            .bounds()
            .unwrap_or(Rect::ZERO)
            .inflate(self.margin, self.margin);

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view.x0,
            view.y0,
            view.width(),
            view.height(),
            view.width().ceil(),
            view.height().ceil()
        );
        if let Some(background) = self.background {
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                view.x0,
                view.y0,
                view.width(),
                view.height(),
                fill(background)
            );
        }
        for (path, color) in &self.items {
            let _ = writeln!(out, r#"  <path d="{}" {}/>"#, path.to_svg(), fill(*color));
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        if self.is_empty() {
            return Err(ExportError::Empty);
        }
        std::fs::write(path, self.to_svg_string())?;
        Ok(())
    }
}

fn fill(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!(r#"fill="rgb({},{},{})""#, rgba.r, rgba.g, rgba.b)
    } else {
        format!(
            r#"fill="rgb({},{},{})" fill-opacity="{:.3}""#,
            rgba.r,
            rgba.g,
            rgba.b,
            rgba.a as f64 / 255.0
        )
    }
}
