//! Per-section path cache for strokes that are still being drawn.

use crate::path::PathStyle;
use inkline_core::Stroke;
use kurbo::{BezPath, Point};
use log::debug;

/// Caches the paths of closed sections of one stroke.
///
/// Only the open section is rebuilt on [`SectionCache::update`]; closed
/// sections are built once when they close. The cache remembers the first
/// point and closed section starts of the stroke it was filled from and
/// starts over when handed a stroke that does not match them.
#[derive(Debug, Clone)]
pub struct SectionCache {
    size: f64,
    style: PathStyle,
    /// First point of the cached stroke.
    origin: Option<Point>,
    /// Start indices of the cached sections.
    starts: Vec<usize>,
    /// Paths of closed sections, in section order.
    closed: Vec<BezPath>,
}

impl SectionCache {
    /// Empty cache for strokes of width `size`.
    pub fn new(size: f64, style: PathStyle) -> Self {
        Self {
            size,
            style,
            origin: None,
            starts: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// Stroke width.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Change the stroke width, dropping cached paths if it differs.
    pub fn set_size(&mut self, size: f64) {
        if size != self.size {
            self.size = size;
            self.invalidate();
        }
    }

    /// Change the path style, dropping cached paths if it differs.
    pub fn set_style(&mut self, style: PathStyle) {
        if style != self.style {
            self.style = style;
            self.invalidate();
        }
    }

    /// Drop every cached path.
    pub fn invalidate(&mut self) {
        self.origin = None;
        self.starts.clear();
        self.closed.clear();
    }

    /// Number of sections currently cached.
    pub fn cached_sections(&self) -> usize {
        self.closed.len()
    }

    /// Full path of `stroke` with spreading evaluated at `now` (ms).
    pub fn update(&mut self, stroke: &Stroke, now: f64) -> BezPath {
        let sections = stroke.sections();
        let closed_count = sections.len() - 1;
        let origin = stroke.points().first().map(|p| p.pos());
        if origin != self.origin
            || !sections.starts_with(&self.starts)
            || closed_count < self.closed.len()
        {
            // A different or rebuilt stroke.
            if !self.closed.is_empty() {
                debug!("Stroke changed, dropping {} cached sections", self.closed.len());
            }
            self.invalidate();
            self.origin = origin;
        }

        for &start in &sections[self.closed.len()..closed_count] {
            debug!("Caching closed section {}", start);
            self.starts.push(start);
            self.closed
                .push(self.style.build(&stroke.outline(start, self.size)));
        }

        let mut path = BezPath::new();
        for closed in &self.closed {
            path.extend(closed.elements().iter().copied());
        }
        let open = stroke.outline_at(stroke.last_section(), self.size, now);
        path.extend(self.style.build(&open).elements().iter().copied());
        path
    }
}
