//! Inkline Render Library
//!
//! Turns stroke outlines into `kurbo` paths, caches the paths of closed
//! sections, and exports strokes as SVG.

mod cache;
mod path;
mod svg;

pub use cache::SectionCache;
pub use path::{outline_path, smooth_outline_path, PathStyle};
pub use svg::{ExportError, ExportResult, SvgDocument};
