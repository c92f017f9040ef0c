//! The stroke model.
//!
//! A [`Stroke`] owns the retained points of one freehand stroke. Raw samples
//! are smoothed and filtered on the way in, and the point sequence is split
//! into sections at sharp reversals. Closed sections never change once a
//! later boundary exists, so renderers only need to rebuild the last one.

use crate::config::{SmoothingPolicy, StrokeConfig};
use crate::error::{StrokeError, StrokeResult};
use crate::outline;
use crate::point::{Point, RawPoint};
use crate::vector::{distance, dot, midpoint, normalize};
use kurbo::{Point as KPoint, Vec2};
use log::{debug, trace, warn};
use std::collections::{BTreeMap, VecDeque};

/// A freehand stroke being drawn or replayed.
#[derive(Debug, Clone)]
pub struct Stroke {
    config: StrokeConfig,
    points: Vec<Point>,
    /// Running length of the last retained point.
    length: f64,
    /// Start index of every section. Always begins with 0.
    sections: Vec<usize>,
    /// Next index the section scan looks at.
    next_scan: usize,
    /// Batches received ahead of the points they follow, keyed by start index.
    pending: BTreeMap<usize, Vec<RawPoint>>,
    /// Recent raw positions for rolling-average smoothing.
    recent: VecDeque<KPoint>,
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(StrokeConfig::default())
    }
}

impl Stroke {
    /// Create an empty stroke.
    pub fn new(config: StrokeConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            length: 0.0,
            sections: vec![0],
            next_scan: 0,
            pending: BTreeMap::new(),
            recent: VecDeque::new(),
        }
    }

    /// Create a stroke from an initial batch of samples.
    pub fn with_points(config: StrokeConfig, points: impl IntoIterator<Item = RawPoint>) -> Self {
        let mut stroke = Self::new(config);
        for raw in points {
            stroke.push_point(raw);
        }
        stroke.update_sections();
        stroke
    }

    /// Configuration the stroke was built with.
    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    /// Retained points in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of retained points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke with a single point renders as a dot.
    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }

    /// Total length along retained points.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Start indices of all sections.
    pub fn sections(&self) -> &[usize] {
        &self.sections
    }

    /// Start index of the last, still open section.
    pub fn last_section(&self) -> usize {
        self.sections.last().copied().unwrap_or(0)
    }

    /// Number of batches waiting for a gap to be filled.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Append a sample.
    pub fn push(&mut self, raw: RawPoint) {
        self.push_point(raw);
        self.update_sections();
    }

    /// Add a batch of samples starting at point index `from_index`.
    ///
    /// Batches ahead of the current end are buffered until the points before
    /// them arrive. Batches overlapping committed points are rejected and the
    /// stroke is left untouched.
    pub fn insert(&mut self, from_index: usize, points: Vec<RawPoint>) -> StrokeResult<()> {
        let len = self.points.len();
        if from_index < len {
            return Err(StrokeError::IndexConflict {
                index: from_index,
                len,
            });
        }

        if from_index > len {
            if self.pending.insert(from_index, points).is_some() {
                warn!("Replaced pending batch at index {}", from_index);
            }
            return Ok(());
        }

        self.append_batch(points);
        self.update_sections();
        Ok(())
    }

    /// Push a batch, then any buffered batches that now line up.
    fn append_batch(&mut self, points: Vec<RawPoint>) {
        for raw in points {
            self.push_point(raw);
        }

        while let Some(batch) = self.pending.remove(&self.points.len()) {
            for raw in batch {
                self.push_point(raw);
            }
        }

        // Batches keyed below the end can never line up anymore.
        let len = self.points.len();
        let live = self.pending.split_off(&len);
        for (index, batch) in std::mem::replace(&mut self.pending, live) {
            warn!("Dropping stale pending batch at index {} ({} points)", index, batch.len());
        }
    }

    /// Smooth, filter and store one sample. Returns whether a point was added.
    fn push_point(&mut self, raw: RawPoint) -> bool {
        let candidate = self.smooth(raw.position());

        let Some(previous) = self.points.last_mut() else {
            self.points.push(Point::first(raw.at(candidate)));
            return true;
        };

        let d = distance(previous.pos(), candidate);
        let length = self.length + d;
        if d <= 0.0 || length - previous.running_length < self.config.skip_distance {
            trace!("Skipping sample {:.2} from previous point", d);
            previous.position.pressure = previous.position.pressure.max(raw.pressure);
            return false;
        }

        let direction = normalize(previous.pos() - candidate);
        self.length = length;
        self.points.push(Point {
            position: raw.at(candidate),
            direction,
            distance: d,
            running_length: length,
        });
        true
    }

    /// Candidate position for a raw sample under the smoothing policy.
    fn smooth(&mut self, raw: KPoint) -> KPoint {
        match self.config.smoothing {
            SmoothingPolicy::None => raw,
            SmoothingPolicy::Midpoint => match self.points.last() {
                Some(previous) => midpoint(raw, previous.pos()),
                None => raw,
            },
            SmoothingPolicy::Average { samples } => {
                let samples = samples.max(1);
                self.recent.push_back(raw);
                while self.recent.len() > samples {
                    self.recent.pop_front();
                }
                let sum = self
                    .recent
                    .iter()
                    .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
                (sum / self.recent.len() as f64).to_point()
            }
        }
    }

    /// Store an already-filtered point exactly as given.
    fn commit(&mut self, raw: RawPoint) {
        let Some(previous) = self.points.last_mut() else {
            self.points.push(Point::first(raw));
            return;
        };

        let d = distance(previous.pos(), raw.position());
        if d <= 0.0 {
            previous.position.pressure = previous.position.pressure.max(raw.pressure);
            return;
        }

        let direction = normalize(previous.pos() - raw.position());
        self.length += d;
        self.points.push(Point {
            position: raw,
            direction,
            distance: d,
            running_length: self.length,
        });
    }

    /// Extend the section list over points not yet scanned.
    fn update_sections(&mut self) {
        let cooldown = self.config.section_cooldown.max(1);
        let last = self.last_section();
        // Point 0 has no real direction, so index 1 can never split.
        let mut i = self.next_scan.max(last + cooldown).max(2);

        while i < self.points.len() {
            let current = &self.points[i];
            let previous = &self.points[i - 1];
            if current.distance < self.config.sharp_corner_distance
                && dot(current.direction, previous.direction) < 0.0
            {
                debug!("New section at point {}", i);
                self.sections.push(i);
                i += cooldown;
            } else {
                i += 1;
            }
        }

        self.next_scan = i;
    }

    /// Whether recent points are still growing at time `now` (ms).
    pub fn is_spreading(&self, now: f64) -> bool {
        let spread = &self.config.spread;
        match self.points.last() {
            Some(last) if spread.enabled => now - last.timestamp() < spread.interval,
            _ => false,
        }
    }

    /// Outline of the section starting at `section_start` for a stroke of
    /// width `size`, as a closed ring of points.
    ///
    /// Spreading is evaluated at the time of the last sample.
    pub fn outline(&self, section_start: usize, size: f64) -> Vec<KPoint> {
        let now = self.points.last().map(Point::timestamp).unwrap_or(0.0);
        self.outline_at(section_start, size, now)
    }

    /// Like [`Stroke::outline`], with spreading evaluated at `now` (ms).
    ///
    /// Closed sections always evaluate spreading at the timestamp of the point
    /// that closed them, so their outline never changes.
    pub fn outline_at(&self, section_start: usize, size: f64, now: f64) -> Vec<KPoint> {
        let len = self.points.len();
        if section_start >= len {
            return Vec::new();
        }

        let section_end = self.sections.iter().copied().find(|&s| s > section_start);
        let open = section_end.is_none();
        let (end, now) = match section_end {
            Some(end) => (end, self.points[end].timestamp()),
            None => (len, now),
        };
        let start = section_start.saturating_sub(1);

        outline::generate(&self.points[start..end], &self.config, size, open, now)
    }

    /// Compact `[x, y, pressure]` triples of the retained points.
    pub fn to_json(&self) -> Vec<[f64; 3]> {
        self.points
            .iter()
            .map(|p| [p.position.x, p.position.y, p.position.pressure])
            .collect()
    }

    /// [`Stroke::to_json`] as a JSON string.
    pub fn to_json_string(&self) -> StrokeResult<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    /// Rebuild a stroke from [`Stroke::to_json`] output.
    ///
    /// Points are stored exactly as given, without smoothing or skipping.
    /// Timestamps are not part of the format and come back as 0.
    pub fn from_json(config: StrokeConfig, value: &serde_json::Value) -> StrokeResult<Self> {
        let triples: Vec<[f64; 3]> = serde_json::from_value(value.clone())?;
        Self::from_triples(config, &triples)
    }

    /// Parse a stroke from a JSON string of triples.
    pub fn from_json_str(config: StrokeConfig, input: &str) -> StrokeResult<Self> {
        let triples: Vec<[f64; 3]> = serde_json::from_str(input)?;
        Self::from_triples(config, &triples)
    }

    fn from_triples(config: StrokeConfig, triples: &[[f64; 3]]) -> StrokeResult<Self> {
        for (i, [x, y, pressure]) in triples.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(StrokeError::Malformed(format!("point {} has a non-finite position", i)));
            }
            if !(0.0..=1.0).contains(pressure) {
                return Err(StrokeError::Malformed(format!(
                    "point {} has pressure {} outside [0, 1]",
                    i, pressure
                )));
            }
        }

        let mut stroke = Self::new(config);
        for &[x, y, pressure] in triples {
            stroke.commit(RawPoint { x, y, pressure, timestamp: 0.0 });
        }
        stroke.update_sections();
        Ok(stroke)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw_config() -> StrokeConfig {
        StrokeConfig {
            smoothing: SmoothingPolicy::None,
            ..StrokeConfig::default()
        }
        .without_dynamics()
    }

    fn line(count: usize, spacing: f64, pressure: f64) -> Vec<RawPoint> {
        (0..count)
            .map(|i| RawPoint::of(i as f64 * spacing, 0.0, pressure))
            .collect()
    }

    /// Back and forth along the x axis, 10 units per sample.
    fn zigzag() -> Vec<RawPoint> {
        let xs = [0.0, 10.0, 20.0, 30.0, 20.0, 10.0, 0.0, 10.0, 20.0, 30.0, 40.0];
        xs.iter()
            .enumerate()
            .map(|(i, &x)| RawPoint::of(x, i as f64, 0.6))
            .collect()
    }

    #[test]
    fn test_empty_stroke() {
        let stroke = Stroke::default();
        assert!(stroke.is_empty());
        assert!(!stroke.is_dot());
        assert_eq!(stroke.sections(), &[0]);
        assert!(stroke.outline(0, 10.0).is_empty());
        assert!(stroke.to_json().is_empty());
    }

    #[test]
    fn test_single_point_is_dot() {
        let mut stroke = Stroke::new(raw_config());
        stroke.push(RawPoint::of(5.0, 5.0, 1.0));
        assert!(stroke.is_dot());

        let outline = stroke.outline(0, 20.0);
        assert_eq!(outline.len(), stroke.config().dot_steps);
        for p in &outline {
            assert!((distance(*p, KPoint::new(5.0, 5.0)) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_point_direction_is_not_zero() {
        let mut stroke = Stroke::new(raw_config());
        stroke.push(RawPoint::of(0.0, 0.0, 0.5));
        let first = stroke.points()[0];
        assert_ne!(first.direction, Vec2::ZERO);
        assert_eq!(first.distance, 0.0);
        assert_eq!(first.running_length, 0.0);
    }

    #[test]
    fn test_skip_folds_pressure() {
        let mut stroke = Stroke::new(raw_config());
        stroke.push(RawPoint::of(0.0, 0.0, 0.2));
        stroke.push(RawPoint::of(1.0, 1.0, 0.7));
        assert_eq!(stroke.len(), 1);
        assert_eq!(stroke.points()[0].pressure(), 0.7);
        assert_eq!(stroke.length(), 0.0);

        stroke.push(RawPoint::of(2.0, 0.0, 0.1));
        assert_eq!(stroke.points()[0].pressure(), 0.7);
    }

    #[test]
    fn test_duplicate_sample_is_skipped_without_skip_distance() {
        let mut stroke = Stroke::new(StrokeConfig::replica());
        stroke.push(RawPoint::of(3.0, 3.0, 0.5));
        stroke.push(RawPoint::of(3.0, 3.0, 0.5));
        assert_eq!(stroke.len(), 1);
    }

    #[test]
    fn test_point_geometry() {
        let mut stroke = Stroke::new(raw_config());
        stroke.push(RawPoint::of(0.0, 0.0, 0.5));
        stroke.push(RawPoint::of(3.0, 4.0, 0.5));
        let p = stroke.points()[1];
        assert_eq!(p.distance, 5.0);
        assert_eq!(p.running_length, 5.0);
        assert!((p.direction.x + 0.6).abs() < 1e-12);
        assert!((p.direction.y + 0.8).abs() < 1e-12);
        assert_eq!(stroke.length(), 5.0);
    }

    #[test]
    fn test_midpoint_smoothing() {
        let mut stroke = Stroke::default();
        for raw in line(3, 10.0, 0.5) {
            stroke.push(raw);
        }
        let xs: Vec<f64> = stroke.points().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![0.0, 5.0, 12.5]);
    }

    #[test]
    fn test_average_smoothing() {
        let config = StrokeConfig {
            smoothing: SmoothingPolicy::Average { samples: 2 },
            ..StrokeConfig::default()
        };
        let stroke = Stroke::with_points(config, line(3, 10.0, 0.5));
        let xs: Vec<f64> = stroke.points().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![0.0, 5.0, 15.0]);
    }

    #[test]
    fn test_straight_line_has_one_section() {
        let stroke = Stroke::with_points(raw_config(), line(20, 10.0, 0.5));
        assert_eq!(stroke.sections(), &[0]);
        assert_eq!(stroke.last_section(), 0);
    }

    #[test]
    fn test_reversal_starts_section() {
        let mut stroke = Stroke::new(raw_config());
        stroke.push(RawPoint::of(0.0, 0.0, 0.5));
        stroke.push(RawPoint::of(20.0, 0.0, 0.5));
        assert_eq!(stroke.sections(), &[0]);
        stroke.push(RawPoint::of(0.0, 5.0, 0.5));
        assert_eq!(stroke.sections(), &[0, 2]);
        assert_eq!(stroke.last_section(), 2);
    }

    #[test]
    fn test_splitting_disabled() {
        let config = StrokeConfig {
            sharp_corner_distance: 0.0,
            ..raw_config()
        };
        let stroke = Stroke::with_points(config, zigzag());
        assert_eq!(stroke.sections(), &[0]);
    }

    #[test]
    fn test_zigzag_sections() {
        let stroke = Stroke::with_points(raw_config(), zigzag());
        assert_eq!(stroke.sections(), &[0, 4, 7]);
    }

    #[test]
    fn test_closed_sections_are_stable() {
        let points = zigzag();
        let mut stroke = Stroke::new(raw_config());
        for raw in &points[..8] {
            stroke.push(*raw);
        }
        let closed = stroke.outline(4, 8.0);
        for raw in &points[8..] {
            stroke.push(*raw);
        }
        assert_eq!(stroke.outline(4, 8.0), closed);
    }

    #[test]
    fn test_closed_sections_ignore_spreading_clock() {
        let config = StrokeConfig {
            smoothing: SmoothingPolicy::None,
            ..StrokeConfig::default()
        };
        let points: Vec<RawPoint> = zigzag()
            .into_iter()
            .enumerate()
            .map(|(i, raw)| RawPoint::from_pointer_sample(raw.position(), raw.pressure, i as f64 * 16.0))
            .collect();
        let mut stroke = Stroke::with_points(config, points[..8].to_vec());
        assert_eq!(stroke.sections(), &[0, 4, 7]);

        let closed = stroke.outline_at(0, 8.0, 112.0);
        assert_eq!(stroke.outline_at(0, 8.0, 5_000.0), closed);
        stroke.insert(8, points[8..].to_vec()).unwrap();
        assert_eq!(stroke.outline(0, 8.0), closed);
    }

    #[test]
    fn test_rectangle_outline() {
        let stroke = Stroke::with_points(raw_config(), line(5, 10.0, 1.0));
        assert_eq!(stroke.sections(), &[0]);

        let outline = stroke.outline(0, 20.0);
        let cap = stroke.config().cap_steps - 1;
        assert_eq!(outline.len(), 5 + cap + 5 + cap);

        for i in 0..5 {
            let left = outline[i];
            assert!((left.x - 10.0 * i as f64).abs() < 1e-9);
            assert!((left.y - 10.0).abs() < 1e-9);

            let right = outline[5 + cap + i];
            assert!((right.x - 10.0 * (4 - i) as f64).abs() < 1e-9);
            assert!((right.y + 10.0).abs() < 1e-9);
        }

        for p in &outline {
            assert!(p.x >= -10.0 - 1e-9 && p.x <= 50.0 + 1e-9);
            assert!(p.y.abs() <= 10.0 + 1e-9);
        }
        // End cap reaches about one radius past the last point.
        assert!(outline.iter().any(|p| p.x > 49.0));
    }

    #[test]
    fn test_outline_is_idempotent() {
        let stroke = Stroke::with_points(StrokeConfig::default(), zigzag());
        for &section in stroke.sections() {
            assert_eq!(stroke.outline(section, 6.0), stroke.outline(section, 6.0));
        }
    }

    #[test]
    fn test_outline_past_end_is_empty() {
        let stroke = Stroke::with_points(raw_config(), line(3, 10.0, 0.5));
        assert!(stroke.outline(3, 10.0).is_empty());
    }

    #[test]
    fn test_tail_replaces_end_cap() {
        let config = StrokeConfig {
            smoothing: SmoothingPolicy::None,
            ..StrokeConfig::default()
        }
        .without_dynamics();
        let stroke = Stroke::with_points(config, line(5, 20.0, 0.5));
        let cap = stroke.config().cap_steps - 1;

        let outline = stroke.outline(0, 10.0);
        assert_eq!(outline.len(), 5 + 5 + cap);
        // The last point is tapered below the full radius of 2.5.
        assert!(outline[4].y.abs() < 2.5);

        let no_tail = StrokeConfig {
            tail: crate::config::TailConfig {
                enabled: false,
                ..Default::default()
            },
            ..stroke.config().clone()
        };
        let capped = Stroke::with_points(no_tail, line(5, 20.0, 0.5));
        assert_eq!(capped.outline(0, 10.0).len(), 5 + cap + 5 + cap);
    }

    #[test]
    fn test_tail_needs_sentinel_pressure() {
        let stroke = Stroke::with_points(raw_config(), line(5, 20.0, 0.73));
        let cap = stroke.config().cap_steps - 1;
        assert_eq!(stroke.outline(0, 10.0).len(), 5 + cap + 5 + cap);
    }

    #[test]
    fn test_radius_floor() {
        let stroke = Stroke::with_points(raw_config(), line(3, 10.0, 0.0));
        let outline = stroke.outline(0, 10.0);
        let min_radius = stroke.config().min_radius;
        assert!((outline[0].y - min_radius).abs() < 1e-9);
    }

    #[test]
    fn test_spreading() {
        let mut config = raw_config();
        config.spread.enabled = true;
        config.tail.enabled = false;
        let points: Vec<RawPoint> = (0..4)
            .map(|i| RawPoint::from_pointer_sample(KPoint::new(i as f64 * 10.0, 0.0), 0.5, i as f64 * 16.0))
            .collect();
        let stroke = Stroke::with_points(config, points);

        assert!(stroke.is_spreading(48.0));
        assert!(stroke.is_spreading(100.0));
        assert!(!stroke.is_spreading(48.0 + 150.0));

        let fresh = stroke.outline(0, 20.0);
        let settled = stroke.outline_at(0, 20.0, 10_000.0);
        // Last point of the left chain: no growth yet versus full growth.
        assert!((fresh[3].y - 5.0).abs() < 1e-9);
        assert!((settled[3].y - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_not_spreading_when_disabled() {
        let mut stroke = Stroke::new(raw_config());
        stroke.push(RawPoint::from_pointer_sample(KPoint::ZERO, 0.5, 100.0));
        assert!(!stroke.is_spreading(100.0));
        assert!(!Stroke::default().is_spreading(0.0));
    }

    #[test]
    fn test_json_roundtrip() {
        let stroke = Stroke::with_points(StrokeConfig::default(), zigzag());
        let json = serde_json::to_value(stroke.to_json()).unwrap();
        let restored = Stroke::from_json(StrokeConfig::default(), &json).unwrap();
        assert_eq!(restored.to_json(), stroke.to_json());
        assert_eq!(restored.sections(), stroke.sections());

        let text = stroke.to_json_string().unwrap();
        let restored = Stroke::from_json_str(StrokeConfig::default(), &text).unwrap();
        assert_eq!(restored.to_json(), stroke.to_json());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let config = StrokeConfig::default;
        assert!(matches!(
            Stroke::from_json(config(), &serde_json::json!({"points": []})),
            Err(StrokeError::Json(_))
        ));
        assert!(matches!(
            Stroke::from_json_str(config(), "[[1.0, 2.0]]"),
            Err(StrokeError::Json(_))
        ));
        assert!(matches!(
            Stroke::from_json_str(config(), "[[1.0, 2.0, 3.0]]"),
            Err(StrokeError::Malformed(_))
        ));
        assert!(Stroke::from_json_str(config(), "[]").unwrap().is_empty());
    }

    #[test]
    fn test_insert_in_order() {
        let mut stroke = Stroke::new(raw_config());
        stroke.insert(0, line(3, 10.0, 0.5)).unwrap();
        stroke.insert(3, vec![RawPoint::of(30.0, 0.0, 0.5)]).unwrap();
        assert_eq!(stroke.len(), 4);
        assert_eq!(stroke.pending_len(), 0);
    }

    #[test]
    fn test_insert_out_of_order_matches_push() {
        let points = zigzag();
        let ordered = Stroke::with_points(raw_config(), points.clone());

        let mut stroke = Stroke::new(raw_config());
        stroke.insert(8, points[8..].to_vec()).unwrap();
        stroke.insert(4, points[4..8].to_vec()).unwrap();
        assert_eq!(stroke.len(), 0);
        assert_eq!(stroke.pending_len(), 2);

        stroke.insert(0, points[..4].to_vec()).unwrap();
        assert_eq!(stroke.pending_len(), 0);
        assert_eq!(stroke.len(), ordered.len());
        assert_eq!(stroke.sections(), ordered.sections());
        assert_eq!(stroke.to_json(), ordered.to_json());
    }

    #[test]
    fn test_insert_conflict_leaves_stroke_unchanged() {
        let mut stroke = Stroke::with_points(raw_config(), line(3, 10.0, 0.5));
        let before = stroke.to_json();
        let err = stroke.insert(1, line(2, 10.0, 0.9)).unwrap_err();
        assert!(matches!(err, StrokeError::IndexConflict { index: 1, len: 3 }));
        assert_eq!(stroke.to_json(), before);
    }

    #[test]
    fn test_pending_overwrite_is_allowed() {
        let mut stroke = Stroke::new(raw_config());
        stroke.insert(2, vec![RawPoint::of(99.0, 0.0, 0.5)]).unwrap();
        stroke.insert(2, vec![RawPoint::of(20.0, 0.0, 0.5)]).unwrap();
        assert_eq!(stroke.pending_len(), 1);
        stroke.insert(0, line(2, 10.0, 0.5)).unwrap();
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.points()[2].position.x, 20.0);
    }

    #[test]
    fn test_stale_pending_batch_is_dropped() {
        let mut stroke = Stroke::new(raw_config());
        stroke.insert(2, vec![RawPoint::of(30.0, 0.0, 0.5)]).unwrap();
        // The second sample is skipped, so index 2 is never reached exactly.
        let batch = [0.0, 1.0, 10.0, 20.0]
            .iter()
            .map(|&x| RawPoint::of(x, 0.0, 0.5))
            .collect();
        stroke.insert(0, batch).unwrap();
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.pending_len(), 0);
    }

    proptest! {
        #[test]
        fn prop_length_and_sections(samples in prop::collection::vec((-200.0f64..200.0, -200.0f64..200.0, 0.0f64..=1.0), 0..60)) {
            let mut stroke = Stroke::default();
            let mut previous_length = 0.0;
            for (x, y, pressure) in samples {
                stroke.push(RawPoint::of(x, y, pressure));
                prop_assert!(stroke.length() >= previous_length);
                previous_length = stroke.length();

                let sections = stroke.sections();
                prop_assert_eq!(sections[0], 0);
                prop_assert!(sections.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(sections.iter().all(|&s| s < stroke.len().max(1)));
            }

            let sum: f64 = stroke.points().windows(2).map(|w| distance(w[0].pos(), w[1].pos())).sum();
            prop_assert!((sum - stroke.length()).abs() < 1e-6);
            for w in stroke.points().windows(2) {
                prop_assert!(w[1].distance >= stroke.config().skip_distance - 1e-9);
            }
        }
    }
}
