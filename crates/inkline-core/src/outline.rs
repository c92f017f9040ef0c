//! Outline generation for one section of a stroke.

use crate::config::StrokeConfig;
use crate::point::Point;
use crate::spring::Spring;
use crate::vector::{dot, lerp, normalize, perpendicular, project, rotate_about};
use kurbo::{Point as KPoint, Vec2};
use std::f64::consts::{PI, TAU};

/// Sample spacing the spring is tuned for, in milliseconds.
const FRAME_MS: f64 = 16.0;

/// Build the closed outline of `points`.
///
/// `open` is set for the last section of a stroke that may still grow.
/// `now` is the time spreading is evaluated at.
pub(crate) fn generate(
    points: &[Point],
    config: &StrokeConfig,
    size: f64,
    open: bool,
    now: f64,
) -> Vec<KPoint> {
    match points {
        [] => Vec::new(),
        [single] => dot_outline(single, config, size, now),
        _ => stroke_outline(points, config, size, open, now),
    }
}

fn dot_outline(point: &Point, config: &StrokeConfig, size: f64, now: f64) -> Vec<KPoint> {
    let pressure = (point.pressure() + spread_boost(point, config, now)).min(1.0);
    let radius = (size * config.dot_size_ratio * pressure).max(config.min_radius);
    let steps = config.dot_steps.max(3);
    let center = point.pos();

    (0..steps)
        .map(|k| project(center, Vec2::from_angle(TAU * k as f64 / steps as f64), radius))
        .collect()
}

fn stroke_outline(
    points: &[Point],
    config: &StrokeConfig,
    size: f64,
    open: bool,
    now: f64,
) -> Vec<KPoint> {
    let mut points = points.to_vec();
    let tail = open && is_lifted(&points, config, size);
    if tail {
        taper(&mut points, config.tail.window);
    }

    let pressures = pressures(&points, config, size, now);
    let n = points.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    for (i, point) in points.iter().enumerate() {
        let radius = (size * 0.5 * pressures[i]).max(config.min_radius);
        let offset = perpendicular(local_direction(&points, i));
        left.push(project(point.pos(), offset, radius));
        right.push(project(point.pos(), offset, -radius));
    }

    let cap = config.cap_steps.max(1);
    let mut outline = Vec::with_capacity(2 * n + 2 * cap);
    outline.extend_from_slice(&left);
    if !tail {
        outline.extend(half_circle(points[n - 1].pos(), left[n - 1], cap));
    }
    outline.extend(right.iter().rev());
    outline.extend(half_circle(points[0].pos(), right[0], cap));
    outline
}

/// Whether the stroke ending looks like the input was released: a sentinel
/// pressure from a device without a pressure sensor and a long final segment.
fn is_lifted(points: &[Point], config: &StrokeConfig, size: f64) -> bool {
    let tail = &config.tail;
    let Some(last) = points.last() else {
        return false;
    };
    tail.enabled
        && tail.window > 0
        && tail.sentinel_pressures.contains(&last.pressure())
        && last.distance >= size * tail.min_segment_ratio
}

/// Scale down pressure over the last `window` points, never touching the first.
fn taper(points: &mut [Point], window: usize) {
    let n = points.len();
    let window = window.min(n - 1);
    for k in 0..window {
        let i = n - 1 - k;
        let factor = (k + 1) as f64 / (window + 1) as f64;
        points[i] = points[i].with_pressure(points[i].pressure() * factor);
    }
}

/// Pressure per point after neighbour simulation, spreading and the spring.
fn pressures(points: &[Point], config: &StrokeConfig, size: f64, now: f64) -> Vec<f64> {
    let size = size.max(f64::EPSILON);
    let mut simulated = points[0].pressure();
    let mut spring: Option<Spring> = None;
    let mut out = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            // Close neighbours keep the previous pressure.
            let weight = (config.pressure_change_speed * point.distance / size).min(1.0);
            simulated += (point.pressure() - simulated) * weight;
        }

        let target = (simulated + spread_boost(point, config, now)).min(1.0);
        let pressure = if config.spring.enabled {
            match spring.as_mut() {
                None => {
                    spring = Some(Spring::new(target, &config.spring));
                    target
                }
                Some(spring) => {
                    let elapsed = point.timestamp() - points[i - 1].timestamp();
                    let dt = (elapsed / FRAME_MS).clamp(1.0, config.spring.max_step.max(1.0));
                    spring.set(target);
                    spring.update(dt).clamp(0.0, 1.0)
                }
            }
        } else {
            target
        };
        out.push(pressure);
    }

    out
}

/// Extra pressure a point has gained by `now`.
fn spread_boost(point: &Point, config: &StrokeConfig, now: f64) -> f64 {
    let spread = &config.spread;
    if !spread.enabled || spread.interval <= 0.0 {
        return 0.0;
    }
    let elapsed = (now - point.timestamp()).clamp(0.0, spread.interval);
    spread.gain * elapsed / spread.interval
}

/// Direction at point `i`, blending the incoming and outgoing segments
/// when they roughly agree.
fn local_direction(points: &[Point], i: usize) -> Vec2 {
    if i == 0 {
        return points[1].direction;
    }

    let incoming = points[i].direction;
    let Some(next) = points.get(i + 1) else {
        return incoming;
    };

    let agreement = dot(incoming, next.direction).clamp(0.0, 1.0);
    let blended = lerp(incoming, next.direction, 0.5 * agreement);
    if blended.hypot() > f64::EPSILON {
        normalize(blended)
    } else {
        incoming
    }
}

/// Points of a half circle around `center`, starting after `from` and
/// stopping before its opposite.
fn half_circle(center: KPoint, from: KPoint, steps: usize) -> impl Iterator<Item = KPoint> {
    (1..steps).map(move |k| rotate_about(from, center, -PI * k as f64 / steps as f64))
}
