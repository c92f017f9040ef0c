//! Raw input samples and the per-point geometry derived from them.

use kurbo::{Point as KPoint, Vec2};
use serde::{Deserialize, Serialize};

/// A raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
    /// Pressure in `[0, 1]`.
    pub pressure: f64,
    /// Monotonic timestamp in milliseconds, 0 if unknown.
    #[serde(default)]
    pub timestamp: f64,
}

impl RawPoint {
    /// Pressure reported by devices that have no pressure sensor.
    pub const DEFAULT_PRESSURE: f64 = 0.5;

    /// Create a sample without timing information.
    pub fn of(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure: pressure.clamp(0.0, 1.0),
            timestamp: 0.0,
        }
    }

    /// Create a sample from a pointer event.
    pub fn from_pointer_sample(position: KPoint, pressure: f64, timestamp: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            pressure: pressure.clamp(0.0, 1.0),
            timestamp,
        }
    }

    pub fn position(&self) -> KPoint {
        KPoint::new(self.x, self.y)
    }

    /// Same sample moved to `position`.
    pub(crate) fn at(&self, position: KPoint) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..*self
        }
    }
}

/// A retained point of a stroke with its derived geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: RawPoint,
    /// Unit vector from this point back to its predecessor.
    pub direction: Vec2,
    /// Distance to the previous point.
    pub distance: f64,
    /// Stroke length up to and including this point.
    pub running_length: f64,
}

impl Point {
    /// Direction given to the first point of a stroke, which has no predecessor.
    pub const FIRST_DIRECTION: Vec2 = Vec2::new(1.0, 1.0);

    /// The first point of a stroke.
    pub fn first(position: RawPoint) -> Self {
        Self {
            position,
            direction: Self::FIRST_DIRECTION,
            distance: 0.0,
            running_length: 0.0,
        }
    }

    /// A copy of this point with a different pressure.
    pub fn with_pressure(&self, pressure: f64) -> Self {
        Self {
            position: RawPoint {
                pressure,
                ..self.position
            },
            ..*self
        }
    }

    pub fn pos(&self) -> KPoint {
        self.position.position()
    }

    pub fn pressure(&self) -> f64 {
        self.position.pressure
    }

    pub fn timestamp(&self) -> f64 {
        self.position.timestamp
    }
}
