//! Stroke tuning.
//!
//! Every stroke carries its own [`StrokeConfig`], so strokes drawn with
//! different tools can coexist. All fields have defaults and the config can
//! be loaded from TOML:
//!
//! ```toml
//! skip_distance = 5.0
//!
//! [smoothing]
//! kind = "average"
//! samples = 4
//!
//! [tail]
//! enabled = false
//! ```

use crate::error::StrokeResult;
use serde::{Deserialize, Serialize};

/// How raw samples are smoothed before they become stroke points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmoothingPolicy {
    /// Raw positions are used as-is.
    None,
    /// Midpoint of the raw sample and the previous stored position.
    #[default]
    Midpoint,
    /// Rolling average of the last `samples` raw samples.
    Average { samples: usize },
}

/// Tapered ending drawn instead of an end cap while a stroke looks like it
/// was lifted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailConfig {
    pub enabled: bool,
    /// Exact pressures reported by devices without a pressure sensor.
    pub sentinel_pressures: Vec<f64>,
    /// The final segment must be at least `size * min_segment_ratio` long.
    pub min_segment_ratio: f64,
    /// Number of trailing points that are tapered.
    pub window: usize,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sentinel_pressures: vec![0.5, 1.0],
            min_segment_ratio: 1.0,
            window: 3,
        }
    }
}

/// Time-based width growth of recent points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    pub enabled: bool,
    /// Milliseconds after a sample during which it keeps growing.
    pub interval: f64,
    /// Pressure added once the interval has fully elapsed.
    pub gain: f64,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 150.0,
            gain: 0.1,
        }
    }
}

/// Spring used to smooth simulated pressure along the stroke.
///
/// The defaults are critically damped for a one-frame step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub enabled: bool,
    pub stiffness: f64,
    pub damping: f64,
    pub precision: f64,
    /// Largest integration step, in frames.
    pub max_step: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stiffness: 0.135,
            damping: 0.6,
            precision: 0.001,
            max_step: 4.0,
        }
    }
}

/// Tunables for a single stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub smoothing: SmoothingPolicy,
    /// Minimum spacing between retained points.
    pub skip_distance: f64,
    /// Segments at least this long never start a new section.
    pub sharp_corner_distance: f64,
    /// Points skipped after a section boundary before the next split.
    pub section_cooldown: usize,
    /// Radius floor so a stroke never vanishes.
    pub min_radius: f64,
    /// How quickly simulated pressure follows recorded pressure.
    pub pressure_change_speed: f64,
    /// Angular steps of a half-circle cap.
    pub cap_steps: usize,
    /// Angular steps of a dot.
    pub dot_steps: usize,
    pub dot_size_ratio: f64,
    pub tail: TailConfig,
    pub spread: SpreadConfig,
    pub spring: SpringConfig,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingPolicy::Midpoint,
            skip_distance: 4.0,
            sharp_corner_distance: 1000.0,
            section_cooldown: 2,
            min_radius: 0.5,
            pressure_change_speed: 2.0,
            cap_steps: 13,
            dot_steps: 26,
            dot_size_ratio: 0.5,
            tail: TailConfig::default(),
            spread: SpreadConfig::default(),
            spring: SpringConfig::default(),
        }
    }
}

impl StrokeConfig {
    /// Parse a config from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(input: &str) -> StrokeResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Config for replaying points that were already smoothed and filtered
    /// by another stroke, so they are stored exactly as received.
    pub fn replica() -> Self {
        Self {
            smoothing: SmoothingPolicy::None,
            skip_distance: 0.0,
            ..Self::default()
        }
    }

    /// The simplest variant: no time-based spreading and no spring.
    pub fn without_dynamics(mut self) -> Self {
        self.spread.enabled = false;
        self.spring.enabled = false;
        self
    }
}
