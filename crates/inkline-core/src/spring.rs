//! Single-value damped spring.

use crate::config::SpringConfig;

/// A damped spring that moves `value` toward `target` one step at a time.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub value: f64,
    last: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    precision: f64,
}

impl Spring {
    /// A spring at rest at `value`.
    pub fn new(value: f64, config: &SpringConfig) -> Self {
        Self {
            value,
            last: value,
            target: value,
            stiffness: config.stiffness,
            damping: config.damping,
            precision: config.precision,
        }
    }

    /// Set a new target without moving the value.
    pub fn set(&mut self, target: f64) {
        self.target = target;
    }

    /// Current target.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled on its target.
    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.last == self.target
    }

    /// Advance by `dt` frames and return the new value.
    ///
    /// Steps longer than one frame are split into equal substeps of at most
    /// one frame, so the damping that holds for a single frame holds for any
    /// `dt`. Non-positive or non-finite steps are ignored.
    pub fn update(&mut self, dt: f64) -> f64 {
        if !(dt > 0.0 && dt.is_finite()) {
            return self.value;
        }

        let substeps = dt.ceil().max(1.0);
        let h = dt / substeps;
        for _ in 0..substeps as usize {
            self.step(h);
        }
        self.value
    }

    fn step(&mut self, dt: f64) {
        let velocity = (self.value - self.last) / dt;
        let acceleration = self.stiffness * (self.target - self.value) - self.damping * velocity;
        let step = (velocity + acceleration) * dt;

        self.last = self.value;
        if step.abs() < self.precision && (self.target - self.value).abs() < self.precision {
            self.value = self.target;
            self.last = self.target;
        } else {
            self.value += step;
        }
    }
}
