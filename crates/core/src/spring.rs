//! Damped spring used to smooth tilt, glare and scale values.
//!
//! Integrates `a = (-k (x - target) - c v) / m` with semi-implicit Euler over
//! real seconds, so behaviour does not depend on how often the host ticks.
//! Once both the distance to target and the speed fall under the rest
//! thresholds the spring snaps to its target and stops.

use serde::{Deserialize, Serialize};

/// Distance under which a spring may come to rest.
pub const DEFAULT_REST_DELTA: f64 = 0.01;
/// Speed (units/second) under which a spring may come to rest.
pub const DEFAULT_REST_SPEED: f64 = 0.01;
/// Largest integration step; longer frames are split into sub-steps.
const MAX_SUBSTEP: f64 = 1.0 / 120.0;
/// Upper bound on sub-steps in a single `step` call.
const MAX_SUBSTEPS: u32 = 100_000;

/// Sub-step that keeps semi-implicit Euler stable: with `a = h²k/m` and
/// `b = hc/m` the integrator is stable while `a + 2b < 4`; each term is held
/// to 0.5 here.
fn stable_substep(stiffness: f64, damping: f64, mass: f64) -> f64 {
    let mut h = MAX_SUBSTEP;
    if stiffness > 0.0 {
        h = h.min((mass / (2.0 * stiffness)).sqrt());
    }
    if damping > 0.0 {
        h = h.min(mass / (4.0 * damping));
    }
    if h.is_finite() && h > 0.0 {
        h
    } else {
        MAX_SUBSTEP
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_delta: f64,
    pub rest_speed: f64,
}

impl SpringConfig {
    /// Config with the default mass and rest thresholds.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            rest_delta: DEFAULT_REST_DELTA,
            rest_speed: DEFAULT_REST_SPEED,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// `c / (2 sqrt(k m))`: 1 is critical, below 1 overshoots.
    pub fn damping_ratio(&self) -> f64 {
        let denom = 2.0 * (self.stiffness * self.mass).sqrt();
        if denom > 0.0 {
            self.damping / denom
        } else {
            f64::INFINITY
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(200.0, 15.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
}

impl Spring {
    /// A spring resting at `value`.
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Sets a new target; the value moves there over subsequent steps.
    /// Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Teleports to `value` and rests there.
    pub fn jump(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
            self.velocity = 0.0;
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advances by `dt` seconds. Returns true while still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.is_at_rest() {
            return false;
        }
        if !(dt.is_finite() && dt > 0.0) {
            return true;
        }
        let cfg = self.config;
        let mass = if cfg.mass > 0.0 { cfg.mass } else { 1.0 };
        let h_max = stable_substep(cfg.stiffness, cfg.damping, mass);
        let substeps = (dt / h_max).ceil().clamp(1.0, MAX_SUBSTEPS as f64) as u32;
        // past MAX_SUBSTEPS the frame is truncated rather than destabilized
        let h = (dt / substeps as f64).min(h_max);
        for _ in 0..substeps {
            let spring_force = -cfg.stiffness * (self.value - self.target);
            let damping_force = -cfg.damping * self.velocity;
            self.velocity += (spring_force + damping_force) / mass * h;
            self.value += self.velocity * h;
        }
        if !(self.value.is_finite() && self.velocity.is_finite()) {
            tracing::warn!(value = self.target, "spring diverged, snapped to target");
            self.value = self.target;
            self.velocity = 0.0;
            return false;
        }
        if (self.value - self.target).abs() < cfg.rest_delta
            && self.velocity.abs() < cfg.rest_speed
        {
            self.value = self.target;
            self.velocity = 0.0;
            return false;
        }
        true
    }
}
