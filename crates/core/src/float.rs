//! Idle "floating" drift for panels and badges.
//!
//! The phase runs from `initial_phase` to `initial_phase + 2π` over
//! `duration` with an ease-in-out curve, then repeats. The vertical offset is
//! `sin(phase) * amplitude_y` and the horizontal offset `sin(phase / 2) *
//! amplitude_x`, so x completes half a wave per cycle.

use crate::easing::Easing;
use crate::prng::Xorshift64;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatMotion {
    pub amplitude_x: f64,
    pub amplitude_y: f64,
    pub duration: Duration,
    pub delay: Duration,
    pub initial_phase: f64,
    pub easing: Easing,
}

impl FloatMotion {
    /// Vertical bob only, starting at phase 0.
    pub fn vertical(amplitude: f64, duration: Duration) -> Self {
        Self {
            amplitude_x: 0.0,
            amplitude_y: amplitude,
            duration,
            delay: Duration::ZERO,
            initial_phase: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    pub fn with_sway(mut self, amplitude_x: f64) -> Self {
        self.amplitude_x = amplitude_x;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Randomizes the starting phase so neighbouring elements drift out of step.
    pub fn with_random_phase(mut self, rng: &mut Xorshift64) -> Self {
        self.initial_phase = rng.next_range(0.0, TAU);
        self
    }

    /// Phase in radians at `elapsed` since mount. `None` while still delayed.
    pub fn phase_at(&self, elapsed: Duration) -> Option<f64> {
        let running = elapsed.checked_sub(self.delay)?;
        let period = self.duration.as_secs_f64();
        if period <= 0.0 {
            return Some(self.initial_phase);
        }
        let cycle = (running.as_secs_f64() / period).fract();
        Some(self.initial_phase + self.easing.apply(cycle) * TAU)
    }

    /// Translation at `elapsed`. Zero during the delay.
    pub fn offset_at(&self, elapsed: Duration) -> DVec2 {
        match self.phase_at(elapsed) {
            Some(phase) => DVec2::new(
                (phase * 0.5).sin() * self.amplitude_x,
                phase.sin() * self.amplitude_y,
            ),
            None => DVec2::ZERO,
        }
    }
}

impl Default for FloatMotion {
    fn default() -> Self {
        Self::vertical(5.0, Duration::from_secs(4))
    }
}
