//! Shared pointer position.
//!
//! One [`PointerObserver`] owns the value and is the only writer (the host's
//! pointer-move listener). Effects read a [`PointerState`] snapshot by
//! reference each tick. Each event replaces the snapshot wholesale.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the last observed pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    /// Last position in viewport coordinates; `None` before the first event
    /// or after the pointer left the window.
    pub position: Option<DVec2>,
    /// Number of accepted events so far.
    pub sequence: u64,
}

impl PointerState {
    /// Snapshot at a fixed position, for tests and offline runs.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Some(DVec2::new(x, y)),
            sequence: 0,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

/// Single-writer holder of the current [`PointerState`].
#[derive(Debug, Default)]
pub struct PointerObserver {
    current: PointerState,
}

impl PointerObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer-move event and returns the new snapshot.
    ///
    /// Non-finite coordinates are dropped and the previous snapshot is kept.
    pub fn record(&mut self, x: f64, y: f64) -> PointerState {
        if !(x.is_finite() && y.is_finite()) {
            tracing::debug!(x, y, "ignoring non-finite pointer event");
            return self.current;
        }
        self.current = PointerState {
            position: Some(DVec2::new(x, y)),
            sequence: self.current.sequence + 1,
        };
        self.current
    }

    /// Marks the pointer as gone (e.g. it left the window).
    pub fn clear(&mut self) -> PointerState {
        self.current = PointerState {
            position: None,
            sequence: self.current.sequence + 1,
        };
        self.current
    }

    /// Current snapshot.
    pub fn state(&self) -> &PointerState {
        &self.current
    }
}
