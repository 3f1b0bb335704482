//! The `Animator` trait every effect implements.
//!
//! The trait is object-safe so hosts can drive a heterogeneous list of
//! effects as `Box<dyn Animator>`.

use crate::geometry::Viewport;
use crate::pointer::PointerState;
use crate::style::StyleRecord;
use serde_json::Value;

/// A decorative effect advanced in fixed ticks from the shared pointer.
///
/// Ticks are infallible: inputs are host geometry and configuration that was
/// already sanitized when the effect was built.
pub trait Animator {
    /// Advance one fixed tick using the current pointer snapshot.
    fn tick(&mut self, pointer: &PointerState);

    /// The surface size changed. Must tolerate rapid and zero-sized updates.
    fn resize(&mut self, viewport: Viewport);

    /// Style records describing the current frame.
    fn styles(&self) -> Vec<StyleRecord>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Types, ranges, defaults and descriptions of every parameter.
    fn param_schema(&self) -> Value;

    /// Stop animating and release per-element state. Ticks afterwards are no-ops.
    fn teardown(&mut self) {}
}
