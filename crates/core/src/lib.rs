#![deny(unsafe_code)]
//! Core types for ambient-fx, a library of pointer-reactive decorative effects.
//!
//! Provides the `Animator` trait, the shared `PointerObserver`, geometry
//! (`Viewport`, `Rect`), `Spring` smoothing, `Easing` curves, `FloatMotion`,
//! the fixed-interval `TickSchedule`, the `Xorshift64` PRNG, glyph palettes,
//! style records handed to renderers, `Scene` and parameter helpers.

pub mod animator;
pub mod color;
pub mod easing;
pub mod error;
pub mod float;
pub mod geometry;
pub mod palette;
pub mod params;
pub mod pointer;
pub mod prng;
pub mod scene;
pub mod schedule;
pub mod spring;
pub mod style;

pub use animator::Animator;
pub use color::Srgb;
pub use easing::{CubicBezier, Easing};
pub use error::FxError;
pub use float::FloatMotion;
pub use geometry::{Rect, Viewport};
pub use glam::DVec2;
pub use palette::{Glyph, GlyphPalette};
pub use pointer::{PointerObserver, PointerState};
pub use prng::Xorshift64;
pub use scene::Scene;
pub use schedule::TickSchedule;
pub use spring::{Spring, SpringConfig};
pub use style::{LayerOffset, PanelStyle, ParticleStyle, StyleRecord};
