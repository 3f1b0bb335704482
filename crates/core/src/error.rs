//! Error types for the ambient-fx configuration surface.
//!
//! Animation ticks never fail. These errors only come out of parsing scenes,
//! params, colors and palette names, or writing output.

use thiserror::Error;

/// Errors produced while building or exporting effects.
#[derive(Debug, Error)]
pub enum FxError {
    /// Width or height was zero (or overflowed) where a sized scene is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// No effect is registered under this name.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// No glyph or color palette is registered under this name.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A parameter was present but unusable.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Writing a trace or reading a scene failed.
    #[error("i/o error: {0}")]
    Io(String),
}
