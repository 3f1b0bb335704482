//! Per-tick style records handed to the renderer.
//!
//! Effects never touch a rendering surface. Each tick they describe what an
//! element should look like and the host applies the record however it wants
//! (direct style writes, a virtual DOM, a trace file).

use crate::color::Srgb;
use serde::{Deserialize, Serialize};

/// Placement and look of one particle glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleStyle {
    pub id: u32,
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    /// Degrees.
    pub rotation: f64,
    /// Font size in px.
    pub size: f64,
    pub color: Srgb,
    pub opacity: f64,
    pub scale: f64,
}

/// Translation of one parallax layer inside a tilted panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerOffset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Transform and glare of a tilted panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    /// Degrees around the x axis.
    pub rotate_x: f64,
    /// Degrees around the y axis.
    pub rotate_y: f64,
    pub scale: f64,
    /// Perspective distance in px.
    pub perspective: f64,
    /// Idle float translation in px.
    pub translate_x: f64,
    pub translate_y: f64,
    /// Glare centre, percent of panel width/height.
    pub glare_x: f64,
    pub glare_y: f64,
    pub glare_opacity: f64,
    pub glare_color: Srgb,
    /// Alpha at the centre of the glare gradient.
    pub glare_alpha: f64,
    pub edge_highlight: f64,
    /// Parallax offsets for the background, content and card layers.
    pub layers: Vec<LayerOffset>,
}

/// Any record an effect can emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleRecord {
    Particle(ParticleStyle),
    Panel(PanelStyle),
}
