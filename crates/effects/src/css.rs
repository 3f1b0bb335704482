//! CSS rendering of style records.
//!
//! Hosts that style DOM nodes (the WASM bindings, or anything that inlines
//! `style` attributes) apply these declarations verbatim. A tilt panel
//! renders to three kinds of element: the panel itself, its glare overlay
//! and one wrapper per parallax layer.

use ambient_fx_core::{LayerOffset, PanelStyle, ParticleStyle, StyleRecord};

/// Where the glare gradient fades out, percent of the radius.
const GLARE_FADE: u32 = 60;
/// Edge highlight alpha at full elevation.
const EDGE_ALPHA: f64 = 0.12;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

impl Declaration {
    fn new(property: &'static str, value: String) -> Self {
        Self { property, value }
    }
}

/// Formats a CSS number with at most three decimals and no trailing zeros.
/// Non-finite values render as `0`.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".into();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".into()
    } else {
        s.to_string()
    }
}

pub fn particle_declarations(p: &ParticleStyle) -> Vec<Declaration> {
    vec![
        Declaration::new(
            "transform",
            format!(
                "translate({}px, {}px) rotate({}deg) scale({})",
                num(p.x),
                num(p.y),
                num(p.rotation),
                num(p.scale)
            ),
        ),
        Declaration::new("font-size", format!("{}px", num(p.size))),
        Declaration::new("opacity", num(p.opacity)),
        Declaration::new("color", p.color.to_hex()),
    ]
}

/// Transform and edge highlight of the tilted panel.
pub fn panel_declarations(p: &PanelStyle) -> Vec<Declaration> {
    vec![
        Declaration::new(
            "transform",
            format!(
                "perspective({}px) translate({}px, {}px) rotateX({}deg) rotateY({}deg) scale({})",
                num(p.perspective),
                num(p.translate_x),
                num(p.translate_y),
                num(p.rotate_x),
                num(p.rotate_y),
                num(p.scale)
            ),
        ),
        Declaration::new(
            "box-shadow",
            format!(
                "inset 0 0 0 1px rgba(255, 255, 255, {})",
                num(p.edge_highlight * EDGE_ALPHA)
            ),
        ),
    ]
}

/// Radial highlight centred on the glare position.
pub fn glare_declarations(p: &PanelStyle) -> Vec<Declaration> {
    vec![
        Declaration::new(
            "background",
            format!(
                "radial-gradient(circle at {}% {}%, {} 0%, transparent {GLARE_FADE}%)",
                num(p.glare_x),
                num(p.glare_y),
                p.glare_color.css_rgba(p.glare_alpha)
            ),
        ),
        Declaration::new("opacity", num(p.glare_opacity)),
    ]
}

pub fn layer_declarations(layer: &LayerOffset) -> Vec<Declaration> {
    vec![Declaration::new(
        "transform",
        format!(
            "translate3d({}px, {}px, {}px)",
            num(layer.x),
            num(layer.y),
            num(layer.z)
        ),
    )]
}

/// Declarations for the record's primary element.
pub fn declarations(record: &StyleRecord) -> Vec<Declaration> {
    match record {
        StyleRecord::Particle(p) => particle_declarations(p),
        StyleRecord::Panel(p) => panel_declarations(p),
    }
}

/// Joins declarations into inline `style` attribute text.
pub fn css_text(decls: &[Declaration]) -> String {
    decls
        .iter()
        .map(|d| format!("{}: {};", d.property, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}
