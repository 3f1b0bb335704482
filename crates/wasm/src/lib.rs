#![deny(unsafe_code)]
//! Browser bindings: drive effects from DOM pointer events and write their
//! style records straight into element styles.
//!
//! The host owns the animation frame loop and calls `tick` (fixed step) or
//! `advance` (wall-clock milliseconds) once per frame, then `apply`.

use ambient_fx_core::{Animator, FxError, PointerObserver, Rect, Viewport};
use ambient_fx_effects::css::{self, Declaration};
use ambient_fx_particles::{ParticleField, ParticleParams};
use ambient_fx_tilt::{TiltEffect, TiltParams};
use serde_json::Value;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Marks the glare overlay inside a tilt panel.
const GLARE_SELECTOR: &str = "[data-fx=glare]";
/// Marks parallax layers inside a tilt panel, back to front.
const LAYER_SELECTOR: &str = "[data-fx-layer]";
/// Longest frame `advance` accepts; a backgrounded tab can report minutes.
const MAX_FRAME_MS: f64 = 1000.0;
/// Inline style of freshly created particle spans.
const PARTICLE_BASE_STYLE: &str =
    "position: absolute; left: 0; top: 0; pointer-events: none; user-select: none;";

fn parse_params(params_json: &str) -> Result<Value, FxError> {
    if params_json.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(params_json).map_err(|e| FxError::InvalidParam {
        name: "params".into(),
        reason: e.to_string(),
    })
}

/// Host frame time as a `Duration`, capped at [`MAX_FRAME_MS`]. Zero,
/// negative or non-finite times yield `None`.
fn frame_duration(elapsed_ms: f64) -> Option<Duration> {
    if !(elapsed_ms.is_finite() && elapsed_ms > 0.0) {
        return None;
    }
    Some(Duration::from_secs_f64(elapsed_ms.min(MAX_FRAME_MS) / 1000.0))
}

fn js_err(e: FxError) -> JsError {
    JsError::new(&e.to_string())
}

fn apply_declarations(el: &HtmlElement, decls: &[Declaration]) -> Result<(), JsValue> {
    let style = el.style();
    for d in decls {
        style.set_property(d.property, &d.value)?;
    }
    Ok(())
}

/// A full-surface layer of drifting glyphs, one `<span>` per particle.
#[wasm_bindgen]
pub struct ParticleLayer {
    field: ParticleField,
    observer: PointerObserver,
}

#[wasm_bindgen]
impl ParticleLayer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        seed: u32,
        params_json: &str,
    ) -> Result<ParticleLayer, JsError> {
        let params = parse_params(params_json).map_err(js_err)?;
        let field = ParticleField::new(
            Viewport::new(width, height),
            u64::from(seed),
            ParticleParams::from_json(&params),
        )
        .map_err(js_err)?;
        Ok(Self {
            field,
            observer: PointerObserver::new(),
        })
    }

    /// Feed a pointer position in layer coordinates.
    pub fn pointer(&mut self, x: f64, y: f64) {
        self.observer.record(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.observer.clear();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(Viewport::new(width, height));
    }

    /// One fixed tick.
    pub fn tick(&mut self) {
        let pointer = *self.observer.state();
        self.field.tick(&pointer);
    }

    /// Runs as many fixed ticks as `elapsed_ms` of wall-clock time covers.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let Some(elapsed) = frame_duration(elapsed_ms) else {
            return 0;
        };
        let pointer = *self.observer.state();
        self.field.advance(elapsed, &pointer)
    }

    pub fn len(&self) -> usize {
        self.field.particles().len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.particles().is_empty()
    }

    pub fn styles_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.field.styles()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Syncs `container`'s children with the particles: creates or removes
    /// spans as needed, then writes each particle's transform.
    pub fn apply(&self, container: &HtmlElement) -> Result<(), JsValue> {
        let styles = self.field.particle_styles();
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let children = container.children();

        while children.length() as usize > styles.len() {
            if let Some(last) = container.last_element_child() {
                last.remove();
            }
        }
        while (children.length() as usize) < styles.len() {
            let span = document.create_element("span")?;
            span.set_attribute("style", PARTICLE_BASE_STYLE)?;
            span.set_attribute("aria-hidden", "true")?;
            container.append_child(&span)?;
        }

        for (i, style) in styles.iter().enumerate() {
            let Some(el) = children.item(i as u32) else {
                continue;
            };
            let el: HtmlElement = el.dyn_into()?;
            if el.text_content().as_deref() != Some(style.symbol.as_str()) {
                el.set_text_content(Some(&style.symbol));
            }
            apply_declarations(&el, &css::particle_declarations(style))?;
        }
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.field.teardown();
    }
}

/// Tilt and glare for one panel element.
#[wasm_bindgen]
pub struct TiltPanel {
    effect: TiltEffect,
    observer: PointerObserver,
}

#[wasm_bindgen]
impl TiltPanel {
    /// `x, y, width, height` are the panel's bounding box in the same
    /// coordinates later passed to `pointer`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        seed: u32,
        params_json: &str,
    ) -> Result<TiltPanel, JsError> {
        let params = parse_params(params_json).map_err(js_err)?;
        let effect = TiltEffect::new(
            Rect::new(x, y, width, height),
            u64::from(seed),
            TiltParams::from_json(&params).map_err(js_err)?,
        )
        .map_err(js_err)?;
        Ok(Self {
            effect,
            observer: PointerObserver::new(),
        })
    }

    pub fn pointer(&mut self, x: f64, y: f64) {
        self.observer.record(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.observer.clear();
    }

    /// The panel moved or resized (scroll, layout).
    pub fn set_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.effect.set_bounds(Rect::new(x, y, width, height));
    }

    /// The panel's size changed; its origin stays put.
    pub fn resize(&mut self, width: f64, height: f64) {
        let origin = self.effect.bounds();
        self.effect
            .set_bounds(Rect::new(origin.x, origin.y, width.max(0.0), height.max(0.0)));
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        self.effect.set_suspended(suspended);
    }

    pub fn tick(&mut self) {
        let pointer = *self.observer.state();
        self.effect.tick(&pointer);
    }

    /// True once the panel has settled and ticking can pause.
    pub fn is_settled(&self) -> bool {
        self.effect.is_settled()
    }

    pub fn styles_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.effect.styles()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Writes the transform onto `container`, the gradient onto its
    /// `[data-fx=glare]` child and parallax onto `[data-fx-layer]` children.
    pub fn apply(&self, container: &HtmlElement) -> Result<(), JsValue> {
        let style = self.effect.panel_style();
        apply_declarations(container, &css::panel_declarations(&style))?;

        if let Some(glare) = container.query_selector(GLARE_SELECTOR)? {
            let glare: HtmlElement = glare.dyn_into()?;
            apply_declarations(&glare, &css::glare_declarations(&style))?;
        }

        let layers = container.query_selector_all(LAYER_SELECTOR)?;
        for (i, offset) in style.layers.iter().enumerate() {
            let Some(node) = layers.item(i as u32) else {
                break;
            };
            let el: HtmlElement = node.dyn_into()?;
            apply_declarations(&el, &css::layer_declarations(offset))?;
        }
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.effect.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_string_is_empty_object() {
        assert_eq!(parse_params("  ").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn params_string_parses() {
        assert_eq!(parse_params(r#"{"count": 3}"#).unwrap()["count"], 3);
    }

    #[test]
    fn frame_duration_caps_long_frames() {
        let frame = frame_duration(16.0).map(|d| d.as_secs_f64()).unwrap_or_default();
        assert!((frame - 0.016).abs() < 1e-9);
        assert_eq!(frame_duration(f64::MAX), Some(Duration::from_secs(1)));
        assert_eq!(frame_duration(0.0), None);
        assert_eq!(frame_duration(f64::NAN), None);
    }

    #[test]
    fn particle_layer_advance_survives_huge_frames() {
        let Ok(mut layer) = ParticleLayer::new(400.0, 300.0, 7, "") else {
            panic!("default particle layer rejected");
        };
        assert_eq!(layer.len(), 25);
        assert!(layer.advance(f64::MAX) > 0);
    }

    #[test]
    fn tilt_panel_resize_keeps_origin() {
        let Ok(mut panel) = TiltPanel::new(10.0, 20.0, 200.0, 100.0, 1, "{}") else {
            panic!("default tilt panel rejected");
        };
        panel.resize(300.0, 150.0);
        assert_eq!(panel.effect.bounds(), Rect::new(10.0, 20.0, 300.0, 150.0));
    }

    #[test]
    fn malformed_params_is_invalid_param() {
        assert!(matches!(
            parse_params("{count"),
            Err(FxError::InvalidParam { .. })
        ));
    }
}
