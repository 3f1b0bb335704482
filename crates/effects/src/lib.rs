#![deny(unsafe_code)]
//! Effect registry: maps effect names to implementations, renders style
//! records as CSS and records frame traces.
//!
//! This crate sits between `ambient-fx-core` (which defines the `Animator`
//! trait) and the effect crates. Both the CLI and the WASM bindings depend on
//! it so name dispatch lives in one place.

pub mod css;
pub mod trace;

use ambient_fx_core::{Animator, FxError, PointerState, Scene, StyleRecord, Viewport};
use ambient_fx_particles::ParticleField;
use ambient_fx_tilt::TiltEffect;
use serde_json::Value;

/// All available effect names.
const EFFECT_NAMES: &[&str] = &["particles", "tilt"];

/// Every effect this workspace ships, behind one `Animator`.
///
/// Use [`EffectKind::from_name`] for string-based construction (CLI, WASM).
pub enum EffectKind {
    /// Drifting glyphs steering around the pointer.
    Particles(ParticleField),
    /// Spring-smoothed 3D tilt with glare.
    Tilt(TiltEffect),
}

impl EffectKind {
    /// Constructs an effect by name.
    ///
    /// Returns `FxError::UnknownEffect` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, FxError> {
        match name {
            "particles" => Ok(EffectKind::Particles(ParticleField::from_json(
                width, height, seed, params,
            )?)),
            "tilt" => Ok(EffectKind::Tilt(TiltEffect::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(FxError::UnknownEffect(name.to_string())),
        }
    }

    /// Validates the scene and constructs its effect.
    pub fn from_scene(scene: &Scene) -> Result<Self, FxError> {
        scene.validate()?;
        Self::from_name(
            &scene.effect,
            scene.width,
            scene.height,
            scene.seed,
            &scene.params,
        )
    }

    /// Returns a slice of all recognized effect names.
    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Particles(_) => "particles",
            EffectKind::Tilt(_) => "tilt",
        }
    }
}

impl Animator for EffectKind {
    fn tick(&mut self, pointer: &PointerState) {
        match self {
            EffectKind::Particles(e) => Animator::tick(e, pointer),
            EffectKind::Tilt(e) => e.tick(pointer),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        match self {
            EffectKind::Particles(e) => Animator::resize(e, viewport),
            EffectKind::Tilt(e) => e.resize(viewport),
        }
    }

    fn styles(&self) -> Vec<StyleRecord> {
        match self {
            EffectKind::Particles(e) => e.styles(),
            EffectKind::Tilt(e) => e.styles(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EffectKind::Particles(e) => Animator::params(e),
            EffectKind::Tilt(e) => Animator::params(e),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EffectKind::Particles(e) => e.param_schema(),
            EffectKind::Tilt(e) => e.param_schema(),
        }
    }

    fn teardown(&mut self) {
        match self {
            EffectKind::Particles(e) => Animator::teardown(e),
            EffectKind::Tilt(e) => Animator::teardown(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_name_particles_succeeds() {
        let effect = EffectKind::from_name("particles", 320, 240, 42, &json!({}));
        assert!(effect.is_ok());
    }

    #[test]
    fn from_name_tilt_succeeds() {
        let effect = EffectKind::from_name("tilt", 320, 240, 42, &json!({"preset": "glass"}));
        assert_eq!(effect.unwrap().name(), "tilt");
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EffectKind::from_name("nonexistent", 32, 32, 42, &json!({}));
        assert!(matches!(result, Err(FxError::UnknownEffect(_))));
    }

    #[test]
    fn from_name_propagates_param_errors() {
        let result = EffectKind::from_name("particles", 32, 32, 42, &json!({"palette": "runes"}));
        assert!(matches!(result, Err(FxError::UnknownPalette(_))));
        let result = EffectKind::from_name("tilt", 32, 32, 42, &json!({"preset": "paper"}));
        assert!(matches!(result, Err(FxError::InvalidParam { .. })));
    }

    #[test]
    fn from_scene_validates_first() {
        let scene = Scene::new("particles", 0, 100, 1);
        assert!(matches!(
            EffectKind::from_scene(&scene),
            Err(FxError::InvalidDimensions)
        ));
    }

    #[test]
    fn list_effects_includes_both() {
        let names = EffectKind::list_effects();
        assert!(names.contains(&"particles"));
        assert!(names.contains(&"tilt"));
    }

    #[test]
    fn every_listed_name_constructs() {
        for name in EffectKind::list_effects() {
            let effect = EffectKind::from_name(name, 64, 64, 1, &json!({})).unwrap();
            assert_eq!(effect.name(), *name);
        }
    }

    #[test]
    fn trait_delegation_styles() {
        let mut particles =
            EffectKind::from_name("particles", 400, 300, 42, &json!({"count": 10})).unwrap();
        particles.tick(&PointerState::absent());
        assert_eq!(particles.styles().len(), 10);

        let mut tilt = EffectKind::from_name("tilt", 400, 300, 42, &json!({})).unwrap();
        tilt.tick(&PointerState::at(200.0, 150.0));
        assert!(matches!(tilt.styles().as_slice(), [StyleRecord::Panel(_)]));
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let effect = EffectKind::from_name("particles", 16, 16, 42, &json!({})).unwrap();
        assert!(effect.params().get("near_radius").is_some());
        assert!(effect.param_schema().get("near_radius").is_some());

        let effect = EffectKind::from_name("tilt", 16, 16, 42, &json!({})).unwrap();
        assert!(effect.params().get("depth").is_some());
        assert!(effect.param_schema().get("depth").is_some());
    }

    #[test]
    fn teardown_empties_particle_styles() {
        let mut effect = EffectKind::from_name("particles", 100, 100, 42, &json!({})).unwrap();
        effect.teardown();
        effect.tick(&PointerState::at(50.0, 50.0));
        assert!(effect.styles().is_empty());
    }

    #[test]
    fn determinism_same_seed() {
        let pointer = PointerState::at(300.0, 200.0);
        let mut a = EffectKind::from_name("particles", 640, 480, 99, &json!({})).unwrap();
        let mut b = EffectKind::from_name("particles", 640, 480, 99, &json!({})).unwrap();
        for _ in 0..20 {
            a.tick(&pointer);
            b.tick(&pointer);
        }
        assert_eq!(a.styles(), b.styles());
    }

    #[test]
    fn object_safety() {
        let effects: Vec<Box<dyn Animator>> = EffectKind::list_effects()
            .iter()
            .map(|name| {
                Box::new(EffectKind::from_name(name, 64, 64, 1, &json!({})).unwrap())
                    as Box<dyn Animator>
            })
            .collect();
        assert_eq!(effects.len(), 2);
    }
}
