//! Tilt configuration and the two stock presets.

use ambient_fx_core::params::{number_schema, param_f64, param_string, param_u64};
use ambient_fx_core::{FxError, Rect, SpringConfig, Srgb};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Largest normalized pointer offset from the panel centre.
pub const MAX_OFFSET: f64 = 0.5;

const DEFAULT_DEPTH: f64 = 30.0;
const DEFAULT_GLARE_INTENSITY: f64 = 0.2;
const DEFAULT_GLARE_COLOR: &str = "#ffffff";
const DEFAULT_GLARE_ALPHA: f64 = 0.9;
const DEFAULT_STIFFNESS: f64 = 200.0;
const DEFAULT_DAMPING: f64 = 15.0;
const DEFAULT_MASS: f64 = 1.0;
const DEFAULT_HOVER_SCALE: f64 = 1.05;
const DEFAULT_SCALE_STIFFNESS: f64 = 300.0;
const DEFAULT_SCALE_DAMPING: f64 = 20.0;
const DEFAULT_ELEVATION: f64 = 30.0;
const DEFAULT_PERSPECTIVE: f64 = 1000.0;
const DEFAULT_FLOAT_AMPLITUDE: f64 = 5.0;
const DEFAULT_FLOAT_SWAY: f64 = 2.0;
const DEFAULT_FLOAT_DURATION_MS: u64 = 4_000;

const DEPTH_RANGE: (f64, f64) = (0.0, 90.0);
const UNIT_RANGE: (f64, f64) = (0.0, 1.0);
const STIFFNESS_RANGE: (f64, f64) = (0.0, 2000.0);
const DAMPING_RANGE: (f64, f64) = (0.0, 200.0);
const MASS_RANGE: (f64, f64) = (0.01, 10.0);
const SCALE_RANGE: (f64, f64) = (0.5, 2.0);
const ELEVATION_RANGE: (f64, f64) = (0.0, 200.0);
const PERSPECTIVE_RANGE: (f64, f64) = (100.0, 5000.0);
const FLOAT_RANGE: (f64, f64) = (0.0, 50.0);
const MAX_FLOAT_DURATION_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiltParams {
    /// Degrees of rotation per unit of normalized offset.
    pub depth: f64,
    /// Glare layer opacity while hovering.
    pub glare_intensity: f64,
    pub glare_color: String,
    /// Alpha at the centre of the glare gradient.
    pub glare_alpha: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub hover_scale: f64,
    pub scale_stiffness: f64,
    pub scale_damping: f64,
    /// Lift in px while hovering; drives parallax depth and edge highlight.
    pub elevation: f64,
    pub perspective: f64,
    /// Idle float bob in px; 0 disables floating.
    pub float_amplitude: f64,
    pub float_sway: f64,
    pub float_duration_ms: u64,
}

impl Default for TiltParams {
    fn default() -> Self {
        Self::card()
    }
}

impl TiltParams {
    /// Deep, bouncy tilt with strong glare and idle floating.
    pub fn card() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            glare_intensity: DEFAULT_GLARE_INTENSITY,
            glare_color: DEFAULT_GLARE_COLOR.to_string(),
            glare_alpha: DEFAULT_GLARE_ALPHA,
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            mass: DEFAULT_MASS,
            hover_scale: DEFAULT_HOVER_SCALE,
            scale_stiffness: DEFAULT_SCALE_STIFFNESS,
            scale_damping: DEFAULT_SCALE_DAMPING,
            elevation: DEFAULT_ELEVATION,
            perspective: DEFAULT_PERSPECTIVE,
            float_amplitude: DEFAULT_FLOAT_AMPLITUDE,
            float_sway: DEFAULT_FLOAT_SWAY,
            float_duration_ms: DEFAULT_FLOAT_DURATION_MS,
        }
    }

    /// Subtle 5-degree tilt for frosted panels: stiff, well damped, faint glare,
    /// no lift and no floating.
    pub fn glass() -> Self {
        Self {
            depth: 5.0,
            glare_intensity: 0.7,
            glare_alpha: 0.15,
            stiffness: 300.0,
            damping: 30.0,
            hover_scale: 1.01,
            scale_stiffness: 300.0,
            scale_damping: 30.0,
            elevation: 0.0,
            perspective: 1200.0,
            float_amplitude: 0.0,
            float_sway: 0.0,
            ..Self::card()
        }
    }

    /// Reads params from JSON on top of a preset.
    ///
    /// `"preset"` selects `"card"` (default) or `"glass"`; any other key
    /// overrides the preset's value.
    pub fn from_json(params: &Value) -> Result<Self, FxError> {
        let base = match param_string(params, "preset", "card").as_str() {
            "card" => Self::card(),
            "glass" => Self::glass(),
            other => {
                return Err(FxError::InvalidParam {
                    name: "preset".into(),
                    reason: format!("unknown preset '{other}', expected card or glass"),
                })
            }
        };
        Ok(Self {
            depth: param_f64(params, "depth", base.depth),
            glare_intensity: param_f64(params, "glare_intensity", base.glare_intensity),
            glare_color: param_string(params, "glare_color", &base.glare_color),
            glare_alpha: param_f64(params, "glare_alpha", base.glare_alpha),
            stiffness: param_f64(params, "stiffness", base.stiffness),
            damping: param_f64(params, "damping", base.damping),
            mass: param_f64(params, "mass", base.mass),
            hover_scale: param_f64(params, "hover_scale", base.hover_scale),
            scale_stiffness: param_f64(params, "scale_stiffness", base.scale_stiffness),
            scale_damping: param_f64(params, "scale_damping", base.scale_damping),
            elevation: param_f64(params, "elevation", base.elevation),
            perspective: param_f64(params, "perspective", base.perspective),
            float_amplitude: param_f64(params, "float_amplitude", base.float_amplitude),
            float_sway: param_f64(params, "float_sway", base.float_sway),
            float_duration_ms: param_u64(params, "float_duration_ms", base.float_duration_ms),
        })
    }

    /// Optional `"panel": [x, y, width, height]` override.
    pub fn panel_from_json(params: &Value) -> Option<Rect> {
        let arr = params.get("panel")?.as_array()?;
        let nums: Vec<f64> = arr.iter().filter_map(Value::as_f64).collect();
        match nums.as_slice() {
            [x, y, w, h] => Some(Rect::new(*x, *y, *w, *h)),
            _ => None,
        }
    }

    /// Brings every numeric field inside its schema range.
    ///
    /// Non-finite values fall back to the card default, a negative depth is
    /// mirrored and a non-positive mass resets to 1. Each repair is logged.
    pub fn validated(mut self) -> Self {
        if self.depth < 0.0 {
            tracing::warn!(depth = self.depth, "negative tilt depth made positive");
            self.depth = self.depth.abs();
        }
        if self.mass <= 0.0 {
            tracing::warn!(mass = self.mass, "non-positive spring mass reset to 1");
            self.mass = DEFAULT_MASS;
        }
        for (name, v, default, (min, max)) in [
            ("depth", &mut self.depth, DEFAULT_DEPTH, DEPTH_RANGE),
            ("glare_intensity", &mut self.glare_intensity, DEFAULT_GLARE_INTENSITY, UNIT_RANGE),
            ("glare_alpha", &mut self.glare_alpha, DEFAULT_GLARE_ALPHA, UNIT_RANGE),
            ("stiffness", &mut self.stiffness, DEFAULT_STIFFNESS, STIFFNESS_RANGE),
            ("damping", &mut self.damping, DEFAULT_DAMPING, DAMPING_RANGE),
            ("mass", &mut self.mass, DEFAULT_MASS, MASS_RANGE),
            ("hover_scale", &mut self.hover_scale, DEFAULT_HOVER_SCALE, SCALE_RANGE),
            ("scale_stiffness", &mut self.scale_stiffness, DEFAULT_SCALE_STIFFNESS, STIFFNESS_RANGE),
            ("scale_damping", &mut self.scale_damping, DEFAULT_SCALE_DAMPING, DAMPING_RANGE),
            ("elevation", &mut self.elevation, DEFAULT_ELEVATION, ELEVATION_RANGE),
            ("perspective", &mut self.perspective, DEFAULT_PERSPECTIVE, PERSPECTIVE_RANGE),
            ("float_amplitude", &mut self.float_amplitude, DEFAULT_FLOAT_AMPLITUDE, FLOAT_RANGE),
            ("float_sway", &mut self.float_sway, DEFAULT_FLOAT_SWAY, FLOAT_RANGE),
        ] {
            if !v.is_finite() {
                tracing::warn!(param = name, "non-finite value reset to default");
                *v = default;
            }
            let clamped = (*v).clamp(min, max);
            if clamped != *v {
                tracing::warn!(param = name, value = *v, min, max, "value clamped to range");
                *v = clamped;
            }
        }
        if self.float_duration_ms > MAX_FLOAT_DURATION_MS {
            tracing::warn!(
                float_duration_ms = self.float_duration_ms,
                "float duration capped"
            );
            self.float_duration_ms = MAX_FLOAT_DURATION_MS;
        }
        self
    }

    pub fn glare_color(&self) -> Result<Srgb, FxError> {
        Srgb::from_hex(&self.glare_color)
    }

    /// Spring config shared by rotation and glare.
    pub fn motion_spring(&self) -> SpringConfig {
        SpringConfig::new(self.stiffness, self.damping).with_mass(self.mass)
    }

    /// Spring config for scale and elevation.
    pub fn lift_spring(&self) -> SpringConfig {
        SpringConfig::new(self.scale_stiffness, self.scale_damping).with_mass(self.mass)
    }

    /// Largest rotation any pointer position can produce, in degrees.
    pub fn max_rotation(&self) -> f64 {
        self.depth * MAX_OFFSET
    }

    pub fn to_json(&self) -> Value {
        json!({
            "depth": self.depth,
            "glare_intensity": self.glare_intensity,
            "glare_color": self.glare_color,
            "glare_alpha": self.glare_alpha,
            "stiffness": self.stiffness,
            "damping": self.damping,
            "mass": self.mass,
            "hover_scale": self.hover_scale,
            "scale_stiffness": self.scale_stiffness,
            "scale_damping": self.scale_damping,
            "elevation": self.elevation,
            "perspective": self.perspective,
            "float_amplitude": self.float_amplitude,
            "float_sway": self.float_sway,
            "float_duration_ms": self.float_duration_ms,
        })
    }

    pub fn schema() -> Value {
        json!({
            "preset": {
                "type": "string",
                "default": "card",
                "choices": ["card", "glass"],
                "description": "Base preset the other keys override"
            },
            "panel": {
                "type": "array",
                "default": null,
                "description": "Panel bounds [x, y, width, height]; defaults to the whole viewport"
            },
            "depth": number_schema(DEFAULT_DEPTH, DEPTH_RANGE.0, DEPTH_RANGE.1, "Tilt degrees per unit offset"),
            "glare_intensity": number_schema(DEFAULT_GLARE_INTENSITY, UNIT_RANGE.0, UNIT_RANGE.1, "Glare opacity while hovering"),
            "glare_color": {
                "type": "string",
                "default": DEFAULT_GLARE_COLOR,
                "description": "Glare hex color"
            },
            "glare_alpha": number_schema(DEFAULT_GLARE_ALPHA, UNIT_RANGE.0, UNIT_RANGE.1, "Alpha at the glare centre"),
            "stiffness": number_schema(DEFAULT_STIFFNESS, STIFFNESS_RANGE.0, STIFFNESS_RANGE.1, "Rotation/glare spring stiffness"),
            "damping": number_schema(DEFAULT_DAMPING, DAMPING_RANGE.0, DAMPING_RANGE.1, "Rotation/glare spring damping"),
            "mass": number_schema(DEFAULT_MASS, MASS_RANGE.0, MASS_RANGE.1, "Spring mass"),
            "hover_scale": number_schema(DEFAULT_HOVER_SCALE, SCALE_RANGE.0, SCALE_RANGE.1, "Scale while hovering"),
            "scale_stiffness": number_schema(DEFAULT_SCALE_STIFFNESS, STIFFNESS_RANGE.0, STIFFNESS_RANGE.1, "Scale/lift spring stiffness"),
            "scale_damping": number_schema(DEFAULT_SCALE_DAMPING, DAMPING_RANGE.0, DAMPING_RANGE.1, "Scale/lift spring damping"),
            "elevation": number_schema(DEFAULT_ELEVATION, ELEVATION_RANGE.0, ELEVATION_RANGE.1, "Lift while hovering, px"),
            "perspective": number_schema(DEFAULT_PERSPECTIVE, PERSPECTIVE_RANGE.0, PERSPECTIVE_RANGE.1, "CSS perspective distance, px"),
            "float_amplitude": number_schema(DEFAULT_FLOAT_AMPLITUDE, FLOAT_RANGE.0, FLOAT_RANGE.1, "Idle vertical bob, px"),
            "float_sway": number_schema(DEFAULT_FLOAT_SWAY, FLOAT_RANGE.0, FLOAT_RANGE.1, "Idle horizontal sway, px"),
            "float_duration_ms": {
                "type": "integer",
                "default": DEFAULT_FLOAT_DURATION_MS,
                "min": 0,
                "max": MAX_FLOAT_DURATION_MS,
                "description": "Idle float cycle length, ms"
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_card() {
        assert_eq!(TiltParams::default(), TiltParams::card());
    }

    #[test]
    fn glass_is_subtle() {
        let g = TiltParams::glass();
        assert!(g.depth < TiltParams::card().depth);
        assert_eq!(g.float_amplitude, 0.0);
        assert!(g.motion_spring().damping_ratio() > TiltParams::card().motion_spring().damping_ratio());
    }

    #[test]
    fn from_json_overrides_preset() {
        let p = TiltParams::from_json(&json!({"preset": "glass", "depth": 8})).unwrap();
        assert_eq!(p.depth, 8.0);
        assert_eq!(p.hover_scale, 1.01);
    }

    #[test]
    fn from_json_rejects_unknown_preset() {
        assert!(matches!(
            TiltParams::from_json(&json!({"preset": "wobbly"})),
            Err(FxError::InvalidParam { name, .. }) if name == "preset"
        ));
    }

    #[test]
    fn panel_from_json_reads_four_numbers() {
        let r = TiltParams::panel_from_json(&json!({"panel": [10, 20, 200, 100]}));
        assert_eq!(r, Some(Rect::new(10.0, 20.0, 200.0, 100.0)));
        assert_eq!(TiltParams::panel_from_json(&json!({"panel": [1, 2]})), None);
        assert_eq!(TiltParams::panel_from_json(&json!({})), None);
    }

    #[test]
    fn validated_repairs_bad_values() {
        let p = TiltParams {
            depth: -10.0,
            mass: 0.0,
            glare_intensity: 4.0,
            ..TiltParams::card()
        }
        .validated();
        assert_eq!(p.depth, 10.0);
        assert_eq!(p.mass, 1.0);
        assert_eq!(p.glare_intensity, 1.0);
    }

    #[test]
    fn validated_clamps_to_schema_ranges() {
        let p = TiltParams {
            stiffness: 1e6,
            scale_damping: 1e4,
            depth: 400.0,
            perspective: 1.0,
            float_duration_ms: u64::MAX,
            ..TiltParams::card()
        }
        .validated();
        assert_eq!(p.stiffness, 2000.0);
        assert_eq!(p.scale_damping, 200.0);
        assert_eq!(p.depth, 90.0);
        assert_eq!(p.perspective, 100.0);
        assert_eq!(p.float_duration_ms, 60_000);
    }

    #[test]
    fn validated_resets_non_finite_to_card_defaults() {
        let p = TiltParams {
            depth: f64::NAN,
            damping: f64::INFINITY,
            hover_scale: f64::NEG_INFINITY,
            ..TiltParams::glass()
        }
        .validated();
        assert_eq!(p.depth, 30.0);
        assert_eq!(p.damping, 15.0);
        assert_eq!(p.hover_scale, 1.05);
        assert!(p.max_rotation().is_finite());
    }

    #[test]
    fn validated_keeps_presets_unchanged() {
        assert_eq!(TiltParams::card().validated(), TiltParams::card());
        assert_eq!(TiltParams::glass().validated(), TiltParams::glass());
    }

    #[test]
    fn max_rotation_is_half_depth() {
        assert_eq!(TiltParams::card().max_rotation(), 15.0);
    }

    #[test]
    fn to_json_round_trips() {
        let p = TiltParams::glass();
        let mut v = p.to_json();
        v["preset"] = json!("glass");
        assert_eq!(TiltParams::from_json(&v).unwrap(), p);
    }

    #[test]
    fn schema_covers_every_json_key() {
        let schema = TiltParams::schema();
        for key in TiltParams::card().to_json().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }
}
