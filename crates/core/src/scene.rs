//! Reproducible description of an effect run.
//!
//! A [`Scene`] names the effect, the viewport, parameter overrides, the PRNG
//! seed, how many ticks to simulate and where the pointer rests. Feeding the
//! same scene to the same build yields identical frames.

use crate::error::FxError;
use crate::geometry::Viewport;
use crate::pointer::PointerState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub effect: String,
    pub width: usize,
    pub height: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub ticks: usize,
    /// Fixed pointer position for the whole run; `None` means no pointer.
    #[serde(default)]
    pub pointer: Option<[f64; 2]>,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Scene with empty params, zero ticks and no pointer.
    pub fn new(effect: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            effect: effect.to_string(),
            width,
            height,
            params: empty_params(),
            seed,
            ticks: 0,
            pointer: None,
        }
    }

    /// Parses a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self, FxError> {
        serde_json::from_str(text).map_err(|e| FxError::InvalidParam {
            name: "scene".into(),
            reason: e.to_string(),
        })
    }

    /// Rejects zero sizes and non-object params.
    pub fn validate(&self) -> Result<(), FxError> {
        if self.width == 0 || self.height == 0 {
            return Err(FxError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(FxError::InvalidDimensions)?;
        if !self.params.is_object() {
            return Err(FxError::InvalidParam {
                name: "params".into(),
                reason: "must be a JSON object".into(),
            });
        }
        if let Some([x, y]) = self.pointer {
            if !(x.is_finite() && y.is_finite()) {
                return Err(FxError::InvalidParam {
                    name: "pointer".into(),
                    reason: "coordinates must be finite".into(),
                });
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f64, self.height as f64)
    }

    pub fn pointer_state(&self) -> PointerState {
        match self.pointer {
            Some([x, y]) => PointerState::at(x, y),
            None => PointerState::absent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_has_defaults() {
        let s = Scene::new("particles", 1000, 800, 42);
        assert_eq!(s.effect, "particles");
        assert_eq!(s.ticks, 0);
        assert!(s.pointer.is_none());
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip() {
        let mut s = Scene::new("tilt", 200, 100, 7);
        s.params = serde_json::json!({"depth": 12.0});
        s.ticks = 90;
        s.pointer = Some([150.0, 25.0]);
        let text = serde_json::to_string_pretty(&s).unwrap();
        assert_eq!(Scene::from_json(&text).unwrap(), s);
    }

    #[test]
    fn from_json_fills_optional_fields() {
        let s = Scene::from_json(r#"{"effect":"particles","width":10,"height":10,"seed":1}"#)
            .unwrap();
        assert_eq!(s.ticks, 0);
        assert!(s.params.is_object());
        assert!(s.pointer.is_none());
    }

    #[test]
    fn from_json_reports_syntax_errors() {
        assert!(matches!(
            Scene::from_json("{nope"),
            Err(FxError::InvalidParam { name, .. }) if name == "scene"
        ));
    }

    #[test]
    fn validate_rejects_zero_size() {
        assert!(Scene::new("particles", 0, 10, 1).validate().is_err());
        assert!(Scene::new("particles", 10, 0, 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_overflow() {
        assert!(Scene::new("particles", usize::MAX, 2, 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_non_object_params() {
        let mut s = Scene::new("particles", 10, 10, 1);
        s.params = serde_json::json!([1, 2, 3]);
        assert!(s.validate().is_err());
    }

    #[test]
    fn pointer_state_follows_pointer_field() {
        let mut s = Scene::new("particles", 10, 10, 1);
        assert!(s.pointer_state().position.is_none());
        s.pointer = Some([3.0, 4.0]);
        assert_eq!(s.pointer_state().position, Some(glam::DVec2::new(3.0, 4.0)));
        assert_eq!(s.viewport(), Viewport::new(10.0, 10.0));
    }
}
