#![deny(unsafe_code)]
//! Pointer-driven 3D tilt with a moving glare highlight.
//!
//! The pointer's offset from the panel centre, normalized to `[-0.5, 0.5]`
//! per axis, sets spring targets: `rotate_x = -dy * depth`,
//! `rotate_y = dx * depth`, and a glare spot that follows the pointer across
//! 0..100 % of the panel. Leaving the panel retargets everything to neutral
//! and the springs settle there instead of snapping.
//!
//! Two states drive the targets: `Idle` (neutral, optionally floating) and
//! `Active` (tracking the pointer). Both keep rendering while the springs move.

pub mod params;

pub use params::{TiltParams, MAX_OFFSET};

use ambient_fx_core::{
    Animator, DVec2, FloatMotion, FxError, LayerOffset, PanelStyle, PointerState, Rect, Spring,
    Srgb, StyleRecord, Viewport, Xorshift64,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Seconds per `Animator::tick`.
pub const TICK_SECONDS: f64 = 1.0 / 60.0;
/// Depth ratios of the background, content and card layers.
pub const LAYER_DEPTHS: [f64; 3] = [0.3, 0.6, 1.0];
/// Glare centre in neutral position, percent.
const GLARE_CENTER: f64 = 50.0;
/// Longest time a single `step` simulates.
pub const MAX_STEP_SECONDS: f64 = 1.0;

/// Clamps `v` into `[min, max]`; non-finite values or bounds yield `neutral`.
fn bounded(v: f64, min: f64, max: f64, neutral: f64) -> f64 {
    if v.is_finite() && min.is_finite() && max.is_finite() && min <= max {
        v.clamp(min, max)
    } else {
        neutral
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiltMode {
    Idle,
    Active,
}

/// Smoothed outputs of a tilt effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltState {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: f64,
    pub glare_x: f64,
    pub glare_y: f64,
    pub glare_opacity: f64,
    pub elevation: f64,
}

impl TiltState {
    /// Largest rotation magnitude of the two axes.
    pub fn tilt_magnitude(&self) -> f64 {
        self.rotate_x.abs().max(self.rotate_y.abs())
    }
}

pub struct TiltEffect {
    params: TiltParams,
    glare_color: Srgb,
    bounds: Rect,
    fills_viewport: bool,
    mode: TiltMode,
    suspended: bool,
    offset: DVec2,
    rotate_x: Spring,
    rotate_y: Spring,
    scale: Spring,
    glare_x: Spring,
    glare_y: Spring,
    glare_opacity: Spring,
    elevation: Spring,
    float: Option<FloatMotion>,
    elapsed: Duration,
}

impl TiltEffect {
    /// Builds an idle effect for a panel. The seed only randomizes the idle
    /// float phase. Fails if the glare color is not valid hex.
    pub fn new(bounds: Rect, seed: u64, params: TiltParams) -> Result<Self, FxError> {
        let params = params.validated();
        let glare_color = params.glare_color()?;
        let motion = params.motion_spring();
        let lift = params.lift_spring();
        let float = (params.float_amplitude > 0.0).then(|| {
            let duration = Duration::from_millis(params.float_duration_ms);
            FloatMotion::vertical(params.float_amplitude, duration)
                .with_sway(params.float_sway)
                .with_random_phase(&mut Xorshift64::new(seed))
        });
        Ok(Self {
            glare_color,
            bounds,
            fills_viewport: false,
            mode: TiltMode::Idle,
            suspended: false,
            offset: DVec2::ZERO,
            rotate_x: Spring::new(0.0, motion),
            rotate_y: Spring::new(0.0, motion),
            scale: Spring::new(1.0, lift),
            glare_x: Spring::new(GLARE_CENTER, motion),
            glare_y: Spring::new(GLARE_CENTER, motion),
            glare_opacity: Spring::new(0.0, motion),
            elevation: Spring::new(0.0, lift),
            float,
            elapsed: Duration::ZERO,
            params,
        })
    }

    /// Builds from JSON params. The panel defaults to the whole
    /// `width × height` surface and then follows resizes.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, FxError> {
        let params = TiltParams::from_json(json_params)?;
        match TiltParams::panel_from_json(json_params) {
            Some(panel) => Self::new(panel, seed, params),
            None => {
                let mut effect =
                    Self::new(Rect::new(0.0, 0.0, width as f64, height as f64), seed, params)?;
                effect.fills_viewport = true;
                Ok(effect)
            }
        }
    }

    pub fn pointer_enter(&mut self) {
        if self.mode == TiltMode::Idle {
            self.mode = TiltMode::Active;
            self.retarget();
        }
    }

    /// Returns to idle; every output decays toward neutral.
    pub fn pointer_leave(&mut self) {
        if self.mode == TiltMode::Active {
            self.mode = TiltMode::Idle;
            self.retarget();
        }
    }

    /// Records a pointer position over the panel at `bounds`.
    pub fn pointer_move(&mut self, position: DVec2, bounds: Rect) {
        self.bounds = bounds;
        if self.suspended {
            return;
        }
        self.offset = bounds.normalized_offset(position, MAX_OFFSET);
        self.retarget();
    }

    /// While suspended (e.g. the panel is expanded) pointer moves are ignored
    /// and the panel rests flat.
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
        self.retarget();
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn retarget(&mut self) {
        if self.mode == TiltMode::Active && !self.suspended {
            let depth = self.params.depth;
            self.rotate_x.set_target(-self.offset.y * depth);
            self.rotate_y.set_target(self.offset.x * depth);
            self.glare_x.set_target(self.offset.x * 100.0 + GLARE_CENTER);
            self.glare_y.set_target(self.offset.y * 100.0 + GLARE_CENTER);
            self.glare_opacity.set_target(self.params.glare_intensity);
            self.scale.set_target(self.params.hover_scale);
            self.elevation.set_target(self.params.elevation);
        } else {
            self.rotate_x.set_target(0.0);
            self.rotate_y.set_target(0.0);
            self.glare_x.set_target(GLARE_CENTER);
            self.glare_y.set_target(GLARE_CENTER);
            self.glare_opacity.set_target(0.0);
            self.scale.set_target(1.0);
            self.elevation.set_target(0.0);
        }
    }

    /// Advances all springs by `dt` seconds, at most [`MAX_STEP_SECONDS`].
    /// Returns true while any still moves.
    pub fn step(&mut self, dt: f64) -> bool {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt.min(MAX_STEP_SECONDS)
        } else {
            0.0
        };
        if dt > 0.0 {
            self.elapsed += Duration::from_secs_f64(dt);
        }
        let mut moving = false;
        for spring in [
            &mut self.rotate_x,
            &mut self.rotate_y,
            &mut self.scale,
            &mut self.glare_x,
            &mut self.glare_y,
            &mut self.glare_opacity,
            &mut self.elevation,
        ] {
            moving |= spring.step(dt);
        }
        moving
    }

    /// Smoothed outputs, with rotation held inside `±depth * 0.5` even while
    /// an underdamped spring overshoots.
    pub fn state(&self) -> TiltState {
        let limit = self.params.max_rotation();
        TiltState {
            rotate_x: bounded(self.rotate_x.value(), -limit, limit, 0.0),
            rotate_y: bounded(self.rotate_y.value(), -limit, limit, 0.0),
            scale: bounded(self.scale.value(), 0.0, f64::MAX, 1.0),
            glare_x: bounded(self.glare_x.value(), 0.0, 100.0, GLARE_CENTER),
            glare_y: bounded(self.glare_y.value(), 0.0, 100.0, GLARE_CENTER),
            glare_opacity: bounded(self.glare_opacity.value(), 0.0, 1.0, 0.0),
            elevation: bounded(self.elevation.value(), 0.0, f64::MAX, 0.0),
        }
    }

    pub fn mode(&self) -> TiltMode {
        self.mode
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Last normalized pointer offset, each axis in [-0.5, 0.5].
    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    pub fn settings(&self) -> &TiltParams {
        &self.params
    }

    /// True once every spring has settled on its target.
    pub fn is_settled(&self) -> bool {
        [
            &self.rotate_x,
            &self.rotate_y,
            &self.scale,
            &self.glare_x,
            &self.glare_y,
            &self.glare_opacity,
            &self.elevation,
        ]
        .iter()
        .all(|s| s.is_at_rest())
    }

    /// Parallax translation of an inner layer at `depth_ratio` (0 = flat,
    /// 1 = card surface).
    pub fn layer_offset(&self, depth_ratio: f64) -> LayerOffset {
        let s = self.state();
        LayerOffset {
            x: s.rotate_y * depth_ratio * 0.8,
            y: -s.rotate_x * depth_ratio * 0.8,
            z: s.elevation * depth_ratio * 0.5,
        }
    }

    /// Inner edge highlight opacity, 0 flat to 1 fully lifted.
    pub fn edge_highlight(&self) -> f64 {
        if self.params.elevation <= 0.0 {
            return 0.0;
        }
        (self.state().elevation / self.params.elevation).clamp(0.0, 1.0)
    }

    /// Idle float translation; zero while the pointer is over the panel.
    pub fn float_offset(&self) -> DVec2 {
        match (&self.float, self.mode) {
            (Some(f), TiltMode::Idle) => f.offset_at(self.elapsed),
            _ => DVec2::ZERO,
        }
    }

    pub fn panel_style(&self) -> PanelStyle {
        let s = self.state();
        let float = self.float_offset();
        PanelStyle {
            rotate_x: s.rotate_x,
            rotate_y: s.rotate_y,
            scale: s.scale,
            perspective: self.params.perspective,
            translate_x: float.x,
            translate_y: float.y,
            glare_x: s.glare_x,
            glare_y: s.glare_y,
            glare_opacity: s.glare_opacity,
            glare_color: self.glare_color,
            glare_alpha: self.params.glare_alpha,
            edge_highlight: self.edge_highlight(),
            layers: LAYER_DEPTHS.iter().map(|&d| self.layer_offset(d)).collect(),
        }
    }
}

impl Animator for TiltEffect {
    /// Hit-tests the shared pointer against the panel, derives enter, move
    /// and leave, then steps the springs by [`TICK_SECONDS`].
    fn tick(&mut self, pointer: &PointerState) {
        match pointer.position {
            Some(p) if self.bounds.contains(p) => {
                self.pointer_enter();
                self.pointer_move(p, self.bounds);
            }
            _ => self.pointer_leave(),
        }
        self.step(TICK_SECONDS);
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.fills_viewport {
            self.bounds = Rect::new(0.0, 0.0, viewport.width.max(0.0), viewport.height.max(0.0));
            tracing::debug!(?viewport, "tilt panel resized with viewport");
        }
    }

    fn styles(&self) -> Vec<StyleRecord> {
        vec![StyleRecord::Panel(self.panel_style())]
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        TiltParams::schema()
    }

    fn teardown(&mut self) {
        self.mode = TiltMode::Idle;
        self.suspended = true;
        self.retarget();
        for spring in [
            &mut self.rotate_x,
            &mut self.rotate_y,
            &mut self.glare_x,
            &mut self.glare_y,
            &mut self.glare_opacity,
            &mut self.elevation,
        ] {
            let target = spring.target();
            spring.jump(target);
        }
        self.scale.jump(1.0);
        self.float = None;
        tracing::debug!("tilt effect torn down");
    }
}
