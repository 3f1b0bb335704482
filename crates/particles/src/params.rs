//! Tunable constants of a particle field.
//!
//! Several visual revisions of this effect used different counts and force
//! constants, so every knob is a parameter. Defaults reproduce the
//! currency-symbol background.

use ambient_fx_core::params::{
    choice_schema, integer_schema, number_schema, param_f64, param_string, param_u64, param_usize,
};
use ambient_fx_core::GlyphPalette;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default number of particles.
pub const DEFAULT_COUNT: usize = 25;
/// Hard cap on particle count.
pub const MAX_COUNT: usize = 5_000;
const DEFAULT_SPEED_MIN: f64 = 0.1;
const DEFAULT_SPEED_MAX: f64 = 0.6;
const DEFAULT_SIZE_MIN: f64 = 20.0;
const DEFAULT_SIZE_MAX: f64 = 40.0;
/// Particles closer than this to the pointer are pushed away.
const DEFAULT_NEAR_RADIUS: f64 = 150.0;
/// Particles between the near and outer radius are pulled in.
const DEFAULT_OUTER_RADIUS: f64 = 300.0;
const DEFAULT_ATTRACTION: f64 = 0.02;
const DEFAULT_ROTATION_STEP: f64 = 0.2;
/// Jitter as a fraction of a grid cell, either side of the cell centre.
const DEFAULT_JITTER: f64 = 0.35;
const DEFAULT_PALETTE: &str = "currency";
const DEFAULT_PULSE_MIN: f64 = 0.1;
const DEFAULT_PULSE_MAX: f64 = 0.3;
const DEFAULT_PULSE_PERIOD_MS: u64 = 3_000;
const DEFAULT_ENTRANCE_MS: u64 = 500;
const DEFAULT_INTERVAL_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleParams {
    pub count: usize,
    /// Pixels per tick.
    pub speed_min: f64,
    pub speed_max: f64,
    /// Font size in px.
    pub size_min: f64,
    pub size_max: f64,
    pub near_radius: f64,
    pub outer_radius: f64,
    pub attraction: f64,
    /// Degrees per tick.
    pub rotation_step: f64,
    pub jitter: f64,
    /// `"<glyph set>"` or `"<glyph set>/<tint>"`.
    pub palette: String,
    pub pulse_min: f64,
    pub pulse_max: f64,
    pub pulse_period_ms: u64,
    pub entrance_ms: u64,
    pub interval_ms: u64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            near_radius: DEFAULT_NEAR_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            attraction: DEFAULT_ATTRACTION,
            rotation_step: DEFAULT_ROTATION_STEP,
            jitter: DEFAULT_JITTER,
            palette: DEFAULT_PALETTE.to_string(),
            pulse_min: DEFAULT_PULSE_MIN,
            pulse_max: DEFAULT_PULSE_MAX,
            pulse_period_ms: DEFAULT_PULSE_PERIOD_MS,
            entrance_ms: DEFAULT_ENTRANCE_MS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl ParticleParams {
    /// Reads params from JSON, falling back to defaults per key.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            speed_min: param_f64(params, "speed_min", DEFAULT_SPEED_MIN),
            speed_max: param_f64(params, "speed_max", DEFAULT_SPEED_MAX),
            size_min: param_f64(params, "size_min", DEFAULT_SIZE_MIN),
            size_max: param_f64(params, "size_max", DEFAULT_SIZE_MAX),
            near_radius: param_f64(params, "near_radius", DEFAULT_NEAR_RADIUS),
            outer_radius: param_f64(params, "outer_radius", DEFAULT_OUTER_RADIUS),
            attraction: param_f64(params, "attraction", DEFAULT_ATTRACTION),
            rotation_step: param_f64(params, "rotation_step", DEFAULT_ROTATION_STEP),
            jitter: param_f64(params, "jitter", DEFAULT_JITTER),
            palette: param_string(params, "palette", DEFAULT_PALETTE),
            pulse_min: param_f64(params, "pulse_min", DEFAULT_PULSE_MIN),
            pulse_max: param_f64(params, "pulse_max", DEFAULT_PULSE_MAX),
            pulse_period_ms: param_u64(params, "pulse_period_ms", DEFAULT_PULSE_PERIOD_MS),
            entrance_ms: param_u64(params, "entrance_ms", DEFAULT_ENTRANCE_MS),
            interval_ms: param_u64(params, "interval_ms", DEFAULT_INTERVAL_MS),
        }
    }

    /// Repairs values that would break the field's invariants.
    ///
    /// Inverted ranges are swapped, negative magnitudes become zero, jitter is
    /// held inside its cell and the count is capped. Each repair is logged.
    pub fn validated(mut self) -> Self {
        if self.count > MAX_COUNT {
            tracing::warn!(count = self.count, max = MAX_COUNT, "particle count capped");
            self.count = MAX_COUNT;
        }
        for (name, v, default) in [
            ("speed_min", &mut self.speed_min, DEFAULT_SPEED_MIN),
            ("speed_max", &mut self.speed_max, DEFAULT_SPEED_MAX),
            ("size_min", &mut self.size_min, DEFAULT_SIZE_MIN),
            ("size_max", &mut self.size_max, DEFAULT_SIZE_MAX),
            ("near_radius", &mut self.near_radius, DEFAULT_NEAR_RADIUS),
            ("outer_radius", &mut self.outer_radius, DEFAULT_OUTER_RADIUS),
            ("attraction", &mut self.attraction, DEFAULT_ATTRACTION),
            ("rotation_step", &mut self.rotation_step, DEFAULT_ROTATION_STEP),
            ("jitter", &mut self.jitter, DEFAULT_JITTER),
            ("pulse_min", &mut self.pulse_min, DEFAULT_PULSE_MIN),
            ("pulse_max", &mut self.pulse_max, DEFAULT_PULSE_MAX),
        ] {
            if !v.is_finite() {
                tracing::warn!(param = name, "non-finite value reset to default");
                *v = default;
            }
        }
        for (name, v) in [
            ("speed_min", &mut self.speed_min),
            ("speed_max", &mut self.speed_max),
            ("size_min", &mut self.size_min),
            ("size_max", &mut self.size_max),
            ("near_radius", &mut self.near_radius),
            ("outer_radius", &mut self.outer_radius),
            ("attraction", &mut self.attraction),
            ("pulse_min", &mut self.pulse_min),
            ("pulse_max", &mut self.pulse_max),
        ] {
            if *v < 0.0 {
                tracing::warn!(param = name, value = *v, "negative value clamped to 0");
                *v = 0.0;
            }
        }
        swap_if_inverted("speed", &mut self.speed_min, &mut self.speed_max);
        swap_if_inverted("size", &mut self.size_min, &mut self.size_max);
        swap_if_inverted("radius", &mut self.near_radius, &mut self.outer_radius);
        swap_if_inverted("pulse", &mut self.pulse_min, &mut self.pulse_max);
        self.pulse_max = self.pulse_max.min(1.0);
        self.pulse_min = self.pulse_min.min(self.pulse_max);
        self.jitter = self.jitter.clamp(0.0, 0.5);
        self.interval_ms = self.interval_ms.max(1);
        self
    }

    /// Resolves the palette name.
    pub fn palette(&self) -> Result<GlyphPalette, ambient_fx_core::FxError> {
        GlyphPalette::from_name(&self.palette)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "count": self.count,
            "speed_min": self.speed_min,
            "speed_max": self.speed_max,
            "size_min": self.size_min,
            "size_max": self.size_max,
            "near_radius": self.near_radius,
            "outer_radius": self.outer_radius,
            "attraction": self.attraction,
            "rotation_step": self.rotation_step,
            "jitter": self.jitter,
            "palette": self.palette,
            "pulse_min": self.pulse_min,
            "pulse_max": self.pulse_max,
            "pulse_period_ms": self.pulse_period_ms,
            "entrance_ms": self.entrance_ms,
            "interval_ms": self.interval_ms,
        })
    }

    pub fn schema() -> Value {
        let palettes: Vec<&str> = GlyphPalette::list_glyph_sets().to_vec();
        json!({
            "count": integer_schema(DEFAULT_COUNT as u64, 0, MAX_COUNT as u64, "Number of particles"),
            "speed_min": number_schema(DEFAULT_SPEED_MIN, 0.0, 10.0, "Slowest drift, px per tick"),
            "speed_max": number_schema(DEFAULT_SPEED_MAX, 0.0, 10.0, "Fastest drift, px per tick"),
            "size_min": number_schema(DEFAULT_SIZE_MIN, 1.0, 200.0, "Smallest glyph font size, px"),
            "size_max": number_schema(DEFAULT_SIZE_MAX, 1.0, 200.0, "Largest glyph font size, px"),
            "near_radius": number_schema(DEFAULT_NEAR_RADIUS, 0.0, 2000.0, "Repulsion radius around the pointer, px"),
            "outer_radius": number_schema(DEFAULT_OUTER_RADIUS, 0.0, 4000.0, "Attraction radius around the pointer, px"),
            "attraction": number_schema(DEFAULT_ATTRACTION, 0.0, 0.5, "Strength of the pointer force"),
            "rotation_step": number_schema(DEFAULT_ROTATION_STEP, -10.0, 10.0, "Glyph spin, degrees per tick"),
            "jitter": number_schema(DEFAULT_JITTER, 0.0, 0.5, "Placement jitter as a fraction of a grid cell"),
            "palette": choice_schema(DEFAULT_PALETTE, &palettes, "Glyph set, optionally '/tint'"),
            "pulse_min": number_schema(DEFAULT_PULSE_MIN, 0.0, 1.0, "Lowest opacity of the pulse"),
            "pulse_max": number_schema(DEFAULT_PULSE_MAX, 0.0, 1.0, "Highest opacity of the pulse"),
            "pulse_period_ms": integer_schema(DEFAULT_PULSE_PERIOD_MS, 0, 60_000, "Opacity pulse period, ms"),
            "entrance_ms": integer_schema(DEFAULT_ENTRANCE_MS, 0, 10_000, "Scale-in duration, ms"),
            "interval_ms": integer_schema(DEFAULT_INTERVAL_MS, 1, 1_000, "Tick interval, ms"),
        })
    }
}

fn swap_if_inverted(label: &str, lo: &mut f64, hi: &mut f64) {
    if *lo > *hi {
        tracing::warn!(range = label, lo = *lo, hi = *hi, "inverted range swapped");
        std::mem::swap(lo, hi);
    }
}
