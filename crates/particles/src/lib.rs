#![deny(unsafe_code)]
//! Pointer-steered glyph particle field.
//!
//! A fixed set of glyphs drifts across the viewport, each along its own
//! heading at its own speed. The pointer bends their paths: inside the near
//! radius it pushes particles away, out to the outer radius it pulls them in
//! gently, and beyond that it has no effect. Particles that reach an edge are
//! clamped and their heading is mirrored on that axis, so they bounce instead
//! of sticking.
//!
//! This is a steering toy, not a physics simulation: no mass, no
//! particle-particle interaction, one displacement per tick.

pub mod params;

pub use params::ParticleParams;

use ambient_fx_core::easing::Easing;
use ambient_fx_core::{
    Animator, DVec2, FxError, Glyph, GlyphPalette, ParticleStyle, PointerState, Srgb,
    StyleRecord, TickSchedule, Viewport, Xorshift64,
};
use serde_json::Value;
use std::time::Duration;

/// One drifting glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub position: DVec2,
    /// Direction of travel in degrees, in [0, 360).
    pub heading: f64,
    /// Pixels per tick.
    pub speed: f64,
    pub glyph: Glyph,
    pub size: f64,
    /// Degrees, in [0, 360).
    pub rotation: f64,
    pub color: Srgb,
}

impl Particle {
    /// Unit vector along the heading.
    pub fn direction(&self) -> DVec2 {
        heading_vector(self.heading)
    }
}

/// A field of particles bound to a viewport.
pub struct ParticleField {
    params: ParticleParams,
    palette: GlyphPalette,
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: Xorshift64,
    /// Count waiting for a measured viewport.
    deferred: Option<usize>,
    schedule: TickSchedule,
    ticks: u64,
    next_id: u32,
    torn_down: bool,
}

impl ParticleField {
    /// Builds a field and initializes `params.count` particles.
    ///
    /// An unmeasured viewport defers placement until [`ParticleField::resize`]
    /// reports a real size. Fails only if the palette name is unknown.
    pub fn new(viewport: Viewport, seed: u64, params: ParticleParams) -> Result<Self, FxError> {
        let params = params.validated();
        let palette = params.palette()?;
        let schedule = TickSchedule::new(Duration::from_millis(params.interval_ms));
        let mut field = Self {
            palette,
            viewport,
            particles: Vec::new(),
            rng: Xorshift64::new(seed),
            deferred: None,
            schedule,
            ticks: 0,
            next_id: 0,
            torn_down: false,
            params,
        };
        field.initialize(field.params.count, viewport);
        Ok(field)
    }

    /// Builds a field from a JSON params object, defaults for missing keys.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, FxError> {
        Self::new(
            Viewport::new(width as f64, height as f64),
            seed,
            ParticleParams::from_json(json_params),
        )
    }

    /// Replaces all particles with `count` fresh ones spread over a coarse
    /// grid with jitter. Deferred while the viewport is unmeasured.
    ///
    /// After [`ParticleField::teardown`] this remounts the field: ticking and
    /// the schedule resume.
    pub fn initialize(&mut self, count: usize, viewport: Viewport) {
        if self.torn_down {
            self.torn_down = false;
            self.schedule = TickSchedule::new(Duration::from_millis(self.params.interval_ms));
            tracing::debug!("particle field remounted after teardown");
        }
        self.viewport = viewport;
        self.particles.clear();
        self.ticks = 0;
        let count = count.min(params::MAX_COUNT);
        if !viewport.is_measured() {
            tracing::debug!(count, ?viewport, "viewport unmeasured, deferring particle placement");
            self.deferred = Some(count);
            return;
        }
        self.deferred = None;
        self.particles = self.spawn(count);
        tracing::debug!(
            count,
            width = viewport.width,
            height = viewport.height,
            "particle field initialized"
        );
    }

    fn spawn(&mut self, count: usize) -> Vec<Particle> {
        if count == 0 {
            return Vec::new();
        }
        let (w, h) = (self.viewport.width, self.viewport.height);
        let cols = ((count as f64 * w / h).sqrt().ceil() as usize).clamp(1, count);
        let rows = count.div_ceil(cols);
        let cell = DVec2::new(w / cols as f64, h / rows as f64);
        let p = &self.params;

        (0..count)
            .map(|i| {
                let slot = DVec2::new((i % cols) as f64 + 0.5, (i / cols) as f64 + 0.5);
                let jitter = DVec2::new(self.rng.next_signed(), self.rng.next_signed())
                    * p.jitter
                    * cell;
                let position = self.viewport.clamp(slot * cell + jitter);
                let heading = self.rng.next_range(0.0, 360.0);
                let speed = self.rng.next_range(p.speed_min, p.speed_max);
                let size = self.rng.next_range(p.size_min, p.size_max);
                let rotation = self.rng.next_range(0.0, 360.0);
                let glyph = self
                    .rng
                    .pick(self.palette.glyphs())
                    .cloned()
                    .unwrap_or_else(|| Glyph::new("$", "dollar"));
                let color = self.rng.pick(self.palette.tints()).copied().unwrap_or(Srgb::WHITE);
                let id = self.next_id;
                self.next_id = self.next_id.wrapping_add(1);
                Particle {
                    id,
                    position,
                    heading,
                    speed,
                    glyph,
                    size,
                    rotation,
                    color,
                }
            })
            .collect()
    }

    /// Advances every particle one tick under the given pointer.
    pub fn tick(&mut self, pointer: &PointerState) {
        if self.torn_down || self.particles.is_empty() {
            return;
        }
        self.ticks += 1;
        for particle in &mut self.particles {
            steer(particle, pointer.position, &self.params, self.viewport);
        }
    }

    /// Feeds host frame time through the fixed-interval schedule and runs the
    /// ticks that fell due. Returns how many ran.
    pub fn advance(&mut self, elapsed: Duration, pointer: &PointerState) -> u32 {
        let due = self.schedule.advance(elapsed);
        for _ in 0..due {
            self.tick(pointer);
        }
        due
    }

    /// New clamp bounds. Particles keep their positions; the next tick pulls
    /// any that fell outside back in. Completes a deferred initialization.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.torn_down {
            return;
        }
        self.viewport = viewport;
        if let Some(count) = self.deferred {
            if viewport.is_measured() {
                self.initialize(count, viewport);
            }
        }
    }

    /// Cancels the schedule and drops all particles.
    pub fn teardown(&mut self) {
        self.schedule.cancel();
        self.particles.clear();
        self.deferred = None;
        self.torn_down = true;
        tracing::debug!(ticks = self.ticks, "particle field torn down");
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn settings(&self) -> &ParticleParams {
        &self.params
    }

    /// Time since placement, in tick intervals.
    fn elapsed(&self) -> Duration {
        Duration::from_millis(self.params.interval_ms.saturating_mul(self.ticks))
    }

    /// Entrance scale: eases from 0 to 1 over `entrance_ms`.
    pub fn entrance_scale(&self) -> f64 {
        if self.params.entrance_ms == 0 {
            return 1.0;
        }
        let t = self.elapsed().as_secs_f64() / (self.params.entrance_ms as f64 / 1000.0);
        Easing::EaseOut.apply(t)
    }

    /// Opacity pulse: min → max → min once per `pulse_period_ms`.
    pub fn pulse_opacity(&self) -> f64 {
        let (lo, hi) = (self.params.pulse_min, self.params.pulse_max);
        if self.params.pulse_period_ms == 0 {
            return hi;
        }
        let period = self.params.pulse_period_ms as f64 / 1000.0;
        let phase = (self.elapsed().as_secs_f64() / period).fract();
        let triangle = 1.0 - (2.0 * phase - 1.0).abs();
        lo + (hi - lo) * Easing::EaseInOut.apply(triangle)
    }

    /// One style record per particle.
    pub fn particle_styles(&self) -> Vec<ParticleStyle> {
        let opacity = self.pulse_opacity();
        let scale = self.entrance_scale();
        self.particles
            .iter()
            .map(|p| ParticleStyle {
                id: p.id,
                symbol: p.glyph.symbol.clone(),
                x: p.position.x,
                y: p.position.y,
                rotation: p.rotation,
                size: p.size,
                color: p.color,
                opacity,
                scale,
            })
            .collect()
    }
}

impl Animator for ParticleField {
    fn tick(&mut self, pointer: &PointerState) {
        ParticleField::tick(self, pointer);
    }

    fn resize(&mut self, viewport: Viewport) {
        ParticleField::resize(self, viewport);
    }

    fn styles(&self) -> Vec<StyleRecord> {
        self.particle_styles()
            .into_iter()
            .map(StyleRecord::Particle)
            .collect()
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        ParticleParams::schema()
    }

    fn teardown(&mut self) {
        ParticleField::teardown(self);
    }
}

/// Unit vector for a heading in degrees (0 = +x, 90 = +y, screen space).
pub fn heading_vector(heading: f64) -> DVec2 {
    let rad = heading.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Displacement the pointer adds to a particle at `position` this tick.
///
/// Repulsion inside `near_radius` scales with `1 - dist/near`, attraction
/// out to `outer_radius` with `1 - dist/outer`. A pointer exactly on the
/// particle pushes it along its own heading.
pub fn pointer_influence(
    position: DVec2,
    pointer: DVec2,
    direction: DVec2,
    params: &ParticleParams,
) -> DVec2 {
    let delta = pointer - position;
    let dist = delta.length();
    if !dist.is_finite() || dist >= params.outer_radius {
        return DVec2::ZERO;
    }
    if dist < params.near_radius {
        if dist <= f64::EPSILON {
            return direction * params.attraction * params.near_radius;
        }
        delta * (-params.attraction * (1.0 - dist / params.near_radius))
    } else {
        delta * (params.attraction * (1.0 - dist / params.outer_radius))
    }
}

/// One steering step: heading motion, pointer force, clamp and reflect, spin.
fn steer(p: &mut Particle, pointer: Option<DVec2>, params: &ParticleParams, viewport: Viewport) {
    let direction = p.direction();
    let mut next = p.position + direction * p.speed;
    if let Some(ptr) = pointer {
        next += pointer_influence(p.position, ptr, direction, params);
    }
    if !next.is_finite() {
        next = p.position;
    }

    let max = viewport.max().max(DVec2::ZERO);
    let mut heading = p.heading;
    if next.x < 0.0 || next.x > max.x {
        let outward = if next.x < 0.0 { direction.x < 0.0 } else { direction.x > 0.0 };
        next.x = next.x.clamp(0.0, max.x);
        if outward {
            heading = 180.0 - heading;
        }
    }
    if next.y < 0.0 || next.y > max.y {
        let outward = if next.y < 0.0 { direction.y < 0.0 } else { direction.y > 0.0 };
        next.y = next.y.clamp(0.0, max.y);
        if outward {
            heading = 360.0 - heading;
        }
    }

    p.position = next;
    p.heading = normalize_degrees(heading);
    p.rotation = normalize_degrees(p.rotation + params.rotation_step);
}
