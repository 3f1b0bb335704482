//! Frame traces: run a [`Scene`] headlessly and record its style records.
//!
//! The trace file is pretty JSON, `{ "scene": {...}, "frames": [{ "tick", "styles" }] }`,
//! so a run can be diffed, replayed by a renderer or inspected by hand.

use ambient_fx_core::{Animator, FxError, Scene, StyleRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::EffectKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: usize,
    pub styles: Vec<StyleRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub scene: Scene,
    pub frames: Vec<Frame>,
}

/// Simulates `scene.ticks` ticks with the scene's fixed pointer.
///
/// Records the initial frame, every `every`-th tick and always the final tick.
/// Returns `FxError::InvalidParam` if `every` is zero.
pub fn record(scene: &Scene, every: usize) -> Result<Trace, FxError> {
    if every == 0 {
        return Err(FxError::InvalidParam {
            name: "every".into(),
            reason: "must be at least 1".into(),
        });
    }
    let mut effect = EffectKind::from_scene(scene)?;
    let pointer = scene.pointer_state();
    let mut frames = vec![Frame {
        tick: 0,
        styles: effect.styles(),
    }];
    for tick in 1..=scene.ticks {
        effect.tick(&pointer);
        if tick % every == 0 || tick == scene.ticks {
            frames.push(Frame {
                tick,
                styles: effect.styles(),
            });
        }
    }
    tracing::debug!(
        effect = %scene.effect,
        ticks = scene.ticks,
        frames = frames.len(),
        "scene recorded"
    );
    Ok(Trace {
        scene: scene.clone(),
        frames,
    })
}

/// Writes a trace as pretty JSON.
///
/// Returns `FxError::Io` on serialization or write failure.
pub fn write_trace(trace: &Trace, path: &Path) -> Result<(), FxError> {
    let json = serde_json::to_string_pretty(trace).map_err(|e| FxError::Io(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| FxError::Io(format!("{}: {e}", path.display())))
}

/// Reads a trace back from disk.
pub fn read_trace(path: &Path) -> Result<Trace, FxError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| FxError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text).map_err(|e| FxError::InvalidParam {
        name: "trace".into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tilt_scene() -> Scene {
        let mut scene = Scene::new("tilt", 200, 100, 3);
        scene.ticks = 10;
        scene.pointer = Some([150.0, 25.0]);
        scene
    }

    #[test]
    fn records_initial_periodic_and_final_frames() {
        let trace = record(&tilt_scene(), 4).unwrap();
        let ticks: Vec<usize> = trace.frames.iter().map(|f| f.tick).collect();
        assert_eq!(ticks, vec![0, 4, 8, 10]);
    }

    #[test]
    fn zero_every_is_rejected() {
        assert!(matches!(
            record(&tilt_scene(), 0),
            Err(FxError::InvalidParam { .. })
        ));
    }

    #[test]
    fn zero_ticks_records_only_initial_frame() {
        let mut scene = tilt_scene();
        scene.ticks = 0;
        assert_eq!(record(&scene, 1).unwrap().frames.len(), 1);
    }

    #[test]
    fn unknown_effect_fails() {
        let scene = Scene::new("fireworks", 10, 10, 1);
        assert!(matches!(record(&scene, 1), Err(FxError::UnknownEffect(_))));
    }

    #[test]
    fn tilt_trace_leans_toward_pointer() {
        let trace = record(&tilt_scene(), 10).unwrap();
        let last = trace.frames.last().unwrap();
        match &last.styles[0] {
            // pointer in the upper-right quadrant
            StyleRecord::Panel(p) => {
                assert!(p.rotate_y > 0.0);
                assert!(p.rotate_x > 0.0);
                assert!(p.glare_x > 50.0 && p.glare_y < 50.0);
            }
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn particle_trace_is_deterministic() {
        let mut scene = Scene::new("particles", 300, 200, 11);
        scene.params = json!({"count": 8});
        scene.ticks = 30;
        scene.pointer = Some([150.0, 100.0]);
        assert_eq!(record(&scene, 5).unwrap(), record(&scene, 5).unwrap());
    }

    #[test]
    fn write_and_read_round_trip() {
        let trace = record(&tilt_scene(), 5).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");

        write_trace(&trace, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["scene"]["effect"], "tilt");
        assert_eq!(value["frames"][0]["styles"][0]["kind"], "panel");
        assert_eq!(read_trace(&path).unwrap().frames.len(), trace.frames.len());
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let trace = record(&tilt_scene(), 5).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("trace.json");
        assert!(matches!(write_trace(&trace, &path), Err(FxError::Io(_))));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn particle_frames_stay_finite_and_in_bounds(
                width in 1_usize..800,
                height in 1_usize..600,
                seed in any::<u64>(),
                count in 0_usize..30,
                ticks in 0_usize..60,
                pointer in proptest::option::of((-500.0_f64..1500.0, -500.0_f64..1500.0)),
            ) {
                let mut scene = Scene::new("particles", width, height, seed);
                scene.params = json!({"count": count});
                scene.ticks = ticks;
                scene.pointer = pointer.map(|(x, y)| [x, y]);
                let trace = record(&scene, 7).unwrap();
                for frame in &trace.frames {
                    prop_assert_eq!(frame.styles.len(), count);
                    for style in &frame.styles {
                        let StyleRecord::Particle(p) = style else {
                            return Err(TestCaseError::fail("non-particle record"));
                        };
                        prop_assert!(p.x.is_finite() && p.y.is_finite());
                        prop_assert!((0.0..=width as f64).contains(&p.x), "x {}", p.x);
                        prop_assert!((0.0..=height as f64).contains(&p.y), "y {}", p.y);
                    }
                }
            }

            #[test]
            fn tilt_frames_respect_rotation_bound(
                stiffness in 0.0_f64..1e6,
                damping in 0.0_f64..1e3,
                depth in 0.0_f64..200.0,
                x in -200.0_f64..400.0,
                y in -200.0_f64..300.0,
            ) {
                let mut scene = Scene::new("tilt", 200, 100, 5);
                scene.params = json!({"stiffness": stiffness, "damping": damping, "depth": depth});
                scene.ticks = 40;
                scene.pointer = Some([x, y]);
                let trace = record(&scene, 1).unwrap();
                // depth is capped at 90 degrees
                let limit = depth.min(90.0) * 0.5 + 1e-9;
                for frame in &trace.frames {
                    let StyleRecord::Panel(p) = &frame.styles[0] else {
                        return Err(TestCaseError::fail("non-panel record"));
                    };
                    prop_assert!(p.rotate_x.is_finite() && p.rotate_y.is_finite());
                    prop_assert!(p.rotate_x.abs() <= limit, "rotate_x {}", p.rotate_x);
                    prop_assert!(p.rotate_y.abs() <= limit, "rotate_y {}", p.rotate_y);
                    prop_assert!((0.0..=1.0).contains(&p.glare_opacity));
                }
            }
        }
    }
}
