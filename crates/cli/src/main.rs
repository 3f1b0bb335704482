#![deny(unsafe_code)]
//! CLI binary for ambient-fx.
//!
//! Subcommands:
//! - `run <effect>`: simulate an effect for N ticks, write a JSON frame trace
//! - `schema <effect>`: print an effect's parameter schema
//! - `list`: print available effects and palettes
//!
//! Logging goes to stderr and is filtered by `RUST_LOG` (default `warn`).

mod error;

use ambient_fx_core::{Animator, GlyphPalette, Scene};
use ambient_fx_effects::trace;
use ambient_fx_effects::EffectKind;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ambient-fx", about = "Pointer-reactive ambient effects CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate an effect for N ticks and write a JSON frame trace.
    Run {
        /// Effect name (e.g. "particles", "tilt").
        #[arg(required_unless_present = "scene", conflicts_with = "scene")]
        effect: Option<String>,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1000)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 800)]
        height: usize,

        /// Number of ticks to simulate.
        #[arg(short, long, default_value_t = 120)]
        ticks: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Effect parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Fixed pointer position as "x,y"; omit for no pointer.
        #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
        pointer: Option<[f64; 2]>,

        /// Record a frame every N ticks.
        #[arg(long, default_value_t = 1)]
        every: usize,

        /// Output trace path.
        #[arg(short, long, default_value = "trace.json")]
        output: PathBuf,

        /// Load the whole scene from a JSON file instead of flags.
        #[arg(long)]
        scene: Option<PathBuf>,
    },
    /// Print the parameter schema of an effect.
    Schema {
        /// Effect name.
        effect: String,
    },
    /// List available effects and palettes.
    List,
}

fn parse_pointer(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate '{v}'"))
    };
    Ok([coord(x)?, coord(y)?])
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    Ok(Scene::from_json(&text)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let effects = EffectKind::list_effects();
            let glyph_sets = GlyphPalette::list_glyph_sets();
            let tints = GlyphPalette::list_tints();
            if cli.json {
                let info = serde_json::json!({
                    "effects": effects,
                    "glyph_sets": glyph_sets,
                    "tints": tints,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Effects:");
                for name in effects {
                    println!("  {name}");
                }
                println!("Glyph sets:");
                println!("  {}", glyph_sets.join(", "));
                println!("Tints:");
                println!("  {}", tints.join(", "));
            }
        }
        Command::Schema { effect } => {
            let fx = EffectKind::from_name(&effect, 1, 1, 0, &serde_json::json!({}))?;
            println!("{}", serde_json::to_string_pretty(&fx.param_schema())?);
        }
        Command::Run {
            effect,
            width,
            height,
            ticks,
            seed,
            params,
            pointer,
            every,
            output,
            scene,
        } => {
            let scene = match (scene, effect) {
                (Some(path), _) => load_scene(&path)?,
                (None, Some(effect)) => {
                    let params: serde_json::Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    let mut scene = Scene::new(&effect, width, height, seed);
                    scene.params = params;
                    scene.ticks = ticks;
                    scene.pointer = pointer;
                    scene
                }
                (None, None) => {
                    return Err(CliError::Input("an effect name or --scene is required".into()))
                }
            };
            tracing::debug!(effect = %scene.effect, ticks = scene.ticks, "running scene");

            let recorded = trace::record(&scene, every)?;
            trace::write_trace(&recorded, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "effect": scene.effect,
                    "width": scene.width,
                    "height": scene.height,
                    "ticks": scene.ticks,
                    "seed": scene.seed,
                    "frames": recorded.frames.len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "ran {} ({}x{}, {} ticks, seed {}) -> {} frames in {}",
                    scene.effect,
                    scene.width,
                    scene.height,
                    scene.ticks,
                    scene.seed,
                    recorded.frames.len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_pointer_accepts_pairs() {
        assert_eq!(parse_pointer("100,50").unwrap(), [100.0, 50.0]);
        assert_eq!(parse_pointer(" -20.5 , 3").unwrap(), [-20.5, 3.0]);
    }

    #[test]
    fn parse_pointer_rejects_garbage() {
        assert!(parse_pointer("100").is_err());
        assert!(parse_pointer("a,b").is_err());
        assert!(parse_pointer("inf,0").is_err());
    }

    #[test]
    fn run_requires_effect_or_scene() {
        assert!(Cli::try_parse_from(["ambient-fx", "run"]).is_err());
        assert!(Cli::try_parse_from(["ambient-fx", "run", "tilt"]).is_ok());
        assert!(Cli::try_parse_from(["ambient-fx", "run", "--scene", "s.json"]).is_ok());
    }

    #[test]
    fn run_writes_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("t.json");
        let cli = Cli::try_parse_from([
            "ambient-fx",
            "run",
            "particles",
            "-W",
            "200",
            "-H",
            "100",
            "--ticks",
            "6",
            "--every",
            "3",
            "--pointer",
            "100,50",
            "--params",
            r#"{"count": 4}"#,
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        assert!(run(cli).is_ok());
        let written = trace::read_trace(&out).unwrap();
        assert_eq!(written.frames.len(), 3);
        assert_eq!(written.frames[0].styles.len(), 4);
    }

    #[test]
    fn run_rejects_bad_params_json_as_input_error() {
        let cli =
            Cli::try_parse_from(["ambient-fx", "run", "tilt", "--params", "{nope"]).unwrap();
        match run(cli) {
            Err(e) => assert_eq!(e.exit_code(), 12),
            Ok(()) => panic!("bad params accepted"),
        }
    }

    #[test]
    fn unknown_effect_maps_to_exit_10() {
        let cli = Cli::try_parse_from(["ambient-fx", "schema", "confetti"]).unwrap();
        match run(cli) {
            Err(e) => assert_eq!(e.exit_code(), 10),
            Ok(()) => panic!("unknown effect accepted"),
        }
    }

    #[test]
    fn missing_scene_file_maps_to_exit_11() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let cli = Cli::try_parse_from([
            "ambient-fx",
            "run",
            "--scene",
            path.to_str().unwrap(),
        ])
        .unwrap();
        match run(cli) {
            Err(e) => assert_eq!(e.exit_code(), 11),
            Ok(()) => panic!("missing scene accepted"),
        }
    }
}
