use clap::{Parser, Subcommand, ValueEnum};
use gridwalk_common::Color;
use gridwalk_kernel::{FrameLoop, Game, SceneVariant};
use gridwalk_render::{DebugTextRenderer, Stage};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridwalk-cli", about = "Run the gridwalk demos headless")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneArg {
    Spin,
    Follow,
}

impl From<SceneArg> for SceneVariant {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Spin => SceneVariant::Spin,
            SceneArg::Follow => SceneVariant::Follow,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Drive a demo for a fixed number of frames and print the final state
    Simulate {
        /// Demo scene to run
        #[arg(long, value_enum, default_value_t = SceneArg::Follow)]
        scene: SceneArg,
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Simulated frames per second
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..))]
        fps: u32,
        /// Keys held for the whole run, e.g. `W,D` or `KeyW,ArrowUp`
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Background colour as RRGGBB
        #[arg(long)]
        clear_color: Option<Color>,
        /// Print the final state as JSON instead of a text frame
        #[arg(long)]
        json: bool,
    },
}

/// Map a short key name to its key code identifier: `w` becomes `KeyW`.
/// Anything longer than one character is taken as an identifier already.
fn key_id(name: &str) -> String {
    let name = name.trim();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        (Some(c), None) if c.is_ascii_digit() => format!("Digit{c}"),
        _ => name.to_owned(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("gridwalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", gridwalk_input::crate_info());
            println!("render: {}", gridwalk_render::crate_info());
            for variant in [SceneVariant::Spin, SceneVariant::Follow] {
                let game = Game::new(variant, 16.0 / 9.0);
                println!(
                    "scene {:?}: nodes={}, clear={}",
                    variant,
                    game.scene().len(),
                    variant.default_clear_color()
                );
            }
        }
        Commands::Simulate {
            scene,
            frames,
            fps,
            keys,
            clear_color,
            json,
        } => {
            let mut game = Game::new(scene.into(), 16.0 / 9.0);
            if let Some(color) = clear_color {
                game = game.with_clear_color(color);
            }
            for key in keys.iter().filter(|k| !k.trim().is_empty()) {
                game.input_mut().set_pressed(key_id(key), true);
            }

            let mut stage = Stage::new(game, DebugTextRenderer::new());
            let mut frame_loop = FrameLoop::new();
            let step_ms = 1000.0 / f64::from(fps);
            let ran = match frame_loop.run_fixed(&mut stage, frames, 0.0, step_ms) {
                Ok(ran) => ran,
                Err(never) => match never {},
            };
            tracing::info!(frames = ran, fps, "simulation finished");

            let (game, renderer) = stage.into_parts();
            if json {
                println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
            } else {
                print!("{}", renderer.last_frame());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_key_names_expand() {
        assert_eq!(key_id("w"), "KeyW");
        assert_eq!(key_id(" D "), "KeyD");
        assert_eq!(key_id("1"), "Digit1");
        assert_eq!(key_id("ArrowUp"), "ArrowUp");
        assert_eq!(key_id("KeyS"), "KeyS");
    }

    #[test]
    fn simulate_parses_key_list() {
        let cli = Cli::parse_from(["gridwalk-cli", "simulate", "--keys", "W,D", "--frames", "3"]);
        let Commands::Simulate { keys, frames, fps, .. } = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(keys, ["W", "D"]);
        assert_eq!(frames, 3);
        assert_eq!(fps, 60);
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(Cli::try_parse_from(["gridwalk-cli", "simulate", "--fps", "0"]).is_err());
    }
}
