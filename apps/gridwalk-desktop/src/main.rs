use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridwalk_common::Color;
use gridwalk_kernel::{FrameLoop, Game, LoopControl, SceneVariant};
use gridwalk_render::Stage;
use gridwalk_render_wgpu::SurfaceRenderer;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneArg {
    /// A single rotating cube
    Spin,
    /// WASD-driven cube on a grid with a follow camera
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

#[derive(Parser)]
#[command(name = "gridwalk-desktop", about = "Gridwalk 3D demos in a desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Demo scene to run
    #[arg(long, value_enum, default_value_t = SceneArg::Follow)]
    scene: SceneArg,

    /// Background colour as RRGGBB, overriding the scene default
    #[arg(long)]
    clear_color: Option<Color>,

    /// Initial window width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

struct GpuApp {
    cli: Cli,
    window: Option<Arc<Window>>,
    stage: Option<Stage<SurfaceRenderer>>,
    frame_loop: FrameLoop,
    started: Instant,
    failure: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            stage: None,
            frame_loop: FrameLoop::new(),
            started: Instant::now(),
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Gridwalk")
            .with_inner_size(PhysicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let renderer = SurfaceRenderer::new(window.clone(), size.width, size.height)
            .context("failed to initialize GPU")?;

        let variant = SceneVariant::from(self.cli.scene);
        let mut game = Game::new(variant, renderer.aspect());
        if let Some(color) = self.cli.clear_color {
            game = game.with_clear_color(color);
        }

        self.stage = Some(Stage::new(game, renderer));
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.failure = Some(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let Some(stage) = &mut self.stage else {
            return;
        };
        if route_key(&mut self.frame_loop, stage.game_mut(), key, pressed) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

/// Key identifier as the input tracker sees it: the winit `KeyCode` name,
/// which matches the DOM `KeyboardEvent.code` string (`KeyW`, `ArrowUp`).
fn key_id(key: KeyCode) -> String {
    format!("{key:?}")
}

/// Send one key event to the game. Escape never reaches the game: pressing
/// it stops the loop. Returns `true` when the loop was stopped.
fn route_key(frame_loop: &mut FrameLoop, game: &mut Game, key: KeyCode, pressed: bool) -> bool {
    if key == KeyCode::Escape {
        if pressed {
            frame_loop.stop();
        }
        return pressed;
    }
    game.input_mut().set_pressed(key_id(key), pressed);
    false
}

/// Keys held while the window was focused would otherwise stay pressed.
fn focus_lost(game: &mut Game) {
    game.input_mut().release_all();
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(stage) = &mut self.stage {
                    stage.renderer_mut().resize(new_size.width, new_size.height);
                    let aspect = stage.renderer().aspect();
                    stage.game_mut().set_aspect(aspect);
                }
            }
            WindowEvent::Focused(false) => {
                if let Some(stage) = &mut self.stage {
                    focus_lost(stage.game_mut());
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let Some(stage) = &mut self.stage else {
                    return;
                };
                let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
                match self.frame_loop.tick(now_ms, stage) {
                    Ok(LoopControl::Continue) => {
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                    Ok(LoopControl::Stop) => {
                        tracing::info!(frames = self.frame_loop.frame_count(), "frame loop stopped");
                        event_loop.exit();
                    }
                    Err(e) => self.fail(event_loop, e.into()),
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!(scene = ?cli.scene, "gridwalk-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(cli);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_input::MovementBindings;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["gridwalk-desktop"]);
        assert_eq!(cli.scene, SceneArg::Follow);
        assert_eq!((cli.width, cli.height), (1280, 720));
        assert!(cli.clear_color.is_none());
    }

    #[test]
    fn cli_parses_scene_and_colour() {
        let cli = Cli::parse_from(["gridwalk-desktop", "--scene", "spin", "--clear-color", "#102030"]);
        assert_eq!(SceneVariant::from(cli.scene), SceneVariant::Spin);
        assert_eq!(cli.clear_color, Some(Color(0x102030)));
    }

    #[test]
    fn cli_rejects_bad_colour() {
        assert!(Cli::try_parse_from(["gridwalk-desktop", "--clear-color", "blue"]).is_err());
    }

    #[test]
    fn movement_keys_match_default_bindings() {
        let bindings = MovementBindings::default();
        assert_eq!(key_id(KeyCode::KeyW), bindings.forward);
        assert_eq!(key_id(KeyCode::KeyS), bindings.back);
        assert_eq!(key_id(KeyCode::KeyA), bindings.strafe_left);
        assert_eq!(key_id(KeyCode::KeyD), bindings.strafe_right);
    }

    #[test]
    fn key_events_drive_the_actor() {
        let mut frame_loop = FrameLoop::new();
        let mut game = Game::new(SceneVariant::Follow, 1.0);
        assert!(!route_key(&mut frame_loop, &mut game, KeyCode::KeyW, true));
        assert!(game.input().is_pressed("KeyW"));

        game.update(0.5);
        let actor = game.actor_position().unwrap();
        assert!((actor.z + 2.0).abs() < 1e-5);

        route_key(&mut frame_loop, &mut game, KeyCode::KeyW, false);
        assert!(!game.input().is_pressed("KeyW"));
        assert!(!frame_loop.is_stopped());
    }

    #[test]
    fn escape_stops_the_loop_without_recording_the_key() {
        let mut frame_loop = FrameLoop::new();
        let mut game = Game::new(SceneVariant::Follow, 1.0);

        assert!(!route_key(&mut frame_loop, &mut game, KeyCode::Escape, false));
        assert!(!frame_loop.is_stopped());

        assert!(route_key(&mut frame_loop, &mut game, KeyCode::Escape, true));
        assert!(frame_loop.is_stopped());
        assert!(!game.input().is_pressed("Escape"));
        assert_eq!(game.input().pressed_keys().count(), 0);
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut frame_loop = FrameLoop::new();
        let mut game = Game::new(SceneVariant::Follow, 1.0);
        route_key(&mut frame_loop, &mut game, KeyCode::KeyW, true);
        route_key(&mut frame_loop, &mut game, KeyCode::KeyD, true);

        focus_lost(&mut game);
        assert_eq!(game.input().pressed_keys().count(), 0);
        let before = game.actor_position();
        game.update(1.0);
        assert_eq!(game.actor_position(), before);
    }
}
