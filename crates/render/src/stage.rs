use gridwalk_kernel::{FrameHandler, Game};

use crate::Renderer;

/// A game paired with the renderer that draws it: the unit the frame loop drives.
#[derive(Debug)]
pub struct Stage<R> {
    game: Game,
    renderer: R,
}

impl<R: Renderer> Stage<R> {
    pub fn new(game: Game, renderer: R) -> Self {
        Self { game, renderer }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (Game, R) {
        (self.game, self.renderer)
    }
}

impl<R: Renderer> FrameHandler for Stage<R> {
    type Error = R::Error;

    fn update(&mut self, elapsed: f32) {
        self.game.update(elapsed);
    }

    fn render(&mut self) -> Result<(), R::Error> {
        self.renderer
            .render(self.game.scene(), self.game.camera())
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DebugTextRenderer;
    use glam::Vec3;
    use gridwalk_kernel::{FrameLoop, LoopControl, SceneVariant};

    #[test]
    fn stage_updates_then_renders() {
        let mut stage = Stage::new(
            Game::new(SceneVariant::Follow, 1.0),
            DebugTextRenderer::new(),
        );
        stage.game_mut().input_mut().set_pressed("KeyW", true);

        let mut frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.tick(0.0, &mut stage), Ok(LoopControl::Continue));
        assert_eq!(frame_loop.tick(500.0, &mut stage), Ok(LoopControl::Continue));

        assert_eq!(stage.renderer().frames(), 2);
        let actor = stage.game().actor_position().unwrap();
        assert!((actor - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
        assert!(stage.renderer().last_frame().contains("pos=(0.00, 0.00, -2.00)"));
    }

    #[test]
    fn run_fixed_drives_the_stage() {
        let mut stage = Stage::new(
            Game::new(SceneVariant::Follow, 1.0),
            DebugTextRenderer::new(),
        );
        stage.game_mut().input_mut().set_pressed("KeyW", true);
        let mut frame_loop = FrameLoop::new();
        let ran = frame_loop.run_fixed(&mut stage, 11, 0.0, 100.0).unwrap();
        assert_eq!(ran, 11);

        let (game, renderer) = stage.into_parts();
        assert_eq!(renderer.frames(), 11);
        // Ten real steps of 0.1 s at 4 units/s.
        let actor = game.actor_position().unwrap();
        assert!((actor - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);
    }
}
