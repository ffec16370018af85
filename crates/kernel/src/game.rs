use glam::{EulerRot, Quat, Vec2, Vec3};
use gridwalk_common::{Color, Transform};
use gridwalk_input::{InputTracker, MoveIntent, MovementBindings};
use serde::{Deserialize, Serialize};

use crate::builder::{self, FollowHandles, SpinHandles};
use crate::camera::PerspectiveCamera;
use crate::follow::FollowRig;
use crate::scene::{NodeId, Scene, SceneError};

fn node_transform(scene: &Scene, id: NodeId) -> Result<Transform, SceneError> {
    scene
        .transform(id)
        .copied()
        .ok_or(SceneError::NodeNotFound(id))
}

/// Spin rate of the spin demo about both x and y, in radians per second.
pub const SPIN_RATE: f32 = 0.6;

/// Which demo scene to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneVariant {
    /// A single rotating cube.
    Spin,
    /// A keyboard-driven cube on a grid with a follow camera.
    #[default]
    Follow,
}

impl SceneVariant {
    pub fn default_clear_color(self) -> Color {
        match self {
            Self::Spin => builder::SPIN_CLEAR_COLOR,
            Self::Follow => builder::FOLLOW_CLEAR_COLOR,
        }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Spin {
        handles: SpinHandles,
        angles: Vec2,
    },
    Follow {
        handles: FollowHandles,
        rig: FollowRig,
    },
}

/// Application context: owns the scene, camera and input state of one demo.
///
/// Platform code feeds key events through [`Game::input_mut`] and calls
/// [`Game::update`] once per frame; renderers read [`Game::scene`] and
/// [`Game::camera`].
#[derive(Debug, Clone)]
pub struct Game {
    variant: SceneVariant,
    scene: Scene,
    camera: PerspectiveCamera,
    input: InputTracker,
    bindings: MovementBindings,
    mode: Mode,
}

/// Serializable summary of a game's current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub variant: SceneVariant,
    pub actor: Option<Vec3>,
    pub camera_position: Vec3,
    pub camera_forward: Vec3,
    pub clear_color: Color,
    pub pressed_keys: Vec<String>,
}

impl Game {
    pub fn new(variant: SceneVariant, aspect: f32) -> Self {
        let (scene, camera, mode) = match variant {
            SceneVariant::Spin => {
                let (scene, camera, handles) = builder::build_spin_scene(aspect);
                let mode = Mode::Spin {
                    handles,
                    angles: Vec2::ZERO,
                };
                (scene, camera, mode)
            }
            SceneVariant::Follow => {
                let (scene, camera, handles) = builder::build_follow_scene(aspect);
                let mode = Mode::Follow {
                    handles,
                    rig: FollowRig::default(),
                };
                (scene, camera, mode)
            }
        };
        tracing::info!(?variant, nodes = scene.len(), "scene built");

        Self {
            variant,
            scene,
            camera,
            input: InputTracker::new(),
            bindings: MovementBindings::default(),
            mode,
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.scene.set_clear_color(color);
        self
    }

    pub fn with_bindings(mut self, bindings: MovementBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn variant(&self) -> SceneVariant {
        self.variant
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputTracker {
        &mut self.input
    }

    /// Position of the player cube; `None` in the spin demo.
    pub fn actor_position(&self) -> Option<Vec3> {
        match &self.mode {
            Mode::Follow { handles, .. } => self.scene.transform(handles.actor).map(|t| t.position),
            Mode::Spin { .. } => None,
        }
    }

    /// Advance the game by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        if let Err(e) = self.step(elapsed) {
            tracing::warn!("update skipped: {e}");
        }
    }

    fn step(&mut self, elapsed: f32) -> Result<(), SceneError> {
        match &mut self.mode {
            Mode::Spin { handles, angles } => {
                *angles += Vec2::splat(SPIN_RATE * elapsed.max(0.0));
                let mut cube = node_transform(&self.scene, handles.cube)?;
                cube.rotation = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, 0.0);
                self.scene.set_transform(handles.cube, cube)
            }
            Mode::Follow { handles, rig } => {
                let intent = MoveIntent::from_input(&self.input, &self.bindings);
                let mut actor = node_transform(&self.scene, handles.actor)?;
                let moved = rig.step(intent, elapsed, &mut actor, &mut self.camera);
                self.scene.set_transform(handles.actor, actor)?;
                if !intent.is_idle() {
                    tracing::debug!(?moved, position = ?actor.position, "actor moved");
                }
                Ok(())
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut pressed_keys: Vec<String> =
            self.input.pressed_keys().map(str::to_owned).collect();
        pressed_keys.sort();
        GameSnapshot {
            variant: self.variant,
            actor: self.actor_position(),
            camera_position: self.camera.position(),
            camera_forward: self.camera.forward(),
            clear_color: self.scene.clear_color(),
            pressed_keys,
        }
    }
}
