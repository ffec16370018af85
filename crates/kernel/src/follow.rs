//! Camera-relative actor movement and the lagging follow camera.

use glam::Vec3;
use gridwalk_common::Transform;
use gridwalk_input::MoveIntent;

use crate::camera::PerspectiveCamera;

/// Actor speed in world units per second.
pub const PLAYER_SPEED: f32 = 4.0;
/// Distance the camera keeps from the actor after every update.
pub const CAMERA_DISTANCE_TO_PLAYER: f32 = 5.0;

/// Below this horizontal length the camera-to-actor offset has no usable heading.
const HEADING_EPSILON: f32 = 1e-6;

/// Moves the actor relative to the camera's heading and keeps the camera
/// at a fixed distance behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowRig {
    pub speed: f32,
    pub distance: f32,
    /// Heading used when the camera is directly above or below the actor.
    last_forward: Vec3,
    /// Camera offset direction used when the camera coincides with the actor.
    fallback_offset: Vec3,
}

impl Default for FollowRig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            distance: CAMERA_DISTANCE_TO_PLAYER,
            last_forward: Vec3::NEG_Z,
            fallback_offset: Vec3::new(0.0, 1.0, 1.0).normalize(),
        }
    }
}

impl FollowRig {
    pub fn new(speed: f32, distance: f32) -> Self {
        Self {
            speed,
            distance,
            ..Self::default()
        }
    }

    pub fn last_forward(&self) -> Vec3 {
        self.last_forward
    }

    /// Horizontal forward/right basis from the camera towards the actor.
    ///
    /// Right is forward rotated a quarter turn clockwise seen from above.
    pub fn basis(&mut self, actor: Vec3, camera: Vec3) -> (Vec3, Vec3) {
        let flat = (actor - camera).with_y(0.0);
        let forward = if flat.length() < HEADING_EPSILON {
            self.last_forward
        } else {
            flat.normalize()
        };
        self.last_forward = forward;
        let right = Vec3::new(-forward.z, 0.0, forward.x);
        (forward, right)
    }

    /// Advance one frame. Returns the actor's displacement.
    pub fn step(
        &mut self,
        intent: MoveIntent,
        elapsed: f32,
        actor: &mut Transform,
        camera: &mut PerspectiveCamera,
    ) -> Vec3 {
        let elapsed = elapsed.max(0.0);
        let (forward, right) = self.basis(actor.position, camera.position());

        let axes = intent.axes();
        let displacement = (forward * axes.y + right * axes.x) * self.speed * elapsed;
        actor.position += displacement;

        camera.look_at(actor.position);

        let offset = camera.position() - actor.position;
        let offset = if offset.length_squared() > 0.0 {
            offset.normalize() * self.distance
        } else {
            self.fallback_offset * self.distance
        };
        camera.set_position(actor.position + offset);

        tracing::trace!(?displacement, actor = ?actor.position, camera = ?camera.position(), "follow step");
        displacement
    }
}
