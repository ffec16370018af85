//! Scene construction for the two demo variants.

use glam::Vec3;
use gridwalk_common::{Color, Transform};

use crate::camera::PerspectiveCamera;
use crate::scene::{BoxGeometry, DirectionalLight, GridHelper, Material, Mesh, NodeId, NodeKind, Scene};

pub const FOLLOW_CLEAR_COLOR: Color = Color::from_hex(0x336699);
pub const SPIN_CLEAR_COLOR: Color = Color::BLACK;

const PLAYER_COLOR: Color = Color::from_hex(0x888888);
const SPIN_CUBE_COLOR: Color = Color::from_hex(0x00ff00);
const LIGHT_POSITION: Vec3 = Vec3::new(4.0, 4.0, 4.0);
const FOLLOW_CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, 5.0);
const SPIN_CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Nodes of the follow scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowHandles {
    pub grid: NodeId,
    pub actor: NodeId,
    pub light: NodeId,
}

/// Nodes of the spin scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinHandles {
    pub cube: NodeId,
}

fn camera(aspect: f32) -> PerspectiveCamera {
    PerspectiveCamera::new(75.0, aspect, 0.1, 1000.0)
}

/// Grid, flat-shaded player cube and a white directional light, seen from
/// above and behind the origin.
pub fn build_follow_scene(aspect: f32) -> (Scene, PerspectiveCamera, FollowHandles) {
    let mut scene = Scene::new(FOLLOW_CLEAR_COLOR);

    let grid = scene.add(
        "grid",
        NodeKind::Grid(GridHelper::new(10.0, 10)),
        Transform::default(),
    );
    let actor = scene.add(
        "player",
        NodeKind::Mesh(Mesh {
            geometry: BoxGeometry::unit(),
            material: Material::flat_phong(PLAYER_COLOR),
        }),
        Transform::default(),
    );
    let light = scene.add(
        "sun",
        NodeKind::DirectionalLight(DirectionalLight {
            color: Color::WHITE,
            intensity: 1.0,
        }),
        Transform::from_position(LIGHT_POSITION),
    );

    let mut camera = camera(aspect);
    camera.set_position(FOLLOW_CAMERA_START);
    camera.look_at(Vec3::ZERO);

    (scene, camera, FollowHandles { grid, actor, light })
}

/// One unlit green cube in front of the camera.
pub fn build_spin_scene(aspect: f32) -> (Scene, PerspectiveCamera, SpinHandles) {
    let mut scene = Scene::new(SPIN_CLEAR_COLOR);
    let cube = scene.add(
        "cube",
        NodeKind::Mesh(Mesh {
            geometry: BoxGeometry::unit(),
            material: Material::basic(SPIN_CUBE_COLOR),
        }),
        Transform::default(),
    );

    let mut camera = camera(aspect);
    camera.set_position(SPIN_CAMERA_START);

    (scene, camera, SpinHandles { cube })
}
