//! Game kernel: scene graph, camera, per-frame update and the loop that drives it.
//!
//! # Invariants
//! - All game state lives in an explicit [`Game`] context; nothing is global.
//! - Elapsed time handed to an update is never negative and is zero on the first frame.
//! - After a follow update the camera sits exactly the follow distance from the actor.

pub mod builder;
pub mod camera;
pub mod clock;
pub mod follow;
pub mod frame_loop;
pub mod game;
pub mod scene;

pub use builder::{FollowHandles, SpinHandles};
pub use camera::PerspectiveCamera;
pub use clock::FrameClock;
pub use follow::FollowRig;
pub use frame_loop::{FrameHandler, FrameLoop, LoopControl};
pub use game::{Game, GameSnapshot, SceneVariant};
pub use scene::{
    BoxGeometry, DirectionalLight, GridHelper, Material, Mesh, Node, NodeId, NodeKind, Scene,
    SceneError,
};
