//! wgpu render backend for the gridwalk demos.
//!
//! Draws grid helpers as line lists and box meshes as instanced cubes, lit by
//! the scene's first directional light.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - The surface is reconfigured, not recreated, when it is lost or resized.

mod gpu;
mod shaders;
mod surface;

pub use gpu::WgpuRenderer;
pub use surface::{RenderError, SurfaceRenderer};
