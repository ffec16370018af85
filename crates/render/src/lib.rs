//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene and camera; they never mutate game state.
//! - A [`Stage`] always updates before it renders.
//!
//! The GPU backend lives in `gridwalk-render-wgpu`. [`DebugTextRenderer`]
//! implements the same trait for headless runs and tests.

mod renderer;
mod stage;

pub use renderer::{DebugTextRenderer, Renderer};
pub use stage::Stage;

pub fn crate_info() -> &'static str {
    concat!("gridwalk-render v", env!("CARGO_PKG_VERSION"))
}
