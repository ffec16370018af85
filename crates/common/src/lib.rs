//! Shared types used by every gridwalk crate.

pub mod color;
pub mod types;

pub use color::{Color, ColorParseError};
pub use types::Transform;
