//! Input: key state tracking and the mapping from keys to movement.
//!
//! # Invariants
//! - A key that was never reported is not pressed.
//! - Platform code writes key state; game code samples it once per frame.

pub mod action;
pub mod tracker;

pub use action::{MoveIntent, MovementBindings};
pub use tracker::InputTracker;

pub fn crate_info() -> &'static str {
    concat!("gridwalk-input v", env!("CARGO_PKG_VERSION"))
}
