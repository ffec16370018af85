use glam::Vec2;

use crate::InputTracker;

/// Key identifiers bound to each movement direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementBindings {
    pub forward: String,
    pub back: String,
    pub strafe_left: String,
    pub strafe_right: String,
}

impl Default for MovementBindings {
    fn default() -> Self {
        Self {
            forward: "KeyW".into(),
            back: "KeyS".into(),
            strafe_left: "KeyA".into(),
            strafe_right: "KeyD".into(),
        }
    }
}

/// Movement requested for one frame, sampled from the input tracker.
///
/// The update step consumes intents, never raw key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

impl MoveIntent {
    pub fn from_input(input: &InputTracker, bindings: &MovementBindings) -> Self {
        Self {
            forward: input.is_pressed(&bindings.forward),
            back: input.is_pressed(&bindings.back),
            strafe_left: input.is_pressed(&bindings.strafe_left),
            strafe_right: input.is_pressed(&bindings.strafe_right),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.axes() == Vec2::ZERO
    }

    /// Summed key axes: `x` is right minus left, `y` is forward minus back.
    ///
    /// Each component is in `{-1, 0, 1}`; a diagonal is not normalized.
    pub fn axes(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(
            axis(self.strafe_right, self.strafe_left),
            axis(self.forward, self.back),
        )
    }
}
