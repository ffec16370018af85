use std::collections::HashMap;

/// Pressed/released state per key identifier.
///
/// Identifiers are the DOM `KeyboardEvent.code` names (`"KeyW"`, `"Space"`,
/// ...), which winit's `KeyCode` variants share. No validation is done: any
/// string can be recorded and queried.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    keys: HashMap<String, bool>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down (`true`) or key-up (`false`) event.
    pub fn set_pressed(&mut self, key: impl Into<String>, pressed: bool) {
        let key = key.into();
        tracing::trace!(%key, pressed, "key state");
        self.keys.insert(key, pressed);
    }

    /// Whether `key` is currently held. Unknown keys are not pressed.
    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Mark every key released, e.g. after the window loses focus.
    pub fn release_all(&mut self) {
        for pressed in self.keys.values_mut() {
            *pressed = false;
        }
    }

    /// Keys currently held, in no particular order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(|(_, pressed)| **pressed)
            .map(|(key, _)| key.as_str())
    }
}
