/// Converts frame timestamps into elapsed seconds.
///
/// Starts out waiting for its first frame. That frame only records the
/// baseline timestamp and reports zero elapsed time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a baseline timestamp has been recorded.
    pub fn is_running(&self) -> bool {
        self.last_ms.is_some()
    }

    /// Record `now_ms` and return seconds since the previous tick.
    ///
    /// Never negative: a timestamp older than the previous one yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_ms {
            None => 0.0,
            Some(last_ms) => ((now_ms - last_ms) / 1000.0).max(0.0),
        };
        self.last_ms = Some(now_ms);
        elapsed as f32
    }
}
