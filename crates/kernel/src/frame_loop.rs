use crate::clock::FrameClock;

/// Work performed once per frame: advance the game, then draw it.
pub trait FrameHandler {
    type Error;

    fn update(&mut self, elapsed: f32);

    fn render(&mut self) -> Result<(), Self::Error>;

    /// Checked after each frame; `true` stops the loop before it reschedules.
    fn wants_stop(&self) -> bool {
        false
    }
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule another tick on the next display refresh.
    Continue,
    /// Do not reschedule.
    Stop,
}

/// Drives a [`FrameHandler`] from externally supplied frame timestamps.
///
/// The loop never schedules itself: the host calls [`FrameLoop::tick`] from
/// its refresh callback and reschedules while it gets
/// [`LoopControl::Continue`] back.
#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: FrameClock,
    stopped: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the loop ends. Takes effect before the next reschedule.
    pub fn stop(&mut self) {
        if !self.stopped {
            tracing::info!(frames = self.frames, "frame loop stop requested");
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run one frame at `now_ms` (milliseconds on any monotonic timeline).
    pub fn tick<H: FrameHandler>(
        &mut self,
        now_ms: f64,
        handler: &mut H,
    ) -> Result<LoopControl, H::Error> {
        if self.stopped {
            return Ok(LoopControl::Stop);
        }

        let elapsed = self.clock.tick(now_ms);
        let _span = tracing::debug_span!("frame", index = self.frames, elapsed).entered();

        handler.update(elapsed);
        handler.render()?;
        self.frames += 1;

        if handler.wants_stop() {
            self.stop();
        }

        if self.stopped {
            Ok(LoopControl::Stop)
        } else {
            Ok(LoopControl::Continue)
        }
    }

    /// Tick `frames` times at a fixed interval, starting at `start_ms`.
    ///
    /// Stops early if the loop is stopped. Returns the number of frames run.
    pub fn run_fixed<H: FrameHandler>(
        &mut self,
        handler: &mut H,
        frames: u64,
        start_ms: f64,
        step_ms: f64,
    ) -> Result<u64, H::Error> {
        let mut ran = 0;
        for i in 0..frames {
            if self.stopped {
                break;
            }
            let now_ms = start_ms + i as f64 * step_ms;
            self.tick(now_ms, handler)?;
            ran += 1;
        }
        Ok(ran)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        elapsed: Vec<f32>,
        fail_render: bool,
    }

    impl FrameHandler for Recorder {
        type Error = String;

        fn update(&mut self, elapsed: f32) {
            self.calls.push("update".into());
            self.elapsed.push(elapsed);
        }

        fn render(&mut self) -> Result<(), String> {
            self.calls.push("render".into());
            if self.fail_render {
                Err("no context".into())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn update_runs_before_render() {
        let mut frame_loop = FrameLoop::new();
        let mut rec = Recorder::default();
        assert_eq!(frame_loop.tick(0.0, &mut rec), Ok(LoopControl::Continue));
        assert_eq!(rec.calls, vec!["update", "render"]);
    }

    #[test]
    fn first_frame_has_zero_elapsed() {
        let mut frame_loop = FrameLoop::new();
        let mut rec = Recorder::default();
        frame_loop.tick(5_000.0, &mut rec).unwrap();
        frame_loop.tick(5_020.0, &mut rec).unwrap();
        frame_loop.tick(5_030.0, &mut rec).unwrap();
        assert_eq!(rec.elapsed[0], 0.0);
        assert!((rec.elapsed[1] - 0.02).abs() < 1e-6);
        assert!((rec.elapsed[2] - 0.01).abs() < 1e-6);
        assert_eq!(frame_loop.frame_count(), 3);
    }

    #[test]
    fn handler_can_stop_the_loop() {
        struct OneShot {
            done: bool,
        }
        impl FrameHandler for OneShot {
            type Error = ();
            fn update(&mut self, _elapsed: f32) {
                self.done = true;
            }
            fn render(&mut self) -> Result<(), ()> {
                Ok(())
            }
            fn wants_stop(&self) -> bool {
                self.done
            }
        }

        let mut frame_loop = FrameLoop::new();
        let mut handler = OneShot { done: false };
        assert_eq!(frame_loop.tick(0.0, &mut handler), Ok(LoopControl::Stop));
        assert!(frame_loop.is_stopped());
        assert_eq!(frame_loop.frame_count(), 1);
    }

    #[test]
    fn stopped_loop_skips_the_handler() {
        let mut frame_loop = FrameLoop::new();
        let mut rec = Recorder::default();
        frame_loop.tick(0.0, &mut rec).unwrap();
        frame_loop.stop();
        assert_eq!(frame_loop.tick(16.0, &mut rec), Ok(LoopControl::Stop));
        assert_eq!(rec.calls, vec!["update", "render"]);
        assert_eq!(frame_loop.frame_count(), 1);
    }

    #[test]
    fn render_error_propagates() {
        let mut frame_loop = FrameLoop::new();
        let mut rec = Recorder {
            fail_render: true,
            ..Recorder::default()
        };
        assert_eq!(frame_loop.tick(0.0, &mut rec), Err("no context".into()));
        assert_eq!(frame_loop.frame_count(), 0);
    }

    #[test]
    fn run_fixed_steps_evenly() {
        let mut frame_loop = FrameLoop::new();
        let mut rec = Recorder::default();
        let ran = frame_loop.run_fixed(&mut rec, 4, 100.0, 250.0).unwrap();
        assert_eq!(ran, 4);
        assert_eq!(rec.elapsed, vec![0.0, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn run_fixed_on_stopped_loop_does_nothing() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.stop();
        let mut rec = Recorder::default();
        assert_eq!(frame_loop.run_fixed(&mut rec, 10, 0.0, 16.0), Ok(0));
        assert!(frame_loop.is_stopped());
    }
}
