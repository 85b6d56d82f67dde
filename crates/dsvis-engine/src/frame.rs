//! A single schedulable unit of replay.

/// Preferred duration of an emphasis (blink) frame.
pub const BLINK_DELAY_MS: u64 = 200;

/// One item in the timeline queue: a side-effecting task plus a preferred
/// on-screen duration.
///
/// The delay is a pacing hint consumed by the [`crate::Timeline`], not a
/// hard real-time deadline; ticks degrade gracefully under speed scaling.
/// A frame is executed exactly once and then discarded.
pub struct Frame {
    task: Box<dyn FnOnce() + Send>,
    delay_ms: u64,
}

impl Frame {
    /// Create a frame from a task and a preferred duration in milliseconds.
    pub fn new(task: impl FnOnce() + Send + 'static, delay_ms: u64) -> Self {
        Self {
            task: Box::new(task),
            delay_ms,
        }
    }

    /// Convenience factory with a fixed short duration, suitable for simple
    /// blink effects.
    pub fn blink(task: impl FnOnce() + Send + 'static) -> Self {
        Self::new(task, BLINK_DELAY_MS)
    }

    /// Preferred display duration in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Execute the frame's task, consuming the frame.
    pub(crate) fn run(self) {
        (self.task)();
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("delay_ms", &self.delay_ms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_blink_uses_fixed_delay() {
        let frame = Frame::blink(|| {});
        assert_eq!(frame.delay_ms(), BLINK_DELAY_MS);
    }

    #[test]
    fn test_run_executes_task_once() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let frame = Frame::new(move || flag.store(true, Ordering::SeqCst), 0);
        frame.run();
        assert!(fired.load(Ordering::SeqCst));
    }
}
