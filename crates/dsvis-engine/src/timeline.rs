//! Frame queue scheduler with VCR-style playback controls.
//!
//! The [`Timeline`] owns a FIFO queue of [`Frame`]s and executes at most one
//! frame per tick, strictly in enqueue order. There is no internal thread:
//! a host loop calls [`Timeline::poll`] cooperatively, and control calls
//! (`pause`, `set_speed`, `step_forward`) may arrive from other threads
//! between ticks. Frame tasks always run outside the queue and control
//! locks, so a task may enqueue further frames or post bus events freely.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::frame::Frame;

/// Lower clamp bound for the playback speed factor.
pub const MIN_SPEED: f64 = 0.25;
/// Upper clamp bound for the playback speed factor.
pub const MAX_SPEED: f64 = 4.0;

/// Errors from timeline construction and reconfiguration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimelineError {
    /// Frames-per-second must be positive.
    #[error("fps must be positive")]
    InvalidFps,

    /// Speed factor must be a positive, finite number.
    #[error("speed factor must be positive, got {0}")]
    InvalidSpeed(f64),
}

/// Playback state machine. `Idle` is both the initial and post-reset state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing played yet, or the session was reset.
    #[default]
    Idle,
    /// Ticks fire at the effective period.
    Running,
    /// Playback halted; queue and position untouched.
    Paused,
}

/// Notification payload for position observers.
///
/// `old == new` signals a position-unchanged tick, emitted when the queue
/// drains (normal termination of a run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange {
    /// Frames executed before this tick.
    pub old: u64,
    /// Frames executed after this tick.
    pub new: u64,
}

type PositionListener = Arc<dyn Fn(PositionChange) + Send + Sync>;

/// Mutable control state, grouped under one lock.
#[derive(Debug)]
struct Control {
    state: PlaybackState,
    speed_factor: f64,
    /// Effective tick period: round(base / speed).
    period_ms: u64,
    /// Frames executed since the last reset.
    position: u64,
    /// Deadline for the next automatic tick; `None` unless running.
    next_tick: Option<Instant>,
}

/// Ordered frame queue plus the clock state that drives it.
pub struct Timeline {
    queue: Mutex<VecDeque<Frame>>,
    control: Mutex<Control>,
    listeners: Mutex<Vec<PositionListener>>,
    base_period_ms: u64,
}

impl Timeline {
    /// Create a timeline ticking at the given frames-per-second rate.
    pub fn new(fps: u32) -> Result<Self, TimelineError> {
        if fps == 0 {
            return Err(TimelineError::InvalidFps);
        }
        let base_period_ms = (1000 / u64::from(fps)).max(1);
        Ok(Self {
            queue: Mutex::new(VecDeque::new()),
            control: Mutex::new(Control {
                state: PlaybackState::Idle,
                speed_factor: 1.0,
                period_ms: base_period_ms,
                position: 0,
                next_tick: None,
            }),
            listeners: Mutex::new(Vec::new()),
            base_period_ms,
        })
    }

    // Public control API

    /// Start playback if not already running.
    pub fn start(&self) {
        let mut ctl = self.control.lock().unwrap();
        if ctl.state != PlaybackState::Running {
            ctl.next_tick = Some(Instant::now() + Duration::from_millis(ctl.period_ms));
            ctl.state = PlaybackState::Running;
            debug!(period_ms = ctl.period_ms, "timeline: start");
        }
    }

    /// Pause playback, keeping the queue and position intact.
    pub fn pause(&self) {
        let mut ctl = self.control.lock().unwrap();
        if ctl.state == PlaybackState::Running {
            ctl.state = PlaybackState::Paused;
            ctl.next_tick = None;
            debug!(position = ctl.position, "timeline: pause");
        }
    }

    /// Clear all queued frames and reset the position to zero.
    ///
    /// Abandoned frames are discarded, never executed. Configuration
    /// (period, speed) is kept, and playback does not auto-resume.
    pub fn reset(&self) {
        let change = {
            let mut ctl = self.control.lock().unwrap();
            ctl.state = PlaybackState::Idle;
            ctl.next_tick = None;
            let old = ctl.position;
            ctl.position = 0;
            PositionChange { old, new: 0 }
        };
        self.queue.lock().unwrap().clear();
        debug!("timeline: reset");
        self.notify(change);
    }

    /// Execute exactly one pending frame, regardless of running state.
    ///
    /// If currently running, playback is paused first so the automatic
    /// ticking path cannot double-execute a frame.
    pub fn step_forward(&self) -> PositionChange {
        {
            let mut ctl = self.control.lock().unwrap();
            if ctl.state == PlaybackState::Running {
                ctl.state = PlaybackState::Paused;
                ctl.next_tick = None;
            }
        }
        self.tick_once().0
    }

    /// Adjust playback speed, clamping to `[MIN_SPEED, MAX_SPEED]`.
    ///
    /// The effective tick period is recomputed in place; an in-flight run
    /// picks up the new pace from its next tick. Non-positive or NaN input
    /// is rejected and leaves the previous speed unchanged.
    pub fn set_speed(&self, factor: f64) -> Result<(), TimelineError> {
        if factor.is_nan() || factor <= 0.0 {
            return Err(TimelineError::InvalidSpeed(factor));
        }
        let clamped = factor.clamp(MIN_SPEED, MAX_SPEED);
        if (clamped - factor).abs() > f64::EPSILON {
            warn!(requested = factor, clamped, "timeline: speed clamped");
        }
        let mut ctl = self.control.lock().unwrap();
        if (ctl.speed_factor - clamped).abs() > f64::EPSILON {
            ctl.speed_factor = clamped;
            ctl.period_ms = scaled_ms(self.base_period_ms, clamped);
            debug!(speed = clamped, period_ms = ctl.period_ms, "timeline: speed changed");
        }
        Ok(())
    }

    /// Execute one tick if running and the deadline has elapsed.
    ///
    /// The host loop calls this cooperatively; the executed frame's
    /// preferred duration stretches the gap to the next tick (never below
    /// the effective period).
    pub fn poll(&self, now: Instant) -> Option<PositionChange> {
        {
            let ctl = self.control.lock().unwrap();
            if ctl.state != PlaybackState::Running {
                return None;
            }
            match ctl.next_tick {
                Some(deadline) if now >= deadline => {}
                _ => return None,
            }
        }
        let (change, executed_delay) = self.tick_once();
        let mut ctl = self.control.lock().unwrap();
        if ctl.state == PlaybackState::Running {
            let dwell = executed_delay
                .map_or(ctl.period_ms, |d| ctl.period_ms.max(scaled_ms(d, ctl.speed_factor)));
            ctl.next_tick = Some(now + Duration::from_millis(dwell));
        }
        Some(change)
    }

    /// Step through every remaining frame synchronously.
    ///
    /// Used by headless trace runs; respects FIFO order exactly like
    /// repeated [`Timeline::step_forward`] calls.
    pub fn drain(&self) {
        while self.remaining() > 0 {
            self.step_forward();
        }
    }

    // Queue management

    /// Enqueue a frame at the end of the timeline.
    pub fn add_frame(&self, frame: Frame) {
        self.queue.lock().unwrap().push_back(frame);
    }

    /// Number of frames remaining in the queue.
    pub fn remaining(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    // Observability

    /// Subscribe to position changes, e.g. to drive a UI scrubber without
    /// polling. Listeners run synchronously after each tick, outside the
    /// control lock.
    pub fn add_position_listener(
        &self,
        listener: impl Fn(PositionChange) + Send + Sync + 'static,
    ) {
        self.listeners.lock().unwrap().push(Arc::new(listener));
    }

    /// Frames executed since the last reset.
    pub fn position(&self) -> u64 {
        self.control.lock().unwrap().position
    }

    /// `true` while the timeline is actively playing.
    pub fn is_running(&self) -> bool {
        self.state() == PlaybackState::Running
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.control.lock().unwrap().state
    }

    /// Current speed factor.
    pub fn speed_factor(&self) -> f64 {
        self.control.lock().unwrap().speed_factor
    }

    /// Current effective tick period in milliseconds.
    pub fn effective_period_ms(&self) -> u64 {
        self.control.lock().unwrap().period_ms
    }

    // Internal helpers

    /// Dequeue and execute the head frame.
    ///
    /// Returns the resulting position change plus the executed frame's
    /// preferred duration (`None` when the queue was empty). On an empty
    /// queue the timeline auto-pauses and emits a position-unchanged
    /// notification.
    fn tick_once(&self) -> (PositionChange, Option<u64>) {
        let frame = self.queue.lock().unwrap().pop_front();
        let Some(frame) = frame else {
            let change = {
                let mut ctl = self.control.lock().unwrap();
                if ctl.state == PlaybackState::Running {
                    ctl.state = PlaybackState::Paused;
                    ctl.next_tick = None;
                    debug!(position = ctl.position, "timeline: queue exhausted, auto-pause");
                }
                PositionChange {
                    old: ctl.position,
                    new: ctl.position,
                }
            };
            self.notify(change);
            return (change, None);
        };

        let delay_ms = frame.delay_ms();
        // Task runs outside all locks so it may post events or add frames.
        frame.run();

        let change = {
            let mut ctl = self.control.lock().unwrap();
            let old = ctl.position;
            ctl.position += 1;
            PositionChange {
                old,
                new: ctl.position,
            }
        };
        self.notify(change);
        (change, Some(delay_ms))
    }

    fn notify(&self, change: PositionChange) {
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener(change);
        }
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("base_period_ms", &self.base_period_ms)
            .field("remaining", &self.remaining())
            .field("control", &*self.control.lock().unwrap())
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scaled_ms(base_ms: u64, speed: f64) -> u64 {
    ((base_ms as f64 / speed).round() as u64).max(1)
}
