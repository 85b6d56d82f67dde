//! The algorithm-driver contract tying models to the bus and timeline.
//!
//! A model computes its entire trace in one synchronous [`Model::run`] call.
//! Along the way it posts *eager* events directly to the bus (structural
//! state a collaborator needs before scrubbing begins) and enqueues frames
//! whose execution later posts *replayed* events (state whose visibility
//! timing matters).

use std::sync::Arc;

use crate::bus::EventBus;
use crate::event::Event;
use crate::frame::Frame;
use crate::timeline::Timeline;

/// Immutable handle pair given to every model at construction.
///
/// Cloning is cheap; both handles are shared references to the session's
/// bus and timeline.
#[derive(Clone)]
pub struct ModelContext {
    bus: Arc<EventBus>,
    timeline: Arc<Timeline>,
}

impl ModelContext {
    /// Bundle a bus and timeline into a context.
    pub fn new(bus: Arc<EventBus>, timeline: Arc<Timeline>) -> Self {
        Self { bus, timeline }
    }

    /// The session's event bus.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// The session's timeline.
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    // Convenience helpers for model implementations

    /// Post an event on the eager channel: delivered to listeners
    /// immediately, before playback begins.
    pub fn post(&self, event: &Event) {
        self.bus.post(event);
    }

    /// Enqueue a frame that posts `event` when it executes (the replayed
    /// channel), with the given preferred duration.
    pub fn enqueue(&self, event: Event, delay_ms: u64) {
        let bus = Arc::clone(&self.bus);
        self.timeline
            .add_frame(Frame::new(move || bus.post(&event), delay_ms));
    }

    /// Enqueue a single frame that posts several events back to back when
    /// it executes. Useful when one visual step touches multiple things
    /// (e.g. a line highlight plus two comparisons).
    pub fn enqueue_group(&self, events: Vec<Event>, delay_ms: u64) {
        let bus = Arc::clone(&self.bus);
        self.timeline.add_frame(Frame::new(
            move || {
                for event in &events {
                    bus.post(event);
                }
            },
            delay_ms,
        ));
    }

    /// Enqueue a replayed event with the fixed blink duration.
    pub fn blink(&self, event: Event) {
        let bus = Arc::clone(&self.bus);
        self.timeline.add_frame(Frame::blink(move || bus.post(&event)));
    }
}

/// A run-once algorithm driver bound to a [`ModelContext`].
///
/// A fresh model is constructed per invocation; `run()` must fully
/// enumerate the algorithm's steps before returning, never blocking on
/// playback. Models mutate their own private copy of any input data.
pub trait Model {
    /// Unroll the complete trace: post eager events and enqueue all frames.
    fn run(&mut self);

    /// Halt a long-running computation. Default is a no-op.
    fn cancel(&mut self) {}

    /// Rewind internal bookkeeping. Default is a no-op.
    fn reset(&mut self) {}
}
