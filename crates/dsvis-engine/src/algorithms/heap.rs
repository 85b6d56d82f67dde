//! Array-based binary max-heap with animation hooks.
//!
//! Unlike the run-once array models, the heap is driven imperatively: each
//! operation (insert, extract, key update, build) unrolls its own frames
//! and posts its own eager events, so a controller can chain operations on
//! one live structure.

use crate::event::Event;
use crate::model::{Model, ModelContext};

/// Default bound on the number of stored keys.
pub const MAX_HEAP_CAPACITY: usize = 512;

/// Eager marker posted when an insert hits the capacity bound.
pub const HEAP_FULL_MARKER: &str = "heap-full";
/// Eager marker posted after any mutation, prompting views to re-snapshot.
pub const HEAP_CHANGED_MARKER: &str = "heap-changed";
/// Eager markers bracketing a build operation.
pub const HEAPIFY_START_MARKER: &str = "heapify-start";
pub const HEAPIFY_END_MARKER: &str = "heapify-end";

const ANIM_DELAY_MS: u64 = 30;

/// Errors from heap operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HeapError {
    /// The heap is at its configured maximum size.
    #[error("heap is full (capacity {0})")]
    Full(usize),

    /// Extraction from an empty heap.
    #[error("heap is empty")]
    Empty,

    /// Key updates require a positive delta.
    #[error("delta must be positive")]
    InvalidDelta,

    /// Index past the current heap size.
    #[error("index {index} out of bounds for heap of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },
}

/// Bounded binary max-heap emitting replayed `Compare`/`Swap` frames during
/// sift operations and eager structural markers around mutations.
pub struct HeapModel {
    ctx: ModelContext,
    heap: Vec<i64>,
    capacity: usize,
    compares: u64,
    swaps: u64,
}

impl HeapModel {
    /// Create an empty heap with the default capacity.
    pub fn new(ctx: ModelContext) -> Self {
        Self::with_capacity(ctx, MAX_HEAP_CAPACITY)
    }

    /// Create an empty heap with a custom capacity bound.
    pub fn with_capacity(ctx: ModelContext, capacity: usize) -> Self {
        Self {
            ctx,
            heap: Vec::new(),
            capacity,
            compares: 0,
            swaps: 0,
        }
    }

    /// Heapify `src` in place, bottom-up (Floyd). O(n) sift-downs.
    ///
    /// Clears any previous replay, brackets the build with eager heapify
    /// markers, and truncates input beyond the capacity bound.
    pub fn build_bottom_up(&mut self, src: &[i64]) {
        self.ctx.timeline().reset();
        self.ctx.post(&Event::custom(HEAPIFY_START_MARKER));

        let take = src.len().min(self.capacity);
        self.heap = src[..take].to_vec();
        if self.heap.len() > 1 {
            let last_parent = (self.heap.len() - 2) / 2;
            for i in (0..=last_parent).rev() {
                self.sift_down(i, self.heap.len());
            }
        }

        self.heap_changed();
        self.ctx.post(&Event::custom(HEAPIFY_END_MARKER));
    }

    /// Build by repeated insertion. O(n log n), for cost comparison with
    /// the bottom-up build.
    pub fn build_incremental(&mut self, src: &[i64]) -> Result<(), HeapError> {
        self.ctx.timeline().reset();
        self.ctx.post(&Event::custom(HEAPIFY_START_MARKER));
        self.heap.clear();
        for &key in src {
            self.insert(key)?;
        }
        self.ctx.post(&Event::custom(HEAPIFY_END_MARKER));
        Ok(())
    }

    /// Insert a key, sifting it up with animated compares and swaps.
    ///
    /// At capacity the insert fails, an eager at-capacity event is posted
    /// for listeners, and the heap contents are unchanged.
    pub fn insert(&mut self, key: i64) -> Result<(), HeapError> {
        if self.heap.len() >= self.capacity {
            self.ctx.post(&Event::custom(HEAP_FULL_MARKER));
            return Err(HeapError::Full(self.capacity));
        }
        self.heap.push(key);
        self.sift_up(self.heap.len() - 1);
        self.heap_changed();
        Ok(())
    }

    /// Remove and return the maximum key.
    pub fn extract_max(&mut self) -> Result<i64, HeapError> {
        if self.heap.is_empty() {
            return Err(HeapError::Empty);
        }
        let max = self.heap[0];
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        self.heap.truncate(last);
        self.sift_down(0, self.heap.len());
        self.heap_changed();
        Ok(max)
    }

    /// Increase the key at `index` by a positive `delta` and restore the
    /// heap property upward.
    pub fn increase_key(&mut self, index: usize, delta: i64) -> Result<(), HeapError> {
        self.check_update(index, delta)?;
        self.heap[index] += delta;
        self.sift_up(index);
        self.ctx.post(&Event::key_update(index));
        self.heap_changed();
        Ok(())
    }

    /// Decrease the key at `index` by a positive `delta` and restore the
    /// heap property downward.
    pub fn decrease_key(&mut self, index: usize, delta: i64) -> Result<(), HeapError> {
        self.check_update(index, delta)?;
        self.heap[index] -= delta;
        self.sift_down(index, self.heap.len());
        self.ctx.post(&Event::key_update(index));
        self.heap_changed();
        Ok(())
    }

    /// Copy of the current heap contents in array order.
    pub fn snapshot(&self) -> Vec<i64> {
        self.heap.clone()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `true` when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Comparisons performed since construction.
    pub fn compare_count(&self) -> u64 {
        self.compares
    }

    /// Swaps performed since construction.
    pub fn swap_count(&self) -> u64 {
        self.swaps
    }

    // Internal helpers

    fn check_update(&self, index: usize, delta: i64) -> Result<(), HeapError> {
        if delta <= 0 {
            return Err(HeapError::InvalidDelta);
        }
        if index >= self.heap.len() {
            return Err(HeapError::IndexOutOfBounds {
                index,
                size: self.heap.len(),
            });
        }
        Ok(())
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = (i - 1) / 2;
            self.compares += 1;
            self.emit_compare(i, p);
            if self.heap[i] > self.heap[p] {
                self.animated_swap(i, p);
                i = p;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize, size: usize) {
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut best = i;
            if l < size {
                self.compares += 1;
                self.emit_compare(i, l);
                if self.heap[l] > self.heap[best] {
                    best = l;
                }
            }
            if r < size {
                self.compares += 1;
                self.emit_compare(i, r);
                if self.heap[r] > self.heap[best] {
                    best = r;
                }
            }
            if best == i {
                break;
            }
            self.animated_swap(i, best);
            i = best;
        }
    }

    fn emit_compare(&self, i: usize, j: usize) {
        self.ctx.enqueue(Event::compare(i), ANIM_DELAY_MS);
        self.ctx.enqueue(Event::compare(j), 0);
    }

    fn animated_swap(&mut self, i: usize, j: usize) {
        self.swaps += 1;
        self.ctx.enqueue(Event::swap(i, j), ANIM_DELAY_MS);
        self.heap.swap(i, j);
    }

    fn heap_changed(&self) {
        self.ctx.post(&Event::custom(HEAP_CHANGED_MARKER));
    }
}

impl Model for HeapModel {
    // The heap is driven through its imperative operations; there is no
    // single trace to unroll.
    fn run(&mut self) {}
}

/// Run-once wrapper that heapifies a fixed input bottom-up, for launching
/// from the common model registry.
pub struct BuildBottomUpModel {
    ctx: ModelContext,
    input: Vec<i64>,
    heap: HeapModel,
}

impl BuildBottomUpModel {
    /// Create a wrapper over a copy of `src`.
    pub fn new(ctx: ModelContext, src: &[i64]) -> Self {
        let heap = HeapModel::new(ctx.clone());
        Self {
            ctx,
            input: src.to_vec(),
            heap,
        }
    }

    /// The underlying heap, e.g. for snapshot inspection after the run.
    pub fn heap(&self) -> &HeapModel {
        &self.heap
    }
}

impl Model for BuildBottomUpModel {
    fn run(&mut self) {
        self.heap.build_bottom_up(&self.input);
        // Leave playback paused so the user can inspect the result.
        self.ctx.timeline().pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventBus, EventListener};
    use crate::event::{EventKind, Payload};
    use crate::timeline::Timeline;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    impl Recorder {
        fn markers(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e.payload() {
                    Payload::Marker(m) => Some(m.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl EventListener for Recorder {
        fn on_event(&self, event: &Event) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn setup() -> (Arc<EventBus>, Arc<Timeline>, Arc<Recorder>, ModelContext) {
        let bus = Arc::new(EventBus::new());
        let timeline = Arc::new(Timeline::new(60).unwrap());
        let recorder = Arc::new(Recorder::default());
        bus.register(recorder.clone());
        let ctx = ModelContext::new(bus.clone(), timeline.clone());
        (bus, timeline, recorder, ctx)
    }

    fn assert_heap_property(heap: &[i64]) {
        for i in 1..heap.len() {
            assert!(
                heap[(i - 1) / 2] >= heap[i],
                "heap property violated at {i}: {heap:?}"
            );
        }
    }

    #[test]
    fn test_build_bottom_up_establishes_heap_property() {
        let (_bus, timeline, recorder, ctx) = setup();
        let mut heap = HeapModel::new(ctx);
        heap.build_bottom_up(&[3, 9, 5, 1, 12, 7]);

        assert_heap_property(&heap.snapshot());
        assert_eq!(heap.len(), 6);
        assert!(heap.compare_count() > 0);
        assert_eq!(timeline.position(), 0, "build resets the replay");

        let markers = recorder.markers();
        assert_eq!(markers.first().unwrap(), HEAPIFY_START_MARKER);
        assert_eq!(markers.last().unwrap(), HEAPIFY_END_MARKER);
    }

    #[test]
    fn test_insert_at_capacity_fails_and_preserves_contents() {
        let (_bus, _timeline, recorder, ctx) = setup();
        let mut heap = HeapModel::with_capacity(ctx, 3);
        for key in [4, 8, 2] {
            heap.insert(key).unwrap();
        }
        let before = heap.snapshot();

        assert_eq!(heap.insert(99).unwrap_err(), HeapError::Full(3));
        assert_eq!(heap.snapshot(), before);
        assert!(recorder
            .markers()
            .contains(&HEAP_FULL_MARKER.to_string()));
    }

    #[test]
    fn test_extract_max_returns_descending_keys() {
        let (_bus, _timeline, _recorder, ctx) = setup();
        let mut heap = HeapModel::new(ctx);
        heap.build_bottom_up(&[3, 9, 5, 1]);

        assert_eq!(heap.extract_max().unwrap(), 9);
        assert_eq!(heap.extract_max().unwrap(), 5);
        assert_eq!(heap.extract_max().unwrap(), 3);
        assert_eq!(heap.extract_max().unwrap(), 1);
        assert_eq!(heap.extract_max().unwrap_err(), HeapError::Empty);
    }

    #[test]
    fn test_key_updates_validate_and_post_eagerly() {
        let (_bus, _timeline, recorder, ctx) = setup();
        let mut heap = HeapModel::new(ctx);
        heap.build_bottom_up(&[10, 4, 7]);

        assert_eq!(
            heap.increase_key(1, 0).unwrap_err(),
            HeapError::InvalidDelta
        );
        assert_eq!(
            heap.decrease_key(9, 1).unwrap_err(),
            HeapError::IndexOutOfBounds { index: 9, size: 3 }
        );

        heap.increase_key(1, 20).unwrap();
        assert_heap_property(&heap.snapshot());
        assert_eq!(heap.snapshot()[0], 24);

        let key_updates = recorder
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind() == EventKind::KeyUpdate)
            .count();
        assert_eq!(key_updates, 1);
    }

    #[test]
    fn test_build_incremental_matches_heap_property() {
        let (_bus, _timeline, _recorder, ctx) = setup();
        let mut heap = HeapModel::new(ctx);
        heap.build_incremental(&[3, 9, 5, 1, 12]).unwrap();
        assert_heap_property(&heap.snapshot());
        assert_eq!(heap.len(), 5);
    }

    #[test]
    fn test_sift_frames_replay_compares_and_swaps() {
        let (_bus, timeline, recorder, ctx) = setup();
        let mut heap = HeapModel::with_capacity(ctx, 8);
        heap.insert(1).unwrap();
        heap.insert(5).unwrap(); // sifts above 1

        assert!(timeline.remaining() > 0);
        timeline.drain();

        let events = recorder.events.lock().unwrap();
        assert!(events.iter().any(|e| e.kind() == EventKind::Compare));
        assert!(events.iter().any(|e| e.kind() == EventKind::Swap));
    }

    #[test]
    fn test_build_bottom_up_model_runs_and_pauses() {
        let (_bus, timeline, _recorder, ctx) = setup();
        let mut model = BuildBottomUpModel::new(ctx, &[2, 6, 4]);
        model.run();
        assert!(!timeline.is_running());
        assert_heap_property(&model.heap().snapshot());
    }
}
