//! Binary search over a sorted array.

use crate::event::Event;
use crate::model::{Model, ModelContext};

/// Halving search assuming ascending input. Emits a blinking `Compare` on
/// each probed midpoint and a dwelling `Visit` on the match; nothing after
/// the match, and no eager events at all.
pub struct BinarySearchModel {
    ctx: ModelContext,
    data: Vec<i64>,
    target: i64,
}

impl BinarySearchModel {
    /// Create a model over a private copy of `data` (assumed sorted).
    pub fn new(ctx: ModelContext, data: Vec<i64>, target: i64) -> Self {
        Self { ctx, data, target }
    }
}

impl Model for BinarySearchModel {
    fn run(&mut self) {
        if self.data.is_empty() {
            return;
        }
        let mut low = 0usize;
        let mut high = self.data.len() - 1;
        loop {
            let mid = (low + high) / 2;
            self.ctx.blink(Event::compare(mid));

            if self.data[mid] == self.target {
                self.ctx.enqueue(Event::visit(mid), 300);
                break;
            }
            if self.data[mid] < self.target {
                if mid == high {
                    break;
                }
                low = mid + 1;
            } else {
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            }
            if low > high {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventBus, EventListener};
    use crate::event::EventKind;
    use crate::timeline::Timeline;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    impl EventListener for Recorder {
        fn on_event(&self, event: &Event) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn run_trace(data: Vec<i64>, target: i64) -> (Vec<Event>, usize) {
        let bus = Arc::new(EventBus::new());
        let timeline = Arc::new(Timeline::new(60).unwrap());
        let recorder = Arc::new(Recorder::default());
        bus.register(recorder.clone());

        let ctx = ModelContext::new(bus, timeline.clone());
        let mut model = BinarySearchModel::new(ctx, data, target);
        model.run();

        let eager = recorder.events.lock().unwrap().len();
        timeline.drain();
        let events = recorder.events.lock().unwrap().clone();
        (events, eager)
    }

    #[test]
    fn test_trace_for_target_in_sorted_array() {
        // [1,3,5,7,9,11], target 7: probe 2 (5), probe 4 (9), probe 3 (7).
        let (trace, eager) = run_trace(vec![1, 3, 5, 7, 9, 11], 7);
        assert_eq!(eager, 0, "binary search has no eager channel");

        let shape: Vec<(EventKind, Vec<usize>)> = trace
            .iter()
            .map(|e| (e.kind(), e.indices().to_vec()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (EventKind::Compare, vec![2]),
                (EventKind::Compare, vec![4]),
                (EventKind::Compare, vec![3]),
                (EventKind::Visit, vec![3]),
            ]
        );
    }

    #[test]
    fn test_no_visit_when_target_absent() {
        let (trace, _) = run_trace(vec![1, 3, 5, 7, 9, 11], 8);
        assert!(trace.iter().all(|e| e.kind() != EventKind::Visit));
        assert!(!trace.is_empty());
    }

    #[test]
    fn test_empty_array_produces_no_events() {
        let (trace, _) = run_trace(Vec::new(), 1);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_target_at_boundary() {
        let (trace, _) = run_trace(vec![1, 3, 5], 1);
        let last = trace.last().unwrap();
        assert_eq!(last.kind(), EventKind::Visit);
        assert_eq!(last.indices(), &[0]);
    }
}
