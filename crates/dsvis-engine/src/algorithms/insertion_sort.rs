//! Insertion sort with per-step cost markers.

use crate::event::Event;
use crate::model::{Model, ModelContext};

use super::STEP_MARKER;

/// Sorts a private copy of the input. Each key pick-up blinks a `Visit`,
/// each inner-loop shift blinks a `Compare` and replays a `Swap`, and the
/// final placement of the key replays a `SetValue`. `Custom("step")`
/// markers feed the cost meter.
pub struct InsertionSortModel {
    ctx: ModelContext,
    data: Vec<i64>,
}

impl InsertionSortModel {
    /// Create a model over a copy of `data` taken now; later mutation of
    /// the caller's array does not affect the produced frames.
    pub fn new(ctx: ModelContext, data: &[i64]) -> Self {
        Self {
            ctx,
            data: data.to_vec(),
        }
    }
}

impl Model for InsertionSortModel {
    fn run(&mut self) {
        let n = self.data.len();
        for j in 1..n {
            self.ctx.enqueue(Event::line(1), 0);
            let key = self.data[j];

            self.ctx.enqueue(Event::line(2), 0);
            self.ctx.blink(Event::visit(j));
            self.ctx.enqueue(Event::custom(STEP_MARKER), 0);

            let mut i = j;
            while i > 0 && self.data[i - 1] > key {
                self.ctx.enqueue(Event::line(4), 0);
                self.ctx.blink(Event::compare(i - 1));
                self.ctx.enqueue(Event::custom(STEP_MARKER), 0);

                self.data[i] = self.data[i - 1];
                self.ctx.enqueue(Event::swap(i - 1, i), 16);
                self.ctx.enqueue(Event::custom(STEP_MARKER), 0);
                i -= 1;
            }

            self.data[i] = key;
            self.ctx.enqueue(Event::set_value(i, key), 16);
            self.ctx.enqueue(Event::line(7), 0);
            self.ctx.enqueue(Event::custom(STEP_MARKER), 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventBus, EventListener};
    use crate::event::{EventKind, Payload};
    use crate::timeline::Timeline;
    use std::sync::{Arc, Mutex};

    /// Applies replayed events to its own copy of the data, the way an
    /// array view would.
    struct Interpreter {
        values: Mutex<Vec<i64>>,
    }

    impl EventListener for Interpreter {
        fn on_event(&self, event: &Event) {
            let mut values = self.values.lock().unwrap();
            match event.kind() {
                EventKind::Swap => {
                    let (i, j) = (event.indices()[0], event.indices()[1]);
                    values.swap(i, j);
                }
                EventKind::SetValue => {
                    if let Payload::Value(v) = event.payload() {
                        let i = event.indices()[0];
                        values[i] = *v;
                    }
                }
                _ => {}
            }
        }
    }

    fn visualized_result(input: &[i64]) -> Vec<i64> {
        let bus = Arc::new(EventBus::new());
        let timeline = Arc::new(Timeline::new(60).unwrap());
        let view = Arc::new(Interpreter {
            values: Mutex::new(input.to_vec()),
        });
        bus.register(view.clone());

        let ctx = ModelContext::new(bus, timeline.clone());
        InsertionSortModel::new(ctx, input).run();
        timeline.drain();

        let result = view.values.lock().unwrap().clone();
        result
    }

    #[test]
    fn test_replayed_events_sort_the_view() {
        assert_eq!(visualized_result(&[5, 2, 9, 1, 6]), vec![1, 2, 5, 6, 9]);
        assert_eq!(visualized_result(&[3, 3, 1]), vec![1, 3, 3]);
        assert_eq!(visualized_result(&[1]), vec![1]);
        assert_eq!(visualized_result(&[]), Vec::<i64>::new());
    }

    #[test]
    fn test_input_is_copied_at_construction() {
        let bus = Arc::new(EventBus::new());
        let timeline = Arc::new(Timeline::new(60).unwrap());
        let ctx = ModelContext::new(bus, timeline.clone());

        let mut original = vec![5, 2, 9, 1, 6];
        let mut model = InsertionSortModel::new(ctx, &original);

        // Clobber the caller's array after construction.
        original.fill(0);
        model.run();
        let frames_from_copy = timeline.remaining();

        // Same frame count as a run over untouched input.
        let bus2 = Arc::new(EventBus::new());
        let timeline2 = Arc::new(Timeline::new(60).unwrap());
        let ctx2 = ModelContext::new(bus2, timeline2.clone());
        InsertionSortModel::new(ctx2, &[5, 2, 9, 1, 6]).run();
        assert_eq!(frames_from_copy, timeline2.remaining());

        // And the caller's array is whatever the caller left in it.
        assert_eq!(original, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_step_markers_are_emitted() {
        let bus = Arc::new(EventBus::new());
        let timeline = Arc::new(Timeline::new(60).unwrap());

        #[derive(Default)]
        struct StepCounter {
            steps: Mutex<u64>,
        }
        impl EventListener for StepCounter {
            fn on_event(&self, event: &Event) {
                if *event.payload() == Payload::Marker(STEP_MARKER.into()) {
                    *self.steps.lock().unwrap() += 1;
                }
            }
        }

        let counter = Arc::new(StepCounter::default());
        bus.register(counter.clone());

        let ctx = ModelContext::new(bus, timeline.clone());
        InsertionSortModel::new(ctx, &[2, 1]).run();
        timeline.drain();

        // One key pick-up, one compare, one shift, one placement.
        assert_eq!(*counter.steps.lock().unwrap(), 4);
    }
}
