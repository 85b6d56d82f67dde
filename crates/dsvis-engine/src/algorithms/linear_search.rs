//! Linear search over an unsorted array.

use crate::event::Event;
use crate::model::{Model, ModelContext};

/// Scans left to right, emitting a replayed `Compare` per index and a
/// terminating `Visit` at the first match. Pseudocode line highlights ride
/// along as zero-duration frames.
pub struct LinearSearchModel {
    ctx: ModelContext,
    data: Vec<i64>,
    target: i64,
}

impl LinearSearchModel {
    /// Create a model over a private copy of `data`.
    pub fn new(ctx: ModelContext, data: Vec<i64>, target: i64) -> Self {
        Self { ctx, data, target }
    }
}

impl Model for LinearSearchModel {
    fn run(&mut self) {
        self.ctx.enqueue(Event::line(1), 0);
        for (i, &value) in self.data.iter().enumerate() {
            self.ctx.enqueue(Event::line(2), 0);
            self.ctx.enqueue(Event::compare(i), 16);
            if value == self.target {
                self.ctx.enqueue(Event::line(3), 0);
                self.ctx.enqueue(Event::visit(i), 300);
                break;
            }
        }
    }
}
