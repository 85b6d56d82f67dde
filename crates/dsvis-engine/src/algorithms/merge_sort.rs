//! Top-down recursive merge sort.

use crate::event::Event;
use crate::model::{Model, ModelContext};

/// Delay for `SetValue` frames, collapsed to zero for large inputs so long
/// replays stay watchable.
fn write_delay(len: usize, slow_ms: u64) -> u64 {
    if len > 64 {
        0
    } else {
        slow_ms
    }
}

/// Recursive merge sort emitting eager `Split`/`Merge` events for the
/// recursion tree (available to listeners before playback begins) and
/// replayed `Line`, `Compare`, and `SetValue` events for the array view.
pub struct MergeSortModel {
    ctx: ModelContext,
    data: Vec<i64>,
    aux: Vec<i64>,
}

impl MergeSortModel {
    /// Create a model over a private copy of `data`.
    pub fn new(ctx: ModelContext, data: &[i64]) -> Self {
        Self {
            ctx,
            data: data.to_vec(),
            aux: vec![0; data.len()],
        }
    }

    /// Sort the inclusive range `[l, r]`.
    fn sort(&mut self, l: usize, r: usize) {
        if l >= r {
            return;
        }
        let mid = (l + r) / 2;

        self.ctx.enqueue(Event::line(2), 0);
        // Structural channel: the recursion tree needs the split now, not
        // at playback time.
        self.ctx.post(&Event::split(l, r));
        self.ctx.enqueue(Event::line(3), 30);

        self.ctx.enqueue(Event::line(4), 0);
        self.sort(l, mid);
        self.ctx.enqueue(Event::line(5), 0);
        self.sort(mid + 1, r);

        self.ctx.enqueue(Event::line(6), 0);
        self.merge(l, mid, r);
        self.ctx.post(&Event::merge(l, r));
    }

    /// Merge the sorted halves `[l, m]` and `[m+1, r]`.
    fn merge(&mut self, l: usize, m: usize, r: usize) {
        self.ctx.enqueue(Event::line(8), 0);
        self.aux[l..=r].copy_from_slice(&self.data[l..=r]);
        self.ctx.enqueue(Event::line(9), 0);

        let len = self.data.len();
        let (mut i, mut j, mut k) = (l, m + 1, l);
        self.ctx.enqueue(Event::line(10), 0);
        self.ctx.enqueue(Event::line(11), 0);

        while i <= m && j <= r {
            self.ctx
                .enqueue_group(vec![Event::line(12), Event::compare(i), Event::compare(j)], 200);

            let val = if self.aux[i] <= self.aux[j] {
                let val = self.aux[i];
                i += 1;
                self.ctx
                    .enqueue_group(vec![Event::line(13), Event::set_value(k, val)], write_delay(len, 30));
                val
            } else {
                let val = self.aux[j];
                j += 1;
                self.ctx
                    .enqueue_group(vec![Event::line(13), Event::set_value(k, val)], write_delay(len, 30));
                val
            };
            self.data[k] = val;
            k += 1;
        }

        while i <= m {
            let val = self.aux[i];
            i += 1;
            self.data[k] = val;
            self.ctx
                .enqueue_group(vec![Event::line(14), Event::set_value(k, val)], write_delay(len, 20));
            k += 1;
        }

        while j <= r {
            let val = self.aux[j];
            j += 1;
            self.data[k] = val;
            self.ctx
                .enqueue_group(vec![Event::line(15), Event::set_value(k, val)], write_delay(len, 20));
            k += 1;
        }
    }
}

impl Model for MergeSortModel {
    fn run(&mut self) {
        let n = self.data.len();
        self.ctx.enqueue(Event::line(1), 0);
        if n == 0 {
            return;
        }
        self.sort(0, n - 1);
        self.ctx.enqueue(Event::highlight_range(0, n - 1), 100);
    }
}
