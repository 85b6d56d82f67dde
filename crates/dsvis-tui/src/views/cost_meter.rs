//! Compact step/compare/swap counters.

use std::sync::Mutex;

use dsvis_engine::{algorithms::STEP_MARKER, Event, EventKind, EventListener, Payload};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Default)]
struct Counters {
    steps: u64,
    compares: u64,
    swaps: u64,
}

/// Counts cost markers and visual events, rendered as `name: value` pairs.
#[derive(Debug, Default)]
pub struct CostMeter {
    counters: Mutex<Counters>,
}

impl CostMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(steps, compares, swaps)` counted so far.
    pub fn totals(&self) -> (u64, u64, u64) {
        let c = self.counters.lock().unwrap();
        (c.steps, c.compares, c.swaps)
    }

    /// Render the counters into the given area.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let (steps, compares, swaps) = self.totals();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Paragraph::new(Line::from(vec![
            Span::raw("Steps: "),
            Span::styled(steps.to_string(), bold),
            Span::raw("  Compares: "),
            Span::styled(compares.to_string(), bold),
            Span::raw("  Swaps: "),
            Span::styled(swaps.to_string(), bold),
        ]))
        .render(area, buf);
    }
}

impl EventListener for CostMeter {
    fn on_event(&self, event: &Event) {
        let mut c = self.counters.lock().unwrap();
        match event.kind() {
            EventKind::Compare => c.compares += 1,
            EventKind::Swap => c.swaps += 1,
            EventKind::Custom => {
                if *event.payload() == Payload::Marker(STEP_MARKER.into()) {
                    c.steps += 1;
                }
            }
            _ => {}
        }
    }

    fn on_reset(&self) {
        *self.counters.lock().unwrap() = Counters::default();
    }
}
