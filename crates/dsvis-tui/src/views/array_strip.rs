//! Horizontal strip of array cells with per-event highlighting.

use std::sync::Mutex;

use dsvis_engine::{Event, EventKind, EventListener, Payload};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Default)]
struct State {
    values: Vec<i64>,
    /// Last visual event: which kind touched which indices.
    highlight: Option<(EventKind, Vec<usize>)>,
    /// Index confirmed by a `Visit` (e.g. a search hit).
    matched: Option<usize>,
}

/// Array view: one cell per element, colored by the most recent event.
///
/// Applies `Swap` and `SetValue` to its own copy of the data so the cells
/// track the in-progress algorithm state during replay.
#[derive(Debug, Default)]
pub struct ArrayStrip {
    state: Mutex<State>,
}

impl ArrayStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a fresh input array, clearing any run state.
    pub fn bind(&self, values: &[i64]) {
        let mut state = self.state.lock().unwrap();
        state.values = values.to_vec();
        state.highlight = None;
        state.matched = None;
    }

    /// Current cell values (post-replay state).
    pub fn values(&self) -> Vec<i64> {
        self.state.lock().unwrap().values.clone()
    }

    /// Render the strip into the given area.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let state = self.state.lock().unwrap();
        let mut spans = Vec::with_capacity(state.values.len() * 2);
        for (i, value) in state.values.iter().enumerate() {
            let style = cell_style(&state, i);
            spans.push(Span::styled(format!("{value:^5}"), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(" Array "))
            .render(area, buf);
    }
}

fn cell_style(state: &State, i: usize) -> Style {
    if state.matched == Some(i) {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD);
    }
    if let Some((kind, indices)) = &state.highlight {
        if indices.contains(&i) {
            let color = match kind {
                EventKind::Compare => Color::Yellow,
                EventKind::Swap => Color::Red,
                EventKind::SetValue | EventKind::KeyUpdate => Color::Cyan,
                EventKind::HighlightRange => Color::Green,
                _ => Color::Magenta,
            };
            return Style::default().fg(Color::Black).bg(color);
        }
        // Range highlights cover everything between their two endpoints.
        if *kind == EventKind::HighlightRange
            && indices.len() == 2
            && (indices[0]..=indices[1]).contains(&i)
        {
            return Style::default().fg(Color::Black).bg(Color::Green);
        }
    }
    Style::default()
}

impl EventListener for ArrayStrip {
    fn on_event(&self, event: &Event) {
        let mut state = self.state.lock().unwrap();
        match event.kind() {
            EventKind::Compare | EventKind::KeyUpdate | EventKind::HighlightRange => {
                state.highlight = Some((event.kind(), event.indices().to_vec()));
            }
            EventKind::Visit => {
                state.matched = event.indices().first().copied();
                state.highlight = Some((event.kind(), event.indices().to_vec()));
            }
            EventKind::Swap => {
                if let [i, j] = *event.indices() {
                    let len = state.values.len();
                    if i < len && j < len {
                        state.values.swap(i, j);
                    }
                }
                state.highlight = Some((event.kind(), event.indices().to_vec()));
            }
            EventKind::SetValue => {
                if let (Some(&i), Payload::Value(v)) = (event.indices().first(), event.payload()) {
                    if i < state.values.len() {
                        state.values[i] = *v;
                    }
                }
                state.highlight = Some((event.kind(), event.indices().to_vec()));
            }
            _ => {}
        }
    }

    fn on_reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.highlight = None;
        state.matched = None;
    }
}
