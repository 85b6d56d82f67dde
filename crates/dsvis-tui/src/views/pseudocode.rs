//! Pseudocode pane with current-line highlighting.

use std::sync::Mutex;

use dsvis_engine::{AlgorithmKind, Event, EventKind, EventListener, Payload};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Display pseudocode for the given algorithm.
///
/// Line numbers here line up with the `Line` events the corresponding
/// model emits.
pub fn source_for(kind: AlgorithmKind) -> Vec<&'static str> {
    match kind {
        AlgorithmKind::LinearSearch => vec![
            "for i = 0 to n-1:",
            "  if a[i] == target:",
            "    return i",
            "return not found",
        ],
        AlgorithmKind::BinarySearch => vec![
            "low = 0; high = n-1",
            "while low <= high:",
            "  mid = (low + high) / 2",
            "  if a[mid] == target: return mid",
            "  if a[mid] < target: low = mid+1",
            "  else: high = mid-1",
        ],
        AlgorithmKind::InsertionSort => vec![
            "for j = 1 to n-1:",
            "  key = a[j]",
            "  i = j - 1",
            "  while i >= 0 and a[i] > key:",
            "    a[i+1] = a[i]",
            "    i = i - 1",
            "  a[i+1] = key",
        ],
        AlgorithmKind::MergeSort => vec![
            "mergesort(a, l, r):",
            "  if l >= r: return",
            "  mid = (l + r) / 2",
            "  mergesort(a, l, mid)",
            "  mergesort(a, mid+1, r)",
            "  merge(a, l, mid, r)",
            "",
            "merge(a, l, m, r):",
            "  aux[l..r] = a[l..r]",
            "  i = l; j = m+1; k = l",
            "  while i <= m and j <= r:",
            "    compare aux[i], aux[j]",
            "    a[k] = smaller; advance",
            "  copy rest of left run",
            "  copy rest of right run",
        ],
        AlgorithmKind::Heapify => vec![
            "heapify(a):",
            "  for i = n/2 - 1 down to 0:",
            "    sift_down(a, i)",
            "",
            "sift_down(a, i):",
            "  pick larger child of i",
            "  if child > a[i]: swap, recurse",
        ],
    }
}

#[derive(Debug, Default)]
struct State {
    lines: Vec<String>,
    /// 1-indexed current line, if any.
    current: Option<u32>,
}

/// Static line list with the line named by the latest `Line` event
/// highlighted.
#[derive(Debug, Default)]
pub struct PseudocodePane {
    state: Mutex<State>,
}

impl PseudocodePane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed source, clearing the highlight.
    pub fn set_source(&self, lines: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.lines = lines.iter().map(|l| (*l).to_string()).collect();
        state.current = None;
    }

    /// The 1-indexed highlighted line, if any.
    pub fn current_line(&self) -> Option<u32> {
        self.state.lock().unwrap().current
    }

    /// Render the pane into the given area.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let state = self.state.lock().unwrap();
        let lines: Vec<Line<'_>> = state
            .lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let number = u32::try_from(i).unwrap_or(u32::MAX) + 1;
                let line = format!("{number:>2} {text}");
                if state.current == Some(number) {
                    Line::styled(
                        line,
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::raw(line)
                }
            })
            .collect();
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Pseudocode "))
            .render(area, buf);
    }
}

impl EventListener for PseudocodePane {
    fn on_event(&self, event: &Event) {
        if event.kind() == EventKind::Line {
            if let Payload::Line(n) = event.payload() {
                self.state.lock().unwrap().current = Some(*n);
            }
        }
    }

    fn on_reset(&self) {
        self.state.lock().unwrap().current = None;
    }
}
