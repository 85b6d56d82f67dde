//! Recursion tree built from eager `Split`/`Merge` events.
//!
//! Because split and merge are structural events posted during trace
//! generation, the full tree is visible as soon as a model's `run()`
//! returns, independent of playback progress.

use std::sync::Mutex;

use dsvis_engine::{Event, EventKind, EventListener};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    depth: usize,
    lo: usize,
    hi: usize,
    merged: bool,
}

#[derive(Debug, Default)]
struct State {
    nodes: Vec<Node>,
    /// Currently open ranges; splits push, matching merges pop.
    open: Vec<(usize, usize)>,
}

/// Indented outline of recursive calls, in call order.
#[derive(Debug, Default)]
pub struct RecursionTree {
    state: Mutex<State>,
}

impl RecursionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded recursive calls.
    pub fn node_count(&self) -> usize {
        self.state.lock().unwrap().nodes.len()
    }

    /// Render the outline into the given area.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let state = self.state.lock().unwrap();
        let max_rows = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line<'_>> = state
            .nodes
            .iter()
            .take(max_rows)
            .map(|node| {
                let marker = if node.merged { "✓" } else { "…" };
                let style = if node.merged {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::styled(
                    format!("{}[{}..{}] {marker}", "  ".repeat(node.depth), node.lo, node.hi),
                    style,
                )
            })
            .collect();
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Recursion "))
            .render(area, buf);
    }
}

impl EventListener for RecursionTree {
    fn on_event(&self, event: &Event) {
        match event.kind() {
            EventKind::Split => {
                if let [lo, hi] = *event.indices() {
                    let mut state = self.state.lock().unwrap();
                    let depth = state.open.len();
                    state.nodes.push(Node {
                        depth,
                        lo,
                        hi,
                        merged: false,
                    });
                    state.open.push((lo, hi));
                }
            }
            EventKind::Merge => {
                if let [lo, hi] = *event.indices() {
                    let mut state = self.state.lock().unwrap();
                    if let Some(node) = state
                        .nodes
                        .iter_mut()
                        .rev()
                        .find(|n| n.lo == lo && n.hi == hi && !n.merged)
                    {
                        node.merged = true;
                    }
                    if state.open.last() == Some(&(lo, hi)) {
                        state.open.pop();
                    }
                }
            }
            _ => {}
        }
    }

    fn on_reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.nodes.clear();
        state.open.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_nest_by_open_depth() {
        let tree = RecursionTree::new();
        tree.on_event(&Event::split(0, 3));
        tree.on_event(&Event::split(0, 1));
        tree.on_event(&Event::merge(0, 1));
        tree.on_event(&Event::split(2, 3));
        tree.on_event(&Event::merge(2, 3));
        tree.on_event(&Event::merge(0, 3));

        let state = tree.state.lock().unwrap();
        let shape: Vec<(usize, usize, usize, bool)> = state
            .nodes
            .iter()
            .map(|n| (n.depth, n.lo, n.hi, n.merged))
            .collect();
        assert_eq!(
            shape,
            vec![(0, 0, 3, true), (1, 0, 1, true), (1, 2, 3, true)]
        );
        assert!(state.open.is_empty());
    }

    #[test]
    fn test_reset_clears_the_tree() {
        let tree = RecursionTree::new();
        tree.on_event(&Event::split(0, 7));
        tree.on_reset();
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_render_shows_ranges() {
        let tree = RecursionTree::new();
        tree.on_event(&Event::split(0, 3));

        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        tree.render(area, &mut buf);

        let rendered: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("[0..3]"));
    }
}
