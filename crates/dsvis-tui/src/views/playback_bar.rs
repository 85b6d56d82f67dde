//! Playback control strip bound to a timeline.

use std::sync::Arc;

use dsvis_engine::{PlaybackState, Timeline};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Renders play state, position, remaining frames, and speed, plus the
/// keys that drive them. The actual control calls live in the app's key
/// handler; this widget only reflects timeline state.
pub struct PlaybackBar {
    timeline: Arc<Timeline>,
}

impl PlaybackBar {
    pub fn new(timeline: Arc<Timeline>) -> Self {
        Self { timeline }
    }

    /// Render the bar into the given area.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let glyph = match self.timeline.state() {
            PlaybackState::Running => "▶",
            PlaybackState::Paused => "❚❚",
            PlaybackState::Idle => "■",
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" {glyph} "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "frame {} · {} queued · {:.2}x ",
                self.timeline.position(),
                self.timeline.remaining(),
                self.timeline.speed_factor(),
            )),
            Span::styled(
                "[space] play/pause  [s] step  [r] reset  [+/-] speed",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
