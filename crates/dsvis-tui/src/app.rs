//! Application state and update logic for the dsvis TUI.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use dsvis_engine::{
    algorithms::START_MARKER, AlgorithmKind, Event, EventBus, ModelContext, Timeline,
    TimelineError,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controller;
use crate::views::{
    source_for, ArrayStrip, CostMeter, PlaybackBar, PseudocodePane, RecursionTree,
};

/// Sample input pre-filled on startup.
const DEFAULT_ARRAY: &str = "5,2,9,1,6";
const DEFAULT_TARGET: &str = "9";

/// Which input field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Array,
    Target,
}

/// Minimal append/backspace text field.
#[derive(Debug, Default)]
pub struct InputField {
    value: String,
}

impl InputField {
    fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    fn backspace(&mut self) {
        self.value.pop();
    }
}

/// Top-level TUI state: the shared session objects, the views registered
/// on the bus, and the input fields the controller validates.
pub struct App {
    bus: Arc<EventBus>,
    timeline: Arc<Timeline>,

    pub array_strip: Arc<ArrayStrip>,
    pub recursion_tree: Arc<RecursionTree>,
    pub pseudocode: Arc<PseudocodePane>,
    pub cost_meter: Arc<CostMeter>,
    playback_bar: PlaybackBar,

    pub array_input: InputField,
    pub target_input: InputField,
    algorithm_index: usize,
    pub index_mode: bool,
    pub focus: Focus,

    /// One-shot boundary error message, shown until the next launch.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Create the app with a fresh bus/timeline pair and all views
    /// registered.
    pub fn new(fps: u32) -> Result<Self, TimelineError> {
        let bus = Arc::new(EventBus::new());
        let timeline = Arc::new(Timeline::new(fps)?);

        let array_strip = Arc::new(ArrayStrip::new());
        let recursion_tree = Arc::new(RecursionTree::new());
        let pseudocode = Arc::new(PseudocodePane::new());
        let cost_meter = Arc::new(CostMeter::new());

        bus.register(array_strip.clone());
        bus.register(recursion_tree.clone());
        bus.register(pseudocode.clone());
        bus.register(cost_meter.clone());

        let app = Self {
            playback_bar: PlaybackBar::new(timeline.clone()),
            bus,
            timeline,
            array_strip,
            recursion_tree,
            pseudocode,
            cost_meter,
            array_input: InputField::with_value(DEFAULT_ARRAY),
            target_input: InputField::with_value(DEFAULT_TARGET),
            algorithm_index: 0,
            index_mode: false,
            focus: Focus::None,
            status: None,
            should_quit: false,
        };
        app.pseudocode.set_source(&source_for(app.algorithm()));
        if let Ok(values) = dsvis_engine::parse_array(DEFAULT_ARRAY) {
            app.array_strip.bind(&values);
        }
        Ok(app)
    }

    /// Currently selected algorithm.
    pub fn algorithm(&self) -> AlgorithmKind {
        AlgorithmKind::ALL[self.algorithm_index]
    }

    /// The session timeline (for tests and the run loop).
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// Poll the timeline clock; called from the UI tick.
    pub fn on_tick(&mut self) {
        self.timeline.poll(Instant::now());
    }

    /// Handle a key press.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.focus != Focus::None {
            self.on_edit_key(key.code);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char('s') => {
                self.timeline.step_forward();
            }
            KeyCode::Char('r') => self.reset_session(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_speed(2.0),
            KeyCode::Char('-') => self.adjust_speed(0.5),
            KeyCode::Tab => self.next_algorithm(),
            KeyCode::Char('i') => self.index_mode = !self.index_mode,
            KeyCode::Char('a') => self.focus = Focus::Array,
            KeyCode::Char('t') => self.focus = Focus::Target,
            KeyCode::Enter => self.launch(),
            _ => {}
        }
    }

    fn on_edit_key(&mut self, code: KeyCode) {
        let field = match self.focus {
            Focus::Array => &mut self.array_input,
            Focus::Target => &mut self.target_input,
            Focus::None => return,
        };
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() || "-, ".contains(c) => field.push_char(c),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::None,
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        if self.timeline.is_running() {
            self.timeline.pause();
        } else {
            self.timeline.start();
        }
    }

    fn adjust_speed(&mut self, by: f64) {
        // Clamping happens inside set_speed; the factor is always valid here.
        let _ = self.timeline.set_speed(self.timeline.speed_factor() * by);
    }

    fn next_algorithm(&mut self) {
        self.algorithm_index = (self.algorithm_index + 1) % AlgorithmKind::ALL.len();
        self.pseudocode.set_source(&source_for(self.algorithm()));
    }

    /// Cancel the current replay and clear all per-run view state.
    pub fn reset_session(&mut self) {
        self.timeline.reset();
        self.bus.notify_reset();
    }

    /// Validate the inputs, construct the selected model, unroll its trace,
    /// and start playback. Invalid input is reported once on the status
    /// line; no partial animation is produced.
    pub fn launch(&mut self) {
        let kind = self.algorithm();
        let plan = match controller::prepare(
            kind,
            self.array_input.as_str(),
            self.target_input.as_str(),
            self.index_mode,
        ) {
            Ok(plan) => plan,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };
        self.status = None;

        self.reset_session();
        self.array_strip.bind(&plan.data);
        self.pseudocode.set_source(&source_for(kind));
        self.bus.post(&Event::custom(START_MARKER));

        let ctx = ModelContext::new(self.bus.clone(), self.timeline.clone());
        let mut model = kind.build(ctx, plan.data, plan.target);
        model.run();
        self.timeline.start();
    }

    // Rendering

    /// Draw the whole UI.
    pub fn render(&self, frame: &mut Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // input header
                Constraint::Min(8),    // main panes
                Constraint::Length(1), // cost meter
                Constraint::Length(1), // playback bar
                Constraint::Length(1), // status line
            ])
            .split(frame.area());

        self.render_header(rows[0], frame);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(36)])
            .split(rows[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4)])
            .split(columns[0]);

        let buf = frame.buffer_mut();
        self.array_strip.render(left[0], buf);
        self.recursion_tree.render(left[1], buf);
        self.pseudocode.render(columns[1], buf);
        self.cost_meter.render(rows[2], buf);
        self.playback_bar.render(rows[3], buf);
        self.render_status(rows[4], frame);
    }

    fn render_header(&self, area: Rect, frame: &mut Frame<'_>) {
        let focused = Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let normal = Style::default();

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.algorithm().name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("│ [a]rray: "),
            Span::styled(
                self.array_input.as_str().to_string(),
                if self.focus == Focus::Array { focused } else { normal },
            ),
            Span::raw("  [t]arget: "),
            Span::styled(
                self.target_input.as_str().to_string(),
                if self.focus == Focus::Target { focused } else { normal },
            ),
            Span::raw(if self.index_mode { "  (index mode)" } else { "" }),
            Span::styled(
                "  [Tab] algorithm  [Enter] run",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" dsvis ")),
            area,
        );
    }

    fn render_status(&self, area: Rect, frame: &mut Frame<'_>) {
        let line = match &self.status {
            Some(message) => Line::styled(
                format!(" {message}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            None => Line::styled(
                " ready · [q] quit",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_cycles_algorithms() {
        let mut app = App::new(60).unwrap();
        assert_eq!(app.algorithm(), AlgorithmKind::LinearSearch);
        app.on_key(press(KeyCode::Tab));
        assert_eq!(app.algorithm(), AlgorithmKind::BinarySearch);
        for _ in 0..3 {
            app.on_key(press(KeyCode::Tab));
        }
        assert_eq!(app.algorithm(), AlgorithmKind::Heapify);
        app.on_key(press(KeyCode::Tab));
        assert_eq!(app.algorithm(), AlgorithmKind::LinearSearch);
    }

    #[test]
    fn test_typing_edits_the_focused_field() {
        let mut app = App::new(60).unwrap();
        app.on_key(press(KeyCode::Char('a')));
        assert_eq!(app.focus, Focus::Array);

        for _ in 0..DEFAULT_ARRAY.len() {
            app.on_key(press(KeyCode::Backspace));
        }
        for c in "7,3".chars() {
            app.on_key(press(KeyCode::Char(c)));
        }
        app.on_key(press(KeyCode::Esc));
        assert_eq!(app.array_input.as_str(), "7,3");
        assert_eq!(app.focus, Focus::None);
    }

    #[test]
    fn test_launch_with_invalid_input_sets_status_only() {
        let mut app = App::new(60).unwrap();
        app.on_key(press(KeyCode::Char('a')));
        app.on_key(press(KeyCode::Esc));
        for _ in 0..DEFAULT_ARRAY.len() {
            app.array_input.backspace();
        }
        app.launch();
        assert!(app.status.is_some());
        assert_eq!(app.timeline().remaining(), 0);
    }

    #[test]
    fn test_launch_unrolls_trace_and_starts_playback() {
        let mut app = App::new(60).unwrap();
        app.launch();
        assert!(app.status.is_none());
        assert!(app.timeline().remaining() > 0);
        assert!(app.timeline().is_running());
    }

    #[test]
    fn test_heapify_launches_from_the_app() {
        let mut app = App::new(60).unwrap();
        while app.algorithm() != AlgorithmKind::Heapify {
            app.on_key(press(KeyCode::Tab));
        }
        app.launch();
        assert!(app.status.is_none());
        assert!(app.timeline().remaining() > 0);
        assert!(app.timeline().is_running());
    }

    #[test]
    fn test_step_key_replays_one_frame() {
        let mut app = App::new(60).unwrap();
        app.launch();
        let before = app.timeline().remaining();
        app.on_key(press(KeyCode::Char('s')));
        assert_eq!(app.timeline().remaining(), before - 1);
        assert_eq!(app.timeline().position(), 1);
    }

    #[test]
    fn test_reset_key_clears_session() {
        let mut app = App::new(60).unwrap();
        app.launch();
        app.on_key(press(KeyCode::Char('r')));
        assert_eq!(app.timeline().remaining(), 0);
        assert_eq!(app.timeline().position(), 0);
        assert_eq!(app.cost_meter.totals(), (0, 0, 0));
    }

    #[test]
    fn test_speed_keys_stay_within_clamp() {
        let mut app = App::new(60).unwrap();
        for _ in 0..10 {
            app.on_key(press(KeyCode::Char('+')));
        }
        assert!((app.timeline().speed_factor() - 4.0).abs() < f64::EPSILON);
        for _ in 0..10 {
            app.on_key(press(KeyCode::Char('-')));
        }
        assert!((app.timeline().speed_factor() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_render_smoke() {
        let mut app = App::new(60).unwrap();
        app.launch();

        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("dsvis"));
        assert!(content.contains("Pseudocode"));
        assert!(content.contains("linear-search"));
    }
}
