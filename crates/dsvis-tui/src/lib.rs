//! dsvis-tui: Terminal UI for dsvis data-structure visualizations
//!
//! This crate provides the TUI layer for dsvis, including:
//! - Event-consuming views (array strip, recursion tree, pseudocode,
//!   cost meter, playback bar)
//! - The controller validating user input before model construction
//! - The app event loop that polls the timeline clock each tick

mod app;
pub mod controller;
mod event;
pub mod views;

pub use app::{App, Focus, InputField};
pub use event::{Event, EventHandler};
pub use dsvis_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// Timeline frame rate used by the interactive UI.
const TIMELINE_FPS: u32 = 60;

/// UI tick rate; also the granularity of timeline polling.
const TICK_RATE_MS: u64 = 16;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// on exit.
pub async fn run_tui() -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(TIMELINE_FPS)?;
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        match events.next().await {
            Some(Event::Key(key)) => app.on_key(key),
            Some(Event::Tick) => app.on_tick(),
            Some(Event::Resize(_, _)) => {}
            None => break,
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
