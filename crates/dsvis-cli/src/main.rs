//! dsvis CLI: Command-line interface for data-structure algorithm visualizations

use clap::{Parser, Subcommand};
use dsvis_engine::{
    parse_array, AlgorithmKind, Event, EventBus, EventListener, Model, ModelContext, Timeline,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Frame rate used for trace timelines; irrelevant for output because
/// the queue is drained rather than played back.
const TRACE_FPS: u32 = 60;

/// Interactive visualizer for searching, sorting and heap algorithms
#[derive(Parser)]
#[command(name = "dsvis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Run an algorithm headless and print its event trace
    Trace {
        /// Algorithm to run (linear-search, binary-search, insertion-sort,
        /// merge-sort, heapify)
        #[arg(long)]
        algorithm: String,

        /// Input array, comma or whitespace separated (e.g. "5,2,9,1,6")
        #[arg(long)]
        array: String,

        /// Search target (required for the search algorithms)
        #[arg(long)]
        target: Option<i64>,

        /// Output as JSON, one event per line
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Tui) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(dsvis_tui::run_tui()) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Trace {
            algorithm,
            array,
            target,
            json,
        }) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
            cmd_trace(&algorithm, &array, target, json);
        }
    }
}

/// Listener that records every event it observes, in delivery order.
struct TraceListener {
    events: Mutex<Vec<Event>>,
}

impl TraceListener {
    fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<Event> {
        std::mem::take(&mut self.events.lock().expect("trace listener poisoned"))
    }
}

impl EventListener for TraceListener {
    fn on_event(&self, event: &Event) {
        self.events
            .lock()
            .expect("trace listener poisoned")
            .push(event.clone());
    }
}

fn cmd_trace(algorithm: &str, array: &str, target: Option<i64>, json: bool) {
    let kind: AlgorithmKind = match algorithm.parse() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Available algorithms: {}",
                AlgorithmKind::ALL
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            std::process::exit(1);
        }
    };

    let data = match parse_array(array) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let target = if kind.needs_target() {
        match target {
            Some(t) => t,
            None => {
                eprintln!("Error: {} requires --target", kind.name());
                std::process::exit(1);
            }
        }
    } else {
        target.unwrap_or(0)
    };

    let bus = Arc::new(EventBus::new());
    let timeline = match Timeline::new(TRACE_FPS) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let listener = Arc::new(TraceListener::new());
    bus.register(listener.clone());

    let ctx = ModelContext::new(bus, timeline.clone());
    let mut model = kind.build(ctx, data, target);
    model.run();

    // Replay the whole queue immediately so frame-borne events are
    // delivered in order after the eager ones.
    timeline.drain();

    let events = listener.take();
    for event in &events {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("Error: failed to serialize event: {e}");
                    std::process::exit(1);
                }
            }
        } else {
            println!("{event}");
        }
    }
}
