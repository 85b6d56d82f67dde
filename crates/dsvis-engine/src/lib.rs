//! dsvis-engine: Headless animation engine for data-structure visualizations
//!
//! This crate provides the core coordination logic for dsvis, including:
//! - The immutable [`Event`] model and its pub/sub [`EventBus`]
//! - The [`Frame`] queue scheduler ([`Timeline`]) with VCR-style controls
//! - The [`Model`] contract that algorithm drivers implement
//! - Concrete algorithm models (searching, sorting, binary heap)
//! - Input parsing for user-supplied arrays
//!
//! The engine is fully synchronous: a model unrolls its complete trace in one
//! `run()` call, and a host loop drives playback by polling the timeline.

pub mod algorithms;
pub mod bus;
pub mod event;
pub mod frame;
pub mod model;
pub mod parse;
pub mod timeline;

// Re-export commonly used types
pub use algorithms::{
    AlgorithmKind, BinarySearchModel, BuildBottomUpModel, HeapError, HeapModel,
    InsertionSortModel, LinearSearchModel, MergeSortModel, UnknownAlgorithm,
    MAX_HEAP_CAPACITY,
};
pub use bus::{EventBus, EventListener};
pub use event::{Event, EventKind, Payload};
pub use frame::Frame;
pub use model::{Model, ModelContext};
pub use parse::{parse_array, ParseError};
pub use timeline::{PlaybackState, PositionChange, Timeline, TimelineError};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
