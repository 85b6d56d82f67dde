//! Rendering views consuming visualization events.
//!
//! The event-driven views implement [`dsvis_engine::EventListener`] over
//! interior mutable state, so they can be registered on the shared bus and
//! rendered from the draw loop without further wiring. The playback bar
//! reads the timeline directly instead.

mod array_strip;
mod cost_meter;
mod playback_bar;
mod pseudocode;
mod recursion_tree;

pub use array_strip::ArrayStrip;
pub use cost_meter::CostMeter;
pub use playback_bar::PlaybackBar;
pub use pseudocode::{source_for, PseudocodePane};
pub use recursion_tree::RecursionTree;
