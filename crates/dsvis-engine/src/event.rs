//! Immutable event model for visualization occurrences.
//!
//! An [`Event`] records one thing that happened during an algorithm run
//! (a comparison, a swap, a recursion split, ...) without prescribing how it
//! is rendered. Events are serializable so traces can be streamed as JSON.

use serde::{Deserialize, Serialize};

/// The kind of occurrence an [`Event`] describes.
///
/// Structural kinds (`Split`, `Merge`) describe algorithm shape and are
/// posted eagerly during trace generation; the per-step visual kinds surface
/// during playback. `Custom` is the open extension channel for module
/// specific markers (cost steps, capacity warnings, session boundaries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An element was compared (1 index).
    Compare,
    /// Two elements exchanged places (2 indices).
    Swap,
    /// An element was visited, e.g. a search hit (1 index).
    Visit,
    /// An element received a new value (1 index, `Value` payload).
    SetValue,
    /// A key changed in place, e.g. heap increase-key (1 index).
    KeyUpdate,
    /// A pseudocode line became current (`Line` payload).
    Line,
    /// An inclusive index range was emphasized (2 indices).
    HighlightRange,
    /// A recursive call opened on an inclusive range (2 indices).
    Split,
    /// A recursive call's range was merged back (2 indices).
    Merge,
    /// Module-defined marker (`Marker` payload).
    Custom,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Visit => "visit",
            Self::SetValue => "set_value",
            Self::KeyUpdate => "key_update",
            Self::Line => "line",
            Self::HighlightRange => "highlight_range",
            Self::Split => "split",
            Self::Merge => "merge",
            Self::Custom => "custom",
        };
        write!(f, "{name}")
    }
}

/// Kind-specific extra data carried by an [`Event`].
///
/// Each [`EventKind`] declares which variant it carries: `SetValue` carries
/// `Value`, `Line` carries `Line`, `Custom` carries `Marker`; every other
/// kind carries `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// No extra data.
    #[default]
    None,
    /// A new element value.
    Value(i64),
    /// A 1-indexed pseudocode line number.
    Line(u32),
    /// A module-defined marker string.
    Marker(String),
}

/// Immutable record of a single animation-relevant occurrence.
///
/// Constructed once, never mutated; safe to clone and share across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    indices: Vec<usize>,
    payload: Payload,
}

impl Event {
    /// Create a new event.
    ///
    /// The indices vector is taken by value, so the event never aliases a
    /// caller-held buffer.
    pub fn new(kind: EventKind, indices: Vec<usize>, payload: Payload) -> Self {
        Self {
            kind,
            indices,
            payload,
        }
    }

    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The affected positions, kind-dependent (may be empty).
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Kind-specific extra data.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    // Factory helpers. These are conveniences only; consumers dispatch on
    // `kind()`, never on which constructor was used.

    /// A comparison touching index `i`.
    pub fn compare(i: usize) -> Self {
        Self::new(EventKind::Compare, vec![i], Payload::None)
    }

    /// An exchange of the elements at `i` and `j`.
    pub fn swap(i: usize, j: usize) -> Self {
        Self::new(EventKind::Swap, vec![i, j], Payload::None)
    }

    /// A visit of index `i` (e.g. a search hit).
    pub fn visit(i: usize) -> Self {
        Self::new(EventKind::Visit, vec![i], Payload::None)
    }

    /// Index `i` received the new value `value`.
    pub fn set_value(i: usize, value: i64) -> Self {
        Self::new(EventKind::SetValue, vec![i], Payload::Value(value))
    }

    /// The key at index `i` changed in place.
    pub fn key_update(i: usize) -> Self {
        Self::new(EventKind::KeyUpdate, vec![i], Payload::None)
    }

    /// Pseudocode line `n` became current.
    pub fn line(n: u32) -> Self {
        Self::new(EventKind::Line, Vec::new(), Payload::Line(n))
    }

    /// The inclusive range `[l, r]` was emphasized.
    pub fn highlight_range(l: usize, r: usize) -> Self {
        Self::new(EventKind::HighlightRange, vec![l, r], Payload::None)
    }

    /// A recursive call opened on the inclusive range `[l, r]`.
    pub fn split(l: usize, r: usize) -> Self {
        Self::new(EventKind::Split, vec![l, r], Payload::None)
    }

    /// The inclusive range `[l, r]` was merged back.
    pub fn merge(l: usize, r: usize) -> Self {
        Self::new(EventKind::Merge, vec![l, r], Payload::None)
    }

    /// A module-defined marker event.
    pub fn custom(marker: impl Into<String>) -> Self {
        Self::new(EventKind::Custom, Vec::new(), Payload::Marker(marker.into()))
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.indices.is_empty() {
            write!(f, " {:?}", self.indices)?;
        }
        match &self.payload {
            Payload::None => Ok(()),
            Payload::Value(v) => write!(f, " value={v}"),
            Payload::Line(n) => write!(f, " line={n}"),
            Payload::Marker(m) => write!(f, " marker={m}"),
        }
    }
}
