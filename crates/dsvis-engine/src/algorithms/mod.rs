//! Concrete algorithm models driving the animation substrate.
//!
//! Each model translates one textbook algorithm into the two-channel event
//! scheme: eager structural events posted during `run()`, and replayed
//! per-step events wrapped in timeline frames.

pub mod binary_search;
pub mod heap;
pub mod insertion_sort;
pub mod linear_search;
pub mod merge_sort;

pub use binary_search::BinarySearchModel;
pub use heap::{BuildBottomUpModel, HeapError, HeapModel, MAX_HEAP_CAPACITY};
pub use insertion_sort::InsertionSortModel;
pub use linear_search::LinearSearchModel;
pub use merge_sort::MergeSortModel;

use crate::model::{Model, ModelContext};

/// Marker payload counted by cost meters as one algorithm step.
pub const STEP_MARKER: &str = "step";

/// Marker posted eagerly when a new session starts.
pub const START_MARKER: &str = "start";

/// The selectable algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    LinearSearch,
    BinarySearch,
    InsertionSort,
    MergeSort,
    Heapify,
}

/// Error for algorithm names that do not match any [`AlgorithmKind`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown algorithm: {0:?}")]
pub struct UnknownAlgorithm(pub String);

impl AlgorithmKind {
    /// All selectable algorithms, in display order.
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::LinearSearch,
        AlgorithmKind::BinarySearch,
        AlgorithmKind::InsertionSort,
        AlgorithmKind::MergeSort,
        AlgorithmKind::Heapify,
    ];

    /// Human-readable name shown in the UI and accepted on the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Self::LinearSearch => "linear-search",
            Self::BinarySearch => "binary-search",
            Self::InsertionSort => "insertion-sort",
            Self::MergeSort => "merge-sort",
            Self::Heapify => "heapify",
        }
    }

    /// Whether the algorithm needs a search target.
    pub fn needs_target(self) -> bool {
        matches!(self, Self::LinearSearch | Self::BinarySearch)
    }

    /// Construct the model for this algorithm.
    ///
    /// `target` is ignored by everything except the searches.
    pub fn build(self, ctx: ModelContext, data: Vec<i64>, target: i64) -> Box<dyn Model> {
        match self {
            Self::LinearSearch => Box::new(LinearSearchModel::new(ctx, data, target)),
            Self::BinarySearch => Box::new(BinarySearchModel::new(ctx, data, target)),
            Self::InsertionSort => Box::new(InsertionSortModel::new(ctx, &data)),
            Self::MergeSort => Box::new(MergeSortModel::new(ctx, &data)),
            Self::Heapify => Box::new(BuildBottomUpModel::new(ctx, &data)),
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}
