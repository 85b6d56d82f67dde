//! Input validation between the UI and model construction.
//!
//! All user input is validated here, before any model exists; the
//! scheduling core never sees malformed data. Errors surface once, as a
//! status-line message, and no partial animation is produced.

use dsvis_engine::{parse_array, AlgorithmKind, ParseError};

/// A validated launch: the parsed array and the resolved target value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub data: Vec<i64>,
    /// Resolved target value; zero for algorithms without one.
    pub target: i64,
}

/// Reasons a launch request was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum LaunchError {
    /// The array text did not parse.
    Parse(ParseError),
    /// The target text was not an integer.
    InvalidTarget(String),
    /// Index mode selected an index outside the array.
    IndexOutOfBounds { index: i64, len: usize },
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid array: {e}"),
            Self::InvalidTarget(t) => write!(f, "invalid target: {t:?}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (length {len})")
            }
        }
    }
}

impl From<ParseError> for LaunchError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// Validate the raw input fields for `kind`.
///
/// In index mode the target is interpreted as an index into the parsed
/// array and converted to the value stored there.
pub fn prepare(
    kind: AlgorithmKind,
    array_text: &str,
    target_text: &str,
    index_mode: bool,
) -> Result<LaunchPlan, LaunchError> {
    let data = parse_array(array_text)?;

    let mut target = 0i64;
    if kind.needs_target() {
        target = target_text
            .trim()
            .parse::<i64>()
            .map_err(|_| LaunchError::InvalidTarget(target_text.trim().to_string()))?;
        if index_mode {
            let len = data.len();
            let Ok(index) = usize::try_from(target) else {
                return Err(LaunchError::IndexOutOfBounds { index: target, len });
            };
            if index >= len {
                return Err(LaunchError::IndexOutOfBounds { index: target, len });
            }
            target = data[index];
        }
    }

    Ok(LaunchPlan { data, target })
}
