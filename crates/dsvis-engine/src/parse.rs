//! Parsing of user-supplied array input.
//!
//! Validation happens here, at the orchestration boundary, before any model
//! is constructed; the scheduling core assumes well-formed input.

/// Errors produced while parsing an array string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input contained no values.
    #[error("array input is empty")]
    Empty,

    /// A token was not a valid integer.
    #[error("invalid integer: {0:?}")]
    InvalidToken(String),
}

/// Parse a comma- or whitespace-separated list of integers.
pub fn parse_array(text: &str) -> Result<Vec<i64>, ParseError> {
    let tokens: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    tokens
        .into_iter()
        .map(|t| {
            t.parse::<i64>()
                .map_err(|_| ParseError::InvalidToken(t.to_string()))
        })
        .collect()
}
