//! Filter expression errors

use thiserror::Error;

/// Error raised while parsing a filter expression
///
/// Positions are byte offsets into the original expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KiwtError {
    #[error("Filter expression is empty")]
    Empty,

    #[error("Filter expression exceeds maximum length of {max} bytes ({len} given)")]
    TooLong { len: usize, max: usize },

    #[error("Filter expression nests groups deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("Unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("Expected a term or group at position {position}")]
    ExpectedItem { position: usize },

    #[error("Group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },

    #[error("Quoted value starting at position {position} is never closed")]
    UnterminatedQuote { position: usize },

    #[error("Term '{term}' at position {position} has no comparator")]
    MissingComparator { term: String, position: usize },

    #[error("Term '{term}' at position {position} has no path")]
    MissingPath { term: String, position: usize },
}
