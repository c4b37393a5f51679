//!
//! error taxonomy of the estimation/query engine
//!
use crate::query::QueryParseError;
use thiserror::Error;

///
/// Errors surfaced by record parsing, model construction and query
/// evaluation. Degenerate transition rows (a state never seen as a
/// predecessor) are NOT an error and estimate to all-zero columns.
///
#[derive(Debug, Error)]
pub enum HmmError {
    /// structural problem in the input record (wrong line counts,
    /// non-numeric emission values, multi-byte symbols, ...)
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// a query references a symbol outside the declared vocabularies
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(char),

    /// the observable-probability denominator of a conditional query
    /// evaluated to exactly 0
    #[error("observable `{obs}` has zero probability at step {step}")]
    DivisionByZero { obs: char, step: usize },

    /// vocabulary construction saw the same symbol twice
    #[error("duplicate symbol `{0}` in vocabulary")]
    DuplicateSymbol(char),

    /// state and observable vocabularies must not share symbols
    #[error("state and observable vocabularies share symbol `{0}`")]
    VocabOverlap(char),

    #[error(transparent)]
    Query(#[from] QueryParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
