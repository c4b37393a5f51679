//!
//! conditional-probability query parsed from a case string
//!
use crate::common::Symbol;
use std::str::FromStr;
use thiserror::Error;

///
/// One case of the form `"<HiddenSym><int> given <ObsSym><int>"`,
/// e.g. `"H1 given A2"`: probability of hidden symbol at step
/// `hidden_steps` given the observable symbol at `observable_steps`.
///
/// Parsed once per case string and reused for every sequence. Whether
/// the symbols actually belong to the declared vocabularies is checked
/// at evaluation time, not here.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub hidden: Symbol,
    pub hidden_steps: usize,
    pub observable: Symbol,
    pub observable_steps: usize,
}

///
/// Error in from_str of Query
///
#[derive(Debug, Clone, Error)]
#[error("invalid case string `{0}`")]
pub struct QueryParseError(pub String);

/// `"<sym><digits>"`, symbol a single non-digit ASCII byte
fn parse_side(part: &str, case: &str) -> Result<(Symbol, usize), QueryParseError> {
    let bytes = part.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_alphabetic() {
        return Err(QueryParseError(case.to_string()));
    }
    let steps = part[1..]
        .parse::<usize>()
        .map_err(|_| QueryParseError(case.to_string()))?;
    Ok((bytes[0], steps))
}

impl FromStr for Query {
    type Err = QueryParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (front, back) = s
            .split_once(" given ")
            .ok_or_else(|| QueryParseError(s.to_string()))?;
        let (hidden, hidden_steps) = parse_side(front, s)?;
        let (observable, observable_steps) = parse_side(back, s)?;
        Ok(Query {
            hidden,
            hidden_steps,
            observable,
            observable_steps,
        })
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{} given {}{}",
            self.hidden as char, self.hidden_steps, self.observable as char, self.observable_steps
        )
    }
}

//
// tests
//
