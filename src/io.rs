//!
//! line-oriented record parsing and output formatting
//!
//! The engine itself never touches files: binaries read the text,
//! hand it to `parse_record`, and write whatever `format_output`
//! renders.
//!
use crate::common::{Sequence, Vocab};
use crate::engine::RunOutput;
use crate::error::HmmError;
use crate::query::Query;
use log::warn;
use std::fmt::Write as _;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

///
/// One case: the raw string as it appeared in the input (preserved
/// for output) and its parsed query
///
#[derive(Debug, Clone)]
pub struct Case {
    pub text: String,
    pub query: Query,
}

///
/// Fully-parsed input record:
///
/// ```text
/// line 1:              integer S
/// lines 2..S+1:        S sequence strings over the state alphabet
/// line S+2:            whitespace-separated state symbols
/// line S+3:            whitespace-separated observable symbols
/// next |states| lines: |observables| floats, state i's emission row
/// next line:           integer C
/// next C lines:        case strings "<HiddenSym><int> given <ObsSym><int>"
/// ```
///
#[derive(Debug, Clone)]
pub struct InputRecord {
    pub sequences: Vec<Sequence>,
    pub states: Vocab,
    pub observables: Vocab,
    pub emission_rows: Vec<Vec<f64>>,
    pub cases: Vec<Case>,
}

/// cursor over input lines with positioned error messages
struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Cursor<'a> {
        Cursor {
            lines: input.trim().lines().collect(),
            pos: 0,
        }
    }
    fn next(&mut self, what: &str) -> Result<&'a str, HmmError> {
        let line = self.lines.get(self.pos).copied().ok_or_else(|| {
            HmmError::MalformedInput(format!("missing {} at line {}", what, self.pos + 1))
        })?;
        self.pos += 1;
        Ok(line)
    }
    fn n_left(&self) -> usize {
        self.lines.len() - self.pos
    }
}

fn parse_count(line: &str, what: &str) -> Result<usize, HmmError> {
    line.trim()
        .parse::<usize>()
        .map_err(|_| HmmError::MalformedInput(format!("invalid {} `{}`", what, line)))
}

/// whitespace-separated single-byte symbols
fn parse_vocab(line: &str, what: &str) -> Result<Vocab, HmmError> {
    let mut symbols = Vec::new();
    for token in line.split_whitespace() {
        if token.len() != 1 {
            return Err(HmmError::MalformedInput(format!(
                "{} symbol `{}` is not a single character",
                what, token
            )));
        }
        symbols.push(token.as_bytes()[0]);
    }
    Vocab::new(symbols)
}

fn parse_emission_row(line: &str) -> Result<Vec<f64>, HmmError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                HmmError::MalformedInput(format!("invalid emission value `{}`", token))
            })
        })
        .collect()
}

///
/// Parse a whole input text into a structured record. Structural
/// problems (missing lines, non-numeric values, empty sequences,
/// unparseable cases) are surfaced; nothing is recovered.
///
pub fn parse_record(input: &str) -> Result<InputRecord, HmmError> {
    let mut cursor = Cursor::new(input);

    let n_sequences = parse_count(cursor.next("sequence count")?, "sequence count")?;
    let mut sequences: Vec<Sequence> = Vec::with_capacity(n_sequences);
    for _ in 0..n_sequences {
        let line = cursor.next("sequence")?.trim();
        if line.is_empty() {
            return Err(HmmError::MalformedInput("empty sequence".to_string()));
        }
        sequences.push(line.as_bytes().to_vec());
    }

    let states = parse_vocab(cursor.next("state symbols")?, "state")?;
    let observables = parse_vocab(cursor.next("observable symbols")?, "observable")?;

    let mut emission_rows = Vec::with_capacity(states.len());
    for _ in 0..states.len() {
        emission_rows.push(parse_emission_row(cursor.next("emission row")?)?);
    }

    let n_cases = parse_count(cursor.next("case count")?, "case count")?;
    let mut cases = Vec::with_capacity(n_cases);
    for _ in 0..n_cases {
        let text = cursor.next("case")?.trim().to_string();
        let query: Query = text.parse()?;
        cases.push(Case { text, query });
    }

    if cursor.n_left() > 0 {
        warn!("{} trailing line(s) ignored", cursor.n_left());
    }

    Ok(InputRecord {
        sequences,
        states,
        observables,
        emission_rows,
        cases,
    })
}

///
/// Render run results as text: per sequence, the
/// sequence string then one `"<case> = <result>"` line per case;
/// sequences separated by exactly one blank line, no trailing blank
/// line after the final sequence.
///
pub fn format_output(output: &RunOutput) -> String {
    let mut s = String::new();
    for (i, seq) in output.sequences.iter().enumerate() {
        if i > 0 {
            s.push('\n');
        }
        let _ = writeln!(s, "{}", seq.sequence);
        for case in &seq.cases {
            let _ = writeln!(s, "{} = {}", case.case, case.prob);
        }
    }
    s
}

///
/// write string into a file
///
pub fn write_string(path: &Path, string: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(string.as_bytes())?;
    Ok(())
}

//
// tests
//
