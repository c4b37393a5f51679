//!
//! query evaluation against per-sequence estimated chains
//!
use crate::common::{sequence_to_string, ObsId, Vocab};
use crate::dist::StateDist;
use crate::emission::EmissionTable;
use crate::error::HmmError;
use crate::io::InputRecord;
use crate::prob::Prob;
use crate::query::Query;
use crate::trans::TransTable;
use itertools::izip;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

///
/// Hidden-Markov model shared by every sequence of a run: the two
/// symbol vocabularies and the static emission table.
///
/// Transition and emission tables stay separate and are dispatched by
/// query side, so no lookup ever depends on a symbol naming only one
/// of the two vocabularies. The constructor still rejects overlapping
/// vocabularies: a record in which a symbol is both a state and an
/// observable is ambiguous to query.
///
#[derive(Debug, Clone)]
pub struct HmmModel {
    states: Vocab,
    observables: Vocab,
    emission: EmissionTable,
}

impl HmmModel {
    /// Constructor. Vocabularies must be disjoint.
    pub fn new(
        states: Vocab,
        observables: Vocab,
        emission_rows: &[Vec<f64>],
    ) -> Result<HmmModel, HmmError> {
        if let Some(symbol) = states.overlap(&observables) {
            return Err(HmmError::VocabOverlap(symbol as char));
        }
        let emission = EmissionTable::from_state_rows(&states, &observables, emission_rows)?;
        Ok(HmmModel {
            states,
            observables,
            emission,
        })
    }
    pub fn states(&self) -> &Vocab {
        &self.states
    }
    pub fn observables(&self) -> &Vocab {
        &self.observables
    }
    pub fn emission(&self) -> &EmissionTable {
        &self.emission
    }
    ///
    /// One-hot initial distribution at the sequence's first symbol
    ///
    pub fn initial_dist(&self, seq: &[u8]) -> Result<StateDist, HmmError> {
        let first = *seq
            .first()
            .ok_or_else(|| HmmError::MalformedInput("empty sequence".to_string()))?;
        let at = self
            .states
            .index_of(first)
            .ok_or(HmmError::UnknownSymbol(first as char))?;
        Ok(StateDist::one_hot(self.states.len(), at))
    }
    ///
    /// Probability of observing `observable` after `steps` propagation
    /// steps from `init`
    ///
    pub fn observable_prob(
        &self,
        trans: &TransTable,
        init: &StateDist,
        observable: ObsId,
        steps: usize,
    ) -> Prob {
        self.emission.project(observable, &init.propagate(trans, steps))
    }
    ///
    /// Evaluate one conditional query:
    ///
    /// ```text
    /// E[obs][hidden] * P(hidden at hidden_steps) / P(obs at observable_steps)
    /// ```
    ///
    /// The emission factor is time-invariant while the hidden and
    /// observable marginals are each taken at their own step count.
    /// When the two step counts differ this is NOT a standard
    /// Bayes'-rule posterior; the formula is kept as-is so results
    /// stay comparable with earlier runs, not corrected.
    ///
    /// Symbol membership is checked before any arithmetic, and an
    /// exactly-zero denominator is surfaced as an error.
    ///
    pub fn conditional(
        &self,
        trans: &TransTable,
        init: &StateDist,
        query: &Query,
    ) -> Result<Prob, HmmError> {
        let hidden = self
            .states
            .index_of(query.hidden)
            .ok_or(HmmError::UnknownSymbol(query.hidden as char))?;
        let observable = self
            .observables
            .index_of(query.observable)
            .ok_or(HmmError::UnknownSymbol(query.observable as char))?;

        let observable_prob =
            self.observable_prob(trans, init, observable, query.observable_steps);
        if observable_prob.is_zero() {
            return Err(HmmError::DivisionByZero {
                obs: query.observable as char,
                step: query.observable_steps,
            });
        }
        let hidden_prob = init.propagate(trans, query.hidden_steps).mass(hidden);
        Ok(self.emission.prob(observable, hidden) * hidden_prob / observable_prob)
    }
    ///
    /// Estimate a chain from one sequence and evaluate all queries
    /// against it, in input order
    ///
    pub fn evaluate_sequence(
        &self,
        seq: &[u8],
        queries: &[Query],
    ) -> Result<Vec<Prob>, HmmError> {
        let trans = TransTable::from_sequence(&self.states, seq);
        let init = self.initial_dist(seq)?;
        queries
            .iter()
            .map(|query| self.conditional(&trans, &init, query))
            .collect()
    }
}

///
/// Result of one case against one sequence
///
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub case: String,
    pub prob: Prob,
}

///
/// Results of all cases against one sequence
///
#[derive(Debug, Clone, Serialize)]
pub struct SequenceResult {
    pub sequence: String,
    pub cases: Vec<CaseResult>,
}

///
/// Results of a whole run, in input order
///
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub sequences: Vec<SequenceResult>,
}

///
/// Run every case of the record against every sequence.
///
/// Per-sequence computations are independent (the emission table is
/// shared read-only, each sequence gets its own transition table and
/// initial distribution), so sequences are evaluated in parallel.
/// The first error aborts the whole run.
///
pub fn run(record: &InputRecord) -> Result<RunOutput, HmmError> {
    let model = HmmModel::new(
        record.states.clone(),
        record.observables.clone(),
        &record.emission_rows,
    )?;
    let queries: Vec<Query> = record.cases.iter().map(|case| case.query).collect();
    info!(
        "run: {} sequence(s), {} case(s), {} states, {} observables",
        record.sequences.len(),
        queries.len(),
        model.states().len(),
        model.observables().len()
    );
    let sequences = record
        .sequences
        .par_iter()
        .map(|seq| {
            let probs = model.evaluate_sequence(seq, &queries)?;
            let cases = izip!(&record.cases, probs)
                .map(|(case, prob)| CaseResult {
                    case: case.text.clone(),
                    prob,
                })
                .collect();
            Ok(SequenceResult {
                sequence: sequence_to_string(seq).to_string(),
                cases,
            })
        })
        .collect::<Result<Vec<SequenceResult>, HmmError>>()?;
    Ok(RunOutput { sequences })
}

//
// tests
//
