//!
//! static emission table and observable projection
//!
use crate::common::{ObsId, StateId, Vocab};
use crate::dist::StateDist;
use crate::error::HmmError;
use crate::prob::Prob;
use serde::Serialize;

///
/// Dense `|observables| x |states|` table of emission probabilities,
/// keyed `(observable, state)`.
///
/// Built once per run from the input record's per-state rows (row i
/// holds state i's probabilities over all observables) and shared
/// read-only across sequences. Column-stochasticity of the supplied
/// values is NOT validated.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionTable {
    n_observables: usize,
    n_states: usize,
    /// row-major, `probs[observable * n_states + state]`
    probs: Vec<Prob>,
}

impl EmissionTable {
    ///
    /// Build the table from per-state rows, transposing into
    /// observable-major storage. Row-count and row-length mismatches
    /// are structural input errors.
    ///
    pub fn from_state_rows(
        states: &Vocab,
        observables: &Vocab,
        rows: &[Vec<f64>],
    ) -> Result<EmissionTable, HmmError> {
        if rows.len() != states.len() {
            return Err(HmmError::MalformedInput(format!(
                "expected {} emission rows, found {}",
                states.len(),
                rows.len()
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != observables.len() {
                return Err(HmmError::MalformedInput(format!(
                    "emission row {} has {} values, expected {}",
                    i,
                    row.len(),
                    observables.len()
                )));
            }
        }
        let n_states = states.len();
        let n_observables = observables.len();
        let mut probs = vec![Prob::zero(); n_observables * n_states];
        for (state, row) in rows.iter().enumerate() {
            for (observable, &value) in row.iter().enumerate() {
                probs[observable * n_states + state] = Prob::from_prob(value);
            }
        }
        Ok(EmissionTable {
            n_observables,
            n_states,
            probs,
        })
    }
    pub fn n_observables(&self) -> usize {
        self.n_observables
    }
    pub fn n_states(&self) -> usize {
        self.n_states
    }
    ///
    /// Probability of emitting `observable` from `state`
    ///
    pub fn prob(&self, observable: ObsId, state: StateId) -> Prob {
        self.probs[observable * self.n_states + state]
    }
    ///
    /// Probability of observing `observable` under a hidden-state
    /// distribution: the dot product of the observable's emission row
    /// with the distribution.
    ///
    pub fn project(&self, observable: ObsId, dist: &StateDist) -> Prob {
        assert_eq!(dist.len(), self.n_states);
        (0..self.n_states)
            .map(|state| self.prob(observable, state) * dist.mass(state))
            .sum()
    }
}

//
// tests
//
