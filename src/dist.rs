//!
//! probability distribution over hidden states and its n-step propagation
//!
use crate::common::StateId;
use crate::prob::Prob;
use crate::trans::TransTable;
use serde::Serialize;

///
/// Distribution over the state vocabulary, indexed by `StateId`.
///
/// Propagation is value-semantic: every step builds a fresh vector
/// from the previous snapshot, so no sweep ever reads a half-updated
/// distribution.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StateDist(Vec<Prob>);

impl StateDist {
    /// Constructor with all mass 0
    pub fn zero(n_states: usize) -> StateDist {
        StateDist(vec![Prob::zero(); n_states])
    }
    /// Constructor with all mass on one state
    pub fn one_hot(n_states: usize, at: StateId) -> StateDist {
        let mut dist = StateDist::zero(n_states);
        dist.0[at] = Prob::one();
        dist
    }
    pub fn from_probs(probs: Vec<Prob>) -> StateDist {
        StateDist(probs)
    }
    /// the number of states
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// probability mass at the state
    pub fn mass(&self, state: StateId) -> Prob {
        self.0[state]
    }
    /// total mass, 1 for a proper distribution
    pub fn sum(&self) -> Prob {
        self.0.iter().sum()
    }
    /// iterator of `(state, mass)`
    pub fn iter(&self) -> impl Iterator<Item = (StateId, Prob)> + '_ {
        self.0.iter().copied().enumerate()
    }
    ///
    /// Advance the distribution by `n_steps` applications of the
    /// transition table:
    ///
    /// ```text
    /// d'[next] = sum_current T[next][current] * d[current]
    /// ```
    ///
    /// `n_steps = 0` is the identity transform.
    /// O(n_steps * |states|^2).
    ///
    pub fn propagate(&self, table: &TransTable, n_steps: usize) -> StateDist {
        assert_eq!(table.n_states(), self.len());
        let n = self.len();
        let mut dist = self.clone();
        for _ in 0..n_steps {
            let stepped = (0..n)
                .map(|next| (0..n).map(|current| table.prob(next, current) * dist.0[current]).sum())
                .collect();
            dist = StateDist(stepped);
        }
        dist
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::common::Vocab;
    use crate::prob::p;
    use test_case::test_case;

    fn hl_table() -> TransTable {
        // "HHLH": P(H|H)=1/2, P(L|H)=1/2, P(H|L)=1, P(L|L)=0
        let states = Vocab::new(b"HL".to_vec()).unwrap();
        TransTable::from_sequence(&states, b"HHLH")
    }

    #[test]
    fn one_hot_and_mass() {
        let d = StateDist::one_hot(2, 0);
        assert_eq!(d.mass(0), p(1.0));
        assert_eq!(d.mass(1), p(0.0));
        assert_eq!(d.sum(), p(1.0));
        let pairs: Vec<(StateId, Prob)> = d.iter().collect();
        assert_eq!(pairs, vec![(0, p(1.0)), (1, p(0.0))]);
    }
    #[test]
    fn propagate_identity_at_zero_steps() {
        let d = StateDist::from_probs(vec![p(0.25), p(0.75)]);
        // exact, not approximate
        assert_eq!(d.propagate(&hl_table(), 0), d);
    }
    #[test]
    fn propagate_one_step_by_hand() {
        let d = StateDist::one_hot(2, 0);
        let d1 = d.propagate(&hl_table(), 1);
        // d1[H] = P(H|H)*1 + P(H|L)*0, d1[L] = P(L|H)*1 + P(L|L)*0
        assert_abs_diff_eq!(d1.mass(0), p(0.5));
        assert_abs_diff_eq!(d1.mass(1), p(0.5));
    }
    #[test]
    fn propagate_two_steps_by_hand() {
        let d = StateDist::one_hot(2, 0);
        let d2 = d.propagate(&hl_table(), 2);
        // from [0.5, 0.5]: H gets 0.5*0.5 + 1*0.5, L gets 0.5*0.5
        assert_abs_diff_eq!(d2.mass(0), p(0.75));
        assert_abs_diff_eq!(d2.mass(1), p(0.25));
    }
    #[test]
    fn propagate_steps_compose() {
        let d = StateDist::one_hot(2, 0);
        let table = hl_table();
        let once_then_twice = d.propagate(&table, 1).propagate(&table, 2);
        assert_eq!(once_then_twice, d.propagate(&table, 3));
    }
    #[test_case(0 ; "zero steps")]
    #[test_case(1 ; "one step")]
    #[test_case(5 ; "five steps")]
    #[test_case(40 ; "forty steps")]
    fn propagate_conserves_mass(n_steps: usize) {
        // non-degenerate table: mass 1 stays 1
        let d = StateDist::from_probs(vec![p(0.3), p(0.7)]);
        let stepped = d.propagate(&hl_table(), n_steps);
        assert_abs_diff_eq!(stepped.sum(), p(1.0), epsilon = 1e-9);
    }
    #[test]
    fn propagate_drains_mass_on_degenerate_state() {
        // "AAAA" leaves B with an all-zero outgoing column, so mass
        // starting at B disappears in one step
        let states = Vocab::new(b"AB".to_vec()).unwrap();
        let table = TransTable::from_sequence(&states, b"AAAA");
        let d = StateDist::one_hot(2, 1);
        let d1 = d.propagate(&table, 1);
        assert!(d1.sum().is_zero());
    }
}
