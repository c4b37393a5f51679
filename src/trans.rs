//!
//! transition-probability table estimated from one observed sequence
//!
use crate::common::{StateId, Vocab};
use crate::prob::Prob;

///
/// Dense `|states| x |states|` table of transition probabilities,
/// keyed `(next_state, current_state)`.
///
/// Estimated per-sequence by overlapping bigram counts. A state that
/// never occurs as a predecessor keeps an all-zero outgoing column
/// (degenerate case, no re-normalization).
///
#[derive(Debug, Clone, PartialEq)]
pub struct TransTable {
    n_states: usize,
    /// row-major, `probs[next * n_states + current]`
    probs: Vec<Prob>,
}

impl TransTable {
    /// Constructor of TransTable with all p=0
    pub fn zero(n_states: usize) -> Self {
        TransTable {
            n_states,
            probs: vec![Prob::zero(); n_states * n_states],
        }
    }
    ///
    /// Estimate transition probabilities from one realized path.
    ///
    /// Counts are overlapping: a position can end one pair and start
    /// the next, so `seq.windows(2)` visits every adjacent pair once.
    /// The denominator counts the predecessor followed by ANY symbol,
    /// the numerator only vocabulary pairs.
    ///
    pub fn from_sequence(states: &Vocab, seq: &[u8]) -> TransTable {
        let n = states.len();
        let mut pair_counts = vec![0usize; n * n];
        let mut outgoing_counts = vec![0usize; n];
        for w in seq.windows(2) {
            if let Some(current) = states.index_of(w[0]) {
                outgoing_counts[current] += 1;
                if let Some(next) = states.index_of(w[1]) {
                    pair_counts[next * n + current] += 1;
                }
            }
        }
        let probs = pair_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let current = i % n;
                if outgoing_counts[current] == 0 {
                    Prob::zero()
                } else {
                    Prob::from_prob(count as f64 / outgoing_counts[current] as f64)
                }
            })
            .collect();
        TransTable { n_states: n, probs }
    }
    /// the number of states of the table
    pub fn n_states(&self) -> usize {
        self.n_states
    }
    ///
    /// Probability of moving to `next` given the chain is at `current`
    ///
    pub fn prob(&self, next: StateId, current: StateId) -> Prob {
        self.probs[next * self.n_states + current]
    }
    ///
    /// Sum of outgoing probabilities of `current`.
    /// 1 for an observed predecessor, exactly 0 for a degenerate one.
    ///
    pub fn outgoing_sum(&self, current: StateId) -> Prob {
        (0..self.n_states).map(|next| self.prob(next, current)).sum()
    }
}

impl std::fmt::Display for TransTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for next in 0..self.n_states {
            for current in 0..self.n_states {
                if current > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{}", self.prob(next, current))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::prob::p;
    use test_case::test_case;

    fn ab() -> Vocab {
        Vocab::new(b"AB".to_vec()).unwrap()
    }

    #[test]
    fn estimate_alternating() {
        // 3 adjacent pairs AB, BA, AB
        let t = TransTable::from_sequence(&ab(), b"ABAB");
        assert_eq!(t.prob(1, 0), p(1.0)); // P(B|A)
        assert_eq!(t.prob(0, 1), p(1.0)); // P(A|B)
        assert_eq!(t.prob(0, 0), p(0.0)); // P(A|A)
        assert_eq!(t.prob(1, 1), p(0.0)); // P(B|B)
    }
    #[test]
    fn estimate_degenerate_row() {
        // B never occurs as a predecessor: all-zero outgoing column
        let t = TransTable::from_sequence(&ab(), b"AAAA");
        assert_eq!(t.prob(0, 0), p(1.0));
        assert_eq!(t.prob(1, 0), p(0.0));
        assert_eq!(t.prob(0, 1), p(0.0));
        assert_eq!(t.prob(1, 1), p(0.0));
        assert!(t.outgoing_sum(1).is_zero());
    }
    #[test]
    fn estimate_overlapping_counts() {
        // AAB: pairs AA and AB both start at an A, denominator 2
        let t = TransTable::from_sequence(&ab(), b"AAB");
        assert_abs_diff_eq!(t.prob(0, 0), p(0.5));
        assert_abs_diff_eq!(t.prob(1, 0), p(0.5));
    }
    #[test]
    fn estimate_ignores_foreign_successor_pairs() {
        // X is outside the vocabulary: AX still counts toward A's
        // denominator, the XB pair contributes nothing
        let t = TransTable::from_sequence(&ab(), b"ABAXB");
        // pairs: AB, BA, AX, XB -> A seen twice as predecessor
        assert_abs_diff_eq!(t.prob(1, 0), p(0.5)); // P(B|A) = 1/2
        assert_abs_diff_eq!(t.prob(0, 1), p(1.0)); // P(A|B) = 1/1
        assert!(t.outgoing_sum(0) < p(1.0));
    }
    #[test_case(b"ABAB" ; "alternating")]
    #[test_case(b"AABBA" ; "mixed")]
    #[test_case(b"BBBBBA" ; "b heavy")]
    fn estimate_rows_are_stochastic(seq: &'static [u8]) {
        // every observed predecessor gets a probability-1 column
        let t = TransTable::from_sequence(&ab(), seq);
        for current in 0..t.n_states() {
            assert_abs_diff_eq!(t.outgoing_sum(current), p(1.0), epsilon = 1e-12);
        }
    }
    #[test]
    fn empty_and_single_symbol_sequences() {
        // no adjacent pair at all: everything degenerate
        let t = TransTable::from_sequence(&ab(), b"A");
        assert!(t.outgoing_sum(0).is_zero());
        assert!(t.outgoing_sum(1).is_zero());
        let t = TransTable::from_sequence(&ab(), b"");
        assert_eq!(t, TransTable::zero(2));
    }
}
