//!
//! sampling of hidden paths and emitted observables from an estimated chain
//!
use crate::common::{Sequence, StateId, Symbol};
use crate::dist::StateDist;
use crate::engine::HmmModel;
use crate::prob::Prob;
use crate::trans::TransTable;
use log::trace;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// One sampled realization: the hidden path and the observables it
/// emitted. `observed` can be shorter than `hidden` when a state's
/// emission row is all-zero.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPath {
    pub hidden: Sequence,
    pub observed: Sequence,
}

/// weighted pick, `None` when every weight is zero
pub fn pick_with_prob<R: Rng, T: Copy>(rng: &mut R, choices: &[(T, Prob)]) -> Option<T> {
    choices
        .choose_weighted(rng, |item| item.1.to_value())
        .ok()
        .map(|item| item.0)
}

///
/// Sample a hidden path of up to `length` steps and its emissions,
/// deterministically per seed.
///
/// The starting state is drawn from `init`; each step first emits an
/// observable from the current state's emission column, then moves
/// along the transition table. A degenerate state (all-zero outgoing
/// column, i.e. never seen as a predecessor during estimation) ends
/// the path early.
///
pub fn sample(
    model: &HmmModel,
    trans: &TransTable,
    init: &StateDist,
    length: usize,
    seed: u64,
) -> SampledPath {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut hidden: Sequence = Vec::new();
    let mut observed: Sequence = Vec::new();

    let init_choices: Vec<(StateId, Prob)> = init.iter().collect();
    let mut current = match pick_with_prob(&mut rng, &init_choices) {
        Some(state) => state,
        None => {
            return SampledPath { hidden, observed };
        }
    };

    for i in 0..length {
        trace!("iter {} state {}", i, model.states().symbol(current) as char);
        hidden.push(model.states().symbol(current));

        // emission from the current state
        let emission_choices: Vec<(Symbol, Prob)> = model
            .observables()
            .iter()
            .map(|(observable, symbol)| (symbol, model.emission().prob(observable, current)))
            .collect();
        if let Some(symbol) = pick_with_prob(&mut rng, &emission_choices) {
            observed.push(symbol);
        }

        // transition to the next state
        let n = trans.n_states();
        let trans_choices: Vec<(StateId, Prob)> =
            (0..n).map(|next| (next, trans.prob(next, current))).collect();
        match pick_with_prob(&mut rng, &trans_choices) {
            Some(next) => current = next,
            None => break,
        }
    }
    SampledPath { hidden, observed }
}

//
// tests
//
