//! One-step transition enumeration with exact probabilities.
//!
//! A transition combines one decision profile (one arm choice per player,
//! drawn from each player's candidate tie set) with one outcome profile
//! (one Bernoulli draw per arm). Both dimensions are enumerated
//! exhaustively and materialized eagerly as frozen [`Delta`] values — no
//! closures capturing live loop state — so each delta can be applied to an
//! independent copy of the parent at any later point.

use crate::*;
use banditree_core::*;

/// One frozen joint transition: an arm choice per player and a success
/// flag per arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    choices: Box<[Arm]>,
    outcomes: Box<[bool]>,
}

impl Delta {
    /// The arm chosen by each player this step.
    pub fn choices(&self) -> &[Arm] {
        &self.choices
    }
    /// The Bernoulli draw of each arm this step.
    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }
    /// Apply this transition to an independent copy of `state`.
    ///
    /// Every player's chosen arm counts one sensing trial with its arm's
    /// outcome; the collision-free statistics update only where the arm
    /// was chosen by exactly one player.
    pub fn apply(&self, state: &State) -> State {
        let mut next = state.clone();
        next.advance();
        for (player, &arm) in self.choices.iter().enumerate() {
            let alone = self.choices.iter().filter(|&&choice| choice == arm).count() == 1;
            next.record(player, arm, self.outcomes[arm], alone);
        }
        next
    }
}

/// Enumerate every (transition, probability) pair leaving `state`.
///
/// The weight of a pair is the product over arms of `mu` (success) or
/// `1 - mu` (failure), divided by the number of decision profiles: ties
/// are modeled as resolved by uniform random tie-breaking among
/// equally-good decisions.
pub fn deltas<S>(state: &State, players: &[Policy], mus: &[S]) -> Vec<(Delta, S)>
where
    S: Scalar,
{
    assert!(
        players.len() == state.players(),
        "one decision rule per player"
    );
    assert!(mus.len() == state.arms(), "one mean per arm");
    let candidates = players
        .iter()
        .enumerate()
        .map(|(player, policy)| policy.decide(player, state))
        .collect::<Vec<_>>();
    let profiles = cartesian(&candidates);
    let arms = state.arms();
    let mut all = Vec::with_capacity(profiles.len() << arms);
    for choices in &profiles {
        for flips in 0u64..1 << arms {
            let outcomes = (0..arms).map(|arm| flips >> arm & 1 == 1).collect::<Vec<_>>();
            let weight = outcomes
                .iter()
                .zip(mus)
                .map(|(&success, mu)| if success { mu.clone() } else { mu.complement() })
                .fold(S::one(), |product, factor| product.mul(&factor))
                .scale_down(profiles.len());
            all.push((
                Delta {
                    choices: choices.clone().into_boxed_slice(),
                    outcomes: outcomes.into_boxed_slice(),
                },
                weight,
            ));
        }
    }
    all
}

/// The Cartesian product of each player's candidate set, in player-major
/// lexicographic order.
fn cartesian(candidates: &[Vec<Arm>]) -> Vec<Vec<Arm>> {
    candidates.iter().fold(vec![Vec::new()], |profiles, set| {
        profiles
            .iter()
            .flat_map(|prefix| {
                set.iter().map(|&arm| {
                    let mut profile = prefix.clone();
                    profile.push(arm);
                    profile
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cartesian_counts_profiles() {
        let profiles = cartesian(&[vec![0, 1], vec![0, 1, 2]]);
        assert_eq!(profiles.len(), 6);
        assert_eq!(profiles[0], vec![0, 0]);
        assert_eq!(profiles[5], vec![1, 2]);
    }

    #[test]
    fn exhaustive_enumeration() {
        // cold 2x2 root: 2x2 decision profiles, 4 outcome profiles each
        let state = State::root(2, 2, 1);
        let players = vec![Policy::default(); 2];
        let all = deltas(&state, &players, &[0.8, 0.2]);
        assert_eq!(all.len(), 4 * 4);
        let total = all
            .iter()
            .map(|(_, p)| p)
            .fold(0., |sum, p| Scalar::add(&sum, p));
        assert!(total.is_one(), "weights must sum to 1: {}", total);
    }

    #[test]
    fn monotonic_statistics() {
        let state = State::root(2, 2, 1);
        let players = vec![Policy::default(); 2];
        for (delta, _) in deltas(&state, &players, &[0.8, 0.2]) {
            let next = delta.apply(&state);
            assert_eq!(next.t(), state.t() + 1);
            assert_eq!(next.depth(), state.depth() - 1);
            for (player, &arm) in delta.choices().iter().enumerate() {
                let grew = next.sensing_trials().at(player, arm)
                    - state.sensing_trials().at(player, arm);
                assert_eq!(grew, 1, "chosen arm counts exactly one trial");
                let s = next.sensing_successes().at(player, arm)
                    - state.sensing_successes().at(player, arm);
                assert_eq!(s, delta.outcomes()[arm] as u32);
            }
        }
    }

    #[test]
    fn collisions_freeze_transmission_statistics() {
        let state = State::root(2, 2, 1);
        let collide = Delta {
            choices: vec![0, 0].into_boxed_slice(),
            outcomes: vec![true, false].into_boxed_slice(),
        };
        let next = collide.apply(&state);
        assert_eq!(next.sensing_successes().at(0, 0), 1);
        assert_eq!(next.sensing_successes().at(1, 0), 1);
        assert_eq!(next.transmission_trials().at(0, 0), 0);
        assert_eq!(next.transmission_trials().at(1, 0), 0);
    }

    #[test]
    fn lone_choices_receive_transmission_feedback() {
        let state = State::root(2, 2, 1);
        let apart = Delta {
            choices: vec![0, 1].into_boxed_slice(),
            outcomes: vec![true, true].into_boxed_slice(),
        };
        let next = apart.apply(&state);
        assert_eq!(next.transmission_successes().at(0, 0), 1);
        assert_eq!(next.transmission_successes().at(1, 1), 1);
        assert_eq!(next.transmission_trials().at(0, 0), 1);
        assert_eq!(next.transmission_trials().at(1, 1), 1);
    }

    #[test]
    fn tie_break_weighting_is_uniform() {
        // symbolic means: each of the 4 cold-start profiles carries 1/4
        let state = State::root(2, 2, 1);
        let players = vec![Policy::default(); 2];
        let mus = vec![Poly::var(0), Poly::var(1)];
        let all = deltas(&state, &players, &mus);
        assert_eq!(all.len(), 16);
        let p = Poly::var(0);
        let q = Poly::var(1);
        let both = p.mul(&q).scale_down(4);
        let success = all
            .iter()
            .filter(|(delta, _)| delta.outcomes().iter().all(|&b| b))
            .map(|(_, w)| w.clone())
            .collect::<Vec<_>>();
        assert_eq!(success.len(), 4);
        assert!(success.iter().all(|w| *w == both));
    }
}
