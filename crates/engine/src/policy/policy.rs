use crate::*;
use banditree_core::*;
use serde::Serialize;

/// Which statistics a selfish index rule feeds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feedback {
    /// `U` — raw sensing estimate `S / N`.
    Sensing,
    /// `Utilde` — collision-free estimate `Stilde / N`.
    Transmission,
    /// `Ubar` — sensing estimate weighted by the collision-free trial
    /// rate, `(Ntilde / N) * (S / N)`.
    Weighted,
}

/// A memoryless decision rule: a pure function of the player index and the
/// current state's sufficient statistics.
///
/// `decide` returns ALL arms attaining the maximal index — the tie set,
/// not one arbitrary pick. Preserving ties is load-bearing: it is what
/// produces branching in the decision dimension of the transition model.
/// Unexplored arms (`N < 1`) are forced to `+inf` so they are always
/// preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Policy {
    /// Diagnostic player that always targets one fixed arm.
    FixedArm(Arm),
    /// Diagnostic player that always targets every arm.
    UniformExploration,
    /// Selfish 0-greedy: play the empirical maximum.
    Greedy(Feedback),
    /// Selfish UCB with exploration strength [`UCB_ALPHA`].
    Ucb(Feedback),
    /// Selfish Bernoulli KL-UCB with budget scale [`KLUCB_SCALE`].
    KlUcb(Feedback),
}

impl Default for Policy {
    fn default() -> Self {
        Self::Greedy(Feedback::Weighted)
    }
}

impl Policy {
    /// The non-empty set of candidate arms for `player` in `state`.
    pub fn decide(&self, player: Player, state: &State) -> Vec<Arm> {
        let arms = state.arms();
        let candidates = match self {
            Self::FixedArm(arm) => {
                assert!(*arm < arms, "fixed arm {} out of range 0..{}", arm, arms);
                vec![*arm]
            }
            Self::UniformExploration => (0..arms).collect(),
            Self::Greedy(_) | Self::Ucb(_) | Self::KlUcb(_) => {
                ties(&(0..arms).map(|arm| self.index(player, arm, state)).collect::<Vec<_>>())
            }
        };
        assert!(!candidates.is_empty(), "decision rules must propose an arm");
        candidates
    }

    /// The index value of one arm, `+inf` while unexplored.
    fn index(&self, player: Player, arm: Arm, state: &State) -> Utility {
        let n = state.sensing_trials().at(player, arm);
        if n < 1 {
            return Utility::INFINITY;
        }
        let n = n as Utility;
        let t = state.t() as Utility;
        let estimate = match self.feedback() {
            Feedback::Sensing => state.sensing_successes().at(player, arm) as Utility / n,
            Feedback::Transmission => {
                state.transmission_successes().at(player, arm) as Utility / n
            }
            Feedback::Weighted => {
                (state.transmission_trials().at(player, arm) as Utility / n)
                    * (state.sensing_successes().at(player, arm) as Utility / n)
            }
        };
        match self {
            Self::Greedy(_) => estimate,
            Self::Ucb(_) => estimate + (UCB_ALPHA * t.ln() / n).sqrt(),
            Self::KlUcb(_) => klucb_bern(estimate, KLUCB_SCALE * t.ln() / n, KLUCB_TOLERANCE),
            _ => unreachable!("diagnostic rules have no index"),
        }
    }

    fn feedback(&self) -> Feedback {
        match self {
            Self::Greedy(feedback) | Self::Ucb(feedback) | Self::KlUcb(feedback) => *feedback,
            _ => unreachable!("diagnostic rules have no feedback"),
        }
    }
}

/// Positions attaining the maximum index. Exact comparison on purpose: ties
/// come from structurally identical formulas on identical counts.
fn ties(indexes: &[Utility]) -> Vec<Arm> {
    let best = indexes.iter().copied().fold(Utility::NEG_INFINITY, Utility::max);
    indexes
        .iter()
        .enumerate()
        .filter(|&(_, &index)| index == best)
        .map(|(arm, _)| arm)
        .collect()
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let feedback = |feedback: &Feedback| match feedback {
            Feedback::Sensing => "U",
            Feedback::Transmission => "Utilde",
            Feedback::Weighted => "Ubar",
        };
        match self {
            Self::FixedArm(arm) => write!(f, "FixedArm({})", arm),
            Self::UniformExploration => write!(f, "UniformExploration"),
            Self::Greedy(x) => write!(f, "Selfish-0Greedy-{}", feedback(x)),
            Self::Ucb(x) => write!(f, "Selfish-UCB-{}", feedback(x)),
            Self::KlUcb(x) => write!(f, "Selfish-KLUCB-{}", feedback(x)),
        }
    }
}
