use crate::*;
use serde::Serialize;

/// A serializable summary of one exploration's leaf distribution.
///
/// Probabilities are rendered through `Display` so one report shape covers
/// floating, rational, and symbolic scalars alike.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub depth: u32,
    pub players: Vec<String>,
    pub means: Vec<String>,
    pub leaves: Vec<Leaf>,
}

/// One unique leaf of the exploration with its total probability mass.
#[derive(Debug, Clone, Serialize)]
pub struct Leaf {
    pub probability: String,
    pub t: u64,
    pub sensing_successes: Counts,
    pub sensing_trials: Counts,
    pub transmission_successes: Counts,
    pub transmission_trials: Counts,
    pub absorbing: bool,
}

impl Report {
    pub fn new<S>(depth: u32, players: &[Policy], means: Vec<String>, leaves: &[(State, S)]) -> Self
    where
        S: Scalar,
    {
        Self {
            depth,
            players: players.iter().map(|policy| policy.to_string()).collect(),
            means,
            leaves: leaves
                .iter()
                .map(|(state, mass)| Leaf {
                    probability: mass.to_string(),
                    t: state.t(),
                    sensing_successes: state.sensing_successes().clone(),
                    sensing_trials: state.sensing_trials().clone(),
                    transmission_successes: state.transmission_successes().clone(),
                    transmission_trials: state.transmission_trials().clone(),
                    absorbing: state.is_absorbing(),
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} unique leaves at depth {} for players [{}] on means [{}]",
            self.leaves.len(),
            self.depth,
            self.players.join(", "),
            self.means.join(", "),
        )?;
        for (i, leaf) in self.leaves.iter().enumerate() {
            let stem = if i == self.leaves.len() - 1 { "└" } else { "├" };
            let gaps = if i == self.leaves.len() - 1 { " " } else { "│" };
            writeln!(
                f,
                "{}── p = {}{}",
                stem,
                leaf.probability,
                if leaf.absorbing { "  (absorbing)" } else { "" },
            )?;
            writeln!(f, "{}     t      = {}", gaps, leaf.t)?;
            writeln!(f, "{}     S      = {}", gaps, leaf.sensing_successes)?;
            writeln!(f, "{}     Stilde = {}", gaps, leaf.transmission_successes)?;
            writeln!(f, "{}     N      = {}", gaps, leaf.sensing_trials)?;
            writeln!(f, "{}     Ntilde = {}", gaps, leaf.transmission_trials)?;
        }
        Ok(())
    }
}
