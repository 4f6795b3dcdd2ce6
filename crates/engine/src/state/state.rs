use crate::*;
use banditree_core::*;

/// The system configuration at one discrete time step.
///
/// Owns its four statistics matrices outright — every state is built from
/// an independent copy of its parent's counters, so mutation during a
/// transition never aliases another node. Shared configuration (arm means,
/// decision rules) deliberately lives elsewhere, behind a read-only handle
/// on the exploration tree.
///
/// Matrices, following the cognitive-radio feedback model:
///
/// - `S` — cumulative sensing successes
/// - `N` — cumulative sensing trials
/// - `Stilde` — successes observed without collision
/// - `Ntilde` — trials without collision
///
/// `t` is derived (`t = sum(N)`) and cached at construction; `depth` counts
/// exploration steps remaining below this node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    s: Counts,
    stilde: Counts,
    n: Counts,
    ntilde: Counts,
    t: u64,
    depth: u32,
}

impl State {
    /// A state with the given statistics. All four matrices must share one
    /// `(M, K)` shape; a mismatch is a caller bug and fails fast.
    pub fn new(s: Counts, stilde: Counts, n: Counts, ntilde: Counts, depth: u32) -> Self {
        assert!(
            s.shape() == stilde.shape() && s.shape() == n.shape() && s.shape() == ntilde.shape(),
            "statistics matrices S, Stilde, N, Ntilde must share one shape"
        );
        let t = n.total();
        Self {
            s,
            stilde,
            n,
            ntilde,
            t,
            depth,
        }
    }
    /// The all-zero root state for `players` x `arms`, with `depth` steps
    /// of exploration ahead of it.
    pub fn root(players: usize, arms: usize, depth: u32) -> Self {
        Self::new(
            Counts::zeros(players, arms),
            Counts::zeros(players, arms),
            Counts::zeros(players, arms),
            Counts::zeros(players, arms),
            depth,
        )
    }
    pub fn players(&self) -> usize {
        self.s.players()
    }
    pub fn arms(&self) -> usize {
        self.s.arms()
    }
    /// Current time step, equal to the sum of all sensing trials.
    pub fn t(&self) -> u64 {
        self.t
    }
    /// Exploration steps remaining below this node.
    pub fn depth(&self) -> u32 {
        self.depth
    }
    /// `S`: cumulative sensing successes.
    pub fn sensing_successes(&self) -> &Counts {
        &self.s
    }
    /// `N`: cumulative sensing trials.
    pub fn sensing_trials(&self) -> &Counts {
        &self.n
    }
    /// `Stilde`: successes observed without collision.
    pub fn transmission_successes(&self) -> &Counts {
        &self.stilde
    }
    /// `Ntilde`: trials without collision.
    pub fn transmission_trials(&self) -> &Counts {
        &self.ntilde
    }

    /// Record one step for `player` on `arm`: a sensing trial with outcome
    /// `success`, counted collision-free iff `alone`.
    pub(crate) fn record(&mut self, player: Player, arm: Arm, success: bool, alone: bool) {
        self.s.add(player, arm, success as u32);
        self.n.add(player, arm, 1);
        if alone {
            self.stilde.add(player, arm, success as u32);
            self.ntilde.add(player, arm, 1);
        }
    }
    /// Advance the cached time step and consume one unit of depth.
    pub(crate) fn advance(&mut self) {
        self.t += 1;
        self.depth = self.depth.checked_sub(1).expect("cannot step below depth 0");
    }

    /// Best-effort detection of a settled, non-exploring configuration.
    ///
    /// Returns true when every (player, arm) pair has been tried at least
    /// once and some pair of players carries identical rows in all four
    /// matrices while that row's `S` values are pairwise distinct across
    /// arms — read as a stable round-robin allocation with no exploration
    /// pressure left. A heuristic diagnostic, not a proof of absorption.
    pub fn is_absorbing(&self) -> bool {
        if self.n.min() < 1 {
            return false;
        }
        for j1 in 0..self.players() {
            for j2 in j1 + 1..self.players() {
                let twins = [&self.s, &self.stilde, &self.n, &self.ntilde]
                    .iter()
                    .all(|m| m.row(j1) == m.row(j2));
                if twins && all_distinct(self.s.row(j1)) {
                    return true;
                }
            }
        }
        false
    }
}

fn all_distinct(row: &[u32]) -> bool {
    let mut seen = row.to_vec();
    seen.sort_unstable();
    seen.windows(2).all(|w| w[0] != w[1])
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "State : M = {}, K = {}, t = {}, depth = {}",
            self.players(),
            self.arms(),
            self.t,
            self.depth
        )?;
        writeln!(f, "  S      = {}", self.s)?;
        writeln!(f, "  Stilde = {}", self.stilde)?;
        writeln!(f, "  N      = {}", self.n)?;
        write!(f, "  Ntilde = {}", self.ntilde)
    }
}
