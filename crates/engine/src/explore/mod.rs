//! Driver surface: validated construction, exploration, and reporting.
//!
//! A thin orchestration layer over the engine. Validates problem
//! parameters at the boundary (the guard rails are a safety valve against
//! combinatorial blow-up, not an engine contract), builds the root state,
//! runs the exploration, and reports the unique-leaf distribution.

mod means;
mod report;

pub use means::*;
pub use report::*;

use crate::*;
use anyhow::Context;
use anyhow::Result;
use anyhow::ensure;
use banditree_core::*;
use std::sync::Arc;

/// Everything the exploration produced: the expanded tree and the
/// deduplicated distribution over its leaves.
pub struct Outcome<S>
where
    S: Scalar,
{
    pub tree: Tree<S>,
    pub leaves: Vec<(State, S)>,
}

/// Builder for one complete tree exploration.
///
/// Defaults: 2 players, 2 arms, depth 1, every player on the greedy
/// weighted-feedback rule, cold (all-zero) start. Arm means must be
/// supplied; player and arm counts may instead be inferred from
/// warm-start statistics.
pub struct Exploration<S>
where
    S: Scalar,
{
    players: Vec<Policy>,
    mus: Vec<S>,
    depth: u32,
    start: Option<[Counts; 4]>,
}

impl<S> Exploration<S>
where
    S: Scalar,
{
    /// An exploration of `players` x `arms` with the given arm means,
    /// all players on the default rule.
    pub fn new(players: usize, mus: Vec<S>) -> Self {
        Self {
            players: vec![Policy::default(); players],
            mus,
            depth: 1,
            start: None,
        }
    }
    /// An exploration resumed from explicit statistics matrices
    /// `(S, Stilde, N, Ntilde)`, with the player count inferred from their
    /// rows. The arm count still comes from `mus` and must match their
    /// columns, which [`run`](Self::run) enforces.
    pub fn resume(mus: Vec<S>, s: Counts, stilde: Counts, n: Counts, ntilde: Counts) -> Self {
        Self {
            players: vec![Policy::default(); s.players()],
            mus,
            depth: 1,
            start: Some([s, stilde, n, ntilde]),
        }
    }
    /// Replace every player's decision rule.
    pub fn rule(mut self, policy: Policy) -> Self {
        self.players = vec![policy; self.players.len()];
        self
    }
    /// Set per-player decision rules explicitly.
    pub fn rules(mut self, players: Vec<Policy>) -> Self {
        self.players = players;
        self
    }
    /// Set the exploration depth.
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
    /// Start from explicit statistics matrices `(S, Stilde, N, Ntilde)`
    /// instead of the all-zero state.
    pub fn warm_start(mut self, s: Counts, stilde: Counts, n: Counts, ntilde: Counts) -> Self {
        self.start = Some([s, stilde, n, ntilde]);
        self
    }

    /// Validate the configuration, run the exploration to the requested
    /// depth, and collect the unique-leaf distribution.
    pub fn run(self) -> Result<Outcome<S>> {
        let players = self.players.len();
        let arms = self.mus.len();
        ensure!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&players) && players <= arms && arms <= MAX_ARMS,
            "only {} <= M <= K <= {} is supported, got M = {}, K = {}",
            MIN_PLAYERS,
            MAX_ARMS,
            players,
            arms
        );
        ensure!(
            self.depth <= MAX_DEPTH,
            "only 0 <= depth <= {} is supported, got {}",
            MAX_DEPTH,
            self.depth
        );
        if let Some([s, stilde, n, ntilde]) = &self.start {
            ensure!(
                [s, stilde, n, ntilde]
                    .iter()
                    .all(|m| m.shape() == (players, arms)),
                "warm-start statistics must be ({}, {}) matrices",
                players,
                arms
            );
        }
        let root = match self.start {
            Some([s, stilde, n, ntilde]) => State::new(s, stilde, n, ntilde, self.depth),
            None => State::root(players, arms, self.depth),
        };
        log::info!(
            "exploring every transition up to depth {} from root:\n{}",
            self.depth,
            root
        );
        for (player, policy) in self.players.iter().enumerate() {
            log::info!("player {}/{} uses {}", player + 1, players, policy);
        }
        for (arm, mu) in self.mus.iter().enumerate() {
            log::info!("arm {}/{} has mean {}", arm + 1, arms, mu);
        }
        let config = Arc::new(Config {
            mus: self.mus,
            players: self.players,
        });
        let mut tree = Tree::seed(root, config);
        tree.explore();
        let leaves = tree.distribution();
        log::info!("{} unique leaves at depth {}", leaves.len(), self.depth);
        for (leaf, proba) in &leaves {
            log::debug!("leaf with probability {}:\n{}", proba, leaf);
            if leaf.is_absorbing() {
                log::info!("absorbing leaf found:\n{}", leaf);
            }
        }
        Ok(Outcome { tree, leaves })
    }

    /// Run and render the leaf distribution as a serializable report.
    pub fn report(self) -> Result<Report> {
        let depth = self.depth;
        let players = self.players.clone();
        let mus = self.mus.iter().map(|mu| mu.to_string()).collect();
        let outcome = self.run().context("exploration failed")?;
        Ok(Report::new(depth, &players, mus, &outcome.leaves))
    }
}
