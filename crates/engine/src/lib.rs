//! Exact tree exploration for multi-player stochastic bandits.
//!
//! Models the evolution of a multi-player bandit game as an explicit,
//! enumerable Markov process and computes the distribution over all
//! reachable states after a bounded number of steps — by brute-force
//! enumeration with exact probabilities, not Monte-Carlo simulation.
//!
//! # Module Structure
//!
//! - `scalar` — Probability representations (float, exact rational, symbolic)
//! - `state` — Statistics matrices, canonical states, dedup keys
//! - `policy` — Memoryless decision rules (greedy, UCB, KL-UCB)
//! - `transition` — Joint decision/outcome enumeration with exact weights
//! - `tree` — Deduplicating depth-bounded exploration tree
//! - `explore` — Driver surface: validation, root construction, reporting
//! - `sim` — Boundary contracts for the external simulation harness

mod explore;
mod policy;
mod scalar;
mod sim;
mod state;
mod transition;
mod tree;

pub use explore::*;
pub use policy::*;
pub use scalar::*;
pub use sim::*;
pub use state::*;
pub use transition::*;
pub use tree::*;
