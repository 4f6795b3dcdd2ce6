//! Memoryless decision rules for selfish multi-player bandit play.
//!
//! - `kullback` — Bernoulli KL divergence and its UCB inversion
//! - `policy` — The decision-rule contract and its variants

mod kullback;
mod policy;

pub use kullback::*;
pub use policy::*;
