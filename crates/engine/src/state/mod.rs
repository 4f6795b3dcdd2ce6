//! Canonical system states and their sufficient statistics.
//!
//! - `counts` — Owned `(M, K)` integer counter matrices
//! - `state` — The four-matrix state with cached time step and depth
//! - `key` — Fixed-width canonical serialization for dedup maps

mod counts;
mod key;
mod state;

pub use counts::*;
pub use key::*;
pub use state::*;
