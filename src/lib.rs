//! Complete tree exploration for multi-player stochastic bandits.
//!
//! This facade crate re-exports the workspace members for convenient access.
//!
//! ## Crate Organization
//!
//! - [`core`] — Type aliases, constants, and runtime utilities
//! - [`engine`] — The exact state-space exploration engine

pub use banditree_core as core;
pub use banditree_engine as engine;

// Re-export commonly used types at the root
pub use banditree_core::*;
pub use banditree_engine::*;
