//! Core type aliases, constants, and runtime utilities for banditree.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the banditree workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Index of one arm (channel) in `0..K`.
pub type Arm = usize;
/// Index of one player in `0..M`.
pub type Player = usize;
/// Floating transition and leaf probabilities.
pub type Probability = f64;
/// Index values computed by decision rules (empirical means, UCBs).
pub type Utility = f64;

// ============================================================================
// EXPLORATION GUARD RAILS
// Driver-boundary safety valve against combinatorial blow-up. The engine
// itself has no hard upper bound, only exponential cost.
// ============================================================================
/// Minimum number of players supported by the driver.
pub const MIN_PLAYERS: usize = 1;
/// Maximum number of players supported by the driver.
pub const MAX_PLAYERS: usize = 10;
/// Maximum number of arms supported by the driver.
pub const MAX_ARMS: usize = 10;
/// Maximum exploration depth supported by the driver.
pub const MAX_DEPTH: u32 = 5;

// ============================================================================
// DECISION RULE PARAMETERS
// Shared by the selfish UCB and KL-UCB index families.
// ============================================================================
/// Exploration strength in the UCB bonus `sqrt(alpha * ln(t) / n)`.
pub const UCB_ALPHA: Utility = 0.5;
/// Scale of the KL-UCB exploration budget `c * ln(t) / n`.
pub const KLUCB_SCALE: Utility = 1.0;
/// Bisection stopping width for the Bernoulli KL-UCB index.
pub const KLUCB_TOLERANCE: Utility = 1e-6;
/// Clamp keeping Bernoulli KL divergence arguments inside (0, 1).
pub const KL_EPSILON: Utility = 1e-15;

// ============================================================================
// PROBABILITY BOOKKEEPING
// ============================================================================
/// Tolerance for floating probability-conservation assertions.
pub const PROBA_TOLERANCE: Probability = 1e-9;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
