//! Boundary contracts for the external Monte-Carlo simulation harness.
//!
//! The harness itself — repeated random playouts, parallel repetitions,
//! regret accumulation, plotting — lives outside this crate. What belongs
//! here is the contract its policies and arms must satisfy, and the
//! defensive raw-moment check shared with the engine's probability
//! bookkeeping. Each repetition runs on its own deep-copied policy and
//! environment, merged by summation at the end; the same per-branch
//! independence motif as the exploration tree.

use banditree_core::*;

/// A stateful sequential policy as the simulation harness drives it.
///
/// Unlike the engine's memoryless [`Policy`](crate::Policy) rules, a
/// sequential policy may keep arbitrary internal memory between steps.
pub trait SequentialPolicy {
    /// Reset internal state ahead of a fresh playout.
    fn start_game(&mut self);
    /// Choose the arm to play this step.
    fn choice(&mut self) -> Arm;
    /// Observe the reward of the arm just played.
    fn get_reward(&mut self, arm: Arm, reward: Utility);
}

/// One reward-generating arm of a simulated environment.
pub trait DrawableArm {
    /// Draw this arm's reward at time step `t`.
    fn draw(&mut self, t: u64) -> Utility;
}

/// The tuned variance estimate `V_k(t)` of UCB-V-Tuned, from per-arm raw
/// moments.
///
/// Asserts the raw-moment relationship `E[X^2] >= E[X]^2` before taking
/// the corrected value: a violation means the accumulated statistics were
/// corrupted upstream, which is fatal, not recoverable.
pub fn tuned_variance(rewards: Utility, squared: Utility, pulls: u32, t: u64) -> Utility {
    assert!(pulls >= 1, "variance needs at least one pull");
    let mean = rewards / pulls as Utility;
    let raw = squared / pulls as Utility;
    assert!(
        raw - mean * mean >= -PROBA_TOLERANCE,
        "raw second moment {} below squared mean {}: corrupted statistics",
        raw,
        mean * mean
    );
    (raw - mean * mean).max(0.) + (2. * (t as Utility).ln() / pulls as Utility).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_rewards_leave_only_the_correction() {
        // ten pulls of a constant 0.5 reward: empirical variance is zero
        let variance = tuned_variance(5., 2.5, 10, 100);
        let correction = (2. * 100f64.ln() / 10.).sqrt();
        assert!((variance - correction).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "corrupted statistics")]
    fn impossible_moments_fail_fast() {
        tuned_variance(10., 1., 10, 100);
    }
}
