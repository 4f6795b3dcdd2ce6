//! Probability representations behind one numeric-capability interface.
//!
//! The engine never commits to a number type: transition weights are
//! combined through [`Scalar`] so the same exploration runs with floating
//! probabilities, exact rationals, or symbolic polynomials over free
//! arm-mean variables.

mod poly;
mod rational;

pub use poly::*;
pub use rational::*;

use banditree_core::*;

/// The numeric capabilities the exploration engine needs from a
/// probability representation.
///
/// Implementations must form a commutative semiring on `[0, 1]` with
/// `complement` as `1 - x`. Division only ever happens by a positive
/// integer (the uniform tie-break weighting), so no general inverse is
/// required.
///
/// # Implementations
///
/// - `f64` — floating probabilities, tolerance-checked conservation
/// - [`Rational`] — exact fractions, exact conservation
/// - [`Poly`] — polynomials in free arm means, exact conservation
pub trait Scalar
where
    Self: Clone + PartialEq,
    Self: std::fmt::Debug + std::fmt::Display,
    Self: Send + Sync,
{
    /// Additive identity.
    fn zero() -> Self;
    /// Multiplicative identity.
    fn one() -> Self;
    /// The exact ratio `num / den`. Panics if `den == 0`.
    fn ratio(num: u64, den: u64) -> Self;
    /// Sum of two probability masses.
    fn add(&self, rhs: &Self) -> Self;
    /// Product of two probability masses.
    fn mul(&self, rhs: &Self) -> Self;
    /// `1 - self`, the failure probability of a Bernoulli draw.
    fn complement(&self) -> Self;
    /// Divide by a positive integer count of tied decision profiles.
    fn scale_down(&self, n: usize) -> Self;
    /// Whether this mass equals 1, within representation tolerance.
    fn is_one(&self) -> bool;
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.
    }
    fn one() -> Self {
        1.
    }
    fn ratio(num: u64, den: u64) -> Self {
        assert!(den != 0, "ratio denominator must be positive");
        num as f64 / den as f64
    }
    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }
    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }
    fn complement(&self) -> Self {
        1. - self
    }
    fn scale_down(&self, n: usize) -> Self {
        assert!(n != 0, "cannot scale down by zero profiles");
        self / n as f64
    }
    fn is_one(&self) -> bool {
        (self - 1.).abs() < PROBA_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_semiring() {
        let half = f64::ratio(1, 2);
        assert!(Scalar::add(&half, &half).is_one());
        assert_eq!(Scalar::mul(&half, &half), 0.25);
        assert_eq!(half.complement(), 0.5);
        assert_eq!(<f64 as Scalar>::one().scale_down(4), 0.25);
    }

    #[test]
    fn float_tolerance() {
        let third = f64::ratio(1, 3);
        assert!(Scalar::add(&Scalar::add(&third, &third), &third).is_one());
    }
}
