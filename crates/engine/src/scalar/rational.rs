use crate::*;

/// An exact rational probability, always stored reduced with a positive
/// denominator.
///
/// Covers the `Fraction`-style exact arithmetic the engine supports for
/// concrete arm means: transition weights stay exact through arbitrarily
/// many merges, so probability conservation is checked with `==` rather
/// than a floating tolerance.
///
/// The i128 backing is ample for the supported exploration bounds; on the
/// order of `2^(K * depth)` distinct denominators multiply together before
/// reduction. Arithmetic is checked: an overflow panics instead of
/// silently wrapping into a corrupt probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i128,
    den: i128,
}

impl Rational {
    /// A reduced fraction `num / den`. Panics if `den == 0`.
    pub fn new(num: i128, den: i128) -> Self {
        assert!(den != 0, "rational denominator must be nonzero");
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()).max(1) as i128;
        Self {
            num: sign * num / g,
            den: sign * den / g,
        }
    }
    pub fn numer(&self) -> i128 {
        self.num
    }
    pub fn denom(&self) -> i128 {
        self.den
    }
    /// Floating approximation, for reporting only.
    pub fn approx(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Scalar for Rational {
    fn zero() -> Self {
        Self::new(0, 1)
    }
    fn one() -> Self {
        Self::new(1, 1)
    }
    fn ratio(num: u64, den: u64) -> Self {
        Self::new(num as i128, den as i128)
    }
    fn add(&self, rhs: &Self) -> Self {
        let num = self
            .num
            .checked_mul(rhs.den)
            .zip(rhs.num.checked_mul(self.den))
            .and_then(|(a, b)| a.checked_add(b))
            .expect("rational addition overflowed i128");
        let den = self
            .den
            .checked_mul(rhs.den)
            .expect("rational addition overflowed i128");
        Self::new(num, den)
    }
    fn mul(&self, rhs: &Self) -> Self {
        let num = self
            .num
            .checked_mul(rhs.num)
            .expect("rational product overflowed i128");
        let den = self
            .den
            .checked_mul(rhs.den)
            .expect("rational product overflowed i128");
        Self::new(num, den)
    }
    fn complement(&self) -> Self {
        Self::new(self.den - self.num, self.den)
    }
    fn scale_down(&self, n: usize) -> Self {
        assert!(n != 0, "cannot scale down by zero profiles");
        let den = self
            .den
            .checked_mul(n as i128)
            .expect("rational scaling overflowed i128");
        Self::new(self.num, den)
    }
    fn is_one(&self) -> bool {
        self.num == 1 && self.den == 1
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
