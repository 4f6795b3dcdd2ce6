use crate::*;
use banditree_core::Arm;
use std::collections::BTreeMap;

/// One product of arm-mean variables, as a map from variable index to
/// exponent. The empty monomial is the constant term.
type Monomial = BTreeMap<Arm, u32>;

/// A symbolic probability: a multivariate polynomial in free arm-mean
/// variables `mu_1, ..., mu_K` with exact [`Rational`] coefficients.
///
/// The sympy analog of the engine's exact mode. Sums and products expand
/// into canonical form eagerly, so structural equality is mathematical
/// equality and probability conservation reduces to the polynomial
/// literally being the constant 1 — e.g. summing the weights of all
/// `2^K` outcome profiles expands `prod_k (mu_k + (1 - mu_k))` down to 1
/// with no tolerance involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    terms: BTreeMap<Monomial, Rational>,
}

impl Poly {
    /// The free variable `mu_k` for arm `k` (displayed 1-based as in the
    /// literature).
    pub fn var(k: Arm) -> Self {
        Self {
            terms: BTreeMap::from([(Monomial::from([(k, 1)]), Rational::one())]),
        }
    }
    /// A constant polynomial.
    pub fn constant(c: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if c != Rational::zero() {
            terms.insert(Monomial::new(), c);
        }
        Self { terms }
    }
    /// Substitute concrete means for every variable.
    pub fn eval(&self, mus: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(m, c)| {
                m.iter()
                    .map(|(&k, &e)| mus[k].powi(e as i32))
                    .product::<f64>()
                    * c.approx()
            })
            .sum()
    }
    fn accumulate(terms: &mut BTreeMap<Monomial, Rational>, monomial: Monomial, coeff: Rational) {
        let sum = terms
            .get(&monomial)
            .copied()
            .unwrap_or(Rational::zero())
            .add(&coeff);
        if sum == Rational::zero() {
            terms.remove(&monomial);
        } else {
            terms.insert(monomial, sum);
        }
    }
}

impl Scalar for Poly {
    fn zero() -> Self {
        Self::constant(Rational::zero())
    }
    fn one() -> Self {
        Self::constant(Rational::one())
    }
    fn ratio(num: u64, den: u64) -> Self {
        Self::constant(Rational::ratio(num, den))
    }
    fn add(&self, rhs: &Self) -> Self {
        let mut terms = self.terms.clone();
        for (m, c) in &rhs.terms {
            Self::accumulate(&mut terms, m.clone(), *c);
        }
        Self { terms }
    }
    fn mul(&self, rhs: &Self) -> Self {
        let mut terms = BTreeMap::new();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                let mut m = ma.clone();
                for (&k, &e) in mb {
                    *m.entry(k).or_insert(0) += e;
                }
                Self::accumulate(&mut terms, m, ca.mul(cb));
            }
        }
        Self { terms }
    }
    fn complement(&self) -> Self {
        let minus = Rational::new(-1, 1);
        let mut terms = BTreeMap::new();
        Self::accumulate(&mut terms, Monomial::new(), Rational::one());
        for (m, c) in &self.terms {
            Self::accumulate(&mut terms, m.clone(), c.mul(&minus));
        }
        Self { terms }
    }
    fn scale_down(&self, n: usize) -> Self {
        assert!(n != 0, "cannot scale down by zero profiles");
        Self {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), c.scale_down(n)))
                .collect(),
        }
    }
    fn is_one(&self) -> bool {
        *self == Self::one()
    }
}

impl std::fmt::Display for Poly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (m, c)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if m.is_empty() || *c != Rational::one() {
                write!(f, "{}", c)?;
                if !m.is_empty() {
                    write!(f, "*")?;
                }
            }
            for (j, (&k, &e)) in m.iter().enumerate() {
                if j > 0 {
                    write!(f, "*")?;
                }
                match e {
                    1 => write!(f, "mu_{}", k + 1)?,
                    _ => write!(f, "mu_{}^{}", k + 1, e)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neg(x: &Poly) -> Poly {
        x.mul(&Poly::constant(Rational::new(-1, 1)))
    }

    #[test]
    fn outcome_weights_sum_to_one() {
        // prod_k (mu_k + (1 - mu_k)) expands exactly to 1 for K = 3
        let mut total = Poly::zero();
        for mask in 0u32..8 {
            let mut w = Poly::one();
            for k in 0..3 {
                let mu = Poly::var(k);
                w = w.mul(&if mask >> k & 1 == 1 { mu } else { mu.complement() });
            }
            total = total.add(&w);
        }
        assert!(total.is_one());
    }

    #[test]
    fn expansion_is_canonical() {
        // (1 - p)(1 - q) == 1 - p - q + pq regardless of construction order
        let p = Poly::var(0);
        let q = Poly::var(1);
        let lhs = p.complement().mul(&q.complement());
        let rhs = Poly::one().add(&neg(&p)).add(&neg(&q)).add(&p.mul(&q));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn substitution() {
        let p = Poly::var(0);
        let expr = p.mul(&p).add(&p.complement().scale_down(2));
        let direct = 0.3f64 * 0.3 + (1. - 0.3) / 2.;
        assert!((expr.eval(&[0.3]) - direct).abs() < 1e-12);
    }

    #[test]
    fn display() {
        let p = Poly::var(0);
        assert_eq!(p.to_string(), "mu_1");
        assert_eq!(p.complement().to_string(), "1 + -1*mu_1");
        assert_eq!(p.mul(&p).scale_down(2).to_string(), "1/2*mu_1^2");
    }
}
