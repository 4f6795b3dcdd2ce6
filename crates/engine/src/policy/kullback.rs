use banditree_core::*;

/// Kullback-Leibler divergence between Bernoulli distributions of means
/// `x` and `y`, with arguments clamped inside (0, 1).
pub fn kl_bern(x: Utility, y: Utility) -> Utility {
    let x = x.clamp(KL_EPSILON, 1. - KL_EPSILON);
    let y = y.clamp(KL_EPSILON, 1. - KL_EPSILON);
    x * (x / y).ln() + (1. - x) * ((1. - x) / (1. - y)).ln()
}

/// The Bernoulli KL-UCB index: the largest mean `q >= x` such that
/// `kl_bern(x, q) <= d`, found by bisection to within `precision`.
///
/// The initial upper bound is the Gaussian relaxation `x + sqrt(d / 2)`,
/// capped at 1 since a Bernoulli mean cannot exceed it.
pub fn klucb_bern(x: Utility, d: Utility, precision: Utility) -> Utility {
    let mut lower = x;
    let mut upper = (x + (d / 2.).sqrt()).min(1.);
    while upper - lower > precision {
        let q = (lower + upper) / 2.;
        if kl_bern(x, q) > d {
            upper = q;
        } else {
            lower = q;
        }
    }
    (lower + upper) / 2.
}
