use crate::*;
use rand::Rng;

/// The fully symbolic mean vector `mu_1, ..., mu_K`: work with free
/// variables and substitute concrete values *after* the exploration.
pub fn symbol_means(arms: usize) -> Vec<Poly> {
    (0..arms).map(Poly::var).collect()
}

/// A vector of `K` uniform random means in `[0, 1)`, when a concrete
/// random instance is wanted.
pub fn random_uniform_means(arms: usize) -> Vec<f64> {
    let mut rng = rand::rng();
    (0..arms).map(|_| rng.random_range(0.0..1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_distinct_free_variables() {
        let mus = symbol_means(3);
        assert_eq!(mus.len(), 3);
        assert_eq!(mus[0].to_string(), "mu_1");
        assert_eq!(mus[2].to_string(), "mu_3");
        assert_ne!(mus[0], mus[1]);
    }

    #[test]
    fn random_means_live_in_the_unit_interval() {
        for mu in random_uniform_means(10) {
            assert!((0.0..1.0).contains(&mu));
        }
    }
}
