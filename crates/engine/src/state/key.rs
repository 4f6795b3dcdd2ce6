use crate::*;

/// Canonical, fixed-width serialization of a [`State`] for use as a
/// deduplication key.
///
/// Two states are equivalent (collapsible) iff their four statistics
/// matrices and their `t`/`depth` are identical; this key freezes exactly
/// those fields, in a fixed order, into an immutable buffer. Dedup maps
/// hash this key rather than the live mutable matrices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[u64]>);

impl From<&State> for StateKey {
    fn from(state: &State) -> Self {
        let mut buf = Vec::with_capacity(4 * state.players() * state.arms() + 2);
        for counts in [
            state.sensing_successes(),
            state.sensing_trials(),
            state.transmission_successes(),
            state.transmission_trials(),
        ] {
            buf.extend(counts.entries().iter().map(|&x| x as u64));
        }
        buf.push(state.t());
        buf.push(state.depth() as u64);
        Self(buf.into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_states_share_a_key() {
        let a = State::root(2, 2, 3);
        let b = State::root(2, 2, 3);
        assert_eq!(StateKey::from(&a), StateKey::from(&b));
    }

    #[test]
    fn depth_distinguishes_otherwise_equal_states() {
        let a = State::root(2, 2, 3);
        let b = State::root(2, 2, 2);
        assert_ne!(StateKey::from(&a), StateKey::from(&b));
    }

    #[test]
    fn statistics_distinguish_states() {
        let zeros = Counts::zeros(1, 2);
        let ones = Counts::from_rows(&[vec![1, 0]]);
        let a = State::new(zeros.clone(), zeros.clone(), zeros.clone(), zeros.clone(), 1);
        let b = State::new(ones.clone(), zeros.clone(), ones, zeros, 1);
        assert_ne!(StateKey::from(&a), StateKey::from(&b));
    }
}
