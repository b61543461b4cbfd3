//! Rollout policy abstraction for MCTS.
//!
//! A rollout policy picks actions during random playouts from a leaf. It is
//! passed to the engine explicitly so that a seeded policy makes the whole
//! search reproducible.

use rand::Rng;

/// Trait for choosing actions during rollouts.
pub trait RolloutPolicy {
    /// Choose an action index from an action set of size `num_actions`.
    ///
    /// Returning an index outside `0..num_actions` aborts the search with
    /// an invalid action error.
    fn choose(&mut self, num_actions: usize) -> usize;
}

impl<P: RolloutPolicy + ?Sized> RolloutPolicy for &mut P {
    fn choose(&mut self, num_actions: usize) -> usize {
        (**self).choose(num_actions)
    }
}

impl<P: RolloutPolicy + ?Sized> RolloutPolicy for Box<P> {
    fn choose(&mut self, num_actions: usize) -> usize {
        (**self).choose(num_actions)
    }
}

/// Uniformly random rollout policy.
#[derive(Clone, Debug)]
pub struct UniformRandom<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformRandom<R> {
    /// Create a new uniform policy drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RolloutPolicy for UniformRandom<R> {
    fn choose(&mut self, num_actions: usize) -> usize {
        if num_actions == 0 {
            return 0;
        }
        self.rng.gen_range(0..num_actions)
    }
}

/// Policy that always picks the same action index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedAction(pub usize);

impl RolloutPolicy for FixedAction {
    fn choose(&mut self, _num_actions: usize) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_uniform_in_range() {
        let mut policy = UniformRandom::new(ChaCha8Rng::seed_from_u64(42));
        for _ in 0..1000 {
            assert!(policy.choose(4) < 4);
        }
    }

    #[test]
    fn test_uniform_covers_all_actions() {
        let mut policy = UniformRandom::new(ChaCha8Rng::seed_from_u64(7));
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[policy.choose(4)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_deterministic() {
        let mut a = UniformRandom::new(ChaCha8Rng::seed_from_u64(3));
        let mut b = UniformRandom::new(ChaCha8Rng::seed_from_u64(3));
        let xs: Vec<usize> = (0..50).map(|_| a.choose(4)).collect();
        let ys: Vec<usize> = (0..50).map(|_| b.choose(4)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_fixed_action() {
        let mut policy = FixedAction(2);
        assert_eq!(policy.choose(4), 2);
        assert_eq!(policy.choose(4), 2);
    }

    #[test]
    fn test_borrowed_policy_advances_owner() {
        let mut owner = UniformRandom::new(ChaCha8Rng::seed_from_u64(9));
        let mut reference = UniformRandom::new(ChaCha8Rng::seed_from_u64(9));

        fn draw<P: RolloutPolicy>(mut policy: P) -> usize {
            policy.choose(4)
        }

        assert_eq!(draw(&mut owner), reference.choose(4));

        assert_eq!(owner.choose(4), reference.choose(4));
    }
}
