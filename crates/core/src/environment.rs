use std::fmt::Debug;
use std::hash::Hash;

use crate::{Result, Transition, Twenty48Error};

/// A single-agent environment with a fixed, discrete action set.
///
/// The environment value *is* the state: [`step`](Environment::step) mutates
/// it in place. Speculative branches are explored on copies obtained through
/// [`snapshot`](Environment::snapshot), which must never alias the original
/// or any other copy.
pub trait Environment: Clone {
    /// An action (e.g., a move direction)
    type Action: Copy + Eq + Hash + Debug;

    /// Extra information attached to each transition
    type Info: Clone + Debug;

    /// Applies an action, returning the reward delta and termination flag.
    ///
    /// May be stochastic (e.g., random tile insertion).
    fn step(&mut self, action: Self::Action) -> Transition<Self::Info>;

    /// Produces an independent copy whose later mutation cannot affect `self`.
    ///
    /// The default relies on `Clone` having value semantics. Implementations
    /// holding shared handles must override this and fail with
    /// [`Twenty48Error::EnvironmentClone`] when isolation cannot be upheld.
    fn snapshot(&self) -> Result<Self> {
        Ok(self.clone())
    }

    /// Like [`snapshot`](Environment::snapshot), but the copy draws its
    /// future randomness from `seed` instead of replaying the original's.
    ///
    /// Deterministic environments can keep the default.
    fn snapshot_with_seed(&self, seed: u64) -> Result<Self> {
        let _ = seed;
        self.snapshot()
    }

    /// Returns true if the episode has ended
    fn is_done(&self) -> bool;

    /// Maps an action to its index in the fixed action set
    fn action_to_index(&self, action: Self::Action) -> usize;

    /// Maps an index back to an action, returning None if out of range
    fn index_to_action(&self, index: usize) -> Option<Self::Action>;

    /// Size of the fixed action set
    fn num_actions(&self) -> usize;

    /// Maps an index to an action, failing loudly instead of coercing.
    fn resolve_action(&self, index: usize) -> Result<Self::Action> {
        self.index_to_action(index)
            .ok_or(Twenty48Error::InvalidAction {
                index,
                num_actions: self.num_actions(),
            })
    }
}
