//! Monte Carlo Tree Search implementation.
//!
//! Each iteration is one depth-first walk from the root: UCT selection down
//! the resolved part of the tree, one-layer expansion at the first leaf,
//! a discounted rollout to bootstrap that leaf, and a backup of the
//! discounted return through the recursion.

use crate::{config::MctsConfig, node::NodeId, policy::RolloutPolicy, tree::Tree};
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twenty48_core::{Environment, Result, Twenty48Error};

/// Statistics of one root child after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats<A> {
    /// Action leading to the child.
    pub action: A,

    /// Visit count, including the creation sample.
    pub visit_count: u32,

    /// Mean discounted return observed through the child.
    pub value: f64,

    /// Immediate reward of the transition into the child.
    pub reward: f64,
}

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<A> {
    /// Action of the root child with the strictly greatest value, or the
    /// lowest-indexed action if no child value exceeds 0.
    pub best_action: A,

    /// Per-action statistics at the root, in action index order.
    /// Empty if the root was never expanded.
    pub children: Vec<ChildStats<A>>,
}

impl<A: Copy + PartialEq> SearchResult<A> {
    /// Get the best action.
    pub fn best(&self) -> A {
        self.best_action
    }

    /// Value estimate of the root child reached through `action`.
    pub fn value_of(&self, action: A) -> Option<f64> {
        self.children
            .iter()
            .find(|stats| stats.action == action)
            .map(|stats| stats.value)
    }
}

/// Monte Carlo Tree Search with UCT selection.
///
/// Built fresh for every real decision from a snapshot of the environment
/// and discarded afterwards. Every copy the search steps is reseeded from
/// the engine's own generator, so chance events inside the tree are drawn
/// independently of the environment it was rooted at.
///
/// Generic over:
/// - `E`: The environment being planned in
/// - `P`: The rollout policy
pub struct Mcts<E: Environment, P: RolloutPolicy> {
    config: MctsConfig,
    policy: P,
    actions: Vec<E::Action>,
    tree: Tree<E>,
    rng: ChaCha8Rng,
}

impl<E, P> Mcts<E, P>
where
    E: Environment,
    P: RolloutPolicy,
{
    /// Create a new MCTS instance rooted at `root`. No search happens yet.
    ///
    /// # Errors
    /// Returns `Twenty48Error::InvalidConfig` for an invalid config or an
    /// empty action set, and `Twenty48Error::InvalidAction` if the
    /// environment cannot map every index of its action set to an action.
    pub fn new(root: E, config: MctsConfig, policy: P) -> Result<Self> {
        config.validate()?;

        let num_actions = root.num_actions();
        if num_actions == 0 {
            return Err(Twenty48Error::InvalidConfig(
                "environment exposes an empty action set".to_string(),
            ));
        }
        let actions = (0..num_actions)
            .map(|index| root.resolve_action(index))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            policy,
            actions,
            tree: Tree::new(root),
            rng: ChaCha8Rng::seed_from_u64(0),
        })
    }

    /// Seed the generator that reseeds search copies of the environment.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Run the search and return only the chosen action.
    pub fn select_action(&mut self) -> Result<E::Action> {
        Ok(self.search()?.best_action)
    }

    /// Run `config.iterations` simulations from the root, returning search
    /// results. Any error aborts the whole search.
    pub fn search(&mut self) -> Result<SearchResult<E::Action>> {
        for iteration in 0..self.config.iterations {
            let q = self.simulate(NodeId::ROOT, self.config.simulation_depth)?;
            trace!("iteration {}: root return {:.3}", iteration, q);
        }

        let result = self.extract_results();
        debug!(
            "search over {} iterations ({} nodes) chose {:?}: {:?}",
            self.config.iterations,
            self.tree.len(),
            result.best_action,
            result
                .children
                .iter()
                .map(|c| (c.action, c.visit_count, c.value))
                .collect::<Vec<_>>()
        );
        Ok(result)
    }

    /// The environment snapshot the tree is rooted at.
    pub fn root_state(&self) -> &E {
        self.bound_state(NodeId::ROOT)
    }

    /// Get the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// One depth-first walk below `node_id`, returning the discounted return.
    fn simulate(&mut self, node_id: NodeId, depth: usize) -> Result<f64> {
        if depth == 0 {
            return Ok(0.0);
        }

        // First visit: grow one layer and bootstrap from a rollout
        if self.tree.get(node_id).is_leaf() {
            let env = self.search_copy(node_id)?;
            self.tree.expand(node_id, &self.actions);
            return self.rollout(env, self.config.rollout_depth);
        }

        let action = self.selection(node_id);
        let child_id = self
            .tree
            .child(node_id, action)
            .expect("BUG: selection returned action without child node");

        // Successors are stepped from this node's own snapshot, so lookahead
        // compounds along the branch
        if !self.tree.get(child_id).is_resolved() {
            let mut next = self.search_copy(node_id)?;
            let transition = next.step(action);
            self.tree
                .get_mut(child_id)
                .set_state(next, transition.reward);
        }

        let reward = self.tree.get(child_id).reward;
        let q = reward + self.config.gamma * self.simulate(child_id, depth - 1)?;
        self.tree.get_mut(child_id).backup(q);

        Ok(q)
    }

    /// Select a child action with UCT.
    ///
    /// priority(a) = Q(a) + c * sqrt(ln(N) / N(a)), where N is recomputed as
    /// the sum of the children's visit counts. Children never walked into
    /// have unbounded priority. Ties and a field where nothing beats 0 go to
    /// the lowest-indexed action.
    fn selection(&mut self, node_id: NodeId) -> E::Action {
        let total: u32 = self
            .tree
            .get(node_id)
            .children
            .iter()
            .map(|(_, child)| self.tree.get(*child).visit_count)
            .sum();
        self.tree.get_mut(node_id).visit_count = total.max(1);

        let ln_total = f64::from(total.max(1)).ln();
        let node = self.tree.get(node_id);
        let mut best_action = node.children[0].0;
        let mut best_priority = 0.0;

        for &(action, child_id) in &node.children {
            let child = self.tree.get(child_id);
            let priority = if child.is_unvisited() {
                f64::INFINITY
            } else {
                let n = f64::from(child.visit_count);
                child.value + self.config.c * (ln_total / n).sqrt()
            };

            if priority > best_priority {
                best_priority = priority;
                best_action = action;
            }
        }

        best_action
    }

    /// Discounted return of a policy-driven playout on a private snapshot.
    ///
    /// Stops early once the episode is over. Never touches the tree.
    fn rollout(&mut self, mut env: E, limit: usize) -> Result<f64> {
        let mut total = 0.0;
        let mut discount = 1.0;

        for _ in 0..limit {
            if env.is_done() {
                break;
            }
            let index = self.policy.choose(self.actions.len());
            let action = env.resolve_action(index)?;
            total += discount * env.step(action).reward;
            discount *= self.config.gamma;
        }

        Ok(total)
    }

    /// Freshly reseeded copy of the state bound at `node_id`.
    fn search_copy(&mut self, node_id: NodeId) -> Result<E> {
        let seed = self.rng.gen();
        self.bound_state(node_id).snapshot_with_seed(seed)
    }

    fn bound_state(&self, node_id: NodeId) -> &E {
        self.tree
            .get(node_id)
            .state
            .as_ref()
            .expect("BUG: simulation reached a node without a bound state")
    }

    /// Extract search results from root node.
    fn extract_results(&self) -> SearchResult<E::Action> {
        let root = self.tree.root();

        let children: Vec<ChildStats<E::Action>> = root
            .children
            .iter()
            .map(|&(action, id)| {
                let child = self.tree.get(id);
                ChildStats {
                    action,
                    visit_count: child.visit_count,
                    value: child.value,
                    reward: child.reward,
                }
            })
            .collect();

        let mut best_action = self.actions[0];
        let mut best_value = 0.0;
        for stats in &children {
            if stats.value > best_value {
                best_value = stats.value;
                best_action = stats.action;
            }
        }

        SearchResult {
            best_action,
            children,
        }
    }
}
