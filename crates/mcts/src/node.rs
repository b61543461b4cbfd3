//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices: nodes never point at their parent,
//! backed-up returns travel through the recursion instead.

use twenty48_core::Environment;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the MCTS tree.
///
/// Children are created together with a visit count of 1 and a value of 0,
/// which acts as one zero-valued pseudo-sample in the running mean. Their
/// state stays unresolved until a simulation first walks into them.
#[derive(Clone, Debug)]
pub struct Node<E: Environment> {
    /// Action that led to this node (None for root).
    /// Kept for debugging and tree inspection.
    #[allow(dead_code)]
    pub action: Option<E::Action>,

    /// Immediate reward received on the transition into this node.
    pub reward: f64,

    /// Number of returns folded into `value`, counting the creation sample.
    pub visit_count: u32,

    /// Running mean of discounted returns observed through this node.
    pub value: f64,

    /// Children: (action, node_id) pairs, one per action or none.
    pub children: Vec<(E::Action, NodeId)>,

    /// Environment snapshot owned by this node, bound on first traversal.
    pub state: Option<E>,
}

impl<E: Environment> Node<E> {
    /// Create an unresolved child reached through `action`.
    pub fn new(action: E::Action) -> Self {
        Self {
            action: Some(action),
            reward: 0.0,
            visit_count: 1,
            value: 0.0,
            children: Vec::new(),
            state: None,
        }
    }

    /// Create the root node, owning a snapshot of the real environment.
    pub fn root(state: E) -> Self {
        Self {
            action: None,
            reward: 0.0,
            visit_count: 1,
            value: 0.0,
            children: Vec::new(),
            state: Some(state),
        }
    }

    /// A node is a leaf iff it has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True once a state has been bound to this node.
    pub fn is_resolved(&self) -> bool {
        self.state.is_some()
    }

    /// True if no simulation has walked through this node yet.
    pub fn is_unvisited(&self) -> bool {
        !self.is_resolved() || self.visit_count == 0
    }

    /// Bind the successor state and the reward earned reaching it.
    ///
    /// Called exactly once, on the first traversal of this branch.
    pub fn set_state(&mut self, state: E, reward: f64) {
        debug_assert!(self.state.is_none(), "BUG: node state bound twice");
        self.state = Some(state);
        self.reward = reward;
    }

    /// Fold a discounted return into the running mean.
    pub fn backup(&mut self, q: f64) {
        self.visit_count += 1;
        self.value += (q - self.value) / f64::from(self.visit_count);
    }
}
