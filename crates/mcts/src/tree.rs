//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices keeps ownership single-rooted: the tree
//! owns every node, and every node owns its own environment snapshot.

use crate::node::{Node, NodeId};
use twenty48_core::Environment;

/// Arena-allocated MCTS tree.
#[derive(Clone, Debug)]
pub struct Tree<E: Environment> {
    nodes: Vec<Node<E>>,
}

impl<E: Environment> Tree<E> {
    /// Create a tree whose root owns `root_state`.
    pub fn new(root_state: E) -> Self {
        Self {
            nodes: vec![Node::root(root_state)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<E> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<E> {
        &mut self.nodes[id.0]
    }

    /// Add a new node to the tree, returning its ID.
    fn add(&mut self, node: Node<E>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Give a leaf one unresolved child per action.
    ///
    /// All children are attached together. Returns false, changing nothing,
    /// if the node already has children.
    pub fn expand(&mut self, id: NodeId, actions: &[E::Action]) -> bool {
        if !self.get(id).is_leaf() {
            return false;
        }

        let children: Vec<(E::Action, NodeId)> = actions
            .iter()
            .map(|&action| (action, self.add(Node::new(action))))
            .collect();
        self.get_mut(id).children = children;
        true
    }

    /// Find the child of `id` reached through `action`.
    pub fn child(&self, id: NodeId, action: E::Action) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, child)| *child)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true: the root always exists).
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<E> {
        self.get(NodeId::ROOT)
    }

    /// Iterate over every node in allocation order.
    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = &Node<E>> {
        self.nodes.iter()
    }
}
