//! Step results produced by an [`Environment`](crate::Environment).

/// Outcome of applying one action.
///
/// The successor state is the environment itself; this carries the rest.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<I> {
    /// Reward delta earned by this step.
    pub reward: f64,

    /// Whether the episode terminated with this step.
    pub done: bool,

    /// Environment-specific information.
    pub info: I,
}

impl<I> Transition<I> {
    /// Create a new transition.
    pub fn new(reward: f64, done: bool, info: I) -> Self {
        Self { reward, done, info }
    }
}
