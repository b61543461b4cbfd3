//! MCTS configuration parameters.
//!
//! These parameters bound and shape the search. The rollout policy is not
//! part of the config: it is handed to the engine as an explicit dependency.

use serde::{Deserialize, Serialize};
use twenty48_core::{Result, Twenty48Error};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// UCT exploration weight.
    /// Higher values favour under-visited actions.
    pub c: f64,

    /// Discount applied per step to future rewards.
    pub gamma: f64,

    /// Number of search iterations per decision.
    pub iterations: usize,

    /// Maximum tree depth descended per iteration.
    pub simulation_depth: usize,

    /// Maximum steps taken during a leaf rollout.
    pub rollout_depth: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            c: 100.0,
            gamma: 0.7,
            iterations: 50,
            simulation_depth: 20,
            rollout_depth: 20,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Create a config with no exploration bonus: selection is purely
    /// greedy on the value estimates.
    pub fn greedy(iterations: usize) -> Self {
        Self {
            iterations,
            c: 0.0,
            ..Default::default()
        }
    }

    /// Check that the parameters describe a well-formed search.
    ///
    /// # Errors
    /// Returns `Twenty48Error::InvalidConfig` if `c` is negative or not
    /// finite, or if `gamma` lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.c.is_finite() || self.c < 0.0 {
            return Err(Twenty48Error::InvalidConfig(format!(
                "exploration weight c must be finite and >= 0, got {}",
                self.c
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Twenty48Error::InvalidConfig(format!(
                "discount gamma must lie in [0, 1], got {}",
                self.gamma
            )));
        }
        Ok(())
    }
}
