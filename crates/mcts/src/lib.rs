//! Monte Carlo Tree Search for discrete-action environments.
//!
//! This crate provides a UCT search engine that can plan in any environment
//! implementing the `twenty48_core::Environment` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Environment` implementation
//! - **UCT Selection**: Value plus a logarithmic exploration bonus
//! - **Pluggable Rollouts**: The rollout policy is an explicit dependency,
//!   so a seeded policy makes searches reproducible
//! - **Branch Isolation**: Every tree node owns its own environment snapshot
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use twenty48_core::Environment;
//! use twenty48_game::Game2048;
//! use twenty48_mcts::{Mcts, MctsConfig, UniformRandom};
//!
//! let mut game = Game2048::new(42);
//!
//! let policy = UniformRandom::new(ChaCha8Rng::seed_from_u64(42));
//! let mut mcts = Mcts::new(game.snapshot().unwrap(), MctsConfig::default(), policy).unwrap();
//!
//! let action = mcts.select_action().unwrap();
//! let transition = game.step(action);
//! println!("Moved {} for {} points", action, transition.reward);
//! ```

pub mod config;
mod node;
pub mod policy;
pub mod search;
mod tree;

pub use config::MctsConfig;
pub use policy::{FixedAction, RolloutPolicy, UniformRandom};
pub use search::{ChildStats, Mcts, SearchResult};
