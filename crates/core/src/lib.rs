//! 2048 Core - Environment contract and common types
//!
//! This crate provides the [`Environment`] trait that any discrete-action
//! environment must implement to be searched by the MCTS engine.
//!
//! # Types
//!
//! - [`Environment`] - Trait for steppable, snapshot-able environments
//! - [`Transition`] - Reward, termination flag and info produced by one step

mod environment;
mod error;
mod types;

pub use environment::Environment;
pub use error::{Result, Twenty48Error};
pub use types::Transition;
