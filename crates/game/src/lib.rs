//! 2048 Game - 4x4 grid-merge environment
//!
//! This crate implements the sliding-tile rules and exposes them through
//! the `twenty48_core::Environment` trait so the search engine can plan
//! over cloned copies of a running game.
//!
//! # Example
//!
//! ```
//! use twenty48_core::Environment;
//! use twenty48_game::{Direction, Game2048};
//!
//! let mut game = Game2048::new(7);
//! let mut branch = game.snapshot().unwrap();
//! branch.step(Direction::Left);
//!
//! // The real game is untouched by the speculative step
//! assert_eq!(game.episode_length(), 0);
//! game.step(Direction::Up);
//! ```

mod board;
mod direction;
mod env;

pub use board::{Board, SIZE, WINNING_TILE};
pub use direction::Direction;
pub use env::{EpisodeInfo, Game2048};
