//! The 2048 environment: board, score and tile spawning.

use crate::{Board, Direction, SIZE, WINNING_TILE};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use twenty48_core::{Environment, Result, Transition};

/// Tile value inserted after every board-changing move.
const SPAWN_TILE: u32 = 2;

/// Tiles placed on a fresh board.
const INITIAL_TILES: usize = 2;

/// Summary filled in when an episode ends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeInfo {
    /// Steps taken, including moves that did not change the board.
    pub episode_length: Option<u32>,

    /// True if the winning tile was reached.
    pub success: Option<bool>,

    /// Final score.
    pub total_score: Option<u32>,
}

/// A running 2048 game.
///
/// Owns its random source, so cloning yields a fully independent game that
/// replays the same tile spawns for the same moves.
#[derive(Clone, Debug)]
pub struct Game2048 {
    board: Board,
    score: u32,
    episode_length: u32,
    done: bool,
    info: EpisodeInfo,
    rng: ChaCha8Rng,
}

impl Game2048 {
    /// Create a freshly reset game seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            board: Board::EMPTY,
            score: 0,
            episode_length: 0,
            done: false,
            info: EpisodeInfo::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        game.reset();
        game
    }

    /// Create a game positioned at `board` with the given score.
    pub fn from_board(board: Board, score: u32, seed: u64) -> Self {
        let mut game = Self::new(seed);
        game.install(board, score);
        game
    }

    /// Start a new episode: clear the board and spawn the initial tiles.
    pub fn reset(&mut self) -> Board {
        self.board = Board::EMPTY;
        self.score = 0;
        self.episode_length = 0;
        self.done = false;
        self.info = EpisodeInfo::default();
        for _ in 0..INITIAL_TILES {
            self.spawn_tile();
        }
        self.board
    }

    /// Reseed the tile spawner.
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Replace the board and score, validating tiles.
    ///
    /// The episode length is kept; termination is re-evaluated.
    pub fn set_state(&mut self, rows: [[u32; SIZE]; SIZE], score: u32) -> Result<()> {
        let board = Board::from_rows(rows)?;
        self.install(board, score);
        Ok(())
    }

    fn install(&mut self, board: Board, score: u32) {
        self.board = board;
        self.score = score;
        self.done = false;
        self.info = EpisodeInfo::default();
        if self.board.max_tile() >= WINNING_TILE {
            self.finish(true);
        } else if !self.board.can_move() {
            self.finish(false);
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Steps taken in this episode.
    pub fn episode_length(&self) -> u32 {
        self.episode_length
    }

    /// Episode summary (populated once the episode is over).
    pub fn info(&self) -> &EpisodeInfo {
        &self.info
    }

    fn spawn_tile(&mut self) {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return;
        }
        let (r, c) = empty[self.rng.gen_range(0..empty.len())];
        self.board.set(r, c, SPAWN_TILE);
    }

    fn finish(&mut self, success: bool) {
        self.done = true;
        self.info.episode_length = Some(self.episode_length);
        self.info.total_score = Some(self.score);
        if self.info.success.is_none() || success {
            self.info.success = Some(success);
        }
    }

    /// Spawn after a board-changing move, then check for termination.
    fn check_board(&mut self, moved: bool) {
        if self.board.max_tile() >= WINNING_TILE {
            self.finish(true);
        }
        if moved {
            self.spawn_tile();
        }
        if !self.done && !self.board.can_move() {
            self.finish(false);
        }
    }
}

impl Environment for Game2048 {
    type Action = Direction;
    type Info = EpisodeInfo;

    fn step(&mut self, action: Direction) -> Transition<EpisodeInfo> {
        if self.done {
            return Transition::new(0.0, true, self.info.clone());
        }

        self.episode_length += 1;
        let (next, reward) = self.board.shift(action);
        let moved = next != self.board;
        self.board = next;
        self.score += reward;
        self.check_board(moved);

        if self.done {
            debug!(
                "episode over after {} steps: score {}, max tile {}",
                self.episode_length,
                self.score,
                self.board.max_tile()
            );
        }

        Transition::new(f64::from(reward), self.done, self.info.clone())
    }

    fn snapshot_with_seed(&self, seed: u64) -> Result<Self> {
        let mut copy = self.clone();
        copy.seed(seed);
        Ok(copy)
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn action_to_index(&self, action: Direction) -> usize {
        action.index()
    }

    fn index_to_action(&self, index: usize) -> Option<Direction> {
        Direction::from_index(index)
    }

    fn num_actions(&self) -> usize {
        Direction::COUNT
    }
}

impl fmt::Display for Game2048 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score : {}", self.score)?;
        write!(f, "{}", self.board)
    }
}
