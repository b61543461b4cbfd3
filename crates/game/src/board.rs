//! The 4x4 tile grid and its shift/merge rules.

use crate::Direction;
use std::fmt;
use twenty48_core::{Result, Twenty48Error};

/// Side length of the board.
pub const SIZE: usize = 4;

/// Reaching this tile ends the episode successfully.
pub const WINNING_TILE: u32 = 2048;

/// Tile grid, row-major. `0` marks an empty cell.
///
/// ```text
/// (0,0) (0,1) (0,2) (0,3)
/// (1,0)  ...
/// (3,0)              (3,3)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Board([[u32; SIZE]; SIZE]);

impl Board {
    /// A board with no tiles.
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Create a board from rows.
    ///
    /// # Errors
    /// Returns `Twenty48Error::InvalidBoard` if any tile is neither empty
    /// nor a power of two of at least 2.
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Result<Self> {
        for (r, row) in rows.iter().enumerate() {
            for (c, &tile) in row.iter().enumerate() {
                if tile != 0 && (tile < 2 || !tile.is_power_of_two()) {
                    return Err(Twenty48Error::InvalidBoard(format!(
                        "tile {} at ({}, {}) is not a power of two >= 2",
                        tile, r, c
                    )));
                }
            }
        }
        Ok(Self(rows))
    }

    /// Get the rows of the board.
    pub fn rows(&self) -> &[[u32; SIZE]; SIZE] {
        &self.0
    }

    /// Get the tile at a cell.
    ///
    /// # Panics
    /// Panics if `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, tile: u32) {
        self.0[row][col] = tile;
    }

    /// All empty cells as (row, col), in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                if self.0[r][c] == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Largest tile on the board (0 when empty).
    pub fn max_tile(&self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tiles.
    pub fn tile_sum(&self) -> u32 {
        self.0.iter().flatten().sum()
    }

    /// False only when the board is full and no orthogonal neighbours match.
    pub fn can_move(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let tile = self.0[r][c];
                if tile == 0 {
                    return true;
                }
                if c + 1 < SIZE && self.0[r][c + 1] == tile {
                    return true;
                }
                if r + 1 < SIZE && self.0[r + 1][c] == tile {
                    return true;
                }
            }
        }
        false
    }

    /// Slide all tiles towards `direction`, merging equal neighbours.
    ///
    /// Returns the new board and the reward earned: each merge producing a
    /// tile of value `v` is worth `v / 2`.
    pub fn shift(&self, direction: Direction) -> (Board, u32) {
        let mut next = *self;
        let mut reward = 0;

        for lane in 0..SIZE {
            let cells = lane_cells(direction, lane);
            let line = cells.map(|(r, c)| self.0[r][c]);
            let (merged, gained) = merge_line(line);
            for ((r, c), tile) in cells.into_iter().zip(merged) {
                next.0[r][c] = tile;
            }
            reward += gained;
        }

        (next, reward)
    }
}

/// Cells of one lane, ordered from the wall tiles slide towards.
fn lane_cells(direction: Direction, lane: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|i| match direction {
        Direction::Left => (lane, i),
        Direction::Right => (lane, SIZE - 1 - i),
        Direction::Up => (i, lane),
        Direction::Down => (SIZE - 1 - i, lane),
    })
}

/// Compress a lane towards index 0, merging each equal pair at most once.
fn merge_line(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let mut out = [0; SIZE];
    let mut len = 0;
    let mut reward = 0;
    let mut pending: Option<u32> = None;

    for tile in line.into_iter().filter(|&t| t != 0) {
        match pending {
            Some(p) if p == tile => {
                out[len] = p * 2;
                len += 1;
                reward += p;
                pending = None;
            }
            Some(p) => {
                out[len] = p;
                len += 1;
                pending = Some(tile);
            }
            None => pending = Some(tile),
        }
    }
    if let Some(p) = pending {
        out[len] = p;
    }

    (out, reward)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{}", "-".repeat(SIZE * 7 - 1))?;
            }
            for (c, &tile) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, "|")?;
                }
                if tile == 0 {
                    write!(f, "{:^6}", ".")?;
                } else {
                    write!(f, "{:^6}", tile)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
