//! Board projection: rank/file addressing and the 8x8 display grid.
//!
//! The grid uses screen coordinates: row 0 is the top of the board
//! (rank 8), column 0 is the left edge (file a). `square_at` and
//! `coords_of` form a bijection between those coordinates and engine
//! squares.

use cozy_chess::{Color, File, Piece, Rank, Square};

use crate::engine::RulesEngine;

/// Engine square for a (row, column) grid coordinate.
///
/// `file = 'a' + col`, `rank = 8 - row`. Panics if either coordinate is
/// out of `[0, 8)`; callers index the grid, which has the same bounds.
pub fn square_at(row: usize, col: usize) -> Square {
    Square::new(File::index(col), Rank::index(7 - row))
}

/// Inverse of [`square_at`].
pub fn coords_of(square: Square) -> (usize, usize) {
    (7 - square.rank() as usize, square.file() as usize)
}

/// Parse a two-character label like `"e4"` into a square.
pub fn parse_square(label: &str) -> Option<Square> {
    let bytes = label.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file >= 8 || rank >= 8 {
        return None;
    }
    Some(Square::new(
        File::index(file as usize),
        Rank::index(rank as usize),
    ))
}

/// An 8x8 snapshot of piece placement, derived from the authoritative
/// position. Recomputed wholesale after every mutation; never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<(Piece, Color)>; 8]; 8],
}

impl Grid {
    /// Project the engine's current position into a fresh grid.
    pub fn project(engine: &RulesEngine) -> Self {
        let mut cells = [[None; 8]; 8];
        for (row, rank) in cells.iter_mut().enumerate() {
            for (col, cell) in rank.iter_mut().enumerate() {
                *cell = engine.piece_at(square_at(row, col));
            }
        }
        Self { cells }
    }

    /// Piece occupying cell (row, col), if any.
    pub fn piece(&self, row: usize, col: usize) -> Option<(Piece, Color)> {
        self.cells[row][col]
    }
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod grid_tests;
