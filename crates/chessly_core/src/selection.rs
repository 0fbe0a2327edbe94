//! Click interpretation: at most one square is armed at a time.
//!
//! The machine owns no chess semantics. It only decides whether a click
//! arms a square, re-arms a different one, deselects, or turns into a
//! move attempt; legality is entirely the engine's concern.

use cozy_chess::{Color, Piece, Square};

/// Selection state: no square armed, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Armed(Square),
}

/// What a click at some square means, given the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Arm the clicked square (it holds a piece of the side to move).
    Arm(Square),
    /// Discard the previous arm and arm the clicked square instead.
    Rearm(Square),
    /// The armed square was clicked again; clear the selection.
    Deselect,
    /// Submit a move attempt to the engine.
    AttemptMove { from: Square, to: Square },
    /// Unarmed click on an opponent's piece.
    RejectWrongSide,
    /// Unarmed click on an empty square.
    RejectEmpty,
}

impl Selection {
    /// Interpret a click at `clicked`, holding `piece` (if any), with
    /// `turn` to move. Pure: the caller applies the outcome.
    pub fn interpret(
        &self,
        clicked: Square,
        piece: Option<(Piece, Color)>,
        turn: Color,
    ) -> ClickOutcome {
        let own_piece = matches!(piece, Some((_, side)) if side == turn);
        match *self {
            Selection::Idle => {
                if own_piece {
                    ClickOutcome::Arm(clicked)
                } else if piece.is_some() {
                    ClickOutcome::RejectWrongSide
                } else {
                    ClickOutcome::RejectEmpty
                }
            }
            Selection::Armed(armed) if armed == clicked => ClickOutcome::Deselect,
            Selection::Armed(_) if own_piece => ClickOutcome::Rearm(clicked),
            Selection::Armed(armed) => ClickOutcome::AttemptMove {
                from: armed,
                to: clicked,
            },
        }
    }

    /// The armed square, if any.
    pub fn armed(&self) -> Option<Square> {
        match *self {
            Selection::Idle => None,
            Selection::Armed(sq) => Some(sq),
        }
    }

    /// The armed square as a two-character label, for the snapshot.
    pub fn label(&self) -> Option<String> {
        self.armed().map(|sq| sq.to_string())
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
