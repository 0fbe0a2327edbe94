//! The session aggregate: one mutation entry point per user action.
//!
//! Selection, ledger, grid, and the engine-owned position only ever
//! change together, inside `click`, `undo_last`, or `restart`; each of
//! those ends with a best-effort snapshot write.

use cozy_chess::{Color, Square};

use crate::engine::RulesEngine;
use crate::grid::{self, Grid};
use crate::ledger::{CaptureTag, Ledger};
use crate::notice::{side_name, Notice};
use crate::persist::{Snapshot, SnapshotStore};
use crate::selection::{ClickOutcome, Selection};
use crate::symbols::piece_glyph;

pub struct Session {
    engine: RulesEngine,
    ledger: Ledger,
    selection: Selection,
    grid: Grid,
    store: Box<dyn SnapshotStore>,
}

impl Session {
    /// Resume from the store's snapshot, or start fresh when the store
    /// is empty or its blob cannot be restored. A bad blob is discarded
    /// silently (logged only); it never reaches the user.
    pub fn load(store: Box<dyn SnapshotStore>) -> Self {
        let restored = store.get().and_then(|blob| {
            Snapshot::decode(&blob)
                .and_then(|snap| {
                    let (engine, ledger) = snap.restore()?;
                    Ok((engine, ledger, snap.selection))
                })
                .map_err(|err| {
                    tracing::warn!(%err, "discarding unusable session snapshot");
                })
                .ok()
        });

        match restored {
            Some((engine, ledger, selection)) => {
                let selection = revalidate_selection(selection.as_deref(), &engine);
                let grid = Grid::project(&engine);
                Self {
                    engine,
                    ledger,
                    selection,
                    grid,
                    store,
                }
            }
            None => Self::fresh(store),
        }
    }

    fn fresh(store: Box<dyn SnapshotStore>) -> Self {
        let engine = RulesEngine::new();
        let grid = Grid::project(&engine);
        Self {
            engine,
            ledger: Ledger::new(),
            selection: Selection::Idle,
            grid,
            store,
        }
    }

    /// Handle a click on cell (row, col). Returns the notice to show,
    /// if the click produced one; arming and deselecting are silent.
    pub fn click(&mut self, row: usize, col: usize) -> Option<Notice> {
        let clicked = grid::square_at(row, col);
        let piece = self.engine.piece_at(clicked);
        let turn = self.engine.side_to_move();

        let notice = match self.selection.interpret(clicked, piece, turn) {
            ClickOutcome::Arm(sq) | ClickOutcome::Rearm(sq) => {
                self.selection = Selection::Armed(sq);
                None
            }
            ClickOutcome::Deselect => {
                self.selection = Selection::Idle;
                None
            }
            ClickOutcome::RejectWrongSide => Some(Notice::error(format!(
                "Invalid selection: It's {}'s turn!",
                side_name(turn)
            ))),
            ClickOutcome::RejectEmpty => {
                Some(Notice::error("Invalid selection: No piece at this square!"))
            }
            ClickOutcome::AttemptMove { from, to } => {
                // Selection clears whatever the engine says.
                self.selection = Selection::Idle;
                self.attempt_move(from, to)
            }
        };
        self.save();
        notice
    }

    fn attempt_move(&mut self, from: Square, to: Square) -> Option<Notice> {
        match self.engine.submit_move(from, to) {
            Ok(played) => {
                self.grid = Grid::project(&self.engine);
                let text = format!(
                    "{} moved from {} to {}",
                    piece_glyph(played.piece, played.mover),
                    played.from,
                    played.to
                );
                let capture = played.captured.map(|piece| CaptureTag {
                    by: played.mover,
                    glyph: piece_glyph(piece, !played.mover),
                });
                self.ledger.append(text, capture);
                self.game_state_notice(played.mover)
            }
            Err(rejected) => {
                // Nothing changed, but re-project anyway so the UI is
                // guaranteed consistent with the untouched position.
                self.grid = Grid::project(&self.engine);
                Some(Notice::error(format!(
                    "Invalid move from {} to {}. Try again.",
                    rejected.from, rejected.to
                )))
            }
        }
    }

    /// Checkmate beats draw beats check; at most one notice.
    fn game_state_notice(&self, mover: Color) -> Option<Notice> {
        if self.engine.is_checkmate() {
            Some(Notice::success(format!(
                "{} wins by checkmate!",
                side_name(mover)
            )))
        } else if self.engine.is_draw() {
            Some(Notice::info("The game is a draw!"))
        } else if self.engine.is_in_check() {
            Some(Notice::info(format!(
                "{} is in check!",
                side_name(self.engine.side_to_move())
            )))
        } else {
            None
        }
    }

    /// Take back the last half-move, engine and ledger in lockstep.
    pub fn undo_last(&mut self) -> Notice {
        if self.ledger.is_empty() {
            return Notice::error("No moves to undo!");
        }
        if self.engine.undo().is_none() {
            // Engine and ledger out of lockstep; should be unreachable.
            tracing::warn!("ledger has records but the engine had nothing to undo");
            return Notice::error("No moves to undo!");
        }
        self.ledger.undo_last();
        self.selection = Selection::Idle;
        self.grid = Grid::project(&self.engine);
        self.save();
        Notice::info("Last move undone")
    }

    /// Throw the game away and start over.
    pub fn restart(&mut self) {
        self.engine = RulesEngine::new();
        self.ledger.reset();
        self.selection = Selection::Idle;
        self.grid = Grid::project(&self.engine);
        self.save();
    }

    fn save(&self) {
        let snapshot = Snapshot::capture(&self.engine, &self.ledger, &self.selection);
        match snapshot.encode() {
            Ok(blob) => self.store.set(&blob),
            Err(err) => tracing::warn!(%err, "failed to encode session snapshot"),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn side_to_move(&self) -> Color {
        self.engine.side_to_move()
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.engine.last_move()
    }
}

/// A restored selection is only kept if it still points at a piece of
/// the side to move.
fn revalidate_selection(label: Option<&str>, engine: &RulesEngine) -> Selection {
    label
        .and_then(grid::parse_square)
        .filter(|&sq| {
            matches!(engine.piece_at(sq), Some((_, side)) if side == engine.side_to_move())
        })
        .map(Selection::Armed)
        .unwrap_or(Selection::Idle)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
