//! Chessly session core.
//!
//! Everything between the external rules engine (`cozy-chess`) and the
//! rendering layer lives here: the board projection, click/selection
//! handling, move coordination, the move-history and capture ledger, and
//! the session snapshot used to resume a game across restarts.

pub mod engine;
pub mod grid;
pub mod ledger;
pub mod notice;
pub mod persist;
pub mod selection;
pub mod session;
pub mod symbols;

pub use engine::{MoveError, PlayedMove, ReplayError, RulesEngine};
pub use grid::{coords_of, parse_square, square_at, Grid};
pub use ledger::{CaptureTag, Ledger, MoveRecord};
pub use notice::{side_name, Notice, Severity};
pub use persist::{FileStore, MemoryStore, Snapshot, SnapshotError, SnapshotStore};
pub use selection::{ClickOutcome, Selection};
pub use session::Session;
pub use symbols::piece_glyph;

// Re-export the engine's primitive types so callers don't need a direct
// cozy-chess dependency.
pub use cozy_chess::{Color, Piece, Square};
