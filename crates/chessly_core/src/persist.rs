//! Session snapshots: one JSON blob per session, written best-effort
//! after every state-affecting action and read once at startup.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use cozy_chess::Color;
use serde::{Deserialize, Serialize};

use crate::engine::{ReplayError, RulesEngine};
use crate::ledger::{CaptureTag, Ledger, MoveRecord, RosterMismatch};
use crate::selection::Selection;

/// Environment variable overriding the default snapshot path.
pub const SESSION_FILE_VAR: &str = "CHESSLY_SESSION_FILE";
const DEFAULT_SESSION_FILE: &str = "chessly_session.json";

/// Key-value transport for the snapshot blob. Implementations never
/// panic into the core; a failed write is the implementation's problem.
pub trait SnapshotStore {
    fn get(&self) -> Option<String>;
    fn set(&self, blob: &str);
}

/// Snapshot blob in a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from `CHESSLY_SESSION_FILE`, falling back to
    /// `chessly_session.json` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var(SESSION_FILE_VAR)
            .unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string());
        Self::new(path)
    }
}

impl SnapshotStore for FileStore {
    fn get(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn set(&self, blob: &str) {
        if let Err(err) = std::fs::write(&self.path, blob) {
            tracing::warn!(path = %self.path.display(), %err, "failed to persist session snapshot");
        }
    }
}

/// In-memory store, for tests. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn set(&self, blob: &str) {
        *self.slot.borrow_mut() = Some(blob.to_string());
    }
}

/// A snapshot that cannot be turned back into a session.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot position does not replay: {0}")]
    Replay(#[from] ReplayError),
    #[error("unrecognized side {0:?} in snapshot")]
    BadSide(String),
    #[error("snapshot ledger disagrees with the replayed position")]
    LedgerMismatch,
}

impl From<RosterMismatch> for SnapshotError {
    fn from(_: RosterMismatch) -> Self {
        SnapshotError::LedgerMismatch
    }
}

/// Everything needed to resume a session: the position's move-list
/// encoding, the move records, both rosters, and the armed square.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub moves: String,
    pub records: Vec<SnapshotRecord>,
    pub captured_by_white: Vec<char>,
    pub captured_by_black: Vec<char>,
    pub selection: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<SnapshotCapture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotCapture {
    pub by: String,
    pub glyph: char,
}

impl Snapshot {
    /// Snapshot the live session state.
    pub fn capture(engine: &RulesEngine, ledger: &Ledger, selection: &Selection) -> Self {
        Self {
            moves: engine.serialize(),
            records: ledger.records().iter().map(SnapshotRecord::from).collect(),
            captured_by_white: ledger.captured_by(Color::White).to_vec(),
            captured_by_black: ledger.captured_by(Color::Black).to_vec(),
            selection: selection.label(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(blob: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(blob)?)
    }

    /// Rebuild the engine and ledger. The engine comes from replaying
    /// the move list; the ledger is taken verbatim and then checked for
    /// lockstep with the replayed position.
    pub fn restore(&self) -> Result<(RulesEngine, Ledger), SnapshotError> {
        let engine = RulesEngine::deserialize(&self.moves)?;
        let records = self
            .records
            .iter()
            .map(MoveRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let ledger = Ledger::from_parts(
            records,
            self.captured_by_white.clone(),
            self.captured_by_black.clone(),
        )?;
        if ledger.len() != engine.half_moves() {
            return Err(SnapshotError::LedgerMismatch);
        }
        Ok((engine, ledger))
    }
}

impl From<&MoveRecord> for SnapshotRecord {
    fn from(record: &MoveRecord) -> Self {
        Self {
            text: record.text.clone(),
            capture: record.capture.map(|tag| SnapshotCapture {
                by: match tag.by {
                    Color::White => "white".to_string(),
                    Color::Black => "black".to_string(),
                },
                glyph: tag.glyph,
            }),
        }
    }
}

impl TryFrom<&SnapshotRecord> for MoveRecord {
    type Error = SnapshotError;

    fn try_from(record: &SnapshotRecord) -> Result<Self, SnapshotError> {
        let capture = match &record.capture {
            None => None,
            Some(cap) => {
                let by = match cap.by.as_str() {
                    "white" => Color::White,
                    "black" => Color::Black,
                    other => return Err(SnapshotError::BadSide(other.to_string())),
                };
                Some(CaptureTag {
                    by,
                    glyph: cap.glyph,
                })
            }
        };
        Ok(MoveRecord {
            text: record.text.clone(),
            capture,
        })
    }
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod persist_tests;
