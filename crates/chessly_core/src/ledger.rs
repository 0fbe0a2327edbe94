//! Move history and captured-piece rosters.
//!
//! Each record remembers which roster (if any) its capture went to, so
//! undo pops from exactly the roster that grew at append time instead of
//! re-deriving the side from the position.

use cozy_chess::Color;

/// Which roster a capture was credited to, and with what glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTag {
    /// The capturing side; its roster gained `glyph`.
    pub by: Color,
    /// Glyph of the captured piece, in the opponent's colors.
    pub glyph: char,
}

/// One completed half-move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub text: String,
    pub capture: Option<CaptureTag>,
}

/// Rosters returned from [`Ledger::from_parts`] that don't match the
/// capture tags on the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("capture rosters do not match the capture-tagged records")]
pub struct RosterMismatch;

/// Append-only move log plus one captured-piece roster per side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<MoveRecord>,
    captured_by_white: Vec<char>,
    captured_by_black: Vec<char>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from snapshot parts, verifying that each roster
    /// holds exactly the entries the records' capture tags account for.
    pub fn from_parts(
        records: Vec<MoveRecord>,
        captured_by_white: Vec<char>,
        captured_by_black: Vec<char>,
    ) -> Result<Self, RosterMismatch> {
        let tagged = |side| {
            records
                .iter()
                .filter(|r| matches!(r.capture, Some(tag) if tag.by == side))
                .count()
        };
        if tagged(Color::White) != captured_by_white.len()
            || tagged(Color::Black) != captured_by_black.len()
        {
            return Err(RosterMismatch);
        }
        Ok(Self {
            records,
            captured_by_white,
            captured_by_black,
        })
    }

    /// Record a completed half-move; a tagged capture grows the
    /// capturing side's roster.
    pub fn append(&mut self, text: String, capture: Option<CaptureTag>) {
        if let Some(tag) = capture {
            self.roster_mut(tag.by).push(tag.glyph);
        }
        self.records.push(MoveRecord { text, capture });
    }

    /// Pop the most recent record, shrinking the roster its capture tag
    /// names. Returns `None` when there is nothing to undo.
    pub fn undo_last(&mut self) -> Option<MoveRecord> {
        let record = self.records.pop()?;
        if let Some(tag) = record.capture {
            let popped = self.roster_mut(tag.by).pop();
            debug_assert_eq!(popped, Some(tag.glyph));
        }
        Some(record)
    }

    /// Clear everything; used on restart.
    pub fn reset(&mut self) {
        self.records.clear();
        self.captured_by_white.clear();
        self.captured_by_black.clear();
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Glyphs of the pieces `side` has captured, in capture order.
    pub fn captured_by(&self, side: Color) -> &[char] {
        match side {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of records carrying a capture tag.
    pub fn capture_count(&self) -> usize {
        self.records.iter().filter(|r| r.capture.is_some()).count()
    }

    fn roster_mut(&mut self, side: Color) -> &mut Vec<char> {
        match side {
            Color::White => &mut self.captured_by_white,
            Color::Black => &mut self.captured_by_black,
        }
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod ledger_tests;
