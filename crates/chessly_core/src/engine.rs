//! Adapter around the external rules engine (`cozy-chess`).
//!
//! cozy-chess answers piece queries, legality, check and terminal status;
//! this wrapper adds what the session needs on top: one-move undo via a
//! snapshot stack, draw detection matching the usual over-the-board rules
//! (repetition and insufficient material on top of cozy's stalemate and
//! move-rule status), from/to move resolution for click input, and a
//! compact text encoding for persistence.

use cozy_chess::{Board, Color, File, GameStatus, Move, Piece, Square};

use crate::grid::parse_square;

/// Descriptor of a successfully applied move.
///
/// `from`/`to` are the canonical squares as a user would read them
/// (castling is reported as the king's two-file step, not cozy-chess's
/// internal king-takes-rook encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
    /// Side that made the move.
    pub mover: Color,
    /// Piece that moved.
    pub piece: Piece,
    /// Captured piece kind, if any (en passant included).
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
}

impl PlayedMove {
    /// Coordinate-notation token, e.g. `"e2e4"` or `"e7e8q"`.
    pub fn token(&self) -> String {
        let mut token = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            token.push(promo_char(promo));
        }
        token
    }
}

/// A from/to pair the engine found no legal move for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no legal move from {from} to {to}")]
pub struct MoveError {
    pub from: Square,
    pub to: Square,
}

/// Failure to rebuild a position from its recorded move list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("unrecognized move token {0:?}")]
    BadToken(String),
    #[error("recorded move {0:?} is not legal")]
    Illegal(String),
}

/// The authoritative position plus the history needed for undo,
/// repetition detection, and persistence. Exclusively owned by the
/// session; replaced wholesale on restart or load.
#[derive(Debug, Clone)]
pub struct RulesEngine {
    board: Board,
    /// Pre-move board snapshot and descriptor for each applied move.
    history: Vec<(Board, PlayedMove)>,
    /// Position hashes since the start, current position last.
    hashes: Vec<u64>,
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine {
    /// Standard initial position.
    pub fn new() -> Self {
        let board = Board::default();
        let hashes = vec![board.hash()];
        Self {
            board,
            history: Vec::new(),
            hashes,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_board(board: Board) -> Self {
        let hashes = vec![board.hash()];
        Self {
            board,
            history: Vec::new(),
            hashes,
        }
    }

    /// Piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((piece, color))
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Number of completed half-moves.
    pub fn half_moves(&self) -> usize {
        self.history.len()
    }

    /// Canonical from/to of the most recent move, if any.
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.history.last().map(|(_, mv)| (mv.from, mv.to))
    }

    /// Submit a from/to pair. Promotions default to queen. On rejection
    /// the position is untouched.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<PlayedMove, MoveError> {
        self.submit(from, to, None)
    }

    fn submit(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<PlayedMove, MoveError> {
        let mv = self
            .find_legal(from, to, promotion)
            .ok_or(MoveError { from, to })?;
        let mover = self.board.side_to_move();
        let piece = self
            .board
            .piece_on(mv.from)
            .ok_or(MoveError { from, to })?;

        // cozy-chess encodes castling as king-takes-own-rook; report the
        // king's conventional destination instead and don't mistake the
        // rook for a capture.
        let is_castle = self.board.color_on(mv.to) == Some(mover);
        let captured = if self.board.color_on(mv.to) == Some(!mover) {
            self.board.piece_on(mv.to)
        } else if piece == Piece::Pawn
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none()
        {
            // En passant: pawn steps diagonally onto an empty square.
            Some(Piece::Pawn)
        } else {
            None
        };
        let display_to = if is_castle {
            let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
                File::G
            } else {
                File::C
            };
            Square::new(file, mv.to.rank())
        } else {
            mv.to
        };

        let before = self.board.clone();
        self.board.try_play(mv).map_err(|_| MoveError { from, to })?;
        self.hashes.push(self.board.hash());

        let played = PlayedMove {
            from: mv.from,
            to: display_to,
            mover,
            piece,
            captured,
            promotion: mv.promotion,
        };
        self.history.push((before, played));
        tracing::debug!(%played.from, %played.to, "move applied");
        Ok(played)
    }

    /// Take back the most recent move, restoring the pre-move position.
    pub fn undo(&mut self) -> Option<PlayedMove> {
        let (board, played) = self.history.pop()?;
        self.board = board;
        self.hashes.pop();
        tracing::debug!(%played.from, %played.to, "move undone");
        Some(played)
    }

    pub fn is_checkmate(&self) -> bool {
        self.board.status() == GameStatus::Won
    }

    pub fn is_in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    /// Stalemate, move-rule exhaustion, threefold repetition, or
    /// insufficient mating material.
    pub fn is_draw(&self) -> bool {
        self.board.status() == GameStatus::Drawn
            || self.is_threefold_repetition()
            || self.is_insufficient_material()
    }

    fn is_threefold_repetition(&self) -> bool {
        let current = self.board.hash();
        self.hashes.iter().filter(|&&h| h == current).count() >= 3
    }

    fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        let heavy = board.pieces(Piece::Pawn)
            | board.pieces(Piece::Rook)
            | board.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = board.pieces(Piece::Knight);
        let bishops = board.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 {
            // K vs K, or K + one minor vs K.
            return true;
        }
        if !knights.is_empty() {
            return false;
        }
        // Bishops only: dead position when they all stand on one shade.
        let mut shade = None;
        for sq in bishops {
            let this = (sq.file() as usize + sq.rank() as usize) % 2;
            match shade {
                None => shade = Some(this),
                Some(prev) if prev != this => return false,
                Some(_) => {}
            }
        }
        true
    }

    /// Compact text encoding: the coordinate-notation move list from the
    /// standard start position. Replaying it rebuilds the undo stack, so
    /// undo stays available after a reload.
    pub fn serialize(&self) -> String {
        let tokens: Vec<String> = self.history.iter().map(|(_, mv)| mv.token()).collect();
        tokens.join(" ")
    }

    /// Rebuild an engine by replaying a serialized move list, validating
    /// every move against the rules.
    pub fn deserialize(text: &str) -> Result<Self, ReplayError> {
        let mut engine = Self::new();
        for token in text.split_whitespace() {
            let (from, to, promotion) = parse_token(token)?;
            engine
                .submit(from, to, promotion)
                .map_err(|_| ReplayError::Illegal(token.to_string()))?;
        }
        Ok(engine)
    }

    /// Resolve a from/to pair against the legal move list.
    ///
    /// With `promotion = None` a non-promoting move is preferred but a
    /// queen promotion is accepted, matching click input where no
    /// promotion picker exists. A standard castling click (king two
    /// files sideways) is converted to cozy-chess's encoding first.
    fn find_legal(&self, from: Square, to: Square, promotion: Option<Piece>) -> Option<Move> {
        let to = self.convert_castle_target(from, to);
        let mut found = None;
        self.board.generate_moves(|moves| {
            for mv in moves {
                if mv.from != from || mv.to != to {
                    continue;
                }
                let promo_ok = match promotion {
                    Some(p) => mv.promotion == Some(p),
                    None => mv.promotion.is_none() || mv.promotion == Some(Piece::Queen),
                };
                if promo_ok {
                    found = Some(mv);
                    return true;
                }
            }
            false
        });
        found
    }

    fn convert_castle_target(&self, from: Square, to: Square) -> Square {
        let castle_click = self.board.piece_on(from) == Some(Piece::King)
            && from.file() == File::E
            && from.rank() == to.rank()
            && matches!(to.file(), File::C | File::G);
        if castle_click {
            let rook_file = if to.file() == File::C {
                File::A
            } else {
                File::H
            };
            Square::new(rook_file, to.rank())
        } else {
            to
        }
    }
}

fn promo_char(piece: Piece) -> char {
    match piece {
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        _ => 'q',
    }
}

fn parse_promo(ch: char) -> Option<Piece> {
    match ch {
        'n' => Some(Piece::Knight),
        'b' => Some(Piece::Bishop),
        'r' => Some(Piece::Rook),
        'q' => Some(Piece::Queen),
        _ => None,
    }
}

fn parse_token(token: &str) -> Result<(Square, Square, Option<Piece>), ReplayError> {
    let bad = || ReplayError::BadToken(token.to_string());
    if !token.is_ascii() || (token.len() != 4 && token.len() != 5) {
        return Err(bad());
    }
    let from = parse_square(&token[0..2]).ok_or_else(bad)?;
    let to = parse_square(&token[2..4]).ok_or_else(bad)?;
    let promotion = match token.chars().nth(4) {
        Some(ch) => Some(parse_promo(ch).ok_or_else(bad)?),
        None => None,
    };
    Ok((from, to, promotion))
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
