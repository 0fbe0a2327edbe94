use super::*;
use crate::engine::RulesEngine;

#[test]
fn test_square_label_math() {
    // file = 'a' + col, rank = 8 - row
    for row in 0..8 {
        for col in 0..8 {
            let sq = square_at(row, col);
            let label = sq.to_string();
            let bytes = label.as_bytes();
            assert_eq!(bytes[0], b'a' + col as u8);
            assert_eq!(bytes[1], b'0' + (8 - row) as u8);
        }
    }
}

#[test]
fn test_square_coords_round_trip() {
    for row in 0..8 {
        for col in 0..8 {
            assert_eq!(coords_of(square_at(row, col)), (row, col));
        }
    }
}

#[test]
fn test_parse_square() {
    assert_eq!(parse_square("e4"), Some(square_at(4, 4)));
    assert_eq!(parse_square("a8"), Some(square_at(0, 0)));
    assert_eq!(parse_square("h1"), Some(square_at(7, 7)));
    assert_eq!(parse_square("i1"), None);
    assert_eq!(parse_square("a9"), None);
    assert_eq!(parse_square("e"), None);
    assert_eq!(parse_square("e44"), None);
}

#[test]
fn test_initial_projection() {
    let engine = RulesEngine::new();
    let grid = Grid::project(&engine);

    // Black back rank on row 0, white back rank on row 7.
    assert_eq!(grid.piece(0, 0), Some((Piece::Rook, Color::Black)));
    assert_eq!(grid.piece(0, 4), Some((Piece::King, Color::Black)));
    assert_eq!(grid.piece(7, 4), Some((Piece::King, Color::White)));
    assert_eq!(grid.piece(7, 3), Some((Piece::Queen, Color::White)));
    for col in 0..8 {
        assert_eq!(grid.piece(1, col), Some((Piece::Pawn, Color::Black)));
        assert_eq!(grid.piece(6, col), Some((Piece::Pawn, Color::White)));
    }
    for row in 2..6 {
        for col in 0..8 {
            assert_eq!(grid.piece(row, col), None);
        }
    }
}

#[test]
fn test_projection_matches_engine_after_move() {
    let mut engine = RulesEngine::new();
    engine
        .submit_move(square_at(6, 4), square_at(4, 4))
        .unwrap();
    let grid = Grid::project(&engine);
    for row in 0..8 {
        for col in 0..8 {
            assert_eq!(grid.piece(row, col), engine.piece_at(square_at(row, col)));
        }
    }
    assert_eq!(grid.piece(6, 4), None);
    assert_eq!(grid.piece(4, 4), Some((Piece::Pawn, Color::White)));
}
