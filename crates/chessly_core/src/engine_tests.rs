use super::*;
use crate::grid::parse_square;

fn sq(label: &str) -> Square {
    parse_square(label).unwrap()
}

fn play(engine: &mut RulesEngine, from: &str, to: &str) -> PlayedMove {
    engine.submit_move(sq(from), sq(to)).unwrap()
}

#[test]
fn test_opening_pawn_move() {
    let mut engine = RulesEngine::new();
    let played = play(&mut engine, "e2", "e4");

    assert_eq!(played.from, sq("e2"));
    assert_eq!(played.to, sq("e4"));
    assert_eq!(played.mover, Color::White);
    assert_eq!(played.piece, Piece::Pawn);
    assert_eq!(played.captured, None);
    assert_eq!(engine.side_to_move(), Color::Black);
    assert_eq!(engine.half_moves(), 1);
    assert_eq!(engine.last_move(), Some((sq("e2"), sq("e4"))));
}

#[test]
fn test_illegal_move_rejected_without_mutation() {
    let mut engine = RulesEngine::new();
    let err = engine.submit_move(sq("e2"), sq("e5")).unwrap_err();
    assert_eq!(err, MoveError { from: sq("e2"), to: sq("e5") });
    assert_eq!(engine.half_moves(), 0);
    assert_eq!(engine.side_to_move(), Color::White);
    assert_eq!(engine.piece_at(sq("e2")), Some((Piece::Pawn, Color::White)));
}

#[test]
fn test_capture_reported() {
    let mut engine = RulesEngine::new();
    play(&mut engine, "e2", "e4");
    play(&mut engine, "d7", "d5");
    let played = play(&mut engine, "e4", "d5");

    assert_eq!(played.captured, Some(Piece::Pawn));
    assert_eq!(played.mover, Color::White);
    assert_eq!(engine.piece_at(sq("d5")), Some((Piece::Pawn, Color::White)));
}

#[test]
fn test_en_passant_capture_reported() {
    let mut engine = RulesEngine::new();
    play(&mut engine, "e2", "e4");
    play(&mut engine, "a7", "a6");
    play(&mut engine, "e4", "e5");
    play(&mut engine, "d7", "d5");
    let played = play(&mut engine, "e5", "d6");

    assert_eq!(played.captured, Some(Piece::Pawn));
    // The captured pawn is gone from d5.
    assert_eq!(engine.piece_at(sq("d5")), None);
    assert_eq!(engine.piece_at(sq("d6")), Some((Piece::Pawn, Color::White)));
}

#[test]
fn test_castling_via_king_destination_click() {
    let mut engine = RulesEngine::new();
    play(&mut engine, "e2", "e4");
    play(&mut engine, "e7", "e5");
    play(&mut engine, "g1", "f3");
    play(&mut engine, "g8", "f6");
    play(&mut engine, "f1", "c4");
    play(&mut engine, "f8", "c5");
    let played = play(&mut engine, "e1", "g1");

    assert_eq!(played.piece, Piece::King);
    assert_eq!(played.to, sq("g1"));
    assert_eq!(played.captured, None, "own rook is not a capture");
    assert_eq!(engine.piece_at(sq("g1")), Some((Piece::King, Color::White)));
    assert_eq!(engine.piece_at(sq("f1")), Some((Piece::Rook, Color::White)));
    assert_eq!(engine.piece_at(sq("h1")), None);
}

#[test]
fn test_undo_restores_previous_position() {
    let mut engine = RulesEngine::new();
    play(&mut engine, "e2", "e4");
    play(&mut engine, "d7", "d5");
    play(&mut engine, "e4", "d5");

    let undone = engine.undo().unwrap();
    assert_eq!(undone.captured, Some(Piece::Pawn));
    assert_eq!(engine.half_moves(), 2);
    assert_eq!(engine.side_to_move(), Color::White);
    assert_eq!(engine.piece_at(sq("d5")), Some((Piece::Pawn, Color::Black)));
    assert_eq!(engine.piece_at(sq("e4")), Some((Piece::Pawn, Color::White)));
}

#[test]
fn test_undo_on_fresh_engine() {
    let mut engine = RulesEngine::new();
    assert!(engine.undo().is_none());
}

#[test]
fn test_fools_mate_is_checkmate() {
    let mut engine = RulesEngine::new();
    play(&mut engine, "f2", "f3");
    play(&mut engine, "e7", "e5");
    play(&mut engine, "g2", "g4");
    play(&mut engine, "d8", "h4");

    assert!(engine.is_checkmate());
    assert!(engine.is_in_check());
    assert!(!engine.is_draw());
}

#[test]
fn test_check_detected() {
    let mut engine = RulesEngine::new();
    play(&mut engine, "e2", "e4");
    play(&mut engine, "f7", "f6");
    play(&mut engine, "d1", "h5");

    assert!(engine.is_in_check());
    assert!(!engine.is_checkmate());
}

#[test]
fn test_threefold_repetition_is_draw() {
    let mut engine = RulesEngine::new();
    // Shuffle the knights back and forth; the start position recurs
    // after every fourth half-move.
    for _ in 0..2 {
        play(&mut engine, "g1", "f3");
        play(&mut engine, "g8", "f6");
        play(&mut engine, "f3", "g1");
        play(&mut engine, "f6", "g8");
    }
    assert!(engine.is_draw());
}

#[test]
fn test_insufficient_material_is_draw() {
    let board: cozy_chess::Board = "4k3/8/8/8/8/8/8/4KB2 w - - 0 1".parse().unwrap();
    let engine = RulesEngine::with_board(board);
    assert!(engine.is_draw());

    let board: cozy_chess::Board = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
    let engine = RulesEngine::with_board(board);
    assert!(!engine.is_draw());
}

#[test]
fn test_serialize_round_trip_keeps_undo() {
    let mut engine = RulesEngine::new();
    play(&mut engine, "e2", "e4");
    play(&mut engine, "d7", "d5");
    play(&mut engine, "e4", "d5");

    let encoded = engine.serialize();
    assert_eq!(encoded, "e2e4 d7d5 e4d5");

    let mut restored = RulesEngine::deserialize(&encoded).unwrap();
    assert_eq!(restored.half_moves(), 3);
    assert_eq!(restored.side_to_move(), Color::Black);
    assert_eq!(restored.piece_at(sq("d5")), Some((Piece::Pawn, Color::White)));

    // Undo still works after a reload.
    let undone = restored.undo().unwrap();
    assert_eq!(undone.captured, Some(Piece::Pawn));
    assert_eq!(restored.piece_at(sq("d5")), Some((Piece::Pawn, Color::Black)));
}

#[test]
fn test_deserialize_rejects_garbage() {
    assert!(matches!(
        RulesEngine::deserialize("e2e4 xyzzy"),
        Err(ReplayError::BadToken(_))
    ));
    assert!(matches!(
        RulesEngine::deserialize("e2e5"),
        Err(ReplayError::Illegal(_))
    ));
    assert!(matches!(
        RulesEngine::deserialize("♙♙"),
        Err(ReplayError::BadToken(_))
    ));
}

#[test]
fn test_deserialize_empty_is_fresh() {
    let engine = RulesEngine::deserialize("").unwrap();
    assert_eq!(engine.half_moves(), 0);
    assert_eq!(engine.side_to_move(), Color::White);
}
