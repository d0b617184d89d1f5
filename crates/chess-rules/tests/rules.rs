//! End-to-end rule scenarios played through the public API.

use chess_rules::{
    apply_move, has_any_legal_move, is_checkmate, is_in_check, is_stalemate, legal_moves,
    legal_moves_from, new_game, Color, Game, GameState, GameStatus, MoveError, MoveKind,
    PieceKind, Square,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play_all(moves: &[&str]) -> Game {
    let mut game = Game::new();
    for mv in moves {
        game.play_coordinate(mv)
            .unwrap_or_else(|e| panic!("{} rejected: {}", mv, e));
    }
    game
}

#[test]
fn white_has_twenty_opening_moves() {
    let state = new_game();
    let total: usize = state
        .pieces(Color::White)
        .map(|piece| legal_moves(&state, piece.square).len())
        .sum();
    assert_eq!(total, 20);
}

#[test]
fn fools_mate() {
    let game = play_all(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    let state = game.state();
    assert!(is_in_check(state, Color::White));
    assert!(is_checkmate(state, Color::White));
    assert!(!is_stalemate(state, Color::White));
    for piece in state.pieces(Color::White) {
        assert!(
            legal_moves(state, piece.square).is_empty(),
            "{} on {} still has moves",
            piece.kind,
            piece.square
        );
    }
}

#[test]
fn en_passant_only_on_the_next_ply() {
    let game = play_all(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    let moves = legal_moves_from(game.state(), sq("e5"));
    assert!(moves
        .iter()
        .any(|m| m.to == sq("d6") && m.kind == MoveKind::EnPassant));

    // Taking it removes the d5 pawn.
    let mut taken = game.clone();
    let outcome = taken.play_coordinate("e5d6").unwrap();
    assert!(outcome.was_en_passant);
    assert!(taken.state().piece_at(sq("d5")).is_none());

    // Any other move forfeits it.
    let game = {
        let mut game = game;
        game.play_coordinate("h2h3").unwrap();
        game.play_coordinate("h7h6").unwrap();
        game
    };
    assert!(!legal_moves(game.state(), sq("e5")).contains(&sq("d6")));
    assert_eq!(game.state().en_passant(), None);
}

#[test]
fn double_step_without_adjacent_pawn_allows_no_capture() {
    let game = play_all(&["e2e4", "d7d5"]);
    assert_eq!(game.state().en_passant(), Some(sq("d6")));
    assert!(!legal_moves(game.state(), sq("e4")).contains(&sq("d6")));
    assert!(legal_moves(game.state(), sq("e4")).contains(&sq("d5")));
}

const CASTLE_READY: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

#[test]
fn castling_kingside_when_clear() {
    let state = GameState::from_fen(CASTLE_READY).unwrap();
    assert!(legal_moves(&state, Square::E1).contains(&Square::G1));
    assert!(legal_moves(&state, Square::E1).contains(&Square::C1));

    let (state, outcome) = apply_move(&state, Square::E1, Square::G1, None).unwrap();
    assert!(outcome.was_castle);
    assert_eq!(state.piece_at(Square::F1).unwrap().kind, PieceKind::Rook);
    assert_eq!(state.piece_at(Square::G1).unwrap().kind, PieceKind::King);
    assert!(state.piece_at(Square::H1).is_none());
}

#[test]
fn castling_blocked_by_piece_between() {
    let state =
        GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K1NR w KQkq - 0 1").unwrap();
    assert!(!legal_moves(&state, Square::E1).contains(&Square::G1));
}

#[test]
fn castling_lost_after_rook_moves() {
    let mut game = Game::from_fen("r3k2r/p7/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    for mv in ["h1h2", "a7a6", "h2h1", "a6a5"] {
        game.play_coordinate(mv).unwrap();
    }
    assert!(!game.legal_moves(Square::E1).contains(&Square::G1));
    assert!(game.legal_moves(Square::E1).contains(&Square::C1));
    assert!(game.to_fen().contains(" w Qkq "));
}

#[test]
fn castling_lost_after_king_moves() {
    let mut game = Game::from_fen(CASTLE_READY).unwrap();
    for mv in ["e1f1", "a7a6", "f1e1", "a6a5"] {
        game.play_coordinate(mv).unwrap();
    }
    assert!(!game.legal_moves(Square::E1).contains(&Square::G1));
    assert!(!game.legal_moves(Square::E1).contains(&Square::C1));
}

#[test]
fn castling_through_attacked_square() {
    // Black rook covers f1 through the open f-file.
    let state = GameState::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(!legal_moves(&state, Square::E1).contains(&Square::G1));
    assert!(legal_moves(&state, Square::E1).contains(&Square::C1));

    // ... or the destination.
    let state = GameState::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert!(!legal_moves(&state, Square::E1).contains(&Square::G1));
}

#[test]
fn castling_out_of_check() {
    let state = GameState::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
    assert!(is_in_check(&state, Color::White));
    let moves = legal_moves(&state, Square::E1);
    assert!(!moves.contains(&Square::G1));
    assert!(!moves.contains(&Square::C1));
}

#[test]
fn constructed_stalemate() {
    let state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(is_stalemate(&state, Color::Black));
    assert!(!is_checkmate(&state, Color::Black));
    assert!(!has_any_legal_move(&state, Color::Black));
}

#[test]
fn stalemate_reached_by_a_move() {
    let mut game = Game::from_fen("7k/4Q3/6K1/8/8/8/8/8 w - - 0 1").unwrap();
    let outcome = game.play_coordinate("e7f7").unwrap();
    assert_eq!(outcome.status, GameStatus::Stalemate);
    assert!(game.is_over());
}

#[test]
fn king_cannot_retreat_along_checking_ray() {
    let state = GameState::from_fen("4k3/8/8/8/r3K3/8/8/8 w - - 0 1").unwrap();
    let moves = legal_moves(&state, sq("e4"));
    assert_eq!(moves.len(), 6);
    assert!(!moves.contains(&sq("d4")));
    assert!(!moves.contains(&sq("f4")));
}

#[test]
fn promotion_to_queen() {
    let state = GameState::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let pawn = state.piece_at(sq("a7")).unwrap().id;
    let (next, outcome) = apply_move(&state, sq("a7"), sq("a8"), Some(PieceKind::Queen)).unwrap();

    let queen = next.piece_at(sq("a8")).unwrap();
    assert_eq!(queen.kind, PieceKind::Queen);
    assert_eq!(queen.color, Color::White);
    assert!(outcome.was_promotion);
    assert!(!next.registry().contains(Color::White, pawn));
    assert!(next.pieces(Color::White).all(|p| p.kind != PieceKind::Pawn));
}

#[test]
fn promotion_by_capture() {
    let state = GameState::from_fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let (next, outcome) = apply_move(&state, sq("a7"), sq("b8"), Some(PieceKind::Knight)).unwrap();
    assert_eq!(outcome.captured, Some(PieceKind::Rook));
    assert!(outcome.was_capture && outcome.was_promotion);
    assert_eq!(next.piece_at(sq("b8")).unwrap().kind, PieceKind::Knight);
    assert_eq!(next.registry().len(Color::Black), 1);
}

#[test]
fn promoted_piece_counts_as_moved() {
    let state = GameState::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").unwrap();
    let (state, outcome) = apply_move(&state, sq("a2"), sq("a1"), Some(PieceKind::Rook)).unwrap();
    let rook = state.piece_at(Square::A1).unwrap();
    assert_eq!((rook.kind, rook.color), (PieceKind::Rook, Color::Black));
    assert!(rook.has_moved);
    assert_eq!(outcome.status, GameStatus::Check);
}

#[test]
fn failed_requests_leave_state_unchanged() {
    let state = new_game();
    let before = state.clone();
    assert_eq!(
        apply_move(&state, sq("e3"), sq("e4"), None),
        Err(MoveError::EmptySquare(sq("e3")))
    );
    assert!(matches!(
        apply_move(&state, sq("g8"), sq("f6"), None),
        Err(MoveError::WrongColor { .. })
    ));
    assert!(matches!(
        apply_move(&state, sq("b1"), sq("d2"), None),
        Err(MoveError::IllegalMove { .. })
    ));
    assert_eq!(state, before);
}

#[test]
fn out_of_bounds_coordinates() {
    let err: MoveError = Square::try_from((8, 0)).unwrap_err().into();
    assert!(matches!(err, MoveError::OutOfBounds(_)));
}

#[test]
fn legal_moves_is_idempotent() {
    let game = play_all(&["e2e4", "c7c5", "g1f3", "d7d6", "f1b5"]);
    let state = game.state();
    let before = state.clone();
    for sq in Square::all() {
        assert_eq!(legal_moves(state, sq), legal_moves(state, sq));
    }
    assert_eq!(state, &before);
    // Black is in check from the bishop; only blocks and king moves remain.
    assert_eq!(game.status(), GameStatus::Check);
}
