//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth, which
//! can be compared against published values. Each promotion choice counts as
//! its own move.

use chess_model::{Move, PieceKind};

use super::{all_legal_moves, is_promotion};
use crate::apply::{commit, coordinate};
use crate::state::GameState;

/// Returns the promotion choices for a move: the four pieces for a pawn
/// reaching its last rank, a single `None` otherwise.
fn choices(state: &GameState, mv: &Move) -> Vec<Option<PieceKind>> {
    match state.board.piece_at(mv.from) {
        Some(piece) if is_promotion(piece, mv.to) => {
            PieceKind::PROMOTIONS.iter().copied().map(Some).collect()
        }
        _ => vec![None],
    }
}

/// Counts the number of leaf nodes at the given depth.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for mv in all_legal_moves(state) {
        let choices = choices(state, &mv);
        if depth == 1 {
            nodes += choices.len() as u64;
            continue;
        }
        let Some(&mover) = state.board.piece_at(mv.from) else {
            continue;
        };
        for promotion in choices {
            let (next, _) = commit(state, &mover, mv, promotion);
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}

/// Perft split by root move, in coordinate notation.
/// Useful to find which move has an incorrect count.
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(String, u64)> {
    let mut results = Vec::new();
    for mv in all_legal_moves(state) {
        let Some(&mover) = state.board.piece_at(mv.from) else {
            continue;
        };
        for promotion in choices(state, &mv) {
            let nodes = if depth > 1 {
                let (next, _) = commit(state, &mover, mv, promotion);
                perft(&next, depth - 1)
            } else {
                1
            };
            results.push((coordinate(mv, promotion), nodes));
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
