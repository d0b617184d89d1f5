//! Legality filter.
//!
//! Every candidate is played on a scratch copy of the board, attacks are
//! recomputed, and the move survives only if the mover's king is not
//! attacked afterwards. The live state is never touched.

use chess_model::{Move, Square};
use tracing::trace;

use super::{pseudo_moves, recompute_attacks};
use crate::board::Piece;
use crate::state::GameState;

/// Returns the legal destinations of the piece on `sq`.
///
/// Empty if the square is empty, holds a piece of the side not to move, or
/// the piece has no legal move.
pub fn legal_moves(state: &GameState, sq: Square) -> Vec<Square> {
    legal_moves_from(state, sq)
        .into_iter()
        .map(|mv| mv.to)
        .collect()
}

/// Returns the legal moves of the piece on `sq`, keeping their kinds.
pub fn legal_moves_from(state: &GameState, sq: Square) -> Vec<Move> {
    match state.board.piece_at(sq) {
        Some(piece) if piece.color == state.turn => filter_legal(state, piece, state.en_passant),
        _ => Vec::new(),
    }
}

/// Returns every legal move of the side to move, in registry order.
pub fn all_legal_moves(state: &GameState) -> Vec<Move> {
    state
        .pieces(state.turn)
        .flat_map(|piece| filter_legal(state, piece, state.en_passant))
        .collect()
}

/// Prunes the pseudo-legal moves of `piece` to the ones that keep its king safe.
pub(crate) fn filter_legal(
    state: &GameState,
    piece: &Piece,
    en_passant: Option<Square>,
) -> Vec<Move> {
    let mut candidates = Vec::with_capacity(28);
    pseudo_moves(&state.board, piece, en_passant, &mut candidates);
    if candidates.is_empty() {
        return candidates;
    }

    let king = state.king(piece.color);
    let them = piece.color.opposite();
    let mut scratch = state.board.clone();
    candidates.retain(|mv| {
        let Some(trial) = scratch.play_trial(mv) else {
            return false;
        };
        recompute_attacks(&mut scratch);
        let safe = scratch
            .piece(king)
            .is_some_and(|k| !scratch.is_attacked(k.square, them));
        scratch.undo_trial(trial);
        if !safe {
            trace!(mv = %mv, "pruned: king left attacked");
        }
        safe
    });
    candidates
}
