//! Move application.

use chess_model::{Color, Move, MoveKind, PieceKind, Square};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Piece;
use crate::error::MoveError;
use crate::movegen::{
    castling_rook, en_passant_victim, is_promotion, legal_moves_from, recompute_attacks,
};
use crate::state::GameState;
use crate::status::{status, GameStatus};

/// What an applied move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub mv: Move,
    /// Status of the side to move after this move.
    pub status: GameStatus,
    pub captured: Option<PieceKind>,
    /// The piece the pawn became, for promotions.
    pub promotion: Option<PieceKind>,
    pub was_capture: bool,
    pub was_en_passant: bool,
    pub was_castle: bool,
    pub was_promotion: bool,
}

impl MoveOutcome {
    /// Returns the move in long coordinate notation, with the promotion
    /// suffix if any (e.g., "e7e8q").
    pub fn to_coordinate(&self) -> String {
        coordinate(self.mv, self.promotion)
    }
}

/// Formats a move in long coordinate notation.
pub(crate) fn coordinate(mv: Move, promotion: Option<PieceKind>) -> String {
    match promotion {
        Some(kind) => format!("{}{}", mv, kind.to_fen_char(Color::Black)),
        None => mv.to_coordinate(),
    }
}

/// Validates and applies a move for the side to move.
///
/// `promotion` is required when a pawn reaches its last rank and ignored
/// otherwise. On error the state is untouched; on success a new state is
/// returned together with what the move did.
pub fn apply_move(
    state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<(GameState, MoveOutcome), MoveError> {
    let piece = *state
        .board
        .piece_at(from)
        .ok_or(MoveError::EmptySquare(from))?;
    if piece.color != state.turn {
        return Err(MoveError::WrongColor {
            square: from,
            piece: piece.kind,
            turn: state.turn,
        });
    }

    let mv = legal_moves_from(state, from)
        .into_iter()
        .find(|mv| mv.to == to)
        .ok_or(MoveError::IllegalMove { from, to })?;

    let promotion = if is_promotion(&piece, to) {
        match promotion {
            None => return Err(MoveError::PromotionRequired(to)),
            Some(kind) if !kind.is_promotion_choice() => {
                return Err(MoveError::InvalidPromotionChoice(kind))
            }
            Some(kind) => Some(kind),
        }
    } else {
        None
    };

    let (next, captured) = commit(state, &piece, mv, promotion);
    let status = status(&next);
    let outcome = MoveOutcome {
        mv,
        status,
        captured,
        promotion,
        was_capture: mv.kind.is_capture(),
        was_en_passant: mv.kind == MoveKind::EnPassant,
        was_castle: mv.kind.is_castle(),
        was_promotion: promotion.is_some(),
    };

    debug!(
        mv = %outcome.to_coordinate(),
        color = %piece.color,
        piece = %piece.kind,
        captured = ?captured,
        status = ?status,
        "move applied"
    );
    if status.is_over() {
        let winner = (status == GameStatus::Checkmate).then_some(piece.color);
        debug!(status = ?status, winner = ?winner, "game over");
    }

    Ok((next, outcome))
}

/// Commits an already validated move to a copy of `state`.
///
/// Returns the new state and the kind of the captured piece, if any.
pub(crate) fn commit(
    state: &GameState,
    mover: &Piece,
    mv: Move,
    promotion: Option<PieceKind>,
) -> (GameState, Option<PieceKind>) {
    let mut next = state.clone();
    let mut captured = None;

    if mv.kind == MoveKind::EnPassant {
        if let Some(victim) = en_passant_victim(&mv) {
            captured = next.capture(victim);
        }
    }
    if let Some((rook_from, rook_to)) = castling_rook(&mv) {
        if let Some(rook) = next.board.relocate(rook_from, rook_to) {
            if let Some(rook) = next.board.piece_mut(rook) {
                rook.has_moved = true;
            }
        }
    }
    if mv.kind == MoveKind::Capture {
        captured = next.capture(mv.to);
    }

    next.board.relocate(mv.from, mv.to);
    if let Some(piece) = next.board.piece_mut(mover.id) {
        piece.has_moved = true;
    }

    if let Some(kind) = promotion {
        next.board.destroy(mover.id);
        next.registry.remove(mover.color, mover.id);
        next.place(kind, mover.color, mv.to);
    }

    next.en_passant = match mv.kind {
        MoveKind::DoubleStep => mv.from.offset(0, mover.color.pawn_direction()),
        _ => None,
    };

    recompute_attacks(&mut next.board);

    if mover.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mover.color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.turn = mover.color.opposite();

    (next, captured)
}
