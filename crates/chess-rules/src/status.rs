//! Check, checkmate, and stalemate detection.

use chess_model::Color;
use serde::{Deserialize, Serialize};

use crate::movegen::filter_legal;
use crate::state::GameState;

/// Situation of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Returns true if the game has ended.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Returns true if the given color's king is attacked.
pub fn is_in_check(state: &GameState, color: Color) -> bool {
    state
        .king_square(color)
        .is_some_and(|sq| state.board.is_attacked(sq, color.opposite()))
}

/// Returns true if any piece of `color` has a legal move.
///
/// The en passant target only belongs to the side to move, so it is ignored
/// when asking about the other color.
pub fn has_any_legal_move(state: &GameState, color: Color) -> bool {
    let en_passant = if color == state.turn {
        state.en_passant
    } else {
        None
    };
    state
        .pieces(color)
        .any(|piece| !filter_legal(state, piece, en_passant).is_empty())
}

pub fn is_checkmate(state: &GameState, color: Color) -> bool {
    is_in_check(state, color) && !has_any_legal_move(state, color)
}

pub fn is_stalemate(state: &GameState, color: Color) -> bool {
    !is_in_check(state, color) && !has_any_legal_move(state, color)
}

/// Returns the status of the side to move.
pub fn status(state: &GameState) -> GameStatus {
    let color = state.turn;
    match (is_in_check(state, color), has_any_legal_move(state, color)) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, true) => GameStatus::Normal,
        (false, false) => GameStatus::Stalemate,
    }
}
