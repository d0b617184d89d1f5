//! Error types for the rules engine.
//!
//! Every error is recoverable: a rejected request leaves the game state
//! exactly as it was.

use chess_model::{Color, FenError, PieceKind, Square, SquareError};
use thiserror::Error;

/// Reasons a move request is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("{piece} on {square} does not belong to the side to move ({turn})")]
    WrongColor {
        square: Square,
        piece: PieceKind,
        turn: Color,
    },

    #[error("pawn reaching {0} must be given a promotion piece")]
    PromotionRequired(Square),

    #[error("cannot promote to {0}")]
    InvalidPromotionChoice(PieceKind),

    #[error(transparent)]
    OutOfBounds(#[from] SquareError),

    #[error("invalid move notation: {0:?}")]
    InvalidNotation(String),
}

/// Reasons a position cannot be set up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("{color} has {count} pieces, at most 16 are allowed")]
    TooManyPieces { color: Color, count: usize },

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_error_display() {
        let err = MoveError::IllegalMove {
            from: Square::E1,
            to: Square::E8,
        };
        assert_eq!(err.to_string(), "illegal move: e1 to e8");

        let err = MoveError::WrongColor {
            square: Square::E8,
            piece: PieceKind::King,
            turn: Color::White,
        };
        assert!(err.to_string().contains("King on e8"));
    }

    #[test]
    fn square_errors_convert() {
        let err: MoveError = SquareError::InvalidAlgebraic("z9".into()).into();
        assert!(matches!(err, MoveError::OutOfBounds(_)));
        assert!(err.to_string().contains("z9"));
    }

    #[test]
    fn fen_errors_convert() {
        let err: SetupError = FenError::InvalidPartCount(2).into();
        assert_eq!(err, SetupError::Fen(FenError::InvalidPartCount(2)));
    }
}
