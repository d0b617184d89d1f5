//! Move representation.

use crate::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a candidate move does besides relocating the mover.
///
/// Promotion is not a kind of its own: the promotion choice is supplied when
/// the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MoveKind {
    /// Move to an empty square.
    Quiet = 0,
    /// Capture of the piece standing on the destination.
    Capture = 1,
    /// Pawn double step from its starting rank.
    DoubleStep = 2,
    /// En passant capture; the destination is empty.
    EnPassant = 3,
    /// Kingside castling (O-O), expressed as the king's two-square move.
    CastleKingside = 4,
    /// Queenside castling (O-O-O), expressed as the king's two-square move.
    CastleQueenside = 5,
}

impl MoveKind {
    /// Returns true if this move removes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture | MoveKind::EnPassant)
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// A candidate move for the piece on `from`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Returns the long coordinate notation for this move (e.g., "e2e4").
    pub fn to_coordinate(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self.to_coordinate(), self.kind)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
