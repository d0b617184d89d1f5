//! Move generation.
//!
//! Candidates are produced per piece kind ignoring self-check, then pruned by
//! the legality filter in [`legal`], which plays each one on a scratch board.

mod attacks;
mod legal;
pub mod perft;

use chess_model::{Color, Move, MoveKind, PieceKind, Square};

use crate::board::{Board, Piece};

pub use attacks::{attacks_into, recompute_attacks};
pub use legal::{all_legal_moves, legal_moves, legal_moves_from};

pub(crate) use legal::filter_legal;

use attacks::{slider_directions, KING_OFFSETS, KNIGHT_OFFSETS};

/// Appends the pseudo-legal moves of `piece` to `out`.
///
/// The king's own-square and castling checks read the board's attack flags,
/// which must be fresh.
pub(crate) fn pseudo_moves(
    board: &Board,
    piece: &Piece,
    en_passant: Option<Square>,
    out: &mut Vec<Move>,
) {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, piece, en_passant, out),
        PieceKind::Knight => step_moves(board, piece, &KNIGHT_OFFSETS, out),
        PieceKind::King => {
            king_moves(board, piece, out);
            castling_moves(board, piece, out);
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => slider_moves(board, piece, out),
    }
}

/// Classifies a landing square: `None` if a friendly piece or any king
/// stands on it. Kings are never captured.
fn target_kind(board: &Board, color: Color, to: Square) -> Option<MoveKind> {
    match board.piece_at(to) {
        None => Some(MoveKind::Quiet),
        Some(other) if other.color != color && other.kind != PieceKind::King => {
            Some(MoveKind::Capture)
        }
        Some(_) => None,
    }
}

fn pawn_moves(board: &Board, piece: &Piece, en_passant: Option<Square>, out: &mut Vec<Move>) {
    let from = piece.square;
    let dir = piece.color.pawn_direction();

    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
        out.push(Move::new(from, one, MoveKind::Quiet));
        if !piece.has_moved {
            if let Some(two) = one.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
                out.push(Move::new(from, two, MoveKind::DoubleStep));
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(other) if other.color != piece.color && other.kind != PieceKind::King => {
                out.push(Move::new(from, to, MoveKind::Capture));
            }
            Some(_) => {}
            None if en_passant == Some(to) => {
                let mv = Move::new(from, to, MoveKind::EnPassant);
                let passed = en_passant_victim(&mv).and_then(|sq| board.piece_at(sq));
                if passed.is_some_and(|p| p.kind == PieceKind::Pawn && p.color != piece.color) {
                    out.push(mv);
                }
            }
            None => {}
        }
    }
}

fn step_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)], out: &mut Vec<Move>) {
    let from = piece.square;
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        if let Some(kind) = target_kind(board, piece.color, to) {
            out.push(Move::new(from, to, kind));
        }
    }
}

fn king_moves(board: &Board, piece: &Piece, out: &mut Vec<Move>) {
    let them = piece.color.opposite();
    let start = out.len();
    step_moves(board, piece, &KING_OFFSETS, out);
    // Squares already covered by the opponent are never safe. Squares behind
    // the king on a slider's ray are not covered yet; the simulation sees them.
    let mut index = start;
    while index < out.len() {
        if board.is_attacked(out[index].to, them) {
            out.swap_remove(index);
        } else {
            index += 1;
        }
    }
}

fn castling_moves(board: &Board, king: &Piece, out: &mut Vec<Move>) {
    let color = king.color;
    let them = color.opposite();
    let from = king.square;
    if king.has_moved || from != color.king_home() || board.is_attacked(from, them) {
        return;
    }

    for kingside in [true, false] {
        let rook_ready = board
            .piece_at(color.rook_home(kingside))
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved);
        if !rook_ready {
            continue;
        }

        let (between, path, kind): (&[i8], [i8; 2], MoveKind) = if kingside {
            (&[1, 2], [1, 2], MoveKind::CastleKingside)
        } else {
            (&[-1, -2, -3], [-1, -2], MoveKind::CastleQueenside)
        };

        let clear = between
            .iter()
            .all(|&df| from.offset(df, 0).is_some_and(|sq| board.is_empty(sq)));
        let safe = path
            .iter()
            .all(|&df| from.offset(df, 0).is_some_and(|sq| !board.is_attacked(sq, them)));
        if clear && safe {
            if let Some(to) = from.offset(path[1], 0) {
                out.push(Move::new(from, to, kind));
            }
        }
    }
}

fn slider_moves(board: &Board, piece: &Piece, out: &mut Vec<Move>) {
    let from = piece.square;
    for &(df, dr) in slider_directions(piece.kind) {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match target_kind(board, piece.color, to) {
                Some(MoveKind::Quiet) => out.push(Move::new(from, to, MoveKind::Quiet)),
                Some(kind) => {
                    out.push(Move::new(from, to, kind));
                    break;
                }
                None => break,
            }
            current = to;
        }
    }
}

/// Returns the rook's origin and destination for a castling move.
pub(crate) fn castling_rook(mv: &Move) -> Option<(Square, Square)> {
    match mv.kind {
        MoveKind::CastleKingside => Some((mv.from.offset(3, 0)?, mv.from.offset(1, 0)?)),
        MoveKind::CastleQueenside => Some((mv.from.offset(-4, 0)?, mv.from.offset(-1, 0)?)),
        _ => None,
    }
}

/// Returns the square of the pawn captured en passant: the destination's
/// file on the capturing pawn's rank.
pub(crate) fn en_passant_victim(mv: &Move) -> Option<Square> {
    let rank_delta = mv.from.rank() as i8 - mv.to.rank() as i8;
    mv.to.offset(0, rank_delta)
}

/// Returns true if the piece reaches its last rank by moving to `to`.
pub(crate) fn is_promotion(piece: &Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank()
}
