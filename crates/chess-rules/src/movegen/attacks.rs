//! Attack patterns for every piece kind and the per-square attack map.
//!
//! The map is rebuilt from scratch after every board mutation. With a fixed
//! 64-square board a full rescan stays cheap, so no incremental update is kept.

use chess_model::{PieceKind, Square};

use crate::board::{Board, Piece};

/// Knight offsets as (file_delta, rank_delta).
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
];

/// King offsets as (file_delta, rank_delta).
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

/// Ray directions for a sliding piece kind; empty for non-sliders.
pub(crate) const fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Queen => &KING_OFFSETS,
        _ => &[],
    }
}

/// Appends every square the piece covers.
///
/// Squares held by the piece's own side are included: a covered square stays
/// covered whoever stands on it. Pawns cover only their two forward diagonals.
pub fn attacks_into(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    let from = piece.square;
    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            out.extend([-1, 1].iter().filter_map(|&df| from.offset(df, dir)));
        }
        PieceKind::Knight => {
            out.extend(KNIGHT_OFFSETS.iter().filter_map(|&(df, dr)| from.offset(df, dr)));
        }
        PieceKind::King => {
            out.extend(KING_OFFSETS.iter().filter_map(|&(df, dr)| from.offset(df, dr)));
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            for &(df, dr) in slider_directions(piece.kind) {
                let mut current = from;
                while let Some(next) = current.offset(df, dr) {
                    out.push(next);
                    if !board.is_empty(next) {
                        break;
                    }
                    current = next;
                }
            }
        }
    }
}

/// Clears and rebuilds every cell's attack flags from the pieces on the board.
pub fn recompute_attacks(board: &mut Board) {
    let mut map = [[false; Square::COUNT]; 2];
    let mut targets = Vec::with_capacity(32);
    for piece in board.pieces() {
        targets.clear();
        attacks_into(board, piece, &mut targets);
        for sq in &targets {
            map[piece.color.index()][sq.index()] = true;
        }
    }
    board.set_attack_map(map);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_model::Color;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn attacks_from(board: &Board, piece: &Piece) -> Vec<Square> {
        let mut out = Vec::new();
        attacks_into(board, piece, &mut out);
        out
    }

    fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    fn squares(names: &[&str]) -> Vec<Square> {
        sorted(names.iter().map(|s| sq(s)).collect())
    }

    #[test]
    fn knight_in_corner() {
        let mut board = Board::empty();
        let id = board.spawn(PieceKind::Knight, Color::White, Square::A1, false);
        let piece = *board.piece(id).unwrap();
        assert_eq!(sorted(attacks_from(&board, &piece)), squares(&["b3", "c2"]));
    }

    #[test]
    fn king_in_center_covers_eight_squares() {
        let mut board = Board::empty();
        let id = board.spawn(PieceKind::King, Color::Black, sq("d4"), true);
        let piece = *board.piece(id).unwrap();
        assert_eq!(attacks_from(&board, &piece).len(), 8);
    }

    #[test]
    fn pawn_covers_diagonals_only() {
        let mut board = Board::empty();
        let white = board.spawn(PieceKind::Pawn, Color::White, sq("e2"), false);
        let black = board.spawn(PieceKind::Pawn, Color::Black, sq("a7"), false);
        // Forward squares are never covered, even when empty.
        let piece = *board.piece(white).unwrap();
        assert_eq!(sorted(attacks_from(&board, &piece)), squares(&["d3", "f3"]));
        let piece = *board.piece(black).unwrap();
        assert_eq!(attacks_from(&board, &piece), vec![sq("b6")]);
    }

    #[test]
    fn slider_ray_includes_first_blocker() {
        let mut board = Board::empty();
        let rook = board.spawn(PieceKind::Rook, Color::White, Square::A1, false);
        board.spawn(PieceKind::Pawn, Color::White, sq("a3"), true);
        board.spawn(PieceKind::Knight, Color::Black, sq("c1"), true);
        let piece = *board.piece(rook).unwrap();
        assert_eq!(
            sorted(attacks_from(&board, &piece)),
            squares(&["a2", "a3", "b1", "c1"])
        );
    }

    #[test]
    fn recompute_marks_both_colors() {
        let mut board = Board::empty();
        board.spawn(PieceKind::Queen, Color::White, sq("d1"), true);
        board.spawn(PieceKind::Pawn, Color::Black, sq("e5"), true);
        recompute_attacks(&mut board);

        assert!(board.is_attacked(sq("h5"), Color::White));
        assert!(board.is_attacked(sq("d8"), Color::White));
        assert!(!board.is_attacked(sq("e2"), Color::White));
        assert!(board.is_attacked(sq("d4"), Color::Black));
        assert!(board.is_attacked(sq("f4"), Color::Black));
        assert!(!board.is_attacked(sq("e4"), Color::Black));
    }

    #[test]
    fn recompute_clears_stale_flags() {
        let mut board = Board::empty();
        let id = board.spawn(PieceKind::Rook, Color::White, sq("h1"), false);
        recompute_attacks(&mut board);
        assert!(board.is_attacked(sq("h8"), Color::White));

        board.destroy(id);
        recompute_attacks(&mut board);
        assert!(Square::all().all(|s| !board.is_attacked(s, Color::White)));
    }
}
