//! Game state: board, piece registry, side to move, and en passant target.

use chess_model::{Color, FenFields, PieceKind, Square};
use tracing::debug;

use crate::board::{Board, Piece, PieceId};
use crate::error::SetupError;
use crate::movegen::recompute_attacks;
use crate::registry::PieceRegistry;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A complete, playable chess position.
///
/// Queries take `&GameState`; moves are applied with
/// [`apply_move`](crate::apply_move), which returns a new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) registry: PieceRegistry,
    pub(crate) turn: Color,
    /// Passed-over square of the last double step, for exactly one ply.
    pub(crate) en_passant: Option<Square>,
    /// Kings are relocated but never removed.
    pub(crate) kings: [PieceId; 2],
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl GameState {
    /// Creates the standard starting position with White to move.
    pub fn new() -> Self {
        let mut board = Board::empty();
        let mut registry = PieceRegistry::new();
        let kings = Color::ALL.map(|color| {
            let id = board.spawn(PieceKind::King, color, color.king_home(), false);
            registry.insert(color, id);
            id
        });

        for sq in Square::all() {
            for color in Color::ALL {
                let kind = if sq.rank() == color.back_rank() {
                    BACK_RANK[sq.file() as usize]
                } else if sq.rank() == color.pawn_rank() {
                    PieceKind::Pawn
                } else {
                    continue;
                };
                if kind != PieceKind::King {
                    let id = board.spawn(kind, color, sq, false);
                    registry.insert(color, id);
                }
            }
        }
        recompute_attacks(&mut board);

        GameState {
            board,
            registry,
            turn: Color::White,
            en_passant: None,
            kings,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Builds a position from a FEN string.
    ///
    /// Movement history is inferred from the castling field: a king or rook
    /// counts as unmoved only while a matching castling right remains, and a
    /// pawn counts as unmoved only on its starting rank. An en passant target
    /// with no double-stepped pawn behind it is dropped.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let fields = FenFields::parse(fen)?;
        let placed = fields.pieces();

        for color in Color::ALL {
            let count = placed.iter().filter(|(_, _, c)| *c == color).count();
            if count > 16 {
                return Err(SetupError::TooManyPieces { color, count });
            }
        }
        if let Some((sq, _, _)) = placed.iter().find(|(sq, kind, _)| {
            *kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7)
        }) {
            return Err(SetupError::PawnOnBackRank(*sq));
        }

        let mut board = Board::empty();
        let mut registry = PieceRegistry::new();
        let mut kings: [Vec<PieceId>; 2] = Default::default();
        for &(sq, kind, color) in &placed {
            let has_moved = !starts_unmoved(&fields, sq, kind, color);
            let id = board.spawn(kind, color, sq, has_moved);
            registry.insert(color, id);
            if kind == PieceKind::King {
                kings[color.index()].push(id);
            }
        }
        let king_of = |color: Color| match kings[color.index()].as_slice() {
            [id] => Ok(*id),
            found => Err(SetupError::KingCount {
                color,
                count: found.len(),
            }),
        };
        let kings = [king_of(Color::White)?, king_of(Color::Black)?];
        recompute_attacks(&mut board);

        let mut state = GameState {
            board,
            registry,
            turn: fields.active_color,
            en_passant: None,
            kings,
            halfmove_clock: fields.halfmove_clock,
            fullmove_number: fields.fullmove_number,
        };
        let waiting = state.turn.opposite();
        if state
            .king_square(waiting)
            .is_some_and(|sq| state.board.is_attacked(sq, state.turn))
        {
            return Err(SetupError::OpponentInCheck(waiting));
        }
        state.en_passant = fields
            .en_passant
            .filter(|&target| state.en_passant_consistent(target));
        if fields.en_passant.is_some() && state.en_passant.is_none() {
            debug!(fen, "dropping en passant target with no passed pawn");
        }
        debug!(fen, turn = %state.turn, "position loaded");
        Ok(state)
    }

    /// Returns true if an opponent pawn just double-stepped across `target`.
    fn en_passant_consistent(&self, target: Square) -> bool {
        let mover = self.turn.opposite();
        let dir = mover.pawn_direction();
        let passed = target
            .offset(0, dir)
            .and_then(|sq| self.board.piece_at(sq))
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == mover);
        let origin_empty = target
            .offset(0, -dir)
            .is_some_and(|sq| self.board.is_empty(sq));
        passed && origin_empty && self.board.is_empty(target)
    }

    /// Serializes the position as FEN. Castling rights come from the
    /// `has_moved` flags of the kings and corner rooks.
    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(72);
        for rank in 0..8u8 {
            if rank > 0 {
                placement.push('/');
            }
            let mut empty = 0;
            for sq in Square::all().filter(|sq| sq.rank() == rank) {
                match self.board.piece_at(sq) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.kind.to_fen_char(piece.color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
        }

        let mut castling = String::new();
        for color in Color::ALL {
            for kingside in [true, false] {
                if self.can_still_castle(color, kingside) {
                    let flag = if kingside { 'k' } else { 'q' };
                    castling.push(match color {
                        Color::White => flag.to_ascii_uppercase(),
                        Color::Black => flag,
                    });
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        FenFields {
            piece_placement: placement,
            active_color: self.turn,
            castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns true if neither the king nor that corner's rook has moved.
    ///
    /// This is a castling right, not a legal castle: the path may still be
    /// blocked or attacked.
    pub fn can_still_castle(&self, color: Color, kingside: bool) -> bool {
        let king_ready = self
            .board
            .piece(self.king(color))
            .is_some_and(|k| !k.has_moved && k.square == color.king_home());
        let rook_ready = self
            .board
            .piece_at(color.rook_home(kingside))
            .is_some_and(|r| r.kind == PieceKind::Rook && r.color == color && !r.has_moved);
        king_ready && rook_ready
    }

    /// Returns the side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the en passant target square, if a double step was just played.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the id of the given color's king.
    #[inline]
    pub fn king(&self, color: Color) -> PieceId {
        self.kings[color.index()]
    }

    /// Returns the square of the given color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.piece(self.king(color)).map(|k| k.square)
    }

    /// Returns the piece on the given square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }

    /// Iterates over the live pieces of a color in registry order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.registry
            .pieces(color)
            .iter()
            .filter_map(move |&id| self.board.piece(id))
    }

    /// Checks that the registry and the board describe the same pieces.
    pub fn is_consistent(&self) -> bool {
        let registered: usize = Color::ALL.iter().map(|&c| self.registry.len(c)).sum();
        let on_board = self.board.pieces().count();
        let registry_matches = Color::ALL.iter().all(|&color| {
            self.registry.pieces(color).iter().all(|&id| {
                self.board.piece(id).is_some_and(|p| {
                    p.color == color && self.board.cell(p.square).occupant() == Some(id)
                })
            })
        });
        let kings_alive = Color::ALL.iter().all(|&color| {
            self.board
                .piece(self.king(color))
                .is_some_and(|k| k.kind == PieceKind::King && k.color == color)
        });
        registered == on_board && registry_matches && kings_alive
    }

    /// Removes the piece on `sq` from the board and its registry.
    pub(crate) fn capture(&mut self, sq: Square) -> Option<PieceKind> {
        let id = self.board.cell(sq).occupant()?;
        let piece = self.board.destroy(id)?;
        self.registry.remove(piece.color, id);
        Some(piece.kind)
    }

    /// Creates a piece on an empty square and registers it.
    pub(crate) fn place(&mut self, kind: PieceKind, color: Color, sq: Square) -> PieceId {
        let id = self.board.spawn(kind, color, sq, true);
        self.registry.insert(color, id);
        id
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Infers whether a piece loaded from FEN still has its first move.
fn starts_unmoved(fields: &FenFields, sq: Square, kind: PieceKind, color: Color) -> bool {
    if !kind.tracks_moved() {
        return false;
    }
    match kind {
        PieceKind::King => {
            sq == color.king_home()
                && (fields.has_castling_right(color, true)
                    || fields.has_castling_right(color, false))
        }
        PieceKind::Rook => [true, false].into_iter().any(|kingside| {
            sq == color.rook_home(kingside) && fields.has_castling_right(color, kingside)
        }),
        _ => sq.rank() == color.pawn_rank(),
    }
}
