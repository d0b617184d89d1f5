//! Mailbox board: 64 cells, each optionally referencing a piece, plus the
//! cached attack flags.

use chess_model::{Color, Move, MoveKind, PieceKind, Square};

use crate::movegen::{castling_rook, en_passant_victim};

/// Stable identity of a piece for its whole life on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u8);

impl PieceId {
    /// Returns the arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A piece in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    /// Always equals the cell that references this piece.
    pub square: Square,
    /// Only meaningful for kings, rooks, and pawns.
    pub has_moved: bool,
}

/// One board cell.
///
/// The attack flags are derived from the pieces on the board and are only as
/// fresh as the last call to [`recompute_attacks`](crate::movegen::recompute_attacks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    occupant: Option<PieceId>,
    attacked_by: [bool; 2],
}

impl Cell {
    const EMPTY: Cell = Cell {
        occupant: None,
        attacked_by: [false; 2],
    };

    /// Returns the piece standing on this cell.
    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    /// Returns true if the cell is covered by a piece of `color`.
    #[inline]
    pub fn is_attacked_by(&self, color: Color) -> bool {
        self.attacked_by[color.index()]
    }
}

/// Cells and the piece arena.
///
/// Captured pieces leave the arena; arena slots are never reused, so a
/// [`PieceId`] never refers to two different pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; Square::COUNT],
    pieces: Vec<Option<Piece>>,
}

/// Undo record for a move played on a scratch board.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Trial {
    from: Square,
    to: Square,
    mover: PieceId,
    captured: Option<(PieceId, Square)>,
    rook: Option<(PieceId, Square, Square)>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [Cell::EMPTY; Square::COUNT],
            pieces: Vec::with_capacity(32),
        }
    }

    /// Returns the cell at the given square.
    #[inline]
    pub fn cell(&self, sq: Square) -> &Cell {
        &self.cells[sq.index()]
    }

    /// Returns the piece with the given id if it is still in play.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the piece standing on the given square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.cells[sq.index()].occupant.and_then(|id| self.piece(id))
    }

    /// Returns true if no piece stands on the given square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index()].occupant.is_none()
    }

    /// Returns true if the square is covered by a piece of `by`.
    #[inline]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.cells[sq.index()].is_attacked_by(by)
    }

    /// Iterates over the pieces on the board in square order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells
            .iter()
            .filter_map(move |cell| cell.occupant.and_then(|id| self.piece(id)))
    }

    /// Creates a new piece on an empty square.
    pub(crate) fn spawn(
        &mut self,
        kind: PieceKind,
        color: Color,
        sq: Square,
        has_moved: bool,
    ) -> PieceId {
        debug_assert!(self.is_empty(sq), "spawn on occupied square {}", sq);
        debug_assert!(self.pieces.len() < u8::MAX as usize, "piece arena exhausted");
        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(Some(Piece {
            id,
            kind,
            color,
            square: sq,
            has_moved,
        }));
        self.cells[sq.index()].occupant = Some(id);
        id
    }

    /// Removes a piece from play entirely.
    pub(crate) fn destroy(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.pieces.get_mut(id.index())?.take()?;
        let cell = &mut self.cells[piece.square.index()];
        if cell.occupant == Some(id) {
            cell.occupant = None;
        }
        Some(piece)
    }

    /// Moves the piece on `from` to the empty square `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<PieceId> {
        let id = self.lift(from)?;
        self.put(id, to);
        Some(id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Takes the piece off its cell without removing it from the arena.
    fn lift(&mut self, sq: Square) -> Option<PieceId> {
        self.cells[sq.index()].occupant.take()
    }

    fn put(&mut self, id: PieceId, sq: Square) {
        self.cells[sq.index()].occupant = Some(id);
        if let Some(piece) = self.piece_mut(id) {
            piece.square = sq;
        }
    }

    /// Overwrites every attack flag.
    pub(crate) fn set_attack_map(&mut self, map: [[bool; Square::COUNT]; 2]) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            cell.attacked_by = [map[0][index], map[1][index]];
        }
    }

    /// Plays a move on this board for a legality trial.
    ///
    /// Captured pieces are lifted off the board but kept in the arena so
    /// [`undo_trial`](Self::undo_trial) can put everything back exactly.
    pub(crate) fn play_trial(&mut self, mv: &Move) -> Option<Trial> {
        let captured_sq = match mv.kind {
            MoveKind::EnPassant => en_passant_victim(mv)?,
            _ => mv.to,
        };
        let mover = self.lift(mv.from)?;
        let captured = self.lift(captured_sq).map(|id| (id, captured_sq));
        let rook = castling_rook(mv).and_then(|(rook_from, rook_to)| {
            let id = self.lift(rook_from)?;
            self.put(id, rook_to);
            Some((id, rook_from, rook_to))
        });
        self.put(mover, mv.to);
        Some(Trial {
            from: mv.from,
            to: mv.to,
            mover,
            captured,
            rook,
        })
    }

    /// Reverts a move played with [`play_trial`](Self::play_trial).
    pub(crate) fn undo_trial(&mut self, trial: Trial) {
        self.lift(trial.to);
        self.put(trial.mover, trial.from);
        if let Some((id, rook_from, rook_to)) = trial.rook {
            self.lift(rook_to);
            self.put(id, rook_from);
        }
        if let Some((id, sq)) = trial.captured {
            self.put(id, sq);
        }
    }
}
