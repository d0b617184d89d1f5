//! FEN (Forsyth-Edwards Notation) field parsing and serialization.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six validated fields of a FEN string.
///
/// The engine is responsible for turning these into a playable state; this
/// type only guarantees that each field is well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    /// Piece placement string (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    pub piece_placement: String,
    /// Side to move.
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-")
    pub castling: String,
    /// En passant target square, if any.
    pub en_passant: Option<Square>,
    /// Halfmove clock
    pub halfmove_clock: u32,
    /// Fullmove number
    pub fullmove_number: u32,
}

impl FenFields {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        Self::validate_piece_placement(piece_placement)?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenFields {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Returns every piece described by the placement field.
    ///
    /// FEN lists the eighth rank first, which is rank index 0.
    pub fn pieces(&self) -> Vec<(Square, PieceKind, Color)> {
        let mut pieces = Vec::new();
        for (rank, row) in self.piece_placement.split('/').enumerate() {
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    if let Ok(sq) = Square::new(file, rank as u8) {
                        pieces.push((sq, kind, color));
                    }
                    file += 1;
                }
            }
        }
        pieces
    }

    /// Returns true if the castling field grants the given right.
    pub fn has_castling_right(&self, color: Color, kingside: bool) -> bool {
        let flag = match (color, kingside) {
            (Color::White, true) => 'K',
            (Color::White, false) => 'Q',
            (Color::Black, true) => 'k',
            (Color::Black, false) => 'q',
        };
        self.castling.contains(flag)
    }

    fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "{} rows, need 8",
                rows.len()
            )));
        }

        for (row, text) in rows.iter().enumerate() {
            let rank_name = 8 - row;
            let mut width = 0u32;
            for c in text.chars() {
                width += match c {
                    '1'..='8' => c.to_digit(10).unwrap_or(0),
                    _ if PieceKind::from_fen_char(c).is_some() => 1,
                    _ => {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "unexpected '{}' on rank {}",
                            c, rank_name
                        )))
                    }
                };
            }
            if width != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} covers {} files",
                    rank_name, width
                )));
            }
        }

        Ok(())
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        let mut seen = Vec::with_capacity(4);
        for c in castling.chars() {
            if !matches!(c, 'K' | 'Q' | 'k' | 'q') || seen.contains(&c) {
                return Err(FenError::InvalidCastlingRights(castling.to_string()));
            }
            seen.push(c);
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        let invalid = || FenError::InvalidEnPassantSquare(ep.to_string());
        let sq = Square::from_algebraic(ep).map_err(|_| invalid())?;
        if !ep.ends_with('3') && !ep.ends_with('6') {
            return Err(invalid());
        }

        Ok(Some(sq))
    }

    /// Converts the fields back to a FEN string.
    pub fn to_fen(&self) -> String {
        let color = match self.active_color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self
            .en_passant
            .map(|sq| sq.to_algebraic())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            color,
            self.castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
