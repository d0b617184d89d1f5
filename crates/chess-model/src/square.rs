//! Board square representation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when building a [`Square`] from untrusted input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("coordinates ({file}, {rank}) are outside the board")]
    OutOfBounds { file: i16, rank: i16 },

    #[error("invalid algebraic square: {0:?}")]
    InvalidAlgebraic(String),
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed rank-major in screen order:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
///
/// `file` counts from the a-file, `rank` counts from Black's back rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    const fn at(file: u8, rank: u8) -> Self {
        Square(rank * 8 + file)
    }

    /// Creates a square from file and rank, both in `0..8`.
    pub fn new(file: u8, rank: u8) -> Result<Self, SquareError> {
        if file < 8 && rank < 8 {
            Ok(Self::at(file, rank))
        } else {
            Err(SquareError::OutOfBounds {
                file: file.into(),
                rank: rank.into(),
            })
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let invalid = || SquareError::InvalidAlgebraic(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let digit = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&digit) {
            return Err(invalid());
        }
        Ok(Self::at(file - b'a', b'8' - digit))
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the file (0 = a-file, 7 = h-file).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the rank index (0 = eighth rank, 7 = first rank).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the square shifted by the given file and rank deltas, or
    /// `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file >= 0 && file < 8 && rank >= 0 && rank < 8 {
            Some(Self::at(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'8' - self.rank()) as char;
        format!("{}{}", file, rank)
    }

    // Common squares
    pub const A1: Square = Square::at(0, 7);
    pub const B1: Square = Square::at(1, 7);
    pub const C1: Square = Square::at(2, 7);
    pub const D1: Square = Square::at(3, 7);
    pub const E1: Square = Square::at(4, 7);
    pub const F1: Square = Square::at(5, 7);
    pub const G1: Square = Square::at(6, 7);
    pub const H1: Square = Square::at(7, 7);
    pub const A8: Square = Square::at(0, 0);
    pub const B8: Square = Square::at(1, 0);
    pub const C8: Square = Square::at(2, 0);
    pub const D8: Square = Square::at(3, 0);
    pub const E8: Square = Square::at(4, 0);
    pub const F8: Square = Square::at(5, 0);
    pub const G8: Square = Square::at(6, 0);
    pub const H8: Square = Square::at(7, 0);
}

impl TryFrom<(i8, i8)> for Square {
    type Error = SquareError;

    /// Converts `(file, rank)` coordinates, as produced by an input adapter.
    fn try_from((file, rank): (i8, i8)) -> Result<Self, Self::Error> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Ok(Self::at(file as u8, rank as u8))
        } else {
            Err(SquareError::OutOfBounds {
                file: file.into(),
                rank: rank.into(),
            })
        }
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_algebraic())
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Square::from_algebraic(&s).map_err(serde::de::Error::custom)
    }
}
