//! Value types for the chess rules engine.
//!
//! This crate provides the small, copyable types shared by the engine and its
//! adapters:
//! - [`Color`] and [`PieceKind`] for piece identity
//! - [`Square`] for board coordinates
//! - [`Move`] and [`MoveKind`] for candidate moves
//! - FEN field parsing via [`FenFields`]
//!
//! Board coordinates follow screen order: rank 0 is Black's back rank (the
//! eighth rank in algebraic notation) and rank 7 is White's. White pawns
//! therefore advance towards lower rank indices.

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenFields};
pub use mov::{Move, MoveKind};
pub use piece::PieceKind;
pub use square::{Square, SquareError};
