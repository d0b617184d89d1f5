//! Chess rules engine.
//!
//! This crate provides:
//! - [`GameState`] - board, piece registry, side to move, en passant target
//! - Legal move generation per square ([`legal_moves`]) and for the side to
//!   move ([`all_legal_moves`])
//! - Check, checkmate, and stalemate detection
//! - [`apply_move`] - validated move application, including castling,
//!   en passant, and promotion
//! - [`Game`] - a stateful wrapper that records move history
//! - [`perft`] for validating the generator against published counts
//!
//! # Architecture
//!
//! The board is a 64-cell mailbox. Each cell references at most one piece and
//! caches whether each color attacks it; the cache is rebuilt from scratch
//! after every change. Candidate moves are generated per piece kind while
//! ignoring self-check, then each candidate is played on a scratch board to
//! see whether it leaves its own king attacked.
//!
//! # Example
//!
//! ```
//! use chess_rules::{apply_move, is_checkmate, legal_moves, new_game, Color, Square};
//!
//! let state = new_game();
//! let e2: Square = "e2".parse().unwrap();
//! assert_eq!(legal_moves(&state, e2).len(), 2);
//!
//! let (state, outcome) = apply_move(&state, e2, "e4".parse().unwrap(), None).unwrap();
//! assert_eq!(state.turn(), Color::Black);
//! assert!(!outcome.was_capture);
//! assert!(!is_checkmate(&state, Color::Black));
//! ```

mod apply;
mod board;
mod error;
mod game;
pub mod movegen;
mod registry;
mod state;
mod status;

pub use apply::{apply_move, MoveOutcome};
pub use board::{Board, Cell, Piece, PieceId};
pub use error::{MoveError, SetupError};
pub use game::{parse_coordinate, Game};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{all_legal_moves, legal_moves, legal_moves_from};
pub use registry::PieceRegistry;
pub use state::GameState;
pub use status::{has_any_legal_move, is_checkmate, is_in_check, is_stalemate, status, GameStatus};

pub use chess_model::{Color, FenError, FenFields, Move, MoveKind, PieceKind, Square, SquareError};

/// Creates the standard starting position with White to move.
pub fn new_game() -> GameState {
    GameState::new()
}
