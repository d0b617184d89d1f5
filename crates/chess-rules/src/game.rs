//! Stateful game wrapper with move history.
//!
//! [`GameState`] is a plain value and every rule query is a free function
//! over it. `Game` owns the current state for callers that want to play moves
//! one after another, and keeps what each move did.

use chess_model::{Move, PieceKind, Square};

use crate::apply::{apply_move, MoveOutcome};
use crate::error::{MoveError, SetupError};
use crate::movegen::{all_legal_moves, legal_moves};
use crate::state::GameState;
use crate::status::{status, GameStatus};

/// A chess game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Current position.
    state: GameState,
    /// Position the game started from; [`reset`](Self::reset) returns here.
    start: GameState,
    /// Outcomes of the moves played, oldest first.
    history: Vec<MoveOutcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_state(GameState::new())
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        Ok(Self::from_state(GameState::from_fen(fen)?))
    }

    /// Creates a game starting from the given state.
    pub fn from_state(state: GameState) -> Self {
        Game {
            start: state.clone(),
            state,
            history: Vec::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the legal destinations of the piece on `sq`.
    pub fn legal_moves(&self, sq: Square) -> Vec<Square> {
        legal_moves(&self.state, sq)
    }

    /// Returns every legal move of the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        all_legal_moves(&self.state)
    }

    /// Returns the status of the side to move.
    pub fn status(&self) -> GameStatus {
        status(&self.state)
    }

    /// Returns true if the game ended in checkmate or stalemate.
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// Plays a move. On error the game is unchanged.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, MoveError> {
        let (next, outcome) = apply_move(&self.state, from, to, promotion)?;
        self.state = next;
        self.history.push(outcome);
        Ok(outcome)
    }

    /// Plays a move in long coordinate notation ("e2e4", "e7e8q").
    pub fn play_coordinate(&mut self, text: &str) -> Result<MoveOutcome, MoveError> {
        let (from, to, promotion) = parse_coordinate(text)?;
        self.play(from, to, promotion)
    }

    /// Returns the outcomes of the moves played so far.
    pub fn history(&self) -> &[MoveOutcome] {
        &self.history
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Discards the current position and history, returning to the start.
    pub fn reset(&mut self) {
        self.state = self.start.clone();
        self.history.clear();
    }

    /// Returns the FEN representation of the current position.
    pub fn to_fen(&self) -> String {
        self.state.to_fen()
    }
}

/// Parses long coordinate notation into squares and an optional promotion.
///
/// Any piece letter is accepted as a suffix so that a bad choice such as
/// "e7e8k" is reported as an invalid promotion rather than bad notation.
pub fn parse_coordinate(text: &str) -> Result<(Square, Square, Option<PieceKind>), MoveError> {
    let invalid = || MoveError::InvalidNotation(text.to_string());
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(invalid());
    }

    let from = Square::from_algebraic(&text[0..2])?;
    let to = Square::from_algebraic(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(c) => Some(PieceKind::from_fen_char(c).ok_or_else(invalid)?.0),
        None => None,
    };
    Ok((from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_model::Color;

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert!(!game.is_over());
        assert_eq!(game.status(), GameStatus::Normal);
        assert_eq!(game.all_legal_moves().len(), 20);
    }

    #[test]
    fn play_coordinate() {
        let mut game = Game::new();
        let outcome = game.play_coordinate("e2e4").unwrap();
        assert_eq!(outcome.mv.to_coordinate(), "e2e4");
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.state().turn(), Color::Black);
        assert_eq!(
            game.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn illegal_move() {
        let mut game = Game::new();
        let result = game.play_coordinate("e2e5"); // Can't move pawn 3 squares
        assert!(matches!(result, Err(MoveError::IllegalMove { .. })));
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.state(), &GameState::new());
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play_coordinate(mv).unwrap();
        }
        assert!(game.is_over());
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.history()[3].status, GameStatus::Checkmate);
        assert!(game.all_legal_moves().is_empty());
        assert!(matches!(
            game.play_coordinate("e1f2"),
            Err(MoveError::IllegalMove { .. })
        ));
    }

    #[test]
    fn stalemate() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_over());
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn promotion_suffix() {
        let mut game = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(
            game.play_coordinate("a7a8k"),
            Err(MoveError::InvalidPromotionChoice(PieceKind::King))
        );
        assert_eq!(
            game.play_coordinate("a7a8"),
            Err(MoveError::PromotionRequired(Square::A8))
        );
        let outcome = game.play_coordinate("a7a8N").unwrap();
        assert_eq!(outcome.promotion, Some(PieceKind::Knight));
        assert_eq!(game.history()[0].to_coordinate(), "a7a8n");
    }

    #[test]
    fn bad_notation() {
        let mut game = Game::new();
        assert!(matches!(
            game.play_coordinate("e2"),
            Err(MoveError::InvalidNotation(_))
        ));
        assert!(matches!(
            game.play_coordinate("e2e4x"),
            Err(MoveError::InvalidNotation(_))
        ));
        assert!(matches!(
            game.play_coordinate("i2e4"),
            Err(MoveError::OutOfBounds(_))
        ));
        assert!(matches!(
            game.play_coordinate("é2e4"),
            Err(MoveError::InvalidNotation(_))
        ));
    }

    #[test]
    fn move_history_and_reset() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        game.play_coordinate("e1c1").unwrap();
        game.play_coordinate("e8e7").unwrap();

        let history = game.history();
        assert_eq!(history.len(), 2);
        assert!(history[0].was_castle);
        assert!(!history[1].was_castle);

        game.reset();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.to_fen(), "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    }
}
