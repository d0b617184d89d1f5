//! Replays a scenario's moves through the rules engine.

use chess_rules::{Game, GameStatus, MoveError, MoveOutcome, SetupError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ScenarioConfig;

/// A scenario that could not be replayed to the end.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("invalid starting position: {0}")]
    Setup(#[from] SetupError),
    #[error("move {ply} ({notation}) rejected: {source}")]
    Move {
        ply: usize,
        notation: String,
        #[source]
        source: MoveError,
    },
}

/// Result of a completed replay.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub start_fen: String,
    pub moves: Vec<MoveOutcome>,
    pub final_fen: String,
    pub status: GameStatus,
}

/// Plays every move of the scenario, stopping at the first rejected one.
pub fn run_scenario(name: &str, scenario: &ScenarioConfig) -> Result<ScenarioReport, ReplayError> {
    let mut game = match &scenario.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };
    let start_fen = game.to_fen();
    info!(scenario = name, moves = scenario.moves.len(), "replaying");

    for (index, notation) in scenario.moves.iter().enumerate() {
        let outcome = game
            .play_coordinate(notation)
            .map_err(|source| ReplayError::Move {
                ply: index + 1,
                notation: notation.clone(),
                source,
            })?;
        debug!(ply = index + 1, mv = %outcome.to_coordinate(), status = ?outcome.status, "played");
    }

    Ok(ScenarioReport {
        name: name.to_string(),
        start_fen,
        moves: game.history().to_vec(),
        final_fen: game.to_fen(),
        status: game.status(),
    })
}

impl ScenarioReport {
    /// Renders the report as plain text, one move per line.
    pub fn to_text(&self) -> String {
        let mut out = format!("scenario {}\nstart: {}\n", self.name, self.start_fen);
        for (index, outcome) in self.moves.iter().enumerate() {
            let mut notes = Vec::new();
            if let Some(kind) = outcome.captured {
                notes.push(format!("captures {}", kind));
            }
            if outcome.was_en_passant {
                notes.push("en passant".to_string());
            }
            if outcome.was_castle {
                notes.push("castle".to_string());
            }
            if let Some(kind) = outcome.promotion {
                notes.push(format!("promotes to {}", kind));
            }
            if outcome.status != GameStatus::Normal {
                notes.push(status_name(outcome.status).to_string());
            }
            out.push_str(&format!("{:>3}. {:<6}", index + 1, outcome.to_coordinate()));
            if !notes.is_empty() {
                out.push_str(&format!(" {}", notes.join(", ")));
            }
            out.push('\n');
        }
        out.push_str(&format!("final: {}\nstatus: {}\n", self.final_fen, status_name(self.status)));
        out
    }
}

fn status_name(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Normal => "normal",
        GameStatus::Check => "check",
        GameStatus::Checkmate => "checkmate",
        GameStatus::Stalemate => "stalemate",
    }
}
