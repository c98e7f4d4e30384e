//! Match runner for playing games between engines

use chess_core::{Color, Engine, GameState, Outcome, Position, SearchError};
use tracing::{debug, info, warn};

use crate::error::TournamentError;
use crate::result::{GameResult, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Maximum plies per game before declaring draw
    pub max_moves: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_moves: 200,
            alternate_colors: true,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(
        &self,
        engine1: &mut dyn Engine<Position>,
        engine2: &mut dyn Engine<Position>,
    ) -> Result<MatchResult, TournamentError> {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            // Alternate colors if configured
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let game_result = if engine1_white {
                self.play_game(engine1, engine2)?
            } else {
                // Flip result since engine1 is black
                self.play_game(engine2, engine1)?.flipped()
            };
            result.record(game_result);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                engine1 = engine1.name(),
                color = if engine1_white { "W" } else { "B" },
                result = game_result.as_pgn(),
                wins = result.wins,
                losses = result.losses,
                draws = result.draws,
                "game finished"
            );
        }

        Ok(result)
    }

    /// Play a single game from the start position, returns result from
    /// white's perspective
    pub fn play_game(
        &self,
        white: &mut dyn Engine<Position>,
        black: &mut dyn Engine<Position>,
    ) -> Result<GameResult, TournamentError> {
        let mut pos = Position::startpos();
        white.new_game();
        black.new_game();

        for ply in 0..self.config.max_moves {
            if let Some(outcome) = pos.outcome() {
                debug!(ply, ?outcome, fen = %pos.to_fen(), "game over");
                return Ok(white_result(outcome));
            }

            let side = pos.side_to_move();
            let engine: &mut dyn Engine<Position> = match side {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };

            let Some(mv) = engine.search(&mut pos)?.best_move else {
                // Only reachable with a zero search budget
                warn!(engine = engine.name(), ply, "engine proposed no move, forfeiting");
                return Ok(match side {
                    Color::White => GameResult::Loss,
                    Color::Black => GameResult::Win,
                });
            };

            debug!(ply, engine = engine.name(), san = %pos.move_to_short(mv), "move");
            pos.push(mv).map_err(SearchError::from)?;
        }

        // Max moves reached
        Ok(match pos.outcome() {
            Some(outcome) => white_result(outcome),
            None => GameResult::Draw,
        })
    }
}

fn white_result(outcome: Outcome) -> GameResult {
    match outcome.winner() {
        Some(Color::White) => GameResult::Win,
        Some(Color::Black) => GameResult::Loss,
        None => GameResult::Draw,
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
