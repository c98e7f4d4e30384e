use super::*;
use chess_core::{Diagnostics, Move, RulesError, SearchResult};
use mcts_engine::{MctsConfig, MctsEngine};
use minimax_engine::{MinimaxConfig, MinimaxEngine};
use neural_engine::{NetworkConfig, NeuralEngine};

fn config(num_games: u32, max_moves: u32) -> MatchConfig {
    MatchConfig {
        num_games,
        max_moves,
        alternate_colors: true,
    }
}

#[test]
fn test_self_play() {
    let mut engine1 = MinimaxEngine::new(MinimaxConfig::default().with_depth(1));
    let mut engine2 = MinimaxEngine::new(MinimaxConfig::default().with_depth(1));

    let runner = MatchRunner::new(config(2, 30));
    let result = runner.run_match(&mut engine1, &mut engine2).unwrap();

    // Self-play should complete without panic
    assert_eq!(result.total_games(), 2);
}

#[test]
fn test_mixed_engines() {
    let mut minimax = MinimaxEngine::new(MinimaxConfig::default().with_depth(1));
    let mut mcts = MctsEngine::new(MctsConfig::for_testing().with_simulations(20));
    let mut neural = NeuralEngine::new(NetworkConfig::default().with_seed(1));

    let runner = MatchRunner::new(config(2, 16));
    let first = runner.run_match(&mut minimax, &mut mcts).unwrap();
    let second = runner.run_match(&mut neural, &mut minimax).unwrap();

    assert_eq!(first.total_games(), 2);
    assert_eq!(second.total_games(), 2);
}

#[test]
fn test_zero_budget_engine_forfeits() {
    let mut idle = MctsEngine::new(MctsConfig::for_testing().with_simulations(0));
    let mut minimax = MinimaxEngine::new(MinimaxConfig::default().with_depth(1));

    let runner = MatchRunner::new(config(1, 10));

    assert_eq!(runner.play_game(&mut idle, &mut minimax).unwrap(), GameResult::Loss);
    assert_eq!(runner.play_game(&mut minimax, &mut idle).unwrap(), GameResult::Win);
}

#[test]
fn test_max_moves_is_a_draw() {
    let mut engine1 = MinimaxEngine::new(MinimaxConfig::default().with_depth(1));
    let mut engine2 = MinimaxEngine::new(MinimaxConfig::default().with_depth(1));

    let runner = MatchRunner::new(config(1, 2));

    assert_eq!(runner.play_game(&mut engine1, &mut engine2).unwrap(), GameResult::Draw);
}

/// Always proposes a1a1, which no position accepts.
struct BrokenEngine;

impl Engine<Position> for BrokenEngine {
    fn search(&mut self, _pos: &mut Position) -> Result<SearchResult<Move>, SearchError> {
        Ok(SearchResult {
            best_move: Some(Move::new(0, 0)),
            score: 0.0,
            nodes: 0,
        })
    }

    fn name(&self) -> &str {
        "Broken"
    }

    fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new("Broken", 0, &())
    }

    fn reset_stats(&mut self) {}
}

#[test]
fn test_illegal_move_surfaces_as_search_error() {
    let mut broken = BrokenEngine;
    let mut minimax = MinimaxEngine::new(MinimaxConfig::default().with_depth(1));

    let runner = MatchRunner::new(config(1, 10));
    let err = runner.run_match(&mut broken, &mut minimax).unwrap_err();

    assert!(
        matches!(
            err,
            TournamentError::Search(SearchError::Rules(RulesError::IllegalMove(_)))
        ),
        "unexpected error: {err}"
    );
}
