use chess_core::{Engine, GameState, MaterialScorer, Position, SearchError};
use minimax_engine::{MinimaxConfig, MinimaxEngine};

#[test]
fn start_position_depth_three_returns_legal_move_and_restores_position() {
    let mut engine = MinimaxEngine::new(MinimaxConfig::default());
    let mut pos = Position::startpos();
    let before = pos.clone();

    let result = engine.search(&mut pos).unwrap();

    let mv = result.best_move.expect("start position has legal moves");
    assert!(pos.legal_moves().contains(&mv));
    assert_eq!(pos, before);
    assert_eq!(pos.encode(), before.encode());
    assert_eq!(pos.side_to_move(), before.side_to_move());
    assert_eq!(pos.to_notation(), before.to_notation());
}

#[test]
fn node_counter_is_cumulative_and_resettable() {
    let mut engine = MinimaxEngine::new(MinimaxConfig::default().with_depth(2));
    let mut pos = Position::startpos();

    assert_eq!(engine.diagnostics().nodes_evaluated, 0);

    let first = engine.search(&mut pos).unwrap();
    let after_first = engine.diagnostics().nodes_evaluated;
    assert!(after_first > 0);
    assert_eq!(after_first, first.nodes);

    engine.search(&mut pos).unwrap();
    assert_eq!(engine.diagnostics().nodes_evaluated, after_first * 2);

    engine.reset_stats();
    assert_eq!(engine.diagnostics().nodes_evaluated, 0);
}

#[test]
fn diagnostics_report_configuration() {
    let engine = MinimaxEngine::new(MinimaxConfig::default().with_depth(4).with_alpha_beta(false));
    let diagnostics = engine.diagnostics();

    assert_eq!(diagnostics.engine, "Minimax d4");
    assert_eq!(diagnostics.config["depth"], 4);
    assert_eq!(diagnostics.config["alpha_beta"], false);
}

#[test]
fn config_deserializes_with_defaults() {
    let config: MinimaxConfig = serde_json::from_str(r#"{ "depth": 5 }"#).unwrap();
    assert_eq!(config, MinimaxConfig::default().with_depth(5));
}

#[test]
fn best_move_overrides_configured_depth() {
    let mut engine = MinimaxEngine::with_scorer(MinimaxConfig::default(), MaterialScorer);
    let mut pos = Position::startpos();

    let result = engine.best_move(&mut pos, 0).unwrap();

    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0.0);
    assert_eq!(engine.nodes_evaluated(), 1);
}

#[test]
fn rules_errors_convert_into_search_errors() {
    let mut pos = Position::startpos();
    let err: SearchError = pos.pop().unwrap_err().into();
    assert!(matches!(err, SearchError::Rules(_)));
}
