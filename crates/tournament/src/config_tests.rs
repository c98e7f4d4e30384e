use super::*;

#[test]
fn test_parse_full_config() {
    let config = ArenaConfig::from_toml_str(
        r#"
        games = 4
        max_moves = 150
        alternate_colors = false

        [engine1]
        kind = "minimax"
        depth = 2

        [engine2]
        kind = "mcts"
        num_simulations = 500
        exploration_constant = 0.8
        seed = 7
        "#,
    )
    .unwrap();

    assert_eq!(config.games, 4);
    assert_eq!(config.max_moves, 150);
    assert!(!config.alternate_colors);
    assert_eq!(
        config.engine1,
        EngineSpec::Minimax(MinimaxConfig::default().with_depth(2))
    );
    assert_eq!(
        config.engine2,
        EngineSpec::Mcts(
            MctsConfig::default()
                .with_simulations(500)
                .with_exploration_constant(0.8)
                .with_seed(7)
        )
    );
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = ArenaConfig::from_toml_str("games = 2").unwrap();
    assert_eq!(config.games, 2);
    assert_eq!(config.max_moves, ArenaConfig::default().max_moves);
    assert_eq!(config.engine1, ArenaConfig::default().engine1);
}

#[test]
fn test_parse_neural_spec() {
    let config = ArenaConfig::from_toml_str(
        r#"
        [engine1]
        kind = "neural"
        hidden_size = 32
        seed = 3

        [engine2]
        kind = "neural"
        models_dir = "weights"
        version = "v002"
        "#,
    )
    .unwrap();

    let EngineSpec::Neural(untrained) = &config.engine1 else {
        panic!("expected neural spec, got {:?}", config.engine1);
    };
    assert_eq!(untrained.version, None);
    assert_eq!(untrained.models_dir, PathBuf::from("models"));
    assert_eq!(untrained.network, NetworkConfig::default().with_hidden_size(32).with_seed(3));

    let EngineSpec::Neural(versioned) = &config.engine2 else {
        panic!("expected neural spec, got {:?}", config.engine2);
    };
    assert_eq!(versioned.version.as_deref(), Some("v002"));
    assert_eq!(versioned.models_dir, PathBuf::from("weights"));
}

#[test]
fn test_unknown_engine_kind_is_rejected() {
    let result = ArenaConfig::from_toml_str(
        r#"
        [engine1]
        kind = "random"
        "#,
    );
    assert!(matches!(result, Err(TournamentError::ParseConfig(_))));
}

#[test]
fn test_build_engines() {
    let minimax = EngineSpec::Minimax(MinimaxConfig::default().with_depth(1))
        .build()
        .unwrap();
    assert_eq!(minimax.name(), "Minimax d1");

    let mcts = EngineSpec::Mcts(MctsConfig::for_testing()).build().unwrap();
    assert_eq!(mcts.name(), "MCTS 200");

    let spec = NeuralSpec {
        models_dir: default_models_dir(),
        version: None,
        network: NetworkConfig::default().with_seed(1),
    };
    let neural = EngineSpec::Neural(spec).build().unwrap();
    assert_eq!(neural.name(), "Neural-untrained");
}

#[test]
fn test_missing_model_fails_to_build() {
    let spec = NeuralSpec {
        models_dir: PathBuf::from("/nonexistent/models"),
        version: Some("v999".into()),
        network: NetworkConfig::default(),
    };
    assert!(matches!(
        EngineSpec::Neural(spec).build(),
        Err(TournamentError::Model(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let result = ArenaConfig::load(Path::new("/nonexistent/arena.toml"));
    assert!(matches!(result, Err(TournamentError::ReadConfig { .. })));
}
