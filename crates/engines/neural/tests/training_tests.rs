use chess_core::{GameState, MaterialScorer, Position, Scorer};
use neural_engine::{
    board_features, collect_training_positions, EvalNetwork, NetworkScorer, NUM_FEATURES,
    OUTPUT_SCALE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn collected_positions_are_labelled_by_the_scorer() {
    let mut start = Position::startpos();
    let mut rng = ChaCha20Rng::seed_from_u64(21);

    let samples = collect_training_positions(&mut start, 50, 25, &MaterialScorer, &mut rng).unwrap();

    assert_eq!(samples.len(), 50);
    assert_eq!(start, Position::startpos());
    assert_eq!(start.ply_count(), 0);
    for sample in &samples {
        assert_eq!(sample.features.len(), NUM_FEATURES);
        // Material is a multiple of 10 centipawns
        let centipawns = sample.target * OUTPUT_SCALE;
        assert!((centipawns / 10.0 - (centipawns / 10.0).round()).abs() < 1e-6);
    }
}

#[test]
fn zero_random_moves_sample_the_start_position() {
    let mut start = Position::startpos();
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    let samples = collect_training_positions(&mut start, 3, 0, &MaterialScorer, &mut rng).unwrap();

    for sample in samples {
        assert_eq!(sample.features, board_features(&start));
        assert_eq!(sample.target, 0.0);
    }
}

#[test]
fn finished_start_position_yields_nothing() {
    let mut mated =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    let samples = collect_training_positions(&mut mated, 5, 10, &MaterialScorer, &mut rng).unwrap();

    assert!(samples.is_empty());
}

#[test]
fn trained_network_scorer_scales_forward_output() {
    let mut start = Position::startpos();
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let samples = collect_training_positions(&mut start, 200, 30, &MaterialScorer, &mut rng).unwrap();

    let mut network = EvalNetwork::new(NUM_FEATURES, 64, &mut rng);
    let report = network.train(&samples, 30, 0.01).unwrap();
    assert!(report.final_loss().unwrap() < report.initial_loss().unwrap());

    let scorer = NetworkScorer::new(network);
    let expected = scorer.network().forward(board_features(&start).view()) * OUTPUT_SCALE;
    assert_eq!(Scorer::<Position>::score(&scorer, &start), expected);
    assert!(!start.is_terminal());
}
