use super::*;
use crate::board::Position;

#[test]
fn test_material_balanced_at_start() {
    assert_eq!(MaterialScorer.score(&Position::startpos()), 0.0);
}

#[test]
fn test_material_is_white_positive() {
    // White is up a rook.
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
    assert_eq!(MaterialScorer.score(&pos), 500.0);

    // Black is up a queen; side to move does not change the sign.
    let pos = Position::from_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(MaterialScorer.score(&pos), -900.0);
}

#[test]
fn test_terminal_override_scores_mates_and_draws() {
    let scorer = DefaultScorer::default();

    let white_mated =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    assert_eq!(scorer.score(&white_mated), -MATE_SCORE);

    let black_mated =
        Position::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    assert_eq!(scorer.score(&black_mated), MATE_SCORE);

    let stalemate = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(scorer.score(&stalemate), 0.0);
    assert_eq!(MaterialScorer.score(&stalemate), 900.0);
}

#[test]
fn test_scorer_by_reference() {
    let scorer = MaterialScorer;
    let by_ref: &dyn Scorer<Position> = &scorer;
    assert_eq!(by_ref.score(&Position::startpos()), 0.0);
}
