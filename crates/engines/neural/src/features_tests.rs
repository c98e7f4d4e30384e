use super::*;
use chess_core::Position;

#[test]
fn test_board_features_startpos() {
    let features = board_features(&Position::startpos());

    assert_eq!(features.len(), NUM_FEATURES);

    // 16 pieces each side, colour signed
    assert_eq!(features.iter().filter(|&&x| x > 0.0).count(), 16);
    assert_eq!(features.iter().filter(|&&x| x < 0.0).count(), 16);

    // a8 black rook comes first, e1 white king is on the last row
    assert_eq!(features[0], -4.0 / 6.0);
    assert_eq!(features[60], 1.0);
}

#[test]
fn test_board_features_empty_squares_are_zero() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let features = board_features(&pos);

    assert_eq!(features.iter().filter(|&&x| x != 0.0).count(), 2);
    assert_eq!(features[4], -1.0);
    assert_eq!(features[60], 1.0);
}
