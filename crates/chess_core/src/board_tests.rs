use super::*;
use crate::movegen::legal_moves;

#[test]
fn test_fen_round_trip() {
    let fens = [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "8/8/8/4k3/8/4K3/8/8 w - - 99 60",
    ];
    for fen in fens {
        assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
    }
    assert_eq!(Position::startpos().to_fen(), START_FEN);
}

#[test]
fn test_invalid_fen_is_reported() {
    let bad = [
        "",
        "rnbqkbnr/pppppppp/8/8 w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbxr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ];
    for fen in bad {
        assert!(
            matches!(Position::from_fen(fen), Err(RulesError::InvalidFen(_))),
            "{fen:?} should be rejected"
        );
    }
}

#[test]
fn test_encoding_layout() {
    let enc = Position::startpos().encode();
    assert_eq!(enc[6][0], 1); // white pawn on a2
    assert_eq!(enc[1][0], -1); // black pawn on a7
    assert_eq!(enc[7][4], 6); // white king on e1
    assert_eq!(enc[0][3], -5); // black queen on d8
    assert!(enc[2..6].iter().flatten().all(|&c| c == 0));
}

#[test]
fn test_from_encoding_round_trip() {
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 b - - 0 1").unwrap();
    let rebuilt = Position::from_encoding(&pos.encode(), Color::Black);
    assert_eq!(rebuilt.board, pos.board);
    assert_eq!(rebuilt.side_to_move, Color::Black);
}

#[test]
fn test_push_pop_restores_every_start_move() {
    let mut pos = Position::startpos();
    let fen = pos.to_fen();
    let enc = pos.encode();
    for mv in legal_moves(&pos) {
        pos.push(mv).unwrap();
        assert_ne!(pos.to_fen(), fen);
        assert_eq!(pos.pop().unwrap(), mv);
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(pos.encode(), enc);
        assert_eq!(pos.side_to_move, Color::White);
    }
    assert_eq!(pos.ply_count(), 0);
}

#[test]
fn test_push_rejects_illegal_move() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    // e2e5 is not a pawn move
    let err = pos.push(Move::new(12, 36)).unwrap_err();
    assert!(matches!(err, RulesError::IllegalMove(_)));
    assert_eq!(pos, before);
    // Moving the opponent's piece
    assert!(pos.push(Move::new(52, 44)).is_err());
}

#[test]
fn test_pop_without_history_fails() {
    let mut pos = Position::startpos();
    assert_eq!(pos.pop(), Err(RulesError::NoMoveToUndo));
}

#[test]
fn test_castling_and_promotion_undo() {
    let mut pos = Position::from_fen("r3k2r/1P6/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let before = pos.clone();
    for mv in legal_moves(&pos) {
        pos.push(mv).unwrap();
        pos.pop().unwrap();
        assert_eq!(pos, before, "undo of {mv:?}");
    }
}

#[test]
fn test_en_passant_capture_and_undo() {
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    let ep = legal_moves(&pos)
        .into_iter()
        .find(|m| m.is_en_passant)
        .unwrap();
    let before = pos.clone();
    pos.push(ep).unwrap();
    assert!(pos.piece_at(37).is_none(), "f5 pawn removed");
    pos.pop().unwrap();
    assert_eq!(pos, before);
}

#[test]
fn test_hash_keys_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    for key in HASH_KEYS {
        assert!(seen.insert(key), "duplicate hash key {key:#x}");
    }
}

#[test]
fn test_hash_follows_position_not_path() {
    // Nf3 Nf6 Ng1 Ng8 returns to the start position
    let mut pos = Position::startpos();
    let start = pos.position_hash();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        let mv = crate::notation::parse_uci_move(&pos, uci).unwrap();
        pos.push(mv).unwrap();
    }
    assert_eq!(pos.position_hash(), start);

    pos.pop().unwrap();
    assert_ne!(pos.position_hash(), start);
}

#[test]
fn test_hash_covers_side_castling_and_en_passant() {
    let base = Position::from_fen("r3k2r/8/8/8/4P3/8/8/R3K2R w KQkq - 0 1").unwrap();
    let variants = [
        "r3k2r/8/8/8/4P3/8/8/R3K2R b KQkq - 0 1",
        "r3k2r/8/8/8/4P3/8/8/R3K2R w Kkq - 0 1",
        "r3k2r/8/8/8/4P3/8/8/R3K2R w KQkq e3 0 1",
    ];
    for fen in variants {
        let other = Position::from_fen(fen).unwrap();
        assert_ne!(base.position_hash(), other.position_hash(), "{fen}");
    }
    // Clocks are not part of the hash
    let later = Position::from_fen("r3k2r/8/8/8/4P3/8/8/R3K2R w KQkq - 7 30").unwrap();
    assert_eq!(base.position_hash(), later.position_hash());
}
