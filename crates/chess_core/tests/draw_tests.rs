//! Tests for game-end detection through the `GameState` interface
//!
//! Covers every way a game can finish:
//! - Checkmate
//! - Stalemate
//! - Fifty-move rule
//! - Threefold repetition
//! - Insufficient material

use chess_core::{parse_uci_move, Color, DrawReason, GameState, Outcome, Position};

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

fn play(pos: &mut Position, moves: &[&str]) {
    for txt in moves {
        let mv = parse_uci_move(pos, txt).unwrap_or_else(|| panic!("illegal move {txt}"));
        pos.push(mv).unwrap();
    }
}

// =============================================================================
// Checkmate / Stalemate
// =============================================================================

#[test]
fn test_checkmate_outcome_names_winner() {
    // Scholar's mate
    let pos = fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");

    assert!(pos.legal_moves().is_empty());
    assert!(pos.in_check(Color::Black));
    assert_eq!(
        pos.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn test_stalemate_king_in_corner() {
    let pos = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");

    assert!(pos.legal_moves().is_empty());
    assert!(!pos.in_check(Color::Black));
    assert_eq!(pos.outcome(), Some(Outcome::Draw(DrawReason::Stalemate)));
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let pos = fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");

    assert_eq!(pos.outcome(), Some(Outcome::Draw(DrawReason::Stalemate)));
}

#[test]
fn test_check_is_not_terminal() {
    let pos = fen("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");

    assert!(pos.in_check(Color::Black));
    assert!(!pos.legal_moves().is_empty());
    assert!(!pos.is_terminal());
}

// =============================================================================
// Fifty-Move Rule
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let pos = fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 60");

    assert!(pos.is_fifty_move_draw());
    assert_eq!(pos.outcome(), Some(Outcome::Draw(DrawReason::FiftyMoveRule)));
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let pos = fen("8/8/8/4k3/8/4K3/8/R7 w - - 99 60");

    assert!(!pos.is_fifty_move_draw());
    assert!(!pos.is_terminal());
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut pos = fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    play(&mut pos, &["e2e3"]);

    assert_eq!(pos.halfmove_clock, 0);
    assert!(!pos.is_fifty_move_draw());
}

// =============================================================================
// Threefold Repetition
// =============================================================================

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play(&mut pos, &shuffle);
    assert!(!pos.is_threefold_repetition(), "second occurrence only");

    play(&mut pos, &shuffle);
    assert!(pos.is_threefold_repetition());
    assert_eq!(
        pos.outcome(),
        Some(Outcome::Draw(DrawReason::ThreefoldRepetition))
    );

    pos.pop().unwrap();
    assert!(!pos.is_threefold_repetition(), "undo removes the repetition");
}

#[test]
fn test_position_hash_ignores_clocks() {
    let a = fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let b = fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 6 5");

    assert_eq!(a.position_hash(), b.position_hash());
}

#[test]
fn test_position_hash_different_castling_rights() {
    let a = fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let b = fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1");

    assert_ne!(a.position_hash(), b.position_hash());
}

#[test]
fn test_position_hash_different_en_passant() {
    let a = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    let b = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");

    assert_ne!(a.position_hash(), b.position_hash());
}

// =============================================================================
// Insufficient Material
// =============================================================================

#[test]
fn test_insufficient_material_cases() {
    let drawn = [
        ("8/8/8/4k3/8/4K3/8/8 w - - 0 1", "K vs K"),
        ("8/8/8/4k3/8/4KB2/8/8 w - - 0 1", "K+B vs K"),
        ("8/8/8/4k3/8/4KN2/8/8 w - - 0 1", "K+N vs K"),
        ("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1", "K vs K+N"),
        ("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "same-colour bishops"),
    ];
    for (f, label) in drawn {
        let pos = fen(f);
        assert!(pos.is_insufficient_material(), "{label} should be drawn");
        assert_eq!(
            pos.outcome(),
            Some(Outcome::Draw(DrawReason::InsufficientMaterial)),
            "{label}"
        );
    }
}

#[test]
fn test_sufficient_material_cases() {
    let live = [
        ("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", "opposite-colour bishops"),
        ("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1", "pawn"),
        ("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1", "rook"),
        ("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1", "two knights"),
    ];
    for (f, label) in live {
        assert!(!fen(f).is_insufficient_material(), "{label} can still mate");
    }
}
