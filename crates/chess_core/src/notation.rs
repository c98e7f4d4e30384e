//! Move notation: coordinate (UCI) and standard algebraic (SAN) forms.
//!
//! Only used for diagnostics and configuration input, never by search logic.

use crate::{
    board::Position,
    movegen::{has_legal_move, legal_moves},
    types::*,
};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.fen_char());
    }
    s
}

pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    // Matched against legal moves so castle/en-passant flags are correct.
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4).map(|b| b.to_ascii_lowercase()) {
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return None,
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

/// Standard algebraic notation for a legal move, including `+`/`#` suffixes.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let piece = match pos.piece_at(mv.from) {
        Some(p) => p,
        None => return move_to_uci(mv),
    };

    let mut san = if mv.is_castle {
        if file_of(mv.to) == 6 {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let capture = mv.is_en_passant || pos.piece_at(mv.to).is_some();
        let mut s = String::with_capacity(8);
        if piece.kind == PieceKind::Pawn {
            if capture {
                s.push((b'a' + file_of(mv.from) as u8) as char);
            }
        } else {
            s.push(piece.kind.fen_char().to_ascii_uppercase());
            s.push_str(&disambiguation(pos, mv, piece.kind));
        }
        if capture {
            s.push('x');
        }
        s.push_str(&sq_to_coord(mv.to));
        if let Some(p) = mv.promo {
            s.push('=');
            s.push(p.fen_char().to_ascii_uppercase());
        }
        s
    };

    let mut next = pos.clone();
    next.make_move(mv);
    if next.in_check(next.side_to_move) {
        san.push(if has_legal_move(&next) { '+' } else { '#' });
    }
    san
}

fn disambiguation(pos: &Position, mv: Move, kind: PieceKind) -> String {
    let rivals: Vec<Move> = legal_moves(pos)
        .into_iter()
        .filter(|m| {
            m.to == mv.to
                && m.from != mv.from
                && pos.piece_at(m.from).map(|p| p.kind) == Some(kind)
        })
        .collect();
    if rivals.is_empty() {
        return String::new();
    }
    let coord = sq_to_coord(mv.from);
    let same_file = rivals.iter().any(|m| file_of(m.from) == file_of(mv.from));
    let same_rank = rivals.iter().any(|m| rank_of(m.from) == rank_of(mv.from));
    if !same_file {
        coord[0..1].to_string()
    } else if !same_rank {
        coord[1..2].to_string()
    } else {
        coord
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
