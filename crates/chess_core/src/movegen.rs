use crate::{board::Position, types::*};

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
/// Order is deterministic: squares a1..h8, then the generator's direction order.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);
    out.retain(|&mv| pos.leaves_king_safe(mv));
}

/// Stops at the first legal move found.
pub fn has_legal_move(pos: &Position) -> bool {
    let mut buf = Vec::with_capacity(28);
    for s in 0..64u8 {
        let pc = match pos.piece_at(s) {
            Some(p) if p.color == pos.side_to_move => p,
            _ => continue,
        };
        buf.clear();
        pseudo_moves_from(pos, s, pc, &mut buf);
        if buf.iter().any(|&mv| pos.leaves_king_safe(mv)) {
            return true;
        }
    }
    false
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for s in 0..64u8 {
        match pos.piece_at(s) {
            Some(pc) if pc.color == pos.side_to_move => pseudo_moves_from(pos, s, pc, out),
            _ => {}
        }
    }
}

/// Pseudo-legal moves of the piece `pc` standing on `from`.
pub(crate) fn pseudo_moves_from(pos: &Position, from: u8, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
        PieceKind::Knight => gen_steps(pos, from, pc.color, out, &KNIGHT_JUMPS),
        PieceKind::Bishop => gen_slider(pos, from, pc.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(pos, from, pc.color, out, &ORTHOGONALS),
        PieceKind::Queen => gen_slider(pos, from, pc.color, out, &ALL_DIRECTIONS),
        PieceKind::King => {
            gen_steps(pos, from, pc.color, out, &ALL_DIRECTIONS);
            gen_castle(pos, from, pc.color, out);
        }
    }
}

fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in PROMOTIONS {
            let mut mv = Move::new(from, to);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);

    let (dir, start_rank, promo_rank): (i8, i8, i8) = match c {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    if let Some(to) = sq(f, r + dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, promo_rank, out);

            if r == start_rank {
                if let Some(to2) = sq(f, r + 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let to = match sq(f + df, r + dir) {
            Some(t) => t,
            None => continue,
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(from, to, promo_rank, out),
            Some(_) => {}
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            None => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (king_from, kingside, queenside) = match c {
        Color::White => (4u8, pos.castling.wk, pos.castling.wq),
        Color::Black => (60u8, pos.castling.bk, pos.castling.bq),
    };
    if from != king_from || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let empty = |squares: &[u8]| squares.iter().all(|&s| pos.piece_at(s).is_none());
    let safe = |squares: &[u8]| squares.iter().all(|&s| !pos.is_square_attacked(s, enemy));

    // Kingside: f and g files must be empty and unattacked.
    let (f_sq, g_sq) = (king_from + 1, king_from + 2);
    if kingside && empty(&[f_sq, g_sq]) && safe(&[f_sq, g_sq]) {
        let mut mv = Move::new(king_from, g_sq);
        mv.is_castle = true;
        out.push(mv);
    }

    // Queenside: b, c and d files empty; only c and d need to be unattacked.
    let (d_sq, c_sq, b_sq) = (king_from - 1, king_from - 2, king_from - 3);
    if queenside && empty(&[d_sq, c_sq, b_sq]) && safe(&[d_sq, c_sq]) {
        let mut mv = Move::new(king_from, c_sq);
        mv.is_castle = true;
        out.push(mv);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
