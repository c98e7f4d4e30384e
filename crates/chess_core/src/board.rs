use crate::error::RulesError;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: Vec<HistoryEntry>,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

/// One applied move, with the hash of the position it was played from.
#[derive(Clone, Debug)]
struct HistoryEntry {
    mv: Move,
    undo: Undo,
    hash: u64,
}

/// Equality ignores the move history: two positions are equal when the
/// board and all game-state fields match.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    fn empty(side_to_move: Color) -> Self {
        Position {
            board: [None; 64],
            side_to_move,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty(Color::White);
        p.castling = CastlingRights {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        };

        // Pawns
        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parses Forsyth-Edwards Notation. The clock fields are optional.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = |msg: &str| RulesError::InvalidFen(format!("{msg}: '{fen}'"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(invalid("expected at least 4 fields"));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("bad side to move")),
        };
        let mut pos = Position::empty(side_to_move);

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("board section needs 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(invalid("bad piece character")),
                    };
                    let s = sq(file, rank).ok_or_else(|| invalid("too many files in rank"))?;
                    pos.board[s as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(invalid("too many files in rank"));
                }
            }
            if file != 8 {
                return Err(invalid("not enough files in rank"));
            }
        }

        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(invalid("bad castling character")),
                }
            }
        }

        pos.en_passant = if ep_part == "-" {
            None
        } else {
            Some(coord_to_sq(ep_part).ok_or_else(|| invalid("bad en-passant square"))?)
        };

        pos.halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| invalid("bad halfmove clock"))?;
        pos.fullmove_number = fullmove_part
            .parse()
            .map_err(|_| invalid("bad fullmove number"))?;

        Ok(pos)
    }

    /// Exports the position as FEN.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let s = (rank * 8 + file) as u8;
                match self.piece_at(s) {
                    Some(pc) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let before = fen.len();
        if self.castling.wk {
            fen.push('K');
        }
        if self.castling.wq {
            fen.push('Q');
        }
        if self.castling.bk {
            fen.push('k');
        }
        if self.castling.bq {
            fen.push('q');
        }
        if fen.len() == before {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(ep) => fen.push_str(&sq_to_coord(ep)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock, self.fullmove_number
        ));
        fen
    }

    /// Builds a position from an 8x8 encoding. Castling rights, en passant and
    /// history are not representable in the encoding and start empty.
    pub fn from_encoding(encoding: &BoardEncoding, side_to_move: Color) -> Self {
        let mut pos = Position::empty(side_to_move);
        for (row, cells) in encoding.iter().enumerate() {
            for (file, &code) in cells.iter().enumerate() {
                let s = (7 - row) * 8 + file;
                pos.board[s] = Piece::from_code(code);
            }
        }
        pos
    }

    /// Signed piece-type grid, row 0 = rank 8.
    pub fn encode(&self) -> BoardEncoding {
        let mut out = [[0i8; 8]; 8];
        for s in 0..64u8 {
            if let Some(pc) = self.piece_at(s) {
                let row = 7 - rank_of(s) as usize;
                out[row][file_of(s) as usize] = pc.code();
            }
        }
        out
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        find_king(&self.board, c)
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => square_attacked(&self.board, ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        square_attacked(&self.board, target, by)
    }

    /// Number of moves applied through [`Position::push`] and not yet undone.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Zobrist hash of the current position (pieces, side, castling, ep).
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for s in 0..64u8 {
            if let Some(pc) = self.piece_at(s) {
                let piece = pc.color.idx() * 6 + pc.kind.idx();
                h ^= HASH_KEYS[piece * 64 + s as usize];
            }
        }
        if self.side_to_move == Color::Black {
            h ^= HASH_KEYS[SIDE_KEY];
        }
        let rights = [
            self.castling.wk,
            self.castling.wq,
            self.castling.bk,
            self.castling.bq,
        ];
        for (i, &on) in rights.iter().enumerate() {
            if on {
                h ^= HASH_KEYS[CASTLING_KEYS + i];
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= HASH_KEYS[EP_KEYS + file_of(ep) as usize];
        }
        h
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// True once the current position has occurred three times in the
    /// recorded history. Only positions since the last irreversible move are
    /// scanned.
    pub fn is_threefold_repetition(&self) -> bool {
        let window = (self.halfmove_clock as usize).min(self.history.len());
        if window < 4 {
            return false;
        }
        let current = self.position_hash();
        let previous = self.history[self.history.len() - window..]
            .iter()
            .filter(|e| e.hash == current)
            .count();
        previous + 1 >= 3
    }

    /// K vs K, K+minor vs K, and bishops-only endings with all bishops on one
    /// square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_colors = [false; 2];
        for s in 0..64u8 {
            let pc = match self.piece_at(s) {
                Some(p) => p,
                None => continue,
            };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_colors[((file_of(s) + rank_of(s)) % 2) as usize] = true;
                }
                _ => return false,
            }
        }
        if minors <= 1 {
            return true;
        }
        knights == 0 && !(bishop_colors[0] && bishop_colors[1])
    }

    /// Checks that `mv` is legal here without generating every move.
    pub fn is_legal(&self, mv: Move) -> bool {
        let pc = match self.piece_at(mv.from) {
            Some(p) if p.color == self.side_to_move => p,
            _ => return false,
        };
        let mut candidates = Vec::with_capacity(28);
        crate::movegen::pseudo_moves_from(self, mv.from, pc, &mut candidates);
        candidates.contains(&mv) && self.leaves_king_safe(mv)
    }

    /// Applies a legal move and records it so that [`Position::pop`] can undo it.
    pub fn push(&mut self, mv: Move) -> Result<(), RulesError> {
        if !self.is_legal(mv) {
            return Err(RulesError::IllegalMove(format!(
                "{} in {}",
                crate::notation::move_to_uci(mv),
                self.to_fen()
            )));
        }
        let hash = self.position_hash();
        let undo = self.make_move(mv);
        self.history.push(HistoryEntry { mv, undo, hash });
        Ok(())
    }

    /// Undoes the most recent pushed move and returns it.
    pub fn pop(&mut self) -> Result<Move, RulesError> {
        let entry = self.history.pop().ok_or(RulesError::NoMoveToUndo)?;
        self.unmake_move(entry.mv, entry.undo);
        Ok(entry.mv)
    }

    /// Whether the mover's king is safe after `mv`, tested on a scratch copy
    /// of the board array.
    pub(crate) fn leaves_king_safe(&self, mv: Move) -> bool {
        let mut board = self.board;
        let mover = self.side_to_move;
        let moved = match board[mv.from as usize] {
            Some(p) => p,
            None => return false,
        };
        if mv.is_en_passant {
            let dir = match mover {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(mv.to), rank_of(mv.to) + dir) {
                board[cs as usize] = None;
            }
        }
        board[mv.from as usize] = None;
        board[mv.to as usize] = Some(moved);
        match find_king(&board, mover) {
            Some(ksq) => !square_attacked(&board, ksq, mover.other()),
            None => true,
        }
    }

    /// Raw move application without legality checks or history. Callers pair
    /// it with [`Position::unmake_move`].
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = match self.piece_at(from) {
            Some(p) => p,
            None => panic!("make_move: no piece on {}", sq_to_coord(from)),
        };
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        // Halfmove clock reset on capture or pawn move
        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            let dir = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if moved.kind == PieceKind::Pawn && is_promotion_rank(moved.color, to) {
            let promo = mv.promo.unwrap_or(PieceKind::Queen);
            self.set_piece(to, Some(Piece::new(moved.color, promo)));
        }

        // Castling rook move
        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (moved.color, from, to) {
                (Color::White, 4, 6) => Some((7, 5)),
                (Color::White, 4, 2) => Some((0, 3)),
                (Color::Black, 60, 62) => Some((63, 61)),
                (Color::Black, 60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        // King or rook leaving its home square drops the matching rights.
        match moved.color {
            Color::White => {
                if moved.kind == PieceKind::King {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 0 {
                        self.castling.wq = false;
                    }
                    if from == 7 {
                        self.castling.wk = false;
                    }
                }
            }
            Color::Black => {
                if moved.kind == PieceKind::King {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 56 {
                        self.castling.bq = false;
                    }
                    if from == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }
        if let Some(cp) = captured {
            if cp.kind == PieceKind::Rook {
                match (cp.color, to) {
                    (Color::White, 0) => self.castling.wq = false,
                    (Color::White, 7) => self.castling.wk = false,
                    (Color::Black, 56) => self.castling.bq = false,
                    (Color::Black, 63) => self.castling.bk = false,
                    _ => {}
                }
            }
        }

        // Double pawn push sets the en-passant square
        if moved.kind == PieceKind::Pawn {
            let fr = rank_of(from);
            let tr = rank_of(to);
            if (tr - fr).abs() == 2 {
                self.en_passant = sq(file_of(from), (fr + tr) / 2);
            }
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Promotions revert to the original pawn.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        if mv.is_en_passant {
            if let Some(cs) = undo.ep_captured_sq {
                self.set_piece(cs, undo.captured);
            }
        } else {
            self.set_piece(mv.to, undo.captured);
        }
    }
}

/// Hash key layout: 12 × 64 piece-square keys, then black to move, then
/// the four castling rights (K, Q, k, q), then the eight en-passant files.
const SIDE_KEY: usize = 12 * 64;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EP_KEYS: usize = CASTLING_KEYS + 4;
const NUM_HASH_KEYS: usize = EP_KEYS + 8;

pub(crate) static HASH_KEYS: [u64; NUM_HASH_KEYS] = hash_keys();

/// splitmix64 stream from a fixed seed, evaluated at compile time.
const fn hash_keys() -> [u64; NUM_HASH_KEYS] {
    let mut keys = [0u64; NUM_HASH_KEYS];
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let mut i = 0;
    while i < NUM_HASH_KEYS {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        keys[i] = z ^ (z >> 31);
        i += 1;
    }
    keys
}

fn is_promotion_rank(color: Color, to: u8) -> bool {
    let r = rank_of(to);
    (color == Color::White && r == 7) || (color == Color::Black && r == 0)
}

fn find_king(board: &[Option<Piece>; 64], c: Color) -> Option<u8> {
    board
        .iter()
        .position(|pc| matches!(pc, Some(p) if p.color == c && p.kind == PieceKind::King))
        .map(|i| i as u8)
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn holds(board: &[Option<Piece>; 64], s: u8, by: Color, kinds: &[PieceKind]) -> bool {
    matches!(board[s as usize], Some(pc) if pc.color == by && kinds.contains(&pc.kind))
}

/// Whether `target` is attacked by any piece of colour `by`.
pub(crate) fn square_attacked(board: &[Option<Piece>; 64], target: u8, by: Color) -> bool {
    let tf = file_of(target);
    let tr = rank_of(target);

    // A white pawn attacks upward, so it sits one rank below the target.
    let pawn_dr = match by {
        Color::White => -1,
        Color::Black => 1,
    };
    for df in [-1, 1] {
        if let Some(s) = sq(tf + df, tr + pawn_dr) {
            if holds(board, s, by, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    for (df, dr) in KNIGHT_DELTAS {
        if let Some(s) = sq(tf + df, tr + dr) {
            if holds(board, s, by, &[PieceKind::Knight]) {
                return true;
            }
        }
    }

    for (df, dr) in KING_DELTAS {
        if let Some(s) = sq(tf + df, tr + dr) {
            if holds(board, s, by, &[PieceKind::King]) {
                return true;
            }
        }
    }

    let rays: [((i8, i8), [PieceKind; 2]); 8] = [
        ((1, 1), [PieceKind::Bishop, PieceKind::Queen]),
        ((1, -1), [PieceKind::Bishop, PieceKind::Queen]),
        ((-1, 1), [PieceKind::Bishop, PieceKind::Queen]),
        ((-1, -1), [PieceKind::Bishop, PieceKind::Queen]),
        ((1, 0), [PieceKind::Rook, PieceKind::Queen]),
        ((-1, 0), [PieceKind::Rook, PieceKind::Queen]),
        ((0, 1), [PieceKind::Rook, PieceKind::Queen]),
        ((0, -1), [PieceKind::Rook, PieceKind::Queen]),
    ];
    for ((df, dr), sliders) in rays {
        let mut f = tf + df;
        let mut r = tr + dr;
        while let Some(s) = sq(f, r) {
            if board[s as usize].is_some() {
                if holds(board, s, by, &sliders) {
                    return true;
                }
                break;
            }
            f += df;
            r += dr;
        }
    }

    false
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
