//! Pre-computed empty-board attack tables.
//!
//! Every piece is considered alone on the board: sliders run to the edge and
//! nothing blocks them. Blocking only matters to the disambiguation analysis,
//! which reasons about it with [`ray_from_towards`] instead of occupancy.
//!
//! Tables are initialised once (via `OnceLock`) and live for the lifetime of
//! the process.

use crate::engine::types::{Bitboard, CatalogueError, Direction, PieceKind, Square};
use std::sync::OnceLock;

// =========================================================================
// Public API
// =========================================================================

/// Get a reference to the global attack tables.
pub fn tables() -> &'static AttackTables {
    static TABLES: OnceLock<AttackTables> = OnceLock::new();
    TABLES.get_or_init(AttackTables::init)
}

/// Squares attacked by a lone `kind` on `sq`, excluding `sq` itself.
///
/// Attacks are symmetric for every non-pawn kind, so this is also the set of
/// squares from which a `kind` could reach `sq`.
///
/// # Panics
///
/// Pawn movement depends on the playing direction; use [`pawn_captures`] and
/// [`pawn_pushes`] instead. Passing `PieceKind::Pawn` is a caller bug.
pub fn attacks_from(sq: Square, kind: PieceKind) -> Bitboard {
    let t = tables();
    match kind {
        PieceKind::Knight => t.knight_attacks(sq),
        PieceKind::Bishop => t.bishop_attacks(sq),
        PieceKind::Rook => t.rook_attacks(sq),
        PieceKind::Queen => t.queen_attacks(sq),
        PieceKind::King => t.king_attacks(sq),
        PieceKind::Pawn => panic!("pawn attacks depend on direction: use pawn_captures"),
    }
}

/// The two forward-diagonal squares a pawn on `sq` captures on.
#[inline]
pub fn pawn_captures(sq: Square, dir: Direction) -> Bitboard {
    tables().pawn_attacks[dir.index()][sq.0 as usize]
}

/// Non-capturing destinations: the single push, plus the double push from
/// the start rank. Occupancy is not modelled.
#[inline]
pub fn pawn_pushes(sq: Square, dir: Direction) -> Bitboard {
    tables().pawn_pushes[dir.index()][sq.0 as usize]
}

/// Attacks of a lone `kind` on `sq` with `occupied` squares acting as
/// blockers for sliders. Blocking squares are included (they could be
/// captured). Leapers ignore `occupied`.
pub fn attacks_with_blockers(sq: Square, kind: PieceKind, occupied: Bitboard) -> Bitboard {
    let deltas: &[(i8, i8)] = match kind {
        PieceKind::Bishop => &BISHOP_DELTAS,
        PieceKind::Rook => &ROOK_DELTAS,
        PieceKind::Queen => &QUEEN_DELTAS,
        _ => return attacks_from(sq, kind),
    };
    Bitboard(sliding_attacks(sq.0, occupied.0, deltas))
}

/// Squares leaving `origin` in the direction of `through`, up to the board
/// edge. `through` is included, `origin` is not, and so is every square
/// strictly between them.
///
/// Returns [`CatalogueError::NotAligned`] when the two squares share no
/// file, rank or diagonal (or are the same square).
pub fn ray_from_towards(origin: Square, through: Square) -> Result<Bitboard, CatalogueError> {
    let (dr, df) = line_step(origin, through).ok_or(CatalogueError::NotAligned {
        from: origin,
        through,
    })?;
    Ok(Bitboard(sliding_attacks(origin.0, 0, &[(dr, df)])))
}

/// Unit (rank, file) step from `a` towards `b` if they share a line.
fn line_step(a: Square, b: Square) -> Option<(i8, i8)> {
    if a == b {
        return None;
    }
    let dr = b.rank() as i8 - a.rank() as i8;
    let df = b.file() as i8 - a.file() as i8;
    if dr == 0 || df == 0 || dr.abs() == df.abs() {
        Some((dr.signum(), df.signum()))
    } else {
        None
    }
}

/// Pre-computed attack/move tables for every piece kind.
pub struct AttackTables {
    pub knight: [Bitboard; 64],
    pub king: [Bitboard; 64],
    pub bishop: [Bitboard; 64],
    pub rook: [Bitboard; 64],
    /// `pawn_attacks[direction][square]`: squares a pawn on `square` captures on.
    pub pawn_attacks: [[Bitboard; 64]; 2],
    /// `pawn_pushes[direction][square]`: single and double pushes.
    pub pawn_pushes: [[Bitboard; 64]; 2],
}

impl AttackTables {
    // -------------------------------------------------------------------
    // Leaper lookups
    // -------------------------------------------------------------------

    /// Knight attacks from a square.
    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.0 as usize]
    }

    /// King attacks from a square.
    #[inline]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.0 as usize]
    }

    // -------------------------------------------------------------------
    // Slider lookups (empty board)
    // -------------------------------------------------------------------

    #[inline]
    pub fn rook_attacks(&self, sq: Square) -> Bitboard {
        self.rook[sq.0 as usize]
    }

    #[inline]
    pub fn bishop_attacks(&self, sq: Square) -> Bitboard {
        self.bishop[sq.0 as usize]
    }

    /// Queen attacks = rook | bishop.
    #[inline]
    pub fn queen_attacks(&self, sq: Square) -> Bitboard {
        self.rook_attacks(sq) | self.bishop_attacks(sq)
    }
}

// =========================================================================
// Initialisation
// =========================================================================

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DELTAS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DELTAS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const QUEEN_DELTAS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl AttackTables {
    fn init() -> Self {
        AttackTables {
            knight: leaper_table(&KNIGHT_OFFSETS),
            king: leaper_table(&KING_OFFSETS),
            bishop: slider_table(&BISHOP_DELTAS),
            rook: slider_table(&ROOK_DELTAS),
            pawn_attacks: init_pawn_attacks(),
            pawn_pushes: init_pawn_pushes(),
        }
    }
}

/// Offsets that would leave the board are dropped by checking the rank and
/// file separately, so nothing wraps around an edge.
fn leaper_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in Square::all() {
        table[sq.0 as usize] = offsets
            .iter()
            .filter_map(|&(dr, df)| sq.offset(df, dr))
            .collect();
    }
    table
}

fn slider_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in 0..64u8 {
        table[sq as usize] = Bitboard(sliding_attacks(sq, 0, deltas));
    }
    table
}

fn init_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for dir in Direction::BOTH {
        for sq in Square::all() {
            let next_rank = sq.rank() as i8 + dir.step();
            if !(0..8).contains(&next_rank) {
                continue;
            }
            table[dir.index()][sq.0 as usize] =
                Bitboard::adjacent_files(sq.file()) & Bitboard::rank(next_rank as u8);
        }
    }
    table
}

fn init_pawn_pushes() -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for dir in Direction::BOTH {
        for sq in Square::all() {
            let Some(single) = sq.offset(0, dir.step()) else {
                continue;
            };
            let mut bb = Bitboard::from_square(single);
            if sq.rank() == dir.start_rank()
                && let Some(double) = single.offset(0, dir.step())
            {
                bb.set(double);
            }
            table[dir.index()][sq.0 as usize] = bb;
        }
    }
    table
}

/// Compute sliding attacks along rays from `sq`, using `blockers` as obstacles.
/// `deltas` lists the (rank_delta, file_delta) ray directions.
fn sliding_attacks(sq: u8, blockers: u64, deltas: &[(i8, i8)]) -> u64 {
    let file = (sq & 7) as i8;
    let rank = (sq >> 3) as i8;
    let mut attacks = 0u64;
    for &(dr, df) in deltas {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if blockers & bit != 0 {
                break; // blocked
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

// =========================================================================
// Tests
// =========================================================================
