use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// The two playing directions a pawn can advance in.
///
/// Notation is colour-agnostic, so the catalogue only cares about which way
/// the rank index moves: `Up` is the side starting on rank 2, `Down` the side
/// starting on rank 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Up, Direction::Down];

    /// Index for array lookups: Up=0, Down=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub const fn step(self) -> i8 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    /// Rank from which a double push is allowed (0-based).
    #[inline]
    pub const fn start_rank(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 6,
        }
    }

    /// Rank on which a pawn must promote (0-based).
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Direction::Up => 7,
            Direction::Down => 0,
        }
    }

    /// Parse from string (case-insensitive). Accepts the colour names too.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "white" | "+1" | "1" => Some(Direction::Up),
            "down" | "black" | "-1" => Some(Direction::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in the order they are rendered.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Kinds whose moves can carry a discriminator.
    pub const DISCRIMINATED: [PieceKind; 4] = PieceKind::PROMOTIONS;

    /// Bishops, rooks and queens move along rays until blocked.
    #[inline]
    pub const fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Notation letter. Pawns have none.
    pub const fn letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Parse a notation letter (uppercase only, as used in SAN).
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Parse a piece name or letter (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pawn" | "p" => Some(PieceKind::Pawn),
            "knight" | "n" => Some(PieceKind::Knight),
            "bishop" | "b" => Some(PieceKind::Bishop),
            "rook" | "r" => Some(PieceKind::Rook),
            "queen" | "q" => Some(PieceKind::Queen),
            "king" | "k" => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn"),
            PieceKind::Knight => write!(f, "knight"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the board (0..63, LERF: a1=0, h8=63).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    #[inline]
    pub fn file(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// Out-of-range coordinates are a caller bug and panic.
    #[inline]
    pub fn from_file_rank(file: u8, rank: u8) -> Self {
        assert!(
            file < 8 && rank < 8,
            "file/rank out of range: ({file}, {rank})"
        );
        Square(rank * 8 + file)
    }

    /// Signed-offset variant used by the generators; `None` when the
    /// coordinates fall off the board.
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let f = self.file() as i8 + file_delta;
        let r = self.rank() as i8 + rank_delta;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Square::from_file_rank(f as u8, r as u8))
        } else {
            None
        }
    }

    /// Every square, a1 through h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square::from_file_rank(file, rank))
        } else {
            None
        }
    }

    /// Convert to algebraic notation like "e4".
    pub fn to_algebraic(self) -> String {
        format!("{}{}", file_char(self.file()), rank_char(self.rank()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// File letter, `a`..`h`.
#[inline]
pub fn file_char(file: u8) -> char {
    debug_assert!(file < 8);
    (b'a' + file) as char
}

/// Rank digit, `1`..`8`.
#[inline]
pub fn rank_char(rank: u8) -> char {
    debug_assert!(rank < 8);
    (b'1' + rank) as char
}

// ---------------------------------------------------------------------------
// Bitboard
// ---------------------------------------------------------------------------

const FILE_A: u64 = 0x0101_0101_0101_0101;
const RANK_1: u64 = 0xFF;

/// Per-file masks, `FILE_MASKS[0]` is the a-file.
pub const FILE_MASKS: [Bitboard; 8] = {
    let mut masks = [Bitboard(0); 8];
    let mut f = 0;
    while f < 8 {
        masks[f] = Bitboard(FILE_A << f);
        f += 1;
    }
    masks
};

/// Per-rank masks, `RANK_MASKS[0]` is the first rank.
pub const RANK_MASKS: [Bitboard; 8] = {
    let mut masks = [Bitboard(0); 8];
    let mut r = 0;
    while r < 8 {
        masks[r] = Bitboard(RANK_1 << (8 * r));
        r += 1;
    }
    masks
};

/// A 64-bit bitboard: one bit per square.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0u64);

    #[inline]
    pub fn from_square(sq: Square) -> Self {
        Bitboard(1u64 << sq.0)
    }

    /// All squares on `file`.
    #[inline]
    pub fn file(file: u8) -> Self {
        FILE_MASKS[file as usize]
    }

    /// All squares on `rank`.
    #[inline]
    pub fn rank(rank: u8) -> Self {
        RANK_MASKS[rank as usize]
    }

    /// Union of the one or two files next to `file`.
    pub fn adjacent_files(file: u8) -> Self {
        let mut bb = Bitboard::EMPTY;
        if file > 0 {
            bb |= Bitboard::file(file - 1);
        }
        if file < 7 {
            bb |= Bitboard::file(file + 1);
        }
        bb
    }

    /// Union of the one or two ranks next to `rank`.
    pub fn adjacent_ranks(rank: u8) -> Self {
        let mut bb = Bitboard::EMPTY;
        if rank > 0 {
            bb |= Bitboard::rank(rank - 1);
        }
        if rank < 7 {
            bb |= Bitboard::rank(rank + 1);
        }
        bb
    }

    #[inline]
    pub fn is_set(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.0) != 0
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    #[inline]
    pub fn pop_count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Pop the least significant bit, returning the square.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let sq = Square(self.0.trailing_zeros() as u8);
            self.0 &= self.0 - 1; // clear LSB
            Some(sq)
        }
    }

    /// Iterate over all set bit positions as `Square`s.
    #[inline]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over set bits in a `Bitboard`.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.pop_count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

/// Set difference: squares in `self` that are not in `rhs`.
impl std::ops::Sub for Bitboard {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self & !rhs
    }
}

impl std::ops::Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Bitboard(!self.0)
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard(0x{:016x})", self.0)?;
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                write!(f, "{}", if self.is_set(sq) { '1' } else { '.' })?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")
    }
}

// ---------------------------------------------------------------------------
// Discriminators
// ---------------------------------------------------------------------------

/// Which part of the origin square a move names to tell like pieces apart.
///
/// Declaration order is notation precedence: a file is tried before a rank,
/// a rank before the full square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiscriminatorKind {
    None,
    File,
    Rank,
    Square,
}

impl DiscriminatorKind {
    pub const ALL: [DiscriminatorKind; 4] = [
        DiscriminatorKind::None,
        DiscriminatorKind::File,
        DiscriminatorKind::Rank,
        DiscriminatorKind::Square,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiscriminatorKind::None => "none",
            DiscriminatorKind::File => "file",
            DiscriminatorKind::Rank => "rank",
            DiscriminatorKind::Square => "square",
        }
    }
}

/// Small set of `DiscriminatorKind`s packed in a byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiscriminatorSet(pub u8);

impl DiscriminatorSet {
    pub const EMPTY: DiscriminatorSet = DiscriminatorSet(0);

    #[inline]
    pub fn contains(self, kind: DiscriminatorKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, kind: DiscriminatorKind) {
        self.0 |= kind.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in precedence order.
    pub fn iter(self) -> impl Iterator<Item = DiscriminatorKind> {
        DiscriminatorKind::ALL
            .into_iter()
            .filter(move |&k| self.contains(k))
    }
}

impl std::ops::BitOr for DiscriminatorSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        DiscriminatorSet(self.0 | rhs.0)
    }
}

impl FromIterator<DiscriminatorKind> for DiscriminatorSet {
    fn from_iter<I: IntoIterator<Item = DiscriminatorKind>>(iter: I) -> Self {
        let mut set = DiscriminatorSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// CatalogueError
// ---------------------------------------------------------------------------

/// Domain errors for the notation catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid piece: {0}")]
    InvalidPiece(String),

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("invalid SAN token: {0}")]
    InvalidSan(String),

    #[error("{from} and {through} share no file, rank or diagonal")]
    NotAligned { from: Square, through: Square },

    #[error("failed to write catalogue: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
