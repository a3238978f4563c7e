//! Enumeration of every SAN string that can appear in a game.
//!
//! The catalogue is a superset of syntax, not of reachable positions: a
//! string is included as soon as some placement of like pieces on an
//! otherwise empty board would require it.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::engine::attacks::{pawn_captures, pawn_pushes};
use crate::engine::disambiguation::discriminators_for;
use crate::engine::san::{Castle, Discriminator, render, render_castle, strip_suffix};
use crate::engine::types::{
    Bitboard, CatalogueError, Direction, DiscriminatorKind, PieceKind, Square,
};

/// Suffixes crossed with every base string: plain, check, mate.
pub const SUFFIXES: [&str; 3] = ["", "+", "#"];

/// The two sorted sequences produced by the enumeration.
#[derive(Clone, Debug)]
pub struct Catalogue {
    base: Vec<String>,
    suffixed: Vec<String>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Run the full enumeration. Deterministic: two calls yield identical
    /// sequences.
    pub fn generate() -> Self {
        let mut sans = HashSet::new();

        for dir in Direction::BOTH {
            let pawns = pawn_sans(dir);
            debug!(direction = %dir, count = pawns.len(), "pawn moves enumerated");
            sans.extend(pawns);
        }
        for kind in PieceKind::DISCRIMINATED {
            let pieces = piece_sans(kind);
            debug!(piece = %kind, count = pieces.len(), "piece moves enumerated");
            sans.extend(pieces);
        }
        let kings = king_sans();
        debug!(count = kings.len(), "king moves enumerated");
        sans.extend(kings);

        Self::from_sans(sans)
    }

    /// Build the sorted sequences from an already deduplicated set.
    pub fn from_sans(sans: HashSet<String>) -> Self {
        let mut base: Vec<String> = sans.into_iter().collect();
        sort_sans(&mut base);

        let mut suffixed: Vec<String> = SUFFIXES
            .iter()
            .flat_map(|suffix| base.iter().map(move |san| format!("{san}{suffix}")))
            .collect();
        sort_sans(&mut suffixed);

        let index = base
            .iter()
            .enumerate()
            .map(|(i, san)| (san.clone(), i))
            .collect();

        info!(
            base = base.len(),
            suffixed = suffixed.len(),
            "SAN catalogue generated"
        );

        Catalogue {
            base,
            suffixed,
            index,
        }
    }

    /// Sequence A: every distinct SAN string.
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// Sequence B: sequence A crossed with [`SUFFIXES`].
    pub fn with_suffixes(&self) -> &[String] {
        &self.suffixed
    }

    /// Position of `san` in sequence A. A trailing `+` or `#` is ignored.
    pub fn position(&self, san: &str) -> Option<usize> {
        self.index.get(strip_suffix(san)).copied()
    }

    /// Whether `san` (optionally suffixed) is in the catalogue.
    pub fn contains(&self, san: &str) -> bool {
        self.position(san).is_some()
    }

    /// Write both sequences newline-joined into `dir`.
    pub fn write_to(
        &self,
        dir: &Path,
        base_name: &str,
        suffixed_name: &str,
    ) -> Result<(), CatalogueError> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(base_name), self.base.join("\n"))?;
        fs::write(dir.join(suffixed_name), self.suffixed.join("\n"))?;
        info!(dir = %dir.display(), base_name, suffixed_name, "catalogue written");
        Ok(())
    }
}

/// Order by length, then lexicographically by bytes.
pub fn san_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sort in catalogue order (see [`san_order`]).
pub fn sort_sans(sans: &mut [String]) {
    sans.sort_unstable_by(|a, b| san_order(a, b));
}

// =========================================================================
// Per-kind generators
// =========================================================================

/// Pawn moves for one playing direction.
///
/// A pawn is placed on every square off the back ranks. Its pushes and both
/// diagonal captures are rendered; a move onto the promotion rank is only
/// ever rendered as one of the four promotions.
pub fn pawn_sans(dir: Direction) -> HashSet<String> {
    let mut sans = HashSet::new();
    let occupiable = Bitboard::ALL - Bitboard::rank(0) - Bitboard::rank(7);

    for from in occupiable.iter() {
        let origin_file = Discriminator::File(from.file());
        let moves = pawn_pushes(from, dir)
            .iter()
            .map(|to| (to, Discriminator::None, false))
            .chain(
                pawn_captures(from, dir)
                    .iter()
                    .map(|to| (to, origin_file, true)),
            );

        for (to, discriminator, capture) in moves {
            if to.rank() == dir.promotion_rank() {
                for promo in PieceKind::PROMOTIONS {
                    sans.insert(render(PieceKind::Pawn, discriminator, to, capture, Some(promo)));
                }
            } else {
                sans.insert(render(PieceKind::Pawn, discriminator, to, capture, None));
            }
        }
    }
    sans
}

/// Moves of a knight, bishop, rook or queen, with every discriminator the
/// analysis allows. Both the quiet and the capturing form are included.
///
/// # Panics
///
/// Panics for pawns and kings, which have their own generators.
pub fn piece_sans(kind: PieceKind) -> HashSet<String> {
    assert!(
        PieceKind::DISCRIMINATED.contains(&kind),
        "piece_sans covers N, B, R and Q, not {kind}"
    );

    let mut sans = HashSet::new();
    let mut add = |discriminator: Discriminator, to: Square| {
        for capture in [false, true] {
            sans.insert(render(kind, discriminator, to, capture, None));
        }
    };

    for to in Square::all() {
        add(Discriminator::None, to);
        let map = discriminators_for(to, kind);
        for (origin, kinds) in map.iter().filter(|(_, kinds)| !kinds.is_empty()) {
            for disc in kinds.iter().filter(|&k| k != DiscriminatorKind::None) {
                add(Discriminator::of(disc, origin), to);
            }
        }
    }
    sans
}

/// King moves to every square, quiet and capturing, plus both castling
/// tokens.
pub fn king_sans() -> HashSet<String> {
    let mut sans: HashSet<String> = Square::all()
        .flat_map(|to| {
            [false, true]
                .map(|capture| render(PieceKind::King, Discriminator::None, to, capture, None))
        })
        .collect();
    sans.extend(Castle::BOTH.map(render_castle));
    sans
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn san_order_is_length_then_bytes() {
        let mut sans: Vec<String> = ["Nf3", "e4", "O-O", "Kxe2", "a3", "Bb5"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_sans(&mut sans);
        assert_eq!(sans, ["a3", "e4", "Bb5", "Nf3", "O-O", "Kxe2"]);
    }

    #[test]
    fn king_sans_count() {
        // 64 quiet + 64 capturing + two castling tokens.
        let kings = king_sans();
        assert_eq!(kings.len(), 130);
        assert!(kings.contains("O-O"));
        assert!(kings.contains("O-O-O"));
        assert!(kings.contains("Kxh8"));
    }

    #[test]
    fn pawn_sans_up_direction() {
        let pawns = pawn_sans(Direction::Up);
        assert!(pawns.contains("e4"));
        assert!(pawns.contains("e3"));
        assert!(pawns.contains("exd5"));
        assert!(pawns.contains("axb8=N"));
        assert!(pawns.contains("h8=Q"));
        // Up pawns never reach the first rank or the second.
        assert!(!pawns.contains("e1=Q"));
        assert!(!pawns.contains("e2"));
        assert!(!pawns.contains("e8"));
    }

    #[test]
    fn pawn_sans_down_direction() {
        let pawns = pawn_sans(Direction::Down);
        assert!(pawns.contains("e5"));
        assert!(pawns.contains("dxe1=R"));
        assert!(pawns.contains("e2"));
        assert!(!pawns.contains("e8=Q"));
        assert!(!pawns.contains("e7"));
    }

    #[test]
    fn pawn_sans_never_wrap_files() {
        for dir in Direction::BOTH {
            for san in pawn_sans(dir) {
                assert!(!san.starts_with("ax") || san.as_bytes()[2] == b'b', "{san}");
                assert!(!san.starts_with("hx") || san.as_bytes()[2] == b'g', "{san}");
            }
        }
    }

    #[test]
    fn piece_sans_always_has_plain_and_capture() {
        for kind in PieceKind::DISCRIMINATED {
            let sans = piece_sans(kind);
            let letter = kind.letter().unwrap();
            for to in Square::all() {
                assert!(sans.contains(&format!("{letter}{to}")));
                assert!(sans.contains(&format!("{letter}x{to}")));
            }
        }
    }

    #[test]
    fn bishop_sans_to_corner_are_undiscriminated() {
        let bishops = piece_sans(PieceKind::Bishop);
        let to_a1: Vec<_> = bishops.iter().filter(|s| s.ends_with("a1")).collect();
        assert_eq!(to_a1.len(), 2, "{to_a1:?}");
    }

    #[test]
    #[should_panic(expected = "piece_sans covers N, B, R and Q")]
    fn piece_sans_rejects_king() {
        piece_sans(PieceKind::King);
    }

    #[test]
    fn position_ignores_suffix() {
        let sans: HashSet<String> = ["e4", "Nf3", "O-O"].iter().map(|s| s.to_string()).collect();
        let catalogue = Catalogue::from_sans(sans);
        assert_eq!(catalogue.base(), ["e4", "Nf3", "O-O"]);
        assert_eq!(catalogue.position("e4#"), Some(0));
        assert_eq!(catalogue.position("O-O+"), Some(2));
        assert!(catalogue.contains("Nf3"));
        assert!(!catalogue.contains("Nf4"));
        assert_eq!(
            catalogue.with_suffixes(),
            ["e4", "Nf3", "O-O", "e4#", "e4+", "Nf3#", "Nf3+", "O-O#", "O-O+"]
        );
    }
}
