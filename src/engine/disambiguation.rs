//! Which discriminators a move to a fixed target can ever need.
//!
//! For a target square and a piece kind, every square the piece could come
//! from is examined on its own: the analysis asks where *another* piece of
//! the same kind could stand and still reach the target, and from that set
//! decides whether naming the origin's file, rank or full square could ever
//! be required. The answer is structural: it holds for some placement of
//! like pieces, not for one particular position.
//!
//! Sliders are handled by ray subtraction. A rival on the line from the
//! target through the origin is either between them (so the origin could
//! not move) or behind the origin (so the rival could not), which means
//! that whole ray is removed from the candidate rivals.

use crate::engine::attacks::{attacks_from, ray_from_towards};
use crate::engine::types::{Bitboard, DiscriminatorKind, DiscriminatorSet, PieceKind, Square};

/// Per-origin discriminator sets for one (target, kind) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscriminatorMap {
    origins: Bitboard,
    sets: [DiscriminatorSet; 64],
}

impl DiscriminatorMap {
    fn new(origins: Bitboard) -> Self {
        DiscriminatorMap {
            origins,
            sets: [DiscriminatorSet::EMPTY; 64],
        }
    }

    /// Every square a piece could reach the target from.
    #[inline]
    pub fn origins(&self) -> Bitboard {
        self.origins
    }

    /// Discriminators possible for a move from `origin`, or `None` if the
    /// piece cannot reach the target from there at all.
    pub fn get(&self, origin: Square) -> Option<DiscriminatorSet> {
        self.origins
            .is_set(origin)
            .then(|| self.sets[origin.0 as usize])
    }

    /// Entries in square order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, DiscriminatorSet)> + '_ {
        self.origins
            .iter()
            .map(move |sq| (sq, self.sets[sq.0 as usize]))
    }

    /// Union of every origin's set.
    pub fn kinds(&self) -> DiscriminatorSet {
        self.iter()
            .fold(DiscriminatorSet::EMPTY, |acc, (_, set)| acc | set)
    }
}

/// Structurally possible discriminators for every origin of a `kind` move
/// onto `to`.
///
/// Kings never carry a discriminator, so every king origin maps to the empty
/// set. Pawns are never discriminated either (a capture names the origin
/// file as part of the move itself), and the map for them has no origins.
pub fn discriminators_for(to: Square, kind: PieceKind) -> DiscriminatorMap {
    match kind {
        PieceKind::Pawn => DiscriminatorMap::new(Bitboard::EMPTY),
        PieceKind::King => DiscriminatorMap::new(attacks_from(to, kind)),
        _ => {
            let attacks = attacks_from(to, kind);
            let mut map = DiscriminatorMap::new(attacks);
            for origin in attacks.iter() {
                let rivals = rival_origins(to, origin, kind, attacks);
                map.sets[origin.0 as usize] = discriminators_at(origin, rivals);
            }
            map
        }
    }
}

/// Squares from which a second `kind` could reach `to` while a move from
/// `origin` to `to` stays possible.
///
/// `attacks` must be `attacks_from(to, kind)` and contain `origin`.
pub fn rival_origins(to: Square, origin: Square, kind: PieceKind, attacks: Bitboard) -> Bitboard {
    if kind.is_sliding() {
        let ray = ray_from_towards(to, origin)
            .expect("slider origin must share a line with its target");
        attacks - ray
    } else {
        attacks - Bitboard::from_square(origin)
    }
}

/// Discriminators that some subset of `rivals` could force on a move from
/// `origin`.
pub fn discriminators_at(origin: Square, rivals: Bitboard) -> DiscriminatorSet {
    let same_file = rivals & Bitboard::file(origin.file());
    let same_rank = rivals & Bitboard::rank(origin.rank());

    let mut set = DiscriminatorSet::EMPTY;
    // A rival off the origin's file is told apart by the file alone.
    if (rivals - same_file).is_not_empty() {
        set.insert(DiscriminatorKind::File);
    }
    if same_file.is_not_empty() {
        set.insert(DiscriminatorKind::Rank);
    }
    if same_file.is_not_empty() && same_rank.is_not_empty() {
        set.insert(DiscriminatorKind::Square);
    }
    set
}

/// The one discriminator real notation uses for a move from `origin` when
/// `rivals` are the other like pieces that can reach the same target.
///
/// File is preferred; rank is used when a rival shares the file; the full
/// square only when rivals share both the file and the rank.
pub fn resolve_discriminator(origin: Square, rivals: Bitboard) -> DiscriminatorKind {
    let rivals = rivals - Bitboard::from_square(origin);
    if rivals.is_empty() {
        return DiscriminatorKind::None;
    }

    let same_file = (rivals & Bitboard::file(origin.file())).is_not_empty();
    let same_rank = (rivals & Bitboard::rank(origin.rank())).is_not_empty();

    match (same_file, same_rank) {
        (false, _) => DiscriminatorKind::File,
        (true, false) => DiscriminatorKind::Rank,
        (true, true) => DiscriminatorKind::Square,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn squares(names: &[&str]) -> Bitboard {
        names.iter().map(|n| sq(n)).collect()
    }

    fn set(kinds: &[DiscriminatorKind]) -> DiscriminatorSet {
        kinds.iter().copied().collect()
    }

    use DiscriminatorKind::{File, Rank, Square as Full};

    // -------------------------------------------------------------------
    // Adjacency variant for knights and rooks
    // -------------------------------------------------------------------

    /// Knight and rook discriminators read off the target's adjacent file
    /// and rank masks instead of set subtraction.
    ///
    /// Every knight origin lies either on a file next to the target or on a
    /// rank next to it, and its file-mate and rank-mate lie in the same band.
    /// A rook on the target's file has a rival beyond the target exactly when
    /// the target has neighbours on both adjacent ranks.
    fn by_adjacency(to: Square, kind: PieceKind) -> Vec<(Square, DiscriminatorSet)> {
        let attacks = attacks_from(to, kind);
        attacks
            .iter()
            .map(|origin| {
                let on_file = Bitboard::file(origin.file());
                let on_rank = Bitboard::rank(origin.rank());
                let mut kinds = DiscriminatorSet::EMPTY;
                if (attacks - on_file).is_not_empty() {
                    kinds.insert(File);
                }
                match kind {
                    PieceKind::Knight => {
                        let near_files = Bitboard::adjacent_files(to.file());
                        let band = if near_files.is_set(origin) {
                            attacks & near_files
                        } else {
                            attacks & Bitboard::adjacent_ranks(to.rank())
                        };
                        let file_mates = (band & on_file).pop_count();
                        let rank_mates = (band & on_rank).pop_count();
                        if file_mates > 1 {
                            kinds.insert(Rank);
                        }
                        if file_mates > 1 && rank_mates > 1 {
                            kinds.insert(Full);
                        }
                    }
                    PieceKind::Rook => {
                        let neighbours =
                            Bitboard::adjacent_ranks(to.rank()) & Bitboard::file(to.file());
                        if origin.file() == to.file() && neighbours.pop_count() == 2 {
                            kinds.insert(Rank);
                        }
                    }
                    _ => unreachable!("adjacency variant covers knights and rooks"),
                }
                (origin, kinds)
            })
            .collect()
    }

    #[test]
    fn adjacency_variant_matches_ray_subtraction() {
        for kind in [PieceKind::Knight, PieceKind::Rook] {
            for to in Square::all() {
                let canonical: Vec<_> = discriminators_for(to, kind).iter().collect();
                assert_eq!(
                    canonical,
                    by_adjacency(to, kind),
                    "{kind} to {to} disagrees"
                );
            }
        }
    }

    // -------------------------------------------------------------------
    // Structural analysis
    // -------------------------------------------------------------------

    #[test]
    fn origins_match_attacks() {
        for kind in &PieceKind::ALL[1..] {
            for to in Square::all() {
                let map = discriminators_for(to, *kind);
                assert_eq!(map.origins(), attacks_from(to, *kind));
                assert_eq!(map.iter().count(), map.origins().pop_count() as usize);
            }
        }
    }

    #[test]
    fn king_never_needs_a_discriminator() {
        for to in Square::all() {
            let map = discriminators_for(to, PieceKind::King);
            assert!(map.origins().is_not_empty());
            assert!(map.kinds().is_empty(), "king to {to}");
        }
    }

    #[test]
    fn pawns_have_no_discriminated_origins() {
        assert!(discriminators_for(sq("e4"), PieceKind::Pawn).origins().is_empty());
    }

    #[test]
    fn bishop_to_corner_never_needs_a_discriminator() {
        for corner in ["a1", "a8", "h1", "h8"] {
            let map = discriminators_for(sq(corner), PieceKind::Bishop);
            assert_eq!(map.origins().pop_count(), 7);
            assert!(map.kinds().is_empty(), "bishop to {corner}");
        }
    }

    #[test]
    fn knights_to_d7() {
        let map = discriminators_for(sq("d7"), PieceKind::Knight);
        // b6 shares the b-file with b8 and f8 shares the 8th rank.
        assert_eq!(map.get(sq("b8")), Some(set(&[File, Rank, Full])));
        // c5 has e5 on its rank but nothing on its file.
        assert_eq!(map.get(sq("c5")), Some(set(&[File])));
        assert_eq!(map.get(sq("d6")), None);
    }

    #[test]
    fn rook_on_edge_rank_has_no_rank_discriminator() {
        // Rook arriving on a1 from the a-file: nothing can come from below.
        let map = discriminators_for(sq("a1"), PieceKind::Rook);
        assert_eq!(map.get(sq("a5")), Some(set(&[File])));
        // Rook arriving on a4 from a1: a rook above on the a-file can too.
        let map = discriminators_for(sq("a4"), PieceKind::Rook);
        assert_eq!(map.get(sq("a1")), Some(set(&[File, Rank])));
        assert!(!map.kinds().contains(Full));
    }

    #[test]
    fn queen_can_need_full_square() {
        let map = discriminators_for(sq("a1"), PieceKind::Queen);
        // Queens on b2, a2 and b1 all reach a1.
        assert_eq!(map.get(sq("b2")), Some(set(&[File, Rank, Full])));
    }

    #[test]
    fn rivals_exclude_the_whole_ray() {
        let to = sq("d4");
        let attacks = attacks_from(to, PieceKind::Rook);
        let rivals = rival_origins(to, sq("d6"), PieceKind::Rook, attacks);
        assert!(!rivals.is_set(sq("d5")));
        assert!(!rivals.is_set(sq("d6")));
        assert!(!rivals.is_set(sq("d8")));
        assert!(rivals.is_set(sq("d3")));
        assert!(rivals.is_set(sq("a4")));
    }

    #[test]
    fn discriminators_at_without_rivals_is_empty() {
        assert!(discriminators_at(sq("e4"), Bitboard::EMPTY).is_empty());
    }

    // -------------------------------------------------------------------
    // Position-level resolution
    // -------------------------------------------------------------------

    #[test]
    fn resolve_without_rivals() {
        assert_eq!(
            resolve_discriminator(sq("g1"), Bitboard::EMPTY),
            DiscriminatorKind::None
        );
        // The moving piece itself is never its own rival.
        assert_eq!(
            resolve_discriminator(sq("g1"), squares(&["g1"])),
            DiscriminatorKind::None
        );
    }

    #[test]
    fn resolve_prefers_file() {
        // Knights on b8 and f8 both reach d7: Nbd7, not N8d7.
        assert_eq!(resolve_discriminator(sq("b8"), squares(&["f8"])), File);
        assert_eq!(resolve_discriminator(sq("f8"), squares(&["b8"])), File);
        // Rooks on a1 and h1 both reach e1.
        assert_eq!(resolve_discriminator(sq("a1"), squares(&["h1"])), File);
    }

    #[test]
    fn resolve_rank_when_file_is_shared() {
        // Rooks on a1 and a8 both reach a4: R1a4.
        assert_eq!(resolve_discriminator(sq("a1"), squares(&["a8"])), Rank);
    }

    #[test]
    fn resolve_full_square_when_both_are_shared() {
        assert_eq!(
            resolve_discriminator(sq("b2"), squares(&["a2", "b1"])),
            Full
        );
    }
}
