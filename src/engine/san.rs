//! Standard Algebraic Notation (SAN) rendering and parsing.
//!
//! SAN examples: `e4`, `Nf3`, `Bxe5`, `O-O`, `e8=Q`, `Raxd1`, `Qh4e1`.
//!
//! Notation here is position-free: a `SanMove` only carries what the text
//! carries, and check/mate suffixes are not part of it.

use std::fmt;
use std::str::FromStr;

use crate::engine::types::{
    CatalogueError, DiscriminatorKind, PieceKind, Square, file_char, rank_char,
};

// =========================================================================
// Types
// =========================================================================

/// The part of the origin square written before the capture marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Discriminator {
    None,
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Discriminator {
    /// The discriminator of `kind` naming (part of) `origin`.
    pub fn of(kind: DiscriminatorKind, origin: Square) -> Self {
        match kind {
            DiscriminatorKind::None => Discriminator::None,
            DiscriminatorKind::File => Discriminator::File(origin.file()),
            DiscriminatorKind::Rank => Discriminator::Rank(origin.rank()),
            DiscriminatorKind::Square => Discriminator::Square(origin),
        }
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Discriminator::None => Ok(()),
            Discriminator::File(file) => write!(f, "{}", file_char(file)),
            Discriminator::Rank(rank) => write!(f, "{}", rank_char(rank)),
            Discriminator::Square(sq) => write!(f, "{sq}"),
        }
    }
}

/// The two castling moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Castle {
    KingSide,
    QueenSide,
}

impl Castle {
    pub const BOTH: [Castle; 2] = [Castle::KingSide, Castle::QueenSide];

    pub fn token(self) -> &'static str {
        match self {
            Castle::KingSide => "O-O",
            Castle::QueenSide => "O-O-O",
        }
    }
}

/// One move as written in SAN, without a check/mate suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SanMove {
    Normal {
        piece: PieceKind,
        discriminator: Discriminator,
        capture: bool,
        to: Square,
        promotion: Option<PieceKind>,
    },
    Castle(Castle),
}

impl SanMove {
    /// Check the notation rules a well-formed move obeys.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        let SanMove::Normal {
            piece,
            discriminator,
            capture,
            to,
            promotion,
        } = *self
        else {
            return Ok(());
        };

        let invalid = |reason: &str| Err(CatalogueError::InvalidSan(format!("{self:?}: {reason}")));

        if let Some(promo) = promotion {
            if piece != PieceKind::Pawn {
                return invalid("only pawns promote");
            }
            if !PieceKind::PROMOTIONS.contains(&promo) {
                return invalid("promotion must be to N, B, R or Q");
            }
        }

        match piece {
            PieceKind::Pawn => {
                let back_rank = to.rank() == 0 || to.rank() == 7;
                if back_rank != promotion.is_some() {
                    return invalid("pawns promote exactly when reaching a back rank");
                }
                match (capture, discriminator) {
                    (false, Discriminator::None) => {}
                    (true, Discriminator::File(file)) => {
                        if file.abs_diff(to.file()) != 1 {
                            return invalid("pawn captures come from an adjacent file");
                        }
                    }
                    (true, _) => return invalid("pawn captures name the origin file"),
                    (false, _) => return invalid("pawn pushes carry no discriminator"),
                }
            }
            PieceKind::King => {
                if discriminator != Discriminator::None {
                    return invalid("king moves never carry a discriminator");
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl fmt::Display for SanMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SanMove::Castle(castle) => write!(f, "{}", castle.token()),
            SanMove::Normal {
                piece,
                discriminator,
                capture,
                to,
                promotion,
            } => {
                if let Some(letter) = piece.letter() {
                    write!(f, "{letter}")?;
                }
                write!(f, "{discriminator}")?;
                if capture {
                    write!(f, "x")?;
                }
                write!(f, "{to}")?;
                if let Some(letter) = promotion.and_then(PieceKind::letter) {
                    write!(f, "={letter}")?;
                }
                Ok(())
            }
        }
    }
}

// =========================================================================
// SAN rendering
// =========================================================================

/// Render a single move.
///
/// Pawn captures pass the origin file as `Discriminator::File`.
///
/// # Panics
///
/// Panics if the move breaks a notation rule (see [`SanMove::validate`]):
/// such a request can only come from a bug in the caller.
pub fn render(
    piece: PieceKind,
    discriminator: Discriminator,
    to: Square,
    capture: bool,
    promotion: Option<PieceKind>,
) -> String {
    let mv = SanMove::Normal {
        piece,
        discriminator,
        capture,
        to,
        promotion,
    };
    if let Err(err) = mv.validate() {
        panic!("{err}");
    }
    mv.to_string()
}

/// Render a castling move.
pub fn render_castle(castle: Castle) -> String {
    SanMove::Castle(castle).to_string()
}

// =========================================================================
// SAN parsing
// =========================================================================

/// Strip one trailing check (`+`) or mate (`#`) marker.
pub fn strip_suffix(san: &str) -> &str {
    san.strip_suffix(['+', '#']).unwrap_or(san)
}

impl FromStr for SanMove {
    type Err = CatalogueError;

    /// Parse a SAN token. A single trailing `+` or `#` is accepted and
    /// dropped.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogueError::InvalidSan(text.to_string());
        let san = strip_suffix(text);

        for castle in Castle::BOTH {
            if san == castle.token() {
                return Ok(SanMove::Castle(castle));
            }
        }

        if !san.is_ascii() {
            return Err(invalid());
        }

        // Promotion.
        let (body, promotion) = match san.split_once('=') {
            Some((body, promo)) => {
                let mut chars = promo.chars();
                let kind = chars
                    .next()
                    .and_then(PieceKind::from_letter)
                    .ok_or_else(invalid)?;
                if chars.next().is_some() {
                    return Err(invalid());
                }
                (body, Some(kind))
            }
            None => (san, None),
        };

        // Piece letter.
        let (piece, body) = match body.chars().next().and_then(PieceKind::from_letter) {
            Some(PieceKind::Pawn) => return Err(invalid()),
            Some(kind) => (kind, &body[1..]),
            None => (PieceKind::Pawn, body),
        };

        // The last two characters are the destination square.
        if body.len() < 2 {
            return Err(invalid());
        }
        let (head, dest) = body.split_at(body.len() - 2);
        let to = Square::from_algebraic(dest).ok_or_else(invalid)?;

        let (head, capture) = match head.strip_suffix('x') {
            Some(rest) => (rest, true),
            None => (head, false),
        };

        let discriminator = match head.as_bytes() {
            [] => Discriminator::None,
            [f @ b'a'..=b'h'] => Discriminator::File(f - b'a'),
            [r @ b'1'..=b'8'] => Discriminator::Rank(r - b'1'),
            [_, _] => Discriminator::Square(Square::from_algebraic(head).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };

        let mv = SanMove::Normal {
            piece,
            discriminator,
            capture,
            to,
            promotion,
        };
        mv.validate()?;
        Ok(mv)
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

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    #[test]
    fn render_pawn_push() {
        assert_eq!(
            render(PieceKind::Pawn, Discriminator::None, sq("e4"), false, None),
            "e4"
        );
    }

    #[test]
    fn render_pawn_capture() {
        assert_eq!(
            render(PieceKind::Pawn, Discriminator::File(4), sq("d5"), true, None),
            "exd5"
        );
    }

    #[test]
    fn render_pawn_promotions() {
        assert_eq!(
            render(
                PieceKind::Pawn,
                Discriminator::None,
                sq("e8"),
                false,
                Some(PieceKind::Queen)
            ),
            "e8=Q"
        );
        assert_eq!(
            render(
                PieceKind::Pawn,
                Discriminator::File(6),
                sq("h1"),
                true,
                Some(PieceKind::Knight)
            ),
            "gxh1=N"
        );
    }

    #[test]
    fn render_piece_moves() {
        assert_eq!(
            render(PieceKind::Knight, Discriminator::None, sq("f3"), false, None),
            "Nf3"
        );
        assert_eq!(
            render(PieceKind::Bishop, Discriminator::None, sq("c3"), true, None),
            "Bxc3"
        );
        assert_eq!(
            render(PieceKind::Rook, Discriminator::File(0), sq("e1"), false, None),
            "Rae1"
        );
        assert_eq!(
            render(PieceKind::Rook, Discriminator::Rank(0), sq("a4"), false, None),
            "R1a4"
        );
        assert_eq!(
            render(
                PieceKind::Queen,
                Discriminator::Square(sq("h4")),
                sq("e1"),
                true,
                None
            ),
            "Qh4xe1"
        );
        assert_eq!(
            render(PieceKind::King, Discriminator::None, sq("e2"), true, None),
            "Kxe2"
        );
    }

    #[test]
    fn render_castling() {
        assert_eq!(render_castle(Castle::KingSide), "O-O");
        assert_eq!(render_castle(Castle::QueenSide), "O-O-O");
    }

    #[test]
    fn discriminator_of_origin() {
        let b8 = sq("b8");
        assert_eq!(
            Discriminator::of(DiscriminatorKind::File, b8).to_string(),
            "b"
        );
        assert_eq!(
            Discriminator::of(DiscriminatorKind::Rank, b8).to_string(),
            "8"
        );
        assert_eq!(
            Discriminator::of(DiscriminatorKind::Square, b8).to_string(),
            "b8"
        );
        assert_eq!(Discriminator::of(DiscriminatorKind::None, b8).to_string(), "");
    }

    #[test]
    #[should_panic(expected = "king moves never carry a discriminator")]
    fn render_rejects_king_discriminator() {
        render(PieceKind::King, Discriminator::File(3), sq("e2"), false, None);
    }

    #[test]
    #[should_panic(expected = "only pawns promote")]
    fn render_rejects_piece_promotion() {
        render(
            PieceKind::Rook,
            Discriminator::None,
            sq("e8"),
            false,
            Some(PieceKind::Queen),
        );
    }

    #[test]
    #[should_panic(expected = "promotion must be to N, B, R or Q")]
    fn render_rejects_king_promotion() {
        render(
            PieceKind::Pawn,
            Discriminator::None,
            sq("e8"),
            false,
            Some(PieceKind::King),
        );
    }

    #[test]
    #[should_panic(expected = "pawns promote exactly when reaching a back rank")]
    fn render_rejects_bare_pawn_move_to_back_rank() {
        render(PieceKind::Pawn, Discriminator::None, sq("e8"), false, None);
    }

    // -------------------------------------------------------------------
    // Parsing
    // -------------------------------------------------------------------

    #[test]
    fn parse_castling() {
        assert_eq!("O-O".parse::<SanMove>().unwrap(), SanMove::Castle(Castle::KingSide));
        assert_eq!(
            "O-O-O#".parse::<SanMove>().unwrap(),
            SanMove::Castle(Castle::QueenSide)
        );
    }

    #[test]
    fn parse_pawn_capture_promotion() {
        let mv: SanMove = "exd8=Q+".parse().unwrap();
        assert_eq!(
            mv,
            SanMove::Normal {
                piece: PieceKind::Pawn,
                discriminator: Discriminator::File(4),
                capture: true,
                to: sq("d8"),
                promotion: Some(PieceKind::Queen),
            }
        );
    }

    #[test]
    fn parse_full_square_discriminator() {
        let mv: SanMove = "Qh4xe1".parse().unwrap();
        assert_eq!(
            mv,
            SanMove::Normal {
                piece: PieceKind::Queen,
                discriminator: Discriminator::Square(sq("h4")),
                capture: true,
                to: sq("e1"),
                promotion: None,
            }
        );
        assert_eq!(mv.to_string(), "Qh4xe1");
    }

    #[test]
    fn parse_rank_discriminator() {
        let mv: SanMove = "N8d7".parse().unwrap();
        assert!(matches!(
            mv,
            SanMove::Normal {
                discriminator: Discriminator::Rank(7),
                capture: false,
                ..
            }
        ));
    }

    #[test]
    fn parse_invalid() {
        for bad in [
            "", "+", "e9", "Pe4", "Kae2", "e8", "Nf3=Q", "exe5", "e4=K", "Nabc3", "xe4", "Z4",
            "O-O-O-O",
        ] {
            assert!(bad.parse::<SanMove>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn strip_suffix_removes_one_marker() {
        assert_eq!(strip_suffix("e4+"), "e4");
        assert_eq!(strip_suffix("Qxf7#"), "Qxf7");
        assert_eq!(strip_suffix("O-O"), "O-O");
    }
}
