use serde::{Deserialize, Serialize};

use crate::engine::san::{Discriminator, render};
use crate::engine::types::{
    Bitboard, CatalogueError, Direction, DiscriminatorSet, PieceKind, Square,
};

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSansQuery {
    pub suffixes: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Which pawn destinations `/api/attacks` reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PawnMode {
    #[default]
    Captures,
    Pushes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttacksQuery {
    pub direction: Option<String>,
    pub mode: Option<PawnMode>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime: u64,
    pub base_count: usize,
    pub suffixed_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSansResponse {
    pub sans: Vec<String>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanLookupResponse {
    pub san: String,
    /// Position in the unsuffixed catalogue.
    pub index: usize,
    pub suffixed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttacksResponse {
    pub piece: String,
    pub square: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    pub squares: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginEntry {
    pub origin: String,
    pub discriminators: Vec<String>,
    pub sans: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorsResponse {
    pub piece: String,
    pub target: String,
    /// Union over all origins, in precedence order.
    pub kinds: Vec<String>,
    pub origins: Vec<OriginEntry>,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn parse_square(s: &str) -> Result<Square, CatalogueError> {
    Square::from_algebraic(s).ok_or_else(|| CatalogueError::InvalidSquare(s.to_string()))
}

pub fn parse_piece(s: &str) -> Result<PieceKind, CatalogueError> {
    PieceKind::from_str_loose(s).ok_or_else(|| CatalogueError::InvalidPiece(s.to_string()))
}

pub fn parse_direction(s: &str) -> Result<Direction, CatalogueError> {
    Direction::from_str_loose(s).ok_or_else(|| CatalogueError::InvalidDirection(s.to_string()))
}

pub fn square_names(bb: Bitboard) -> Vec<String> {
    bb.iter().map(Square::to_algebraic).collect()
}

/// One origin's discriminators and the strings they render to, quiet form
/// before capture.
pub fn origin_entry(
    piece: PieceKind,
    origin: Square,
    target: Square,
    kinds: DiscriminatorSet,
) -> OriginEntry {
    let sans = kinds
        .iter()
        .flat_map(|kind| {
            let disc = Discriminator::of(kind, origin);
            [false, true].map(|capture| render(piece, disc, target, capture, None))
        })
        .collect();
    OriginEntry {
        origin: origin.to_algebraic(),
        discriminators: kind_names(kinds),
        sans,
    }
}

pub fn kind_names(kinds: DiscriminatorSet) -> Vec<String> {
    kinds.iter().map(|k| k.as_str().to_string()).collect()
}
