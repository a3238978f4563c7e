use axum::Json;
use axum::extract::{Path, Query, State};

use crate::engine::attacks::{attacks_from, pawn_captures, pawn_pushes};
use crate::engine::disambiguation::discriminators_for;
use crate::engine::san::{SanMove, strip_suffix};
use crate::engine::types::{Direction, PieceKind};

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime,
        base_count: state.catalogue.base().len(),
        suffixed_count: state.catalogue.with_suffixes().len(),
    })
}

// =========================================================================
// Catalogue
// =========================================================================

/// GET /api/san
pub async fn list_sans(
    State(state): State<SharedState>,
    Query(query): Query<ListSansQuery>,
) -> Json<ListSansResponse> {
    let sequence = if query.suffixes.unwrap_or(false) {
        state.catalogue.with_suffixes()
    } else {
        state.catalogue.base()
    };

    let limit = query
        .limit
        .unwrap_or(state.config.page_limit)
        .min(crate::config::MAX_PAGE_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let sans = sequence.iter().skip(offset).take(limit).cloned().collect();

    Json(ListSansResponse {
        sans,
        total: sequence.len(),
        limit,
        offset,
    })
}

/// GET /api/san/{san}
///
/// Malformed tokens are rejected before the lookup; well-formed ones the
/// catalogue does not hold are a 404.
pub async fn lookup_san(
    State(state): State<SharedState>,
    Path(san): Path<String>,
) -> Result<Json<SanLookupResponse>, ApiError> {
    san.parse::<SanMove>()?;
    let index = state
        .catalogue
        .position(&san)
        .ok_or_else(|| ApiError::SanNotFound(san.clone()))?;
    let suffixed = strip_suffix(&san).len() != san.len();

    Ok(Json(SanLookupResponse {
        san,
        index,
        suffixed,
    }))
}

// =========================================================================
// Attack geometry
// =========================================================================

/// GET /api/attacks/{piece}/{square}
///
/// Pawns take `direction` (default `up`) and `mode` (default `captures`).
pub async fn attacks(
    Path((piece, square)): Path<(String, String)>,
    Query(query): Query<AttacksQuery>,
) -> Result<Json<AttacksResponse>, ApiError> {
    let kind = parse_piece(&piece)?;
    let sq = parse_square(&square)?;

    let (squares, direction) = if kind == PieceKind::Pawn {
        let dir = match query.direction.as_deref() {
            Some(d) => parse_direction(d)?,
            None => Direction::Up,
        };
        let bb = match query.mode.unwrap_or_default() {
            PawnMode::Captures => pawn_captures(sq, dir),
            PawnMode::Pushes => pawn_pushes(sq, dir),
        };
        (bb, Some(dir.to_string()))
    } else {
        (attacks_from(sq, kind), None)
    };

    Ok(Json(AttacksResponse {
        piece: kind.to_string(),
        square: sq.to_algebraic(),
        direction,
        squares: square_names(squares),
    }))
}

// =========================================================================
// Disambiguation
// =========================================================================

/// GET /api/discriminators/{piece}/{square}
pub async fn discriminators(
    Path((piece, square)): Path<(String, String)>,
) -> Result<Json<DiscriminatorsResponse>, ApiError> {
    let kind = parse_piece(&piece)?;
    let target = parse_square(&square)?;

    let map = discriminators_for(target, kind);
    let origins = map
        .iter()
        .map(|(origin, kinds)| origin_entry(kind, origin, target, kinds))
        .collect();

    Ok(Json(DiscriminatorsResponse {
        piece: kind.to_string(),
        target: target.to_algebraic(),
        kinds: kind_names(map.kinds()),
        origins,
    }))
}

// =========================================================================
// Tests
// =========================================================================
