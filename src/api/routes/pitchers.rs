use axum::extract::{Path, State};
use axum::Json;
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Pitcher, PitcherListing, PitchTypeSummary};
use crate::roster::placeholder_listing;

// ── Pitcher list ────────────────────────────────────────────────

/// Roster pitchers present in the store, or the placeholder roster when the
/// store fails or has none of them.
pub async fn list_pitchers(State(state): State<AppState>) -> Json<Vec<PitcherListing>> {
    match state.store.roster_pitchers(&state.roster) {
        Ok(pitchers) if !pitchers.is_empty() => {
            Json(pitchers.into_iter().map(PitcherListing::from).collect())
        }
        Ok(_) => {
            info!("No roster pitchers found in store, returning default list");
            Json(placeholder_listing(&state.roster))
        }
        Err(e) => {
            warn!("Error fetching pitchers, returning default list: {}", e);
            Json(placeholder_listing(&state.roster))
        }
    }
}

// ── Pitcher details ─────────────────────────────────────────────

fn checked_token(token: &str) -> Result<&str, ApiError> {
    if token.trim().is_empty() {
        Err(ApiError::BadRequest("Pitcher identifier is empty".to_string()))
    } else {
        Ok(token)
    }
}

pub async fn pitcher_details(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Pitcher>, ApiError> {
    let token = checked_token(&token)?;
    state
        .resolver
        .resolve(state.store.as_ref(), token)
        .map_err(|e| ApiError::storage("Failed to fetch pitcher details", e))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Pitcher not found".to_string()))
}

// ── Pitch summary ───────────────────────────────────────────────

/// Per-pitch-type summary for the pitcher `token` resolves to.
///
/// Unknown pitcher is 404. A known pitcher without pitches is 200 with `[]`.
pub async fn pitcher_summary(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Vec<PitchTypeSummary>>, ApiError> {
    let token = checked_token(&token)?;
    let pitcher = state
        .resolver
        .resolve(state.store.as_ref(), token)
        .map_err(|e| ApiError::storage("Failed to fetch pitch summary", e))?
        .ok_or_else(|| ApiError::NotFound("No pitch data found for this pitcher".to_string()))?;

    let rows = state
        .store
        .pitch_summary(pitcher.id)
        .map_err(|e| ApiError::storage("Failed to fetch pitch summary", e))?;

    if rows.is_empty() {
        info!(pitcher = %pitcher.name, "Pitcher has no pitch events");
    }
    Ok(Json(rows))
}
