use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::storage::{SampleRow, StorageError};

// ── Debug introspection ─────────────────────────────────────────

/// Store layout snapshot. Each field is omitted when its query failed.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugTablesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub players_columns: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitches_columns: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<Vec<SampleRow>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_types: Option<Vec<String>>,
}

fn best_effort<T>(what: &str, result: Result<T, StorageError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Debug query {} failed: {}", what, e);
            None
        }
    }
}

pub async fn debug_tables(State(state): State<AppState>) -> Json<DebugTablesResponse> {
    let store = state.store.as_ref();
    Json(DebugTablesResponse {
        tables: best_effort("tables", store.table_names()),
        players_columns: best_effort("players columns", store.column_names("players")),
        pitches_columns: best_effort("pitches columns", store.column_names("pitches")),
        sample_data: best_effort("sample pitches", store.sample_pitches(5)),
        pitch_types: best_effort("pitch types", store.pitch_types()),
    })
}

// ── Health ──────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// Reflects store reachability only: 200 `OK` or 503 `ERROR`.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = Utc::now().to_rfc3339();
    match state.store.ping() {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK".to_string(),
                message: "Server and database are healthy".to_string(),
                timestamp,
            }),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            let message = "Database not connected".to_string();
            // Health keeps its own body shape; only the status comes from the error
            let status = ApiError::Unavailable(message.clone()).status_code();
            (
                status,
                Json(HealthResponse {
                    status: "ERROR".to_string(),
                    message,
                    timestamp,
                }),
            )
        }
    }
}
