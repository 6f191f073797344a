//! Match statistics aggregation.
//!
//! Reads every stored raw match for a player, extracts that player's
//! statistics from each, and overwrites the aggregate CSV. Matches the
//! player does not appear in, and malformed ones, are skipped per match.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::extract;
use crate::models::MatchStats;
use crate::storage;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub puuid: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub matches_processed: u32,
    pub stats: Vec<MatchStats>,
    pub location: String,
    pub message: String,
}

pub async fn process(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    Ok(Json(process_stats(&state, request).await?))
}

/// Core aggregation flow, shared by the HTTP handler and the CLI.
pub async fn process_stats(
    state: &AppState,
    request: ProcessRequest,
) -> Result<ProcessResponse, ApiError> {
    let puuid = request.puuid.trim();
    if puuid.is_empty() {
        return Err(ApiError::InvalidRequest("PUUID is required".to_string()));
    }

    let prefix = storage::match_prefix(puuid);
    let keys = state.store.list(&prefix).await?;
    if keys.is_empty() {
        return Err(ApiError::NoData(
            "No matches found for this user. Search for a summoner first!".to_string(),
        ));
    }

    let mut rows: Vec<MatchStats> = Vec::new();
    for key in keys.iter().filter(|k| k.ends_with(".json")) {
        let bytes = state.store.get(key).await?;
        let record: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!("Skipping {}: invalid JSON: {}", key, e);
                continue;
            }
        };

        match extract::player_stats(&record, puuid) {
            Ok(Some(stats)) => rows.push(stats),
            Ok(None) => debug!("Player not found in {}", key),
            Err(e) => warn!("Skipping {}: {}", key, e),
        }
    }

    let csv = aggregate::to_csv(&rows)?;
    let location = storage::stats_key(puuid);
    state.store.put(&location, csv.into_bytes()).await?;

    let matches_processed = rows.len() as u32;
    info!("Processed {} matches for {}", matches_processed, puuid);

    Ok(ProcessResponse {
        matches_processed,
        message: format!("Successfully processed {} matches", matches_processed),
        stats: rows,
        location,
    })
}
