//! Profile and match ingestion.
//!
//! Resolves a Riot ID to its PUUID, pulls the summoner record, top
//! champion masteries and the most recent matches, and persists the
//! profile plus each raw match record keyed by PUUID.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ChampionMastery, PlayerProfile};
use crate::storage;

/// Masteries returned with the profile summary.
const TOP_MASTERY_COUNT: u32 = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    #[serde(default)]
    pub summoner_name: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerSummary {
    pub name: String,
    pub level: i64,
    pub puuid: String,
    pub region: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub summoner: SummonerSummary,
    pub top_champions: Vec<ChampionMastery>,
    pub matches_processed: u32,
    pub match_ids: Vec<String>,
}

pub async fn ingest(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    Ok(Json(ingest_player(&state, request).await?))
}

/// Core ingestion flow, shared by the HTTP handler and the CLI.
pub async fn ingest_player(
    state: &AppState,
    request: IngestRequest,
) -> Result<IngestResponse, ApiError> {
    let summoner_name = request.summoner_name.trim();
    if summoner_name.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Summoner name is required".to_string(),
        ));
    }
    let Some((game_name, tag_line)) = summoner_name.split_once('#') else {
        return Err(ApiError::InvalidRequest(
            "Please use Riot ID format: GameName#TAG (e.g. Iceraze#OC)".to_string(),
        ));
    };
    let game_name = game_name.trim();
    let tag_line = tag_line.trim();
    if game_name.is_empty() || tag_line.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Please use Riot ID format: GameName#TAG (e.g. Iceraze#OC)".to_string(),
        ));
    }

    let region = {
        let r = request.region.trim();
        if r.is_empty() {
            state.config.riot.default_region.clone()
        } else {
            r.to_string()
        }
    };
    let count = request
        .count
        .unwrap_or(state.config.riot.default_match_count)
        .clamp(1, 20);

    let api_key = state.secrets.get(&state.config.api_key_parameter).await?;

    info!("Looking up {}#{} in region {}", game_name, tag_line, region);

    let account = state
        .riot
        .account_by_riot_id(&api_key, &region, game_name, tag_line)
        .await?;
    let summoner = state
        .riot
        .summoner_by_puuid(&api_key, &region, &account.puuid)
        .await?;

    // Mastery data is a nice-to-have: a failure degrades to an empty list.
    let top_champions = match state
        .riot
        .top_masteries(&api_key, &region, &account.puuid, TOP_MASTERY_COUNT)
        .await
    {
        Ok(masteries) => masteries,
        Err(e) => {
            warn!("No mastery data for {}: {}", account.puuid, e);
            Vec::new()
        }
    };

    let match_ids = state
        .riot
        .match_ids(&api_key, &region, &account.puuid, count)
        .await?;

    let mut matches_processed = 0u32;
    for match_id in &match_ids {
        match state.riot.match_by_id(&api_key, &region, match_id).await {
            Ok(record) => {
                let bytes =
                    serde_json::to_vec(&record).map_err(|e| ApiError::Internal(e.to_string()))?;
                state
                    .store
                    .put(&storage::match_key(&account.puuid, match_id), bytes)
                    .await?;
                matches_processed += 1;
            }
            Err(e) => {
                // Degraded partial result: one bad match does not abort the run
                warn!("Skipping match {}: {}", match_id, e);
            }
        }
    }

    let profile = PlayerProfile {
        puuid: account.puuid.clone(),
        game_name: account.game_name.clone(),
        tag_line: account.tag_line.clone(),
        summoner_level: summoner.summoner_level,
        region: region.clone(),
        updated_at: Utc::now(),
    };
    let profile_bytes =
        serde_json::to_vec_pretty(&profile).map_err(|e| ApiError::Internal(e.to_string()))?;
    state
        .store
        .put(&storage::profile_key(&account.puuid), profile_bytes)
        .await?;

    info!(
        "Ingested {} of {} matches for {}",
        matches_processed,
        match_ids.len(),
        profile.riot_id()
    );

    Ok(IngestResponse {
        summoner: SummonerSummary {
            name: profile.riot_id(),
            level: summoner.summoner_level,
            puuid: account.puuid,
            region,
        },
        top_champions,
        matches_processed,
        match_ids,
    })
}
