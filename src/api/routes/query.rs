//! Question answering over processed match data.
//!
//! Loads the player's aggregate CSV, hands it to the match analyst agent
//! with the caller's question, and returns the model's answer verbatim.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agents::analyst::{AnalystInput, MatchAnalystAgent};
use crate::agents::Agent;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::storage::{self, StorageError};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub puuid: String,

    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub question: String,
    pub answer: String,
    pub data_source: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    Ok(Json(answer_question(&state, request).await?))
}

/// Core question-answering flow, shared by the HTTP handler and the CLI.
pub async fn answer_question(
    state: &AppState,
    request: QueryRequest,
) -> Result<QueryResponse, ApiError> {
    let puuid = request.puuid.trim();
    let question = request.question.trim();
    if puuid.is_empty() || question.is_empty() {
        return Err(ApiError::InvalidRequest(
            "PUUID and question are required".to_string(),
        ));
    }

    let data_source = storage::stats_key(puuid);
    let csv_bytes = match state.store.get(&data_source).await {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound(_)) => {
            return Err(ApiError::NoProcessedData(
                "No processed data found. Please process match statistics first!".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };
    let csv = String::from_utf8_lossy(&csv_bytes).into_owned();

    info!("Answering question for {}: {}", puuid, question);

    let agent = MatchAnalystAgent::new(Arc::clone(&state.ai), state.config.ai.max_tokens);
    let output = agent
        .execute(AnalystInput {
            csv,
            question: question.to_string(),
        })
        .await?;

    Ok(QueryResponse {
        question: question.to_string(),
        answer: output.answer,
        data_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::api::routes::testsupport::{post_json, test_state};
    use crate::riot::MockRiotApi;
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_missing_fields_are_400() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(
            tmp.path(),
            Arc::new(MockRiotApi::default()),
            Arc::new(crate::agents::backend::MockBackend::new("answer")),
        );
        let app = build_router(state);

        let (status, json) =
            post_json(app, "/api/players/query", r#"{"puuid":"puuid-1"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_unprocessed_player_is_404_with_hint() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(
            tmp.path(),
            Arc::new(MockRiotApi::default()),
            Arc::new(crate::agents::backend::MockBackend::new("answer")),
        );
        let app = build_router(state);

        let (status, json) = post_json(
            app,
            "/api/players/query",
            r#"{"puuid":"puuid-1","question":"What's my best champion?"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NO_PROCESSED_DATA");
        assert!(json["error"]["hint"]
            .as_str()
            .unwrap()
            .contains("process their stats"));
    }

    #[tokio::test]
    async fn test_answers_from_processed_csv() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(
            tmp.path(),
            Arc::new(MockRiotApi::default()),
            Arc::new(crate::agents::backend::MockBackend::new(
                "Ahri is your best champion.",
            )),
        );
        state
            .store
            .put(
                &storage::stats_key("puuid-1"),
                b"matchId,kills\nNA1_1,7\n".to_vec(),
            )
            .await
            .unwrap();
        let app = build_router(state);

        let (status, json) = post_json(
            app,
            "/api/players/query",
            r#"{"puuid":"puuid-1","question":"What's my best champion?"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["question"], "What's my best champion?");
        assert_eq!(json["answer"], "Ahri is your best champion.");
        assert_eq!(
            json["dataSource"],
            "users/puuid-1/processed/match_stats.csv"
        );
    }
}
