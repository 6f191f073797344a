//! Riot API client.
//!
//! Thin client over the account-v1, summoner-v4, champion-mastery-v4 and
//! match-v5 endpoints. The API key is passed per call because it is
//! resolved from the secret store at request time, not at startup.
//! No retries: a failed call surfaces immediately to the handler.

pub mod routing;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::{ChampionMastery, RiotAccount, Summoner};

/// Header carrying the Riot API key.
const API_KEY_HEADER: &str = "X-Riot-Token";

/// Errors from the Riot API client.
#[derive(Debug, Error)]
pub enum RiotError {
    #[error("{0} not found upstream")]
    NotFound(&'static str),

    #[error("Riot API rejected the credential (HTTP {status})")]
    Forbidden { status: u16 },

    #[error("Riot API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// The remote lookups one ingestion run performs, as a substitutable seam.
#[async_trait]
pub trait RiotApi: Send + Sync {
    /// Resolve a Riot ID to its account record (account routing cluster).
    async fn account_by_riot_id(
        &self,
        api_key: &str,
        region: &str,
        game_name: &str,
        tag_line: &str,
    ) -> Result<RiotAccount, RiotError>;

    /// Fetch the summoner record in the literal region.
    async fn summoner_by_puuid(
        &self,
        api_key: &str,
        region: &str,
        puuid: &str,
    ) -> Result<Summoner, RiotError>;

    /// Fetch the top champion masteries in the literal region.
    async fn top_masteries(
        &self,
        api_key: &str,
        region: &str,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<ChampionMastery>, RiotError>;

    /// List recent match IDs (match routing cluster).
    async fn match_ids(
        &self,
        api_key: &str,
        region: &str,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, RiotError>;

    /// Fetch one full match record (match routing cluster).
    async fn match_by_id(
        &self,
        api_key: &str,
        region: &str,
        match_id: &str,
    ) -> Result<Value, RiotError>;
}

/// Reqwest-backed Riot API client.
pub struct RiotClient {
    client: reqwest::Client,
}

impl RiotClient {
    /// Create a new client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, RiotError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Build an endpoint URL on the given API host, percent-encoding each
    /// path segment (game names and tags are caller-supplied).
    fn endpoint(host: &str, segments: &[&str]) -> Result<Url, RiotError> {
        let mut url = Url::parse(&format!("https://{}.api.riotgames.com", host))
            .map_err(|e| RiotError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| RiotError::InvalidUrl(host.to_string()))?
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        api_key: &str,
        url: Url,
        what: &'static str,
    ) -> Result<T, RiotError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RiotError::NotFound(what));
        }
        if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
            return Err(RiotError::Forbidden {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RiotError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn account_by_riot_id(
        &self,
        api_key: &str,
        region: &str,
        game_name: &str,
        tag_line: &str,
    ) -> Result<RiotAccount, RiotError> {
        let cluster = routing::account_route(region);
        let url = Self::endpoint(
            cluster,
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        self.get_json(api_key, url, "Riot ID").await
    }

    async fn summoner_by_puuid(
        &self,
        api_key: &str,
        region: &str,
        puuid: &str,
    ) -> Result<Summoner, RiotError> {
        let url = Self::endpoint(
            region,
            &["lol", "summoner", "v4", "summoners", "by-puuid", puuid],
        )?;
        self.get_json(api_key, url, "summoner").await
    }

    async fn top_masteries(
        &self,
        api_key: &str,
        region: &str,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<ChampionMastery>, RiotError> {
        let mut url = Self::endpoint(
            region,
            &[
                "lol",
                "champion-mastery",
                "v4",
                "champion-masteries",
                "by-puuid",
                puuid,
                "top",
            ],
        )?;
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());
        self.get_json(api_key, url, "champion masteries").await
    }

    async fn match_ids(
        &self,
        api_key: &str,
        region: &str,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, RiotError> {
        let cluster = routing::match_route(region);
        let mut url = Self::endpoint(
            cluster,
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("start", "0")
            .append_pair("count", &count.to_string());
        self.get_json(api_key, url, "match list").await
    }

    async fn match_by_id(
        &self,
        api_key: &str,
        region: &str,
        match_id: &str,
    ) -> Result<Value, RiotError> {
        let cluster = routing::match_route(region);
        let url = Self::endpoint(cluster, &["lol", "match", "v5", "matches", match_id])?;
        self.get_json(api_key, url, "match").await
    }
}

/// Scripted Riot API for tests.
///
/// `None` lookups answer 404-equivalent errors; match IDs without a
/// record in `matches` answer an upstream 500.
#[cfg(test)]
#[derive(Default)]
pub struct MockRiotApi {
    pub forbidden: bool,
    pub account: Option<RiotAccount>,
    pub summoner: Option<Summoner>,
    pub masteries: Vec<ChampionMastery>,
    pub match_ids: Vec<String>,
    pub matches: std::collections::HashMap<String, Value>,
}

#[cfg(test)]
#[async_trait]
impl RiotApi for MockRiotApi {
    async fn account_by_riot_id(
        &self,
        _api_key: &str,
        _region: &str,
        _game_name: &str,
        _tag_line: &str,
    ) -> Result<RiotAccount, RiotError> {
        if self.forbidden {
            return Err(RiotError::Forbidden { status: 403 });
        }
        self.account.clone().ok_or(RiotError::NotFound("Riot ID"))
    }

    async fn summoner_by_puuid(
        &self,
        _api_key: &str,
        _region: &str,
        _puuid: &str,
    ) -> Result<Summoner, RiotError> {
        self.summoner.clone().ok_or(RiotError::NotFound("summoner"))
    }

    async fn top_masteries(
        &self,
        _api_key: &str,
        _region: &str,
        _puuid: &str,
        count: u32,
    ) -> Result<Vec<ChampionMastery>, RiotError> {
        Ok(self
            .masteries
            .iter()
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn match_ids(
        &self,
        _api_key: &str,
        _region: &str,
        _puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, RiotError> {
        Ok(self
            .match_ids
            .iter()
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn match_by_id(
        &self,
        _api_key: &str,
        _region: &str,
        match_id: &str,
    ) -> Result<Value, RiotError> {
        self.matches
            .get(match_id)
            .cloned()
            .ok_or(RiotError::Status {
                status: 500,
                body: "match fetch failed".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_builds_account_url() {
        let url = RiotClient::endpoint(
            "americas",
            &["riot", "account", "v1", "accounts", "by-riot-id", "Iceraze", "OC"],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://americas.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Iceraze/OC"
        );
    }

    #[test]
    fn test_endpoint_percent_encodes_segments() {
        let url = RiotClient::endpoint(
            "americas",
            &["riot", "account", "v1", "accounts", "by-riot-id", "Game Name", "T/G"],
        )
        .unwrap();

        assert!(url.as_str().ends_with("/Game%20Name/T%2FG"));
    }

    #[test]
    fn test_match_ids_url_shape() {
        let mut url = RiotClient::endpoint(
            "sea",
            &["lol", "match", "v5", "matches", "by-puuid", "puuid-1", "ids"],
        )
        .unwrap();
        url.query_pairs_mut()
            .append_pair("start", "0")
            .append_pair("count", "5");

        assert_eq!(
            url.as_str(),
            "https://sea.api.riotgames.com/lol/match/v5/matches/by-puuid/puuid-1/ids?start=0&count=5"
        );
    }

    #[tokio::test]
    async fn test_mock_not_found() {
        let mock = MockRiotApi::default();
        let err = mock
            .account_by_riot_id("key", "na1", "Foo", "NA1")
            .await
            .unwrap_err();
        assert!(matches!(err, RiotError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mock_match_ids_respects_count() {
        let mock = MockRiotApi {
            match_ids: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };
        let ids = mock.match_ids("key", "na1", "p", 2).await.unwrap();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }
}
