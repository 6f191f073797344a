//! Riot API response payloads.
//!
//! Only the fields this service reads are modeled; raw match records stay
//! as untyped JSON because they are persisted unmodified.

use serde::{Deserialize, Serialize};

/// Account record from `/riot/account/v1/accounts/by-riot-id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiotAccount {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

/// Summoner record from `/lol/summoner/v4/summoners/by-puuid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    pub summoner_level: i64,
    #[serde(default)]
    pub profile_icon_id: i64,
    #[serde(default)]
    pub revision_date: i64,
}

/// One entry from `/lol/champion-mastery/v4/champion-masteries/by-puuid/.../top`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMastery {
    pub champion_id: i64,
    pub champion_level: i64,
    pub champion_points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserialization() {
        let json = r#"{
            "puuid": "abc-123",
            "gameName": "Iceraze",
            "tagLine": "OC"
        }"#;

        let account: RiotAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.puuid, "abc-123");
        assert_eq!(account.game_name, "Iceraze");
        assert_eq!(account.tag_line, "OC");
    }

    #[test]
    fn test_summoner_deserialization_ignores_extra_fields() {
        let json = r#"{
            "puuid": "abc-123",
            "profileIconId": 4568,
            "revisionDate": 1736900000000,
            "summonerLevel": 212
        }"#;

        let summoner: Summoner = serde_json::from_str(json).unwrap();
        assert_eq!(summoner.summoner_level, 212);
        assert_eq!(summoner.profile_icon_id, 4568);
    }

    #[test]
    fn test_summoner_requires_level() {
        let json = r#"{"profileIconId": 4568}"#;
        assert!(serde_json::from_str::<Summoner>(json).is_err());
    }

    #[test]
    fn test_mastery_deserialization() {
        let json = r#"[
            {"championId": 103, "championLevel": 7, "championPoints": 254123},
            {"championId": 64, "championLevel": 5, "championPoints": 60231}
        ]"#;

        let masteries: Vec<ChampionMastery> = serde_json::from_str(json).unwrap();
        assert_eq!(masteries.len(), 2);
        assert_eq!(masteries[0].champion_id, 103);
        assert_eq!(masteries[1].champion_points, 60231);
    }
}
