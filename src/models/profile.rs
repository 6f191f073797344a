//! Player profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One profile document per player, overwritten on each ingestion run.
///
/// Stored at `users/<puuid>/profile.json`. The PUUID is the stable Riot
/// identifier and the sole key used for all storage paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub summoner_level: i64,
    pub region: String,
    pub updated_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Full Riot ID in `GameName#TAG` form.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerProfile {
        PlayerProfile {
            puuid: "puuid-123".to_string(),
            game_name: "Iceraze".to_string(),
            tag_line: "OC".to_string(),
            summoner_level: 212,
            region: "oc1".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_riot_id() {
        assert_eq!(sample().riot_id(), "Iceraze#OC");
    }

    #[test]
    fn test_profile_serialization_round_trip() {
        let profile = sample();
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: PlayerProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, parsed);
    }

    #[test]
    fn test_profile_uses_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("gameName").is_some());
        assert!(json.get("tagLine").is_some());
        assert!(json.get("summonerLevel").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
