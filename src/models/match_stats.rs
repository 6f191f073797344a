//! Flat per-match statistics for one player.

use serde::{Deserialize, Serialize};

/// Statistics extracted from one raw match record for one participant.
///
/// Derived data: recomputable at any time from the stored raw match, and
/// only ever persisted as a row of the aggregate CSV. Field order here is
/// the column order of that file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub match_id: String,
    pub game_creation: i64,
    pub game_duration: i64,
    pub game_mode: String,
    pub queue_id: i64,
    pub champion_name: String,
    pub champion_id: i64,
    pub position: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub kda_ratio: f64,
    pub cs: i64,
    pub gold_earned: i64,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub vision_score: i64,
    pub win: bool,
    pub first_blood: bool,
    pub double_kills: i64,
    pub triple_kills: i64,
    pub quadra_kills: i64,
    pub penta_kills: i64,
    pub primary_style: i64,
    pub secondary_style: i64,
    pub keystone: i64,
    pub item0: i64,
    pub item1: i64,
    pub item2: i64,
    pub item3: i64,
    pub item4: i64,
    pub item5: i64,
    pub item6: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_stats_uses_camel_case_keys() {
        let stats = MatchStats {
            match_id: "OC1_1".to_string(),
            game_creation: 1,
            game_duration: 1800,
            game_mode: "CLASSIC".to_string(),
            queue_id: 420,
            champion_name: "Ahri".to_string(),
            champion_id: 103,
            position: "MIDDLE".to_string(),
            kills: 5,
            deaths: 2,
            assists: 9,
            kda_ratio: 7.0,
            cs: 180,
            gold_earned: 11000,
            damage_dealt: 24000,
            damage_taken: 15000,
            vision_score: 21,
            win: true,
            first_blood: false,
            double_kills: 1,
            triple_kills: 0,
            quadra_kills: 0,
            penta_kills: 0,
            primary_style: 8200,
            secondary_style: 8300,
            keystone: 8214,
            item0: 6655,
            item1: 3020,
            item2: 4645,
            item3: 3165,
            item4: 0,
            item5: 0,
            item6: 3363,
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("matchId").is_some());
        assert!(json.get("kdaRatio").is_some());
        assert!(json.get("championName").is_some());
        assert!(json.get("firstBlood").is_some());
        assert!(json.get("primaryStyle").is_some());
        assert!(json.get("item6").is_some());
    }
}
