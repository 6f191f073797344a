//! Per-match statistics extraction.
//!
//! Takes one raw match record (untyped JSON, exactly as the Riot API
//! returned it) plus a PUUID and produces a flat [`MatchStats`] row.
//! A match the player does not appear in is "no data", not an error;
//! a match missing a required field is malformed and skipped on its own.

use serde_json::Value;
use thiserror::Error;

use crate::models::MatchStats;

/// Errors from extracting statistics out of a raw match record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed match record: missing {0}")]
    MalformedMatchRecord(&'static str),
}

/// KDA ratio, rounded to 2 decimal places. Deathless games count one death.
pub fn kda_ratio(kills: i64, deaths: i64, assists: i64) -> f64 {
    let raw = (kills + assists) as f64 / deaths.max(1) as f64;
    (raw * 100.0).round() / 100.0
}

/// Extract one player's statistics from a raw match record.
///
/// Returns `Ok(None)` when the PUUID is not among the participants (the
/// player may have left, or the match predates their current identity).
/// Stable IDs are unique per match, so the first matching participant wins.
pub fn player_stats(record: &Value, puuid: &str) -> Result<Option<MatchStats>, ExtractError> {
    let participants = record
        .pointer("/info/participants")
        .and_then(Value::as_array)
        .ok_or(ExtractError::MalformedMatchRecord("info.participants"))?;

    let Some(participant) = participants
        .iter()
        .find(|p| p.get("puuid").and_then(Value::as_str) == Some(puuid))
    else {
        return Ok(None);
    };

    let metadata = record
        .get("metadata")
        .ok_or(ExtractError::MalformedMatchRecord("metadata"))?;
    let info = record
        .get("info")
        .ok_or(ExtractError::MalformedMatchRecord("info"))?;

    let kills = req_i64(participant, "kills")?;
    let deaths = req_i64(participant, "deaths")?;
    let assists = req_i64(participant, "assists")?;
    let (primary_style, secondary_style, keystone) = perk_styles(participant)?;

    Ok(Some(MatchStats {
        match_id: req_str(metadata, "matchId")?,
        game_creation: req_i64(info, "gameCreation")?,
        game_duration: req_i64(info, "gameDuration")?,
        game_mode: req_str(info, "gameMode")?,
        queue_id: req_i64(info, "queueId")?,
        champion_name: req_str(participant, "championName")?,
        champion_id: req_i64(participant, "championId")?,
        position: participant
            .get("teamPosition")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .unwrap_or("UNKNOWN")
            .to_string(),
        kills,
        deaths,
        assists,
        kda_ratio: kda_ratio(kills, deaths, assists),
        cs: req_i64(participant, "totalMinionsKilled")?
            + req_i64(participant, "neutralMinionsKilled")?,
        gold_earned: req_i64(participant, "goldEarned")?,
        damage_dealt: req_i64(participant, "totalDamageDealtToChampions")?,
        damage_taken: req_i64(participant, "totalDamageTaken")?,
        vision_score: req_i64(participant, "visionScore")?,
        win: req_bool(participant, "win")?,
        first_blood: participant
            .get("firstBloodKill")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        double_kills: req_i64(participant, "doubleKills")?,
        triple_kills: req_i64(participant, "tripleKills")?,
        quadra_kills: req_i64(participant, "quadraKills")?,
        penta_kills: req_i64(participant, "pentaKills")?,
        primary_style,
        secondary_style,
        keystone,
        item0: req_i64(participant, "item0")?,
        item1: req_i64(participant, "item1")?,
        item2: req_i64(participant, "item2")?,
        item3: req_i64(participant, "item3")?,
        item4: req_i64(participant, "item4")?,
        item5: req_i64(participant, "item5")?,
        item6: req_i64(participant, "item6")?,
    }))
}

/// Rune page subset: `perks.styles[0]` is the primary style, `[1]` the
/// secondary, and the first selection of the primary style is the keystone.
fn perk_styles(participant: &Value) -> Result<(i64, i64, i64), ExtractError> {
    let styles = participant
        .pointer("/perks/styles")
        .and_then(Value::as_array)
        .ok_or(ExtractError::MalformedMatchRecord("perks.styles"))?;

    let primary = styles
        .first()
        .ok_or(ExtractError::MalformedMatchRecord("perks.styles[0]"))?;
    let secondary = styles
        .get(1)
        .ok_or(ExtractError::MalformedMatchRecord("perks.styles[1]"))?;

    let primary_style = primary
        .get("style")
        .and_then(Value::as_i64)
        .ok_or(ExtractError::MalformedMatchRecord("perks.styles[0].style"))?;
    let secondary_style = secondary
        .get("style")
        .and_then(Value::as_i64)
        .ok_or(ExtractError::MalformedMatchRecord("perks.styles[1].style"))?;
    let keystone = primary
        .pointer("/selections/0/perk")
        .and_then(Value::as_i64)
        .ok_or(ExtractError::MalformedMatchRecord(
            "perks.styles[0].selections[0].perk",
        ))?;

    Ok((primary_style, secondary_style, keystone))
}

fn req_i64(value: &Value, field: &'static str) -> Result<i64, ExtractError> {
    value
        .get(field)
        .and_then(Value::as_i64)
        .ok_or(ExtractError::MalformedMatchRecord(field))
}

fn req_str(value: &Value, field: &'static str) -> Result<String, ExtractError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ExtractError::MalformedMatchRecord(field))
}

fn req_bool(value: &Value, field: &'static str) -> Result<bool, ExtractError> {
    value
        .get(field)
        .and_then(Value::as_bool)
        .ok_or(ExtractError::MalformedMatchRecord(field))
}

/// A complete raw match record for one participant, used across the
/// extraction, aggregation and handler tests.
#[cfg(test)]
pub fn sample_match(puuid: &str, match_id: &str) -> Value {
    serde_json::json!({
        "metadata": { "matchId": match_id },
        "info": {
            "gameCreation": 1736899200000i64,
            "gameDuration": 1825,
            "gameMode": "CLASSIC",
            "queueId": 420,
            "participants": [
                sample_participant("someone-else"),
                sample_participant(puuid),
            ]
        }
    })
}

#[cfg(test)]
fn sample_participant(puuid: &str) -> Value {
    serde_json::json!({
        "puuid": puuid,
        "championName": "Ahri",
        "championId": 103,
        "teamPosition": "MIDDLE",
        "kills": 7,
        "deaths": 2,
        "assists": 9,
        "totalMinionsKilled": 160,
        "neutralMinionsKilled": 20,
        "goldEarned": 11500,
        "totalDamageDealtToChampions": 24800,
        "totalDamageTaken": 15200,
        "visionScore": 22,
        "win": true,
        "firstBloodKill": false,
        "doubleKills": 1,
        "tripleKills": 0,
        "quadraKills": 0,
        "pentaKills": 0,
        "item0": 6655,
        "item1": 3020,
        "item2": 4645,
        "item3": 3165,
        "item4": 1058,
        "item5": 0,
        "item6": 3363,
        "perks": {
            "styles": [
                { "style": 8200, "selections": [ { "perk": 8214 }, { "perk": 8226 } ] },
                { "style": 8300, "selections": [ { "perk": 8345 } ] }
            ]
        }
    })
}
