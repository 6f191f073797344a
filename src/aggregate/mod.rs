//! CSV aggregation of extracted match statistics.
//!
//! One row per match, header taken from the record field names. The whole
//! table is rebuilt and overwritten on every aggregation run.

use thiserror::Error;

use crate::models::MatchStats;

/// Errors from building the aggregate table.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("no match statistics to aggregate")]
    NoData,

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize the extracted rows to CSV, header first.
///
/// All rows share `MatchStats`'s fixed field set, so the header of the
/// first record is the header of the table. Zero rows is `NoData`: the
/// caller must not write an empty file.
pub fn to_csv(rows: &[MatchStats]) -> Result<String, AggregateError> {
    if rows.is_empty() {
        return Err(AggregateError::NoData);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;

    fn rows(count: usize) -> Vec<MatchStats> {
        (0..count)
            .map(|i| {
                let record = extract::sample_match("puuid-1", &format!("OC1_{}", i));
                extract::player_stats(&record, "puuid-1").unwrap().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert!(matches!(to_csv(&[]), Err(AggregateError::NoData)));
    }

    #[test]
    fn test_header_matches_field_set() {
        let csv = to_csv(&rows(1)).unwrap();
        let header = csv.lines().next().unwrap();

        assert_eq!(
            header,
            "matchId,gameCreation,gameDuration,gameMode,queueId,championName,championId,\
             position,kills,deaths,assists,kdaRatio,cs,goldEarned,damageDealt,damageTaken,\
             visionScore,win,firstBlood,doubleKills,tripleKills,quadraKills,pentaKills,\
             primaryStyle,secondaryStyle,keystone,item0,item1,item2,item3,item4,item5,item6"
        );
    }

    #[test]
    fn test_one_row_per_match() {
        let csv = to_csv(&rows(3)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        // header + 3 rows
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("OC1_0,"));
        assert!(lines[3].starts_with("OC1_2,"));
    }

    #[test]
    fn test_row_carries_derived_values() {
        let csv = to_csv(&rows(1)).unwrap();
        let row = csv.lines().nth(1).unwrap();

        // kdaRatio 8.0 and cs 180 from the sample participant
        assert!(row.contains(",8.0,180,"));
    }
}
