//! Core data structures.

pub mod match_stats;
pub mod profile;
pub mod riot;

pub use match_stats::MatchStats;
pub use profile::PlayerProfile;
pub use riot::{ChampionMastery, RiotAccount, Summoner};
