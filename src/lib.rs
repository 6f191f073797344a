//! # Rift Rewind
//!
//! A League of Legends match-history service with AI-powered analysis.
//!
//! Players are looked up by Riot ID, their recent matches are pulled from
//! the Riot API and stored as raw JSON, then flattened into a per-player
//! CSV that a hosted language model can answer questions about.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (profiles, match statistics, Riot payloads)
//! - **riot**: Riot API client and region routing
//! - **extract**: Per-match statistics extraction
//! - **aggregate**: CSV aggregation of extracted statistics
//! - **storage**: Object store operations (profiles, raw matches, processed stats)
//! - **secrets**: Secret parameter lookup
//! - **agents**: AI-powered match analysis
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod agents;
pub mod aggregate;
pub mod api;
pub mod config;
pub mod extract;
pub mod models;
pub mod riot;
pub mod secrets;
pub mod storage;

pub use models::*;
