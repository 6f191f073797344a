//! Request handlers.

pub mod players;
pub mod query;
pub mod stats;
