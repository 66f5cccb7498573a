//! Domain module - Core types and pure logic
//!
//! This module contains the extracted record types (player profile, match
//! history entries) and the pure aggregation logic that turns a list of
//! matches into summary statistics. Nothing in here touches the network
//! or the HTML layer.

pub mod identity;
pub mod match_record;
pub mod player;
pub mod stats;

// Re-export commonly used items for convenience
pub use identity::{RequestKind, RiotId, DEFAULT_TAG};
pub use match_record::{Award, Kda, MatchOutcome, MatchRecord};
pub use player::PlayerProfile;
pub use stats::{aggregate, AggregateStats};
