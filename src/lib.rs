//! rift-scout - resilient player statistics extraction from a volatile,
//! third-party rendered page
//!
//! The page has no stable API, no guaranteed markup, and active
//! anti-automation defenses. This crate turns it into a small set of typed
//! records (player profile, match history, aggregate performance stats)
//! while tolerating markup drift (ordered-fallback selectors), transient
//! blocking (classified, bounded retries with backoff), and partial data
//! (field absence is recovered locally, never escalated).
//!
//! The chat/command surface consuming these records, and the rendering
//! engine behind the [`infrastructure::DocumentFetcher`] seam, are
//! collaborators, not part of this crate's core.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::LookupService;
pub use domain::{aggregate, AggregateStats, MatchRecord, PlayerProfile, RiotId};
pub use infrastructure::{AppConfig, DocumentFetcher, HttpFetcher, LookupError};
