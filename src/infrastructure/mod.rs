//! Infrastructure module - fetching, parsing, retry, cache, configuration
//!
//! Everything that touches the outside world (HTTP, the rendered page's
//! markup) or process-level concerns (config, logging) lives here. The
//! domain layer never imports from this module.

pub mod cache;
pub mod config;
pub mod fetcher;
pub mod logging;
pub mod parsing;
pub mod retry;

// Re-export commonly used items for convenience
pub use cache::FreshnessCache;
pub use config::AppConfig;
pub use fetcher::{Document, DocumentFetcher, ElementScope, FetchError, HttpFetcher};
pub use parsing::{MatchParser, ParseError, ProfileParser};
pub use retry::{LookupError, RetryController};
