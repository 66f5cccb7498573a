//! Lookup orchestration
//!
//! One lookup = check the freshness cache, on miss drive the retry
//! controller through the fetcher collaborator, hand the document to the
//! right parser, write the result back, return it. Lookups for different
//! identities are fully independent; comparing two players runs two
//! pipelines concurrently.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::{debug, info};

use crate::domain::{
    aggregate, AggregateStats, MatchRecord, PlayerProfile, RequestKind, RiotId,
};
use crate::infrastructure::cache::FreshnessCache;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::fetcher::{Document, DocumentFetcher};
use crate::infrastructure::parsing::{Extractor, MatchParser, ProfileParser};
use crate::infrastructure::retry::{LookupError, RetryController};

/// The extraction engine's public face: profile, match history, and
/// aggregate statistics lookups over one injected fetcher.
pub struct LookupService {
    fetcher: Arc<dyn DocumentFetcher>,
    profile_cache: FreshnessCache<PlayerProfile>,
    retry: RetryController,
    profile_parser: ProfileParser,
    match_parser: MatchParser,
    config: AppConfig,
}

impl LookupService {
    /// Build the engine around an injected fetcher collaborator.
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, config: AppConfig) -> Result<Self> {
        config.validate()?;

        let profile_parser = ProfileParser::with_config(&config.selectors.profile)
            .context("profile selector configuration")?;
        let match_parser = MatchParser::with_config(&config.selectors.matches)
            .context("match selector configuration")?;

        Ok(Self {
            fetcher,
            profile_cache: FreshnessCache::with_ttl(Duration::from_millis(config.cache_ttl_ms)),
            retry: RetryController::new(
                config.max_attempts,
                Duration::from_millis(config.retry_base_delay_ms),
            ),
            profile_parser,
            match_parser,
            config,
        })
    }

    /// Summoner page URL for an identity, name percent-encoded.
    pub fn profile_url(&self, id: &RiotId) -> String {
        let name = utf8_percent_encode(&id.name, NON_ALPHANUMERIC);
        let tag = utf8_percent_encode(&id.tag, NON_ALPHANUMERIC);
        format!(
            "{}/lol/summoners/{}/{}-{}",
            self.config.base_url, self.config.region, name, tag
        )
    }

    fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.config.navigation_timeout_ms)
    }

    /// Not-found classification shared by both extraction passes: the page
    /// either names the condition outright or lacks any identity-bearing
    /// element.
    fn check_identity(&self, doc: &Document) -> Result<(), LookupError> {
        if doc.body_contains(&self.config.not_found_marker)
            || !self.profile_parser.has_identity(doc)
        {
            return Err(LookupError::NotFound);
        }
        Ok(())
    }

    /// Player profile for `id`. Served from the freshness cache when a
    /// fresh entry exists; otherwise fetched, extracted, and written back.
    pub async fn profile(&self, id: &RiotId) -> Result<PlayerProfile, LookupError> {
        let key = id.cache_key(RequestKind::Profile);
        if let Some(cached) = self.profile_cache.get(&key) {
            debug!(%id, "profile served from cache");
            return Ok(cached);
        }

        let url = self.profile_url(id);
        let profile = self
            .retry
            .run(
                self.fetcher.as_ref(),
                &url,
                self.navigation_timeout(),
                |doc| {
                    self.check_identity(doc)?;
                    let mut profile = self.profile_parser.extract(doc);
                    profile.profile_url = url.clone();
                    Ok(profile)
                },
            )
            .await?;

        info!(%id, "profile extracted");
        self.profile_cache.put(&key, profile.clone());
        Ok(profile)
    }

    /// Recent match history for `id`, most recent first. Not cached.
    pub async fn matches(&self, id: &RiotId) -> Result<Vec<MatchRecord>, LookupError> {
        let url = self.profile_url(id);
        let records = self
            .retry
            .run(
                self.fetcher.as_ref(),
                &url,
                self.navigation_timeout(),
                |doc| {
                    self.check_identity(doc)?;
                    Ok(self.match_parser.extract(doc))
                },
            )
            .await?;

        info!(%id, count = records.len(), "match history extracted");
        Ok(records)
    }

    /// Single match by 1-based index into the history (1 = most recent).
    pub async fn match_at(&self, id: &RiotId, index: usize) -> Result<MatchRecord, LookupError> {
        let records = self.matches(id).await?;
        index
            .checked_sub(1)
            .and_then(|i| records.into_iter().nth(i))
            .ok_or(LookupError::NotFound)
    }

    /// Aggregate statistics over the most recent `window_size` matches.
    /// Profile and matches are resolved concurrently.
    pub async fn stats(
        &self,
        id: &RiotId,
        window_size: usize,
    ) -> Result<AggregateStats, LookupError> {
        let (profile, records) = tokio::join!(self.profile(id), self.matches(id));
        Ok(aggregate(&records?, &profile?, window_size))
    }

    /// Resolve two players' profiles as independent concurrent pipelines.
    pub async fn compare(
        &self,
        first: &RiotId,
        second: &RiotId,
    ) -> Result<(PlayerProfile, PlayerProfile), LookupError> {
        let (a, b) = tokio::join!(self.profile(first), self.profile(second));
        Ok((a?, b?))
    }
}
