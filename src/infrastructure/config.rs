//! Application configuration
//!
//! Defaults mirror the reference behavior (VN region, 30 s navigation
//! timeout, 3 attempts with a 2 s backoff base, 5 minute cache TTL). An
//! optional JSON file can override any subset of fields, including the
//! selector lists, so markup drift can be patched without a rebuild.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::parsing::SelectorConfig;

/// Top-level configuration for the lookup engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source site base URL.
    pub base_url: String,
    /// Region path segment for summoner pages.
    pub region: String,
    /// Browser-like user agent presented by the fetcher.
    pub user_agent: String,
    /// Per-attempt navigation timeout in milliseconds.
    pub navigation_timeout_ms: u64,
    /// Maximum fetch attempts per lookup.
    pub max_attempts: u32,
    /// Backoff base delay in milliseconds; attempt n waits n × base.
    pub retry_base_delay_ms: u64,
    /// Profile cache time-to-live in milliseconds.
    pub cache_ttl_ms: u64,
    /// Page text marking a nonexistent summoner.
    pub not_found_marker: String,
    /// CSS selector lists for both extraction passes.
    pub selectors: SelectorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://op.gg".to_string(),
            region: "vn".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            navigation_timeout_ms: 30_000,
            max_attempts: 3,
            retry_base_delay_ms: 2_000,
            cache_ttl_ms: 300_000,
            not_found_marker: "Summoner Not Found".to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file; unspecified fields keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sanity checks that would otherwise surface as confusing lookup
    /// failures much later.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url '{}'", self.base_url))?;
        anyhow::ensure!(self.max_attempts >= 1, "max_attempts must be at least 1");
        anyhow::ensure!(!self.region.is_empty(), "region must not be empty");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.region, "vn");
        assert_eq!(config.cache_ttl_ms, 300_000);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_base_delay_ms, 2_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_keep_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"region": "kr", "max_attempts": 5}"#).unwrap();
        assert_eq!(config.region, "kr");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.cache_ttl_ms, 300_000);
        assert!(!config.selectors.profile.name.is_empty());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let config = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
