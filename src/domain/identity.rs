//! Player identity - name plus region tagline
//!
//! A player record on the source is addressed by a `name#tag` pair. Callers
//! may omit the tag, in which case the conventional default tagline is
//! substituted at the parsing edge; the core only ever sees a complete pair.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default tagline applied when the caller omits one (`Name` → `Name#666`).
pub const DEFAULT_TAG: &str = "666";

/// A name + tagline pair uniquely addressing a player on the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiotId {
    pub name: String,
    pub tag: String,
}

impl RiotId {
    /// Create an identity from a pre-split pair.
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Parse `"Name#TAG"` input. A missing or empty tag falls back to
    /// [`DEFAULT_TAG`].
    pub fn parse(input: &str) -> Self {
        match input.split_once('#') {
            Some((name, tag)) if !tag.trim().is_empty() => {
                Self::new(name.trim(), tag.trim())
            }
            Some((name, _)) => Self::new(name.trim(), DEFAULT_TAG),
            None => Self::new(input.trim(), DEFAULT_TAG),
        }
    }

    /// Normalized cache key for this identity and request kind.
    ///
    /// Lookups differing only in letter case must hit the same entry, so
    /// both halves are lower-cased.
    pub fn cache_key(&self, kind: RequestKind) -> String {
        format!(
            "{}:{}#{}",
            kind.as_str(),
            self.name.to_lowercase(),
            self.tag.to_lowercase()
        )
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.tag)
    }
}

/// Kind of lookup, part of the cache key so profile and match results for
/// the same player never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Profile,
    Matches,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Matches => "matches",
        }
    }
}
