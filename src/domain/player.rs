//! Player profile entity
//!
//! One profile is assembled per successful extraction and is immutable
//! afterwards. Every field except the profile URL is optional: the source
//! page routinely omits data, and absence is a valid state distinct from
//! zero. Win/loss counts are the exception - they have a meaningful zero
//! default, matching the reference behavior.

use serde::{Deserialize, Serialize};

/// Extracted player profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Display name as rendered on the page.
    pub summoner_name: Option<String>,
    /// Summoner level, kept as page text (the source sometimes decorates it).
    pub level: Option<String>,
    /// Composed "TIER Division" string, or the combined rank-info text when
    /// tier and division do not resolve separately. `None` means unranked
    /// or not extracted; see [`PlayerProfile::rank_display`].
    pub rank: Option<String>,
    /// League points text.
    pub league_points: Option<String>,
    /// Win-rate percentage text.
    pub win_rate: Option<String>,
    /// Aggregate win count. Defaults to 0 when the element is absent.
    pub wins: u32,
    /// Aggregate loss count. Defaults to 0 when the element is absent.
    pub losses: u32,
    /// Profile icon image URL.
    pub profile_icon: Option<String>,
    /// Ladder position, digits and thousands separators only.
    pub ladder_rank: Option<String>,
    /// Most-played champion name.
    pub most_played: Option<String>,
    /// Recent results, most recent first, up to five `W`/`L` characters.
    pub recent_form: Option<String>,
    /// Canonical URL the profile was extracted from.
    pub profile_url: String,
}

impl PlayerProfile {
    /// Rank for display purposes. The stored field stays `None` so the
    /// absent-vs-extracted distinction survives in the data model.
    pub fn rank_display(&self) -> &str {
        self.rank.as_deref().unwrap_or("Unranked")
    }
}
