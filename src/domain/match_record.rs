//! Match history entities
//!
//! One record per match container on the page, most recent first. A record
//! is only materialized when its champion name resolved; everything else is
//! best-effort and independently optional.

use serde::{Deserialize, Serialize};

/// Upper bound on a plausible kill/death/assist count. A triple with any
/// component above this is treated as a misread and discarded whole.
pub const KDA_PLAUSIBILITY_BOUND: u32 = 50;

/// Win/loss outcome of a single match.
///
/// Absent (`Option<MatchOutcome>::None`) when the container carries no
/// explicit marker - an ambiguous container must not silently become a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Loss,
}

/// Top-performer award attached to at most one side per match.
/// MVP takes precedence when a container carries both markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Award {
    Mvp,
    Ace,
}

/// Kills/deaths/assists triple for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kda {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl Kda {
    /// Build a triple, rejecting implausible values wholesale: if any
    /// component exceeds [`KDA_PLAUSIBILITY_BOUND`], none of the three
    /// fields populate.
    pub fn checked(kills: u32, deaths: u32, assists: u32) -> Option<Self> {
        if kills > KDA_PLAUSIBILITY_BOUND
            || deaths > KDA_PLAUSIBILITY_BOUND
            || assists > KDA_PLAUSIBILITY_BOUND
        {
            return None;
        }
        Some(Self {
            kills,
            deaths,
            assists,
        })
    }

    /// Performance ratio `(kills + assists) / deaths`, with a death count
    /// of zero treated as one to avoid division by zero.
    pub fn ratio(&self) -> f64 {
        f64::from(self.kills + self.assists) / f64::from(self.deaths.max(1))
    }
}

/// A single extracted match history entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Win/loss, absent when no explicit marker was found.
    pub outcome: Option<MatchOutcome>,
    /// Played champion name. Required: records missing it are dropped.
    pub champion: String,
    /// Champion icon image URL.
    pub champion_icon: Option<String>,
    /// Kill/death/assist triple, absent when unparsable or implausible.
    pub kda: Option<Kda>,
    /// Performance score on a 0-10 scale, one decimal of precision.
    pub op_score: Option<f64>,
    /// MVP/ACE award, if any.
    pub award: Option<Award>,
    /// Queue or game mode label.
    pub game_mode: Option<String>,
    /// Match duration text.
    pub duration: Option<String>,
    /// Recency label ("3 hours ago").
    pub time_ago: Option<String>,
    /// Minion/farm count.
    pub cs: Option<u32>,
    /// Vision/map-control score.
    pub vision_score: Option<u32>,
    /// Damage dealt, kept as page text (the source abbreviates, e.g. "24.1k").
    pub damage_dealt: Option<String>,
    /// Equipped item names, at most six.
    pub items: Vec<String>,
}
