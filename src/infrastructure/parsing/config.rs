//! Selector configuration for page extraction
//!
//! Centralized CSS selector lists with fallbacks. The defaults encode the
//! source page's markup as last observed; when the page drifts, these can
//! be overridden from the application config file without touching parser
//! code. Order matters: most stable selector first.

use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Selector lists for both extraction passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub profile: ProfileSelectors,
    pub matches: MatchSelectors,
}

/// CSS selectors for the profile header area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSelectors {
    /// Summoner display name; a bare heading is the last resort.
    pub name: Vec<String>,
    /// Profile icon `<img>`.
    pub icon: Vec<String>,
    pub level: Vec<String>,
    /// Rank tier token ("GOLD").
    pub tier: Vec<String>,
    /// Rank division token ("II").
    pub division: Vec<String>,
    /// Combined rank text, tried when tier/division do not resolve separately.
    pub rank_info: Vec<String>,
    pub league_points: Vec<String>,
    pub win_rate: Vec<String>,
    pub wins: Vec<String>,
    pub losses: Vec<String>,
    pub ladder_rank: Vec<String>,
    pub most_played: Vec<String>,
    /// Recent result indicators, document order (most recent first).
    pub recent_results: Vec<String>,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            name: strings(&[
                ".summoner-name",
                "[data-testid=\"summoner-name\"]",
                ".profile-name",
                "h1",
            ]),
            icon: strings(&[".profile-icon img", ".summoner-icon img", ".player-icon img"]),
            level: strings(&[".level", ".summoner-level", ".player-level"]),
            tier: strings(&[".tier"]),
            division: strings(&[".rank"]),
            rank_info: strings(&[".rank-info", ".tier-info"]),
            league_points: strings(&[".lp", ".league-points", ".rank-lp"]),
            win_rate: strings(&[".win-rate", ".winrate", ".win-ratio"]),
            wins: strings(&[".wins"]),
            losses: strings(&[".losses"]),
            ladder_rank: strings(&[".ladder-rank"]),
            most_played: strings(&[".champion-name", ".most-champion", ".main-champion"]),
            recent_results: strings(&[".game-result"]),
        }
    }
}

/// CSS selectors for the match history list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSelectors {
    /// Match container candidates; the first that yields any element wins.
    pub container: Vec<String>,
    pub champion_name: Vec<String>,
    pub champion_icon: Vec<String>,
    /// Element carrying the `k/d/a` score text.
    pub kda: Vec<String>,
    pub op_score: Vec<String>,
    pub mvp_badge: Vec<String>,
    pub ace_badge: Vec<String>,
    /// Generic badge, inspected by text when the specific classes are absent.
    pub badge: Vec<String>,
    pub game_mode: Vec<String>,
    pub duration: Vec<String>,
    pub time_ago: Vec<String>,
    pub cs: Vec<String>,
    pub vision_score: Vec<String>,
    pub damage: Vec<String>,
    /// Item icon `<img>` elements; names come from `alt`/`title`.
    pub items: Vec<String>,
}

impl Default for MatchSelectors {
    fn default() -> Self {
        Self {
            container: strings(&[".game-item", ".match-item", ".game-history-item"]),
            champion_name: strings(&[".champion-name", ".champ-name"]),
            champion_icon: strings(&[".champion-image img", ".champ-img img"]),
            kda: strings(&[".kda", ".match-kda", ".score"]),
            op_score: strings(&[".op-score", ".match-score", ".performance-score"]),
            mvp_badge: strings(&[".mvp"]),
            ace_badge: strings(&[".ace"]),
            badge: strings(&[".badge"]),
            game_mode: strings(&[".game-mode", ".queue-type"]),
            duration: strings(&[".game-length", ".match-duration", ".game-time"]),
            time_ago: strings(&[".game-time", ".match-time", ".time-ago"]),
            cs: strings(&[".cs", ".minion-kill"]),
            vision_score: strings(&[".vision-score", ".ward-score"]),
            damage: strings(&[".damage", ".total-damage"]),
            items: strings(&[".item img", ".build-item img"]),
        }
    }
}
