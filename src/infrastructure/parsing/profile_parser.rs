//! Profile extraction
//!
//! Assembles a [`PlayerProfile`] from a single document by running each
//! field's ordered selector list. Missing fields recover locally and never
//! escalate - the only request-level "no profile" decision (not-found vs.
//! blocked) belongs to the retry layer, not here.

use regex::Regex;

use super::config::ProfileSelectors;
use super::selectors::SelectorSet;
use super::{compile_pattern, Extractor, ParseError};
use crate::domain::PlayerProfile;
use crate::infrastructure::fetcher::Document;

/// Maximum recent-result indicators folded into the form string.
const RECENT_FORM_LEN: usize = 5;

/// Parser for the profile header area of a summoner page.
pub struct ProfileParser {
    name: SelectorSet,
    icon: SelectorSet,
    level: SelectorSet,
    tier: SelectorSet,
    division: SelectorSet,
    rank_info: SelectorSet,
    league_points: SelectorSet,
    win_rate: SelectorSet,
    wins: SelectorSet,
    losses: SelectorSet,
    ladder_rank: SelectorSet,
    most_played: SelectorSet,
    recent_results: SelectorSet,
    /// First run of digits in field text ("Wins: 12" → 12).
    digit_run: Regex,
    /// Digits with thousands separators for ladder positions ("1,234").
    ladder_run: Regex,
}

impl ProfileParser {
    /// Create a parser with default selectors.
    pub fn new() -> Result<Self, ParseError> {
        Self::with_config(&ProfileSelectors::default())
    }

    /// Create a parser from a selector configuration.
    pub fn with_config(selectors: &ProfileSelectors) -> Result<Self, ParseError> {
        Ok(Self {
            name: SelectorSet::compile("summoner_name", &selectors.name)?,
            icon: SelectorSet::compile("profile_icon", &selectors.icon)?,
            level: SelectorSet::compile("level", &selectors.level)?,
            tier: SelectorSet::compile("tier", &selectors.tier)?,
            division: SelectorSet::compile("division", &selectors.division)?,
            rank_info: SelectorSet::compile("rank_info", &selectors.rank_info)?,
            league_points: SelectorSet::compile("league_points", &selectors.league_points)?,
            win_rate: SelectorSet::compile("win_rate", &selectors.win_rate)?,
            wins: SelectorSet::compile("wins", &selectors.wins)?,
            losses: SelectorSet::compile("losses", &selectors.losses)?,
            ladder_rank: SelectorSet::compile("ladder_rank", &selectors.ladder_rank)?,
            most_played: SelectorSet::compile("most_played", &selectors.most_played)?,
            recent_results: SelectorSet::compile("recent_results", &selectors.recent_results)?,
            digit_run: compile_pattern("digit_run", r"\d+")?,
            ladder_run: compile_pattern("ladder_run", r"[\d,]+")?,
        })
    }

    /// Whether the identity-bearing element resolves at all. The retry
    /// layer uses this for its not-found classification.
    pub fn has_identity(&self, doc: &Document) -> bool {
        doc.first_text(&self.name).is_some()
    }

    /// Rank composed from separate tier and division tokens when both
    /// resolve, falling back to the combined rank-info text.
    fn extract_rank(&self, doc: &Document) -> Option<String> {
        match (doc.first_text(&self.tier), doc.first_text(&self.division)) {
            (Some(tier), Some(division)) => Some(format!("{tier} {division}")),
            _ => doc.first_text(&self.rank_info),
        }
    }

    /// First digit run of the field text; absent element yields zero -
    /// unlike rank, this field has a meaningful zero default.
    fn extract_count(&self, doc: &Document, selectors: &SelectorSet) -> u32 {
        doc.first_text(selectors)
            .and_then(|text| {
                self.digit_run
                    .find(&text)
                    .and_then(|m| m.as_str().parse().ok())
            })
            .unwrap_or(0)
    }

    /// Win/loss characters for the first few result indicators, document
    /// order preserved (most recent first).
    fn extract_recent_form(&self, doc: &Document) -> Option<String> {
        let indicators = doc.select_all(&self.recent_results);
        if indicators.is_empty() {
            return None;
        }
        Some(
            indicators
                .iter()
                .take(RECENT_FORM_LEN)
                .map(|el| if el.has_class("win") { 'W' } else { 'L' })
                .collect(),
        )
    }
}

impl Extractor for ProfileParser {
    type Output = PlayerProfile;

    fn extract(&self, doc: &Document) -> PlayerProfile {
        PlayerProfile {
            summoner_name: doc.first_text(&self.name),
            level: doc.first_text(&self.level),
            rank: self.extract_rank(doc),
            league_points: doc.first_text(&self.league_points),
            win_rate: doc.first_text(&self.win_rate),
            wins: self.extract_count(doc, &self.wins),
            losses: self.extract_count(doc, &self.losses),
            profile_icon: doc.first_attr(&self.icon, "src"),
            ladder_rank: doc
                .first_text(&self.ladder_rank)
                .and_then(|text| self.ladder_run.find(&text).map(|m| m.as_str().to_string())),
            most_played: doc.first_text(&self.most_played),
            recent_form: self.extract_recent_form(doc),
            profile_url: String::new(),
        }
    }
}
