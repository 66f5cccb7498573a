//! Match history extraction
//!
//! Locates the match container list (first container selector yielding any
//! element wins) and extracts one [`MatchRecord`] per container, document
//! order preserved. Records whose champion name does not resolve are
//! dropped entirely rather than emitted as hollow entries; every other
//! field is best-effort and independently optional.

use regex::Regex;
use tracing::debug;

use super::config::MatchSelectors;
use super::selectors::SelectorSet;
use super::{compile_pattern, Extractor, ParseError};
use crate::domain::{Award, Kda, MatchOutcome, MatchRecord};
use crate::infrastructure::fetcher::{Document, ElementScope};

/// Maximum equipped item names carried per record.
const MAX_ITEMS: usize = 6;

/// Parser for the match history section of a summoner page.
pub struct MatchParser {
    container: SelectorSet,
    champion_name: SelectorSet,
    champion_icon: SelectorSet,
    kda: SelectorSet,
    op_score: SelectorSet,
    mvp_badge: SelectorSet,
    ace_badge: SelectorSet,
    badge: SelectorSet,
    game_mode: SelectorSet,
    duration: SelectorSet,
    time_ago: SelectorSet,
    cs: SelectorSet,
    vision_score: SelectorSet,
    damage: SelectorSet,
    items: SelectorSet,
    /// `k/d/a` triple, separators tolerant of drift between `/` and spaces.
    kda_pattern: Regex,
    /// First decimal or integer number in a score-labeled element.
    score_pattern: Regex,
    /// First run of digits for farm/vision counts.
    digit_run: Regex,
}

impl MatchParser {
    /// Create a parser with default selectors.
    pub fn new() -> Result<Self, ParseError> {
        Self::with_config(&MatchSelectors::default())
    }

    /// Create a parser from a selector configuration.
    pub fn with_config(selectors: &MatchSelectors) -> Result<Self, ParseError> {
        Ok(Self {
            container: SelectorSet::compile("match_container", &selectors.container)?,
            champion_name: SelectorSet::compile("champion_name", &selectors.champion_name)?,
            champion_icon: SelectorSet::compile("champion_icon", &selectors.champion_icon)?,
            kda: SelectorSet::compile("kda", &selectors.kda)?,
            op_score: SelectorSet::compile("op_score", &selectors.op_score)?,
            mvp_badge: SelectorSet::compile("mvp_badge", &selectors.mvp_badge)?,
            ace_badge: SelectorSet::compile("ace_badge", &selectors.ace_badge)?,
            badge: SelectorSet::compile("badge", &selectors.badge)?,
            game_mode: SelectorSet::compile("game_mode", &selectors.game_mode)?,
            duration: SelectorSet::compile("duration", &selectors.duration)?,
            time_ago: SelectorSet::compile("time_ago", &selectors.time_ago)?,
            cs: SelectorSet::compile("cs", &selectors.cs)?,
            vision_score: SelectorSet::compile("vision_score", &selectors.vision_score)?,
            damage: SelectorSet::compile("damage", &selectors.damage)?,
            items: SelectorSet::compile("items", &selectors.items)?,
            kda_pattern: compile_pattern("kda", r"(\d+)[/\s]*(\d+)[/\s]*(\d+)")?,
            score_pattern: compile_pattern("op_score", r"(\d+\.?\d*)")?,
            digit_run: compile_pattern("digit_run", r"\d+")?,
        })
    }

    /// Win/loss from the container's marker classes. No explicit marker
    /// means the outcome stays absent; an ambiguous container must not
    /// silently read as a loss.
    fn extract_outcome(&self, container: ElementScope<'_>) -> Option<MatchOutcome> {
        if container.has_class("win") {
            Some(MatchOutcome::Win)
        } else if container.has_class("lose") || container.has_class("loss") {
            Some(MatchOutcome::Loss)
        } else {
            None
        }
    }

    /// Parse the `k/d/a` score text. An implausible triple (any component
    /// beyond the bound) invalidates all three fields, not just one.
    fn extract_kda(&self, container: ElementScope<'_>) -> Option<Kda> {
        let text = self.kda.first_text(container)?;
        let caps = self.kda_pattern.captures(&text)?;
        let kills: u32 = caps.get(1)?.as_str().parse().ok()?;
        let deaths: u32 = caps.get(2)?.as_str().parse().ok()?;
        let assists: u32 = caps.get(3)?.as_str().parse().ok()?;

        let kda = Kda::checked(kills, deaths, assists);
        if kda.is_none() {
            debug!(kills, deaths, assists, "discarding implausible KDA triple");
        }
        kda
    }

    /// Performance score, one decimal of precision.
    fn extract_op_score(&self, container: ElementScope<'_>) -> Option<f64> {
        let text = self.op_score.first_text(container)?;
        let raw: f64 = self.score_pattern.captures(&text)?.get(1)?.as_str().parse().ok()?;
        Some(crate::domain::stats::round_one_decimal(raw))
    }

    /// MVP or ACE designation. MVP takes precedence when a container
    /// carries both markers.
    fn extract_award(&self, container: ElementScope<'_>) -> Option<Award> {
        let badge_text = self
            .badge
            .first_text(container)
            .unwrap_or_default()
            .to_uppercase();

        if self.mvp_badge.exists(container) || badge_text.contains("MVP") {
            Some(Award::Mvp)
        } else if self.ace_badge.exists(container) || badge_text.contains("ACE") {
            Some(Award::Ace)
        } else {
            None
        }
    }

    fn extract_numeric(&self, container: ElementScope<'_>, selectors: &SelectorSet) -> Option<u32> {
        let text = selectors.first_text(container)?;
        self.digit_run.find(&text)?.as_str().parse().ok()
    }

    /// Item names from icon `alt`/`title` labels, first six.
    fn extract_items(&self, container: ElementScope<'_>) -> Vec<String> {
        self.items
            .select_all(container)
            .iter()
            .filter_map(|icon| {
                let element = icon.element().value();
                element
                    .attr("alt")
                    .or_else(|| element.attr("title"))
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(ToString::to_string)
            })
            .take(MAX_ITEMS)
            .collect()
    }

    fn extract_record(&self, container: ElementScope<'_>) -> Option<MatchRecord> {
        // Champion name is the one required field; a container without it
        // is a misread, not a match.
        let champion = self.champion_name.first_text(container)?;

        Some(MatchRecord {
            outcome: self.extract_outcome(container),
            champion,
            champion_icon: self.champion_icon.first_attr(container, "src"),
            kda: self.extract_kda(container),
            op_score: self.extract_op_score(container),
            award: self.extract_award(container),
            game_mode: self.game_mode.first_text(container),
            duration: self.duration.first_text(container),
            time_ago: self.time_ago.first_text(container),
            cs: self.extract_numeric(container, &self.cs),
            vision_score: self.extract_numeric(container, &self.vision_score),
            damage_dealt: self.damage.first_text(container),
            items: self.extract_items(container),
        })
    }
}

impl Extractor for MatchParser {
    type Output = Vec<MatchRecord>;

    fn extract(&self, doc: &Document) -> Vec<MatchRecord> {
        let containers = doc.select_all(&self.container);
        let mut records = Vec::with_capacity(containers.len());

        for (index, container) in containers.iter().enumerate() {
            match self.extract_record(*container) {
                Some(record) => records.push(record),
                None => debug!(index, "dropping match container without champion name"),
            }
        }

        debug!(
            containers = containers.len(),
            extracted = records.len(),
            "match extraction complete"
        );
        records
    }
}
