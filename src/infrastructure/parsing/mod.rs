//! HTML extraction infrastructure
//!
//! Field extraction is declarative: each semantic field is an ordered list
//! of candidate locators (most specific first, most generic last) plus an
//! optional post-processing step. The resolvers stop at the first candidate
//! yielding a non-empty value; exhausting the list is "not found", never an
//! error.

pub mod config;
pub mod match_parser;
pub mod profile_parser;
pub mod selectors;

pub use config::{MatchSelectors, ProfileSelectors, SelectorConfig};
pub use match_parser::MatchParser;
pub use profile_parser::ProfileParser;
pub use selectors::SelectorSet;

use regex::Regex;
use thiserror::Error;

use super::fetcher::Document;

/// Construction-time parsing failures. Extraction itself never errors on
/// missing fields.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("no valid selectors compiled for '{field}': {errors}")]
    NoValidSelectors { field: String, errors: String },

    #[error("invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },
}

/// A parser that assembles typed output from a fetched document.
///
/// Implementations run their field resolvers against the document and never
/// retain it afterwards.
pub trait Extractor {
    type Output;

    fn extract(&self, doc: &Document) -> Self::Output;
}

/// Compile a post-processing pattern at parser construction time.
pub(crate) fn compile_pattern(name: &str, pattern: &str) -> Result<Regex, ParseError> {
    Regex::new(pattern).map_err(|e| ParseError::InvalidPattern {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
