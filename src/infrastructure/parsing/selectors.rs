//! Ordered-fallback selector resolution
//!
//! A [`SelectorSet`] is an ordered list of compiled CSS selectors encoding
//! a reliability preference: the most stable locator first, the most
//! generic (a bare heading tag, say) as last resort. Resolution walks the
//! list lazily and stops at the first candidate that produces a value.

use scraper::Selector;
use tracing::{debug, warn};

use super::ParseError;
use crate::infrastructure::fetcher::ElementScope;

/// An ordered list of candidate locators for one semantic field.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    field: String,
    selectors: Vec<Selector>,
}

impl SelectorSet {
    /// Compile selector strings, skipping invalid ones with a warning.
    /// Ending up with zero valid selectors from a non-empty list is a
    /// construction error: the field would be silently unextractable.
    pub fn compile(field: &str, selector_strings: &[String]) -> Result<Self, ParseError> {
        let mut selectors = Vec::new();
        let mut errors = Vec::new();

        for selector_str in selector_strings {
            match Selector::parse(selector_str) {
                Ok(selector) => selectors.push(selector),
                Err(e) => {
                    warn!(field, selector = %selector_str, "failed to compile selector: {e}");
                    errors.push(format!("'{selector_str}': {e}"));
                }
            }
        }

        if selectors.is_empty() && !selector_strings.is_empty() {
            return Err(ParseError::NoValidSelectors {
                field: field.to_string(),
                errors: errors.join(", "),
            });
        }

        Ok(Self {
            field: field.to_string(),
            selectors,
        })
    }

    /// First candidate whose first matching element has non-empty trimmed
    /// text. Returns `None` when the list is exhausted.
    pub fn first_text(&self, scope: ElementScope<'_>) -> Option<String> {
        for (i, selector) in self.selectors.iter().enumerate() {
            if let Some(element) = scope.element().select(selector).next() {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    debug!(field = %self.field, candidate = i, "resolved text");
                    return Some(text);
                }
            }
        }
        None
    }

    /// First candidate whose first matching element carries a non-empty
    /// `attr` value.
    pub fn first_attr(&self, scope: ElementScope<'_>, attr: &str) -> Option<String> {
        for (i, selector) in self.selectors.iter().enumerate() {
            if let Some(element) = scope.element().select(selector).next() {
                if let Some(value) = element.value().attr(attr) {
                    let value = value.trim();
                    if !value.is_empty() {
                        debug!(field = %self.field, candidate = i, attr, "resolved attribute");
                        return Some(value.to_string());
                    }
                }
            }
        }
        None
    }

    /// All elements of the first candidate that matches at least one.
    ///
    /// Later candidates are never consulted once one succeeds, even if they
    /// would match a different number of elements.
    pub fn select_all<'a>(&self, scope: ElementScope<'a>) -> Vec<ElementScope<'a>> {
        for (i, selector) in self.selectors.iter().enumerate() {
            let elements: Vec<ElementScope<'a>> = scope
                .element()
                .select(selector)
                .map(ElementScope::from_element)
                .collect();
            if !elements.is_empty() {
                debug!(field = %self.field, candidate = i, count = elements.len(), "resolved element list");
                return elements;
            }
        }
        Vec::new()
    }

    /// Whether any candidate matches at least one element.
    pub fn exists(&self, scope: ElementScope<'_>) -> bool {
        self.selectors
            .iter()
            .any(|selector| scope.element().select(selector).next().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fetcher::Document;

    fn set(field: &str, selectors: &[&str]) -> SelectorSet {
        let strings: Vec<String> = selectors.iter().map(|s| (*s).to_string()).collect();
        SelectorSet::compile(field, &strings).unwrap()
    }

    #[test]
    fn first_text_prefers_earlier_candidates() {
        let doc = Document::new(
            200,
            r#"<div class="specific">first</div><h1>generic</h1>"#,
        );
        let selectors = set("name", &[".specific", "h1"]);
        assert_eq!(doc.first_text(&selectors), Some("first".to_string()));
    }

    #[test]
    fn first_text_falls_through_empty_elements() {
        let doc = Document::new(200, r#"<div class="specific">  </div><h1>generic</h1>"#);
        let selectors = set("name", &[".specific", "h1"]);
        assert_eq!(doc.first_text(&selectors), Some("generic".to_string()));
    }

    #[test]
    fn first_text_absent_when_exhausted() {
        let doc = Document::new(200, "<p>nothing relevant</p>");
        let selectors = set("name", &[".specific", ".also-missing"]);
        assert_eq!(doc.first_text(&selectors), None);
    }

    #[test]
    fn select_all_stops_at_first_matching_candidate() {
        let doc = Document::new(
            200,
            r#"<li class="b">1</li><li class="b">2</li><li class="c">3</li>"#,
        );
        let selectors = set("rows", &[".a", ".b", ".c"]);
        let found = doc.select_all(&selectors);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text(), "1");
    }

    #[test]
    fn compile_skips_invalid_and_errors_when_all_invalid() {
        let mixed = vec![":::garbage".to_string(), ".ok".to_string()];
        assert!(SelectorSet::compile("field", &mixed).is_ok());

        let all_bad = vec![":::garbage".to_string()];
        assert!(SelectorSet::compile("field", &all_bad).is_err());
    }

    #[test]
    fn first_attr_reads_attribute_not_text() {
        let doc = Document::new(200, r#"<img class="icon" src="http://x/icon.png">"#);
        let selectors = set("icon", &[".icon"]);
        assert_eq!(
            doc.first_attr(&selectors, "src"),
            Some("http://x/icon.png".to_string())
        );
        assert_eq!(doc.first_attr(&selectors, "alt"), None);
    }
}
