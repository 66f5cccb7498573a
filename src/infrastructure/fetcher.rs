//! Document fetching - the collaborator seam around the volatile page
//!
//! The extraction engine never parses raw markup and never reaches for a
//! shared browser singleton. It is handed a [`DocumentFetcher`] at
//! construction, asks it to open a URL, and receives a [`Document`]: an
//! exclusively-owned, short-lived handle offering only structured locator
//! queries. The handle is released (dropped) before any retry backoff.
//!
//! [`HttpFetcher`] is the production implementation over `reqwest`. Tests
//! substitute their own fetcher with canned markup.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::debug;

use super::parsing::selectors::SelectorSet;

/// Failure opening a document, before any classification of its content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("navigation timed out")]
    Timeout,

    #[error("network failure: {0}")]
    Network(String),
}

/// Opens URLs and yields query-only document handles.
///
/// Implementations own the transport entirely, including whatever
/// anti-automation countermeasures they employ; the engine only sees a
/// status code and a queryable document.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Open `url` with a bounded navigation timeout.
    ///
    /// A non-success HTTP status is not an error here - the status is data
    /// for the caller's blocking classification.
    async fn open(&self, url: &str, timeout: Duration) -> Result<Document, FetchError>;
}

/// A fetched document: HTTP status plus a locator-based query surface.
///
/// Extraction is synchronous and read-only; the handle must not live
/// across a suspension point (the parsed tree is single-threaded).
pub struct Document {
    status: u16,
    html: Html,
}

impl Document {
    /// Build a document from a response body. Also the test seam: canned
    /// markup goes through the exact same query surface as production.
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            html: Html::parse_document(body),
        }
    }

    /// HTTP status the document was served with.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Root scope for whole-document queries.
    pub fn root(&self) -> ElementScope<'_> {
        ElementScope {
            element: self.html.root_element(),
        }
    }

    /// Whether the rendered text contains `marker` anywhere. Used for
    /// not-found page detection.
    pub fn body_contains(&self, marker: &str) -> bool {
        self.html
            .root_element()
            .text()
            .collect::<String>()
            .contains(marker)
    }

    /// First non-empty text across `selectors`, whole document.
    pub fn first_text(&self, selectors: &SelectorSet) -> Option<String> {
        selectors.first_text(self.root())
    }

    /// First non-empty attribute value across `selectors`, whole document.
    pub fn first_attr(&self, selectors: &SelectorSet, attr: &str) -> Option<String> {
        selectors.first_attr(self.root(), attr)
    }

    /// Elements of the first selector in `selectors` that matches at least
    /// one, whole document.
    pub fn select_all(&self, selectors: &SelectorSet) -> Vec<ElementScope<'_>> {
        selectors.select_all(self.root())
    }
}

/// A sub-element scope for per-container queries.
#[derive(Debug, Clone, Copy)]
pub struct ElementScope<'a> {
    element: ElementRef<'a>,
}

impl<'a> ElementScope<'a> {
    pub(crate) fn element(&self) -> ElementRef<'a> {
        self.element
    }

    pub(crate) fn from_element(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Whether this element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.element.value().classes().any(|c| c == class)
    }

    /// Trimmed concatenated text of this element.
    pub fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }
}

/// Production fetcher over a plain HTTP client.
///
/// The underlying client is a shared, finite resource; each `open` call
/// produces an independent, exclusively-owned document.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher presenting the given user agent.
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn open(&self, url: &str, timeout: Duration) -> Result<Document, FetchError> {
        debug!(url, "opening document");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport_error)?;

        debug!(url, status, bytes = body.len(), "document fetched");
        Ok(Document::new(status, &body))
    }
}

fn classify_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_reports_status_and_marker_text() {
        let doc = Document::new(200, "<html><body><p>Summoner Not Found</p></body></html>");
        assert!(doc.is_success());
        assert!(doc.body_contains("Summoner Not Found"));
        assert!(!doc.body_contains("absent marker"));

        let blocked = Document::new(403, "<html></html>");
        assert!(!blocked.is_success());
        assert_eq!(blocked.status(), 403);
    }
}
